use sea_shipper_types::{Message, Timestamp};
use time::{format_description::OwnedFormatItem, UtcOffset};

use crate::{ConfigErr, ProducerOptions};

/// Delimiter appended to each message unless configured otherwise.
pub const DEFAULT_DELIMITER: &str = "\n";

/// Prefix written before each payload in timestamped mode. Rendered in UTC.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second] UTC | ";

#[derive(Debug, Clone)]
/// How a message is packaged into bytes before it is handed to a sink.
///
/// Chosen once when the producer is configured; see [`MessageFormat::from_options`].
pub enum MessageFormat {
    /// The payload, byte for byte. No delimiter.
    Forward,
    /// The payload followed by the delimiter.
    Simple { delimiter: Vec<u8> },
    /// Timestamp prefix, payload, delimiter.
    Timestamp {
        format: OwnedFormatItem,
        delimiter: Vec<u8>,
    },
}

impl MessageFormat {
    pub fn forward() -> Self {
        Self::Forward
    }

    pub fn simple<D: Into<Vec<u8>>>(delimiter: D) -> Self {
        Self::Simple {
            delimiter: delimiter.into(),
        }
    }

    /// `pattern` is a `time` format description. It is rejected here if it does not parse,
    /// or if it cannot render a timestamp.
    pub fn timestamp<D: Into<Vec<u8>>>(pattern: &str, delimiter: D) -> Result<Self, ConfigErr> {
        let format = time::format_description::parse_owned::<1>(pattern)
            .map_err(|e| ConfigErr::InvalidTimestampFormat(format!("{pattern:?}: {e}")))?;
        Timestamp::UNIX_EPOCH
            .format(&format)
            .map_err(|e| ConfigErr::InvalidTimestampFormat(format!("{pattern:?}: {e}")))?;
        Ok(Self::Timestamp {
            format,
            delimiter: delimiter.into(),
        })
    }

    /// Pick the format for a producer:
    ///
    /// + `Forward` without an explicit delimiter: [`MessageFormat::Forward`]
    /// + `Forward` with an explicit delimiter: [`MessageFormat::Simple`]
    /// + otherwise: [`MessageFormat::Timestamp`] with the configured or default delimiter
    pub fn from_options(options: &ProducerOptions) -> Result<Self, ConfigErr> {
        let delimiter = unescape(options.delimiter().unwrap_or(DEFAULT_DELIMITER));
        if options.forward() {
            if options.delimiter().is_some() {
                Ok(Self::simple(delimiter))
            } else {
                Ok(Self::forward())
            }
        } else {
            Self::timestamp(
                options.timestamp_format().unwrap_or(DEFAULT_TIMESTAMP_FORMAT),
                delimiter,
            )
        }
    }

    pub fn delimiter(&self) -> &[u8] {
        match self {
            Self::Forward => &[],
            Self::Simple { delimiter } | Self::Timestamp { delimiter, .. } => delimiter,
        }
    }

    /// Frame a payload received at `timestamp`.
    pub fn format(&self, payload: &[u8], timestamp: &Timestamp) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(payload.len() + self.delimiter().len() + 32);
        self.format_into(payload, timestamp, &mut bytes);
        bytes
    }

    pub fn format_message(&self, message: &Message) -> Vec<u8> {
        self.format(message.payload(), message.timestamp())
    }

    /// Append the framed payload to `bytes`.
    pub fn format_into(&self, payload: &[u8], timestamp: &Timestamp, bytes: &mut Vec<u8>) {
        match self {
            Self::Forward => bytes.extend_from_slice(payload),
            Self::Simple { delimiter } => {
                bytes.extend_from_slice(payload);
                bytes.extend_from_slice(delimiter);
            }
            Self::Timestamp { format, delimiter } => {
                let start = bytes.len();
                if let Err(e) = timestamp.to_offset(UtcOffset::UTC).format_into(bytes, format) {
                    // the format was proven at configuration time; keep the message regardless
                    log::warn!("Timestamp format error: {e}");
                    bytes.truncate(start);
                }
                bytes.extend_from_slice(payload);
                bytes.extend_from_slice(delimiter);
            }
        }
    }
}

/// Decode the escape sequences `\n`, `\r` and `\t`. Any other backslash is kept as is.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let decoded = match chars.peek() {
                Some('n') => Some('\n'),
                Some('r') => Some('\r'),
                Some('t') => Some('\t'),
                _ => None,
            };
            if let Some(decoded) = decoded {
                chars.next();
                out.push(decoded);
                continue;
            }
        }
        out.push(c);
    }
    out
}
