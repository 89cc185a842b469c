use std::{fmt::Display, str::FromStr, sync::Arc};
pub use time::OffsetDateTime as Timestamp;

use crate::StreamKeyErr;

/// Maximum string length of a stream key.
pub const MAX_STREAM_KEY_LEN: usize = 249;

/// The stream name that subscribes a producer to every stream.
pub const WILDCARD_STREAM: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifies a stream. Messages are routed to producers by stream.
pub struct StreamKey {
    name: Arc<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// The set of streams a producer consumes.
pub enum Streams {
    #[default]
    All,
    Only(Vec<StreamKey>),
}

impl StreamKey {
    pub fn new<S: Into<String>>(key: S) -> Result<Self, StreamKeyErr> {
        let key = key.into();
        if is_valid_stream_key(key.as_str()) {
            Ok(Self {
                name: Arc::new(key),
            })
        } else {
            Err(StreamKeyErr::InvalidStreamKey)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Streams {
    /// Build a stream set from a list of names. The wildcard `*` anywhere in the list,
    /// or an empty list, means all streams.
    pub fn from_names<I, S>(names: I) -> Result<Self, StreamKeyErr>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name == WILDCARD_STREAM {
                return Ok(Self::All);
            }
            let key = StreamKey::new(name)?;
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        if keys.is_empty() {
            Ok(Self::All)
        } else {
            Ok(Self::Only(keys))
        }
    }

    pub fn contains(&self, key: &StreamKey) -> bool {
        match self {
            Self::All => true,
            Self::Only(keys) => keys.contains(key),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Display for StreamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for Streams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{WILDCARD_STREAM}"),
            Self::Only(keys) => {
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{key}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for StreamKey {
    type Err = StreamKeyErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreamKey::new(s)
    }
}

pub fn is_valid_stream_key(s: &str) -> bool {
    !s.is_empty() && s.len() <= MAX_STREAM_KEY_LEN && s.chars().all(is_valid_stream_key_char)
}

/// Returns true if this character can be used in a stream key.
pub fn is_valid_stream_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Streams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        let names = match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(name) => vec![name],
            OneOrMany::Many(names) => names,
        };
        Streams::from_names(names).map_err(serde::de::Error::custom)
    }
}
