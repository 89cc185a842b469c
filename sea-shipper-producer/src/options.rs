use sea_shipper_types::Streams;

use crate::ConfigErr;

/// Default capacity of the intake queue.
pub const DEFAULT_BUFFER: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase", default))]
/// Options shared by all producers.
///
/// With the `serde` feature, this can be read from a plugin configuration section:
///
/// ```yaml
/// Enable: true
/// Buffer: 1024
/// Forward: false
/// Delimiter: "\r\n"
/// Stream:
///   - "error"
///   - "default"
/// Filter: "^ERROR"
/// ```
///
/// Unknown keys are ignored. Values are validated once, by [`crate::ProducerBase::new`].
pub struct ProducerOptions {
    enable: bool,
    buffer: usize,
    forward: bool,
    delimiter: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "Stream"))]
    streams: Streams,
    filter: Option<String>,
    timestamp_format: Option<String>,
}

impl Default for ProducerOptions {
    fn default() -> Self {
        Self {
            enable: true,
            buffer: DEFAULT_BUFFER,
            forward: false,
            delimiter: None,
            streams: Streams::All,
            filter: None,
            timestamp_format: None,
        }
    }
}

impl ProducerOptions {
    /// Whether the producer should be instantiated at all. Honoured by the plugin registry,
    /// not by the producer itself.
    pub fn enable(&self) -> bool {
        self.enable
    }

    pub fn set_enable(&mut self, enable: bool) -> &mut Self {
        self.enable = enable;
        self
    }

    /// Capacity of the intake queue.
    pub fn buffer(&self) -> usize {
        self.buffer
    }

    pub fn set_buffer(&mut self, buffer: usize) -> Result<&mut Self, ConfigErr> {
        if buffer == 0 {
            return Err(ConfigErr::InvalidBuffer(buffer));
        }
        self.buffer = buffer;
        Ok(self)
    }

    /// If set, payloads are passed as-is, without timestamp prefix.
    pub fn forward(&self) -> bool {
        self.forward
    }

    pub fn set_forward(&mut self, forward: bool) -> &mut Self {
        self.forward = forward;
        self
    }

    /// The explicitly configured delimiter, escape sequences not yet decoded.
    pub fn delimiter(&self) -> Option<&str> {
        self.delimiter.as_deref()
    }

    /// Escape sequences `\n`, `\r` and `\t` are decoded when the producer is built.
    pub fn set_delimiter<S: Into<String>>(&mut self, delimiter: S) -> &mut Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    pub fn set_streams(&mut self, streams: Streams) -> &mut Self {
        self.streams = streams;
        self
    }

    /// Subscribe to streams by name. `*` subscribes to all streams.
    pub fn set_stream_names<I, S>(&mut self, names: I) -> Result<&mut Self, ConfigErr>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.streams = Streams::from_names(names)?;
        Ok(self)
    }

    /// The acceptance filter pattern. An empty pattern counts as no filter.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref().filter(|pattern| !pattern.is_empty())
    }

    pub fn set_filter<S: Into<String>>(&mut self, pattern: S) -> &mut Self {
        self.filter = Some(pattern.into());
        self
    }

    /// A `time` format description for the timestamp prefix, e.g.
    /// `[year]-[month]-[day] [hour]:[minute]:[second] | `.
    pub fn timestamp_format(&self) -> Option<&str> {
        self.timestamp_format.as_deref()
    }

    pub fn set_timestamp_format<S: Into<String>>(&mut self, format: S) -> &mut Self {
        self.timestamp_format = Some(format.into());
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ProducerOptions::default();
        assert!(options.enable());
        assert_eq!(options.buffer(), DEFAULT_BUFFER);
        assert!(!options.forward());
        assert_eq!(options.delimiter(), None);
        assert!(options.streams().is_all());
        assert_eq!(options.filter(), None);
        assert_eq!(options.timestamp_format(), None);
    }

    #[test]
    fn test_setters() {
        let mut options = ProducerOptions::default();
        options
            .set_buffer(8)
            .unwrap()
            .set_forward(true)
            .set_delimiter("|")
            .set_filter("");
        options.set_stream_names(["error", "default"]).unwrap();
        assert_eq!(options.buffer(), 8);
        assert!(options.forward());
        assert_eq!(options.delimiter(), Some("|"));
        assert_eq!(options.filter(), None);
        assert_eq!(options.streams().to_string(), "error,default");
        assert!(matches!(
            options.set_buffer(0),
            Err(ConfigErr::InvalidBuffer(0))
        ));
        assert!(matches!(
            options.set_stream_names(["bad name"]),
            Err(ConfigErr::StreamKeyErr(_))
        ));
        options.set_streams(Streams::All);
        assert!(options.streams().is_all());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize() {
        let options: ProducerOptions = serde_json::from_str(
            r#"{
                "Enable": false,
                "Buffer": 16,
                "Forward": true,
                "Delimiter": "\\r\\n",
                "Stream": ["error", "default"],
                "Filter": "^ERROR",
                "TimestampFormat": "[hour]:[minute] ",
                "Unknown": { "ignored": true }
            }"#,
        )
        .unwrap();
        assert!(!options.enable());
        assert_eq!(options.buffer(), 16);
        assert!(options.forward());
        assert_eq!(options.delimiter(), Some("\\r\\n"));
        assert_eq!(options.streams().to_string(), "error,default");
        assert_eq!(options.filter(), Some("^ERROR"));
        assert_eq!(options.timestamp_format(), Some("[hour]:[minute] "));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_defaults() {
        let options: ProducerOptions = serde_json::from_str(r#"{ "Stream": "*" }"#).unwrap();
        assert_eq!(options, ProducerOptions::default());
        let options: ProducerOptions = serde_json::from_str(r#"{ "Stream": "error" }"#).unwrap();
        assert_eq!(options.streams().to_string(), "error");
    }
}
