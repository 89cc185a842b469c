use std::str::Utf8Error;

use crate::{StreamKey, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A unit of data travelling through the pipeline.
///
/// Created by an input stage, moved through channels and consumed exactly once by a producer.
/// The stream key and timestamp are assigned by the surrounding pipeline.
pub struct Message {
    stream_key: StreamKey,
    timestamp: Timestamp,
    payload: Vec<u8>,
}

impl Message {
    pub fn new<P: Into<Vec<u8>>>(stream_key: StreamKey, timestamp: Timestamp, payload: P) -> Self {
        Self {
            stream_key,
            timestamp,
            payload: payload.into(),
        }
    }

    /// Stamp the message with the current time in UTC.
    pub fn now<P: Into<Vec<u8>>>(stream_key: StreamKey, payload: P) -> Self {
        Self::new(stream_key, Timestamp::now_utc(), payload)
    }

    pub fn stream_key(&self) -> &StreamKey {
        &self.stream_key
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn size(&self) -> usize {
        self.payload.len()
    }

    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.payload)
    }

    /// Re-route this message onto another stream.
    pub fn set_stream_key(&mut self, stream_key: StreamKey) {
        self.stream_key = stream_key;
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    pub fn take(self) -> (StreamKey, Timestamp, Vec<u8>) {
        let Self {
            stream_key,
            timestamp,
            payload,
        } = self;
        (stream_key, timestamp, payload)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reroute_and_take() {
        let mut message = Message::now(StreamKey::new("default").unwrap(), "hello");
        assert_eq!(message.as_str(), Ok("hello"));
        message.set_stream_key(StreamKey::new("audit").unwrap());
        assert_eq!(message.stream_key().name(), "audit");

        let timestamp = *message.timestamp();
        let (stream_key, at, payload) = message.clone().take();
        assert_eq!(stream_key.name(), "audit");
        assert_eq!(at, timestamp);
        assert_eq!(payload, b"hello");
        assert_eq!(message.into_payload(), b"hello");
    }
}
