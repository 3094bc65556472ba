use thiserror::Error;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Everything that can go wrong between the console and the simulator.
///
/// Only [`ClientError::ChannelClosed`] ends a session; the rest are reported
/// to the user and the session carries on.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The socket went away. Sessions are not resumed.
    #[error("connection closed: {reason}")]
    ChannelClosed { reason: String },

    /// An inbound frame or update payload was not the JSON we expect.
    #[error("failed to decode {context}: {source}")]
    ProtocolDecode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON whose contents break the snapshot layout.
    #[error("malformed snapshot: {reason}")]
    MalformedSnapshot { reason: String },

    /// The simulator reported a failed command.
    #[error("{0}")]
    Simulator(String),

    #[error("'{input}' is not a hexadecimal address")]
    AddressParse { input: String },

    #[error("address {address:#010x} is past the end of memory ({limit:#x} bytes)")]
    AddressOutOfRange { address: u32, limit: usize },
}

impl ClientError {
    pub fn closed(reason: impl Into<String>) -> Self {
        Self::ChannelClosed {
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(context: &'static str, source: serde_json::Error) -> Self {
        Self::ProtocolDecode { context, source }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            reason: reason.into(),
        }
    }

    /// Whether the session is unusable after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ChannelClosed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_channel_close_is_fatal() {
        assert!(ClientError::closed("gone").is_fatal());
        assert!(!ClientError::Simulator("Unable to load a.exe".into()).is_fatal());
        assert!(!ClientError::AddressParse { input: "zz".into() }.is_fatal());
        assert!(!ClientError::malformed("short").is_fatal());
    }

    #[test]
    fn simulator_message_is_shown_verbatim() {
        let err = ClientError::Simulator("Unable to load x. Please check your path.".into());
        assert_eq!(err.to_string(), "Unable to load x. Please check your path.");
    }

    #[test]
    fn out_of_range_formats_address() {
        let err = ClientError::AddressOutOfRange {
            address: 0x1000,
            limit: 0x100,
        };
        assert_eq!(
            err.to_string(),
            "address 0x00001000 is past the end of memory (0x100 bytes)"
        );
    }
}
