//! Queue payload codec.

use crate::error::QueueError;
use fuzz_core::Command;
use tracing::debug;

/// Encode a command as its JSON payload.
pub fn encode_command(command: &Command) -> Result<String, QueueError> {
    Ok(serde_json::to_string(command)?)
}

/// Decode a payload, returning `None` for anything that is not a command.
///
/// Malformed payloads are skipped by consumers rather than treated as errors.
pub fn decode_command(payload: &str) -> Option<Command> {
    match serde_json::from_str(payload) {
        Ok(command) => Some(command),
        Err(e) => {
            debug!("Skipping malformed queue payload ({e}): {payload}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzz_core::{FieldMap, Scalar, Value};

    #[test]
    fn test_payload_round_trip() {
        let commands = vec![
            Command::Set {
                key: "key:3".into(),
                value: Value::Map(FieldMap::from([
                    ("field:0", Scalar::Float(12.0)),
                    ("field:1", Scalar::Null),
                    ("field:2", Scalar::Str("Zq9".into())),
                ])),
                expire: Some(300),
                namespace: "namespace:1".into(),
            },
            Command::Ttl {
                key: "key:0".into(),
                namespace: "namespace:0".into(),
            },
            Command::Namespaces,
        ];
        for command in commands {
            let payload = encode_command(&command).unwrap();
            assert_eq!(decode_command(&payload), Some(command));
        }
    }

    #[test]
    fn test_malformed_payload_is_skipped() {
        assert_eq!(decode_command("{\"op\":\"explode\"}"), None);
        assert_eq!(decode_command(""), None);
    }
}
