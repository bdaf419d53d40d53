//! Generated commands.

use crate::op::Op;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One generated table operation with exactly the operands its op requires.
///
/// The JSON form is the queue payload: an object tagged by `op` with the
/// optional fields `key`, `value`, `expire` and `namespace`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Command {
    Get {
        key: String,
        namespace: String,
    },
    Set {
        key: String,
        value: Value,
        /// Expiry in seconds. `None` means the entry never expires.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expire: Option<u32>,
        namespace: String,
    },
    Exists {
        key: String,
        namespace: String,
    },
    Delete {
        key: String,
        namespace: String,
    },
    Ttl {
        key: String,
        namespace: String,
    },
    Count {
        namespace: String,
    },
    Clear {
        namespace: String,
    },
    Namespaces,
    ClearAll,
}

impl Command {
    pub fn op(&self) -> Op {
        match self {
            Command::Get { .. } => Op::Get,
            Command::Set { .. } => Op::Set,
            Command::Exists { .. } => Op::Exists,
            Command::Delete { .. } => Op::Delete,
            Command::Ttl { .. } => Op::Ttl,
            Command::Count { .. } => Op::Count,
            Command::Clear { .. } => Op::Clear,
            Command::Namespaces => Op::Namespaces,
            Command::ClearAll => Op::ClearAll,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Command::Get { key, .. }
            | Command::Set { key, .. }
            | Command::Exists { key, .. }
            | Command::Delete { key, .. }
            | Command::Ttl { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Command::Get { namespace, .. }
            | Command::Set { namespace, .. }
            | Command::Exists { namespace, .. }
            | Command::Delete { namespace, .. }
            | Command::Ttl { namespace, .. }
            | Command::Count { namespace }
            | Command::Clear { namespace } => Some(namespace),
            Command::Namespaces | Command::ClearAll => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Command::Set { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn expire(&self) -> Option<u32> {
        match self {
            Command::Set { expire, .. } => *expire,
            _ => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.op())?;
        if let Some(key) = self.key() {
            write!(f, " {key}")?;
        }
        if let Some(namespace) = self.namespace() {
            write!(f, " @{namespace}")?;
        }
        if let Some(expire) = self.expire() {
            write!(f, " ex={expire}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{FieldMap, Scalar};

    #[test]
    fn test_payload_shape() {
        let cmd = Command::Set {
            key: "key:1".into(),
            value: Value::Scalar(Scalar::Int(5)),
            expire: None,
            namespace: "namespace:0".into(),
        };
        assert_eq!(
            serde_json::to_string(&cmd).unwrap(),
            r#"{"op":"set","key":"key:1","value":5,"namespace":"namespace:0"}"#
        );

        assert_eq!(
            serde_json::to_string(&Command::ClearAll).unwrap(),
            r#"{"op":"clearAll"}"#
        );
        assert_eq!(
            serde_json::to_string(&Command::Count {
                namespace: "namespace:3".into()
            })
            .unwrap(),
            r#"{"op":"count","namespace":"namespace:3"}"#
        );
    }

    #[test]
    fn test_set_with_null_value_decodes() {
        let cmd: Command = serde_json::from_str(
            r#"{"op":"set","key":"key:0","value":null,"expire":12,"namespace":"namespace:0"}"#,
        )
        .unwrap();
        assert_eq!(cmd.value(), Some(&Value::Scalar(Scalar::Null)));
        assert_eq!(cmd.expire(), Some(12));
    }

    #[test]
    fn test_set_with_map_decodes() {
        let cmd: Command = serde_json::from_str(
            r#"{"op":"set","key":"key:0","value":{"field:0":1.5,"field:1":"x"},"namespace":"namespace:0"}"#,
        )
        .unwrap();
        let expected = FieldMap::from([
            ("field:0", Scalar::Float(1.5)),
            ("field:1", Scalar::Str("x".into())),
        ]);
        assert_eq!(cmd.value(), Some(&Value::Map(expected)));
    }

    #[test]
    fn test_malformed_payloads_fail() {
        for payload in [
            r#"{"op":"nonexistent"}"#,
            r#"{"op":"set","key":"key:0","namespace":"namespace:0"}"#,
            r#"{"op":"get","namespace":"namespace:0"}"#,
            r#"{"key":"key:0"}"#,
            r#"[1,2,3]"#,
            "not json",
        ] {
            assert!(
                serde_json::from_str::<Command>(payload).is_err(),
                "expected failure for {payload}"
            );
        }
    }

    #[test]
    fn test_operand_accessors() {
        let cmd = Command::Count {
            namespace: "namespace:0".into(),
        };
        assert_eq!(cmd.op(), Op::Count);
        assert_eq!(cmd.key(), None);
        assert_eq!(cmd.namespace(), Some("namespace:0"));
        assert_eq!(Command::Namespaces.namespace(), None);
    }
}
