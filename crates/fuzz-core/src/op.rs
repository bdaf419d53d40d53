//! The closed set of table operations.

use serde::{Deserialize, Serialize};

/// A table operation the fuzzer can issue.
///
/// The serialized names match the table's public method names
/// (`clearAll` keeps its camelCase spelling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Op {
    Get,
    Set,
    Exists,
    Delete,
    Ttl,
    Count,
    Clear,
    Namespaces,
    ClearAll,
}

/// Master operation list, in the order filters preserve.
pub const ALL_OPS: [Op; 9] = [
    Op::Get,
    Op::Set,
    Op::Exists,
    Op::Delete,
    Op::Ttl,
    Op::Count,
    Op::Clear,
    Op::Namespaces,
    Op::ClearAll,
];

impl Op {
    /// Wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Get => "get",
            Op::Set => "set",
            Op::Exists => "exists",
            Op::Delete => "delete",
            Op::Ttl => "ttl",
            Op::Count => "count",
            Op::Clear => "clear",
            Op::Namespaces => "namespaces",
            Op::ClearAll => "clearAll",
        }
    }

    /// Whether the operation addresses a single key.
    pub fn is_keyed(&self) -> bool {
        matches!(
            self,
            Op::Get | Op::Set | Op::Exists | Op::Delete | Op::Ttl
        )
    }

    /// Whether the operation is scoped to a namespace.
    ///
    /// `namespaces` and `clearAll` act on the whole table.
    pub fn is_namespaced(&self) -> bool {
        !matches!(self, Op::Namespaces | Op::ClearAll)
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_OPS
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operation: {s}"))
    }
}
