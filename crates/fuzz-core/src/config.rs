//! Generation parameters and operation filtering.

use crate::error::ConfigError;
use crate::op::{Op, ALL_OPS};
use serde::{Deserialize, Serialize};

/// Include/exclude filter applied to the master operation list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl OpFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Build a filter from two comma-separated lists. Blank items are dropped.
    pub fn from_csl(include: &str, exclude: &str) -> Self {
        Self::new(parse_csl(include), parse_csl(exclude))
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Apply the filter, keeping master-list order.
    ///
    /// Names are matched case-sensitively; names that match no operation are
    /// ignored, so an include list of only unknown names selects nothing.
    pub fn apply(&self) -> Result<Vec<Op>, ConfigError> {
        let selected: Vec<Op> = ALL_OPS
            .iter()
            .copied()
            .filter(|op| self.include.is_empty() || self.include.iter().any(|n| n == op.as_str()))
            .filter(|op| !self.exclude.iter().any(|n| n == op.as_str()))
            .collect();

        if selected.is_empty() {
            return Err(ConfigError::EmptyOpSet);
        }
        Ok(selected)
    }
}

fn parse_csl(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validated, read-only generation parameters shared by every worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    ops: Vec<Op>,
    key_space: u32,
    namespaces: u32,
    max_string_len: u32,
    max_fields: u32,
}

impl GenerationConfig {
    pub fn new(
        ops: Vec<Op>,
        key_space: u32,
        namespaces: u32,
        max_string_len: u32,
        max_fields: u32,
    ) -> Result<Self, ConfigError> {
        if ops.is_empty() {
            return Err(ConfigError::EmptyOpSet);
        }
        if key_space == 0 {
            return Err(ConfigError::invalid("keys", key_space));
        }
        if namespaces == 0 {
            return Err(ConfigError::invalid("namespaces", namespaces));
        }
        if max_string_len == 0 {
            return Err(ConfigError::invalid("max-string-len", max_string_len));
        }
        if max_fields == 0 {
            return Err(ConfigError::invalid("max-fields", max_fields));
        }
        Ok(Self {
            ops,
            key_space,
            namespaces,
            max_string_len,
            max_fields,
        })
    }

    /// Operation whitelist, never empty.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn key_space(&self) -> u32 {
        self.key_space
    }

    pub fn namespaces(&self) -> u32 {
        self.namespaces
    }

    pub fn max_string_len(&self) -> u32 {
        self.max_string_len
    }

    pub fn max_fields(&self) -> u32 {
        self.max_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter_selects_all() {
        assert_eq!(OpFilter::default().apply().unwrap(), ALL_OPS.to_vec());
    }

    #[test]
    fn test_include_intersects() {
        let ops = OpFilter::from_csl("set, get", "").apply().unwrap();
        // Master order wins over include order
        assert_eq!(ops, vec![Op::Get, Op::Set]);
    }

    #[test]
    fn test_exclude_subtracts() {
        let ops = OpFilter::from_csl("", "set").apply().unwrap();
        assert_eq!(ops.len(), 8);
        assert!(!ops.contains(&Op::Set));
    }

    #[test]
    fn test_unknown_include_is_empty() {
        assert_eq!(
            OpFilter::from_csl("nonexistent", "").apply(),
            Err(ConfigError::EmptyOpSet)
        );
    }

    #[test]
    fn test_include_then_exclude_everything() {
        assert_eq!(
            OpFilter::from_csl("get", "get").apply(),
            Err(ConfigError::EmptyOpSet)
        );
    }

    #[test]
    fn test_blank_items_ignored() {
        let filter = OpFilter::from_csl(" , get,,", "");
        assert_eq!(filter.include(), ["get".to_string()]);
    }

    #[test]
    fn test_bounds_validated() {
        assert!(GenerationConfig::new(vec![Op::Get], 0, 1, 1, 1).is_err());
        assert!(GenerationConfig::new(vec![Op::Get], 1, 0, 1, 1).is_err());
        assert!(GenerationConfig::new(vec![Op::Get], 1, 1, 0, 1).is_err());
        assert!(GenerationConfig::new(vec![Op::Get], 1, 1, 1, 0).is_err());
        assert_eq!(
            GenerationConfig::new(vec![], 1, 1, 1, 1),
            Err(ConfigError::EmptyOpSet)
        );
        assert!(GenerationConfig::new(vec![Op::Get], 1, 1, 1, 1).is_ok());
    }
}
