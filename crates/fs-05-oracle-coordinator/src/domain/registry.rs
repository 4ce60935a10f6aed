//! # Local Oracle Registry
//!
//! The coordinator's in-memory view of the oracles it controls. Filled as
//! registrations succeed; read when requests arrive.

use parking_lot::RwLock;
use serde::Serialize;
use shared_types::{to_hex, Address};
use std::collections::BTreeMap;

/// An oracle account this coordinator answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalOracle {
    pub address: Address,
    pub indexes: [u8; 3],
}

impl LocalOracle {
    /// Shares at least one index with `request`.
    #[must_use]
    pub fn matches(&self, request: &[u8; 3]) -> bool {
        self.indexes.iter().any(|i| request.contains(i))
    }
}

/// JSON view for the HTTP listing.
#[derive(Debug, Clone, Serialize)]
pub struct LocalOracleView {
    pub address: String,
    pub indexes: [u8; 3],
}

impl From<&LocalOracle> for LocalOracleView {
    fn from(oracle: &LocalOracle) -> Self {
        Self {
            address: to_hex(&oracle.address),
            indexes: oracle.indexes,
        }
    }
}

/// Thread-safe registry of local oracles.
#[derive(Debug, Default)]
pub struct OracleRegistry {
    oracles: RwLock<BTreeMap<Address, LocalOracle>>,
}

impl OracleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `oracle`. Re-inserting the same address replaces it.
    pub fn insert(&self, oracle: LocalOracle) {
        self.oracles.write().insert(oracle.address, oracle);
    }

    /// Oracles matching any of `indexes`.
    #[must_use]
    pub fn matching(&self, indexes: &[u8; 3]) -> Vec<LocalOracle> {
        self.oracles
            .read()
            .values()
            .filter(|o| o.matches(indexes))
            .copied()
            .collect()
    }

    /// Snapshot of every local oracle.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LocalOracle> {
        self.oracles.read().values().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.oracles.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.oracles.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle(n: u8, indexes: [u8; 3]) -> LocalOracle {
        LocalOracle {
            address: [n; 20],
            indexes,
        }
    }

    #[test]
    fn test_matching_filters_by_index() {
        let registry = OracleRegistry::new();
        registry.insert(oracle(1, [0, 1, 2]));
        registry.insert(oracle(2, [3, 4, 5]));
        registry.insert(oracle(3, [2, 6, 9]));

        let matched: Vec<_> = registry
            .matching(&[2, 7, 8])
            .into_iter()
            .map(|o| o.address[0])
            .collect();
        assert_eq!(matched, vec![1, 3]);
        assert!(registry.matching(&[7, 8, 8]).is_empty());
    }

    #[test]
    fn test_insert_replaces() {
        let registry = OracleRegistry::new();
        registry.insert(oracle(1, [0, 1, 2]));
        registry.insert(oracle(1, [3, 4, 5]));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.snapshot()[0].indexes, [3, 4, 5]);
    }

    #[test]
    fn test_view_uses_hex() {
        let view = LocalOracleView::from(&oracle(0xab, [1, 2, 3]));
        assert_eq!(view.address, format!("0x{}", "ab".repeat(20)));
    }
}
