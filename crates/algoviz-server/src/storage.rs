//! Read-only algorithm catalog.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::Algorithm;

/// Seed records compiled into the binary.
const SEED: &str = include_str!("../data/algorithms.json");

/// Lookup over the algorithm catalog.
pub trait AlgorithmStore: Send + Sync {
    /// All records, in catalog order.
    fn list(&self) -> Vec<Algorithm>;

    /// One record by id.
    fn get(&self, id: &str) -> Option<Algorithm>;
}

/// In-memory catalog, populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    algorithms: Vec<Algorithm>,
}

impl MemoryStore {
    /// Store holding the built-in seed records.
    pub fn seeded() -> Result<Self> {
        Self::from_json(SEED)
    }

    /// Load a catalog from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let algorithms: Vec<Algorithm> = serde_json::from_str(json)?;
        Self::new(algorithms)
    }

    /// Build from records. Ids must be unique.
    pub fn new(algorithms: Vec<Algorithm>) -> Result<Self> {
        let mut seen = HashSet::new();
        if let Some(dup) = algorithms.iter().find(|a| !seen.insert(a.id.as_str())) {
            return Err(Error::InvalidInput(format!("duplicate algorithm id: {}", dup.id)));
        }

        for algo in algorithms.iter().filter(|a| a.generator_id().is_none()) {
            tracing::debug!(id = %algo.id, "catalog entry has no generator");
        }
        Ok(Self { algorithms })
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl AlgorithmStore for MemoryStore {
    fn list(&self) -> Vec<Algorithm> {
        self.algorithms.clone()
    }

    fn get(&self, id: &str) -> Option<Algorithm> {
        self.algorithms.iter().find(|a| a.id == id).cloned()
    }
}
