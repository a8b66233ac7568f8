//! Workspace derivation cache
//!
//! Derived views are cached per `(workspace, version token)` pair. The cache
//! keeps the most recently used entries up to a fixed capacity; switching to
//! an evicted workspace simply re-derives. A new version token for a cached
//! workspace replaces that workspace's entry.

use std::sync::Arc;

use tracing::debug;

use crate::derived::DerivedOntology;
use crate::hierarchy::DeriveResult;
use crate::model::OntologySnapshot;

/// Identifies one derived snapshot: which workspace, which ontology version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// The workspace the snapshot belongs to
    pub workspace_id: String,
    /// Opaque token that changes whenever the upstream ontology changes
    pub version: String,
}

/// Bounded most-recently-used cache of derived ontologies
#[derive(Debug)]
pub struct DerivationCache {
    capacity: usize,
    // Most recently used first.
    entries: Vec<(CacheKey, Arc<DerivedOntology>)>,
}

/// Default number of workspaces kept derived at once
pub const DEFAULT_CAPACITY: usize = 4;

impl Default for DerivationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl DerivationCache {
    /// Create a cache holding up to `capacity` workspaces
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Number of cached derivations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no derivations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a cached derivation without deriving
    pub fn get(&self, workspace_id: &str, version: &str) -> Option<Arc<DerivedOntology>> {
        self.entries
            .iter()
            .find(|(key, _)| key.workspace_id == workspace_id && key.version == version)
            .map(|(_, derived)| Arc::clone(derived))
    }

    /// Return the derivation for `(workspace_id, version)`, deriving on miss
    ///
    /// A hit moves the entry to the front. A miss derives from `snapshot`,
    /// drops any stale entry for the same workspace, and evicts the least
    /// recently used entry once over capacity.
    pub fn get_or_derive(
        &mut self,
        workspace_id: &str,
        version: &str,
        snapshot: &OntologySnapshot,
    ) -> DeriveResult<Arc<DerivedOntology>> {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|(key, _)| key.workspace_id == workspace_id && key.version == version)
        {
            let entry = self.entries.remove(pos);
            let derived = Arc::clone(&entry.1);
            self.entries.insert(0, entry);
            return Ok(derived);
        }

        debug!(workspace_id, version, "deriving ontology views");
        let derived = Arc::new(DerivedOntology::derive(snapshot)?);
        self.entries.retain(|(key, _)| key.workspace_id != workspace_id);
        self.entries.insert(
            0,
            (
                CacheKey {
                    workspace_id: workspace_id.to_string(),
                    version: version.to_string(),
                },
                Arc::clone(&derived),
            ),
        );
        self.entries.truncate(self.capacity);
        Ok(derived)
    }

    /// Drop every cached derivation for the given workspace
    pub fn invalidate_workspace(&mut self, workspace_id: &str) {
        self.entries.retain(|(key, _)| key.workspace_id != workspace_id);
    }

    /// Cached keys, most recently used first
    pub fn keys(&self) -> Vec<&CacheKey> {
        self.entries.iter().map(|(key, _)| key).collect()
    }
}
