//! Parent-chain traversal
//!
//! Walks an element's parent pointers up to its root, producing display paths,
//! depths, and the accumulated property set. The walk is iterative with an
//! explicit visited set, so a cyclic chain is reported as an error instead of
//! exhausting the stack. A dangling parent reference simply ends the chain.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::model::OntologyItem;
use crate::visibility::{is_visible, is_visible_with_roots};

/// Errors raised while deriving views from a snapshot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// A parent chain loops back on itself
    #[error("cyclic {category} hierarchy at '{title}'")]
    CyclicHierarchy {
        /// The element category ("concept" or "relationship")
        category: &'static str,
        /// IRI of the element whose chain revisits an ancestor
        title: String,
    },
}

/// Result type for derivation operations
pub type DeriveResult<T> = Result<T, DeriveError>;

/// Walk from `start` up its parent chain, leaf first
///
/// Returns the chain including `start` itself. A parent IRI that resolves to
/// no element ends the chain; a parent IRI that revisits an element already
/// walked is a cycle.
pub fn parent_chain<'a, T: OntologyItem>(
    elements: &'a BTreeMap<String, T>,
    start: &'a T,
    category: &'static str,
) -> DeriveResult<Vec<&'a T>> {
    let mut chain = vec![start];
    let mut seen = BTreeSet::from([start.title()]);
    let mut current = start;

    while let Some(parent_iri) = current.parent() {
        let Some(parent) = elements.get(parent_iri) else {
            break;
        };
        if !seen.insert(parent.title()) {
            return Err(DeriveError::CyclicHierarchy {
                category,
                title: start.title().to_string(),
            });
        }
        chain.push(parent);
        current = parent;
    }

    Ok(chain)
}

/// Paths, depths, and accumulated properties computed from a parent chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    /// Slash-joined visible ancestor display names, root first
    pub path: String,
    /// Same, but root sentinels contribute their segment too
    pub full_path: String,
    /// Number of `path` segments minus one; `-1` for a fully hidden chain
    pub depth: i32,
    /// Number of `full_path` segments minus one
    pub full_depth: i32,
    /// Deduplicated property IRIs along the chain, the element's own first
    pub properties: Vec<String>,
}

/// Compute paths and accumulated properties for a leaf-first chain
pub fn collect_chain<T: OntologyItem>(chain: &[&T]) -> PathInfo {
    let mut names = Vec::new();
    let mut full_names = Vec::new();
    let mut properties: Vec<String> = Vec::new();

    for node in chain {
        if is_visible_with_roots(*node) {
            full_names.push(node.display_label());
        }
        if is_visible(*node) {
            names.push(node.display_label());
        }
        properties.extend(node.properties().iter().cloned());
    }

    names.reverse();
    full_names.reverse();

    let mut seen = BTreeSet::new();
    properties.retain(|p| seen.insert(p.clone()));

    PathInfo {
        depth: names.len() as i32 - 1,
        full_depth: full_names.len() as i32 - 1,
        path: format!("/{}", names.join("/")),
        full_path: format!("/{}", full_names.join("/")),
        properties,
    }
}
