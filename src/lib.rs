//! ontoview - derives hierarchical, display-ready views from flat ontology snapshots.
//!
//! A snapshot holds concepts, relationships, and properties keyed by IRI. The
//! derivation pipeline enriches them with paths, depths, inherited display
//! attributes, ancestor/descendant closures, and relationship↔concept
//! indexes, and caches the result per workspace and ontology version.

pub mod cache;
pub mod derived;
pub mod enrich;
pub mod hierarchy;
pub mod indexes;
pub mod io;
pub mod model;
pub mod properties;
pub mod visibility;
