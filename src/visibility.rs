//! Visibility predicate for ontology elements
//!
//! An element is shown to end users only when it is user-visible, carries a
//! display name, and is not one of the well-known root sentinels. The root
//! sentinels are included when computing full paths, where hidden roots still
//! contribute a segment.

use crate::model::{EDGE_THING, OntologyItem, ROOT_CONCEPT, THING_CONCEPT};

/// Whether the given IRI is one of the hidden root sentinels
pub fn is_root_sentinel(iri: &str) -> bool {
    iri == THING_CONCEPT || iri == ROOT_CONCEPT || iri == EDGE_THING
}

fn visible(item: &(impl OntologyItem + ?Sized), root_items_hidden: bool) -> bool {
    if !item.user_visible() {
        return false;
    }
    if item.display_name().is_none_or(str::is_empty) {
        return false;
    }
    if root_items_hidden && is_root_sentinel(item.title()) {
        return false;
    }
    true
}

/// Whether the element appears in normal listings (root sentinels hidden)
pub fn is_visible(item: &(impl OntologyItem + ?Sized)) -> bool {
    visible(item, true)
}

/// Whether the element contributes to full paths (root sentinels included)
pub fn is_visible_with_roots(item: &(impl OntologyItem + ?Sized)) -> bool {
    visible(item, false)
}
