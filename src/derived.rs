//! Whole-snapshot derivation
//!
//! Runs the full pipeline in dependency order over one snapshot and holds
//! every derived structure. Snapshots are replaced wholesale upstream, so a
//! `DerivedOntology` is computed once per snapshot version and reused until
//! the version changes (see [`crate::cache`]).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::enrich::{
    EnrichedConcept, EnrichedRelationship, enrich_concepts, enrich_relationships,
    visible_concepts, visible_relationships,
};
use crate::hierarchy::DeriveResult;
use crate::indexes::{
    ancestors, concepts_by_related_concept, descendants, other_concepts,
    relationships_by_concept,
};
use crate::model::{OntologySnapshot, Property};
use crate::properties::{
    PropertyRow, compounds_by_dependent, sorted_properties, with_group_headers,
};

/// Every view derived from one ontology snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedOntology {
    /// Enriched concepts keyed by IRI
    pub concepts: BTreeMap<String, EnrichedConcept>,
    /// Enriched relationships keyed by IRI; unresolvable ones are dropped
    pub relationships: BTreeMap<String, EnrichedRelationship>,
    /// Visible concepts in path order
    pub visible_concepts: Vec<EnrichedConcept>,
    /// Visible relationships in path order
    pub visible_relationships: Vec<EnrichedRelationship>,
    /// Concept IRI → ancestor IRIs, nearest first
    pub concept_ancestors: BTreeMap<String, Vec<String>>,
    /// Concept IRI → all descendant IRIs
    pub concept_descendants: BTreeMap<String, Vec<String>>,
    /// Relationship IRI → ancestor IRIs, nearest first
    pub relationship_ancestors: BTreeMap<String, Vec<String>>,
    /// Concept IRI → visible relationship titles that mention it
    pub relationships_by_concept: BTreeMap<String, Vec<String>>,
    /// Visible concept IRI → related concept IRIs (own and inherited)
    pub concepts_by_related_concept: BTreeMap<String, Vec<String>>,
    /// All properties in display order
    pub properties_list: Vec<Property>,
    /// Display order with synthetic group headers interleaved
    pub property_rows: Vec<PropertyRow>,
    /// Dependent property IRI → compound properties depending on it
    pub compounds_by_dependent: BTreeMap<String, Vec<String>>,
}

impl DerivedOntology {
    /// Derive every view from the snapshot
    ///
    /// Cycle detection happens here, once per snapshot; all downstream
    /// builders can then assume an acyclic forest.
    pub fn derive(snapshot: &OntologySnapshot) -> DeriveResult<Self> {
        let concepts = enrich_concepts(snapshot)?;
        let relationships = enrich_relationships(snapshot, &concepts)?;
        debug!(
            concepts = concepts.len(),
            relationships = relationships.len(),
            properties = snapshot.properties.len(),
            "derived ontology views"
        );

        let visible_concepts = visible_concepts(&concepts);
        let visible_relationships = visible_relationships(&relationships, &concepts);

        let concept_ancestors = ancestors(&snapshot.concepts);
        let concept_descendants = descendants(&snapshot.concepts);
        let relationship_ancestors = ancestors(&snapshot.relationships);

        let relationships_by_concept = relationships_by_concept(&visible_relationships);
        let adjacency = other_concepts(&visible_relationships);
        let concepts_by_related_concept =
            concepts_by_related_concept(&concepts, &concept_ancestors, &adjacency);

        let properties_list = sorted_properties(&snapshot.properties);
        let property_rows = with_group_headers(&properties_list);
        let compounds_by_dependent = compounds_by_dependent(&snapshot.properties);

        Ok(Self {
            concepts,
            relationships,
            visible_concepts,
            visible_relationships,
            concept_ancestors,
            concept_descendants,
            relationship_ancestors,
            relationships_by_concept,
            concepts_by_related_concept,
            properties_list,
            property_rows,
            compounds_by_dependent,
        })
    }
}
