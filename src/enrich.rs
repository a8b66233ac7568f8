//! Concept and relationship enrichment
//!
//! Turns the flat snapshot maps into display-ready elements: each concept
//! gains its path, depth, accumulated properties, and inherited style; each
//! relationship additionally gains resolved, sorted domain/range concept
//! lists and a human-readable domain→range summary. Relationships whose
//! domain and range both resolve to nothing are dropped entirely.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::hierarchy::{DeriveResult, collect_chain, parent_chain};
use crate::model::{
    Concept, ConceptStyle, DEFAULT_GLYPH_ICON, OntologyItem, OntologySnapshot,
};
use crate::visibility::{is_visible, is_visible_with_roots};

/// A concept with its derived display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedConcept {
    /// The concept IRI
    pub title: String,
    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether end users may see this concept
    pub user_visible: bool,
    /// IRI of the parent concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_concept: Option<String>,
    /// Slash-joined visible ancestor display names, root first
    pub path: String,
    /// Same, with hidden root sentinels included
    pub full_path: String,
    /// `path` segment count minus one
    pub depth: i32,
    /// `full_path` segment count minus one
    pub full_depth: i32,
    /// Deduplicated property IRIs, own properties first, then inherited
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    /// Style attributes after inheritance, glyph icon always filled in
    #[serde(flatten)]
    pub style: ConceptStyle,
}

impl OntologyItem for EnrichedConcept {
    fn title(&self) -> &str {
        &self.title
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn user_visible(&self) -> bool {
        self.user_visible
    }

    fn parent(&self) -> Option<&str> {
        self.parent_concept.as_deref()
    }

    fn properties(&self) -> &[String] {
        &self.properties
    }
}

/// A relationship with its derived display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRelationship {
    /// The relationship IRI
    pub title: String,
    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether end users may see this relationship
    pub user_visible: bool,
    /// IRI of the parent relationship
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_iri: Option<String>,
    /// Slash-joined visible ancestor display names, root first
    pub path: String,
    /// Same, with hidden root sentinels included
    pub full_path: String,
    /// `path` segment count minus one
    pub depth: i32,
    /// `full_path` segment count minus one
    pub full_depth: i32,
    /// Deduplicated property IRIs, own properties first, then inherited
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    /// Resolved source concept IRIs, display-sorted, shallowest first
    pub domain_concept_iris: Vec<String>,
    /// Resolved target concept IRIs, display-sorted, shallowest first
    pub range_concept_iris: Vec<String>,
    /// Human-readable domain→range summary
    pub display_name_sub: String,
    /// Glyph icon of the first sorted domain concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_glyph_icon_href: Option<String>,
    /// Glyph icon of the first sorted range concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_glyph_icon_href: Option<String>,
}

impl OntologyItem for EnrichedRelationship {
    fn title(&self) -> &str {
        &self.title
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn user_visible(&self) -> bool {
        self.user_visible
    }

    fn parent(&self) -> Option<&str> {
        self.parent_iri.as_deref()
    }

    fn properties(&self) -> &[String] {
        &self.properties
    }
}

fn inherit(slot: &mut Option<String>, value: &Option<String>) {
    if slot.as_deref().is_none_or(str::is_empty)
        && value.as_deref().is_some_and(|v| !v.is_empty())
    {
        *slot = value.clone();
    }
}

/// Resolve a concept's style along its chain, nearest value winning
fn resolve_style(chain: &[&Concept]) -> ConceptStyle {
    let mut style = ConceptStyle::default();
    for concept in chain {
        let s = &concept.style;
        inherit(&mut style.color, &s.color);
        inherit(&mut style.display_type, &s.display_type);
        inherit(&mut style.glyph_icon_href, &s.glyph_icon_href);
        inherit(&mut style.glyph_icon_selected_href, &s.glyph_icon_selected_href);
        inherit(&mut style.title_formula, &s.title_formula);
        inherit(&mut style.subtitle_formula, &s.subtitle_formula);
        inherit(&mut style.time_formula, &s.time_formula);
        inherit(&mut style.validation_formula, &s.validation_formula);
    }
    if style.glyph_icon_href.is_none() {
        style.glyph_icon_href = Some(DEFAULT_GLYPH_ICON.to_string());
    }
    style
}

/// Enrich every concept in the snapshot
pub fn enrich_concepts(
    snapshot: &OntologySnapshot,
) -> DeriveResult<BTreeMap<String, EnrichedConcept>> {
    let mut enriched = BTreeMap::new();
    for concept in snapshot.concepts.values() {
        let chain = parent_chain(&snapshot.concepts, concept, "concept")?;
        let info = collect_chain(&chain);
        enriched.insert(
            concept.title.clone(),
            EnrichedConcept {
                title: concept.title.clone(),
                display_name: concept.display_name.clone(),
                user_visible: concept.user_visible,
                parent_concept: concept.parent_concept.clone(),
                path: info.path,
                full_path: info.full_path,
                depth: info.depth,
                full_depth: info.full_depth,
                properties: info.properties,
                style: resolve_style(&chain),
            },
        );
    }
    Ok(enriched)
}

/// Resolve concept IRIs against the enriched map, dropping dangling ones,
/// sorted by display name and then stably by depth (shallowest first)
fn resolve_sorted<'a>(
    iris: &[String],
    concepts: &'a BTreeMap<String, EnrichedConcept>,
) -> Vec<&'a EnrichedConcept> {
    let mut resolved: Vec<&EnrichedConcept> =
        iris.iter().filter_map(|iri| concepts.get(iri)).collect();
    resolved.sort_by(|a, b| a.display_label().cmp(b.display_label()));
    resolved.sort_by_key(|c| c.depth);
    resolved
}

/// Build the domain→range summary line(s) for a relationship
fn domain_range_summary(
    domain: &[&EnrichedConcept],
    range: &[&EnrichedConcept],
) -> String {
    if domain.len() == 1 {
        let d = domain[0].display_label();
        range
            .iter()
            .map(|r| format!("{d}→{}", r.display_label()))
            .collect::<Vec<_>>()
            .join("\n")
    } else if range.len() == 1 {
        let r = range[0].display_label();
        domain
            .iter()
            .map(|d| format!("{}→{r}", d.display_label()))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        let domains = domain
            .iter()
            .map(|c| c.display_label())
            .collect::<Vec<_>>()
            .join(", ");
        let ranges = range
            .iter()
            .map(|c| c.display_label())
            .collect::<Vec<_>>()
            .join(", ");
        format!("({domains}) → ({ranges})")
    }
}

/// Enrich every relationship, dropping those with no resolvable concepts
pub fn enrich_relationships(
    snapshot: &OntologySnapshot,
    concepts: &BTreeMap<String, EnrichedConcept>,
) -> DeriveResult<BTreeMap<String, EnrichedRelationship>> {
    let mut enriched = BTreeMap::new();
    for rel in snapshot.relationships.values() {
        let chain = parent_chain(&snapshot.relationships, rel, "relationship")?;
        let info = collect_chain(&chain);

        let domain = resolve_sorted(&rel.domain_concept_iris, concepts);
        let range = resolve_sorted(&rel.range_concept_iris, concepts);
        if domain.is_empty() && range.is_empty() {
            // References no existing concepts; not part of the usable ontology.
            continue;
        }

        enriched.insert(
            rel.title.clone(),
            EnrichedRelationship {
                title: rel.title.clone(),
                display_name: rel.display_name.clone(),
                user_visible: rel.user_visible,
                parent_iri: rel.parent_iri.clone(),
                path: info.path,
                full_path: info.full_path,
                depth: info.depth,
                full_depth: info.full_depth,
                properties: info.properties,
                display_name_sub: domain_range_summary(&domain, &range),
                domain_glyph_icon_href: domain
                    .first()
                    .and_then(|c| c.style.glyph_icon_href.clone()),
                range_glyph_icon_href: range
                    .first()
                    .and_then(|c| c.style.glyph_icon_href.clone()),
                domain_concept_iris: domain.iter().map(|c| c.title.clone()).collect(),
                range_concept_iris: range.iter().map(|c| c.title.clone()).collect(),
            },
        );
    }
    Ok(enriched)
}

/// Visible concepts, sorted by path
pub fn visible_concepts(concepts: &BTreeMap<String, EnrichedConcept>) -> Vec<EnrichedConcept> {
    let mut list: Vec<EnrichedConcept> = concepts
        .values()
        .filter(|c| is_visible(*c))
        .cloned()
        .collect();
    list.sort_by(|a, b| a.path.cmp(&b.path));
    list
}

/// Visible relationships, sorted by path
///
/// A relationship shows only when it is visible itself and at least one
/// domain and one range concept would contribute to a full path.
pub fn visible_relationships(
    relationships: &BTreeMap<String, EnrichedRelationship>,
    concepts: &BTreeMap<String, EnrichedConcept>,
) -> Vec<EnrichedRelationship> {
    let endpoint_visible = |iris: &[String]| {
        iris.iter()
            .filter_map(|iri| concepts.get(iri))
            .any(|c| is_visible_with_roots(c))
    };

    let mut list: Vec<EnrichedRelationship> = relationships
        .values()
        .filter(|r| {
            is_visible(*r)
                && endpoint_visible(&r.domain_concept_iris)
                && endpoint_visible(&r.range_concept_iris)
        })
        .cloned()
        .collect();
    list.sort_by(|a, b| a.path.cmp(&b.path));
    list
}
