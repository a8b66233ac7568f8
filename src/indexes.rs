//! Ancestor, descendant, and cross-reference indexes
//!
//! Closure builders over the parent-pointer forest (ancestors walk up,
//! descendants walk the inverted children grouping) plus the
//! relationship↔concept indexes that back picker filtering. All outputs are
//! freshly built `BTreeMap`s; inputs are never mutated.

use std::collections::{BTreeMap, BTreeSet};

use crate::enrich::{EnrichedConcept, EnrichedRelationship};
use crate::model::OntologyItem;
use crate::visibility::is_visible;

/// For every element, its ancestor IRIs, nearest first
///
/// The element itself is excluded. Dangling parent references end the walk;
/// revisiting an already collected ancestor ends it too, so the builder
/// terminates even on a snapshot that failed cycle validation.
pub fn ancestors<T: OntologyItem>(elements: &BTreeMap<String, T>) -> BTreeMap<String, Vec<String>> {
    let mut index = BTreeMap::new();
    for element in elements.values() {
        let mut collected = Vec::new();
        let mut seen = BTreeSet::from([element.title()]);
        let mut current = element;
        while let Some(parent_iri) = current.parent() {
            let Some(parent) = elements.get(parent_iri) else {
                break;
            };
            if !seen.insert(parent.title()) {
                break;
            }
            collected.push(parent.title().to_string());
            current = parent;
        }
        index.insert(element.title().to_string(), collected);
    }
    index
}

/// For every element, all descendant IRIs (children, grandchildren, ...)
///
/// The element itself is excluded and duplicates are removed.
pub fn descendants<T: OntologyItem>(
    elements: &BTreeMap<String, T>,
) -> BTreeMap<String, Vec<String>> {
    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for element in elements.values() {
        if let Some(parent) = element.parent() {
            children.entry(parent).or_default().push(element.title());
        }
    }

    let mut index = BTreeMap::new();
    for element in elements.values() {
        let mut collected = Vec::new();
        let mut seen = BTreeSet::from([element.title()]);
        let mut stack: Vec<&str> = children.get(element.title()).cloned().unwrap_or_default();
        while let Some(child) = stack.pop() {
            if !seen.insert(child) {
                continue;
            }
            collected.push(child.to_string());
            if let Some(grandchildren) = children.get(child) {
                stack.extend(grandchildren.iter().copied());
            }
        }
        index.insert(element.title().to_string(), collected);
    }
    index
}

/// Concept IRI → titles of visible relationships that mention it
///
/// A relationship counts for every concept in its domain and range lists.
pub fn relationships_by_concept(
    visible: &[EnrichedRelationship],
) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for rel in visible {
        for iri in rel.domain_concept_iris.iter().chain(&rel.range_concept_iris) {
            let titles = index.entry(iri.clone()).or_default();
            if !titles.contains(&rel.title) {
                titles.push(rel.title.clone());
            }
        }
    }
    index
}

/// Concept IRI → concepts directly reachable through a visible relationship
///
/// Simple adjacency accumulation; duplicates are allowed here and removed
/// downstream by [`concepts_by_related_concept`].
pub fn other_concepts(visible: &[EnrichedRelationship]) -> BTreeMap<String, Vec<String>> {
    let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for rel in visible {
        for domain in &rel.domain_concept_iris {
            for range in &rel.range_concept_iris {
                adjacency.entry(domain.clone()).or_default().push(range.clone());
                adjacency.entry(range.clone()).or_default().push(domain.clone());
            }
        }
    }
    adjacency
}

/// Visible concept IRI → deduplicated concepts related to it or any ancestor
pub fn concepts_by_related_concept(
    concepts: &BTreeMap<String, EnrichedConcept>,
    concept_ancestors: &BTreeMap<String, Vec<String>>,
    adjacency: &BTreeMap<String, Vec<String>>,
) -> BTreeMap<String, Vec<String>> {
    let mut index = BTreeMap::new();
    for concept in concepts.values().filter(|c| is_visible(*c)) {
        let mut related = Vec::new();
        let mut seen = BTreeSet::new();
        let own = std::iter::once(concept.title.as_str());
        let inherited = concept_ancestors
            .get(&concept.title)
            .into_iter()
            .flatten()
            .map(String::as_str);
        for source in own.chain(inherited) {
            for other in adjacency.get(source).into_iter().flatten() {
                if seen.insert(other.as_str()) {
                    related.push(other.clone());
                }
            }
        }
        index.insert(concept.title.clone(), related);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::{enrich_concepts, enrich_relationships, visible_relationships};
    use crate::model::{Concept, OntologySnapshot, Relationship};

    fn concept(title: &str, name: &str, parent: Option<&str>) -> Concept {
        let mut c = Concept::new(title);
        c.display_name = Some(name.to_string());
        c.parent_concept = parent.map(String::from);
        c
    }

    fn concept_map(concepts: Vec<Concept>) -> BTreeMap<String, Concept> {
        concepts.into_iter().map(|c| (c.title.clone(), c)).collect()
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let concepts = concept_map(vec![
            concept("a", "A", None),
            concept("b", "B", Some("a")),
            concept("c", "C", Some("b")),
        ]);
        let index = ancestors(&concepts);
        assert_eq!(index["c"], vec!["b", "a"]);
        assert_eq!(index["b"], vec!["a"]);
        assert!(index["a"].is_empty());
    }

    #[test]
    fn ancestors_stop_at_dangling_parent() {
        let concepts = concept_map(vec![concept("c", "C", Some("missing"))]);
        let index = ancestors(&concepts);
        assert!(index["c"].is_empty());
    }

    #[test]
    fn descendants_cover_the_whole_subtree() {
        let concepts = concept_map(vec![
            concept("a", "A", None),
            concept("b", "B", Some("a")),
            concept("c", "C", Some("b")),
            concept("d", "D", Some("a")),
        ]);
        let index = descendants(&concepts);
        let mut of_a = index["a"].clone();
        of_a.sort();
        assert_eq!(of_a, vec!["b", "c", "d"]);
        assert_eq!(index["b"], vec!["c"]);
        assert!(index["c"].is_empty());
    }

    #[test]
    fn descendants_and_ancestors_are_dual() {
        let concepts = concept_map(vec![
            concept("a", "A", None),
            concept("b", "B", Some("a")),
            concept("c", "C", Some("b")),
            concept("d", "D", Some("a")),
        ]);
        let up = ancestors(&concepts);
        let down = descendants(&concepts);
        for (title, downs) in &down {
            for descendant in downs {
                assert!(
                    up[descendant].contains(title),
                    "{descendant} should list {title} as ancestor"
                );
            }
        }
        for (title, ups) in &up {
            for ancestor in ups {
                assert!(
                    down[ancestor].contains(title),
                    "{ancestor} should list {title} as descendant"
                );
            }
        }
    }

    fn rel(title: &str, name: &str, domain: &[&str], range: &[&str]) -> Relationship {
        let mut r = Relationship::new(title);
        r.display_name = Some(name.to_string());
        r.domain_concept_iris = domain.iter().map(|s| s.to_string()).collect();
        r.range_concept_iris = range.iter().map(|s| s.to_string()).collect();
        r
    }

    fn derived_fixture() -> (
        BTreeMap<String, EnrichedConcept>,
        Vec<EnrichedRelationship>,
    ) {
        let snapshot = OntologySnapshot {
            concepts: concept_map(vec![
                concept("person", "Person", None),
                concept("employee", "Employee", Some("person")),
                concept("company", "Company", None),
            ]),
            relationships: [
                rel("worksFor", "Works For", &["person"], &["company"]),
                rel("owns", "Owns", &["person"], &["company"]),
            ]
            .into_iter()
            .map(|r| (r.title.clone(), r))
            .collect(),
            ..Default::default()
        };
        let concepts = enrich_concepts(&snapshot).unwrap();
        let relationships = enrich_relationships(&snapshot, &concepts).unwrap();
        let visible = visible_relationships(&relationships, &concepts);
        (concepts, visible)
    }

    #[test]
    fn relationships_index_covers_domain_and_range() {
        let (_, visible) = derived_fixture();
        let index = relationships_by_concept(&visible);
        let mut of_person = index["person"].clone();
        of_person.sort();
        assert_eq!(of_person, vec!["owns", "worksFor"]);
        let mut of_company = index["company"].clone();
        of_company.sort();
        assert_eq!(of_company, vec!["owns", "worksFor"]);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let (_, visible) = derived_fixture();
        let adjacency = other_concepts(&visible);
        assert!(adjacency["person"].contains(&"company".to_string()));
        assert!(adjacency["company"].contains(&"person".to_string()));
    }

    #[test]
    fn related_concepts_include_those_of_ancestors() {
        let (concepts, visible) = derived_fixture();
        let up = ancestors(&concepts);
        let adjacency = other_concepts(&visible);
        let related = concepts_by_related_concept(&concepts, &up, &adjacency);
        // "employee" has no relationships of its own but inherits "person"'s.
        assert_eq!(related["employee"], vec!["company"]);
        // Deduplicated even though two relationships connect the pair.
        assert_eq!(related["person"], vec!["company"]);
    }
}
