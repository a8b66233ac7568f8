//! Property grouping and ordering
//!
//! Properties sort on a composite key that puts ungrouped properties first,
//! then whole groups in name order with their members sorted by display name.
//! [`with_group_headers`] turns a sorted list into display rows with a
//! synthetic header before the first property of each group.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{OntologyItem, Property};

/// A row in a grouped property listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyRow {
    /// A synthetic group header
    Header(GroupHeader),
    /// An actual property
    Property(Property),
}

/// Synthetic header row introducing a property group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupHeader {
    /// The group name, shown as the header's label
    pub display_name: String,
    /// Always `true`; distinguishes headers from properties on the wire
    pub header: bool,
}

fn sort_key(property: &Property) -> String {
    let name = property.display_label().to_lowercase();
    match property.property_group.as_deref() {
        Some(group) if !group.is_empty() => format!("1{group}{name}"),
        _ => format!("0{name}"),
    }
}

/// All properties sorted for display: ungrouped first, then by group
pub fn sorted_properties(properties: &BTreeMap<String, Property>) -> Vec<Property> {
    let mut list: Vec<Property> = properties.values().cloned().collect();
    list.sort_by_key(sort_key);
    list
}

/// Insert a header row before the first property of each group
///
/// Group changes are detected by simple inequality with the previous
/// property's group; ungrouped properties never get a header.
pub fn with_group_headers(sorted: &[Property]) -> Vec<PropertyRow> {
    let mut rows = Vec::with_capacity(sorted.len());
    let mut previous: Option<&str> = None;
    for property in sorted {
        let group = property.property_group.as_deref().filter(|g| !g.is_empty());
        if let Some(name) = group {
            if previous != group {
                rows.push(PropertyRow::Header(GroupHeader {
                    display_name: name.to_string(),
                    header: true,
                }));
            }
        }
        previous = group;
        rows.push(PropertyRow::Property(property.clone()));
    }
    rows
}

/// Dependent property IRI → compound properties that depend on it
pub fn compounds_by_dependent(
    properties: &BTreeMap<String, Property>,
) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for property in properties.values() {
        for dependent in &property.dependent_property_iris {
            let compounds = index.entry(dependent.clone()).or_default();
            if !compounds.contains(&property.title) {
                compounds.push(property.title.clone());
            }
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(title: &str, name: &str, group: Option<&str>) -> Property {
        let mut p = Property::new(title);
        p.display_name = Some(name.to_string());
        p.property_group = group.map(String::from);
        p
    }

    fn property_map(properties: Vec<Property>) -> BTreeMap<String, Property> {
        properties
            .into_iter()
            .map(|p| (p.title.clone(), p))
            .collect()
    }

    #[test]
    fn ungrouped_sort_before_grouped() {
        let properties = property_map(vec![
            property("p1", "B", Some("G")),
            property("p2", "A", None),
            property("p3", "A", Some("G")),
        ]);
        let sorted = sorted_properties(&properties);
        let names: Vec<(&str, Option<&str>)> = sorted
            .iter()
            .map(|p| (p.display_label(), p.property_group.as_deref()))
            .collect();
        assert_eq!(
            names,
            vec![("A", None), ("A", Some("G")), ("B", Some("G"))]
        );
    }

    #[test]
    fn groups_sort_contiguously_by_group_name() {
        let properties = property_map(vec![
            property("p1", "X", Some("Second")),
            property("p2", "Y", Some("First")),
            property("p3", "X", Some("First")),
        ]);
        let sorted = sorted_properties(&properties);
        let groups: Vec<Option<&str>> =
            sorted.iter().map(|p| p.property_group.as_deref()).collect();
        assert_eq!(
            groups,
            vec![Some("First"), Some("First"), Some("Second")]
        );
    }

    #[test]
    fn sorting_ignores_display_name_case() {
        let properties = property_map(vec![
            property("p1", "beta", None),
            property("p2", "Alpha", None),
        ]);
        let sorted = sorted_properties(&properties);
        let names: Vec<&str> = sorted.iter().map(|p| p.display_label()).collect();
        assert_eq!(names, vec!["Alpha", "beta"]);
    }

    #[test]
    fn header_inserted_once_per_group() {
        let sorted = vec![
            property("p1", "A", Some("G")),
            property("p2", "B", Some("G")),
            property("p3", "C", None),
        ];
        let rows = with_group_headers(&sorted);
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            PropertyRow::Header(GroupHeader {
                display_name: "G".to_string(),
                header: true,
            })
        );
        assert!(matches!(&rows[1], PropertyRow::Property(p) if p.title == "p1"));
        assert!(matches!(&rows[2], PropertyRow::Property(p) if p.title == "p2"));
        assert!(matches!(&rows[3], PropertyRow::Property(p) if p.title == "p3"));
    }

    #[test]
    fn no_header_for_ungrouped_properties() {
        let sorted = vec![property("p1", "A", None), property("p2", "B", None)];
        let rows = with_group_headers(&sorted);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| matches!(r, PropertyRow::Property(_))));
    }

    #[test]
    fn header_serializes_with_flag() {
        let rows = with_group_headers(&[property("p1", "A", Some("Employment"))]);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["displayName"], "Employment");
        assert_eq!(json[0]["header"], true);
        assert_eq!(json[1]["title"], "p1");
    }

    #[test]
    fn compound_index_inverts_dependents() {
        let mut full_name = property("fullName", "Full Name", None);
        full_name.dependent_property_iris =
            vec!["firstName".to_string(), "lastName".to_string()];
        let mut display_name = property("displayName", "Display Name", None);
        display_name.dependent_property_iris = vec!["firstName".to_string()];
        let properties = property_map(vec![
            full_name,
            display_name,
            property("firstName", "First Name", None),
        ]);

        let index = compounds_by_dependent(&properties);
        let mut of_first = index["firstName"].clone();
        of_first.sort();
        assert_eq!(of_first, vec!["displayName", "fullName"]);
        assert_eq!(index["lastName"], vec!["fullName"]);
        assert!(!index.contains_key("fullName"));
    }
}
