//! Raw ontology snapshot types
//!
//! These types mirror the wire shape of an ontology snapshot as delivered by
//! the backend: flat maps of concepts, relationships, and properties keyed by
//! IRI, plus the well-known root IRIs. Field names serialize in camelCase to
//! match the snapshot documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// IRI of the root "Thing" concept, parent of every top-level concept
pub const THING_CONCEPT: &str = "http://www.w3.org/2002/07/owl#Thing";

/// IRI of the generic root pseudo-concept
pub const ROOT_CONCEPT: &str = "http://ontoview.org/ontology#root";

/// IRI of the root pseudo-relationship, parent of every top-level relationship
pub const EDGE_THING: &str = "http://ontoview.org/ontology#edgeThing";

/// Fallback glyph icon used when no concept in a parent chain defines one
pub const DEFAULT_GLYPH_ICON: &str = "img/glyphicons/unknown.png";

/// Common accessors shared by concepts, relationships, and properties
pub trait OntologyItem {
    /// The stable IRI identifier, unique within the item's category
    fn title(&self) -> &str;

    /// Human-readable label; `None` or empty means not directly visible
    fn display_name(&self) -> Option<&str>;

    /// `false` forcibly hides the item regardless of its display name
    fn user_visible(&self) -> bool;

    /// IRI of the single parent in the same category, if any
    fn parent(&self) -> Option<&str>;

    /// Property IRIs attached to this item (empty for properties themselves)
    fn properties(&self) -> &[String] {
        &[]
    }

    /// Returns the display name, falling back to the IRI
    fn display_label(&self) -> &str {
        self.display_name()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.title())
    }
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

/// Display attributes a concept inherits from its nearest ancestor
///
/// A closed set: each field resolves independently, the concept's own value
/// winning over any ancestor's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptStyle {
    /// Display color (e.g., "rgb(28, 137, 28)")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// How instances of the concept render (e.g., "audio", "image")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    /// Glyph icon shown for instances of the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph_icon_href: Option<String>,
    /// Glyph icon shown when an instance is selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph_icon_selected_href: Option<String>,
    /// Formula computing an instance's title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_formula: Option<String>,
    /// Formula computing an instance's subtitle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_formula: Option<String>,
    /// Formula computing an instance's time label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_formula: Option<String>,
    /// Formula validating instances of the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_formula: Option<String>,
}

/// A node type in the ontology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// The concept IRI
    pub title: String,
    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether end users may see this concept
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub user_visible: bool,
    /// IRI of the parent concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_concept: Option<String>,
    /// IRIs of properties attached to this concept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    /// Inheritable display attributes
    #[serde(flatten)]
    pub style: ConceptStyle,
}

impl Concept {
    /// Create a new concept with the given IRI
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            display_name: None,
            user_visible: true,
            parent_concept: None,
            properties: Vec::new(),
            style: ConceptStyle::default(),
        }
    }
}

impl OntologyItem for Concept {
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

/// An edge type in the ontology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// The relationship IRI
    pub title: String,
    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether end users may see this relationship
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub user_visible: bool,
    /// IRI of the parent relationship
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_iri: Option<String>,
    /// Concept IRIs allowed as the source of this relationship
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_concept_iris: Vec<String>,
    /// Concept IRIs allowed as the target of this relationship
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range_concept_iris: Vec<String>,
    /// IRIs of properties attached to this relationship
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
}

impl Relationship {
    /// Create a new relationship with the given IRI
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            display_name: None,
            user_visible: true,
            parent_iri: None,
            domain_concept_iris: Vec::new(),
            range_concept_iris: Vec::new(),
            properties: Vec::new(),
        }
    }
}

impl OntologyItem for Relationship {
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

/// An attribute type in the ontology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// The property IRI
    pub title: String,
    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether end users may see this property
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub user_visible: bool,
    /// Display group label; ungrouped properties sort before grouped ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_group: Option<String>,
    /// IRIs of properties this compound property depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependent_property_iris: Vec<String>,
}

impl Property {
    /// Create a new property with the given IRI
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            display_name: None,
            user_visible: true,
            property_group: None,
            dependent_property_iris: Vec::new(),
        }
    }

    /// Whether this property derives its value from other properties
    pub fn is_compound(&self) -> bool {
        !self.dependent_property_iris.is_empty()
    }
}

impl OntologyItem for Property {
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
        None
    }
}

/// Well-known root IRIs supplied with a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootIris {
    /// IRI of the root concept
    pub concept: String,
    /// IRI of the root relationship
    pub relationship: String,
    /// IRI of the root property, if the source defines one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl Default for RootIris {
    fn default() -> Self {
        Self {
            concept: THING_CONCEPT.to_string(),
            relationship: EDGE_THING.to_string(),
            property: None,
        }
    }
}

/// A complete per-workspace ontology snapshot
///
/// Replaced wholesale whenever the ontology changes upstream; never mutated
/// incrementally. Duplicate IRIs within a category are last-write-wins in the
/// backing maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologySnapshot {
    /// Concepts keyed by IRI
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub concepts: BTreeMap<String, Concept>,
    /// Relationships keyed by IRI
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
    /// Properties keyed by IRI
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Property>,
    /// Well-known root IRIs
    #[serde(default)]
    pub iris: RootIris,
}
