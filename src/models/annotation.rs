//! Annotations and their feature values
//!
//! An annotation is a typed, feature-bearing interval over document text.
//! Cross-references between annotations (attach features, relation
//! endpoints) are always ids into the store arena, never direct
//! ownership.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layer::LayerId;
use super::span::Span;

/// Stable identifier for an annotation in the store arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnnotationId(pub u32);

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "annotation#{}", self.0)
    }
}

/// A feature value on an annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureValue {
    Str(String),
    Int(i64),
    Bool(bool),
    /// A reference to another annotation (attach features store these)
    Ref(AnnotationId),
}

impl FeatureValue {
    /// The referenced annotation, if this value is a reference
    pub fn as_ref_id(&self) -> Option<AnnotationId> {
        match self {
            FeatureValue::Ref(id) => Some(*id),
            _ => None,
        }
    }
}

/// Feature map keyed by feature name
pub type Features = BTreeMap<String, FeatureValue>;

/// Source and target endpoints of a relation annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationLink {
    pub source: AnnotationId,
    pub target: AnnotationId,
}

/// A typed, positioned annotation
///
/// Relation annotations additionally carry a `link`; their span is the
/// envelope of the two endpoints at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub layer: LayerId,
    pub span: Span,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: Features,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<RelationLink>,
}

impl Annotation {
    pub fn new(id: AnnotationId, layer: LayerId, span: Span) -> Self {
        Self {
            id,
            layer,
            span,
            features: Features::new(),
            link: None,
        }
    }

    /// Check whether any feature references the given annotation
    pub fn references(&self, id: AnnotationId) -> bool {
        if let Some(link) = &self.link {
            if link.source == id || link.target == id {
                return true;
            }
        }
        self.features
            .values()
            .any(|v| v.as_ref_id() == Some(id))
    }
}
