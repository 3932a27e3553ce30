//! Layer definitions
//!
//! A layer is a named annotation-type definition supplied by the schema
//! service: it governs how instances may relate to token boundaries
//! (anchoring), to each other (overlap), and to sentence boundaries
//! (cross-boundary). The two tiling layers (tokens and sentences) are
//! marked with a segmentation kind.

use serde::{Deserialize, Serialize};

use super::span::Span;

/// Stable identifier for a layer in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Whether a layer holds spans or relations between spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Span,
    Relation,
}

/// How an instance's bounds may relate to token boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchoring {
    /// Any character range
    Characters,
    /// The range must equal exactly one token's range
    SingleToken,
    /// Begin and end must each coincide with a token boundary
    Tokens,
}

/// Policy governing permitted range intersections within a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapMode {
    /// No intersection of any kind with another instance
    NoOverlap,
    /// Intersection only when ranges are identical
    StackingOnly,
    /// Partial overlap allowed, exact duplicates are not
    OverlapOnly,
    /// No restriction
    AnyOverlap,
}

/// The two tiling layers of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentationKind {
    /// Tiles a sentence; scope for merge rules is the covering sentence
    Token,
    /// Tiles the document; scope for merge rules is the whole document
    Sentence,
}

/// Declaration that a layer structurally rides on another layer
///
/// Each instance of the attaching layer stores a reference to its base
/// annotation under `feature` (e.g. a part-of-speech annotation attached
/// to a token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachSpec {
    pub layer: LayerId,
    pub feature: String,
}

/// A named annotation-type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
    pub anchoring: Anchoring,
    pub overlap: OverlapMode,
    /// May an instance span more than one sentence
    pub cross_boundary: bool,
    /// Set only for the token and sentence layers
    pub segmentation: Option<SegmentationKind>,
    pub attach: Option<AttachSpec>,
}

impl Layer {
    /// An ordinary span layer with the given policies
    pub fn span(name: impl Into<String>, anchoring: Anchoring, overlap: OverlapMode) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Span,
            anchoring,
            overlap,
            cross_boundary: true,
            segmentation: None,
            attach: None,
        }
    }

    /// A relation layer between annotations of other layers
    pub fn relation(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Relation,
            anchoring: Anchoring::Characters,
            overlap: OverlapMode::AnyOverlap,
            cross_boundary: true,
            segmentation: None,
            attach: None,
        }
    }

    /// The token tiling layer
    pub fn token(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Span,
            anchoring: Anchoring::Characters,
            overlap: OverlapMode::NoOverlap,
            cross_boundary: false,
            segmentation: Some(SegmentationKind::Token),
            attach: None,
        }
    }

    /// The sentence tiling layer
    pub fn sentence(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Span,
            anchoring: Anchoring::Characters,
            overlap: OverlapMode::NoOverlap,
            cross_boundary: true,
            segmentation: Some(SegmentationKind::Sentence),
            attach: None,
        }
    }

    /// Restrict instances to a single sentence
    pub fn within_sentence(mut self) -> Self {
        self.cross_boundary = false;
        self
    }

    /// Declare that instances ride on annotations of `layer`, referenced
    /// through `feature`
    pub fn attached_to(mut self, layer: LayerId, feature: impl Into<String>) -> Self {
        self.attach = Some(AttachSpec {
            layer,
            feature: feature.into(),
        });
        self
    }

    pub fn is_segmentation(&self) -> bool {
        self.segmentation.is_some()
    }

    /// Check whether a candidate range intersection is allowed by the
    /// overlap policy of this layer
    pub fn allows_intersection(&self, a: Span, b: Span) -> bool {
        if !a.overlaps(b) {
            return true;
        }
        match self.overlap {
            OverlapMode::NoOverlap => false,
            OverlapMode::StackingOnly => a.stacks_on(b),
            OverlapMode::OverlapOnly => !a.stacks_on(b),
            OverlapMode::AnyOverlap => true,
        }
    }
}
