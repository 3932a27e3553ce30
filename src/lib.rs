//! Annotation consistency engine
//!
//! Core of a collaborative text-annotation workbench: typed, positioned
//! annotations (spans and relations) over a shared document model, with
//! the structural invariants kept intact across edits: no illegal
//! overlaps, token/sentence tiling, and cross-references that stay
//! consistent when segmentation boundaries move.
//!
//! ## Architecture
//!
//! - `models`: document text, layers, annotations, and the store
//! - `behaviors`: pluggable layer rules (overlap, cross-boundary,
//!   anchoring) with blocking write-time and diagnostic validate-time
//!   entry points
//! - `adapters`: the mutating operations: span create/delete, the
//!   segmentation split/merge algebra, and boundary-change propagation
//! - `diagnostics`: validate-time marks for the render layer
//! - `engine`: the per-document facade
//!
//! Persistence, schema administration, and rendering are external
//! collaborators; they drive the engine through `AnnotationEngine`.

pub mod adapters;
pub mod behaviors;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use engine::AnnotationEngine;
pub use error::{EditError, EditResult};
pub use models::{
    Anchoring, Annotation, AnnotationId, AttachSpec, Document, FeatureValue, Features, Layer,
    LayerId, LayerKind, OverlapMode, RelationLink, SegmentationKind, Span,
};
