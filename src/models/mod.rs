//! Data model: document text, layers, annotations, and the store
//!
//! ## Modules
//!
//! - `span`: half-open character ranges
//! - `layer`: layer definitions and policies
//! - `annotation`: annotations, ids, feature values
//! - `store`: arena of annotations plus the layer registry
//! - `document`: immutable text and its store

pub mod annotation;
pub mod document;
pub mod layer;
pub mod span;
pub mod store;

// Re-exports for convenience
pub use annotation::{Annotation, AnnotationId, FeatureValue, Features, RelationLink};
pub use document::Document;
pub use layer::{Anchoring, AttachSpec, Layer, LayerId, LayerKind, OverlapMode, SegmentationKind};
pub use span::Span;
pub use store::AnnotationStore;
