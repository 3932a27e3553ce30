//! Error taxonomy for structural edits
//!
//! Every mutating operation either fully succeeds or returns one of these
//! before touching the store. Validate-time checks never produce errors;
//! they emit diagnostics instead.

use thiserror::Error;

use crate::models::annotation::AnnotationId;
use crate::models::layer::LayerId;
use crate::models::span::Span;

/// Result type for engine operations
pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("the last segmentation unit in its scope cannot be deleted")]
    LastUnitCannotBeDeleted,

    #[error("segmentation units can only be produced by splitting an existing one, not created from an arbitrary range")]
    CreateNotSplit,

    #[error("split at {0} would produce a zero-width unit")]
    ZeroWidthUnit(usize),

    #[error("sentence split point {0} does not coincide with a token boundary")]
    SplitNotAtTokenBoundary(usize),

    #[error("overlap violation at {span}: {message}")]
    OverlapViolation { span: Span, message: String },

    #[error("annotation at {0} covers multiple sentences")]
    CrossBoundaryViolation(Span),

    #[error("anchoring violation at {span}: {message}")]
    AnchoringViolation { span: Span, message: String },

    #[error("annotation not found: {0}")]
    AnnotationNotFound(AnnotationId),

    #[error("layer not found: {0}")]
    LayerNotFound(LayerId),

    #[error("invalid span {0} for this document")]
    InvalidSpan(Span),

    #[error("{0} is not a segmentation unit")]
    NotASegmentationUnit(AnnotationId),

    #[error("{0} is not a segmentation layer")]
    NotASegmentationLayer(LayerId),

    #[error("attach feature '{feature}' on {layer} must reference an existing base annotation")]
    MissingAttachFeature { layer: LayerId, feature: String },

    #[error("{0} is a segmentation unit; use the segmentation operations")]
    IsSegmentationUnit(AnnotationId),

    #[error("{0} is not a relation layer")]
    NotARelationLayer(LayerId),

    #[error("{0} is not a span layer")]
    NotASpanLayer(LayerId),

    #[error("relation endpoint not found: {0}")]
    MissingEndpoint(AnnotationId),
}
