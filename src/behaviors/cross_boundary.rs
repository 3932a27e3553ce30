//! Cross-boundary behavior
//!
//! Layers with `cross_boundary == false` require every instance to be
//! fully contained within a single sentence. Instances that cross (e.g.
//! imported in bulk, or created before the policy changed) surface as
//! validate-time diagnostics.

use crate::diagnostics::Diagnostic;
use crate::error::{EditError, EditResult};
use crate::models::document::Document;
use crate::models::layer::{Layer, LayerId, SegmentationKind};
use crate::models::span::Span;

use super::LayerBehavior;

pub struct CrossBoundaryBehavior;

impl CrossBoundaryBehavior {
    /// A span is contained when some single sentence covers it. With no
    /// sentence layer registered there are no boundaries to cross.
    fn is_contained(doc: &Document, span: Span) -> bool {
        if doc
            .store
            .segmentation_layer(SegmentationKind::Sentence)
            .is_none()
        {
            return true;
        }
        doc.store.covering_sentence(span).is_some()
    }
}

impl LayerBehavior for CrossBoundaryBehavior {
    fn name(&self) -> &'static str {
        "cross_boundary"
    }

    fn check_write(
        &self,
        doc: &Document,
        _layer_id: LayerId,
        layer: &Layer,
        candidate: Span,
    ) -> EditResult<()> {
        if layer.cross_boundary || Self::is_contained(doc, candidate) {
            Ok(())
        } else {
            Err(EditError::CrossBoundaryViolation(candidate))
        }
    }

    fn validate(&self, doc: &Document, layer_id: LayerId, layer: &Layer) -> Vec<Diagnostic> {
        if layer.cross_boundary {
            return Vec::new();
        }
        doc.store
            .in_layer(layer_id)
            .iter()
            .filter(|a| !Self::is_contained(doc, a.span))
            .map(|a| {
                Diagnostic::error(
                    a.id,
                    a.span,
                    self.name(),
                    "crossing boundaries is not permitted",
                )
            })
            .collect()
    }
}
