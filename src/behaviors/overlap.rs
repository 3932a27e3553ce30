//! Overlap behavior
//!
//! Compares instance ranges within one layer against the layer's overlap
//! policy. At write time a violation aborts the add; at validate time
//! each violating pair emits one diagnostic per involved instance,
//! addressed at its own range.

use crate::diagnostics::Diagnostic;
use crate::error::{EditError, EditResult};
use crate::models::document::Document;
use crate::models::layer::{Layer, LayerId, OverlapMode};
use crate::models::span::Span;

use super::LayerBehavior;

/// Message for a violation under the given policy
///
/// The stacking modes share one message: under `StackingOnly` the
/// violation is a partial overlap, under `OverlapOnly` it is an exact
/// duplicate, but both are reported as illegal stacking.
fn violation_message(mode: OverlapMode) -> &'static str {
    match mode {
        OverlapMode::NoOverlap => "no overlap or stacking",
        OverlapMode::StackingOnly | OverlapMode::OverlapOnly => "stacking is not allowed",
        OverlapMode::AnyOverlap => "",
    }
}

pub struct OverlapBehavior;

impl LayerBehavior for OverlapBehavior {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn check_write(
        &self,
        doc: &Document,
        layer_id: LayerId,
        layer: &Layer,
        candidate: Span,
    ) -> EditResult<()> {
        if layer.overlap == OverlapMode::AnyOverlap {
            return Ok(());
        }
        for other in doc.store.in_layer(layer_id) {
            if !layer.allows_intersection(candidate, other.span) {
                return Err(EditError::OverlapViolation {
                    span: candidate,
                    message: violation_message(layer.overlap).to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate(&self, doc: &Document, layer_id: LayerId, layer: &Layer) -> Vec<Diagnostic> {
        let mut marks = Vec::new();
        if layer.overlap == OverlapMode::AnyOverlap {
            return marks;
        }
        let instances = doc.store.in_layer(layer_id);
        for (i, a) in instances.iter().enumerate() {
            for b in instances.iter().skip(i + 1) {
                if !layer.allows_intersection(a.span, b.span) {
                    let message = violation_message(layer.overlap);
                    marks.push(Diagnostic::error(a.id, a.span, self.name(), message));
                    marks.push(Diagnostic::error(b.id, b.span, self.name(), message));
                }
            }
        }
        marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layer::Anchoring;

    fn doc_with_layer(mode: OverlapMode) -> (Document, LayerId) {
        let mut doc = Document::new("1 2 3 4");
        let layer = doc
            .store
            .define_layer(Layer::span("test", Anchoring::Characters, mode));
        (doc, layer)
    }

    #[test]
    fn test_write_check_no_overlap() {
        let (mut doc, layer_id) = doc_with_layer(OverlapMode::NoOverlap);
        doc.store.insert(layer_id, Span::new(0, 4));
        let layer = doc.store.layer(layer_id).unwrap().clone();

        let verdict = OverlapBehavior.check_write(&doc, layer_id, &layer, Span::new(2, 6));
        assert!(matches!(verdict, Err(EditError::OverlapViolation { .. })));

        let verdict = OverlapBehavior.check_write(&doc, layer_id, &layer, Span::new(4, 6));
        assert!(verdict.is_ok());
    }

    #[test]
    fn test_write_check_any_overlap_never_fails() {
        let (mut doc, layer_id) = doc_with_layer(OverlapMode::AnyOverlap);
        doc.store.insert(layer_id, Span::new(0, 4));
        let layer = doc.store.layer(layer_id).unwrap().clone();

        assert!(OverlapBehavior
            .check_write(&doc, layer_id, &layer, Span::new(0, 4))
            .is_ok());
    }

    #[test]
    fn test_validate_emits_one_mark_per_involved_instance() {
        let (mut doc, layer_id) = doc_with_layer(OverlapMode::NoOverlap);
        doc.store.insert(layer_id, Span::new(0, 4));
        doc.store.insert(layer_id, Span::new(2, 6));
        let layer = doc.store.layer(layer_id).unwrap().clone();

        let marks = OverlapBehavior.validate(&doc, layer_id, &layer);
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].span, Span::new(0, 4));
        assert_eq!(marks[1].span, Span::new(2, 6));
    }

    #[test]
    fn test_stacking_only_flags_partial_overlap_not_duplicates() {
        let (mut doc, layer_id) = doc_with_layer(OverlapMode::StackingOnly);
        doc.store.insert(layer_id, Span::new(0, 4));
        doc.store.insert(layer_id, Span::new(0, 4)); // Exact duplicate: fine
        doc.store.insert(layer_id, Span::new(2, 6)); // Partial: flagged twice
        let layer = doc.store.layer(layer_id).unwrap().clone();

        let marks = OverlapBehavior.validate(&doc, layer_id, &layer);
        assert_eq!(marks.len(), 4); // Two violating pairs, two marks each
        assert!(marks.iter().all(|m| m.message == "stacking is not allowed"));
    }

    #[test]
    fn test_overlap_only_flags_duplicates() {
        let (mut doc, layer_id) = doc_with_layer(OverlapMode::OverlapOnly);
        doc.store.insert(layer_id, Span::new(0, 4));
        doc.store.insert(layer_id, Span::new(2, 6)); // Partial: fine
        doc.store.insert(layer_id, Span::new(0, 4)); // Duplicate: flagged
        let layer = doc.store.layer(layer_id).unwrap().clone();

        let marks = OverlapBehavior.validate(&doc, layer_id, &layer);
        assert_eq!(marks.len(), 2);
    }
}
