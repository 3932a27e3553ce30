//! Boundary-change propagation
//!
//! When a segmentation unit's boundaries move (split or merge), dependent
//! annotations follow synchronously: attached features riding on the
//! unit, single-token-anchored spans, and non-crossing spans that ended
//! at a removed sentence boundary. Resizes are direct range mutations;
//! re-validation is deferred to the next explicit validate pass.

use crate::models::annotation::AnnotationId;
use crate::models::document::Document;
use crate::models::layer::{Anchoring, LayerId, LayerKind, SegmentationKind};
use crate::models::span::Span;

/// Apply all cascading updates for one boundary change of `unit_id`
/// whose range used to be `old_span`
pub fn propagate_boundary_change(doc: &mut Document, unit_id: AnnotationId, old_span: Span) {
    let (new_span, unit_layer) = match doc.store.get(unit_id) {
        Some(unit) => (unit.span, unit.layer),
        None => {
            log::warn!("boundary change for unknown annotation {}", unit_id);
            return;
        }
    };
    if new_span == old_span {
        return;
    }
    let kind = doc
        .store
        .layer(unit_layer)
        .and_then(|layer| layer.segmentation);

    resize_attached(doc, unit_id, unit_layer, old_span, new_span);
    if kind == Some(SegmentationKind::Token) {
        resize_single_token_anchored(doc, unit_layer, old_span, new_span);
    }
    if kind == Some(SegmentationKind::Sentence) {
        extend_spans_at_removed_boundary(doc, old_span, new_span);
    }
}

/// Step 1: instances of attaching layers whose attach feature references
/// the moved unit and whose own range equals the unit's old range are
/// resized to the new range.
fn resize_attached(
    doc: &mut Document,
    unit_id: AnnotationId,
    unit_layer: LayerId,
    old_span: Span,
    new_span: Span,
) {
    let attach_layers: Vec<(LayerId, String)> = doc
        .store
        .layers()
        .filter_map(|(id, layer)| {
            layer
                .attach
                .as_ref()
                .filter(|spec| spec.layer == unit_layer)
                .map(|spec| (id, spec.feature.clone()))
        })
        .collect();

    for (dep_layer, feature) in attach_layers {
        let dependents: Vec<AnnotationId> = doc
            .store
            .in_layer(dep_layer)
            .iter()
            .filter(|a| {
                a.span == old_span
                    && a.features
                        .get(&feature)
                        .and_then(|v| v.as_ref_id())
                        == Some(unit_id)
            })
            .map(|a| a.id)
            .collect();
        for id in dependents {
            if let Some(a) = doc.store.get_mut(id) {
                a.span = new_span;
                log::debug!("resized attached {} to {}", id, new_span);
            }
        }
    }
}

/// Step 2: single-token-anchored spans whose range equals the moved
/// token's old range follow it.
fn resize_single_token_anchored(
    doc: &mut Document,
    token_layer: LayerId,
    old_span: Span,
    new_span: Span,
) {
    let anchored_layers: Vec<LayerId> = doc
        .store
        .layers()
        .filter(|(id, layer)| layer.anchoring == Anchoring::SingleToken && *id != token_layer)
        .map(|(id, _)| id)
        .collect();

    for dep_layer in anchored_layers {
        let dependents: Vec<AnnotationId> = doc
            .store
            .in_layer(dep_layer)
            .iter()
            .filter(|a| a.span == old_span)
            .map(|a| a.id)
            .collect();
        for id in dependents {
            if let Some(a) = doc.store.get_mut(id) {
                a.span = new_span;
                log::debug!("resized single-token span {} to {}", id, new_span);
            }
        }
    }
}

/// Step 3 (sentence merges): non-crossing spans that ended exactly at the
/// removed boundary are extended to the new boundary so they keep
/// satisfying containment.
fn extend_spans_at_removed_boundary(doc: &mut Document, old_span: Span, new_span: Span) {
    let grew_end = new_span.end > old_span.end;
    let shrank_begin = new_span.begin < old_span.begin;
    if !grew_end && !shrank_begin {
        return;
    }

    let affected_layers: Vec<LayerId> = doc
        .store
        .layers()
        .filter(|(_, layer)| {
            layer.kind == LayerKind::Span && !layer.cross_boundary && !layer.is_segmentation()
        })
        .map(|(id, _)| id)
        .collect();

    for dep_layer in affected_layers {
        let dependents: Vec<(AnnotationId, Span)> = doc
            .store
            .in_layer(dep_layer)
            .iter()
            .map(|a| (a.id, a.span))
            .collect();
        for (id, span) in dependents {
            let mut updated = span;
            if grew_end && span.end == old_span.end && span.begin >= new_span.begin {
                updated.end = new_span.end;
            }
            if shrank_begin && span.begin == old_span.begin && span.end <= new_span.end {
                updated.begin = new_span.begin;
            }
            if updated != span {
                if let Some(a) = doc.store.get_mut(id) {
                    a.span = updated;
                    log::debug!("extended non-crossing span {} to {}", id, updated);
                }
            }
        }
    }
}
