//! Segmentation-unit adapter
//!
//! Split/merge/delete algebra for the two tiling layers. Tokens merge
//! within their covering sentence, sentences within the whole document.
//! Every operation validates fully before mutating, then pushes one
//! boundary change through the propagator before returning.

use crate::error::{EditError, EditResult};
use crate::models::annotation::AnnotationId;
use crate::models::document::Document;
use crate::models::layer::{LayerId, SegmentationKind};
use crate::models::span::Span;

use super::propagation::propagate_boundary_change;

/// The enclosing scope within which sibling merge rules are evaluated:
/// the covering sentence for tokens, the whole document for sentences.
/// A token sitting in a whitespace gap between sentences falls back to
/// the document scope.
fn scope_span(doc: &Document, kind: SegmentationKind, unit: Span) -> Span {
    let document_span = Span::new(0, doc.char_len());
    match kind {
        SegmentationKind::Sentence => document_span,
        SegmentationKind::Token => doc
            .store
            .covering_sentence(unit)
            .map(|s| s.span)
            .unwrap_or(document_span),
    }
}

/// Split the unit containing `request.begin` into two trimmed halves
///
/// The request must be zero-width: segmentation units can only be
/// produced by splitting an existing one at a point, never materialized
/// as an arbitrary new range. The left half keeps the split unit's id;
/// the right half is a new annotation.
pub fn split_unit(
    doc: &mut Document,
    layer_id: LayerId,
    request: Span,
) -> EditResult<(AnnotationId, AnnotationId)> {
    let layer = doc
        .store
        .layer(layer_id)
        .ok_or(EditError::LayerNotFound(layer_id))?;
    let kind = layer
        .segmentation
        .ok_or(EditError::NotASegmentationLayer(layer_id))?;
    if !doc.contains_span(request) {
        return Err(EditError::InvalidSpan(request));
    }
    if !request.is_empty() {
        return Err(EditError::CreateNotSplit);
    }
    let point = request.begin;

    let unit = doc
        .store
        .unit_around(layer_id, point)
        .ok_or(EditError::ZeroWidthUnit(point))?;
    let unit_id = unit.id;
    let old_span = unit.span;

    // Sentence boundaries may only be introduced between tokens
    if kind == SegmentationKind::Sentence && !doc.store.is_token_boundary(point) {
        return Err(EditError::SplitNotAtTokenBoundary(point));
    }

    let left = doc.trim_span(Span::new(old_span.begin, point));
    let right = doc.trim_span(Span::new(point, old_span.end));
    // A half consumed entirely by whitespace is rejected rather than
    // silently dropped; the caller picks a different point.
    if left.is_empty() || right.is_empty() {
        return Err(EditError::ZeroWidthUnit(point));
    }

    doc.store
        .get_mut(unit_id)
        .ok_or(EditError::AnnotationNotFound(unit_id))?
        .span = left;
    let right_id = doc.store.insert(layer_id, right);
    log::debug!(
        "split {} {} at {}: {} | {}",
        layer_id,
        old_span,
        point,
        left,
        right
    );

    propagate_boundary_change(doc, unit_id, old_span);
    Ok((unit_id, right_id))
}

/// Delete one segmentation unit, merging its range into a sibling
///
/// The previous sibling in scope absorbs the range when one exists
/// (backward merge); otherwise the next sibling extends leftward
/// (forward merge). The last unit in its scope cannot be deleted.
/// Returns the merged sibling's id.
pub fn delete_unit(doc: &mut Document, unit_id: AnnotationId) -> EditResult<AnnotationId> {
    let unit = doc
        .store
        .get(unit_id)
        .ok_or(EditError::AnnotationNotFound(unit_id))?;
    let layer_id = unit.layer;
    let unit_span = unit.span;
    let layer = doc
        .store
        .layer(layer_id)
        .ok_or(EditError::LayerNotFound(layer_id))?;
    let kind = layer
        .segmentation
        .ok_or(EditError::NotASegmentationUnit(unit_id))?;

    let scope = scope_span(doc, kind, unit_span);
    let mut prev: Option<(AnnotationId, Span)> = None;
    let mut next: Option<(AnnotationId, Span)> = None;
    for sibling in doc.store.in_layer(layer_id) {
        if sibling.id == unit_id || !scope.covers(sibling.span) {
            continue;
        }
        if sibling.span.end <= unit_span.begin {
            prev = Some((sibling.id, sibling.span)); // Ordered scan: last one wins
        } else if sibling.span.begin >= unit_span.end && next.is_none() {
            next = Some((sibling.id, sibling.span));
        }
    }

    let (merged_id, old_span, new_span) = if let Some((id, span)) = prev {
        (id, span, Span::new(span.begin, unit_span.end))
    } else if let Some((id, span)) = next {
        (id, span, Span::new(unit_span.begin, span.end))
    } else {
        return Err(EditError::LastUnitCannotBeDeleted);
    };

    doc.store.remove(unit_id);
    doc.store
        .get_mut(merged_id)
        .ok_or(EditError::AnnotationNotFound(merged_id))?
        .span = new_span;
    log::debug!(
        "deleted {} {}, merged into {} {}",
        unit_id,
        unit_span,
        merged_id,
        new_span
    );

    propagate_boundary_change(doc, merged_id, old_span);
    Ok(merged_id)
}
