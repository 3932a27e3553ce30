//! Span adapter
//!
//! Create/delete/validate for ordinary (non-segmentation) annotations.
//! The behavior chain runs at two checkpoints: write time (blocking, in
//! fixed order, before any mutation) and validate time (non-blocking,
//! over the whole layer, for the render layer to turn into markers).

use crate::behaviors::{behavior_chain, LayerBehavior};
use crate::diagnostics::Diagnostic;
use crate::error::{EditError, EditResult};
use crate::models::annotation::{AnnotationId, Features};
use crate::models::document::Document;
use crate::models::layer::{LayerId, LayerKind};
use crate::models::span::Span;

pub struct SpanAdapter {
    behaviors: Vec<Box<dyn LayerBehavior>>,
}

impl SpanAdapter {
    pub fn new() -> Self {
        Self {
            behaviors: behavior_chain(),
        }
    }

    /// Add a span annotation after all write-time checks pass
    ///
    /// Segmentation layers are rejected: their units can only come from
    /// splitting an existing unit, never from materializing a range.
    pub fn add_span(
        &self,
        doc: &mut Document,
        layer_id: LayerId,
        span: Span,
        features: Features,
    ) -> EditResult<AnnotationId> {
        let layer = doc
            .store
            .layer(layer_id)
            .ok_or(EditError::LayerNotFound(layer_id))?
            .clone();
        if layer.kind != LayerKind::Span {
            return Err(EditError::NotASpanLayer(layer_id));
        }
        if layer.is_segmentation() {
            return Err(EditError::CreateNotSplit);
        }
        if !doc.contains_span(span) {
            return Err(EditError::InvalidSpan(span));
        }
        if let Some(spec) = &layer.attach {
            let base = features
                .get(&spec.feature)
                .and_then(|v| v.as_ref_id())
                .ok_or_else(|| EditError::MissingAttachFeature {
                    layer: layer_id,
                    feature: spec.feature.clone(),
                })?;
            let base_layer = doc
                .store
                .get(base)
                .ok_or(EditError::AnnotationNotFound(base))?
                .layer;
            if base_layer != spec.layer {
                return Err(EditError::MissingAttachFeature {
                    layer: layer_id,
                    feature: spec.feature.clone(),
                });
            }
        }
        for behavior in &self.behaviors {
            behavior.check_write(doc, layer_id, &layer, span)?;
        }

        let id = doc.store.insert(layer_id, span);
        if let Some(a) = doc.store.get_mut(id) {
            a.features = features;
        }
        log::debug!("added span {} at {} on {}", id, span, layer_id);
        Ok(id)
    }

    /// Add a relation between two existing annotations
    ///
    /// The relation's own span is the envelope of the two endpoints. A
    /// non-cross-boundary relation layer requires both endpoints inside
    /// one sentence.
    pub fn add_relation(
        &self,
        doc: &mut Document,
        layer_id: LayerId,
        source: AnnotationId,
        target: AnnotationId,
        features: Features,
    ) -> EditResult<AnnotationId> {
        let layer = doc
            .store
            .layer(layer_id)
            .ok_or(EditError::LayerNotFound(layer_id))?
            .clone();
        if layer.kind != LayerKind::Relation {
            return Err(EditError::NotARelationLayer(layer_id));
        }
        let source_span = doc
            .store
            .get(source)
            .ok_or(EditError::MissingEndpoint(source))?
            .span;
        let target_span = doc
            .store
            .get(target)
            .ok_or(EditError::MissingEndpoint(target))?
            .span;
        let envelope = Span::new(
            source_span.begin.min(target_span.begin),
            source_span.end.max(target_span.end),
        );
        if !layer.cross_boundary && doc.store.covering_sentence(envelope).is_none() {
            return Err(EditError::CrossBoundaryViolation(envelope));
        }

        let id = doc.store.insert(layer_id, envelope);
        if let Some(a) = doc.store.get_mut(id) {
            a.features = features;
            a.link = Some(crate::models::annotation::RelationLink { source, target });
        }
        log::debug!("added relation {} {} -> {}", id, source, target);
        Ok(id)
    }

    /// Delete an annotation, cascading to everything that references it
    ///
    /// Relations lose their endpoint, attached annotations lose their
    /// base; both are removed so no dangling reference survives the
    /// operation. Segmentation units must go through the segmentation
    /// adapter instead.
    pub fn delete(&self, doc: &mut Document, id: AnnotationId) -> EditResult<()> {
        let annotation = doc
            .store
            .get(id)
            .ok_or(EditError::AnnotationNotFound(id))?;
        let layer = doc
            .store
            .layer(annotation.layer)
            .ok_or(EditError::LayerNotFound(annotation.layer))?;
        if layer.is_segmentation() {
            return Err(EditError::IsSegmentationUnit(id));
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if doc.store.remove(next).is_some() {
                log::debug!("deleted annotation {}", next);
                pending.extend(doc.store.referencing(next));
            }
        }
        Ok(())
    }

    /// Non-blocking validation sweep over one layer
    ///
    /// This is the only mechanism for surfacing inconsistencies
    /// introduced outside the engine (bulk import, policy changes after
    /// data exists).
    pub fn validate_layer(&self, doc: &Document, layer_id: LayerId) -> EditResult<Vec<Diagnostic>> {
        let layer = doc
            .store
            .layer(layer_id)
            .ok_or(EditError::LayerNotFound(layer_id))?
            .clone();
        let mut marks = Vec::new();
        for behavior in &self.behaviors {
            marks.extend(behavior.validate(doc, layer_id, &layer));
        }
        Ok(marks)
    }
}

impl Default for SpanAdapter {
    fn default() -> Self {
        Self::new()
    }
}
