//! Engine facade
//!
//! One `AnnotationEngine` per document. The engine is single-writer: all
//! structural edits are synchronous, non-reentrant, and atomic (they
//! fully succeed or reject before mutating the store), and all cascading
//! updates have been applied by the time an operation returns. Callers
//! serialize edits to the same document; independent documents are
//! independent engines.

use crate::adapters::{delete_unit, propagate_boundary_change, split_unit, SpanAdapter};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::EditResult;
use crate::models::annotation::{AnnotationId, Features};
use crate::models::document::Document;
use crate::models::layer::{Layer, LayerId};
use crate::models::span::Span;

pub struct AnnotationEngine {
    doc: Document,
    spans: SpanAdapter,
}

impl AnnotationEngine {
    /// Create an engine over a fresh document with an empty store
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            doc: Document::new(text),
            spans: SpanAdapter::new(),
        }
    }

    /// Wrap a document loaded by the persistence service
    pub fn from_document(doc: Document) -> Self {
        Self {
            doc,
            spans: SpanAdapter::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Hand the document back, e.g. for serialization
    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Register a layer definition from the schema service
    pub fn define_layer(&mut self, layer: Layer) -> LayerId {
        self.doc.store.define_layer(layer)
    }

    /// Add a span annotation; all write-time behavior checks are blocking
    pub fn add_span(
        &mut self,
        layer: LayerId,
        span: Span,
        features: Features,
    ) -> EditResult<AnnotationId> {
        self.spans.add_span(&mut self.doc, layer, span, features)
    }

    /// Add a relation annotation between two existing annotations
    pub fn add_relation(
        &mut self,
        layer: LayerId,
        source: AnnotationId,
        target: AnnotationId,
        features: Features,
    ) -> EditResult<AnnotationId> {
        self.spans
            .add_relation(&mut self.doc, layer, source, target, features)
    }

    /// Delete a span or relation annotation, cascading to references
    pub fn delete_span(&mut self, id: AnnotationId) -> EditResult<()> {
        self.spans.delete(&mut self.doc, id)
    }

    /// Non-blocking validation pass over one layer, e.g. before render
    pub fn validate_layer(&self, layer: LayerId) -> EditResult<Vec<Diagnostic>> {
        self.spans.validate_layer(&self.doc, layer)
    }

    /// Validation pass over every registered layer
    pub fn validate_all(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        for (layer, _) in self.doc.store.layers() {
            if let Ok(marks) = self.spans.validate_layer(&self.doc, layer) {
                diagnostics.extend(marks);
            }
        }
        diagnostics
    }

    /// Split the segmentation unit containing `point` into two trimmed
    /// halves; the left half keeps the unit's id
    pub fn split_segmentation_unit(
        &mut self,
        layer: LayerId,
        point: usize,
    ) -> EditResult<(AnnotationId, AnnotationId)> {
        split_unit(&mut self.doc, layer, Span::point(point))
    }

    /// Delete a segmentation unit, merging its range into a sibling
    /// (backward preferred); returns the merged sibling
    pub fn delete_segmentation_unit(&mut self, id: AnnotationId) -> EditResult<AnnotationId> {
        delete_unit(&mut self.doc, id)
    }

    /// Cascade dependent-annotation updates for a boundary change applied
    /// outside the adapters (the adapters call this themselves)
    pub fn on_segmentation_unit_moved(&mut self, id: AnnotationId, old_span: Span) {
        propagate_boundary_change(&mut self.doc, id, old_span);
    }
}
