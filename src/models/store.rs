//! Annotation store
//!
//! Arena of annotations keyed by stable ids, plus the layer registry.
//! The store itself enforces nothing; all structural invariants are the
//! adapters' responsibility. Mutation happens only through the adapters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::annotation::{Annotation, AnnotationId};
use super::layer::{Layer, LayerId, SegmentationKind};
use super::span::Span;

/// Multi-layer annotation store for one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationStore {
    layers: BTreeMap<LayerId, Layer>,
    annotations: BTreeMap<AnnotationId, Annotation>,
    next_layer_id: u32,
    next_annotation_id: u32,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a layer definition, returning its id
    pub fn define_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_layer_id);
        self.next_layer_id += 1;
        self.layers.insert(id, layer);
        id
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &Layer)> {
        self.layers.iter().map(|(id, layer)| (*id, layer))
    }

    /// The registered tiling layer of the given kind, if any
    pub fn segmentation_layer(&self, kind: SegmentationKind) -> Option<LayerId> {
        self.layers
            .iter()
            .find(|(_, layer)| layer.segmentation == Some(kind))
            .map(|(id, _)| *id)
    }

    /// Allocate an annotation in the arena
    pub fn insert(&mut self, layer: LayerId, span: Span) -> AnnotationId {
        let id = AnnotationId(self.next_annotation_id);
        self.next_annotation_id += 1;
        self.annotations.insert(id, Annotation::new(id, layer, span));
        id
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.get_mut(&id)
    }

    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        self.annotations.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    /// All instances of a layer, ordered by span then id
    pub fn in_layer(&self, layer: LayerId) -> Vec<&Annotation> {
        let mut out: Vec<&Annotation> = self
            .annotations
            .values()
            .filter(|a| a.layer == layer)
            .collect();
        out.sort_by_key(|a| (a.span, a.id));
        out
    }

    /// Ids of all instances of a layer, ordered by span then id
    pub fn ids_in_layer(&self, layer: LayerId) -> Vec<AnnotationId> {
        self.in_layer(layer).iter().map(|a| a.id).collect()
    }

    /// The unit of `layer` whose interior strictly contains `offset`
    pub fn unit_around(&self, layer: LayerId, offset: usize) -> Option<&Annotation> {
        self.annotations
            .values()
            .find(|a| a.layer == layer && a.span.contains_offset_strictly(offset))
    }

    /// The sentence whose range fully covers `span`, if a sentence layer
    /// is registered
    pub fn covering_sentence(&self, span: Span) -> Option<&Annotation> {
        let sentence_layer = self.segmentation_layer(SegmentationKind::Sentence)?;
        self.annotations
            .values()
            .find(|a| a.layer == sentence_layer && a.span.covers(span))
    }

    /// Check whether `offset` coincides with a token begin or end
    pub fn is_token_boundary(&self, offset: usize) -> bool {
        let token_layer = match self.segmentation_layer(SegmentationKind::Token) {
            Some(id) => id,
            None => return false,
        };
        self.annotations
            .values()
            .filter(|a| a.layer == token_layer)
            .any(|a| a.span.begin == offset || a.span.end == offset)
    }

    /// The token whose range equals `span` exactly, if any
    pub fn token_with_span(&self, span: Span) -> Option<&Annotation> {
        let token_layer = self.segmentation_layer(SegmentationKind::Token)?;
        self.annotations
            .values()
            .find(|a| a.layer == token_layer && a.span == span)
    }

    /// All annotations whose features or relation link reference `id`
    pub fn referencing(&self, id: AnnotationId) -> Vec<AnnotationId> {
        self.annotations
            .values()
            .filter(|a| a.references(id))
            .map(|a| a.id)
            .collect()
    }
}
