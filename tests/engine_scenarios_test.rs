// End-to-end scenarios over the text "1 2 3 4":
// tokens [0,1) [2,3) [4,5) [6,7), sentences [0,3) [4,7)

use annotation_engine::{
    Anchoring, AnnotationEngine, AnnotationId, Document, EditError, FeatureValue, Features, Layer,
    LayerId, OverlapMode, Span,
};

/// Build the standard tiled document through the store, the way the
/// persistence service would load it
fn tiled_engine() -> (AnnotationEngine, LayerId, LayerId) {
    let mut doc = Document::new("1 2 3 4");
    let tokens = doc.store.define_layer(Layer::token("Token"));
    let sentences = doc.store.define_layer(Layer::sentence("Sentence"));
    for span in [Span::new(0, 1), Span::new(2, 3), Span::new(4, 5), Span::new(6, 7)] {
        doc.store.insert(tokens, span);
    }
    doc.store.insert(sentences, Span::new(0, 3));
    doc.store.insert(sentences, Span::new(4, 7));
    (AnnotationEngine::from_document(doc), tokens, sentences)
}

fn layer_texts(engine: &AnnotationEngine, layer: LayerId) -> Vec<String> {
    let doc = engine.document();
    doc.store
        .in_layer(layer)
        .iter()
        .map(|a| doc.covered_text(a.span))
        .collect()
}

fn token_ids(engine: &AnnotationEngine, tokens: LayerId) -> Vec<AnnotationId> {
    engine.document().store.ids_in_layer(tokens)
}

#[test]
fn test_deleting_token_merges_into_sibling() {
    let (mut engine, tokens, _) = tiled_engine();
    let unit = token_ids(&engine, tokens)[2]; // "3" at [4,5)

    engine.delete_segmentation_unit(unit).unwrap();

    assert_eq!(layer_texts(&engine, tokens), vec!["1", "2", "3 4"]);
}

#[test]
fn test_splitting_token_replaces_it_with_two() {
    let (mut engine, tokens, _) = tiled_engine();
    // Merge "1" and "2" into one token [0,3) first
    let first = token_ids(&engine, tokens)[0];
    engine.delete_segmentation_unit(first).unwrap();
    assert_eq!(layer_texts(&engine, tokens), vec!["1 2", "3", "4"]);

    engine.split_segmentation_unit(tokens, 1).unwrap();

    assert_eq!(layer_texts(&engine, tokens), vec!["1", "2", "3", "4"]);
}

#[test]
fn test_splitting_sentence_at_token_boundary() {
    let mut doc = Document::new("1 2 3 4");
    let tokens = doc.store.define_layer(Layer::token("Token"));
    let sentences = doc.store.define_layer(Layer::sentence("Sentence"));
    for span in [Span::new(0, 1), Span::new(2, 3), Span::new(4, 5), Span::new(6, 7)] {
        doc.store.insert(tokens, span);
    }
    doc.store.insert(sentences, Span::new(0, 7));
    let mut engine = AnnotationEngine::from_document(doc);

    engine.split_segmentation_unit(sentences, 3).unwrap();

    assert_eq!(layer_texts(&engine, sentences), vec!["1 2", "3 4"]);
}

#[test]
fn test_splitting_sentence_inside_token_fails() {
    let mut doc = Document::new("1 2 3 4");
    let tokens = doc.store.define_layer(Layer::token("Token"));
    let sentences = doc.store.define_layer(Layer::sentence("Sentence"));
    doc.store.insert(tokens, Span::new(0, 1));
    doc.store.insert(tokens, Span::new(2, 5)); // "2 3" as one token
    doc.store.insert(tokens, Span::new(6, 7));
    doc.store.insert(sentences, Span::new(0, 7));
    let mut engine = AnnotationEngine::from_document(doc);

    let sentence_count = engine.document().store.ids_in_layer(sentences).len();
    let verdict = engine.split_segmentation_unit(sentences, 4);

    assert_eq!(verdict, Err(EditError::SplitNotAtTokenBoundary(4)));
    assert_eq!(
        engine.document().store.ids_in_layer(sentences).len(),
        sentence_count,
        "failed split must not mutate the store"
    );
}

#[test]
fn test_split_then_delete_left_restores_range() {
    // Split/merge inverse-ish property: split at p, delete the left half,
    // and the merged unit covers the original undivided range again
    // (modulo whitespace trimming)
    let (mut engine, tokens, _) = tiled_engine();
    let first = token_ids(&engine, tokens)[0];
    engine.delete_segmentation_unit(first).unwrap(); // "1 2" at [0,3)

    let merged = token_ids(&engine, tokens)[0];
    let original = engine.document().store.get(merged).unwrap().span;
    let (left, right) = engine.split_segmentation_unit(tokens, 1).unwrap();

    let restored = engine.delete_segmentation_unit(left).unwrap();
    assert_eq!(restored, right);
    assert_eq!(
        engine.document().store.get(restored).unwrap().span,
        original
    );
}

#[test]
fn test_no_overlap_layer_rejects_any_intersection() {
    let (mut engine, _, _) = tiled_engine();
    let ne = engine.define_layer(Layer::span(
        "ne",
        Anchoring::Characters,
        OverlapMode::NoOverlap,
    ));

    engine.add_span(ne, Span::new(0, 3), Features::new()).unwrap();
    let verdict = engine.add_span(ne, Span::new(2, 5), Features::new());

    assert!(matches!(verdict, Err(EditError::OverlapViolation { .. })));
}

#[test]
fn test_any_overlap_layer_accepts_everything() {
    let (mut engine, _, _) = tiled_engine();
    let note = engine.define_layer(Layer::span(
        "note",
        Anchoring::Characters,
        OverlapMode::AnyOverlap,
    ));

    engine.add_span(note, Span::new(0, 3), Features::new()).unwrap();
    engine.add_span(note, Span::new(2, 5), Features::new()).unwrap();
    engine.add_span(note, Span::new(0, 3), Features::new()).unwrap();

    assert_eq!(engine.document().store.in_layer(note).len(), 3);
}

#[test]
fn test_cross_boundary_write_time_rejection() {
    let (mut engine, _, _) = tiled_engine();
    let ne = engine.define_layer(
        Layer::span("ne", Anchoring::Characters, OverlapMode::AnyOverlap).within_sentence(),
    );

    let verdict = engine.add_span(ne, Span::new(2, 5), Features::new());
    assert_eq!(
        verdict,
        Err(EditError::CrossBoundaryViolation(Span::new(2, 5)))
    );
}

#[test]
fn test_cross_boundary_validate_time_diagnostics() {
    // A span created while crossing was allowed, then the policy changed:
    // validate reports exactly one diagnostic per crossing span
    let mut doc = Document::new("1 2 3 4");
    let tokens = doc.store.define_layer(Layer::token("Token"));
    let sentences = doc.store.define_layer(Layer::sentence("Sentence"));
    for span in [Span::new(0, 1), Span::new(2, 3), Span::new(4, 5), Span::new(6, 7)] {
        doc.store.insert(tokens, span);
    }
    doc.store.insert(sentences, Span::new(0, 3));
    doc.store.insert(sentences, Span::new(4, 7));
    let ne = doc.store.define_layer(
        Layer::span("ne", Anchoring::Characters, OverlapMode::AnyOverlap).within_sentence(),
    );
    doc.store.insert(ne, Span::new(2, 5)); // Crossing
    doc.store.insert(ne, Span::new(0, 3)); // Contained
    let engine = AnnotationEngine::from_document(doc);

    let marks = engine.validate_layer(ne).unwrap();

    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].span, Span::new(2, 5));
    assert_eq!(marks[0].message, "crossing boundaries is not permitted");
}

#[test]
fn test_cascading_resize_of_single_token_annotation() {
    let (mut engine, tokens, _) = tiled_engine();
    let lemma = engine.define_layer(Layer::span(
        "lemma",
        Anchoring::SingleToken,
        OverlapMode::StackingOnly,
    ));
    let token = token_ids(&engine, tokens)[3]; // "4" at [6,7)
    let dep = engine.add_span(lemma, Span::new(6, 7), Features::new()).unwrap();

    // Delete "3": "4" extends leftward to [4,7)
    let moved = token_ids(&engine, tokens)[2];
    engine.delete_segmentation_unit(moved).unwrap();

    let token_span = engine.document().store.get(token).unwrap().span;
    let dep_span = engine.document().store.get(dep).unwrap().span;
    assert_eq!(token_span, Span::new(4, 7));
    assert_eq!(dep_span, token_span);
}

#[test]
fn test_cascading_resize_of_attached_annotation() {
    let (mut engine, tokens, _) = tiled_engine();
    let pos = engine.define_layer(
        Layer::span("pos", Anchoring::SingleToken, OverlapMode::StackingOnly)
            .attached_to(tokens, "base"),
    );
    let base = token_ids(&engine, tokens)[1]; // "2" at [2,3)
    let mut features = Features::new();
    features.insert("base".to_string(), FeatureValue::Ref(base));
    let tag = engine.add_span(pos, Span::new(2, 3), features).unwrap();

    // "1" has no previous sibling in its sentence, so deleting it
    // extends "2" leftward; the tag follows its base
    let first = token_ids(&engine, tokens)[0];
    let merged = engine.delete_segmentation_unit(first).unwrap();
    assert_eq!(merged, base);

    let base_span = engine.document().store.get(base).unwrap().span;
    let tag_span = engine.document().store.get(tag).unwrap().span;
    assert_eq!(base_span, Span::new(0, 3));
    assert_eq!(tag_span, base_span);
}

#[test]
fn test_dependents_are_not_revalidated_during_propagation() {
    // After a merge, a resized dependent may violate its own layer
    // policies; the structural edit still succeeds and the inconsistency
    // surfaces at the next validate pass
    let (mut engine, tokens, _) = tiled_engine();
    let lemma = engine.define_layer(Layer::span(
        "lemma",
        Anchoring::SingleToken,
        OverlapMode::NoOverlap,
    ));
    engine.add_span(lemma, Span::new(4, 5), Features::new()).unwrap();
    engine.add_span(lemma, Span::new(6, 7), Features::new()).unwrap();

    // Merging "3" into "4" resizes the [6,7) lemma to [4,7); the [4,5)
    // lemma stays put, so the two now overlap
    let moved = token_ids(&engine, tokens)[2];
    engine.delete_segmentation_unit(moved).unwrap();

    let marks = engine.validate_layer(lemma).unwrap();
    assert!(!marks.is_empty(), "overlap surfaces at validate time");
}

#[test]
fn test_failed_add_leaves_store_untouched() {
    let (mut engine, _, _) = tiled_engine();
    let ne = engine.define_layer(Layer::span(
        "ne",
        Anchoring::Characters,
        OverlapMode::NoOverlap,
    ));
    engine.add_span(ne, Span::new(0, 3), Features::new()).unwrap();
    let before = engine.document().store.len();

    let _ = engine.add_span(ne, Span::new(1, 4), Features::new());

    assert_eq!(engine.document().store.len(), before);
}
