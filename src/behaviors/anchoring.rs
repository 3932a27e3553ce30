//! Anchoring behavior
//!
//! Enforces how an instance's bounds relate to token boundaries:
//! `Characters` places no constraint, `Tokens` pins begin and end to
//! token boundaries, `SingleToken` requires the range to equal exactly
//! one token's range.

use crate::diagnostics::Diagnostic;
use crate::error::{EditError, EditResult};
use crate::models::document::Document;
use crate::models::layer::{Anchoring, Layer, LayerId, SegmentationKind};
use crate::models::span::Span;

use super::LayerBehavior;

pub struct AnchoringBehavior;

impl AnchoringBehavior {
    /// Why `span` fails the anchoring constraint, or `None` when it holds
    fn violation(doc: &Document, anchoring: Anchoring, span: Span) -> Option<&'static str> {
        match anchoring {
            Anchoring::Characters => None,
            Anchoring::SingleToken => {
                if doc.store.token_with_span(span).is_some() {
                    None
                } else {
                    Some("range must equal exactly one token")
                }
            }
            Anchoring::Tokens => {
                let token_layer = match doc.store.segmentation_layer(SegmentationKind::Token) {
                    Some(id) => id,
                    None => return Some("no token layer to anchor to"),
                };
                let mut begin_ok = false;
                let mut end_ok = false;
                for token in doc.store.in_layer(token_layer) {
                    begin_ok |= token.span.begin == span.begin;
                    end_ok |= token.span.end == span.end;
                }
                if begin_ok && end_ok {
                    None
                } else {
                    Some("bounds must coincide with token boundaries")
                }
            }
        }
    }
}

impl LayerBehavior for AnchoringBehavior {
    fn name(&self) -> &'static str {
        "anchoring"
    }

    fn check_write(
        &self,
        doc: &Document,
        _layer_id: LayerId,
        layer: &Layer,
        candidate: Span,
    ) -> EditResult<()> {
        match Self::violation(doc, layer.anchoring, candidate) {
            None => Ok(()),
            Some(message) => Err(EditError::AnchoringViolation {
                span: candidate,
                message: message.to_string(),
            }),
        }
    }

    fn validate(&self, doc: &Document, layer_id: LayerId, layer: &Layer) -> Vec<Diagnostic> {
        if layer.anchoring == Anchoring::Characters {
            return Vec::new();
        }
        doc.store
            .in_layer(layer_id)
            .iter()
            .filter_map(|a| {
                Self::violation(doc, layer.anchoring, a.span)
                    .map(|message| Diagnostic::error(a.id, a.span, self.name(), message))
            })
            .collect()
    }
}
