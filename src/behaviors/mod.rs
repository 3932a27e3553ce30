//! Layer behaviors
//!
//! Independent rule objects consulted by the span adapter: overlap,
//! cross-boundary, and anchoring. Each behavior is a pure function over
//! the document and exposes two explicit entry points: a blocking
//! write-time check for a candidate range, and a non-blocking
//! validate-time sweep over a whole layer.
//!
//! The set is closed and evaluated in a fixed order: overlap, then
//! cross-boundary, then anchoring.

pub mod anchoring;
pub mod cross_boundary;
pub mod overlap;

use crate::diagnostics::Diagnostic;
use crate::error::EditResult;
use crate::models::document::Document;
use crate::models::layer::{Layer, LayerId};
use crate::models::span::Span;

pub use anchoring::AnchoringBehavior;
pub use cross_boundary::CrossBoundaryBehavior;
pub use overlap::OverlapBehavior;

/// A structural rule a layer imposes on its instances
pub trait LayerBehavior {
    /// Short identifier used as the diagnostic kind
    fn name(&self) -> &'static str;

    /// Blocking write-time check for a candidate range about to be added
    /// to `layer`. An error aborts the add before any mutation.
    fn check_write(
        &self,
        doc: &Document,
        layer_id: LayerId,
        layer: &Layer,
        candidate: Span,
    ) -> EditResult<()>;

    /// Non-blocking validate-time sweep over all instances of `layer`,
    /// e.g. before render. Never fails; returns diagnostics.
    fn validate(&self, doc: &Document, layer_id: LayerId, layer: &Layer) -> Vec<Diagnostic>;
}

/// The behavior chain in evaluation order
pub fn behavior_chain() -> Vec<Box<dyn LayerBehavior>> {
    vec![
        Box::new(OverlapBehavior),
        Box::new(CrossBoundaryBehavior),
        Box::new(AnchoringBehavior),
    ]
}
