//! Adapters: the mutating operation surface over the document model
//!
//! ## Modules
//!
//! - `span`: create/delete/validate for ordinary annotations
//! - `segmentation`: split/merge/delete algebra for the tiling layers
//! - `propagation`: cascading updates after a boundary change

pub mod propagation;
pub mod segmentation;
pub mod span;

pub use propagation::propagate_boundary_change;
pub use segmentation::{delete_unit, split_unit};
pub use span::SpanAdapter;
