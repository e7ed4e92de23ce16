//! Two-dimensional, track-based grid layout engine.
//!
//! Columns and rows are declared with comma-separated track templates
//! (for example `"Fit,100px,*,3*"`): `Fit` tracks size to their content,
//! `px` tracks to a fixed scaled magnitude, and `*` tracks split whatever
//! space is left, by weight and with pixel-exact rounding. Children are
//! placed into cells, optionally spanning several rows or columns, and only
//! need to satisfy the small [`CellContent`] contract (minimum size,
//! preferred size, visibility).
//!
//! Two passes do all the work, and both are pure functions of the current
//! model, child state, allotted size, and display scale:
//! - the **measure** pass ([`GridLayout::preferred_size`],
//!   [`GridLayout::minimum_size`]) derives container sizes bottom-up;
//! - the **arrange** pass ([`GridLayout::layout`]) resolves final track
//!   offsets and per-cell bounds for a concrete allotted size.
//!
//! The engine is synchronous and single-threaded, performs no I/O, never
//! mutates children, and caches nothing between passes. Painting, event
//! routing, and deciding when a pass runs are the hosting container's job.

#![forbid(unsafe_code)]

// Track, geometry, and cell-contract types
mod types;
pub use types::{Axis, CellContent, CellRegion, Insets, Rect, Size, TrackSize};

// Track template parsing
mod template;
pub use template::{TemplateParseError, parse_track_size, parse_track_template};

// Grid model: axes, placements, validation
mod model;
pub use model::{GridError, GridLayout, Placement, PlacementError};

// Measure pass (preferred/minimum sizes)
mod measure;

// Arrange pass (track geometry and cell bounds)
mod arrange;
pub use arrange::{AxisLayout, LayoutResult, PlacedCell};
