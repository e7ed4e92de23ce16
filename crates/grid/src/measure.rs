//! Bottom-up measure pass: per-axis content resolution and the container
//! preferred/minimum sizes derived from it.

use crate::model::{COLUMN_GAP, GridLayout, Placement};
use crate::types::{Axis, CellContent, Insets, Size, TrackSize};

/// Per-axis sizing state shared by the measure and arrange passes.
///
/// Recomputed from current child state on every pass; nothing here survives
/// between passes.
#[derive(Debug, Clone)]
pub(crate) struct AxisContent {
    /// Resolved sizes for Fixed and Fit tracks; 0 for Proportional tracks.
    pub sizes: Vec<i32>,
    /// Whether each track currently counts for geometry and gap purposes.
    /// Fixed tracks always do; Fit and Proportional tracks only while some
    /// visible placement covers them.
    pub occupied: Vec<bool>,
    /// Largest preferred size among visible single-span cells per track.
    /// Only read for Proportional tracks, where it feeds the preferred-size
    /// inference.
    pub preferred: Vec<i32>,
}

impl AxisContent {
    /// Number of occupied tracks on this axis.
    pub fn occupied_count(&self) -> i32 {
        self.occupied.iter().filter(|&&flag| flag).count() as i32
    }
}

/// Resolve one axis against the current content.
///
/// Coverage by any visible placement keeps a track occupied, spanning or
/// not; only single-span placements feed a Fit track's size (the child's
/// minimum size is authoritative there) or a Proportional track's preferred
/// content size.
pub(crate) fn resolve_axis_content<C: CellContent>(
    tracks: &[TrackSize],
    placements: &[Placement<C>],
    axis: Axis,
    scale: f32,
) -> AxisContent {
    let count = tracks.len();
    let mut sizes = vec![0; count];
    let mut occupied = vec![false; count];
    let mut preferred = vec![0; count];

    for placement in placements {
        if !placement.content.is_visible() {
            continue;
        }
        let start = placement.region.start(axis);
        for track in start..placement.region.end(axis).min(count) {
            occupied[track] = true;
        }
        if placement.region.span(axis) == 1 && start < count {
            match tracks[start] {
                TrackSize::Fit => {
                    let minimum = placement.content.minimum_size().on_axis(axis).max(0);
                    sizes[start] = sizes[start].max(minimum);
                }
                TrackSize::Proportional(_) => {
                    let size = placement.content.preferred_size().on_axis(axis).max(0);
                    preferred[start] = preferred[start].max(size);
                }
                TrackSize::Fixed(_) => {}
            }
        }
    }

    for (track, rule) in tracks.iter().enumerate() {
        if let TrackSize::Fixed(magnitude) = rule {
            sizes[track] = scale_fixed(*magnitude, scale);
            occupied[track] = true;
        }
    }

    tracing::debug!(
        "resolve_axis_content: axis={:?}, tracks={}, occupied={}, sizes={:?}",
        axis,
        count,
        occupied.iter().filter(|&&flag| flag).count(),
        sizes
    );

    AxisContent {
        sizes,
        occupied,
        preferred,
    }
}

/// Resolve a fixed track magnitude against the ambient display scale.
pub(crate) fn scale_fixed(magnitude: i32, scale: f32) -> i32 {
    (magnitude as f32 * scale).round() as i32
}

/// Minimum extent of one axis: Fixed and Fit tracks plus gaps between
/// occupied tracks plus insets. Proportional tracks contribute nothing.
pub(crate) fn axis_minimum(content: &AxisContent, gap: i32, insets_on_axis: i32) -> i32 {
    let track_total: i32 = content.sizes.iter().sum();
    track_total + gap * (content.occupied_count() - 1).max(0) + insets_on_axis
}

/// Preferred extent of one axis: the minimum extent plus the inferred
/// proportional extent.
pub(crate) fn axis_preferred(
    content: &AxisContent,
    tracks: &[TrackSize],
    gap: i32,
    insets_on_axis: i32,
) -> i32 {
    axis_minimum(content, gap, insets_on_axis) + proportional_preferred(tracks, content)
}

/// Smallest total proportional extent such that every occupied weighted
/// track receives at least its own content's preferred size under the
/// weighted split: the maximum over tracks of
/// `ceil(content × total_weight / weight)`.
fn proportional_preferred(tracks: &[TrackSize], content: &AxisContent) -> i32 {
    let total_weight: i64 = tracks
        .iter()
        .zip(&content.occupied)
        .filter(|&(rule, &occupied)| occupied && rule.is_proportional())
        .map(|(rule, _)| i64::from(rule.weight()))
        .sum();
    if total_weight == 0 {
        return 0;
    }

    let mut implied_total: i64 = 0;
    for ((rule, &occupied), &preferred) in tracks
        .iter()
        .zip(&content.occupied)
        .zip(&content.preferred)
    {
        if occupied && preferred > 0 && rule.is_proportional() {
            let weight = i64::from(rule.weight());
            let numerator = i64::from(preferred) * total_weight;
            let implied = (numerator + weight - 1) / weight;
            implied_total = implied_total.max(implied);
        }
    }
    implied_total as i32
}

impl<C: CellContent> GridLayout<C> {
    /// Preferred container size for the current content (measure pass).
    ///
    /// Fit tracks resolve to their content, Fixed tracks to their scaled
    /// magnitude, and Proportional tracks to the smallest extent that gives
    /// every weighted track room for its own content.
    pub fn preferred_size(&self, insets: Insets, scale: f32) -> Size {
        let columns = resolve_axis_content(self.columns(), self.placements(), Axis::Column, scale);
        let rows = resolve_axis_content(self.rows(), self.placements(), Axis::Row, scale);
        Size::new(
            axis_preferred(
                &columns,
                self.columns(),
                COLUMN_GAP,
                insets.on_axis(Axis::Column),
            ),
            axis_preferred(&rows, self.rows(), self.row_gap(), insets.on_axis(Axis::Row)),
        )
    }

    /// Minimum container size for the current content (measure pass).
    ///
    /// Identical to [`Self::preferred_size`] except that Proportional
    /// tracks are treated as zero.
    pub fn minimum_size(&self, insets: Insets, scale: f32) -> Size {
        let columns = resolve_axis_content(self.columns(), self.placements(), Axis::Column, scale);
        let rows = resolve_axis_content(self.rows(), self.placements(), Axis::Row, scale);
        Size::new(
            axis_minimum(&columns, COLUMN_GAP, insets.on_axis(Axis::Column)),
            axis_minimum(&rows, self.row_gap(), insets.on_axis(Axis::Row)),
        )
    }
}
