//! Top-down arrange pass: leftover distribution, absolute track offsets,
//! and final cell bounds for a concrete allotted size.

use std::cmp::Reverse;

use log::debug;

use crate::measure::{AxisContent, resolve_axis_content};
use crate::model::{COLUMN_GAP, GridLayout};
use crate::types::{Axis, CellContent, CellRegion, Insets, Rect, TrackSize};

/// Resolved geometry for one axis: absolute track offsets and final sizes.
#[derive(Debug, Clone, Default)]
pub struct AxisLayout {
    /// Offset of each track from the container origin. A collapsed track
    /// sits at the running position without advancing it.
    pub offsets: Vec<i32>,
    /// Final size of each track.
    pub sizes: Vec<i32>,
}

/// One placed cell with its final bounds.
#[derive(Debug, Clone)]
pub struct PlacedCell<C> {
    /// Host handle for the placed child.
    pub content: C,
    /// Region the cell occupies.
    pub region: CellRegion,
    /// Final bounds, relative to the container origin.
    pub bounds: Rect,
}

/// Result of the arrange pass.
#[derive(Debug, Clone)]
pub struct LayoutResult<C> {
    /// Every registered placement with its bounds. Invisible cells keep
    /// their slot; tracks they alone occupied collapse, leaving degenerate
    /// bounds.
    pub cells: Vec<PlacedCell<C>>,
    /// Resolved column geometry.
    pub columns: AxisLayout,
    /// Resolved row geometry.
    pub rows: AxisLayout,
}

/// Arrange one axis for the given available extent.
pub(crate) fn arrange_axis(
    tracks: &[TrackSize],
    content: &AxisContent,
    available: i32,
    insets: Insets,
    axis: Axis,
    gap: i32,
) -> AxisLayout {
    let mut sizes = content.sizes.clone();
    let gap_total = gap * (content.occupied_count() - 1).max(0);
    let used: i32 = sizes.iter().sum();
    let remaining = (available - insets.on_axis(axis) - used - gap_total).max(0);
    distribute_remaining(&mut sizes, tracks, &content.occupied, remaining);

    let mut offsets = vec![0; sizes.len()];
    let mut cursor = insets.leading(axis);
    let mut past_first = false;
    for track in 0..sizes.len() {
        if content.occupied[track] {
            if past_first {
                cursor += gap;
            }
            offsets[track] = cursor;
            cursor += sizes[track];
            past_first = true;
        } else {
            // Collapsed tracks sit at the cursor and add no gap.
            offsets[track] = cursor;
        }
    }

    AxisLayout { offsets, sizes }
}

/// Split `remaining` across occupied proportional tracks by weight, with
/// largest-remainder rounding so the shares sum to `remaining` exactly:
/// every track gets the floor of its exact share, then the shortfall is
/// handed out one pixel at a time by descending fractional remainder,
/// lowest track index first on ties.
fn distribute_remaining(sizes: &mut [i32], tracks: &[TrackSize], occupied: &[bool], remaining: i32) {
    let shares: Vec<(usize, i64)> = tracks
        .iter()
        .enumerate()
        .filter(|(track, rule)| occupied[*track] && rule.is_proportional())
        .map(|(track, rule)| (track, i64::from(rule.weight())))
        .collect();
    let total_weight: i64 = shares.iter().map(|(_, weight)| weight).sum();
    if total_weight == 0 || remaining <= 0 {
        return;
    }

    debug!(
        "distribute_remaining: remaining={remaining} over {} weighted tracks, total weight {total_weight}",
        shares.len()
    );

    let mut handed_out = 0;
    let mut fractions: Vec<(Reverse<i64>, usize)> = Vec::with_capacity(shares.len());
    for (track, weight) in &shares {
        let exact = i64::from(remaining) * weight;
        let floor = (exact / total_weight) as i32;
        sizes[*track] = floor;
        handed_out += floor;
        fractions.push((Reverse(exact % total_weight), *track));
    }

    fractions.sort();
    let shortfall = (remaining - handed_out) as usize;
    for (_, track) in fractions.iter().take(shortfall) {
        sizes[*track] += 1;
    }
}

/// Extent of a span of tracks: their sizes plus one internal gap per
/// adjacent pair of occupied spanned tracks.
fn span_extent(
    axis_layout: &AxisLayout,
    content: &AxisContent,
    start: usize,
    end: usize,
    gap: i32,
) -> i32 {
    let mut total = 0;
    let mut occupied_in_span: i32 = 0;
    for track in start..end.min(axis_layout.sizes.len()) {
        total += axis_layout.sizes[track];
        if content.occupied[track] {
            occupied_in_span += 1;
        }
    }
    total + gap * (occupied_in_span - 1).max(0)
}

impl<C: CellContent + Clone> GridLayout<C> {
    /// Arrange pass: resolve final track geometry and the bounds of every
    /// placed cell for the allotted container size.
    ///
    /// Fixed and Fit sizes are recomputed from current content first (it
    /// may have changed since the last measure), then leftover space is
    /// split across proportional tracks. Spans that overflow the allotted
    /// size are not clamped; scrolling or clipping is the host's job.
    pub fn layout(&self, width: i32, height: i32, insets: Insets, scale: f32) -> LayoutResult<C> {
        let column_content =
            resolve_axis_content(self.columns(), self.placements(), Axis::Column, scale);
        let row_content = resolve_axis_content(self.rows(), self.placements(), Axis::Row, scale);
        let columns = arrange_axis(
            self.columns(),
            &column_content,
            width,
            insets,
            Axis::Column,
            COLUMN_GAP,
        );
        let rows = arrange_axis(
            self.rows(),
            &row_content,
            height,
            insets,
            Axis::Row,
            self.row_gap(),
        );

        let cells = self
            .placements()
            .iter()
            .map(|placement| {
                let region = placement.region;
                PlacedCell {
                    content: placement.content.clone(),
                    region,
                    bounds: Rect {
                        x: columns.offsets[region.col],
                        y: rows.offsets[region.row],
                        width: span_extent(
                            &columns,
                            &column_content,
                            region.col,
                            region.col_end(),
                            COLUMN_GAP,
                        ),
                        height: span_extent(
                            &rows,
                            &row_content,
                            region.row,
                            region.row_end(),
                            self.row_gap(),
                        ),
                    },
                }
            })
            .collect();

        LayoutResult {
            cells,
            columns,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(sizes: Vec<i32>, occupied: Vec<bool>) -> AxisContent {
        let count = sizes.len();
        AxisContent {
            sizes,
            occupied,
            preferred: vec![0; count],
        }
    }

    /// Test largest-remainder distribution over sizes that do not divide
    /// evenly, including the tie-break by track index.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_distribute_exact_sums() {
        let tracks = vec![TrackSize::Proportional(1); 3];
        let mut sizes = vec![0; 3];
        distribute_remaining(&mut sizes, &tracks, &[true, true, true], 100);
        assert_eq!(sizes, vec![34, 33, 33]);

        let tracks = vec![TrackSize::Proportional(1); 8];
        let mut sizes = vec![0; 8];
        distribute_remaining(&mut sizes, &tracks, &[true; 8], 100);
        assert_eq!(sizes, vec![13, 13, 13, 13, 12, 12, 12, 12]);
        assert_eq!(sizes.iter().sum::<i32>(), 100);
    }

    /// Test that the pixel shortfall goes to the largest fractional
    /// remainder, not the largest weight.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_distribute_prefers_largest_fraction() {
        let tracks = vec![TrackSize::Proportional(1), TrackSize::Proportional(2)];
        let mut sizes = vec![0; 2];
        // 301 * 1/3 = 100 rem 1, 301 * 2/3 = 200 rem 2: the extra pixel
        // belongs to the second track.
        distribute_remaining(&mut sizes, &tracks, &[true, true], 301);
        assert_eq!(sizes, vec![100, 201]);
    }

    /// Test that collapsed tracks receive no share and no gap while
    /// occupied zero-weight neighbors still get offsets.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_arrange_skips_collapsed_tracks() {
        let tracks = vec![TrackSize::Fit, TrackSize::Fit, TrackSize::Fit];
        let axis_content = content(vec![10, 0, 20], vec![true, false, true]);
        let arranged = arrange_axis(
            &tracks,
            &axis_content,
            100,
            Insets::default(),
            Axis::Row,
            5,
        );
        // One gap between the two occupied rows; the collapsed row sits at
        // the cursor.
        assert_eq!(arranged.offsets, vec![0, 10, 15]);
        assert_eq!(arranged.sizes, vec![10, 0, 20]);
    }

    /// Test offsets include the leading inset and inter-track gaps.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_arrange_offsets_with_insets() {
        let tracks = vec![TrackSize::Fixed(10), TrackSize::Proportional(1)];
        let axis_content = content(vec![10, 0], vec![true, true]);
        let arranged = arrange_axis(
            &tracks,
            &axis_content,
            50,
            Insets::uniform(3),
            Axis::Row,
            4,
        );
        // available 50 - insets 6 - fixed 10 - one gap 4 leaves 30.
        assert_eq!(arranged.sizes, vec![10, 30]);
        assert_eq!(arranged.offsets, vec![3, 17]);
    }

    /// Test span extent counts internal gaps only between occupied tracks.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn test_span_extent_internal_gaps() {
        let axis_layout = AxisLayout {
            offsets: vec![0, 25, 25],
            sizes: vec![20, 0, 30],
        };
        let axis_content = content(vec![20, 0, 30], vec![true, false, true]);
        assert_eq!(span_extent(&axis_layout, &axis_content, 0, 3, 5), 55);
        assert_eq!(span_extent(&axis_layout, &axis_content, 0, 2, 5), 20);
        assert_eq!(span_extent(&axis_layout, &axis_content, 1, 2, 5), 0);
    }
}
