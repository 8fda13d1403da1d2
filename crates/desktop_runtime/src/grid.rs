//! Icon grid geometry. Pure functions of the viewport and fixed cell metrics.

use crate::model::{Point, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Fixed metrics of the desktop icon grid.
pub struct GridMetrics {
    /// Column pitch.
    pub cell_width: i32,
    /// Row pitch.
    pub cell_height: i32,
    /// Offset of the first cell from the desktop edge.
    pub margin: i32,
    /// Height reserved for the taskbar.
    pub taskbar_height: i32,
    /// Rendered icon box size.
    pub icon_footprint: i32,
}

/// Number of icon rows that fit in one column; never less than one.
pub fn rows_per_column(viewport_height: i32, metrics: &GridMetrics) -> i32 {
    let available = viewport_height - metrics.taskbar_height - metrics.margin;
    (available.div_euclid(metrics.cell_height)).max(1)
}

/// Position of the `index`-th icon in column-major order.
pub fn compute_slot(index: usize, viewport_height: i32, metrics: &GridMetrics) -> Point {
    let rows = rows_per_column(viewport_height, metrics) as usize;
    let column = (index / rows) as i32;
    let row = (index % rows) as i32;
    Point::new(
        metrics.margin + column * metrics.cell_width,
        metrics.margin + row * metrics.cell_height,
    )
}

/// Snaps a free position to the nearest grid cell that keeps the icon inside the desktop.
pub fn snap(position: Point, viewport: Viewport, metrics: &GridMetrics) -> Point {
    let max_column = ((viewport.width - metrics.icon_footprint - metrics.margin)
        .div_euclid(metrics.cell_width))
    .max(0);
    let max_row = rows_per_column(viewport.height, metrics) - 1;

    let column = nearest_cell(position.left - metrics.margin, metrics.cell_width).clamp(0, max_column);
    let row = nearest_cell(position.top - metrics.margin, metrics.cell_height).clamp(0, max_row);
    Point::new(
        metrics.margin + column * metrics.cell_width,
        metrics.margin + row * metrics.cell_height,
    )
}

// Round half away from zero, like `Math.round` for the non-negative case.
fn nearest_cell(offset: i32, pitch: i32) -> i32 {
    (f64::from(offset) / f64::from(pitch)).round() as i32
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn metrics() -> GridMetrics {
        GridMetrics {
            cell_width: 90,
            cell_height: 100,
            margin: 15,
            taskbar_height: 48,
            icon_footprint: 75,
        }
    }

    // (563 - 48 - 15) / 100 = 5 rows
    const FIVE_ROW_HEIGHT: i32 = 563;

    #[test]
    fn index_seven_with_five_rows_lands_in_column_one_row_two() {
        assert_eq!(rows_per_column(FIVE_ROW_HEIGHT, &metrics()), 5);
        assert_eq!(
            compute_slot(7, FIVE_ROW_HEIGHT, &metrics()),
            Point::new(15 + 90, 15 + 2 * 100)
        );
    }

    #[test]
    fn slots_fill_columns_top_down() {
        let m = metrics();
        let slots: Vec<Point> = (0..6).map(|i| compute_slot(i, FIVE_ROW_HEIGHT, &m)).collect();
        assert_eq!(slots[0], Point::new(15, 15));
        assert_eq!(slots[4], Point::new(15, 415));
        assert_eq!(slots[5], Point::new(105, 15));
    }

    #[test]
    fn tiny_viewport_still_has_one_row() {
        assert_eq!(rows_per_column(40, &metrics()), 1);
        assert_eq!(compute_slot(3, 40, &metrics()), Point::new(15 + 3 * 90, 15));
    }

    #[test]
    fn snap_rounds_to_nearest_cell() {
        let viewport = Viewport {
            width: 1024,
            height: FIVE_ROW_HEIGHT,
        };
        assert_eq!(snap(Point::new(150, 170), viewport, &metrics()), Point::new(195, 215));
        assert_eq!(snap(Point::new(59, 64), viewport, &metrics()), Point::new(15, 15));
    }

    #[test]
    fn snap_rounds_half_cells_up() {
        let viewport = Viewport {
            width: 1024,
            height: FIVE_ROW_HEIGHT,
        };
        // exactly half a pitch past column 0 / row 0
        assert_eq!(snap(Point::new(15 + 45, 15 + 50), viewport, &metrics()), Point::new(105, 115));
        assert_eq!(snap(Point::new(15 + 44, 15 + 49), viewport, &metrics()), Point::new(15, 15));
    }

    #[test]
    fn snap_clamps_into_desktop() {
        let viewport = Viewport {
            width: 400,
            height: FIVE_ROW_HEIGHT,
        };
        // columns 0..=3 keep a 75px icon inside 400px
        assert_eq!(snap(Point::new(-300, -40), viewport, &metrics()), Point::new(15, 15));
        assert_eq!(
            snap(Point::new(2000, 2000), viewport, &metrics()),
            Point::new(15 + 3 * 90, 15 + 4 * 100)
        );
    }

    #[test]
    fn snapped_positions_are_always_grid_slots() {
        let viewport = Viewport {
            width: 700,
            height: FIVE_ROW_HEIGHT,
        };
        let m = metrics();
        let slots: Vec<Point> = (0..40).map(|i| compute_slot(i, viewport.height, &m)).collect();
        for left in (-100..900).step_by(37) {
            for top in (-100..900).step_by(41) {
                let snapped = snap(Point::new(left, top), viewport, &m);
                assert!(slots.contains(&snapped), "{snapped:?} is not a slot");
            }
        }
    }
}
