use crate::geometry::{Bounds, Point};
use ratatui::layout::{Position, Rect};

/// Map a coordinate in `0.0..=extent` onto one of `cells` cells, clamping
/// anything outside the range to the nearest edge cell.  Returns `None` if
/// there are no cells.
pub(crate) fn cell_index(value: f64, extent: f64, cells: u16) -> Option<u16> {
    let last = cells.checked_sub(1)?;
    let scaled = (value * f64::from(cells) / extent).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        Some(0)
    } else if scaled >= f64::from(last) {
        Some(last)
    } else {
        // `scaled` is a whole number strictly between 0 and `last`.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = scaled as u16;
        Some(index)
    }
}

/// Map a point on `plane` onto a cell of `area`
pub(crate) fn plane_to_cell(p: Point, plane: Bounds, area: Rect) -> Option<Position> {
    let col = cell_index(p.x, plane.width, area.width)?;
    let row = cell_index(p.y, plane.height, area.height)?;
    Some(Position::new(area.x.saturating_add(col), area.y.saturating_add(row)))
}
