use super::entity::Entity;
use crate::geometry::Point;
use crate::surface::Surface;
use ratatui::style::Color;

/// A labelled number drawn on the plane, such as the score
#[derive(Clone, Debug, PartialEq)]
pub(super) struct NumberDisplay {
    position: Point,
    pub(super) amount: f64,
    label: &'static str,
    size: u16,
    color: Color,
    /// Whether `position` is the top-center of the text rather than its
    /// top-left
    centered: bool,
}

impl NumberDisplay {
    pub(super) fn new(position: Point, label: &'static str, size: u16, color: Color) -> Self {
        NumberDisplay {
            position,
            amount: 0.0,
            label,
            size,
            color,
            centered: false,
        }
    }

    pub(super) fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    /// The text as drawn: the label followed by the amount to one decimal
    /// place
    pub(super) fn text(&self) -> String {
        format!("{}{:.1}", self.label, self.amount)
    }
}

impl Entity for NumberDisplay {
    fn draw(&self, surface: &mut dyn Surface) {
        let text = self.text();
        let mut position = self.position;
        if self.centered {
            position.x -= surface.text_width(&text, self.size) / 2.0;
        }
        surface.draw_text(&text, position, self.size, self.color);
    }
}
