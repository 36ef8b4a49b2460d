//! Drawing surfaces
use crate::geometry::{Bounds, Point};
use crate::util::plane_to_cell;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle},
        Widget,
    },
    Terminal,
};
use std::io;

/// Something that can be drawn on.  Positions are in plane units, with the
/// origin at the top-left corner.
pub(crate) trait Surface {
    /// Start a new frame, discarding everything drawn so far
    fn clear(&mut self);

    /// Show everything drawn since the last `clear()`
    fn present(&mut self) -> io::Result<()>;

    fn draw_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Draw `text` with its top-left corner at `position`
    fn draw_text(&mut self, text: &str, position: Point, size: u16, color: Color);

    /// The size of the drawable plane
    fn dimensions(&self) -> Bounds;

    /// The width `text` would take up when drawn, in plane units
    fn text_width(&self, text: &str, size: u16) -> f64;
}

#[derive(Clone, Debug, PartialEq)]
struct CircleShape {
    center: Point,
    radius: f64,
    color: Color,
}

#[derive(Clone, Debug, PartialEq)]
struct TextShape {
    text: String,
    position: Point,
    color: Color,
}

/// The display list for one frame
#[derive(Clone, Debug, PartialEq)]
struct Scene {
    plane: Bounds,
    circles: Vec<CircleShape>,
    texts: Vec<TextShape>,
}

impl Scene {
    fn new(plane: Bounds) -> Scene {
        Scene {
            plane,
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.circles.clear();
        self.texts.clear();
    }
}

impl Widget for &Scene {
    // Shapes are painted in the order they were drawn.  Text always ends up
    // on top of shapes, as a cell can't hold both braille dots and a glyph.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Bounds { width, height } = self.plane;
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for c in &self.circles {
                    // The canvas's y axis points up.
                    ctx.draw(&Circle {
                        x: c.center.x,
                        y: height - c.center.y,
                        radius: c.radius,
                        color: c.color,
                    });
                }
            })
            .render(area, buf);
        for t in &self.texts {
            if let Some(pos) = plane_to_cell(t.position, self.plane, area) {
                buf.set_string(pos.x, pos.y, &t.text, Style::new().fg(t.color));
            }
        }
    }
}

/// A [`Surface`] that renders the plane across a whole terminal.  Text size
/// is ignored, as every glyph takes up one cell.
#[derive(Debug)]
pub(crate) struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    scene: Scene,
    /// Width of the terminal as of the last frame, for measuring text
    columns: u16,
}

impl<B: Backend> TerminalSurface<B> {
    pub(crate) fn new(terminal: Terminal<B>, plane: Bounds) -> io::Result<Self> {
        let columns = terminal.size()?.width;
        Ok(TerminalSurface {
            terminal,
            scene: Scene::new(plane),
            columns,
        })
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn clear(&mut self) {
        self.scene.clear();
    }

    fn present(&mut self) -> io::Result<()> {
        let scene = &self.scene;
        let area = self
            .terminal
            .draw(|frame| frame.render_widget(scene, frame.area()))?
            .area;
        self.columns = area.width;
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.scene.circles.push(CircleShape {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, _size: u16, color: Color) {
        self.scene.texts.push(TextShape {
            text: text.to_owned(),
            position,
            color,
        });
    }

    fn dimensions(&self) -> Bounds {
        self.scene.plane
    }

    fn text_width(&self, text: &str, _size: u16) -> f64 {
        let cells = u32::try_from(Line::raw(text).width()).unwrap_or(u32::MAX);
        f64::from(cells) * self.scene.plane.width / f64::from(self.columns.max(1))
    }
}

#[cfg(test)]
pub(crate) use self::recording::{DrawOp, RecordingSurface};
