use super::view::{Color, View};
use crate::renderer::PaintContext;

/// A view that fills its whole paintable area with one colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidView {
    color: Color,
}

impl SolidView {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

pub fn solid(color: Color) -> SolidView {
    SolidView::new(color)
}

impl View for SolidView {
    fn paint(&self, ctx: &mut PaintContext<'_>) {
        ctx.fill(self.color);
    }
}
