use crate::renderer::PaintContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Integer rectangle stored as edges.
///
/// A view's rect is local to its parent's origin; the tree turns it into an
/// absolute rect on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Saturates instead of overflowing for edges far apart.
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            right: self.right.saturating_add(dx),
            bottom: self.bottom.saturating_add(dy),
        }
    }

    /// Strict containment: points on any edge are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x > self.left && x < self.right && y > self.top && y < self.bottom
    }
}

/// Pixel dimensions of a client area or a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in the receiver's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: i32,
    pub y: i32,
    /// Button involved, if any. Moves usually carry `None`.
    pub button: Option<MouseButton>,
}

impl MouseEvent {
    pub fn new(x: i32, y: i32, button: Option<MouseButton>) -> Self {
        Self { x, y, button }
    }

    /// Create a new event with translated coordinates
    pub fn with_coords(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }
}

/// Behaviour attached to a node of the view tree.
///
/// Geometry and tree links live in [`Tree`](crate::tree::Tree); a `View` only
/// supplies the paint and input hooks.
pub trait View {
    /// Paint into the current viewport. The projection spans the view's
    /// clipped size with the origin at the top-left corner.
    fn paint(&self, ctx: &mut PaintContext<'_>);

    fn on_mouse_down(&mut self, event: MouseEvent) {
        let _ = event;
    }

    fn on_mouse_up(&mut self, event: MouseEvent) {
        let _ = event;
    }

    fn on_mouse_move(&mut self, event: MouseEvent) {
        let _ = event;
    }
}
