use crate::views::Size;

/// An orthographic projection volume, equivalent to `glOrtho`.
///
/// Core-profile GL has no fixed-function matrix stack, so the projection is
/// kept as a value and handed to views through the paint context. Shaders
/// upload [`Ortho::matrix`] as a uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ortho {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Ortho {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// Projection spanning `size` with the origin at the top-left corner and
    /// Y growing downwards.
    pub fn top_left(size: Size) -> Self {
        Self::new(0.0, size.width as f32, size.height as f32, 0.0, -1.0, 1.0)
    }

    /// Column-major 4x4 matrix, laid out the way `glUniformMatrix4fv`
    /// expects it without transposition.
    ///
    /// Returns `None` for a degenerate volume (zero width, height or depth),
    /// for which GL would raise `GL_INVALID_VALUE`.
    pub fn matrix(&self) -> Option<[f32; 16]> {
        let w = self.right - self.left;
        let h = self.top - self.bottom;
        let d = self.far - self.near;
        if w == 0.0 || h == 0.0 || d == 0.0 {
            return None;
        }

        let tx = -(self.right + self.left) / w;
        let ty = -(self.top + self.bottom) / h;
        let tz = -(self.far + self.near) / d;

        Some([
            2.0 / w, 0.0, 0.0, 0.0, // column 0
            0.0, 2.0 / h, 0.0, 0.0, // column 1
            0.0, 0.0, -2.0 / d, 0.0, // column 2
            tx, ty, tz, 1.0, // column 3
        ])
    }

    /// Map a point into normalized device coordinates.
    pub fn project(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let m = self.matrix()?;
        Some((m[0] * x + m[12], m[5] * y + m[13]))
    }
}
