//! Graphics backends and the paint context handed to views.
//!
//! The container never touches ambient GL state directly: every bind, clear,
//! blit and viewport change goes through a [`Graphics`] implementation, so the
//! per-frame call order can be recorded and checked without a GPU.

pub mod gl;
pub mod projection;
pub mod recording;

use std::fmt;

use bitflags::bitflags;

use crate::error::Result;
use crate::views::{Color, Rect, Size};

pub use gl::GlowGraphics;
pub use projection::Ortho;
pub use recording::{GlCommand, RecordingGraphics};

bitflags! {
    /// Buffers affected by a clear or a blit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buffers: u8 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Framebuffer binding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferTarget {
    /// Both read and draw.
    Both,
    Read,
    Draw,
}

/// Sampling used when a blit is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

/// Result of a framebuffer completeness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    /// Raw status code reported by the driver.
    Incomplete(u32),
}

impl FramebufferStatus {
    pub fn is_complete(self) -> bool {
        self == FramebufferStatus::Complete
    }
}

/// A viewport in window pixels, origin at the bottom-left as GL defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Drawing surface seen by views while they paint.
///
/// Object safe so views stay independent of the backend type.
pub trait Canvas {
    /// Projection currently in effect.
    fn projection(&self) -> Ortho;

    /// Viewport currently in effect.
    fn viewport(&self) -> Viewport;

    /// Fill `rect`, given in the current viewport's top-left-origin
    /// coordinates, with `color`. Pixels outside the viewport are untouched.
    ///
    /// The fill is drawn with the blend state in effect, so a translucent
    /// `color` is mixed with what is already in the target.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Backend operations used by the window container.
///
/// Implementations assume their context is current on the calling thread.
pub trait Graphics: Canvas {
    type Framebuffer: Copy + fmt::Debug + PartialEq;
    type Renderbuffer: Copy + fmt::Debug + PartialEq;

    fn enable_multisample(&mut self);

    fn create_framebuffer(&mut self) -> Result<Self::Framebuffer>;
    fn create_renderbuffer(&mut self) -> Result<Self::Renderbuffer>;
    fn delete_framebuffer(&mut self, framebuffer: Self::Framebuffer);
    fn delete_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer);

    /// Bind `framebuffer`, or the default (visible) framebuffer for `None`.
    fn bind_framebuffer(
        &mut self,
        target: FramebufferTarget,
        framebuffer: Option<Self::Framebuffer>,
    );
    fn bind_renderbuffer(&mut self, renderbuffer: Option<Self::Renderbuffer>);

    /// (Re)allocate RGBA8 multisample storage for the bound renderbuffer.
    fn renderbuffer_storage_multisample(&mut self, samples: i32, size: Size);

    /// Attach `renderbuffer` as colour attachment 0 of the bound framebuffer.
    fn attach_color_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer);

    fn framebuffer_status(&mut self) -> FramebufferStatus;

    /// Enable blending with `(SRC_ALPHA, ONE_MINUS_SRC_ALPHA)`.
    fn enable_alpha_blending(&mut self);

    fn set_projection(&mut self, projection: Ortho);
    fn set_viewport(&mut self, viewport: Viewport);
    fn set_clear_color(&mut self, color: Color);
    fn clear(&mut self, buffers: Buffers);

    /// Copy `src` of the read framebuffer to `dst` of the draw framebuffer.
    /// Multisampled sources are resolved by the driver.
    fn blit_framebuffer(&mut self, src: Rect, dst: Rect, buffers: Buffers, filter: Filter);

    fn flush(&mut self);
}

impl<T: Canvas + ?Sized> Canvas for &mut T {
    fn projection(&self) -> Ortho {
        (**self).projection()
    }
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color)
    }
}

impl<T: Graphics + ?Sized> Graphics for &mut T {
    type Framebuffer = T::Framebuffer;
    type Renderbuffer = T::Renderbuffer;

    fn enable_multisample(&mut self) {
        (**self).enable_multisample()
    }
    fn create_framebuffer(&mut self) -> Result<Self::Framebuffer> {
        (**self).create_framebuffer()
    }
    fn create_renderbuffer(&mut self) -> Result<Self::Renderbuffer> {
        (**self).create_renderbuffer()
    }
    fn delete_framebuffer(&mut self, framebuffer: Self::Framebuffer) {
        (**self).delete_framebuffer(framebuffer)
    }
    fn delete_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer) {
        (**self).delete_renderbuffer(renderbuffer)
    }
    fn bind_framebuffer(
        &mut self,
        target: FramebufferTarget,
        framebuffer: Option<Self::Framebuffer>,
    ) {
        (**self).bind_framebuffer(target, framebuffer)
    }
    fn bind_renderbuffer(&mut self, renderbuffer: Option<Self::Renderbuffer>) {
        (**self).bind_renderbuffer(renderbuffer)
    }
    fn renderbuffer_storage_multisample(&mut self, samples: i32, size: Size) {
        (**self).renderbuffer_storage_multisample(samples, size)
    }
    fn attach_color_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer) {
        (**self).attach_color_renderbuffer(renderbuffer)
    }
    fn framebuffer_status(&mut self) -> FramebufferStatus {
        (**self).framebuffer_status()
    }
    fn enable_alpha_blending(&mut self) {
        (**self).enable_alpha_blending()
    }
    fn set_projection(&mut self, projection: Ortho) {
        (**self).set_projection(projection)
    }
    fn set_viewport(&mut self, viewport: Viewport) {
        (**self).set_viewport(viewport)
    }
    fn set_clear_color(&mut self, color: Color) {
        (**self).set_clear_color(color)
    }
    fn clear(&mut self, buffers: Buffers) {
        (**self).clear(buffers)
    }
    fn blit_framebuffer(&mut self, src: Rect, dst: Rect, buffers: Buffers, filter: Filter) {
        (**self).blit_framebuffer(src, dst, buffers, filter)
    }
    fn flush(&mut self) {
        (**self).flush()
    }
}

/// Context passed to [`View::paint`](crate::views::View::paint).
///
/// The canvas viewport and projection are already scoped to the view's
/// clipped rectangle.
pub struct PaintContext<'a> {
    canvas: &'a mut dyn Canvas,
    size: Size,
}

impl<'a> PaintContext<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, size: Size) -> Self {
        Self { canvas, size }
    }

    /// Clipped size of the view being painted.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The view's paintable area in its own coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    pub fn projection(&self) -> Ortho {
        self.canvas.projection()
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.fill_rect(rect, color);
    }

    /// Fill the whole paintable area.
    pub fn fill(&mut self, color: Color) {
        let bounds = self.bounds();
        self.canvas.fill_rect(bounds, color);
    }
}
