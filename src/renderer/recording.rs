//! A [`Graphics`] backend that records calls instead of issuing them.

use super::{
    Buffers, Canvas, Filter, FramebufferStatus, FramebufferTarget, Graphics, Ortho, Viewport,
};
use crate::error::{Error, Result};
use crate::views::{Color, Rect, Size};

/// One recorded backend call.
///
/// Handles are the plain integers handed out by [`RecordingGraphics`].
#[derive(Debug, Clone, PartialEq)]
pub enum GlCommand {
    EnableMultisample,
    CreateFramebuffer(u32),
    CreateRenderbuffer(u32),
    DeleteFramebuffer(u32),
    DeleteRenderbuffer(u32),
    BindFramebuffer {
        target: FramebufferTarget,
        framebuffer: Option<u32>,
    },
    BindRenderbuffer(Option<u32>),
    RenderbufferStorageMultisample {
        samples: i32,
        size: Size,
    },
    AttachColorRenderbuffer(u32),
    CheckFramebufferStatus,
    EnableAlphaBlending,
    SetProjection(Ortho),
    SetViewport(Viewport),
    SetClearColor(Color),
    Clear(Buffers),
    BlitFramebuffer {
        src: Rect,
        dst: Rect,
        buffers: Buffers,
        filter: Filter,
    },
    Flush,
    FillRect {
        rect: Rect,
        color: Color,
    },
}

/// Records every call in order. Useful for checking frame structure in tests.
#[derive(Debug)]
pub struct RecordingGraphics {
    commands: Vec<GlCommand>,
    next_handle: u32,
    status: FramebufferStatus,
    fail_creation: bool,
    projection: Ortho,
    viewport: Viewport,
}

impl RecordingGraphics {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            next_handle: 1,
            status: FramebufferStatus::Complete,
            fail_creation: false,
            projection: Ortho::top_left(Size::default()),
            viewport: Viewport::default(),
        }
    }

    /// Status returned by every completeness check.
    pub fn with_status(mut self, status: FramebufferStatus) -> Self {
        self.status = status;
        self
    }

    /// Make every object creation fail.
    pub fn failing_creation(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    pub fn commands(&self) -> &[GlCommand] {
        &self.commands
    }

    /// Drain recorded commands, e.g. between frames.
    pub fn take_commands(&mut self) -> Vec<GlCommand> {
        std::mem::take(&mut self.commands)
    }

    fn allocate_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl Default for RecordingGraphics {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingGraphics {
    fn projection(&self) -> Ortho {
        self.projection
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(GlCommand::FillRect { rect, color });
    }
}

impl Graphics for RecordingGraphics {
    type Framebuffer = u32;
    type Renderbuffer = u32;

    fn enable_multisample(&mut self) {
        self.commands.push(GlCommand::EnableMultisample);
    }

    fn create_framebuffer(&mut self) -> Result<u32> {
        if self.fail_creation {
            return Err(Error::CreateFramebuffer("recording backend set to fail".into()));
        }
        let handle = self.allocate_handle();
        self.commands.push(GlCommand::CreateFramebuffer(handle));
        Ok(handle)
    }

    fn create_renderbuffer(&mut self) -> Result<u32> {
        if self.fail_creation {
            return Err(Error::CreateRenderbuffer("recording backend set to fail".into()));
        }
        let handle = self.allocate_handle();
        self.commands.push(GlCommand::CreateRenderbuffer(handle));
        Ok(handle)
    }

    fn delete_framebuffer(&mut self, framebuffer: u32) {
        self.commands.push(GlCommand::DeleteFramebuffer(framebuffer));
    }

    fn delete_renderbuffer(&mut self, renderbuffer: u32) {
        self.commands.push(GlCommand::DeleteRenderbuffer(renderbuffer));
    }

    fn bind_framebuffer(&mut self, target: FramebufferTarget, framebuffer: Option<u32>) {
        self.commands.push(GlCommand::BindFramebuffer { target, framebuffer });
    }

    fn bind_renderbuffer(&mut self, renderbuffer: Option<u32>) {
        self.commands.push(GlCommand::BindRenderbuffer(renderbuffer));
    }

    fn renderbuffer_storage_multisample(&mut self, samples: i32, size: Size) {
        self.commands.push(GlCommand::RenderbufferStorageMultisample { samples, size });
    }

    fn attach_color_renderbuffer(&mut self, renderbuffer: u32) {
        self.commands.push(GlCommand::AttachColorRenderbuffer(renderbuffer));
    }

    fn framebuffer_status(&mut self) -> FramebufferStatus {
        self.commands.push(GlCommand::CheckFramebufferStatus);
        self.status
    }

    fn enable_alpha_blending(&mut self) {
        self.commands.push(GlCommand::EnableAlphaBlending);
    }

    fn set_projection(&mut self, projection: Ortho) {
        self.projection = projection;
        self.commands.push(GlCommand::SetProjection(projection));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.push(GlCommand::SetViewport(viewport));
    }

    fn set_clear_color(&mut self, color: Color) {
        self.commands.push(GlCommand::SetClearColor(color));
    }

    fn clear(&mut self, buffers: Buffers) {
        self.commands.push(GlCommand::Clear(buffers));
    }

    fn blit_framebuffer(&mut self, src: Rect, dst: Rect, buffers: Buffers, filter: Filter) {
        self.commands.push(GlCommand::BlitFramebuffer {
            src,
            dst,
            buffers,
            filter,
        });
    }

    fn flush(&mut self) {
        self.commands.push(GlCommand::Flush);
    }
}
