use crate::views::{Color, Size};

/// Settings for the container's offscreen render target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerConfig {
    /// Samples per pixel of the multisample colour buffer.
    pub samples: i32,
    /// Storage size allocated at construction, before the first resize.
    pub initial_size: Size,
    /// Colour the offscreen target is cleared to at the start of a frame.
    pub clear_color: Color,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            samples: 8,
            initial_size: Size::new(500, 500),
            clear_color: Color::TRANSPARENT,
        }
    }
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(mut self, samples: i32) -> Self {
        self.samples = samples;
        self
    }

    pub fn initial_size(mut self, width: i32, height: i32) -> Self {
        self.initial_size = Size::new(width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }
}
