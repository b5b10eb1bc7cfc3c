//! A retained-mode view tree composited through a multisampled OpenGL
//! framebuffer.
//!
//! Views are stored in a [`Tree`](tree::Tree) with bounds local to their
//! parent. A [`WindowContainer`] is the root: it paints the tree depth-first
//! into an offscreen multisample target, blits the result to the window and
//! routes mouse events to the topmost view under the pointer.
//!
//! ```ignore
//! let gl = Arc::new(unsafe { glow::Context::from_loader_function(loader) });
//! let mut window = WindowContainer::new(
//!     GlowGraphics::new(gl)?,
//!     client_area.clone(),
//!     ContainerConfig::default(),
//! )?;
//!
//! let panel = window.insert_view(Rect::new(0, 0, 300, 200), solid(Color::from_hex(0x20242c)));
//! let badge = window.tree_mut().insert(Rect::new(10, 10, 60, 40), solid(Color::WHITE));
//! window.tree_mut().add_view(panel, badge);
//!
//! // From the platform's event loop:
//! window.on_size(width, height);
//! window.on_paint();
//! window.on_mouse_down(MouseEvent::new(x, y, Some(MouseButton::Left)));
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod tree;
pub mod views;
pub mod window;

pub use config::ContainerConfig;
pub use error::{Error, Result};
pub use window::WindowContainer;

pub mod prelude {
    pub use crate::platform::{ClientArea, SharedClientArea};
    pub use crate::renderer::{Canvas, GlowGraphics, Graphics, PaintContext, RecordingGraphics};
    pub use crate::tree::{Tree, ViewId};
    pub use crate::views::{
        solid, Color, MouseButton, MouseEvent, Rect, Size, SolidView, View,
    };
    pub use crate::{ContainerConfig, WindowContainer};
}
