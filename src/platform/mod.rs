//! The boundary with the windowing layer.
//!
//! Window creation and GL context setup happen elsewhere; the container only
//! needs to ask for the live client area size.

use std::cell::Cell;
use std::rc::Rc;

use crate::views::Size;

/// Source of the current client area size, in pixels.
pub trait ClientArea {
    fn client_size(&self) -> Size;
}

/// A fixed size.
impl ClientArea for Size {
    fn client_size(&self) -> Size {
        *self
    }
}

impl<F: Fn() -> Size> ClientArea for F {
    fn client_size(&self) -> Size {
        self()
    }
}

/// A client size shared between the windowing code and the container.
///
/// Clones observe the same value; the windowing code calls [`set`] on
/// resize before forwarding the resize to the container.
///
/// [`set`]: SharedClientArea::set
#[derive(Debug, Clone, Default)]
pub struct SharedClientArea(Rc<Cell<Size>>);

impl SharedClientArea {
    pub fn new(size: Size) -> Self {
        Self(Rc::new(Cell::new(size)))
    }

    pub fn set(&self, size: Size) {
        self.0.set(size);
    }

    pub fn get(&self) -> Size {
        self.0.get()
    }
}

impl ClientArea for SharedClientArea {
    fn client_size(&self) -> Size {
        self.get()
    }
}
