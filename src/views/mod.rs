pub mod solid;
pub mod view;

pub use solid::{solid, SolidView};
pub use view::{Color, MouseButton, MouseEvent, Rect, Size, View};
