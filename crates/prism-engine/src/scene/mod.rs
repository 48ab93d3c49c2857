//! Retained draw stream used by the gallery shell (sidebar).
//!
//! Commands are recorded in any order and replayed back-to-front by
//! `render::shapes::{RectRenderer, TextRenderer}`.

mod cmd;
mod list;
mod order;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use order::{SortKey, ZIndex};
pub use shapes::{RectCmd, TextCmd};
