use crate::scene::shapes::{RectCmd, TextCmd};

/// One recorded drawing operation.
///
/// Each variant has a matching renderer under `render::shapes`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Text(TextCmd),
}
