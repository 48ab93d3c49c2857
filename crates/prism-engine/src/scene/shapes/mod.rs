mod rect;
mod text;

pub use rect::RectCmd;
pub use text::TextCmd;
