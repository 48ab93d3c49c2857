use anyhow::Result;

use super::ctx::FrameCtx;

/// What the runtime should do after a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by [`Runtime::run`](crate::window::Runtime::run).
pub trait App {
    /// Called once per redraw. Input received since the previous frame is in
    /// `ctx.input_frame`.
    ///
    /// An error stops the event loop and is returned from `Runtime::run`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl>;
}
