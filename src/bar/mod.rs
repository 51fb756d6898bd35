//! Progress bar renderers.
//!
//! A bar owns a saturating `current`/`length` counter pair and knows how to
//! turn it into one display line. [`ProgressBar`] is the capability contract:
//! variants implement [`ProgressBar::compose_line`] and inherit
//! [`ProgressBar::render_and_push`], which appends the line to the bound
//! message's text.
//!
//! Two variants ship:
//!
//! - [`BlockBar`]: `[████      ] 40.00%`, one cell per item.
//! - [`PhaseBar`]: `Progress  🌕🌕🌕🌓🌑🌑  (7/12 · 58.3%)`, fixed-width moon
//!   phases with optional label, counts, and percentage.

mod block;
mod phase;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::{EditError, MessageHandle};

pub use block::BlockBar;
pub use phase::{PhaseBar, PhaseStyle};

/// Error type for bar construction.
#[derive(Debug, Error)]
pub enum BarError {
    #[error("length must be greater than zero")]
    ZeroLength,

    #[error("width must be greater than zero")]
    ZeroWidth,
}

/// A renderable progress bar bound to a fixed total.
///
/// `increment` and `render_and_push` are deliberately separate: the iteration
/// adapter advances the counter first and pushes the render second, so a
/// failed push never leaves the counter behind the elements actually
/// consumed.
#[async_trait]
pub trait ProgressBar: Send + Sync {
    /// Advance the counter by one. Saturates at the total; calling past the
    /// end is a no-op.
    fn increment(&mut self);

    /// The display line for the current counter state.
    fn compose_line(&self) -> String;

    /// Compose the current line and append it to `message`'s text, separated
    /// by a blank line. Suspends until the edit resolves; edit failures
    /// propagate to the caller.
    async fn render_and_push(&self, message: &mut dyn MessageHandle) -> Result<(), EditError> {
        let line = self.compose_line();
        let text = format!("{}\n\n{}", message.text().unwrap_or_default(), line);
        tracing::trace!(line = %line, "pushing render");
        message.edit_text(text).await
    }
}
