//! The seam between progress bars and the chat client.
//!
//! The core only ever needs two things from a chat message: its current text
//! and a way to replace that text. [`MessageHandle`] captures exactly that,
//! so any bot framework's message type can be adapted with a small impl.
//! Transport, authentication, and rate limiting all stay on the client's side
//! of this trait.

use async_trait::async_trait;
use thiserror::Error;

/// Error returned by the chat client when a message edit fails.
///
/// The client's own error is carried verbatim as the source; nothing in this
/// crate retries or suppresses it.
#[derive(Debug, Error)]
#[error("message edit failed: {0}")]
pub struct EditError(Box<dyn std::error::Error + Send + Sync>);

impl EditError {
    /// Wrap a client-side error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// A handle to one editable chat message.
#[async_trait]
pub trait MessageHandle: Send {
    /// The message's current text, if it has any.
    fn text(&self) -> Option<String>;

    /// Replace the message's text. Suspends until the edit completes.
    async fn edit_text(&mut self, text: String) -> Result<(), EditError>;
}
