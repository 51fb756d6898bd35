//! Simmer Library
//!
//! Live-updating progress bars rendered inside chat messages. Wrap a
//! sequence (a plain iterator or an async stream) and every element you pull
//! advances a bar and pushes one render into a bound message before the
//! element reaches your loop body.
//!
//! ## Main Components
//!
//! - [`iter`] - The [`Progressify`] iteration adapter and [`ProgressifyExt`]
//! - [`bar`] - The [`ProgressBar`] contract and the [`BlockBar`]/[`PhaseBar`]
//!   renderers
//! - [`message`] - The [`MessageHandle`] seam to your chat client
//!
//! ## Quick Start
//!
//! ```ignore
//! use simmer::{Progressify, PhaseBar};
//!
//! // `reply` implements simmer::MessageHandle for your bot's message type.
//! let mut items = Progressify::new(0..10, 10)
//!     .at(reply)
//!     .using(PhaseBar::new(10)?);
//!
//! while let Some(item) = items.next().await {
//!     let item = item?;
//!     // ... per-element work; the message already shows this step ...
//! }
//! ```
//!
//! The bar defaults to a [`BlockBar`] sized to the declared length, one cell
//! per item. Edits are pushed strictly one at a time: each pull suspends
//! until its render lands, so no two edits for the same bar are ever in
//! flight.

pub mod bar;
pub mod iter;
pub mod message;

// Re-export commonly used types
pub use bar::{BarError, BlockBar, PhaseBar, PhaseStyle, ProgressBar};
pub use iter::{ProgressError, Progressify, ProgressifyExt};
pub use message::{EditError, MessageHandle};
