//! Iteration adapter that advances a progress bar as a sequence is consumed.
//!
//! [`Progressify`] wraps either a plain iterator or an async stream. Each
//! pull takes one element from the source, increments the bound bar, and
//! pushes one render to the bound message before handing the element to the
//! caller, so the visual state never runs ahead of or behind the loop body:
//!
//! ```ignore
//! let mut items = Progressify::new(0..10, 10).at(message);
//! while let Some(item) = items.next().await {
//!     let item = item?;
//!     // ... work ...
//! }
//! ```

use futures::stream::{self, BoxStream, StreamExt};
use thiserror::Error;
use tracing::debug;

use crate::bar::{BarError, BlockBar, ProgressBar};
use crate::message::{EditError, MessageHandle};

/// Error type for driving a [`Progressify`] loop.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("no message bound before iteration")]
    MessageUnbound,

    #[error(transparent)]
    Bar(#[from] BarError),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// The source sequence, before it is resolved into a cursor.
enum Source<T> {
    Sync(Box<dyn Iterator<Item = T> + Send>),
    Stream(BoxStream<'static, T>),
}

impl<T: Send + 'static> Source<T> {
    fn into_stream(self) -> BoxStream<'static, T> {
        match self {
            Source::Sync(iter) => stream::iter(iter).boxed(),
            Source::Stream(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No element pulled yet; configuration still applies.
    Unstarted,
    /// The cursor is fixed and elements are flowing.
    Iterating,
    /// The source ended. Terminal.
    Exhausted,
}

/// Wraps a sequence so that consuming it drives a progress bar inside a chat
/// message.
///
/// Built from a sync iterator ([`Progressify::new`]) or an async stream
/// ([`Progressify::from_stream`]) plus a declared length; the length is
/// passed separately because the source itself may be unsized. A message
/// must be bound with
/// [`at`](Self::at) before the first pull; the bar defaults to a
/// [`BlockBar`] over the declared length and can be swapped with
/// [`using`](Self::using).
///
/// Configuration is only effective before the first pull; afterwards the
/// cursor is fixed and the setters are no-ops.
pub struct Progressify<T, M> {
    source: Option<Source<T>>,
    cursor: Option<BoxStream<'static, T>>,
    length: usize,
    message: Option<M>,
    bar: Option<Box<dyn ProgressBar>>,
    state: State,
}

impl<T, M> Progressify<T, M>
where
    T: Send + 'static,
    M: MessageHandle,
{
    /// Wrap a synchronous sequence with a declared total of `length`.
    pub fn new<I>(items: I, length: usize) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::from_source(Source::Sync(Box::new(items.into_iter())), length)
    }

    /// Wrap an async stream with a declared total of `length`.
    pub fn from_stream<S>(items: S, length: usize) -> Self
    where
        S: futures::Stream<Item = T> + Send + 'static,
    {
        Self::from_source(Source::Stream(items.boxed()), length)
    }

    fn from_source(source: Source<T>, length: usize) -> Self {
        Self {
            source: Some(source),
            cursor: None,
            length,
            message: None,
            bar: None,
            state: State::Unstarted,
        }
    }

    /// Bind the message the bar renders into. Ignored after the first pull.
    pub fn at(mut self, message: M) -> Self {
        if self.state == State::Unstarted {
            self.message = Some(message);
        }
        self
    }

    /// Alias for [`at`](Self::at).
    pub fn for_message(self, message: M) -> Self {
        self.at(message)
    }

    /// Replace the default bar. Ignored after the first pull.
    pub fn using(mut self, bar: impl ProgressBar + 'static) -> Self {
        if self.state == State::Unstarted {
            self.bar = Some(Box::new(bar));
        }
        self
    }

    /// Pull the next element, advancing the bar and pushing one render
    /// before it is returned.
    ///
    /// Returns `None` once the source is exhausted (and on every pull after
    /// that). A pull with no message bound fails with
    /// [`ProgressError::MessageUnbound`] without consuming anything. An edit
    /// failure is returned to the caller with the element it accompanied
    /// already consumed and counted.
    pub async fn next(&mut self) -> Option<Result<T, ProgressError>> {
        if self.state == State::Exhausted {
            return None;
        }

        // Preconditions are checked before the cursor is touched, so a
        // failed pull on an unstarted adapter consumes nothing.
        let Some(message) = self.message.as_mut() else {
            return Some(Err(ProgressError::MessageUnbound));
        };

        if self.bar.is_none() {
            match BlockBar::new(self.length) {
                Ok(bar) => self.bar = Some(Box::new(bar)),
                Err(e) => return Some(Err(e.into())),
            }
        }

        if self.cursor.is_none() {
            let source = self.source.take()?;
            self.cursor = Some(source.into_stream());
            self.state = State::Iterating;
            debug!(length = self.length, "progress iteration started");
        }

        let (Some(cursor), Some(bar)) = (self.cursor.as_mut(), self.bar.as_mut()) else {
            return None;
        };

        match cursor.next().await {
            Some(item) => {
                bar.increment();
                if let Err(e) = bar.render_and_push(&mut *message).await {
                    return Some(Err(e.into()));
                }
                Some(Ok(item))
            }
            None => {
                self.state = State::Exhausted;
                debug!("progress iteration exhausted");
                None
            }
        }
    }
}

/// Sugar for wrapping an iterator directly: `(0..10).progressify(10)`.
pub trait ProgressifyExt: IntoIterator + Sized
where
    Self::Item: Send + 'static,
    Self::IntoIter: Send + 'static,
{
    /// Equivalent to [`Progressify::new`].
    fn progressify<M: MessageHandle>(self, length: usize) -> Progressify<Self::Item, M> {
        Progressify::new(self, length)
    }
}

impl<I> ProgressifyExt for I
where
    I: IntoIterator,
    I::Item: Send + 'static,
    I::IntoIter: Send + 'static,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::{PhaseBar, PhaseStyle};
    use crate::message::testing::MemoryMessage;

    async fn drain<T: Send + 'static>(
        items: &mut Progressify<T, MemoryMessage>,
    ) -> Result<Vec<T>, ProgressError> {
        let mut out = Vec::new();
        while let Some(item) = items.next().await {
            out.push(item?);
        }
        Ok(out)
    }

    #[tokio::test]
    async fn renders_once_per_element() {
        let mut items =
            Progressify::new(vec!["a", "b", "c", "d"], 4).at(MemoryMessage::new("start"));

        let collected = drain(&mut items).await.unwrap();
        assert_eq!(collected, vec!["a", "b", "c", "d"]);

        let msg = items.message.as_ref().unwrap();
        assert_eq!(msg.edits.len(), 4);
        // Each render reflects the increment that preceded it.
        assert!(msg.edits[0].ends_with("[█   ] 25.00%"));
        assert!(msg.edits[1].ends_with("[██  ] 50.00%"));
        assert!(msg.edits[2].ends_with("[███ ] 75.00%"));
        assert!(msg.edits[3].ends_with("[████] 100.00%"));
    }

    #[tokio::test]
    async fn empty_source_renders_nothing() {
        let mut items =
            Progressify::new(Vec::<u32>::new(), 5).at(MemoryMessage::new("start"));

        assert!(items.next().await.is_none());
        assert!(items.message.as_ref().unwrap().edits.is_empty());
    }

    #[tokio::test]
    async fn exhaustion_is_terminal() {
        let mut items = Progressify::new(0..2, 2).at(MemoryMessage::empty());

        assert!(drain(&mut items).await.is_ok());
        assert!(items.next().await.is_none());
        assert!(items.next().await.is_none());
        assert_eq!(items.message.as_ref().unwrap().edits.len(), 2);
    }

    #[tokio::test]
    async fn unbound_message_fails_without_consuming() {
        let mut items: Progressify<i32, MemoryMessage> = Progressify::new(0..3, 3);

        match items.next().await {
            Some(Err(ProgressError::MessageUnbound)) => {}
            other => panic!("expected MessageUnbound, got {:?}", other.map(|r| r.is_ok())),
        }

        // Nothing was consumed, so binding a message afterwards starts clean.
        let mut items = items.at(MemoryMessage::empty());
        assert_eq!(drain(&mut items).await.unwrap(), vec![0, 1, 2]);
        assert_eq!(items.message.as_ref().unwrap().edits.len(), 3);
    }

    #[tokio::test]
    async fn zero_length_default_bar_fails_at_first_pull() {
        let mut items = Progressify::new(0..3, 0).at(MemoryMessage::empty());

        match items.next().await {
            Some(Err(ProgressError::Bar(BarError::ZeroLength))) => {}
            _ => panic!("expected a zero-length bar error"),
        }
    }

    #[tokio::test]
    async fn custom_bar_is_used_for_rendering() {
        let style = PhaseStyle {
            width: 3,
            ..PhaseStyle::default()
        };
        let bar = PhaseBar::with_style(2, style).unwrap();
        let mut items = Progressify::new(0..2, 2).at(MemoryMessage::empty()).using(bar);

        drain(&mut items).await.unwrap();

        let msg = items.message.as_ref().unwrap();
        assert!(msg.edits[0].contains("🌕"));
        assert!(msg.edits[1].ends_with("Progress  🌕🌕🌕  (2/2 · 100.0%)"));
    }

    #[tokio::test]
    async fn setters_are_ignored_after_first_pull() {
        let mut items = Progressify::new(0..3, 3).at(MemoryMessage::new("first"));
        assert!(matches!(items.next().await, Some(Ok(0))));

        // Rebinding after the cursor is fixed has no effect.
        let mut items = items
            .at(MemoryMessage::new("second"))
            .using(PhaseBar::new(3).unwrap());
        assert_eq!(drain(&mut items).await.unwrap(), vec![1, 2]);

        let msg = items.message.as_ref().unwrap();
        assert_eq!(msg.edits.len(), 3);
        assert!(msg.edits[0].starts_with("first"));
        // Still the default block bar, not the phase bar.
        assert!(msg.edits[2].ends_with("[███] 100.00%"));
    }

    #[tokio::test]
    async fn async_stream_sources_are_supported() {
        let source = stream::iter(vec![10u8, 20, 30]);
        let mut items = Progressify::from_stream(source, 3).at(MemoryMessage::empty());

        assert_eq!(drain(&mut items).await.unwrap(), vec![10, 20, 30]);
        assert_eq!(items.message.as_ref().unwrap().edits.len(), 3);
    }

    #[tokio::test]
    async fn edit_failure_propagates_and_keeps_the_increment() {
        let mut msg = MemoryMessage::empty();
        msg.fail_next = true;
        let mut items = Progressify::new(0..4, 4).at(msg);

        // The element that accompanied the failed render is consumed and
        // counted; there is no rollback.
        match items.next().await {
            Some(Err(ProgressError::Edit(_))) => {}
            _ => panic!("expected an edit error"),
        }

        match items.next().await {
            Some(Ok(1)) => {}
            _ => panic!("expected the second element"),
        }
        let edits = &items.message.as_ref().unwrap().edits;
        assert_eq!(edits.len(), 1);
        assert!(edits[0].ends_with("[██  ] 50.00%"));
    }

    #[tokio::test]
    async fn extension_trait_wraps_iterators() {
        let mut items = (0..4).progressify(4).at(MemoryMessage::empty());
        assert_eq!(drain(&mut items).await.unwrap(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn declared_length_governs_the_default_bar() {
        // Source shorter than the declared length: the bar simply never
        // reaches 100%.
        let mut items = Progressify::new(0..2, 4).at(MemoryMessage::empty());
        drain(&mut items).await.unwrap();

        let msg = items.message.as_ref().unwrap();
        assert!(msg.edits[1].ends_with("[██  ] 50.00%"));
    }
}
