//! Drive the default block bar over a numeric range.
//!
//! Stands in for a bot command handler: the `ConsoleMessage` below plays the
//! role of the chat client's editable message, printing each edit the way a
//! chat window would show it.
//!
//! ```text
//! cargo run --example default_bar
//! ```

use std::time::Duration;

use async_trait::async_trait;
use simmer::{EditError, MessageHandle, Progressify};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// An "editable chat message" that renders to the terminal.
struct ConsoleMessage {
    text: Option<String>,
}

#[async_trait]
impl MessageHandle for ConsoleMessage {
    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    async fn edit_text(&mut self, text: String) -> Result<(), EditError> {
        println!("--- message edited ---\n{}\n", text);
        self.text = Some(text);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let reply = ConsoleMessage {
        text: Some("Progress bar below:".to_string()),
    };

    let mut items = Progressify::new(0..10, 10).at(reply);
    while let Some(item) = items.next().await {
        let _ = item?;
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    Ok(())
}
