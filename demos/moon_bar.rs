//! Drive a narrow moon-phase bar over a numeric range.
//!
//! ```text
//! cargo run --example moon_bar
//! ```

use std::time::Duration;

use async_trait::async_trait;
use simmer::{EditError, MessageHandle, PhaseBar, PhaseStyle, Progressify};
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

    let style = PhaseStyle {
        width: 3,
        ..PhaseStyle::default()
    };
    let bar = PhaseBar::with_style(10, style)?;

    let mut items = Progressify::new(0..10, 10).at(reply).using(bar);
    while let Some(item) = items.next().await {
        let item = item?;
        tokio::time::sleep(Duration::from_millis(100 * (item + 1) as u64)).await;
    }

    Ok(())
}
