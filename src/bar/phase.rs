//! Moon-phase bar: a fixed number of cells drawn with phase glyphs.
//!
//! Example output:
//!
//! ```text
//! Progress  🌕🌕🌕🌓🌑🌑  (7/12 · 58.3%)
//! ```

use async_trait::async_trait;

use super::{BarError, ProgressBar};

/// Phase glyphs, ordered empty → full.
const PHASES: [&str; 5] = ["🌑", "🌒", "🌓", "🌔", "🌕"];

const EMPTY: &str = PHASES[0];
const QUARTER: &str = PHASES[1];
const HALF: &str = PHASES[2];
const THREE_QUARTER: &str = PHASES[3];
const FULL: &str = PHASES[4];

/// Styling for a [`PhaseBar`].
#[derive(Clone)]
pub struct PhaseStyle {
    /// How many glyph cells to draw. Independent of the item count.
    pub width: usize,
    /// Text prefix. An empty string disables it.
    pub label: String,
    /// Show `current/length` in the metadata segment.
    pub show_counts: bool,
    /// Show the percentage (one decimal) in the metadata segment.
    pub show_percent: bool,
}

impl Default for PhaseStyle {
    fn default() -> Self {
        Self {
            width: 6,
            label: "Progress".to_string(),
            show_counts: true,
            show_percent: true,
        }
    }
}

/// Fixed-width progress bar drawn with moon-phase glyphs.
///
/// Unlike [`BlockBar`](super::BlockBar), the visual width is configured
/// independently of the item count: progress maps to N full cells, at most
/// one partial cell, and empty cells for the rest.
pub struct PhaseBar {
    length: usize,
    style: PhaseStyle,
    current: usize,
}

impl PhaseBar {
    /// Create a bar for `length` items with the default style.
    pub fn new(length: usize) -> Result<Self, BarError> {
        Self::with_style(length, PhaseStyle::default())
    }

    /// Create a bar for `length` items with a custom style.
    pub fn with_style(length: usize, style: PhaseStyle) -> Result<Self, BarError> {
        if length == 0 {
            return Err(BarError::ZeroLength);
        }
        if style.width == 0 {
            return Err(BarError::ZeroWidth);
        }
        Ok(Self {
            length,
            style,
            current: 0,
        })
    }

    /// Items processed so far.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Total item count.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Progress from 0.0 to 100.0, clamped.
    pub fn percent(&self) -> f64 {
        if self.length == 0 {
            return 0.0;
        }
        ((self.current as f64 / self.length as f64) * 100.0).clamp(0.0, 100.0)
    }

    /// The glyph run: full cells, at most one partial cell, empty cells.
    fn render_cells(&self) -> String {
        let exact = self.style.width as f64 * self.percent() / 100.0;
        let full_count = (exact.floor() as usize).min(self.style.width);
        let frac = exact - full_count as f64;

        let mut cells = String::new();
        for _ in 0..full_count {
            cells.push_str(FULL);
        }

        let mut used = full_count;
        if full_count < self.style.width && frac > 0.0 {
            cells.push_str(partial_phase(frac));
            used += 1;
        }

        for _ in used..self.style.width {
            cells.push_str(EMPTY);
        }
        cells
    }
}

/// Pick the glyph for a partial cell. Boundaries are inclusive-low: exactly
/// 1/3 is a half moon, exactly 2/3 a three-quarter moon.
fn partial_phase(frac: f64) -> &'static str {
    if frac < 1.0 / 3.0 {
        QUARTER
    } else if frac < 2.0 / 3.0 {
        HALF
    } else {
        THREE_QUARTER
    }
}

#[async_trait]
impl ProgressBar for PhaseBar {
    fn increment(&mut self) {
        if self.current < self.length {
            self.current += 1;
        }
    }

    fn compose_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !self.style.label.is_empty() {
            parts.push(self.style.label.clone());
        }

        parts.push(self.render_cells());

        let mut meta: Vec<String> = Vec::new();
        if self.style.show_counts {
            meta.push(format!("{}/{}", self.current, self.length));
        }
        if self.style.show_percent {
            meta.push(format!("{:.1}%", self.percent()));
        }
        if !meta.is_empty() {
            parts.push(format!("({})", meta.join(" · ")));
        }

        parts.join("  ")
    }
}
