//! Default block-fill bar: `[████      ] 40.00%`.

use async_trait::async_trait;

use super::{BarError, ProgressBar};

/// Block-fill progress bar with one cell per item.
///
/// The bar's visual width equals its length, so each consumed element fills
/// exactly one cell.
pub struct BlockBar {
    length: usize,
    current: usize,
}

impl BlockBar {
    /// Create a bar for `length` items. Fails on a zero length.
    pub fn new(length: usize) -> Result<Self, BarError> {
        if length == 0 {
            return Err(BarError::ZeroLength);
        }
        Ok(Self { length, current: 0 })
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
}

#[async_trait]
impl ProgressBar for BlockBar {
    fn increment(&mut self) {
        if self.current < self.length {
            self.current += 1;
        }
    }

    fn compose_line(&self) -> String {
        let filled = ((self.length as f64 * self.percent() / 100.0) as usize).min(self.length);
        format!(
            "[{}{}] {:.2}%",
            "█".repeat(filled),
            " ".repeat(self.length - filled),
            self.percent()
        )
    }
}
