use serde::{Deserialize, Serialize};

use crate::error::{MedianError, Result};

/// Window size used when none is configured
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Smallest accepted window size
pub const MIN_WINDOW_SIZE: usize = 3;

/// Largest accepted window size
pub const MAX_WINDOW_SIZE: usize = 255;

/// Number of samples read from the source per batch when none is configured
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Filter configuration
///
/// Construct it directly, through [`FilterConfig::new`], or from JSON. The
/// streaming filter validates it before touching the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Number of samples per median window (odd, in `[3, 255]`)
    #[serde(alias = "ws")]
    pub window_size: usize,
    /// Number of samples read from the source per batch (at least 1)
    #[serde(alias = "bs")]
    pub batch_size: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl FilterConfig {
    /// Build a validated configuration
    pub fn new(window_size: usize, batch_size: usize) -> Result<Self> {
        let config = Self {
            window_size,
            batch_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON object and validate it
    ///
    /// Missing fields fall back to the defaults, so `{}` yields
    /// `window_size = 3, batch_size = 256`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MedianError::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the window and batch constraints
    ///
    /// Evenness is reported before the range so that any even window size,
    /// in range or not, fails with [`MedianError::EvenWindowSize`].
    pub fn validate(&self) -> Result<()> {
        let result = if self.window_size % 2 == 0 {
            Err(MedianError::EvenWindowSize(self.window_size))
        } else if !(MIN_WINDOW_SIZE..=MAX_WINDOW_SIZE).contains(&self.window_size) {
            Err(MedianError::WindowSizeOutOfRange(self.window_size))
        } else if self.batch_size == 0 {
            Err(MedianError::InvalidBatchSize(self.batch_size))
        } else {
            Ok(())
        };

        if let Err(ref e) = result {
            log::warn!("Rejected filter configuration {:?}: {}", self, e);
        }

        result
    }

    /// Samples on each side of the window centre
    pub fn half_window(&self) -> usize {
        self.window_size / 2
    }

    /// Length of the carry context kept between batches
    pub fn carry_len(&self) -> usize {
        2 * self.half_window()
    }
}

/// Totals reported after a stream has been filtered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub samples_in: u64,
    pub samples_out: u64,
    pub batches: u64,
}
