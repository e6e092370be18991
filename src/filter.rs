use crate::error::{MedianError, Result};
use crate::median::median_with_scratch;

/// Median-filter a buffer that already carries its edge padding
///
/// Writes one sample per slot of `output`: `output[i]` is the median of
/// `padded[i .. i + ws]`. The padded buffer therefore has to hold at least
/// `output.len() + ws - 1` samples; any padding split (head vs. tail) works
/// as long as that total holds.
///
/// # Arguments
/// * `ws` - Window size (must be odd)
/// * `padded` - Input samples including head and tail padding
/// * `output` - Destination, its length is the number of outputs produced
///
/// # Returns
/// `EvenWindowSize` if `ws` is even, `BufferTooSmall` if `padded` is too
/// short for `output.len()` windows
pub fn median_filter(ws: usize, padded: &[u8], output: &mut [u8]) -> Result<()> {
    if ws % 2 == 0 {
        return Err(MedianError::EvenWindowSize(ws));
    }

    let required = output.len() + (ws - 1);
    if padded.len() < required {
        return Err(MedianError::BufferTooSmall {
            required,
            available: padded.len(),
        });
    }

    let mut scratch = Vec::with_capacity(ws);
    for (out, window) in output.iter_mut().zip(padded.windows(ws)) {
        *out = median_with_scratch(window, &mut scratch);
    }

    Ok(())
}

/// Number of full windows a buffer of `padded_len` samples yields
pub(crate) fn output_len(ws: usize, padded_len: usize) -> usize {
    padded_len.saturating_sub(ws - 1)
}
