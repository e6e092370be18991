/// Median of a window of samples
///
/// Returns the element at sorted position `len / 2`, which is the exact
/// median for odd-length windows. The window itself is left untouched.
/// Returns `None` for an empty window.
pub fn median(window: &[u8]) -> Option<u8> {
    if window.is_empty() {
        return None;
    }

    let mut scratch = window.to_vec();
    Some(sorted_middle(&mut scratch))
}

/// Copy `window` into `scratch` and return its median
///
/// `scratch` is reused across calls so the filter loop does not allocate per
/// output sample. `window` must not be empty.
pub(crate) fn median_with_scratch(window: &[u8], scratch: &mut Vec<u8>) -> u8 {
    scratch.clear();
    scratch.extend_from_slice(window);
    sorted_middle(scratch)
}

fn sorted_middle(buf: &mut [u8]) -> u8 {
    buf.sort_unstable();
    buf[buf.len() / 2]
}
