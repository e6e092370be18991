pub mod types;
pub mod median;
pub mod filter;
pub mod source;
pub mod stream;
pub mod profiling;
pub mod error;

pub use types::*;
pub use median::median;
pub use filter::median_filter;
pub use source::{BatchRead, ReadSource, SampleSource};
pub use stream::{filter_slice, filter_stream, StreamFilter, StreamState};
pub use error::{MedianError, Result};
