use std::io::Write;

use crate::error::{MedianError, Result};
use crate::filter::{median_filter, output_len};
use crate::profile_scope;
use crate::source::SampleSource;
use crate::types::{FilterConfig, StreamSummary, DEFAULT_BATCH_SIZE};

/// Lifecycle of a [`StreamFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No samples seen yet
    Empty,
    /// Handling the first non-empty batch
    Priming,
    /// Carry context holds the tail of the previous batch
    Streaming,
    /// End of stream reached, every output written
    Done,
}

/// Batched streaming median filter
///
/// Filters a stream batch by batch so that the concatenated output is
/// identical to filtering the whole stream in one buffer. The last
/// `2 * (ws / 2)` samples of each batch are kept as carry context and
/// become the head of the next padded buffer; the final `ws / 2` samples of
/// every non-final batch are withheld until the next batch supplies their
/// right-hand neighbours.
///
/// Memory use is bounded by the batch size plus the window size.
pub struct StreamFilter {
    config: FilterConfig,
    state: StreamState,
    carry: Vec<u8>,
    padded: Vec<u8>,
    output: Vec<u8>,
    summary: StreamSummary,
}

impl StreamFilter {
    /// Create a filter for one stream
    ///
    /// # Returns
    /// An error if the configuration is invalid
    pub fn new(config: FilterConfig) -> Result<Self> {
        config.validate()?;

        let carry_len = config.carry_len();
        let half = config.half_window();

        Ok(Self {
            config,
            state: StreamState::Empty,
            carry: Vec::with_capacity(carry_len),
            padded: Vec::with_capacity(config.batch_size + carry_len + half),
            output: Vec::with_capacity(config.batch_size + half),
            summary: StreamSummary::default(),
        })
    }

    /// Configuration the filter was created with
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Totals so far
    pub fn summary(&self) -> StreamSummary {
        self.summary
    }

    /// Filter the next batch of the stream and write its outputs to `sink`
    ///
    /// `exhausted` marks `batch` as the last one; an empty batch with
    /// `exhausted` set flushes the withheld samples. Batches may have any
    /// length, independent of the configured batch size.
    ///
    /// Any error aborts the stream: later pushes fail with
    /// [`MedianError::StreamFinished`].
    ///
    /// # Returns
    /// Number of samples written to `sink`
    pub fn push_batch<W: Write + ?Sized>(
        &mut self,
        batch: &[u8],
        exhausted: bool,
        sink: &mut W,
    ) -> Result<usize> {
        // First sample of the stream when this batch primes the filter
        let head = match self.state {
            StreamState::Done => return Err(MedianError::StreamFinished),
            StreamState::Empty => match batch.first() {
                Some(&first) => {
                    self.state = StreamState::Priming;
                    Some(first)
                }
                None if exhausted => {
                    self.state = StreamState::Done;
                    return Err(MedianError::EmptyStream);
                }
                None => return Ok(0),
            },
            StreamState::Streaming if batch.is_empty() && !exhausted => return Ok(0),
            StreamState::Priming | StreamState::Streaming => None,
        };

        let result = self.process(head, batch, exhausted, sink);
        if result.is_err() {
            self.carry.clear();
            self.state = StreamState::Done;
        }
        result
    }

    fn process<W: Write + ?Sized>(
        &mut self,
        head: Option<u8>,
        batch: &[u8],
        exhausted: bool,
        sink: &mut W,
    ) -> Result<usize> {
        let ws = self.config.window_size;
        let half = self.config.half_window();

        self.padded.clear();
        match head {
            Some(first) => self.padded.resize(half, first),
            None => self.padded.extend_from_slice(&self.carry),
        }
        self.padded.extend_from_slice(batch);

        if exhausted {
            if let Some(&last) = self.padded.last() {
                self.padded.resize(self.padded.len() + half, last);
            }
        } else {
            let keep = self.padded.len().min(self.config.carry_len());
            self.carry.clear();
            self.carry
                .extend_from_slice(&self.padded[self.padded.len() - keep..]);
        }

        let produced = output_len(ws, self.padded.len());
        self.output.clear();
        self.output.resize(produced, 0);
        median_filter(ws, &self.padded, &mut self.output)?;

        log::debug!(
            "Batch {} ({:?}): {} samples in, {} padded, {} out{}",
            self.summary.batches,
            self.state,
            batch.len(),
            self.padded.len(),
            produced,
            if exhausted { ", final" } else { "" }
        );

        sink.write_all(&self.output)?;

        if !batch.is_empty() {
            self.summary.batches += 1;
        }
        self.summary.samples_in += batch.len() as u64;
        self.summary.samples_out += produced as u64;

        if exhausted {
            sink.flush()?;
            self.carry.clear();
            self.state = StreamState::Done;
        } else {
            self.state = StreamState::Streaming;
        }

        Ok(produced)
    }

    /// End the stream without further data, flushing withheld samples
    pub fn finish<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<usize> {
        self.push_batch(&[], true, sink)
    }
}

/// Median-filter an entire source into a sink, one batch at a time
///
/// # Arguments
/// * `config` - Window and batch size
/// * `source` - Sample provider, read until it reports exhaustion
/// * `sink` - Receives exactly one output sample per input sample
///
/// # Returns
/// Totals for the run. Output already written before a failing batch is
/// left in the sink.
pub fn filter_stream<S, W>(
    config: FilterConfig,
    mut source: S,
    mut sink: W,
) -> Result<StreamSummary>
where
    S: SampleSource,
    W: Write,
{
    let mut filter = StreamFilter::new(config)?;
    profile_scope!(format!(
        "median stream (ws={}, bs={})",
        config.window_size, config.batch_size
    ));

    log::info!(
        "Filtering stream: window size {}, batch size {}",
        config.window_size,
        config.batch_size
    );

    let mut batch = vec![0u8; config.batch_size];
    loop {
        let read = source.read_batch(&mut batch)?;
        let len = read.len.min(batch.len());
        let exhausted = read.exhausted || len == 0;

        filter.push_batch(&batch[..len], exhausted, &mut sink)?;

        if exhausted {
            break;
        }
    }

    let summary = filter.summary();
    log::info!(
        "Filtered {} samples in {} batches",
        summary.samples_out,
        summary.batches
    );

    Ok(summary)
}

/// Median-filter an in-memory buffer in a single pass
///
/// Edges are padded by replicating the first and last samples. Streamed
/// runs over the same data produce identical output.
pub fn filter_slice(window_size: usize, input: &[u8]) -> Result<Vec<u8>> {
    FilterConfig {
        window_size,
        batch_size: DEFAULT_BATCH_SIZE,
    }
    .validate()?;

    let (first, last) = match (input.first(), input.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(MedianError::EmptyStream),
    };

    let half = window_size / 2;
    let mut padded = Vec::with_capacity(input.len() + 2 * half);
    padded.resize(half, first);
    padded.extend_from_slice(input);
    padded.resize(padded.len() + half, last);

    let mut output = vec![0u8; input.len()];
    median_filter(window_size, &padded, &mut output)?;
    Ok(output)
}
