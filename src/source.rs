use std::io::{self, ErrorKind, Read};

/// Outcome of a single batch read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRead {
    /// Number of samples written into the caller's buffer
    pub len: usize,
    /// Whether the source has no samples left after this read
    pub exhausted: bool,
}

/// A provider of samples for the streaming filter
///
/// Implementations fill up to `buf.len()` samples and report whether the
/// source is now exhausted. A read of zero samples is treated as exhausted
/// regardless of the flag.
pub trait SampleSource {
    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<BatchRead>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<BatchRead> {
        (**self).read_batch(buf)
    }
}

/// Adapts any [`Read`] into a [`SampleSource`]
///
/// `Read` only signals end of input by returning zero, so after a full batch
/// one byte is read ahead to learn whether anything follows. That byte is
/// handed out first on the next read. Short reads are retried until the
/// batch is full or the reader reaches its end.
pub struct ReadSource<R> {
    reader: R,
    lookahead: Option<u8>,
    exhausted: bool,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            lookahead: None,
            exhausted: false,
        }
    }

    /// Return the wrapped reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.exhausted = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn peek(&mut self) -> io::Result<()> {
        let mut byte = [0u8; 1];
        if self.fill(&mut byte)? == 1 {
            self.lookahead = Some(byte[0]);
        }
        Ok(())
    }
}

impl<R: Read> SampleSource for ReadSource<R> {
    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<BatchRead> {
        if buf.is_empty() {
            return Ok(BatchRead {
                len: 0,
                exhausted: self.exhausted && self.lookahead.is_none(),
            });
        }

        let mut len = 0;
        if let Some(byte) = self.lookahead.take() {
            buf[0] = byte;
            len = 1;
        }

        if !self.exhausted {
            len += self.fill(&mut buf[len..])?;
        }

        if !self.exhausted {
            self.peek()?;
        }

        Ok(BatchRead {
            len,
            exhausted: self.exhausted && self.lookahead.is_none(),
        })
    }
}
