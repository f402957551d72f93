use log::trace;

use crate::buffer::OutputBuffer;
use crate::envelope::Envelope;
use crate::error::{Error, Misuse, Result};

const DEFAULT_INITIAL_CAPACITY: usize = 1024;

const DEFAULT_GROWTH_FALLBACK: usize = 256;

/// Allocation settings for a [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    initial_capacity: usize,
    growth_fallback: usize,
    capacity_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_fallback: DEFAULT_GROWTH_FALLBACK,
            capacity_limit: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes allocated for output when the context is created.
    #[must_use]
    pub fn initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    /// Increment tried when doubling the output buffer fails.
    #[must_use]
    pub fn growth_fallback(mut self, bytes: usize) -> Self {
        self.growth_fallback = bytes;
        self
    }

    /// Upper bound on the output buffer. Growing past it fails with
    /// [`Error::AllocationFailure`].
    #[must_use]
    pub fn capacity_limit(mut self, bytes: usize) -> Self {
        self.capacity_limit = Some(bytes);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Encode,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Ready,
    Feeding,
    Finished,
    Failed(Error),
}

/// State of one in-progress encode or decode stream.
///
/// Feed input in chunks of any size with [`encode_feed`](Context::encode_feed)
/// or [`decode_feed`](Context::decode_feed), then call the matching `*_finish`
/// exactly once to flush a trailing partial group. The produced bytes can be
/// read with [`output`](Context::output) at any time, and drained with
/// [`clear_output`](Context::clear_output) to keep memory bounded.
///
/// ```
/// use stream_ascii85::Context;
///
/// let mut ctx = Context::new()?;
/// ctx.encode_feed(b"he")?;
/// ctx.encode_feed(b"llo")?;
/// ctx.encode_finish()?;
/// assert_eq!(ctx.output(), b"BOu!rDZ");
/// # Ok::<(), stream_ascii85::Error>(())
/// ```
#[derive(Debug)]
pub struct Context {
    /// Input units of the group being assembled: raw bytes when encoding,
    /// digit values when decoding.
    pub(crate) hold: [u8; 5],
    pub(crate) hold_len: usize,
    pub(crate) output: OutputBuffer,
    pub(crate) processed: usize,
    pub(crate) envelope: Envelope,
    mode: Option<Mode>,
    phase: Phase,
}

impl Context {
    /// Creates a context with the default [`Config`].
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        let output = OutputBuffer::new(
            config.initial_capacity,
            config.growth_fallback,
            config.capacity_limit,
        )?;
        trace!("new context with {} bytes of output capacity", output.capacity());
        Ok(Context {
            hold: [0; 5],
            hold_len: 0,
            output,
            processed: 0,
            envelope: Envelope::Start,
            mode: None,
            phase: Phase::Ready,
        })
    }

    /// Prepares the context for an unrelated stream. Buffered output is
    /// discarded but its allocation is kept.
    pub fn reset(&mut self) {
        trace!("reset context after {} bytes", self.processed);
        self.hold_len = 0;
        self.output.clear();
        self.processed = 0;
        self.envelope = Envelope::Start;
        self.mode = None;
        self.phase = Phase::Ready;
    }

    /// Frees the context and its output buffer.
    pub fn release(self) {}

    /// Bytes produced so far.
    pub fn output(&self) -> &[u8] {
        self.output.as_slice()
    }

    /// Forgets the produced bytes without releasing their allocation.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn output_capacity(&self) -> usize {
        self.output.capacity()
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output.into_vec()
    }

    /// Input bytes consumed so far. After an error this is the offset of the
    /// offending byte.
    pub fn bytes_processed(&self) -> usize {
        self.processed
    }

    /// Number of input units waiting for their group to fill up.
    pub fn pending(&self) -> usize {
        self.hold_len
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn check(&self, mode: Mode) -> Result<()> {
        if let Phase::Failed(error) = &self.phase {
            return Err(error.clone());
        }
        match self.mode {
            Some(current) if current != mode => Err(Error::ApiMisuse(Misuse::ModeMismatch)),
            _ => Ok(()),
        }
    }

    pub(crate) fn begin_feed(&mut self, mode: Mode) -> Result<()> {
        self.check(mode)?;
        if self.phase == Phase::Finished {
            return Err(Error::ApiMisuse(Misuse::FeedAfterFinish));
        }
        self.mode = Some(mode);
        self.phase = Phase::Feeding;
        Ok(())
    }

    pub(crate) fn begin_finish(&mut self, mode: Mode) -> Result<()> {
        self.check(mode)?;
        if self.phase == Phase::Finished {
            return Err(Error::ApiMisuse(Misuse::FinishTwice));
        }
        self.mode = Some(mode);
        Ok(())
    }

    /// Remembers a failure so later calls report it again.
    pub(crate) fn settle(&mut self, result: Result<()>) -> Result<()> {
        if let Err(error) = &result {
            self.phase = Phase::Failed(error.clone());
        }
        result
    }

    pub(crate) fn settle_finish(&mut self, result: Result<()>) -> Result<()> {
        if result.is_ok() {
            self.phase = Phase::Finished;
        }
        self.settle(result)
    }
}
