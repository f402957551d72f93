use log::debug;

use crate::alphabet::{self, MAX_DIGIT};
use crate::context::{Context, Mode};
use crate::envelope::Step;
use crate::error::{Error, Result};
use crate::{is_whitespace, NULL_WORD};

/// Decodes 5 digit values to 4 bytes.
///
/// Returns `None` if the group is larger than `u32::MAX`, which happens for
/// everything above `s8W-!`.
pub(crate) fn decode_word([a, b, c, d, e]: [u8; 5]) -> Option<[u8; 4]> {
    // 85^4 - 1 at most, cannot overflow
    let q = ((u32::from(a) * 85 + u32::from(b)) * 85 + u32::from(c)) * 85 + u32::from(d);
    let q = q.checked_mul(85)?.checked_add(u32::from(e))?;
    Some(q.to_be_bytes())
}

impl Context {
    /// Decodes `input`. Whitespace is skipped and an optional `<~ ... ~>`
    /// wrapper is stripped, even when it is split across calls.
    ///
    /// Every byte is validated as it arrives, so an error reports the exact
    /// offset of the offending byte via [`bytes_processed`](Context::bytes_processed).
    pub fn decode_feed(&mut self, input: &[u8]) -> Result<()> {
        self.begin_feed(Mode::Decode)?;
        let result = self.decode_bytes(input);
        self.settle(result)
    }

    /// Decodes the trailing partial group and checks that the wrapper, if one
    /// was opened, was closed.
    ///
    /// A tail of `n` digits is padded with `u` and yields `n - 1` bytes.
    pub fn decode_finish(&mut self) -> Result<()> {
        self.begin_finish(Mode::Decode)?;
        let result = self.flush_decode();
        debug!(
            "decode finished: {} bytes in, {} bytes out",
            self.processed,
            self.output.as_slice().len()
        );
        self.settle_finish(result)
    }

    fn decode_bytes(&mut self, input: &[u8]) -> Result<()> {
        for &byte in input {
            let position = self.processed;
            let mut step = self.envelope.step(byte);
            if step == Step::Reinject {
                self.decode_symbol(b'<', position.saturating_sub(1))?;
                step = self.envelope.step(byte);
            }
            match step {
                Step::Consumed => {}
                Step::Data => self.decode_symbol(byte, position)?,
                Step::Invalid => return Err(Error::BadEnvelope { position }),
                Step::Reinject => unreachable!("envelope left the header state"),
            }
            self.processed += 1;
        }
        Ok(())
    }

    fn decode_symbol(&mut self, byte: u8, position: usize) -> Result<()> {
        if is_whitespace(byte) {
            return Ok(());
        }

        if byte == NULL_WORD {
            if self.hold_len != 0 {
                return Err(Error::InvalidCharacter { byte, position });
            }
            self.output.ensure_capacity(4)?;
            self.output.append(&[0; 4]);
            return Ok(());
        }

        let digit = alphabet::decode_symbol(byte).ok_or(Error::InvalidCharacter { byte, position })?;
        self.hold[self.hold_len] = digit;
        self.hold_len += 1;
        if self.hold_len == 5 {
            self.hold_len = 0;
            let word = decode_word(self.hold).ok_or(Error::Overflow { position })?;
            self.output.ensure_capacity(4)?;
            self.output.append(&word);
        }
        Ok(())
    }

    fn flush_decode(&mut self) -> Result<()> {
        let n = self.hold_len;
        if n > 0 {
            let mut group = [MAX_DIGIT; 5];
            group[..n].copy_from_slice(&self.hold[..n]);
            self.hold_len = 0;

            let word = decode_word(group).ok_or(Error::Overflow { position: self.processed })?;
            self.output.ensure_capacity(n - 1)?;
            self.output.append(&word[..n - 1]);
        }

        if !self.envelope.is_complete() {
            return Err(Error::BadEnvelope { position: self.processed });
        }
        Ok(())
    }
}
