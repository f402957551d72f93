use log::debug;

use crate::alphabet::encode_digit;
use crate::context::{Context, Mode};
use crate::error::Result;
use crate::NULL_WORD;

fn divmod(n: u32, m: u32) -> (u32, u32) {
    (n / m, n % m)
}

/// Encodes 4 bytes (big-endian) as 5 symbols, most significant digit first.
pub(crate) fn encode_word(c: [u8; 4]) -> [u8; 5] {
    let n = u32::from_be_bytes(c);
    let (n, e) = divmod(n, 85);
    let (n, d) = divmod(n, 85);
    let (n, c) = divmod(n, 85);
    let (a, b) = divmod(n, 85);

    [encode_digit(a), encode_digit(b), encode_digit(c), encode_digit(d), encode_digit(e)]
}

impl Context {
    /// Encodes `input`, holding back up to 3 bytes until their group is
    /// complete.
    pub fn encode_feed(&mut self, input: &[u8]) -> Result<()> {
        self.begin_feed(Mode::Encode)?;
        let result = self.encode_bytes(input);
        self.settle(result)
    }

    /// Writes the trailing partial group, if any. A tail of `n` bytes becomes
    /// `n + 1` symbols and never uses the `z` shorthand.
    pub fn encode_finish(&mut self) -> Result<()> {
        self.begin_finish(Mode::Encode)?;
        let result = self.flush_encode();
        debug!(
            "encode finished: {} bytes in, {} bytes out",
            self.processed,
            self.output.as_slice().len()
        );
        self.settle_finish(result)
    }

    fn encode_bytes(&mut self, mut input: &[u8]) -> Result<()> {
        if self.hold_len > 0 {
            let take = (4 - self.hold_len).min(input.len());
            self.hold[self.hold_len..self.hold_len + take].copy_from_slice(&input[..take]);
            self.hold_len += take;
            self.processed += take;
            input = &input[take..];
            if self.hold_len < 4 {
                return Ok(());
            }
            self.hold_len = 0;
            let [a, b, c, d, _] = self.hold;
            self.emit_group([a, b, c, d])?;
        }

        let chunks = input.chunks_exact(4);
        let remainder = chunks.remainder();
        for chunk in chunks {
            let mut group = [0; 4];
            group.copy_from_slice(chunk);
            self.emit_group(group)?;
            self.processed += 4;
        }

        self.hold[..remainder.len()].copy_from_slice(remainder);
        self.hold_len = remainder.len();
        self.processed += remainder.len();
        Ok(())
    }

    fn emit_group(&mut self, group: [u8; 4]) -> Result<()> {
        if group == [0; 4] {
            self.output.ensure_capacity(1)?;
            self.output.append(&[NULL_WORD]);
        } else {
            self.output.ensure_capacity(5)?;
            self.output.append(&encode_word(group));
        }
        Ok(())
    }

    fn flush_encode(&mut self) -> Result<()> {
        let n = self.hold_len;
        if n == 0 {
            return Ok(());
        }
        let mut group = [0; 4];
        group[..n].copy_from_slice(&self.hold[..n]);
        self.hold_len = 0;

        self.output.ensure_capacity(n + 1)?;
        self.output.append(&encode_word(group)[..n + 1]);
        Ok(())
    }
}
