//! # ASCII85 Encoding
//!
//! stream-ascii85 implements ASCII85 encoding as an incremental engine.
//! Arbitrary bytes are mapped to the characters in range `b'!'..=b'u'`. For
//! more details on the encoding scheme refer to [Wikipedia](https://en.wikipedia.org/wiki/Ascii85).
//!
//! The character `z` encodes four zero bytes, whitespaces are skipped, start
//! (`<~`) and ending sequences (`~>`) are optional while decoding. Input can be
//! fed to a [`Context`] in chunks of any size; the output is identical to
//! feeding everything at once.
//!
//! ## Decode Example
//!
//! ```
//! use stream_ascii85::decode;
//! const EXAMPLE_CODEC: &str = r#"<~9jqo^BlbD-BleB1DJ+*+F(f,q/0JhKF<GL>Cj@.4Gp$d7F!,L7@<6@)/0JDEF<G%<+EV:2F!,O<DJ+*.@<*K0@<6L(Df-\0Ec5e;DffZ(EZee.Bl.9pF"AGXBPCsi+DGm>@3BB/F*&OCAfu2/AKYi(DIb:@FD,*)+C]U=@3BN#EcYf8ATD3s@q?d$AftVqCh[NqF<G:8+EV:.+Cf>-FD5W8ARlolDIal(DId<j@<?3r@:F%a+D58'ATD4$Bl@l3De:,-DJs`8ARoFb/0JMK@qB4^F!,R<AKZ&-DfTqBG%G>uD.RTpAKYo'+CT/5+Cei#DII?(E,9)oF*2M7/c~>"#;
//!
//! println!("{:?}", decode(EXAMPLE_CODEC.as_bytes()).unwrap());
//! ```
//!
//! ## Encode Example
//!
//! ```
//! use stream_ascii85::encode;
//! const EXAMPLE_PLAIN: &[u8; 269] = b"Man is distinguished, not only by his reason, but by this singular passion from other animals, which is a lust of the mind, that by a perseverance of delight in the continued and indefatigable generation of knowledge, exceeds the short vehemence of any carnal pleasure.";
//!
//! println!("{}", String::from_utf8(encode(&EXAMPLE_PLAIN[..]).unwrap()).unwrap());
//! ```
//!
//! ## Streaming Example
//!
//! ```
//! use stream_ascii85::Context;
//!
//! let mut ctx = Context::new()?;
//! let mut decoded = Vec::new();
//! for chunk in [&b"<~BOu!r"[..], b"D]j7BE", b"bo80~>"].iter() {
//!     ctx.decode_feed(chunk)?;
//!     decoded.extend_from_slice(ctx.output());
//!     ctx.clear_output();
//! }
//! ctx.decode_finish()?;
//! decoded.extend_from_slice(ctx.output());
//! assert_eq!(decoded, b"hello world!");
//! # Ok::<(), stream_ascii85::Error>(())
//! ```

mod alphabet;
mod buffer;
mod context;
mod decode;
mod encode;
mod envelope;
mod error;

pub use alphabet::ALPHABET;
pub use context::{Config, Context};
pub use error::{Error, ErrorKind, Misuse, Result};

/// The character `z` represents 4 null bytes (0x0000_0000).
const NULL_WORD: u8 = b'z';

pub const START_SEQUENCE: &[u8; 2] = b"<~";

pub const END_SEQUENCE: &[u8; 2] = b"~>";

/// Whitespace skipped between symbols while decoding.
#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\r' | b'\t')
}

/// Largest possible encoding of `len` input bytes.
///
/// Groups of zeros encode shorter, so the actual output may be smaller.
pub fn max_encoded_len(len: usize) -> usize {
    let tail = len % 4;
    len / 4 * 5 + if tail == 0 { 0 } else { tail + 1 }
}

fn one_shot_config(capacity: usize) -> Config {
    Config::new().initial_capacity(capacity)
}

/// Encodes `data` without a `<~ ... ~>` wrapper.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let mut ctx = Context::with_config(&one_shot_config(max_encoded_len(data.len())))?;
    ctx.encode_feed(data)?;
    ctx.encode_finish()?;
    Ok(ctx.into_output())
}

/// Encodes `data` wrapped in `<~` and `~>`.
pub fn encode_with_envelope(data: &[u8]) -> Result<Vec<u8>> {
    let body = encode(data)?;
    let mut out = Vec::with_capacity(body.len() + START_SEQUENCE.len() + END_SEQUENCE.len());
    out.extend_from_slice(START_SEQUENCE);
    out.extend_from_slice(&body);
    out.extend_from_slice(END_SEQUENCE);
    Ok(out)
}

/// Decodes ASCII85 encoded data.
///
/// The start (`<~`) and end (`~>`) are optional, but a started wrapper must
/// be closed.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut ctx = Context::with_config(&one_shot_config((data.len() + 4) / 5 * 4))?;
    ctx.decode_feed(data)?;
    ctx.decode_finish()?;
    Ok(ctx.into_output())
}
