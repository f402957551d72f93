//! Recognition of the optional `<~` header and `~>` footer while decoding.
//!
//! The machine sees every input byte before the group decoder does, so the
//! wrapper is found regardless of how the input is chunked.

/// Where the decoder stands with respect to the `<~ ... ~>` wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Envelope {
    /// Nothing seen yet.
    Start,
    /// Seen `<`, a `~` must follow for a header.
    Header0,
    /// Inside a `<~` header.
    Header,
    /// Seen `~`, only `>` may follow.
    Footer0,
    /// Past `~>`. Everything else is ignored.
    Footer,
    /// No header, every byte is data.
    NoHeader,
    /// A `~` was not followed by `>`.
    Invalid,
}

/// How the decoder must treat the byte just given to [`Envelope::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Part of the wrapper, or trailing bytes after the footer.
    Consumed,
    /// A symbol, `z`, or whitespace for the decoder.
    Data,
    /// The `<` held back in `Header0` was data after all. The decoder takes
    /// it as a symbol, then steps the current byte again.
    Reinject,
    /// The wrapper is broken.
    Invalid,
}

impl Envelope {
    pub(crate) fn step(&mut self, byte: u8) -> Step {
        match (*self, byte) {
            (Envelope::Start, b'<') => {
                *self = Envelope::Header0;
                Step::Consumed
            }
            (Envelope::Start, _) => {
                *self = Envelope::NoHeader;
                self.step(byte)
            }

            (Envelope::Header0, b'~') => {
                *self = Envelope::Header;
                Step::Consumed
            }
            (Envelope::Header0, _) => {
                *self = Envelope::NoHeader;
                Step::Reinject
            }

            (Envelope::Header, b'~') => {
                *self = Envelope::Footer0;
                Step::Consumed
            }
            (Envelope::Header, _) | (Envelope::NoHeader, _) => Step::Data,

            (Envelope::Footer0, b'>') => {
                *self = Envelope::Footer;
                Step::Consumed
            }
            (Envelope::Footer0, _) => {
                *self = Envelope::Invalid;
                Step::Invalid
            }

            (Envelope::Footer, _) => Step::Consumed,
            (Envelope::Invalid, _) => Step::Invalid,
        }
    }

    /// Whether the stream may end in this state.
    pub(crate) fn is_complete(self) -> bool {
        matches!(self, Envelope::Start | Envelope::NoHeader | Envelope::Footer)
    }
}
