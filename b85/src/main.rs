use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};
use clap::{ArgGroup, Parser};
use log::{debug, info};
use stream_ascii85::{Config, Context, Error, END_SEQUENCE, START_SEQUENCE};

/// Default encode chunk, a multiple of 4.
const ENCODE_CHUNK: usize = 1024;

/// Default decode chunk, a multiple of 5.
const DECODE_CHUNK: usize = 1000;

#[derive(Parser, Debug)]
#[command(name = "b85", version, about = "Ascii85 encode or decode a byte stream")]
#[command(group(ArgGroup::new("mode").required(true).args(["encode", "decode"])))]
struct Cli {
    /// Encode the input
    #[arg(short = 'e', long = "encode")]
    encode: bool,

    /// Decode the input
    #[arg(short = 'd', long = "decode")]
    decode: bool,

    /// Wrap the encoded output in <~ and ~>
    #[arg(long = "envelope", conflicts_with = "decode")]
    envelope: bool,

    /// Bytes read from the input per chunk
    #[arg(long = "chunk-size")]
    chunk_size: Option<usize>,

    /// Initial output buffer size in bytes
    #[arg(long = "buffer-size", default_value_t = 1024)]
    buffer_size: usize,

    /// Log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,

    /// Input file, stdin when omitted
    input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encode,
    Decode,
}

#[derive(Debug, Clone)]
struct Options {
    direction: Direction,
    envelope: bool,
    chunk_size: usize,
    config: Config,
}

impl Options {
    fn from_cli(cli: &Cli) -> Self {
        // clap guarantees exactly one of the two
        let direction = match (cli.encode, cli.decode) {
            (true, _) => Direction::Encode,
            (_, _) => Direction::Decode,
        };
        let default_chunk = match direction {
            Direction::Encode => ENCODE_CHUNK,
            Direction::Decode => DECODE_CHUNK,
        };
        Options {
            direction,
            envelope: cli.envelope,
            chunk_size: cli.chunk_size.unwrap_or(default_chunk).max(1),
            config: Config::new().initial_capacity(cli.buffer_size),
        }
    }
}

fn init_logger(level: &str) {
    let _ = env_logger::Builder::new().parse_filters(level).try_init();
}

fn codec_error(error: &Error, processed: usize) -> anyhow::Error {
    anyhow!("{}: {} ({} bytes processed)", error.kind().name(), error, processed)
}

/// Streams `input` through a context chunk by chunk, writing output as soon as
/// it is produced.
fn transcode<R: Read, W: Write>(options: &Options, mut input: R, output: W) -> Result<()> {
    let mut out = BufWriter::new(output);
    let mut ctx = Context::with_config(&options.config).map_err(|e| codec_error(&e, 0))?;
    let mut buf = vec![0; options.chunk_size];

    let wrap = options.envelope && options.direction == Direction::Encode;
    if wrap {
        out.write_all(START_SEQUENCE)?;
    }

    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("read input"),
        };
        let fed = match options.direction {
            Direction::Encode => ctx.encode_feed(&buf[..n]),
            Direction::Decode => ctx.decode_feed(&buf[..n]),
        };
        fed.map_err(|e| codec_error(&e, ctx.bytes_processed()))?;
        out.write_all(ctx.output()).context("write output")?;
        ctx.clear_output();
    }

    let finished = match options.direction {
        Direction::Encode => ctx.encode_finish(),
        Direction::Decode => ctx.decode_finish(),
    };
    finished.map_err(|e| codec_error(&e, ctx.bytes_processed()))?;
    out.write_all(ctx.output()).context("write output")?;

    if wrap {
        out.write_all(END_SEQUENCE)?;
        out.write_all(b"\n")?;
    }
    debug!("{} input bytes processed", ctx.bytes_processed());
    out.flush().context("flush output")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.log_level);

    let options = Options::from_cli(&cli);
    info!("{:?} with {} byte chunks", options.direction, options.chunk_size);

    let stdout = io::stdout();
    match &cli.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            transcode(&options, file, stdout.lock())
        }
        None => transcode(&options, io::stdin().lock(), stdout.lock()),
    }
}
