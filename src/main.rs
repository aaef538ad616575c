use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::process;

use bdecode::{BDecoder, DecoderConfig, DecodingError, Value, DEFAULT_MAX_DEPTH};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bdecode", about = "Decode and pretty-print bencoded data")]
struct Cli {
    /// File to decode. Reads stdin when omitted.
    path: Option<PathBuf>,

    /// Deepest list/dictionary nesting accepted.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Reject non-canonical encodings.
    #[arg(long)]
    strict: bool,

    /// Decode every concatenated top-level value instead of just the first.
    #[arg(long)]
    all: bool,
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DecodingError> {
    let source: Box<dyn Read> = match &cli.path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    let mut config = DecoderConfig::default().with_max_depth(cli.max_depth);
    if cli.strict {
        config = config.strict();
    }

    let mut decoder = BDecoder::with_config(BufReader::new(source), config);
    let mut count = 0;
    loop {
        let value = decoder.decode()?;
        println!("{}", render(&value, 0));
        count += 1;
        if !cli.all || decoder.is_at_end()? {
            break;
        }
    }
    info!(values = count, bytes = decoder.position(), "done");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn render(value: &Value, indent: usize) -> String {
    let pad = "  ".repeat(indent + 1);
    let close = "  ".repeat(indent);
    match value {
        Value::Integer(i) => i.to_string(),
        Value::ByteString(bs) => render_bytes(bs.as_bytes()),
        Value::List(list) if list.is_empty() => "[]".to_string(),
        Value::List(list) => {
            let items: Vec<String> = list
                .iter()
                .map(|item| format!("{pad}{}", render(item, indent + 1)))
                .collect();
            format!("[\n{}\n{close}]", items.join(",\n"))
        }
        Value::Dictionary(dict) if dict.is_empty() => "{}".to_string(),
        Value::Dictionary(dict) => {
            let items: Vec<String> = dict
                .iter()
                .map(|(k, v)| format!("{pad}{}: {}", render_bytes(k.as_bytes()), render(v, indent + 1)))
                .collect();
            format!("{{\n{}\n{close}}}", items.join(",\n"))
        }
    }
}

// Text when it is valid UTF-8, hex otherwise.
fn render_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => format!("{s:?}"),
        Err(_) => {
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            format!("<{} bytes: {hex}>", bytes.len())
        }
    }
}
