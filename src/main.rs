//! The `blockmark` binary.

use std::boxed::Box;
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser as _;

use blockmark::{format_sexpr, Options, Parser};

const EXIT_CONFIG: i32 = 1;
const EXIT_PARSE: i32 = 2;

#[derive(Debug, clap::Parser)]
#[command(
    about = "CommonMark block structure parser.\nDumps the block tree of each input as S-expressions.",
    author = "Asherah Connor <ashe@kivikakk.ee>",
    version
)]
struct Cli {
    /// Markdown file(s) to parse; or standard input if none passed
    #[arg(value_name = "FILE")]
    files: Option<Vec<PathBuf>>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Character that opens a bullet list item; replaces the configured set
    #[arg(short, long = "bullet", value_name = "CHAR")]
    bullets: Vec<String>,

    /// Abandon documents with more lines than this
    #[arg(long, value_name = "LINES")]
    max_lines: Option<usize>,

    /// Abandon documents nesting container blocks deeper than this
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<usize>,

    /// Abandon a parse after this many milliseconds
    #[arg(long, value_name = "MILLIS")]
    timeout_ms: Option<u64>,
}

fn load_options(cli: &Cli) -> Result<Options, Box<dyn Error>> {
    let mut options = match cli.config {
        Some(ref path) => Options::from_toml_str(&fs::read_to_string(path)?)?,
        None => Options::default(),
    };

    if !cli.bullets.is_empty() {
        options.parse.unordered_list_markers = cli.bullets.clone();
    }
    if cli.max_lines.is_some() {
        options.limits.max_lines = cli.max_lines;
    }
    if let Some(max_depth) = cli.max_depth {
        options.limits.max_depth = max_depth;
    }
    if let Some(ms) = cli.timeout_ms {
        options.limits.timeout = Some(Duration::from_millis(ms));
    }

    Ok(options)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let options = match load_options(&cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("blockmark: {}", e);
            process::exit(EXIT_CONFIG);
        }
    };
    let parser = match Parser::new(&options) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("blockmark: {}", e);
            process::exit(EXIT_CONFIG);
        }
    };

    let mut inputs: Vec<(String, String)> = vec![];
    match cli.files {
        None => {
            let mut s = String::with_capacity(2048);
            io::stdin().read_to_string(&mut s)?;
            inputs.push(("<stdin>".to_string(), s));
        }
        Some(ref paths) => {
            for path in paths {
                inputs.push((path.display().to_string(), fs::read_to_string(path)?));
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = false;
    for (name, md) in inputs {
        match parser.parse(&md) {
            Ok(tree) => {
                let mut dump = String::new();
                format_sexpr(&tree, &mut dump)?;
                out.write_all(dump.as_bytes())?;
            }
            Err(e) => {
                eprintln!("blockmark: {}: {}", name, e);
                failed = true;
            }
        }
    }
    out.flush()?;

    if failed {
        process::exit(EXIT_PARSE);
    }
    Ok(())
}
