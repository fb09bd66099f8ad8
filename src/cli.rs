use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::codec::{decode, encode};
use crate::config::{Config, DEFAULT_LOG_LEVEL};
use crate::output::{render_code_table, render_tree, write_rendered};
use crate::table::SymbolTable;
use crate::tree::{HuffmanTree, TreeBuilder};

/// Huffman coding for uppercase letters from a probability table
#[derive(Parser)]
#[command(name = "huffman")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: huffman.toml in this or a parent directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Without a command, prompt for a probability file and a line
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a line of uppercase letters and spaces
    Encode {
        /// Probability file (default: from huffman.toml)
        #[arg(short, long, value_name = "PATH")]
        table: Option<PathBuf>,

        #[arg(value_name = "LINE")]
        line: String,
    },
    /// Decode a string of 0, 1 and spaces
    Decode {
        /// Probability file (default: from huffman.toml)
        #[arg(short, long, value_name = "PATH")]
        table: Option<PathBuf>,

        #[arg(value_name = "BITS")]
        bits: String,
    },
    /// Print the code of every symbol
    Codes {
        /// Probability file (default: from huffman.toml)
        #[arg(short, long, value_name = "PATH")]
        table: Option<PathBuf>,
    },
    /// Print the Huffman tree
    Tree {
        /// Probability file (default: from huffman.toml)
        #[arg(short, long, value_name = "PATH")]
        table: Option<PathBuf>,

        /// Write the tree to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("No filename entered")]
    NoFilename,

    #[error("Input ended before {0} was entered")]
    UnexpectedEof(&'static str),
}

impl Cli {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::discover()?,
        };

        init_tracing(self.verbose, &config.log_level);
        if let Some(source) = &config.source {
            info!(config = %source.display(), "loaded configuration");
        }

        let stdout = io::stdout();

        match self.command {
            None => {
                let stdin = io::stdin();
                run_session(&mut stdin.lock(), &mut stdout.lock(), &config.table_path)
            }
            Some(Commands::Encode { table, line }) => {
                let (_, tree) = load_tree(&table_or_default(table, &config))?;
                let encoded = encode(&line, &tree.code_table())?;
                writeln!(stdout.lock(), "{}", encoded)?;
                Ok(())
            }
            Some(Commands::Decode { table, bits }) => {
                let (_, tree) = load_tree(&table_or_default(table, &config))?;
                let decoded = decode(&bits, &tree)?;
                writeln!(stdout.lock(), "{}", decoded)?;
                Ok(())
            }
            Some(Commands::Codes { table }) => {
                let (symbols, tree) = load_tree(&table_or_default(table, &config))?;
                let rendered = render_code_table(&tree.code_table(), &symbols);
                write!(stdout.lock(), "{}", rendered)?;
                Ok(())
            }
            Some(Commands::Tree { table, output }) => {
                let (_, tree) = load_tree(&table_or_default(table, &config))?;
                let rendered = render_tree(&tree);
                match output {
                    Some(path) => {
                        write_rendered(&rendered, &path)?;
                        println!("Wrote tree to: {:?}", path);
                    }
                    None => write!(stdout.lock(), "{}", rendered)?,
                }
                Ok(())
            }
        }
    }
}

/// Prompt for a probability file and a line, then print both directions
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    hint: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(output, "HUFFMAN CODING ~ THE GREEDY ALGORITHM")?;
    write!(
        output,
        "Enter the filename ('{}') to read from: ",
        hint.display()
    )?;
    output.flush()?;

    let filename = read_line(input, "a filename")?;
    let filename = filename.trim();
    if filename.is_empty() {
        return Err(SessionError::NoFilename.into());
    }

    writeln!(output, "Building the Huffman tree...")?;
    let (_, tree) = load_tree(Path::new(filename))?;
    writeln!(output, "Huffman coding completed!")?;

    write!(output, "Enter a line (UPPERCASE LETTERS ONLY): ")?;
    output.flush()?;
    let line = read_line(input, "a line")?;

    let encoded = encode(&line, &tree.code_table())?;
    writeln!(output, "Here's the encoded line: {}", encoded)?;

    let decoded = decode(&encoded, &tree)?;
    writeln!(output, "The decoded line is: {}", decoded)?;

    Ok(())
}

fn read_line<R: BufRead>(
    input: &mut R,
    what: &'static str,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SessionError::UnexpectedEof(what).into());
    }

    let trimmed_len = line.trim_end_matches(&['\n', '\r'][..]).len();
    line.truncate(trimmed_len);
    Ok(line)
}

fn load_tree(path: &Path) -> Result<(SymbolTable, HuffmanTree), Box<dyn std::error::Error>> {
    let outcome = SymbolTable::from_path(path)?;
    let tree = TreeBuilder::build(&outcome.table)?;
    Ok((outcome.table, tree))
}

fn table_or_default(table: Option<PathBuf>, config: &Config) -> PathBuf {
    table.unwrap_or_else(|| config.table_path.clone())
}

fn init_tracing(verbose: u8, configured_level: &str) {
    let level = match verbose {
        0 => configured_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
