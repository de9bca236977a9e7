use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use log::{LevelFilter, Log, Metadata};
use ropey::{Rope, RopeSlice};

use strand::tagging::{DocumentGrammar, TokenKind, tokens};
use strand::{Diagnostic, compile, find_iter, match_whole};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to read; standard input when absent
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Search each line for a pattern written in notation
    #[arg(short = 'p', long, value_name = "NOTATION")]
    pattern: Option<String>,

    /// Print the match record tree
    #[arg(short = 't', long)]
    tree: bool,

    /// More logging on stderr (repeatable)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn read_input(file: Option<&str>) -> Result<Rope> {
    let contents = match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    Ok(Rope::from_str(&contents))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let rope = read_input(args.file.as_deref())?;
    log::info!("read {} chars in {} lines", rope.len_chars(), rope.len_lines());

    match args.pattern.as_deref() {
        Some(notation) => search_lines(notation, &rope, args.tree),
        None => tag_document(&rope, args.tree),
    }
}

/// Print every line with at least one match, matches shown in reverse video.
fn search_lines(notation: &str, rope: &Rope, tree: bool) -> Result<()> {
    let pattern = compile(notation).with_context(|| format!("Bad pattern {notation:?}"))?;
    let mut out = io::stdout().lock();
    let mut total = 0;

    for (line_no, line) in rope.lines().enumerate() {
        let line = without_line_ending(line);
        let found: Vec<_> = find_iter(&*pattern, &line)
            .filter(|f| f.end() > f.start)
            .collect();
        if found.is_empty() {
            continue;
        }
        total += found.len();

        queue!(out, Print(format!("{}:", line_no + 1)))?;
        let mut pos = 0;
        for f in &found {
            queue!(
                out,
                Print(line.slice(pos..f.start)),
                SetAttribute(Attribute::Reverse),
                Print(line.slice(f.start..f.end())),
                SetAttribute(Attribute::Reset),
            )?;
            pos = f.end();
        }
        queue!(out, Print(line.slice(pos..)), Print("\n"))?;

        if tree {
            for f in &found {
                queue!(out, Print(&f.record))?;
            }
        }
    }
    out.flush()?;

    log::info!("{total} matches");
    if total == 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Split the whole input into tagged tokens, one `text\tTAG` per line.
fn tag_document(rope: &Rope, tree: bool) -> Result<()> {
    let grammar = DocumentGrammar::new();
    let result = match_whole(&*grammar.document, rope);
    if !result.success {
        bail!("{}", Diagnostic::from_record(&result.record, rope));
    }

    let mut out = io::stdout().lock();
    if tree {
        write!(out, "{}", result.record)?;
    }
    for token in tokens(&result.record, rope) {
        if token.kind == TokenKind::Whitespace {
            continue;
        }
        writeln!(out, "{}", token.to_tagged())?;
    }
    out.flush()?;
    Ok(())
}

fn without_line_ending(line: RopeSlice<'_>) -> RopeSlice<'_> {
    let mut end = line.len_chars();
    while end > 0 && matches!(line.char(end - 1), '\n' | '\r') {
        end -= 1;
    }
    line.slice(..end)
}
