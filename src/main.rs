//! tbgrep - CLI entry point

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell as CompletionShell};

use tbgrep::{tracebacks_from_file, Config, ExtractorOptions, TracebackExtractor};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        return cmd_completions(shell);
    }

    let config = Config::load()?;
    let options = ExtractorOptions {
        stats: cli.stats,
        ignore_line_numbers: cli.ignore_line_numbers || config.report.ignore_line_numbers,
        ignore_exception_values: cli.ignore_exception_values
            || config.report.ignore_exception_values,
    };

    if cli.last {
        return cmd_last(&cli.files, config.scan.block_size);
    }
    cmd_grep(&cli.files, options)
}

/// Forward scan: print every traceback, or the stats report in stats mode.
fn cmd_grep(files: &[std::path::PathBuf], options: ExtractorOptions) -> Result<()> {
    let stats = options.stats;
    let mut extractor = TracebackExtractor::new(options);

    if files.is_empty() {
        scan_reader(io::stdin().lock(), &mut extractor, !stats)
            .context("Failed to read stdin")?;
    } else {
        for path in files {
            let file =
                File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
            scan_reader(BufReader::new(file), &mut extractor, !stats)
                .with_context(|| format!("Failed to read file: {:?}", path))?;
        }
    }

    if stats {
        print!("{}", extractor.render_report());
    }
    Ok(())
}

/// Feed a reader line by line, printing completed blocks as they appear.
fn scan_reader<R: BufRead>(
    mut reader: R,
    extractor: &mut TracebackExtractor,
    print_blocks: bool,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        if let Some(block) = extractor.process(&line) {
            if print_blocks {
                println!("{}", block);
            }
        }
    }
}

/// Reverse scan: print only the most recent traceback of each file.
fn cmd_last(files: &[std::path::PathBuf], block_size: usize) -> Result<()> {
    if files.is_empty() {
        anyhow::bail!("--last needs a seekable file, it cannot scan stdin");
    }
    for path in files {
        if let Some(block) = last_traceback(path, block_size)? {
            println!("{}", block);
        }
    }
    Ok(())
}

fn last_traceback(path: &Path, block_size: usize) -> Result<Option<String>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    tracebacks_from_file(BufReader::new(file), true)
        .with_block_size(block_size)
        .next()
        .transpose()
        .with_context(|| format!("Failed to read file: {:?}", path))
}

fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "tbgrep", &mut io::stdout());
    Ok(())
}
