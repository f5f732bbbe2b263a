//! Interactive terminal prompt
//!
//! First-run setup asks for input through the [`Prompt`] trait so that
//! config loading can be driven headlessly in tests.

use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Source of answers to interactive questions
pub trait Prompt {
    /// Show `label` and return the raw line the user typed
    fn ask(&mut self, label: &str) -> io::Result<String>;
}

/// Prompt reading from the process stdin
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, label: &str) -> io::Result<String> {
        read_answer(label, &mut io::stdin().lock(), &mut io::stdout())
    }
}

fn read_answer<R: BufRead, W: Write>(label: &str, input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "{} ", label.bold())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no input provided",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
