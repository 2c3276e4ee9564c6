use std::io::{self, BufRead, Write};

use clap::Parser;
use log::debug;
use thiserror::Error;

use crate::{
    commands::{self, Commands},
    storage::{Storage, UserStorage},
};

/// Parser for a single shell line; global options come from the session.
#[derive(Parser)]
#[command(name = "taskflow", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    #[error("Unterminated quote in: {0}")]
    UnterminatedQuote(String),
}

/// Splits a line on whitespace, keeping double-quoted text together.
pub fn split_line(line: &str) -> Result<Vec<String>, LineError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }

    if in_quotes {
        return Err(LineError::UnterminatedQuote(line.trim().to_string()));
    }
    if has_word {
        words.push(current);
    }

    Ok(words)
}

/// Runs commands read from `input` until EOF, `exit` or `quit`.
pub fn run<S, R>(storage: &mut S, input: R, json: bool) -> io::Result<()>
where
    S: Storage + UserStorage,
    R: BufRead,
{
    let mut lines = input.lines();

    loop {
        print!("taskflow> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let words = match split_line(&line?) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };

        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => return Ok(()),
            Some(_) => {}
        }

        debug!("event=shell_command words={}", words.len());

        match ShellLine::try_parse_from(words) {
            Ok(parsed) => {
                if let Err(e) = commands::execute(parsed.command, storage, json) {
                    eprintln!("Error: {}", e);
                }
            }
            Err(e) => e.print()?,
        }
    }
}
