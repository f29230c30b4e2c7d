//! Interactive question loop.
//!
//! Generic over the reader and writer so the loop can run against stdin/stdout
//! or in-memory buffers.

use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::client::{Exchange, TutorClient};

const RULE_WIDTH: usize = 72;

/// When to print the raw provider payload after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawDisplay {
    /// Ask after every answer (`y` shows it).
    #[default]
    Ask,
    Always,
    Never,
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Empty,
    Question(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        Command::Quit
    } else if line.is_empty() {
        Command::Empty
    } else {
        Command::Question(line)
    }
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "NLP Question-and-Answering CLI powered by an LLM API")?;
    writeln!(out, "Type 'quit' or 'exit' to close the application.")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Print `prompt` and read one line. `None` at end of input.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn write_exchange<W: Write>(out: &mut W, exchange: &Exchange) -> io::Result<()> {
    writeln!(out, "\n--- Processed Question ---")?;
    writeln!(out, "{}", exchange.question.processed())?;
    writeln!(out, "\n--- Answer ---")?;
    writeln!(out, "{}", exchange.answer.answer)
}

/// Run the loop until `quit`/`exit` or end of input.
///
/// Errors from an exchange are printed and the loop continues; only I/O
/// errors on `input`/`out` end it early.
pub async fn run<R: BufRead, W: Write>(
    client: &TutorClient,
    mut input: R,
    mut out: W,
    raw_display: RawDisplay,
) -> io::Result<()> {
    write_banner(&mut out)?;

    loop {
        let Some(line) = read_line(&mut input, &mut out, "\nEnter your question: ")? else {
            writeln!(out)?;
            writeln!(out, "Goodbye!")?;
            return Ok(());
        };

        let question = match parse_command(&line) {
            Command::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            Command::Empty => {
                writeln!(out, "⚠️  Please enter a valid question.")?;
                continue;
            }
            Command::Question(q) => q,
        };

        let exchange = match client.ask(question).await {
            Ok(exchange) => exchange,
            Err(e) => {
                warn!(provider = e.provider().unwrap_or("-"), error = %e, "exchange failed");
                writeln!(out, "An error occurred: {}", e)?;
                continue;
            }
        };

        write_exchange(&mut out, &exchange)?;

        let show_raw = match raw_display {
            RawDisplay::Always => true,
            RawDisplay::Never => false,
            RawDisplay::Ask => read_line(
                &mut input,
                &mut out,
                "\nWould you like to view the raw LLM response JSON? (y/N): ",
            )?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")),
        };
        if show_raw {
            writeln!(out, "{}", exchange.answer.raw_pretty())?;
        }
    }
}
