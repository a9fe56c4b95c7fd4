// Interactive session: one command per line, errors are printed and
// the session keeps going.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;

use innkeep_kernel::desk::FrontDesk;
use innkeep_kernel::store::LineBackend;

use crate::commands::{execute, Command};
use crate::Format;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

pub fn run<B, R, W>(desk: &mut FrontDesk<B>, format: Format, input: R, mut output: W) -> Result<()>
where
    B: LineBackend,
    R: BufRead,
    W: Write,
{
    writeln!(output, "innkeep shell. Type `help` for commands, `quit` to leave.")?;

    for line in input.lines() {
        let line = line?;
        let words = match split_words(&line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(output, "Error: {e}")?;
                continue;
            }
        };

        match words.first().map(String::as_str) {
            None => continue,
            Some("quit" | "exit") => break,
            _ => {}
        }

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                write!(output, "{e}")?;
                continue;
            }
        };

        if matches!(parsed.command, Command::Shell) {
            writeln!(output, "Already in a shell.")?;
            continue;
        }

        match execute(desk, parsed.command) {
            Ok(outcome) => writeln!(output, "{}", format.render(&outcome)?)?,
            Err(e) => {
                tracing::debug!(error = %e, "command failed");
                writeln!(output, "Error: {e:#}")?;
            }
        }
    }

    Ok(())
}

/// Split on whitespace, honouring double quotes so names may hold spaces.
fn split_words(line: &str) -> Result<Vec<String>, &'static str> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err("unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
