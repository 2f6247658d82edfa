//! `folio chat`: talk to the canned responder from the terminal.

use crate::{config::SiteConfig, data, interact::ChatResponder};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Words that end an interactive session.
const EXIT_WORDS: &[&str] = &["exit", "quit", ":q"];

/// Answer `query` once, or start a prompt on stdin when it is empty.
pub fn run_chat(config: &SiteConfig, query: &[String]) -> Result<()> {
    let portfolio = data::load(config.data_path())?.portfolio;
    let responder = ChatResponder::new(&portfolio.chat);
    let mut stdout = io::stdout().lock();

    if query.is_empty() {
        writeln!(stdout, "{}", "Ask me anything. Type `exit` to leave.".dimmed())?;
        converse(&responder, io::stdin().lock(), &mut stdout)?;
    } else if let Some(reply) = responder.respond(&query.join(" ")) {
        writeln!(stdout, "{reply}")?;
    }
    Ok(())
}

/// Read questions line by line and write one reply per question.
///
/// Blank lines are skipped. Returns the number of replies sent.
fn converse(responder: &ChatResponder, input: impl BufRead, output: &mut impl Write) -> Result<usize> {
    let mut replies = 0;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if EXIT_WORDS.contains(&line.trim()) {
            break;
        }
        if let Some(reply) = responder.respond(&line) {
            writeln!(output, "{}", reply.bright_cyan())?;
            replies += 1;
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    Ok(replies)
}
