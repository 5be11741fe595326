//! Line prompts for values the command line left out.

use anyhow::{anyhow, Context, Result};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{DefaultEditor, Editor, Helper};
use secrecy::SecretString;
use std::borrow::Cow;
use std::io::IsTerminal;

/// Echoes `*` instead of the typed characters.
struct MaskHelper;

impl Helper for MaskHelper {}

impl Completer for MaskHelper {
    type Candidate = String;
}

impl Hinter for MaskHelper {
    type Hint = String;
}

impl Validator for MaskHelper {}

impl Highlighter for MaskHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

#[must_use]
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

fn read<H: Helper>(editor: &mut Editor<H, DefaultHistory>, prompt: &str) -> Result<String> {
    match editor.readline(prompt) {
        Ok(line) => Ok(line),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Err(anyhow!("input cancelled")),
        Err(err) => Err(err).context("failed to read input"),
    }
}

/// # Errors
/// Returns an error if the terminal cannot be read or input is cancelled.
pub fn line(prompt: &str) -> Result<String> {
    let mut editor = DefaultEditor::new().context("failed to open terminal")?;
    read(&mut editor, prompt).map(|line| line.trim().to_string())
}

/// # Errors
/// Returns an error if the terminal cannot be read or input is cancelled.
pub fn secret(prompt: &str) -> Result<SecretString> {
    let mut editor: Editor<MaskHelper, DefaultHistory> =
        Editor::new().context("failed to open terminal")?;
    editor.set_helper(Some(MaskHelper));
    read(&mut editor, prompt).map(SecretString::from)
}

/// `y`/`yes` confirms; anything else declines.
///
/// # Errors
/// Returns an error if the terminal cannot be read or input is cancelled.
pub fn confirm(question: &str) -> Result<bool> {
    line(&format!("{question} [y/N] ")).map(|answer| is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
