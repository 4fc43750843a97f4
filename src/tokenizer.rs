//! Splits an already-validated line into an ordered [`CommandGraph`].
//!
//! Tokenization never runs on a line [`crate::validator::validate`] rejected,
//! so the shapes handled here assume the line is syntactically sound; any
//! error returned from this module is a secondary structural check
//! (argument/stage counts, redirection placement) that the validator's
//! character-level scan does not cover.

use std::fs::File;

use crate::config::{MAX_ARGS_PER_STAGE, MAX_STAGES};
use crate::error::ShellError;

/// One stage of a pipeline: its argv and, if this stage is allowed one, its
/// redirection filename and (once opened) the backing file.
#[derive(Debug, Default)]
pub struct Stage {
    pub argv: Vec<String>,
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub input_file: Option<File>,
    pub output_file: Option<File>,
}

impl Stage {
    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

/// 1..=4 stages in execution order, plus whether the whole graph runs in
/// the background.
#[derive(Debug, Default)]
pub struct CommandGraph {
    pub stages: Vec<Stage>,
    pub background: bool,
}

/// Characters that separate argv entries: space, tab, CR, LF, VT, FF —
/// the classic C-locale `isspace` set, not the broader Unicode notion.
fn is_shell_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')
}

fn split_whitespace_tokens(stage_text: &str) -> Vec<String> {
    stage_text
        .split(is_shell_whitespace)
        .filter(|tok| !tok.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Tokenize `line` (already passed `validate`, trailing newline stripped)
/// into a [`CommandGraph`]. `background` is the flag `validate` already
/// computed from the trailing `&`.
pub fn tokenize(line: &str, background: bool) -> Result<CommandGraph, ShellError> {
    let body = if background {
        strip_trailing_ampersand(line)
    } else {
        line
    };

    let stage_texts: Vec<&str> = body.split('|').collect();
    if stage_texts.len() > MAX_STAGES {
        return Err(ShellError::TooManyStages);
    }

    let stage_count = stage_texts.len();
    let mut stages = Vec::with_capacity(stage_count);

    for (index, stage_text) in stage_texts.into_iter().enumerate() {
        let raw_tokens = split_whitespace_tokens(stage_text);
        let (argv, input_path, output_path) = extract_redirections(raw_tokens)?;

        if argv.is_empty() {
            return Err(ShellError::MissingCommand);
        }
        if argv.len() > MAX_ARGS_PER_STAGE {
            return Err(ShellError::TooManyArguments);
        }
        if input_path.is_some() && index != 0 {
            return Err(ShellError::MislocatedInput);
        }
        if output_path.is_some() && index + 1 != stage_count {
            return Err(ShellError::MislocatedOutput);
        }

        stages.push(Stage {
            argv,
            input_path,
            output_path,
            input_file: None,
            output_file: None,
        });
    }

    Ok(CommandGraph { stages, background })
}

/// Removes the line's trailing `&` (and any whitespace around it). Callers
/// only invoke this once `validate` has already confirmed the `&`, if any,
/// is the final non-whitespace character.
fn strip_trailing_ampersand(line: &str) -> &str {
    let trimmed = line.trim_end();
    trimmed.strip_suffix('&').unwrap_or(trimmed).trim_end()
}

/// Pulls `<`/`>` redirection operators out of a stage's raw tokens.
///
/// Handles all three shapes: the operator alone (filename is the next
/// token), the operator as a prefix (`>out`), and the operator embedded
/// after text (`cmd>out` / `cmd>` + next token). When a kind of redirection
/// appears more than once in a stage, the last occurrence wins.
fn extract_redirections(
    tokens: Vec<String>,
) -> Result<(Vec<String>, Option<String>, Option<String>), ShellError> {
    let mut argv = Vec::with_capacity(tokens.len());
    let mut input_path = None;
    let mut output_path = None;

    let mut iter = tokens.into_iter().peekable();
    while let Some(token) = iter.next() {
        let Some(op_index) = token.find(['<', '>']) else {
            argv.push(token);
            continue;
        };

        let operator = token.as_bytes()[op_index] as char;
        let before = &token[..op_index];
        let after = &token[op_index + 1..];

        if !before.is_empty() {
            argv.push(before.to_string());
        }

        let filename = if !after.is_empty() {
            after.to_string()
        } else {
            match iter.next() {
                Some(next) => next,
                None => {
                    return Err(if operator == '>' {
                        ShellError::NoOutputFile
                    } else {
                        ShellError::NoInputFile
                    });
                }
            }
        };

        if operator == '>' {
            output_path = Some(filename);
        } else {
            input_path = Some(filename);
        }
    }

    Ok((argv, input_path, output_path))
}
