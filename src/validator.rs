//! Lexical/syntactic validation of a raw command line, before anything is
//! tokenized or forked.
//!
//! The scan runs over a copy of the line with *every* whitespace character
//! removed (not just leading/trailing): operator adjacency is judged on
//! consecutive non-whitespace characters, so `cmd >   |` and `cmd>|` fail
//! the same way. Reports the first offending position, left to right.

use crate::error::ShellError;

const OPERATORS: [char; 4] = ['<', '|', '>', '&'];

/// Validates `line` and reports whether the line requests a background job.
///
/// An empty (all-whitespace) line is valid and never backgrounded — callers
/// should special-case a blank line before calling this (see `Shell`), since
/// an empty line has no command graph to build at all.
pub fn validate(line: &str) -> Result<bool, ShellError> {
    let stripped: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();

    if stripped.is_empty() {
        return Ok(false);
    }

    let last = stripped.len() - 1;

    for (i, &c) in stripped.iter().enumerate() {
        if i == 0 && OPERATORS.contains(&c) {
            return Err(ShellError::MissingCommand);
        }

        match c {
            '>' => {
                if next_is_bad(&stripped, i, last) {
                    return Err(ShellError::NoOutputFile);
                }
            }
            '<' => {
                if next_is_bad(&stripped, i, last) {
                    return Err(ShellError::NoInputFile);
                }
            }
            '|' => {
                if next_is_bad(&stripped, i, last) {
                    return Err(ShellError::MissingCommand);
                }
            }
            '&' => {
                // Valid only as the final non-whitespace character.
                return if i == last {
                    Ok(true)
                } else {
                    Err(ShellError::MislocatedBackground)
                };
            }
            _ => {}
        }
    }

    Ok(false)
}

/// True if the character after position `i` is missing or is itself one of
/// `< | > &` — the shared "no command/file follows" check used by `>`, `<`
/// and `|`.
fn next_is_bad(stripped: &[char], i: usize, last: usize) -> bool {
    i == last || OPERATORS.contains(&stripped[i + 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_command_is_valid() {
        assert_eq!(validate("echo hello"), Ok(false));
    }

    #[test]
    fn leading_operator_is_missing_command() {
        assert_eq!(validate("> outfile"), Err(ShellError::MissingCommand));
        assert_eq!(validate("| cmd"), Err(ShellError::MissingCommand));
        assert_eq!(validate("< in"), Err(ShellError::MissingCommand));
        assert_eq!(validate("& cmd"), Err(ShellError::MissingCommand));
    }

    #[test]
    fn pipe_priority_wins_over_missing_output_filename() {
        // The '|' is encountered before the dangling '>', so rule 2 wins.
        assert_eq!(validate("echo a | > b"), Err(ShellError::MissingCommand));
    }

    #[test]
    fn dangling_output_redirection() {
        assert_eq!(validate("echo hi >"), Err(ShellError::NoOutputFile));
        assert_eq!(validate("echo hi > |"), Err(ShellError::NoOutputFile));
    }

    #[test]
    fn dangling_input_redirection() {
        assert_eq!(validate("cat <"), Err(ShellError::NoInputFile));
    }

    #[test]
    fn mislocated_background_sign() {
        assert_eq!(validate("echo hi & world"), Err(ShellError::MislocatedBackground));
        assert_eq!(validate("echo hi &&"), Err(ShellError::MislocatedBackground));
    }

    #[test]
    fn trailing_background_sign_is_accepted() {
        assert_eq!(validate("sleep 1 &"), Ok(true));
        assert_eq!(validate("sleep 1   &   "), Ok(true));
    }

    #[test]
    fn empty_line_is_valid_and_not_backgrounded() {
        assert_eq!(validate(""), Ok(false));
        assert_eq!(validate("   \t  "), Ok(false));
    }

    #[test]
    fn embedded_redirection_inside_a_word_is_still_checked() {
        assert_eq!(validate("cmd>out"), Ok(false));
        assert_eq!(validate("cmd>"), Err(ShellError::NoOutputFile));
    }
}
