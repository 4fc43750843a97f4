use thiserror::Error;

/// Every diagnostic this shell can print to stderr, in one tagged enum.
///
/// Each variant's `#[error(...)]` message is the literal string the
/// external interface promises — callers never format an error message
/// by hand, they `write!`/`writeln!` the `Display` impl this derive
/// produces.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ShellError {
    #[error("Error: missing command")]
    MissingCommand,

    #[error("Error: no input file")]
    NoInputFile,

    #[error("Error: no output file")]
    NoOutputFile,

    #[error("Error: mislocated input redirection")]
    MislocatedInput,

    #[error("Error: mislocated output redirection")]
    MislocatedOutput,

    #[error("Error: cannot open output file")]
    CannotOpenOutput,

    #[error("Error: cannot open input file")]
    CannotOpenInput,

    #[error("Error: mislocated background sign")]
    MislocatedBackground,

    #[error("Error: too many process arguments")]
    TooManyArguments,

    #[error("Error: too many pipeline stages")]
    TooManyStages,

    #[error("Error: command not found")]
    CommandNotFound,

    #[error("Error: cannot cd into directory")]
    CannotCd,

    #[error("Error: cannot read current directory")]
    CannotReadCwd,

    #[error("Error: active job still running")]
    ActiveJobRunning,
}
