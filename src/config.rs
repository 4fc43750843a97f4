//! Fixed shell parameters.
//!
//! This shell takes no command-line flags, so there is no flag-parsing
//! layer here — just the handful of constants the grammar and the
//! external interface are built around.

/// Prompt written at the start of every iteration.
pub const PROMPT: &str = "sshell@ucd$ ";

/// Maximum bytes read per line, trailing newline included.
pub const MAX_LINE_BYTES: usize = 512;

/// Maximum argv entries in a single pipeline stage.
pub const MAX_ARGS_PER_STAGE: usize = 16;

/// Maximum pipeline stages in one command graph.
pub const MAX_STAGES: usize = 4;

/// Mode bits used when a redirection creates an output file.
#[cfg(unix)]
pub const OUTPUT_FILE_MODE: u32 = 0o644;
