//! The three single-stage builtins: `exit`, `cd`, `pwd`.
//!
//! Builtins always run in the shell process itself and always run in the
//! foreground — a trailing `&` on a builtin line is tokenized but never
//! consulted here.

use std::io::Write;

use crate::error::ShellError;

const BUILTINS: &[&str] = &["exit", "cd", "pwd"];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// What the shell's REPL loop should do after a builtin ran.
pub enum BuiltinAction {
    /// Keep looping; the code is this command's exit status.
    Continue(i32),
    /// Terminate the process with this exit status (the `exit` builtin).
    Exit(i32),
}

/// Runs a builtin. Redirections on a builtin's own stage are parsed and
/// opened upstream (so a bad filename is still reported) but never applied
/// here, so e.g. `pwd > out` still prints to the shell's real stdout. See
/// DESIGN.md for this pinned Open Question.
pub fn execute(
    argv: &[String],
    background_job_alive: bool,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> BuiltinAction {
    match argv[0].as_str() {
        "exit" => exit(background_job_alive, stderr),
        "cd" => cd(argv, stderr),
        "pwd" => pwd(stdout, stderr),
        other => unreachable!("{other} is not a registered builtin"),
    }
}

fn exit(background_job_alive: bool, stderr: &mut dyn Write) -> BuiltinAction {
    if background_job_alive {
        let _ = writeln!(stderr, "{}", ShellError::ActiveJobRunning);
        return BuiltinAction::Continue(1);
    }

    let _ = writeln!(stderr, "Bye...");
    BuiltinAction::Exit(0)
}

fn cd(argv: &[String], stderr: &mut dyn Write) -> BuiltinAction {
    let Some(target) = argv.get(1) else {
        let _ = writeln!(stderr, "{}", ShellError::CannotCd);
        return BuiltinAction::Continue(1);
    };

    match std::env::set_current_dir(target) {
        Ok(()) => BuiltinAction::Continue(0),
        Err(_) => {
            let _ = writeln!(stderr, "{}", ShellError::CannotCd);
            BuiltinAction::Continue(1)
        }
    }
}

fn pwd(stdout: &mut dyn Write, stderr: &mut dyn Write) -> BuiltinAction {
    match std::env::current_dir() {
        Ok(path) => {
            let _ = writeln!(stdout, "{}", path.display());
            BuiltinAction::Continue(0)
        }
        Err(_) => {
            let _ = writeln!(stderr, "{}", ShellError::CannotReadCwd);
            BuiltinAction::Continue(1)
        }
    }
}
