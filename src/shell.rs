//! The per-line driver: read → validate → tokenize → open
//! redirections → dispatch to a builtin or an executor → print a
//! completion line.
//!
//! The background slot is polled at exactly two points: right after a
//! foreground executor finishes waiting on its stages (before that
//! command's own completion line is printed), and on an empty-line
//! iteration. Builtins never poll — they run in-process and return
//! immediately, so there is nothing for the tracker to have missed.
//!
//! Generic over a [`LineSource`] (real stdin vs. a fixed line list in tests)
//! and a pair of `&mut dyn Write` sinks, so a whole iteration can run
//! against recorded input/output instead of real file descriptors.

use std::io::Write;

use crate::builtins::{self, BuiltinAction};
use crate::config::PROMPT;
use crate::executor::{self, Outcome};
use crate::jobs::JobSlot;
use crate::process::ProcessLauncher;
use crate::redirect;
use crate::tokenizer;

/// Produces one command line at a time. The real implementation reads
/// stdin; tests substitute a fixed line list.
pub trait LineSource {
    /// Returns the next line with any trailing newline already stripped.
    /// `Ok(None)` signals end-of-input, equivalent to the literal line
    /// `exit`.
    fn next_line(&mut self) -> std::io::Result<Option<String>>;

    /// Whether the underlying stream is an interactive terminal. When it
    /// is not, every received line is echoed to stdout before processing.
    fn is_tty(&self) -> bool;
}

/// One shell session's state: the single background-job slot and the
/// process-spawning capability. The shell holds no other global state —
/// the current working directory lives in the OS process itself and is
/// changed in place by `cd`.
pub struct Shell<L: ProcessLauncher> {
    launcher: L,
    jobs: JobSlot,
}

impl<L: ProcessLauncher> Shell<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            jobs: JobSlot::new(),
        }
    }

    /// Runs the read-eval-print loop until `exit` or end-of-input.
    /// Returns the process exit code.
    pub fn run(
        &mut self,
        lines: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> i32 {
        loop {
            let _ = write!(stdout, "{PROMPT}");
            let _ = stdout.flush();

            let line = match lines.next_line() {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => "exit".to_string(),
            };

            if !lines.is_tty() {
                let _ = writeln!(stdout, "{line}");
                let _ = stdout.flush();
            }

            if let Some(code) = self.run_iteration(&line, stdout, stderr) {
                return code;
            }
        }
    }

    /// Runs one iteration. Returns `Some(exit code)` if the shell should
    /// terminate (the `exit` builtin ran successfully), `None` to keep
    /// looping.
    fn run_iteration(&mut self, line: &str, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Option<i32> {
        let background = match crate::validator::validate(line) {
            Ok(background) => background,
            Err(err) => {
                let _ = writeln!(stderr, "{err}");
                return None;
            }
        };

        if line.trim().is_empty() {
            // An empty line has no command graph; it's just a poll point.
            self.jobs.poll(stderr);
            return None;
        }

        let mut graph = match tokenizer::tokenize(line, background) {
            Ok(graph) => graph,
            Err(err) => {
                let _ = writeln!(stderr, "{err}");
                return None;
            }
        };

        if let Err(err) = redirect::open_redirections(&mut graph) {
            let _ = writeln!(stderr, "{err}");
            return None;
        }

        if graph.stages.len() == 1 && builtins::is_builtin(graph.stages[0].program()) {
            self.run_builtin(&graph, line, stdout, stderr)
        } else {
            match executor::execute(&mut graph, line, &mut self.launcher, &mut self.jobs, stderr) {
                Outcome::Backgrounded => None,
                Outcome::Completed(codes) => {
                    self.jobs.poll(stderr);
                    print_completion(stderr, line, &codes);
                    None
                }
            }
        }
    }

    fn run_builtin(
        &mut self,
        graph: &tokenizer::CommandGraph,
        command_text: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Option<i32> {
        let action = builtins::execute(&graph.stages[0].argv, self.jobs.is_alive(), stdout, stderr);
        match action {
            BuiltinAction::Continue(code) => {
                print_completion(stderr, command_text, &[code]);
                None
            }
            BuiltinAction::Exit(code) => {
                print_completion(stderr, command_text, &[code]);
                Some(code)
            }
        }
    }
}

fn print_completion(stderr: &mut dyn Write, command_text: &str, codes: &[i32]) {
    let brackets: String = codes.iter().map(|c| format!("[{c}]")).collect();
    let _ = writeln!(stderr, "+ completed '{command_text}' {brackets}");
}
