//! The process-spawning capability set the executor is built on.
//!
//! Fork/exec/wait/poll are the only place this crate touches real OS
//! processes; everything above this module (`executor`, `jobs`) is written
//! against the [`ProcessLauncher`]/[`LaunchedChild`] traits so tests can
//! substitute [`testing::MockLauncher`] and verify pipe wiring, exit-vector
//! ordering, and background-poll semantics without spawning anything.

use std::io;
use std::process::{Command, Stdio};

use crate::status;

/// A spawned child process, abstracted down to the three operations the
/// shell core ever needs: identify it, block on it, or poll it.
pub trait LaunchedChild: std::fmt::Debug {
    fn pid(&self) -> u32;

    /// Blocks until the child exits, returning its shell-style exit code.
    fn wait(&mut self) -> i32;

    /// Non-blocking poll. `None` means still running.
    fn try_wait(&mut self) -> Option<i32>;
}

/// Spawns a program with the given stdin/stdout, stderr always inherited
/// (this shell has no stderr redirection).
pub trait ProcessLauncher {
    fn spawn(&mut self, argv: &[String], stdin: Stdio, stdout: Stdio) -> io::Result<Box<dyn LaunchedChild>>;
}

/// The real implementation, backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct RealLauncher;

impl ProcessLauncher for RealLauncher {
    fn spawn(&mut self, argv: &[String], stdin: Stdio, stdout: Stdio) -> io::Result<Box<dyn LaunchedChild>> {
        let child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .spawn()?;
        Ok(Box::new(RealChild(child)))
    }
}

#[derive(Debug)]
struct RealChild(std::process::Child);

impl LaunchedChild for RealChild {
    fn pid(&self) -> u32 {
        self.0.id()
    }

    fn wait(&mut self) -> i32 {
        match self.0.wait() {
            Ok(exit_status) => status::exit_code(exit_status),
            Err(_) => 1,
        }
    }

    fn try_wait(&mut self) -> Option<i32> {
        match self.0.try_wait() {
            Ok(Some(exit_status)) => Some(status::exit_code(exit_status)),
            Ok(None) | Err(_) => None,
        }
    }
}

/// Test-only in-memory launcher and child, used by the unit tests in
/// `executor` and `jobs` to drive pipe wiring / exit-vector / poll
/// semantics without touching real processes.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A scripted child: a fixed pid, a fixed final exit code, and how many
    /// `try_wait` calls should return `None` (still running) before the
    /// exit code is reported.
    #[derive(Debug, Clone)]
    pub(crate) struct ScriptedChild {
        pub pid: u32,
        pub exit_code: i32,
        pub polls_until_done: u32,
    }

    #[derive(Debug)]
    struct MockChild {
        pid: u32,
        exit_code: i32,
        polls_remaining: u32,
    }

    impl LaunchedChild for MockChild {
        fn pid(&self) -> u32 {
            self.pid
        }

        fn wait(&mut self) -> i32 {
            self.exit_code
        }

        fn try_wait(&mut self) -> Option<i32> {
            if self.polls_remaining > 0 {
                self.polls_remaining -= 1;
                None
            } else {
                Some(self.exit_code)
            }
        }
    }

    /// Hands out `ScriptedChild`s in the order given at construction time,
    /// one per `spawn` call, and records every argv it was asked to spawn.
    #[derive(Debug, Default)]
    pub(crate) struct MockLauncher {
        script: Vec<ScriptedChild>,
        next: usize,
        pub(crate) spawned_argv: Rc<RefCell<Vec<Vec<String>>>>,
        pub(crate) fail_spawn_at: Vec<usize>,
    }

    impl MockLauncher {
        pub(crate) fn new(script: Vec<ScriptedChild>) -> Self {
            Self {
                script,
                next: 0,
                spawned_argv: Rc::new(RefCell::new(Vec::new())),
                fail_spawn_at: Vec::new(),
            }
        }

        pub(crate) fn failing_at(mut self, indices: &[usize]) -> Self {
            self.fail_spawn_at = indices.to_vec();
            self
        }
    }

    impl ProcessLauncher for MockLauncher {
        fn spawn(&mut self, argv: &[String], _stdin: Stdio, _stdout: Stdio) -> io::Result<Box<dyn LaunchedChild>> {
            let call_index = self.spawned_argv.borrow().len();
            self.spawned_argv.borrow_mut().push(argv.to_vec());

            if self.fail_spawn_at.contains(&call_index) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "mock: no such program"));
            }

            let scripted = self.script.get(self.next).cloned().unwrap_or(ScriptedChild {
                pid: 1000 + call_index as u32,
                exit_code: 0,
                polls_until_done: 0,
            });
            self.next += 1;

            Ok(Box::new(MockChild {
                pid: scripted.pid,
                exit_code: scripted.exit_code,
                polls_remaining: scripted.polls_until_done,
            }))
        }
    }
}
