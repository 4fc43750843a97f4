//! The single-slot background job tracker.
//!
//! Only one background job may be alive at a time. A second background
//! submission while one is live is not explicitly rejected by the grammar;
//! this tracker keeps a single slot and relies on the `exit` builtin's
//! refusal to surface the conflict to the user (see DESIGN.md).

use std::io::Write;

use crate::process::LaunchedChild;

/// A job whose stages have been forked and handed off; some stages may
/// already be known-done (their process failed to spawn and were credited
/// exit code 1 on the spot — see `executor`).
struct BackgroundJob {
    children: Vec<Option<Box<dyn LaunchedChild>>>,
    exit_codes: Vec<Option<i32>>,
    command_text: String,
}

/// Idle/Alive state machine for the single background slot.
#[derive(Default)]
pub struct JobSlot {
    job: Option<BackgroundJob>,
}

impl JobSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.job.is_some()
    }

    /// Accepts a freshly-forked background command graph. `children[i]` is
    /// `None` for a stage whose spawn already failed; `exit_codes[i]` is
    /// pre-filled with that stage's known exit code in that case.
    pub fn start(
        &mut self,
        children: Vec<Option<Box<dyn LaunchedChild>>>,
        exit_codes: Vec<Option<i32>>,
        command_text: String,
    ) {
        self.job = Some(BackgroundJob {
            children,
            exit_codes,
            command_text,
        });
    }

    /// Non-blocking poll. If any stage hasn't exited yet, the poll aborts
    /// silently and the job stays alive. If every stage has now exited,
    /// prints the completion line and returns to idle.
    pub fn poll(&mut self, stderr: &mut dyn Write) {
        let Some(job) = self.job.as_mut() else {
            return;
        };

        for (child, code) in job.children.iter_mut().zip(job.exit_codes.iter_mut()) {
            if code.is_some() {
                continue;
            }
            let Some(child) = child else {
                unreachable!("a stage with no child must already have an exit code");
            };
            match child.try_wait() {
                Some(exit) => *code = Some(exit),
                None => return, // at least one stage still running — abort the poll
            }
        }

        let codes: String = job
            .exit_codes
            .iter()
            .map(|code| format!("[{}]", code.expect("all codes resolved above")))
            .collect();
        let _ = writeln!(stderr, "+ completed '{}' {}", job.command_text, codes);
        self.job = None;
    }
}
