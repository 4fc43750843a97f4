//! Executors for single-stage commands and pipelines of 2..4 stages,
//! built on the [`ProcessLauncher`]/[`LaunchedChild`] seam so the
//! wiring logic can be exercised against [`crate::process::testing::MockLauncher`]
//! without spawning anything.
//!
//! A stage whose program can't be spawned at all (`ProcessLauncher::spawn`
//! returns `Err`) is treated as if a forked child's `exec` had failed: the
//! stage is credited exit code 1 and "Error: command not found" is written
//! to stderr. `std::process::Command` (and this crate's `RealLauncher`)
//! detects a missing program before any child exists, so the parent writes
//! that message on the stage's behalf instead of a real child writing it to
//! its own inherited stderr — the externally observable result (message on
//! stderr, exit code 1, completion line unaffected) is identical.

use std::io::Write;
use std::process::Stdio;

use crate::jobs::JobSlot;
use crate::process::{LaunchedChild, ProcessLauncher};
use crate::tokenizer::{CommandGraph, Stage};

/// What the shell driver should do after dispatching one command graph.
pub enum Outcome {
    /// Forked to the background; nothing to print now.
    Backgrounded,
    /// Ran to completion in the foreground; one exit code per stage, in
    /// stage order, ready for the driver to format as a completion line.
    Completed(Vec<i32>),
}

/// Spawns every stage of `graph`, wiring stdio for redirections and pipes, and either
/// hands the stages off to `jobs` (background) or waits for all of them
/// (foreground).
///
/// `graph`'s redirection files have already been opened by
/// [`crate::redirect::open_redirections`]; this function takes them so they
/// can be moved into each stage's `Stdio`.
pub fn execute(
    graph: &mut CommandGraph,
    command_text: &str,
    launcher: &mut dyn ProcessLauncher,
    jobs: &mut JobSlot,
    stderr: &mut dyn Write,
) -> Outcome {
    let stage_count = graph.stages.len();
    let mut pipe_readers: Vec<Option<os_pipe::PipeReader>> = Vec::with_capacity(stage_count.saturating_sub(1));
    let mut pipe_writers: Vec<Option<os_pipe::PipeWriter>> = Vec::with_capacity(stage_count.saturating_sub(1));
    for _ in 1..stage_count {
        let (reader, writer) = os_pipe::pipe().expect("failed to create pipe");
        pipe_readers.push(Some(reader));
        pipe_writers.push(Some(writer));
    }

    let mut children: Vec<Option<Box<dyn LaunchedChild>>> = Vec::with_capacity(stage_count);
    let mut exit_codes: Vec<Option<i32>> = Vec::with_capacity(stage_count);

    for (index, stage) in graph.stages.iter_mut().enumerate() {
        let stdin = stage_stdin(stage, index, &mut pipe_readers);
        let stdout = stage_stdout(stage, index, stage_count, &mut pipe_writers);

        match launcher.spawn(&stage.argv, stdin, stdout) {
            Ok(child) => {
                children.push(Some(child));
                exit_codes.push(None);
            }
            Err(_) => {
                let _ = writeln!(stderr, "Error: command not found");
                children.push(None);
                exit_codes.push(Some(1));
            }
        }
    }

    if graph.background {
        jobs.start(children, exit_codes, command_text.to_string());
        return Outcome::Backgrounded;
    }

    let codes = children
        .into_iter()
        .zip(exit_codes)
        .map(|(child, known)| match (child, known) {
            (Some(mut child), _) => child.wait(),
            (None, Some(code)) => code,
            (None, None) => unreachable!("a stage with no child must already have an exit code"),
        })
        .collect();

    Outcome::Completed(codes)
}

fn stage_stdin(stage: &mut Stage, index: usize, pipe_readers: &mut [Option<os_pipe::PipeReader>]) -> Stdio {
    if index == 0 {
        match stage.input_file.take() {
            Some(file) => Stdio::from(file),
            None => Stdio::inherit(),
        }
    } else {
        let reader = pipe_readers[index - 1].take().expect("pipe read end used twice");
        Stdio::from(reader)
    }
}

fn stage_stdout(
    stage: &mut Stage,
    index: usize,
    stage_count: usize,
    pipe_writers: &mut [Option<os_pipe::PipeWriter>],
) -> Stdio {
    if index + 1 == stage_count {
        match stage.output_file.take() {
            Some(file) => Stdio::from(file),
            None => Stdio::inherit(),
        }
    } else {
        let writer = pipe_writers[index].take().expect("pipe write end used twice");
        Stdio::from(writer)
    }
}
