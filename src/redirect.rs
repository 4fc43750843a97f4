//! Opens the files a [`CommandGraph`]'s redirections name, before anything
//! is forked.
//!
//! Only the first stage may carry `input_path` and only the last stage may
//! carry `output_path` (the tokenizer already enforces that placement), so
//! this module only ever touches those two slots.

use std::fs::OpenOptions;

use crate::error::ShellError;
use crate::tokenizer::CommandGraph;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Opens the graph's redirection files in place. On failure the graph is
/// left exactly as it was for whichever file *did* open — its `File` lives
/// in the `Stage` and closes via `Drop` once the graph itself is dropped,
/// so a failed output open never leaks the input file it opened first.
pub fn open_redirections(graph: &mut CommandGraph) -> Result<(), ShellError> {
    if let Some(first) = graph.stages.first_mut() {
        if let Some(path) = first.input_path.clone() {
            let file = std::fs::File::open(&path).map_err(|_| ShellError::CannotOpenInput)?;
            first.input_file = Some(file);
        }
    }

    if let Some(last) = graph.stages.last_mut() {
        if let Some(path) = last.output_path.clone() {
            let mut options = OpenOptions::new();
            options.create(true).write(true).truncate(true);
            #[cfg(unix)]
            options.mode(crate::config::OUTPUT_FILE_MODE);
            let file = options.open(&path).map_err(|_| ShellError::CannotOpenOutput)?;
            last.output_file = Some(file);
        }
    }

    Ok(())
}
