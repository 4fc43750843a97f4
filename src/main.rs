mod builtins;
mod config;
mod error;
mod executor;
mod jobs;
mod process;
mod redirect;
mod shell;
mod status;
mod tokenizer;
mod validator;

use std::io::{BufRead, IsTerminal, Write};

use process::RealLauncher;
use shell::{LineSource, Shell};

/// Caps a line at `config::MAX_LINE_BYTES`; a line longer than the buffer
/// is silently truncated rather than rejected.
struct Stdin {
    reader: std::io::BufReader<std::io::Stdin>,
    tty: bool,
}

impl Stdin {
    fn new() -> Self {
        let stdin = std::io::stdin();
        let tty = stdin.is_terminal();
        Self {
            reader: std::io::BufReader::new(stdin),
            tty,
        }
    }
}

impl LineSource for Stdin {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => {
                let mut cap = config::MAX_LINE_BYTES.min(buf.len());
                while cap > 0 && !buf.is_char_boundary(cap) {
                    cap -= 1;
                }
                buf.truncate(cap);
                while buf.ends_with(['\n', '\r']) {
                    buf.pop();
                }
                Ok(Some(buf))
            }
            Err(err) => Err(err),
        }
    }

    fn is_tty(&self) -> bool {
        self.tty
    }
}

fn main() {
    let mut lines = Stdin::new();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    let mut shell = Shell::new(RealLauncher);
    let code = shell.run(&mut lines, &mut stdout, &mut stderr);
    let _ = stdout.flush();
    let _ = stderr.flush();
    std::process::exit(code);
}
