/// Convert an OS process status into shell-style exit code semantics.
///
/// On Unix, processes terminated by signal map to `128 + signal`, the
/// convention `waitpid`/`WEXITSTATUS` users expect — this shell has no job
/// control to receive a stop/terminate signal through, but a child can
/// still die from e.g. SIGSEGV.
pub fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn maps_normal_exit_codes() {
        let status = Command::new("true").status().expect("spawn true");
        assert_eq!(exit_code(status), 0);

        let status = Command::new("sh")
            .args(["-c", "exit 7"])
            .status()
            .expect("spawn sh");
        assert_eq!(exit_code(status), 7);
    }
}
