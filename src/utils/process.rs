use std::io;
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of an external command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Last non-empty stderr line, used in error messages
    pub fn stderr_tail(&self) -> String {
        String::from_utf8_lossy(&self.stderr)
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .map(|l| l.trim().to_string())
            .unwrap_or_else(|| match self.code {
                Some(code) => format!("exit status {}", code),
                None => "terminated by signal".to_string(),
            })
    }
}

/// Runs external tools (ffprobe, ffmpeg)
pub trait CommandRunner {
    /// Run to completion and capture stdout/stderr
    fn output(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;

    /// Run with inherited stdio so the output reaches the terminal
    fn stream(&self, program: &str, args: &[String]) -> io::Result<Option<i32>>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        debug!("Running: {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn stream(&self, program: &str, args: &[String]) -> io::Result<Option<i32>> {
        debug!("Streaming: {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status()?;
        Ok(status.code())
    }
}

#[cfg(test)]
pub mod fake {
    //! Scripted runner for tests

    use super::{CommandOutput, CommandRunner};
    use std::cell::RefCell;
    use std::io;

    type Handler = Box<dyn Fn(&[String]) -> io::Result<CommandOutput>>;

    /// Dispatches on program name and records every invocation
    #[derive(Default)]
    pub struct FakeRunner {
        handlers: Vec<(String, Handler)>,
        pub calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(
            mut self,
            program: &str,
            handler: impl Fn(&[String]) -> io::Result<CommandOutput> + 'static,
        ) -> Self {
            self.handlers.push((program.to_string(), Box::new(handler)));
            self
        }

        pub fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
            self.calls
                .borrow()
                .iter()
                .filter(|(p, _)| p == program)
                .map(|(_, a)| a.clone())
                .collect()
        }

        fn dispatch(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
            match self.handlers.iter().find(|(p, _)| p == program) {
                Some((_, handler)) => handler(args),
                None => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{}: not found", program),
                )),
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn output(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
            self.dispatch(program, args)
        }

        fn stream(&self, program: &str, args: &[String]) -> io::Result<Option<i32>> {
            self.dispatch(program, args).map(|o| o.code)
        }
    }

    pub fn ok(stdout: &str) -> io::Result<CommandOutput> {
        Ok(CommandOutput {
            code: Some(0),
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        })
    }

    pub fn failed(code: i32, stderr: &str) -> io::Result<CommandOutput> {
        Ok(CommandOutput {
            code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail() {
        let out = CommandOutput {
            code: Some(1),
            stdout: Vec::new(),
            stderr: b"first\nStream map '0:9' matches no streams.\n\n".to_vec(),
        };
        assert!(!out.success());
        assert_eq!(out.stderr_tail(), "Stream map '0:9' matches no streams.");

        let silent = CommandOutput {
            code: Some(69),
            ..Default::default()
        };
        assert_eq!(silent.stderr_tail(), "exit status 69");
    }
}
