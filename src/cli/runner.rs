//! Script runner
//!
//! Launches `<package manager> run <script>` as a child process wired to the
//! streams it is given, and waits for it to finish.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use super::output::Output;

/// Standard stream handles handed to the child process
#[derive(Debug)]
pub struct StdStreams {
    pub stdin: Stdio,
    pub stdout: Stdio,
    pub stderr: Stdio,
}

impl StdStreams {
    /// Child shares this process's terminal
    pub fn inherit() -> Self {
        Self {
            stdin: Stdio::inherit(),
            stdout: Stdio::inherit(),
            stderr: Stdio::inherit(),
        }
    }

    /// Child gets no terminal at all
    pub fn null() -> Self {
        Self {
            stdin: Stdio::null(),
            stdout: Stdio::null(),
            stderr: Stdio::null(),
        }
    }
}

/// Something that can launch a script by name
pub trait Launcher {
    fn launch(&self, script: &str) -> io::Result<ExitStatus>;
}

/// Runs scripts through a package manager
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    program: String,
    output: Output,
}

impl ScriptRunner {
    pub fn new(program: impl Into<String>, output: Output) -> Self {
        Self {
            program: program.into(),
            output,
        }
    }

    /// Returns the package manager executable
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the command without any stream configuration
    pub fn command(&self, script: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("run").arg(script);
        cmd
    }

    /// Announces and runs `script`, blocking until it exits.
    ///
    /// The child's exit status is returned as-is; a failing script is not an
    /// error here.
    pub fn run(&self, script: &str, streams: StdStreams) -> io::Result<ExitStatus> {
        self.output.announce(&self.program, script);

        self.command(script)
            .stdin(streams.stdin)
            .stdout(streams.stdout)
            .stderr(streams.stderr)
            .status()
    }
}

impl Launcher for ScriptRunner {
    fn launch(&self, script: &str) -> io::Result<ExitStatus> {
        self.run(script, StdStreams::inherit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn builds_run_command() {
        let runner = ScriptRunner::new("npm", Output::default());
        let cmd = runner.command("test");

        assert_eq!(cmd.get_program(), OsStr::new("npm"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![OsStr::new("run"), OsStr::new("test")]);
    }

    #[test]
    fn script_name_is_a_single_argument() {
        let runner = ScriptRunner::new("pnpm", Output::default());
        let cmd = runner.command("build && rm -rf /");

        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.len(), 2);
        assert_eq!(args[1], OsStr::new("build && rm -rf /"));
    }

    #[test]
    fn missing_program_is_launch_error() {
        let runner = ScriptRunner::new("npm-pick-no-such-program", Output::default());
        assert!(runner.run("test", StdStreams::null()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_passed_through() {
        // `true run x` and `false run x` ignore their arguments
        let ok = ScriptRunner::new("true", Output::default());
        assert!(ok.run("build", StdStreams::null()).unwrap().success());

        let failing = ScriptRunner::new("false", Output::default());
        assert!(!failing.run("build", StdStreams::null()).unwrap().success());
    }
}
