use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// The fixed set of apt invocations this tool ever makes. Tasks map to
/// argument vectors, never to shell strings, so nothing in user-visible
/// output can be interpreted by a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AptTask {
    ListUpgradable,
    AutoremoveDryRun,
    Update,
    Upgrade,
    FixBroken,
    Autoremove,
}

impl AptTask {
    pub fn argv(self) -> &'static [&'static str] {
        match self {
            AptTask::ListUpgradable => &["apt", "list", "--upgradable"],
            AptTask::AutoremoveDryRun => &["sudo", "apt-get", "--dry-run", "autoremove"],
            AptTask::Update => &["sudo", "apt-get", "update", "-y"],
            AptTask::Upgrade => &["sudo", "apt-get", "upgrade", "-y"],
            AptTask::FixBroken => &["sudo", "apt-get", "install", "-f", "-y"],
            AptTask::Autoremove => &["sudo", "apt-get", "autoremove", "-y"],
        }
    }

    pub fn display(self) -> String {
        self.argv().join(" ")
    }
}

/// Captured output of a finished invocation. The exit code is carried for
/// display only; callers inspect the text, never the status.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: Option<i32>,
}

/// Seam between the pipeline and the real package manager.
pub trait Runner {
    fn run(&self, task: AptTask) -> Result<CommandOutput>;
}

/// Runs tasks against the real apt. A non-zero exit status is not an error
/// here: downstream code only ever looks at the captured text, and an
/// `Err` is reserved for "the process could not be spawned at all".
pub struct Apt;

impl Runner for Apt {
    fn run(&self, task: AptTask) -> Result<CommandOutput> {
        capture(task.argv())
    }
}

fn capture(argv: &[&str]) -> Result<CommandOutput> {
    let output = Command::new(argv[0])
        .args(&argv[1..])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("failed to run {}", argv.join(" ")))?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status.code(),
    })
}
