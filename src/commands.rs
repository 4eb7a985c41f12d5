use anyhow::Result;
use serde::Serialize;

use crate::apt::{AptTask, Runner};
use crate::system::{self, SystemUsage};
use crate::ui::Effects;

/// Result structs for command output. Commands return these instead of
/// printing directly — main.rs formats them as human-readable or JSON
/// based on --json.

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub updates_available: bool,
    pub removals_available: bool,
}

impl CheckResult {
    pub fn has_work(&self) -> bool {
        self.updates_available || self.removals_available
    }
}

#[derive(Debug, Serialize)]
pub struct InfoResult {
    pub usage: SystemUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Upgrade,
    FixBroken,
    Autoremove,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Upgrade => "Updating and upgrading",
            ActionKind::FixBroken => "Fixing broken installs",
            ActionKind::Autoremove => "Removing unused packages",
        }
    }

    fn tasks(self) -> &'static [AptTask] {
        match self {
            ActionKind::Upgrade => &[AptTask::Update, AptTask::Upgrade],
            ActionKind::FixBroken => &[AptTask::FixBroken],
            ActionKind::Autoremove => &[AptTask::Autoremove],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActionReport {
    pub action: ActionKind,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub check: CheckResult,
    pub actions: Vec<ActionReport>,
    pub usage_before: SystemUsage,
    pub usage_after: SystemUsage,
}

pub fn cmd_check(runner: &dyn Runner) -> Result<CheckResult> {
    let upgradable = runner.run(AptTask::ListUpgradable)?;
    let updates_available = !upgradable_lines(&upgradable.stdout).is_empty();

    let dry_run = runner.run(AptTask::AutoremoveDryRun)?;
    let removals_available = !removal_lines(&dry_run.stdout).is_empty();

    Ok(CheckResult {
        updates_available,
        removals_available,
    })
}

/// Package lines from `apt list --upgradable`, minus the `Listing...` header.
fn upgradable_lines(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("Listing"))
        .collect()
}

/// `Remv` lines from a dry-run autoremove; everything else apt-get prints
/// during a simulation is noise.
fn removal_lines(stdout: &str) -> Vec<&str> {
    stdout.lines().filter(|l| l.starts_with("Remv")).collect()
}

pub fn cmd_info() -> InfoResult {
    InfoResult {
        usage: system::sample(),
    }
}

/// The whole pipeline: check, and when anything is pending run the three
/// actions in fixed order, exactly once each. The effects sink receives
/// every notice and phase marker but never influences control flow.
pub fn cmd_run(runner: &dyn Runner, fx: &dyn Effects) -> Result<RunResult> {
    fx.intro();

    let usage_before = system::sample();
    fx.usage_table("System Usage", &usage_before);

    let check = cmd_check(runner)?;

    if !check.has_work() {
        fx.nothing_to_do();
        let usage_after = system::sample();
        fx.usage_table("Final System Status", &usage_after);
        return Ok(RunResult {
            check,
            actions: Vec::new(),
            usage_before,
            usage_after,
        });
    }

    if check.updates_available {
        fx.notice("Updates are available!");
    }
    if check.removals_available {
        fx.notice("Removals are available!");
    }

    let mut actions = Vec::new();
    for action in [ActionKind::Upgrade, ActionKind::FixBroken, ActionKind::Autoremove] {
        actions.push(run_action(runner, fx, action)?);
    }

    let usage_after = system::sample();
    fx.usage_table("Final System Status", &usage_after);
    fx.outro();

    Ok(RunResult {
        check,
        actions,
        usage_before,
        usage_after,
    })
}

fn run_action(runner: &dyn Runner, fx: &dyn Effects, action: ActionKind) -> Result<ActionReport> {
    fx.phase_begin(action.label());

    // Multi-task actions keep the last task's stdout for display, matching
    // how the combined update/upgrade step has always reported itself.
    let mut captured = String::new();
    let mut notes = Vec::new();
    for task in action.tasks() {
        let output = runner.run(*task)?;
        if let Some(code) = output.status.filter(|&c| c != 0) {
            notes.push(format!("({} exited with code {})", task.display(), code));
        }
        captured = output.stdout;
    }

    fx.phase_end(action.label());
    for line in captured.lines() {
        fx.line(line);
    }
    for note in &notes {
        fx.line(note);
    }

    Ok(ActionReport {
        action,
        output: captured,
    })
}

pub fn format_check_human(result: &CheckResult) -> String {
    let describe = |available: bool| if available { "available" } else { "none" };
    let mut lines = vec![
        format!("upgrades:  {}", describe(result.updates_available)),
        format!("removals:  {}", describe(result.removals_available)),
    ];
    if !result.has_work() {
        lines.push("Nothing to do.".to_string());
    }
    lines.join("\n")
}

pub fn format_info_human(result: &InfoResult) -> String {
    system::format_usage_table(&result.usage)
}

/// The human rendering of a full run happens live through the effects
/// sink; there is nothing left to print afterwards.
pub fn format_run_human(_result: &RunResult) -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeRunner;
    use crate::ui::Silent;

    const UPGRADABLE: &str = "Listing... Done\n\
        vim/stable 2:9.0.1378-2 amd64 [upgradable from: 2:9.0.1378-1]\n";

    const REMOVABLE: &str = "NOTE: This is only a simulation!\n\
        Remv libfoo [1.2-3]\n\
        Remv libbar [0.9-1]\n";

    #[test]
    fn upgradable_lines_skip_the_listing_header() {
        assert!(upgradable_lines("Listing... Done\n").is_empty());
        assert!(upgradable_lines("").is_empty());
        assert_eq!(upgradable_lines(UPGRADABLE).len(), 1);
    }

    #[test]
    fn removal_lines_keep_only_remv_entries() {
        assert!(removal_lines("NOTE: This is only a simulation!\n").is_empty());
        assert_eq!(removal_lines(REMOVABLE).len(), 2);
    }

    #[test]
    fn check_reports_no_work_for_empty_outputs() {
        let runner = FakeRunner::new();
        let result = cmd_check(&runner).unwrap();
        assert!(!result.updates_available);
        assert!(!result.removals_available);
        assert!(!result.has_work());
    }

    #[test]
    fn check_sees_pending_upgrades() {
        let runner = FakeRunner::new().stdout_for(AptTask::ListUpgradable, UPGRADABLE);
        let result = cmd_check(&runner).unwrap();
        assert!(result.updates_available);
        assert!(!result.removals_available);
    }

    #[test]
    fn check_sees_pending_removals() {
        let runner = FakeRunner::new().stdout_for(AptTask::AutoremoveDryRun, REMOVABLE);
        let result = cmd_check(&runner).unwrap();
        assert!(!result.updates_available);
        assert!(result.removals_available);
    }

    #[test]
    fn run_with_nothing_pending_never_mutates() {
        let runner = FakeRunner::new();
        let result = cmd_run(&runner, &Silent).unwrap();

        assert!(result.actions.is_empty());
        assert_eq!(
            runner.invocations(),
            vec![AptTask::ListUpgradable, AptTask::AutoremoveDryRun]
        );
    }

    #[test]
    fn run_with_upgrades_runs_all_actions_in_order() {
        let runner = FakeRunner::new().stdout_for(AptTask::ListUpgradable, UPGRADABLE);
        let result = cmd_run(&runner, &Silent).unwrap();

        assert_eq!(
            runner.invocations(),
            vec![
                AptTask::ListUpgradable,
                AptTask::AutoremoveDryRun,
                AptTask::Update,
                AptTask::Upgrade,
                AptTask::FixBroken,
                AptTask::Autoremove,
            ]
        );
        let kinds: Vec<ActionKind> = result.actions.iter().map(|a| a.action).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::Upgrade, ActionKind::FixBroken, ActionKind::Autoremove]
        );
    }

    #[test]
    fn run_with_only_removals_still_runs_everything() {
        let runner = FakeRunner::new().stdout_for(AptTask::AutoremoveDryRun, REMOVABLE);
        let result = cmd_run(&runner, &Silent).unwrap();
        assert_eq!(result.actions.len(), 3);
        assert!(runner.invocations().contains(&AptTask::Upgrade));
    }

    #[test]
    fn upgrade_action_reports_the_upgrade_output() {
        let runner = FakeRunner::new()
            .stdout_for(AptTask::ListUpgradable, UPGRADABLE)
            .stdout_for(AptTask::Update, "Hit:1 http://deb.debian.org stable InRelease\n")
            .stdout_for(AptTask::Upgrade, "2 upgraded, 0 newly installed\n");
        let result = cmd_run(&runner, &Silent).unwrap();

        let upgrade = &result.actions[0];
        assert_eq!(upgrade.action, ActionKind::Upgrade);
        assert_eq!(upgrade.output, "2 upgraded, 0 newly installed\n");
    }

    #[test]
    fn nonzero_exit_does_not_stop_the_pipeline() {
        let runner = FakeRunner::new()
            .stdout_for(AptTask::ListUpgradable, UPGRADABLE)
            .exit_code_for(AptTask::Upgrade, 100);
        let result = cmd_run(&runner, &Silent).unwrap();
        assert_eq!(result.actions.len(), 3);
    }

    #[test]
    fn check_human_output_mentions_both_categories() {
        let text = format_check_human(&CheckResult {
            updates_available: true,
            removals_available: false,
        });
        assert!(text.contains("upgrades:  available"));
        assert!(text.contains("removals:  none"));
        assert!(!text.contains("Nothing to do."));
    }

    #[test]
    fn check_human_output_says_nothing_to_do() {
        let text = format_check_human(&CheckResult {
            updates_available: false,
            removals_available: false,
        });
        assert!(text.contains("Nothing to do."));
    }
}
