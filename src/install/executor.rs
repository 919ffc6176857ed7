//! Installer step execution.
//!
//! This module provides [`run_step`], which takes one [`InstallStep`]
//! through probe, plan and command execution, reporting progress as it goes,
//! and [`run_steps`], which runs a whole step list so that a package manager
//! is attempted at most once.

use super::{strategy_for, InstallPlan, InstallStep, StepOutcome, StepProgress, StepReport};
use crate::{Probe, RunContext, Shell, ShellCommand, Tool};

/// Run one installer step.
///
/// 1. Probes for the tool; if present, reports `AlreadySatisfied` and runs
///    nothing
/// 2. Asks the OS strategy for a plan
/// 3. Installs the plan's bootstrap package manager first when it is missing
/// 4. Runs the command chain in order
///
/// A strict command that fails ends the chain. A tolerant one prints a
/// manual-install hint and the chain carries on; the step then succeeds
/// only if the last command of the chain did.
///
/// Never returns an error: failures are a [`StepOutcome::Failed`] so the
/// caller can continue with the next step.
///
/// # Example
///
/// ```rust,no_run
/// use cd3_setup::{
///     run_step, InstallStep, OsIdentity, PathProbe, RunContext, SetupOptions, SystemShell, Tool,
/// };
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let os = OsIdentity::detect();
///     let probe = PathProbe::new(os, dirs::home_dir());
///     let ctx = RunContext::resolve(&SetupOptions::default(), &probe).unwrap();
///     let report = run_step(
///         InstallStep::required(Tool::Git),
///         &ctx,
///         &SystemShell::new(os),
///         &probe,
///         |progress| println!("{:?}", progress),
///     )
///     .await;
///     println!("{:?}", report.outcome);
/// }
/// ```
pub async fn run_step<S, F>(
    step: InstallStep,
    ctx: &RunContext,
    shell: &S,
    probe: &dyn Probe,
    on_progress: F,
) -> StepReport
where
    S: Shell,
    F: Fn(StepProgress) + Send + Sync,
{
    execute(step, ctx, shell, probe, &[], &on_progress).await
}

/// Run a step list in order, one report per step.
///
/// A package manager attempted by an earlier step of the list is not
/// installed again as a bootstrap: if that step failed, the steps that
/// depend on it fail straight away with "<manager> unavailable".
pub async fn run_steps<S, F>(
    steps: &[InstallStep],
    ctx: &RunContext,
    shell: &S,
    probe: &dyn Probe,
    on_progress: F,
) -> Vec<StepReport>
where
    S: Shell,
    F: Fn(StepProgress) + Send + Sync,
{
    let mut reports: Vec<StepReport> = Vec::with_capacity(steps.len());
    for &step in steps {
        let report = execute(step, ctx, shell, probe, &reports, &on_progress).await;
        reports.push(report);
    }
    reports
}

async fn execute<S, F>(
    step: InstallStep,
    ctx: &RunContext,
    shell: &S,
    probe: &dyn Probe,
    earlier: &[StepReport],
    on_progress: &F,
) -> StepReport
where
    S: Shell,
    F: Fn(StepProgress) + Send + Sync,
{
    let tool = step.tool;
    on_progress(StepProgress::Probing { tool });

    if probe.exists(tool.executable_name()) {
        tracing::debug!(tool = tool.display_name(), "already installed");
        on_progress(StepProgress::AlreadySatisfied { tool });
        return StepReport {
            step,
            outcome: StepOutcome::AlreadySatisfied,
        };
    }

    on_progress(StepProgress::Installing { tool });
    let outcome = perform(tool, ctx, shell, probe, earlier).await;

    match &outcome {
        StepOutcome::Failed { reason } => {
            tracing::warn!(tool = tool.display_name(), %reason, "install step failed");
            on_progress(StepProgress::Failed {
                tool,
                reason: reason.clone(),
            });
        }
        _ => on_progress(StepProgress::Completed { tool }),
    }

    StepReport { step, outcome }
}

async fn perform<S: Shell>(
    tool: Tool,
    ctx: &RunContext,
    shell: &S,
    probe: &dyn Probe,
    earlier: &[StepReport],
) -> StepOutcome {
    let Some(strategy) = strategy_for(ctx.os) else {
        return failed(format!("no install strategy for {}", ctx.os.display_name()));
    };

    let (bootstrap, commands) = match strategy.plan(tool, probe) {
        InstallPlan::Commands {
            bootstrap,
            commands,
        } => (bootstrap, commands),
        InstallPlan::Manual { url } => {
            println!("Please install {} from: {}", tool.display_name(), url);
            return failed(format!("manual installation required: {}", url));
        }
        InstallPlan::Unavailable { reason } => {
            println!("Cannot install {}: {}", tool.display_name(), reason);
            return failed(reason);
        }
    };

    if let Some(manager) = bootstrap.filter(|m| !probe.exists(m.executable_name())) {
        match earlier.iter().find(|r| r.step.tool == manager) {
            Some(attempt) if !attempt.outcome.is_done() => {
                return failed(format!("{} unavailable", manager.display_name()));
            }
            Some(_) => {
                tracing::debug!(manager = manager.display_name(), "bootstrap already ran this run");
            }
            None => {
                println!("Installing {}...", manager.display_name());
                let InstallPlan::Commands { commands: setup, .. } = strategy.plan(manager, probe)
                else {
                    return failed(format!(
                        "{} is required but cannot be installed",
                        manager.display_name()
                    ));
                };
                if !run_chain(manager, &setup, shell).await {
                    return failed(format!("{} could not be installed", manager.display_name()));
                }
            }
        }
    }

    if run_chain(tool, &commands, shell).await {
        StepOutcome::Installed
    } else {
        failed("install command failed".to_string())
    }
}

/// Run a command chain; true when the chain finished and its last command succeeded.
async fn run_chain<S: Shell>(tool: Tool, commands: &[ShellCommand], shell: &S) -> bool {
    let mut last_ok = true;
    for command in commands {
        let result = shell.run(command).await;
        last_ok = result.succeeded;
        if result.succeeded {
            continue;
        }
        if !command.tolerates_failure {
            return false;
        }
        println!(
            "Note: If this fails, please install {} manually from: {}",
            tool.display_name(),
            tool.manual_url()
        );
    }
    last_ok
}

fn failed(reason: String) -> StepOutcome {
    StepOutcome::Failed { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeHost;
    use crate::OsIdentity;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn ctx(os: OsIdentity) -> RunContext {
        RunContext {
            os,
            python: "python3".to_string(),
            script_dir: PathBuf::from("/opt/setup"),
            home_dir: PathBuf::from("/home/op"),
        }
    }

    async fn run(host: &FakeHost, os: OsIdentity, step: InstallStep) -> StepReport {
        run_step(step, &ctx(os), host, host, |_| {}).await
    }

    #[tokio::test]
    async fn test_present_tool_runs_nothing() {
        for os in [OsIdentity::Linux, OsIdentity::MacOs, OsIdentity::Windows] {
            let host = FakeHost::with_tools(&["git", "apt-get"]);
            let report = run(&host, os, InstallStep::required(Tool::Git)).await;
            assert_eq!(report.outcome, StepOutcome::AlreadySatisfied);
            assert!(host.commands().is_empty());
        }
    }

    #[tokio::test]
    async fn test_progress_stages_order() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();
        let host = FakeHost::with_tools(&["apt-get"]);

        run_step(
            InstallStep::required(Tool::Git),
            &ctx(OsIdentity::Linux),
            &host,
            &host,
            move |progress| stages_clone.lock().unwrap().push(progress),
        )
        .await;

        let stages = stages.lock().unwrap();
        assert_eq!(
            *stages,
            vec![
                StepProgress::Probing { tool: Tool::Git },
                StepProgress::Installing { tool: Tool::Git },
                StepProgress::Completed { tool: Tool::Git },
            ]
        );
    }

    #[tokio::test]
    async fn test_linux_git_via_apt() {
        let host = FakeHost::with_tools(&["apt-get"]);
        let report = run(&host, OsIdentity::Linux, InstallStep::required(Tool::Git)).await;
        assert_eq!(report.outcome, StepOutcome::Installed);
        assert_eq!(
            host.lines(),
            vec!["sudo apt-get update", "sudo apt-get install -y git"]
        );
    }

    #[tokio::test]
    async fn test_strict_failure_stops_chain() {
        let host = FakeHost::with_tools(&["apt-get"]).failing_on("apt-get update");
        let report = run(&host, OsIdentity::Linux, InstallStep::required(Tool::Git)).await;
        assert!(!report.outcome.is_done());
        assert_eq!(host.lines(), vec!["sudo apt-get update"]);
    }

    #[tokio::test]
    async fn test_tolerant_chain_continues_after_failure() {
        let host = FakeHost::with_tools(&["apt-get"]).failing_on("gpg --dearmor");
        let report = run(&host, OsIdentity::Linux, InstallStep::required(Tool::Terraform)).await;
        assert_eq!(report.outcome, StepOutcome::Installed);
        assert_eq!(host.commands().len(), 6);
    }

    #[tokio::test]
    async fn test_tolerant_chain_fails_when_last_command_fails() {
        let host = FakeHost::with_tools(&["apt-get"]).failing_on("install -y terraform");
        let report = run(&host, OsIdentity::Linux, InstallStep::required(Tool::Terraform)).await;
        assert!(report.needs_attention());
        assert_eq!(host.commands().len(), 6);
    }

    #[tokio::test]
    async fn test_macos_bootstraps_homebrew_first() {
        let host = FakeHost::with_tools(&[]);
        let report = run(&host, OsIdentity::MacOs, InstallStep::required(Tool::Git)).await;
        assert_eq!(report.outcome, StepOutcome::Installed);
        let lines = host.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Homebrew/install/HEAD/install.sh"));
        assert_eq!(lines[1], "brew install git");
    }

    #[tokio::test]
    async fn test_macos_skips_bootstrap_when_brew_present() {
        let host = FakeHost::with_tools(&["brew"]);
        run(&host, OsIdentity::MacOs, InstallStep::required(Tool::Git)).await;
        assert_eq!(host.lines(), vec!["brew install git"]);
    }

    #[tokio::test]
    async fn test_failed_bootstrap_fails_step() {
        let host = FakeHost::with_tools(&[]).failing_on("Homebrew/install");
        let report = run(&host, OsIdentity::MacOs, InstallStep::required(Tool::Terraform)).await;
        assert!(matches!(report.outcome, StepOutcome::Failed { ref reason } if reason.contains("Homebrew")));
        assert_eq!(host.commands().len(), 1);
    }

    #[tokio::test]
    async fn test_windows_manual_is_failed_without_commands() {
        let host = FakeHost::with_tools(&[]);
        let report = run(&host, OsIdentity::Windows, InstallStep::required(Tool::Terraform)).await;
        assert!(matches!(report.outcome, StepOutcome::Failed { .. }));
        assert!(host.commands().is_empty());
    }

    #[tokio::test]
    async fn test_linux_without_package_manager_fails() {
        let host = FakeHost::with_tools(&[]);
        let report = run(&host, OsIdentity::Linux, InstallStep::required(Tool::Git)).await;
        assert!(report.needs_attention());
        assert!(host.commands().is_empty());
    }

    fn macos_steps() -> Vec<InstallStep> {
        vec![
            InstallStep::optional(Tool::Homebrew),
            InstallStep::required(Tool::Git),
            InstallStep::required(Tool::Terraform),
        ]
    }

    fn homebrew_attempts(host: &FakeHost) -> usize {
        host.lines()
            .iter()
            .filter(|l| l.contains("Homebrew/install"))
            .count()
    }

    #[tokio::test]
    async fn test_failed_homebrew_step_is_not_retried() {
        let host = FakeHost::with_tools(&[]).failing_on("Homebrew/install");
        let reports = run_steps(&macos_steps(), &ctx(OsIdentity::MacOs), &host, &host, |_| {}).await;

        assert_eq!(homebrew_attempts(&host), 1);
        assert_eq!(host.commands().len(), 1);
        for report in &reports[1..] {
            assert!(
                matches!(report.outcome, StepOutcome::Failed { ref reason } if reason == "Homebrew unavailable")
            );
        }
    }

    #[tokio::test]
    async fn test_installed_homebrew_step_is_not_repeated_as_bootstrap() {
        // brew stays off the fake PATH, as it would before a shell restart.
        let host = FakeHost::with_tools(&[]);
        let reports = run_steps(&macos_steps(), &ctx(OsIdentity::MacOs), &host, &host, |_| {}).await;

        assert_eq!(homebrew_attempts(&host), 1);
        assert!(reports.iter().all(|r| r.outcome == StepOutcome::Installed));
        assert!(host.lines().contains(&"brew install git".to_string()));
    }

    #[tokio::test]
    async fn test_run_steps_reports_in_order() {
        let host = FakeHost::with_tools(&["apt-get", "git"]);
        let steps = [
            InstallStep::required(Tool::Git),
            InstallStep::required(Tool::OciCli),
        ];
        let reports = run_steps(&steps, &ctx(OsIdentity::Linux), &host, &host, |_| {}).await;

        let tools: Vec<Tool> = reports.iter().map(|r| r.step.tool).collect();
        assert_eq!(tools, vec![Tool::Git, Tool::OciCli]);
        assert_eq!(reports[0].outcome, StepOutcome::AlreadySatisfied);
        assert_eq!(host.commands().len(), 1);
    }
}
