//! OCI CLI configuration prompt.

use crate::{Console, RunContext, SetupError, Shell, ShellCommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// What the configuration step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OciConfigStatus {
    /// `~/.oci/config` was already there.
    AlreadyConfigured,
    /// `oci setup config` ran; `succeeded` is its exit status.
    Configured {
        /// Whether the configuration command exited successfully.
        succeeded: bool,
    },
    /// The operator chose to configure later.
    Deferred,
}

/// Path of the OCI CLI config file for this run.
pub fn oci_config_path(ctx: &RunContext) -> PathBuf {
    ctx.home_dir.join(".oci").join("config")
}

/// Offer to run `oci setup config` when no OCI config exists yet.
pub async fn configure_oci_cli<S, R, W>(
    ctx: &RunContext,
    shell: &S,
    console: &mut Console<R, W>,
) -> Result<OciConfigStatus, SetupError>
where
    S: Shell,
    R: BufRead,
    W: Write,
{
    let config = oci_config_path(ctx);
    if config.is_file() {
        console.say(&format!("✓ OCI config already exists at: {}", config.display()))?;
        console.say("You can reconfigure it by running: oci setup config")?;
        return Ok(OciConfigStatus::AlreadyConfigured);
    }

    console.say("OCI CLI needs to be configured.")?;
    let answer = console.ask("Do you want to configure it now? (y/n): ")?;
    if answer.eq_ignore_ascii_case("y") {
        let result = shell
            .run(&ShellCommand::tolerant("oci setup config").interactive())
            .await;
        return Ok(OciConfigStatus::Configured {
            succeeded: result.succeeded,
        });
    }

    console.say("You can configure it later by running: oci setup config")?;
    Ok(OciConfigStatus::Deferred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeHost;
    use crate::OsIdentity;
    use std::io::Cursor;

    fn ctx(home: PathBuf) -> RunContext {
        RunContext {
            os: OsIdentity::Linux,
            python: "python3".to_string(),
            script_dir: PathBuf::from("/opt/setup"),
            home_dir: home,
        }
    }

    #[tokio::test]
    async fn test_existing_config_skips_prompt() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(home.path().join(".oci")).unwrap();
        std::fs::write(home.path().join(".oci/config"), "[DEFAULT]\n").unwrap();
        let host = FakeHost::with_tools(&[]);
        let mut console = Console::new(Cursor::new(""), Vec::new());

        let status = configure_oci_cli(&ctx(home.path().to_path_buf()), &host, &mut console)
            .await
            .unwrap();

        assert_eq!(status, OciConfigStatus::AlreadyConfigured);
        assert!(host.commands().is_empty());
    }

    #[tokio::test]
    async fn test_yes_runs_interactive_setup() {
        let home = tempfile::tempdir().unwrap();
        let host = FakeHost::with_tools(&[]);
        let mut console = Console::new(Cursor::new("Y\n"), Vec::new());

        let status = configure_oci_cli(&ctx(home.path().to_path_buf()), &host, &mut console)
            .await
            .unwrap();

        assert_eq!(status, OciConfigStatus::Configured { succeeded: true });
        let commands = host.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].line, "oci setup config");
        assert!(commands[0].interactive);
    }

    #[tokio::test]
    async fn test_other_answer_defers() {
        let home = tempfile::tempdir().unwrap();
        let host = FakeHost::with_tools(&[]);
        let mut console = Console::new(Cursor::new("n\n"), Vec::new());

        let status = configure_oci_cli(&ctx(home.path().to_path_buf()), &host, &mut console)
            .await
            .unwrap();

        assert_eq!(status, OciConfigStatus::Deferred);
        assert!(host.commands().is_empty());
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("You can configure it later by running: oci setup config"));
    }
}
