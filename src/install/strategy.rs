//! Per-OS package-manager strategies.
//!
//! Each supported OS has one [`PackageStrategy`]. Adding an OS means adding
//! one implementation and one arm in [`strategy_for`].

use super::InstallPlan;
use crate::{OsIdentity, Probe, ShellCommand, Tool};

const HOMEBREW_INSTALL: &str = r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#;

const OCI_CLI_INSTALL: &str = r#"bash -c "$(curl -L https://raw.githubusercontent.com/oracle/oci-cli/master/scripts/install/install.sh)" -- --accept-all-defaults"#;

const HASHICORP_APT_KEY: &str = "wget -O- https://apt.releases.hashicorp.com/gpg | gpg --dearmor | sudo tee /usr/share/keyrings/hashicorp-archive-keyring.gpg";

const HASHICORP_APT_SOURCE: &str = r#"echo "deb [signed-by=/usr/share/keyrings/hashicorp-archive-keyring.gpg] https://apt.releases.hashicorp.com $(lsb_release -cs) main" | sudo tee /etc/apt/sources.list.d/hashicorp.list"#;

/// Chooses the command plan that installs a tool on one OS.
pub trait PackageStrategy: Send + Sync {
    /// The OS this strategy serves.
    fn os(&self) -> OsIdentity;

    /// Plan the installation of `tool`.
    ///
    /// `probe` is consulted only to pick among package managers; planning
    /// never runs a command.
    fn plan(&self, tool: Tool, probe: &dyn Probe) -> InstallPlan;
}

/// Look up the strategy for an OS.
///
/// Returns `None` for [`OsIdentity::Unsupported`].
pub fn strategy_for(os: OsIdentity) -> Option<&'static dyn PackageStrategy> {
    static MACOS: MacOsStrategy = MacOsStrategy;
    static LINUX: LinuxStrategy = LinuxStrategy;
    static WINDOWS: WindowsStrategy = WindowsStrategy;

    match os {
        OsIdentity::MacOs => Some(&MACOS),
        OsIdentity::Linux => Some(&LINUX),
        OsIdentity::Windows => Some(&WINDOWS),
        OsIdentity::Unsupported => None,
    }
}

/// macOS: everything goes through Homebrew, bootstrapped on demand.
#[derive(Debug)]
pub struct MacOsStrategy;

impl PackageStrategy for MacOsStrategy {
    fn os(&self) -> OsIdentity {
        OsIdentity::MacOs
    }

    fn plan(&self, tool: Tool, _probe: &dyn Probe) -> InstallPlan {
        match tool {
            Tool::Homebrew => InstallPlan::commands(vec![ShellCommand::strict(HOMEBREW_INSTALL)]),
            Tool::Git => InstallPlan::after(
                Tool::Homebrew,
                vec![ShellCommand::strict("brew install git")],
            ),
            Tool::Terraform => InstallPlan::after(
                Tool::Homebrew,
                vec![ShellCommand::strict(
                    "brew tap hashicorp/tap && brew install hashicorp/tap/terraform",
                )],
            ),
            Tool::OciCli => InstallPlan::commands(vec![ShellCommand::tolerant(OCI_CLI_INSTALL)]),
        }
    }
}

/// Linux package managers, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinuxPackageManager {
    /// Debian/Ubuntu `apt-get`.
    Apt,
    /// RHEL/CentOS `yum`.
    Yum,
    /// Fedora `dnf`.
    Dnf,
}

impl LinuxPackageManager {
    const PREFERENCE: [Self; 3] = [Self::Apt, Self::Yum, Self::Dnf];

    /// The executable probed to decide whether this manager is present.
    pub fn executable_name(&self) -> &'static str {
        match self {
            Self::Apt => "apt-get",
            Self::Yum => "yum",
            Self::Dnf => "dnf",
        }
    }

    /// The first present manager in preference order.
    pub fn detect(probe: &dyn Probe) -> Option<Self> {
        let found = Self::PREFERENCE
            .into_iter()
            .find(|pm| probe.exists(pm.executable_name()));
        tracing::debug!(manager = ?found, "linux package manager");
        found
    }

    fn git(&self) -> Vec<ShellCommand> {
        match self {
            Self::Apt => vec![
                ShellCommand::strict("sudo apt-get update"),
                ShellCommand::strict("sudo apt-get install -y git"),
            ],
            Self::Yum => vec![ShellCommand::strict("sudo yum install -y git")],
            Self::Dnf => vec![ShellCommand::strict("sudo dnf install -y git")],
        }
    }

    fn terraform(&self) -> Vec<ShellCommand> {
        let lines: &[&str] = match self {
            Self::Apt => &[
                "sudo apt-get update",
                "sudo apt-get install -y gnupg software-properties-common",
                HASHICORP_APT_KEY,
                HASHICORP_APT_SOURCE,
                "sudo apt-get update",
                "sudo apt-get install -y terraform",
            ],
            Self::Yum => &[
                "sudo yum install -y yum-utils",
                "sudo yum-config-manager --add-repo https://rpm.releases.hashicorp.com/RHEL/hashicorp.repo",
                "sudo yum -y install terraform",
            ],
            Self::Dnf => &[
                "sudo dnf install -y dnf-plugins-core",
                "sudo dnf config-manager --add-repo https://rpm.releases.hashicorp.com/fedora/hashicorp.repo",
                "sudo dnf -y install terraform",
            ],
        };
        lines.iter().map(|line| ShellCommand::tolerant(*line)).collect()
    }
}

/// Linux: the first present of apt-get, yum, dnf.
#[derive(Debug)]
pub struct LinuxStrategy;

impl PackageStrategy for LinuxStrategy {
    fn os(&self) -> OsIdentity {
        OsIdentity::Linux
    }

    fn plan(&self, tool: Tool, probe: &dyn Probe) -> InstallPlan {
        match tool {
            Tool::Homebrew => InstallPlan::Unavailable {
                reason: "Homebrew is only installed on macOS".to_string(),
            },
            Tool::OciCli => InstallPlan::commands(vec![ShellCommand::tolerant(OCI_CLI_INSTALL)]),
            Tool::Git | Tool::Terraform => match LinuxPackageManager::detect(probe) {
                Some(pm) if tool == Tool::Git => InstallPlan::commands(pm.git()),
                Some(pm) => InstallPlan::commands(pm.terraform()),
                None => InstallPlan::Unavailable {
                    reason: "no supported package manager found (apt-get, yum, dnf)".to_string(),
                },
            },
        }
    }
}

/// Windows: no automated installs; the operator downloads each tool.
#[derive(Debug)]
pub struct WindowsStrategy;

impl PackageStrategy for WindowsStrategy {
    fn os(&self) -> OsIdentity {
        OsIdentity::Windows
    }

    fn plan(&self, tool: Tool, _probe: &dyn Probe) -> InstallPlan {
        match tool {
            Tool::Homebrew => InstallPlan::Unavailable {
                reason: "Homebrew is only installed on macOS".to_string(),
            },
            Tool::Git | Tool::Terraform | Tool::OciCli => InstallPlan::Manual {
                url: tool.manual_url(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Only(&'static [&'static str]);

    impl Probe for Only {
        fn exists(&self, name: &str) -> bool {
            self.0.contains(&name)
        }
    }

    #[test]
    fn test_strategy_lookup() {
        for os in [OsIdentity::Linux, OsIdentity::MacOs, OsIdentity::Windows] {
            assert_eq!(strategy_for(os).map(|s| s.os()), Some(os));
        }
        assert!(strategy_for(OsIdentity::Unsupported).is_none());
    }

    #[test]
    fn test_macos_plans_need_homebrew() {
        let plan = MacOsStrategy.plan(Tool::Git, &Only(&[]));
        assert_eq!(
            plan,
            InstallPlan::after(Tool::Homebrew, vec![ShellCommand::strict("brew install git")])
        );
        assert_eq!(
            MacOsStrategy.plan(Tool::Terraform, &Only(&[])).command_lines(),
            vec!["brew tap hashicorp/tap && brew install hashicorp/tap/terraform"]
        );
    }

    #[test]
    fn test_homebrew_bootstrap_command() {
        let plan = MacOsStrategy.plan(Tool::Homebrew, &Only(&[]));
        assert_eq!(
            plan.command_lines(),
            vec![r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#]
        );
    }

    #[test]
    fn test_linux_prefers_apt_over_yum_and_dnf() {
        let probe = Only(&["dnf", "yum", "apt-get"]);
        assert_eq!(LinuxPackageManager::detect(&probe), Some(LinuxPackageManager::Apt));
        assert_eq!(
            LinuxStrategy.plan(Tool::Git, &probe).command_lines(),
            vec!["sudo apt-get update", "sudo apt-get install -y git"]
        );
    }

    #[test]
    fn test_linux_yum_before_dnf() {
        let probe = Only(&["dnf", "yum"]);
        assert_eq!(
            LinuxStrategy.plan(Tool::Git, &probe).command_lines(),
            vec!["sudo yum install -y git"]
        );
    }

    #[test]
    fn test_linux_terraform_apt_chain_is_verbatim_and_tolerant() {
        let plan = LinuxStrategy.plan(Tool::Terraform, &Only(&["apt-get"]));
        let InstallPlan::Commands { bootstrap, commands } = plan else {
            panic!("expected a command chain");
        };
        assert!(bootstrap.is_none());
        assert_eq!(commands.len(), 6);
        assert!(commands.iter().all(|c| c.tolerates_failure));
        assert_eq!(
            commands[2].line,
            "wget -O- https://apt.releases.hashicorp.com/gpg | gpg --dearmor | sudo tee /usr/share/keyrings/hashicorp-archive-keyring.gpg"
        );
        assert_eq!(
            commands[3].line,
            r#"echo "deb [signed-by=/usr/share/keyrings/hashicorp-archive-keyring.gpg] https://apt.releases.hashicorp.com $(lsb_release -cs) main" | sudo tee /etc/apt/sources.list.d/hashicorp.list"#
        );
        assert_eq!(commands[5].line, "sudo apt-get install -y terraform");
    }

    #[test]
    fn test_linux_without_package_manager() {
        let plan = LinuxStrategy.plan(Tool::Git, &Only(&[]));
        assert!(matches!(plan, InstallPlan::Unavailable { .. }));
    }

    #[test]
    fn test_oci_cli_uses_installer_script_on_unix() {
        for strategy in [&LinuxStrategy as &dyn PackageStrategy, &MacOsStrategy] {
            let plan = strategy.plan(Tool::OciCli, &Only(&[]));
            let lines = plan.command_lines();
            assert_eq!(lines.len(), 1);
            assert!(lines[0].ends_with("install.sh)\" -- --accept-all-defaults"));
        }
    }

    #[test]
    fn test_windows_is_manual() {
        let plan = WindowsStrategy.plan(Tool::Git, &Only(&[]));
        assert_eq!(
            plan,
            InstallPlan::Manual {
                url: "https://git-scm.com/download/win"
            }
        );
        assert_eq!(
            WindowsStrategy.plan(Tool::Terraform, &Only(&[])),
            InstallPlan::Manual {
                url: "https://www.terraform.io/downloads"
            }
        );
    }

    #[test]
    fn test_every_automated_plan_is_non_empty_and_deterministic() {
        let probe = Only(&["apt-get"]);
        for os in [OsIdentity::Linux, OsIdentity::MacOs, OsIdentity::Windows] {
            let strategy = strategy_for(os).unwrap();
            for tool in [Tool::Git, Tool::Terraform, Tool::OciCli] {
                let first = strategy.plan(tool, &probe);
                assert_eq!(first, strategy.plan(tool, &probe));
                match first {
                    InstallPlan::Commands { commands, .. } => assert!(!commands.is_empty()),
                    InstallPlan::Manual { .. } => assert_eq!(os, OsIdentity::Windows),
                    InstallPlan::Unavailable { reason } => panic!("{:?}/{:?}: {}", os, tool, reason),
                }
            }
        }
    }
}
