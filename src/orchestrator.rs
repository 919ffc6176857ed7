//! The top-level setup sequence.
//!
//! detect OS → Homebrew (macOS only) → Git → Terraform → OCI CLI → choose
//! location → fetch toolkit → toolkit dependencies → layout check →
//! configure OCI CLI → verify → next steps.
//!
//! Individual step failures never stop the sequence; only an unsupported
//! OS, an operator interrupt or a console failure do.

use crate::cloud_config::{configure_oci_cli, OciConfigStatus};
use crate::{
    location, run_steps, toolkit, verify, Console, InstallLocation, InstallStep, OsIdentity, Probe,
    RunContext, SetupError, SetupOptions, Shell, StepProgress, StepReport, Tool,
    VerificationReport,
};
use std::io::{BufRead, Write};

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The OS the run executed on.
    pub os: OsIdentity,
    /// Where the toolkit checkout lives.
    pub location: InstallLocation,
    /// One report per installer step, in execution order.
    pub steps: Vec<StepReport>,
    /// Whether the clone or update succeeded.
    pub fetched: bool,
    /// Whether every pip invocation for the toolkit succeeded.
    pub dependencies_installed: bool,
    /// What the OCI configuration step did.
    pub oci_config: OciConfigStatus,
    /// The final verification table.
    pub verification: VerificationReport,
}

impl RunSummary {
    /// Required steps that failed.
    pub fn needs_attention(&self) -> Vec<&StepReport> {
        self.steps.iter().filter(|s| s.needs_attention()).collect()
    }
}

/// The fixed installer step list for an OS.
pub fn install_steps(os: OsIdentity) -> Vec<InstallStep> {
    let mut steps = Vec::new();
    if os == OsIdentity::MacOs {
        steps.push(InstallStep::optional(Tool::Homebrew));
    }
    steps.extend([Tool::Git, Tool::Terraform, Tool::OciCli].map(InstallStep::required));
    steps
}

/// Runs the whole setup against a host and an operator console.
///
/// # Example
///
/// ```rust,no_run
/// use cd3_setup::{Console, Orchestrator, SetupOptions, SystemHost};
/// use std::io::{self, BufReader};
///
/// #[tokio::main]
/// async fn main() {
///     let options = SetupOptions::default();
///     let host = SystemHost::new(options.os(), options.home_dir.clone());
///     let console = Console::new(BufReader::new(io::stdin()), io::stdout());
///
///     let mut orchestrator = Orchestrator::new(options, host, console);
///     match orchestrator.run().await {
///         Ok(summary) => println!("{}", summary.verification),
///         Err(e) => eprintln!("{}: {}", e, e.fix_suggestion()),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Orchestrator<H, R, W> {
    options: SetupOptions,
    host: H,
    console: Console<R, W>,
}

impl<H, R, W> Orchestrator<H, R, W>
where
    H: Shell + Probe,
    R: BufRead + Send,
    W: Write + Send,
{
    /// Create an orchestrator.
    pub fn new(options: SetupOptions, host: H, console: Console<R, W>) -> Self {
        Self {
            options,
            host,
            console,
        }
    }

    /// The host commands run against.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Consume the orchestrator, returning the host and console.
    pub fn into_parts(self) -> (H, Console<R, W>) {
        (self.host, self.console)
    }

    /// Run the full sequence.
    pub async fn run(&mut self) -> Result<RunSummary, SetupError> {
        print_header("Detecting Operating System");
        println!("OS Type: {}", self.options.system_name());

        let ctx = match RunContext::resolve(&self.options, &self.host) {
            Ok(ctx) => ctx,
            Err(e) => {
                println!("{}", e);
                return Err(e);
            }
        };
        println!("Detected: {}", ctx.os.display_name());
        println!("Python: {}", ctx.python);
        tracing::info!(os = ctx.os.display_name(), python = %ctx.python, "run context resolved");

        let steps = run_steps(
            &install_steps(ctx.os),
            &ctx,
            &self.host,
            &self.host,
            print_progress,
        )
        .await;

        print_header("Choose Installation Location");
        let location = location::choose(&ctx, &mut self.console)?;

        print_header("Downloading CD3 Toolkit");
        let fetched = toolkit::fetch(&ctx, &location, &self.host).await;

        print_header("Installing CD3 Toolkit Dependencies");
        let dependencies_installed = toolkit::install_dependencies(&ctx, &location, &self.host).await;

        print_header("Setting up CD3 Environment");
        toolkit::inspect_layout(&location);

        print_header("OCI CLI Configuration");
        let oci_config = configure_oci_cli(&ctx, &self.host, &mut self.console).await?;

        print_header("Verifying Installation");
        let verification = verify::verify(&ctx, &self.host).await;

        let summary = RunSummary {
            os: ctx.os,
            location,
            steps,
            fetched,
            dependencies_installed,
            oci_config,
            verification,
        };
        print_summary(&summary);
        print_next_steps(&summary.location);
        print_header("Setup Complete!");
        println!("CD3 toolkit is ready to use!");
        Ok(summary)
    }
}

fn print_header(message: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", message);
    println!("{}\n", "=".repeat(60));
}

fn print_progress(progress: StepProgress) {
    match progress {
        StepProgress::Probing { tool } => {
            print_header(&format!("Installing {}", tool.display_name()))
        }
        StepProgress::AlreadySatisfied { tool } => {
            println!("✓ {} already installed", tool.display_name())
        }
        StepProgress::Installing { tool } => println!("Installing {}...", tool.display_name()),
        StepProgress::Completed { tool } => {
            println!("✓ {} installed successfully", tool.display_name())
        }
        StepProgress::Failed { tool, reason } => {
            println!("✗ {} was not installed: {}", tool.display_name(), reason)
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!("\n{}", summary.verification);
    println!("CD3 Toolkit Location: {}", summary.location);

    let attention = summary.needs_attention();
    if !attention.is_empty() {
        println!("\nSteps needing attention:");
        for report in attention {
            println!(
                "  - {}: install manually from {}",
                report.step.tool.display_name(),
                report.step.tool.manual_url()
            );
        }
    }
}

fn print_next_steps(location: &InstallLocation) {
    print_header("Next Steps");
    println!(
        "\
1. Configure OCI CLI (if not done):
   oci setup config

2. Navigate to CD3 toolkit directory:
   cd {location}

3. Review the documentation:
   cat README.md

4. Set up your Excel template:
   - Download the CD3 Excel template
   - Fill in your infrastructure details

5. Run CD3 toolkit:
   cd {location}
   python setUpOCI.py

6. For more information, visit:
   https://github.com/oracle-devrel/cd3-automation-toolkit

Note: Make sure you have:
- OCI account credentials
- Appropriate IAM permissions
- OCI tenancy OCID
- User OCID
- API key pair"
    );
}
