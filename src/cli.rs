//! Command-line front end: flag parsing, validation and output.

use anyhow::{Result, bail};
use clap::Parser;
use redpower::{ActionOutcome, BuildInfo, RedfishError, RedpowerClient, TlsMode};
use std::io::Write;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "redpower",
    about = "Query and change server power state through the BMC's Redfish API",
    disable_version_flag = true,
    arg_required_else_help = true,
    after_help = r#"Examples:
  redpower --host bmc01.example.com --user root --pass calvin --get
  redpower --host 10.0.0.5:8443 --user root --insecure --list
  redpower --host bmc01.example.com --user root --action ForceOff
  redpower --host bmc01.example.com --user root --action On --ignore --quiet"#
)]
pub struct Cli {
    /// Get current power state
    #[arg(long, group = "operation")]
    pub get: bool,

    /// List supported power actions
    #[arg(long, group = "operation")]
    pub list: bool,

    /// Power action to perform (one of the values printed by --list)
    #[arg(long, group = "operation", value_name = "ACTION")]
    pub action: Option<String>,

    /// BMC address and optional port (host or host:port)
    #[arg(long, env = "REDPOWER_HOST")]
    pub host: Option<String>,

    /// BMC username
    #[arg(long, env = "REDPOWER_USER")]
    pub user: Option<String>,

    /// BMC password
    #[arg(long, env = "REDPOWER_PASS", hide_env_values = true)]
    pub pass: Option<String>,

    /// Do not verify the host certificate
    #[arg(long)]
    pub insecure: bool,

    /// Print HTTP response bodies of failed requests and debug logs
    #[arg(long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Do not output any messages except errors
    #[arg(long)]
    pub quiet: bool,

    /// Print program version and quit
    #[arg(long)]
    pub version: bool,

    /// Ignore conflicts (like powering on a server which is already on)
    #[arg(long)]
    pub ignore: bool,

    /// Timeout of each HTTP request, in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

/// What the invocation asks the BMC for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetPowerState,
    ListActions,
    PerformAction(String),
}

/// Validated settings for one run against a BMC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub host: String,
    pub user: String,
    pub pass: String,
    pub tls_mode: TlsMode,
    pub timeout: Duration,
    pub quiet: bool,
    pub ignore_conflict: bool,
    pub operation: Operation,
}

/// Parsed command line after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PrintVersion,
    Run(Invocation),
}

impl Cli {
    /// Checks the flag combination and settles on a single command.
    pub fn into_command(self) -> Result<Command> {
        if self.version {
            return Ok(Command::PrintVersion);
        }

        let Some(host) = self.host.filter(|h| !h.is_empty()) else {
            bail!("missing --host argument");
        };
        let Some(user) = self.user.filter(|u| !u.is_empty()) else {
            bail!("missing --user name");
        };
        let Some(pass) = self.pass.filter(|p| !p.is_empty()) else {
            bail!("missing --pass password");
        };

        let operation = match (self.get, self.list, self.action) {
            (true, false, None) => Operation::GetPowerState,
            (false, true, None) => Operation::ListActions,
            (false, false, Some(action)) if !action.is_empty() => {
                Operation::PerformAction(action)
            }
            (false, false, _) => bail!("missing --action, --get or --list argument"),
            _ => bail!("arguments --action, --get and --list cannot be used at the same time"),
        };

        Ok(Command::Run(Invocation {
            host,
            user,
            pass,
            tls_mode: TlsMode::from_insecure(self.insecure),
            timeout: Duration::from_secs(self.timeout),
            quiet: self.quiet,
            ignore_conflict: self.ignore,
            operation,
        }))
    }
}

/// Runs a parsed command line, writing results to `out`.
pub async fn run(cli: Cli, build: &BuildInfo, out: &mut impl Write) -> Result<()> {
    let invocation = match cli.into_command()? {
        Command::PrintVersion => {
            writeln!(out, "{}", build)?;
            return Ok(());
        }
        Command::Run(invocation) => invocation,
    };

    let client = RedpowerClient::builder()
        .host(invocation.host.as_str())
        .credentials(invocation.user.as_str(), invocation.pass.as_str())
        .tls_mode(invocation.tls_mode)
        .timeout(invocation.timeout)
        .build()?;

    execute(&client, &invocation, out).await
}

/// Performs the requested operation against an already configured client.
pub async fn execute(
    client: &RedpowerClient,
    invocation: &Invocation,
    out: &mut impl Write,
) -> Result<()> {
    match &invocation.operation {
        Operation::GetPowerState => {
            let state = client.power_state().await?;
            write_power_state(out, invocation, &state)?;
        }
        Operation::ListActions => {
            let actions = client.allowed_actions().await?;
            write_actions(out, invocation, &actions)?;
        }
        Operation::PerformAction(action) => {
            // Announce only once the system has been found.
            let system = client.system().await?;
            if !invocation.quiet {
                writeln!(
                    out,
                    "performing {} action on host {} ...",
                    action, invocation.host
                )?;
            }
            let outcome = client
                .submit_reset(&system, action, invocation.ignore_conflict)
                .await?
                .into_result()?;
            write_outcome(out, invocation, &outcome)?;
        }
    }
    Ok(())
}

pub fn write_power_state(out: &mut impl Write, invocation: &Invocation, state: &str) -> Result<()> {
    if !invocation.quiet {
        write!(out, "host: {} power state: ", invocation.host)?;
    }
    writeln!(out, "{}", state)?;
    Ok(())
}

pub fn write_actions(out: &mut impl Write, invocation: &Invocation, actions: &[String]) -> Result<()> {
    if !invocation.quiet {
        writeln!(out, "host: {} allowed power actions:", invocation.host)?;
    }
    for action in actions {
        writeln!(out, "{}", action)?;
    }
    Ok(())
}

pub fn write_outcome(
    out: &mut impl Write,
    invocation: &Invocation,
    outcome: &ActionOutcome,
) -> Result<()> {
    if invocation.quiet {
        return Ok(());
    }
    match outcome {
        ActionOutcome::Applied => writeln!(out, "OK")?,
        ActionOutcome::AppliedIgnoredConflict => writeln!(out, "OK (ignored conflict)")?,
        ActionOutcome::Failed(_) => {}
    }
    Ok(())
}

/// Writes the status and raw body carried by a Redfish error, if any.
pub fn write_debug_details(err: &anyhow::Error, out: &mut impl Write) -> std::io::Result<()> {
    let Some(err) = err.downcast_ref::<RedfishError>() else {
        return Ok(());
    };
    if let Some(status) = err.status() {
        writeln!(out, "response status code: {}", status)?;
    }
    if let Some(body) = err.response_body() {
        writeln!(out, "Response body:")?;
        writeln!(out, "{}", body)?;
    }
    Ok(())
}
