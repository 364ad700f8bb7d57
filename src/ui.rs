//! Terminal UI: spinners, status lines, and captured command output.
//!
//! # Design goals
//!
//! - **Clean by default.** While an operation runs the user sees only a spinner and a short label.
//!   The dump utility's verbose chatter is captured and hidden.
//! - **Informative on failure.** If the dump exits non-zero its captured stdout *and* stderr are
//!   replayed in full so the operator can diagnose the problem without re-running manually.
//! - **Quiet when piped.** indicatif hides the spinner and console drops colours when the stream is
//!   not a terminal, so scripted runs get plain status lines.

use std::{
    future::Future,
    process::{Command, Output, Stdio},
    time::Duration,
};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

// ─── Icons ───────────────────────────────────────────────────────────────────

/// Braille spinner frames — same style as indicatif's default.
static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}
fn icon_info() -> console::StyledObject<&'static str> {
    style("►").cyan()
}

// ─── Status lines ─────────────────────────────────────────────────────────────

/// `✓ <msg>` on stdout.
pub fn success(msg: &str) {
    println!("  {}  {}", icon_ok(), style(msg).bold());
}

/// `► <msg>` on stdout, for progress notes such as the backup target.
pub fn info(msg: &str) {
    println!("  {}  {}", icon_info(), msg);
}

/// `✗ <msg>` on stderr.
pub fn failure(msg: &str) {
    eprintln!("  {}  {}", icon_err(), style(msg).red().bold());
}

// ─── Stage result ─────────────────────────────────────────────────────────────

/// The outcome of running one external command.
///
/// Carries whatever the command wrote to stdout/stderr so it can be replayed
/// to the terminal when something goes wrong.
#[derive(Debug)]
pub struct StageOutcome {
    /// Human-readable stage label, e.g. `"Backup"`.
    pub label: String,
    /// Whether the command exited zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// Why the stage failed, if it did.
    pub error: Option<String>,
}

impl StageOutcome {
    /// Replay captured stdout/stderr to stderr.
    ///
    /// Called on failure so the operator sees what the command said.
    pub fn replay(&self) {
        if !self.stdout.is_empty() {
            eprintln!();
            eprintln!("  {} {} stdout:", style("►").dim(), self.label);
            for line in self.stdout.lines() {
                eprintln!("    {line}");
            }
        }
        if !self.stderr.is_empty() {
            eprintln!();
            eprintln!("  {} {} stderr:", style("►").dim(), self.label);
            for line in self.stderr.lines() {
                eprintln!("    {line}");
            }
        }
    }

    /// Returns `true` if the stage did not succeed.
    pub const fn failed(&self) -> bool {
        !self.success
    }
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

/// Create and start an indeterminate spinner for `label`.
///
/// The spinner ticks at ~80 ms on its own thread, so it keeps animating while
/// the caller blocks on a child process or awaits a database round-trip.
fn make_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::with_template("  {spinner:.cyan}  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS);
    pb.set_style(spinner_style);
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Await `fut` behind a spinner labelled `label`.
///
/// The spinner is cleared before returning, whatever the result.
pub async fn with_spinner<F: Future>(label: &str, fut: F) -> F::Output {
    let spinner = make_spinner(label);
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

// ─── Captured execution ───────────────────────────────────────────────────────

/// Run a command with extra environment variables, capturing both stdout and
/// stderr.
///
/// Output is buffered rather than inherited so the spinner can own the
/// terminal while the command runs.
///
/// Returns `(exit_status_text, stdout_text, stderr_text)` where the first
/// element is `None` on success.
pub fn run_captured(
    args: &[String],
    envs: &[(String, String)],
) -> Result<(Option<String>, String, String)> {
    let (prog, rest) = args.split_first().context("cannot run an empty command")?;

    let output: Output = Command::new(prog)
        .args(rest)
        .envs(envs.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("failed to spawn {prog}"))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    let failure = (!output.status.success()).then(|| format!("{prog} exited with {}", output.status));
    Ok((failure, stdout, stderr))
}

// ─── High-level stage runner ──────────────────────────────────────────────────

/// Run an external command behind a spinner, returning a [`StageOutcome`].
///
/// Spawn failures and non-zero exits both produce a failed outcome; this
/// function never panics or returns early.
pub fn run_stage(label: &str, args: &[String], envs: &[(String, String)]) -> StageOutcome {
    let spinner = make_spinner(label);

    let result = run_captured(args, envs);
    spinner.finish_and_clear();

    match result {
        Ok((None, stdout, stderr)) => StageOutcome {
            label: label.to_string(),
            success: true,
            stdout,
            stderr,
            error: None,
        },
        Ok((Some(status), stdout, stderr)) => StageOutcome {
            label: label.to_string(),
            success: false,
            stdout,
            stderr,
            error: Some(status),
        },
        Err(e) => StageOutcome {
            label: label.to_string(),
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(format!("{e:#}")),
        },
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
