//! Command-line interface definition.
//!
//! Positional arguments are collected verbatim rather than validated by clap
//! so that the "exactly one action" rule and its messages live in
//! [`crate::action`], where they can be unit-tested without spawning a
//! process.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name    = "db-orchestrate",
    about   = "Initialise, delete, seed or back up the application database",
    version,
    override_usage = "db-orchestrate [OPTIONS] <init|delete|seed|backup>",
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Action to run: init, delete, seed or backup (case-insensitive).
    ///
    /// Dash-prefixed words that are not known flags land here too, so `-init`
    /// is reported as an invalid action rather than an unknown flag.  Once
    /// the action has started, every later word is collected as well: options
    /// go before the action.
    #[arg(value_name = "ACTION", allow_hyphen_values = true)]
    pub action: Vec<String>,

    /// Path to an optional TOML file with `[database]`, `[scripts]` and
    /// `[backup]` sections.
    ///
    /// `DB_*` environment variables still override whatever the file says.
    #[arg(short, long, default_value = "orchestrate.toml")]
    pub config: PathBuf,

    /// Print the resolved configuration (password redacted) and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("db-orchestrate").chain(extra.iter().copied()))
            .expect("should parse")
    }

    #[test]
    fn collects_single_action() {
        assert_eq!(parse(&["seed"]).action, vec!["seed"]);
    }

    #[test]
    fn collects_every_positional() {
        assert_eq!(parse(&["init", "seed"]).action, vec!["init", "seed"]);
        assert!(parse(&[]).action.is_empty());
    }

    #[test]
    fn config_defaults_to_orchestrate_toml() {
        assert_eq!(parse(&["init"]).config, PathBuf::from("orchestrate.toml"));
    }

    #[test]
    fn config_flag_overrides_path() {
        let cli = parse(&["-c", "/etc/orchestrate.toml", "backup"]);
        assert_eq!(cli.config, PathBuf::from("/etc/orchestrate.toml"));
        assert_eq!(cli.action, vec!["backup"]);
    }

    #[test]
    fn dash_prefixed_word_is_collected_as_action() {
        assert_eq!(parse(&["-init"]).action, vec!["-init"]);
    }

    #[test]
    fn flags_before_action_still_parse() {
        let cli = parse(&["--print-config", "-c", "x.toml", "init"]);
        assert!(cli.print_config);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert_eq!(cli.action, vec!["init"]);
    }

    #[test]
    fn words_after_action_are_collected_as_actions() {
        let cli = parse(&["init", "--print-config"]);
        assert!(!cli.print_config);
        assert_eq!(cli.action, vec!["init", "--print-config"]);
    }
}
