use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::funds::RecordKind;

#[derive(Parser, Debug)]
#[clap(name = "fundtrack")]
#[clap(version, about = "Track mutual-fund holdings and ask an AI investment assistant")]
#[clap(propagate_version = true)]
pub struct Cli {
    #[clap(flatten)]
    pub global_opts: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path
    #[clap(short, long, global = true, env = "FUNDTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fund backend origin (overrides the config file)
    #[clap(long, global = true, env = "FUNDTRACK_API_BASE")]
    pub api_base: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[clap(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every tracked fund
    Funds,

    /// Show the live estimated valuation of a fund
    Estimate(EstimateArgs),

    /// Start tracking a fund
    AddFund(AddFundArgs),

    /// Record a buy or sell transaction
    Record(RecordArgs),

    /// Ask the AI investment assistant a question
    Chat(ChatArgs),

    /// Open a view by path ("/" or "/fund/<name>")
    View(ViewArgs),

    /// List the configured AI providers
    Providers,

    /// Initialize a new fundtrack configuration
    Init(InitArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ============================================================================
// Fund Commands
// ============================================================================

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Fund code
    pub code: String,
}

#[derive(Args, Debug)]
pub struct AddFundArgs {
    /// Six-digit fund code
    #[clap(long)]
    pub code: String,

    /// Fund name
    #[clap(long)]
    pub name: String,

    /// Extra fields to send with the fund (KEY=VALUE, VALUE parsed as JSON when possible)
    #[clap(long = "set", short = 's', value_parser = parse_field)]
    pub fields: Vec<(String, serde_json::Value)>,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Fund code
    pub code: String,

    /// Transaction type
    #[clap(long = "type", short = 't', value_enum)]
    pub kind: RecordKind,

    /// Transaction amount
    #[clap(long, short = 'a')]
    pub amount: f64,

    /// Transaction date (YYYY-MM-DD, defaults to today)
    #[clap(long)]
    pub date: Option<String>,

    /// Free-form note
    #[clap(long)]
    pub note: Option<String>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// View path
    #[clap(default_value = "/")]
    pub path: String,
}

// ============================================================================
// Chat Command
// ============================================================================

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// The question to ask
    pub message: String,

    /// AI provider to use (OPENAI, DEEPSEEK); defaults to the configured one
    #[clap(short, long)]
    pub provider: Option<String>,
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[clap(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
}

// ============================================================================
// Common Types
// ============================================================================

fn parse_field(s: &str) -> Result<(String, serde_json::Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| "Field format: KEY=VALUE".to_string())?;
    let value = serde_json::from_str(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[derive(Debug, Clone, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("shares=12.5").unwrap(), ("shares".to_string(), json!(12.5)));
        assert_eq!(
            parse_field("tag=core holding").unwrap(),
            ("tag".to_string(), json!("core holding"))
        );
        assert!(parse_field("novalue").is_err());
    }

    #[test]
    fn test_record_args() {
        let cli = Cli::try_parse_from([
            "fundtrack", "record", "000001", "--type", "buy", "--amount", "100",
        ])
        .unwrap();
        match cli.command {
            Commands::Record(args) => {
                assert_eq!(args.code, "000001");
                assert_eq!(args.kind, RecordKind::Buy);
                assert_eq!(args.amount, 100.0);
                assert!(args.date.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
