use chrono::Local;
use serde_json::Value;
use tracing::info;

use crate::app::{field_text, fund_entries, App, View};
use crate::cli::args::{
    AddFundArgs, ChatArgs, ConfigAction, ConfigArgs, EstimateArgs, InitArgs, OutputFormat,
    RecordArgs, ViewArgs,
};
use crate::config::loader::get_config_path;
use crate::config::FundtrackConfig;
use crate::error::{FundtrackError, Result};
use crate::funds::{NewFund, TransactionRecord};

// ============================================================================
// Fund Commands
// ============================================================================

/// List every tracked fund
pub async fn funds(app: &App, format: OutputFormat) -> Result<()> {
    let funds = app.funds().get_funds().await?;
    output_view(&View::Collection { funds }, format)
}

pub async fn estimate(args: EstimateArgs, app: &App, format: OutputFormat) -> Result<()> {
    info!(code = %args.code, "Fetching estimate");

    let estimate = app.funds().get_fund_estimate(&args.code).await?;
    output_value(&estimate, format)
}

pub async fn add_fund(args: AddFundArgs, app: &App, format: OutputFormat) -> Result<()> {
    let mut fund = NewFund::new(args.code, args.name);
    fund.extra.extend(args.fields);
    fund.validate()?;

    info!(code = %fund.code, name = %fund.name, "Adding fund");
    let created = app.funds().add_fund(&fund).await?;

    match format {
        OutputFormat::Text => println!("Added fund {} {}", fund.code, fund.name),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
    }
    Ok(())
}

/// Record a buy or sell transaction
pub async fn record(args: RecordArgs, app: &App, format: OutputFormat) -> Result<()> {
    let record = TransactionRecord {
        kind: args.kind,
        amount: args.amount,
        date: Some(
            args.date
                .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
        ),
        note: args.note,
    };
    record.validate()?;

    info!(code = %args.code, kind = ?record.kind, amount = record.amount, "Adding record");
    let created = app.funds().add_fund_record(&args.code, &record).await?;

    match format {
        OutputFormat::Text => println!(
            "Recorded {:?} of {} for {} on {}",
            record.kind,
            record.amount,
            args.code,
            record.date.as_deref().unwrap_or("-")
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
    }
    Ok(())
}

pub async fn view(args: ViewArgs, app: &App, format: OutputFormat) -> Result<()> {
    let view = app.open(&args.path).await?;
    output_view(&view, format)
}

// ============================================================================
// AI Commands
// ============================================================================

/// Ask the assistant one question
pub async fn chat(args: ChatArgs, app: &App, format: OutputFormat) -> Result<()> {
    let provider = args
        .provider
        .unwrap_or_else(|| app.config().ai.default_provider.to_string());

    let reply = app.gateway().chat(&provider, &args.message).await?;

    match format {
        OutputFormat::Text => println!("{}", reply),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "provider": provider.to_uppercase(),
                    "reply": reply,
                })
            );
        }
    }
    Ok(())
}

pub async fn providers(app: &App, format: OutputFormat) -> Result<()> {
    let registry = app.gateway().registry();

    match format {
        OutputFormat::Text => {
            println!("{:<10} {:<10} {:<16} {:<32} KEY", "ID", "NAME", "MODEL", "BASE URL");
            println!("{}", "-".repeat(76));
            for provider in registry.iter() {
                let key = if provider.api_key.is_some() { "set" } else { "missing" };
                println!(
                    "{:<10} {:<10} {:<16} {:<32} {}",
                    provider.id, provider.display_name, provider.model, provider.base_url, key
                );
            }
        }
        OutputFormat::Json => {
            let json_providers: Vec<_> = registry
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "id": p.id,
                        "name": p.display_name,
                        "model": p.model,
                        "base_url": p.base_url,
                        "api_key_set": p.api_key.is_some(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json_providers)?);
        }
    }
    Ok(())
}

// ============================================================================
// Config Commands
// ============================================================================

pub async fn init(args: InitArgs) -> Result<()> {
    let config_path = get_config_path();

    if config_path.exists() && !args.force {
        println!("Configuration already exists at: {}", config_path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    // Create parent directories if needed
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let default_config = FundtrackConfig::default();
    let toml_str = toml::to_string_pretty(&default_config)
        .map_err(|e| FundtrackError::Config(e.to_string()))?;

    std::fs::write(&config_path, toml_str)?;

    println!("Created configuration at: {}", config_path.display());
    println!("\nAPI keys are read from the environment:");
    println!("  export {}=sk-...", default_config.ai.openai.api_key_env);
    println!("  export {}=sk-...", default_config.ai.deepseek.api_key_env);
    println!("\nQuick start:");
    println!("  fundtrack funds");
    println!("  fundtrack record 000001 --type buy --amount 1000");
    println!("  fundtrack chat \"现在适合加仓指数基金吗？\"");

    Ok(())
}

pub async fn config(args: ConfigArgs, config: &FundtrackConfig) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(config)
                .map_err(|e| FundtrackError::Config(e.to_string()))?;
            println!("{}", toml_str);
        }
        ConfigAction::Path => {
            println!("{}", get_config_path().display());
        }
    }
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn output_view(view: &View, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        let json = match view {
            View::Collection { funds } => funds.clone(),
            View::Detail {
                name,
                code,
                estimate,
            } => serde_json::json!({
                "name": name,
                "code": code,
                "estimate": estimate,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    match view {
        View::Collection { funds } => {
            let entries = fund_entries(funds);
            if entries.is_empty() {
                println!("No tracked funds");
                return Ok(());
            }
            println!("{:<8} NAME", "CODE");
            println!("{}", "-".repeat(40));
            for entry in entries {
                println!(
                    "{:<8} {}",
                    field_text(entry, "code").unwrap_or_else(|| "-".to_string()),
                    field_text(entry, "name").unwrap_or_else(|| "-".to_string())
                );
            }
        }
        View::Detail {
            name,
            code,
            estimate,
        } => {
            println!("{} ({})", name, code);
            print_fields(estimate);
        }
    }
    Ok(())
}

fn output_value(value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_fields(value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn print_fields(value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map {
                match field {
                    Value::String(s) => println!("  {:<12} {}", key, s),
                    other => println!("  {:<12} {}", key, other),
                }
            }
        }
        other => println!("{}", other),
    }
}
