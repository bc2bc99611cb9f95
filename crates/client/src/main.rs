//! campsync CLI entry point.

use std::path::Path;

use anyhow::Context;
use campsync_client::cli::conflicts::ConflictsAction;
use campsync_client::cli::entities::EntitiesAction;
use campsync_client::cli::recurrence::RecurrenceAction;
use campsync_client::cli::{Cli, Commands, OutputFormat};
use campsync_client::output::{format_output, pretty};
use campsync_client::client::account::AccessSummary;
use campsync_client::{CampsyncClient, ClientConfig};
use campsync_core::conflicts::{can_assign_staff, detect_conflicts, Schedule};
use campsync_core::recurrence::{describe, generate_dates, validate};
use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn parse_json(data: &str) -> anyhow::Result<Value> {
    serde_json::from_str(data).context("--data must be valid JSON")
}

fn load_schedule(path: &Path) -> anyhow::Result<Schedule> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("{} is not a valid schedule", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campsync=info,campsync_client=info,campsync_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env();
    config.base_url = cli.base_url.trim_end_matches('/').to_string();
    config.token = cli.token.clone().filter(|token| !token.is_empty());
    let client = CampsyncClient::new(config)?;

    match cli.command {
        Commands::Entities(entities_cmd) => match entities_cmd.action {
            EntitiesAction::List {
                entity,
                camp,
                query,
                repeat,
            } => {
                let mut items = Value::Null;
                for _ in 0..repeat.max(1) {
                    items = client.list(&camp, &entity, &query).await?;
                }
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&items, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_entities(&entity, &items)),
                }
            }
            EntitiesAction::Get { entity, id, camp } => {
                let item = client.get(&camp, &entity, &id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_entity(&item)),
                }
            }
            EntitiesAction::Create { entity, camp, data } => {
                let item = client.create(&camp, &entity, &parse_json(&data)?).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_entity(&item))
                    }
                }
            }
            EntitiesAction::Update {
                entity,
                id,
                camp,
                data,
            } => {
                let item = client
                    .update(&camp, &entity, &id, &parse_json(&data)?)
                    .await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Updated:\n{}", pretty::format_entity(&item))
                    }
                }
            }
            EntitiesAction::Delete { entity, id, camp } => {
                client.delete(&camp, &entity, &id).await?;
                if !cli.quiet {
                    println!("Deleted {} {}", entity, id);
                }
            }
        },
        Commands::Recurrence(recurrence_cmd) => match recurrence_cmd.action {
            RecurrenceAction::Preview { start, rule } => {
                let max = rule.max;
                let rule = rule.to_rule();
                let validation = validate(&rule);
                if let Some(error) = validation.error {
                    anyhow::bail!("Invalid recurrence rule: {}", error);
                }
                let dates = generate_dates(start, &rule, max)?;
                let description = describe(&rule);
                match cli.format {
                    OutputFormat::Json => println!(
                        "{}",
                        format_output(
                            &json!({ "description": description, "dates": dates }),
                            cli.format
                        )
                    ),
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_dates(&description, &dates))
                    }
                }
            }
            RecurrenceAction::Create {
                camp,
                name,
                start,
                end,
                data,
                rule,
            } => {
                let mut template = match data {
                    Some(data) => parse_json(&data)?,
                    None => json!({}),
                };
                if let Some(fields) = template.as_object_mut() {
                    fields.insert("name".to_string(), Value::String(name));
                }
                let created = client
                    .create_recurring_events(&camp, &template, start, end, &rule.to_rule(), rule.max)
                    .await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&created, cli.format)),
                    OutputFormat::Pretty => {
                        println!(
                            "Created {} occurrences ({})",
                            created.len(),
                            describe(&rule.to_rule())
                        );
                        if !cli.quiet {
                            println!("{}", pretty::format_entities("events", &Value::Array(created)));
                        }
                    }
                }
            }
        },
        Commands::Conflicts(conflicts_cmd) => match conflicts_cmd.action {
            ConflictsAction::Check { file } => {
                let conflicts = detect_conflicts(&load_schedule(&file)?);
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&conflicts, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_conflicts(&conflicts)),
                }
            }
            ConflictsAction::Staff {
                file,
                staff,
                start,
                end,
                exclude,
            } => {
                let schedule = load_schedule(&file)?;
                let availability =
                    can_assign_staff(&schedule, &staff, start, end, exclude.as_deref());
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&availability, cli.format)),
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_staff_availability(&staff, &availability))
                    }
                }
            }
        },
        Commands::Whoami { camp } => {
            let principal = client.current_principal().await?;
            let summary = AccessSummary::new(principal, camp.as_deref());
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&summary, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_access(&summary)),
            }
        }
    }

    if cli.cache_stats {
        let stats = client.cache_stats().await;
        match cli.format {
            OutputFormat::Json => eprintln!("{}", format_output(&stats, cli.format)),
            OutputFormat::Pretty => eprintln!("{}", pretty::format_cache_stats(&stats)),
        }
    }

    Ok(())
}
