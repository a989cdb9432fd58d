use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mindflow::default_registry;

#[derive(Parser)]
#[command(name = "mindflow", version, about = "Mindflow CLI", author)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Flows {
        #[command(subcommand)]
        command: FlowCommand,
    },
    Schema {
        #[command(subcommand)]
        command: SchemaCommand,
    },
}

#[derive(Subcommand)]
enum FlowCommand {
    List,
}

#[derive(Subcommand)]
enum SchemaCommand {
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Flows { command } => match command {
            FlowCommand::List => handle_flows_list(),
        },
        Command::Schema { command } => match command {
            SchemaCommand::Export { output, pretty } => handle_schema_export(output, pretty)?,
        },
    }
    Ok(())
}

fn handle_flows_list() {
    let registry = default_registry();
    println!("{:<24} {}", "Name", "Media input");
    for entry in registry.catalog() {
        let media = if entry.name.contains("audio") || entry.name.contains("voice") {
            "audio data URI"
        } else {
            "-"
        };
        println!("{:<24} {}", entry.name, media);
    }
}

fn handle_schema_export(output: Option<PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let catalog = default_registry().catalog();

    let content = if pretty {
        serde_json::to_string_pretty(&catalog)?
    } else {
        serde_json::to_string(&catalog)?
    };

    if let Some(path) = output {
        fs::write(&path, content)?;
        println!("Schema exported to `{}`", path.display());
    } else {
        println!("{content}");
    }
    Ok(())
}
