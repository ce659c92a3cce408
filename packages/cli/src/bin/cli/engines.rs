use clap::Subcommand;
use colored::*;
use inquire::{Password, PasswordDisplayMode, Text};
use std::path::PathBuf;

use persona_client::Listing;
use persona_core::{MlEngine, MlEngineDraft, Provider};

use super::utils::{
    client, format_date, new_table, optional, print_field, read_draft, report_create_error,
    select_one, truncate,
};

#[derive(Subcommand)]
pub enum EnginesCommands {
    /// List all ML engines
    List,
    /// Show ML engine details
    Show {
        /// ML engine ID to show
        id: String,
    },
    /// Register a new ML engine
    Create {
        /// Read the engine from a JSON file instead of prompting
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

pub async fn handle_engines_command(command: EnginesCommands) -> anyhow::Result<()> {
    match command {
        EnginesCommands::List => list_engines().await,
        EnginesCommands::Show { id } => show_engine(&id).await,
        EnginesCommands::Create { file } => create_engine(file).await,
    }
}

async fn fetch_engines() -> anyhow::Result<Listing<MlEngine>> {
    let client = client()?;
    let mut engines: Listing<MlEngine> = Listing::new();

    if !engines.refresh(&client).await {
        anyhow::bail!("{}", engines.last_error().unwrap_or("Failed to fetch ML engines"));
    }
    Ok(engines)
}

async fn list_engines() -> anyhow::Result<()> {
    let engines = fetch_engines().await?;

    if engines.items().is_empty() {
        println!("{}", "No ML engines found".yellow());
        println!("{}", "Use 'persona engines create' to register your first engine".dimmed());
        return Ok(());
    }

    println!("{}", "🧠 ML Engines".blue().bold());
    println!();

    let mut table = new_table(vec!["ID", "Name", "Provider", "Model", "Created"]);

    for engine in engines.items() {
        table.add_row(vec![
            engine.id.clone(),
            truncate(&engine.name, 25),
            engine.provider.label().to_string(),
            engine.model_version.clone().unwrap_or_else(|| "—".to_string()),
            format_date(engine.created_at.as_deref()),
        ]);
    }

    println!("{}", table);
    println!("Total: {} engines", engines.items().len().to_string().cyan());

    Ok(())
}

async fn show_engine(id: &str) -> anyhow::Result<()> {
    let engines = fetch_engines().await?;

    let Some(engine) = engines.items().iter().find(|e| e.id == id) else {
        eprintln!("{}", format!("ML engine with ID '{}' not found", id).red());
        anyhow::bail!("ML engine not found");
    };

    println!("{}", format!("🧠 ML Engine Details - {}", engine.name).blue().bold());
    println!();

    print_field("ID", &engine.id);
    print_field("Name", &engine.name);
    print_field("Provider", engine.provider.label());
    if let Some(model) = &engine.model_version {
        print_field("Model", model);
    }
    if let Some(description) = &engine.description {
        print_field("Description", description);
    }
    print_field("Created", format_date(engine.created_at.as_deref()));

    Ok(())
}

async fn create_engine(file: Option<PathBuf>) -> anyhow::Result<()> {
    let client = client()?;

    let draft = match file {
        Some(path) => read_draft::<MlEngineDraft>(&path)?,
        None => prompt_engine()?,
    };

    let mut engines: Listing<MlEngine> = Listing::new();
    match engines.create(&client, &draft).await {
        Ok(engine) => {
            println!();
            println!(
                "{}",
                format!("✅ ML engine '{}' registered successfully!", engine.name).green()
            );
            println!("ID: {}", engine.id.cyan());
            Ok(())
        }
        Err(e) => Err(report_create_error("ML engine", e)),
    }
}

fn prompt_engine() -> anyhow::Result<MlEngineDraft> {
    println!("{}", "➕ Register New ML Engine".blue().bold());
    println!();

    let name = Text::new("Engine name:").prompt()?;
    let provider = select_one("Provider:", Provider::ALL, Provider::label, None)?;
    let api_key = Password::new("API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    let model_version = optional(Text::new("Model version (optional):").prompt()?);
    let description = optional(Text::new("Description (optional):").prompt()?);

    Ok(MlEngineDraft {
        name,
        provider: Some(provider.as_str().to_string()),
        api_key,
        model_version,
        description,
    })
}
