use clap::Subcommand;
use colored::*;
use inquire::{CustomType, Select, Text};
use std::fmt;
use std::path::PathBuf;

use persona_client::{Listing, PersonaClient};
use persona_core::{
    Agent, AgentDraft, CommunicationPreference, EducationLevel, Gender, MlEngine,
    PurchaseFrequency,
};

use super::utils::{
    client, format_date, join_or_dash, new_table, non_empty, optional, print_field, prompt_tags,
    read_draft, report_create_error, select_many, select_one, truncate,
};

#[derive(Subcommand)]
pub enum AgentsCommands {
    /// List all agents
    List,
    /// Show agent details
    Show {
        /// Agent ID to show
        id: String,
    },
    /// Create a new agent
    Create {
        /// Read the agent from a JSON file instead of prompting
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

pub async fn handle_agents_command(command: AgentsCommands) -> anyhow::Result<()> {
    match command {
        AgentsCommands::List => list_agents().await,
        AgentsCommands::Show { id } => show_agent(&id).await,
        AgentsCommands::Create { file } => create_agent(file).await,
    }
}

async fn list_agents() -> anyhow::Result<()> {
    let client = client()?;
    let mut agents: Listing<Agent> = Listing::new();

    if !agents.refresh(&client).await {
        anyhow::bail!("{}", agents.last_error().unwrap_or("Failed to fetch agents"));
    }

    if agents.items().is_empty() {
        println!("{}", "No agents found".yellow());
        println!("{}", "Use 'persona agents create' to create your first agent".dimmed());
        return Ok(());
    }

    println!("{}", "👥 Agents".blue().bold());
    println!();

    let mut table = new_table(vec!["ID", "Name", "Age", "Location", "Income", "Interests", "Created"]);

    for agent in agents.items() {
        table.add_row(vec![
            agent.id.clone(),
            truncate(&agent.name, 25),
            agent.age.map(|age| age.to_string()).unwrap_or_else(|| "—".to_string()),
            truncate(&agent.location, 20),
            agent
                .income_level
                .map(|income| income.to_string())
                .unwrap_or_else(|| "—".to_string()),
            truncate(&join_or_dash(&agent.interests), 30),
            format_date(agent.created_at.as_deref()),
        ]);
    }

    println!("{}", table);
    println!("Total: {} agents", agents.items().len().to_string().cyan());

    Ok(())
}

async fn show_agent(id: &str) -> anyhow::Result<()> {
    let agent = client()?.get_agent(id).await?;

    println!("{}", format!("👤 Agent Details - {}", agent.name).blue().bold());
    println!();

    print_agent_details(&agent);
    Ok(())
}

fn print_agent_details(agent: &Agent) {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "—".to_string());

    print_field("ID", &agent.id);
    print_field("Name", &agent.name);
    print_field("Age", or_dash(agent.age.map(|age| age.to_string())));
    print_field("Gender", or_dash(agent.gender.map(|g| g.label().to_string())));
    print_field("Location", &agent.location);
    print_field("Occupation", or_dash(agent.occupation.clone()));
    print_field("Income", or_dash(agent.income_level.map(|i| i.to_string())));
    print_field(
        "Education",
        or_dash(agent.education_level.map(|e| e.label().to_string())),
    );
    print_field("Interests", join_or_dash(&agent.interests));
    print_field("Purchase behaviors", join_or_dash(&agent.purchase_behaviors));
    print_field("Purchase frequency", agent.purchase_frequency.label());
    print_field(
        "Communication",
        join_or_dash(agent.communication_preferences.iter().map(|c| c.label())),
    );
    if let Some(platforms) = &agent.social_media_usage {
        print_field("Social media", join_or_dash(platforms));
    }
    print_field("Brand loyalty", format!("{}/10", agent.brand_loyalty));
    print_field("Price sensitivity", format!("{}/10", agent.price_sensitivity));
    print_field("Tech savviness", format!("{}/10", agent.tech_savviness));
    print_field("ML engine", or_dash(agent.ml_engine_id.clone()));
    print_field("Created", format_date(agent.created_at.as_deref()));
}

async fn create_agent(file: Option<PathBuf>) -> anyhow::Result<()> {
    let client = client()?;

    let draft = match file {
        Some(path) => read_draft::<AgentDraft>(&path)?,
        None => prompt_agent(&client).await?,
    };

    let mut agents: Listing<Agent> = Listing::new();
    match agents.create(&client, &draft).await {
        Ok(agent) => {
            println!();
            println!(
                "{}",
                format!("✅ Agent '{}' created successfully!", agent.name).green()
            );
            println!("ID: {}", agent.id.cyan());
            if agents.last_error().is_none() {
                println!("Total: {} agents", agents.items().len().to_string().cyan());
            }
            Ok(())
        }
        Err(e) => Err(report_create_error("agent", e)),
    }
}

/// Engine picker entry
struct EngineChoice(MlEngine);

impl fmt::Display for EngineChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.name, self.0.provider.label())
    }
}

async fn prompt_agent(client: &PersonaClient) -> anyhow::Result<AgentDraft> {
    // Every agent is driven by an engine, so fetch them before asking anything else
    let mut engines: Listing<MlEngine> = Listing::new();
    if !engines.refresh(client).await {
        anyhow::bail!("{}", engines.last_error().unwrap_or("Failed to fetch ML engines"));
    }
    if engines.items().is_empty() {
        anyhow::bail!("No ML engines available. Use 'persona engines create' to add one first");
    }

    println!("{}", "➕ Create New Agent".blue().bold());
    println!();

    let defaults = AgentDraft::default();

    let name = Text::new("Agent name:").prompt()?;
    let age = CustomType::<i64>::new("Age:")
        .with_default(defaults.age.unwrap_or(30))
        .with_error_message("Please enter a whole number")
        .prompt()?;
    let gender = select_one("Gender:", Gender::ALL, Gender::label, Some(Gender::PreferNotToSay))?;
    let location = Text::new("Location:").prompt()?;
    let occupation = optional(Text::new("Occupation (optional):").prompt()?);
    let income_level = Text::new("Annual income (USD):")
        .with_default(defaults.income_level.as_deref().unwrap_or("50000"))
        .prompt()?;
    let education_level = select_one(
        "Education level:",
        EducationLevel::ALL,
        EducationLevel::label,
        Some(EducationLevel::Bachelors),
    )?;
    let interests = prompt_tags("Add interest", "e.g. technology")?;
    let purchase_behaviors = prompt_tags("Add purchase behavior", "e.g. online shopping")?;
    let social_media_usage = prompt_tags("Add social media platform", "e.g. instagram")?;
    let purchase_frequency = select_one(
        "Purchase frequency:",
        PurchaseFrequency::ALL,
        PurchaseFrequency::label,
        Some(PurchaseFrequency::Monthly),
    )?;
    let communication_preferences = select_many(
        "Communication preferences:",
        CommunicationPreference::ALL,
        CommunicationPreference::label,
    )?;
    let brand_loyalty = prompt_scale("Brand loyalty")?;
    let price_sensitivity = prompt_scale("Price sensitivity")?;
    let tech_savviness = prompt_scale("Tech savviness")?;

    let engine = Select::new(
        "ML engine:",
        engines.items().iter().cloned().map(EngineChoice).collect(),
    )
    .prompt()?;

    Ok(AgentDraft {
        name,
        age: Some(age),
        gender: Some(gender.as_str().to_string()),
        location,
        occupation,
        income_level: Some(income_level),
        education_level: Some(education_level.as_str().to_string()),
        interests,
        purchase_behaviors,
        purchase_frequency: Some(purchase_frequency.as_str().to_string()),
        communication_preferences: communication_preferences
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
        social_media_usage: non_empty(social_media_usage),
        brand_loyalty: Some(brand_loyalty),
        price_sensitivity: Some(price_sensitivity),
        tech_savviness: Some(tech_savviness),
        ml_engine_id: Some(engine.0.id),
    })
}

fn prompt_scale(label: &str) -> anyhow::Result<i64> {
    let value = CustomType::<i64>::new(&format!("{} (1-10):", label))
        .with_default(5)
        .with_error_message("Please enter a whole number")
        .prompt()?;
    Ok(value)
}
