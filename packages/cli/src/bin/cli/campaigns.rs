use clap::Subcommand;
use colored::*;
use inquire::Text;
use std::path::PathBuf;

use persona_client::Listing;
use persona_core::{Campaign, CampaignDraft, MarketingChannel, MessageType, TargetAudience};

use super::utils::{
    client, format_date, new_table, print_field, read_draft, report_create_error, select_one,
    truncate,
};

#[derive(Subcommand)]
pub enum CampaignsCommands {
    /// List all campaigns
    List,
    /// Show campaign details
    Show {
        /// Campaign ID to show
        id: String,
    },
    /// Create a new campaign
    Create {
        /// Read the campaign from a JSON file instead of prompting
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

pub async fn handle_campaigns_command(command: CampaignsCommands) -> anyhow::Result<()> {
    match command {
        CampaignsCommands::List => list_campaigns().await,
        CampaignsCommands::Show { id } => show_campaign(&id).await,
        CampaignsCommands::Create { file } => create_campaign(file).await,
    }
}

async fn fetch_campaigns() -> anyhow::Result<Listing<Campaign>> {
    let client = client()?;
    let mut campaigns: Listing<Campaign> = Listing::new();

    if !campaigns.refresh(&client).await {
        anyhow::bail!("{}", campaigns.last_error().unwrap_or("Failed to fetch campaigns"));
    }
    Ok(campaigns)
}

async fn list_campaigns() -> anyhow::Result<()> {
    let campaigns = fetch_campaigns().await?;

    if campaigns.items().is_empty() {
        println!("{}", "No campaigns found".yellow());
        println!("{}", "Use 'persona campaigns create' to create your first campaign".dimmed());
        return Ok(());
    }

    println!("{}", "📣 Campaigns".blue().bold());
    println!();

    let mut table = new_table(vec!["ID", "Name", "Audience", "Channel", "Message", "Budget", "Created"]);

    for campaign in campaigns.items() {
        table.add_row(campaign_row(campaign));
    }

    println!("{}", table);
    println!("Total: {} campaigns", campaigns.items().len().to_string().cyan());

    Ok(())
}

/// Budget is free text and shown exactly as entered
fn campaign_row(campaign: &Campaign) -> Vec<String> {
    vec![
        campaign.id.clone(),
        truncate(&campaign.name, 25),
        campaign.target_audience.label().to_string(),
        campaign.marketing_channel.label().to_string(),
        campaign.message_type.label().to_string(),
        campaign.budget.clone(),
        format_date(campaign.created_at.as_deref()),
    ]
}

async fn show_campaign(id: &str) -> anyhow::Result<()> {
    let campaigns = fetch_campaigns().await?;

    let Some(campaign) = campaigns.items().iter().find(|c| c.id == id) else {
        eprintln!("{}", format!("Campaign with ID '{}' not found", id).red());
        anyhow::bail!("Campaign not found");
    };

    println!("{}", format!("📣 Campaign Details - {}", campaign.name).blue().bold());
    println!();

    print_field("ID", &campaign.id);
    print_field("Name", &campaign.name);
    print_field("Description", &campaign.description);
    print_field("Target audience", campaign.target_audience.label());
    print_field("Budget", &campaign.budget);
    print_field("Marketing channel", campaign.marketing_channel.label());
    print_field("Message type", campaign.message_type.label());
    print_field("Content", &campaign.content);
    print_field("Created", format_date(campaign.created_at.as_deref()));

    Ok(())
}

async fn create_campaign(file: Option<PathBuf>) -> anyhow::Result<()> {
    let client = client()?;

    let draft = match file {
        Some(path) => read_draft::<CampaignDraft>(&path)?,
        None => prompt_campaign()?,
    };

    let mut campaigns: Listing<Campaign> = Listing::new();
    match campaigns.create(&client, &draft).await {
        Ok(campaign) => {
            println!();
            println!(
                "{}",
                format!("✅ Campaign '{}' created successfully!", campaign.name).green()
            );
            println!("ID: {}", campaign.id.cyan());
            Ok(())
        }
        Err(e) => Err(report_create_error("campaign", e)),
    }
}

fn prompt_campaign() -> anyhow::Result<CampaignDraft> {
    println!("{}", "➕ Create New Campaign".blue().bold());
    println!();

    let name = Text::new("Campaign name:").prompt()?;
    let description = Text::new("Description:").prompt()?;
    let target_audience = select_one(
        "Target audience:",
        TargetAudience::ALL,
        TargetAudience::label,
        None,
    )?;
    let budget = Text::new("Budget (USD):").prompt()?;
    let marketing_channel = select_one(
        "Marketing channel:",
        MarketingChannel::ALL,
        MarketingChannel::label,
        None,
    )?;
    let message_type = select_one("Message type:", MessageType::ALL, MessageType::label, None)?;
    let content = Text::new("Campaign content:").prompt()?;

    Ok(CampaignDraft {
        name,
        description,
        target_audience: Some(target_audience.as_str().to_string()),
        budget,
        marketing_channel: Some(marketing_channel.as_str().to_string()),
        message_type: Some(message_type.as_str().to_string()),
        content,
    })
}
