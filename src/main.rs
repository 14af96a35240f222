use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendpulse::config::Config;
use trendpulse::models::Trend;
use trendpulse::strategy::{
    build_blueprint, build_growth_plan, tool_stack, Blueprint, GrowthMilestone, StackTool,
};
use trendpulse::TrendEngine;

#[derive(Parser)]
#[command(
    name = "trendpulse",
    version,
    about = "AI trend intelligence with cross-platform content blueprints",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Emit results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, score, and rank the current trend signals
    Trends {
        /// Maximum number of trends to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Derive content blueprints for the top trends
    Blueprints {
        /// Number of top trends to build blueprints for
        #[arg(short, long, default_value = "4")]
        count: usize,
    },

    /// Print the fixed follower-growth plan
    GrowthPlan,

    /// Trends, blueprints, growth plan, and tool stack in one pass
    Report {
        /// Number of top trends to build blueprints for
        #[arg(short, long, default_value = "4")]
        count: usize,
    },
}

/// Everything the rendering layer consumes, assembled in one pass
#[derive(Debug, Serialize)]
struct Report {
    trends: Vec<Trend>,
    blueprints: Vec<Blueprint>,
    growth_plan: Vec<GrowthMilestone>,
    tool_stack: Vec<StackTool>,
}

fn assemble_report(trends: Vec<Trend>, count: usize) -> Result<Report> {
    let blueprints: Vec<Blueprint> = trends
        .iter()
        .take(count)
        .map(build_blueprint)
        .collect::<std::result::Result<_, _>>()?;

    Ok(Report {
        trends,
        blueprints,
        growth_plan: build_growth_plan(),
        tool_stack: tool_stack(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = Config::load()?;

    match cli.command {
        Commands::Trends { limit } => {
            tracing::info!(limit = ?limit, "Starting trends command");
            trends(config, limit, cli.json).await?;
        }

        Commands::Blueprints { count } => {
            tracing::info!(count = %count, "Starting blueprints command");
            blueprints(config, count, cli.json).await?;
        }

        Commands::GrowthPlan => {
            tracing::info!("Starting growth-plan command");
            growth_plan(cli.json)?;
        }

        Commands::Report { count } => {
            tracing::info!(count = %count, "Starting report command");
            report(config, count, cli.json).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("trendpulse=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("trendpulse=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn trends(config: Config, limit: Option<usize>, json: bool) -> Result<()> {
    let engine = TrendEngine::new(config)?;
    let mut trends = engine.trend_insights().await;
    if let Some(limit) = limit {
        trends.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&trends)?);
        return Ok(());
    }

    if trends.is_empty() {
        println!("No trend signals available right now.");
        return Ok(());
    }

    for (i, trend) in trends.iter().enumerate() {
        println!(
            "{:>2}. [{:>5.1}] {} ({})",
            i + 1,
            trend.score,
            trend.title,
            trend.source.label()
        );
        println!("      {}", trend.url);
        if !trend.keywords.is_empty() {
            println!("      keywords: {}", trend.keywords.join(", "));
        }
    }

    Ok(())
}

async fn blueprints(config: Config, count: usize, json: bool) -> Result<()> {
    let engine = TrendEngine::new(config)?;
    let trends = engine.trend_insights().await;

    let blueprints: Vec<_> = trends
        .iter()
        .take(count)
        .map(build_blueprint)
        .collect::<std::result::Result<_, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&blueprints)?);
        return Ok(());
    }

    if blueprints.is_empty() {
        println!("No trends available to build blueprints from.");
        return Ok(());
    }

    for blueprint in &blueprints {
        println!("=== {} ===", blueprint.trend.title);
        for plan in &blueprint.platform_plans {
            println!("\n[{}] ({})", plan.platform, plan.format);
            println!("Hook: {}", plan.hook);
            println!("CTA:  {}", plan.call_to_action);
            println!("Tags: {}", plan.hashtags.join(" "));
        }
        println!("\nLead magnet: {}", blueprint.lead_magnet.headline);
        println!(
            "Offer: {} ({})",
            blueprint.monetization.offer_headline, blueprint.monetization.pricing
        );
        println!();
    }

    Ok(())
}

fn growth_plan(json: bool) -> Result<()> {
    let plan = build_growth_plan();

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for milestone in &plan {
        println!(
            "{}: {} followers by day {}",
            milestone.label, milestone.followers, milestone.timeframe_days
        );
        for tactic in &milestone.tactics {
            println!("  - {tactic}");
        }
    }

    Ok(())
}

async fn report(config: Config, count: usize, json: bool) -> Result<()> {
    let engine = TrendEngine::new(config)?;
    let trends = engine.trend_insights().await;
    let report = assemble_report(trends, count)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("## Trends");
    if report.trends.is_empty() {
        println!("No trend signals available right now.");
    }
    for (i, trend) in report.trends.iter().enumerate() {
        println!(
            "{:>2}. [{:>5.1}] {} ({})",
            i + 1,
            trend.score,
            trend.title,
            trend.source.label()
        );
    }

    println!("\n## Blueprints");
    for blueprint in &report.blueprints {
        println!("=== {} ===", blueprint.trend.title);
        for plan in &blueprint.platform_plans {
            println!("[{}] {} — {}", plan.platform, plan.format, plan.hook);
        }
        println!("Lead magnet: {}", blueprint.lead_magnet.headline);
        println!(
            "Offer: {} ({})",
            blueprint.monetization.offer_headline, blueprint.monetization.pricing
        );
    }

    println!("\n## Growth plan");
    for milestone in &report.growth_plan {
        println!(
            "{}: {} followers by day {}",
            milestone.label, milestone.followers, milestone.timeframe_days
        );
    }

    println!("\n## Tool stack");
    for tool in &report.tool_stack {
        println!("{} — {}", tool.name, tool.purpose);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trendpulse::models::TrendSource;

    fn sample_trend(id: &str) -> Trend {
        Trend {
            id: format!("reddit:{id}"),
            title: format!("AI agent story {id}"),
            summary: "summary".to_string(),
            source: TrendSource::Reddit,
            url: format!("https://example.com/{id}"),
            published_at: Utc::now(),
            keywords: vec!["agent".to_string()],
            score: 80.0,
        }
    }

    #[test]
    fn test_report_bundles_all_sections() {
        let trends = vec![sample_trend("a"), sample_trend("b"), sample_trend("c")];
        let report = assemble_report(trends, 2).unwrap();

        assert_eq!(report.trends.len(), 3);
        assert_eq!(report.blueprints.len(), 2);
        assert_eq!(report.growth_plan.len(), 6);
        assert_eq!(report.tool_stack.len(), 10);
        assert!(serde_json::to_string(&report).is_ok());
    }

    #[test]
    fn test_report_with_no_trends_still_has_static_sections() {
        let report = assemble_report(Vec::new(), 4).unwrap();
        assert!(report.trends.is_empty());
        assert!(report.blueprints.is_empty());
        assert!(!report.growth_plan.is_empty());
        assert!(!report.tool_stack.is_empty());
    }
}
