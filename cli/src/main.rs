//! Referral CLI — command-line interface for the referral graph engine
//!
//! Loads referral edges from a file into a `ReferralGraph` and prints
//! statistics, reach, growth projections or bonus plans.

mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use referral_graph::simulation::daily_growth;
use referral_graph::{
    BonusOutcome, BonusTarget, EngineConfig, LinearAdoptionCurve, ReferralGraph,
};
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "referral", version, about = "Referral graph analytics CLI")]
struct Cli {
    /// Referral edges: JSON array of {referrer, candidate} or `referrer,candidate` lines
    #[arg(long, short, global = true, env = "REFERRAL_INPUT")]
    input: Option<PathBuf>,

    /// Engine configuration (YAML)
    #[arg(long, global = true, env = "REFERRAL_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Network statistics and influencers
    Stats,
    /// Reach and direct referrals of one user
    Reach {
        user: String,
    },
    /// Top referrers by total reach
    Top {
        #[arg(short, default_value_t = 10)]
        k: usize,
    },
    /// Project cumulative referrals
    Simulate {
        /// Daily referral probability; repeat for side-by-side scenarios
        #[arg(long, short, default_values_t = [0.2, 0.35, 0.5])]
        probability: Vec<f64>,

        #[arg(long, default_value_t = 30)]
        days: usize,
    },
    /// Minimum bonus to reach a hiring target
    Optimize {
        #[arg(long, default_value_t = 30)]
        days: usize,

        #[arg(long)]
        target: u64,

        /// Override the configured search ceiling
        #[arg(long)]
        max_bonus: Option<u64>,

        /// Adoption probability at zero bonus
        #[arg(long, default_value_t = 0.1)]
        base: f64,

        /// Probability gained per 1000 units of bonus
        #[arg(long, default_value_t = 0.8)]
        slope: f64,

        /// Adoption probability ceiling
        #[arg(long, default_value_t = 0.9)]
        ceiling: f64,
    },
}

fn main() {
    // stdout carries the report (JSON with --format json), logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Commands::Optimize {
        max_bonus: Some(max_bonus),
        ..
    } = &cli.command
    {
        config.bonus.max_bonus = *max_bonus;
    }

    let graph = load_graph(cli.input.as_ref(), config)?;

    match cli.command {
        Commands::Stats => run_stats(&graph, &cli.format),
        Commands::Reach { user } => run_reach(&graph, &user, &cli.format),
        Commands::Top { k } => run_top(&graph, k, &cli.format),
        Commands::Simulate { probability, days } => {
            run_simulate(&graph, &probability, days, &cli.format)
        }
        Commands::Optimize {
            days,
            target,
            base,
            slope,
            ceiling,
            ..
        } => {
            let curve = LinearAdoptionCurve {
                base,
                slope_per_thousand: slope,
                ceiling,
            };
            run_optimize(&graph, days, target, &curve, &cli.format)
        }
    }
}

fn load_graph(input: Option<&PathBuf>, config: EngineConfig) -> Result<ReferralGraph> {
    let mut graph = ReferralGraph::with_config(config).context("invalid engine config")?;

    let Some(path) = input else {
        warn!("No --input given, starting from an empty graph");
        return Ok(graph);
    };

    let edges = input::load_edges(path)?;
    let report = graph.extend_referrals(edges);
    for (edge, reason) in &report.skipped {
        warn!("Skipped {}: {}", edge, reason);
    }
    info!(
        "Loaded {} referrals ({} skipped) from {}",
        report.inserted,
        report.skipped.len(),
        path.display()
    );

    Ok(graph)
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn run_stats(graph: &ReferralGraph, format: &OutputFormat) -> Result<()> {
    let stats = graph.get_network_stats();
    let max_depth = graph.get_max_depth();

    match format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&stats)?;
            value["maxDepth"] = json!(max_depth);
            value["networkDensity"] = json!(stats.network_density());
            value["connectivity"] = json!(stats.connectivity());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            println!("Users:              {}", stats.total_users);
            println!("Referrals:          {}", stats.total_referrals);
            println!("Avg referrals/user: {:.2}", stats.avg_referrals_per_user);
            println!("Network density:    {:.2}", stats.network_density());
            println!("Connectivity:       {:.4}", stats.connectivity());
            println!("Max depth:          {}", max_depth);

            let mut table = new_table(&["#", "Top referrer", "Referrals"]);
            for (rank, user) in stats.top_referrers.iter().enumerate() {
                table.add_row(vec![
                    (rank + 1).to_string(),
                    user.user_id.to_string(),
                    user.count.to_string(),
                ]);
            }
            println!("{}", table);

            let mut table = new_table(&["#", "Unique-reach influencer", "Unique reach"]);
            for (rank, user) in stats.unique_influencers.iter().enumerate() {
                table.add_row(vec![
                    (rank + 1).to_string(),
                    user.user_id.to_string(),
                    user.unique_reach.to_string(),
                ]);
            }
            println!("{}", table);

            let mut table = new_table(&["#", "Flow influencer", "Centrality"]);
            for (rank, user) in stats.flow_influencers.iter().enumerate() {
                table.add_row(vec![
                    (rank + 1).to_string(),
                    user.user_id.to_string(),
                    user.centrality_score.to_string(),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn run_reach(graph: &ReferralGraph, user: &str, format: &OutputFormat) -> Result<()> {
    let reach = graph.calculate_network_reach(user);
    let direct = graph.get_direct_referrals(user);
    let referrer = graph.get_referrer(user);

    match format {
        OutputFormat::Json => {
            let value = json!({
                "userId": user,
                "reach": reach,
                "referredBy": referrer,
                "directReferrals": direct,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            println!("User:        {}", user);
            println!("Referred by: {}", referrer.map_or("-", |r| r.as_str()));
            println!("Reach:       {}", reach);
            let names: Vec<&str> = direct.iter().map(|u| u.as_str()).collect();
            println!("Direct:      {}", names.join(", "));
        }
    }

    Ok(())
}

fn run_top(graph: &ReferralGraph, k: usize, format: &OutputFormat) -> Result<()> {
    let top = graph.get_top_referrers_by_reach(k);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&top)?),
        OutputFormat::Table => {
            let mut table = new_table(&["#", "User", "Reach"]);
            for (rank, user) in top.iter().enumerate() {
                table.add_row(vec![
                    (rank + 1).to_string(),
                    user.user_id.to_string(),
                    user.count.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} user(s)", top.len());
        }
    }

    Ok(())
}

fn run_simulate(
    graph: &ReferralGraph,
    probabilities: &[f64],
    days: usize,
    format: &OutputFormat,
) -> Result<()> {
    let runs = graph.simulate_scenarios(probabilities, days);

    match format {
        OutputFormat::Json => {
            let value: Vec<_> = probabilities
                .iter()
                .zip(&runs)
                .map(|(p, series)| {
                    json!({
                        "probability": p,
                        "cumulative": series,
                        "daily": daily_growth(series),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            let mut header = vec!["Day".to_string()];
            header.extend(probabilities.iter().map(|p| format!("p = {}", p)));

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(header);
            for day in 0..days {
                let mut row = vec![(day + 1).to_string()];
                row.extend(runs.iter().map(|series| format!("{:.1}", series[day])));
                table.add_row(row);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn run_optimize(
    graph: &ReferralGraph,
    days: usize,
    target: u64,
    curve: &LinearAdoptionCurve,
    format: &OutputFormat,
) -> Result<()> {
    let plan = graph.plan_bonuses(&[BonusTarget { days, target }], curve);
    let Some(plan) = plan.into_iter().next() else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Table => match plan.outcome {
            BonusOutcome::Achievable { bonus, projected } => {
                println!(
                    "Minimum bonus for {} referrals in {} days: {} (projected {:.1})",
                    target, days, bonus, projected
                );
            }
            BonusOutcome::Unachievable { best_projection } => {
                println!(
                    "Unachievable: {} referrals in {} days (best projection {:.1} at bonus {})",
                    target,
                    days,
                    best_projection,
                    graph.config().bonus.max_bonus
                );
            }
        },
    }

    Ok(())
}
