// ABOUTME: Activity monitor CLI - today's progress, weekly insights and goal management
// ABOUTME: Runs against the process-wide provider registry backed by synthetic native stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Today's steps and minutes, prompting for access first
//! activity-monitor today --request-permissions
//!
//! # Same on the Health Connect adapter
//! activity-monitor --platform android today --request-permissions
//!
//! # Per-day insights for a range
//! activity-monitor week --from 2025-06-02 --to 2025-06-08 --request-permissions
//!
//! # Goals
//! activity-monitor goals set --steps 10000 --minutes 45
//! activity-monitor goals show
//! activity-monitor goals clear
//! ```

use activity_monitor::config::AppConfig;
use activity_monitor::dates::{day_bounds, format_date};
use activity_monitor::health::{
    global_registry, install_global_registry, HealthService, NativeBackends,
};
use activity_monitor::logging;
use activity_monitor::models::{GoalSettings, Platform, WeeklyInsights};
use activity_monitor::storage::{FileStore, GoalsStore};
use activity_monitor::tracker::{goal_progress, TodayTracker};
use activity_providers::InitializationOptions;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "activity-monitor",
    about = "Daily steps and exercise minutes against your goals",
    long_about = "Reads steps and exercise minutes from the platform health store and tracks progress toward daily goals."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Platform identifier override (ios, android)
    #[arg(long, global = true)]
    platform: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show today's steps and minutes against the goals
    Today {
        /// Prompt for health data access instead of only checking it
        #[arg(long)]
        request_permissions: bool,
    },

    /// Show per-day insights for a date range
    Week {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,

        /// Prompt for health data access instead of only checking it
        #[arg(long)]
        request_permissions: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Goal management commands
    Goals {
        #[command(subcommand)]
        action: GoalsCommand,
    },
}

#[derive(Subcommand)]
enum GoalsCommand {
    /// Show the current goals
    Show,

    /// Save new goals
    Set {
        /// Daily steps goal (up to 6 digits)
        #[arg(long)]
        steps: String,

        /// Daily activity minutes goal (up to 4 digits)
        #[arg(long)]
        minutes: String,
    },

    /// Remove saved goals, restoring the defaults
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_from_env()?;

    let mut config = AppConfig::from_env()?;
    if let Some(platform) = cli.platform.as_deref() {
        config.platform = Platform::from_identifier(platform);
    }
    debug!(?config, "Resolved configuration");

    install_global_registry(NativeBackends::synthetic(config.demo_seed));
    let goals = GoalsStore::new(Arc::new(FileStore::new(&config.goals_path)));

    match cli.command {
        Command::Today {
            request_permissions,
        } => today(&config, &goals, request_permissions).await,
        Command::Week {
            from,
            to,
            request_permissions,
            json,
        } => week(&config, from, to, request_permissions, json).await,
        Command::Goals { action } => match action {
            GoalsCommand::Show => show_goals(&goals).await,
            GoalsCommand::Set { steps, minutes } => {
                let settings = GoalSettings::parse(&steps, &minutes)?;
                goals.save_goals(settings).await?;
                println!("Goals saved.");
                show_goals(&goals).await
            }
            GoalsCommand::Clear => {
                goals.clear_goals().await?;
                println!("Goals cleared.");
                show_goals(&goals).await
            }
        },
    }
}

async fn today(config: &AppConfig, goals: &GoalsStore, request_permissions: bool) -> Result<()> {
    let service = HealthService::for_platform(&global_registry(), &config.platform)?;
    let goal_settings = goals.load_or_default().await?;

    let mut tracker = TodayTracker::new(service);
    let day = Local::now().date_naive();
    let state = tracker.reload(request_permissions, day).await;

    println!("Today ({})", format_date(day));
    println!("  Steps:          {:>6}  Goal: {}", state.steps, goal_settings.steps_goal);
    println!("  Activity (min): {:>6}  Goal: {}", state.minutes, goal_settings.minutes_goal);
    println!(
        "  Progress:       {:>5.0}%",
        goal_progress(state.steps, state.minutes, goal_settings) * 100.0
    );

    if !state.is_granted() {
        if config.platform == Platform::Android {
            println!("Permissions not granted. Open Health Connect to grant access.");
        } else {
            println!("Permissions not granted.");
        }
    }
    if let Some(error) = &state.error {
        println!("Error: {error}");
    }
    Ok(())
}

async fn week(
    config: &AppConfig,
    from: NaiveDate,
    to: NaiveDate,
    request_permissions: bool,
    json: bool,
) -> Result<()> {
    let service = HealthService::for_platform(&global_registry(), &config.platform)?;
    service
        .initialize(InitializationOptions { request_permissions })
        .await?;

    let start = day_bounds(from, &Local).start.with_timezone(&Local);
    let end = day_bounds(to, &Local).end.with_timezone(&Local);
    let insights = service.get_weekly_insights(start, end).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print_week(&insights);
    }
    Ok(())
}

fn print_week(insights: &WeeklyInsights) {
    println!("{:<12} {:>8} {:>8}", "Date", "Steps", "Minutes");
    for (steps, activity) in insights
        .daily_step_insights
        .iter()
        .zip(&insights.daily_activity_insights)
    {
        println!(
            "{:<12} {:>8} {:>8}",
            format_date(steps.date),
            steps.steps,
            activity.minutes
        );
    }
    println!(
        "{:<12} {:>8} {:>8}",
        "Total",
        insights.total_steps(),
        insights.total_minutes()
    );
}

async fn show_goals(goals: &GoalsStore) -> Result<()> {
    let stored = goals.load_goals().await?;
    let settings = stored.or_defaults();
    let source = |value: Option<u32>| if value.is_some() { "saved" } else { "default" };
    println!("Steps goal:   {} ({})", settings.steps_goal, source(stored.steps));
    println!("Minutes goal: {} ({})", settings.minutes_goal, source(stored.minutes));
    Ok(())
}
