use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use creator_core::dashboard::{self, ViewsPoint};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Subcommand)]
pub enum DashboardCommand {
    /// Headline numbers: views, subscribers, revenue, engagement
    Overview(OverviewArgs),
    /// Revenue per content type
    Revenue(RevenueArgs),
    /// Daily views time series
    Views(ViewsArgs),
}

#[derive(Debug, Args)]
pub struct OverviewArgs {}

#[derive(Debug, Args)]
pub struct RevenueArgs {}

#[derive(Debug, Args)]
pub struct ViewsArgs {
    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub days: Option<usize>,
    /// First date of the series (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,
}

pub fn overview(ctx: &Context<'_>, _args: OverviewArgs) -> Result<()> {
    let data = dashboard::overview();
    if ctx.json {
        return print_json(&data);
    }
    println!("total views:     {}", data.total_views);
    println!("subscribers:     {}", data.subscribers);
    println!("revenue:         ${}", data.revenue);
    println!("engagement rate: {}%", data.engagement_rate);
    Ok(())
}

pub fn revenue(ctx: &Context<'_>, _args: RevenueArgs) -> Result<()> {
    let items = dashboard::revenue_breakdown();
    if ctx.json {
        return print_json(&items);
    }
    let width = items.iter().map(|item| item.kind.len()).max().unwrap_or(0);
    for item in items {
        println!("{:<width$}  ${}", item.kind, item.revenue, width = width);
    }
    Ok(())
}

pub fn views(ctx: &Context<'_>, args: ViewsArgs) -> Result<()> {
    let start = match args.start.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| invalid_input(format!("invalid start date: {}", raw)))?,
        None => ctx.config.dashboard.series_start,
    };
    let days = args.days.unwrap_or(ctx.config.dashboard.series_days);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let series: Vec<ViewsPoint> = dashboard::views_series(&mut rng, start, days)?;

    if ctx.json {
        return print_json(&series);
    }
    for point in series {
        println!("{}  {}", point.date.format("%Y-%m-%d"), point.views);
    }
    Ok(())
}
