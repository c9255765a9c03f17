use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tokio::sync::Mutex;
use tracing::info;

use citytour::api::AppState;
use citytour::budget::{self, BudgetInput};
use citytour::export::render_itinerary;
use citytour::packing::packing_list;
use citytour::{PlanRequest, Session, TourConfig, TourError, TripPlanner, logging, web};

/// City sightseeing route planner
#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "CITYTOUR_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route and print the itinerary
    Plan(PlanArgs),
    /// Serve the JSON API
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// City to explore
    #[arg(long)]
    city: Option<String>,

    /// Search keyword
    #[arg(long)]
    keyword: Option<String>,

    /// First day of the trip, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Reorder stops into a nearest-neighbor route
    #[arg(long)]
    optimize: bool,

    /// Load food, hotels and reviews for every stop
    #[arg(long)]
    details: bool,

    /// Also write the itinerary to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Party size; together with --days adds a budget
    #[arg(long)]
    travellers: Option<u32>,

    /// Trip length in days
    #[arg(long)]
    days: Option<u32>,

    #[arg(long, default_value_t = 0.0)]
    hotel_per_night: f64,

    #[arg(long, default_value_t = 0.0)]
    food_per_person_day: f64,

    #[arg(long, default_value_t = 0.0)]
    transport_per_day: f64,

    #[arg(long, default_value_t = 0.0)]
    ticket_per_person: f64,
}

impl PlanArgs {
    fn budget_input(&self) -> Option<BudgetInput> {
        Some(BudgetInput {
            travellers: self.travellers?,
            days: self.days?,
            hotel_per_night: self.hotel_per_night,
            food_per_person_day: self.food_per_person_day,
            transport_per_day: self.transport_per_day,
            ticket_per_person: self.ticket_per_person,
        })
    }
}

fn user_facing(error: TourError) -> anyhow::Error {
    anyhow!(error.user_message())
}

async fn run_plan(config: &TourConfig, args: PlanArgs) -> Result<()> {
    let planner = TripPlanner::from_config(config)?;
    let request = PlanRequest {
        city: args.city.clone().unwrap_or_else(|| config.defaults.city.clone()),
        keyword: args.keyword.clone().unwrap_or_else(|| config.defaults.keyword.clone()),
        start_date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        optimize: args.optimize || config.defaults.optimize_route,
    };

    let plan = planner.plan(&request).await.map_err(user_facing)?;
    let session = Mutex::new(Session::new(config.session.detail_ttl()));
    session.lock().await.install_plan(plan.clone());

    if args.details {
        for stop in &plan.stops {
            planner.details_cached(&session, stop.id()).await.map_err(user_facing)?;
        }
    }

    let budget = args
        .budget_input()
        .map(|input| budget::calculate(&input, plan.stops.len()))
        .transpose()
        .map_err(user_facing)?;

    let session = session.lock().await;
    let text = render_itinerary(
        &plan,
        &session.all_cached_details(),
        &packing_list(&plan.forecast.days),
        budget.as_ref(),
    );
    print!("{text}");

    if let Some(path) = &args.export {
        std::fs::write(path, &text).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Itinerary written to {}", path.display());
    }
    Ok(())
}

async fn run_server(config: &TourConfig, port: Option<u16>) -> Result<()> {
    let planner = TripPlanner::from_config(config)?;
    let state = Arc::new(AppState::new(
        planner,
        Session::new(config.session.detail_ttl()),
        config.defaults.clone(),
    ));
    let timeout = Duration::from_secs(u64::from(config.server.request_timeout_seconds));
    web::run(state, port.unwrap_or(config.server.port), timeout).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TourConfig::load_from_path(cli.config.clone()).context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Plan(args) => run_plan(&config, args).await,
        Command::Serve { port } => run_server(&config, port).await,
    }
}
