//! Slag plant reporting tool
//!
//! Profit, chemistry quality, processing, maintenance, crew, inventory and
//! invoice reports over the plant's records.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{DateRange, InvoiceStatus, ProcessingStage, TaskStatus, TrendPeriod};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use slag_plant_backend::repositories::{PersonnelFilter, TaskFilter};
use slag_plant_backend::services::ReportingService;
use slag_plant_backend::{AppState, Config};

#[derive(Parser)]
#[command(name = "slag-report")]
#[command(about = "Profit, quality and maintenance reports for the slag processing plant")]
struct Cli {
    /// Print compact JSON instead of pretty-printed output
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profit summary, cost and revenue breakdowns and trends
    Profit {
        /// Trend granularity: daily, weekly or monthly
        #[arg(short, long)]
        period: Option<TrendPeriod>,

        /// First arrival date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last arrival date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Share of each load's cost taken by one processing stage
    StageImpact {
        /// crushing, screening, washing or secondary
        stage: ProcessingStage,
    },

    /// Per-load profit records as CSV
    ExportCsv {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Chemistry quality grade of recent loads
    Quality {
        /// Number of most recent loads to grade
        #[arg(short, long)]
        sample: Option<usize>,

        /// Show the element checks of a single load instead
        #[arg(long)]
        load: Option<Uuid>,
    },

    /// Proposed maintenance schedule for all equipment
    Schedule {
        /// Book preventive tasks for high priority units
        #[arg(long)]
        generate_tasks: bool,

        /// Technician to assign generated tasks to
        #[arg(long)]
        assignee: Option<Uuid>,
    },

    /// Maintenance task statistics, or a filtered task list
    Tasks {
        /// List tasks with this status (scheduled, in_progress, completed, cancelled)
        #[arg(long, value_parser = parse_task_status)]
        status: Option<TaskStatus>,

        /// List open tasks scheduled in the past
        #[arg(long)]
        overdue: bool,
    },

    /// Bin levels, stock value and alerts
    Inventory {
        /// Fill ratio below which a bin is low stock
        #[arg(short, long)]
        threshold: Option<Decimal>,
    },

    /// Loads waiting for and going through the plant
    Queue,

    /// Crew workload statistics, or a filtered crew list
    Crew {
        /// List crew in this role
        #[arg(long)]
        role: Option<String>,

        /// List crew with this skill
        #[arg(long)]
        skill: Option<String>,

        /// Only crew who can take another task
        #[arg(long)]
        available: bool,
    },

    /// Invoice ledger summary, or invoices by status or customer
    Invoices {
        /// pending, overdue, paid or cancelled
        #[arg(long)]
        status: Option<InvoiceStatus>,

        /// Part of the customer name
        #[arg(long)]
        customer: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for report output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slag_report=info,slag_plant_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting slag plant report");
    tracing::info!("Environment: {}", config.environment);

    let state = AppState::load(config)?;
    let now = Utc::now();

    match cli.command {
        Commands::Profit { period, from, to } => {
            let range = date_range(from, to)?;
            let period = period.unwrap_or(state.config.report.default_period);
            let report = state.profit_analytics().dashboard(range.as_ref(), period)?;
            print_json(&report, cli.compact)?;
        }

        Commands::StageImpact { stage } => {
            let impact = state.profit_analytics().stage_impact(stage)?;
            print_json(&impact, cli.compact)?;
        }

        Commands::ExportCsv { from, to } => {
            let range = date_range(from, to)?;
            let records = state.profit_analytics().records_in(range.as_ref())?;
            print!("{}", ReportingService::export_profit_csv(&records)?);
        }

        Commands::Quality { sample, load } => {
            let quality = state.quality();
            match load {
                Some(id) => print_json(&quality.chemistry_checks(id)?, cli.compact)?,
                None => {
                    let sample = sample.unwrap_or(state.config.report.quality_sample_size);
                    print_json(&quality.recent_quality(sample)?, cli.compact)?;
                }
            }
        }

        Commands::Schedule {
            generate_tasks,
            assignee,
        } => {
            let maintenance = state.maintenance();
            if generate_tasks {
                print_json(&maintenance.generate_tasks(now, assignee)?, cli.compact)?;
            } else {
                print_json(&maintenance.proposed_schedule(now)?, cli.compact)?;
            }
        }

        Commands::Tasks { status, overdue } => {
            let maintenance = state.maintenance();
            if overdue {
                print_json(&maintenance.overdue_tasks(now)?, cli.compact)?;
            } else if let Some(status) = status {
                let filter = TaskFilter {
                    status: Some(status),
                    ..TaskFilter::default()
                };
                print_json(&state.tasks.find(&filter)?, cli.compact)?;
            } else {
                print_json(&maintenance.statistics(now)?, cli.compact)?;
            }
        }

        Commands::Inventory { threshold } => {
            print_json(&state.inventory().report(threshold)?, cli.compact)?;
        }

        Commands::Queue => {
            print_json(&state.processing().queue(now)?, cli.compact)?;
        }

        Commands::Crew {
            role,
            skill,
            available,
        } => {
            if role.is_none() && skill.is_none() && !available {
                print_json(&state.personnel().workload()?, cli.compact)?;
            } else {
                let filter = PersonnelFilter {
                    role,
                    skill,
                    ..PersonnelFilter::default()
                };
                let crew: Vec<_> = state
                    .personnel
                    .find(&filter)?
                    .into_iter()
                    .filter(|person| !available || person.has_capacity())
                    .collect();
                print_json(&crew, cli.compact)?;
            }
        }

        Commands::Invoices { status, customer } => {
            let invoices = state.invoices();
            match (status, customer) {
                (None, None) => print_json(&invoices.report(now)?, cli.compact)?,
                (status, customer) => {
                    state.invoices.mark_overdue(now)?;
                    let matching: Vec<_> = match customer {
                        Some(query) => state.invoices.get_by_customer(&query)?,
                        None => state.invoices.get_all()?,
                    }
                    .into_iter()
                    .filter(|invoice| status.map_or(true, |status| invoice.status == status))
                    .collect();
                    print_json(&matching, cli.compact)?;
                }
            }
        }
    }

    Ok(())
}

fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Option<DateRange>> {
    let range = match (from, to) {
        (Some(start), Some(end)) if start > end => {
            anyhow::bail!("--from {} is after --to {}", start, end)
        }
        (Some(start), Some(end)) => Some(DateRange::new(start, end)),
        (Some(start), None) => Some(DateRange::from(start)),
        (None, Some(end)) => Some(DateRange::until(end)),
        (None, None) => None,
    };
    Ok(range)
}

fn parse_task_status(s: &str) -> Result<TaskStatus, String> {
    match s.replace('-', "_").as_str() {
        "scheduled" => Ok(TaskStatus::Scheduled),
        "in_progress" => Ok(TaskStatus::InProgress),
        "completed" => Ok(TaskStatus::Completed),
        "cancelled" => Ok(TaskStatus::Cancelled),
        _ => Err(format!("unknown task status: {}", s)),
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
