mod listing;
mod report;
mod text;
mod tui;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use env_logger::Env;
use log::debug;
use leavetrack_core::config::{DATA_DIR_ENV, DEFAULT_LEAVE_TYPE, KNOWN_LEAVE_TYPES};
use leavetrack_core::{
    expand_key, parse_args, parse_leave_date, parse_month, resolve_leave_type, FileLeaveRepository,
    LeaveService, RecordFilter,
};

#[derive(Parser)]
#[command(name = "leavetrack")]
#[command(version, about = "Track employee leave and see where it goes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding leave_records.json (default: ~/.leavetrack)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record leave (usage: add Jane Smith date:2025-01-06 until:2025-01-08 type:sick comment:flu)
    Add {
        /// Employee name followed by metadata (key:value)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List leave records grouped by month
    List {
        /// Earliest leave date to show
        #[arg(long)]
        from: Option<String>,
        /// Latest leave date to show
        #[arg(long)]
        to: Option<String>,
        /// Only the last N days
        #[arg(long, conflicts_with_all = ["from", "to", "this_month"])]
        last: Option<i64>,
        /// Only the current month
        #[arg(long, conflicts_with_all = ["from", "to"])]
        this_month: bool,
        /// Only this employee
        #[arg(short, long)]
        employee: Option<String>,
    },
    /// Mark a leave record as cancelled
    Cancel { id: String },
    /// Delete a leave record, or every record in a month
    Remove {
        #[arg(required_unless_present = "month")]
        id: Option<String>,
        /// Month to clear (YYYY-MM)
        #[arg(long, conflicts_with = "id")]
        month: Option<String>,
    },
    /// Print leave analytics
    Stats {
        #[arg(value_enum, default_value_t = report::StatsView::All)]
        view: report::StatsView,
        /// Show the breakdown for one employee
        #[arg(short, long)]
        employee: Option<String>,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// List the known leave types
    Types,
    /// Open the analytics dashboard
    Dashboard,
}

const ADD_KEYS: &[&str] = &["date", "until", "type", "comment"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let repo = FileLeaveRepository::new(cli.data_dir)?;
    let service = LeaveService::new(repo);
    debug!("Using records file {}", service.repository().file_path().display());
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Add { args }) => {
            let parsed = parse_args(&args);
            if parsed.name.is_empty() {
                return Err(anyhow!("Employee name is required."));
            }

            // Normalize metadata keys
            let mut metadata = HashMap::new();
            for (key, value) in parsed.metadata {
                let full_key = expand_key(&key, ADD_KEYS)?;
                metadata.insert(full_key, value);
            }

            let from = match metadata.get("date") {
                Some(d) => parse_leave_date(d, today)?,
                None => return Err(anyhow!("Leave date is required (date:YYYY-MM-DD).")),
            };
            let to = match metadata.get("until") {
                Some(d) => parse_leave_date(d, today)?,
                None => from,
            };
            let leave_type = match metadata.get("type") {
                Some(t) => resolve_leave_type(t)?,
                None => DEFAULT_LEAVE_TYPE.to_string(),
            };
            let comment = metadata.get("comment").map(String::as_str);

            let created = service.add_leave_range(&parsed.name, from, to, &leave_type, comment)?;
            println!(
                "Added {} {} record(s) for {}",
                created.len(),
                leave_type,
                parsed.name
            );
            for record in &created {
                println!("  {}  {}", record.leave_date, record.id);
            }
        }
        Some(Commands::List { from, to, last, this_month, employee }) => {
            let filter = if let Some(days) = last {
                RecordFilter::last_days(today, days)
            } else if this_month {
                RecordFilter::current_month(today)
            } else {
                RecordFilter {
                    from: from.map(|d| parse_leave_date(&d, today)).transpose()?,
                    to: to.map(|d| parse_leave_date(&d, today)).transpose()?,
                    employee: None,
                }
            }
            .with_employee(employee);

            if !filter.is_valid_range() {
                return Err(anyhow!("--from must not be after --to"));
            }

            let records = service.list_leaves()?;
            listing::show_listing(&records, &filter);
        }
        Some(Commands::Cancel { id }) => {
            let record = service.cancel_leave(&id)?;
            println!(
                "Cancelled {} for {} on {}",
                record.effective_leave_type(),
                record.employee_name,
                record.leave_date
            );
        }
        Some(Commands::Remove { id, month }) => match (id, month) {
            (_, Some(month)) => {
                let (year, month) = parse_month(&month)?;
                let removed = service.remove_month(year, month)?;
                println!("Removed {} record(s) from {}-{:02}", removed, year, month);
            }
            (Some(id), None) => {
                service.remove_leave(&id)?;
                println!("Removed {}", id);
            }
            (None, None) => return Err(anyhow!("Give a record id or --month YYYY-MM.")),
        },
        Some(Commands::Stats { view, employee, json }) => {
            let analytics = service.analytics()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analytics)?);
            } else if let Some(name) = employee {
                let summary = analytics
                    .employee(&name)
                    .ok_or_else(|| anyhow!("No leave records for '{}'", name))?;
                report::show_employee_detail(summary);
            } else {
                report::show_analytics(&analytics, view);
            }
        }
        Some(Commands::Types) => {
            for leave_type in KNOWN_LEAVE_TYPES {
                println!("{}", leave_type);
            }
        }
        Some(Commands::Dashboard) | None => {
            tui::run(service)?;
        }
    }
    Ok(())
}

