pub mod args;
pub mod dates;
pub mod output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use args::{GlobalArgs, ReportArgs};
use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use dates::{days_between, parse_day};
use output::{print_dates, print_summary, EventPrinter};
use tracing::{error, info};

use crate::{
    config::Config,
    report::{merge_maps, UsageSummary},
    storage::{json_store::JsonFileStore, AppTimeMap, UsageStore},
    tracker::start_tracker,
    utils::{
        clock::DefaultClock,
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX, TRACKER_PREFIX},
        runtime::multi_thread_runtime,
        time::date_to_record_name,
    },
};

pub const LOGS_DIR: &str = "logs";

#[derive(Parser, Debug)]
#[command(name = "screentime", version, long_about = None)]
#[command(about = "Tracks how long every application stays in the foreground", long_about = None)]
pub struct Args {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Track the foreground application in this console until stopped by a shortcut or Ctrl-C"
    )]
    Track,
    #[command(about = "Display the totals recorded today")]
    Today {
        #[command(flatten)]
        report: ReportArgs,
    },
    #[command(about = "Display the totals of a single day")]
    Show {
        #[arg(help = "Day to show. Examples are \"yesterday\", \"2025-03-15\", \"15/03/2025\"")]
        date: String,
        #[command(flatten)]
        report: ReportArgs,
    },
    #[command(about = "List the days that have recorded data")]
    Dates,
    #[command(about = "Display the combined totals of several days")]
    Range {
        #[arg(long, help = "First day of the range, included")]
        from: String,
        #[arg(long, help = "Last day of the range, included")]
        to: String,
        #[command(flatten)]
        report: ReportArgs,
    },
}

pub fn run_cli(Args { global, commands }: Args) -> Result<()> {
    let app_dir = global
        .dir
        .map_or_else(create_application_default_path, |dir| {
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })?;
    let prefix = match commands {
        Commands::Track => TRACKER_PREFIX,
        _ => CLI_PREFIX,
    };
    enable_logging(prefix, &app_dir.join(LOGS_DIR), global.log, global.log_console)?;

    let config = Config::load_from_dir(&app_dir)
        .inspect_err(|e| error!("Failed to load configuration {e:?}"))?;

    multi_thread_runtime()?
        .block_on(run_command(commands, app_dir, config))
        .inspect_err(|e| error!("Error running cli {e:?}"))
}

async fn run_command(commands: Commands, app_dir: PathBuf, config: Config) -> Result<()> {
    match commands {
        Commands::Track => track(&app_dir, &config).await,
        Commands::Today { report } => {
            let store = open_store(&app_dir, &config);
            let title = format!("Today {}", date_to_record_name(Local::now().date_naive()));
            show_report(&title, &store.today().await, report, &config);
            Ok(())
        }
        Commands::Show { date, report } => {
            let day = parse_day(&date, Local::now(), report.date_style.into())
                .map_err(validation_error)?;
            let store = open_store(&app_dir, &config);
            let name = date_to_record_name(day);
            show_report(&name, &store.date_entry(&name).await, report, &config);
            Ok(())
        }
        Commands::Dates => {
            let store = open_store(&app_dir, &config);
            print_dates(&store.all_dates().await);
            Ok(())
        }
        Commands::Range { from, to, report } => {
            let now = Local::now();
            let from = parse_day(&from, now, report.date_style.into()).map_err(validation_error)?;
            let to = parse_day(&to, now, report.date_style.into()).map_err(validation_error)?;
            let days = days_between(from, to).map_err(validation_error)?;

            let mut log = open_store(&app_dir, &config).load().await;
            let maps = days
                .into_iter()
                .filter_map(|day| log.remove(&date_to_record_name(day)))
                .collect::<Vec<_>>();
            let title = format!("{} to {}", date_to_record_name(from), date_to_record_name(to));
            show_report(&title, &merge_maps(&maps), report, &config);
            Ok(())
        }
    }
}

async fn track(app_dir: &Path, config: &Config) -> Result<()> {
    let catalog = config.catalog();
    let mut printer = EventPrinter::new(&catalog);
    info!("Starting tracker in {app_dir:?}");
    start_tracker(app_dir, config, |event| printer.print(event)).await?;

    let summary = UsageSummary::from_map(printer.last_times());
    print_summary("Today", &summary, &catalog);
    Ok(())
}

fn open_store(app_dir: &Path, config: &Config) -> JsonFileStore {
    JsonFileStore::new(config.data_file(app_dir), Box::new(DefaultClock))
}

fn show_report(title: &str, times: &AppTimeMap, report: ReportArgs, config: &Config) {
    let summary = UsageSummary::from_map(times).with_min_share(report.min_percentage);
    print_summary(title, &summary, &config.catalog());
}

fn validation_error(e: anyhow::Error) -> anyhow::Error {
    Args::command()
        .error(clap::error::ErrorKind::ValueValidation, format!("{e}"))
        .into()
}
