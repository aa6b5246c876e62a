mod analyze;
mod fetch;
mod model;
mod pipeline;
mod report;
mod store;
mod tracker;
mod utils;

use crate::report::MarkdownReport;
use crate::store::FsRecordStore;
use crate::tracker::HttpTracker;
use chrono::{Local, NaiveDate};
use clap::Parser;
use indicatif::MultiProgress;
use model::{ReportError, ReportWindow, Result, Unit};

#[derive(Parser, Debug, Clone)]
struct Args {
    #[arg(long = "units", default_value = "units.json")]
    units_path: String,
    #[arg(long = "unit")]
    unit: String,
    #[arg(long = "week_offset", default_value_t = -1, allow_hyphen_values = true)]
    week_offset: i64,
    #[arg(long = "batch_size", default_value_t = fetch::DEFAULT_BATCH_SIZE)]
    batch_size: usize,
    #[arg(long = "tracker_url")]
    tracker_url: String,
    #[arg(long = "tracker_token")]
    tracker_token: String,
    #[arg(long = "store_path", default_value = "records")]
    store_path: String,
    #[arg(long = "out", default_value = ".")]
    out_path: String,
    /// Reference date for the week-offset computation, defaults to today.
    #[arg(long = "today")]
    today: Option<NaiveDate>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    run(&args).await.unwrap()
}

async fn run(args: &Args) -> Result<()> {
    let units = Unit::from_config(&args.units_path)?;
    let unit = units
        .iter()
        .find(|unit| unit.name == args.unit)
        .ok_or_else(|| {
            ReportError::Config(format!(
                "Not found unit `{}` in `{}`",
                args.unit, args.units_path
            ))
        })?
        .clone();

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let window = ReportWindow::from_offset(today, args.week_offset);

    let tracker = HttpTracker::new(&args.tracker_url, &args.tracker_token);
    let run_scope = format!("{}-{}-{}", unit.name, window.start_date, std::process::id());
    let store = FsRecordStore::open(&args.store_path, &run_scope)?;

    let multi_progress = MultiProgress::default();
    multi_progress.println(format!(
        "# {} ({} - {})",
        unit.name, window.start_date, window.end_date
    ))?;

    let report = pipeline::run(
        &unit,
        window,
        args.batch_size,
        &tracker,
        &store,
        &multi_progress,
    )
    .await?;

    let path = report.report_write(&args.out_path)?;
    multi_progress.println(format!("✅ Report written to `{}`", path.display()))?;
    Ok(())
}
