use std::sync::{Arc, OnceLock};

use clap::Parser;
use regex::Regex;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use payrun_client::HttpPayrunService;
use payrun_core::PayrunService;
use payrun_form::export::{export_file_name, ist_now};
use payrun_form::report::comparison_report;
use payrun_form::{FormSession, UserRef};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Income-tax regime comparison for payrun employees.
///
/// Fetches the employee record, seeds the estimation form, runs one
/// computation against the tax back-end, and prints both regimes side by
/// side with the cheaper one highlighted.
#[derive(Debug, Parser)]
struct Cli {
    /// Payrun API root.
    #[arg(long, default_value = "https://apiv1.resolvepay.in/payrun")]
    base_url: String,

    /// User reference: a bare id, a URL carrying `?uid=`, or a URL whose
    /// last path segment is the id.
    #[arg(long)]
    user: String,

    /// Financial year the computation runs for.
    #[arg(long, default_value = "2025-2026", value_parser = parse_financial_year)]
    financial_year: String,

    /// Star rating (1-5) to submit after a successful estimate.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    rate: Option<u8>,
}

/// Accepts `YYYY-YYYY` spanning two consecutive years.
fn parse_financial_year(s: &str) -> Result<String, String> {
    static FY: OnceLock<Regex> = OnceLock::new();
    let re = FY.get_or_init(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("pattern compiles"));

    let caps = re
        .captures(s)
        .ok_or_else(|| format!("'{s}' is not of the form YYYY-YYYY"))?;
    let start: i32 = caps[1].parse().map_err(|_| "start year out of range")?;
    let end: i32 = caps[2].parse().map_err(|_| "end year out of range")?;
    if end != start + 1 {
        return Err(format!("'{s}' must span two consecutive years"));
    }
    Ok(s.to_string())
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let user = UserRef::from_url(&cli.user)?;
    let service = Arc::new(HttpPayrunService::new(&cli.base_url));

    debug!(user = %user, "fetching employee record");
    let employee = match service.employee_details(user.as_str()).await {
        Ok(record) => {
            if !record.computation_window_open() {
                info!("{}", record.window_closed_notice());
                return Ok(());
            }
            Some(record)
        }
        Err(e) => {
            warn!(error = %e, "employee fetch failed; starting from defaults");
            None
        }
    };
    let employee_record = employee.clone().unwrap_or_default();

    let (session, handle, mut snapshots) =
        FormSession::new(service.clone(), user.as_str(), &cli.financial_year, employee);
    let session_task = tokio::spawn(session.run());

    handle.calculate();
    snapshots.wait_for(|snapshot| snapshot.loading).await?;
    let settled = snapshots.wait_for(|snapshot| !snapshot.loading).await?.clone();

    handle.shutdown();
    let _ = session_task.await;

    match (settled.result, settled.error) {
        (Some(result), _) => {
            let when = ist_now();
            info!("\n{}", comparison_report(&employee_record, &result, when));
            debug!(
                file = %export_file_name(&employee_record.employee_name, when),
                "export file name for the results panel"
            );

            if let Some(stars) = cli.rate {
                // Fire and forget: a failed rating is logged, never surfaced.
                if let Err(e) = service.submit_rating(user.as_str(), stars).await {
                    debug!(error = %e, "rating submission failed");
                }
            }
            Ok(())
        }
        (None, Some(message)) => anyhow::bail!(message),
        (None, None) => anyhow::bail!("computation settled with neither a result nor an error"),
    }
}
