use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use chess_archive_stats::error::FetchError;
use chess_archive_stats::model::MonthlySummary;
use chess_archive_stats::remote::ChessCom;
use chess_archive_stats::{aggregator, cli, config, report};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = cli::parse();
    if args.help {
        cli::print_help();
        return Ok(ExitCode::SUCCESS);
    }
    chess_archive_stats::set_verbosity(args.verbosity);

    if args.username.is_empty() {
        cli::print_help();
        return Ok(ExitCode::from(2));
    }

    let mut cfg = config::Config::load();
    // CLI override > env > config.toml
    if let Some(url) = args.base_url.clone() {
        cfg.base_url = url;
    }
    if let Some(n) = cfg.rayon_threads {
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    }

    let source = ChessCom::from_config(&cfg).context("building HTTP client")?;
    let username = args.username.as_str();

    eprintln!("Fetching archives for {}...", username);
    let t0 = Instant::now();
    let fetched: Result<Vec<MonthlySummary>, FetchError> = if args.latest {
        aggregator::most_recent_summary(&source, username)
            .await
            .map(|latest| latest.into_iter().collect())
    } else {
        aggregator::summarize_all_months(&source, username).await
    };
    let mut summaries = match fetched {
        Err(e @ FetchError::NotFound { .. }) => {
            eprintln!("Error fetching archives for {}: {}", username, e);
            return Ok(ExitCode::FAILURE);
        }
        other => other.with_context(|| format!("fetching archives for {}", username))?,
    };
    if chess_archive_stats::verbose_enabled() {
        eprintln!("main: {} summaries in {:.3}s", summaries.len(), t0.elapsed().as_secs_f64());
    }

    if summaries.is_empty() {
        eprintln!("No archives found for {}.", username);
        return Ok(ExitCode::SUCCESS);
    }
    let n = summaries.len();
    eprintln!("Loaded {} month{} for {}.", n, if n == 1 { "" } else { "s" }, username);

    report::sort_newest_first(&mut summaries);
    let totals = report::Totals::from_summaries(&summaries);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", report::render_table(&summaries, &totals));
        if !args.no_chart {
            println!();
            print!("{}", report::render_activity_chart(&summaries, cfg.chart_months));
        }
    }

    if let Some(out) = args.csv.as_deref() {
        let path = csv_path(out, username);
        write_csv_file(&path, &summaries, &totals)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        eprintln!("CSV written to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

/// A directory gets the default file name inside it; anything else is used as-is.
fn csv_path(out: &Path, username: &str) -> PathBuf {
    if out.is_dir() {
        out.join(report::csv_file_name(username))
    } else {
        out.to_path_buf()
    }
}

fn write_csv_file(path: &Path, summaries: &[MonthlySummary], totals: &report::Totals) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    report::write_csv(&mut w, summaries, totals)?;
    std::io::Write::flush(&mut w)
}
