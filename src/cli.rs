use std::path::PathBuf;

#[derive(Debug, Default, PartialEq)]
pub struct Cli {
    pub username: String,
    pub csv: Option<PathBuf>,     // file, or directory for chess-stats-<user>.csv
    pub json: bool,
    pub latest: bool,
    pub no_chart: bool,
    pub base_url: Option<String>, // overrides config.toml
    pub verbosity: u8,
    pub help: bool,
}

pub fn parse() -> Cli {
    parse_from(std::env::args().skip(1))
}

pub fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Cli {
    let mut cli = Cli::default();

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--csv" | "-o" => {
                if let Some(p) = it.next() { cli.csv = Some(PathBuf::from(p)); }
            }
            "--json" => cli.json = true,
            "--latest" => cli.latest = true,
            "--no-chart" => cli.no_chart = true,
            "--base-url" => {
                if let Some(u) = it.next() { cli.base_url = Some(u); }
            }
            "--verbose" | "-v" => cli.verbosity = cli.verbosity.saturating_add(1),
            "-vv" => cli.verbosity = cli.verbosity.saturating_add(2),
            "--help" | "-h" => cli.help = true,
            s if !s.starts_with('-') && cli.username.is_empty() => cli.username = s.trim().to_string(),
            _ => {}
        }
    }

    cli
}

pub fn print_help() {
    eprintln!(
r#"Chess archive stats

Usage:
  chess-archive-stats <username> [--csv PATH] [--json] [--latest] [--no-chart] [--base-url URL] [-v]

Options:
  --csv, -o PATH      Write a CSV export.
                      - a directory: writes chess-stats-<username>.csv inside it
                      - otherwise: the file path to write
  --json              Print monthly summaries as JSON instead of a table.
  --latest            Only the most recent month.
  --no-chart          Skip the games-per-month chart.
  --base-url URL      Override the player API root (default from config.toml).
  -v, --verbose       Request URLs and timings; -vv adds per-game detail.
  -h, --help          Show this help.

Notes:
  • Settings are read from config.toml in the working directory.
  • CHESS_STATS_BASE_URL / CHESS_STATS_USER_AGENT (or .env) override it.
"#);
}
