//! Rendering of monthly summaries: totals, terminal table and chart, CSV.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::model::MonthlySummary;

const CHART_WIDTH: usize = 40;

/// Sum of every summary, computed on demand.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Totals {
    pub total_seconds: u64,
    pub game_count: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

impl Totals {
    pub fn from_summaries(summaries: &[MonthlySummary]) -> Self {
        summaries.iter().fold(Self::default(), |mut acc, s| {
            acc.total_seconds += s.total_seconds;
            acc.game_count += s.game_count;
            acc.wins += s.wins;
            acc.losses += s.losses;
            acc.draws += s.draws;
            acc
        })
    }

    pub fn record(&self) -> String {
        format!("{}/{}/{}", self.wins, self.losses, self.draws)
    }
}

fn pluralize(value: &str, unit: &str) -> String {
    if value == "1" {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

/// "42 minutes" below an hour, otherwise hours to one decimal ("1.5 hours").
pub fn format_duration(total_seconds: u64) -> String {
    let total_minutes = total_seconds / 60;
    if total_minutes < 60 {
        return pluralize(&total_minutes.to_string(), "minute");
    }
    let tenths = (total_seconds as f64 / 360.0).round() as u64;
    let display = if tenths % 10 == 0 {
        (tenths / 10).to_string()
    } else {
        format!("{}.{}", tenths / 10, tenths % 10)
    };
    pluralize(&display, "hour")
}

/// "2024/03" -> "Mar 2024"; anything else is shown as-is.
pub fn month_label(archive_month: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}/01", archive_month), "%Y/%m/%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| archive_month.to_string())
}

pub fn sort_newest_first(summaries: &mut [MonthlySummary]) {
    summaries.sort_by(|a, b| b.archive_month.cmp(&a.archive_month));
}

/// Totals block followed by one row per month.
pub fn render_table(summaries: &[MonthlySummary], totals: &Totals) -> String {
    let mut out = format!(
        "Cumulative Time  {}\nAll Time Games   {}\nAll Time Record  {}\n\n",
        format_duration(totals.total_seconds),
        totals.game_count,
        totals.record()
    );
    out.push_str(&format!("{:<10} {:>14} {:>7}  {}\n", "Month", "Time Played", "Games", "Record (W/L/D)"));
    for s in summaries {
        out.push_str(&format!(
            "{:<10} {:>14} {:>7}  {}\n",
            month_label(&s.archive_month),
            format_duration(s.total_seconds),
            s.game_count,
            s.record()
        ));
    }
    out
}

/// Games played over the most recent `months`, oldest first.
/// Expects `newest_first` sorted by `sort_newest_first`.
pub fn render_activity_chart(newest_first: &[MonthlySummary], months: usize) -> String {
    let recent: Vec<&MonthlySummary> = newest_first.iter().take(months).rev().collect();
    if recent.is_empty() {
        return String::new();
    }
    let max = recent.iter().map(|s| s.game_count).max().unwrap_or(0).max(1);

    let mut out = format!("Games Played (Last {} Months)\n", months);
    for s in recent {
        let len = ((s.game_count as f64 / max as f64) * CHART_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "{:<10} {:<width$} {}\n",
            month_label(&s.archive_month),
            "#".repeat(len),
            s.game_count,
            width = CHART_WIDTH
        ));
    }
    out
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn write_row<W: Write>(w: &mut W, fields: &[String]) -> io::Result<()> {
    let line: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
    write!(w, "{}\r\n", line.join(","))
}

/// BOM-prefixed CSV with one row per month and a trailing "Overall" row.
pub fn write_csv<W: Write>(w: &mut W, summaries: &[MonthlySummary], totals: &Totals) -> io::Result<()> {
    w.write_all("\u{feff}".as_bytes())?;
    write_row(
        w,
        &["Month", "Time Played", "Games", "Record (W/L/D)"].map(String::from),
    )?;
    for s in summaries {
        write_row(
            w,
            &[
                s.archive_month.clone(),
                format_duration(s.total_seconds),
                s.game_count.to_string(),
                s.record(),
            ],
        )?;
    }
    write_row(
        w,
        &[
            "Overall".to_string(),
            format_duration(totals.total_seconds),
            totals.game_count.to_string(),
            totals.record(),
        ],
    )
}

/// `chess-stats-<username>.csv`, with anything outside `[A-Za-z0-9_.-]` replaced.
pub fn csv_file_name(username: &str) -> String {
    let name = if username.is_empty() { "player" } else { username };
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') { c } else { '_' })
        .collect();
    format!("chess-stats-{}.csv", safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(month: &str, secs: u64, games: u64, w: u64, l: u64, d: u64) -> MonthlySummary {
        MonthlySummary {
            archive_url: format!("https://api.chess.com/pub/player/x/games/{}", month),
            archive_month: month.to_string(),
            total_seconds: secs,
            game_count: games,
            wins: w,
            losses: l,
            draws: d,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 minutes");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(59 * 60 + 59), "59 minutes");
        assert_eq!(format_duration(3600), "1 hour");
        assert_eq!(format_duration(5400), "1.5 hours");
        assert_eq!(format_duration(7200), "2 hours");
        assert_eq!(format_duration(3600 + 170), "1 hour");
        assert_eq!(format_duration(3600 * 10 + 1500), "10.4 hours");
    }

    #[test]
    fn test_totals_and_record() {
        let s = [summary("2024/01", 100, 3, 1, 1, 0), summary("2024/02", 50, 2, 0, 1, 1)];
        let t = Totals::from_summaries(&s);
        assert_eq!(t.total_seconds, 150);
        assert_eq!(t.game_count, 5);
        assert_eq!(t.record(), "1/2/1");
        assert_eq!(Totals::from_summaries(&[]), Totals::default());
    }

    #[test]
    fn test_sort_newest_first() {
        let mut s = vec![summary("2023/11", 0, 0, 0, 0, 0), summary("2024/02", 0, 0, 0, 0, 0), summary("2024/01", 0, 0, 0, 0, 0)];
        sort_newest_first(&mut s);
        let keys: Vec<&str> = s.iter().map(|s| s.archive_month.as_str()).collect();
        assert_eq!(keys, ["2024/02", "2024/01", "2023/11"]);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("2024/03"), "Mar 2024");
        assert_eq!(month_label("garbage"), "garbage");
    }

    #[test]
    fn test_write_csv() {
        let s = [summary("2024/02", 5400, 4, 2, 1, 1), summary("2024/01", 120, 1, 0, 0, 0)];
        let t = Totals::from_summaries(&s);
        let mut buf = Vec::new();
        write_csv(&mut buf, &s, &t).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "\u{feff}Month,Time Played,Games,Record (W/L/D)\r\n\
             2024/02,1.5 hours,4,2/1/1\r\n\
             2024/01,2 minutes,1,0/0/0\r\n\
             Overall,1.5 hours,5,2/1/1\r\n"
        );
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_file_name() {
        assert_eq!(csv_file_name("MagnusCarlsen"), "chess-stats-MagnusCarlsen.csv");
        assert_eq!(csv_file_name("a b/c"), "chess-stats-a_b_c.csv");
        assert_eq!(csv_file_name(""), "chess-stats-player.csv");
    }

    #[test]
    fn test_render_table_exact_layout() {
        let s = [summary("2024/01", 120, 1, 0, 0, 0)];
        let out = render_table(&s, &Totals::from_summaries(&s));
        assert_eq!(
            out,
            "Cumulative Time  2 minutes\n\
             All Time Games   1\n\
             All Time Record  0/0/0\n\
             \n\
             Month         Time Played   Games  Record (W/L/D)\n\
             Jan 2024        2 minutes       1  0/0/0\n"
        );
    }

    #[test]
    fn test_render_table_lists_every_month() {
        let s = [summary("2024/02", 5400, 4, 2, 1, 1), summary("2024/01", 120, 1, 0, 0, 0)];
        let out = render_table(&s, &Totals::from_summaries(&s));
        assert!(out.contains("All Time Games   5"));
        assert!(out.contains("All Time Record  2/1/1"));
        assert!(out.contains("Feb 2024"));
        assert!(out.contains("Jan 2024"));
        assert_eq!(out.lines().count(), 3 + 1 + 1 + 2);
    }

    #[test]
    fn test_activity_chart_takes_recent_oldest_first() {
        let s = [
            summary("2024/03", 0, 10, 0, 0, 0),
            summary("2024/02", 0, 5, 0, 0, 0),
            summary("2024/01", 0, 0, 0, 0, 0),
        ];
        let out = render_activity_chart(&s, 2);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Feb 2024"));
        assert!(lines[2].starts_with("Mar 2024"));
        assert_eq!(lines[1].matches('#').count(), CHART_WIDTH / 2);
        assert_eq!(lines[2].matches('#').count(), CHART_WIDTH);
        assert!(render_activity_chart(&[], 12).is_empty());
    }
}
