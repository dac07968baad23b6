use std::time::Instant;

use futures::future::try_join_all;
use rayon::prelude::*;

use crate::error::Result;
use crate::model::{GameRecord, MonthlySummary};
use crate::pgn::extract_fields;
use crate::remote::ArchiveSource;

/// Month key of an archive: its trailing 7 characters ("YYYY/MM").
pub fn archive_month(archive_url: &str) -> String {
    let n = archive_url.chars().count();
    archive_url.chars().skip(n.saturating_sub(7)).collect()
}

/// Reduce one month's games into a summary for `player`.
/// Games without notation text are left out entirely.
pub fn summarize_month(games: &[GameRecord], player: &str, archive_url: &str) -> MonthlySummary {
    let mut summary = MonthlySummary::new(archive_url, archive_month(archive_url));

    for game in games {
        if game.notation().is_none() {
            continue;
        }
        let fields = extract_fields(game);
        let seconds = fields.elapsed_seconds();
        let outcome = fields.outcome_for(player);
        vvprintln!(
            "game: {} vs {} result={:?} -> {:?}, {}s",
            fields.white.as_deref().unwrap_or("?"),
            fields.black.as_deref().unwrap_or("?"),
            fields.result,
            outcome,
            seconds
        );
        summary.add_game(seconds, outcome);
    }

    summary
}

/// Fetch every archive of `player` concurrently and summarize each month.
///
/// Output follows the order the source listed the archives in. The first
/// failing fetch fails the whole call.
pub async fn summarize_all_months<S: ArchiveSource>(
    source: &S,
    player: &str,
) -> Result<Vec<MonthlySummary>> {
    let urls = source.list_archives(player).await?;
    if urls.is_empty() {
        return Ok(Vec::new());
    }

    let t0 = Instant::now();
    let batches = try_join_all(urls.iter().map(|url| source.fetch_games(url))).await?;
    vprintln!("aggregate: fetched {} months in {:.3}s", urls.len(), t0.elapsed().as_secs_f64());

    let t1 = Instant::now();
    let summaries: Vec<MonthlySummary> = urls
        .par_iter()
        .zip(batches.par_iter())
        .map(|(url, games)| summarize_month(games, player, url))
        .collect();
    vprintln!("aggregate: summarized in {:.3}s", t1.elapsed().as_secs_f64());

    for s in &summaries {
        vprintln!(
            "aggregate: {} games={} decided={} time={}s record={}",
            s.archive_month,
            s.game_count,
            s.decided(),
            s.total_seconds,
            s.record()
        );
    }
    Ok(summaries)
}

/// Summary of the last archive the source lists, if any.
pub async fn most_recent_summary<S: ArchiveSource>(
    source: &S,
    player: &str,
) -> Result<Option<MonthlySummary>> {
    Ok(summarize_all_months(source, player).await?.pop())
}
