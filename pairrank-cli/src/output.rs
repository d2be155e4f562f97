/// Output formatting: terminal table and JSON.
use pairrank_core::constants::SHARE_QUERY_PARAM;
use pairrank_core::{Category, Item, PoolStats, Progress, ScoredItem, SharedRanking, score};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedItem {
    rank: usize,
    name: String,
    artist: String,
    category: Category,
    score: f64,
}

#[derive(Serialize)]
struct JsonOutput {
    owner: Option<String>,
    items: Vec<JsonRankedItem>,
    total_comparisons: usize,
    unranked: usize,
    share_code: Option<String>,
}

/// Ranking as a fixed-width table, one row per item.
pub fn render_table(rows: &[(usize, f64, &Item)]) -> String {
    let name_width = rows.iter()
        .map(|(_, _, item)| item.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"
    let artist_width = rows.iter()
        .map(|(_, _, item)| item.artist.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut out = String::new();
    out.push_str(&format!("  # | {:<name_width$} | {:<artist_width$} | Category     | Score\n", "Item", "Artist"));
    out.push_str(&format!("----|-{}-|-{}-|--------------|------\n", "-".repeat(name_width), "-".repeat(artist_width)));
    for (rank, score, item) in rows {
        out.push_str(&format!(
            "{:>3} | {:<name_width$} | {:<artist_width$} | {:<12} | {:>5.1}\n",
            rank, item.name, item.artist, item.category.label(), score,
        ));
    }
    out
}

fn rows<'a>(scored: &'a [ScoredItem<'a>]) -> Vec<(usize, f64, &'a Item)> {
    scored.iter().map(|r| (r.rank, r.score, r.item)).collect()
}

fn plural(category: Category) -> &'static str {
    match category {
        Category::Original => "originals",
        Category::SideProject => "side projects",
        Category::Cover => "covers",
    }
}

/// Categories that survive merging, e.g. "3 originals, 1 covers".
fn breakdown_line(stats: &PoolStats, merge_side_projects: bool) -> String {
    Category::ALL
        .into_iter()
        .filter(|&c| c.effective(merge_side_projects) == c)
        .map(|c| format!("{} {}", stats.count(c), plural(c)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print results as a formatted terminal table.
pub fn print_table(
    scored: &[ScoredItem<'_>],
    progress: Progress,
    breakdown: &PoolStats,
    merge_side_projects: bool,
    total_comparisons: usize,
) {
    if scored.is_empty() {
        println!("Nothing ranked yet.");
        return;
    }
    print!("{}", render_table(&rows(scored)));
    println!(
        "\nRanked {} of {} ({:.0}%) with {} comparisons. {}",
        progress.ranked,
        progress.total,
        progress.fraction() * 100.0,
        total_comparisons,
        breakdown_line(breakdown, merge_side_projects),
    );
}

pub fn print_share_code(code: &str) {
    println!("\nShare code: {code}");
    println!("Link suffix: ?{SHARE_QUERY_PARAM}={code}");
}

/// Results as a pretty-printed JSON document.
pub fn render_json(
    scored: &[ScoredItem<'_>],
    owner: Option<&str>,
    share_code: Option<&str>,
    unranked: usize,
    total_comparisons: usize,
) -> serde_json::Result<String> {
    let items: Vec<JsonRankedItem> = scored
        .iter()
        .map(|r| JsonRankedItem {
            rank: r.rank,
            name: r.item.name.clone(),
            artist: r.item.artist.clone(),
            category: r.item.category,
            score: r.score,
        })
        .collect();

    let output = JsonOutput {
        owner: owner.map(str::to_string),
        items,
        total_comparisons,
        unranked,
        share_code: share_code.map(str::to_string),
    };

    serde_json::to_string_pretty(&output)
}

/// Print results as JSON.
pub fn print_json(
    scored: &[ScoredItem<'_>],
    owner: Option<&str>,
    share_code: Option<&str>,
    unranked: usize,
    total_comparisons: usize,
) {
    match render_json(scored, owner, share_code, unranked, total_comparisons) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize results: {e}")),
    }
}

/// Print a ranking decoded from a share code.
pub fn print_shared(shared: &SharedRanking) {
    let owner = if shared.owner_name.is_empty() { "Someone" } else { shared.owner_name.as_str() };
    println!("{owner}'s ranking\n");
    let total = shared.items.len();
    let rows: Vec<(usize, f64, &Item)> = shared
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| (i + 1, score(i + 1, total), item))
        .collect();
    print!("{}", render_table(&rows));
    if !shared.dropped.is_empty() {
        println!(
            "\n{} item(s) in this ranking aren't in your catalog and were left out: {}",
            shared.dropped.len(),
            shared.dropped.join(", "),
        );
    }
}

/// Pool preview: counts, play-count spread and the ten most played.
pub fn print_pool_preview(pool: &[Item], stats: &PoolStats, merge_side_projects: bool) {
    println!("Pool: {} songs ({})", stats.total, breakdown_line(stats, merge_side_projects));
    if let (Some(most), Some(avg), Some(least)) = (stats.most_played, stats.average_played, stats.least_played) {
        println!("Plays: most {most}x, average {avg}x, least {least}x");
    }
    if pool.is_empty() {
        return;
    }
    println!("\nTop 10 in your pool (by play count):");
    for (i, item) in pool.iter().take(10).enumerate() {
        println!("{:>3}. {} ({}x) - {}", i + 1, item.name, item.times_played, item.artist);
    }
    if pool.len() > 10 {
        let min_plays = pool.iter().map(|i| i.times_played).min().unwrap_or(0);
        println!("...and {} more songs (minimum {min_plays} plays)", pool.len() - 10);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_rows() {
        let a = Item::new("Arcadia", "Goose", Category::Original, 1);
        let b = Item::new("Shakedown Street", "Grateful Dead", Category::Cover, 1);
        let table = render_table(&[(1, 10.0, &a), (2, 0.0, &b)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Item"));
        assert!(lines[2].contains("Arcadia") && lines[2].ends_with(" 10.0"));
        assert!(lines[3].contains("Cover") && lines[3].ends_with("  0.0"));
    }

    #[test]
    fn test_breakdown_line_merged() {
        let stats = PoolStats { originals: 3, side_projects: 0, covers: 1, ..Default::default() };
        assert_eq!(breakdown_line(&stats, true), "3 originals, 1 covers");
        assert_eq!(breakdown_line(&stats, false), "3 originals, 0 side projects, 1 covers");
    }
}
