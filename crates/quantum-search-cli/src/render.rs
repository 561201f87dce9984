//! Terminal rendering for results, summaries and the landing view

use colored::Colorize;

use quantum_search::{AiSummary, ResultBundle, SearchHistory, SearchResultItem};

const SNIPPET_CHARS: usize = 200;

pub fn landing(history: &SearchHistory, trending: &[&str]) {
    println!("{}", "Quantum Search".cyan().bold());
    println!("{}", "Web results with AI-generated insight".dimmed());
    println!();
    self::trending(trending);
    if !history.is_empty() {
        println!();
        self::history(history);
    }
}

pub fn trending(queries: &[&str]) {
    println!("{}", "Trending:".bold());
    for q in queries {
        println!("  {} {}", "↗".magenta(), q);
    }
}

pub fn history(history: &SearchHistory) {
    if history.is_empty() {
        println!("No recent searches.");
        return;
    }

    println!("{}", "Recent searches:".bold());
    for (i, q) in history.entries().iter().enumerate() {
        println!("  {} {}", format!("#{}", i + 1).dimmed(), q);
    }
}

pub fn results(bundle: &ResultBundle) {
    println!(
        "{} results for '{}'",
        bundle.results.len().to_string().green(),
        bundle.query.as_str().cyan()
    );

    if bundle.results.is_empty() {
        println!("  {}", "Nothing found. Try a different query.".dimmed());
        return;
    }

    for item in &bundle.results {
        println!();
        result_item(item);
    }
}

fn result_item(item: &SearchResultItem) {
    let date = item
        .published_date
        .map(|d| format!(" · {}", d.format("%b %-d, %Y")))
        .unwrap_or_default();

    println!(
        "{} {}",
        format!("{:>2}.", display_rank(item)).dimmed(),
        item.title.bold()
    );
    println!("    {}{}", item.host_name.green(), date.dimmed());
    println!("    {}", item.url.blue().underline());
    if !item.snippet.is_empty() {
        println!("    {}", truncate_string(&item.snippet, SNIPPET_CHARS));
    }
}

pub fn summary(summary: &AiSummary) {
    println!();
    println!("{}", "✦ AI Insight".magenta().bold());
    println!("  {}", summary.summary);

    if !summary.key_points.is_empty() {
        println!();
        println!("  {}", "Key points:".bold());
        for point in &summary.key_points {
            println!("  {} {}", "•".magenta(), point);
        }
    }
}

pub fn summary_pending() {
    println!();
    println!("{}", "✦ Generating AI insight...".magenta().dimmed());
}

pub fn summary_unavailable() {
    println!();
    println!("{}", "✦ AI insight unavailable for this query.".yellow());
}

fn display_rank(item: &SearchResultItem) -> u32 {
    item.rank.saturating_add(1)
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}
