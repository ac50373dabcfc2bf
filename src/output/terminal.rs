// Colored terminal output for recommendation lists and browse pages.
//
// This module handles all terminal-specific formatting: colors, tables,
// pagination strips. The main.rs display functions delegate here.

use colored::Colorize;

use crate::catalog::browse::BrowsePage;
use crate::catalog::movie::Movie;
use crate::engine::normalize::normalize_field;

use super::pagination::{page_window, PageItem};

/// Display a ranked recommendation list in the terminal.
pub fn display_recommendations(query: &Movie, recommendations: &[&Movie]) {
    println!(
        "\n{}",
        format!("=== Because you watched: {} ===", query.title).bold()
    );
    println!();

    if recommendations.is_empty() {
        println!("  No similar movies found.");
        return;
    }

    println!(
        "  {:>4}  {:<38} {:<26} {:>6}",
        "Rank".dimmed(),
        "Title".dimmed(),
        "Genres".dimmed(),
        "Rating".dimmed(),
    );
    println!("  {}", "-".repeat(80).dimmed());

    for (i, movie) in recommendations.iter().enumerate() {
        let genres = normalize_field(movie.genres.as_ref()).join(", ");
        println!(
            "  {:>4}. {:<38} {:<26} {:>6}",
            i + 1,
            truncate(&movie.title, 38),
            truncate(&genres, 26).dimmed(),
            rating_cell(movie.vote_average),
        );
    }
    println!();
}

/// Display one browse page: matches, active filters, and the page strip.
pub fn display_browse_page(page: &BrowsePage, query: Option<&str>, genre: Option<&str>) {
    let mut filters = Vec::new();
    if let Some(q) = query {
        filters.push(format!("title ~ \"{q}\""));
    }
    if let Some(g) = genre {
        filters.push(format!("genre = {g}"));
    }
    let filter_note = if filters.is_empty() {
        String::new()
    } else {
        format!(" [{}]", filters.join(", "))
    };

    println!(
        "\n{}",
        format!(
            "=== Catalog — {} match{}{} ===",
            page.total_matches,
            if page.total_matches == 1 { "" } else { "es" },
            filter_note
        )
        .bold()
    );
    println!();

    if page.movies.is_empty() {
        println!("  Nothing on this page. Try a lower --page or a looser filter.");
        return;
    }

    println!(
        "  {:>8}  {:<40} {:<20} {:>6}",
        "Id".dimmed(),
        "Title".dimmed(),
        "Director".dimmed(),
        "Rating".dimmed(),
    );
    println!("  {}", "-".repeat(80).dimmed());

    for movie in &page.movies {
        let director = movie.director.as_deref().unwrap_or("-");
        println!(
            "  {:>8}  {:<40} {:<20} {:>6}",
            movie.id,
            truncate(&movie.title, 40),
            truncate(director, 20).dimmed(),
            rating_cell(movie.vote_average),
        );
    }

    println!();
    println!("  {}", page_strip(page.page, page.total_pages));
}

/// Render the pagination strip, bolding the current page.
fn page_strip(current: usize, total: usize) -> String {
    let items: Vec<String> = page_window(current, total, 2)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(page) if page == current => page.to_string().bold().to_string(),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "...".dimmed().to_string(),
        })
        .collect();

    if items.is_empty() {
        format!("page {current} of {}", total.max(1))
    } else {
        format!("pages: {}", items.join(" "))
    }
}

fn rating_cell(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(score) if score >= 7.5 => format!("{score:>6.1}").bright_green().to_string(),
        Some(score) if score >= 6.0 => format!("{score:>6.1}").bright_yellow().to_string(),
        Some(score) => format!("{score:>6.1}"),
        None => format!("{:>6}", "-"),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Heat", 10), "Heat");
    }

    #[test]
    fn truncate_cuts_long_text_with_marker() {
        let cut = truncate("The Assassination of Jesse James", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
