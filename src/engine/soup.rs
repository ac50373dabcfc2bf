// Feature soup construction.
//
// Each movie's metadata collapses into a single space-joined text blob —
// the "soup" the vectorizer treats as that movie's document. Section order
// is fixed, so the same record always produces the same bytes.

use crate::catalog::movie::Movie;

use super::normalize::normalize_field;

/// Build the feature soup for one movie.
///
/// Sections, in order: genres, keywords, actors (comma-split, trimmed),
/// director, vote average, popularity. A missing field contributes an empty
/// section, never a placeholder token.
pub fn build_soup(movie: &Movie) -> String {
    let genres = normalize_field(movie.genres.as_ref()).join(" ");
    let keywords = normalize_field(movie.keywords.as_ref()).join(" ");

    let actors = movie
        .actors
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    let director = movie.director.as_deref().unwrap_or("");
    let vote_average = movie.vote_average.map(fmt_score).unwrap_or_default();
    let popularity = movie.popularity.map(fmt_score).unwrap_or_default();

    format!("{genres} {keywords} {actors} {director} {vote_average} {popularity}")
}

fn fmt_score(value: f64) -> String {
    value.to_string()
}
