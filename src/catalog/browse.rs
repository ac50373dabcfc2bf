// Browse-surface helpers: title search, genre filtering, page slicing.
//
// Pure functions over the loaded catalog. The terminal (or any web layer)
// renders whatever comes back; nothing here touches I/O.

use std::collections::BTreeSet;

use crate::engine::normalize::normalize_field;

use super::movie::Movie;

/// Movies shown per browse page.
pub const PER_PAGE: usize = 20;

/// One page of browse results.
#[derive(Debug)]
pub struct BrowsePage<'a> {
    /// The movies on this page, in catalog order
    pub movies: Vec<&'a Movie>,
    /// 1-based page number (clamped to at least 1)
    pub page: usize,
    pub total_pages: usize,
    /// Matches across all pages, before slicing
    pub total_matches: usize,
}

/// Filter the catalog by title substring and genre, then slice out one page.
///
/// The title match is case-insensitive. The genre filter matches against the
/// movie's normalized genre tokens, also case-insensitively.
pub fn browse<'a>(
    catalog: &'a [Movie],
    query: Option<&str>,
    genre: Option<&str>,
    page: usize,
) -> BrowsePage<'a> {
    let query = query.map(str::to_lowercase);
    let genre = genre.map(str::to_lowercase);

    let matches: Vec<&Movie> = catalog
        .iter()
        .filter(|movie| match &query {
            Some(q) => movie.title.to_lowercase().contains(q),
            None => true,
        })
        .filter(|movie| match &genre {
            Some(g) => normalize_field(movie.genres.as_ref())
                .iter()
                .any(|name| name.to_lowercase().contains(g.as_str())),
            None => true,
        })
        .collect();

    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(PER_PAGE);
    let page = page.max(1);

    let start = (page - 1).saturating_mul(PER_PAGE);
    let movies = matches
        .into_iter()
        .skip(start)
        .take(PER_PAGE)
        .collect();

    BrowsePage {
        movies,
        page,
        total_pages,
        total_matches,
    }
}

/// Every distinct genre in the catalog, sorted.
pub fn all_genres(catalog: &[Movie]) -> Vec<String> {
    let genres: BTreeSet<String> = catalog
        .iter()
        .flat_map(|movie| normalize_field(movie.genres.as_ref()))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    genres.into_iter().collect()
}
