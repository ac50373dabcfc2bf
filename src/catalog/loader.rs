// CSV catalog ingestion.
//
// The dataset is a flat CSV with one row per movie. Rows whose id (or
// poster reference) fails integer coercion are dropped with a warning
// before they reach the engine — the engine only ever sees clean records.

use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;
use tracing::{info, warn};

use super::movie::{FieldValue, Movie};

/// Column positions resolved from the CSV header row.
struct Columns {
    id: usize,
    title: usize,
    genres: Option<usize>,
    keywords: Option<usize>,
    actors: Option<usize>,
    director: Option<usize>,
    vote_average: Option<usize>,
    popularity: Option<usize>,
    poster_id: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        Ok(Self {
            id: position("id").context("Catalog CSV has no 'id' column")?,
            title: position("title").context("Catalog CSV has no 'title' column")?,
            genres: position("genres"),
            keywords: position("keywords"),
            actors: position("actors"),
            director: position("director"),
            vote_average: position("vote_average"),
            popularity: position("popularity"),
            poster_id: position("poster_id"),
        })
    }
}

/// Load the movie catalog from a CSV file.
///
/// Required columns: `id`, `title`. Everything else is optional — missing
/// columns or blank cells become `None`, and the engine's normalizer
/// handles whatever encoding survives in the list-like cells.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Movie>> {
    let path = path.as_ref();

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open catalog CSV at {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read catalog CSV headers")?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut movies = Vec::new();
    let mut dropped = 0usize;

    for (row, record) in reader.records().enumerate() {
        // Header is line 1, first record is line 2.
        let line = row + 2;
        let record = record.with_context(|| format!("Failed to read catalog CSV line {line}"))?;

        let raw_id = record.get(columns.id).unwrap_or("").trim();
        let id = match coerce_integer(raw_id) {
            Some(id) => id,
            None => {
                warn!(line, id = raw_id, "Dropping row: id is not an integer");
                dropped += 1;
                continue;
            }
        };

        // A present but uncoercible poster reference also drops the row;
        // an absent one is just a movie without a poster.
        let poster_id = match text_at(&record, columns.poster_id) {
            Some(raw) => match coerce_integer(&raw) {
                Some(poster_id) => Some(poster_id),
                None => {
                    warn!(line, poster_id = raw, "Dropping row: poster_id is not an integer");
                    dropped += 1;
                    continue;
                }
            },
            None => None,
        };

        movies.push(Movie {
            id,
            title: record.get(columns.title).unwrap_or("").trim().to_string(),
            genres: text_at(&record, columns.genres).map(FieldValue::Text),
            keywords: text_at(&record, columns.keywords).map(FieldValue::Text),
            actors: text_at(&record, columns.actors),
            director: text_at(&record, columns.director),
            vote_average: numeric_at(&record, columns.vote_average),
            popularity: numeric_at(&record, columns.popularity),
            poster_id,
        });
    }

    info!(loaded = movies.len(), dropped, path = %path.display(), "Catalog loaded");
    Ok(movies)
}

/// Cell text at an optional column, `None` when the column is missing or
/// the cell is blank.
fn text_at(record: &StringRecord, column: Option<usize>) -> Option<String> {
    let value = record.get(column?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Numeric cell at an optional column; unparseable values degrade to `None`
/// rather than dropping the row.
fn numeric_at(record: &StringRecord, column: Option<usize>) -> Option<f64> {
    text_at(record, column)?.parse().ok()
}

/// Integer coercion tolerant of float-formatted ids ("862.0").
fn coerce_integer(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value: f64 = raw.parse().ok()?;
    if value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}
