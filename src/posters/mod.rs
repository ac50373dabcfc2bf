// Poster lookups against the TMDB image service.

pub mod client;
