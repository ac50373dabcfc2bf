// Marquee: content-based movie recommendations
//
// This is the library root. Each module corresponds to a major subsystem:
// catalog ingestion, the similarity engine, poster lookups, terminal output.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod output;
pub mod posters;
