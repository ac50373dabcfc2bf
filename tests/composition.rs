// Composition tests — verifying that the stages chain together correctly.
//
// These tests exercise the full data flow:
//   CSV -> catalog -> soup -> TF-IDF -> similarity -> recommendations
// with temp-file fixtures only; no network access.

use std::io::Write;

use tempfile::NamedTempFile;

use marquee::catalog::loader::load_catalog;
use marquee::engine::recommender::Recommender;
use marquee::engine::similarity::SimilarityIndex;
use marquee::engine::soup::build_soup;
use marquee::engine::vectorizer::TfidfVectorizer;

// ============================================================
// Chain: CSV -> Recommender
// ============================================================

#[test]
fn csv_catalog_flows_through_to_recommendations() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "id,title,genres,keywords,actors,director,vote_average,popularity").expect("header");
    writeln!(
        file,
        "11,Ronin,\"['Action', 'Thriller']\",\"['heist', 'paris']\",\"Robert De Niro, Jean Reno\",John Frankenheimer,7.0,18.1"
    )
    .expect("row");
    writeln!(
        file,
        "22,Heist,\"['Action', 'Thriller']\",\"['heist', 'crew']\",\"Gene Hackman, Danny DeVito\",David Mamet,6.9,9.3"
    )
    .expect("row");
    writeln!(
        file,
        "33,Before Sunrise,\"['Romance', 'Drama']\",\"['vienna', 'train']\",\"Ethan Hawke, Julie Delpy\",Richard Linklater,8.1,17.4"
    )
    .expect("row");

    let catalog = load_catalog(file.path()).expect("load");
    let recommender = Recommender::new(catalog).expect("unique ids");

    let results = recommender.get_recommendations(11, 2).expect("known id");
    let ids: Vec<i64> = results.iter().map(|m| m.id).collect();
    assert_eq!(
        ids,
        vec![22, 33],
        "shared genre and keyword tokens must outrank the disjoint movie"
    );
}

#[test]
fn dropped_rows_never_reach_the_engine() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "id,title,genres").expect("header");
    writeln!(file, "1,Good,\"['Action']\"").expect("row");
    writeln!(file, "oops,Bad,\"['Action']\"").expect("row");
    writeln!(file, "2,Also Good,\"['Action']\"").expect("row");

    let catalog = load_catalog(file.path()).expect("load");
    let recommender = Recommender::new(catalog).expect("unique ids");

    assert_eq!(recommender.len(), 2);
    assert!(!recommender.contains(0));
    let results = recommender.get_recommendations(1, 10).expect("known id");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 2);
}

// ============================================================
// Chain: Soup -> TF-IDF -> Similarity
// ============================================================

#[test]
fn soup_corpus_produces_a_usable_similarity_index() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "id,title,genres,director").expect("header");
    writeln!(file, "1,A,\"['Western']\",Sergio Leone").expect("row");
    writeln!(file, "2,B,\"['Western']\",Sergio Leone").expect("row");
    writeln!(file, "3,C,\"['Musical']\",Stanley Donen").expect("row");

    let catalog = load_catalog(file.path()).expect("load");
    let soups: Vec<String> = catalog.iter().map(build_soup).collect();

    // Same record, same bytes — soups are a pure function of the row.
    let again: Vec<String> = catalog.iter().map(build_soup).collect();
    assert_eq!(soups, again);

    let mut vectorizer = TfidfVectorizer::new().with_min_df(1);
    let vectors = vectorizer.fit_transform(&soups);
    let index = SimilarityIndex::build(&vectors);

    // The two Leone westerns are mutual best matches.
    assert!(index.score(0, 1) > index.score(0, 2));
    assert_eq!(index.top_k(0, 1)[0].0, 1);
    assert_eq!(index.top_k(1, 1)[0].0, 0);
}

#[test]
fn list_literal_and_structured_fields_vectorize_identically() {
    use marquee::catalog::movie::{FieldValue, Movie};

    let literal = Movie {
        genres: Some(FieldValue::text("['Action', 'Crime']")),
        ..Movie::new(1, "Literal")
    };
    let structured = Movie {
        genres: Some(FieldValue::list(["Action", "Crime"])),
        ..Movie::new(2, "Structured")
    };

    assert_eq!(build_soup(&literal), build_soup(&structured));
}
