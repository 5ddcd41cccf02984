//! Full-pipeline tests: schema + in-memory fetcher + engine, end to end.

use std::collections::{BTreeMap, BTreeSet};

use relatag::{
    ClassificationKind, MemoryFetcher, Options, Record, RecordStatus, RelatedConfig, RelatedEngine,
    RelatedError, SchemaRegistry,
};

fn schema() -> SchemaRegistry {
    SchemaRegistry::new()
        .with_classification("tags", ClassificationKind::Tags)
        .with_classification("chapters", ClassificationKind::Grouping)
        .with_category("book", &["tags", "chapters"])
        .with_category("article", &["tags"])
        .with_category("page", &[])
}

fn record(
    id: u64,
    category: &str,
    tags: &[&str],
    published_at: &str,
    title: &str,
) -> Record {
    let mut taxonomy = BTreeMap::new();
    if !tags.is_empty() {
        taxonomy.insert(
            "tags".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
    }
    Record {
        id,
        category: category.to_string(),
        taxonomy,
        published_at: published_at.to_string(),
        title: title.to_string(),
        status: RecordStatus::Published,
    }
}

fn engine(corpus: Vec<Record>) -> RelatedEngine<MemoryFetcher> {
    RelatedEngine::new(schema(), RelatedConfig::default(), MemoryFetcher::new(corpus))
}

/// The worked scenario: one tag match + same category ties with two tag
/// matches + different category; time distance breaks the tie.
#[test]
fn book_and_article_tie_broken_by_time_distance() {
    let source = record(
        1,
        "book",
        &["sci-fi", "drama"],
        "2024-03-01 12:00:00",
        "Source",
    );
    // A: 1 tag match (10) + same category (10) = 20, published 2h away.
    let a = record(2, "book", &["sci-fi"], "2024-03-01 14:00:00", "Candidate A");
    // B: 2 tag matches (20) + 0 = 20, published 5h away.
    let b = record(
        3,
        "article",
        &["sci-fi", "drama"],
        "2024-03-01 17:00:00",
        "Candidate B",
    );

    let related = engine(vec![source.clone(), a, b])
        .related_content_by_tags(&source, &Options::default())
        .unwrap();

    let ids: Vec<u64> = related.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn equal_scores_and_distance_fall_back_to_title() {
    let source = record(1, "book", &["sci-fi"], "2024-03-01 12:00:00", "Source");
    let zebra = record(2, "book", &["sci-fi"], "2024-03-01 13:00:00", "Zebra");
    let apple = record(3, "book", &["sci-fi"], "2024-03-01 13:00:00", "apple");

    let related = engine(vec![source.clone(), zebra, apple])
        .related_content_by_tags(&source, &Options::default())
        .unwrap();

    // Case-insensitive: "apple" sorts before "Zebra".
    let titles: Vec<&str> = related.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["apple", "Zebra"]);
}

#[test]
fn limit_zero_always_empty() {
    let source = record(1, "book", &["sci-fi"], "2024-03-01 12:00:00", "Source");
    let corpus: Vec<Record> = (2..20)
        .map(|id| {
            record(
                id,
                "book",
                &["sci-fi"],
                "2024-03-01 13:00:00",
                &format!("candidate {id}"),
            )
        })
        .collect();

    let options = Options {
        limit: Some(0),
        ..Default::default()
    };
    let related = engine(corpus)
        .related_content_by_tags(&source, &options)
        .unwrap();
    assert!(related.is_empty());
}

#[test]
fn output_respects_limit_and_sortedness() {
    let source = record(1, "book", &["sci-fi"], "2024-03-01 12:00:00", "Source");
    let corpus: Vec<Record> = (2..30)
        .map(|id| {
            let tags: &[&str] = if id % 2 == 0 {
                &["sci-fi", "drama"]
            } else {
                &["sci-fi"]
            };
            let mut r = record(
                id,
                "article",
                tags,
                "2024-03-01 13:00:00",
                &format!("candidate {id:02}"),
            );
            r.taxonomy
                .get_mut("tags")
                .unwrap()
                .insert(format!("unique-{id}"));
            r
        })
        .collect();

    let related = engine(corpus)
        .related_content_by_tags(&source, &Options::default())
        .unwrap();

    assert_eq!(related.len(), 10);
    // Even ids (two matches) outrank odd ids (one match).
    assert!(related.iter().take(10).all(|r| r.id % 2 == 0));
}

#[test]
fn zero_overlap_candidate_still_appears_ranked_last() {
    // The fetcher returns candidates by tag intersection per category; a
    // candidate can still land at similarity 0 when points_tag is 0, and
    // it must stay in the output.
    let source = record(1, "book", &["sci-fi"], "2024-03-01 12:00:00", "Source");
    let same_cat = record(2, "book", &["sci-fi"], "2024-03-01 13:00:00", "Book");
    let other_cat = record(3, "article", &["sci-fi"], "2024-03-01 13:00:00", "Article");

    let options = Options {
        points_tag: Some(0),
        ..Default::default()
    };
    let related = engine(vec![source.clone(), same_cat, other_cat])
        .related_content_by_tags(&source, &options)
        .unwrap();

    // The article scores 0 but appears, after the same-category bonus.
    let ids: Vec<u64> = related.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn source_id_never_in_output() {
    let source = record(1, "book", &["sci-fi"], "2024-03-01 12:00:00", "Source");
    // Same id in another category is a different record and may appear.
    let same_id_other_cat = record(1, "article", &["sci-fi"], "2024-03-01 13:00:00", "Other");

    let related = engine(vec![source.clone(), same_id_other_cat])
        .related_content_by_tags(&source, &Options::default())
        .unwrap();

    assert_eq!(related.len(), 1);
    assert_eq!(related[0].category, "article");
    assert!(!related.iter().any(|r| r.category == "book" && r.id == 1));
}

#[test]
fn pipeline_is_idempotent() {
    let source = record(1, "book", &["sci-fi", "drama"], "2024-03-01 12:00:00", "Source");
    let corpus = vec![
        source.clone(),
        record(2, "book", &["drama"], "2024-02-28 12:00:00", "B"),
        record(3, "article", &["sci-fi"], "2024-03-02 12:00:00", "C"),
        record(4, "article", &["sci-fi", "drama"], "2024-01-01 12:00:00", "A"),
    ];
    let engine = engine(corpus);

    let first = engine
        .related_content_by_tags(&source, &Options::default())
        .unwrap();
    let second = engine
        .related_content_by_tags(&source, &Options::default())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_source_timestamp_propagates() {
    let source = record(1, "book", &["sci-fi"], "March 1st", "Source");
    let candidate = record(2, "book", &["sci-fi"], "2024-03-01 13:00:00", "Candidate");

    let err = engine(vec![source.clone(), candidate])
        .related_content_by_tags(&source, &Options::default())
        .unwrap_err();

    match err {
        RelatedError::MalformedTimestamp { id, .. } => assert_eq!(id, 1),
        other => panic!("expected MalformedTimestamp, got {other}"),
    }
}

#[test]
fn allow_list_limits_search_to_named_categories() {
    let source = record(1, "book", &["sci-fi"], "2024-03-01 12:00:00", "Source");
    let corpus = vec![
        record(2, "book", &["sci-fi"], "2024-03-01 13:00:00", "Book"),
        record(3, "article", &["sci-fi"], "2024-03-01 13:00:00", "Article"),
    ];

    let options = Options {
        content_categories: Some(BTreeSet::from(["book".to_string()])),
        ..Default::default()
    };
    let related = engine(corpus)
        .related_content_by_tags(&source, &options)
        .unwrap();

    assert_eq!(related.len(), 1);
    assert_eq!(related[0].category, "book");
}

#[test]
fn custom_points_change_the_order() {
    let source = record(1, "book", &["sci-fi", "drama"], "2024-03-01 12:00:00", "Source");
    // One match, same category.
    let a = record(2, "book", &["sci-fi"], "2024-03-01 13:00:00", "A");
    // Two matches, other category.
    let b = record(3, "article", &["sci-fi", "drama"], "2024-03-01 13:00:00", "B");
    let engine = engine(vec![source.clone(), a, b]);

    // Heavier category bonus: the book wins outright.
    let options = Options {
        points_type: Some(50),
        ..Default::default()
    };
    let related = engine.related_content_by_tags(&source, &options).unwrap();
    assert_eq!(related[0].id, 2);

    // No category bonus: the two-tag article wins.
    let options = Options {
        points_type: Some(0),
        ..Default::default()
    };
    let related = engine.related_content_by_tags(&source, &options).unwrap();
    assert_eq!(related[0].id, 3);
}
