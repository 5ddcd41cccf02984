//! Example demonstrating the related-content pipeline end to end.
//!
//! Builds a small schema and an in-memory corpus, then prints the related
//! records for one source, with the scoring knobs varied.

use anyhow::Result;
use relatag::{
    ClassificationKind, MemoryFetcher, Options, Record, RecordStatus, RelatedConfig,
    RelatedEngine, SchemaRegistry,
};

fn record(id: u64, category: &str, tags: &[&str], published_at: &str, title: &str) -> Record {
    Record {
        id,
        category: category.to_string(),
        taxonomy: [(
            "tags".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        )]
        .into(),
        published_at: published_at.to_string(),
        title: title.to_string(),
        status: RecordStatus::Published,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let schema = SchemaRegistry::new()
        .with_classification("tags", ClassificationKind::Tags)
        .with_category("book", &["tags"])
        .with_category("article", &["tags"]);

    let source = record(
        1,
        "book",
        &["sci-fi", "drama"],
        "2024-03-01 12:00:00",
        "The Left Hand of Darkness",
    );

    let corpus = vec![
        source.clone(),
        record(2, "book", &["sci-fi"], "2024-03-03 09:00:00", "Solaris"),
        record(3, "book", &["drama", "history"], "2023-11-20 18:30:00", "Wolf Hall"),
        record(4, "article", &["sci-fi", "drama"], "2024-02-28 08:15:00", "Genre on screen"),
        record(5, "article", &["cooking"], "2024-03-01 10:00:00", "Weeknight pasta"),
    ];

    let engine = RelatedEngine::new(schema, RelatedConfig::default(), MemoryFetcher::new(corpus));

    println!("=== Related to {:?} (defaults) ===", source.title);
    for related in engine.related_content_by_tags(&source, &Options::default())? {
        println!("  [{}] {} ({})", related.category, related.title, related.published_at);
    }

    println!("=== Same, but only articles, top 2 ===");
    let options = Options {
        limit: Some(2),
        content_categories: Some(["article".to_string()].into()),
        ..Default::default()
    };
    for related in engine.related_content_by_tags(&source, &options)? {
        println!("  [{}] {} ({})", related.category, related.title, related.published_at);
    }

    Ok(())
}
