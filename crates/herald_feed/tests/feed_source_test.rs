use herald_error::{FeedErrorKind, HeraldErrorKind};
use herald_feed::{FeedSource, HttpFeedSource};
use std::time::Duration;
use tempfile::TempDir;

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <item>
      <title>My Novel - Chapter 2</title>
      <chaptername>Chapter 2</chaptername>
      <pubDate>Wed, 15 Oct 2025 09:30:00 +0000</pubDate>
    </item>
    <item>
      <title>My Novel - Chapter 1</title>
      <nameextend>Cannon Fodder 001</nameextend>
      <chaptername>Chapter 1</chaptername>
      <pubDate>Tue, 14 Oct 2025 09:30:00 +0000</pubDate>
    </item>
  </channel>
</rss>"#;

#[tokio::test]
async fn test_reads_local_feed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paid.xml");
    std::fs::write(&path, FEED).unwrap();

    let source = HttpFeedSource::new(Duration::from_secs(5)).unwrap();
    let feed = source.fetch(path.to_str().unwrap()).await.unwrap();

    assert_eq!(feed.entries().len(), 2);
    let oldest_first = feed.chronological();
    assert_eq!(oldest_first[0].chapter_name(), "Chapter 1");
    assert_eq!(oldest_first[1].chapter_name(), "Chapter 2");
}

#[tokio::test]
async fn test_missing_file_is_a_feed_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.xml");

    let source = HttpFeedSource::new(Duration::from_secs(5)).unwrap();
    let err = source.fetch(path.to_str().unwrap()).await.unwrap_err();

    match err.kind() {
        HeraldErrorKind::Feed(e) => assert!(matches!(e.kind, FeedErrorKind::FileRead(_))),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_malformed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    std::fs::write(&path, "<rss><channel><item></rss>").unwrap();

    let source = HttpFeedSource::new(Duration::from_secs(5)).unwrap();
    let err = source.fetch(path.to_str().unwrap()).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        HeraldErrorKind::Feed(e) if matches!(e.kind, FeedErrorKind::Malformed(_))
    ));
}
