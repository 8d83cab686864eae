use async_trait::async_trait;
use herald_bot::{BatchRunner, HeraldConfig, RunKind, RunMode, RunOptions, Services};
use herald_core::{ArcLedger, Feed, FeedEntry, FeedEntryBuilder};
use herald_error::{FeedError, FeedErrorKind, HeraldResult, StorageError, StorageErrorKind};
use herald_feed::FeedSource;
use herald_social::RecordingSink;
use herald_storage::{LedgerStore, MemoryLedgerStore, NoopCommitter};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Serves canned feeds by location; unknown locations are unreachable.
#[derive(Clone, Default)]
struct ScriptedFeeds {
    feeds: Arc<Mutex<HashMap<String, Feed>>>,
}

impl ScriptedFeeds {
    fn set(&self, location: &str, entries: Vec<FeedEntry>) {
        self.feeds
            .lock()
            .unwrap()
            .insert(location.to_string(), Feed::new(entries));
    }
}

#[async_trait]
impl FeedSource for ScriptedFeeds {
    async fn fetch(&self, location: &str) -> HeraldResult<Feed> {
        self.feeds
            .lock()
            .unwrap()
            .get(location)
            .cloned()
            .ok_or_else(|| {
                FeedError::new(FeedErrorKind::Unreachable(format!("{}: no route", location)))
                    .into()
            })
    }
}

/// In-memory store whose selected saves (counted from 0) fail.
#[derive(Clone, Default)]
struct FlakyStore {
    inner: MemoryLedgerStore,
    saves: Arc<Mutex<usize>>,
    fail_at: Arc<HashSet<usize>>,
}

impl FlakyStore {
    fn failing_at(saves: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fail_at: Arc::new(saves.into_iter().collect()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl LedgerStore for FlakyStore {
    async fn load(&self, key: &str) -> HeraldResult<ArcLedger> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &str, ledger: &ArcLedger) -> HeraldResult<()> {
        let attempt = {
            let mut saves = self.saves.lock().unwrap();
            *saves += 1;
            *saves - 1
        };
        if self.fail_at.contains(&attempt) {
            return Err(StorageError::new(StorageErrorKind::FileWrite("disk full".into())).into());
        }
        self.inner.save(key, ledger).await
    }

    fn location(&self, _key: &str) -> Option<PathBuf> {
        None
    }
}

struct Harness {
    feeds: ScriptedFeeds,
    store: FlakyStore,
    sink: RecordingSink,
    config: HeraldConfig,
}

impl Harness {
    fn new(config: &str, sink: RecordingSink) -> Self {
        Self {
            feeds: ScriptedFeeds::default(),
            store: FlakyStore::default(),
            sink,
            config: HeraldConfig::from_toml_str(config).unwrap(),
        }
    }

    fn runner(&self, options: RunOptions) -> BatchRunner {
        let services = Services {
            feeds: Arc::new(self.feeds.clone()),
            store: Arc::new(self.store.clone()),
            sink: Arc::new(self.sink.clone()),
            committer: Arc::new(NoopCommitter),
        };
        BatchRunner::new(self.config.clone(), services, options)
    }

    fn ledger(&self, key: &str) -> ArcLedger {
        self.store.inner.get(key).unwrap_or_default()
    }
}

const ONE_NOVEL: &str = r#"
[style]
label_style = "hash"

[[novels]]
title = "Cannon Fodder"
host = "Moonlight"
role_mention = "<@&42>"
free_feed = "free://cannon"
paid_feed = "paid://cannon"
ledger_key = "cannon"
chapter_count = "1184 chapters + 8 extras"
"#;

fn arc_opener(extend: &str) -> FeedEntry {
    FeedEntryBuilder::default()
        .chapter_name("Chapter 1")
        .name_extend(extend)
        .build()
        .unwrap()
}

fn chapter(name: &str) -> FeedEntry {
    FeedEntryBuilder::default().chapter_name(name).build().unwrap()
}

#[tokio::test]
async fn test_new_paid_arc_is_announced_once() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::new());
    harness.feeds.set("free://cannon", vec![]);
    harness
        .feeds
        .set("paid://cannon", vec![arc_opener("Cannon Fodder 001"), chapter("Chapter 2")]);

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].kind, RunKind::Arcs);
    assert_eq!(
        report.outcomes[0].announcement.as_deref(),
        Some("#1 Cannon Fodder")
    );

    // Header, locked list, footer; no unlocked arcs yet.
    let sent = harness.sink.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent[0].content().starts_with("<@&42>"));
    assert!(sent[1].embeds()[0].description().contains("#1"));

    let ledger = harness.ledger("cannon");
    assert_eq!(ledger.locked, vec!["#1 Cannon Fodder"]);
    assert_eq!(ledger.last_announced, "#1 Cannon Fodder");

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.outcomes[0].announcement, None);
    assert!(report.outcomes[0].diff.is_empty());
    assert_eq!(harness.sink.sent().len(), 3);
}

#[tokio::test]
async fn test_rejected_header_is_retried_next_run() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::failing_at([0]));
    harness.feeds.set("free://cannon", vec![]);
    harness
        .feeds
        .set("paid://cannon", vec![arc_opener("Cannon Fodder 001")]);

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].transient);

    let ledger = harness.ledger("cannon");
    assert_eq!(ledger.locked, vec!["#1 Cannon Fodder"]);
    assert_eq!(ledger.last_announced, "");

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(report.is_success());
    assert_eq!(
        report.outcomes[0].announcement.as_deref(),
        Some("#1 Cannon Fodder")
    );
    assert_eq!(harness.ledger("cannon").last_announced, "#1 Cannon Fodder");
    assert_eq!(harness.sink.sent().len(), 3);
}

#[tokio::test]
async fn test_rejected_later_part_still_records_announcement() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::failing_at([1]));
    harness.feeds.set("free://cannon", vec![]);
    harness
        .feeds
        .set("paid://cannon", vec![arc_opener("Cannon Fodder 001")]);

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.metrics.message_failures, 1);
    assert_eq!(report.metrics.announcements_sent, 1);
    assert_eq!(harness.sink.sent().len(), 2);
    assert_eq!(harness.ledger("cannon").last_announced, "#1 Cannon Fodder");
}

#[tokio::test]
async fn test_first_public_arc_is_recorded_silently() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::new());
    harness
        .feeds
        .set("free://cannon", vec![arc_opener("Cannon Fodder 001")]);
    harness
        .feeds
        .set("paid://cannon", vec![arc_opener("Cannon Fodder 001")]);

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.outcomes[0].announcement, None);
    assert!(report.outcomes[0].ledger_written);
    assert!(harness.sink.sent().is_empty());
    assert_eq!(harness.ledger("cannon").unlocked, vec!["#1 Cannon Fodder"]);
}

#[tokio::test]
async fn test_bonus_counter_announces_partial_extras_once() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::new());
    harness.feeds.set("free://cannon", vec![chapter("Chapter 1184")]);
    harness.feeds.set(
        "paid://cannon",
        vec![chapter("Extra 1"), chapter("Extra 2"), chapter("Extra 3")],
    );

    let report = harness.runner(RunOptions::default()).run(RunMode::Extras).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.outcomes[0].kind, RunKind::Extras);
    assert_eq!(
        report.outcomes[0].announcement.as_deref(),
        Some("EXTRAS up to #3")
    );
    let sent = harness.sink.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].content().contains("New extras just dropped"));
    assert_eq!(harness.ledger("cannon").bonus_counter, 3);

    let report = harness.runner(RunOptions::default()).run(RunMode::Extras).await.unwrap();
    assert_eq!(report.outcomes[0].announcement, None);
    assert_eq!(harness.sink.sent().len(), 1);
}

#[tokio::test]
async fn test_failing_novel_does_not_stop_the_batch() {
    let config = r#"
[style]
label_style = "hash"

[[novels]]
title = "Unreachable"
paid_feed = "paid://gone"
ledger_key = "gone"

[[novels]]
title = "Unconfigured"
paid_feed = "paid://nowhere"

[[novels]]
title = "Cannon Fodder"
paid_feed = "paid://cannon"
ledger_key = "cannon"
"#;
    let harness = Harness::new(config, RecordingSink::new());
    harness
        .feeds
        .set("paid://cannon", vec![arc_opener("Cannon Fodder 001")]);

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(!report.is_success());
    assert_eq!(report.skipped, vec!["Unconfigured"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].novel, "Unreachable");
    assert!(report.failures[0].transient);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.metrics.novels_processed, 2);
    assert_eq!(report.metrics.novels_skipped, 1);
    assert_eq!(harness.ledger("cannon").last_announced, "#1 Cannon Fodder");
}

#[tokio::test]
async fn test_dry_run_previews_without_writing() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::new());
    harness.feeds.set("free://cannon", vec![]);
    harness
        .feeds
        .set("paid://cannon", vec![arc_opener("Cannon Fodder 001"), chapter("Extra 1")]);

    let options = RunOptions {
        dry_run: true,
        ..Default::default()
    };
    let report = harness.runner(options).run(RunMode::All).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.outcomes.len(), 2);
    assert!(report.outcomes.iter().all(|o| !o.ledger_written));
    assert!(!report.outcomes[0].diff.is_empty());
    assert_eq!(report.outcomes[0].messages.len(), 3);
    assert_eq!(report.metrics.ledgers_written, 0);
    assert_eq!(harness.store.inner.get("cannon"), None);
}

#[tokio::test]
async fn test_unknown_novel_filter_fails_the_batch() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::new());
    let options = RunOptions {
        novel: Some("Nope".to_string()),
        ..Default::default()
    };
    assert!(harness.runner(options).run(RunMode::All).await.is_err());
}

#[tokio::test]
async fn test_ledger_for_reads_stored_ledger() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::new());
    harness.store.inner.insert(
        "cannon",
        ArcLedger {
            locked: vec!["#4 Cannon Fodder".into()],
            ..Default::default()
        },
    );

    let ledger = harness
        .runner(RunOptions::default())
        .ledger_for("cannon fodder")
        .await
        .unwrap();
    assert_eq!(ledger.locked, vec!["#4 Cannon Fodder"]);
}

#[tokio::test]
async fn test_rejected_bonus_message_keeps_counter() {
    let harness = Harness::new(ONE_NOVEL, RecordingSink::failing_at([0]));
    harness.feeds.set("free://cannon", vec![]);
    harness.feeds.set(
        "paid://cannon",
        vec![chapter("Extra 1"), chapter("Extra 2"), chapter("Extra 3")],
    );

    let report = harness.runner(RunOptions::default()).run(RunMode::Extras).await.unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failures[0].kind, RunKind::Extras);
    assert!(report.failures[0].transient);
    assert_eq!(harness.ledger("cannon").bonus_counter, 0);
    assert!(harness.sink.sent().is_empty());

    let report = harness.runner(RunOptions::default()).run(RunMode::Extras).await.unwrap();
    assert!(report.is_success());
    assert_eq!(harness.sink.sent().len(), 1);
    assert_eq!(harness.ledger("cannon").bonus_counter, 3);
}

#[tokio::test]
async fn test_unconfirmed_ledger_write_reannounces() {
    let mut harness = Harness::new(ONE_NOVEL, RecordingSink::new());
    // Save 0 records the new arc, save 1 follows the accepted header.
    harness.store = FlakyStore::failing_at([1]);
    harness.feeds.set("free://cannon", vec![]);
    harness
        .feeds
        .set("paid://cannon", vec![arc_opener("Cannon Fodder 001")]);

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failures[0].novel, "Cannon Fodder");
    assert!(!report.failures[0].transient);
    assert_eq!(harness.sink.sent().len(), 3);

    let ledger = harness.ledger("cannon");
    assert_eq!(ledger.locked, vec!["#1 Cannon Fodder"]);
    assert_eq!(ledger.last_announced, "");

    let report = harness.runner(RunOptions::default()).run(RunMode::Arcs).await.unwrap();
    assert!(report.is_success());
    assert_eq!(
        report.outcomes[0].announcement.as_deref(),
        Some("#1 Cannon Fodder")
    );
    assert_eq!(harness.sink.sent().len(), 6);
    assert_eq!(harness.ledger("cannon").last_announced, "#1 Cannon Fodder");
}
