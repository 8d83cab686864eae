//! Bonus-content (extras and side stories) release counter.
//!
//! Same observe → compare → announce → advance shape as the arc gate, over
//! an integer watermark: [`plan_bonus`] returns a plan only when the highest
//! observed index exceeds the ledger's counter, and the caller raises the
//! counter to [`BonusPlan::watermark`] after the send succeeds.

use herald_core::FeedEntry;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static EXTRA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bextras?\b.*?(\d+)").expect("valid extra pattern"));
static SIDE_STORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bside\s+stor(?:y|ies)\b.*?(\d+)").expect("valid side story pattern")
});
static EXTRA_TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*extras?").expect("valid extra total pattern"));
static SIDE_STORY_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*side\s+stor(?:y|ies)").expect("valid side story total pattern")
});

/// Kind of bonus item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum BonusKind {
    /// "Extra 3", "Extras - 2"
    #[strum(to_string = "extras")]
    Extra,
    /// "Side Story 1"
    #[strum(to_string = "side stories")]
    SideStory,
}

impl BonusKind {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Extra => &*EXTRA,
            Self::SideStory => &*SIDE_STORY,
        }
    }

    /// Index of this kind of item named in `text`, if any.
    pub fn index_in(self, text: &str) -> Option<u32> {
        self.pattern()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Highest index of this kind across the chapter-title, extended-name
    /// and grouping fields of `entries`; 0 when none is found.
    pub fn highest<'a>(self, entries: impl IntoIterator<Item = &'a FeedEntry>) -> u32 {
        entries
            .into_iter()
            .flat_map(|entry| [entry.chapter_name(), entry.name_extend(), entry.volume()])
            .filter_map(|field| self.index_in(field))
            .max()
            .unwrap_or(0)
    }

    /// Noun for `count` items: "extra"/"extras", "side story"/"side stories".
    pub fn noun(self, count: u32) -> &'static str {
        match (self, count == 1) {
            (Self::Extra, true) => "extra",
            (Self::Extra, false) => "extras",
            (Self::SideStory, true) => "side story",
            (Self::SideStory, false) => "side stories",
        }
    }

    fn headline(self, count: u32) -> &'static str {
        match (self, count == 1) {
            (Self::Extra, true) => "EXTRA",
            (Self::Extra, false) => "EXTRAS",
            (Self::SideStory, true) => "SIDE STORY",
            (Self::SideStory, false) => "SIDE STORIES",
        }
    }
}

/// Highest bonus indices seen on the feeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusObservation {
    /// Highest extra index, 0 if none
    pub extras: u32,
    /// Highest side story index, 0 if none
    pub side_stories: u32,
}

impl BonusObservation {
    /// Scans entries from any number of streams.
    pub fn observe<'a>(entries: impl IntoIterator<Item = &'a FeedEntry> + Clone) -> Self {
        Self {
            extras: BonusKind::Extra.highest(entries.clone()),
            side_stories: BonusKind::SideStory.highest(entries),
        }
    }

    /// The single watermark compared against the ledger counter.
    pub fn highest(&self) -> u32 {
        self.extras.max(self.side_stories)
    }
}

/// Configured bonus totals for a novel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusTotals {
    /// Total extras, 0 if unknown
    pub extras: u32,
    /// Total side stories, 0 if unknown
    pub side_stories: u32,
}

impl BonusTotals {
    /// Reads totals from a chapter-count description.
    ///
    /// ```
    /// use herald_tracker::BonusTotals;
    ///
    /// let totals = BonusTotals::parse("1184 chapters + 8 extras + 2 side stories");
    /// assert_eq!(totals.extras, 8);
    /// assert_eq!(totals.side_stories, 2);
    /// ```
    pub fn parse(chapter_count: &str) -> Self {
        let total = |re: &Regex| {
            re.captures(chapter_count)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };
        Self {
            extras: total(&EXTRA_TOTAL),
            side_stories: total(&SIDE_STORY_TOTAL),
        }
    }

    fn of(&self, kind: BonusKind) -> u32 {
        match kind {
            BonusKind::Extra => self.extras,
            BonusKind::SideStory => self.side_stories,
        }
    }
}

/// How far a bonus kind's release has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BonusRelease {
    /// Item 1 is out, more remain
    First,
    /// Some items are out, more remain
    Partial,
    /// Observed index reached the configured total
    Final,
}

impl BonusRelease {
    /// Classifies an observed index against a configured total (0 = unknown).
    pub fn of(observed: u32, total: u32) -> Self {
        if total > 0 && observed >= total {
            Self::Final
        } else if observed == 1 {
            Self::First
        } else {
            Self::Partial
        }
    }
}

/// Which kinds advanced, and how far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusWording {
    /// Only extras moved past the counter
    Extras(BonusRelease),
    /// Only side stories moved past the counter
    SideStories(BonusRelease),
    /// Both kinds moved past the counter
    Both {
        /// Every extra and side story is out
        all_released: bool,
    },
}

impl BonusWording {
    /// Sentence lead used in the announcement body.
    pub fn dropped_phrase(&self) -> String {
        match self {
            Self::Extras(release) => single_phrase(BonusKind::Extra, *release),
            Self::SideStories(release) => single_phrase(BonusKind::SideStory, *release),
            Self::Both { all_released: true } => {
                "All extras and side stories just dropped".to_string()
            }
            Self::Both { all_released: false } => {
                "New extras and side stories just dropped".to_string()
            }
        }
    }
}

fn single_phrase(kind: BonusKind, release: BonusRelease) -> String {
    match release {
        BonusRelease::First => format!("The first of those {kind} just dropped"),
        BonusRelease::Partial => format!("New {kind} just dropped"),
        BonusRelease::Final => format!("All {kind} just dropped"),
    }
}

/// A bonus announcement to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusPlan {
    /// Counter value to record once the announcement is sent
    pub watermark: u32,
    /// Wording case
    pub wording: BonusWording,
    /// Headline label, e.g. `EXTRAS + SIDE STORY`
    pub headline: String,
    /// Configured totals, echoed for the "remaining" line
    pub totals: BonusTotals,
}

/// Compares an observation against the ledger's counter.
///
/// Returns `None` when nothing beyond `counter` has been released.
pub fn plan_bonus(
    counter: u32,
    observed: &BonusObservation,
    totals: &BonusTotals,
) -> Option<BonusPlan> {
    let watermark = observed.highest();
    if watermark <= counter {
        debug!(counter, watermark, "No new bonus content");
        return None;
    }

    let new_extras = observed.extras > counter;
    let new_side_stories = observed.side_stories > counter;

    let wording = match (new_extras, new_side_stories) {
        (true, false) => BonusWording::Extras(BonusRelease::of(observed.extras, totals.extras)),
        (false, true) => BonusWording::SideStories(BonusRelease::of(
            observed.side_stories,
            totals.side_stories,
        )),
        _ => BonusWording::Both {
            all_released: BonusRelease::of(observed.extras, totals.extras) == BonusRelease::Final
                && BonusRelease::of(observed.side_stories, totals.side_stories)
                    == BonusRelease::Final,
        },
    };

    Some(BonusPlan {
        watermark,
        wording,
        headline: headline(totals, new_extras, new_side_stories),
        totals: *totals,
    })
}

fn headline(totals: &BonusTotals, new_extras: bool, new_side_stories: bool) -> String {
    let mut kinds: Vec<(BonusKind, u32)> = [BonusKind::Extra, BonusKind::SideStory]
        .into_iter()
        .map(|kind| (kind, totals.of(kind)))
        .filter(|(_, total)| *total > 0)
        .collect();

    // No totals configured: name whatever moved.
    if kinds.is_empty() {
        if new_extras {
            kinds.push((BonusKind::Extra, 0));
        }
        if new_side_stories {
            kinds.push((BonusKind::SideStory, 0));
        }
    }

    kinds
        .into_iter()
        .map(|(kind, total)| kind.headline(total))
        .collect::<Vec<_>>()
        .join(" + ")
}
