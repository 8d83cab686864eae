//! Content-advisory detection.

use herald_core::FeedEntry;
use tracing::info;

/// Whether any entry for `novel_title` is tagged NSFW.
///
/// An entry counts when its title contains the novel title and its category
/// contains `nsfw`, both compared case-insensitively.
pub fn nsfw_detected<'a>(
    entries: impl IntoIterator<Item = &'a FeedEntry>,
    novel_title: &str,
) -> bool {
    let novel = novel_title.to_lowercase();
    entries.into_iter().any(|entry| {
        let hit = entry.title().to_lowercase().contains(&novel)
            && entry.category().to_lowercase().contains("nsfw");
        if hit {
            info!(entry = %entry.title(), "NSFW category detected");
        }
        hit
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::FeedEntryBuilder;

    fn entry(title: &str, category: &str) -> FeedEntry {
        FeedEntryBuilder::default()
            .title(title)
            .category(category)
            .build()
            .unwrap()
    }

    #[test]
    fn needs_title_and_category() {
        let entries = [
            entry("Other Novel - Chapter 3", "NSFW"),
            entry("My Novel - Chapter 3", "Romance"),
        ];
        assert!(!nsfw_detected(&entries, "My Novel"));

        let entries = [entry("MY NOVEL - Chapter 4", "Romance, nsfw")];
        assert!(nsfw_detected(&entries, "My Novel"));
    }
}
