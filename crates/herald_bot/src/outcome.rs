//! Per-novel results.

use herald_social::DiscordMessage;
use herald_tracker::LedgerDiff;

/// Which tracker a novel run exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RunKind {
    /// Arc progression
    Arcs,
    /// Bonus-content counter
    Extras,
}

/// What one novel run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovelOutcome {
    /// Novel title
    pub novel: String,
    /// Tracker that ran
    pub kind: RunKind,
    /// Ledger changes (also computed on dry runs)
    pub diff: LedgerDiff,
    /// What was announced: the arc label, or the bonus watermark
    pub announcement: Option<String>,
    /// Messages formatted for the announcement, in send order
    pub messages: Vec<DiscordMessage>,
    /// Whether the ledger was written
    pub ledger_written: bool,
}

impl NovelOutcome {
    pub(crate) fn new(novel: &str, kind: RunKind) -> Self {
        Self {
            novel: novel.to_string(),
            kind,
            diff: LedgerDiff::default(),
            announcement: None,
            messages: Vec::new(),
            ledger_written: false,
        }
    }
}

/// A novel run that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovelFailure {
    /// Novel title
    pub novel: String,
    /// Tracker that failed
    pub kind: RunKind,
    /// Rendered error
    pub error: String,
    /// Whether the next scheduled run may recover on its own
    pub transient: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_print_as_command_names() {
        assert_eq!(RunKind::Arcs.to_string(), "arcs");
        assert_eq!(RunKind::Extras.to_string(), "extras");
    }
}
