//! Announcement message formatting.

use crate::{DiscordConfig, NovelConfig, StyleConfig};
use herald_core::{ArcLabel, ArcLedger};
use herald_social::{DiscordMessage, EmbedBuilder};
use herald_tracker::{BonusKind, BonusPlan};

/// Everything the formatter needs besides the ledger.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    /// The novel being announced
    pub novel: &'a NovelConfig,
    /// Shared roles
    pub discord: &'a DiscordConfig,
    /// Decorations
    pub style: &'a StyleConfig,
    /// Add the NSFW role
    pub nsfw: bool,
}

impl FormatContext<'_> {
    /// Role mentions leading every announcement: the novel's role, the NSFW
    /// role when flagged, then the ongoing role. Empty roles are left out.
    pub fn mentions(&self) -> String {
        let nsfw_role = if self.nsfw {
            self.discord.nsfw_role.as_str()
        } else {
            ""
        };
        [
            self.novel.role_mention.as_str(),
            nsfw_role,
            self.discord.ongoing_role.as_str(),
        ]
        .into_iter()
        .filter(|role| !role.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
    }

    fn novel_link(&self) -> String {
        if self.novel.novel_url.is_empty() {
            self.novel.title.clone()
        } else {
            format!("[{}]({})", self.novel.title, self.novel.novel_url)
        }
    }

    fn world_number(&self, number: u32) -> String {
        let digits = &self.style.digit_emoji;
        if digits.len() != 10 {
            return number.to_string();
        }
        number
            .to_string()
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| digits[d as usize].as_str())
            .collect()
    }
}

/// The four messages of an arc announcement.
///
/// Only the header gates the ledger: once it is accepted the arc counts as
/// announced, whatever happens to the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcAnnouncement {
    /// Mentions, headline, world number, novel link, frame top
    pub header: DiscordMessage,
    /// Unlocked arcs; absent when none are public yet
    pub unlocked: Option<DiscordMessage>,
    /// Locked arcs, newest marked
    pub locked: DiscordMessage,
    /// Frame bottom, host line, role reaction hint
    pub footer: DiscordMessage,
}

impl ArcAnnouncement {
    /// Messages after the header, in send order.
    pub fn rest(&self) -> Vec<&DiscordMessage> {
        self.unlocked
            .iter()
            .chain([&self.locked, &self.footer])
            .collect()
    }

    /// All messages in send order.
    pub fn messages(&self) -> Vec<DiscordMessage> {
        std::iter::once(&self.header)
            .chain(self.rest())
            .cloned()
            .collect()
    }
}

/// `**【Arc 3】**Title` for prefixed labels, the bolded label otherwise.
fn display_label(label: &str) -> String {
    match ArcLabel::split_prefix(label) {
        Some((prefix, title)) if label.trim_start().starts_with('#') => {
            format!("**{}** {}", prefix, title)
        }
        Some((prefix, title)) => format!("**{}**{}", prefix, title),
        None => format!("**{}**", label),
    }
}

fn spoiler(lines: &[String]) -> String {
    if lines.is_empty() {
        "None".to_string()
    } else {
        format!("||{}||", lines.join("\n"))
    }
}

/// Formats the announcement for `announced`, the newest locked label.
pub fn format_arc_announcement(
    ctx: &FormatContext<'_>,
    ledger: &ArcLedger,
    announced: &str,
) -> ArcAnnouncement {
    let world = ArcLabel::number_of(announced)
        .map(|n| format!("World {}", ctx.world_number(n)))
        .unwrap_or_else(|| ArcLabel::title_of(announced).to_string());

    let header = [
        ctx.mentions(),
        ctx.style.arc_headline.clone(),
        format!("***{} is Live for***", world),
        format!("### {}", ctx.novel_link()),
        ctx.style.frame_top.clone(),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n");

    let unlocked = (!ledger.unlocked.is_empty()).then(|| {
        let lines: Vec<String> = ledger.unlocked.iter().map(|l| display_label(l)).collect();
        list_message(&ctx.style.unlocked_heading, spoiler(&lines), ctx.style.unlocked_color)
    });

    let mut locked_lines: Vec<String> = Vec::new();
    for line in ledger.locked.iter().map(|l| display_label(l)) {
        if !locked_lines.contains(&line) {
            locked_lines.push(line);
        }
    }
    if let Some(newest) = locked_lines.last_mut() {
        newest.insert_str(0, &ctx.style.newest_marker);
    }
    let locked = list_message(
        &ctx.style.locked_heading,
        spoiler(&locked_lines),
        ctx.style.locked_color,
    );

    let mut footer = vec![
        ctx.style.frame_bottom.clone(),
        format!("> *Advance access is ready for you on {}!*", ctx.novel.host),
    ];
    if !ctx.novel.role_url.is_empty() {
        footer.push(format!(
            "-# React to the {} @ {} to get notified on updates and announcements",
            ctx.novel.custom_emoji, ctx.novel.role_url
        ));
    }

    ArcAnnouncement {
        header: DiscordMessage::new(header).suppress_link_previews(),
        unlocked,
        locked,
        footer: DiscordMessage::new(footer.join("\n")).suppress_link_previews(),
    }
}

fn list_message(heading: &str, description: String, color: u32) -> DiscordMessage {
    EmbedBuilder::default()
        .description(description)
        .color(Some(color))
        .build()
        .map(|embed| DiscordMessage::new(heading).with_embeds(vec![embed]))
        .unwrap_or_else(|_| DiscordMessage::new(heading))
}

/// Formats a bonus-content announcement.
pub fn format_bonus_announcement(ctx: &FormatContext<'_>, plan: &BonusPlan) -> DiscordMessage {
    let deco = &ctx.style.bonus_decoration;
    let mut lines = vec![
        ctx.mentions(),
        format!("## {} NEW {} JUST DROPPED {}", deco, plan.headline, deco)
            .trim()
            .to_string(),
    ];

    let remaining: Vec<String> = [
        (BonusKind::Extra, plan.totals.extras),
        (BonusKind::SideStory, plan.totals.side_stories),
    ]
    .into_iter()
    .filter(|(_, total)| *total > 0)
    .map(|(kind, total)| format!("{} {}", total, kind.noun(total)))
    .collect();
    if !remaining.is_empty() {
        lines.push(format!(
            "***《{}》*** is almost at the very end, just {} left before we wrap up this journey for good.",
            ctx.novel_link(),
            remaining.join(" and ")
        ));
    }

    lines.push(format!(
        "{} in {}'s advance access today. Thanks for sticking with this one 'til the end. \
         Please show your love and support by leaving comments on the site~",
        plan.wording.dropped_phrase(),
        ctx.novel.host
    ));

    DiscordMessage::new(
        lines
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    )
    .suppress_link_previews()
}
