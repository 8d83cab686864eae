//! RSS document parsing.

use chrono::DateTime;
use herald_core::{Feed, FeedEntry, FeedEntryBuilder};
use herald_error::{FeedError, FeedErrorKind};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::{debug, warn};

/// Item elements herald reads. Matching is on the lower-cased local name, so
/// `nameExtend` and `nameextend` are the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Guid,
    Volume,
    NameExtend,
    ChapterName,
    Category,
    Published,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name.to_ascii_lowercase().as_slice() {
            b"title" => Some(Self::Title),
            b"link" => Some(Self::Link),
            b"guid" | b"id" => Some(Self::Guid),
            b"volume" => Some(Self::Volume),
            b"nameextend" => Some(Self::NameExtend),
            b"chaptername" => Some(Self::ChapterName),
            b"category" => Some(Self::Category),
            b"pubdate" | b"published" => Some(Self::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Draft {
    title: String,
    link: String,
    guid: String,
    volume: String,
    name_extend: String,
    chapter_name: String,
    categories: Vec<String>,
    published: String,
}

impl Draft {
    fn push(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Guid => &mut self.guid,
            Field::Volume => &mut self.volume,
            Field::NameExtend => &mut self.name_extend,
            Field::ChapterName => &mut self.chapter_name,
            Field::Published => &mut self.published,
            Field::Category => {
                self.categories.push(text.to_string());
                return;
            }
        };
        slot.push_str(text);
    }

    fn finish(self) -> Result<FeedEntry, FeedError> {
        let published = match self.published.trim() {
            "" => None,
            raw => DateTime::parse_from_rfc2822(raw)
                .or_else(|_| DateTime::parse_from_rfc3339(raw))
                .map_err(|e| warn!(raw, error = %e, "Ignoring unparseable publish date"))
                .ok(),
        };

        FeedEntryBuilder::default()
            .title(self.title)
            .link(self.link)
            .guid(self.guid)
            .volume(self.volume)
            .name_extend(self.name_extend)
            .chapter_name(self.chapter_name)
            .category(self.categories.join(", "))
            .published(published)
            .build()
            .map_err(|e| FeedError::new(FeedErrorKind::Malformed(e.to_string())))
    }
}

/// Parses an RSS (or Atom-like) document into a [`Feed`].
///
/// Entries keep document order. Unknown elements are ignored, repeated
/// `category` elements are joined with `", "`, and a missing or unparseable
/// publish date leaves [`FeedEntry::published`] empty.
///
/// # Errors
///
/// Returns [`FeedErrorKind::Malformed`] when the document is not well-formed.
pub fn parse_feed(xml: &str) -> Result<Feed, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut draft: Option<Draft> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if is_item(name.as_ref()) {
                    draft = Some(Draft::default());
                } else if draft.is_some() {
                    field = Field::from_local_name(name.as_ref());
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(draft), Some(field)) = (draft.as_mut(), field) {
                    let text = t
                        .unescape()
                        .map_err(|e| FeedError::new(FeedErrorKind::Malformed(e.to_string())))?;
                    draft.push(field, &text);
                }
            }
            Ok(Event::CData(c)) => {
                if let (Some(draft), Some(field)) = (draft.as_mut(), field) {
                    let raw = c.into_inner();
                    draft.push(field, &String::from_utf8_lossy(&raw));
                }
            }
            Ok(Event::End(e)) => {
                if is_item(e.local_name().as_ref()) {
                    if let Some(done) = draft.take() {
                        entries.push(done.finish()?);
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FeedError::new(FeedErrorKind::Malformed(format!(
                    "at byte {}: {}",
                    reader.error_position(),
                    e
                ))));
            }
            Ok(_) => {}
        }
    }

    debug!(count = entries.len(), "Parsed feed");
    Ok(Feed::new(entries))
}

fn is_item(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"item") || name.eq_ignore_ascii_case(b"entry")
}
