//! Static routing table from tag names to dispatcher behaviour.
use phf::{Map, phf_map};

/// What the dispatcher does with a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Structural wrapper with no output of its own
    Container,
    /// `ul`
    BulletList,
    /// `ol`
    OrderedList,
    Table,
    Row,
    /// `td`, or `th` when `header` is set
    Cell { header: bool },
    Paragraph,
    ListItem,
    Heading(u8),
    Hyperlink,
    Image,
    Rule,
    Break,
    Span,
    Bold,
    Italic,
    Underline,
    Strike,
    /// Subtree whose text is never emitted
    Suppressed,
}

impl Tag {
    /// Tags that open a new block and therefore close an implicit paragraph.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Tag::BulletList
                | Tag::OrderedList
                | Tag::Table
                | Tag::Paragraph
                | Tag::ListItem
                | Tag::Heading(_)
                | Tag::Rule
        )
    }

    /// Formatting tags that only wrap runs.
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Tag::Span | Tag::Bold | Tag::Italic | Tag::Underline | Tag::Strike
        )
    }
}

static TAGS: Map<&'static str, Tag> = phf_map! {
    "html" => Tag::Container,
    "body" => Tag::Container,
    "div" => Tag::Container,
    "tbody" => Tag::Container,
    "thead" => Tag::Container,
    "tfoot" => Tag::Container,
    "ul" => Tag::BulletList,
    "ol" => Tag::OrderedList,
    "table" => Tag::Table,
    "tr" => Tag::Row,
    "td" => Tag::Cell { header: false },
    "th" => Tag::Cell { header: true },
    "p" => Tag::Paragraph,
    "li" => Tag::ListItem,
    "h1" => Tag::Heading(1),
    "h2" => Tag::Heading(2),
    "h3" => Tag::Heading(3),
    "h4" => Tag::Heading(4),
    "h5" => Tag::Heading(5),
    "h6" => Tag::Heading(6),
    "a" => Tag::Hyperlink,
    "img" => Tag::Image,
    "hr" => Tag::Rule,
    "br" => Tag::Break,
    "span" => Tag::Span,
    "strong" => Tag::Bold,
    "b" => Tag::Bold,
    "em" => Tag::Italic,
    "i" => Tag::Italic,
    "u" => Tag::Underline,
    "s" => Tag::Strike,
    "strike" => Tag::Strike,
    "del" => Tag::Strike,
    "head" => Tag::Suppressed,
    "title" => Tag::Suppressed,
    "style" => Tag::Suppressed,
    "script" => Tag::Suppressed,
};

/// Look up an already lowercased tag name. Unknown tags yield `None`.
pub fn lookup(name: &str) -> Option<Tag> {
    TAGS.get(name).copied()
}

/// ASCII case-fold a tag name.
pub fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(&normalize("TH")), Some(Tag::Cell { header: true }));
        assert_eq!(lookup("h4"), Some(Tag::Heading(4)));
        assert_eq!(lookup("del"), Some(Tag::Strike));
        assert_eq!(lookup("marquee"), None);
        assert!(Tag::Table.is_block());
        assert!(!Tag::Span.is_block());
        assert!(Tag::Bold.is_inline());
        assert!(!Tag::Container.is_inline());
    }
}
