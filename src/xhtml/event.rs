//! Markup events consumed by the dispatcher.
use smallvec::SmallVec;

/// Attribute list of a start tag, in document order.
pub type Attributes = SmallVec<[(String, String); 4]>;

/// One tokenizer event.
///
/// The stream is assumed well nested: every `Start` has a matching `End`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start { name: String, attrs: Attributes },
    Text(String),
    End { name: String },
}

impl Event {
    /// Start tag without attributes.
    pub fn start(name: impl Into<String>) -> Self {
        Event::Start {
            name: name.into(),
            attrs: Attributes::new(),
        }
    }

    /// Start tag with attributes.
    pub fn start_with<I, K, V>(name: impl Into<String>, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Event::Start {
            name: name.into(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Event::Text(text.into())
    }

    pub fn end(name: impl Into<String>) -> Self {
        Event::End { name: name.into() }
    }
}

/// Value of the first attribute named `name` (ASCII case-insensitive).
pub fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
