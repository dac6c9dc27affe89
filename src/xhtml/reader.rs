//! Tokenizer adapter turning XHTML text into dispatcher events.
use crate::common::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use std::io::BufRead;

use super::entities;
use super::event::{Attributes, Event};

/// Pull-based XHTML tokenizer.
///
/// Empty elements are expanded into a start and an end event, whitespace is
/// kept, and character references are resolved: the five XML entities,
/// numeric references and the common XHTML named entities. An unknown named
/// entity is passed through as literal text.
pub struct XhtmlReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    done: bool,
}

impl<'a> XhtmlReader<&'a [u8]> {
    pub fn from_str(xhtml: &'a str) -> Self {
        Self::new(xhtml.as_bytes())
    }
}

impl<R: BufRead> XhtmlReader<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().expand_empty_elements = true;
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::with_capacity(1024),
            done: false,
        }
    }

    /// Next event, or `None` at the end of the input.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(XmlEvent::Start(ref e)) => start_event(e)?,
                Ok(XmlEvent::End(ref e)) => Event::End {
                    name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                },
                Ok(XmlEvent::Text(ref e)) => {
                    if e.is_empty() {
                        continue;
                    }
                    Event::Text(utf8(e.as_ref())?.to_string())
                },
                Ok(XmlEvent::CData(ref e)) => Event::Text(utf8(e.as_ref())?.to_string()),
                Ok(XmlEvent::GeneralRef(ref e)) => Event::Text(resolve_reference(utf8(e.as_ref())?)),
                Ok(XmlEvent::Eof) => return Ok(None),
                Err(e) => {
                    return Err(Error::Markup(format!(
                        "XML parsing error at position {}: {}",
                        self.reader.buffer_position(),
                        e
                    )));
                },
                _ => continue, // Skip declarations, comments, doctype, processing instructions
            };
            return Ok(Some(event));
        }
    }
}

impl<R: BufRead> Iterator for XhtmlReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            },
            Err(err) => {
                self.done = true;
                Some(Err(err))
            },
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::Markup(format!("Invalid UTF-8 in markup: {}", e)))
}

fn start_event(e: &BytesStart<'_>) -> Result<Event> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = utf8(&attr.value)?;
        let value = match unescape_with(raw, lookup_entity) {
            Ok(value) => value.into_owned(),
            Err(err) => {
                log::warn!("keeping attribute {}={:?} unescaped: {}", key, raw, err);
                raw.to_string()
            },
        };
        attrs.push((key, value));
    }
    Ok(Event::Start { name, attrs })
}

fn lookup_entity(name: &str) -> Option<&'static str> {
    resolve_predefined_entity(name).or_else(|| entities::resolve(name))
}

/// Text for `&name;` appearing in character data.
fn resolve_reference(name: &str) -> String {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => atoi_simd::parse::<u32>(number.as_bytes()).ok(),
        };
        if let Some(c) = code.and_then(char::from_u32) {
            return c.to_string();
        }
    } else if let Some(text) = lookup_entity(name) {
        return text.to_string();
    }
    log::warn!("unknown character reference &{};", name);
    format!("&{};", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(xhtml: &str) -> Vec<Event> {
        XhtmlReader::from_str(xhtml)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    /// Concatenate adjacent text events, as the dispatcher's buffer does.
    fn texts(events: &[Event]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut last_was_text = false;
        for event in events {
            if let Event::Text(text) = event {
                if last_was_text {
                    if let Some(last) = out.last_mut() {
                        last.push_str(text);
                    }
                } else {
                    out.push(text.clone());
                }
                last_was_text = true;
            } else {
                last_was_text = false;
            }
        }
        out
    }

    #[test]
    fn test_start_text_end() {
        let events = events(r#"<p class="marker">Hello <b>World</b></p>"#);
        assert_eq!(
            events,
            vec![
                Event::start_with("p", [("class", "marker")]),
                Event::text("Hello "),
                Event::start("b"),
                Event::text("World"),
                Event::end("b"),
                Event::end("p"),
            ]
        );
    }

    #[test]
    fn test_empty_elements_are_expanded() {
        let events = events(r#"<p>a<br/>b</p>"#);
        assert_eq!(events[2], Event::start("br"));
        assert_eq!(events[3], Event::end("br"));
    }

    #[test]
    fn test_entities() {
        let events = events("<p>Caf&eacute; &amp; &#169;&#x2014;&nbsp;&bogus;</p>");
        assert_eq!(texts(&events), vec!["Caf\u{e9} & \u{a9}\u{2014}\u{a0}&bogus;"]);
    }

    #[test]
    fn test_attribute_entities() {
        let events = events(r#"<a href="x?a=1&amp;b=2" title="&copy;">x</a>"#);
        let Event::Start { attrs, .. } = &events[0] else {
            panic!("expected start");
        };
        assert_eq!(attrs[0].1, "x?a=1&b=2");
        assert_eq!(attrs[1].1, "\u{a9}");
    }

    #[test]
    fn test_doctype_and_comments_are_skipped() {
        let events = events("<?xml version=\"1.0\"?><!DOCTYPE html><html><!-- c --><body/></html>");
        assert_eq!(
            events,
            vec![
                Event::start("html"),
                Event::start("body"),
                Event::end("body"),
                Event::end("html"),
            ]
        );
    }

    #[test]
    fn test_mismatched_tags_are_markup_errors() {
        let result: Result<Vec<_>> = XhtmlReader::from_str("<p><b>x</p>").collect();
        assert!(matches!(result, Err(Error::Markup(_))));
    }
}
