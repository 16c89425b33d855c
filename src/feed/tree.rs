// tree.rs
//
// XML → serde_json::Value using the "collapsed" shape most feed consumers
// expect:
//
//   <a>text</a>                 → "text"
//   <a id="1">text</a>          → { "$": { "id": "1" }, "_": "text" }
//   <a><b>x</b></a>             → { "b": "x" }
//   <a><b>x</b><b>y</b></a>     → { "b": ["x", "y"] }
//
// So a repeatable element is a single node when it appears once and an array
// when it appears more than once. Callers have to cope with both.

use crate::errors::FeedError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::{Map, Value};

pub const ATTRS_KEY: &str = "$";
pub const TEXT_KEY: &str = "_";

struct ElementBuilder {
    name: String,
    attrs: Map<String, Value>,
    text: String,
    children: Vec<(String, Value)>,
}

impl ElementBuilder {
    fn open(start: &BytesStart) -> Result<Self, FeedError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attrs = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| FeedError::XmlParse(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| FeedError::XmlParse(e.to_string()))?;
            attrs.insert(key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            attrs,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim();

        if self.attrs.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(text.to_string()));
        }

        let mut obj = Map::new();
        if !self.attrs.is_empty() {
            obj.insert(ATTRS_KEY.to_string(), Value::Object(self.attrs));
        }
        if !text.is_empty() {
            obj.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }

        for (name, child) in self.children {
            match obj.remove(&name) {
                None => {
                    obj.insert(name, child);
                }
                Some(Value::Array(mut items)) => {
                    items.push(child);
                    obj.insert(name, Value::Array(items));
                }
                Some(first) => {
                    obj.insert(name, Value::Array(vec![first, child]));
                }
            }
        }

        (self.name, Value::Object(obj))
    }
}

/// Parses a whole XML document into a tree rooted at `{ "<root>": node }`.
pub fn parse_tree(xml: &str) -> Result<Value, FeedError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<ElementBuilder> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            FeedError::XmlParse(format!("at byte {}: {e}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(FeedError::XmlParse("more than one root element".into()));
                }
                stack.push(ElementBuilder::open(&start)?);
            }
            Event::Empty(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(FeedError::XmlParse("more than one root element".into()));
                }
                let element = ElementBuilder::open(&start)?.close();
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                // quick-xml already rejects mismatched end tags
                let builder = stack
                    .pop()
                    .ok_or_else(|| FeedError::XmlParse("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, builder.close());
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| FeedError::XmlParse(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let raw = cdata.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&raw))?;
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FeedError::XmlParse(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    let (name, node) = root.ok_or_else(|| FeedError::XmlParse("no root element".into()))?;

    let mut doc = Map::new();
    doc.insert(name, node);
    Ok(Value::Object(doc))
}

fn attach(
    stack: &mut [ElementBuilder],
    root: &mut Option<(String, Value)>,
    element: (String, Value),
) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [ElementBuilder], text: &str) -> Result<(), FeedError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(FeedError::XmlParse("text outside the root element".into())),
    }
}
