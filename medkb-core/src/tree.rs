//! Safe navigation over response trees
//!
//! Sources return arbitrarily nested JSON or XML, and any step of a
//! path may be missing. Every lookup here returns `None` (or the
//! [`ABSENT`] placeholder) instead of failing.
//!
//! JSON paths are RFC 6901 pointers (`/protocolSection/statusModule/overallStatus`,
//! `/openfda/brand_name/0`). XML is parsed into a small [`Element`] tree.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;

use crate::error::FetchError;

/// Placeholder rendered for a missing field
pub const ABSENT: &str = "N/A";

/// Look up a pointer, treating JSON `null` as missing
pub fn at<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer).filter(|v| !v.is_null())
}

static NULL: Value = Value::Null;

/// Subtree at `pointer`, or JSON `null` so further lookups stay absent
pub fn node<'a>(value: &'a Value, pointer: &str) -> &'a Value {
    at(value, pointer).unwrap_or(&NULL)
}

/// Render a scalar as text. Containers have no text form.
pub fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Scalar at `pointer`, or `None`
pub fn opt_text(value: &Value, pointer: &str) -> Option<String> {
    at(value, pointer).and_then(scalar)
}

/// Scalar at `pointer`, or [`ABSENT`]
pub fn text(value: &Value, pointer: &str) -> String {
    text_or(value, pointer, ABSENT)
}

/// Scalar at `pointer`, or `default`
pub fn text_or(value: &Value, pointer: &str, default: &str) -> String {
    opt_text(value, pointer).unwrap_or_else(|| default.to_string())
}

/// Array at `pointer`; empty when missing or not an array
pub fn list<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    at(value, pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First element of the array at `pointer`
pub fn first<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    list(value, pointer).first()
}

/// Collect up to `limit` scalars from the array at `pointer`.
///
/// With `field = Some(name)` each element is an object and `name` is read
/// from it; elements lacking the field contribute an empty string.
pub fn strings(value: &Value, pointer: &str, field: Option<&str>, limit: usize) -> Vec<String> {
    list(value, pointer)
        .iter()
        .take(limit)
        .map(|item| {
            let item = match field {
                Some(name) => item.get(name),
                None => Some(item),
            };
            item.and_then(scalar).unwrap_or_default()
        })
        .collect()
}

/// A node in a parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with mixed content
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Local tag name (namespace prefix stripped)
    pub name: String,

    /// Child elements and text, in document order
    pub nodes: Vec<Node>,
}

impl Element {
    fn named(name: String) -> Self {
        Self {
            name,
            nodes: Vec::new(),
        }
    }

    /// Parse a document into a synthetic root holding the top-level elements
    pub fn parse(xml: &str) -> Result<Element, FetchError> {
        // Text events stay untrimmed: inline markup such as `HbA<sub>1c</sub>`
        // splits one run of prose into several events
        let mut reader = Reader::from_str(xml);

        let mut stack = vec![Element::default()];

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    stack.push(Element::named(name));
                }
                Event::Empty(empty) => {
                    let name = String::from_utf8_lossy(empty.local_name().as_ref()).into_owned();
                    push_node(&mut stack, Node::Element(Element::named(name)));
                }
                Event::End(_) => {
                    if stack.len() < 2 {
                        return Err(FetchError::Xml("unbalanced closing tag".to_string()));
                    }
                    if let Some(done) = stack.pop() {
                        push_node(&mut stack, Node::Element(done));
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    if !text.is_empty() {
                        push_node(&mut stack, Node::Text(text));
                    }
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    push_node(&mut stack, Node::Text(text));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if stack.len() != 1 {
            return Err(FetchError::Xml("document ended inside an element".to_string()));
        }
        Ok(stack.pop().unwrap_or_default())
    }

    /// Direct child elements
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().find(|e| e.name == name)
    }

    /// All descendants in document order (excluding `self`)
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in self.children() {
            out.push(child);
            child.collect_descendants(out);
        }
    }

    /// All descendants with the given name, in document order
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    /// First match of a `/`-separated path anchored at any descendant.
    ///
    /// `find("Journal/Title")` returns the first `Title` child of any
    /// `Journal` below `self`.
    pub fn find(&self, path: &str) -> Option<&Element> {
        let mut steps = path.split('/').filter(|s| !s.is_empty());
        let head = steps.next()?;
        let rest: Vec<&str> = steps.collect();

        self.descendants()
            .into_iter()
            .filter(|e| e.name == head)
            .find_map(|e| e.child_path(&rest))
    }

    fn child_path(&self, steps: &[&str]) -> Option<&Element> {
        match steps.split_first() {
            None => Some(self),
            Some((step, rest)) => self
                .children()
                .filter(|e| e.name == *step)
                .find_map(|e| e.child_path(rest)),
        }
    }

    /// Direct text content with whitespace collapsed, `None` when empty
    pub fn text(&self) -> Option<String> {
        let raw: String = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect();
        let text = collapse_whitespace(&raw);
        (!text.is_empty()).then_some(text)
    }

    /// Text of this element and all descendants, in document order, with
    /// whitespace collapsed
    pub fn inner_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        collapse_whitespace(&parts.concat())
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        for node in &self.nodes {
            match node {
                Node::Text(t) => out.push(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_node(stack: &mut [Element], node: Node) {
    if let Some(top) = stack.last_mut() {
        top.nodes.push(node);
    }
}
