//! HTML-like input parsing.
//!
//! The upstream converter produces well-nested but not always well-formed
//! markup, so the reader runs with end-name checking off and the parser
//! tolerates stray and missing end tags instead of failing the document.

use std::borrow::Cow;
use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities;
use crate::error::ParseError;
use crate::node::{DocumentNode, Element};

/// Tag of the synthetic wrapper the input is parsed under.
const ROOT_TAG: &str = "root";

/// Parse converter output into a document tree.
///
/// Named HTML entities are normalized to Unicode first, then the markup is
/// read under a synthetic root element. The returned element is that root;
/// its children are the document's top-level nodes.
///
/// # Errors
///
/// Returns an error only for XML-level failures the reader cannot recover
/// from. Mismatched or unclosed tags are tolerated.
pub fn parse(html: &str) -> Result<Element, ParseError> {
    let normalized = entities::normalize_entities(html);
    let wrapped = format!("<{ROOT_TAG}>{normalized}</{ROOT_TAG}>");

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;

    let mut root = Element::root();
    let mut open: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let element = element_from(&reader, &start);
                if element.tag == ROOT_TAG && open.is_empty() && root.children.is_empty() {
                    // The synthetic wrapper itself.
                    continue;
                }
                open.push(element);
            }
            Event::Empty(start) => {
                let element = element_from(&reader, &start);
                attach(&mut root, &mut open, DocumentNode::Element(element));
            }
            Event::Text(text) => {
                let text = reader.decoder().decode(&text)?.into_owned();
                attach(&mut root, &mut open, DocumentNode::Text(text));
            }
            Event::GeneralRef(entity) => {
                let entity = reader.decoder().decode(&entity)?.into_owned();
                let text = entities::decode_reference(&entity);
                attach(&mut root, &mut open, DocumentNode::Text(text));
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                attach(&mut root, &mut open, DocumentNode::Text(text));
            }
            Event::End(end) => {
                let name = decode_name(&reader, end.name().as_ref());
                // Close the innermost matching element, attaching anything
                // left unclosed above it. Stray end tags are ignored.
                if let Some(depth) = open.iter().rposition(|element| element.tag == name) {
                    close_to_depth(&mut root, &mut open, depth);
                }
            }
            Event::Eof => {
                close_to_depth(&mut root, &mut open, 0);
                return Ok(root);
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }
}

fn close_to_depth(root: &mut Element, open: &mut Vec<Element>, depth: usize) {
    while open.len() > depth {
        if let Some(element) = open.pop() {
            attach(root, open, DocumentNode::Element(element));
        }
    }
}

fn attach(root: &mut Element, open: &mut [Element], node: DocumentNode) {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
    } else {
        root.children.push(node);
    }
}

fn element_from(reader: &Reader<&[u8]>, start: &BytesStart) -> Element {
    let tag = decode_name(reader, start.name().as_ref());
    let mut attrs = HashMap::new();
    for attr in start.attributes().flatten() {
        let key = decode_name(reader, attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );
        attrs.insert(key, value);
    }
    Element::new(tag, attrs)
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> String {
    reader
        .decoder()
        .decode(name)
        .map_or_else(
            |_| String::from_utf8_lossy(name).into_owned(),
            Cow::into_owned,
        )
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_paragraph_with_inline() {
        let root = parse("<p><strong>Bold</strong> text</p>").unwrap();

        assert_eq!(root.children.len(), 1);
        let DocumentNode::Element(p) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.kind, NodeKind::Paragraph);
        assert_eq!(p.children.len(), 2);

        let DocumentNode::Element(strong) = &p.children[0] else {
            panic!("expected element");
        };
        assert_eq!(strong.kind, NodeKind::Strong);
        assert_eq!(strong.text_content(), "Bold");
        assert_eq!(p.children[1], DocumentNode::Text(" text".to_owned()));
    }

    #[test]
    fn test_parse_uppercase_tags_normalized() {
        let root = parse("<P>hi</P>").unwrap();
        let DocumentNode::Element(p) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.tag, "p");
        assert_eq!(p.kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_parse_self_closing_image() {
        let root = parse(r#"<p><img src="pic.png" alt="Pic"/></p>"#).unwrap();
        let DocumentNode::Element(p) = &root.children[0] else {
            panic!("expected element");
        };
        let DocumentNode::Element(img) = &p.children[0] else {
            panic!("expected element");
        };
        assert_eq!(img.kind, NodeKind::Image);
        assert_eq!(img.attr("src"), Some("pic.png"));
        assert_eq!(img.attr("alt"), Some("Pic"));
    }

    #[test]
    fn test_parse_named_entities() {
        let root = parse("<p>A&nbsp;B&mdash;C &amp; D</p>").unwrap();
        let DocumentNode::Element(p) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.text_content(), "A\u{00a0}B\u{2014}C & D");
    }

    #[test]
    fn test_mismatched_end_tag_tolerated() {
        let root = parse("<p>one</div><p>two</p>").unwrap();
        let texts: Vec<String> = root
            .child_elements()
            .map(Element::text_content)
            .collect();
        assert!(texts.iter().any(|t| t.contains("one")));
        assert!(texts.iter().any(|t| t.contains("two")));
    }

    #[test]
    fn test_unclosed_tag_drained_at_eof() {
        let root = parse("<p>dangling").unwrap();
        let DocumentNode::Element(p) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(p.text_content(), "dangling");
    }

    #[test]
    fn test_nested_table_structure() {
        let root = parse(
            "<table><tbody><tr><td>A</td><td>B</td></tr></tbody></table>",
        )
        .unwrap();
        let DocumentNode::Element(table) = &root.children[0] else {
            panic!("expected element");
        };
        assert_eq!(table.kind, NodeKind::Table);
        let tbody = table.child_elements().next().unwrap();
        assert_eq!(tbody.kind, NodeKind::Container);
        let row = tbody.child_elements().next().unwrap();
        assert_eq!(row.kind, NodeKind::Row);
        assert_eq!(row.child_elements().count(), 2);
    }
}
