// Parsed representation of the upstream service-status XML.
//
// The feed does not fix the arity of its elements: a single <line> shows up as
// a bare element, several of them as siblings. Everything is folded into
// FeedNode so the normalizer can walk the tree without caring about that.

use roxmltree::{Document, Node, ParsingOptions};

/// Key under which text sitting between child elements is kept.
pub const MIXED_TEXT_KEY: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedNode {
    Leaf(String),
    Sequence(Vec<FeedNode>),
    Mapping(Vec<(String, FeedNode)>),
}

impl Default for FeedNode {
    fn default() -> Self {
        FeedNode::Leaf(String::new())
    }
}

impl FeedNode {
    /// Parses an XML document. The root element ends up as the only entry of
    /// the returned mapping, keyed by its tag name.
    pub fn parse_document(xml: &str) -> Result<FeedNode, roxmltree::Error> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        let root = doc.root_element();

        Ok(FeedNode::Mapping(vec![(
            root.tag_name().name().to_string(),
            Self::from_element(root),
        )]))
    }

    fn from_element(element: Node) -> FeedNode {
        let mut entries: Vec<(String, FeedNode)> = Vec::new();
        let mut text = String::new();

        for child in element.children() {
            if child.is_element() {
                let tag = child.tag_name().name();
                let node = Self::from_element(child);

                match entries.iter_mut().find(|(key, _)| key == tag) {
                    Some((_, FeedNode::Sequence(items))) => items.push(node),
                    Some((_, existing)) => {
                        let first = std::mem::take(existing);
                        *existing = FeedNode::Sequence(vec![first, node]);
                    }
                    None => entries.push((tag.to_string(), node)),
                }
            } else if let Some(chunk) = child.text().filter(|_| child.is_text()) {
                text.push_str(chunk);
            }
        }

        let text = text.trim();
        if entries.is_empty() {
            return FeedNode::Leaf(text.to_string());
        }
        if !text.is_empty() {
            entries.insert(0, (MIXED_TEXT_KEY.to_string(), FeedNode::Leaf(text.to_string())));
        }

        FeedNode::Mapping(entries)
    }

    pub fn get(&self, key: &str) -> Option<&FeedNode> {
        match self {
            FeedNode::Mapping(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Non-empty leaf text stored under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            FeedNode::Leaf(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    /// First non-empty leaf text among several spellings of the same field.
    pub fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.text(key))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FeedNode::Leaf(value) => value.is_empty(),
            FeedNode::Sequence(items) => items.is_empty(),
            FeedNode::Mapping(entries) => entries.is_empty(),
        }
    }

    /// Views the node as a sequence: a lone node becomes a one-element slice.
    pub fn as_slice(&self) -> &[FeedNode] {
        match self {
            FeedNode::Sequence(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Every non-empty leaf below this node, in document order, joined by a
    /// single space.
    pub fn flatten_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_leaves(&mut parts);
        parts.join(" ").trim().to_string()
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FeedNode::Leaf(value) => {
                if !value.is_empty() {
                    out.push(value);
                }
            }
            FeedNode::Sequence(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
            FeedNode::Mapping(entries) => {
                for (_, node) in entries {
                    node.collect_leaves(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: &str) -> FeedNode {
        FeedNode::Leaf(value.to_string())
    }

    #[test]
    fn single_child_stays_a_mapping() {
        let tree = FeedNode::parse_document(
            "<service><subway><line><name>A,C,E</name></line></subway></service>",
        )
        .unwrap();

        let line = tree.get("service").unwrap().get("subway").unwrap().get("line").unwrap();
        assert_eq!(line, &FeedNode::Mapping(vec![("name".to_string(), leaf("A,C,E"))]));
        assert_eq!(line.as_slice().len(), 1);
    }

    #[test]
    fn repeated_siblings_collapse_into_a_sequence() {
        let tree = FeedNode::parse_document(
            "<subway>
                <line><name>1</name></line>
                <other>x</other>
                <line><name>2</name></line>
                <line><name>3</name></line>
            </subway>",
        )
        .unwrap();

        let subway = tree.get("subway").unwrap();
        let FeedNode::Mapping(entries) = subway else {
            panic!("expected mapping, got {subway:?}");
        };
        assert_eq!(entries[0].0, "line");
        assert_eq!(entries[1].0, "other");

        let names: Vec<_> = subway
            .get("line")
            .unwrap()
            .as_slice()
            .iter()
            .map(|line| line.text("name").unwrap())
            .collect();
        assert_eq!(names, vec!["1", "2", "3"]);
    }

    #[test]
    fn text_is_trimmed_and_empty_elements_are_empty_leaves() {
        let tree = FeedNode::parse_document(
            "<line><name>  G  </name><text/><status><![CDATA[ DELAYS ]]></status></line>",
        )
        .unwrap();
        let line = tree.get("line").unwrap();

        assert_eq!(line.get("name"), Some(&leaf("G")));
        assert_eq!(line.get("text"), Some(&leaf("")));
        assert_eq!(line.text("text"), None);
        assert_eq!(line.text("status"), Some("DELAYS"));
    }

    #[test]
    fn attributes_are_ignored() {
        let tree =
            FeedNode::parse_document(r#"<text lang="en"><p class="alert">Delays</p></text>"#)
                .unwrap();

        assert_eq!(tree.get("text").unwrap().flatten_text(), "Delays");
    }

    #[test]
    fn mixed_text_is_kept_under_its_own_key() {
        let tree = FeedNode::parse_document("<text>Heads up <b>L</b> trains</text>").unwrap();
        let text = tree.get("text").unwrap();

        assert_eq!(text.text(MIXED_TEXT_KEY), Some("Heads up  trains"));
        assert_eq!(text.text("b"), Some("L"));
    }

    #[test]
    fn first_text_skips_missing_and_empty_aliases() {
        let tree = FeedNode::Mapping(vec![
            ("timestamp".to_string(), leaf("")),
            ("TimeStamp".to_string(), leaf("10/18/2026 7:45:00 AM")),
        ]);

        assert_eq!(
            tree.first_text(&["timestamp", "TimeStamp", "timeStamp"]),
            Some("10/18/2026 7:45:00 AM")
        );
        assert_eq!(tree.first_text(&["missing"]), None);
    }

    #[test]
    fn flatten_text_walks_nested_content_in_order() {
        let text = FeedNode::Mapping(vec![
            ("p".to_string(), leaf("Northbound")),
            (
                "details".to_string(),
                FeedNode::Sequence(vec![
                    leaf("trains are"),
                    FeedNode::Mapping(vec![
                        ("em".to_string(), leaf("running")),
                        ("blank".to_string(), leaf("")),
                    ]),
                ]),
            ),
            ("tail".to_string(), leaf("with delays ")),
        ]);

        assert_eq!(text.flatten_text(), "Northbound trains are running with delays");
    }

    #[test]
    fn doctype_is_accepted() {
        let tree = FeedNode::parse_document(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE service>\n<service><subway><line><name>G</name></line></subway></service>",
        )
        .unwrap();

        let line = tree.get("service").unwrap().get("subway").unwrap().get("line").unwrap();
        assert_eq!(line.text("name"), Some("G"));
    }

    #[test]
    fn malformed_xml_is_rejected() {
        assert!(FeedNode::parse_document("<service><subway></service>").is_err());
        assert!(FeedNode::parse_document("").is_err());
    }
}
