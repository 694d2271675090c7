//! Annotation record types as emitted by the annotation API
//!
//! The shape follows the W3C Web Annotation Data Model as used by the
//! annotation service: every field a client may omit is optional here, so a
//! record with only a `uri` and an empty `target` list still deserializes.
//! Fields this crate does not interpret are carried in `extra` and written
//! back out unchanged.
//!
//! Reference: <https://www.w3.org/TR/annotation-model/>

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A single annotation record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Server-assigned identifier, absent until the annotation is saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Primary subject URI
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    /// What (and where) the annotation anchors to
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: Vec<Target>,
    /// Metadata of the annotated document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    /// Ancestor annotation IDs, root first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
    /// Set once the annotation has been deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    /// Author account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Annotation body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    /// Everything else (group, permissions, links...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The portion of an annotation describing what it anchors to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Source document URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Alternate URI overriding the annotation's `uri` for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    /// Anchoring strategies, tried in order by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Vec<Selector>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Selector types this crate understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SelectorKind {
    /// Character offsets within the document text
    #[serde(rename = "TextPositionSelector")]
    TextPosition {
        start: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<u64>,
    },
    /// Quoted text with surrounding context
    #[serde(rename = "TextQuoteSelector")]
    TextQuote {
        exact: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suffix: Option<String>,
    },
    /// Fragment identifier (e.g. an EPUB CFI or a media fragment)
    #[serde(rename = "FragmentSelector")]
    Fragment {
        value: String,
        #[serde(rename = "conformsTo", default, skip_serializing_if = "Option::is_none")]
        conforms_to: Option<String>,
    },
    /// XPath range between two DOM positions
    #[serde(rename = "RangeSelector")]
    Range {
        #[serde(rename = "startContainer")]
        start_container: String,
        #[serde(rename = "startOffset")]
        start_offset: u64,
        #[serde(rename = "endContainer")]
        end_container: String,
        #[serde(rename = "endOffset")]
        end_offset: u64,
    },
}

/// A selector exactly as received
///
/// `kind` is set when the selector decodes as one of the [`SelectorKind`]
/// variants; unknown types and incomplete payloads leave it `None`. The raw
/// JSON is what gets serialized, so nothing is lost either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    kind: Option<SelectorKind>,
    raw: Value,
}

impl Selector {
    pub fn kind(&self) -> Option<&SelectorKind> {
        self.kind.as_ref()
    }

    /// The `type` tag, whether or not it is understood
    pub fn selector_type(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl From<SelectorKind> for Selector {
    fn from(kind: SelectorKind) -> Self {
        let raw = serde_json::to_value(&kind).unwrap_or_default();
        Self {
            kind: Some(kind),
            raw,
        }
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let kind = SelectorKind::deserialize(&raw).ok();
        Ok(Self { kind, raw })
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Metadata about the annotated document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<DocumentTitle>,
    /// Known URIs for the document, in order of preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Vec<DocumentLink>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document titles arrive either as a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentTitle {
    One(String),
    Many(Vec<String>),
}

/// A known URI for a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub href: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Annotation {
    /// Create an unsaved annotation on `uri` with no targets
    pub fn new(uri: &str) -> Self {
        Self {
            uri: uri.to_string(),
            ..Default::default()
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Append a target
    pub fn with_target(mut self, target: Target) -> Self {
        self.target.push(target);
        self
    }

    /// Set the ancestor chain, root first
    pub fn with_references(mut self, references: &[&str]) -> Self {
        self.references = Some(references.iter().map(|r| r.to_string()).collect());
        self
    }

    /// Set the document metadata
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Whether the deleted flag is set
    pub fn is_deleted(&self) -> bool {
        self.deleted.unwrap_or(false)
    }

    /// The ancestor chain, empty when this is not a reply
    pub fn references(&self) -> &[String] {
        self.references.as_deref().unwrap_or(&[])
    }

    /// ID of the top-level annotation of the thread this reply belongs to
    pub fn thread_root(&self) -> Option<&str> {
        self.references().first().map(String::as_str)
    }

    /// Most recent timestamp known for this annotation
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.updated.or(self.created)
    }
}

impl Target {
    /// Create a target anchored by the given selectors
    pub fn with_selectors(selectors: impl IntoIterator<Item = SelectorKind>) -> Self {
        Self {
            selector: Some(selectors.into_iter().map(Selector::from).collect()),
            ..Default::default()
        }
    }

    /// Create a target that only carries a locator
    pub fn from_locator(locator: &str) -> Self {
        Self {
            locator: Some(locator.to_string()),
            ..Default::default()
        }
    }

    /// The selector list, empty when none was given
    pub fn selectors(&self) -> &[Selector] {
        self.selector.as_deref().unwrap_or(&[])
    }

    /// Start offset of the first text position selector, if any
    pub fn text_position(&self) -> Option<u64> {
        self.selectors().iter().find_map(|s| match s.kind() {
            Some(SelectorKind::TextPosition { start, .. }) => Some(*start),
            _ => None,
        })
    }
}

impl DocumentTitle {
    /// The title to display: the scalar, or the first list entry
    pub fn first(&self) -> Option<&str> {
        match self {
            DocumentTitle::One(title) => Some(title.as_str()),
            DocumentTitle::Many(titles) => titles.first().map(String::as_str),
        }
    }
}

impl Document {
    /// Create document metadata with a single title
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(DocumentTitle::One(title.to_string())),
            ..Default::default()
        }
    }

    /// Append a known URI for the document
    pub fn with_link(mut self, href: &str) -> Self {
        self.link.get_or_insert_with(Vec::new).push(DocumentLink {
            href: href.to_string(),
            extra: Map::new(),
        });
        self
    }

    /// Title resolved to a single non-empty string
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_ref()
            .and_then(DocumentTitle::first)
            .filter(|title| !title.is_empty())
    }

    pub fn links(&self) -> &[DocumentLink] {
        self.link.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_record() {
        let annotation: Annotation = serde_json::from_value(json!({
            "uri": "http://example.com/",
        }))
        .unwrap();

        assert_eq!(annotation.uri, "http://example.com/");
        assert!(annotation.target.is_empty());
        assert!(annotation.id.is_none());
        assert!(!annotation.is_deleted());
    }

    #[test]
    fn test_null_fields_fall_back_to_empty() {
        let annotation: Annotation = serde_json::from_value(json!({
            "uri": null,
            "target": null,
            "tags": null,
        }))
        .unwrap();

        assert_eq!(annotation.uri, "");
        assert!(annotation.target.is_empty());
        assert!(annotation.tags.is_empty());
    }

    #[test]
    fn test_deserialize_selectors() {
        let annotation: Annotation = serde_json::from_value(json!({
            "uri": "http://example.com/",
            "target": [{
                "source": "http://example.com/",
                "selector": [
                    {"type": "RangeSelector", "startContainer": "/p[1]", "startOffset": 0,
                     "endContainer": "/p[1]", "endOffset": 12},
                    {"type": "TextPositionSelector", "start": 42, "end": 54},
                    {"type": "TextQuoteSelector", "exact": "hello world", "prefix": "say "},
                    {"type": "CssSelector", "value": "#main"}
                ]
            }]
        }))
        .unwrap();

        let selectors = annotation.target[0].selectors();
        assert_eq!(selectors.len(), 4);
        assert!(matches!(
            selectors[0].kind(),
            Some(SelectorKind::Range { end_offset: 12, .. })
        ));
        assert_eq!(annotation.target[0].text_position(), Some(42));
        assert_eq!(selectors[3].kind(), None);
        assert_eq!(selectors[3].selector_type(), Some("CssSelector"));
        assert_eq!(selectors[3].raw()["value"], json!("#main"));
    }

    #[test]
    fn test_incomplete_selector_does_not_reject_record() {
        let annotation: Annotation = serde_json::from_value(json!({
            "uri": "http://example.com/",
            "target": [{
                "selector": [
                    {"type": "TextQuoteSelector", "prefix": "no exact here"},
                    {"type": "TextPositionSelector", "start": 7}
                ]
            }]
        }))
        .unwrap();

        let selectors = annotation.target[0].selectors();
        assert_eq!(selectors[0].kind(), None);
        assert_eq!(selectors[0].selector_type(), Some("TextQuoteSelector"));
        assert_eq!(annotation.target[0].text_position(), Some(7));
    }

    #[test]
    fn test_unmodelled_fields_survive_round_trip() {
        let input = json!({
            "id": "a",
            "uri": "http://example.com/",
            "group": "__world__",
            "permissions": {"read": ["group:__world__"]},
            "target": [{
                "source": "http://example.com/",
                "scope": ["http://example.com/*"],
                "selector": [
                    {"type": "CssSelector", "value": "#main"},
                    {"type": "TextPositionSelector", "start": 3, "end": 9, "refinedBy": {"x": 1}}
                ]
            }],
            "document": {
                "title": ["T"],
                "highwire": {"doi": ["10.1000/182"]},
                "link": [{"href": "http://example.com/", "rel": "canonical"}]
            }
        });

        let annotation: Annotation = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(annotation.extra["group"], json!("__world__"));
        assert_eq!(serde_json::to_value(&annotation).unwrap(), input);
    }

    #[test]
    fn test_title_scalar_and_list() {
        let scalar: Document = serde_json::from_value(json!({"title": "Scalar"})).unwrap();
        let list: Document = serde_json::from_value(json!({"title": ["First", "Second"]})).unwrap();
        let empty: Document = serde_json::from_value(json!({"title": []})).unwrap();

        assert_eq!(scalar.display_title(), Some("Scalar"));
        assert_eq!(list.display_title(), Some("First"));
        assert_eq!(empty.display_title(), None);
    }

    #[test]
    fn test_thread_root() {
        let reply = Annotation::new("http://example.com/").with_references(&["root", "parent"]);

        assert_eq!(reply.thread_root(), Some("root"));
        assert_eq!(Annotation::new("http://example.com/").thread_root(), None);
    }
}
