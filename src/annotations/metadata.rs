//! Document metadata extraction
//!
//! Derives the display URI, domain and title of the document an annotation
//! was made on. The URI is taken from, in order of preference:
//!
//! 1. the first target's `locator`
//! 2. the first non-URN document link, when the annotation's own URI is a URN
//! 3. the annotation's `uri`

use serde::{Deserialize, Serialize};
use url::Url;

use super::types::Annotation;
use crate::error::{MetadataError, Result};

/// Titles longer than this many characters are truncated
pub const MAX_TITLE_CHARS: usize = 30;

/// Marker appended to truncated titles
pub const ELLIPSIS: char = '…';

/// Display metadata for the document an annotation belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub uri: String,
    pub domain: String,
    pub title: String,
}

/// Extract a URI, domain and title from an annotation
///
/// Fails only when the resolved URI cannot be parsed.
pub fn extract_document_metadata(annotation: &Annotation) -> Result<DocumentMetadata> {
    let uri = resolve_uri(annotation);
    let parsed = Url::parse(uri).map_err(|source| MetadataError::MalformedUri {
        uri: uri.to_string(),
        source,
    })?;

    let domain = parsed.host_str().unwrap_or_default().to_string();
    if domain.is_empty() {
        tracing::trace!(uri, "URI has no host");
    }

    let title = annotation
        .document
        .as_ref()
        .and_then(|document| document.display_title())
        .or_else(|| Some(domain.as_str()).filter(|d| !d.is_empty()))
        .unwrap_or(uri);

    let truncated = truncate_title(title);
    if truncated != title {
        tracing::trace!(uri, title, "Truncated document title");
    }

    Ok(DocumentMetadata {
        uri: uri.to_string(),
        title: truncated,
        domain,
    })
}

/// Cut a title down to [`MAX_TITLE_CHARS`] characters plus [`ELLIPSIS`]
///
/// Titles at or under the limit are returned unchanged.
pub fn truncate_title(title: &str) -> String {
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + ELLIPSIS.len_utf8());
            truncated.push_str(&title[..cut]);
            truncated.push(ELLIPSIS);
            truncated
        }
        None => title.to_string(),
    }
}

fn resolve_uri(annotation: &Annotation) -> &str {
    let Some(target) = annotation.target.first() else {
        return &annotation.uri;
    };

    if let Some(locator) = target.locator.as_deref().filter(|l| !l.is_empty()) {
        return locator;
    }

    if annotation.uri.starts_with("urn") {
        let href = annotation
            .document
            .iter()
            .flat_map(|document| document.links())
            .map(|link| link.href.as_str())
            .find(|href| !href.starts_with("urn:"));

        if let Some(href) = href {
            tracing::debug!(urn = %annotation.uri, href, "Resolved URN to document link");
            return href;
        }
    }

    &annotation.uri
}
