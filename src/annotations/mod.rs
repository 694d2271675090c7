//! Annotation metadata module
//!
//! Pure functions over annotation records as returned by the annotation API.
//!
//! # Features
//!
//! - Document metadata: display URI, domain and (truncated) title
//! - Type classification:
//!   - Page notes
//!   - Annotations
//!   - Replies
//! - Location keys for document-order sorting
//! - Reply separation for threaded views

mod classify;
mod location;
mod metadata;
mod summary;
mod threads;
mod types;

pub use classify::{
    classify_annotation_type, is_new, is_reply, is_type_annotation, is_type_page_note,
    is_type_reply, AnnotationKind,
};
pub use location::{compare_by_location, location_key, sort_annotations, Location, SortOrder};
pub use metadata::{
    extract_document_metadata, truncate_title, DocumentMetadata, ELLIPSIS, MAX_TITLE_CHARS,
};
pub use summary::AnnotationSummary;
pub use threads::{separate_replies, SeparatedAnnotations};
pub use types::{
    Annotation, Document, DocumentLink, DocumentTitle, Selector, SelectorKind, Target,
};
