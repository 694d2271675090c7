//! Annotation type classification
//!
//! The `is_type_*` predicates are not mutually exclusive: a reply whose
//! first target carries a selector satisfies both [`is_type_annotation`]
//! and [`is_type_reply`]. [`classify_annotation_type`] settles overlaps by
//! checking page note, then annotation, then reply.
//!
//! [`is_reply`] ignores the deleted flag, so it can disagree with both
//! [`is_type_reply`] and the classifier.

use serde::{Deserialize, Serialize};

use super::types::Annotation;

/// Display kind of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Attached to the whole document, no positional anchor
    #[serde(rename = "note")]
    PageNote,
    /// Anchored to a selection in the document
    Annotation,
    /// Response to another annotation
    Reply,
}

fn is_live(annotation: Option<&Annotation>) -> Option<&Annotation> {
    annotation.filter(|a| !a.is_deleted())
}

fn first_target_has_selector(annotation: &Annotation) -> bool {
    annotation
        .target
        .first()
        .is_some_and(|target| target.selector.is_some())
}

/// A live annotation with a non-empty ancestor chain
pub fn is_type_reply(annotation: Option<&Annotation>) -> bool {
    is_live(annotation).is_some_and(|a| !a.references().is_empty())
}

/// A live, non-reply annotation without a selector on its first target
pub fn is_type_page_note(annotation: Option<&Annotation>) -> bool {
    is_live(annotation).is_some_and(|a| {
        !is_type_reply(Some(a)) && (a.target.is_empty() || !first_target_has_selector(a))
    })
}

/// A live annotation whose first target carries a selector
pub fn is_type_annotation(annotation: Option<&Annotation>) -> bool {
    is_live(annotation).is_some_and(first_target_has_selector)
}

/// Classify an annotation, checking page note, annotation and reply in turn
///
/// Returns `None` for deleted or absent annotations.
pub fn classify_annotation_type(annotation: Option<&Annotation>) -> Option<AnnotationKind> {
    if is_type_page_note(annotation) {
        Some(AnnotationKind::PageNote)
    } else if is_type_annotation(annotation) {
        Some(AnnotationKind::Annotation)
    } else if is_type_reply(annotation) {
        Some(AnnotationKind::Reply)
    } else {
        None
    }
}

/// Return `true` if the annotation references an ancestor
///
/// Unlike [`is_type_reply`] this does not look at the deleted flag.
pub fn is_reply(annotation: &Annotation) -> bool {
    !annotation.references().is_empty()
}

/// Return `true` if the annotation has not been saved to the server yet
pub fn is_new(annotation: &Annotation) -> bool {
    annotation.id.as_deref().map_or(true, str::is_empty)
}
