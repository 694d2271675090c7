//! Per-annotation summary combining every derived value

use serde::Serialize;

use super::classify::{classify_annotation_type, is_new, is_reply, AnnotationKind};
use super::location::{location_key, Location};
use super::metadata::{extract_document_metadata, DocumentMetadata};
use super::types::Annotation;
use crate::error::Result;

/// Everything a list view needs to render one annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub document: DocumentMetadata,
    /// `None` for deleted annotations
    pub kind: Option<AnnotationKind>,
    pub location: Location,
    #[serde(rename = "isNew")]
    pub is_new: bool,
    #[serde(rename = "isReply")]
    pub is_reply: bool,
}

impl AnnotationSummary {
    pub fn from_annotation(annotation: &Annotation) -> Result<Self> {
        Ok(Self {
            id: annotation.id.clone(),
            document: extract_document_metadata(annotation)?,
            kind: classify_annotation_type(Some(annotation)),
            location: location_key(annotation),
            is_new: is_new(annotation),
            is_reply: is_reply(annotation),
        })
    }
}
