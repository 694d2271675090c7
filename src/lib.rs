//! Annotation Metadata
//!
//! Derives display metadata from annotation records: the document's URI,
//! domain and title, the annotation's kind (page note, annotation, reply)
//! and a key for sorting annotations in document order.
//!
//! # Modules
//!
//! - `annotations`: record types and the pure metadata functions
//! - `config`: environment configuration for the HTTP service
//! - `error`: library and HTTP error types
//! - `routes`: axum routes serving the `annotations` functions

pub mod annotations;
pub mod config;
pub mod error;
pub mod routes;

pub use annotations::{
    classify_annotation_type, extract_document_metadata, is_new, is_reply, is_type_annotation,
    is_type_page_note, is_type_reply, location_key, Annotation, AnnotationKind, DocumentMetadata,
    Location,
};
pub use error::{AppError, MetadataError};
