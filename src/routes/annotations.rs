//! Annotation metadata API endpoints
//!
//! Each endpoint takes annotation records in the request body and returns
//! values derived from them; nothing is stored.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::annotations::{
    extract_document_metadata, separate_replies, sort_annotations, Annotation,
    AnnotationSummary, DocumentMetadata, SeparatedAnnotations, SortOrder,
};
use crate::error::{AppError, AppResult};

/// Create the annotations router
pub fn router() -> Router {
    Router::new()
        .route("/metadata", post(document_metadata))
        .route("/summary", post(summary))
        .route("/sort", post(sort))
        .route("/separate", post(separate))
}

/// Query parameters for sorting
#[derive(Debug, Deserialize)]
pub struct SortParams {
    #[serde(default)]
    order: SortOrder,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Display metadata for a single annotation
async fn document_metadata(
    payload: Result<Json<Annotation>, JsonRejection>,
) -> AppResult<Json<DocumentMetadata>> {
    let annotation = body(payload)?;
    Ok(Json(extract_document_metadata(&annotation)?))
}

/// Metadata, kind and location for a single annotation
async fn summary(
    payload: Result<Json<Annotation>, JsonRejection>,
) -> AppResult<Json<AnnotationSummary>> {
    let annotation = body(payload)?;
    Ok(Json(AnnotationSummary::from_annotation(&annotation)?))
}

/// Sort a list of annotations
async fn sort(
    params: Result<Query<SortParams>, QueryRejection>,
    payload: Result<Json<Vec<Annotation>>, JsonRejection>,
) -> AppResult<Json<Vec<Annotation>>> {
    let Query(SortParams { order }) =
        params.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let mut annotations = body(payload)?;
    tracing::debug!("Sorting {} annotations by {:?}", annotations.len(), order);
    sort_annotations(&mut annotations, order);
    Ok(Json(annotations))
}

/// Split a list into top-level annotations and replies
async fn separate(
    payload: Result<Json<Vec<Annotation>>, JsonRejection>,
) -> AppResult<Json<SeparatedAnnotations>> {
    let separated = separate_replies(body(payload)?);
    tracing::debug!(
        "Separated {} rows and {} replies",
        separated.rows.len(),
        separated.replies.len()
    );
    Ok(Json(separated))
}
