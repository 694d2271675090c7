//! Location keys and annotation ordering
//!
//! Annotations anchored earlier in a document sort before later ones;
//! annotations without a text position sort after every anchored one.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize, Serializer};

use super::types::Annotation;

/// Sort key for an annotation's position in its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    /// Character offset of the first text position selector
    Offset(u64),
    /// No text position anywhere in the targets
    Unanchored,
}

impl Location {
    /// Numeric form of the key, positive infinity when unanchored
    pub fn as_f64(self) -> f64 {
        match self {
            Location::Offset(start) => start as f64,
            Location::Unanchored => f64::INFINITY,
        }
    }
}

// JSON has no infinity, so unanchored keys go out as `null`
impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Location::Offset(start) => serializer.serialize_u64(*start),
            Location::Unanchored => serializer.serialize_none(),
        }
    }
}

/// Return the key for sorting an annotation by its location
///
/// Scans targets in order, then each target's selectors in order, and stops
/// at the first `TextPositionSelector`.
pub fn location_key(annotation: &Annotation) -> Location {
    annotation
        .target
        .iter()
        .find_map(|target| target.text_position())
        .map_or(Location::Unanchored, Location::Offset)
}

/// Compare two annotations by location
pub fn compare_by_location(a: &Annotation, b: &Annotation) -> Ordering {
    location_key(a).cmp(&location_key(b))
}

/// Orderings offered when listing annotations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Document order
    #[default]
    Location,
    /// Most recently modified first
    Newest,
    /// Least recently modified first
    Oldest,
}

/// Sort annotations in place
///
/// The sort is stable. Annotations without any timestamp go last for both
/// `Newest` and `Oldest`.
pub fn sort_annotations(annotations: &mut [Annotation], order: SortOrder) {
    match order {
        SortOrder::Location => annotations.sort_by_cached_key(location_key),
        SortOrder::Newest => annotations.sort_by(|a, b| {
            match (a.last_modified(), b.last_modified()) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
        SortOrder::Oldest => annotations.sort_by(|a, b| {
            match (a.last_modified(), b.last_modified()) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }
}
