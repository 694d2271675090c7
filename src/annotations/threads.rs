//! Splitting annotation lists into top-level rows and replies

use serde::{Deserialize, Serialize};

use super::classify::is_reply;
use super::types::Annotation;

/// Top-level annotations with their replies held separately
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeparatedAnnotations {
    pub rows: Vec<Annotation>,
    pub replies: Vec<Annotation>,
}

/// Partition annotations into top-level rows and replies, keeping order
pub fn separate_replies(annotations: Vec<Annotation>) -> SeparatedAnnotations {
    let (replies, rows): (Vec<_>, Vec<_>) = annotations.into_iter().partition(is_reply);
    SeparatedAnnotations { rows, replies }
}

impl SeparatedAnnotations {
    /// Replies whose thread is rooted at the given annotation
    pub fn replies_to<'a>(&'a self, root_id: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.replies
            .iter()
            .filter(move |reply| reply.thread_root() == Some(root_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separate_replies() {
        let annotations = vec![
            Annotation::new("http://example.com/").with_id("root-1"),
            Annotation::new("http://example.com/").with_id("reply-1").with_references(&["root-1"]),
            Annotation::new("http://example.com/").with_id("root-2"),
            Annotation::new("http://example.com/")
                .with_id("reply-2")
                .with_references(&["root-1", "reply-1"]),
            Annotation::new("http://example.com/").with_id("reply-3").with_references(&["root-2"]),
        ];

        let separated = separate_replies(annotations);

        let rows: Vec<_> = separated.rows.iter().map(|a| a.id.as_deref().unwrap()).collect();
        let replies: Vec<_> = separated.replies.iter().map(|a| a.id.as_deref().unwrap()).collect();
        assert_eq!(rows, vec!["root-1", "root-2"]);
        assert_eq!(replies, vec!["reply-1", "reply-2", "reply-3"]);

        let thread: Vec<_> = separated
            .replies_to("root-1")
            .map(|a| a.id.as_deref().unwrap())
            .collect();
        assert_eq!(thread, vec!["reply-1", "reply-2"]);
    }

    #[test]
    fn test_deleted_replies_stay_replies() {
        let mut reply = Annotation::new("http://example.com/").with_references(&["root"]);
        reply.deleted = Some(true);

        let separated = separate_replies(vec![reply]);
        assert!(separated.rows.is_empty());
        assert_eq!(separated.replies.len(), 1);
    }
}
