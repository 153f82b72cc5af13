//! Candidate comments: a flat list from the API rendered as a two-level
//! thread (top-level comments, one level of replies).

use serde::{Deserialize, Serialize};

use openhr_core::{FieldError, FieldRules};

/// Hard cap enforced locally before a comment is submitted.
pub const MAX_COMMENT_LEN: usize = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateComment {
    pub id: String,
    pub candidate_id: String,
    pub author: String,
    pub body: String,
    /// Id of the top-level comment this replies to, if any.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A new comment or reply, validated before it goes anywhere near the
/// network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub candidate_id: String,
    pub body: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl CommentDraft {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("candidateId", &self.candidate_id)
            .require("body", &self.body)
            .max_len("body", &self.body, MAX_COMMENT_LEN);
        rules.finish().err().unwrap_or_default()
    }
}

/// One top-level comment with its replies.
#[derive(Debug, Clone)]
pub struct CommentNode {
    pub comment: CandidateComment,
    pub replies: Vec<CandidateComment>,
}

/// Arrange the API's flat comment list into the two-level thread the
/// candidate page renders. Replies keep their order; a reply whose
/// parent is missing from the list is promoted to top level rather than
/// dropped.
pub fn thread(comments: Vec<CandidateComment>) -> Vec<CommentNode> {
    let top_ids: Vec<String> = comments
        .iter()
        .filter(|c| c.parent_id.is_none())
        .map(|c| c.id.clone())
        .collect();

    let mut nodes: Vec<CommentNode> = Vec::new();
    let mut replies: Vec<CandidateComment> = Vec::new();

    for comment in comments {
        match &comment.parent_id {
            Some(parent) if top_ids.contains(parent) => replies.push(comment),
            // Orphaned reply: parent deleted or not a top-level comment.
            _ => nodes.push(CommentNode {
                comment,
                replies: Vec::new(),
            }),
        }
    }

    for reply in replies {
        let parent = reply.parent_id.clone().unwrap_or_default();
        if let Some(node) = nodes.iter_mut().find(|n| n.comment.id == parent) {
            node.replies.push(reply);
        }
    }

    nodes
}
