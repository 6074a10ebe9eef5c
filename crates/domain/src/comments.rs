use serde::Serialize;
use std::collections::HashMap;

use crate::models::Comment;

/// Replies nest at most this deep. A reply whose parent is itself a
/// reply is flattened onto the nearest root-level item; this is the
/// named rendering policy, not a storage constraint.
pub const MAX_REPLY_DEPTH: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Single pass over a list ordered by creation time ascending. An item
/// becomes a root when it has no parent or its parent is not itself a
/// root; otherwise it joins that root's replies in original order.
pub fn build_comment_tree(flat: Vec<Comment>) -> Vec<CommentThread> {
    let mut threads: Vec<CommentThread> = Vec::new();
    let mut root_index: HashMap<i64, usize> = HashMap::new();

    for comment in flat {
        match comment.parent_id.and_then(|p| root_index.get(&p).copied()) {
            Some(idx) => threads[idx].replies.push(comment),
            None => {
                root_index.insert(comment.id, threads.len());
                threads.push(CommentThread { comment, replies: Vec::new() });
            }
        }
    }

    threads
}
