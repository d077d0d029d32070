use std::collections::{HashMap, HashSet};

use crate::api::{Comment, CommentId};

/// One comment plus its replies, in input order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreadNode {
    pub comment: Comment,
    pub replies: Vec<ThreadNode>,
}

impl ThreadNode {
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// Depth-first ids of this node and everything under it
    pub fn flatten_ids(&self, into: &mut Vec<CommentId>) {
        into.push(self.comment.id);
        for r in &self.replies {
            r.flatten_ids(into);
        }
    }
}

/// Builds the reply forest from the flat list the server returns.
///
/// Attachment rules: a record whose `parent_id` resolves to another record
/// in `records` becomes a reply of that record; everything else (no parent,
/// parent not in the list, parent is itself) becomes a root. A reply whose
/// parent has not arrived yet must still be rendered, so dangling parents
/// are not an error. Sibling order is input order. Duplicate ids do not
/// occur in well-formed data but must not crash: the last record wins for
/// parent resolution.
pub fn build_thread(records: &[Comment]) -> Vec<ThreadNode> {
    let mut index = HashMap::with_capacity(records.len());
    for (i, c) in records.iter().enumerate() {
        index.insert(c.id, i);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    for (i, c) in records.iter().enumerate() {
        match c.parent_id.map(|p| index.get(&p).copied()) {
            Some(Some(parent)) if parent != i => children[parent].push(i),
            Some(_) => {
                // dangling or self-referencing parent: surface as top-level
                // rather than dropping the reply
                tracing::warn!(comment = ?c.id, parent = ?c.parent_id, "reply to unknown comment, attaching as root");
                roots.push(i);
            }
            None => roots.push(i),
        }
    }

    let mut nodes: Vec<Option<Comment>> = records.iter().cloned().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|i| assemble(i, &mut nodes, &children))
        .collect()
}

fn assemble(i: usize, nodes: &mut [Option<Comment>], children: &[Vec<usize>]) -> Option<ThreadNode> {
    // a None here can only come from duplicate-id confusion; skip instead of
    // rendering the same record twice
    let comment = nodes[i].take()?;
    let replies = children[i]
        .iter()
        .filter_map(|&c| assemble(c, nodes, children))
        .collect();
    Some(ThreadNode { comment, replies })
}

/// Drops `target` and all its transitive replies from the flat list, the
/// client-side mirror of the server's cascade delete. Unrelated records are
/// left untouched; if `target` has no replies exactly one record goes away.
pub fn remove_subtree(records: Vec<Comment>, target: CommentId) -> Vec<Comment> {
    let mut children: HashMap<CommentId, Vec<CommentId>> = HashMap::new();
    for c in &records {
        if let Some(p) = c.parent_id {
            children.entry(p).or_default().push(c.id);
        }
    }

    let mut removed = HashSet::new();
    let mut stack = vec![target];
    while let Some(id) = stack.pop() {
        if removed.insert(id) {
            if let Some(replies) = children.get(&id) {
                stack.extend(replies.iter().copied());
            }
        }
    }

    records
        .into_iter()
        .filter(|c| !removed.contains(&c.id))
        .collect()
}
