use std::collections::HashMap;

use crate::api::CommentId;
use crate::ThreadNode;

/// How many replies one "view more" click reveals
pub const REPLY_PAGE_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct NodeState {
    expanded: bool,
    visible: usize,
}

/// Per-node "show replies" state, keyed by comment id and owned by the view
/// alongside (not inside) the thread. Nodes start collapsed; the first
/// expansion reveals one page of replies; collapsing keeps the revealed
/// count so re-expanding resumes where the user left off.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Disclosure(HashMap<CommentId, NodeState>);

impl Disclosure {
    pub fn new() -> Disclosure {
        Disclosure(HashMap::new())
    }

    pub fn is_expanded(&self, id: CommentId) -> bool {
        self.0.get(&id).map(|s| s.expanded).unwrap_or(false)
    }

    pub fn toggle(&mut self, id: CommentId) {
        let s = self.0.entry(id).or_insert(NodeState {
            expanded: false,
            visible: REPLY_PAGE_SIZE,
        });
        s.expanded = !s.expanded;
    }

    /// Reveals one more page of replies, never past the actual count
    pub fn view_more(&mut self, id: CommentId, reply_count: usize) {
        let s = self.0.entry(id).or_insert(NodeState {
            expanded: false,
            visible: REPLY_PAGE_SIZE,
        });
        s.visible = (s.visible + REPLY_PAGE_SIZE).min(reply_count);
    }

    /// Number of replies currently rendered under `id` (0 when collapsed)
    pub fn visible_count(&self, id: CommentId, reply_count: usize) -> usize {
        match self.0.get(&id) {
            Some(s) if s.expanded => s.visible.min(reply_count),
            _ => 0,
        }
    }

    /// The slice of `node.replies` the view should render right now
    pub fn visible_replies<'a>(&self, node: &'a ThreadNode) -> &'a [ThreadNode] {
        &node.replies[..self.visible_count(node.comment.id, node.replies.len())]
    }

    /// True when expanding revealed everything there is
    pub fn fully_revealed(&self, id: CommentId, reply_count: usize) -> bool {
        self.visible_count(id, reply_count) == reply_count
    }

    /// Drops state for ids that no longer exist (after a subtree delete)
    pub fn retain(&mut self, mut keep: impl FnMut(CommentId) -> bool) {
        self.0.retain(|id, _| keep(*id));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Uuid;

    fn cid(n: u128) -> CommentId {
        CommentId(Uuid::from_u128(n))
    }

    #[test]
    fn nodes_start_collapsed() {
        let d = Disclosure::new();
        assert!(!d.is_expanded(cid(1)));
        assert_eq!(d.visible_count(cid(1), 12), 0);
    }

    #[test]
    fn paging_reveals_five_then_caps_at_actual_count() {
        let mut d = Disclosure::new();
        d.toggle(cid(1));
        assert_eq!(d.visible_count(cid(1), 12), 5);
        d.view_more(cid(1), 12);
        assert_eq!(d.visible_count(cid(1), 12), 10);
        d.view_more(cid(1), 12);
        assert_eq!(d.visible_count(cid(1), 12), 12);
        assert!(d.fully_revealed(cid(1), 12));
        // one more click past the end changes nothing
        d.view_more(cid(1), 12);
        assert_eq!(d.visible_count(cid(1), 12), 12);
    }

    #[test]
    fn few_replies_are_fully_visible_on_first_expand() {
        let mut d = Disclosure::new();
        d.toggle(cid(1));
        assert_eq!(d.visible_count(cid(1), 3), 3);
        assert!(d.fully_revealed(cid(1), 3));
    }

    #[test]
    fn collapsing_keeps_the_revealed_count() {
        let mut d = Disclosure::new();
        d.toggle(cid(1));
        d.view_more(cid(1), 12);
        d.toggle(cid(1));
        assert_eq!(d.visible_count(cid(1), 12), 0);
        d.toggle(cid(1));
        assert_eq!(d.visible_count(cid(1), 12), 10);
    }

    #[test]
    fn state_is_independent_per_node() {
        let mut d = Disclosure::new();
        d.toggle(cid(1));
        d.view_more(cid(1), 12);
        d.toggle(cid(2));
        assert_eq!(d.visible_count(cid(1), 12), 10);
        assert_eq!(d.visible_count(cid(2), 12), 5);
        assert!(!d.is_expanded(cid(3)));
    }

    #[test]
    fn retain_prunes_deleted_ids() {
        let mut d = Disclosure::new();
        d.toggle(cid(1));
        d.toggle(cid(2));
        d.retain(|id| id == cid(2));
        assert!(!d.is_expanded(cid(1)));
        assert!(d.is_expanded(cid(2)));
    }
}
