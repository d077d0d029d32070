use crate::api::{Comment, CommentId, VideoId};
use crate::{build_thread, remove_subtree, Disclosure, ThreadNode};

/// The watch page's view of one video's comments: the flat list as fetched,
/// patched locally after each successful mutation, plus the reply-disclosure
/// state. The forest is rebuilt from the flat list on every render
/// (`thread` is pure and O(n)), never patched in place.
///
/// Callers only patch after the corresponding network call succeeded; a
/// failed call leaves the feed exactly as it was. There is no rollback
/// because nothing is applied optimistically.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentFeed {
    video_id: VideoId,
    records: Vec<Comment>,
    disclosure: Disclosure,
}

impl CommentFeed {
    pub fn new(video_id: VideoId) -> CommentFeed {
        CommentFeed {
            video_id,
            records: Vec::new(),
            disclosure: Disclosure::new(),
        }
    }

    pub fn video_id(&self) -> VideoId {
        self.video_id
    }

    pub fn records(&self) -> &[Comment] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the whole collection with a fresh fetch, dropping any
    /// disclosure state from the previous fetch
    pub fn load(&mut self, records: Vec<Comment>) {
        self.records = records;
        self.disclosure.clear();
    }

    /// Starts over when the watched video changes; a no-op for the same id
    pub fn switch_video(&mut self, video_id: VideoId) {
        if self.video_id != video_id {
            *self = CommentFeed::new(video_id);
        }
    }

    /// A successfully created comment or reply goes to the front of the
    /// flat list, which puts it first among its siblings
    pub fn apply_created(&mut self, comment: Comment) {
        self.records.insert(0, comment);
    }

    /// Merges the server's updated record into the local copy (text only;
    /// attribution and timestamps are not editable). Unknown ids are
    /// tolerated: the comment may have been deleted under us.
    pub fn apply_edited(&mut self, updated: &Comment) {
        match self.records.iter_mut().find(|c| c.id == updated.id) {
            Some(local) => local.text = updated.text.clone(),
            None => {
                tracing::warn!(comment = ?updated.id, "edited comment is not in the local feed")
            }
        }
    }

    /// Mirrors the server's cascade: the comment and all its transitive
    /// replies disappear together, along with their disclosure state
    pub fn apply_deleted(&mut self, comment: CommentId) {
        self.records = remove_subtree(std::mem::take(&mut self.records), comment);
        let kept: std::collections::HashSet<CommentId> =
            self.records.iter().map(|c| c.id).collect();
        self.disclosure.retain(|id| kept.contains(&id));
    }

    /// Rebuilds the reply forest for rendering
    pub fn thread(&self) -> Vec<ThreadNode> {
        build_thread(&self.records)
    }

    /// Number of replies that would attach under `comment` in the built
    /// forest (self-references never attach)
    pub fn reply_count(&self, comment: CommentId) -> usize {
        self.records
            .iter()
            .filter(|c| c.parent_id == Some(comment) && c.id != comment)
            .count()
    }

    pub fn disclosure(&self) -> &Disclosure {
        &self.disclosure
    }

    pub fn toggle_replies(&mut self, comment: CommentId) {
        self.disclosure.toggle(comment);
    }

    pub fn view_more_replies(&mut self, comment: CommentId) {
        let count = self.reply_count(comment);
        self.disclosure.view_more(comment, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{UserId, Uuid};

    fn cid(n: u128) -> CommentId {
        CommentId(Uuid::from_u128(n))
    }

    fn comment(id: u128, parent: Option<u128>) -> Comment {
        Comment {
            id: cid(id),
            user_id: UserId::stub(),
            username: String::from("ada"),
            avatar: None,
            text: format!("comment {id}"),
            timestamp: String::from("2024-05-01T12:00:00+00:00"),
            likes: 0,
            parent_id: parent.map(cid),
        }
    }

    fn feed_with(records: Vec<Comment>) -> CommentFeed {
        let mut feed = CommentFeed::new(VideoId::stub());
        feed.load(records);
        feed
    }

    #[test]
    fn created_comments_are_prepended() {
        let mut feed = feed_with(vec![comment(1, None)]);
        feed.apply_created(comment(2, None));
        assert_eq!(
            feed.records().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![cid(2), cid(1)]
        );
        // and therefore render first among the roots
        assert_eq!(feed.thread()[0].comment.id, cid(2));
    }

    #[test]
    fn edits_replace_text_in_place() {
        let mut feed = feed_with(vec![comment(1, None), comment(2, Some(1))]);
        let mut updated = comment(2, Some(1));
        updated.text = String::from("edited");
        feed.apply_edited(&updated);
        assert_eq!(feed.records()[1].text, "edited");
        assert_eq!(feed.records()[0].text, "comment 1");
    }

    #[test]
    fn editing_an_unknown_comment_changes_nothing() {
        let mut feed = feed_with(vec![comment(1, None)]);
        let before = feed.clone();
        feed.apply_edited(&comment(9, None));
        assert_eq!(feed, before);
    }

    #[test]
    fn deletion_cascades_and_prunes_disclosure() {
        let mut feed = feed_with(vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, None),
        ]);
        feed.toggle_replies(cid(2));
        feed.toggle_replies(cid(4));
        feed.apply_deleted(cid(1));
        assert_eq!(
            feed.records().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![cid(4)]
        );
        assert!(!feed.disclosure().is_expanded(cid(2)));
        assert!(feed.disclosure().is_expanded(cid(4)));
    }

    #[test]
    fn switching_videos_resets_everything() {
        let mut feed = feed_with(vec![comment(1, None)]);
        feed.toggle_replies(cid(1));
        feed.switch_video(VideoId::stub()); // same id: keep state
        assert_eq!(feed.len(), 1);
        feed.switch_video(VideoId(Uuid::from_u128(7)));
        assert!(feed.is_empty());
        assert!(!feed.disclosure().is_expanded(cid(1)));
    }

    #[test]
    fn view_more_is_capped_by_the_actual_reply_count() {
        let mut records = vec![comment(1, None)];
        for i in 0..12 {
            records.push(comment(10 + i, Some(1)));
        }
        let mut feed = feed_with(records);
        feed.toggle_replies(cid(1));
        let thread = feed.thread();
        assert_eq!(feed.disclosure().visible_replies(&thread[0]).len(), 5);
        feed.view_more_replies(cid(1));
        assert_eq!(feed.disclosure().visible_replies(&thread[0]).len(), 10);
        feed.view_more_replies(cid(1));
        assert_eq!(feed.disclosure().visible_replies(&thread[0]).len(), 12);
    }
}
