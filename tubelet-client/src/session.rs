use crate::api::{Comment, User, UserId};

/// Who is logged in, passed down explicitly to whoever needs to gate an
/// affordance. Starts in the loading state until the first "who am I"
/// refresh resolves one way or the other; views can show placeholders
/// instead of flashing a logged-out UI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionState {
    current_user: Option<User>,
    is_loading: bool,
}

impl SessionState {
    pub fn new() -> SessionState {
        SessionState {
            current_user: None,
            is_loading: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.current_user.as_ref().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Entry point for both login and a successful "who am I" refresh
    pub fn set_user(&mut self, user: User) {
        self.current_user = Some(user);
        self.is_loading = false;
    }

    /// Entry point for logout and for a refresh that came back anonymous
    pub fn clear_user(&mut self) {
        self.current_user = None;
        self.is_loading = false;
    }

    /// Commenting and replying need a logged-in user
    pub fn can_comment(&self) -> bool {
        self.is_authenticated()
    }

    /// Edit/delete are only offered on the user's own comments
    pub fn can_modify(&self, comment: &Comment) -> bool {
        self.current_user_id() == Some(comment.user_id)
    }
}

impl Default for SessionState {
    fn default() -> SessionState {
        SessionState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CommentId, Uuid};

    fn user(n: u128) -> User {
        User {
            id: UserId(Uuid::from_u128(n)),
            username: format!("user{n}"),
            avatar: String::new(),
            banner: String::new(),
            subscribers: 0,
        }
    }

    fn comment_by(n: u128) -> Comment {
        Comment {
            id: CommentId::stub(),
            user_id: UserId(Uuid::from_u128(n)),
            username: format!("user{n}"),
            avatar: None,
            text: String::from("hi"),
            timestamp: String::new(),
            likes: 0,
            parent_id: None,
        }
    }

    #[test]
    fn starts_loading_and_anonymous() {
        let s = SessionState::new();
        assert!(s.is_loading());
        assert!(!s.is_authenticated());
        assert!(!s.can_comment());
    }

    #[test]
    fn refresh_resolves_loading_either_way() {
        let mut s = SessionState::new();
        s.clear_user();
        assert!(!s.is_loading());
        s.set_user(user(1));
        assert!(!s.is_loading());
        assert!(s.can_comment());
    }

    #[test]
    fn only_the_author_can_modify() {
        let mut s = SessionState::new();
        s.set_user(user(1));
        assert!(s.can_modify(&comment_by(1)));
        assert!(!s.can_modify(&comment_by(2)));
        s.clear_user();
        assert!(!s.can_modify(&comment_by(1)));
    }
}
