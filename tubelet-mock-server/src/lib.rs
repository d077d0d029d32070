use std::collections::{btree_map, BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tubelet_client::{
    api::{
        AuthToken, Comment, CommentApi, CommentId, Error, FeedMessage, Livestream, LivestreamId,
        NewComment, NewLivestream, NewSession, NewUser, NewVideo, StreamStatus, Subscription, User,
        UserId, Uuid, Video, VideoId,
    },
    remove_subtree,
};

/// In-memory stand-in for the v1 backend, with the same visible semantics:
/// newest-first lists, author-only edit/delete, cascade on comment and
/// video deletion. Used by tests as the external collaborator so the client
/// crates never need a real server.
pub struct MockServer {
    users: BTreeMap<UserId, DbUser>,
    videos: Vec<Video>,
    comments: HashMap<VideoId, Vec<Comment>>,
    subscriptions: Vec<Subscription>,
    livestreams: Vec<Livestream>,
    feeds: HashMap<VideoId, Vec<mpsc::UnboundedSender<FeedMessage>>>,
}

#[derive(Debug)]
struct DbUser {
    profile: User,
    email: String,
    pass_hash: String,
    sessions: HashMap<AuthToken, Device>,
}

#[derive(Debug)]
struct Device(String);

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            users: BTreeMap::new(),
            videos: Vec::new(),
            comments: HashMap::new(),
            subscriptions: Vec::new(),
            livestreams: Vec::new(),
            feeds: HashMap::new(),
        }
    }

    /// Return email & username for user number `id`
    pub fn test_get_user_info(&self, id: usize) -> (&str, &str) {
        let u = self
            .users
            .values()
            .nth(id)
            .unwrap_or_else(|| panic!("getting user {id} among {}", self.users.len()));
        (&u.email, &u.profile.username)
    }

    pub fn test_num_users(&self) -> usize {
        self.users.len()
    }

    pub fn admin_create_user(&mut self, u: NewUser) -> Result<(), Error> {
        u.validate()?;

        if self.users.values().any(|db| db.email == u.email) {
            return Err(Error::EmailAlreadyUsed(u.email));
        }

        match self.users.entry(u.id) {
            btree_map::Entry::Occupied(_) => Err(Error::UuidAlreadyUsed(u.id.0)),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(DbUser {
                    profile: User {
                        id: u.id,
                        username: u.username,
                        avatar: String::new(),
                        banner: String::new(),
                        subscribers: 0,
                    },
                    email: u.email,
                    pass_hash: u.initial_password_hash,
                    sessions: HashMap::new(),
                });
                Ok(())
            }
        }
    }

    pub fn auth(&mut self, s: NewSession) -> Result<AuthToken, Error> {
        s.validate()?;
        for u in self.users.values_mut() {
            if u.email == s.email {
                if !bcrypt::verify(&s.password, &u.pass_hash).unwrap_or(false) {
                    return Err(Error::PermissionDenied);
                }
                let tok = AuthToken(Uuid::new_v4());
                u.sessions.insert(tok, Device(s.device));
                return Ok(tok);
            }
        }
        Err(Error::PermissionDenied)
    }

    fn resolve(&self, tok: AuthToken) -> Result<&DbUser, Error> {
        for u in self.users.values() {
            if u.sessions.contains_key(&tok) {
                return Ok(u);
            }
        }
        Err(Error::PermissionDenied)
    }

    fn resolve_mut(&mut self, tok: AuthToken) -> Result<&mut DbUser, Error> {
        for u in self.users.values_mut() {
            if u.sessions.contains_key(&tok) {
                return Ok(u);
            }
        }
        Err(Error::PermissionDenied)
    }

    pub fn unauth(&mut self, tok: AuthToken) -> Result<(), Error> {
        let u = self.resolve_mut(tok)?;
        u.sessions.remove(&tok);
        Ok(())
    }

    pub fn whoami(&self, tok: AuthToken) -> Result<User, Error> {
        let u = self.resolve(tok)?;
        Ok(self.profile_of(u.profile.id))
    }

    fn subscriber_count(&self, channel: UserId) -> i64 {
        self.subscriptions
            .iter()
            .filter(|s| s.channel_id == channel)
            .count() as i64
    }

    fn profile_of(&self, id: UserId) -> User {
        let mut profile = self.users[&id].profile.clone();
        profile.subscribers = self.subscriber_count(id);
        profile
    }

    pub fn get_user(&self, id: UserId) -> Result<User, Error> {
        match self.users.contains_key(&id) {
            true => Ok(self.profile_of(id)),
            false => Err(Error::PermissionDenied),
        }
    }

    pub fn search_users(&self, q: &str) -> Vec<User> {
        let q = q.to_lowercase();
        self.users
            .values()
            .filter(|u| u.profile.username.to_lowercase().contains(&q))
            .map(|u| self.profile_of(u.profile.id))
            .collect()
    }

    // ---- videos ----

    pub fn create_video(&mut self, tok: AuthToken, v: NewVideo) -> Result<Video, Error> {
        v.validate()?;
        let uploader = self.resolve(tok)?.profile.id;
        let video = Video {
            id: VideoId(Uuid::new_v4()),
            title: v.title,
            description: v.description,
            thumbnail: v.thumbnail,
            url: v.url,
            views: 0,
            uploaded_at: now_timestamp(),
            duration: v.duration,
            uploader: self.profile_of(uploader),
            tags: v.tags,
        };
        self.videos.push(video.clone());
        Ok(video)
    }

    /// Newest first, like `GET /api/v1/videos/`
    pub fn list_videos(&self, skip: usize, limit: usize) -> Vec<Video> {
        self.videos.iter().rev().skip(skip).take(limit).cloned().collect()
    }

    pub fn get_video(&self, id: VideoId) -> Result<Video, Error> {
        self.videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(Error::VideoNotFound(id.0))
    }

    pub fn delete_video(&mut self, tok: AuthToken, id: VideoId) -> Result<(), Error> {
        let user = self.resolve(tok)?.profile.id;
        let video = self
            .videos
            .iter()
            .find(|v| v.id == id)
            .ok_or(Error::VideoNotFound(id.0))?;
        if video.uploader.id != user {
            return Err(Error::PermissionDenied);
        }
        self.videos.retain(|v| v.id != id);
        self.comments.remove(&id);
        self.feeds.remove(&id);
        Ok(())
    }

    /// Increments and returns the view count. The *client* is responsible
    /// for calling this only once per session (see `ViewTracker`); the
    /// endpoint itself counts every call, like the real one.
    pub fn track_view(&mut self, id: VideoId) -> Result<i64, Error> {
        let video = self
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(Error::VideoNotFound(id.0))?;
        video.views += 1;
        Ok(video.views)
    }

    pub fn search_videos(&self, q: &str) -> Vec<Video> {
        let q = q.to_lowercase();
        self.videos
            .iter()
            .rev()
            .filter(|v| {
                v.title.to_lowercase().contains(&q)
                    || v.description.to_lowercase().contains(&q)
                    || v.tags.iter().any(|t| t.to_lowercase().contains(&q))
            })
            .cloned()
            .collect()
    }

    // ---- subscriptions ----

    pub fn subscribe(&mut self, tok: AuthToken, channel: UserId) -> Result<(), Error> {
        let subscriber = self.resolve(tok)?.profile.id;
        if !self.users.contains_key(&channel) {
            return Err(Error::PermissionDenied);
        }
        let sub = Subscription {
            channel_id: channel,
            subscriber_id: subscriber,
        };
        if !self.subscriptions.contains(&sub) {
            self.subscriptions.push(sub);
        }
        Ok(())
    }

    pub fn unsubscribe(&mut self, tok: AuthToken, channel: UserId) -> Result<(), Error> {
        let subscriber = self.resolve(tok)?.profile.id;
        self.subscriptions
            .retain(|s| !(s.channel_id == channel && s.subscriber_id == subscriber));
        Ok(())
    }

    pub fn channel_subscribers(&self, channel: UserId) -> Vec<UserId> {
        self.subscriptions
            .iter()
            .filter(|s| s.channel_id == channel)
            .map(|s| s.subscriber_id)
            .collect()
    }

    // ---- livestreams ----

    pub fn list_livestreams(&self, skip: usize, limit: usize) -> Vec<Livestream> {
        self.livestreams.iter().rev().skip(skip).take(limit).cloned().collect()
    }

    /// Unknown ids come back as an OFFLINE placeholder, matching the v1
    /// endpoint's current behavior
    pub fn get_livestream(&self, id: LivestreamId) -> Livestream {
        self.livestreams
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .unwrap_or(Livestream {
                id,
                title: String::from("Livestream"),
                status: StreamStatus::Offline,
                created_at: String::new(),
            })
    }

    pub fn create_livestream(&mut self, tok: AuthToken, l: NewLivestream) -> Result<Livestream, Error> {
        self.resolve(tok)?;
        let stream = Livestream {
            id: LivestreamId(Uuid::new_v4()),
            title: match l.title.trim().is_empty() {
                true => String::from("Livestream"),
                false => l.title,
            },
            status: StreamStatus::Live,
            created_at: now_timestamp(),
        };
        self.livestreams.push(stream.clone());
        Ok(stream)
    }

    // ---- comments ----

    /// Newest first, like `GET /api/v1/comments/video/{id}`
    pub fn video_comments(&self, video: VideoId) -> Result<Vec<Comment>, Error> {
        if !self.videos.iter().any(|v| v.id == video) {
            return Err(Error::VideoNotFound(video.0));
        }
        Ok(self
            .comments
            .get(&video)
            .map(|cs| cs.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    pub fn post_comment(&mut self, tok: AuthToken, c: NewComment) -> Result<Comment, Error> {
        c.validate()?;
        let author = self.resolve(tok)?.profile.id;
        if !self.videos.iter().any(|v| v.id == c.video_id) {
            return Err(Error::VideoNotFound(c.video_id.0));
        }
        // the parent foreign key: a reply must name a comment of the same video
        if let Some(parent) = c.parent_id {
            let known = self
                .comments
                .get(&c.video_id)
                .map(|cs| cs.iter().any(|p| p.id == parent))
                .unwrap_or(false);
            if !known {
                return Err(Error::CommentNotFound(parent.0));
            }
        }
        let profile = self.profile_of(author);
        let comment = Comment {
            id: CommentId(Uuid::new_v4()),
            user_id: author,
            username: profile.username,
            avatar: match profile.avatar.is_empty() {
                true => None,
                false => Some(profile.avatar),
            },
            text: c.text,
            timestamp: now_timestamp(),
            likes: 0,
            parent_id: c.parent_id,
        };
        self.comments
            .entry(c.video_id)
            .or_default()
            .push(comment.clone());
        self.relay(c.video_id, FeedMessage::NewComment(comment.clone()));
        Ok(comment)
    }

    pub fn edit_comment(
        &mut self,
        tok: AuthToken,
        id: CommentId,
        text: String,
    ) -> Result<Comment, Error> {
        tubelet_client::api::validate_text(&text)?;
        let user = self.resolve(tok)?.profile.id;
        for comments in self.comments.values_mut() {
            if let Some(c) = comments.iter_mut().find(|c| c.id == id) {
                if c.user_id != user {
                    return Err(Error::PermissionDenied);
                }
                c.text = text;
                return Ok(c.clone());
            }
        }
        Err(Error::CommentNotFound(id.0))
    }

    /// Cascade delete: the comment and all its transitive replies, like the
    /// `ondelete="CASCADE"` foreign key server-side
    pub fn remove_comment(&mut self, tok: AuthToken, id: CommentId) -> Result<(), Error> {
        let user = self.resolve(tok)?.profile.id;
        for comments in self.comments.values_mut() {
            if let Some(c) = comments.iter().find(|c| c.id == id) {
                if c.user_id != user {
                    return Err(Error::PermissionDenied);
                }
                *comments = remove_subtree(std::mem::take(comments), id);
                return Ok(());
            }
        }
        Err(Error::CommentNotFound(id.0))
    }

    // ---- live comment feed ----

    pub fn comment_feed(&mut self, video: VideoId) -> Result<mpsc::UnboundedReceiver<FeedMessage>, Error> {
        if !self.videos.iter().any(|v| v.id == video) {
            return Err(Error::VideoNotFound(video.0));
        }
        let (sender, receiver) = mpsc::unbounded_channel();
        self.feeds.entry(video).or_default().push(sender);
        Ok(receiver)
    }

    fn relay(&mut self, video: VideoId, msg: FeedMessage) {
        if let Some(feeds) = self.feeds.get_mut(&video) {
            feeds.retain(|f| matches!(f.send(msg.clone()), Ok(())));
        }
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

#[async_trait]
impl CommentApi for MockServer {
    async fn list_comments(&mut self, video: VideoId) -> Result<Vec<Comment>, Error> {
        self.video_comments(video)
    }

    async fn create_comment(
        &mut self,
        token: AuthToken,
        comment: NewComment,
    ) -> Result<Comment, Error> {
        self.post_comment(token, comment)
    }

    async fn update_comment(
        &mut self,
        token: AuthToken,
        comment: CommentId,
        text: String,
    ) -> Result<Comment, Error> {
        self.edit_comment(token, comment, text)
    }

    async fn delete_comment(&mut self, token: AuthToken, comment: CommentId) -> Result<(), Error> {
        self.remove_comment(token, comment)
    }
}
