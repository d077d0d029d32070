mod disclosure;
pub use disclosure::{Disclosure, REPLY_PAGE_SIZE};

mod feed;
pub use feed::CommentFeed;

mod session;
pub use session::SessionState;

mod thread;
pub use thread::{build_thread, remove_subtree, ThreadNode};

mod views;
pub use views::ViewTracker;

pub mod api {
    pub use tubelet_api::*;
}
