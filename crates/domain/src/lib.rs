mod category;
mod comments;
mod error;
mod models;
mod reaction;
mod scope;

pub use category::{CategoryLevel, CategoryTree};
pub use comments::{build_comment_tree, CommentThread, MAX_REPLY_DEPTH};
pub use error::CoreError;
pub use models::{
    AnnouncementScope, Category, Comment, ContentItem, NewComment, NewContentItem, ReactionKind,
    ReactionRecord, SubjectRef, SubjectType, UserReactionState,
};
pub use reaction::{transition, Transition};
pub use scope::{ScopeResolver, SCOPE_ALL};
