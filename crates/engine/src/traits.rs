use async_trait::async_trait;
use domain::{
    Category, Comment, ContentItem, CoreError, NewComment, NewContentItem, ReactionKind,
    SubjectRef,
};
use std::collections::BTreeSet;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Category>, CoreError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Category>, CoreError>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, CoreError>;
}

#[async_trait]
pub trait ContentItemStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<ContentItem>, CoreError>;
    async fn create(&self, item: NewContentItem) -> Result<ContentItem, CoreError>;

    /// Rewrites the body of a live (not soft-deleted) item.
    async fn update_body(&self, id: i64, body: &str) -> Result<(), CoreError>;

    async fn soft_delete(&self, id: i64) -> Result<(), CoreError>;

    /// Regular (non-announcement) page over a resolved scope, newest
    /// first, hidden and deleted excluded. Returns the page plus the
    /// total match count.
    async fn list_page(
        &self,
        scope: &BTreeSet<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ContentItem>, i64), CoreError>;

    async fn list_global_announcements(&self) -> Result<Vec<ContentItem>, CoreError>;

    /// Category-scoped announcements; `None` means every scoped
    /// announcement regardless of target.
    async fn list_scoped_announcements(
        &self,
        category_id: Option<i64>,
    ) -> Result<Vec<ContentItem>, CoreError>;

    async fn increment_views(&self, id: i64) -> Result<(), CoreError>;

    /// Applies both counter deltas as one unit and returns the fresh
    /// (approvals, disapprovals) pair.
    async fn adjust_reactions(
        &self,
        id: i64,
        approve_delta: i64,
        disapprove_delta: i64,
    ) -> Result<(i64, i64), CoreError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>, CoreError>;
    async fn create(&self, comment: NewComment) -> Result<Comment, CoreError>;
    async fn soft_delete(&self, id: i64) -> Result<(), CoreError>;

    /// All comments for a post, creation time ascending.
    async fn list_for_item(&self, content_item_id: i64) -> Result<Vec<Comment>, CoreError>;

    async fn adjust_reactions(
        &self,
        id: i64,
        approve_delta: i64,
        disapprove_delta: i64,
    ) -> Result<(i64, i64), CoreError>;
}

#[async_trait]
pub trait ReactionStore: Send + Sync {
    async fn get(&self, subject: SubjectRef, user_id: i64)
        -> Result<Option<ReactionKind>, CoreError>;
    async fn upsert(
        &self,
        subject: SubjectRef,
        user_id: i64,
        kind: ReactionKind,
    ) -> Result<(), CoreError>;
    async fn delete(&self, subject: SubjectRef, user_id: i64) -> Result<(), CoreError>;
}

/// Fire-and-forget; the toggle never consumes the outcome beyond
/// logging it.
#[async_trait]
pub trait NotificationHook: Send + Sync {
    async fn notify(
        &self,
        owner_id: i64,
        actor_id: i64,
        subject: SubjectRef,
    ) -> Result<(), CoreError>;
}
