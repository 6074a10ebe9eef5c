use chrono::NaiveDateTime;
use domain::{AnnouncementScope, Category, Comment, ContentItem, ReactionKind};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub display_order: i64,
}

impl From<SqlCategory> for Category {
    fn from(sql: SqlCategory) -> Self {
        Category {
            id: sql.id,
            name: sql.name,
            slug: sql.slug,
            parent_id: sql.parent_id,
            display_order: sql.display_order,
        }
    }
}

#[derive(FromRow)]
pub struct SqlContentItem {
    pub id: i64,
    pub category_id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub views: i64,
    pub approvals: i64,
    pub disapprovals: i64,
    pub is_announcement: bool,
    pub announcement_scope: Option<String>,
    pub must_read: bool,
    pub target_categories: Option<String>,
    pub is_hidden: bool,
    pub is_deleted: bool,
}

impl From<SqlContentItem> for ContentItem {
    fn from(sql: SqlContentItem) -> Self {
        // Malformed rows degrade to "no targets" rather than failing a
        // whole feed read.
        let target_categories = match sql.target_categories.as_deref() {
            None => Vec::new(),
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|err| {
                tracing::warn!(item = sql.id, "malformed target_categories, ignoring: {err}");
                Vec::new()
            }),
        };
        ContentItem {
            id: sql.id,
            category_id: sql.category_id,
            author_id: sql.author_id,
            title: sql.title,
            body: sql.body,
            created_at: sql.created_at,
            views: sql.views,
            approvals: sql.approvals,
            disapprovals: sql.disapprovals,
            is_announcement: sql.is_announcement,
            announcement_scope: sql.announcement_scope.as_deref().and_then(AnnouncementScope::parse),
            must_read: sql.must_read,
            target_categories,
            is_hidden: sql.is_hidden,
            is_deleted: sql.is_deleted,
        }
    }
}

#[derive(FromRow)]
pub struct SqlComment {
    pub id: i64,
    pub content_item_id: i64,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    pub body: String,
    pub approvals: i64,
    pub disapprovals: i64,
    pub created_at: NaiveDateTime,
    pub is_hidden: bool,
    pub is_deleted: bool,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id,
            content_item_id: sql.content_item_id,
            parent_id: sql.parent_id,
            author_id: sql.author_id,
            body: sql.body,
            approvals: sql.approvals,
            disapprovals: sql.disapprovals,
            created_at: sql.created_at,
            is_hidden: sql.is_hidden,
            is_deleted: sql.is_deleted,
        }
    }
}

#[derive(FromRow)]
pub struct SqlReaction {
    pub kind: String,
}

impl SqlReaction {
    pub fn kind(&self) -> Option<ReactionKind> {
        self.kind.parse().ok()
    }
}
