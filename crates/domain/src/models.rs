use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A node in the topic hierarchy. The parent-pointer graph is acyclic
/// and at most three levels deep; both are upstream invariants
/// maintained by the administration tooling that owns this table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementScope {
    Global,
    CategoryScoped,
}

impl AnnouncementScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementScope::Global => "global",
            AnnouncementScope::CategoryScoped => "category",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "global" => Some(AnnouncementScope::Global),
            "category" => Some(AnnouncementScope::CategoryScoped),
            _ => None,
        }
    }
}

/// A post. Counters are mutated only through the reaction toggle and
/// the view-increment primitive; flags belong to moderation tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
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
    pub announcement_scope: Option<AnnouncementScope>,
    pub must_read: bool,
    /// Explicit target list carried by category-scoped announcements.
    pub target_categories: Vec<i64>,
    pub is_hidden: bool,
    pub is_deleted: bool,
}

impl ContentItem {
    pub fn targets_category(&self, category_id: i64) -> bool {
        self.target_categories.contains(&category_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub category_id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
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

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content_item_id: i64,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Post,
    Comment,
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Post => "post",
            SubjectType::Comment => "comment",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the thing a reaction applies to, post or comment alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    pub subject_type: SubjectType,
    pub subject_id: i64,
}

impl SubjectRef {
    pub fn post(id: i64) -> Self {
        Self { subject_type: SubjectType::Post, subject_id: id }
    }

    pub fn comment(id: i64) -> Self {
        Self { subject_type: SubjectType::Comment, subject_id: id }
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject_type, self.subject_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Approve,
    Disapprove,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Approve => "approve",
            ReactionKind::Disapprove => "disapprove",
        }
    }
}

impl FromStr for ReactionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ReactionKind::Approve),
            "disapprove" => Ok(ReactionKind::Disapprove),
            other => Err(CoreError::InvalidTransition(other.to_string())),
        }
    }
}

/// A user's standing toward a subject. A single three-valued enum on
/// purpose: two independent booleans would admit an impossible
/// "both approved and disapproved" state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserReactionState {
    #[default]
    None,
    Approve,
    Disapprove,
}

impl From<ReactionKind> for UserReactionState {
    fn from(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Approve => UserReactionState::Approve,
            ReactionKind::Disapprove => UserReactionState::Disapprove,
        }
    }
}

impl From<Option<ReactionKind>> for UserReactionState {
    fn from(kind: Option<ReactionKind>) -> Self {
        kind.map(Into::into).unwrap_or(UserReactionState::None)
    }
}

/// At most one active record per (subject, user); storage enforces
/// this with a composite primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub subject: SubjectRef,
    pub user_id: i64,
    pub kind: ReactionKind,
}
