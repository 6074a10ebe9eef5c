use serde::Serialize;
use std::sync::Arc;

use domain::{transition, CoreError, ReactionKind, SubjectRef, SubjectType, UserReactionState};

use crate::traits::{CommentStore, ContentItemStore, NotificationHook, ReactionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionOutcome {
    pub approvals: i64,
    pub disapprovals: i64,
    pub user_state: UserReactionState,
}

/// Per-user approve/disapprove toggle over posts and comments.
///
/// Record and counters form one logical unit: the record is written
/// first, and a failed counter write restores the previous record
/// before the error surfaces, so a retried `apply` starts from the
/// pre-toggle state.
#[derive(Clone)]
pub struct ReactionToggle {
    posts: Arc<dyn ContentItemStore>,
    comments: Arc<dyn CommentStore>,
    reactions: Arc<dyn ReactionStore>,
    notifier: Arc<dyn NotificationHook>,
}

impl ReactionToggle {
    pub fn new(
        posts: Arc<dyn ContentItemStore>,
        comments: Arc<dyn CommentStore>,
        reactions: Arc<dyn ReactionStore>,
        notifier: Arc<dyn NotificationHook>,
    ) -> Self {
        Self { posts, comments, reactions, notifier }
    }

    pub async fn apply(
        &self,
        subject: SubjectRef,
        actor: Option<i64>,
        kind: ReactionKind,
    ) -> Result<ReactionOutcome, CoreError> {
        let actor = actor.ok_or(CoreError::AuthRequired)?;
        let owner = self.subject_author(subject).await?;

        let previous = self.reactions.get(subject, actor).await?;
        let step = transition(previous.into(), kind);

        match step.new_state {
            UserReactionState::None => self.reactions.delete(subject, actor).await?,
            UserReactionState::Approve => {
                self.reactions.upsert(subject, actor, ReactionKind::Approve).await?
            }
            UserReactionState::Disapprove => {
                self.reactions.upsert(subject, actor, ReactionKind::Disapprove).await?
            }
        }

        let (approvals, disapprovals) = match self
            .adjust_counters(subject, step.approve_delta, step.disapprove_delta)
            .await
        {
            Ok(counters) => counters,
            Err(err) => {
                self.restore_record(subject, actor, previous).await;
                return Err(err);
            }
        };

        if step.new_state == UserReactionState::Approve && actor != owner {
            let notifier = Arc::clone(&self.notifier);
            tokio::spawn(async move {
                if let Err(err) = notifier.notify(owner, actor, subject).await {
                    tracing::warn!(%subject, owner, actor, "notification hook failed: {err}");
                }
            });
        }

        Ok(ReactionOutcome { approvals, disapprovals, user_state: step.new_state })
    }

    async fn subject_author(&self, subject: SubjectRef) -> Result<i64, CoreError> {
        match subject.subject_type {
            SubjectType::Post => self
                .posts
                .get_by_id(subject.subject_id)
                .await?
                .filter(|item| !item.is_deleted)
                .map(|item| item.author_id)
                .ok_or(CoreError::NotFound("content item")),
            SubjectType::Comment => self
                .comments
                .get_by_id(subject.subject_id)
                .await?
                .filter(|comment| !comment.is_deleted)
                .map(|comment| comment.author_id)
                .ok_or(CoreError::NotFound("comment")),
        }
    }

    async fn adjust_counters(
        &self,
        subject: SubjectRef,
        approve_delta: i64,
        disapprove_delta: i64,
    ) -> Result<(i64, i64), CoreError> {
        match subject.subject_type {
            SubjectType::Post => {
                self.posts
                    .adjust_reactions(subject.subject_id, approve_delta, disapprove_delta)
                    .await
            }
            SubjectType::Comment => {
                self.comments
                    .adjust_reactions(subject.subject_id, approve_delta, disapprove_delta)
                    .await
            }
        }
    }

    async fn restore_record(
        &self,
        subject: SubjectRef,
        actor: i64,
        previous: Option<ReactionKind>,
    ) {
        let restored = match previous {
            Some(kind) => self.reactions.upsert(subject, actor, kind).await,
            None => self.reactions.delete(subject, actor).await,
        };
        if let Err(err) = restored {
            tracing::error!(
                %subject,
                actor,
                "failed to restore reaction record after counter failure: {err}"
            );
        }
    }
}
