//! In-memory stores for engine tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use domain::{
    AnnouncementScope, Category, Comment, ContentItem, CoreError, NewComment, NewContentItem,
    ReactionKind, SubjectRef, SubjectType,
};

use crate::traits::{
    CategoryStore, CommentStore, ContentItemStore, NotificationHook, ReactionStore,
};

#[derive(Default)]
pub struct MemStore {
    categories: Mutex<Vec<Category>>,
    items: Mutex<HashMap<i64, ContentItem>>,
    comments: Mutex<HashMap<i64, Comment>>,
    reactions: Mutex<HashMap<(SubjectType, i64, i64), ReactionKind>>,
    notified: Mutex<Vec<(i64, i64)>>,
    fail_counters: AtomicBool,
    fail_scoped: AtomicBool,
    fail_notify: AtomicBool,
}

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_category(&self, id: i64, slug: &str, parent_id: Option<i64>) {
        self.categories.lock().unwrap().push(Category {
            id,
            name: slug.to_string(),
            slug: slug.to_string(),
            parent_id,
            display_order: id,
        });
    }

    fn seed_item(&self, item: ContentItem) -> i64 {
        let id = item.id;
        self.items.lock().unwrap().insert(id, item);
        id
    }

    pub fn seed_post(&self, id: i64, author_id: i64) -> i64 {
        self.seed_item(blank_item(id, 1, author_id, epoch()))
    }

    pub fn seed_post_in_category(&self, id: i64, category_id: i64, created_at: NaiveDateTime) -> i64 {
        self.seed_item(blank_item(id, category_id, 1, created_at))
    }

    pub fn seed_global_announcement(&self, id: i64, must_read: bool, created_at: NaiveDateTime) -> i64 {
        let mut item = blank_item(id, 1, 1, created_at);
        item.is_announcement = true;
        item.announcement_scope = Some(AnnouncementScope::Global);
        item.must_read = must_read;
        self.seed_item(item)
    }

    pub fn seed_scoped_announcement(
        &self,
        id: i64,
        targets: Vec<i64>,
        must_read: bool,
        created_at: NaiveDateTime,
    ) -> i64 {
        let mut item = blank_item(id, 1, 1, created_at);
        item.is_announcement = true;
        item.announcement_scope = Some(AnnouncementScope::CategoryScoped);
        item.must_read = must_read;
        item.target_categories = targets;
        self.seed_item(item)
    }

    pub fn seed_comment(&self, id: i64, author_id: i64) -> i64 {
        self.comments.lock().unwrap().insert(
            id,
            Comment {
                id,
                content_item_id: 1,
                parent_id: None,
                author_id,
                body: String::new(),
                approvals: 0,
                disapprovals: 0,
                created_at: epoch(),
                is_hidden: false,
                is_deleted: false,
            },
        );
        id
    }

    pub fn fail_counters(&self, fail: bool) {
        self.fail_counters.store(fail, Ordering::SeqCst);
    }

    pub fn fail_scoped_announcements(&self, fail: bool) {
        self.fail_scoped.store(fail, Ordering::SeqCst);
    }

    pub fn fail_notifications(&self, fail: bool) {
        self.fail_notify.store(fail, Ordering::SeqCst);
    }

    pub fn notifications(&self) -> Vec<(i64, i64)> {
        self.notified.lock().unwrap().clone()
    }
}

fn blank_item(id: i64, category_id: i64, author_id: i64, created_at: NaiveDateTime) -> ContentItem {
    ContentItem {
        id,
        category_id,
        author_id,
        title: format!("item {id}"),
        body: String::new(),
        created_at,
        views: 0,
        approvals: 0,
        disapprovals: 0,
        is_announcement: false,
        announcement_scope: None,
        must_read: false,
        target_categories: Vec::new(),
        is_hidden: false,
        is_deleted: false,
    }
}

#[async_trait]
impl CategoryStore for MemStore {
    async fn list_all(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>, CoreError> {
        Ok(self.categories.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, CoreError> {
        Ok(self.categories.lock().unwrap().iter().find(|c| c.slug == slug).cloned())
    }
}

#[async_trait]
impl ContentItemStore for MemStore {
    async fn get_by_id(&self, id: i64) -> Result<Option<ContentItem>, CoreError> {
        Ok(self.items.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, item: NewContentItem) -> Result<ContentItem, CoreError> {
        let mut items = self.items.lock().unwrap();
        let id = items.keys().max().copied().unwrap_or(0) + 1;
        let mut created = blank_item(id, item.category_id, item.author_id, epoch());
        created.title = item.title;
        created.body = item.body;
        items.insert(id, created.clone());
        Ok(created)
    }

    async fn update_body(&self, id: i64, body: &str) -> Result<(), CoreError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(&id)
            .filter(|i| !i.is_deleted)
            .ok_or(CoreError::NotFound("content item"))?;
        item.body = body.to_string();
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), CoreError> {
        let mut items = self.items.lock().unwrap();
        let item = items.get_mut(&id).ok_or(CoreError::NotFound("content item"))?;
        item.is_deleted = true;
        Ok(())
    }

    async fn list_page(
        &self,
        scope: &BTreeSet<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ContentItem>, i64), CoreError> {
        let items = self.items.lock().unwrap();
        let mut matched: Vec<ContentItem> = items
            .values()
            .filter(|i| {
                scope.contains(&i.category_id)
                    && !i.is_announcement
                    && !i.is_hidden
                    && !i.is_deleted
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = matched.len() as i64;
        let page = matched
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_global_announcements(&self) -> Result<Vec<ContentItem>, CoreError> {
        let items = self.items.lock().unwrap();
        let mut matched: Vec<ContentItem> = items
            .values()
            .filter(|i| {
                i.is_announcement
                    && i.announcement_scope == Some(AnnouncementScope::Global)
                    && !i.is_hidden
                    && !i.is_deleted
            })
            .cloned()
            .collect();
        matched.sort_by_key(|i| i.id);
        Ok(matched)
    }

    async fn list_scoped_announcements(
        &self,
        category_id: Option<i64>,
    ) -> Result<Vec<ContentItem>, CoreError> {
        if self.fail_scoped.load(Ordering::SeqCst) {
            return Err(CoreError::Store("scoped axis down".into()));
        }
        let items = self.items.lock().unwrap();
        let mut matched: Vec<ContentItem> = items
            .values()
            .filter(|i| {
                i.is_announcement
                    && i.announcement_scope == Some(AnnouncementScope::CategoryScoped)
                    && !i.is_hidden
                    && !i.is_deleted
                    && category_id.map_or(true, |c| i.targets_category(c))
            })
            .cloned()
            .collect();
        matched.sort_by_key(|i| i.id);
        Ok(matched)
    }

    async fn increment_views(&self, id: i64) -> Result<(), CoreError> {
        let mut items = self.items.lock().unwrap();
        let item = items.get_mut(&id).ok_or(CoreError::NotFound("content item"))?;
        item.views += 1;
        Ok(())
    }

    async fn adjust_reactions(
        &self,
        id: i64,
        approve_delta: i64,
        disapprove_delta: i64,
    ) -> Result<(i64, i64), CoreError> {
        if self.fail_counters.load(Ordering::SeqCst) {
            return Err(CoreError::Store("counter write failed".into()));
        }
        let mut items = self.items.lock().unwrap();
        let item = items.get_mut(&id).ok_or(CoreError::NotFound("content item"))?;
        item.approvals += approve_delta;
        item.disapprovals += disapprove_delta;
        Ok((item.approvals, item.disapprovals))
    }
}

#[async_trait]
impl CommentStore for MemStore {
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>, CoreError> {
        Ok(self.comments.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, comment: NewComment) -> Result<Comment, CoreError> {
        let mut comments = self.comments.lock().unwrap();
        let id = comments.keys().max().copied().unwrap_or(0) + 1;
        let created = Comment {
            id,
            content_item_id: comment.content_item_id,
            parent_id: comment.parent_id,
            author_id: comment.author_id,
            body: comment.body,
            approvals: 0,
            disapprovals: 0,
            created_at: epoch(),
            is_hidden: false,
            is_deleted: false,
        };
        comments.insert(id, created.clone());
        Ok(created)
    }

    async fn soft_delete(&self, id: i64) -> Result<(), CoreError> {
        let mut comments = self.comments.lock().unwrap();
        let comment = comments.get_mut(&id).ok_or(CoreError::NotFound("comment"))?;
        comment.is_deleted = true;
        Ok(())
    }

    async fn list_for_item(&self, content_item_id: i64) -> Result<Vec<Comment>, CoreError> {
        let comments = self.comments.lock().unwrap();
        let mut matched: Vec<Comment> = comments
            .values()
            .filter(|c| c.content_item_id == content_item_id)
            .cloned()
            .collect();
        matched.sort_by_key(|c| (c.created_at, c.id));
        Ok(matched)
    }

    async fn adjust_reactions(
        &self,
        id: i64,
        approve_delta: i64,
        disapprove_delta: i64,
    ) -> Result<(i64, i64), CoreError> {
        if self.fail_counters.load(Ordering::SeqCst) {
            return Err(CoreError::Store("counter write failed".into()));
        }
        let mut comments = self.comments.lock().unwrap();
        let comment = comments.get_mut(&id).ok_or(CoreError::NotFound("comment"))?;
        comment.approvals += approve_delta;
        comment.disapprovals += disapprove_delta;
        Ok((comment.approvals, comment.disapprovals))
    }
}

#[async_trait]
impl ReactionStore for MemStore {
    async fn get(
        &self,
        subject: SubjectRef,
        user_id: i64,
    ) -> Result<Option<ReactionKind>, CoreError> {
        Ok(self
            .reactions
            .lock()
            .unwrap()
            .get(&(subject.subject_type, subject.subject_id, user_id))
            .copied())
    }

    async fn upsert(
        &self,
        subject: SubjectRef,
        user_id: i64,
        kind: ReactionKind,
    ) -> Result<(), CoreError> {
        self.reactions
            .lock()
            .unwrap()
            .insert((subject.subject_type, subject.subject_id, user_id), kind);
        Ok(())
    }

    async fn delete(&self, subject: SubjectRef, user_id: i64) -> Result<(), CoreError> {
        self.reactions
            .lock()
            .unwrap()
            .remove(&(subject.subject_type, subject.subject_id, user_id));
        Ok(())
    }
}

#[async_trait]
impl NotificationHook for MemStore {
    async fn notify(
        &self,
        owner_id: i64,
        actor_id: i64,
        _subject: SubjectRef,
    ) -> Result<(), CoreError> {
        if self.fail_notify.load(Ordering::SeqCst) {
            return Err(CoreError::Store("hook down".into()));
        }
        self.notified.lock().unwrap().push((owner_id, actor_id));
        Ok(())
    }
}
