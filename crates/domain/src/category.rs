use serde::Serialize;
use std::collections::HashMap;

use crate::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLevel {
    Root,
    Branch,
    Leaf,
}

/// Parent/child adjacency over the full category list. Rebuilt per
/// request; the list is small and owned by external tooling.
#[derive(Debug, Clone)]
pub struct CategoryTree {
    by_id: HashMap<i64, Category>,
    children: HashMap<i64, Vec<i64>>,
}

impl CategoryTree {
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by_key(|c| (c.display_order, c.id));
        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        for c in &categories {
            if let Some(parent_id) = c.parent_id {
                children.entry(parent_id).or_default().push(c.id);
            }
        }
        let by_id = categories.into_iter().map(|c| (c.id, c)).collect();
        Self { by_id, children }
    }

    pub fn get(&self, id: i64) -> Option<&Category> {
        self.by_id.get(&id)
    }

    pub fn children(&self, id: i64) -> &[i64] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Depth role of a category. Unknown ids yield `None`; callers
    /// degrade gracefully when a category vanished after being
    /// referenced.
    pub fn level(&self, id: i64) -> Option<CategoryLevel> {
        let category = self.by_id.get(&id)?;
        let has_children = !self.children(id).is_empty();
        Some(match (category.parent_id, has_children) {
            (None, _) => CategoryLevel::Root,
            (Some(_), true) => CategoryLevel::Branch,
            (Some(_), false) => CategoryLevel::Leaf,
        })
    }

    /// Walks parent pointers until none remain. Cycle freedom is an
    /// upstream invariant, not checked here.
    pub fn root_ancestor(&self, id: i64) -> Option<i64> {
        let mut current = self.by_id.get(&id)?;
        while let Some(parent) = current.parent_id.and_then(|p| self.by_id.get(&p)) {
            current = parent;
        }
        Some(current.id)
    }

    /// Ordered path from the root ancestor down to the category
    /// itself; empty for unknown ids.
    pub fn breadcrumb(&self, id: i64) -> Vec<Category> {
        let Some(mut current) = self.by_id.get(&id) else {
            return Vec::new();
        };
        let mut path = vec![current.clone()];
        while let Some(parent) = current.parent_id.and_then(|p| self.by_id.get(&p)) {
            path.push(parent.clone());
            current = parent;
        }
        path.reverse();
        path
    }
}
