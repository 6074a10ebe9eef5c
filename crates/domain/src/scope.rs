use std::collections::BTreeSet;

use crate::category::{CategoryLevel, CategoryTree};

/// Override id meaning "only the category currently in view", an
/// explicit narrowing request. No real category carries id 0.
pub const SCOPE_ALL: i64 = 0;

/// Computes the set of category ids whose content contributes to a
/// given view. Depth is derived from the viewed category's level and
/// collected by bounded descent; the tree is contractually at most
/// three levels deep.
pub struct ScopeResolver<'a> {
    tree: &'a CategoryTree,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(tree: &'a CategoryTree) -> Self {
        Self { tree }
    }

    pub fn resolve(&self, category_id: i64, override_id: Option<i64>) -> BTreeSet<i64> {
        match override_id {
            Some(SCOPE_ALL) => return BTreeSet::from([category_id]),
            Some(other) if other != category_id && self.tree.get(other).is_some() => {
                // "Viewed from elsewhere": re-resolve from the
                // override category with its own level.
                return self.resolve(other, None);
            }
            _ => {}
        }

        let depth = match self.tree.level(category_id) {
            Some(CategoryLevel::Root) => 2,
            Some(CategoryLevel::Branch) => 1,
            Some(CategoryLevel::Leaf) => 0,
            // Deleted-after-referenced: degrade to the id alone.
            None => return BTreeSet::from([category_id]),
        };

        let mut scope = BTreeSet::new();
        self.collect(category_id, depth, &mut scope);
        scope
    }

    fn collect(&self, id: i64, depth: u32, scope: &mut BTreeSet<i64>) {
        scope.insert(id);
        if depth == 0 {
            return;
        }
        for &child in self.tree.children(id) {
            self.collect(child, depth - 1, scope);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn category(id: i64, parent_id: Option<i64>) -> Category {
        Category {
            id,
            name: format!("c{id}"),
            slug: format!("c{id}"),
            parent_id,
            display_order: id,
        }
    }

    // 1 (root) -> 2 (branch) -> 3 (leaf), plus leaf 4 under the root.
    fn tree() -> CategoryTree {
        CategoryTree::new(vec![
            category(1, None),
            category(2, Some(1)),
            category(3, Some(2)),
            category(4, Some(1)),
        ])
    }

    #[test]
    fn scope_is_monotone_in_level() {
        let tree = tree();
        let resolver = ScopeResolver::new(&tree);
        assert_eq!(resolver.resolve(1, None), BTreeSet::from([1, 2, 3, 4]));
        assert_eq!(resolver.resolve(2, None), BTreeSet::from([2, 3]));
        assert_eq!(resolver.resolve(3, None), BTreeSet::from([3]));
    }

    #[test]
    fn sentinel_narrows_to_self() {
        let tree = tree();
        let resolver = ScopeResolver::new(&tree);
        assert_eq!(resolver.resolve(1, Some(SCOPE_ALL)), BTreeSet::from([1]));
        assert_eq!(resolver.resolve(3, Some(SCOPE_ALL)), BTreeSet::from([3]));
    }

    #[test]
    fn override_resolves_from_other_category() {
        let tree = tree();
        let resolver = ScopeResolver::new(&tree);
        // Viewing category 3 through branch 2 yields 2's scope.
        assert_eq!(resolver.resolve(3, Some(2)), BTreeSet::from([2, 3]));
    }

    #[test]
    fn unknown_override_falls_through() {
        let tree = tree();
        let resolver = ScopeResolver::new(&tree);
        assert_eq!(resolver.resolve(2, Some(99)), BTreeSet::from([2, 3]));
    }

    #[test]
    fn unknown_category_degrades_to_self() {
        let tree = tree();
        let resolver = ScopeResolver::new(&tree);
        assert_eq!(resolver.resolve(42, None), BTreeSet::from([42]));
    }
}
