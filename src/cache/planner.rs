//! Invalidation plan generation.
//!
//! Maps one mutation to the cache entries it affects:
//!
//! | mutation | lists of resource | detail of id | other resources          |
//! |----------|-------------------|--------------|--------------------------|
//! | create   | stale             | -            | related lists stale      |
//! | update   | stale             | stale        | related entries stale    |
//! | delete   | stale             | removed      | related entries stale    |
//!
//! Posts embed category and tag snapshots, and categories and tags carry a
//! server-derived post count, so writes on one family also stale the others.

use std::collections::HashSet;
use std::fmt;

use super::events::MutationKind;
use super::keys::{CacheKey, ResourceKind};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct InvalidationPlan {
    /// Resources whose every list entry becomes stale.
    pub stale_lists: HashSet<ResourceKind>,
    /// Resources whose every detail entry becomes stale.
    pub stale_details: HashSet<ResourceKind>,
    /// Individual detail entries to mark stale.
    pub stale_keys: HashSet<CacheKey>,
    /// Detail entries to drop outright.
    pub remove_keys: HashSet<CacheKey>,
}

impl fmt::Display for InvalidationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InvalidationPlan {{ stale_lists: {}, stale_details: {}, stale_keys: {}, remove: {} }}",
            self.stale_lists.len(),
            self.stale_details.len(),
            self.stale_keys.len(),
            self.remove_keys.len(),
        )
    }
}

impl InvalidationPlan {
    pub fn for_mutation(kind: &MutationKind) -> Self {
        let mut plan = Self::default();
        let resource = kind.resource();
        plan.stale_lists.insert(resource);

        match kind {
            MutationKind::Created { .. } => {}
            MutationKind::Updated { id, .. } => {
                plan.stale_keys.insert(CacheKey::detail(resource, id));
            }
            MutationKind::Deleted { id, .. } => {
                plan.remove_keys.insert(CacheKey::detail(resource, id));
            }
        }

        match (resource, kind) {
            // Post counts shown on category and tag lists shift with any post write.
            (ResourceKind::Posts, _) => {
                plan.stale_lists.insert(ResourceKind::Categories);
                plan.stale_lists.insert(ResourceKind::Tags);
            }
            // A fresh category or tag is not referenced by any post yet.
            (ResourceKind::Categories | ResourceKind::Tags, MutationKind::Created { .. }) => {}
            // Renames and deletions change the snapshots embedded in posts.
            (ResourceKind::Categories | ResourceKind::Tags, _) => {
                plan.stale_lists.insert(ResourceKind::Posts);
                plan.stale_details.insert(ResourceKind::Posts);
            }
        }

        plan
    }

    pub fn is_empty(&self) -> bool {
        self.stale_lists.is_empty()
            && self.stale_details.is_empty()
            && self.stale_keys.is_empty()
            && self.remove_keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_stales_lists_only() {
        let plan = InvalidationPlan::for_mutation(&MutationKind::created(ResourceKind::Tags, 9));
        assert!(plan.stale_lists.contains(&ResourceKind::Tags));
        assert!(!plan.stale_lists.contains(&ResourceKind::Posts));
        assert!(plan.stale_keys.is_empty());
        assert!(plan.remove_keys.is_empty());
    }

    #[test]
    fn update_stales_detail() {
        let plan =
            InvalidationPlan::for_mutation(&MutationKind::updated(ResourceKind::Posts, "p1"));
        assert!(plan.stale_lists.contains(&ResourceKind::Posts));
        assert!(
            plan.stale_keys
                .contains(&CacheKey::detail(ResourceKind::Posts, "p1"))
        );
        assert!(plan.remove_keys.is_empty());
    }

    #[test]
    fn delete_removes_detail() {
        let plan =
            InvalidationPlan::for_mutation(&MutationKind::deleted(ResourceKind::Posts, "p1"));
        assert!(
            plan.remove_keys
                .contains(&CacheKey::detail(ResourceKind::Posts, "p1"))
        );
        assert!(plan.stale_keys.is_empty());
    }

    #[test]
    fn post_writes_stale_counts_on_categories_and_tags() {
        let plan =
            InvalidationPlan::for_mutation(&MutationKind::created(ResourceKind::Posts, "p2"));
        assert!(plan.stale_lists.contains(&ResourceKind::Categories));
        assert!(plan.stale_lists.contains(&ResourceKind::Tags));
    }

    #[test]
    fn category_rename_stales_embedded_post_snapshots() {
        let plan =
            InvalidationPlan::for_mutation(&MutationKind::updated(ResourceKind::Categories, 3));
        assert!(plan.stale_lists.contains(&ResourceKind::Posts));
        assert!(plan.stale_details.contains(&ResourceKind::Posts));
        assert!(!plan.is_empty());
    }
}
