//! Which cache namespaces a mutation makes stale.
//!
//! Every service asks this table instead of listing patterns itself, so the
//! entity dependency graph lives in exactly one place.

/// Entities whose mutations invalidate cached views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Property,
    Booking,
    Review,
}

/// Kinds of writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    /// Booking accept/reject/cancel.
    StatusChange,
    Delete,
}

const USERS: [&str; 2] = ["users:*", "user:*"];
const PROPERTIES: [&str; 2] = ["properties:*", "property:*"];
const BOOKINGS: [&str; 2] = ["bookings:*", "booking:*"];
const REVIEWS: [&str; 2] = ["reviews:*", "review:*"];

/// Returns the namespace patterns to clear after `mutation` on `entity`.
///
/// Deletes also clear every namespace the database cascade reaches: removing
/// a property removes its bookings and reviews, removing a user removes their
/// properties, bookings and reviews.
#[must_use]
pub fn patterns_for(entity: EntityKind, mutation: Mutation) -> Vec<&'static str> {
    use EntityKind as E;
    use Mutation as M;

    let groups: &[[&str; 2]] = match (entity, mutation) {
        (E::User, M::Delete) => &[USERS, PROPERTIES, BOOKINGS, REVIEWS],
        // Owner details appear in property views
        (E::User, M::Update | M::StatusChange) => &[USERS, PROPERTIES],
        (E::User, M::Create) => &[USERS],
        (E::Property, M::Delete) => &[PROPERTIES, BOOKINGS, REVIEWS],
        (E::Property, _) => &[PROPERTIES],
        (E::Booking, _) => &[BOOKINGS],
        (E::Review, _) => &[REVIEWS],
    };

    groups.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory_cache::glob_match;

    fn clears(entity: EntityKind, mutation: Mutation, key: &str) -> bool {
        patterns_for(entity, mutation)
            .iter()
            .any(|pattern| glob_match(pattern, key))
    }

    #[test]
    fn test_property_mutation_fan_out() {
        for mutation in [Mutation::Create, Mutation::Update, Mutation::Delete] {
            assert!(clears(EntityKind::Property, mutation, "property:1"));
            assert!(clears(EntityKind::Property, mutation, "properties:all"));
            assert!(clears(EntityKind::Property, mutation, "properties:owner:7"));
            assert!(clears(EntityKind::Property, mutation, "properties:location:salta"));
            assert!(!clears(EntityKind::Property, mutation, "user:3"));
        }
        assert!(!clears(EntityKind::Property, Mutation::Update, "bookings:property:1"));
        assert!(clears(EntityKind::Property, Mutation::Delete, "bookings:property:1"));
        assert!(clears(EntityKind::Property, Mutation::Delete, "reviews:property:1"));
    }

    #[test]
    fn test_user_delete_clears_every_dependent_namespace() {
        let patterns = patterns_for(EntityKind::User, Mutation::Delete);
        for expected in [
            "users:*",
            "user:*",
            "properties:*",
            "property:*",
            "bookings:*",
            "booking:*",
            "reviews:*",
            "review:*",
        ] {
            assert!(patterns.contains(&expected), "missing {expected}");
        }
        assert!(clears(EntityKind::User, Mutation::Delete, "properties:owner:7"));
    }

    #[test]
    fn test_user_update_clears_properties_but_not_bookings() {
        assert!(clears(EntityKind::User, Mutation::Update, "user:3"));
        assert!(clears(EntityKind::User, Mutation::Update, "properties:all"));
        assert!(!clears(EntityKind::User, Mutation::Update, "bookings:all"));
        assert!(!clears(EntityKind::User, Mutation::Create, "properties:all"));
    }

    #[test]
    fn test_review_mutations_clear_per_property_views() {
        for mutation in [Mutation::Create, Mutation::Update, Mutation::Delete] {
            assert!(clears(EntityKind::Review, mutation, "reviews:property:4"));
            assert!(clears(EntityKind::Review, mutation, "reviews:tenant:5"));
            assert!(clears(EntityKind::Review, mutation, "review:9"));
            assert!(!clears(EntityKind::Review, mutation, "property:4"));
        }
    }

    #[test]
    fn test_booking_status_change_clears_bookings() {
        assert_eq!(
            patterns_for(EntityKind::Booking, Mutation::StatusChange),
            vec!["bookings:*", "booking:*"]
        );
    }
}
