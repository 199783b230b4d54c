//! Visibility and authorization policy.
//!
//! Pure decision functions; no side effects, no I/O. All role comparisons go
//! through the ordered [`Role`] enum so read and write policy can never
//! drift apart.
//!
//! Tiers, lowest to highest: unauthenticated < student < teacher <
//! coordinator < manager. Students may create; private reads need teacher or
//! above (or authorship); writes need authorship or coordinator and above.

use uuid::Uuid;

use eduvault_shared::{Actor, Role};

use super::types::{Visibility, VisibilityScope};

/// Whether the actor may read a record with the given visibility and author.
#[must_use]
pub fn can_read(actor: Option<&Actor>, visibility: Visibility, author_id: Uuid) -> bool {
    match visibility {
        Visibility::Public => true,
        Visibility::Private => match actor {
            Some(actor) => actor.role >= Role::Teacher || actor.id == author_id,
            None => false,
        },
    }
}

/// Whether the actor may mutate or delete the record.
///
/// Allowed for the record's author and for the moderation tier and above.
#[must_use]
pub fn can_write(actor: &Actor, author_id: Uuid) -> bool {
    actor.id == author_id || actor.role >= Role::Coordinator
}

/// Listing scope implied by `can_read` for an entire result set.
#[must_use]
pub fn read_scope(actor: Option<&Actor>) -> VisibilityScope {
    match actor {
        None => VisibilityScope::PublicOnly,
        Some(actor) if actor.role >= Role::Teacher => VisibilityScope::All,
        Some(actor) => VisibilityScope::PublicOrOwn(actor.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn actor(role: Role) -> Actor {
        Actor::new(Uuid::new_v4(), role)
    }

    #[test]
    fn test_public_readable_by_anyone() {
        let author = Uuid::new_v4();
        assert!(can_read(None, Visibility::Public, author));
        for role in [Role::Student, Role::Teacher, Role::Coordinator, Role::Manager] {
            assert!(can_read(Some(&actor(role)), Visibility::Public, author));
        }
    }

    #[test]
    fn test_private_never_readable_unauthenticated() {
        assert!(!can_read(None, Visibility::Private, Uuid::new_v4()));
    }

    #[rstest]
    #[case(Role::Teacher)]
    #[case(Role::Coordinator)]
    #[case(Role::Manager)]
    fn test_private_readable_by_elevated_roles(#[case] role: Role) {
        assert!(can_read(
            Some(&actor(role)),
            Visibility::Private,
            Uuid::new_v4()
        ));
    }

    #[test]
    fn test_private_denied_to_non_author_student() {
        assert!(!can_read(
            Some(&actor(Role::Student)),
            Visibility::Private,
            Uuid::new_v4()
        ));
    }

    #[test]
    fn test_private_readable_by_student_author() {
        let student = actor(Role::Student);
        assert!(can_read(Some(&student), Visibility::Private, student.id));
    }

    #[test]
    fn test_write_allowed_for_author() {
        let student = actor(Role::Student);
        assert!(can_write(&student, student.id));
    }

    #[rstest]
    #[case(Role::Student, false)]
    #[case(Role::Teacher, false)]
    #[case(Role::Coordinator, true)]
    #[case(Role::Manager, true)]
    fn test_write_for_non_author(#[case] role: Role, #[case] allowed: bool) {
        assert_eq!(can_write(&actor(role), Uuid::new_v4()), allowed);
    }

    #[test]
    fn test_read_scope_tiers() {
        assert_eq!(read_scope(None), VisibilityScope::PublicOnly);

        let student = actor(Role::Student);
        assert_eq!(
            read_scope(Some(&student)),
            VisibilityScope::PublicOrOwn(student.id)
        );

        assert_eq!(read_scope(Some(&actor(Role::Teacher))), VisibilityScope::All);
        assert_eq!(read_scope(Some(&actor(Role::Manager))), VisibilityScope::All);
    }
}
