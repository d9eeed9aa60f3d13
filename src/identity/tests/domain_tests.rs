//! Domain-focused tests for identity aggregates and scalar types.

use crate::identity::domain::{
    EmailAddress, IdentityDomainError, NewUser, PasswordHash, Role, User, UserPatch,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn draft(email: &str) -> NewUser {
    NewUser {
        email: EmailAddress::new(email).expect("valid email"),
        password: "hunter2".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        avatar_url: None,
    }
}

#[rstest]
#[case("ada@example.com")]
#[case("a@b")]
#[case("  padded@example.com  ")]
fn email_accepts_addresses_with_text_around_separator(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_str(), raw.trim());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("no-separator")]
#[case("@domain.only")]
#[case("local.only@")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    let result = EmailAddress::new(raw);
    assert!(matches!(result, Err(IdentityDomainError::InvalidEmail(_))));
}

#[rstest]
fn new_user_starts_active_with_matching_timestamps(clock: DefaultClock) {
    let user = User::new(
        &draft("ada@example.com"),
        PasswordHash::from_hash("$stored$".to_owned()),
        &clock,
    );

    assert!(user.is_active());
    assert!(!user.is_deleted());
    assert_eq!(user.created_at(), user.updated_at());
    assert!(user.last_login_at().is_none());
}

#[rstest]
fn apply_patches_only_provided_fields(clock: DefaultClock) {
    let mut user = User::new(
        &draft("ada@example.com"),
        PasswordHash::from_hash("$stored$".to_owned()),
        &clock,
    );
    let patch = UserPatch {
        first_name: Some("Augusta".to_owned()),
        is_active: Some(false),
        ..UserPatch::default()
    };

    user.apply(&patch, &clock);

    assert_eq!(user.first_name(), "Augusta");
    assert_eq!(user.last_name(), "Lovelace");
    assert!(!user.is_active());
    assert_eq!(user.email().as_str(), "ada@example.com");
}

#[rstest]
fn record_login_stamps_without_touching_updated_at(clock: DefaultClock) {
    let mut user = User::new(
        &draft("ada@example.com"),
        PasswordHash::from_hash("$stored$".to_owned()),
        &clock,
    );
    let updated_at = user.updated_at();

    user.record_login(&clock);

    assert!(user.last_login_at().is_some());
    assert_eq!(user.updated_at(), updated_at);
}

#[rstest]
fn mark_deleted_stamps_both_timestamps(clock: DefaultClock) {
    let mut user = User::new(
        &draft("ada@example.com"),
        PasswordHash::from_hash("$stored$".to_owned()),
        &clock,
    );

    user.mark_deleted(&clock);

    assert!(user.is_deleted());
    assert_eq!(user.deleted_at(), Some(user.updated_at()));
}

#[rstest]
fn role_rejects_empty_name(clock: DefaultClock) {
    let result = Role::new("   ", None, &clock);
    assert!(matches!(result, Err(IdentityDomainError::EmptyName(_))));
}
