use std::sync::LazyLock;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use portal_models::{
    auth::AccessToken,
    user::{Identity, UserName, UserRole},
};
use uuid::uuid;

pub static ALL_IDENTITIES: LazyLock<Vec<&Identity>> =
    LazyLock::new(|| vec![&CANDIDATE, &COMPANY, &ADMIN]);

pub static CANDIDATE: LazyLock<Identity> = LazyLock::new(|| Identity {
    id: uuid!("9e3f1ae6-58a0-4ef5-95d7-0fc9cd61d2a4").into(),
    name: UserName::try_new("joana").unwrap(),
    email: "joana@example.com".parse().unwrap(),
    role: UserRole::Candidate,
});

pub static COMPANY: LazyLock<Identity> = LazyLock::new(|| Identity {
    id: uuid!("5b6ad5f0-2c61-4c2b-a0bf-0f7c6b6d7a11").into(),
    name: UserName::try_new("acme-rh").unwrap(),
    email: "rh@acme.example.com".parse().unwrap(),
    role: UserRole::Company,
});

pub static ADMIN: LazyLock<Identity> = LazyLock::new(|| Identity {
    id: uuid!("1d3c2f86-9274-4ccd-8e8b-7a4a8d0b33c5").into(),
    name: UserName::try_new("admin").unwrap(),
    email: "admin@example.com".parse().unwrap(),
    role: UserRole::Admin,
});

pub static ACCESS_TOKEN: LazyLock<AccessToken> =
    LazyLock::new(|| AccessToken::from("demo-access-token".to_owned()));

/// The pinned "current time" shared by deterministic expiry tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// An expiry one hour past [`now`].
pub fn future_expiry() -> DateTime<Utc> {
    now() + TimeDelta::hours(1)
}
