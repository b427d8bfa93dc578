//! Fixtures shared by the tests of all crates.

use std::sync::LazyLock;

use folio_models::{contact::ContactSubmission, email_address::EmailAddressWithName};

pub static ANA_CRUZ: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    first_name: "Ana".into(),
    last_name: "Cruz".into(),
    email: "ana@example.com".into(),
    message: "Hello there".into(),
});

/// Fails on `firstName` (required), `email` (invalid) and `message`
/// (required). `lastName` is valid.
pub static INVALID: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    first_name: "".into(),
    last_name: "Cruz".into(),
    email: "bad".into(),
    message: "".into(),
});

pub static CONTACT_RECIPIENT: LazyLock<EmailAddressWithName> =
    LazyLock::new(|| "hello@example.com".parse().unwrap());
