//! Field validation rules applied before anything is persisted.
//!
//! Each rule is a pure function returning [`Invalid`]; callers collect
//! failures per field into [`FieldErrors`] so one response reports every
//! bad field at once.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::user::UserRole;

pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const NAME_MAX_LEN: usize = 64;
pub const SLUG_MAX_LEN: usize = 50;
pub const BIO_MAX_LEN: usize = 500;
pub const PERSON_NAME_MAX_LEN: usize = 150;
pub const SCORE_MIN: i64 = 1;
pub const SCORE_MAX: i64 = 10;

/// Username reserved for the self-profile route (`/users/me/`).
pub const RESERVED_USERNAME: &str = "me";

/// Why a single field value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Invalid {
    #[error("this field may not be blank")]
    Blank,
    #[error("ensure this field has no more than {0} characters")]
    TooLong(usize),
    #[error("username may contain only letters, digits and @/./+/-/_ characters")]
    UsernameCharacters,
    #[error("the username \"me\" is reserved")]
    ReservedUsername,
    #[error("enter a valid email address")]
    Email,
    #[error("slug may contain only latin letters, digits, hyphens and underscores")]
    Slug,
    #[error("year cannot be later than {0}")]
    YearInFuture(i32),
    #[error("score must be between 1 and 10")]
    ScoreOutOfRange,
    #[error("object with slug \"{0}\" does not exist")]
    UnknownSlug(String),
    #[error("\"{0}\" is not a valid role")]
    UnknownRole(String),
}

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set holding a single failure.
    pub fn single(field: &str, invalid: Invalid) -> Self {
        let mut errors = Self::new();
        errors.add(field, invalid);
        errors
    }

    pub fn add(&mut self, field: &str, invalid: Invalid) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(invalid.to_string());
    }

    /// Record `result` under `field` if it is an error.
    pub fn check(&mut self, field: &str, result: Result<(), Invalid>) {
        if let Err(invalid) = result {
            self.add(field, invalid);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn not_blank(value: &str) -> Result<(), Invalid> {
    if value.trim().is_empty() {
        return Err(Invalid::Blank);
    }
    Ok(())
}

pub fn max_len(value: &str, max: usize) -> Result<(), Invalid> {
    if char_len(value) > max {
        return Err(Invalid::TooLong(max));
    }
    Ok(())
}

/// `[\w.@+-]+`, at most 150 characters, and never `"me"`.
pub fn username(value: &str) -> Result<(), Invalid> {
    not_blank(value)?;
    max_len(value, USERNAME_MAX_LEN)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-');
    if !value.chars().all(allowed) {
        return Err(Invalid::UsernameCharacters);
    }
    if value == RESERVED_USERNAME {
        return Err(Invalid::ReservedUsername);
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), Invalid> {
    not_blank(value)?;
    max_len(value, EMAIL_MAX_LEN)?;
    let Some((local, domain)) = value.rsplit_once('@') else {
        return Err(Invalid::Email);
    };
    let domain_ok = domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
        && domain.contains('.');
    if local.is_empty() || !domain_ok || value.chars().any(char::is_whitespace) {
        return Err(Invalid::Email);
    }
    Ok(())
}

/// `[-a-zA-Z0-9_]+`, at most 50 characters.
pub fn slug(value: &str) -> Result<(), Invalid> {
    not_blank(value)?;
    max_len(value, SLUG_MAX_LEN)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Invalid::Slug);
    }
    Ok(())
}

/// Display name of a category, genre or title.
pub fn name(value: &str) -> Result<(), Invalid> {
    not_blank(value)?;
    max_len(value, NAME_MAX_LEN)
}

/// Body of a review or comment.
pub fn text(value: &str) -> Result<(), Invalid> {
    not_blank(value)
}

pub fn year(value: i32, current_year: i32) -> Result<(), Invalid> {
    if value > current_year {
        return Err(Invalid::YearInFuture(current_year));
    }
    Ok(())
}

/// Inclusive 1..=10. Takes `i64` so out-of-range input from the wire is
/// rejected here rather than wrapped on conversion.
pub fn score(value: i64) -> Result<(), Invalid> {
    if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(Invalid::ScoreOutOfRange);
    }
    Ok(())
}

/// Parse a role name (`user`, `moderator`, `admin`).
pub fn role(value: &str) -> Result<UserRole, Invalid> {
    value
        .parse()
        .map_err(|_| Invalid::UnknownRole(value.to_owned()))
}
