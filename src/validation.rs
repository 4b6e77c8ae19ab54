//! Field-level validation for user drafts and patches.
//!
//! Pure functions: no side effects, deterministic for a given input. The
//! result is a mapping from field to human-readable message; an empty
//! mapping means the candidate passed.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{UserDraft, UserPatch};

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex compiles"));

static WEBSITE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(ftp|http|https)://[^ "]+$"#).expect("website regex compiles"));

const NAME_MESSAGE: &str = "Name must be at least 3 characters";
const EMAIL_MESSAGE: &str = "Email is invalid";
const PHONE_MESSAGE: &str = "Phone number is invalid";
const ADDRESS_MESSAGE: &str = "Address fields are required";
const COMPANY_MESSAGE: &str = "Company name must be at least 3 characters";
const WEBSITE_MESSAGE: &str = "Website must be a valid URL";

/// A validatable field of a user record. Address is a single combined
/// field: street and city fail together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Address,
    Company,
    Website,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Company => "company",
            Field::Website => "website",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation outcome: per-field messages for every rule that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[allow(dead_code)]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validates a creation draft. Every field is checked.
pub fn validate_draft(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.name.len() < 3 {
        errors.insert(Field::Name, NAME_MESSAGE);
    }
    if !EMAIL_REGEX.is_match(&draft.email) {
        errors.insert(Field::Email, EMAIL_MESSAGE);
    }
    if draft.phone.len() < 10 {
        errors.insert(Field::Phone, PHONE_MESSAGE);
    }
    if draft.address.street.is_empty() || draft.address.city.is_empty() {
        errors.insert(Field::Address, ADDRESS_MESSAGE);
    }
    if let Some(company) = &draft.company {
        if !company.name.is_empty() && company.name.len() < 3 {
            errors.insert(Field::Company, COMPANY_MESSAGE);
        }
    }
    if let Some(website) = &draft.website {
        if !website.is_empty() && !WEBSITE_REGEX.is_match(website) {
            errors.insert(Field::Website, WEBSITE_MESSAGE);
        }
    }

    errors
}

/// Validates an edit patch. Only the fields present are checked; the edit
/// flow never touches address, company or website.
pub fn validate_patch(patch: &UserPatch) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if let Some(name) = &patch.name {
        if name.len() < 3 {
            errors.insert(Field::Name, NAME_MESSAGE);
        }
    }
    if let Some(email) = &patch.email {
        if !EMAIL_REGEX.is_match(email) {
            errors.insert(Field::Email, EMAIL_MESSAGE);
        }
    }
    if let Some(phone) = &patch.phone {
        if phone.len() < 10 {
            errors.insert(Field::Phone, PHONE_MESSAGE);
        }
    }

    errors
}
