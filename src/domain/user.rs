use serde::{Deserialize, Serialize};

/// Postal address attached to a user. Street and city are treated as a
/// single unit by validation: one without the other is incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
}

/// Employer attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
}

/// A user record as held by the service and as persisted.
///
/// The serde shape is deliberately lenient: the placeholder API returns
/// additional fields (suite, zipcode, geo, catchPhrase, ...) which are
/// ignored, and records persisted by older page loads may omit optional
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    /// Derived from `name` at creation time and never edited afterwards.
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

/// Payload for creating a new user. The service assigns `id` and derives
/// `username`, so neither appears here.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub address: Address,
    pub company: Option<Company>,
}

/// Payload for editing an existing user. Only name, email and phone are
/// editable; username, website, address and company are fixed once the
/// record exists.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UserRecord {
    /// Builds the read-only username shown in the creation form:
    /// `USER-<name with spaces replaced by hyphens>`.
    pub fn derive_username(name: &str) -> String {
        format!("USER-{}", name.replace(' ', "-"))
    }

    /// Constructs the full record from an assigned id and a validated draft.
    pub fn from_draft(id: u32, draft: UserDraft) -> Self {
        Self {
            id,
            username: Self::derive_username(&draft.name),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            website: draft.website,
            address: draft.address,
            company: draft.company,
        }
    }

    /// Applies an edit in place. Renaming does not re-derive the username.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
    }
}
