//! User accounts of the controller.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::AccountId;
use crate::limits::MAX_ACCOUNT_ID_LEN;

/// Identifier of the built-in administrator account.
pub const ADMIN_ID: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(rename = "type")]
    pub kind: AccountType,
}

impl Account {
    /// Whether this is the built-in administrator, which gates the
    /// firmware, certificate and hardware sections.
    ///
    /// The controller only lists every account, `admin` included, to the
    /// administrator session, so the id is what identifies that session.
    /// The account type plays no part here.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.id == *ADMIN_ID
    }

    /// Admin-typed accounts cannot be deleted, whatever their id. The
    /// controller refuses the request, so the delete action is not offered.
    #[must_use]
    pub fn is_deletable(&self) -> bool {
        self.kind != AccountType::Admin
    }
}

/// Whether an account list contains the administrator.
#[must_use]
pub fn has_administrator(accounts: &[Account]) -> bool {
    accounts.iter().any(Account::is_administrator)
}

/// Credentials of an account to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub id: AccountId,
    pub password: String,
}

impl NewAccount {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the id is empty, not alphanumeric
    /// or too long, or when the password is empty.
    pub fn new(id: &str, password: &str) -> Result<Self, ValidationError> {
        let account = Self {
            id: AccountId::new(id.trim()),
            password: password.to_string(),
        };
        account.validate()?;
        Ok(account)
    }

    /// # Errors
    ///
    /// Same rules as [`NewAccount::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_account_id(self.id.as_str())?;
        if self.password.trim().is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(())
    }
}

/// Account identifiers are short alphanumeric words.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] for an empty id and
/// [`ValidationError::InvalidAccountId`] otherwise.
pub fn validate_account_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if id.len() > MAX_ACCOUNT_ID_LEN || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidAccountId(id.to_string()));
    }
    Ok(())
}

/// New password of an existing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub password: String,
}

impl PasswordReset {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPassword`] for a blank password.
    pub fn new(password: &str) -> Result<Self, ValidationError> {
        if password.trim().is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(Self {
            password: password.to_string(),
        })
    }
}
