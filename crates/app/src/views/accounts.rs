//! Account section.

use ofp_domain::account::{Account, NewAccount, PasswordReset, has_administrator};
use ofp_domain::error::OfpError;
use ofp_domain::id::AccountId;

use super::Outcome;
use crate::ports::ControllerApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub id: String,
    pub deletable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountsView {
    pub accounts: Vec<AccountRow>,
    /// Whether the administrator is listed. Gates account creation and the
    /// firmware, certificate and hardware sections.
    pub admin: bool,
}

impl AccountsView {
    #[must_use]
    pub fn render(accounts: &[Account]) -> Self {
        Self {
            accounts: accounts
                .iter()
                .map(|account| AccountRow {
                    id: account.id.to_string(),
                    deletable: account.is_deletable(),
                })
                .collect(),
            admin: has_administrator(accounts),
        }
    }
}

#[derive(Clone)]
pub struct AccountsController<A> {
    api: A,
}

impl<A: ControllerApi> AccountsController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    pub async fn load(&self) -> Result<AccountsView, OfpError> {
        let accounts = self.api.get_accounts().await?;
        Ok(AccountsView::render(&accounts))
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self, password))]
    pub async fn create(&self, id: &str, password: &str) -> Result<Outcome, OfpError> {
        let Ok(account) = NewAccount::new(id, password) else {
            return Ok(Outcome::Skipped);
        };
        self.api.create_account(account).await?;
        Ok(Outcome::Applied)
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Outcome, OfpError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(Outcome::Skipped);
        }
        self.api.delete_account(AccountId::new(id)).await?;
        Ok(Outcome::Applied)
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self, password))]
    pub async fn reset_password(&self, id: &str, password: &str) -> Result<Outcome, OfpError> {
        let id = id.trim();
        let Ok(reset) = PasswordReset::new(password) else {
            return Ok(Outcome::Skipped);
        };
        if id.is_empty() {
            return Ok(Outcome::Skipped);
        }
        self.api.reset_password(AccountId::new(id), reset).await?;
        Ok(Outcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ofp_domain::account::AccountType;

    use super::*;
    use crate::testing::StubController;

    #[tokio::test]
    async fn should_flag_admin_and_protect_admin_row() {
        let controller = AccountsController::new(StubController::default());
        let view = controller.load().await.unwrap();
        assert!(view.admin);
        assert_eq!(
            view.accounts,
            vec![
                AccountRow {
                    id: "admin".to_string(),
                    deletable: false,
                },
                AccountRow {
                    id: "nico".to_string(),
                    deletable: true,
                },
            ]
        );
    }

    #[test]
    fn should_hide_admin_sections_without_admin_account() {
        let accounts = vec![Account {
            id: AccountId::new("nico"),
            kind: AccountType::User,
        }];
        assert!(!AccountsView::render(&accounts).admin);
    }

    #[tokio::test]
    async fn should_skip_invalid_account_input() {
        let stub = Arc::new(StubController::default());
        let controller = AccountsController::new(Arc::clone(&stub));
        assert_eq!(controller.create("", "pw").await.unwrap(), Outcome::Skipped);
        assert_eq!(controller.create("bob", " ").await.unwrap(), Outcome::Skipped);
        assert_eq!(controller.delete("  ").await.unwrap(), Outcome::Skipped);
        assert_eq!(
            controller.reset_password("nico", "").await.unwrap(),
            Outcome::Skipped
        );
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn should_create_and_delete_account() {
        let stub = Arc::new(StubController::default());
        let controller = AccountsController::new(Arc::clone(&stub));
        assert_eq!(
            controller.create("cecile", "secret").await.unwrap(),
            Outcome::Applied
        );
        assert_eq!(stub.state().accounts.len(), 3);
        assert_eq!(controller.delete("cecile").await.unwrap(), Outcome::Applied);
        assert_eq!(stub.state().accounts.len(), 2);
    }
}
