//! Read-only view of authentication state.

use crate::error::DataSourceResult;
use async_trait::async_trait;
use quire_model::User;
use std::sync::{PoisonError, RwLock};
use tracing::info;

/// Authentication state as consumed by navigation and permission checks.
#[async_trait]
pub trait AuthController: Send + Sync {
    fn user(&self) -> Option<User>;

    /// True until the provider has reported its first state.
    fn initial_loading(&self) -> bool {
        false
    }

    /// True while a sign-in or sign-out is in flight.
    fn auth_loading(&self) -> bool {
        false
    }

    fn auth_error(&self) -> Option<String> {
        None
    }

    async fn sign_out(&self) -> DataSourceResult<()>;
}

/// Auth controller whose user is set directly.
#[derive(Debug, Default)]
pub struct StaticAuthController {
    user: RwLock<Option<User>>,
}

impl StaticAuthController {
    pub fn new(user: Option<User>) -> Self {
        Self { user: RwLock::new(user) }
    }

    pub fn sign_in(&self, user: User) {
        info!("Signed in as {}", user.uid);
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }
}

#[async_trait]
impl AuthController for StaticAuthController {
    fn user(&self) -> Option<User> {
        self.user.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    async fn sign_out(&self) -> DataSourceResult<()> {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
