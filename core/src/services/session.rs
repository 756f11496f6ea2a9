use crate::models::CurrentUser;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Authenticated-user state shared across views. Explicitly constructed and
/// handed to whoever needs it, so tests can run independent instances;
/// lifecycle is create → read/write → reset.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<CurrentUser>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_user(&self, user: CurrentUser) {
        *self.inner.write().await = Some(user);
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.inner.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }

    pub async fn is_admin(&self) -> bool {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|u| u.is_admin())
            .unwrap_or(false)
    }

    pub async fn reset(&self) {
        *self.inner.write().await = None;
    }
}
