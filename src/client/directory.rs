use std::sync::Arc;

use crate::client::error::ClientError;
use crate::client::remote::RemoteApi;
use crate::client::Reconcile;
use crate::database::models::{estimated_value, DirectoryStats, Usuario};

/// Locally cached admin listing with its aggregates.
pub struct DirectoryCache {
    api: Arc<dyn RemoteApi>,
    policy: Reconcile,
    unit_value: u64,
    data: Option<DirectoryStats>,
    error: Option<String>,
}

impl DirectoryCache {
    pub fn new(api: Arc<dyn RemoteApi>, unit_value: u64) -> Self {
        Self::with_policy(api, unit_value, Reconcile::default())
    }

    pub fn with_policy(api: Arc<dyn RemoteApi>, unit_value: u64, policy: Reconcile) -> Self {
        Self {
            api,
            policy,
            unit_value,
            data: None,
            error: None,
        }
    }

    pub async fn mount(api: Arc<dyn RemoteApi>, unit_value: u64, policy: Reconcile) -> Self {
        let mut cache = Self::with_policy(api, unit_value, policy);
        cache.load().await;
        cache
    }

    pub fn stats(&self) -> Option<&DirectoryStats> {
        self.data.as_ref()
    }

    pub fn usuarios(&self) -> &[Usuario] {
        self.data.as_ref().map(|d| d.usuarios.as_slice()).unwrap_or(&[])
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the listing; missing aggregates are computed with the
    /// configured unit value.
    pub async fn load(&mut self) {
        self.error = None;
        if let Err(e) = self.fetch().await {
            tracing::warn!("Failed to load usuarios: {}", e);
            self.data = None;
            self.error = Some(e.to_string());
        }
    }

    async fn fetch(&mut self) -> Result<(), ClientError> {
        let payload = self.api.list_usuarios().await?;
        self.data = Some(payload.into_stats(self.unit_value));
        Ok(())
    }

    pub async fn refetch(&mut self) {
        self.load().await;
    }

    /// Delete a user. Users with an active subscription are refused before
    /// the delete is sent; an unloaded cache fetches the listing first.
    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        if self.data.is_none() {
            self.fetch().await?;
        }
        if let Some(user) = self.usuarios().iter().find(|u| u.id == id) {
            if user.suscripcion_activa {
                tracing::warn!("Refusing to delete {}: active subscription", user.id);
                return Err(ClientError::ActiveSubscription(user.nombre.clone()));
            }
        }

        self.api.delete_usuario(id).await?;
        tracing::info!("Deleted usuario {}", id);

        match self.policy {
            Reconcile::Local => self.remove_local(id),
            Reconcile::Refetch => self.load().await,
        }
        Ok(())
    }

    fn remove_local(&mut self, id: &str) {
        let unit_value = self.unit_value;
        let Some(data) = self.data.as_mut() else {
            return;
        };
        let Some(index) = data.usuarios.iter().position(|u| u.id == id) else {
            return;
        };

        let removed = data.usuarios.remove(index);
        data.total_users = data.total_users.saturating_sub(1);
        if removed.suscripcion_activa {
            data.total_subscriptions = data.total_subscriptions.saturating_sub(1);
        }
        data.total_value = estimated_value(data.total_subscriptions, unit_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeApi;

    #[tokio::test]
    async fn load_computes_missing_aggregates() {
        let api = Arc::new(FakeApi::seeded());
        let cache = DirectoryCache::mount(api, 45, Reconcile::Local).await;

        let stats = cache.stats().unwrap();
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.total_subscriptions, 3);
        assert_eq!(stats.total_value, 135);
    }

    #[tokio::test]
    async fn active_subscriber_is_refused_without_request() {
        let api = Arc::new(FakeApi::seeded());
        let mut cache = DirectoryCache::mount(api.clone(), 45, Reconcile::Local).await;

        let err = cache.delete("user1").await.unwrap_err();
        assert!(matches!(err, ClientError::ActiveSubscription(_)));
        assert_eq!(api.calls(), vec!["list_usuarios"]);
        assert_eq!(cache.usuarios().len(), 5);
    }

    #[tokio::test]
    async fn unloaded_cache_still_refuses_active_subscriber() {
        let api = Arc::new(FakeApi::seeded());
        let mut cache = DirectoryCache::new(api.clone(), 45);

        let err = cache.delete("user1").await.unwrap_err();
        assert!(matches!(err, ClientError::ActiveSubscription(_)));
        assert_eq!(api.calls(), vec!["list_usuarios"]);
        assert_eq!(api.usuarios.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn delete_adjusts_counts_locally() {
        let api = Arc::new(FakeApi::seeded());
        let mut cache = DirectoryCache::mount(api.clone(), 45, Reconcile::Local).await;

        cache.delete("user3").await.unwrap();
        let stats = cache.stats().unwrap();
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.total_subscriptions, 3);
        assert_eq!(stats.total_value, 135);
        assert!(cache.usuarios().iter().all(|u| u.id != "user3"));
        assert_eq!(api.calls(), vec!["list_usuarios", "delete_usuario user3"]);
    }

    #[tokio::test]
    async fn failed_load_clears_data() {
        let api = Arc::new(FakeApi::seeded());
        api.set_failing(true);
        let cache = DirectoryCache::mount(api, 45, Reconcile::Local).await;
        assert!(cache.stats().is_none());
        assert_eq!(cache.error(), Some("Remote failure"));
    }

    #[tokio::test]
    async fn refetch_policy_reloads_after_delete() {
        let api = Arc::new(FakeApi::seeded());
        let mut cache = DirectoryCache::mount(api.clone(), 45, Reconcile::Refetch).await;

        cache.delete("user5").await.unwrap();
        assert_eq!(cache.stats().unwrap().total_users, 4);
        assert_eq!(
            api.calls(),
            vec!["list_usuarios", "delete_usuario user5", "list_usuarios"]
        );
    }
}
