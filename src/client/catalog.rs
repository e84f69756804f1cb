use std::sync::Arc;

use crate::client::error::ClientError;
use crate::client::remote::RemoteApi;
use crate::client::validation::{validate_draft, validate_patch, CajaDraft};
use crate::client::Reconcile;
use crate::database::models::{Caja, CajaFields};

/// Locally cached catalog collection.
///
/// Every mutation goes through the remote API first; the cache only changes
/// once the remote call succeeded.
pub struct CatalogCache {
    api: Arc<dyn RemoteApi>,
    policy: Reconcile,
    cajas: Vec<Caja>,
    error: Option<String>,
    loaded: bool,
}

impl CatalogCache {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self::with_policy(api, Reconcile::default())
    }

    pub fn with_policy(api: Arc<dyn RemoteApi>, policy: Reconcile) -> Self {
        Self {
            api,
            policy,
            cajas: Vec::new(),
            error: None,
            loaded: false,
        }
    }

    /// Construct and fetch in one step.
    pub async fn mount(api: Arc<dyn RemoteApi>, policy: Reconcile) -> Self {
        let mut cache = Self::with_policy(api, policy);
        cache.load().await;
        cache
    }

    pub fn cajas(&self) -> &[Caja] {
        &self.cajas
    }

    pub fn get(&self, id: &str) -> Option<&Caja> {
        self.cajas.iter().find(|c| c.id == id)
    }

    /// Message of the last failed load, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch the collection. A failure empties the cache and records the
    /// error instead of returning it.
    pub async fn load(&mut self) {
        self.error = None;
        match self.api.list_cajas().await {
            Ok(cajas) => self.cajas = cajas,
            Err(e) => {
                tracing::warn!("Failed to load cajas: {}", e);
                self.cajas.clear();
                self.error = Some(e.to_string());
            }
        }
        self.loaded = true;
    }

    pub async fn refetch(&mut self) {
        self.load().await;
    }

    pub async fn create(&mut self, draft: &CajaDraft) -> Result<Caja, ClientError> {
        let fields = validate_draft(draft)?;
        let created = self.api.create_caja(&fields).await?;
        tracing::info!("Created caja {}", created.id);

        match self.policy {
            Reconcile::Local => self.cajas.push(created.clone()),
            Reconcile::Refetch => self.load().await,
        }
        Ok(created)
    }

    /// Send a patch and fold the server's answer into the cached entry.
    ///
    /// The answer is merged rather than substituted, so a server that echoes
    /// only the changed fields still leaves a complete entry behind.
    pub async fn update(&mut self, id: &str, patch: &CajaFields) -> Result<Caja, ClientError> {
        let fields = validate_patch(patch)?;
        let echoed = self.api.update_caja(id, &fields).await?;
        tracing::info!("Updated caja {}", id);

        match self.policy {
            Reconcile::Local => {
                if let Some(slot) = self.cajas.iter_mut().find(|c| c.id == id) {
                    slot.merge(echoed);
                    return Ok(slot.clone());
                }
                Ok(Caja::from_fields(id.to_string(), echoed))
            }
            Reconcile::Refetch => {
                self.load().await;
                Ok(self
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| Caja::from_fields(id.to_string(), echoed)))
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        self.api.delete_caja(id).await?;
        tracing::info!("Deleted caja {}", id);

        match self.policy {
            Reconcile::Local => self.cajas.retain(|c| c.id != id),
            Reconcile::Refetch => self.load().await,
        }
        Ok(())
    }
}
