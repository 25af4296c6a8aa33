use tokio::task::JoinHandle;
use tracing::{error, info};

use super::{poll_loop, SyncConfig};
use crate::backend::{ApiError, BackendService, HttpApi};
use crate::clients::{BackendClient, RentalClient, StoreClient};
use crate::store::{AppState, StoreService};

/// Starts the store and backend actors plus the poller, and tears them down.
pub struct RentalSystem {
    pub client: RentalClient,
    store: StoreClient,
    poller: JoinHandle<()>,
    handles: Vec<JoinHandle<()>>,
}

impl RentalSystem {
    pub fn start(config: &SyncConfig) -> Result<Self, ApiError> {
        let api = HttpApi::new(config.api_base.clone())?;
        let (backend_service, backend_client) = BackendService::new(config.channel_buffer, api);
        let backend_handle = tokio::spawn(backend_service.run());

        let mut system = Self::with_backend(config, backend_client);
        system.handles.push(backend_handle);
        Ok(system)
    }

    /// Wires the system to an existing backend handle (a mock in tests).
    pub fn with_backend(config: &SyncConfig, backend: BackendClient) -> Self {
        let state = AppState::new(config.notification_ttl);
        let (store_service, store) = StoreService::new(config.channel_buffer, state);
        let store_handle = tokio::spawn(store_service.run());

        let client = RentalClient::new(store.clone(), backend);
        let poller = tokio::spawn(poll_loop(client.clone(), config.poll_interval));

        Self {
            client,
            store,
            poller,
            handles: vec![store_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down rental system...");

        self.poller.abort();
        let _ = self.poller.await;

        if let Err(e) = self.store.shutdown().await {
            error!(error = %e, "Store already stopped");
        }
        // Backend actor stops once the last client handle is gone.
        drop(self.client);
        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Rental system shutdown complete.");
        Ok(())
    }
}
