use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::auth::{AuthService, AuthStore};
use crate::clients::{AuthClient, CelebrityClient, VideoRequestClient};
use crate::config::MarketConfig;
use crate::domain::{Celebrity, VideoRequest};
use crate::pages::{OrderAggregator, RequestSubmitter};

/// The running marketplace: both collections, the auth service, and the shared
/// auth store every view subscribes to.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct MarketSystem {
    pub celebrity_client: CelebrityClient,
    pub request_client: VideoRequestClient,
    pub auth_client: AuthClient,
    pub auth_store: AuthStore,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    pub fn new(config: &MarketConfig, catalog: Vec<Celebrity>) -> Self {
        info!(
            celebrities = catalog.len(),
            buffer = config.channel_buffer,
            "Starting market system"
        );

        // 1. Celebrity collection, seeded with the catalog
        let (celebrity_actor, celebrity_resource_client) =
            ResourceActor::<Celebrity>::new(config.channel_buffer, catalog);
        let celebrity_client = CelebrityClient::new(celebrity_resource_client);
        let celebrity_handle = tokio::spawn(celebrity_actor.run());

        // 2. Video request collection, starts empty
        let (request_actor, request_resource_client) =
            ResourceActor::<VideoRequest>::new(config.channel_buffer, Vec::new());
        let request_client = VideoRequestClient::new(request_resource_client);
        let request_handle = tokio::spawn(request_actor.run());

        // 3. Auth service, publishing into the shared store
        let auth_store = AuthStore::new();
        let (auth_service, auth_client) = AuthService::new(config.channel_buffer, auth_store.clone());
        let auth_handle = tokio::spawn(auth_service.run());

        Self {
            celebrity_client,
            request_client,
            auth_client,
            auth_store,
            handles: vec![celebrity_handle, request_handle, auth_handle],
        }
    }

    pub fn submitter(&self) -> RequestSubmitter {
        RequestSubmitter::new(self.request_client.clone(), self.auth_client.clone())
    }

    pub fn aggregator(&self) -> OrderAggregator {
        OrderAggregator::new(self.request_client.clone(), self.celebrity_client.clone())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!(
            auth_subscribers = self.auth_store.subscriber_count(),
            "Shutting down system..."
        );

        if let Err(e) = self.auth_client.shutdown().await {
            error!(error = %e, "Auth service did not acknowledge shutdown");
        }

        // Collections stop once every client handle is gone.
        drop(self.celebrity_client);
        drop(self.request_client);
        drop(self.auth_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
