use redis::AsyncCommands;
use tracing::{info, warn};

use crate::application::services::view_invalidator::ViewInvalidator;

pub const VIEW_INVALIDATION_CHANNEL: &str = "view_invalidation";

/// Publishes invalidated paths on a Redis channel for the rendering tier.
pub struct RedisViewInvalidator {
    client: redis::aio::ConnectionManager,
    channel: String,
}

impl RedisViewInvalidator {
    pub fn new(client: redis::aio::ConnectionManager) -> Self {
        Self {
            client,
            channel: VIEW_INVALIDATION_CHANNEL.to_string(),
        }
    }
}

impl ViewInvalidator for RedisViewInvalidator {
    fn invalidate(&self, path: &str) {
        let mut conn = self.client.clone();
        let channel = self.channel.clone();
        let path = path.to_string();

        tokio::spawn(async move {
            match conn.publish::<_, _, ()>(&channel, &path).await {
                Ok(()) => info!("Published invalidation for '{}' on '{}'", path, channel),
                Err(e) => warn!("Failed to publish invalidation for '{}': {}", path, e),
            }
        });
    }
}

/// Used when no Redis is configured: the invalidation is only logged.
#[derive(Default)]
pub struct TracingViewInvalidator;

impl ViewInvalidator for TracingViewInvalidator {
    fn invalidate(&self, path: &str) {
        info!("View invalidated: {}", path);
    }
}
