//! Placeholder for a player whose moves arrive from a server.

use super::{Player, PlayerError};
use crate::game::{Availability, Coord};
use tracing::{instrument, warn};

/// Player backed by a remote endpoint. Not implemented yet.
pub struct RemotePlayer {
    name: String,
    endpoint: String,
}

impl RemotePlayer {
    /// Creates a remote player for the given endpoint.
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint moves would be fetched from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Player for RemotePlayer {
    #[instrument(skip(self, _availability), fields(player = %self.name, endpoint = %self.endpoint))]
    async fn produce_move(&mut self, _availability: &Availability) -> Result<Coord, PlayerError> {
        warn!("Remote play requested");
        Err(PlayerError::Unimplemented {
            feature: "remote play",
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
