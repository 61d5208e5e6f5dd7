//! Human player that waits for an external input layer.

use super::{Player, PlayerError};
use crate::game::{Availability, Coord};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// A pending request for a human move.
///
/// The input layer must answer with a coordinate that is open in
/// [`MoveRequest::availability`].
#[derive(Debug)]
pub struct MoveRequest {
    availability: Availability,
    reply: oneshot::Sender<Coord>,
}

impl MoveRequest {
    /// Squares that were open when the move was requested.
    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Resolves the request. Returns `false` if the player stopped waiting.
    #[instrument(skip(self))]
    pub fn respond(self, coord: Coord) -> bool {
        self.reply.send(coord).is_ok()
    }
}

/// Player whose moves come from an input layer through a channel.
pub struct InteractivePlayer {
    name: String,
    requests: mpsc::Sender<MoveRequest>,
}

impl InteractivePlayer {
    /// Creates a player and the receiver the input layer should serve.
    pub fn new(name: impl Into<String>) -> (Self, mpsc::Receiver<MoveRequest>) {
        let (requests, rx) = mpsc::channel(1);
        (
            Self {
                name: name.into(),
                requests,
            },
            rx,
        )
    }
}

#[async_trait::async_trait]
impl Player for InteractivePlayer {
    #[instrument(skip(self, availability), fields(player = %self.name, open = availability.count()))]
    async fn produce_move(&mut self, availability: &Availability) -> Result<Coord, PlayerError> {
        let (reply, answer) = oneshot::channel();
        let request = MoveRequest {
            availability: availability.clone(),
            reply,
        };

        let closed = || PlayerError::InputClosed {
            player: self.name.clone(),
        };

        self.requests.send(request).await.map_err(|_| closed())?;
        debug!("Waiting for input");
        let coord = answer.await.map_err(|_| closed())?;
        debug!(%coord, "Input received");
        Ok(coord)
    }

    fn records_latency(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
