//! The seam between sessions and the voice transport.
//!
//! In production the external voice SDK owns audio capture, speech
//! recognition, and playback; what reaches this crate is one
//! [`UtteranceEvent`] per recognised unit of caller speech. The
//! [`UtteranceBus`] decouples whatever produces utterances (an SDK
//! callback, a console reader, a test) from the session loop consuming
//! them.

use tokio::sync::broadcast;

use crate::error::DialogError;

/// Default capacity for the per-call utterance channel.
const DEFAULT_UTTERANCE_CAPACITY: usize = 64;

/// One unit of recognised caller speech delivered to the conversation.
#[derive(Debug, Clone)]
pub struct UtteranceEvent {
    /// Identity of the speaker as reported by the transport.
    pub speaker: String,
    /// The recognised text.
    pub text: String,
}

/// Broadcast fan-out of utterances for one call.
#[derive(Debug, Clone)]
pub struct UtteranceBus {
    tx: broadcast::Sender<UtteranceEvent>,
}

impl Default for UtteranceBus {
    fn default() -> Self {
        Self::new()
    }
}

impl UtteranceBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(DEFAULT_UTTERANCE_CAPACITY);
        Self { tx }
    }

    /// Publishes a recognised utterance.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::TransportClosed`] when no subscriber is
    /// listening — the call ended underneath the producer.
    pub fn publish(&self, speaker: &str, text: &str) -> Result<(), DialogError> {
        let event = UtteranceEvent {
            speaker: speaker.to_string(),
            text: text.to_string(),
        };
        self.tx
            .send(event)
            .map(|_| ())
            .map_err(|err| DialogError::TransportClosed(err.to_string()))
    }

    /// Subscribes to the utterance stream.
    pub fn subscribe(&self) -> broadcast::Receiver<UtteranceEvent> {
        self.tx.subscribe()
    }
}
