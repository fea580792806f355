use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::capture::camera::{CameraSession, MediaDevices};
use crate::capture::client::ProxyClient;
use crate::capture::session::{self, Effect, Event, State};

/// Drives a [`State`] by running its effects against the proxy.
pub struct Analyzer {
    client: ProxyClient,
    state: State,
}

impl Analyzer {
    pub fn new(client: ProxyClient) -> Self {
        let (state, effects) = session::init();
        debug_assert!(effects.is_empty());
        Self { client, state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Applies `event` and every event produced by the effects it triggers,
    /// returning once the session is settled.
    pub async fn dispatch(&mut self, event: Event) -> &State {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            debug!(?event, "session event");
            let (state, effects) = session::transition(std::mem::take(&mut self.state), event);
            self.state = state;
            for effect in effects {
                pending.push_back(self.run_effect(effect).await);
            }
        }
        &self.state
    }

    /// Opens a camera on `devices`, takes one photo and selects it. A camera
    /// that cannot be opened or read lands the session in its error state.
    pub async fn photograph<D: MediaDevices>(&mut self, devices: &D) -> &State {
        let shot = CameraSession::start(devices).and_then(|mut camera| camera.capture());
        let event = match shot {
            Ok(photo) => Event::ImageChosen(photo),
            Err(err) => {
                warn!(error = %err, "camera unavailable");
                Event::CameraFailed(err)
            }
        };
        self.dispatch(event).await
    }

    async fn run_effect(&self, effect: Effect) -> Event {
        match effect {
            Effect::Classify { image } => {
                let outcome = self.client.classify(&image).await.map_err(|e| {
                    warn!(error = %e, "analysis failed");
                    e.to_string()
                });
                Event::ClassifyDone(outcome)
            }
        }
    }
}
