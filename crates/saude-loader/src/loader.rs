use saude_core::LoadState;
use tokio::sync::watch;

use crate::client::LocationClient;
use crate::error::describe;

/// Performs the listing retrieval and publishes the outcome as a
/// [`LoadState`] snapshot.
///
/// The published state starts at [`LoadState::Pending`]. Every call to
/// [`Loader::load`] issues one request and replaces the snapshot with its
/// outcome. Overlapping calls are not deduplicated: whichever completes last
/// wins.
pub struct Loader {
    client: LocationClient,
    state: watch::Sender<LoadState>,
}

impl Loader {
    #[must_use]
    pub fn new(client: LocationClient) -> Self {
        let (state, _) = watch::channel(LoadState::Pending);
        Self { client, state }
    }

    /// Returns a receiver that observes every committed transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn client(&self) -> &LocationClient {
        &self.client
    }

    /// Retrieves the listing once and commits the resulting state.
    ///
    /// Never fails: transport and parse errors become
    /// [`LoadState::Failed`] with a description of the cause. Returns the
    /// committed state.
    pub async fn load(&self) -> LoadState {
        let url = self.client.url();
        tracing::info!(%url, "fetching facility listing");

        let next = match self.client.fetch_locations().await {
            Ok(locations) => {
                tracing::info!(%url, count = locations.len(), "facility listing loaded");
                LoadState::Available(locations)
            }
            Err(e) => {
                let description = describe(&e);
                tracing::warn!(%url, error = %description, "facility listing failed to load");
                LoadState::Failed(description)
            }
        };

        let previous = self.state.send_replace(next.clone());
        tracing::debug!(from = previous.label(), to = next.label(), "load state committed");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_loader() -> Loader {
        let client = LocationClient::new("http://127.0.0.1:9/api/locations", 1, "test")
            .expect("client construction should not fail");
        Loader::new(client)
    }

    #[test]
    fn starts_pending() {
        let loader = offline_loader();
        assert_eq!(loader.state(), LoadState::Pending);
        assert_eq!(*loader.subscribe().borrow(), LoadState::Pending);
    }

    #[test]
    fn client_accessor_exposes_endpoint() {
        let loader = offline_loader();
        assert_eq!(loader.client().url().port(), Some(9));
    }
}
