//! One display session: mount, trigger the loader once, re-render on every
//! committed state until a terminal state has been drawn.

use saude_core::LoadState;
use saude_loader::{Loader, LocationClient};
use tokio::sync::watch;

use crate::surface::{RenderError, Surface};
use crate::view::{project, Presentation};

/// A single mount-to-unmount lifetime of the renderer.
///
/// Each session owns its own [`Loader`], so its state starts at
/// [`LoadState::Pending`] no matter what earlier sessions on the same client
/// saw. Consumed by [`Session::run`], so a session can trigger at most one
/// retrieval.
pub struct Session {
    loader: Loader,
}

impl Session {
    #[must_use]
    pub fn new(client: LocationClient) -> Self {
        Self {
            loader: Loader::new(client),
        }
    }

    /// Renders the current snapshot, triggers one load, and keeps rendering
    /// committed states until a terminal one has been presented.
    ///
    /// The retrieval and the render loop share the calling task; rendering
    /// runs to completion between polls of the retrieval. Returns the last
    /// presentation drawn.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the surface fails to draw. Load failures
    /// are not errors here; they are drawn as an error panel.
    pub async fn run<S: Surface>(self, surface: &mut S) -> Result<Presentation, RenderError> {
        let mut state_rx = self.loader.subscribe();
        tracing::info!(url = %self.loader.client().url(), "display session mounted");

        let (committed, rendered) = tokio::join!(
            self.loader.load(),
            render_until_settled(&mut state_rx, surface)
        );

        tracing::info!(state = committed.label(), "display session settled");
        rendered
    }
}

async fn render_until_settled<S: Surface>(
    state_rx: &mut watch::Receiver<LoadState>,
    surface: &mut S,
) -> Result<Presentation, RenderError> {
    loop {
        let (presentation, terminal) = {
            let state = state_rx.borrow_and_update();
            tracing::debug!(state = state.label(), "rendering");
            (project(&state), state.is_terminal())
        };

        surface.present(&presentation)?;

        if terminal || state_rx.changed().await.is_err() {
            return Ok(presentation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        frames: Vec<Presentation>,
    }

    impl Surface for Recording {
        fn present(&mut self, presentation: &Presentation) -> Result<(), RenderError> {
            self.frames.push(presentation.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn render_loop_stops_on_terminal_state() {
        let (tx, mut rx) = watch::channel(LoadState::Pending);
        let mut surface = Recording::default();

        let (rendered, ()) = tokio::join!(render_until_settled(&mut rx, &mut surface), async {
            tokio::task::yield_now().await;
            tx.send_replace(LoadState::Available(Vec::new()));
        });

        assert!(matches!(rendered.unwrap(), Presentation::Directory(_)));
        assert_eq!(surface.frames.first(), Some(&Presentation::Loading));
        assert_eq!(surface.frames.len(), 2);
    }

    #[tokio::test]
    async fn render_loop_returns_when_sender_dropped() {
        let (tx, mut rx) = watch::channel(LoadState::Pending);
        drop(tx);
        let mut surface = Recording::default();
        let rendered = render_until_settled(&mut rx, &mut surface).await.unwrap();
        assert_eq!(rendered, Presentation::Loading);
    }
}
