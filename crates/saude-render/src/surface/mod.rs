//! Output surfaces a [`Presentation`] can be drawn on.

mod html;
mod text;

pub use html::HtmlSurface;
pub use text::TextSurface;

use thiserror::Error;

use crate::view::Presentation;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write rendered output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to format rendered output: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("failed to encode map data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Something that draws one full frame per presentation.
///
/// Each call replaces whatever the previous call drew; surfaces keep no
/// state derived from an earlier presentation.
pub trait Surface {
    /// Draws `presentation`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the output cannot be written or encoded.
    fn present(&mut self, presentation: &Presentation) -> Result<(), RenderError>;
}
