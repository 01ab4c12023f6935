//! Synchronized View Renderer.
//!
//! Projects a [`saude_core::LoadState`] into one [`Presentation`] holding
//! both the map and the card list, and drives a display session against a
//! [`saude_loader::Loader`].

pub mod icons;
pub mod session;
pub mod surface;
pub mod view;

pub use icons::{install_default_marker_icon, MarkerIcon};
pub use session::Session;
pub use surface::{HtmlSurface, RenderError, Surface, TextSurface};
pub use view::{
    project, Card, Directory, MapPanel, MapView, Marker, Popup, Presentation, TileLayer,
};
