//! Default marker icon assets.
//!
//! The map widget cannot resolve its bundled marker images when the page is
//! not served from the widget's own asset path, so the icon URLs are pinned
//! to the published leaflet 1.7.1 images. The setup happens once per process
//! before the first render; repeated calls are no-ops.

use std::sync::OnceLock;

use serde::Serialize;

const ICON_BASE_URL: &str = "https://unpkg.com/leaflet@1.7.1/dist/images";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
}

static DEFAULT_MARKER_ICON: OnceLock<MarkerIcon> = OnceLock::new();

/// Installs the process-wide default marker icon and returns it.
///
/// Idempotent: every call returns the same instance.
pub fn install_default_marker_icon() -> &'static MarkerIcon {
    DEFAULT_MARKER_ICON.get_or_init(|| {
        tracing::debug!(base = ICON_BASE_URL, "installing default marker icon");
        MarkerIcon {
            icon_url: format!("{ICON_BASE_URL}/marker-icon.png"),
            icon_retina_url: format!("{ICON_BASE_URL}/marker-icon-2x.png"),
            shadow_url: format!("{ICON_BASE_URL}/marker-shadow.png"),
        }
    })
}
