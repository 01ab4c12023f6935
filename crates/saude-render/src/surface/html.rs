use std::fmt::Write;

use serde::Serialize;

use crate::icons::{install_default_marker_icon, MarkerIcon};
use crate::surface::{RenderError, Surface};
use crate::view::{
    Card, Directory, MapPanel, MapView, Presentation, ERROR_HEADING, LOADING_LABEL,
};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.7.1/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.7.1/dist/leaflet.js";
const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const PAGE_TITLE: &str = "Unidades de Pronto Atendimento (UPA) e UBS";

/// Self-contained HTML page using the Leaflet map widget.
///
/// Keeps only the most recent document; callers write it out once the
/// session has settled.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    document: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapScript<'a> {
    center: [f64; 2],
    zoom: u8,
    scroll_wheel_zoom: bool,
    tile_url: &'a str,
    attribution: &'a str,
    icon: &'a MarkerIcon,
    markers: Vec<MarkerScript<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerScript<'a> {
    key: &'a str,
    position: [f64; 2],
    popup_html: String,
}

impl HtmlSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest rendered document, if anything has been presented.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    #[must_use]
    pub fn into_document(self) -> Option<String> {
        self.document
    }
}

impl Surface for HtmlSurface {
    fn present(&mut self, presentation: &Presentation) -> Result<(), RenderError> {
        self.document = Some(render_document(presentation)?);
        Ok(())
    }
}

fn render_document(presentation: &Presentation) -> Result<String, RenderError> {
    let mut html = String::with_capacity(4096);
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"pt-BR\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\" />")?;
    writeln!(html, "<title>{}</title>", escape_html(PAGE_TITLE))?;
    writeln!(html, "<link rel=\"stylesheet\" href=\"{BOOTSTRAP_CSS}\" />")?;
    writeln!(html, "<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\" />")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;

    match presentation {
        Presentation::Loading => {
            writeln!(
                html,
                "<div class=\"container mt-5\"><h1>{}</h1></div>",
                escape_html(LOADING_LABEL)
            )?;
        }
        Presentation::Error { description } => {
            writeln!(
                html,
                "<div class=\"container mt-5 text-danger\"><h1>{}</h1><p>{}</p></div>",
                escape_html(ERROR_HEADING),
                escape_html(description)
            )?;
        }
        Presentation::Directory(directory) => write_directory(&mut html, directory)?,
    }

    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}

fn write_directory(html: &mut String, directory: &Directory) -> Result<(), RenderError> {
    writeln!(
        html,
        "<header class=\"header-gov\"><div class=\"container\"><span class=\"logo-text\">Saúde Pública</span></div></header>"
    )?;
    writeln!(html, "<main class=\"container mt-5\">")?;
    writeln!(html, "<h1 class=\"main-title\">{}</h1>", escape_html(PAGE_TITLE))?;
    writeln!(html, "<div class=\"card map-card mb-5\">")?;
    writeln!(html, "<div class=\"card-header\">Mapa das Unidades</div>")?;
    writeln!(
        html,
        "<div class=\"card-body\" style=\"height: 450px; padding: 0\">"
    )?;
    match directory.map() {
        MapPanel::Placeholder(message) => {
            writeln!(html, "<p class=\"p-3\">{}</p>", escape_html(message))?;
        }
        MapPanel::Map(_) => {
            writeln!(
                html,
                "<div id=\"map\" style=\"height: 100%; width: 100%\"></div>"
            )?;
        }
    }
    writeln!(html, "</div>")?;
    writeln!(html, "</div>")?;

    writeln!(html, "<div class=\"row\">")?;
    for card in directory.cards() {
        write_card(html, card)?;
    }
    writeln!(html, "</div>")?;
    writeln!(html, "</main>")?;
    writeln!(
        html,
        "<footer class=\"footer-gov\"><div class=\"container\">&copy; Secretaria de Saúde - Todos os direitos reservados.</div></footer>"
    )?;

    if let MapPanel::Map(view) = directory.map() {
        write_map_script(html, view)?;
    }
    Ok(())
}

fn write_card(html: &mut String, card: &Card) -> Result<(), RenderError> {
    writeln!(
        html,
        "<div class=\"col-md-6 col-lg-4 mb-4\" data-key=\"{}\">",
        escape_html(&card.key)
    )?;
    writeln!(html, "<div class=\"card location-card\">")?;
    writeln!(
        html,
        "<div class=\"card-header\">{}</div>",
        escape_html(&card.title)
    )?;
    write!(html, "<div class=\"card-body\"><p class=\"card-text\">")?;
    let fields = card
        .fields()
        .iter()
        .map(|(label, value)| format!("<strong>{label}:</strong> {}", escape_html(value)))
        .collect::<Vec<_>>()
        .join("<br />");
    write!(html, "{fields}")?;
    writeln!(html, "</p></div>")?;
    writeln!(html, "</div>")?;
    writeln!(html, "</div>")?;
    Ok(())
}

fn write_map_script(html: &mut String, view: &MapView) -> Result<(), RenderError> {
    let script = MapScript {
        center: [view.center.latitude, view.center.longitude],
        zoom: view.zoom,
        scroll_wheel_zoom: view.scroll_wheel_zoom,
        tile_url: view.tiles.url_template,
        attribution: view.tiles.attribution,
        icon: install_default_marker_icon(),
        markers: view
            .markers
            .iter()
            .map(|marker| MarkerScript {
                key: &marker.key,
                position: [marker.position.latitude, marker.position.longitude],
                popup_html: marker
                    .popup
                    .lines()
                    .iter()
                    .enumerate()
                    .map(|(i, line)| {
                        if i == 0 {
                            format!("<strong>{}</strong>", escape_html(line))
                        } else {
                            escape_html(line)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("<br />"),
            })
            .collect(),
    };

    // `</` inside a script block would close it early.
    let data = serde_json::to_string(&script)?.replace("</", "<\\/");

    writeln!(html, "<script src=\"{LEAFLET_JS}\"></script>")?;
    writeln!(html, "<script>")?;
    writeln!(html, "const view = {data};")?;
    writeln!(
        html,
        "delete L.Icon.Default.prototype._getIconUrl;\nL.Icon.Default.mergeOptions(view.icon);"
    )?;
    writeln!(
        html,
        "const map = L.map('map', {{ scrollWheelZoom: view.scrollWheelZoom }}).setView(view.center, view.zoom);"
    )?;
    writeln!(
        html,
        "L.tileLayer(view.tileUrl, {{ attribution: view.attribution }}).addTo(map);"
    )?;
    writeln!(
        html,
        "view.markers.forEach((m) => L.marker(m.position, {{ title: m.key }}).bindPopup(m.popupHtml).addTo(map));"
    )?;
    writeln!(html, "</script>")?;
    Ok(())
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
