//! Pure projection from [`LoadState`] to what the user sees.
//!
//! The map and the card list are produced together from the same slice of
//! locations, in the same pass, so they cannot disagree on which facilities
//! are shown or in what order.

use saude_core::{Coordinates, LoadState, Location};

pub const LOADING_LABEL: &str = "Carregando...";
pub const ERROR_HEADING: &str = "Erro ao carregar dados";
pub const EMPTY_MAP_PLACEHOLDER: &str = "Nenhuma localização disponível para exibir no mapa.";

/// Fixed reference point the map opens on; not derived from the data.
pub const MAP_CENTER: Coordinates = Coordinates {
    latitude: -11.87,
    longitude: -55.50,
};
pub const MAP_ZOOM: u8 = 12;

/// Raster tile source for the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: &'static str,
    pub attribution: &'static str,
}

impl TileLayer {
    pub const OPEN_STREET_MAP: TileLayer = TileLayer {
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
    };
}

/// Everything a surface needs to draw one state.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// Loading indicator only.
    Loading,
    /// Error panel only; never shown alongside data.
    Error { description: String },
    /// Map panel plus card list.
    Directory(Directory),
}

impl Presentation {
    /// Markers currently on the map; empty unless a map is shown.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        match self {
            Presentation::Directory(directory) => directory.markers(),
            _ => &[],
        }
    }

    /// Cards currently in the list; empty unless a directory is shown.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Presentation::Directory(directory) => &directory.cards,
            _ => &[],
        }
    }
}

/// The synchronized map + list view of an `Available` listing.
///
/// Only built by [`Directory::from_locations`], so markers and cards always
/// come from the same slice in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    map: MapPanel,
    cards: Vec<Card>,
}

impl Directory {
    #[must_use]
    pub fn from_locations(locations: &[Location]) -> Self {
        let (markers, cards): (Vec<Marker>, Vec<Card>) = locations
            .iter()
            .map(|location| (Marker::for_location(location), Card::for_location(location)))
            .unzip();

        let map = if markers.is_empty() {
            MapPanel::Placeholder(EMPTY_MAP_PLACEHOLDER)
        } else {
            MapPanel::Map(MapView::centered(markers))
        };

        Self { map, cards }
    }

    #[must_use]
    pub fn map(&self) -> &MapPanel {
        &self.map
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        match &self.map {
            MapPanel::Map(view) => &view.markers,
            MapPanel::Placeholder(_) => &[],
        }
    }

    #[must_use]
    pub fn marker_keys(&self) -> Vec<&str> {
        self.markers().iter().map(|m| m.key.as_str()).collect()
    }

    #[must_use]
    pub fn card_keys(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.key.as_str()).collect()
    }
}

/// Map area: either a real map or an explicit "no data" message.
#[derive(Debug, Clone, PartialEq)]
pub enum MapPanel {
    Placeholder(&'static str),
    Map(MapView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub scroll_wheel_zoom: bool,
    pub tiles: TileLayer,
    pub markers: Vec<Marker>,
}

impl MapView {
    fn centered(markers: Vec<Marker>) -> Self {
        Self {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            scroll_wheel_zoom: false,
            tiles: TileLayer::OPEN_STREET_MAP,
            markers,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: String,
    pub position: Coordinates,
    pub popup: Popup,
}

impl Marker {
    fn for_location(location: &Location) -> Self {
        Self {
            key: location.key().to_owned(),
            position: location.coordinates,
            popup: Popup {
                title: location.name.clone(),
                address_line: address_line(location),
                contact_line: format!("Contato: {}", location.contact_number),
            },
        }
    }
}

/// Detail revealed when a marker is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub address_line: String,
    pub contact_line: String,
}

impl Popup {
    #[must_use]
    pub fn lines(&self) -> [&str; 3] {
        [
            self.title.as_str(),
            self.address_line.as_str(),
            self.contact_line.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub key: String,
    pub title: String,
    pub address_line: String,
    pub postal_code: String,
    pub contact_number: String,
    pub operating_hours: String,
}

impl Card {
    fn for_location(location: &Location) -> Self {
        Self {
            key: location.key().to_owned(),
            title: location.name.clone(),
            address_line: address_line(location),
            postal_code: location.postal_code.clone(),
            contact_number: location.contact_number.clone(),
            operating_hours: location.operating_hours.clone(),
        }
    }

    /// Labelled body lines, in display order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Endereço", self.address_line.as_str()),
            ("CEP", self.postal_code.as_str()),
            ("Contato", self.contact_number.as_str()),
            ("Horário", self.operating_hours.as_str()),
        ]
    }
}

fn address_line(location: &Location) -> String {
    format!(
        "{}, {} - {}",
        location.address, location.house_number, location.neighborhood
    )
}

/// Maps the current state to its presentation. Never mutates `state`.
#[must_use]
pub fn project(state: &LoadState) -> Presentation {
    match state {
        LoadState::Pending => Presentation::Loading,
        LoadState::Failed(description) => Presentation::Error {
            description: description.clone(),
        },
        LoadState::Available(locations) => {
            Presentation::Directory(Directory::from_locations(locations))
        }
    }
}
