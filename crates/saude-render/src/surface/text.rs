use std::io::Write;

use crate::surface::{RenderError, Surface};
use crate::view::{Directory, MapPanel, Presentation, ERROR_HEADING, LOADING_LABEL};

/// Plain-text terminal rendering, one frame per presentation.
pub struct TextSurface<W> {
    out: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_directory(&mut self, directory: &Directory) -> Result<(), RenderError> {
        writeln!(self.out, "Mapa das Unidades")?;
        match directory.map() {
            MapPanel::Placeholder(message) => writeln!(self.out, "  {message}")?,
            MapPanel::Map(view) => {
                writeln!(
                    self.out,
                    "  centro: {}, {} | zoom: {}",
                    view.center.latitude, view.center.longitude, view.zoom
                )?;
                for marker in &view.markers {
                    writeln!(
                        self.out,
                        "  [{}, {}] {}",
                        marker.position.latitude,
                        marker.position.longitude,
                        marker.popup.lines().join(" / ")
                    )?;
                }
            }
        }

        for card in directory.cards() {
            writeln!(self.out)?;
            writeln!(self.out, "{}", card.title)?;
            for (label, value) in card.fields() {
                writeln!(self.out, "  {label}: {value}")?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn present(&mut self, presentation: &Presentation) -> Result<(), RenderError> {
        match presentation {
            Presentation::Loading => writeln!(self.out, "{LOADING_LABEL}")?,
            Presentation::Error { description } => {
                writeln!(self.out, "{ERROR_HEADING}")?;
                writeln!(self.out, "{description}")?;
            }
            Presentation::Directory(directory) => self.write_directory(directory)?,
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use saude_core::{LoadState, Location};

    use super::*;
    use crate::view::project;

    fn render(state: &LoadState) -> String {
        let mut surface = TextSurface::new(Vec::new());
        surface.present(&project(state)).unwrap();
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn renders_loading_label() {
        assert_eq!(render(&LoadState::Pending), "Carregando...\n");
    }

    #[test]
    fn renders_error_panel_with_description() {
        let text = render(&LoadState::Failed(
            "unexpected HTTP status 500 from http://localhost:5000/api/locations".into(),
        ));
        assert_eq!(
            text,
            "Erro ao carregar dados\nunexpected HTTP status 500 from http://localhost:5000/api/locations\n"
        );
    }

    #[test]
    fn renders_placeholder_for_empty_listing() {
        let text = render(&LoadState::Available(Vec::new()));
        assert_eq!(
            text,
            "Mapa das Unidades\n  Nenhuma localização disponível para exibir no mapa.\n"
        );
    }

    #[test]
    fn renders_marker_and_card_for_each_location() {
        let location: Location = serde_json::from_value(serde_json::json!({
            "nome": "UBS Centro",
            "endereco": "Rua A",
            "numero": "10",
            "bairro": "Centro",
            "cep": "78000-000",
            "numero_de_contato": "(66) 1234-5678",
            "horario_de_funcionamento": "07h-17h",
            "latitude": -11.87,
            "longitude": -55.5
        }))
        .unwrap();

        let text = render(&LoadState::Available(vec![location]));
        let expected = "\
Mapa das Unidades
  centro: -11.87, -55.5 | zoom: 12
  [-11.87, -55.5] UBS Centro / Rua A, 10 - Centro / Contato: (66) 1234-5678

UBS Centro
  Endereço: Rua A, 10 - Centro
  CEP: 78000-000
  Contato: (66) 1234-5678
  Horário: 07h-17h
";
        assert_eq!(text, expected);
    }
}
