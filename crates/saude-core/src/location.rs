//! Facility record as delivered by the listing endpoint.
//!
//! ## Observed wire shape
//!
//! The listing is a JSON array of objects keyed in Portuguese:
//! `nome`, `endereco`, `numero`, `bairro`, `cep`, `numero_de_contato`,
//! `horario_de_funcionamento`, `latitude`, `longitude`.
//!
//! ### Coordinates
//! Some rows carry `latitude`/`longitude` as JSON numbers, others as
//! numeric strings (`"-11.87"`). Both are accepted and coerced to `f64`.
//! Anything that does not coerce to a finite number rejects the row, so a
//! marker is never placed from a garbage value.
//!
//! ### Display fields
//! Shown verbatim. `null` or a missing key becomes an empty string; a
//! number (e.g. `"numero": 10`) is kept in its JSON text form.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Geographic position of a facility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One public-health facility.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireLocation")]
pub struct Location {
    /// Display name; also the identity key for markers and cards.
    pub name: String,
    pub address: String,
    pub house_number: String,
    pub neighborhood: String,
    pub postal_code: String,
    pub contact_number: String,
    pub operating_hours: String,
    pub coordinates: Coordinates,
}

impl Location {
    /// Stable identity used to pair a marker with its card.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.name
    }
}

/// Reasons a listing row is rejected at the schema boundary.
#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("location is missing a non-empty `nome`")]
    MissingName,

    #[error("location '{name}' is missing `{field}`")]
    MissingCoordinate { name: String, field: &'static str },

    #[error("location '{name}' has non-numeric `{field}`: {value}")]
    InvalidCoordinate {
        name: String,
        field: &'static str,
        value: String,
    },
}

#[derive(Deserialize)]
struct WireLocation {
    #[serde(rename = "nome", default)]
    name: Option<String>,
    #[serde(rename = "endereco", default, deserialize_with = "display_text")]
    address: String,
    #[serde(rename = "numero", default, deserialize_with = "display_text")]
    house_number: String,
    #[serde(rename = "bairro", default, deserialize_with = "display_text")]
    neighborhood: String,
    #[serde(rename = "cep", default, deserialize_with = "display_text")]
    postal_code: String,
    #[serde(
        rename = "numero_de_contato",
        default,
        deserialize_with = "display_text"
    )]
    contact_number: String,
    #[serde(
        rename = "horario_de_funcionamento",
        default,
        deserialize_with = "display_text"
    )]
    operating_hours: String,
    #[serde(default)]
    latitude: Option<Value>,
    #[serde(default)]
    longitude: Option<Value>,
}

impl TryFrom<WireLocation> for Location {
    type Error = LocationError;

    fn try_from(wire: WireLocation) -> Result<Self, Self::Error> {
        let name = wire
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(LocationError::MissingName)?;
        let latitude = coerce_coordinate(&name, "latitude", wire.latitude.as_ref())?;
        let longitude = coerce_coordinate(&name, "longitude", wire.longitude.as_ref())?;

        Ok(Self {
            name,
            address: wire.address,
            house_number: wire.house_number,
            neighborhood: wire.neighborhood,
            postal_code: wire.postal_code,
            contact_number: wire.contact_number,
            operating_hours: wire.operating_hours,
            coordinates: Coordinates {
                latitude,
                longitude,
            },
        })
    }
}

fn coerce_coordinate(
    name: &str,
    field: &'static str,
    value: Option<&Value>,
) -> Result<f64, LocationError> {
    let parsed = match value {
        None | Some(Value::Null) => {
            return Err(LocationError::MissingCoordinate {
                name: name.to_owned(),
                field,
            })
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| LocationError::InvalidCoordinate {
            name: name.to_owned(),
            field,
            value: value.map(ToString::to_string).unwrap_or_default(),
        })
}

fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected text or number, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ubs_centro() -> Value {
        json!({
            "nome": "UBS Centro",
            "endereco": "Rua A",
            "numero": "10",
            "bairro": "Centro",
            "cep": "78000-000",
            "numero_de_contato": "(66) 1234-5678",
            "horario_de_funcionamento": "07h-17h",
            "latitude": -11.87,
            "longitude": -55.50
        })
    }

    #[test]
    fn parses_all_wire_fields() {
        let loc: Location = serde_json::from_value(ubs_centro()).unwrap();
        assert_eq!(loc.name, "UBS Centro");
        assert_eq!(loc.key(), "UBS Centro");
        assert_eq!(loc.address, "Rua A");
        assert_eq!(loc.house_number, "10");
        assert_eq!(loc.neighborhood, "Centro");
        assert_eq!(loc.postal_code, "78000-000");
        assert_eq!(loc.contact_number, "(66) 1234-5678");
        assert_eq!(loc.operating_hours, "07h-17h");
        assert_eq!(
            loc.coordinates,
            Coordinates {
                latitude: -11.87,
                longitude: -55.50
            }
        );
    }

    #[test]
    fn coerces_string_coordinates() {
        let mut raw = ubs_centro();
        raw["latitude"] = json!("-11.87");
        raw["longitude"] = json!(" -55.50 ");
        let loc: Location = serde_json::from_value(raw).unwrap();
        assert!((loc.coordinates.latitude - -11.87).abs() < f64::EPSILON);
        assert!((loc.coordinates.longitude - -55.50).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_numeric_coordinate() {
        let mut raw = ubs_centro();
        raw["latitude"] = json!("norte");
        let err = serde_json::from_value::<Location>(raw).unwrap_err();
        assert!(err.to_string().contains("non-numeric `latitude`"), "{err}");
    }

    #[test]
    fn rejects_non_finite_coordinate() {
        let mut raw = ubs_centro();
        raw["longitude"] = json!("inf");
        assert!(serde_json::from_value::<Location>(raw).is_err());
    }

    #[test]
    fn rejects_missing_coordinate() {
        let mut raw = ubs_centro();
        raw.as_object_mut().unwrap().remove("longitude");
        let err = serde_json::from_value::<Location>(raw).unwrap_err();
        assert!(err.to_string().contains("missing `longitude`"), "{err}");
    }

    #[test]
    fn rejects_null_coordinate() {
        let mut raw = ubs_centro();
        raw["latitude"] = Value::Null;
        assert!(serde_json::from_value::<Location>(raw).is_err());
    }

    #[test]
    fn rejects_missing_or_blank_name() {
        let mut raw = ubs_centro();
        raw.as_object_mut().unwrap().remove("nome");
        assert!(serde_json::from_value::<Location>(raw.clone()).is_err());

        raw["nome"] = json!("  ");
        let err = serde_json::from_value::<Location>(raw).unwrap_err();
        assert!(err.to_string().contains("nome"), "{err}");
    }

    #[test]
    fn display_fields_tolerate_null_missing_and_numbers() {
        let raw = json!({
            "nome": "UPA Norte",
            "numero": 250,
            "cep": null,
            "latitude": "-11.85",
            "longitude": "-55.49",
            "extra": {"ignored": true}
        });
        let loc: Location = serde_json::from_value(raw).unwrap();
        assert_eq!(loc.house_number, "250");
        assert_eq!(loc.postal_code, "");
        assert_eq!(loc.address, "");
        assert_eq!(loc.operating_hours, "");
    }

    #[test]
    fn display_field_rejects_structured_value() {
        let mut raw = ubs_centro();
        raw["bairro"] = json!(["Centro"]);
        assert!(serde_json::from_value::<Location>(raw).is_err());
    }

    #[test]
    fn listing_preserves_delivered_order() {
        let mut second = ubs_centro();
        second["nome"] = json!("UPA Sul");
        let mut first = ubs_centro();
        first["nome"] = json!("UBS Jardim");
        let listing: Vec<Location> =
            serde_json::from_value(json!([second, first])).unwrap();
        let names: Vec<&str> = listing.iter().map(Location::key).collect();
        assert_eq!(names, ["UPA Sul", "UBS Jardim"]);
    }
}
