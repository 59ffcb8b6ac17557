//! Airline catalog
//!
//! The fixed list of airlines questions are drawn from. Loaded once at
//! startup and never mutated afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};

/// A single airline record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// 2-3 character IATA designator shown as the prompt
    pub iata_code: String,
}

impl Airline {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        iata_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            iata_code: iata_code.into(),
        }
    }

    /// True if the IATA code is 2-3 ASCII alphanumerics
    pub fn has_valid_iata_code(&self) -> bool {
        (2..=3).contains(&self.iata_code.len())
            && self.iata_code.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

/// Immutable, ordered list of airlines with unique ids
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    airlines: Vec<Airline>,
}

impl Catalog {
    /// Validate and wrap a list of airlines.
    ///
    /// Size is not checked here; a short catalog only fails once a round
    /// is requested from it.
    pub fn new(airlines: Vec<Airline>) -> QuizResult<Self> {
        let mut seen = HashSet::with_capacity(airlines.len());
        for airline in &airlines {
            if !seen.insert(airline.id.as_str()) {
                return Err(QuizError::DuplicateAirline(airline.id.clone()));
            }
            if !airline.has_valid_iata_code() {
                return Err(QuizError::InvalidIataCode {
                    id: airline.id.clone(),
                    code: airline.iata_code.clone(),
                });
            }
        }
        Ok(Self { airlines })
    }

    /// Parse a JSON array of `{id, name, iataCode}` records
    pub fn from_json(json: &str) -> QuizResult<Self> {
        let airlines: Vec<Airline> = serde_json::from_str(json)?;
        let catalog = Self::new(airlines)?;
        log::info!("Loaded catalog with {} airlines", catalog.len());
        Ok(catalog)
    }

    pub fn airlines(&self) -> &[Airline] {
        &self.airlines
    }

    pub fn len(&self) -> usize {
        self.airlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airlines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_reads_camel_case_fields() {
        let json = r#"[
            {"id": "ba", "name": "British Airways", "iataCode": "BA"},
            {"id": "lh", "name": "Lufthansa", "iataCode": "LH"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.airlines()[1].iata_code, "LH");
        assert_eq!(catalog.airlines()[0].name, "British Airways");
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            Airline::new("ba", "British Airways", "BA"),
            Airline::new("ba", "BA CityFlyer", "CJ"),
        ]);
        assert!(matches!(result, Err(QuizError::DuplicateAirline(id)) if id == "ba"));
    }

    #[test]
    fn test_rejects_bad_iata_codes() {
        for code in ["B", "BAWX", "B-", ""] {
            let result = Catalog::new(vec![Airline::new("x", "X Air", code)]);
            assert!(
                matches!(result, Err(QuizError::InvalidIataCode { .. })),
                "code {code:?} should be rejected"
            );
        }
        // Digits are legal in designators
        assert!(Catalog::new(vec![Airline::new("jq", "Jetstar Asia", "3K")]).is_ok());
    }

    #[test]
    fn test_malformed_json_is_a_format_error() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(QuizError::CatalogFormat(_))
        ));
    }

    #[test]
    fn test_short_catalog_is_representable() {
        let catalog = Catalog::new(vec![Airline::new("ba", "British Airways", "BA")]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
    }
}
