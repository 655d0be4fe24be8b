//! Domain Models
//!
//! Field conditions, crop suggestions and detection results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Soil classification offered by the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Loam,
    Sandy,
    Silt,
    Chalk,
}

impl SoilType {
    pub const ALL: [Self; 5] = [Self::Clay, Self::Loam, Self::Sandy, Self::Silt, Self::Chalk];

    /// Form value (`clay`, `loam`, ...)
    pub const fn value(self) -> &'static str {
        match self {
            Self::Clay => "clay",
            Self::Loam => "loam",
            Self::Sandy => "sandy",
            Self::Silt => "silt",
            Self::Chalk => "chalk",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Clay => "Clay",
            Self::Loam => "Loam",
            Self::Sandy => "Sandy",
            Self::Silt => "Silt",
            Self::Chalk => "Chalk",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SoilType {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|soil| soil.value() == value)
            .ok_or_else(|| AdvisorError::InvalidField {
                field: "soil type",
                value: s.to_string(),
            })
    }
}

/// Form field identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropField {
    Location,
    SoilType,
    Temperature,
    Rainfall,
    LandSize,
}

impl CropField {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::SoilType => "soil type",
            Self::Temperature => "temperature",
            Self::Rainfall => "rainfall",
            Self::LandSize => "land size",
        }
    }
}

/// The crop form exactly as typed
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropForm {
    pub location: String,
    pub soil_type: String,
    /// Average temperature in °C
    pub temperature: String,
    /// Annual rainfall in mm
    pub rainfall: String,
    /// Land size in acres
    pub land_size: String,
}

impl CropForm {
    pub fn set(&mut self, field: CropField, value: impl Into<String>) {
        let slot = match field {
            CropField::Location => &mut self.location,
            CropField::SoilType => &mut self.soil_type,
            CropField::Temperature => &mut self.temperature,
            CropField::Rainfall => &mut self.rainfall,
            CropField::LandSize => &mut self.land_size,
        };
        *slot = value.into();
    }

    pub fn get(&self, field: CropField) -> &str {
        match field {
            CropField::Location => &self.location,
            CropField::SoilType => &self.soil_type,
            CropField::Temperature => &self.temperature,
            CropField::Rainfall => &self.rainfall,
            CropField::LandSize => &self.land_size,
        }
    }

    /// Parse the typed values. Blank fields become `None`.
    pub fn to_query(&self) -> Result<CropQuery> {
        let soil_type = match self.soil_type.trim() {
            "" => None,
            value => Some(value.parse()?),
        };

        Ok(CropQuery {
            location: non_blank(&self.location),
            soil_type,
            temperature_c: parse_number(CropField::Temperature, &self.temperature)?,
            rainfall_mm: parse_number(CropField::Rainfall, &self.rainfall)?,
            land_size_acres: parse_number(CropField::LandSize, &self.land_size)?,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_number(field: CropField, value: &str) -> Result<Option<f64>> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(AdvisorError::InvalidField {
            field: field.name(),
            value,
        }),
    }
}

/// Parsed field conditions
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CropQuery {
    pub location: Option<String>,
    pub soil_type: Option<SoilType>,
    pub temperature_c: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub land_size_acres: Option<f64>,
}

/// A recommended crop
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSuggestion {
    pub name: String,
    /// Match score, 0-100
    pub confidence: u8,
    pub description: String,
    pub icon: String,
}

/// What was found on the plant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionKind {
    Pest,
    Disease,
}

impl DetectionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pest => "Pest Detected",
            Self::Disease => "Disease Detected",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Severity",
            Self::Medium => "Medium Severity",
            Self::High => "High Severity",
        }
    }
}

/// Outcome of analyzing one plant image
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(rename = "type")]
    pub kind: DetectionKind,
    pub name: String,
    /// Confidence, 0-100
    pub confidence: u8,
    pub description: String,
    pub treatment: String,
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form_is_empty_query() {
        let query = CropForm::default().to_query().unwrap();
        assert_eq!(query, CropQuery::default());
    }

    #[test]
    fn test_form_parses_values() {
        let mut form = CropForm::default();
        form.set(CropField::Location, "  Fresno, CA ");
        form.set(CropField::SoilType, "loam");
        form.set(CropField::Temperature, "25");
        form.set(CropField::Rainfall, "750.5");
        form.set(CropField::LandSize, "5");

        let query = form.to_query().unwrap();
        assert_eq!(query.location.as_deref(), Some("Fresno, CA"));
        assert_eq!(query.soil_type, Some(SoilType::Loam));
        assert_eq!(query.temperature_c, Some(25.0));
        assert_eq!(query.rainfall_mm, Some(750.5));
        assert_eq!(query.land_size_acres, Some(5.0));
    }

    #[test]
    fn test_unparsable_number_names_field() {
        let mut form = CropForm::default();
        form.set(CropField::Rainfall, "lots");

        match form.to_query() {
            Err(AdvisorError::InvalidField { field, value }) => {
                assert_eq!(field, "rainfall");
                assert_eq!(value, "lots");
            }
            other => panic!("expected invalid field, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_soil_rejected() {
        assert!("peat".parse::<SoilType>().is_err());
        assert_eq!("Chalk".parse::<SoilType>().unwrap(), SoilType::Chalk);
    }

    #[test]
    fn test_detection_serializes_type_field() {
        let result = DetectionResult {
            kind: DetectionKind::Disease,
            name: "Leaf Spot".into(),
            confidence: 87,
            description: String::new(),
            treatment: String::new(),
            severity: Severity::Medium,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "disease");
        assert_eq!(json["severity"], "medium");
    }
}
