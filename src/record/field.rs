/// Column definitions for the accident record schema
///
/// This module defines the fixed set of columns every stored row carries,
/// along with the label-marker each column is read from on a detail page.
use std::fmt;

/// One column of the accident record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    // ===== Labeled Scalar Fields =====
    Date,
    Time,
    AircraftType,
    Operator,
    Registration,
    ManufacturerSerialNumber,
    YearOfManufacture,
    Fatalities,
    OtherFatalities,
    AircraftDamage,
    Category,
    Location,
    FlightPhase,
    Nature,
    DepartureAirport,
    DestinationAirport,
    ConfidenceRating,

    // ===== Section Fields =====
    /// Free text, may span several lines
    Narrative,

    // ===== Identity =====
    /// Address the record was extracted from
    SourceUrl,
}

impl Field {
    /// All columns in store order
    pub const ALL: [Field; 19] = [
        Self::Date,
        Self::Time,
        Self::AircraftType,
        Self::Operator,
        Self::Registration,
        Self::ManufacturerSerialNumber,
        Self::YearOfManufacture,
        Self::Fatalities,
        Self::OtherFatalities,
        Self::AircraftDamage,
        Self::Category,
        Self::Location,
        Self::FlightPhase,
        Self::Nature,
        Self::DepartureAirport,
        Self::DestinationAirport,
        Self::ConfidenceRating,
        Self::Narrative,
        Self::SourceUrl,
    ];

    /// The 17 columns read through a label-marker and its adjacent value cell
    pub const LABELED: [Field; 17] = [
        Self::Date,
        Self::Time,
        Self::AircraftType,
        Self::Operator,
        Self::Registration,
        Self::ManufacturerSerialNumber,
        Self::YearOfManufacture,
        Self::Fatalities,
        Self::OtherFatalities,
        Self::AircraftDamage,
        Self::Category,
        Self::Location,
        Self::FlightPhase,
        Self::Nature,
        Self::DepartureAirport,
        Self::DestinationAirport,
        Self::ConfidenceRating,
    ];

    /// Header name of this column in the store
    pub fn column(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Time => "Time",
            Self::AircraftType => "AircraftType",
            Self::Operator => "Operator",
            Self::Registration => "Registration",
            Self::ManufacturerSerialNumber => "ManufacturerSerialNumber",
            Self::YearOfManufacture => "YearOfManufacture",
            Self::Fatalities => "Fatalities",
            Self::OtherFatalities => "OtherFatalities",
            Self::AircraftDamage => "AircraftDamage",
            Self::Category => "Category",
            Self::Location => "Location",
            Self::FlightPhase => "FlightPhase",
            Self::Nature => "Nature",
            Self::DepartureAirport => "DepartureAirport",
            Self::DestinationAirport => "DestinationAirport",
            Self::ConfidenceRating => "ConfidenceRating",
            Self::Narrative => "Narrative",
            Self::SourceUrl => "SourceURL",
        }
    }

    /// The exact, case-sensitive label-marker used on detail pages
    ///
    /// Returns None for SourceURL, which is never read from the page.
    pub fn label(&self) -> Option<&'static str> {
        let label = match self {
            Self::Date => "Date:",
            Self::Time => "Time:",
            Self::AircraftType => "Type:",
            Self::Operator => "Owner/operator:",
            Self::Registration => "Registration:",
            Self::ManufacturerSerialNumber => "MSN:",
            Self::YearOfManufacture => "Year of manufacture:",
            Self::Fatalities => "Fatalities:",
            Self::OtherFatalities => "Other fatalities:",
            Self::AircraftDamage => "Aircraft damage:",
            Self::Category => "Category:",
            Self::Location => "Location:",
            Self::FlightPhase => "Phase:",
            Self::Nature => "Nature:",
            Self::DepartureAirport => "Departure airport:",
            Self::DestinationAirport => "Destination airport:",
            Self::ConfidenceRating => "Confidence Rating:",
            Self::Narrative => "Narrative:",
            Self::SourceUrl => return None,
        };
        Some(label)
    }

    /// Returns the header row in store order
    pub fn header() -> Vec<&'static str> {
        Self::ALL.iter().map(Field::column).collect()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_has_nineteen_unique_columns() {
        let columns: HashSet<_> = Field::ALL.iter().map(Field::column).collect();
        assert_eq!(columns.len(), 19);
    }

    #[test]
    fn test_header_order() {
        let header = Field::header();
        assert_eq!(header.first(), Some(&"Date"));
        assert_eq!(header[17], "Narrative");
        assert_eq!(header.last(), Some(&"SourceURL"));
    }

    #[test]
    fn test_labeled_fields_all_have_labels() {
        for field in Field::LABELED {
            let label = field.label().unwrap();
            assert!(label.ends_with(':'), "{} has label {}", field, label);
        }
    }

    #[test]
    fn test_source_url_has_no_label() {
        assert_eq!(Field::SourceUrl.label(), None);
        assert_eq!(Field::Narrative.label(), Some("Narrative:"));
    }

    #[test]
    fn test_labeled_excludes_narrative_and_source() {
        assert!(!Field::LABELED.contains(&Field::Narrative));
        assert!(!Field::LABELED.contains(&Field::SourceUrl));
    }
}
