//! Accident record model
//!
//! A [`Record`] is built once from a detail document and never mutated
//! after it has been handed to the crawl buffer.

mod field;

pub use field::Field;

/// One normalized accident report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub date: Option<String>,
    pub time: Option<String>,
    pub aircraft_type: Option<String>,
    pub operator: Option<String>,
    pub registration: Option<String>,
    pub manufacturer_serial_number: Option<String>,
    pub year_of_manufacture: Option<String>,
    pub fatalities: Option<String>,
    pub other_fatalities: Option<String>,
    pub aircraft_damage: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub flight_phase: Option<String>,
    pub nature: Option<String>,
    pub departure_airport: Option<String>,
    pub destination_airport: Option<String>,
    pub confidence_rating: Option<String>,
    pub narrative: Option<String>,

    /// Canonical identity of the record
    pub source_url: String,
}

impl Record {
    /// Creates a record with every field absent except its source URL
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }

    /// Returns the value of a column, None when absent
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Date => self.date.as_deref(),
            Field::Time => self.time.as_deref(),
            Field::AircraftType => self.aircraft_type.as_deref(),
            Field::Operator => self.operator.as_deref(),
            Field::Registration => self.registration.as_deref(),
            Field::ManufacturerSerialNumber => self.manufacturer_serial_number.as_deref(),
            Field::YearOfManufacture => self.year_of_manufacture.as_deref(),
            Field::Fatalities => self.fatalities.as_deref(),
            Field::OtherFatalities => self.other_fatalities.as_deref(),
            Field::AircraftDamage => self.aircraft_damage.as_deref(),
            Field::Category => self.category.as_deref(),
            Field::Location => self.location.as_deref(),
            Field::FlightPhase => self.flight_phase.as_deref(),
            Field::Nature => self.nature.as_deref(),
            Field::DepartureAirport => self.departure_airport.as_deref(),
            Field::DestinationAirport => self.destination_airport.as_deref(),
            Field::ConfidenceRating => self.confidence_rating.as_deref(),
            Field::Narrative => self.narrative.as_deref(),
            Field::SourceUrl => Some(&self.source_url),
        }
    }

    /// Sets the value of a column
    ///
    /// Setting SourceURL to None leaves the current address in place.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::Date => &mut self.date,
            Field::Time => &mut self.time,
            Field::AircraftType => &mut self.aircraft_type,
            Field::Operator => &mut self.operator,
            Field::Registration => &mut self.registration,
            Field::ManufacturerSerialNumber => &mut self.manufacturer_serial_number,
            Field::YearOfManufacture => &mut self.year_of_manufacture,
            Field::Fatalities => &mut self.fatalities,
            Field::OtherFatalities => &mut self.other_fatalities,
            Field::AircraftDamage => &mut self.aircraft_damage,
            Field::Category => &mut self.category,
            Field::Location => &mut self.location,
            Field::FlightPhase => &mut self.flight_phase,
            Field::Nature => &mut self.nature,
            Field::DepartureAirport => &mut self.departure_airport,
            Field::DestinationAirport => &mut self.destination_airport,
            Field::ConfidenceRating => &mut self.confidence_rating,
            Field::Narrative => &mut self.narrative,
            Field::SourceUrl => {
                if let Some(url) = value {
                    self.source_url = url;
                }
                return;
            }
        };
        *slot = value;
    }

    /// Returns the row in store order; absent fields become empty cells
    pub fn to_row(&self) -> Vec<&str> {
        Field::ALL
            .iter()
            .map(|field| self.get(*field).unwrap_or(""))
            .collect()
    }

    /// Number of columns that carry a value, SourceURL included
    pub fn present_count(&self) -> usize {
        Field::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count()
    }
}
