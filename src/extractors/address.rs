// src/extractors/address.rs

// --- Imports ---
use crate::extractors::patterns;
use crate::utils::error::ExtractError;
use serde::Serialize;

// --- Constants ---
const SEGMENT_SEPARATOR: &str = ", ";
// Only US addresses carry a district (state) between city and country.
const DISTRICT_COUNTRY: &str = "USA";

// --- Data Structures ---

/// How the address was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPath {
    /// The whole booktitle followed the `SHORT 'YY: name, address, dates, year` template.
    StructuredPrefix,
    /// Segment-by-segment classification.
    SegmentClassifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedAddress {
    pub address: String,   // e.g. "Palo Alto, CA, USA"
    pub booktitle: String, // Booktitle with the address segments removed
    pub path: MatchPath,
}

impl ExtractedAddress {
    /// Splits into `(address, cleaned_booktitle)`.
    pub fn into_pair(self) -> (String, String) {
        (self.address, self.booktitle)
    }
}

/// Role assigned to one comma-separated booktitle segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    ConferenceNamePart,
    ShortNameYear,
    DateRange,
    Year,
    City,
    District,
    Country,
}

impl SegmentRole {
    /// Whether the segment stays in the cleaned booktitle.
    pub fn is_kept_in_title(self) -> bool {
        matches!(
            self,
            SegmentRole::ConferenceNamePart
                | SegmentRole::ShortNameYear
                | SegmentRole::DateRange
                | SegmentRole::Year
        )
    }
}

// --- Segment Classifier ---

/// Left-to-right state machine over booktitle segments.
///
/// Until a `ShortName Year` segment is seen everything belongs to the
/// conference name. After it, dates and years stay in the title, the first
/// two other segments become city and country, and a later literal "USA"
/// turns the current country into a district.
#[derive(Debug, Default)]
pub struct SegmentClassifier<'a> {
    short_name: Option<&'a str>,
    city: Option<&'a str>,
    district: Option<&'a str>,
    country: Option<&'a str>,
    roles: Vec<(&'a str, SegmentRole)>,
}

impl<'a> SegmentClassifier<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies the next segment and records its role.
    pub fn classify(&mut self, segment: &'a str) -> SegmentRole {
        let role = self.next_role(segment);
        self.roles.push((segment, role));
        role
    }

    /// Segments classified so far, with roles as they stand now. A country
    /// may later be rewritten to a district.
    pub fn roles(&self) -> &[(&'a str, SegmentRole)] {
        &self.roles
    }

    fn next_role(&mut self, segment: &'a str) -> SegmentRole {
        if self.short_name.is_none() {
            if patterns::is_conference_year_short_name(segment) {
                tracing::debug!("{} is the conference short name", segment);
                self.short_name = Some(segment);
                return SegmentRole::ShortNameYear;
            }
            return SegmentRole::ConferenceNamePart;
        }

        if patterns::starts_with_date_range(segment) {
            tracing::debug!("{} is month and day", segment);
            SegmentRole::DateRange
        } else if patterns::starts_with_year(segment) {
            tracing::debug!("{} is a year", segment);
            SegmentRole::Year
        } else if self.city.is_none() {
            tracing::debug!("{} is a city", segment);
            self.city = Some(segment);
            SegmentRole::City
        } else if self.country.is_none() {
            tracing::debug!("{} is a country", segment);
            self.country = Some(segment);
            SegmentRole::Country
        } else if segment == DISTRICT_COUNTRY {
            tracing::debug!("{} is a country, and {:?} was district", segment, self.country);
            self.district = self.country.replace(segment);
            if let Some(previous) = self
                .roles
                .iter_mut()
                .rev()
                .find(|(_, role)| *role == SegmentRole::Country)
            {
                previous.1 = SegmentRole::District;
            }
            SegmentRole::Country
        } else {
            tracing::debug!("{} stays in the booktitle", segment);
            SegmentRole::ConferenceNamePart
        }
    }

    /// Assembles the address and the cleaned booktitle once every segment
    /// has been classified. `booktitle` is only used for diagnostics.
    pub fn finish(self, booktitle: &str) -> Result<ExtractedAddress, ExtractError> {
        if self.short_name.is_none() {
            tracing::warn!("Unable to parse {}", booktitle);
            return Err(ExtractError::NoShortNameMarker(booktitle.to_string()));
        }

        let (city, country) = match (self.city, self.country) {
            (Some(city), Some(country)) => (city, country),
            _ => {
                tracing::warn!("Unable to parse {}", booktitle);
                return Err(ExtractError::IncompleteAddress(booktitle.to_string()));
            }
        };

        let mut parts = vec![city];
        if let Some(district) = self.district {
            parts.push(district);
        }
        parts.push(country);
        let address = parts.join(SEGMENT_SEPARATOR);

        if patterns::starts_with_date_range(&address) {
            tracing::warn!("Unable to parse {}", booktitle);
            return Err(ExtractError::DegenerateAddress(booktitle.to_string()));
        }

        let cleaned = self
            .roles
            .iter()
            .filter(|(_, role)| role.is_kept_in_title())
            .map(|(segment, _)| *segment)
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR);

        tracing::info!("Address detected {}", address);
        Ok(ExtractedAddress {
            address,
            booktitle: cleaned,
            path: MatchPath::SegmentClassifier,
        })
    }
}

// --- Extraction ---

/// Infers the venue address from a booktitle and returns it together with
/// the booktitle stripped of that address.
pub fn extract_address_from_booktitle(booktitle: &str) -> Result<ExtractedAddress, ExtractError> {
    if let Some(address) = patterns::match_structured_prefix(booktitle) {
        tracing::debug!("{} follows the structured template", booktitle);
        // Single removal: the address text may recur elsewhere in the title.
        let cleaned = booktitle.replacen(&format!("{}{}", address, SEGMENT_SEPARATOR), "", 1);
        tracing::info!("Address detected {}", address);
        return Ok(ExtractedAddress {
            address: address.to_string(),
            booktitle: cleaned,
            path: MatchPath::StructuredPrefix,
        });
    }

    let mut classifier = SegmentClassifier::new();
    for segment in booktitle.split(SEGMENT_SEPARATOR) {
        classifier.classify(segment);
    }
    classifier.finish(booktitle)
}
