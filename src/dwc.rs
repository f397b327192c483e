//! Darwin Core record expansion.
//!
//! Each snapshot row is expanded into a nested standardized observation
//! record carrying fixed institutional metadata and three synthesized
//! measurements (odour type, intensity, hedonic tone). Records are built
//! fresh per API call and never persisted. Field order is fixed by the
//! struct declarations so output is byte-deterministic for a given
//! snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::observations::SnapshotRow;

const INSTITUTION_ID: &str = "https://scienceforchange.eu";
const COLLECTION_ID: &str = "https://odourcollect.eu";
const INSTITUTION_CODE: &str = "SfC";
const COLLECTION_CODE: &str = "Odours";
const ORIGIN: &str = "OdourCollect";
const DATASET_NAME: &str = "OdourCollect observations";
const BASIS_OF_RECORD: &str = "HumanObservation";
const RECORD_TYPE: &str = "Event";
const ACCESS_RIGHTS: &str = "https://opendatacommons.org/licenses/odbl/1-0/";
const LICENSE: &str = "ODbL v1.0";
const RIGHTS_HOLDER: &str = "Science for Change, S.L.";
const INFORMATION_WITHHELD: &str =
    "Duration and comments are not shared. Visit https://odourcollect.eu for such details";

const MEASUREMENT_TYPE: &str = "odour";
const DETERMINED_BY: &str = "OdourCollect user community";
const UNIT_ODOUR_TYPE: &str = "Odour type";
const UNIT_INTENSITY: &str = "VDI 3882-1:1992 (odour intensity)";
const UNIT_HEDONIC_TONE: &str = "VDI 3882-2:1994 (odour hedonic tone)";

/// Display label prefixed to the raw user key at serve time.
const USER_LABEL: &str = "OdourCollect user #";

/// One decoded odour attribute as a standalone measurementOrFact record.
/// `measurement_id` is shared with the parent observation.
#[derive(Debug, Clone, Serialize)]
pub struct DwcMeasurement {
    #[serde(rename = "measurementID")]
    pub measurement_id: i64,
    #[serde(rename = "measurementType")]
    pub measurement_type: &'static str,
    #[serde(rename = "measurementUnit")]
    pub measurement_unit: &'static str,
    #[serde(rename = "measurementDeterminedDate")]
    pub measurement_determined_date: String,
    #[serde(rename = "measurementDeterminedBy")]
    pub measurement_determined_by: &'static str,
    #[serde(rename = "measurementValue")]
    pub measurement_value: String,
}

impl DwcMeasurement {
    fn new(id: i64, unit: &'static str, determined_date: &str, value: &str) -> Self {
        Self {
            measurement_id: id,
            measurement_type: MEASUREMENT_TYPE,
            measurement_unit: unit,
            measurement_determined_date: determined_date.to_string(),
            measurement_determined_by: DETERMINED_BY,
            measurement_value: value.to_string(),
        }
    }
}

/// A standardized observation record in the Darwin Core event shape.
#[derive(Debug, Clone, Serialize)]
pub struct DwcObservation {
    pub id: i64,
    #[serde(rename = "eventDate")]
    pub event_date: String,
    pub created_at: String,
    #[serde(rename = "observedOn")]
    pub observed_on: String,
    #[serde(rename = "institutionID")]
    pub institution_id: &'static str,
    #[serde(rename = "collectionID")]
    pub collection_id: &'static str,
    #[serde(rename = "institutionCode")]
    pub institution_code: &'static str,
    #[serde(rename = "collectionCode")]
    pub collection_code: &'static str,
    pub origin: &'static str,
    #[serde(rename = "datasetName")]
    pub dataset_name: &'static str,
    #[serde(rename = "ownerInstitutionCode")]
    pub owner_institution_code: String,
    #[serde(rename = "basisOfRecord")]
    pub basis_of_record: &'static str,
    #[serde(rename = "type")]
    pub record_type: &'static str,
    #[serde(rename = "accessRights")]
    pub access_rights: &'static str,
    pub license: &'static str,
    #[serde(rename = "rightsHolder")]
    pub rights_holder: &'static str,
    #[serde(rename = "informationWithheld")]
    pub information_withheld: &'static str,
    #[serde(rename = "decimalLatitude")]
    pub decimal_latitude: f64,
    #[serde(rename = "decimalLongitude")]
    pub decimal_longitude: f64,
    pub measurements: Vec<DwcMeasurement>,
}

impl DwcObservation {
    /// Expand a snapshot row into a standardized record.
    ///
    /// The decoded type/intensity/tone strings are used verbatim; the
    /// server trusts the fetcher's prior decoding and never re-decodes
    /// numeric codes.
    pub fn from_row(row: &SnapshotRow) -> Result<Self, chrono::ParseError> {
        let published_at: DateTime<Utc> = row.published_at.parse()?;
        // Observations are UTC; second precision with a zeroed
        // millisecond suffix, as published upstream
        let event_date = published_at.format("%Y-%m-%dT%H:%M:%S.000Z").to_string();

        let measurements = vec![
            DwcMeasurement::new(row.id, UNIT_ODOUR_TYPE, &event_date, &row.odour_type),
            DwcMeasurement::new(row.id, UNIT_INTENSITY, &event_date, &row.intensity),
            DwcMeasurement::new(row.id, UNIT_HEDONIC_TONE, &event_date, &row.hedonic_tone),
        ];

        Ok(Self {
            id: row.id,
            event_date: event_date.clone(),
            created_at: event_date.clone(),
            observed_on: event_date,
            institution_id: INSTITUTION_ID,
            collection_id: COLLECTION_ID,
            institution_code: INSTITUTION_CODE,
            collection_code: COLLECTION_CODE,
            origin: ORIGIN,
            dataset_name: DATASET_NAME,
            owner_institution_code: format!("{}{}", USER_LABEL, row.user),
            basis_of_record: BASIS_OF_RECORD,
            record_type: RECORD_TYPE,
            access_rights: ACCESS_RIGHTS,
            license: LICENSE,
            rights_holder: RIGHTS_HOLDER,
            information_withheld: INFORMATION_WITHHELD,
            decimal_latitude: row.latitude,
            decimal_longitude: row.longitude,
            measurements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> SnapshotRow {
        SnapshotRow {
            id: 42,
            user: "7".to_string(),
            published_at: "2022-04-24T13:43:43.893254Z".to_string(),
            category: String::new(),
            odour_type: "Rotten eggs".to_string(),
            hedonic_tone: "Neutral".to_string(),
            intensity: "Weak".to_string(),
            latitude: 41.5,
            longitude: 2.2,
        }
    }

    #[test]
    fn test_expansion_measurements() {
        let record = DwcObservation::from_row(&sample_row()).unwrap();

        assert_eq!(record.id, 42);
        assert_eq!(record.measurements.len(), 3);
        let values: Vec<&str> = record
            .measurements
            .iter()
            .map(|m| m.measurement_value.as_str())
            .collect();
        assert_eq!(values, ["Rotten eggs", "Weak", "Neutral"]);
        assert!(record.measurements.iter().all(|m| m.measurement_id == 42));
    }

    #[test]
    fn test_timestamps_use_zeroed_millisecond_suffix() {
        let record = DwcObservation::from_row(&sample_row()).unwrap();
        assert_eq!(record.event_date, "2022-04-24T13:43:43.000Z");
        assert_eq!(record.created_at, record.event_date);
        assert_eq!(record.observed_on, record.event_date);
        for measurement in &record.measurements {
            assert_eq!(measurement.measurement_determined_date, record.event_date);
        }
    }

    #[test]
    fn test_user_display_label() {
        let record = DwcObservation::from_row(&sample_row()).unwrap();
        assert_eq!(record.owner_institution_code, "OdourCollect user #7");
    }

    #[test]
    fn test_json_field_order_is_deterministic() {
        let record = DwcObservation::from_row(&sample_row()).unwrap();
        let first = serde_json::to_string(&record).unwrap();
        let second = serde_json::to_string(&record).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(r#"{"id":42,"eventDate":"2022-04-24T13:43:43.000Z""#));
        assert!(first.contains(r#""institutionCode":"SfC""#));
        assert!(first.contains(r#""license":"ODbL v1.0""#));
        assert!(first.contains(r#""measurementUnit":"VDI 3882-1:1992 (odour intensity)""#));
    }

    #[test]
    fn test_unparseable_timestamp_is_an_error() {
        let mut row = sample_row();
        row.published_at = "not a timestamp".to_string();
        assert!(DwcObservation::from_row(&row).is_err());
    }
}
