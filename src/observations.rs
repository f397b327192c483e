//! Observation data model: raw upstream rows, decoded snapshot rows, and
//! the shared validation types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DecodeError, RangeError, RangeOrderError};
use crate::taxonomy;

/// One observation as received from the upstream OdourCollect API.
/// All odour attributes arrive as small integer codes into the static
/// taxonomy tables.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservation {
    pub id: i64,
    pub id_user: i64,
    pub id_odor_type: u8,
    pub id_odor_annoy: u8,
    pub id_odor_intensity: u8,
    #[serde(default)]
    pub id_odor_duration: u8,
    pub published_at: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One decoded observation in the snapshot's canonical column order.
///
/// `category` is derived during decoding but not persisted; the snapshot
/// keeps only the specific type, and the server never re-derives it.
/// `user` is the stringified upstream user id so that downstream consumers
/// treat it as categorical, not numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub id: i64,
    pub user: String,
    pub published_at: String,
    #[serde(skip, default)]
    pub category: String,
    #[serde(rename = "type")]
    pub odour_type: String,
    pub hedonic_tone: String,
    pub intensity: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Decode a raw observation into a snapshot row.
///
/// Fails on any categorical code outside its taxonomy table, on
/// out-of-range coordinates, and on an unparseable timestamp, so a row
/// the server could not expand is never committed. The observation id is
/// carried over verbatim as the join key between the raw and decoded
/// forms.
pub fn decode(raw: &RawObservation) -> Result<SnapshotRow, DecodeError> {
    let coords = GpsCoords::new(raw.latitude, raw.longitude)?;
    // Validate only; the timestamp string is persisted verbatim
    raw.published_at.parse::<DateTime<Utc>>()?;
    let (category, odour_type) = taxonomy::odour_type(raw.id_odor_type)?;
    let (_, tone_description) = taxonomy::hedonic_tone(raw.id_odor_annoy)?;
    let (_, intensity_description) = taxonomy::intensity(raw.id_odor_intensity)?;

    Ok(SnapshotRow {
        id: raw.id,
        user: raw.id_user.to_string(),
        published_at: raw.published_at.clone(),
        category: category.to_string(),
        odour_type: odour_type.to_string(),
        hedonic_tone: tone_description.to_string(),
        intensity: intensity_description.to_string(),
        latitude: coords.latitude(),
        longitude: coords.longitude(),
    })
}

/// A validated GPS coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsCoords {
    latitude: f64,
    longitude: f64,
}

impl GpsCoords {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, RangeError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(RangeError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(RangeError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Validation failure of a [`ListRequest`].
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Order(#[from] RangeOrderError),
}

/// Optional upstream filters, as plain values. Validated into a
/// [`ListRequest`] before anything is sent upstream.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub category: Option<i64>,
    pub subtype: Option<i64>,
    pub min_annoy: Option<i64>,
    pub max_annoy: Option<i64>,
    pub min_intensity: Option<i64>,
    pub max_intensity: Option<i64>,
    pub date_init: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

/// Upstream list-request filter. Every field is independently optional;
/// the default request carries no filters and asks for the full list.
///
/// Fields are private: the only constructors are [`ListRequest::all`] and
/// the validating [`ListRequest::new`], so every value of this type
/// satisfies the bounds and ordering invariants.
///
/// Serialized field names follow the upstream request schema: `type` is
/// the odour category (0 = all), `subtype` the specific odour type
/// (0 = all).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtype: Option<i64>,
    #[serde(rename = "minAnnoy", skip_serializing_if = "Option::is_none")]
    min_annoy: Option<i64>,
    #[serde(rename = "maxAnnoy", skip_serializing_if = "Option::is_none")]
    max_annoy: Option<i64>,
    #[serde(rename = "minIntensity", skip_serializing_if = "Option::is_none")]
    min_intensity: Option<i64>,
    #[serde(rename = "maxIntensity", skip_serializing_if = "Option::is_none")]
    max_intensity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_init: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_end: Option<NaiveDate>,
}

impl ListRequest {
    /// The unfiltered request used by the default fetch path.
    pub fn all() -> Self {
        Self::default()
    }

    /// Validate field bounds and cross-field ordering, producing a
    /// request that is safe to send upstream.
    pub fn new(filters: ListFilters) -> Result<Self, FilterError> {
        Self::check_bounds("type", filters.category, 0, 9)?;
        Self::check_bounds("subtype", filters.subtype, 0, 89)?;
        Self::check_bounds("minAnnoy", filters.min_annoy, -4, 4)?;
        Self::check_bounds("maxAnnoy", filters.max_annoy, -4, 4)?;
        Self::check_bounds("minIntensity", filters.min_intensity, 0, 6)?;
        Self::check_bounds("maxIntensity", filters.max_intensity, 0, 6)?;

        if let (Some(min), Some(max)) = (filters.min_annoy, filters.max_annoy)
            && min > max
        {
            return Err(RangeOrderError { field: "annoy" }.into());
        }
        if let (Some(min), Some(max)) = (filters.min_intensity, filters.max_intensity)
            && min > max
        {
            return Err(RangeOrderError { field: "intensity" }.into());
        }
        if let (Some(start), Some(end)) = (filters.date_init, filters.date_end)
            && start > end
        {
            return Err(RangeOrderError { field: "date" }.into());
        }

        Ok(Self {
            category: filters.category,
            subtype: filters.subtype,
            min_annoy: filters.min_annoy,
            max_annoy: filters.max_annoy,
            min_intensity: filters.min_intensity,
            max_intensity: filters.max_intensity,
            date_init: filters.date_init,
            date_end: filters.date_end,
        })
    }

    fn check_bounds(
        field: &'static str,
        value: Option<i64>,
        min: i64,
        max: i64,
    ) -> Result<(), RangeError> {
        if let Some(v) = value
            && !(min..=max).contains(&v)
        {
            return Err(RangeError::Bound { field, value: v, min, max });
        }
        Ok(())
    }
}
