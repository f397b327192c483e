//! Static OdourCollect taxonomy tables and code decoding.
//!
//! The upstream API reports odour attributes as small integer codes. The
//! tables below are the fixed, versioned taxonomy those codes index into.
//! Any taxonomy change upstream requires updating these tables in lockstep
//! with the fetcher and server.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::errors::DecodeError;

/// Odour type code -> "Category|Type". The high-level category and the
/// specific type share one table, joined by a single `|` separator.
static TYPES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "Waste|Fresh waste"),
        (2, "Waste|Decomposed waste"),
        (3, "Waste|Leachate"),
        (4, "Waste|Biogas"),
        (5, "Waste|Biofilter"),
        (6, "Waste|Ammonia"),
        (7, "Waste|Amines"),
        (8, "Waste|Other"),
        (9, "Waste|I don't know"),
        (10, "Waste Water|Waste water"),
        (11, "Waste Water|Rotten eggs"),
        (12, "Waste Water|Sludge"),
        (13, "Waste Water|Chlorine"),
        (14, "Waste Water|Other"),
        (15, "Waste Water|I don't know"),
        (16, "Agriculture / Livestock|Dead animal"),
        (17, "Agriculture / Livestock|Cooked meat"),
        (18, "Agriculture / Livestock|Organic fertilizers (manure/slurry)"),
        (19, "Agriculture / Livestock|Animal feed"),
        (20, "Agriculture / Livestock|Cabbage soup"),
        (21, "Agriculture / Livestock|Rotten eggs"),
        (22, "Agriculture / Livestock|Ammonia"),
        (23, "Agriculture / Livestock|Amines"),
        (24, "Agriculture / Livestock|Other"),
        (25, "Agriculture / Livestock|I don't know"),
        (26, "Food Industries|Fat / Oil"),
        (27, "Food Industries|Coffee"),
        (28, "Food Industries|Cocoa"),
        (29, "Food Industries|Milk / Dairy"),
        (30, "Food Industries|Animal food"),
        (31, "Food Industries|Ammonia"),
        (32, "Food Industries|Malt / Hop"),
        (33, "Food Industries|Fish"),
        (34, "Food Industries|Bakeries"),
        (35, "Food Industries|Raw meat"),
        (36, "Food Industries|Ammines"),
        (37, "Food Industries|Cabbage soup"),
        (38, "Food Industries|Rotten eggs"),
        (39, "Food Industries|Bread / Cookies"),
        (40, "Food Industries|Alcohol"),
        (41, "Food Industries|Aroma / Flavour"),
        (42, "Food Industries|Other"),
        (43, "Food Industries|I don't know"),
        (44, "Industrial|Cabbage soup"),
        (45, "Industrial|Oil / Petrochemical"),
        (46, "Industrial|Gas"),
        (47, "Industrial|Asphalt / Rubber"),
        (48, "Industrial|Chemical"),
        (49, "Industrial|Ammonia"),
        (50, "Industrial|Leather"),
        (51, "Industrial|Metal"),
        (52, "Industrial|Plastic"),
        (53, "Industrial|Sulphur"),
        (54, "Industrial|Alcohol"),
        (55, "Industrial|Ketone / Ester / Acetate / Ether"),
        (56, "Industrial|Amines"),
        (57, "Industrial|Glue / Adhesive"),
        (58, "Urban|Urine"),
        (59, "Urban|Traffic"),
        (60, "Urban|Sewage"),
        (61, "Urban|Waste bin"),
        (62, "Urban|Waste truck"),
        (63, "Urban|Sweat"),
        (64, "Urban|Cannabis"),
        (65, "Urban|Fresh grass"),
        (66, "Urban|Humidity / Wet soil"),
        (67, "Urban|Flowers"),
        (68, "Urban|Food"),
        (69, "Urban|Chimney (burnt wood)"),
        (70, "Urban|Paint"),
        (71, "Urban|Fuel"),
        (72, "Urban|Other"),
        (73, "Urban|I don't know"),
        (74, "Nice|Flowers"),
        (75, "Nice|Food"),
        (76, "Nice|Bread / Cookies"),
        (77, "Nice|Fruit"),
        (78, "Nice|Fresh grass"),
        (79, "Nice|Forest / Trees / Nature"),
        (80, "Nice|Mint / Rosemary / Lavander"),
        (81, "Nice|Sea"),
        (82, "Nice|Perfume"),
        (83, "Nice|Chimney (burnt wood)"),
        (84, "Nice|Wood"),
        (85, "Nice|New book"),
        (86, "Nice|Other"),
        (87, "Nice|I don't know"),
        (88, "No Odour|No Odour"),
        (89, "Other|NA"),
    ])
});

/// Category code -> long-form category description.
static CATEGORIES: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "Waste related odours"),
        (2, "Waste water related odours"),
        (3, "Agriculture and livestock related odours"),
        (4, "Food Industries related odours"),
        (5, "Industry related odours"),
        (6, "Urban odours"),
        (7, "Nice odours"),
        (8, "Other odours not fitting elsewhere"),
        (9, "No odour observations (for testing, for reporting the end of an odour, etc.)"),
    ])
});

/// Hedonic tone (annoy) code -> signed pleasantness value and description.
/// Codes 1..=9 map onto -4..=4; 0 is neutral.
static HEDONIC_TONES: Lazy<HashMap<u8, (i8, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        (1, (-4, "Extremely unpleasant")),
        (2, (-3, "Very unpleasant")),
        (3, (-2, "Unpleasant")),
        (4, (-1, "Slightly unpleasant")),
        (5, (0, "Neutral")),
        (6, (1, "Slightly pleasant")),
        (7, (2, "Pleasant")),
        (8, (3, "Very pleasant")),
        (9, (4, "Extremely pleasant")),
    ])
});

/// Intensity code -> VDI 3882-1 scale value (0..=6) and description.
static INTENSITIES: Lazy<HashMap<u8, (u8, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        (1, (0, "Not perceptible")),
        (2, (1, "Very weak")),
        (3, (2, "Weak")),
        (4, (3, "Noticeable")),
        (5, (4, "Strong")),
        (6, (5, "Very strong")),
        (7, (6, "Extremely strong")),
    ])
});

/// Duration code -> description. Code 0 marks no-odour observations.
static DURATIONS: Lazy<HashMap<u8, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0, "(No odour)"),
        (1, "Punctual"),
        (2, "Continuous in the last hour"),
        (3, "Continuous throughout the day"),
    ])
});

/// Decode an odour type code into its `(category, type)` pair.
///
/// A code outside the table is an error: the taxonomy is closed, so an
/// unmatched code means either corrupt upstream data or a taxonomy bump
/// this build does not know about. Either way the fetch must not commit
/// a snapshot containing it.
pub fn odour_type(code: u8) -> Result<(&'static str, &'static str), DecodeError> {
    let joined = TYPES.get(&code).ok_or(DecodeError::UnknownCode {
        table: "odour type",
        code: code as i64,
    })?;
    // Single '|' separator between category and type, fixed by the table
    let (category, odour_type) = joined
        .split_once('|')
        .expect("taxonomy table entries always contain a separator");
    Ok((category, odour_type))
}

/// Decode a hedonic tone (annoy) code into `(signed value, description)`.
pub fn hedonic_tone(code: u8) -> Result<(i8, &'static str), DecodeError> {
    HEDONIC_TONES
        .get(&code)
        .copied()
        .ok_or(DecodeError::UnknownCode {
            table: "hedonic tone",
            code: code as i64,
        })
}

/// Decode an intensity code into `(scale value, description)`.
pub fn intensity(code: u8) -> Result<(u8, &'static str), DecodeError> {
    INTENSITIES
        .get(&code)
        .copied()
        .ok_or(DecodeError::UnknownCode {
            table: "intensity",
            code: code as i64,
        })
}

/// Decode a duration code into its description.
pub fn duration(code: u8) -> Result<&'static str, DecodeError> {
    DURATIONS.get(&code).copied().ok_or(DecodeError::UnknownCode {
        table: "duration",
        code: code as i64,
    })
}

/// Decode a category code into its long-form description.
pub fn category(code: u8) -> Result<&'static str, DecodeError> {
    CATEGORIES
        .get(&code)
        .copied()
        .ok_or(DecodeError::UnknownCode {
            table: "category",
            code: code as i64,
        })
}
