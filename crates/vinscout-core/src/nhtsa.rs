//! NHTSA vPIC `DecodeVinValues` wire shape and its mapping into [`Vehicle`].
//!
//! The API answers HTTP 200 even for unresolvable VINs and signals problems
//! through an embedded `ErrorCode`: `"0"` is success, `"6"` is an accepted
//! correction, anything else is a genuine error. Codes may be comma-separated
//! (`"6,11"`) and the error text semicolon-separated.

use serde::Deserialize;

use crate::vehicle::Vehicle;

/// Top-level response. `Results` always holds one element in practice.
#[derive(Debug, Clone, Deserialize)]
pub struct DecodeResponse {
    #[serde(rename = "Results")]
    pub results: Vec<RawApiRecord>,

    /// e.g. `"VIN:1HGCM82633A004352"`
    #[serde(rename = "SearchCriteria", default)]
    pub search_criteria: Option<String>,
}

/// One flat result object. Every field is a string on the wire, even the
/// numeric ones; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawApiRecord {
    pub error_code: Option<String>,
    pub error_text: Option<String>,
    #[serde(rename = "VIN")]
    pub vin: Option<String>,

    pub model_year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub series: Option<String>,
    pub body_class: Option<String>,
    pub drive_type: Option<String>,
    pub doors: Option<String>,

    #[serde(rename = "EngineHP")]
    pub engine_hp: Option<String>,
    pub engine_configuration: Option<String>,
    pub engine_cylinders: Option<String>,
    pub displacement_l: Option<String>,
    pub engine_model: Option<String>,
    pub fuel_type_primary: Option<String>,
    pub valve_train_design: Option<String>,
    pub turbo: Option<String>,

    pub transmission_style: Option<String>,
    pub transmission_speeds: Option<String>,
}

/// Codes that do not make a record an error.
const ACCEPTED_CODES: [&str; 2] = ["0", "6"];

impl RawApiRecord {
    /// True when any error code other than `0` or `6` is present.
    pub fn has_error(&self) -> bool {
        has_error(self)
    }

    /// First non-empty `;`-separated segment of the error text.
    pub fn primary_error_text(&self) -> Option<String> {
        primary_error_text(self)
    }
}

/// True when the record signals a genuine error. An absent or empty
/// `ErrorCode` means no error.
pub fn has_error(record: &RawApiRecord) -> bool {
    let Some(code) = record.error_code.as_deref() else {
        return false;
    };
    code.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .any(|segment| !ACCEPTED_CODES.contains(&segment))
}

/// First segment of `ErrorText`, trimmed.
pub fn primary_error_text(record: &RawApiRecord) -> Option<String> {
    record
        .error_text
        .as_deref()?
        .split(';')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Map a raw record to a [`Vehicle`].
///
/// `vin` is the VIN the caller asked for, not the one the API echoes back.
pub fn to_vehicle(vin: &str, record: &RawApiRecord) -> Vehicle {
    Vehicle {
        vin: vin.to_uppercase(),
        year: non_empty(&record.model_year),
        make: non_empty(&record.make),
        model: non_empty(&record.model),
        trim: non_empty(&record.trim),
        series: non_empty(&record.series),
        body_class: non_empty(&record.body_class),
        drive_type: non_empty(&record.drive_type),
        doors: non_empty(&record.doors),
        engine_horsepower: non_empty(&record.engine_hp),
        engine_configuration: non_empty(&record.engine_configuration),
        engine_cylinders: non_empty(&record.engine_cylinders),
        engine_displacement_l: non_empty(&record.displacement_l),
        engine_model: non_empty(&record.engine_model),
        fuel_type: non_empty(&record.fuel_type_primary),
        valve_train_design: non_empty(&record.valve_train_design),
        is_turbocharged: record
            .turbo
            .as_deref()
            .is_some_and(|turbo| turbo.trim().eq_ignore_ascii_case("yes")),
        transmission_style: non_empty(&record.transmission_style),
        transmission_speeds: non_empty(&record.transmission_speeds),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
