//! The canonical decoded-vehicle record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A vehicle decoded from a VIN.
///
/// Optional fields are either absent or hold a non-empty, trimmed string;
/// the mapper never produces `Some("")`. `vin` is always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    pub vin: String,

    // Year / make / model / trim
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub trim: Option<String>,
    #[serde(default)]
    pub series: Option<String>,

    // Body & drive
    #[serde(default)]
    pub body_class: Option<String>,
    #[serde(default)]
    pub drive_type: Option<String>,
    #[serde(default)]
    pub doors: Option<String>,

    // Engine
    #[serde(default)]
    pub engine_horsepower: Option<String>,
    #[serde(default)]
    pub engine_configuration: Option<String>,
    #[serde(default)]
    pub engine_cylinders: Option<String>,
    #[serde(default)]
    pub engine_displacement_l: Option<String>,
    #[serde(default)]
    pub engine_model: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub valve_train_design: Option<String>,
    #[serde(default)]
    pub is_turbocharged: bool,

    // Transmission
    #[serde(default)]
    pub transmission_style: Option<String>,
    #[serde(default)]
    pub transmission_speeds: Option<String>,
}

impl Vehicle {
    /// A vehicle with only its VIN set. The VIN is uppercased.
    pub fn new(vin: impl AsRef<str>) -> Self {
        Self {
            vin: vin.as_ref().to_uppercase(),
            year: None,
            make: None,
            model: None,
            trim: None,
            series: None,
            body_class: None,
            drive_type: None,
            doors: None,
            engine_horsepower: None,
            engine_configuration: None,
            engine_cylinders: None,
            engine_displacement_l: None,
            engine_model: None,
            fuel_type: None,
            valve_train_design: None,
            is_turbocharged: false,
            transmission_style: None,
            transmission_speeds: None,
        }
    }

    /// True if both records describe the same VIN, ignoring case.
    pub fn same_vin(&self, other: &Vehicle) -> bool {
        self.vin.eq_ignore_ascii_case(&other.vin)
    }

    /// One-line listing form: `2022 TESLA Model 3 — 5YJ3E1EA7NF306255`.
    pub fn summary_line(&self) -> String {
        format!(
            "{} {} {} — {}",
            self.year.as_deref().unwrap_or("????"),
            self.make.as_deref().unwrap_or("Unknown"),
            self.model.as_deref().unwrap_or("Unknown"),
            self.vin
        )
    }
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: Option<&str>) -> fmt::Result {
    match value {
        Some(value) => writeln!(f, "  {:<16}: {}", label, value),
        None => Ok(()),
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "── Vehicle ──────────────────")?;
        writeln!(f, "  {:<16}: {}", "VIN", self.vin)?;
        row(f, "Year", self.year.as_deref())?;
        row(f, "Make", self.make.as_deref())?;
        row(f, "Model", self.model.as_deref())?;
        row(f, "Trim", self.trim.as_deref())?;
        row(f, "Series", self.series.as_deref())?;

        writeln!(f, "  ── Body & Drive ─────────────")?;
        row(f, "Body Class", self.body_class.as_deref())?;
        row(f, "Drive Type", self.drive_type.as_deref())?;
        row(f, "Doors", self.doors.as_deref())?;

        writeln!(f, "  ── Engine ───────────────────")?;
        let horsepower = self.engine_horsepower.as_ref().map(|hp| format!("{hp} hp"));
        row(f, "Horsepower", horsepower.as_deref())?;
        row(f, "Configuration", self.engine_configuration.as_deref())?;
        row(f, "Cylinders", self.engine_cylinders.as_deref())?;
        let displacement = self.engine_displacement_l.as_ref().map(|l| format!("{l}L"));
        row(f, "Displacement", displacement.as_deref())?;
        row(f, "Engine Model", self.engine_model.as_deref())?;
        row(f, "Valve Train", self.valve_train_design.as_deref())?;
        if self.is_turbocharged {
            row(f, "Turbo", Some("Yes"))?;
        }
        row(f, "Fuel Type", self.fuel_type.as_deref())?;
        row(f, "Transmission", self.transmission_style.as_deref())?;
        row(f, "Speeds", self.transmission_speeds.as_deref())?;

        write!(f, "─────────────────────────────")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases_vin() {
        let vehicle = Vehicle::new("1hgcm82633a004352");
        assert_eq!(vehicle.vin, "1HGCM82633A004352");
        assert!(!vehicle.is_turbocharged);
        assert!(vehicle.make.is_none());
    }

    #[test]
    fn test_same_vin_ignores_case() {
        let a = Vehicle::new("1HGCM82633A004352");
        let mut b = Vehicle::new("1HGCM82633A004352");
        b.vin = "1hgcm82633a004352".to_string();
        assert!(a.same_vin(&b));
        assert!(!a.same_vin(&Vehicle::new("1M8GDM9AXKP042788")));
    }

    #[test]
    fn test_equality_covers_every_field() {
        let a = Vehicle::new("1HGCM82633A004352");
        let b = Vehicle {
            is_turbocharged: true,
            ..a.clone()
        };
        assert_ne!(a, b);
    }

    #[test]
    fn test_summary_line_placeholders() {
        let vehicle = Vehicle {
            make: Some("HONDA".to_string()),
            ..Vehicle::new("1HGCM82633A004352")
        };
        assert_eq!(vehicle.summary_line(), "???? HONDA Unknown — 1HGCM82633A004352");
    }

    #[test]
    fn test_display_skips_absent_fields() {
        let vehicle = Vehicle {
            year: Some("2003".to_string()),
            engine_horsepower: Some("240".to_string()),
            engine_displacement_l: Some("3.0".to_string()),
            ..Vehicle::new("1HGCM82633A004352")
        };
        let text = vehicle.to_string();
        assert!(text.contains("Year            : 2003"));
        assert!(text.contains("240 hp"));
        assert!(text.contains("3.0L"));
        assert!(!text.contains("Make"));
        assert!(!text.contains("Turbo"));
    }

    #[test]
    fn test_deserialize_tolerates_missing_optionals() {
        let vehicle: Vehicle = serde_json::from_str(r#"{"vin":"1HGCM82633A004352"}"#).unwrap();
        assert_eq!(vehicle, Vehicle::new("1HGCM82633A004352"));
    }
}
