use crate::error::{Result, ToolkitError};

/// A family of mutually convertible units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    Length,
    Mass,
    Temperature,
    Speed,
    Pressure,
    Energy,
    Power,
    Time,
    Digital,
}

/// Units per category with their size in the category's base unit.
const LENGTH: &[(&str, f64)] = &[
    ("mm", 0.001),
    ("cm", 0.01),
    ("m", 1.0),
    ("km", 1000.0),
    ("inch", 0.0254),
    ("ft", 0.3048),
    ("yard", 0.9144),
    ("mile", 1609.344),
];
const MASS: &[(&str, f64)] = &[
    ("g", 1.0),
    ("kg", 1000.0),
    ("mg", 0.001),
    ("ton", 1_000_000.0),
    ("lb", 453.592),
    ("oz", 28.3495),
];
const SPEED: &[(&str, f64)] = &[
    ("m/s", 1.0),
    ("km/h", 1000.0 / 3600.0),
    ("mph", 1609.344 / 3600.0),
    ("knot", 1852.0 / 3600.0),
];
const PRESSURE: &[(&str, f64)] = &[
    ("Pa", 1.0),
    ("kPa", 1000.0),
    ("bar", 100_000.0),
    ("atm", 101_325.0),
    ("psi", 6894.76),
    ("torr", 133.322),
];
const ENERGY: &[(&str, f64)] = &[
    ("J", 1.0),
    ("kJ", 1000.0),
    ("cal", 4.184),
    ("kcal", 4184.0),
    ("Wh", 3600.0),
    ("kWh", 3_600_000.0),
];
const POWER: &[(&str, f64)] = &[("W", 1.0), ("kW", 1000.0), ("hp", 745.7)];
const TIME: &[(&str, f64)] = &[
    ("s", 1.0),
    ("min", 60.0),
    ("h", 3600.0),
    ("day", 86_400.0),
    ("week", 604_800.0),
    ("month", 2_592_000.0),
    ("year", 31_536_000.0),
];
const DIGITAL: &[(&str, f64)] = &[
    ("bit", 0.125),
    ("B", 1.0),
    ("KB", 1024.0),
    ("MB", 1_048_576.0),
    ("GB", 1_073_741_824.0),
    ("TB", 1_099_511_627_776.0),
    ("PB", 1_125_899_906_842_624.0),
];
const TEMPERATURE_UNITS: &[&str] = &["C", "K", "F"];

impl UnitCategory {
    pub const ALL: [UnitCategory; 9] = [
        UnitCategory::Length,
        UnitCategory::Mass,
        UnitCategory::Temperature,
        UnitCategory::Speed,
        UnitCategory::Pressure,
        UnitCategory::Energy,
        UnitCategory::Power,
        UnitCategory::Time,
        UnitCategory::Digital,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        UnitCategory::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Mass => "Mass",
            UnitCategory::Temperature => "Temperature",
            UnitCategory::Speed => "Speed",
            UnitCategory::Pressure => "Pressure",
            UnitCategory::Energy => "Energy",
            UnitCategory::Power => "Power",
            UnitCategory::Time => "Time",
            UnitCategory::Digital => "Digital",
        }
    }

    fn factors(&self) -> &'static [(&'static str, f64)] {
        match self {
            UnitCategory::Length => LENGTH,
            UnitCategory::Mass => MASS,
            UnitCategory::Speed => SPEED,
            UnitCategory::Pressure => PRESSURE,
            UnitCategory::Energy => ENERGY,
            UnitCategory::Power => POWER,
            UnitCategory::Time => TIME,
            UnitCategory::Digital => DIGITAL,
            UnitCategory::Temperature => &[],
        }
    }

    pub fn units(&self) -> Vec<&'static str> {
        match self {
            UnitCategory::Temperature => TEMPERATURE_UNITS.to_vec(),
            _ => self.factors().iter().map(|(u, _)| *u).collect(),
        }
    }

    fn factor(&self, unit: &str) -> Result<f64> {
        self.factors()
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, f)| *f)
            .ok_or_else(|| self.unknown_unit(unit))
    }

    fn unknown_unit(&self, unit: &str) -> ToolkitError {
        ToolkitError::invalid(format!(
            "Unknown {} unit '{}' (expected one of: {})",
            self.name().to_lowercase(),
            unit,
            self.units().join(", ")
        ))
    }

    /// Converts `value` from one unit to another in this category.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        if *self == UnitCategory::Temperature {
            let celsius = match from {
                "C" => value,
                "K" => value - 273.15,
                "F" => (value - 32.0) * 5.0 / 9.0,
                other => return Err(self.unknown_unit(other)),
            };
            return match to {
                "C" => Ok(celsius),
                "K" => Ok(celsius + 273.15),
                "F" => Ok(celsius * 9.0 / 5.0 + 32.0),
                other => Err(self.unknown_unit(other)),
            };
        }

        let base = value * self.factor(from)?;
        Ok(base / self.factor(to)?)
    }
}

/// Parses the numeric text and converts it.
pub fn convert_text(category: UnitCategory, text: &str, from: &str, to: &str) -> Result<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ToolkitError::invalid(format!("Invalid value: '{}'", trimmed)))?;
    category.convert(value, from, to)
}
