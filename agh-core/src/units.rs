use serde::{Deserialize, Serialize};

/// Fahrenheit degrees per Celsius degree. Also the unit factor applied to a
/// Celsius bias correction before subtracting it from Fahrenheit values.
pub const CELSIUS_TO_FAHRENHEIT_SCALE: f64 = 1.8;

/// Offset between the Celsius and Fahrenheit zero points.
pub const FAHRENHEIT_OFFSET: f64 = 32.0;

/// Inches per millimeter.
pub const MILLIMETER_TO_INCH: f64 = 0.0393701;

/// The physical quantity a series measures. Source files store metric
/// values; every consumer works in imperial units.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Measurement {
    /// Degrees Celsius in storage, Fahrenheit after conversion
    Temperature,
    /// Millimeters in storage, inches after conversion
    Precipitation,
}

impl Measurement {
    /// Convert a stored metric value to imperial.
    pub fn to_imperial(&self, value: f64) -> f64 {
        match self {
            Measurement::Temperature => value * CELSIUS_TO_FAHRENHEIT_SCALE + FAHRENHEIT_OFFSET,
            Measurement::Precipitation => value * MILLIMETER_TO_INCH,
        }
    }

    pub fn imperial_unit(&self) -> &'static str {
        match self {
            Measurement::Temperature => "°F",
            Measurement::Precipitation => "in",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Measurement;

    #[test]
    fn test_temperature_conversion() {
        let t = Measurement::Temperature;
        assert!((t.to_imperial(0.0) - 32.0).abs() < 1e-9);
        assert!((t.to_imperial(100.0) - 212.0).abs() < 1e-9);
        assert!((t.to_imperial(-40.0) - (-40.0)).abs() < 1e-9);
        assert_eq!(t.imperial_unit(), "°F");
    }

    #[test]
    fn test_precipitation_conversion() {
        let p = Measurement::Precipitation;
        assert!((p.to_imperial(25.4) - 1.0).abs() < 1e-4);
        assert_eq!(p.imperial_unit(), "in");
    }
}
