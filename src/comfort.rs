//! Derived "feels like" metrics and comfort classification.
//!
//! Formulas are the standard NWS regressions; coefficients must not be
//! altered, downstream consumers compare against published tables.

use serde::Serialize;

use crate::units::celsius_to_fahrenheit;

/// Calculate the heat index ("feels like" temperature in the heat).
///
/// Two-tier NWS formula:
/// - below 80 °F the heat index is not meaningful and the input
///   temperature is returned unchanged;
/// - otherwise the simplified Steadman average is computed, and if it
///   exceeds 80 the full Rothfusz regression replaces it.
///
/// The result above the 80 °F gate is rounded to the nearest integer.
///
/// `temperature_f`: air temperature in °F.
/// `humidity_pct`: relative humidity, 0–100.
pub fn heat_index(temperature_f: f64, humidity_pct: f64) -> f64 {
    if temperature_f < 80.0 {
        return temperature_f;
    }

    let t = temperature_f;
    let rh = humidity_pct;

    let mut hi = 0.5 * (t + 61.0 + ((t - 68.0) * 1.2) + (rh * 0.094));

    if hi > 80.0 {
        hi = -42.379 + 2.04901523 * t + 10.14333127 * rh
            - 0.22475541 * t * rh
            - 0.00683783 * t * t
            - 0.05481717 * rh * rh
            + 0.00122874 * t * t * rh
            + 0.00085282 * t * rh * rh
            - 0.00000199 * t * t * rh * rh;
    }

    hi.round()
}

/// Calculate the wind chill ("feels like" temperature in the cold).
///
/// North American Wind Chill Index:
/// 35.74 + 0.6215*T − 35.75*V^0.16 + 0.4275*T*V^0.16,
/// applied when T ≤ 50 °F and V ≥ 3 mph; otherwise the input
/// temperature is returned unchanged. Rounded to the nearest integer
/// when applied.
///
/// `temperature_f`: air temperature in °F.
/// `wind_speed_mph`: wind speed in mph.
pub fn wind_chill(temperature_f: f64, wind_speed_mph: f64) -> f64 {
    if temperature_f > 50.0 || wind_speed_mph < 3.0 {
        return temperature_f;
    }

    let v016 = wind_speed_mph.powf(0.16);
    let wc = 35.74 + 0.6215 * temperature_f - 35.75 * v016 + 0.4275 * temperature_f * v016;

    wc.round()
}

/// A comfort classification for display: a label plus its card color and icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComfortClass {
    pub level: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Classify comfort from temperature (°F) and relative humidity (0–100).
///
/// Rules are evaluated in priority order; the first match wins:
/// heat index ≥ 105 → Dangerous; ≥ 90 → Uncomfortable; temperature in
/// [70, 80] with humidity ≤ 60 → Comfortable; temperature < 50 → Cold;
/// everything else → Moderate.
pub fn comfort_class(temperature_f: f64, humidity_pct: f64) -> ComfortClass {
    let hi = heat_index(temperature_f, humidity_pct);

    if hi >= 105.0 {
        return ComfortClass {
            level: "Dangerous",
            color: "#991b1b",
            icon: "🔥",
        };
    }
    if hi >= 90.0 {
        return ComfortClass {
            level: "Uncomfortable",
            color: "#f59e0b",
            icon: "😰",
        };
    }
    if (70.0..=80.0).contains(&temperature_f) && humidity_pct <= 60.0 {
        return ComfortClass {
            level: "Comfortable",
            color: "#10b981",
            icon: "😊",
        };
    }
    if temperature_f < 50.0 {
        return ComfortClass {
            level: "Cold",
            color: "#3b82f6",
            icon: "🥶",
        };
    }

    ComfortClass {
        level: "Moderate",
        color: "#8b5cf6",
        icon: "😐",
    }
}

/// Classify comfort from a Celsius temperature.
///
/// Convenience wrapper for metric data sources.
pub fn comfort_class_celsius(temperature_c: f64, humidity_pct: f64) -> ComfortClass {
    comfort_class(celsius_to_fahrenheit(temperature_c), humidity_pct)
}
