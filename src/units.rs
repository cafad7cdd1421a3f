//! Unit conversions between the metric units served by climate archives
//! (°C, m/s, mm) and the imperial units the thresholds are expressed in
//! (°F, mph, in).
//!
//! All converters are pure and total: any finite input maps to a finite
//! output, and NaN/±Inf propagate unchanged (no clamping, no errors).

/// Convert Fahrenheit to Celsius: (f − 32) × 5/9.
pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Convert Celsius to Fahrenheit: c × 9/5 + 32.
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Convert metres per second to miles per hour.
pub fn mps_to_mph(mps: f64) -> f64 {
    mps * 2.23694
}

/// Convert millimetres to inches.
pub fn mm_to_inches(mm: f64) -> f64 {
    mm * 0.0393701
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_freezing_point() {
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
    }

    #[test]
    fn test_boiling_point() {
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }

    #[test]
    fn test_mps_to_mph() {
        assert!((mps_to_mph(10.0) - 22.3694).abs() < 1e-9);
        assert_eq!(mps_to_mph(0.0), 0.0);
    }

    #[test]
    fn test_mm_to_inches() {
        assert!((mm_to_inches(25.4) - 1.0).abs() < 1e-4);
        assert_eq!(mm_to_inches(0.0), 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(fahrenheit_to_celsius(f64::NAN).is_nan());
        assert!(celsius_to_fahrenheit(f64::NAN).is_nan());
        assert!(mps_to_mph(f64::NAN).is_nan());
        assert!(mm_to_inches(f64::NAN).is_nan());
    }

    #[test]
    fn test_infinity_propagates() {
        assert_eq!(fahrenheit_to_celsius(f64::INFINITY), f64::INFINITY);
        assert_eq!(celsius_to_fahrenheit(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    proptest! {
        // Converting and back returns the original within 1e-9 relative tolerance.
        #[test]
        fn prop_temperature_round_trip(f in -200.0f64..200.0) {
            let back = celsius_to_fahrenheit(fahrenheit_to_celsius(f));
            let tolerance = 1e-9 * f.abs().max(1.0);
            prop_assert!((back - f).abs() <= tolerance);
        }

        #[test]
        fn prop_celsius_round_trip(c in -200.0f64..200.0) {
            let back = fahrenheit_to_celsius(celsius_to_fahrenheit(c));
            let tolerance = 1e-9 * c.abs().max(1.0);
            prop_assert!((back - c).abs() <= tolerance);
        }
    }
}
