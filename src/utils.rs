use log::warn;

/// Wrap an angle in degrees into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid returns 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Move `value` towards zero by `amount` without crossing it
pub fn approach_zero(value: f64, amount: f64) -> f64 {
    if value > 0.0 {
        (value - amount).max(0.0)
    } else if value < 0.0 {
        (value + amount).min(0.0)
    } else {
        value
    }
}

/// Frame times that are NaN, infinite or negative become zero
pub fn sanitize_delta(dt: f64) -> f64 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        warn!("Ignoring invalid frame delta {}", dt);
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_normalize_degrees() {
        assert_approx_eq!(normalize_degrees(0.0), 0.0);
        assert_approx_eq!(normalize_degrees(370.0), 10.0);
        assert_approx_eq!(normalize_degrees(-90.0), 270.0);
        assert_approx_eq!(normalize_degrees(720.0), 0.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn test_approach_zero() {
        assert_approx_eq!(approach_zero(10.0, 3.0), 7.0);
        assert_approx_eq!(approach_zero(2.0, 3.0), 0.0);
        assert_approx_eq!(approach_zero(-10.0, 3.0), -7.0);
        assert_approx_eq!(approach_zero(-2.0, 3.0), 0.0);
        assert_approx_eq!(approach_zero(0.0, 3.0), 0.0);
    }

    #[test]
    fn test_sanitize_delta() {
        assert_approx_eq!(sanitize_delta(0.016), 0.016);
        assert_eq!(sanitize_delta(f64::NAN), 0.0);
        assert_eq!(sanitize_delta(f64::INFINITY), 0.0);
        assert_eq!(sanitize_delta(-0.5), 0.0);
    }
}
