use argminmax::ArgMinMax;

/// Largest value of a non-empty slice
pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

/// Smallest value of a non-empty slice
pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// NaN and infinities mean "no value" at the record boundary
#[inline]
pub fn defined(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Percentage distance of `value` from `reference`: (value - reference) / reference * 100.
/// Absent or zero reference gives no value.
pub fn pct_distance(value: f64, reference: Option<f64>) -> Option<f64> {
    let reference = reference?;
    if reference == 0.0 {
        return None;
    }
    defined((value - reference) / reference * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_of_slice() {
        let values = [3.0, 9.5, -1.0, 4.0];
        assert_eq!(get_max(&values), 9.5);
        assert_eq!(get_min(&values), -1.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_to(101.666_666, 2), 101.67);
        assert_eq!(round_to(-3.14159, 2), -3.14);
    }

    #[test]
    fn distance_needs_a_usable_reference() {
        assert_eq!(pct_distance(110.0, Some(100.0)), Some(10.0));
        assert_eq!(pct_distance(110.0, None), None);
        assert_eq!(pct_distance(110.0, Some(0.0)), None);
        assert_eq!(defined(f64::NAN), None);
        assert_eq!(defined(f64::INFINITY), None);
    }
}
