#[cfg(test)]
mod tests {
    use super::super::regression::*;

    #[test]
    fn test_arithmetic_progression_projects_next_step() {
        // [p, p+d, ..., p+(n-1)d] lies exactly on a line; the projection
        // is p + n*d.
        let prices: Vec<f64> = (0..7).map(|i| 100.0 + i as f64).collect();
        let projected = project_next(&prices).unwrap();
        assert!((projected - 107.0).abs() < 1e-9);

        let prices: Vec<f64> = (0..5).map(|i| 50.0 + 2.5 * i as f64).collect();
        let projected = project_next(&prices).unwrap();
        assert!((projected - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_two_samples_extrapolate_the_line() {
        let (slope, intercept) = linear_fit(&[1.0, 3.0]).unwrap();
        assert!((slope - 2.0).abs() < 1e-9);
        assert!((intercept - 1.0).abs() < 1e-9);

        let projected = project_next(&[1.0, 3.0]).unwrap();
        assert!((projected - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_series_projects_flat() {
        let prices = vec![42.0; 10];
        let projected = project_next(&prices).unwrap();
        assert!((projected - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_declining_series_projects_below_last_price() {
        let prices: Vec<f64> = (0..6).map(|i| 100.0 - 3.0 * i as f64).collect();
        let projected = project_next(&prices).unwrap();
        assert!((projected - 82.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_has_no_estimate() {
        assert!(linear_fit(&[]).is_none());
        assert!(project_next(&[]).is_none());
        assert_eq!(project_or(&[], 99.0), 99.0);
    }

    #[test]
    fn test_single_sample_falls_back_without_panic() {
        assert!(linear_fit(&[123.0]).is_none());
        assert!(project_next(&[123.0]).is_none());
        assert_eq!(project_or(&[123.0], 99.0), 99.0);
    }
}
