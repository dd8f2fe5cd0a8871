use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub at: DateTime<Utc>,
    pub close: f64,
}

/// Ordered close-price series over the requested window. Built fresh per
/// request and discarded once the page is rendered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Zip a frame index against its close column, skipping rows whose
    /// close is missing.
    pub fn from_closes(index: &[DateTime<Utc>], closes: &[Option<f64>]) -> Self {
        let points = index
            .iter()
            .zip(closes)
            .filter_map(|(at, close)| close.map(|close| PricePoint { at: *at, close }))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first_close(&self) -> Option<f64> {
        self.points.first().map(|p| p.close)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// `(last - first) / first * 100` over the window.
    pub fn percent_change(&self) -> Option<f64> {
        let first = self.first_close()?;
        let last = self.last_close()?;
        Some((last - first) / first * 100.0)
    }

    pub fn min_close(&self) -> Option<f64> {
        self.points.iter().map(|p| p.close).fold(None, |acc, c| {
            Some(acc.map_or(c, |a: f64| a.min(c)))
        })
    }

    pub fn max_close(&self) -> Option<f64> {
        self.points.iter().map(|p| p.close).fold(None, |acc, c| {
            Some(acc.map_or(c, |a: f64| a.max(c)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series(closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, close)| PricePoint {
                at: Utc.with_ymd_and_hms(2024, 1, 1 + i as u32, 0, 0, 0).unwrap(),
                close: *close,
            })
            .collect();
        PriceSeries::new(points)
    }

    #[test]
    fn percent_change_matches_the_formula_exactly() {
        let s = series(&[185.64, 190.12, 192.53]);
        let expected = (192.53 - 185.64) / 185.64 * 100.0;
        assert_eq!(s.percent_change(), Some(expected));
    }

    #[test]
    fn flat_series_has_zero_change() {
        let s = series(&[100.0, 100.0]);
        assert_eq!(s.percent_change(), Some(0.0));
    }

    #[test]
    fn empty_series_has_no_derived_values() {
        let s = PriceSeries::default();
        assert!(s.is_empty());
        assert_eq!(s.first_close(), None);
        assert_eq!(s.last_close(), None);
        assert_eq!(s.percent_change(), None);
    }

    #[test]
    fn from_closes_skips_missing_rows() {
        let index = vec![
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
        ];
        let s = PriceSeries::from_closes(&index, &[Some(1.0), None, Some(3.0)]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.first_close(), Some(1.0));
        assert_eq!(s.last_close(), Some(3.0));
    }

    #[test]
    fn min_and_max_close_span_the_series() {
        let s = series(&[5.0, 2.0, 9.0, 4.0]);
        assert_eq!(s.min_close(), Some(2.0));
        assert_eq!(s.max_close(), Some(9.0));
    }
}
