//! Chart projections
//!
//! Pure functions turning an [`AnalysisResult`](super::AnalysisResult) into the
//! record shapes each chart consumes. Nothing here is cached: callers derive
//! the projections again on every render from the current result.

use serde::Serialize;

use super::types::{CategoryTotals, DailyPoint};

/// One pie chart wedge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

/// One bar of the category bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRecord {
    pub name: String,
    pub amount: f64,
}

/// Pie slices, one per category, in the order the service listed them
pub fn pie_slices(by_category: &CategoryTotals) -> Vec<PieSlice> {
    by_category
        .iter()
        .map(|(name, value)| PieSlice {
            name: name.to_string(),
            value,
        })
        .collect()
}

/// Bar records, one per category, in the same order as [`pie_slices`]
pub fn bar_records(by_category: &CategoryTotals) -> Vec<BarRecord> {
    by_category
        .iter()
        .map(|(name, amount)| BarRecord {
            name: name.to_string(),
            amount,
        })
        .collect()
}

/// Line chart points: the daily series as received
pub fn daily_points(daily_spending: &[DailyPoint]) -> Vec<DailyPoint> {
    daily_spending.to_vec()
}

/// Fraction of the pie each slice covers
///
/// Returns zeros when the slices do not sum to a positive amount.
pub fn slice_shares(slices: &[PieSlice]) -> Vec<f64> {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    slices
        .iter()
        .map(|s| if total > 0.0 { s.value / total } else { 0.0 })
        .collect()
}

/// Wedge label in the `"<name> <percent>%"` form
pub fn slice_label(slice: &PieSlice, share: f64) -> String {
    format!("{} {:.0}%", slice.name, share * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals() -> CategoryTotals {
        [("Food", 10.0), ("Rent", 32.5), ("Transportation", 7.5)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_pie_and_bar_follow_category_order() {
        let by_category = totals();
        let pie = pie_slices(&by_category);
        let bar = bar_records(&by_category);

        assert_eq!(pie.len(), by_category.len());
        assert_eq!(bar.len(), by_category.len());

        let expected: Vec<&str> = by_category.iter().map(|(n, _)| n).collect();
        let pie_names: Vec<&str> = pie.iter().map(|s| s.name.as_str()).collect();
        let bar_names: Vec<&str> = bar.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(pie_names, expected);
        assert_eq!(bar_names, expected);

        assert_eq!(pie[1], PieSlice { name: "Rent".into(), value: 32.5 });
        assert_eq!(bar[1], BarRecord { name: "Rent".into(), amount: 32.5 });
    }

    #[test]
    fn test_daily_points_is_identity() {
        let series = vec![
            DailyPoint::new("2024-01-01", 12.0),
            DailyPoint::new("2024-01-03", 4.25),
            DailyPoint::new("2024-01-02", 9.0),
        ];
        assert_eq!(daily_points(&series), series);
    }

    #[test]
    fn test_empty_inputs_give_empty_projections() {
        let empty = CategoryTotals::new();
        assert!(pie_slices(&empty).is_empty());
        assert!(bar_records(&empty).is_empty());
        assert!(daily_points(&[]).is_empty());
        assert!(slice_shares(&[]).is_empty());
    }

    #[test]
    fn test_slice_shares_and_labels() {
        let pie = pie_slices(&[("Food", 25.0), ("Rent", 75.0)].into_iter().collect());
        let shares = slice_shares(&pie);
        assert_eq!(shares, vec![0.25, 0.75]);
        assert_eq!(slice_label(&pie[0], shares[0]), "Food 25%");
        assert_eq!(slice_label(&pie[1], shares[1]), "Rent 75%");
    }

    #[test]
    fn test_slice_shares_with_zero_total() {
        let pie = pie_slices(&[("Food", 0.0)].into_iter().collect());
        assert_eq!(slice_shares(&pie), vec![0.0]);
    }
}
