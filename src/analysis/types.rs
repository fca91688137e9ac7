//! Analysis result types
//!
//! The shape returned by the analysis service for one uploaded CSV:
//! - `AnalysisResult`: the whole response body
//! - `CategoryTotals`: per-category amounts in the order the service sent them
//! - `DailyPoint`: one day of spending

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Aggregate statistics for one uploaded transactions file
///
/// Produced by the analysis service, held by the session while it is the
/// current result, and replaced wholesale by the next upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    pub by_category: CategoryTotals,
    #[serde(deserialize_with = "deserialize_daily_spending")]
    pub daily_spending: Vec<DailyPoint>,
}

impl AnalysisResult {
    /// Total spending across all transactions
    pub fn total(&self) -> f64 {
        self.summary.total
    }

    /// Whether the service found nothing to chart
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty() && self.daily_spending.is_empty()
    }
}

/// Summary block of the response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: f64,
}

/// One day of spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// ISO calendar date, e.g. `2024-01-31`
    pub date: String,
    pub amount: f64,
}

impl DailyPoint {
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            amount,
        }
    }

    /// Parse the date, if it is a plain ISO calendar date
    pub fn calendar_date(&self) -> Option<chrono::NaiveDate> {
        // The service may send a full timestamp; only the date part matters.
        let day = self.date.get(..10).unwrap_or(&self.date);
        chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Short axis label (`MM/DD`), falling back to the raw string
    pub fn axis_label(&self) -> String {
        self.calendar_date()
            .map(|d| d.format("%m/%d").to_string())
            .unwrap_or_else(|| self.date.clone())
    }
}

/// Category name to amount, kept in the order received
///
/// JSON objects carry no ordering guarantee in most decoders; this type
/// decodes the object entry by entry so the charts show categories in the
/// order the service listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals(Vec<(String, f64)>);

impl CategoryTotals {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or overwrite a category. An existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, amount: f64) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = amount,
            None => self.0.push((name, amount)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all category amounts
    pub fn sum(&self) -> f64 {
        self.0.iter().map(|(_, v)| v).sum()
    }
}

impl<N: Into<String>> FromIterator<(N, f64)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        let mut totals = CategoryTotals::new();
        for (name, amount) in iter {
            totals.insert(name, amount);
        }
        totals
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, amount) in &self.0 {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryTotals {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TotalsVisitor;

        impl<'de> Visitor<'de> for TotalsVisitor {
            type Value = CategoryTotals;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping category names to amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut totals = CategoryTotals::new();
                while let Some((name, amount)) = access.next_entry::<String, f64>()? {
                    totals.insert(name, amount);
                }
                Ok(totals)
            }
        }

        deserializer.deserialize_map(TotalsVisitor)
    }
}

/// Accept `daily_spending` either as `[{date, amount}, ...]` or as the
/// `{date: amount, ...}` object older service builds return.
fn deserialize_daily_spending<'de, D>(deserializer: D) -> Result<Vec<DailyPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DailyVisitor;

    impl<'de> Visitor<'de> for DailyVisitor {
        type Value = Vec<DailyPoint>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list of {date, amount} records or an object of date to amount")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut points = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(point) = seq.next_element::<DailyPoint>()? {
                points.push(point);
            }
            Ok(points)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut points = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((date, amount)) = access.next_entry::<String, f64>()? {
                points.push(DailyPoint { date, amount });
            }
            Ok(points)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(DailyVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "summary": {"total": 42.5},
        "by_category": {"Rent": 32.5, "Food": 10},
        "daily_spending": [{"date": "2024-01-01", "amount": 42.5}]
    }"#;

    #[test]
    fn test_decode_keeps_category_order() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(result.total(), 42.5);
        let names: Vec<&str> = result.by_category.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Rent", "Food"]);
        assert_eq!(result.by_category.get("Food"), Some(10.0));
        assert_eq!(result.daily_spending, vec![DailyPoint::new("2024-01-01", 42.5)]);
    }

    #[test]
    fn test_decode_daily_spending_as_object() {
        let body = r#"{
            "summary": {"total": 30.0},
            "by_category": {"Other": 30.0},
            "daily_spending": {"2024-03-01": 10.0, "2024-03-02": 20.0}
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();

        assert_eq!(
            result.daily_spending,
            vec![
                DailyPoint::new("2024-03-01", 10.0),
                DailyPoint::new("2024-03-02", 20.0),
            ]
        );
    }

    #[test]
    fn test_decode_empty_result() {
        let body = r#"{"summary": {"total": 0}, "by_category": {}, "daily_spending": []}"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total(), 0.0);
    }

    #[test]
    fn test_decode_rejects_missing_summary() {
        let body = r#"{"by_category": {}, "daily_spending": []}"#;
        assert!(serde_json::from_str::<AnalysisResult>(body).is_err());
    }

    #[test]
    fn test_duplicate_category_keeps_first_position() {
        let mut totals = CategoryTotals::new();
        totals.insert("Food", 1.0);
        totals.insert("Rent", 2.0);
        totals.insert("Food", 5.0);

        let entries: Vec<_> = totals.iter().collect();
        assert_eq!(entries, vec![("Food", 5.0), ("Rent", 2.0)]);
        assert_eq!(totals.sum(), 7.0);
    }

    #[test]
    fn test_category_totals_serialize_as_object() {
        let totals: CategoryTotals = [("Food", 10.0), ("Rent", 32.5)].into_iter().collect();
        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(json, r#"{"Food":10.0,"Rent":32.5}"#);
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(DailyPoint::new("2024-01-31", 1.0).axis_label(), "01/31");
        assert_eq!(DailyPoint::new("2024-01-31T00:00:00", 1.0).axis_label(), "01/31");
        assert_eq!(DailyPoint::new("yesterday", 1.0).axis_label(), "yesterday");
    }
}
