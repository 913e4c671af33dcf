use crate::models::{AppData, ChartPoint, Entry, HistoryQuery, Metric, SortField, SortOrder};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;

impl AppData {
    pub fn entry_for(&self, date: NaiveDate) -> Option<&Entry> {
        self.submission_history.iter().find(|entry| entry.date == date)
    }

    pub fn chronological(&self) -> Vec<Entry> {
        let mut entries = self.submission_history.clone();
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        entries
    }

    pub fn query(&self, query: &HistoryQuery) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .chronological()
            .into_iter()
            .filter(|entry| in_range(entry.date, query.from, query.to))
            .collect();

        entries.sort_by(|a, b| {
            let ordering = compare_by(a, b, query.sort);
            let ordering = match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.timestamp.cmp(&b.timestamp))
        });
        entries
    }

    pub fn chart_series(
        &self,
        metric: Metric,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<ChartPoint> {
        let mut points: Vec<ChartPoint> = self
            .submission_history
            .iter()
            .filter(|entry| in_range(entry.date, from, to))
            .map(|entry| ChartPoint {
                date: entry.date,
                value: metric_value(entry, metric),
            })
            .collect();
        points.sort_by(|a, b| a.date.cmp(&b.date));
        points
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.submission_history.len();
        self.submission_history.clear();
        removed
    }

    /// Orders entries by timestamp and keeps only the latest entry per date.
    pub fn normalize(&mut self) -> usize {
        let mut latest: HashMap<NaiveDate, usize> = HashMap::new();
        let mut entries = std::mem::take(&mut self.submission_history);
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        for (index, entry) in entries.iter().enumerate() {
            latest.insert(entry.date, index);
        }

        let before = entries.len();
        self.submission_history = entries
            .into_iter()
            .enumerate()
            .filter(|(index, entry)| latest.get(&entry.date) == Some(index))
            .map(|(_, entry)| entry)
            .collect();
        before - self.submission_history.len()
    }
}

fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
}

pub fn metric_value(entry: &Entry, metric: Metric) -> f64 {
    match metric {
        Metric::CarriedOver => entry.carried_over,
        Metric::PalletsDelivered => entry.pallets_delivered,
        Metric::RemainingPallets => entry.remaining_pallets,
        Metric::PalletsProcessed => entry.pallets_processed,
        Metric::CartonsProcessed => entry.cartons_processed,
        Metric::Cph => entry.cph,
        Metric::Zph => entry.zph,
        Metric::HoursWorked => entry.hours_worked,
    }
}

fn compare_by(a: &Entry, b: &Entry, field: SortField) -> Ordering {
    let metric = match field {
        SortField::Date => return a.date.cmp(&b.date),
        SortField::Timestamp => return a.timestamp.cmp(&b.timestamp),
        SortField::CarriedOver => Metric::CarriedOver,
        SortField::PalletsDelivered => Metric::PalletsDelivered,
        SortField::RemainingPallets => Metric::RemainingPallets,
        SortField::PalletsProcessed => Metric::PalletsProcessed,
        SortField::CartonsProcessed => Metric::CartonsProcessed,
        SortField::Cph => Metric::Cph,
        SortField::Zph => Metric::Zph,
        SortField::HoursWorked => Metric::HoursWorked,
    };
    metric_value(a, metric).total_cmp(&metric_value(b, metric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(date: &str, cph: f64, seconds: i64) -> Entry {
        Entry {
            id: format!("{date}-{seconds}"),
            date: date.parse().unwrap(),
            carried_over: 1.0,
            pallets_delivered: 10.0,
            remaining_pallets: 1.0,
            pallets_processed: 10.0,
            cartons_processed: 250.0,
            cph,
            zph: 2.0,
            hours_worked: 8.0,
            timestamp: Utc.timestamp_opt(1_760_000_000 + seconds, 0).unwrap(),
        }
    }

    fn sample() -> AppData {
        AppData {
            submission_history: vec![
                entry("2026-10-14", 40.0, 30),
                entry("2026-10-12", 55.5, 10),
                entry("2026-10-13", 31.25, 20),
            ],
        }
    }

    #[test]
    fn chronological_orders_by_timestamp() {
        let dates: Vec<String> = sample()
            .chronological()
            .iter()
            .map(|entry| entry.date.to_string())
            .collect();
        assert_eq!(dates, ["2026-10-12", "2026-10-13", "2026-10-14"]);
    }

    #[test]
    fn query_sorts_by_metric_descending() {
        let query = HistoryQuery {
            sort: SortField::Cph,
            order: SortOrder::Desc,
            ..HistoryQuery::default()
        };
        let cph: Vec<f64> = sample().query(&query).iter().map(|entry| entry.cph).collect();
        assert_eq!(cph, [55.5, 40.0, 31.25]);
    }

    #[test]
    fn query_breaks_ties_by_timestamp_in_both_orders() {
        let data = AppData {
            submission_history: vec![
                entry("2026-10-16", 45.0, 50),
                entry("2026-10-15", 45.0, 40),
                entry("2026-10-17", 60.0, 60),
            ],
        };

        let asc = HistoryQuery {
            sort: SortField::Cph,
            order: SortOrder::Asc,
            ..HistoryQuery::default()
        };
        let dates: Vec<String> = data.query(&asc).iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, ["2026-10-15", "2026-10-16", "2026-10-17"]);

        let desc = HistoryQuery {
            order: SortOrder::Desc,
            ..asc
        };
        let dates: Vec<String> = data.query(&desc).iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, ["2026-10-17", "2026-10-15", "2026-10-16"]);
    }

    #[test]
    fn query_filters_inclusive_date_range() {
        let query = HistoryQuery {
            from: Some("2026-10-13".parse().unwrap()),
            to: Some("2026-10-14".parse().unwrap()),
            ..HistoryQuery::default()
        };
        let entries = sample().query(&query);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.date.to_string() != "2026-10-12"));
    }

    #[test]
    fn chart_series_is_ordered_by_date() {
        let points = sample().chart_series(Metric::Cph, None, None);
        let values: Vec<f64> = points.iter().map(|point| point.value).collect();
        assert_eq!(values, [55.5, 31.25, 40.0]);
    }

    #[test]
    fn clear_removes_everything() {
        let mut data = sample();
        assert_eq!(data.clear(), 3);
        assert!(data.submission_history.is_empty());
        assert!(data.entry_for("2026-10-12".parse().unwrap()).is_none());
    }

    #[test]
    fn normalize_keeps_latest_entry_per_date() {
        let mut data = sample();
        data.submission_history.push(entry("2026-10-12", 70.0, 40));
        data.submission_history.insert(0, entry("2026-10-13", 1.0, 5));

        assert_eq!(data.normalize(), 2);
        assert_eq!(data.submission_history.len(), 3);
        let oct_12 = data.entry_for("2026-10-12".parse().unwrap()).unwrap();
        assert_eq!(oct_12.cph, 70.0);
        let oct_13 = data.entry_for("2026-10-13".parse().unwrap()).unwrap();
        assert_eq!(oct_13.cph, 31.25);
        assert_eq!(data.submission_history.last().unwrap().cph, 70.0);
    }
}
