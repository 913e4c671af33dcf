use crate::metrics::round2;
use crate::models::{AppData, DailyPoint, StatsResponse, WeeklyPoint};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn build_stats(data: &AppData) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), data)
}

pub fn build_stats_at(today: NaiveDate, data: &AppData) -> StatsResponse {
    const WEEK_COUNT: usize = 8;

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset as i64);
        let entry = data.entry_for(date);
        last_7_days.push(DailyPoint {
            date: date.to_string(),
            cartons_processed: entry.map(|entry| entry.cartons_processed),
            cph: entry.map(|entry| entry.cph),
            zph: entry.map(|entry| entry.zph),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let mut entries = 0u8;
        let mut pallets = 0.0;
        let mut cartons = 0.0;
        let mut hours = 0.0;
        let mut zph_sum = 0.0;
        for day_offset in 0..7 {
            let date = start + Duration::days(day_offset);
            if let Some(entry) = data.entry_for(date) {
                entries += 1;
                pallets += entry.pallets_processed;
                cartons += entry.cartons_processed;
                hours += entry.hours_worked;
                zph_sum += entry.zph;
            }
        }

        weekly.push(WeeklyPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            entries,
            pallets_processed: round2(pallets),
            cartons_processed: round2(cartons),
            hours_worked: round2(hours),
            cph: (hours > 0.0).then(|| round2(cartons / hours)),
            avg_zph: (entries > 0).then(|| round2(zph_sum / f64::from(entries))),
        });
    }

    StatsResponse { last_7_days, weekly }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use chrono::Utc;

    fn entry(date: NaiveDate, cartons: f64, hours: f64, zph: f64) -> Entry {
        Entry {
            id: date.to_string(),
            date,
            carried_over: 0.0,
            pallets_delivered: cartons / 25.0,
            remaining_pallets: 0.0,
            pallets_processed: cartons / 25.0,
            cartons_processed: cartons,
            cph: round2(cartons / hours),
            zph,
            hours_worked: hours,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn stats_last_7_days_includes_each_day() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let two_days_ago = today - Duration::days(2);
        let data = AppData {
            submission_history: vec![entry(two_days_ago, 300.0, 6.0, 4.0)],
        };

        let stats = build_stats_at(today, &data);
        assert_eq!(stats.last_7_days.len(), 7);
        let point = stats
            .last_7_days
            .iter()
            .find(|day| day.date == two_days_ago.to_string())
            .expect("missing day");
        assert_eq!(point.cph, Some(50.0));
        assert_eq!(point.zph, Some(4.0));
        assert!(stats.last_7_days[6].cph.is_none());
    }

    #[test]
    fn weekly_cph_is_weighted_by_hours() {
        // 2026-10-19 is a Monday, so the 12th..18th form the previous week.
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let data = AppData {
            submission_history: vec![
                entry(NaiveDate::from_ymd_opt(2026, 10, 13).unwrap(), 400.0, 8.0, 2.0),
                entry(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(), 100.0, 2.0, 5.0),
            ],
        };

        let stats = build_stats_at(today, &data);
        assert_eq!(stats.weekly.len(), 8);
        let previous = &stats.weekly[6];
        assert_eq!(previous.start_date, "2026-10-12");
        assert_eq!(previous.entries, 2);
        assert_eq!(previous.cartons_processed, 500.0);
        assert_eq!(previous.cph, Some(50.0));
        assert_eq!(previous.avg_zph, Some(3.5));

        let current = &stats.weekly[7];
        assert_eq!(current.entries, 0);
        assert!(current.cph.is_none());
        assert!(current.avg_zph.is_none());
    }
}
