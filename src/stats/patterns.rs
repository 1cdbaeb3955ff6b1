use chrono::{Datelike, Timelike};

use crate::models::{CodingPatterns, DayBucket, Event, TimeBucket};

const DAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const TIME_LABELS: [&str; 6] = ["12a", "4a", "8a", "12p", "4p", "8p"];
const FULL_DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const TIME_RANGES: [&str; 6] = [
    "midnight–4am",
    "4am–8am",
    "8am–noon",
    "noon–4pm",
    "4pm–8pm",
    "8pm–midnight",
];

/// Weekday and time-of-day histograms over push activity, in UTC. Buckets
/// are commit-weighted and normalized against their own maximum to two
/// decimals, so the busiest bucket reads 1.0.
pub fn coding_patterns(events: &[Event]) -> CodingPatterns {
    let (day_counts, time_counts, total_events) = weighted_buckets(events);

    let max_day = day_counts.iter().copied().max().unwrap_or(0).max(1);
    let max_time = time_counts.iter().copied().max().unwrap_or(0).max(1);

    let by_day = DAY_LABELS
        .iter()
        .zip(day_counts.iter())
        .map(|(day, count)| DayBucket {
            day: (*day).to_string(),
            value: normalize(*count, max_day),
        })
        .collect();

    let by_time = TIME_LABELS
        .iter()
        .zip(time_counts.iter())
        .map(|(time, count)| TimeBucket {
            time: (*time).to_string(),
            value: normalize(*count, max_time),
        })
        .collect();

    let weekend: u32 = day_counts[0] + day_counts[6];
    let weekday: u32 = day_counts[1..6].iter().sum();
    let label = if f64::from(weekend) > f64::from(weekday) * 0.5 {
        "Weekend active"
    } else {
        "Weekday focused"
    };

    let description = if total_events > 0 {
        format!(
            "Peaks on {} and {} (UTC)",
            FULL_DAY_NAMES[peak_index(&day_counts)],
            TIME_RANGES[peak_index(&time_counts)]
        )
    } else {
        "No recent activity data".to_string()
    };

    CodingPatterns {
        total_events,
        description,
        by_day,
        by_time,
        label: label.to_string(),
    }
}

// Sunday is bucket 0; hours fold into six four-hour buckets.
fn weighted_buckets(events: &[Event]) -> ([u32; 7], [u32; 6], u32) {
    let mut day_counts = [0u32; 7];
    let mut time_counts = [0u32; 6];
    let mut total = 0u32;

    for event in events.iter().filter(|e| e.is_push()) {
        let weight = event.commit_weight();
        let day = event.created_at.weekday().num_days_from_sunday() as usize;
        let bucket = (event.created_at.hour() / 4).min(5) as usize;

        day_counts[day] += weight;
        time_counts[bucket] += weight;
        total += weight;
    }

    (day_counts, time_counts, total)
}

fn normalize(count: u32, max: u32) -> f64 {
    (f64::from(count) / f64::from(max) * 100.0).round() / 100.0
}

// First index holding the maximum, so ties name the earlier bucket.
fn peak_index(counts: &[u32]) -> usize {
    let max = counts.iter().copied().max().unwrap_or(0);
    counts.iter().position(|&c| c == max).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CommitStub, EventPayload, EventRepo};
    use chrono::{DateTime, Utc};

    fn push_at(at: &str, commits: usize) -> Event {
        Event {
            kind: "PushEvent".to_string(),
            repo: EventRepo {
                name: "octocat/example".to_string(),
            },
            created_at: at.parse::<DateTime<Utc>>().unwrap(),
            payload: EventPayload {
                commits: Some(vec![CommitStub::default(); commits]),
                ..Default::default()
            },
        }
    }

    #[test]
    fn weekday_afternoon_profile() {
        // Wednesday 16:30 carries 3 commits, Sunday 00:15 carries 1.
        let events = vec![
            push_at("2026-08-19T16:30:00Z", 3),
            push_at("2026-08-16T00:15:00Z", 1),
        ];

        let patterns = coding_patterns(&events);
        assert_eq!(patterns.total_events, 4);

        assert_eq!(patterns.by_day[3].day, "W");
        assert_eq!(patterns.by_day[3].value, 1.0);
        assert_eq!(patterns.by_day[0].day, "S");
        assert_eq!(patterns.by_day[0].value, 0.33);

        assert_eq!(patterns.by_time[4].time, "4p");
        assert_eq!(patterns.by_time[4].value, 1.0);
        assert_eq!(patterns.by_time[0].time, "12a");
        assert_eq!(patterns.by_time[0].value, 0.33);

        assert_eq!(patterns.label, "Weekday focused");
        assert_eq!(patterns.description, "Peaks on Wednesday and 4pm–8pm (UTC)");
    }

    #[test]
    fn day_and_time_buckets_partition_the_same_weight() {
        let mut events = vec![
            push_at("2026-08-17T03:00:00Z", 2),
            push_at("2026-08-18T09:00:00Z", 5),
            push_at("2026-08-21T13:00:00Z", 1),
            push_at("2026-08-22T22:00:00Z", 4),
        ];
        // non-push noise must not count
        events.push(Event {
            kind: "WatchEvent".to_string(),
            repo: EventRepo {
                name: "octocat/example".to_string(),
            },
            created_at: "2026-08-20T12:00:00Z".parse::<DateTime<Utc>>().unwrap(),
            payload: EventPayload::default(),
        });

        let (day_counts, time_counts, total) = weighted_buckets(&events);
        assert_eq!(day_counts.iter().sum::<u32>(), total);
        assert_eq!(time_counts.iter().sum::<u32>(), total);
        assert_eq!(total, 12);
    }

    #[test]
    fn no_activity_yields_flat_zeroes() {
        let patterns = coding_patterns(&[]);

        assert_eq!(patterns.total_events, 0);
        assert_eq!(patterns.description, "No recent activity data");
        assert_eq!(patterns.label, "Weekday focused");
        assert_eq!(patterns.by_day.len(), 7);
        assert_eq!(patterns.by_time.len(), 6);
        assert!(patterns.by_day.iter().all(|b| b.value == 0.0));
        assert!(patterns.by_time.iter().all(|b| b.value == 0.0));
    }

    #[test]
    fn weekend_label_when_weekend_exceeds_half_of_weekdays() {
        let events = vec![
            push_at("2026-08-16T10:00:00Z", 3), // Sunday
            push_at("2026-08-18T10:00:00Z", 4), // Tuesday
        ];

        assert_eq!(coding_patterns(&events).label, "Weekend active");
    }

    #[test]
    fn peak_ties_name_the_earlier_bucket() {
        let events = vec![
            push_at("2026-08-17T01:00:00Z", 2), // Monday
            push_at("2026-08-19T01:00:00Z", 2), // Wednesday
        ];

        let patterns = coding_patterns(&events);
        assert!(patterns.description.starts_with("Peaks on Monday"));
    }

    #[test]
    fn normalization_ignores_a_constant_scale_factor() {
        let base = vec![
            push_at("2026-08-17T03:00:00Z", 1),
            push_at("2026-08-19T16:00:00Z", 3),
            push_at("2026-08-22T09:00:00Z", 2),
        ];
        let scaled = vec![
            push_at("2026-08-17T03:00:00Z", 5),
            push_at("2026-08-19T16:00:00Z", 15),
            push_at("2026-08-22T09:00:00Z", 10),
        ];

        let a = coding_patterns(&base);
        let b = coding_patterns(&scaled);

        for (x, y) in a.by_day.iter().zip(b.by_day.iter()) {
            assert_eq!(x.value, y.value);
        }
        for (x, y) in a.by_time.iter().zip(b.by_time.iter()) {
            assert_eq!(x.value, y.value);
        }
    }

    #[test]
    fn two_decimal_rounding_is_stable() {
        for count in [0u32, 1, 2, 3] {
            let value = normalize(count, 3);
            let rescaled = normalize((value * 100.0).round() as u32, 100);
            assert_eq!(value, rescaled);
        }
    }
}
