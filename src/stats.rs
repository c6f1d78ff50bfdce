use crate::dates::{format_br, iso_key, parse_workout_date};
use crate::models::{DayGroup, GroupBucket, MonthlySummary, WorkoutRecord};
use chrono::{Datelike, Local, NaiveDate};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

pub const NO_DATE: &str = "Sem data";
pub const NO_GROUP: &str = "Sem grupo";

pub fn build_monthly_summary(records: &[WorkoutRecord]) -> MonthlySummary {
    build_monthly_summary_at(Local::now().date_naive(), records)
}

pub fn build_monthly_summary_at(today: NaiveDate, records: &[WorkoutRecord]) -> MonthlySummary {
    MonthlySummary {
        training_days: count_training_days_at(today, records),
        muscle_groups: count_muscle_groups_at(today, records),
        exercises: count_exercises_at(today, records),
    }
}

pub fn count_training_days_at(today: NaiveDate, records: &[WorkoutRecord]) -> usize {
    in_month(today, records)
        .map(|(date, _)| (date.year(), date.month(), date.day()))
        .collect::<HashSet<_>>()
        .len()
}

pub fn count_muscle_groups_at(today: NaiveDate, records: &[WorkoutRecord]) -> usize {
    in_month(today, records)
        .map(|(_, record)| record.muscle_group.trim())
        .filter(|group| !group.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

pub fn count_exercises_at(today: NaiveDate, records: &[WorkoutRecord]) -> usize {
    in_month(today, records)
        .map(|(_, record)| exercises_in(&record.name))
        .sum()
}

/// Number of exercises logged in one entry; combined sets are written as
/// `"A 4X10 + B 4X10"`.
pub fn exercises_in(name: &str) -> usize {
    let segments = name
        .split('+')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .count();
    if segments > 0 {
        segments
    } else if name.trim().is_empty() {
        0
    } else {
        1
    }
}

fn in_month<'a>(
    today: NaiveDate,
    records: &'a [WorkoutRecord],
) -> impl Iterator<Item = (NaiveDate, &'a WorkoutRecord)> + 'a {
    let (year, month) = (today.year(), today.month());
    records.iter().filter_map(move |record| {
        let date = parse_workout_date(&record.date)?;
        (date.year() == year && date.month() == month).then_some((date, record))
    })
}

pub fn training_days_label(days: usize) -> &'static str {
    if days <= 1 {
        "dia de treino no mês"
    } else {
        "dias de treino no mês"
    }
}

struct DayBucket {
    key: String,
    date: Option<NaiveDate>,
    groups: Vec<GroupBucket>,
}

/// History grouped by day (most recent first), then by muscle group.
pub fn group_by_day(records: &[WorkoutRecord]) -> Vec<DayGroup> {
    let mut buckets: Vec<DayBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let date = parse_workout_date(&record.date);
        let key = match date {
            Some(date) => iso_key(date),
            None if record.date.is_empty() => NO_DATE.to_string(),
            None => record.date.trim().to_string(),
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(DayBucket {
                key,
                date,
                groups: Vec::new(),
            });
            buckets.len() - 1
        });
        push_into_group(&mut buckets[slot].groups, record);
    }

    let epoch = NaiveDate::default();
    buckets.sort_by(|a, b| b.date.unwrap_or(epoch).cmp(&a.date.unwrap_or(epoch)));

    buckets
        .into_iter()
        .map(|mut bucket| {
            bucket.groups.sort_by(|a, b| compare_names(&a.name, &b.name));
            DayGroup {
                display_date: bucket.date.map(format_br).unwrap_or(bucket.key),
                total_count: bucket.groups.iter().map(|group| group.records.len()).sum(),
                groups: bucket.groups,
            }
        })
        .collect()
}

/// History grouped by muscle group only, alphabetical with the ungrouped
/// entries last.
pub fn group_by_muscle_group(records: &[WorkoutRecord]) -> Vec<GroupBucket> {
    let mut groups = Vec::new();
    for record in records {
        push_into_group(&mut groups, record);
    }
    groups.sort_by(|a, b| match (a.name == NO_GROUP, b.name == NO_GROUP) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => compare_names(&a.name, &b.name),
    });
    groups
}

/// Case-insensitive ordering for display, falling back to the raw text so the
/// order stays total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn push_into_group(groups: &mut Vec<GroupBucket>, record: &WorkoutRecord) {
    let name = match record.muscle_group.trim() {
        "" => NO_GROUP,
        trimmed => trimmed,
    };
    match groups.iter_mut().find(|group| group.name == name) {
        Some(group) => group.records.push(record.clone()),
        None => groups.push(GroupBucket {
            name: name.to_string(),
            records: vec![record.clone()],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, date: &str, group: &str) -> WorkoutRecord {
        WorkoutRecord {
            name: name.into(),
            date: date.into(),
            muscle_group: group.into(),
            load: String::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn monthly_summary_only_counts_current_month() {
        let records = vec![
            record("Supino 4X10 + Crucifixo 4X10", "2026-03-02", "Peito"),
            record("Remada", "02/03/2026", "Costas"),
            record("Puxada", "10/03/26", " Costas "),
            record("Agachamento", "2026-02-28", "Pernas"),
            record("Leg press", "2025-03-10", "Pernas"),
            record("Rosca", "ontem", "Bíceps"),
            record("Abdominal", "2026-03-11", ""),
        ];

        let summary = build_monthly_summary_at(today(), &records);
        assert_eq!(summary.training_days, 3);
        assert_eq!(summary.muscle_groups, 2);
        assert_eq!(summary.exercises, 5);
    }

    #[test]
    fn exercise_count_splits_on_plus() {
        assert_eq!(exercises_in("A 4X10 + B 4X10"), 2);
        assert_eq!(exercises_in("Supino"), 1);
        assert_eq!(exercises_in(""), 0);
        assert_eq!(exercises_in("   "), 0);
        assert_eq!(exercises_in(" + "), 0);
        assert_eq!(exercises_in("A + + B +"), 2);

        let records = vec![
            record("A 4X10 + B 4X10", "2026-03-01", "Peito"),
            record("", "2026-03-01", "Peito"),
        ];
        assert_eq!(count_exercises_at(today(), &records), 2);
    }

    #[test]
    fn groups_within_a_day_sort_alphabetically() {
        let records = vec![
            record("Supino", "2026-03-02", "Peito"),
            record("Remada", "02/03/2026", "Costas"),
        ];
        let days = group_by_day(&records);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].display_date, "02/03/2026");
        assert_eq!(days[0].total_count, 2);
        let names: Vec<&str> = days[0].groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Costas", "Peito"]);
    }

    #[test]
    fn days_sort_most_recent_first_with_unparsed_last() {
        let records = vec![
            record("A", "ontem", "Peito"),
            record("B", "2026-01-10", "Peito"),
            record("C", "", ""),
            record("D", "2026-03-01", "Peito"),
            record("E", "2026-03-01", "Peito"),
        ];
        let days = group_by_day(&records);
        let labels: Vec<&str> = days.iter().map(|d| d.display_date.as_str()).collect();
        assert_eq!(labels, vec!["01/03/2026", "10/01/2026", "ontem", NO_DATE]);

        let latest = &days[0].groups[0];
        let names: Vec<&str> = latest.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["D", "E"]);
        assert_eq!(days[3].groups[0].name, NO_GROUP);
    }

    #[test]
    fn group_order_ignores_case() {
        let records = vec![
            record("Supino", "2026-03-02", "Peito"),
            record("Remada", "2026-03-02", "costas"),
            record("Rosca", "2026-03-02", "bíceps"),
        ];
        let days = group_by_day(&records);
        let names: Vec<&str> = days[0].groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["bíceps", "costas", "Peito"]);

        let groups = group_by_muscle_group(&records);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["bíceps", "costas", "Peito"]);
    }

    #[test]
    fn muscle_group_view_puts_ungrouped_last() {
        let records = vec![
            record("A", "2026-03-01", ""),
            record("B", "2026-03-01", "Pernas"),
            record("C", "2026-03-02", "Costas"),
            record("D", "2026-03-03", "Pernas"),
        ];
        let groups = group_by_muscle_group(&records);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Costas", "Pernas", NO_GROUP]);
        assert_eq!(groups[1].records.len(), 2);
    }

    #[test]
    fn training_day_label_is_singular_for_zero_and_one() {
        assert_eq!(training_days_label(0), "dia de treino no mês");
        assert_eq!(training_days_label(1), "dia de treino no mês");
        assert_eq!(training_days_label(4), "dias de treino no mês");
    }
}
