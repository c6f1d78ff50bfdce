use crate::models::ClassSession;
use chrono::{Local, NaiveDateTime};

/// Activities the front desk schedules but that are not shown to members.
const HIDDEN_ACTIVITIES: [i64; 2] = [19, 39];
const DEFAULT_COLOR: &str = "#2e7d32";

const CLASS_COLORS: &[(i64, &str)] = &[
    (23, "#3b82f6"),
    (24, "#60a5fa"),
    (25, "#dc2626"),
    (26, "#ea580c"),
    (27, "#b45309"),
    (28, "#92400e"),
    (30, "#06b6d4"),
    (31, "#059669"),
    (33, "#d946ef"),
    (34, "#8b5cf6"),
    (38, "#9333ea"),
    (39, "#14b8a6"),
    (41, "#b91c1c"),
    (42, "#ec4899"),
    (43, "#f472b6"),
    (53, "#fb7185"),
    (54, "#fda4af"),
    (55, "#db2777"),
    (56, "#ec4899"),
    (57, "#c026d3"),
    (58, "#f472b6"),
    (62, "#ec4899"),
    (63, "#334155"),
    (64, "#ec4899"),
    (65, "#d946ef"),
    (66, "#c026d3"),
    (67, "#6366f1"),
    (68, "#0d9488"),
    (69, "#d97706"),
];

pub fn class_color(activity_id: i64) -> &'static str {
    CLASS_COLORS
        .iter()
        .find(|(id, _)| *id == activity_id)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

pub fn visible_classes(classes: Vec<ClassSession>) -> Vec<ClassSession> {
    classes
        .into_iter()
        .filter(|class| !HIDDEN_ACTIVITIES.contains(&class.activity_id))
        .collect()
}

pub fn upcoming(classes: &[ClassSession]) -> Vec<ClassSession> {
    upcoming_at(classes, Local::now().naive_local())
}

/// Classes on a later day, or later today than `now` (`HH:MM` comparison).
pub fn upcoming_at(classes: &[ClassSession], now: NaiveDateTime) -> Vec<ClassSession> {
    let today = now.format("%Y-%m-%d").to_string();
    let current_time = now.format("%H:%M").to_string();
    classes
        .iter()
        .filter(|class| {
            let date = class.activity_date.get(..10).unwrap_or(class.activity_date.as_str());
            match date.cmp(today.as_str()) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Less => false,
                std::cmp::Ordering::Equal => class.start_time.as_str() >= current_time.as_str(),
            }
        })
        .cloned()
        .collect()
}

/// Classes grouped by their raw date in first-seen order, each day sorted by
/// start time.
pub fn group_by_date(classes: &[ClassSession]) -> Vec<(String, Vec<ClassSession>)> {
    let mut days: Vec<(String, Vec<ClassSession>)> = Vec::new();
    for class in classes {
        match days.iter_mut().find(|(date, _)| *date == class.activity_date) {
            Some((_, list)) => list.push(class.clone()),
            None => days.push((class.activity_date.clone(), vec![class.clone()])),
        }
    }
    for (_, list) in &mut days {
        list.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }
    days
}

pub fn class_names(classes: &[ClassSession]) -> Vec<String> {
    let mut names: Vec<String> = classes.iter().map(|class| class.name.clone()).collect();
    names.sort();
    names.dedup();
    names
}
