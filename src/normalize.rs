//! Adapters between the membership API's loose JSON and the typed models.
//!
//! Nothing in here fails: unexpected shapes degrade to empty values so a
//! misbehaving upstream never takes a page down on its own.

use crate::models::{AuthResponse, ClassSession, Student, WorkoutRecord};
use serde_json::{Map, Value};
use tracing::debug;

/// Extracts workout records from a history payload.
///
/// Accepts a bare array or an object wrapping the array under `data`. Array
/// entries must be objects carrying both `nome` and `data`; anything else is
/// skipped.
pub fn normalize_workouts(value: &Value) -> Vec<WorkoutRecord> {
    match value {
        Value::Array(items) => {
            let records: Vec<WorkoutRecord> = items
                .iter()
                .filter_map(|item| item.as_object())
                .filter(|obj| obj.contains_key("nome") && obj.contains_key("data"))
                .map(workout_from_object)
                .collect();
            if records.len() != items.len() {
                debug!(
                    dropped = items.len() - records.len(),
                    "skipped malformed workout entries"
                );
            }
            records
        }
        Value::Object(obj) => match obj.get("data") {
            Some(nested) if nested.is_array() => normalize_workouts(nested),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn workout_from_object(obj: &Map<String, Value>) -> WorkoutRecord {
    WorkoutRecord {
        name: text_field(obj, "nome"),
        date: text_field(obj, "data"),
        muscle_group: text_field(obj, "grupo"),
        load: text_field(obj, "carga"),
    }
}

/// Builds a class from one schedule entry, coalescing the id field names the
/// API has used over time.
pub fn class_from_value(obj: &Map<String, Value>) -> ClassSession {
    let activity_id = ["idActivity", "id_activity", "id_aula"]
        .iter()
        .find_map(|key| obj.get(*key).filter(|value| !value.is_null()))
        .map(number_of)
        .unwrap_or(0);

    ClassSession {
        activity_date: text_field(obj, "activityDate"),
        capacity: obj.get("capacity").map(number_of).unwrap_or(0),
        end_time: text_field(obj, "endTime"),
        activity_id,
        instructor: text_field(obj, "instructor"),
        name: text_field(obj, "name"),
        start_time: text_field(obj, "startTime"),
        occupation: obj.get("ocupation").map(number_of).unwrap_or(0),
    }
}

pub fn classes_from_value(value: &Value) -> Vec<ClassSession> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .map(class_from_value)
            .collect(),
        _ => Vec::new(),
    }
}

pub fn student_from_value(value: &Value) -> Option<Student> {
    let obj = value.as_object()?;
    Some(Student {
        name: text_field(obj, "name"),
        photo: text_field(obj, "photo"),
        plan: text_field(obj, "plano"),
        end_date: text_field(obj, "endDate"),
        registration: text_field(obj, "registration"),
        status: text_field(obj, "status"),
    })
}

pub fn auth_from_value(value: &Value) -> AuthResponse {
    let Some(obj) = value.as_object() else {
        return AuthResponse::default();
    };
    AuthResponse {
        has_status: obj.contains_key("status"),
        status: obj
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_string),
        registration: text_field(obj, "registration"),
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn number_of(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))
            .unwrap_or(0),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
