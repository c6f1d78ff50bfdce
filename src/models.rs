use serde::Deserialize;

/// One logged training entry from the member's workout history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkoutRecord {
    pub name: String,
    pub date: String,
    pub muscle_group: String,
    pub load: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Student {
    pub name: String,
    pub photo: String,
    pub plan: String,
    pub end_date: String,
    pub registration: String,
    pub status: String,
}

/// A scheduled group class ("aula").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassSession {
    pub activity_date: String,
    pub capacity: i64,
    pub end_time: String,
    pub activity_id: i64,
    pub instructor: String,
    pub name: String,
    pub start_time: String,
    pub occupation: i64,
}

/// What the authentication endpoint told us about the account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthResponse {
    pub has_status: bool,
    pub status: Option<String>,
    pub registration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlySummary {
    pub training_days: usize,
    pub muscle_groups: usize,
    pub exercises: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBucket {
    pub name: String,
    pub records: Vec<WorkoutRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub display_date: String,
    pub groups: Vec<GroupBucket>,
    pub total_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

/// Per-request UI state carried in the query string.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ViewState {
    #[serde(default)]
    pub menu: Option<String>,
    #[serde(default)]
    pub aula: Option<String>,
}

impl ViewState {
    pub fn menu_open(&self) -> bool {
        self.menu.as_deref() == Some("open")
    }

    /// Selected class name, `None` meaning every class.
    pub fn class_filter(&self) -> Option<&str> {
        self.aula
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty() && *name != "todas")
    }
}
