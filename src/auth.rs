use crate::errors::ApiError;
use crate::models::AuthResponse;
use tracing::{info, warn};

pub const INACTIVE_MESSAGE: &str = "Sua matrícula está inativa.";
pub const NOT_FOUND_MESSAGE: &str = "E-mail ou senha incorretos.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted for this membership number.
    SignedIn(String),
    Inactive,
    NotFound,
    /// Accepted, but the API sent no membership number to start a session with.
    Unregistered,
}

impl LoginOutcome {
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            LoginOutcome::Inactive => Some(INACTIVE_MESSAGE),
            LoginOutcome::NotFound => Some(NOT_FOUND_MESSAGE),
            LoginOutcome::SignedIn(_) | LoginOutcome::Unregistered => None,
        }
    }
}

pub fn is_status_active(status: &str) -> bool {
    matches!(
        status.trim().to_lowercase().as_str(),
        "ativo" | "active" | "activo"
    )
}

pub fn login_outcome(result: Result<AuthResponse, ApiError>) -> LoginOutcome {
    let auth = match result {
        Ok(auth) => auth,
        Err(err) => {
            warn!("authentication request failed: {err}");
            return LoginOutcome::NotFound;
        }
    };

    if let Some(status) = auth.status.as_deref() {
        if !is_status_active(status) {
            info!(status, "login refused for inactive membership");
            return LoginOutcome::Inactive;
        }
    }

    if !auth.has_status {
        return LoginOutcome::NotFound;
    }

    if auth.registration.is_empty() {
        LoginOutcome::Unregistered
    } else {
        LoginOutcome::SignedIn(auth.registration)
    }
}

/// Where to send a member after signing in. A requested return path is only
/// honored when it points into the member's own pages and is usable as a
/// `Location` header as is.
pub fn landing_path(registration: &str, requested: Option<&str>) -> String {
    let home = format!("/aluno/{}", urlencoding::encode(registration));
    match requested {
        Some(path)
            if path.bytes().all(|byte| byte.is_ascii_graphic())
                && (path == home || path.starts_with(&format!("{home}/"))) =>
        {
            path.to_string()
        }
        _ => home,
    }
}
