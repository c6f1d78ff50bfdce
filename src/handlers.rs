use crate::auth::{LoginOutcome, landing_path, login_outcome};
use crate::dates::iso_key;
use crate::errors::AppError;
use crate::models::{LoginForm, LoginQuery, ViewState};
use crate::schedule::{class_names, group_by_date, upcoming, visible_classes};
use crate::session::{create_session_cookie, destroy_session_cookie, session_registration};
use crate::state::AppState;
use crate::stats::{build_monthly_summary, group_by_day, group_by_muscle_group};
use crate::ui::{self, Nav};
use axum::{
    Form,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use tracing::info;

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(view): Query<ViewState>,
) -> Result<Html<String>, AppError> {
    let session = session_registration(&headers);
    let date = iso_key(Local::now().date_naive());
    let classes = visible_classes(state.api.classes_on(&date).await?);

    let upcoming_days = group_by_date(&upcoming(&classes));
    let today_days = group_by_date(&classes);
    let names = class_names(&classes);

    let nav = nav(session.as_deref(), &view, "/");
    Ok(Html(ui::render_home(&nav, &view, &upcoming_days, &today_days, &names)))
}

pub async fn login_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
    Query(view): Query<ViewState>,
) -> Response {
    if let Some(registration) = session_registration(&headers)
        .as_deref()
        .and_then(parse_registration)
    {
        return Redirect::to(&format!("/aluno/{registration}")).into_response();
    }

    let nav = nav(None, &view, "/login");
    Html(ui::render_login(
        &nav,
        None,
        query.redirect.as_deref(),
        &state.config.password_reset_url,
    ))
    .into_response()
}

pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let email = form.email.trim();
    let password = form.senha.trim();

    let outcome = login_outcome(state.api.authenticate(email, password).await);
    if let LoginOutcome::SignedIn(registration) = &outcome {
        info!(registration = %registration, "member signed in");
        let target = landing_path(registration, form.redirect.as_deref());
        return (
            [(SET_COOKIE, create_session_cookie(registration))],
            Redirect::to(&target),
        )
            .into_response();
    }

    let nav = nav(None, &ViewState::default(), "/login");
    Html(ui::render_login(
        &nav,
        outcome.error_message(),
        form.redirect.as_deref(),
        &state.config.password_reset_url,
    ))
    .into_response()
}

pub async fn logout() -> impl IntoResponse {
    ([(SET_COOKIE, destroy_session_cookie())], Redirect::to("/login"))
}

pub async fn student_profile(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(view): Query<ViewState>,
) -> Result<Response, AppError> {
    let registration = match authorize(&headers, &raw, uri.path()) {
        Ok(registration) => registration,
        Err(response) => return Ok(response),
    };

    let (history, student) = tokio::try_join!(
        state.api.workout_history(registration),
        state.api.student(registration),
    )?;

    let session = registration.to_string();
    let nav = nav(Some(&session), &view, uri.path());
    let page = match student {
        Some(student) => ui::render_profile(
            &nav,
            &student,
            &build_monthly_summary(&history),
            &group_by_day(&history),
        ),
        None => ui::render_student_missing(&nav),
    };
    Ok(Html(page).into_response())
}

pub async fn student_history(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(view): Query<ViewState>,
) -> Result<Response, AppError> {
    let registration = match authorize(&headers, &raw, uri.path()) {
        Ok(registration) => registration,
        Err(response) => return Ok(response),
    };

    let history = state.api.workout_history(registration).await?;

    let session = registration.to_string();
    let nav = nav(Some(&session), &view, uri.path());
    Ok(Html(ui::render_history(&nav, registration, &group_by_muscle_group(&history))).into_response())
}

/// Checks the membership number in the path against the session cookie.
///
/// Malformed numbers are a 404; a missing or foreign session is sent to the
/// login page with a way back.
fn authorize(headers: &HeaderMap, raw: &str, path: &str) -> Result<u64, Response> {
    let Some(registration) = parse_registration(raw) else {
        return Err(AppError::not_found("Matrícula inválida").into_response());
    };

    let canonical = registration.to_string();
    if session_registration(headers).as_deref() != Some(canonical.as_str()) {
        return Err(Redirect::to(&login_redirect(path)).into_response());
    }
    Ok(registration)
}

pub fn parse_registration(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

pub fn login_redirect(path: &str) -> String {
    format!("/login?redirect={}", urlencoding::encode(path))
}

fn nav<'a>(registration: Option<&'a str>, view: &ViewState, path: &'a str) -> Nav<'a> {
    Nav {
        registration,
        menu_open: view.menu_open(),
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::errors::ApiError;
    use crate::models::{AuthResponse, ClassSession, Student, WorkoutRecord};
    use crate::upstream::MembershipApi;
    use async_trait::async_trait;
    use axum::http::{HeaderValue, StatusCode, header::{COOKIE, LOCATION}};
    use std::sync::Arc;

    /// Membership API that accepts any credentials for `registration`.
    struct FixedApi {
        registration: String,
    }

    #[async_trait]
    impl MembershipApi for FixedApi {
        async fn workout_history(&self, _: u64) -> Result<Vec<WorkoutRecord>, ApiError> {
            Ok(Vec::new())
        }

        async fn student(&self, _: u64) -> Result<Option<Student>, ApiError> {
            Ok(None)
        }

        async fn classes_on(&self, _: &str) -> Result<Vec<ClassSession>, ApiError> {
            Ok(Vec::new())
        }

        async fn authenticate(&self, _: &str, _: &str) -> Result<AuthResponse, ApiError> {
            Ok(AuthResponse {
                has_status: true,
                status: Some("ativo".into()),
                registration: self.registration.clone(),
            })
        }
    }

    fn state(registration: &str) -> AppState {
        let api = Arc::new(FixedApi {
            registration: registration.into(),
        });
        AppState::new(Config::from_env_with(|_| None), api)
    }

    fn cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    async fn submit(state: AppState, redirect: Option<&str>) -> Response {
        let form = LoginForm {
            email: "ana@example.com".into(),
            senha: "segredo".into(),
            redirect: redirect.map(str::to_string),
        };
        login_submit(State(state), Form(form)).await
    }

    #[tokio::test]
    async fn login_page_redirects_canonical_session() {
        let response = login_page(
            State(state("5")),
            cookie("quattor_session=017841"),
            Query(LoginQuery::default()),
            Query(ViewState::default()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/aluno/17841");
    }

    #[tokio::test]
    async fn login_page_shows_form_for_unusable_session() {
        let response = login_page(
            State(state("5")),
            cookie("quattor_session=1%0A2"),
            Query(LoginQuery::default()),
            Query(ViewState::default()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(LOCATION).is_none());
    }

    #[tokio::test]
    async fn login_ignores_non_ascii_return_path() {
        let response = submit(state("5"), Some("/aluno/5/histórico")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/aluno/5");

        let response = submit(state("5"), Some("/aluno/5/historico")).await;
        assert_eq!(location(&response), "/aluno/5/historico");
    }

    #[tokio::test]
    async fn login_encodes_upstream_registration() {
        let response = submit(state("1\n2"), None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/aluno/1%0A2");
    }

    #[test]
    fn registration_must_be_numeric() {
        assert_eq!(parse_registration("17841"), Some(17841));
        assert_eq!(parse_registration("017841"), Some(17841));
        assert_eq!(parse_registration("abc"), None);
        assert_eq!(parse_registration("-3"), None);
        assert_eq!(parse_registration(""), None);
    }

    #[test]
    fn login_redirect_encodes_return_path() {
        assert_eq!(login_redirect("/aluno/123"), "/login?redirect=%2Faluno%2F123");
    }
}
