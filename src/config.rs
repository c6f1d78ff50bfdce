pub const DEFAULT_API_URL: &str = "https://api.quattoracademia.com";
pub const DEFAULT_PASSWORD_RESET_URL: &str =
    "https://evo-totem.w12app.com.br/quattor/1/page/landing-page/validacao";
const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub password_reset_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Reads settings through `get` so tests don't touch the process
    /// environment.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let port = get("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let api_url = get("QUATTOR_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        let password_reset_url = get("QUATTOR_PASSWORD_RESET_URL")
            .unwrap_or_else(|| DEFAULT_PASSWORD_RESET_URL.into());

        Self {
            port,
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            password_reset_url,
        }
    }
}
