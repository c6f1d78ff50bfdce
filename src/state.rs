use crate::config::Config;
use crate::upstream::{MembershipApi, ReqwestMembershipApi};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: Arc<dyn MembershipApi>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn MembershipApi>) -> Self {
        Self {
            config: Arc::new(config),
            api,
        }
    }

    pub fn from_config(config: Config) -> Self {
        let api = Arc::new(ReqwestMembershipApi::new(&config.api_url));
        Self::new(config, api)
    }
}
