/// Settings resolved once at startup.
///
/// `api_url` is the only setting that changes what the directory shows; the
/// rest tune the transport and logging around it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Replaces the endpoint with an explicit override, ignoring blank values.
    #[must_use]
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Self {
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api_url = url.to_owned();
        }
        self
    }
}
