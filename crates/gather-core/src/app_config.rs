use chrono_tz::Tz;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Base URL of the events backend, e.g. `https://api.example.com`.
    pub api_base_url: String,
    pub api_request_timeout_secs: u64,
    pub maps_api_key: String,
    pub maps_base_url: String,
    /// ISO-3166 alpha-2 code used to restrict autocomplete, if set.
    pub places_country: Option<String>,
    pub geo_request_timeout_secs: u64,
    pub search_debounce_ms: u64,
    /// Zone that local dates and times are resolved in.
    pub timezone: Tz,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("api_request_timeout_secs", &self.api_request_timeout_secs)
            .field("maps_api_key", &"[redacted]")
            .field("maps_base_url", &self.maps_base_url)
            .field("places_country", &self.places_country)
            .field("geo_request_timeout_secs", &self.geo_request_timeout_secs)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .field("timezone", &self.timezone)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
