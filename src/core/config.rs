use std::env;

pub const DEFAULT_SECRET_NAME: &str = "rod/FraudNewsAgent/ApiKeys";
pub const DEFAULT_REGION: &str = "eu-north-1";
pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_LINKEDIN_API_URL: &str = "https://api.linkedin.com/v2/ugcPosts";
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub secret_name: String,
    pub region: String,
    pub news_api_base_url: String,
    pub linkedin_api_url: String,
    pub page_size: u32,
    pub lookback_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            secret_name: DEFAULT_SECRET_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            news_api_base_url: DEFAULT_NEWS_API_BASE_URL.to_string(),
            linkedin_api_url: DEFAULT_LINKEDIN_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to defaults
    /// for anything unset or blank.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let page_size = match get("NEWS_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("NEWS_PAGE_SIZE: {}", e))?,
            None => defaults.page_size,
        };
        if page_size == 0 || page_size > 100 {
            return Err(format!("NEWS_PAGE_SIZE: {} is outside 1..=100", page_size));
        }

        let lookback_days = match get("NEWS_LOOKBACK_DAYS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|e| format!("NEWS_LOOKBACK_DAYS: {}", e))?,
            None => defaults.lookback_days,
        };
        if lookback_days < 0 {
            return Err(format!("NEWS_LOOKBACK_DAYS: {} is negative", lookback_days));
        }

        Ok(Self {
            secret_name: get("SECRET_NAME").unwrap_or(defaults.secret_name),
            region: get("AWS_REGION").unwrap_or(defaults.region),
            news_api_base_url: get("NEWS_API_BASE_URL").unwrap_or(defaults.news_api_base_url),
            linkedin_api_url: get("LINKEDIN_API_URL").unwrap_or(defaults.linkedin_api_url),
            page_size,
            lookback_days,
        })
    }
}
