use crate::config::types::{
    Config, CrawlerConfig, DelayRange, OutputConfig, PolitenessConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_politeness_config(&config.politeness)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if config.start_year > config.end_year {
        return Err(ConfigError::Validation(format!(
            "start_year ({}) must not be after end_year ({})",
            config.start_year, config.end_year
        )));
    }

    if config.batch_size < 1 {
        return Err(ConfigError::Validation(
            "batch_size must be >= 1".to_string(),
        ));
    }

    if config.max_pages_per_year < 1 {
        return Err(ConfigError::Validation(
            "max_pages_per_year must be >= 1".to_string(),
        ));
    }

    if config.no_accidents_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "no_accidents_marker cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates politeness delays
fn validate_politeness_config(config: &PolitenessConfig) -> Result<(), ConfigError> {
    validate_delay("detail_delay", &config.detail_delay)?;
    validate_delay("listing_delay", &config.listing_delay)?;
    Ok(())
}

fn validate_delay(name: &str, range: &DelayRange) -> Result<(), ConfigError> {
    if range.min_ms > range.max_ms {
        return Err(ConfigError::Validation(format!(
            "{} min_ms ({}) must not exceed max_ms ({})",
            name, range.min_ms, range.max_ms
        )));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_single_year_range_is_valid() {
        let mut config = Config::default();
        config.crawler.start_year = 2020;
        config.crawler.end_year = 2020;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_reversed_year_range() {
        let mut config = Config::default();
        config.crawler.start_year = 2021;
        config.crawler.end_year = 2020;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.crawler.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_http_base_url() {
        let mut config = Config::default();
        config.crawler.base_url = "ftp://example.com".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_batch_size() {
        let mut config = Config::default();
        config.crawler.batch_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_page_cap() {
        let mut config = Config::default();
        config.crawler.max_pages_per_year = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_blank_marker() {
        let mut config = Config::default();
        config.crawler.no_accidents_marker = "   ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.crawler.request_timeout_secs = 0;
        assert!(validate(&config).is_err());

        config.crawler.request_timeout_secs = 301;
        assert!(validate(&config).is_err());

        config.crawler.request_timeout_secs = 300;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_inverted_delay_range() {
        let mut config = Config::default();
        config.politeness.listing_delay = DelayRange::new(500, 100);
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_user_agent() {
        let mut config = Config::default();
        config.user_agent.value = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_csv_path() {
        let mut config = Config::default();
        config.output.csv_path = String::new();
        assert!(validate(&config).is_err());
    }
}
