use crate::config::types::{CheckerConfig, Config, UserAgentConfig, WhitelistConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_checker_config(&config.checker)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_whitelist_config(&config.whitelist)?;
    Ok(())
}

/// Validates checker configuration
fn validate_checker_config(config: &CheckerConfig) -> Result<(), ConfigError> {
    if config.grace_days < 1 {
        return Err(ConfigError::Validation(format!(
            "grace_days must be >= 1, got {}",
            config.grace_days
        )));
    }

    if config.backoff_base_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "backoff_base_seconds must be >= 1, got {}",
            config.backoff_base_seconds
        )));
    }

    if config.max_concurrent_probes < 1 || config.max_concurrent_probes > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_probes must be between 1 and 100, got {}",
            config.max_concurrent_probes
        )));
    }

    if config.redirect_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "redirect_limit must be >= 1, got {}",
            config.redirect_limit
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.impersonate.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent impersonate string cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates whitelist configuration
///
/// Every entry must parse as an absolute http(s) URL. Entries are matched in
/// normalized form at runtime, but accepting only real URLs here keeps typos
/// from silently matching nothing.
fn validate_whitelist_config(config: &WhitelistConfig) -> Result<(), ConfigError> {
    for entry in config.urls.iter().chain(config.prefixes.iter()) {
        let url = Url::parse(entry)
            .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", entry, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "'{}': whitelist entries must use http or https",
                entry
            )));
        }
    }

    Ok(())
}
