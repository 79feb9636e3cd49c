use serde::Deserialize;
use std::path::Path;

/// Top-level configuration parsed from TOML.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub site: SiteConfig,
}

/// Server-level configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// The deployment's site record: canonical domain plus display name.
/// The debug endpoint reports these and derives the OAuth callback URL
/// from the domain.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub domain: String,
    pub name: String,
}

/// Load and validate config from a TOML file, applying environment variable overrides.
pub fn load_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    let mut config: Config =
        toml::from_str(&content).map_err(|e| format!("Failed to parse TOML config: {e}"))?;

    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Apply environment variable overrides.
fn apply_env_overrides(config: &mut Config) {
    // OAUTH_DEBUG_SITE_DOMAIN overrides site.domain
    if let Ok(val) = std::env::var("OAUTH_DEBUG_SITE_DOMAIN") {
        config.site.domain = val;
    }

    // OAUTH_DEBUG_SITE_NAME overrides site.name
    if let Ok(val) = std::env::var("OAUTH_DEBUG_SITE_NAME") {
        config.site.name = val;
    }
}

/// Validate the entire configuration. Returns an error string on failure.
fn validate(config: &Config) -> Result<(), String> {
    validate_site(&config.site)?;
    Ok(())
}

fn validate_site(site: &SiteConfig) -> Result<(), String> {
    // domain is required and must be a bare hostname
    if site.domain.is_empty() {
        return Err("site.domain is required".to_string());
    }

    if site.domain.starts_with("http://") || site.domain.starts_with("https://") {
        return Err(
            "site.domain must be a bare hostname (no scheme), e.g. example.com".to_string(),
        );
    }

    if site.domain.ends_with('/') {
        return Err("site.domain must not have a trailing slash".to_string());
    }

    let domain_regex = regex_lite::Regex::new(r"^[a-z0-9.-]+(:[0-9]+)?$").unwrap();
    if !domain_regex.is_match(&site.domain) {
        return Err(format!(
            "site.domain '{}' is not a valid hostname (lowercase alphanumeric, dots and hyphens, optional :port)",
            site.domain
        ));
    }

    // name required
    if site.name.is_empty() {
        return Err("site.name is required".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml_str = r#"
[site]
domain = "example.com"
name = "Example"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.site.domain, "example.com");
        assert_eq!(config.site.name, "Example");
        // server section is optional and falls back to defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_domain_with_port_is_accepted() {
        let site = SiteConfig {
            domain: "localhost:8000".to_string(),
            name: "localhost".to_string(),
        };
        assert!(validate_site(&site).is_ok());
    }

    #[test]
    fn test_domain_with_scheme_is_rejected() {
        let site = SiteConfig {
            domain: "http://example.com".to_string(),
            name: "Example".to_string(),
        };
        let result = validate_site(&site);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("bare hostname"));
    }

    #[test]
    fn test_invalid_domain_format() {
        let site = SiteConfig {
            domain: "EXAMPLE_DOMAIN!".to_string(),
            name: "Example".to_string(),
        };
        let result = validate_site(&site);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not a valid hostname"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let site = SiteConfig {
            domain: "example.com".to_string(),
            name: String::new(),
        };
        let result = validate_site(&site);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("site.name"));
    }
}
