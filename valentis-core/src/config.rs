use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "/api";

/// Runtime settings the browser bundle needs; served as `/config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(base: &str) -> Self {
        let trimmed = base.trim().trim_end_matches('/');
        Self {
            api_base: if trimmed.is_empty() {
                default_api_base()
            } else {
                trimmed.to_string()
            },
        }
    }

    /// Joins an endpoint path (`/risk/scores`) onto the base.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.api_base)
        } else {
            format!("{}/{path}", self.api_base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_is_normalized() {
        assert_eq!(ClientConfig::with_api_base("http://backend:8000/api/").api_base, "http://backend:8000/api");
        assert_eq!(ClientConfig::with_api_base("  ").api_base, "/api");
        assert_eq!(ClientConfig::default().url("/forecast"), "/api/forecast");
        assert_eq!(ClientConfig::default().url("plans"), "/api/plans");
    }

    #[test]
    fn missing_field_falls_back_to_default() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
