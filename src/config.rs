/// Runtime configuration read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: String,
    /// Rebuild the season's stats every time a match is finalized
    pub recompute_on_finalize: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            recompute_on_finalize: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = lookup("BIND_ADDR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.bind_addr);

        let recompute_on_finalize = lookup("RECOMPUTE_ON_FINALIZE")
            .and_then(|value| parse_flag(&value))
            .unwrap_or(defaults.recompute_on_finalize);

        Self {
            bind_addr,
            recompute_on_finalize,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn reads_bind_addr() {
        let config = config_from(&[("BIND_ADDR", "127.0.0.1:8080")]);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[rstest]
    #[case("false", false)]
    #[case("0", false)]
    #[case("OFF", false)]
    #[case("true", true)]
    #[case("yes", true)]
    #[case("garbage", true)]
    fn parses_recompute_flag(#[case] raw: &str, #[case] expected: bool) {
        let config = config_from(&[("RECOMPUTE_ON_FINALIZE", raw)]);
        assert_eq!(config.recompute_on_finalize, expected);
    }
}
