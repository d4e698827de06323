use std::fmt;

/// Why a configuration document could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// The source had nothing for this URL (network failure, missing file).
    Unavailable { url: String },
    /// The document was fetched but is not valid JSON for its type.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Unavailable { url } => write!(f, "{url} is unavailable"),
            ConfigError::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Unavailable { .. } => None,
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_names_the_url() {
        let e = ConfigError::Unavailable { url: "settings.json".into() };
        assert_eq!(e.to_string(), "settings.json is unavailable");
        assert!(e.source().is_none());
    }

    #[test]
    fn parse_errors_keep_their_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e = ConfigError::from(json_err);
        assert!(e.to_string().starts_with("parse error"));
        assert!(e.source().is_some());
    }
}
