use std::{fmt, str::FromStr};

lazy_static::lazy_static! {
    static ref COMPILED_MODE: BuildMode = option_env!("FINDER_BUILD_MODE")
        .and_then(|value| value.parse().ok())
        .unwrap_or(if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        });
}

/// Whether the application was built for development or production.
///
/// Resolved once at startup and passed explicitly to whatever needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildMode {
    /// Local or debug build; unfinished routes are visible.
    Development,
    /// Release build served to users.
    Production,
}

/// A build mode name that is neither development nor production.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown build mode '{0}', expected 'development' or 'production'")]
pub struct ParseBuildModeError(String);

impl BuildMode {
    /// Mode baked into this binary.
    ///
    /// `FINDER_BUILD_MODE` at compile time wins; otherwise debug builds are
    /// development builds and release builds are production builds.
    pub fn compiled() -> Self {
        *COMPILED_MODE
    }

    /// Interprets a `DEBUG`-style switch: unset or empty means production,
    /// any other value (whitespace included) means development.
    pub fn from_debug_flag(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::Production,
            Some(_) => Self::Development,
        }
    }

    /// Whether this is a production build.
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// Lowercase name, `development` or `production`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for BuildMode {
    type Err = ParseBuildModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "debug" => Ok(Self::Development),
            "production" | "prod" | "release" => Ok(Self::Production),
            other => Err(ParseBuildModeError(other.to_owned())),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag() {
        assert_eq!(BuildMode::from_debug_flag(None), BuildMode::Production);
        assert_eq!(BuildMode::from_debug_flag(Some("")), BuildMode::Production);
        assert_eq!(BuildMode::from_debug_flag(Some(" ")), BuildMode::Development);
        assert_eq!(BuildMode::from_debug_flag(Some("1")), BuildMode::Development);
        assert_eq!(BuildMode::from_debug_flag(Some("false")), BuildMode::Development);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Production".parse(), Ok(BuildMode::Production));
        assert_eq!("dev".parse(), Ok(BuildMode::Development));
        assert_eq!(
            "staging".parse::<BuildMode>(),
            Err(ParseBuildModeError("staging".to_owned()))
        );
    }

    #[test]
    fn test_compiled_is_stable() {
        assert_eq!(BuildMode::compiled(), BuildMode::compiled());
    }
}
