use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("Expected X.Y.Z[-prerelease] format, got: {input}")]
    InvalidFormat { input: String },
    #[error("Invalid version {input}: {reason}")]
    Invalid { input: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("Invalid {component} component in range {input}: {value}")]
    InvalidComponent {
        input: String,
        component: RangeComponent,
        value: String,
    },
    #[error("Invalid prerelease in range {input}: {details}")]
    InvalidPrerelease { input: String, details: String },
    #[error("Dangling operator in range: {input}")]
    DanglingOperator { input: String },
    #[error("Missing version in range: {input}")]
    MissingVersion { input: String },
    #[error("Too many components in range {input}: {value}")]
    ExtraComponent { input: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeComponent {
    Major,
    Minor,
    Patch,
}

impl std::fmt::Display for RangeComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}
