//! Per-icon outcome lines.

use std::fmt;

/// What happened to one icon in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(String),
    Replaced(String),
    Removed(String),
    Skipped { icon: String, reason: String },
    Failed { icon: String, reason: String },
}

impl Outcome {
    pub fn skipped(icon: &str, reason: impl Into<String>) -> Self {
        Self::Skipped {
            icon: icon.to_string(),
            reason: reason.into(),
        }
    }

    pub fn failed(icon: &str, reason: impl fmt::Display) -> Self {
        Self::Failed {
            icon: icon.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(icon) => write!(f, "added {icon}"),
            Self::Replaced(icon) => write!(f, "replaced {icon}"),
            Self::Removed(icon) => write!(f, "removed {icon}"),
            Self::Skipped { icon, reason } => write!(f, "skipped {icon}: {reason}"),
            Self::Failed { icon, reason } => write!(f, "failed {icon}: {reason}"),
        }
    }
}

/// Log one line per outcome.
pub fn print(outcomes: &[Outcome]) {
    for outcome in outcomes {
        match outcome {
            Outcome::Failed { .. } => tracing::error!("{}", outcome),
            Outcome::Skipped { .. } => tracing::warn!("{}", outcome),
            _ => tracing::info!("{}", outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_outcome_lines() {
        assert_eq!(Outcome::Added("home".into()).to_string(), "added home");
        assert_eq!(
            Outcome::skipped("home", "already registered").to_string(),
            "skipped home: already registered"
        );
        assert_eq!(
            Outcome::failed("ghost", "Icon not found: ghost").to_string(),
            "failed ghost: Icon not found: ghost"
        );
    }
}
