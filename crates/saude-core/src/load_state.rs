use crate::location::Location;

/// Retrieval progress for one display session.
///
/// Starts at [`LoadState::Pending`] and moves once to either terminal
/// variant. Each transition is a new value replacing the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// No data yet.
    #[default]
    Pending,
    /// Retrieval did not succeed; carries a human-readable description.
    Failed(String),
    /// Zero or more locations in server-delivered order.
    Available(Vec<Location>),
}

impl LoadState {
    /// Returns true once the session has reached `Failed` or `Available`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoadState::Pending)
    }

    /// Short variant name for logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Pending => "pending",
            LoadState::Failed(_) => "failed",
            LoadState::Available(_) => "available",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadState::Pending => write!(f, "pending"),
            LoadState::Failed(description) => write!(f, "failed: {description}"),
            LoadState::Available(locations) => {
                write!(f, "available ({} locations)", locations.len())
            }
        }
    }
}
