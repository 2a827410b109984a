use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Malformed record for match {match_id}: {reason}")]
    MalformedRecord { match_id: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl StatsError {
    pub fn malformed(match_id: &str, reason: impl Into<String>) -> Self {
        StatsError::MalformedRecord {
            match_id: match_id.to_string(),
            reason: reason.into(),
        }
    }
}
