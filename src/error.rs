use std::fmt;
use thiserror::Error;

use crate::providers::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    QueryIsEmpty,
    NameIsEmpty,
}

impl ValidationFailure {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::QueryIsEmpty => "query_is_empty",
            ValidationFailure::NameIsEmpty => "name_is_empty",
        }
    }
}

/// Which provider call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStage {
    Search,
    People,
}

impl fmt::Display for ProviderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderStage::Search => f.write_str("search"),
            ProviderStage::People => f.write_str("people"),
        }
    }
}

/// Classified failure of a pipeline run. `Display` renders the machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("{}", .0.code())]
    Validation(ValidationFailure),

    #[error("{stage}_failed:{kind}")]
    Provider {
        stage: ProviderStage,
        kind: &'static str,
    },
}

impl PipelineError {
    pub fn provider(stage: ProviderStage, err: &ProviderError) -> Self {
        PipelineError::Provider {
            stage,
            kind: err.kind(),
        }
    }

    pub fn code(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            PipelineError::Validation(ValidationFailure::QueryIsEmpty).code(),
            "query_is_empty"
        );
        assert_eq!(
            PipelineError::Validation(ValidationFailure::NameIsEmpty).code(),
            "name_is_empty"
        );
        assert_eq!(
            PipelineError::provider(ProviderStage::Search, &ProviderError::Timeout).code(),
            "search_failed:Timeout"
        );
        assert_eq!(
            PipelineError::provider(ProviderStage::People, &ProviderError::Status { status: 502 })
                .code(),
            "people_failed:StatusError"
        );
    }

    #[test]
    fn test_code_never_contains_provider_message() {
        let err = ProviderError::Unavailable("secret internal host 10.0.0.7".into());
        let code = PipelineError::provider(ProviderStage::Search, &err).code();
        assert!(!code.contains("10.0.0.7"));
    }
}
