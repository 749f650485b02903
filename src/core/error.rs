//! Error types for study, apply, and the cook entry points.

use thiserror::Error;

/// Errors raised while turning a recipe into actions.
#[derive(Debug, Error)]
pub enum StudyError {
    /// The top-level `"recipe"` key is missing or is not an object.
    #[error("recipe document has no \"recipe\" object")]
    RecipeStructure,

    /// A control key that must hold a string holds something else.
    #[error("'{key}' of '{context}' must be a string, found {found}")]
    InvalidControl {
        /// Action context the key belongs to.
        context: String,
        /// The control key name.
        key: String,
        /// Kind of the value that was found.
        found: &'static str,
    },
}

/// Shape mismatches between a recipe and the material it is applied to.
///
/// These abort the cook. Nothing is written to the chef's result.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// A value had the wrong JSON kind for the operation.
    #[error("{operation} '{context}': expected {expected} at '{path}', found {found}")]
    TypeMismatch {
        /// Operation being executed.
        operation: &'static str,
        /// Context of the failing action.
        context: String,
        /// Material path or recipe field being read.
        path: String,
        /// Expected kind.
        expected: &'static str,
        /// Actual kind.
        found: &'static str,
    },

    /// A swap without values had no replace path to read.
    #[error("swap '{context}' has neither values nor a replace path")]
    MissingSource {
        /// Context of the failing action.
        context: String,
    },

    /// `replaces` is shorter than `values`.
    #[error("swap '{context}' has no replace for value {index} (only {len} replaces)")]
    ReplaceIndex {
        /// Context of the failing action.
        context: String,
        /// Index into values that had no replace.
        index: usize,
        /// Number of replaces available.
        len: usize,
    },
}

impl ApplyError {
    /// Create a type mismatch error.
    #[inline]
    pub fn type_mismatch(
        operation: &'static str,
        context: &str,
        path: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        ApplyError::TypeMismatch {
            operation,
            context: context.to_string(),
            path: path.into(),
            expected,
            found,
        }
    }
}

/// Errors returned by the public cook entry points.
#[derive(Debug, Error)]
pub enum CookError {
    /// The material buffer is not valid JSON.
    #[error("failed to parse material data: {0}")]
    MaterialParse(#[source] serde_json::Error),

    /// The recipe buffer is not valid JSON.
    #[error("failed to parse recipe data: {0}")]
    RecipeParse(#[source] serde_json::Error),

    /// Studying the recipe failed.
    #[error("failed to study recipe structure: {0}")]
    RecipeStudy(#[from] StudyError),

    /// Applying the actions aborted on a shape mismatch.
    #[error("failed to apply recipe: {0}")]
    Apply(#[from] ApplyError),
}

/// Result alias for cook operations.
pub type CookResult<T> = Result<T, CookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_error_wraps_into_cook_error() {
        let err: CookError = StudyError::RecipeStructure.into();
        assert!(matches!(err, CookError::RecipeStudy(StudyError::RecipeStructure)));
        assert!(err.to_string().contains("study"));
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ApplyError::type_mismatch("swapmap", "people", "users", "array", "string");
        let msg = err.to_string();
        assert!(msg.contains("swapmap 'people'"));
        assert!(msg.contains("expected array at 'users'"));
        assert!(msg.contains("found string"));
    }

    #[test]
    fn test_parse_errors_keep_source() {
        let source = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err = CookError::MaterialParse(source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to parse material data"));
    }
}
