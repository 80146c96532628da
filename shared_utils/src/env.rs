use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads an environment variable, falling back to `default` when it's unset.
///
/// Useful for optional overrides (e.g. pointing a provider at a mock server
/// during tests) where a missing variable is not an error.
pub fn env_var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_is_a_typed_error() {
        let err = get_env_var("SHARED_UTILS_TEST_DOES_NOT_EXIST").unwrap_err();
        assert!(err.to_string().contains("SHARED_UTILS_TEST_DOES_NOT_EXIST"));
    }

    #[test]
    fn fallback_is_used_when_unset() {
        let value = env_var_or("SHARED_UTILS_TEST_DOES_NOT_EXIST", "fallback");
        assert_eq!(value, "fallback");
    }
}
