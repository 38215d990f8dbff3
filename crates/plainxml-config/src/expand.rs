//! `${VAR}` / `${VAR:-default}` expansion in path settings.

use crate::ConfigError;

/// Expand `${VAR}` references in `value`.
///
/// `${VAR:-default}` falls back to `default` when `VAR` is unset; a bare
/// `${VAR}` that is unset is an error naming `field`. Values without `${`
/// are returned unchanged, so a literal `$` in a path survives.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| match std::env::var(name) {
        Ok(found) => Ok(Some(found)),
        Err(_) => Err(UnsetVar(name.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);
