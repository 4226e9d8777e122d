/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::warn;

/// Reads and parses an environment variable
///
/// Surrounding whitespace is ignored. Returns `None` when the variable is
/// missing or empty, and `Some(Err(raw))` when it is present but unparsable.
fn parse_env<T: FromStr>(env_var: &str) -> Option<Result<T, String>> {
    let raw = env::var(env_var).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.parse::<T>().map_err(|_| raw.clone()))
}

/// Gets an environment variable or returns a default value if not found or cannot be parsed
///
/// # Arguments
///
/// * `env_var` - The name of the environment variable
/// * `default` - The value used when the variable is missing, empty or invalid
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match parse_env(env_var) {
        Some(Ok(value)) => value,
        Some(Err(raw)) => {
            warn!("Failed to parse {}: {}, using default", env_var, raw);
            default
        }
        None => default,
    }
}

/// Gets an environment variable and parses it, returning None if not found or invalid
pub fn get_env_or_none<T: FromStr>(env_var: &str) -> Option<T>
where
    <T as FromStr>::Err: Debug,
{
    match parse_env(env_var)? {
        Ok(value) => Some(value),
        Err(raw) => {
            warn!("Ignoring unparsable {}: {}", env_var, raw);
            None
        }
    }
}
