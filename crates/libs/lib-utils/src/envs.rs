//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, treating unset and blank values as absent.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    get_env(name).ok().filter(|val| !val.trim().is_empty())
}

/// Get an environment variable or fall back to `default`.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Get and parse an environment variable, using `default` when it is unset.
///
/// A value that is present but does not parse is an error, not a silent default.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_opt(name) {
        Some(val) => val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name)),
        None => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_parse_or_defaults_when_unset() {
        let val: u64 = get_env_parse_or("LIB_UTILS_TEST_UNSET_VAR", 30).unwrap();
        assert_eq!(val, 30);
    }

    #[test]
    fn test_get_env_parse_or_rejects_garbage() {
        env::set_var("LIB_UTILS_TEST_BAD_NUMBER", "thirty");
        let res = get_env_parse_or::<u64>("LIB_UTILS_TEST_BAD_NUMBER", 30);
        assert!(matches!(res, Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_NUMBER"))));
    }

    #[test]
    fn test_blank_value_counts_as_unset() {
        env::set_var("LIB_UTILS_TEST_BLANK", "   ");
        assert_eq!(get_env_opt("LIB_UTILS_TEST_BLANK"), None);
        assert_eq!(get_env_or("LIB_UTILS_TEST_BLANK", "grou"), "grou");
    }
}
