//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, falling back to `default` when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get and parse an environment variable, falling back to `default` when unset.
///
/// A variable that is set but unparsable is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_parse(name) {
        Err(Error::MissingEnv(_)) => Ok(default),
        other => other,
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_parse_or_default_when_missing() {
        let value: u16 = get_env_parse_or("LIB_UTILS_TEST_UNSET_PORT", 8000).unwrap();
        assert_eq!(value, 8000);
    }

    #[test]
    fn test_get_env_parse_wrong_format() {
        env::set_var("LIB_UTILS_TEST_BAD_NUMBER", "eighty");
        let result = get_env_parse::<u16>("LIB_UTILS_TEST_BAD_NUMBER");
        assert_eq!(result, Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_NUMBER")));
        env::remove_var("LIB_UTILS_TEST_BAD_NUMBER");
    }

    #[test]
    fn test_get_env_missing() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_DEFINITELY_UNSET"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_DEFINITELY_UNSET"))
        );
    }
}
