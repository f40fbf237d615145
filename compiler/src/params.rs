use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::{GenError, Result},
    utils::quote,
};

lazy_static! {
    // Foreign keys such as Go's `M<proto path>=<import path>` carry slashes and dots.
    static ref PARAM_KEY: Regex = Regex::new(r"^[^\s=,]+$").unwrap();
}

/// Directory of `<category>.tmpl` override templates.
pub const TEMPLATES_KEY: &str = "templates";
/// Strict template data access; defaults to `true`.
pub const STRICT_KEY: &str = "strict";

/// Immutable generation options, parsed once from the host's
/// `key=value,key2=value2` option string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    values: BTreeMap<String, String>,
}

impl Parameters {
    pub fn new() -> Self {
        Parameters::default()
    }

    /// Parses a comma-separated option string. A bare `key` has the value `""`,
    /// empty segments are skipped and a repeated key keeps its last value.
    pub fn parse(text: &str) -> Result<Self> {
        let pairs = text
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (segment, ""),
            });
        Parameters::from_pairs(pairs)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in pairs {
            let key = key.into();
            if !PARAM_KEY.is_match(&key) {
                return Err(GenError::Configuration(format!(
                    "Invalid parameter name {}",
                    quote(&key)
                )));
            }
            values.insert(key, value.into());
        }
        Ok(Parameters { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Reads a boolean option. A bare key counts as `true`.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        match value.to_ascii_lowercase().as_str() {
            "" | "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no"      => Ok(false),
            _ => Err(GenError::Configuration(format!(
                "Parameter {} expects a boolean but found {}",
                quote(key),
                quote(value)
            ))),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromStr for Parameters {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        Parameters::parse(s)
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if value.is_empty() {
                write!(f, "{}", key)?;
            } else {
                write!(f, "{}={}", key, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_bare_keys() {
        let params = Parameters::parse(" templates = ./tpl ,strict,,paths=source_relative")
            .expect("valid parameters");
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("templates"), Some("./tpl"));
        assert_eq!(params.get("strict"), Some(""));
        assert_eq!(params.get("paths"), Some("source_relative"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.get_or("missing", "x"), "x");
    }

    #[test]
    fn later_duplicate_wins() {
        let params = Parameters::parse("a=1,a=2").expect("valid parameters");
        assert_eq!(params.get("a"), Some("2"));
    }

    #[test]
    fn value_may_contain_equals() {
        let params = Parameters::parse("m=a=b").expect("valid parameters");
        assert_eq!(params.get("m"), Some("a=b"));
    }

    #[test]
    fn empty_string_is_empty() {
        assert!(Parameters::parse("").expect("valid parameters").is_empty());
    }

    #[test]
    fn rejects_empty_key() {
        let err = Parameters::parse("=value").unwrap_err();
        assert!(matches!(err, GenError::Configuration(_)));
        assert!(Parameters::from_pairs([("two words", "x")]).is_err());
    }

    #[test]
    fn accepts_go_import_mappings() {
        let params = Parameters::parse("paths=source_relative,Mgreet/greet.proto=example.com/greet")
            .expect("valid parameters");
        assert_eq!(params.get("Mgreet/greet.proto"), Some("example.com/greet"));
        assert!(crate::verifier::verify_parameters(&params).is_ok());
    }

    #[test]
    fn bools() {
        let params = Parameters::parse("a,b=false,c=YES,d=maybe").expect("valid parameters");
        assert!(params.bool_or("a", false).unwrap());
        assert!(!params.bool_or("b", true).unwrap());
        assert!(params.bool_or("c", false).unwrap());
        assert!(params.bool_or("zzz", true).unwrap());
        assert!(matches!(params.bool_or("d", true), Err(GenError::Configuration(_))));
    }

    #[test]
    fn display_is_sorted_and_reparses() {
        let params = Parameters::parse("z=1,a,m=x").expect("valid parameters");
        assert_eq!(params.to_string(), "a,m=x,z=1");
        assert_eq!(params.to_string().parse::<Parameters>().unwrap(), params);
    }
}
