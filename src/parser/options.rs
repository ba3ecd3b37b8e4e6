//! Configuration for the parser.

#[cfg(feature = "bon")]
use bon::Builder;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

/// An invalid configuration.  Detected before any input is examined.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An option has the wrong type or shape.
    #[error("Invalid configuration option \"{option}\": value must be {expected}")]
    InvalidOption {
        /// The option's name.
        option: String,
        /// A description of the accepted values.
        expected: String,
    },

    /// The configuration file is not valid TOML, or names an unknown option.
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(option: &str, expected: &str) -> Self {
        ConfigError::InvalidOption {
            option: option.to_string(),
            expected: expected.to_string(),
        }
    }
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
/// Umbrella options struct.
pub struct Options {
    /// Configure parse-time options.
    pub parse: ParseOptions,

    /// Bounds on the work a single parse may do.
    pub limits: Limits,
}

fn default_unordered_list_markers() -> Vec<String> {
    vec!["-".to_string(), "*".to_string(), "+".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[cfg_attr(feature = "bon", derive(Builder))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
/// Options for block parsing.
pub struct ParseOptions {
    /// The characters that open bullet list items.  Each entry must be a
    /// single character; digits, spaces, and tabs are rejected.
    ///
    /// ```rust
    /// # use blockmark::{parse_document, Options, NodeValue};
    /// let mut options = Options::default();
    /// options.parse.unordered_list_markers = vec!["^".to_string()];
    /// let tree = parse_document("^ one\n^ two\n", &options).unwrap();
    /// let list = tree.first_child(tree.root()).unwrap();
    /// assert!(matches!(tree[list].value, NodeValue::List(..)));
    /// ```
    #[cfg_attr(feature = "bon", builder(default = default_unordered_list_markers()))]
    pub unordered_list_markers: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            unordered_list_markers: default_unordered_list_markers(),
        }
    }
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[cfg_attr(feature = "bon", derive(Builder))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
/// Limits checked between lines.  Exceeding one aborts the parse with
/// [`ParseError::ResourceLimit`](crate::ParseError::ResourceLimit).
pub struct Limits {
    /// The most lines a document may have.
    pub max_lines: Option<usize>,

    /// The deepest nesting of container blocks (block quotes, lists, and
    /// list items), not counting the document.
    ///
    /// ```rust
    /// # use blockmark::{parse_document, Error, Options, ParseError, LimitKind};
    /// let mut options = Options::default();
    /// options.limits.max_depth = 3;
    /// assert!(parse_document("> > > a\n", &options).is_ok());
    /// assert!(matches!(
    ///     parse_document("> > > > a\n", &options),
    ///     Err(Error::Parse(ParseError::ResourceLimit(LimitKind::Depth)))
    /// ));
    /// ```
    #[cfg_attr(feature = "bon", builder(default = 100))]
    pub max_depth: usize,

    /// Wall-clock budget for one parse, in milliseconds in configuration files.
    #[serde(rename = "timeout_ms", deserialize_with = "deserialize_millis")]
    pub timeout: Option<Duration>,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_lines: None,
            max_depth: 100,
            timeout: None,
        }
    }
}

impl Options {
    /// Read options from TOML text.
    ///
    /// ```rust
    /// # use blockmark::Options;
    /// let options = Options::from_toml_str(r#"
    /// [parse]
    /// unordered_list_markers = ["-", "*"]
    ///
    /// [limits]
    /// max_lines = 10000
    /// timeout_ms = 250
    /// "#).unwrap();
    /// assert_eq!(options.parse.unordered_list_markers, ["-", "*"]);
    /// assert_eq!(options.limits.max_lines, Some(10000));
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Options, ConfigError> {
        let value: toml::Value = toml::from_str(s)?;
        Self::from_toml_value(&value)
    }

    /// Read options from an already parsed TOML value.
    pub fn from_toml_value(value: &toml::Value) -> Result<Options, ConfigError> {
        if let Some(markers) = value
            .get("parse")
            .and_then(|p| p.get("unordered_list_markers"))
        {
            let all_strings = markers
                .as_array()
                .map_or(false, |a| a.iter().all(toml::Value::is_str));
            if !all_strings {
                return Err(ConfigError::invalid(
                    "unordered_list_markers",
                    "an array of strings",
                ));
            }
        }

        Ok(value.clone().try_into()?)
    }
}
