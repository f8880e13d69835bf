//! Content-type tags carried by document handles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

/// Media type of a document source.
///
/// Parsing ignores any parameters after `;` and is case-insensitive, so
/// `application/ld+json; profile="..."` is [`MediaType::JsonLd`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MediaType {
    /// `application/ld+json`
    JsonLd,
    /// `application/json`
    Json,
    /// `application/n-quads`
    NQuads,
    /// `text/html`
    Html,
    /// Any other `type/subtype`, stored lower-cased.
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::JsonLd => "application/ld+json",
            Self::Json => "application/json",
            Self::NQuads => "application/n-quads",
            Self::Html => "text/html",
            Self::Other(s) => s,
        }
    }

    /// True for `application/json`, `application/ld+json` and any `+json` suffix type.
    pub fn is_json(&self) -> bool {
        match self {
            Self::JsonLd | Self::Json => true,
            Self::Other(s) => s.ends_with("+json"),
            _ => false,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.split_once('/') {
            Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty() => {}
            _ => {
                return Err(AdapterError::config(format!(
                    "invalid media type ({s}): expected type/subtype"
                )));
            }
        }

        Ok(match essence.as_str() {
            "application/ld+json" => Self::JsonLd,
            "application/json" => Self::Json,
            "application/n-quads" => Self::NQuads,
            "text/html" => Self::Html,
            _ => Self::Other(essence),
        })
    }
}

impl TryFrom<String> for MediaType {
    type Error = AdapterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MediaType> for String {
    fn from(media_type: MediaType) -> Self {
        media_type.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!(
            "application/ld+json".parse::<MediaType>().unwrap(),
            MediaType::JsonLd
        );
        assert_eq!(
            "Application/N-Quads".parse::<MediaType>().unwrap(),
            MediaType::NQuads
        );
        assert_eq!("text/html".parse::<MediaType>().unwrap(), MediaType::Html);
    }

    #[test]
    fn ignores_parameters() {
        let mt: MediaType = r#"application/ld+json; profile="http://www.w3.org/ns/json-ld#expanded""#
            .parse()
            .unwrap();
        assert_eq!(mt, MediaType::JsonLd);
    }

    #[test]
    fn keeps_unknown_types() {
        let mt: MediaType = "application/activity+json".parse().unwrap();
        assert_eq!(mt, MediaType::Other("application/activity+json".into()));
        assert!(mt.is_json());
        assert!(!MediaType::NQuads.is_json());
    }

    #[test]
    fn rejects_missing_subtype() {
        assert!("json".parse::<MediaType>().is_err());
        assert!("application/".parse::<MediaType>().is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&MediaType::NQuads).unwrap();
        assert_eq!(json, "\"application/n-quads\"");
        let back: MediaType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MediaType::NQuads);
    }
}
