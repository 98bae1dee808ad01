//! Closed registry of supported schema tokens.
//!
//! One tag per token; adding a backend means adding a variant here and an
//! arm to the construction match, nothing else.

use serde::{Deserialize, Serialize};

/// Schema token identifying which backend family an address targets.
///
/// Several tokens map onto one backend family at construction time: the
/// XBMC family serves `xbmc`/`xbmcs`/`kodi`/`kodis`, and the JSON family
/// serves `json`/`jsons`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Growl,
    Prowl,
    Kodi,
    Kodis,
    Palot,
    Pbul,
    Pover,
    Toasty,
    Xbmc,
    Xbmcs,
    Json,
    Jsons,
}

impl Schema {
    /// Resolves a schema token case-insensitively. Returns `None` for
    /// anything outside the registry, including the `unknown` sentinel.
    pub fn from_token(token: &str) -> Option<Schema> {
        match token.to_ascii_lowercase().as_str() {
            "growl" => Some(Schema::Growl),
            "prowl" => Some(Schema::Prowl),
            "kodi" => Some(Schema::Kodi),
            "kodis" => Some(Schema::Kodis),
            "palot" => Some(Schema::Palot),
            "pbul" => Some(Schema::Pbul),
            "pover" => Some(Schema::Pover),
            "toasty" => Some(Schema::Toasty),
            "xbmc" => Some(Schema::Xbmc),
            "xbmcs" => Some(Schema::Xbmcs),
            "json" => Some(Schema::Json),
            "jsons" => Some(Schema::Jsons),
            _ => None,
        }
    }

    /// Canonical lowercase token for this schema
    pub fn token(&self) -> &'static str {
        match self {
            Schema::Growl => "growl",
            Schema::Prowl => "prowl",
            Schema::Kodi => "kodi",
            Schema::Kodis => "kodis",
            Schema::Palot => "palot",
            Schema::Pbul => "pbul",
            Schema::Pover => "pover",
            Schema::Toasty => "toasty",
            Schema::Xbmc => "xbmc",
            Schema::Xbmcs => "xbmcs",
            Schema::Json => "json",
            Schema::Jsons => "jsons",
        }
    }

    /// Every registered schema, in token order
    pub fn all() -> &'static [Schema] {
        &[
            Schema::Growl,
            Schema::Prowl,
            Schema::Kodi,
            Schema::Kodis,
            Schema::Palot,
            Schema::Pbul,
            Schema::Pover,
            Schema::Toasty,
            Schema::Xbmc,
            Schema::Xbmcs,
            Schema::Json,
            Schema::Jsons,
        ]
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tokens_roundtrip() {
        for schema in Schema::all() {
            assert_eq!(Schema::from_token(schema.token()), Some(*schema));
        }
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        assert_eq!(Schema::from_token("GROWL"), Some(Schema::Growl));
        assert_eq!(Schema::from_token("KoDiS"), Some(Schema::Kodis));
    }

    #[test]
    fn test_unregistered_tokens_rejected() {
        assert_eq!(Schema::from_token("bogus"), None);
        assert_eq!(Schema::from_token("unknown"), None);
        assert_eq!(Schema::from_token(""), None);
    }
}
