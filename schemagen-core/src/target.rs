//! Target schema dialects.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported output schema dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// `@sinclair/typebox`
    TypeBox,
    /// `zod`
    Zod,
    /// `valibot`
    Valibot,
    /// `yup`
    Yup,
    /// `effect` Schema
    Effect,
    /// Plain JSON Schema objects
    JsonSchema,
    /// The flattened TypeScript declarations themselves
    Types,
}

/// Error returned when a target name is not one of the supported dialects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid target '{name}', available targets are: {}", Target::names().join(", "))]
pub struct UnknownTarget {
    pub name: String,
}

impl Target {
    /// Every supported target, in display order.
    pub const ALL: [Target; 7] = [
        Target::TypeBox,
        Target::Zod,
        Target::Valibot,
        Target::Yup,
        Target::Effect,
        Target::JsonSchema,
        Target::Types,
    ];

    /// Returns the target identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::TypeBox => "typebox",
            Target::Zod => "zod",
            Target::Valibot => "valibot",
            Target::Yup => "yup",
            Target::Effect => "effect",
            Target::JsonSchema => "jsonschema",
            Target::Types => "types",
        }
    }

    /// All target identifiers.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Target::as_str).collect()
    }

    /// Header comment placed at the top of every generated schema file.
    pub fn header(&self) -> String {
        format!(
            "// THIS FILE IS AUTO-GENERATED FOR {}. DO NOT EDIT.",
            self.as_str().to_uppercase()
        )
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| UnknownTarget {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Target::from_str("zod").unwrap(), Target::Zod);
        assert_eq!(Target::from_str("typebox").unwrap(), Target::TypeBox);
        assert_eq!(Target::from_str("JsonSchema").unwrap(), Target::JsonSchema);
        assert_eq!(Target::from_str("types").unwrap(), Target::Types);
        assert!(Target::from_str("arktype").is_err());
    }

    #[test]
    fn test_unknown_target_message() {
        let err = Target::from_str("arktype").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid target 'arktype', available targets are: typebox, zod, valibot, yup, effect, jsonschema, types"
        );
    }

    #[test]
    fn test_display_round_trip() {
        for target in Target::ALL {
            assert_eq!(Target::from_str(&target.to_string()).unwrap(), target);
        }
    }

    #[test]
    fn test_header() {
        assert_eq!(
            Target::Zod.header(),
            "// THIS FILE IS AUTO-GENERATED FOR ZOD. DO NOT EDIT."
        );
    }

    #[test]
    fn test_deserialize() {
        let zod: Target = serde_json::from_str(r#""zod""#).unwrap();
        assert_eq!(zod, Target::Zod);

        let json: Target = serde_json::from_str(r#""jsonschema""#).unwrap();
        assert_eq!(json, Target::JsonSchema);
    }
}
