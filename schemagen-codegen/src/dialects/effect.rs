//! Effect Schema emitter.

use schemagen_ast::{Keyword, Literal};
use schemagen_core::Target;

use super::{Field, SchemaDialect, block, entries, fold_binary, literal_value};
use crate::model::ModelType;

/// Emits Effect `Schema` definitions.
///
/// Writes the positional `ES.Record(...)` form and the `@effect/schema`
/// import path; the effect fixup rules convert both.
#[derive(Debug, Clone, Copy, Default)]
pub struct Effect;

impl SchemaDialect for Effect {
    fn target(&self) -> Target {
        Target::Effect
    }

    fn imports(&self) -> Option<&'static str> {
        Some("import { Schema as ES } from '@effect/schema'")
    }

    fn map_keyword(&self, keyword: Keyword) -> String {
        let schema = match keyword {
            Keyword::String => "ES.String",
            Keyword::Number => "ES.Number",
            Keyword::Boolean => "ES.Boolean",
            Keyword::BigInt => "ES.BigIntFromSelf",
            Keyword::Symbol => "ES.SymbolFromSelf",
            Keyword::Object => "ES.Object",
            Keyword::Null => "ES.Null",
            Keyword::Undefined => "ES.Undefined",
            Keyword::Void => "ES.Void",
            Keyword::Any => "ES.Any",
            Keyword::Unknown => "ES.Unknown",
            Keyword::Never => "ES.Never",
        };
        schema.to_string()
    }

    fn map_date(&self) -> String {
        "ES.Date".to_string()
    }

    fn map_literal(&self, literal: &Literal) -> String {
        format!("ES.Literal({})", literal_value(literal))
    }

    fn map_array(&self, item: &str) -> String {
        format!("ES.Array({})", item)
    }

    fn map_tuple(&self, items: &[String]) -> String {
        format!("ES.Tuple({})", items.join(", "))
    }

    fn map_union(&self, variants: &[String]) -> String {
        format!("ES.Union({})", variants.join(", "))
    }

    fn map_intersection(&self, parts: &[String]) -> String {
        fold_binary(parts, |left, right| format!("ES.extend({}, {})", left, right))
    }

    fn map_record(&self, key: &ModelType, value: &str) -> String {
        match key {
            ModelType::Keyword(Keyword::String) => format!("ES.Record({})", value),
            key => format!("ES.Record({}, {})", self.render_type(key), value),
        }
    }

    fn map_object(&self, fields: &[Field]) -> String {
        let entries = entries(fields, |field| {
            if field.optional {
                format!("ES.optional({})", field.value)
            } else {
                field.value.clone()
            }
        });
        block("ES.Struct({", &entries, "})")
    }

    fn map_declaration(&self, name: &str, schema: &str) -> String {
        format!(
            "export type {name} = ES.Schema.Type<typeof {name}>\nexport const {name} = {schema}\n"
        )
    }
}
