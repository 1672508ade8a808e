//! Valibot schema emitter.

use schemagen_ast::{Keyword, Literal};
use schemagen_core::Target;

use super::{Field, SchemaDialect, block, entries, literal_value};
use crate::model::ModelType;

/// Emits `valibot` schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Valibot;

impl SchemaDialect for Valibot {
    fn target(&self) -> Target {
        Target::Valibot
    }

    fn imports(&self) -> Option<&'static str> {
        Some("import * as v from 'valibot'")
    }

    fn map_keyword(&self, keyword: Keyword) -> String {
        let schema = match keyword {
            Keyword::String => "v.string()",
            Keyword::Number => "v.number()",
            Keyword::Boolean => "v.boolean()",
            Keyword::BigInt => "v.bigint()",
            Keyword::Symbol => "v.symbol()",
            Keyword::Object => "v.object({})",
            Keyword::Null => "v.null()",
            Keyword::Undefined => "v.undefined()",
            Keyword::Void => "v.void()",
            Keyword::Any => "v.any()",
            Keyword::Unknown => "v.unknown()",
            Keyword::Never => "v.never()",
        };
        schema.to_string()
    }

    fn map_date(&self) -> String {
        "v.date()".to_string()
    }

    fn map_literal(&self, literal: &Literal) -> String {
        format!("v.literal({})", literal_value(literal))
    }

    fn map_array(&self, item: &str) -> String {
        format!("v.array({})", item)
    }

    fn map_tuple(&self, items: &[String]) -> String {
        format!("v.tuple([{}])", items.join(", "))
    }

    fn map_union(&self, variants: &[String]) -> String {
        format!("v.union([{}])", variants.join(", "))
    }

    fn map_intersection(&self, parts: &[String]) -> String {
        format!("v.intersect([{}])", parts.join(", "))
    }

    fn map_record(&self, key: &ModelType, value: &str) -> String {
        format!("v.record({}, {})", self.render_type(key), value)
    }

    fn map_object(&self, fields: &[Field]) -> String {
        let entries = entries(fields, |field| {
            if field.optional {
                format!("v.optional({})", field.value)
            } else {
                field.value.clone()
            }
        });
        block("v.object({", &entries, "})")
    }

    fn map_declaration(&self, name: &str, schema: &str) -> String {
        format!(
            "export type {name} = v.InferOutput<typeof {name}>\nexport const {name} = {schema}\n"
        )
    }
}
