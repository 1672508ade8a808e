//! JSON Schema emitter.

use schemagen_ast::{Keyword, Literal};
use schemagen_core::Target;

use super::{Field, SchemaDialect, block, literal_value, quote};
use crate::model::ModelType;

/// Emits plain JSON Schema objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchema;

impl SchemaDialect for JsonSchema {
    fn target(&self) -> Target {
        Target::JsonSchema
    }

    fn imports(&self) -> Option<&'static str> {
        None
    }

    fn map_keyword(&self, keyword: Keyword) -> String {
        let schema = match keyword {
            Keyword::String => "{ type: 'string' }",
            Keyword::Number => "{ type: 'number' }",
            Keyword::Boolean => "{ type: 'boolean' }",
            Keyword::BigInt => "{ type: 'integer' }",
            Keyword::Object => "{ type: 'object' }",
            Keyword::Null => "{ type: 'null' }",
            Keyword::Undefined | Keyword::Void | Keyword::Never => "{ not: {} }",
            Keyword::Symbol | Keyword::Any | Keyword::Unknown => "{}",
        };
        schema.to_string()
    }

    fn map_date(&self) -> String {
        "{ type: 'string', format: 'date-time' }".to_string()
    }

    fn map_literal(&self, literal: &Literal) -> String {
        format!("{{ const: {} }}", literal_value(literal))
    }

    fn map_array(&self, item: &str) -> String {
        block("{", &["type: 'array'".to_string(), format!("items: {}", item)], "}")
    }

    fn map_tuple(&self, items: &[String]) -> String {
        let min = items.len();
        block(
            "{",
            &[
                "type: 'array'".to_string(),
                format!("prefixItems: {}", block("[", items, "]")),
                format!("minItems: {}", min),
                format!("maxItems: {}", min),
            ],
            "}",
        )
    }

    fn map_union(&self, variants: &[String]) -> String {
        block("{", &[format!("anyOf: {}", block("[", variants, "]"))], "}")
    }

    fn map_intersection(&self, parts: &[String]) -> String {
        block("{", &[format!("allOf: {}", block("[", parts, "]"))], "}")
    }

    fn map_record(&self, _key: &ModelType, value: &str) -> String {
        block(
            "{",
            &["type: 'object'".to_string(), format!("additionalProperties: {}", value)],
            "}",
        )
    }

    fn map_object(&self, fields: &[Field]) -> String {
        let properties: Vec<String> = fields
            .iter()
            .map(|field| format!("{}: {}", field.key, field.value))
            .collect();
        let required: Vec<String> = fields
            .iter()
            .filter(|field| !field.optional)
            .map(|field| {
                if field.key.starts_with('\'') {
                    field.key.clone()
                } else {
                    quote(&field.key)
                }
            })
            .collect();

        let mut entries = vec![
            "type: 'object'".to_string(),
            format!("properties: {}", block("{", &properties, "}")),
        ];
        if !required.is_empty() {
            entries.push(format!("required: [{}]", required.join(", ")));
        }
        block("{", &entries, "}")
    }

    fn map_declaration(&self, name: &str, schema: &str) -> String {
        format!("export const {name} = {schema}\n")
    }
}
