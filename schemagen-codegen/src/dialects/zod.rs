//! Zod schema emitter.

use schemagen_ast::{Keyword, Literal};
use schemagen_core::Target;

use super::{Field, SchemaDialect, block, entries, fold_binary, literal_value};
use crate::model::ModelType;

/// Emits `zod` schemas.
///
/// Records are written as `z.record(value)`; the key schema is added by the
/// zod fixup rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zod;

impl SchemaDialect for Zod {
    fn target(&self) -> Target {
        Target::Zod
    }

    fn imports(&self) -> Option<&'static str> {
        Some("import { z } from 'zod'")
    }

    fn map_keyword(&self, keyword: Keyword) -> String {
        let schema = match keyword {
            Keyword::String => "z.string()",
            Keyword::Number => "z.number()",
            Keyword::Boolean => "z.boolean()",
            Keyword::BigInt => "z.bigint()",
            Keyword::Symbol => "z.symbol()",
            Keyword::Object => "z.object({})",
            Keyword::Null => "z.null()",
            Keyword::Undefined => "z.undefined()",
            Keyword::Void => "z.void()",
            Keyword::Any => "z.any()",
            Keyword::Unknown => "z.unknown()",
            Keyword::Never => "z.never()",
        };
        schema.to_string()
    }

    fn map_date(&self) -> String {
        "z.date()".to_string()
    }

    fn map_literal(&self, literal: &Literal) -> String {
        format!("z.literal({})", literal_value(literal))
    }

    fn map_array(&self, item: &str) -> String {
        format!("z.array({})", item)
    }

    fn map_tuple(&self, items: &[String]) -> String {
        format!("z.tuple([{}])", items.join(", "))
    }

    fn map_union(&self, variants: &[String]) -> String {
        format!("z.union([{}])", variants.join(", "))
    }

    fn map_intersection(&self, parts: &[String]) -> String {
        fold_binary(parts, |left, right| format!("z.intersection({}, {})", left, right))
    }

    fn map_record(&self, _key: &ModelType, value: &str) -> String {
        format!("z.record({})", value)
    }

    fn map_object(&self, fields: &[Field]) -> String {
        let entries = entries(fields, |field| {
            if field.optional {
                format!("{}.optional()", field.value)
            } else {
                field.value.clone()
            }
        });
        block("z.object({", &entries, "})")
    }

    fn map_declaration(&self, name: &str, schema: &str) -> String {
        format!(
            "export type {name} = z.infer<typeof {name}>\nexport const {name} = {schema}\n"
        )
    }
}
