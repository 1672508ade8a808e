//! Yup schema emitter.

use schemagen_ast::{Keyword, Literal};
use schemagen_core::Target;

use super::{Field, SchemaDialect, block, entries, fold_binary, literal_value};
use crate::model::ModelType;

const REQUIRED: &str = ".required()";

/// Emits `yup` schemas.
///
/// The default import it writes is rewritten to a namespace import by the
/// yup fixup rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yup;

impl SchemaDialect for Yup {
    fn target(&self) -> Target {
        Target::Yup
    }

    fn imports(&self) -> Option<&'static str> {
        Some("import y from 'yup'")
    }

    fn map_keyword(&self, keyword: Keyword) -> String {
        let schema = match keyword {
            Keyword::String => "y.string().required()",
            Keyword::Number => "y.number().required()",
            Keyword::Boolean => "y.boolean().required()",
            Keyword::Object => "y.object().required()",
            Keyword::Null => "y.mixed().oneOf([null])",
            Keyword::Undefined | Keyword::Void => "y.mixed().oneOf([undefined])",
            Keyword::Never => "y.mixed().oneOf([])",
            Keyword::BigInt | Keyword::Symbol | Keyword::Any | Keyword::Unknown => "y.mixed()",
        };
        schema.to_string()
    }

    fn map_date(&self) -> String {
        "y.date().required()".to_string()
    }

    fn map_literal(&self, literal: &Literal) -> String {
        format!("y.mixed().oneOf([{}]).required()", literal_value(literal))
    }

    fn map_array(&self, item: &str) -> String {
        format!("y.array({}).required()", item)
    }

    fn map_tuple(&self, items: &[String]) -> String {
        format!("y.tuple([{}]).required()", items.join(", "))
    }

    fn map_union(&self, variants: &[String]) -> String {
        // yup has no union combinator; literal unions collapse into one set
        let values: Option<Vec<&str>> = variants
            .iter()
            .map(|variant| {
                variant
                    .strip_prefix("y.mixed().oneOf([")
                    .and_then(|rest| rest.strip_suffix("]).required()"))
            })
            .collect();
        match values {
            Some(values) => format!("y.mixed().oneOf([{}]).required()", values.join(", ")),
            None => "y.mixed()".to_string(),
        }
    }

    fn map_intersection(&self, parts: &[String]) -> String {
        fold_binary(parts, |left, right| format!("{}.concat({})", left, right))
    }

    fn map_record(&self, _key: &ModelType, _value: &str) -> String {
        "y.object().required()".to_string()
    }

    fn map_object(&self, fields: &[Field]) -> String {
        let entries = entries(fields, |field| {
            if field.optional {
                let value = field.value.strip_suffix(REQUIRED).unwrap_or(&field.value);
                format!("{}.optional()", value)
            } else {
                field.value.clone()
            }
        });
        format!("{}{}", block("y.object({", &entries, "})"), REQUIRED)
    }

    fn map_declaration(&self, name: &str, schema: &str) -> String {
        format!(
            "export type {name} = y.InferType<typeof {name}>\nexport const {name} = {schema}\n"
        )
    }
}
