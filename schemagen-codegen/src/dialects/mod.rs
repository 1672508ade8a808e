//! Schema dialect emitters.
//!
//! Every model-based dialect implements [`SchemaDialect`]: a mapping for each
//! kind of [`ModelType`], plus how a named declaration is written. The
//! provided methods walk the model and assemble the file.

mod effect;
mod jsonschema;
mod typebox;
mod valibot;
mod yup;
mod zod;

pub use effect::Effect;
pub use jsonschema::JsonSchema;
pub use typebox::TypeBox;
pub use valibot::Valibot;
pub use yup::Yup;
pub use zod::Zod;

use schemagen_ast::{Keyword, Literal};
use schemagen_core::{Target, builder::CodeBuilder};

use crate::model::{Declaration, DeclarationKind, Model, ModelType, Property};

/// A rendered object property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Property key, quoted when it is not a valid identifier.
    pub key: String,
    /// Rendered schema of the property type.
    pub value: String,
    pub optional: bool,
    pub readonly: bool,
}

/// Trait for mapping model types to a dialect's schema expressions.
///
/// Implement this trait to add a model-based dialect.
pub trait SchemaDialect {
    /// The target this dialect generates.
    fn target(&self) -> Target;

    /// Import statement placed at the top of the file, if any.
    fn imports(&self) -> Option<&'static str>;

    /// Map a keyword type (`string`, `number`, ...).
    fn map_keyword(&self, keyword: Keyword) -> String;

    /// Map the built-in `Date` type.
    fn map_date(&self) -> String;

    /// Map a literal type.
    fn map_literal(&self, literal: &Literal) -> String;

    /// Map a reference to another declaration.
    fn map_reference(&self, name: &str) -> String {
        name.to_string()
    }

    /// Map an array of `item`.
    fn map_array(&self, item: &str) -> String;

    /// Map a fixed-length tuple.
    fn map_tuple(&self, items: &[String]) -> String;

    /// Map a union of variants.
    fn map_union(&self, variants: &[String]) -> String;

    /// Map an intersection (also used for `extends`).
    fn map_intersection(&self, parts: &[String]) -> String;

    /// Map a record from `key` to the rendered `value` schema.
    fn map_record(&self, key: &ModelType, value: &str) -> String;

    /// Map an object with the given fields.
    fn map_object(&self, fields: &[Field]) -> String;

    /// Write a named declaration whose schema is `schema`.
    fn map_declaration(&self, name: &str, schema: &str) -> String;

    /// Render a complete model type.
    fn render_type(&self, ty: &ModelType) -> String {
        match ty {
            ModelType::Keyword(keyword) => self.map_keyword(*keyword),
            ModelType::Date => self.map_date(),
            ModelType::Literal(literal) => self.map_literal(literal),
            ModelType::Reference(name) => self.map_reference(name),
            ModelType::Array(item) => {
                let item = self.render_type(item);
                self.map_array(&item)
            }
            ModelType::Tuple(items) => self.map_tuple(&self.render_all(items)),
            ModelType::Union(variants) => self.map_union(&self.render_all(variants)),
            ModelType::Intersection(parts) => self.map_intersection(&self.render_all(parts)),
            ModelType::Object(properties) => self.render_object(properties),
            ModelType::Record(key, value) => {
                let value = self.render_type(value);
                self.map_record(key, &value)
            }
        }
    }

    fn render_all(&self, types: &[ModelType]) -> Vec<String> {
        types.iter().map(|ty| self.render_type(ty)).collect()
    }

    fn render_object(&self, properties: &[Property]) -> String {
        let fields: Vec<Field> = properties
            .iter()
            .map(|prop| Field {
                key: property_key(&prop.name),
                value: self.render_type(&prop.ty),
                optional: prop.optional,
                readonly: prop.readonly,
            })
            .collect();
        self.map_object(&fields)
    }

    fn render_declaration(&self, decl: &Declaration) -> String {
        let schema = match &decl.kind {
            DeclarationKind::Object {
                extends,
                properties,
            } => {
                let object = self.render_object(properties);
                if extends.is_empty() {
                    object
                } else {
                    let mut parts = self.render_all(extends);
                    parts.push(object);
                    self.map_intersection(&parts)
                }
            }
            DeclarationKind::Alias(ty) => self.render_type(ty),
        };
        self.map_declaration(&decl.name, &schema)
    }

    /// Render the whole file for `model`.
    fn emit(&self, model: &Model) -> String {
        let mut out = String::new();
        if let Some(imports) = self.imports() {
            out.push_str(imports);
            out.push_str("\n\n");
        }
        let declarations: Vec<String> = model
            .declarations
            .iter()
            .map(|decl| self.render_declaration(decl))
            .collect();
        out.push_str(&declarations.join("\n"));
        out
    }
}

/// `open`, one entry per line (comma separated, indented), then `close`.
///
/// Multi-line entries keep their own relative indentation.
pub(crate) fn block(open: &str, entries: &[String], close: &str) -> String {
    if entries.is_empty() {
        return format!("{}{}", open, close);
    }
    let last = entries.len() - 1;
    let code = CodeBuilder::schema()
        .line(open)
        .indent()
        .each(entries.iter().enumerate(), |b, (i, entry)| {
            let entry = if i < last {
                format!("{},", entry)
            } else {
                entry.clone()
            };
            entry.lines().fold(b, |b, line| b.line(line))
        })
        .dedent()
        .line(close)
        .build();
    code.trim_end_matches('\n').to_string()
}

/// Single-quoted string literal.
pub(crate) fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

/// Literal value as written in generated code.
pub(crate) fn literal_value(literal: &Literal) -> String {
    match literal {
        Literal::String(value) => quote(value),
        Literal::Number(value) => value.clone(),
        Literal::Boolean(value) => value.to_string(),
    }
}

/// Object key, quoted unless it is a plain identifier.
pub(crate) fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let identifier = chars
        .next()
        .is_some_and(|c| c == '_' || c == '$' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric());
    if identifier { name.to_string() } else { quote(name) }
}

/// Left-nested binary application: `f(f(a, b), c)`.
pub(crate) fn fold_binary(parts: &[String], f: impl Fn(&str, &str) -> String) -> String {
    let mut iter = parts.iter();
    let first = iter.next().cloned().unwrap_or_default();
    iter.fold(first, |acc, part| f(&acc, part))
}

/// Object field entries `key: value`.
pub(crate) fn entries(fields: &[Field], value: impl Fn(&Field) -> String) -> Vec<String> {
    fields
        .iter()
        .map(|field| format!("{}: {}", field.key, value(field)))
        .collect()
}
