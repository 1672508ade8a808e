//! TypeBox emitter.
//!
//! Unlike the model-based dialects this one works on the syntax tree
//! directly, so TypeBox's own utility types (`Partial`, `Pick`, ...) map
//! one to one instead of degrading to references.

use schemagen_ast::{
    InterfaceDecl, Item, Keyword, Member, Span, TypeExpr, TypeKind, parse_source,
};
use schemagen_core::Target;

use super::{block, literal_value, property_key};
use crate::{GeneratorError, SchemaGenerator};

const IMPORTS: &str = "import { Type, Static } from '@sinclair/typebox'";

/// Utility types with a TypeBox function of the same name.
const UTILITY_TYPES: [&str; 7] = ["Partial", "Required", "Readonly", "Pick", "Omit", "Exclude", "Extract"];

/// Emits `@sinclair/typebox` schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeBox;

impl SchemaGenerator for TypeBox {
    fn target(&self) -> Target {
        Target::TypeBox
    }

    fn generate(&self, source: &str, file_name: &str) -> Result<String, GeneratorError> {
        let file = parse_source(source, file_name)?;
        let emitter = Emitter { source, file_name };

        let mut declarations = Vec::new();
        for item in &file.items {
            match item {
                Item::Interface(decl) => {
                    let schema = emitter.interface(decl)?;
                    declarations.push(declaration(&decl.name, &schema));
                }
                Item::TypeAlias(decl) => {
                    if let Some(params) = decl.type_params {
                        return Err(emitter.unsupported("a generic type alias", params));
                    }
                    let schema = emitter.ty(&decl.ty)?;
                    declarations.push(declaration(&decl.name, &schema));
                }
                Item::Import(_) | Item::Other(_) => {}
            }
        }

        Ok(format!("{}\n\n{}", IMPORTS, declarations.join("\n")))
    }
}

fn declaration(name: &str, schema: &str) -> String {
    format!("export type {name} = Static<typeof {name}>\nexport const {name} = {schema}\n")
}

struct Emitter<'a> {
    source: &'a str,
    file_name: &'a str,
}

impl Emitter<'_> {
    fn unsupported(&self, what: impl Into<String>, span: Span) -> GeneratorError {
        GeneratorError::unsupported(self.source, self.file_name, what, span)
    }

    fn interface(&self, decl: &InterfaceDecl) -> Result<String, GeneratorError> {
        if let Some(params) = decl.type_params {
            return Err(self.unsupported("a generic interface", params));
        }
        let object = self.object(&decl.members)?;
        if decl.extends.is_empty() {
            return Ok(object);
        }
        let mut parts = self.list(&decl.extends)?;
        parts.push(object);
        Ok(format!("Type.Intersect({})", block("[", &parts, "]")))
    }

    fn object(&self, members: &[Member]) -> Result<String, GeneratorError> {
        let mut entries = Vec::new();
        let mut indexes = Vec::new();
        for member in members {
            match member {
                Member::Property(prop) => {
                    let mut value = match &prop.ty {
                        Some(ty) => self.ty(ty)?,
                        None => "Type.Any()".to_string(),
                    };
                    value = match (prop.readonly, prop.optional) {
                        (true, true) => format!("Type.ReadonlyOptional({})", value),
                        (true, false) => format!("Type.Readonly({})", value),
                        (false, true) => format!("Type.Optional({})", value),
                        (false, false) => value,
                    };
                    entries.push(format!("{}: {}", property_key(prop.key()), value));
                }
                Member::Index(index) => indexes.push(index),
                Member::Other(_) => {}
            }
        }

        if let ([index], true) = (indexes.as_slice(), entries.is_empty()) {
            return Ok(format!(
                "Type.Record({}, {})",
                self.ty(&index.key)?,
                self.ty(&index.value)?
            ));
        }
        Ok(format!("Type.Object({})", block("{", &entries, "}")))
    }

    fn ty(&self, ty: &TypeExpr) -> Result<String, GeneratorError> {
        Ok(match &ty.kind {
            TypeKind::Keyword(keyword) => keyword_schema(*keyword).to_string(),
            TypeKind::Literal(literal) => format!("Type.Literal({})", literal_value(literal)),
            TypeKind::Reference { name, args } => match (name.as_str(), args.as_slice()) {
                ("Date", []) => "Type.Date()".to_string(),
                ("Array" | "ReadonlyArray", [item]) => format!("Type.Array({})", self.ty(item)?),
                ("Record", [key, value]) => {
                    format!("Type.Record({}, {})", self.ty(key)?, self.ty(value)?)
                }
                (utility, [_, ..]) if UTILITY_TYPES.contains(&utility) => {
                    format!("Type.{}({})", utility, self.list(args)?.join(", "))
                }
                _ => name.clone(),
            },
            TypeKind::Array(item) => format!("Type.Array({})", self.ty(item)?),
            TypeKind::Tuple(items) => format!("Type.Tuple([{}])", self.list(items)?.join(", ")),
            TypeKind::Union(items) => format!("Type.Union([{}])", self.list(items)?.join(", ")),
            TypeKind::Intersection(items) => {
                format!("Type.Intersect([{}])", self.list(items)?.join(", "))
            }
            TypeKind::Object(members) => self.object(members)?,
            TypeKind::Paren(inner) => self.ty(inner)?,
            TypeKind::Unsupported => {
                let text = ty.span.slice(self.source);
                return Err(self.unsupported(format!("type '{}'", text), ty.span));
            }
        })
    }

    fn list(&self, items: &[TypeExpr]) -> Result<Vec<String>, GeneratorError> {
        items.iter().map(|item| self.ty(item)).collect()
    }
}

fn keyword_schema(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::String => "Type.String()",
        Keyword::Number => "Type.Number()",
        Keyword::Boolean => "Type.Boolean()",
        Keyword::BigInt => "Type.BigInt()",
        Keyword::Symbol => "Type.Symbol()",
        Keyword::Object => "Type.Object({})",
        Keyword::Null => "Type.Null()",
        Keyword::Undefined => "Type.Undefined()",
        Keyword::Void => "Type.Void()",
        Keyword::Any => "Type.Any()",
        Keyword::Unknown => "Type.Unknown()",
        Keyword::Never => "Type.Never()",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(src: &str) -> String {
        TypeBox.generate(src, "test.ts").unwrap()
    }

    #[test]
    fn test_interface() {
        let out = generate("export interface User {\n  id: number;\n  name?: string;\n  readonly tags: string[];\n}\n");
        assert_eq!(
            out,
            "import { Type, Static } from '@sinclair/typebox'\n\n\
             export type User = Static<typeof User>\n\
             export const User = Type.Object({\n  id: Type.Number(),\n  name: Type.Optional(Type.String()),\n  tags: Type.Readonly(Type.Array(Type.String()))\n})\n"
        );
    }

    #[test]
    fn test_utility_types_map_directly() {
        let out = generate("type A = Partial<User>;\ntype B = Pick<User, 'id' | 'name'>;\ntype C = Set<string>;");
        assert!(out.contains("export const A = Type.Partial(User)\n"));
        assert!(out.contains(
            "export const B = Type.Pick(User, Type.Union([Type.Literal('id'), Type.Literal('name')]))\n"
        ));
        assert!(out.contains("export const C = Set\n"));
    }

    #[test]
    fn test_extends_and_records() {
        let out = generate("interface A extends B { m: Record<string, Date> }");
        assert!(out.contains(
            "export const A = Type.Intersect([\n  B,\n  Type.Object({\n    m: Type.Record(Type.String(), Type.Date())\n  })\n])\n"
        ));
    }

    #[test]
    fn test_unsupported_type() {
        let err = TypeBox.generate("type K = keyof User;", "test.ts").unwrap_err();
        assert_eq!(err.to_string(), "type 'keyof User' cannot be converted to a schema");
    }
}
