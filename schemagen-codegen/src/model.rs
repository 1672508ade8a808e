//! Intermediate model consumed by the model-based dialect emitters.
//!
//! Built from the declarations of a (flattened) source file. Generic
//! references other than `Array`, `ReadonlyArray`, `Record` and `Date`
//! degrade to plain references to the named type.

use schemagen_ast::{
    InterfaceDecl, Item, Keyword, Literal, Member, Span, TypeAliasDecl, TypeExpr, TypeKind,
    parse_source,
};
use tracing::debug;

use crate::GeneratorError;

/// Declarations of one source file, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    /// An interface: the types it extends plus its own properties.
    Object {
        extends: Vec<ModelType>,
        properties: Vec<Property>,
    },
    /// A type alias.
    Alias(ModelType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name without quotes.
    pub name: String,
    pub ty: ModelType,
    pub optional: bool,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelType {
    Keyword(Keyword),
    Date,
    Literal(Literal),
    Reference(String),
    Array(Box<ModelType>),
    Tuple(Vec<ModelType>),
    Union(Vec<ModelType>),
    Intersection(Vec<ModelType>),
    Object(Vec<Property>),
    Record(Box<ModelType>, Box<ModelType>),
}

impl Model {
    /// Build the model for `source`.
    pub fn from_source(source: &str, file_name: &str) -> Result<Self, GeneratorError> {
        let file = parse_source(source, file_name)?;
        let converter = Converter { source, file_name };

        let mut declarations = Vec::new();
        for item in &file.items {
            match item {
                Item::Interface(decl) => declarations.push(converter.interface(decl)?),
                Item::TypeAlias(decl) => declarations.push(converter.alias(decl)?),
                Item::Import(_) => {}
                Item::Other(span) => {
                    debug!(file = file_name, offset = span.start, "skipping statement");
                }
            }
        }
        Ok(Self { declarations })
    }
}

struct Converter<'a> {
    source: &'a str,
    file_name: &'a str,
}

impl Converter<'_> {
    fn unsupported(&self, what: impl Into<String>, span: Span) -> GeneratorError {
        GeneratorError::unsupported(self.source, self.file_name, what, span)
    }

    fn interface(&self, decl: &InterfaceDecl) -> Result<Declaration, GeneratorError> {
        if let Some(params) = decl.type_params {
            return Err(self.unsupported("a generic interface", params));
        }

        let extends = decl
            .extends
            .iter()
            .map(|ty| self.ty(ty))
            .collect::<Result<Vec<_>, _>>()?;

        let kind = match self.object(&decl.members)? {
            ModelType::Object(properties) => DeclarationKind::Object { extends, properties },
            // `interface Dict { [key: string]: T }`
            record if extends.is_empty() => DeclarationKind::Alias(record),
            _ => DeclarationKind::Object {
                extends,
                properties: Vec::new(),
            },
        };

        Ok(Declaration {
            name: decl.name.clone(),
            kind,
        })
    }

    fn alias(&self, decl: &TypeAliasDecl) -> Result<Declaration, GeneratorError> {
        if let Some(params) = decl.type_params {
            return Err(self.unsupported("a generic type alias", params));
        }
        Ok(Declaration {
            name: decl.name.clone(),
            kind: DeclarationKind::Alias(self.ty(&decl.ty)?),
        })
    }

    /// Members of an object type. A body holding a single index signature
    /// and nothing else becomes a record.
    fn object(&self, members: &[Member]) -> Result<ModelType, GeneratorError> {
        let mut properties = Vec::new();
        let mut indexes = Vec::new();
        for member in members {
            match member {
                Member::Property(prop) => properties.push(Property {
                    name: prop.key().to_string(),
                    ty: match &prop.ty {
                        Some(ty) => self.ty(ty)?,
                        None => ModelType::Keyword(Keyword::Any),
                    },
                    optional: prop.optional,
                    readonly: prop.readonly,
                }),
                Member::Index(index) => indexes.push(index),
                Member::Other(_) => {}
            }
        }

        if let ([index], true) = (indexes.as_slice(), properties.is_empty()) {
            return Ok(ModelType::Record(
                Box::new(self.ty(&index.key)?),
                Box::new(self.ty(&index.value)?),
            ));
        }
        if !indexes.is_empty() {
            debug!("ignoring index signatures next to properties");
        }
        Ok(ModelType::Object(properties))
    }

    fn ty(&self, ty: &TypeExpr) -> Result<ModelType, GeneratorError> {
        Ok(match &ty.kind {
            TypeKind::Keyword(keyword) => ModelType::Keyword(*keyword),
            TypeKind::Literal(literal) => ModelType::Literal(literal.clone()),
            TypeKind::Reference { name, args } => match (name.as_str(), args.as_slice()) {
                ("Date", []) => ModelType::Date,
                ("Array" | "ReadonlyArray", [item]) => ModelType::Array(Box::new(self.ty(item)?)),
                ("Record", [key, value]) => {
                    ModelType::Record(Box::new(self.ty(key)?), Box::new(self.ty(value)?))
                }
                _ => ModelType::Reference(name.clone()),
            },
            TypeKind::Array(item) => ModelType::Array(Box::new(self.ty(item)?)),
            TypeKind::Tuple(items) => ModelType::Tuple(self.list(items)?),
            TypeKind::Union(items) => ModelType::Union(self.list(items)?),
            TypeKind::Intersection(items) => ModelType::Intersection(self.list(items)?),
            TypeKind::Object(members) => self.object(members)?,
            TypeKind::Paren(inner) => self.ty(inner)?,
            TypeKind::Unsupported => {
                let text = ty.span.slice(self.source);
                return Err(self.unsupported(format!("type '{}'", text), ty.span));
            }
        })
    }

    fn list(&self, items: &[TypeExpr]) -> Result<Vec<ModelType>, GeneratorError> {
        items.iter().map(|item| self.ty(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(src: &str) -> Model {
        Model::from_source(src, "test.ts").unwrap()
    }

    #[test]
    fn test_interface_to_object() {
        let m = model("import { X } from './x';\nexport interface A extends B {\n  'a-b'?: string;\n  readonly c: Date;\n}\n");
        assert_eq!(
            m.declarations,
            [Declaration {
                name: "A".into(),
                kind: DeclarationKind::Object {
                    extends: vec![ModelType::Reference("B".into())],
                    properties: vec![
                        Property {
                            name: "a-b".into(),
                            ty: ModelType::Keyword(Keyword::String),
                            optional: true,
                            readonly: false,
                        },
                        Property {
                            name: "c".into(),
                            ty: ModelType::Date,
                            optional: false,
                            readonly: true,
                        },
                    ],
                },
            }]
        );
    }

    #[test]
    fn test_generic_helpers() {
        let m = model("type A = Array<string>;\ntype B = Record<string, number>;\ntype C = Partial<User>;\n");
        let kinds: Vec<_> = m.declarations.into_iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [
                DeclarationKind::Alias(ModelType::Array(Box::new(ModelType::Keyword(Keyword::String)))),
                DeclarationKind::Alias(ModelType::Record(
                    Box::new(ModelType::Keyword(Keyword::String)),
                    Box::new(ModelType::Keyword(Keyword::Number)),
                )),
                DeclarationKind::Alias(ModelType::Reference("Partial".into())),
            ]
        );
    }

    #[test]
    fn test_index_signature_interface_is_record() {
        let m = model("interface Scores { [name: string]: number }");
        assert!(matches!(
            &m.declarations[0].kind,
            DeclarationKind::Alias(ModelType::Record(..))
        ));
    }

    #[test]
    fn test_statements_are_skipped() {
        let m = model("const x = 1;\nexport interface A { a: (string) }\n");
        assert_eq!(m.declarations.len(), 1);
        assert!(matches!(
            &m.declarations[0].kind,
            DeclarationKind::Object { properties, .. }
                if properties[0].ty == ModelType::Keyword(Keyword::String)
        ));
    }

    #[test]
    fn test_unsupported_type_is_an_error() {
        let err = Model::from_source("type F = () => void;", "test.ts").unwrap_err();
        assert_eq!(err.to_string(), "type '() => void' cannot be converted to a schema");
    }

    #[test]
    fn test_generic_interface_is_an_error() {
        let err = Model::from_source("interface Box<T> { value: T }", "test.ts").unwrap_err();
        assert!(matches!(err, GeneratorError::Unsupported { .. }));
    }

    #[test]
    fn test_parse_error_is_wrapped() {
        let err = Model::from_source("interface A {", "test.ts").unwrap_err();
        assert!(matches!(err, GeneratorError::Parse(_)));
    }
}
