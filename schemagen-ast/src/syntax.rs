//! Syntax tree for TypeScript declarations.
//!
//! Every node keeps the byte span it was parsed from so that transforms can
//! splice the original text instead of re-printing it.

use miette::SourceSpan;

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The text this span covers.
    pub fn slice(self, src: &str) -> &str {
        &src[self.start..self.end]
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.end - span.start)
    }
}

/// A parsed source file: its top-level statements in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub items: Vec<Item>,
}

impl SourceFile {
    /// Top-level interface declarations in source order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Interface(decl) => Some(decl),
            _ => None,
        })
    }

    /// Names of every top-level interface and type alias.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            Item::Interface(decl) => Some(decl.name.as_str()),
            Item::TypeAlias(decl) => Some(decl.name.as_str()),
            _ => None,
        })
    }
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Import(Span),
    /// Any statement the declaration parser does not model.
    Other(Span),
}

/// `interface Name<T> extends A, B { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub name_span: Span,
    pub exported: bool,
    /// Generic parameter list including the angle brackets.
    pub type_params: Option<Span>,
    pub extends: Vec<TypeExpr>,
    pub members: Vec<Member>,
    /// Whole declaration, including modifiers and an attached doc comment.
    pub span: Span,
}

impl InterfaceDecl {
    /// Property signatures in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertySignature> {
        self.members.iter().filter_map(Member::as_property)
    }
}

/// `type Name<T> = ...`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub name: String,
    pub name_span: Span,
    pub exported: bool,
    pub type_params: Option<Span>,
    pub ty: TypeExpr,
    pub span: Span,
}

/// A member of an interface body or object type literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Property(PropertySignature),
    Index(IndexSignature),
    /// Method, call, construct and mapped signatures.
    Other(Span),
}

impl Member {
    pub fn as_property(&self) -> Option<&PropertySignature> {
        match self {
            Member::Property(prop) => Some(prop),
            _ => None,
        }
    }
}

/// `readonly name?: Type`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    /// Property name as written, quotes included for string keys.
    pub name: String,
    pub name_span: Span,
    pub optional: bool,
    pub readonly: bool,
    pub ty: Option<TypeExpr>,
    /// Attached `/** ... */` comment.
    pub docs: Option<Span>,
    pub span: Span,
}

impl PropertySignature {
    /// Property name with surrounding quotes removed.
    pub fn key(&self) -> &str {
        let name = self.name.as_str();
        let quoted = name.len() >= 2
            && ((name.starts_with('"') && name.ends_with('"'))
                || (name.starts_with('\'') && name.ends_with('\'')));
        if quoted { &name[1..name.len() - 1] } else { name }
    }

    /// Whether the declared type is directly an object type literal.
    pub fn has_type_literal(&self) -> bool {
        self.ty.as_ref().is_some_and(TypeExpr::is_type_literal)
    }
}

/// `[key: string]: Type`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignature {
    pub key: TypeExpr,
    pub value: TypeExpr,
    pub readonly: bool,
    pub span: Span,
}

/// A type expression with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether this is an inline object type (not an array, union or
    /// parenthesized type that merely contains one).
    pub fn is_type_literal(&self) -> bool {
        matches!(self.kind, TypeKind::Object(_))
    }
}

/// Built-in keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Null,
    Undefined,
    Void,
    Any,
    Unknown,
    Never,
}

impl Keyword {
    pub fn from_ident(ident: &str) -> Option<Self> {
        Some(match ident {
            "string" => Keyword::String,
            "number" => Keyword::Number,
            "boolean" => Keyword::Boolean,
            "bigint" => Keyword::BigInt,
            "symbol" => Keyword::Symbol,
            "object" => Keyword::Object,
            "null" => Keyword::Null,
            "undefined" => Keyword::Undefined,
            "void" => Keyword::Void,
            "any" => Keyword::Any,
            "unknown" => Keyword::Unknown,
            "never" => Keyword::Never,
            _ => return None,
        })
    }
}

/// Literal types.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// String literal, unquoted and unescaped.
    String(String),
    /// Numeric literal as written (sign included).
    Number(String),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Keyword(Keyword),
    Literal(Literal),
    /// `Name`, `ns.Name`, `Name<A, B>`
    Reference { name: String, args: Vec<TypeExpr> },
    /// `T[]`
    Array(Box<TypeExpr>),
    /// `[A, B]`
    Tuple(Vec<TypeExpr>),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    /// `{ a: string }`
    Object(Vec<Member>),
    /// `(T)`
    Paren(Box<TypeExpr>),
    /// Function, conditional, mapped, `typeof`, `keyof`, indexed access and
    /// template literal types.
    Unsupported,
}
