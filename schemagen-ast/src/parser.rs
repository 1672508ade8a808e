//! Declaration parser.
//!
//! Parses the file with the tree-sitter TypeScript grammar and lifts
//! top-level interfaces and type aliases into the syntax tree. Every other
//! statement is kept as an opaque span.

use tree_sitter::{Node, Parser, Tree};

use crate::{
    Span,
    error::{Result, SourceContext},
    syntax::{
        IndexSignature, InterfaceDecl, Item, Keyword, Literal, Member, PropertySignature,
        SourceFile, TypeAliasDecl, TypeExpr, TypeKind,
    },
};

/// Longest excerpt of an unparseable region quoted in an error.
const EXCERPT_LEN: usize = 32;

/// Parse `src` into a [`SourceFile`].
///
/// `filename` is only used for error reporting.
pub fn parse_source(src: &str, filename: &str) -> Result<SourceFile> {
    let ctx = SourceContext::new(src, filename);
    parse_with_context(&ctx)
}

pub(crate) fn parse_with_context(ctx: &SourceContext<'_>) -> Result<SourceFile> {
    let tree = parse_tree(ctx)?;
    let reader = Reader { ctx };
    let root = tree.root_node();
    reader.check(root)?;
    reader.file(root)
}

fn parse_tree(ctx: &SourceContext<'_>) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_typescript::language().into())
        .map_err(|e| ctx.grammar(e))?;
    parser
        .parse(ctx.src(), None)
        .ok_or_else(|| ctx.grammar("the parser produced no tree"))
}

fn span(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// Named children that are not comments.
fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Whether `node` has an anonymous `token` child such as `readonly` or `?`.
fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token)
}

/// Tracks the `/** ... */` comment directly preceding the next node.
#[derive(Default)]
struct PendingDoc(Option<Span>);

impl PendingDoc {
    /// Feed the next child; returns true when it was a comment.
    fn observe(&mut self, node: Node<'_>, src: &str) -> bool {
        if node.kind() != "comment" {
            return false;
        }
        let text = span(node).slice(src);
        self.0 = text.starts_with("/**").then(|| span(node));
        true
    }

    fn take(&mut self) -> Option<Span> {
        self.0.take()
    }
}

struct Reader<'c, 'a> {
    ctx: &'c SourceContext<'a>,
}

impl Reader<'_, '_> {
    fn text(&self, node: Node<'_>) -> &str {
        span(node).slice(self.ctx.src())
    }

    /// Reject trees containing error or missing nodes.
    fn check(&self, root: Node<'_>) -> Result<()> {
        let Some(node) = first_error(root) else {
            return Ok(());
        };
        let detail = if node.is_missing() {
            format!("missing '{}'", node.kind())
        } else {
            let text = self.text(node);
            let line = text.lines().next().unwrap_or_default().trim();
            let excerpt: String = line.chars().take(EXCERPT_LEN).collect();
            format!("unexpected '{}'", excerpt)
        };
        Err(self.ctx.syntax(detail, span(node)))
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>> {
        node.child_by_field_name(name)
            .ok_or_else(|| self.ctx.syntax(format!("missing {}", name), span(node)))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn file(&self, root: Node<'_>) -> Result<SourceFile> {
        let mut items = Vec::new();
        let mut doc = PendingDoc::default();
        let mut cursor = root.walk();

        for node in root.named_children(&mut cursor) {
            if doc.observe(node, self.ctx.src()) {
                continue;
            }
            let start = doc.take().map_or(node.start_byte(), |d| d.start);
            let whole = Span::new(start, node.end_byte());

            let item = match node.kind() {
                "import_statement" => Item::Import(span(node)),
                "export_statement" => match node.child_by_field_name("declaration") {
                    Some(decl) => self.declaration(decl, true, whole)?,
                    None => Item::Other(span(node)),
                },
                _ => self.declaration(node, false, whole)?,
            };
            items.push(item);
        }
        Ok(SourceFile { items })
    }

    /// Lift an interface or type alias, seeing through `declare`.
    fn declaration(&self, node: Node<'_>, exported: bool, whole: Span) -> Result<Item> {
        match node.kind() {
            "interface_declaration" => self.interface(node, exported, whole).map(Item::Interface),
            "type_alias_declaration" => self.type_alias(node, exported, whole).map(Item::TypeAlias),
            "ambient_declaration" => match named_children(node).first() {
                Some(&inner)
                    if matches!(inner.kind(), "interface_declaration" | "type_alias_declaration") =>
                {
                    self.declaration(inner, exported, whole)
                }
                _ => Ok(Item::Other(span(node))),
            },
            _ => Ok(Item::Other(span(node))),
        }
    }

    fn interface(&self, node: Node<'_>, exported: bool, whole: Span) -> Result<InterfaceDecl> {
        let name = self.field(node, "name")?;
        let body = self.field(node, "body")?;

        let mut extends = Vec::new();
        let mut cursor = node.walk();
        for clause in node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "extends_type_clause")
        {
            extends.extend(named_children(clause).into_iter().map(|ty| self.ty(ty)));
        }

        Ok(InterfaceDecl {
            name: self.text(name).to_string(),
            name_span: span(name),
            exported,
            type_params: node.child_by_field_name("type_parameters").map(span),
            extends,
            members: self.members(body)?,
            span: whole,
        })
    }

    fn type_alias(&self, node: Node<'_>, exported: bool, whole: Span) -> Result<TypeAliasDecl> {
        let name = self.field(node, "name")?;
        let value = self.field(node, "value")?;

        Ok(TypeAliasDecl {
            name: self.text(name).to_string(),
            name_span: span(name),
            exported,
            type_params: node.child_by_field_name("type_parameters").map(span),
            ty: self.ty(value),
            span: whole,
        })
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Members of an interface body or object type.
    fn members(&self, body: Node<'_>) -> Result<Vec<Member>> {
        let mut members = Vec::new();
        let mut doc = PendingDoc::default();
        let mut cursor = body.walk();

        for node in body.named_children(&mut cursor) {
            if doc.observe(node, self.ctx.src()) {
                continue;
            }
            let docs = doc.take();
            let member = match node.kind() {
                "property_signature" => Member::Property(self.property(node, docs)?),
                "index_signature" => match self.index_signature(node)? {
                    Some(index) => Member::Index(index),
                    None => Member::Other(span(node)),
                },
                // method, call and construct signatures
                _ => Member::Other(span(node)),
            };
            members.push(member);
        }
        Ok(members)
    }

    fn property(&self, node: Node<'_>, docs: Option<Span>) -> Result<PropertySignature> {
        let name = self.field(node, "name")?;
        let ty = node
            .child_by_field_name("type")
            .and_then(|annotation| named_children(annotation).first().copied())
            .map(|ty| self.ty(ty));

        Ok(PropertySignature {
            name: self.text(name).to_string(),
            name_span: span(name),
            optional: has_token(node, "?"),
            readonly: has_token(node, "readonly"),
            ty,
            docs,
            span: span(node),
        })
    }

    /// `[key: K]: V`, or `None` for a mapped type clause `[K in T]: V`.
    fn index_signature(&self, node: Node<'_>) -> Result<Option<IndexSignature>> {
        let Some(key) = node.child_by_field_name("index_type") else {
            return Ok(None);
        };
        let annotation = self.field(node, "type")?;
        let Some(value) = named_children(annotation).first().copied() else {
            return Ok(None);
        };

        Ok(Some(IndexSignature {
            key: self.ty(key),
            value: self.ty(value),
            readonly: has_token(node, "readonly"),
            span: span(node),
        }))
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn ty(&self, node: Node<'_>) -> TypeExpr {
        let kind = match node.kind() {
            "predefined_type" | "type_identifier" => match Keyword::from_ident(self.text(node)) {
                Some(keyword) => TypeKind::Keyword(keyword),
                None if node.kind() == "type_identifier" => TypeKind::Reference {
                    name: self.text(node).to_string(),
                    args: Vec::new(),
                },
                // `unique symbol`
                None => TypeKind::Unsupported,
            },
            "nested_type_identifier" => TypeKind::Reference {
                name: self.entity_name(node),
                args: Vec::new(),
            },
            "generic_type" => self.generic(node),
            "literal_type" => self.literal(node),
            "array_type" => match named_children(node).first() {
                Some(&element) => TypeKind::Array(Box::new(self.ty(element))),
                None => TypeKind::Unsupported,
            },
            // `readonly T[]` validates like `T[]`
            "readonly_type" => match named_children(node).first() {
                Some(&inner) => return self.ty(inner),
                None => TypeKind::Unsupported,
            },
            "parenthesized_type" => match named_children(node).first() {
                Some(&inner) => TypeKind::Paren(Box::new(self.ty(inner))),
                None => TypeKind::Unsupported,
            },
            "tuple_type" => TypeKind::Tuple(
                named_children(node)
                    .into_iter()
                    .map(|element| self.tuple_element(element))
                    .collect(),
            ),
            "union_type" => return self.list(node, TypeKind::Union),
            "intersection_type" => return self.list(node, TypeKind::Intersection),
            "object_type" => self.object(node),
            // function, constructor, conditional, keyof, typeof, indexed
            // access, template literal and predicate types
            _ => TypeKind::Unsupported,
        };
        TypeExpr::new(kind, span(node))
    }

    /// `ns.Name` with any whitespace around the dots removed.
    fn entity_name(&self, node: Node<'_>) -> String {
        self.text(node).split_whitespace().collect()
    }

    fn generic(&self, node: Node<'_>) -> TypeKind {
        let Some(name) = node.child_by_field_name("name") else {
            return TypeKind::Unsupported;
        };
        let args = node
            .child_by_field_name("type_arguments")
            .map(|args| named_children(args).into_iter().map(|arg| self.ty(arg)).collect())
            .unwrap_or_default();
        TypeKind::Reference {
            name: self.entity_name(name),
            args,
        }
    }

    fn literal(&self, node: Node<'_>) -> TypeKind {
        let Some(value) = named_children(node).first().copied() else {
            return TypeKind::Unsupported;
        };
        let text = self.text(value);
        match value.kind() {
            "string" => TypeKind::Literal(Literal::String(unquote(text))),
            "number" => TypeKind::Literal(Literal::Number(text.to_string())),
            // signed number: `-1`
            "unary_expression" => TypeKind::Literal(Literal::Number(text.split_whitespace().collect())),
            "true" => TypeKind::Literal(Literal::Boolean(true)),
            "false" => TypeKind::Literal(Literal::Boolean(false)),
            "null" => TypeKind::Keyword(Keyword::Null),
            "undefined" => TypeKind::Keyword(Keyword::Undefined),
            _ => TypeKind::Unsupported,
        }
    }

    /// A tuple element. Labels are dropped; optional and rest elements are
    /// not representable.
    fn tuple_element(&self, node: Node<'_>) -> TypeExpr {
        match node.kind() {
            "required_parameter" => {
                let labeled = node
                    .child_by_field_name("name")
                    .is_some_and(|name| name.kind() == "identifier");
                let inner = node
                    .child_by_field_name("type")
                    .and_then(|annotation| named_children(annotation).first().copied());
                match inner {
                    Some(inner) if labeled => self.ty(inner),
                    _ => TypeExpr::new(TypeKind::Unsupported, span(node)),
                }
            }
            "optional_parameter" | "optional_type" | "rest_type" => {
                TypeExpr::new(TypeKind::Unsupported, span(node))
            }
            _ => self.ty(node),
        }
    }

    /// A union or intersection, flattening the grammar's left nesting and
    /// collapsing a single member (`| 'a'`).
    fn list(&self, node: Node<'_>, wrap: fn(Vec<TypeExpr>) -> TypeKind) -> TypeExpr {
        let mut parts = Vec::new();
        self.collect_list(node, node.kind(), &mut parts);
        if parts.len() == 1 {
            return parts.remove(0);
        }
        TypeExpr::new(wrap(parts), span(node))
    }

    fn collect_list(&self, node: Node<'_>, kind: &str, out: &mut Vec<TypeExpr>) {
        for child in named_children(node) {
            if child.kind() == kind {
                self.collect_list(child, kind, out);
            } else {
                out.push(self.ty(child));
            }
        }
    }

    /// `{ a: string }`; mapped types (`{ [K in T]: V }`) are unsupported.
    fn object(&self, node: Node<'_>) -> TypeKind {
        let mapped = named_children(node).into_iter().any(|member| {
            member.kind() == "index_signature" && member.child_by_field_name("index_type").is_none()
        });
        if mapped {
            return TypeKind::Unsupported;
        }
        match self.members(node) {
            Ok(members) => TypeKind::Object(members),
            Err(_) => TypeKind::Unsupported,
        }
    }
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Strip the quotes from a string literal and resolve simple escapes.
fn unquote(text: &str) -> String {
    let inner = &text[1..text.len().saturating_sub(1).max(1)];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}
