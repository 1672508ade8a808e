//! Interface flattening.
//!
//! Hoists inline object types out of interface properties into their own
//! exported interfaces named `{Parent}_properties_{property}`, rewriting the
//! property to reference the new interface. Extracted interfaces are scanned
//! in turn, so nested literals are flattened one level per pass until the
//! work queue drains.

use std::collections::{HashMap, HashSet, VecDeque};

use schemagen_core::{builder::CodeBuilder, flattened_name};
use tracing::{debug, trace};

use crate::{
    Span,
    error::{Result, SourceContext},
    parser::parse_with_context,
    syntax::{InterfaceDecl, Member, PropertySignature, SourceFile, TypeExpr, TypeKind},
};

/// Flatten every top-level interface in `source`.
///
/// Text outside the rewritten interfaces is returned unchanged, so a file
/// without inline object properties comes back byte for byte.
///
/// # Errors
///
/// Fails when the source cannot be parsed or when an extracted interface
/// name is already declared in the file.
pub fn transform_source_text(source: &str, file_name: &str) -> Result<String> {
    let ctx = SourceContext::new(source, file_name);
    let file = parse_with_context(&ctx)?;
    let mut flattener = Flattener::new(&ctx, &file);
    flattener.run()?;
    Ok(flattener.render())
}

/// A position in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Untouched source text.
    Text(Span),
    /// An interface, by index into `Flattener::interfaces`.
    Interface(usize),
}

#[derive(Debug)]
struct Interface<'f> {
    name: String,
    /// Declaration span for interfaces read from the source.
    decl: Option<Span>,
    properties: Vec<&'f PropertySignature>,
    /// Property type spans replaced by a reference to an extracted interface.
    retyped: HashMap<Span, String>,
}

impl<'f> Interface<'f> {
    fn from_decl(decl: &'f InterfaceDecl) -> Self {
        Self {
            name: decl.name.clone(),
            decl: Some(decl.span),
            properties: decl.properties().collect(),
            retyped: HashMap::new(),
        }
    }
}

struct Flattener<'a, 'f> {
    ctx: &'f SourceContext<'a>,
    interfaces: Vec<Interface<'f>>,
    layout: Vec<Slot>,
    declared: HashSet<String>,
}

impl<'a, 'f> Flattener<'a, 'f> {
    fn new(ctx: &'f SourceContext<'a>, file: &'f SourceFile) -> Self {
        let src = ctx.src();
        let mut interfaces = Vec::new();
        let mut layout = Vec::new();
        let mut cursor = 0;

        for decl in file.interfaces() {
            if decl.span.start > cursor {
                layout.push(Slot::Text(Span::new(cursor, decl.span.start)));
            }
            layout.push(Slot::Interface(interfaces.len()));
            interfaces.push(Interface::from_decl(decl));
            cursor = decl.span.end;
        }
        if cursor < src.len() {
            layout.push(Slot::Text(Span::new(cursor, src.len())));
        }

        Self {
            ctx,
            interfaces,
            layout,
            declared: file.declared_names().map(str::to_string).collect(),
        }
    }

    fn run(&mut self) -> Result<()> {
        let mut queue: VecDeque<usize> = (0..self.interfaces.len()).collect();

        while let Some(index) = queue.pop_front() {
            trace!(interface = %self.interfaces[index].name, "scanning");

            let literals: Vec<_> = self.interfaces[index]
                .properties
                .iter()
                .copied()
                .filter_map(|prop: &'f PropertySignature| {
                    let ty = prop.ty.as_ref()?;
                    match &ty.kind {
                        TypeKind::Object(members) => Some((prop, ty, members.as_slice())),
                        _ => None,
                    }
                })
                .collect();

            for (prop, ty, members) in literals {
                let extracted = self.extract(index, prop, ty, members)?;
                queue.push_back(extracted);
            }
        }
        Ok(())
    }

    /// Move the object type `ty` of `prop` into a new interface placed right
    /// before its parent, returning the new interface's index.
    fn extract(
        &mut self,
        parent: usize,
        prop: &'f PropertySignature,
        ty: &'f TypeExpr,
        members: &'f [Member],
    ) -> Result<usize> {
        let name = flattened_name(&self.interfaces[parent].name, prop.key());
        if !self.declared.insert(name.clone()) {
            return Err(self.ctx.name_collision(name, prop.name_span));
        }

        debug!(
            parent = %self.interfaces[parent].name,
            property = prop.key(),
            interface = %name,
            "extracting inline object type"
        );

        self.interfaces[parent]
            .retyped
            .insert(ty.span, name.clone());

        let index = self.interfaces.len();
        self.interfaces.push(Interface {
            name,
            decl: None,
            properties: members.iter().filter_map(|m| m.as_property()).collect(),
            retyped: HashMap::new(),
        });

        let position = self
            .layout
            .iter()
            .position(|slot| *slot == Slot::Interface(parent))
            .unwrap_or(self.layout.len());
        self.layout.insert(position, Slot::Interface(index));

        Ok(index)
    }

    fn render(&self) -> String {
        let src = self.ctx.src();
        let mut out = String::with_capacity(src.len());
        for slot in &self.layout {
            match *slot {
                Slot::Text(span) => out.push_str(span.slice(src)),
                Slot::Interface(index) => self.render_interface(&self.interfaces[index], &mut out),
            }
        }
        out
    }

    fn render_interface(&self, interface: &Interface<'f>, out: &mut String) {
        let src = self.ctx.src();

        let Some(decl) = interface.decl else {
            out.push_str(&self.render_synthesized(interface));
            out.push('\n');
            return;
        };

        let mut edits: Vec<(&Span, &String)> = interface.retyped.iter().collect();
        edits.sort_by_key(|(span, _)| span.start);

        let mut cursor = decl.start;
        for (span, name) in edits {
            out.push_str(&src[cursor..span.start]);
            out.push_str(name);
            cursor = span.end;
        }
        out.push_str(&src[cursor..decl.end]);
    }

    fn render_synthesized(&self, interface: &Interface<'f>) -> String {
        let header = format!("export interface {} {{", interface.name);
        if interface.properties.is_empty() {
            return CodeBuilder::declaration()
                .line(&format!("{}}}", header))
                .build();
        }

        CodeBuilder::declaration()
            .block_with_close(&header, "}", |b| {
                b.each(&interface.properties, |b, prop| {
                    let docs = prop.docs.map(|docs| docs.slice(self.ctx.src()));
                    doc_lines(docs.unwrap_or_default())
                        .fold(b, |b, line| b.line(&line))
                        .line(&self.property_line(interface, prop))
                })
            })
            .build()
    }

    fn property_line(&self, interface: &Interface<'f>, prop: &PropertySignature) -> String {
        let mut line = String::new();
        if prop.readonly {
            line.push_str("readonly ");
        }
        line.push_str(&prop.name);
        if prop.optional {
            line.push('?');
        }
        if let Some(ty) = &prop.ty {
            line.push_str(": ");
            match interface.retyped.get(&ty.span) {
                Some(name) => line.push_str(name),
                None => line.push_str(ty.span.slice(self.ctx.src())),
            }
        }
        line.push(';');
        line
    }
}

/// A doc comment re-indented for its new position: continuation lines
/// are aligned one column in, under the opening `/**`.
fn doc_lines(doc: &str) -> impl Iterator<Item = String> + '_ {
    doc.lines().enumerate().map(|(i, line)| {
        let line = line.trim();
        if i > 0 && line.starts_with('*') {
            format!(" {}", line)
        } else {
            line.to_string()
        }
    })
}
