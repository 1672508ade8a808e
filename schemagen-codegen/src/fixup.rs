//! Per-target textual fixups applied to generator output.
//!
//! Rules run in order over the whole text. Call rewrites split arguments
//! on balanced brackets, so they see nested calls and never re-match
//! their own output.

use std::path::PathBuf;

use schemagen_core::{File, Target};
use tracing::trace;

/// Rewrites the argument list of a call, or `None` to leave it alone.
pub type CallRewrite = fn(&[String]) -> Option<String>;

/// A single textual fixup.
#[derive(Debug, Clone, Copy)]
pub enum FixupRule {
    /// Replace the first occurrence of `from`.
    ReplaceFirst {
        from: &'static str,
        to: &'static str,
    },
    /// Replace every occurrence of `from`.
    ReplaceAll {
        from: &'static str,
        to: &'static str,
    },
    /// Rewrite every call of `callee` whose arguments `rewrite` accepts.
    /// Arguments are rewritten first, innermost calls included.
    RewriteCall {
        callee: &'static str,
        rewrite: CallRewrite,
    },
}

impl FixupRule {
    /// Apply the rule to `code`.
    pub fn apply(&self, code: &str) -> String {
        match *self {
            FixupRule::ReplaceFirst { from, to } => code.replacen(from, to, 1),
            FixupRule::ReplaceAll { from, to } => code.replace(from, to),
            FixupRule::RewriteCall { callee, rewrite } => rewrite_calls(code, callee, rewrite),
        }
    }
}

const ZOD: &[FixupRule] = &[FixupRule::RewriteCall {
    callee: "z.record",
    rewrite: zod_record,
}];

const YUP: &[FixupRule] = &[FixupRule::ReplaceFirst {
    from: "import y from 'yup'",
    to: "import * as y from 'yup'",
}];

// Order matters: the key/value form must be built before the one-argument
// rule looks at what is left.
const EFFECT: &[FixupRule] = &[
    FixupRule::RewriteCall {
        callee: "ES.Record",
        rewrite: effect_record_pair,
    },
    FixupRule::RewriteCall {
        callee: "ES.Record",
        rewrite: effect_record_value,
    },
    FixupRule::ReplaceAll {
        from: "@effect/schema",
        to: "effect",
    },
];

/// The ordered fixup rules for `target`.
pub fn rules_for(target: Target) -> &'static [FixupRule] {
    match target {
        Target::Zod => ZOD,
        Target::Yup => YUP,
        Target::Effect => EFFECT,
        Target::TypeBox | Target::Valibot | Target::JsonSchema | Target::Types => &[],
    }
}

/// Apply every rule for `target` to `code`, in order.
pub fn apply_fixups(target: Target, code: &str) -> String {
    rules_for(target).iter().fold(code.to_string(), |code, rule| {
        trace!(dialect = %target, ?rule, "applying fixup");
        rule.apply(&code)
    })
}

/// The final schema file: fixed-up code behind the target's header.
pub fn render_schema_file(target: Target, path: impl Into<PathBuf>, generated: &str) -> File {
    File::with_header(path, &target.header(), &apply_fixups(target, generated))
}

/// `z.record(V)` takes a key schema in current zod.
fn zod_record(args: &[String]) -> Option<String> {
    match args {
        [value] => Some(format!("z.record(z.string(), {})", value)),
        _ => None,
    }
}

fn effect_record_pair(args: &[String]) -> Option<String> {
    match args {
        [key, value] => Some(format!("ES.Record({{ key: {}, value: {} }})", key, value)),
        _ => None,
    }
}

fn effect_record_value(args: &[String]) -> Option<String> {
    match args {
        [value] if !value.starts_with('{') => Some(format!(
            "ES.Record({{ key: ES.String, value: {} }})",
            value
        )),
        _ => None,
    }
}

fn rewrite_calls(code: &str, callee: &str, rewrite: CallRewrite) -> String {
    let mut out = String::with_capacity(code.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(found) = code[search..].find(callee) {
        let start = search + found;
        let open = start + callee.len();
        search = open;

        if !is_call_start(code, start) || code.as_bytes().get(open) != Some(&b'(') {
            continue;
        }
        let Some((args, close)) = split_args(code, open) else {
            continue;
        };

        out.push_str(&code[copied..start]);
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| rewrite_calls(arg, callee, rewrite))
            .collect();
        match rewrite(&args) {
            Some(replacement) => out.push_str(&replacement),
            None => {
                out.push_str(&code[start..=open]);
                out.push_str(&rewrite_calls(&code[open + 1..close], callee, rewrite));
                out.push(')');
            }
        }
        copied = close + 1;
        search = close + 1;
    }

    out.push_str(&code[copied..]);
    out
}

/// `callee` at `start` is not the tail of a longer name or member chain.
fn is_call_start(code: &str, start: usize) -> bool {
    code[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.'))
}

/// Split the arguments of the call whose `(` is at `open`.
///
/// Returns the trimmed arguments and the index of the closing `)`. A
/// trailing comma does not produce an empty argument.
fn split_args(code: &str, open: usize) -> Option<(Vec<&str>, usize)> {
    let bytes = code.as_bytes();
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut arg_start = open + 1;
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' if depth == 0 => {
                let last = code[arg_start..i].trim();
                if !last.is_empty() || !args.is_empty() {
                    args.push(last);
                }
                if args.last() == Some(&"") {
                    args.pop();
                }
                return Some((args, i));
            }
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                args.push(code[arg_start..i].trim());
                arg_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
