//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use schemagen_core::builder::CodeBuilder;
///
/// let code = CodeBuilder::schema()
///     .line("export const User = z.object({")
///     .indent()
///     .line("name: z.string(),")
///     .dedent()
///     .line("})")
///     .build();
///
/// assert_eq!(code, "export const User = z.object({\n  name: z.string(),\n})\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation (schema emitters).
    pub fn schema() -> Self {
        Self::new(Indent::SCHEMA)
    }

    /// Create a new CodeBuilder with 4-space indentation (TypeScript declarations).
    pub fn declaration() -> Self {
        Self::new(Indent::DECLARATION)
    }

    /// Create a new CodeBuilder with tab indentation (barrel files).
    pub fn barrel() -> Self {
        Self::new(Indent::BARREL)
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a header line, an indented body and a closing line.
    ///
    /// # Example
    ///
    /// ```
    /// use schemagen_core::builder::CodeBuilder;
    ///
    /// let code = CodeBuilder::declaration()
    ///     .block_with_close("export interface User {", "}", |b| b.line("name: string;"))
    ///     .build();
    ///
    /// assert_eq!(code, "export interface User {\n    name: string;\n}\n");
    /// ```
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::schema().line("import { z } from 'zod'").build();
        assert_eq!(code, "import { z } from 'zod'\n");
    }

    #[test]
    fn test_indentation() {
        let code = CodeBuilder::schema()
            .line("export const A = z.object({")
            .indent()
            .line("a: z.string(),")
            .dedent()
            .line("})")
            .build();

        assert_eq!(code, "export const A = z.object({\n  a: z.string(),\n})\n");
    }

    #[test]
    fn test_declaration_block() {
        let code = CodeBuilder::declaration()
            .block_with_close("export interface A {", "}", |b| b.line("a: string;"))
            .build();

        assert_eq!(code, "export interface A {\n    a: string;\n}\n");
    }

    #[test]
    fn test_barrel_indent() {
        let code = CodeBuilder::barrel()
            .block_with_close("export {", "} from \"./a\";", |b| b.line("A,"))
            .build();

        assert_eq!(code, "export {\n\tA,\n} from \"./a\";\n");
    }

    #[test]
    fn test_blank_line() {
        let code = CodeBuilder::schema()
            .line("import { z } from 'zod'")
            .blank()
            .line("export const A = z.string()")
            .build();

        assert_eq!(code, "import { z } from 'zod'\n\nexport const A = z.string()\n");
    }

    #[test]
    fn test_each() {
        let code = CodeBuilder::schema()
            .each(["a", "b"], |b, name| b.line(&format!("{},", name)))
            .build();

        assert_eq!(code, "a,\nb,\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let code = CodeBuilder::schema().dedent().line("x").build();
        assert_eq!(code, "x\n");
    }
}
