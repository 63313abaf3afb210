//! JavaScript code generation for Hot Cocoa Lisp.
//!
//! Turns an analyzed [`Module`] into the text of a JavaScript file.
//!
//! # Imports
//!
//! `(import "lib/math.hcl")` is resolved against the importing file's
//! directory and handed to the [`ImportSink`] *before* the generated module
//! is returned. The driver's sink compiles the imported file (or skips it if
//! it was already claimed), so by the time this module's output is written
//! every module it requires has been compiled. The import itself becomes
//! `require("./lib/math.js")`.
//!
//! Number literals are copied from `source` through their spans so the
//! emitted text matches what the author wrote.

mod mangle;

pub use mangle::{identifier, string_literal};

use hcl_ir::stack::ensure_sufficient_stack;
use hcl_ir::{
    BinaryOp, Diagnostic, ErrorCode, Expr, ExprKind, GenerateError, ImportSink, Module, Sexp,
    SexpKind, Span,
};
use std::path::Path;

/// Extensions used to validate import paths and rewrite them to the
/// generated file names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenOptions {
    pub source_extension: String,
    pub target_extension: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            source_extension: "hcl".to_string(),
            target_extension: "js".to_string(),
        }
    }
}

const INDENT: &str = "  ";

/// Generate JavaScript for `module`.
///
/// `base_dir` is the directory of the file being compiled; relative import
/// paths are resolved against it.
pub fn generate<S: ImportSink + ?Sized>(
    module: &Module,
    source: &str,
    base_dir: &Path,
    options: &CodegenOptions,
    sink: &mut S,
) -> Result<String, GenerateError<S::Error>> {
    let mut generator = Generator {
        source,
        base_dir,
        options,
        sink,
    };

    let mut out = String::from("\"use strict\";\n");
    for item in &module.items {
        out.push_str(&generator.statement(item, 0)?);
        out.push('\n');
    }
    Ok(out)
}

struct Generator<'a, S: ?Sized> {
    source: &'a str,
    base_dir: &'a Path,
    options: &'a CodegenOptions,
    sink: &'a mut S,
}

type GenResult<T, E> = Result<T, GenerateError<E>>;

impl<S: ImportSink + ?Sized> Generator<'_, S> {
    /// A statement at `depth` levels of indentation, without trailing newline.
    fn statement(&mut self, expr: &Expr, depth: usize) -> GenResult<String, S::Error> {
        let indent = INDENT.repeat(depth);
        let line = match &expr.kind {
            ExprKind::Def { name, value } => {
                format!("var {} = {};", identifier(name), self.expr(value, depth)?)
            }
            ExprKind::Import {
                binding: Some(name),
                ..
            } => format!("var {} = {};", identifier(name), self.expr(expr, depth)?),
            // A leading `function` would parse as a declaration.
            ExprKind::Fn { .. } => format!("({});", self.expr(expr, depth)?),
            _ => format!("{};", self.expr(expr, depth)?),
        };
        Ok(format!("{indent}{line}"))
    }

    fn expr(&mut self, expr: &Expr, depth: usize) -> GenResult<String, S::Error> {
        ensure_sufficient_stack(|| self.expr_inner(expr, depth))
    }

    fn expr_inner(&mut self, expr: &Expr, depth: usize) -> GenResult<String, S::Error> {
        Ok(match &expr.kind {
            ExprKind::Number => self.number(expr.span),
            ExprKind::Str(value) => string_literal(value),
            ExprKind::Bool(value) => value.to_string(),
            ExprKind::Nil => "null".to_string(),
            ExprKind::Var(name) => identifier(name),
            ExprKind::Quote(datum) => self.quoted(datum),
            ExprKind::Array(items) => format!("[{}]", self.list(items, depth)?),
            ExprKind::Set { name, value } => {
                format!("({} = {})", identifier(name), self.expr(value, depth)?)
            }
            ExprKind::Def { name, .. } => {
                return Err(Diagnostic::error(
                    ErrorCode::E4003,
                    format!("`def {name}` is only valid as a top-level statement"),
                    expr.span,
                )
                .into());
            }
            ExprKind::Fn { params, body } => self.function(params, body, depth)?,
            ExprKind::If {
                cond,
                then,
                otherwise,
            } => {
                let otherwise = match otherwise {
                    Some(e) => self.expr(e, depth)?,
                    None => "undefined".to_string(),
                };
                format!(
                    "({} ? {} : {})",
                    self.expr(cond, depth)?,
                    self.expr(then, depth)?,
                    otherwise
                )
            }
            ExprKind::Do(body) if body.is_empty() => "undefined".to_string(),
            ExprKind::Do(body) => format!("({})", self.list(body, depth)?),
            ExprKind::Let { bindings, body } => {
                let names: Vec<String> = bindings.iter().map(|(n, _)| n.clone()).collect();
                let mut values = Vec::with_capacity(bindings.len());
                for (_, value) in bindings {
                    values.push(self.expr(value, depth)?);
                }
                format!(
                    "({})({})",
                    self.function(&names, body, depth)?,
                    values.join(", ")
                )
            }
            ExprKind::Import { path, path_span, .. } => self.import(path, *path_span)?,
            ExprKind::Binary { op, operands } => self.binary(*op, operands, depth)?,
            ExprKind::Not(operand) => format!("(!{})", self.expr(operand, depth)?),
            ExprKind::Call { callee, args } => {
                let callee_js = self.expr(callee, depth)?;
                let callee_js = match callee.kind {
                    ExprKind::Var(_) | ExprKind::Call { .. } => callee_js,
                    _ => format!("({callee_js})"),
                };
                format!("{callee_js}({})", self.list(args, depth)?)
            }
        })
    }

    fn list(&mut self, items: &[Expr], depth: usize) -> GenResult<String, S::Error> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            parts.push(self.expr(item, depth)?);
        }
        Ok(parts.join(", "))
    }

    fn number(&self, span: Span) -> String {
        let text = span.slice(self.source);
        if text.starts_with('-') {
            format!("({text})")
        } else {
            text.to_string()
        }
    }

    /// Function expression whose value is its last body form.
    fn function(
        &mut self,
        params: &[String],
        body: &[Expr],
        depth: usize,
    ) -> GenResult<String, S::Error> {
        let params = params
            .iter()
            .map(|p| identifier(p))
            .collect::<Vec<_>>()
            .join(", ");
        let Some((last, init)) = body.split_last() else {
            return Ok(format!("function ({params}) {{}}"));
        };

        let inner = INDENT.repeat(depth + 1);
        let mut out = format!("function ({params}) {{\n");
        for stmt in init {
            out.push_str(&self.statement(stmt, depth + 1)?);
            out.push('\n');
        }
        out.push_str(&format!(
            "{inner}return {};\n",
            self.expr(last, depth + 1)?
        ));
        out.push_str(&INDENT.repeat(depth));
        out.push('}');
        Ok(out)
    }

    fn binary(
        &mut self,
        op: BinaryOp,
        operands: &[Expr],
        depth: usize,
    ) -> GenResult<String, S::Error> {
        if let [operand] = operands {
            return Ok(format!("({}{})", op.js_operator(), self.expr(operand, depth)?));
        }
        let mut parts = Vec::with_capacity(operands.len());
        for operand in operands {
            parts.push(self.expr(operand, depth)?);
        }
        let separator = format!(" {} ", op.js_operator());
        Ok(format!("({})", parts.join(&separator)))
    }

    fn quoted(&self, datum: &Sexp) -> String {
        match &datum.kind {
            SexpKind::Number => self.number(datum.span),
            SexpKind::Str(value) | SexpKind::Symbol(value) => string_literal(value),
            SexpKind::List(items) | SexpKind::Vector(items) => {
                let parts: Vec<String> = items.iter().map(|i| self.quoted(i)).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    /// Compile the imported file through the sink, then emit its `require`.
    fn import(&mut self, path: &str, span: Span) -> GenResult<String, S::Error> {
        if path.is_empty() {
            return Err(Diagnostic::error(ErrorCode::E4002, "empty import path", span).into());
        }
        let suffix = format!(".{}", self.options.source_extension);
        let Some(stem) = path.strip_suffix(&suffix) else {
            return Err(Diagnostic::error(
                ErrorCode::E4001,
                format!("cannot import `{path}`"),
                span,
            )
            .with_note(format!("imported files must end in `{suffix}`"))
            .into());
        };

        let resolved = self.base_dir.join(path);
        self.sink
            .compile_import(&resolved)
            .map_err(GenerateError::Import)?;

        let target = format!("{stem}.{}", self.options.target_extension);
        let specifier = if target.starts_with("./")
            || target.starts_with("../")
            || target.starts_with('/')
        {
            target
        } else {
            format!("./{target}")
        };
        Ok(format!("require({})", string_literal(&specifier)))
    }
}
