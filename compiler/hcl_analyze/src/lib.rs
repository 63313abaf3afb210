//! Semantic analysis for Hot Cocoa Lisp.
//!
//! Lowers raw s-expressions into the analyzed [`Module`], recognising special
//! forms and operators and checking their shape. Also collects [`ModuleInfo`]
//! (top-level definitions and imports).
//!
//! # Special forms
//!
//! | Form | Shape |
//! |---|---|
//! | `quote` | `(quote datum)` |
//! | `def` | `(def name value)`, top level only |
//! | `set!` | `(set! name value)` |
//! | `fn` | `(fn (params...) body...)` |
//! | `if` | `(if cond then)` / `(if cond then else)` |
//! | `do` | `(do body...)` |
//! | `let` | `(let ((name value)...) body...)` |
//! | `import` | `(import "path")` / `(import name "path")`, top level only |
//! | `not` | `(not x)` |

use hcl_ir::stack::ensure_sufficient_stack;
use hcl_ir::{
    BinaryOp, Diagnostic, ErrorCode, Expr, ExprKind, Module, ModuleInfo, Sexp, SexpKind, Span,
};
use rustc_hash::FxHashSet;

/// Analyze a parsed program.
pub fn analyze(forms: Vec<Sexp>) -> Result<(Module, ModuleInfo), Diagnostic> {
    let mut info = ModuleInfo::default();
    let mut items = Vec::with_capacity(forms.len());

    for form in &forms {
        let expr = Analyzer { top_level: true }.lower(form)?;
        match &expr.kind {
            ExprKind::Def { name, .. } => info.definitions.push(name.clone()),
            ExprKind::Import { path, .. } => info.imports.push(path.clone()),
            _ => {}
        }
        items.push(expr);
    }

    Ok((Module { items }, info))
}

#[derive(Clone, Copy)]
struct Analyzer {
    top_level: bool,
}

impl Analyzer {
    const NESTED: Analyzer = Analyzer { top_level: false };

    fn lower(self, sexp: &Sexp) -> Result<Expr, Diagnostic> {
        ensure_sufficient_stack(|| self.lower_inner(sexp))
    }

    fn lower_inner(self, sexp: &Sexp) -> Result<Expr, Diagnostic> {
        let kind = match &sexp.kind {
            SexpKind::Number => ExprKind::Number,
            SexpKind::Str(value) => ExprKind::Str(value.clone()),
            SexpKind::Symbol(name) => match name.as_str() {
                "true" => ExprKind::Bool(true),
                "false" => ExprKind::Bool(false),
                "nil" => ExprKind::Nil,
                _ => ExprKind::Var(name.clone()),
            },
            SexpKind::Vector(items) => ExprKind::Array(Self::NESTED.lower_all(items)?),
            SexpKind::List(items) => return self.lower_list(items, sexp.span),
        };
        Ok(Expr::new(kind, sexp.span))
    }

    fn lower_all(self, sexps: &[Sexp]) -> Result<Vec<Expr>, Diagnostic> {
        sexps.iter().map(|s| self.lower(s)).collect()
    }

    fn lower_boxed(self, sexp: &Sexp) -> Result<Box<Expr>, Diagnostic> {
        self.lower(sexp).map(Box::new)
    }

    fn lower_list(self, items: &[Sexp], span: Span) -> Result<Expr, Diagnostic> {
        let Some((head, args)) = items.split_first() else {
            return Ok(Expr::new(ExprKind::Nil, span));
        };

        let nested = Self::NESTED;
        let kind = match &head.kind {
            SexpKind::Symbol(name) => match name.as_str() {
                "quote" => {
                    let [datum] = expect_arity::<1>(name, args, span)?;
                    ExprKind::Quote(datum.clone())
                }
                "def" => {
                    self.require_top_level(name, span)?;
                    let [target, value] = expect_arity::<2>(name, args, span)?;
                    ExprKind::Def {
                        name: expect_symbol(target, "`def` name")?,
                        value: nested.lower_boxed(value)?,
                    }
                }
                "set!" => {
                    let [target, value] = expect_arity::<2>(name, args, span)?;
                    ExprKind::Set {
                        name: expect_symbol(target, "`set!` target")?,
                        value: nested.lower_boxed(value)?,
                    }
                }
                "fn" => {
                    let Some((params, body)) = args.split_first() else {
                        return Err(arity_error(name, "a parameter list", 0, span));
                    };
                    ExprKind::Fn {
                        params: lower_params(params)?,
                        body: nested.lower_all(body)?,
                    }
                }
                "if" => match args {
                    [cond, then] => ExprKind::If {
                        cond: nested.lower_boxed(cond)?,
                        then: nested.lower_boxed(then)?,
                        otherwise: None,
                    },
                    [cond, then, otherwise] => ExprKind::If {
                        cond: nested.lower_boxed(cond)?,
                        then: nested.lower_boxed(then)?,
                        otherwise: Some(nested.lower_boxed(otherwise)?),
                    },
                    _ => return Err(arity_error(name, "2 or 3 operands", args.len(), span)),
                },
                "do" => ExprKind::Do(nested.lower_all(args)?),
                "let" => {
                    let Some((bindings, body)) = args.split_first() else {
                        return Err(arity_error(name, "a binding list", 0, span));
                    };
                    ExprKind::Let {
                        bindings: lower_bindings(bindings)?,
                        body: nested.lower_all(body)?,
                    }
                }
                "import" => {
                    self.require_top_level(name, span)?;
                    lower_import(args, span)?
                }
                "not" => {
                    let [operand] = expect_arity::<1>(name, args, span)?;
                    ExprKind::Not(nested.lower_boxed(operand)?)
                }
                _ => match BinaryOp::from_symbol(name) {
                    Some(op) => lower_binary(op, name, args, span)?,
                    None => call(head, args)?,
                },
            },
            SexpKind::Number | SexpKind::Str(_) => {
                return Err(Diagnostic::error(
                    ErrorCode::E3005,
                    "a literal cannot be called",
                    head.span,
                )
                .with_note("use `quote` or `[...]` for a literal list"));
            }
            SexpKind::List(_) | SexpKind::Vector(_) => call(head, args)?,
        };
        Ok(Expr::new(kind, span))
    }

    fn require_top_level(self, form: &str, span: Span) -> Result<(), Diagnostic> {
        if self.top_level {
            Ok(())
        } else {
            Err(Diagnostic::error(
                ErrorCode::E3006,
                format!("`{form}` is only allowed at top level"),
                span,
            ))
        }
    }
}

fn call(head: &Sexp, args: &[Sexp]) -> Result<ExprKind, Diagnostic> {
    Ok(ExprKind::Call {
        callee: Analyzer::NESTED.lower_boxed(head)?,
        args: Analyzer::NESTED.lower_all(args)?,
    })
}

fn lower_binary(
    op: BinaryOp,
    name: &str,
    args: &[Sexp],
    span: Span,
) -> Result<ExprKind, Diagnostic> {
    if op.is_comparison() && args.len() != 2 {
        return Err(arity_error(name, "exactly 2 operands", args.len(), span));
    }
    if args.len() < op.min_operands() {
        let expected = format!("at least {} operands", op.min_operands());
        return Err(arity_error(name, &expected, args.len(), span));
    }
    Ok(ExprKind::Binary {
        op,
        operands: Analyzer::NESTED.lower_all(args)?,
    })
}

fn lower_import(args: &[Sexp], span: Span) -> Result<ExprKind, Diagnostic> {
    let (binding, path) = match args {
        [path] => (None, path),
        [name, path] => (Some(expect_symbol(name, "import binding")?), path),
        _ => return Err(arity_error("import", "1 or 2 operands", args.len(), span)),
    };
    let SexpKind::Str(value) = &path.kind else {
        return Err(Diagnostic::error(
            ErrorCode::E3003,
            "import path must be a string literal",
            path.span,
        ));
    };
    Ok(ExprKind::Import {
        binding,
        path: value.clone(),
        path_span: path.span,
    })
}

/// `(a b c)` or `[a b c]`.
fn lower_params(params: &Sexp) -> Result<Vec<String>, Diagnostic> {
    let (SexpKind::List(items) | SexpKind::Vector(items)) = &params.kind else {
        return Err(Diagnostic::error(
            ErrorCode::E3004,
            "expected a parameter list",
            params.span,
        ));
    };
    let mut seen = FxHashSet::default();
    items
        .iter()
        .map(|item| {
            let name = expect_symbol(item, "parameter")?;
            if !seen.insert(name.clone()) {
                return Err(Diagnostic::error(
                    ErrorCode::E3004,
                    format!("duplicate parameter `{name}`"),
                    item.span,
                ));
            }
            Ok(name)
        })
        .collect()
}

/// `((a 1) (b 2))`.
fn lower_bindings(bindings: &Sexp) -> Result<Vec<(String, Expr)>, Diagnostic> {
    let Some(pairs) = bindings.as_list() else {
        return Err(Diagnostic::error(
            ErrorCode::E3004,
            "expected a binding list like `((name value) ...)`",
            bindings.span,
        ));
    };
    let mut seen = FxHashSet::default();
    pairs
        .iter()
        .map(|pair| match pair.as_list() {
            Some([name, value]) => {
                let name_str = expect_symbol(name, "binding name")?;
                if !seen.insert(name_str.clone()) {
                    return Err(Diagnostic::error(
                        ErrorCode::E3004,
                        format!("`{name_str}` is bound twice"),
                        name.span,
                    ));
                }
                Ok((name_str, Analyzer::NESTED.lower(value)?))
            }
            _ => Err(Diagnostic::error(
                ErrorCode::E3004,
                "each binding must be a `(name value)` pair",
                pair.span,
            )),
        })
        .collect()
}

fn expect_arity<'a, const N: usize>(
    form: &str,
    args: &'a [Sexp],
    span: Span,
) -> Result<&'a [Sexp; N], Diagnostic> {
    args.try_into().map_err(|_| {
        let expected = match N {
            1 => "exactly 1 operand".to_string(),
            n => format!("exactly {n} operands"),
        };
        arity_error(form, &expected, args.len(), span)
    })
}

fn expect_symbol(sexp: &Sexp, what: &str) -> Result<String, Diagnostic> {
    sexp.as_symbol().map(str::to_string).ok_or_else(|| {
        Diagnostic::error(
            ErrorCode::E3002,
            format!("{what} must be a symbol"),
            sexp.span,
        )
    })
}

#[cold]
fn arity_error(form: &str, expected: &str, found: usize, span: Span) -> Diagnostic {
    Diagnostic::error(
        ErrorCode::E3001,
        format!("`{form}` expects {expected}, found {found}"),
        span,
    )
}
