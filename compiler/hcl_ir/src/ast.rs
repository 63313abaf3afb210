//! Analyzed AST.
//!
//! Produced by `hcl_analyze` from raw [`Sexp`]s once special forms,
//! operators and literals have been recognised.

use super::{Sexp, Span};

/// One analyzed source file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Module {
    pub items: Vec<Expr>,
}

/// Facts collected during analysis.
///
/// Not needed for code generation; the driver logs it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ModuleInfo {
    /// Names bound by top-level `def` forms, in source order.
    pub definitions: Vec<String>,
    /// Import paths exactly as written, in source order.
    pub imports: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    /// Number literal; text lives in the source under the expression span.
    Number,
    Str(String),
    Bool(bool),
    Nil,
    Var(String),
    /// `'datum` / `(quote datum)`
    Quote(Sexp),
    /// `[a b c]`
    Array(Vec<Expr>),
    /// `(def name value)`
    Def {
        name: String,
        value: Box<Expr>,
    },
    /// `(set! name value)`
    Set {
        name: String,
        value: Box<Expr>,
    },
    /// `(fn (params...) body...)`
    Fn {
        params: Vec<String>,
        body: Vec<Expr>,
    },
    /// `(if cond then else?)`
    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Option<Box<Expr>>,
    },
    /// `(do body...)`
    Do(Vec<Expr>),
    /// `(let ((name value)...) body...)`
    Let {
        bindings: Vec<(String, Expr)>,
        body: Vec<Expr>,
    },
    /// `(import "path")` or `(import name "path")`
    Import {
        binding: Option<String>,
        path: String,
        path_span: Span,
    },
    /// Variadic infix operator: `(+ a b c)`
    Binary {
        op: BinaryOp,
        operands: Vec<Expr>,
    },
    /// `(not x)`
    Not(Box<Expr>),
    /// `(callee args...)`
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

/// Operators written in prefix position and emitted infix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            "<" => BinaryOp::Lt,
            ">" => BinaryOp::Gt,
            "<=" => BinaryOp::Le,
            ">=" => BinaryOp::Ge,
            "=" => BinaryOp::Eq,
            "!=" => BinaryOp::Ne,
            "and" => BinaryOp::And,
            "or" => BinaryOp::Or,
            _ => return None,
        })
    }

    /// The JavaScript operator this lowers to.
    pub fn js_operator(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "===",
            BinaryOp::Ne => "!==",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Comparisons are binary only; the arithmetic and logical operators
    /// chain over any number of operands.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne
        )
    }

    /// Fewest operands the form accepts. `(- x)` is negation.
    pub fn min_operands(self) -> usize {
        match self {
            BinaryOp::Sub => 1,
            _ => 2,
        }
    }
}
