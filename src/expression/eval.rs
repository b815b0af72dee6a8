use std::collections::{BTreeMap, BTreeSet};

use crate::expression::ast::{BinaryOp, Expr};
use crate::expression::error::ExprError;
use crate::expression::parser::parse_expr;
use crate::foundation::error::ReelResult;

/// Named-variable bag an [`Expression`] is evaluated against.
///
/// The set of names is populated per context; there are no global or default variables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprEnv {
    vars: BTreeMap<String, f64>,
}

impl ExprEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.vars.insert(name.into(), value);
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}

/// A parsed arithmetic expression: literals, `+ - * /`, unary minus, parentheses and variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    src: String,
    ast: Expr,
}

impl Expression {
    /// Parse `src`. Syntax errors are reported as evaluation errors with a byte offset.
    pub fn parse(src: &str) -> ReelResult<Self> {
        let ast = parse_expr(src)?;
        Ok(Self {
            src: src.to_owned(),
            ast,
        })
    }

    pub fn source(&self) -> &str {
        &self.src
    }

    /// Every distinct variable name the expression references.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.ast.for_each_var(&mut |name, _| {
            out.insert(name.to_owned());
        });
        out
    }

    /// Evaluate against `env`. Unknown variables, division by zero and non-finite results fail.
    pub fn eval(&self, env: &ExprEnv) -> ReelResult<f64> {
        let v = eval_node(&self.ast, env)?;
        if !v.is_finite() {
            return Err(ExprError::new(0, format!("'{}' evaluated to {v}", self.src)).into());
        }
        Ok(v)
    }
}

/// Parse and evaluate in one go.
pub fn evaluate(src: &str, env: &ExprEnv) -> ReelResult<f64> {
    Expression::parse(src)?.eval(env)
}

fn eval_node(e: &Expr, env: &ExprEnv) -> Result<f64, ExprError> {
    match e {
        Expr::Num(v) => Ok(*v),
        Expr::Var { name, offset } => env.get(name).ok_or_else(|| {
            ExprError::new(*offset, format!("unknown variable '{name}'"))
        }),
        Expr::Neg(inner) => Ok(-eval_node(inner, env)?),
        Expr::Binary { op, left, right } => {
            let l = eval_node(left, env)?;
            let r = eval_node(right, env)?;
            match op {
                BinaryOp::Add => Ok(l + r),
                BinaryOp::Sub => Ok(l - r),
                BinaryOp::Mul => Ok(l * r),
                BinaryOp::Div => {
                    if r == 0.0 {
                        return Err(ExprError::new(0, "division by zero"));
                    }
                    Ok(l / r)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
