#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Num(f64),
    /// A variable, possibly dotted: `step`, `bounds.xMin`, `prev.scaling`.
    Var { name: String, offset: usize },
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Expr {
    /// Visit every variable reference in source order.
    pub(crate) fn for_each_var(&self, f: &mut impl FnMut(&str, usize)) {
        match self {
            Expr::Num(_) => {}
            Expr::Var { name, offset } => f(name, *offset),
            Expr::Neg(e) => e.for_each_var(f),
            Expr::Binary { left, right, .. } => {
                left.for_each_var(f);
                right.for_each_var(f);
            }
        }
    }
}
