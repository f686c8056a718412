use std::mem;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn from_char(c: char) -> Option<BinOp> {
        match c {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Sub),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            _ => None,
        }
    }
}

/// One top-level statement or expression. `Let` and `Function` only ever
/// appear at statement level.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Let(String, Box<Expr>),
    Function(Rc<Function>),
    Call(String, Vec<Expr>),
}

impl Expr {
    /// Moves the children of `self` onto `stack`, leaving leaves behind.
    fn take_children(&mut self, stack: &mut Vec<Expr>) {
        let hole = || Expr::Number(0.0);
        match self {
            Expr::Number(_) | Expr::Variable(_) => {}
            Expr::Binary(_, lhs, rhs) => {
                stack.push(mem::replace(&mut **lhs, hole()));
                stack.push(mem::replace(&mut **rhs, hole()));
            }
            Expr::Let(_, value) => stack.push(mem::replace(&mut **value, hole())),
            Expr::Function(func) => {
                // the body is shared with any scope the function was bound in
                if let Some(func) = Rc::get_mut(func) {
                    stack.push(mem::replace(&mut func.1, hole()));
                }
            }
            Expr::Call(_, args) => stack.append(args),
        }
    }
}

// Operator chains nest one `Box` per operator, so drop with a work stack
// rather than recursion.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);
        while let Some(mut e) = stack.pop() {
            e.take_children(&mut stack);
        }
    }
}

/// Function name and parameter names, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype(pub String, pub Vec<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Function(pub Prototype, pub Expr);

impl Function {
    pub fn name(&self) -> &str {
        &(self.0).0
    }

    pub fn params(&self) -> &[String] {
        &(self.0).1
    }

    pub fn body(&self) -> &Expr {
        &self.1
    }
}
