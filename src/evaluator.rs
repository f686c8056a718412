use super::ast::{BinOp, Expr};
use super::config::Config;
use super::environment::{Environment, Scope, Value};
use super::error::{Error, ErrorKind};
use log::{debug, trace};
use std::rc::Rc;

pub struct Evaluator {
    config: Config,
    calls: usize,
}

fn apply(op: BinOp, lhs: f64, rhs: f64) -> Result<f64, Error> {
    match op {
        BinOp::Add => Ok(lhs + rhs),
        BinOp::Sub => Ok(lhs - rhs),
        BinOp::Mul => Ok(lhs * rhs),
        BinOp::Div if rhs == 0.0 => Err(Error::from(ErrorKind::DivisionByZero)),
        BinOp::Div => Ok(lhs / rhs),
    }
}

impl Evaluator {
    pub fn new(config: Config) -> Evaluator {
        Evaluator { config, calls: 0 }
    }

    /// Evaluates `program` statement by statement against `env` and returns
    /// the value of the last statement, or `None` for an empty program.
    pub fn run(&mut self, program: &[Expr], env: &mut Environment) -> Result<Option<f64>, Error> {
        debug!("evaluating {} statements", program.len());
        let mut last = None;
        for stmt in program {
            last = Some(self.evaluate(stmt, env)?);
        }
        Ok(last)
    }

    pub fn evaluate(&mut self, e: &Expr, env: &mut Environment) -> Result<f64, Error> {
        match e {
            Expr::Number(n) => Ok(*n),
            Expr::Variable(name) => match env.lookup(name)? {
                Value::Number(n) => Ok(*n),
                Value::Function(_) => Err(Error::type_error(format!(
                    "'{}' is a function and must be called",
                    name
                ))),
            },
            Expr::Binary(..) => self.binary(e, env),
            Expr::Let(name, value) => {
                let v = self.evaluate(value, env)?;
                debug!("let {} = {}", name, v);
                env.define(name.as_str(), Value::Number(v));
                Ok(v)
            }
            Expr::Function(func) => {
                debug!("func {}({})", func.name(), func.params().join(", "));
                env.define(func.name(), Value::Function(Rc::clone(func)));
                Ok(0.0)
            }
            Expr::Call(name, args) => self.call(name, args, env),
        }
    }

    /// Left operand chains (`a + b - c ...`) are walked with a loop rather
    /// than recursion; operands are still evaluated left to right.
    fn binary(&mut self, e: &Expr, env: &mut Environment) -> Result<f64, Error> {
        let mut spine = Vec::new();
        let mut node = e;
        while let Expr::Binary(op, lhs, rhs) = node {
            spine.push((*op, rhs));
            node = &**lhs;
        }

        let mut acc = self.evaluate(node, env)?;
        for (op, rhs) in spine.into_iter().rev() {
            let rhs_val = self.evaluate(rhs, env)?;
            acc = apply(op, acc, rhs_val)?;
        }
        Ok(acc)
    }

    fn call(&mut self, name: &str, args: &[Expr], env: &mut Environment) -> Result<f64, Error> {
        let func = match env.lookup(name)? {
            Value::Function(func) => Rc::clone(func),
            Value::Number(_) => {
                return Err(Error::type_error(format!(
                    "'{}' is a number, not a function",
                    name
                )))
            }
        };

        // arguments see the caller's chain, never the callee's parameters
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg, env)?);
        }

        let params = func.params();
        if values.len() != params.len() {
            return Err(Error::from(ErrorKind::ArityMismatch {
                name: name.to_owned(),
                expected: params.len(),
                found: values.len(),
            }));
        }
        if self.calls >= self.config.max_call_depth {
            return Err(Error::from(ErrorKind::RecursionLimit {
                limit: self.config.max_call_depth,
            }));
        }

        let bindings: Scope = params
            .iter()
            .cloned()
            .zip(values.into_iter().map(Value::Number))
            .collect();

        // The body resolves names through the whole chain visible at the
        // call site, including the caller's own call scope.
        let mut callee = env.push_call_scope(bindings);
        trace!("call {} at chain depth {}", name, callee.depth());
        self.calls += 1;
        let result = self.evaluate(func.body(), &mut callee);
        self.calls -= 1;
        result
    }
}
