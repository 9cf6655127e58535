//! Symbolic differentiation.
//!
//! The builders below fold numeric literals and drop the `0`/`1` identities
//! as they go, which keeps derivatives of polynomials readable
//! (`3*x**2 - 1` rather than `3*x**(3 - 1)*1 - 1 - 0`).

use crate::expression::ast::{Func, Node};

fn number(n: f64) -> Node {
    Node::Number(n)
}

pub(crate) fn neg(u: Node) -> Node {
    match u {
        Node::Number(n) if n == 0.0 => number(0.0),
        Node::Number(n) => number(-n),
        Node::Neg(inner) => *inner,
        other => Node::Neg(Box::new(other)),
    }
}

pub(crate) fn add(u: Node, v: Node) -> Node {
    match (u.as_number(), v.as_number()) {
        (Some(a), Some(b)) => number(a + b),
        (Some(a), _) if a == 0.0 => v,
        (_, Some(b)) if b == 0.0 => u,
        _ => Node::Add(Box::new(u), Box::new(v)),
    }
}

pub(crate) fn sub(u: Node, v: Node) -> Node {
    match (u.as_number(), v.as_number()) {
        (Some(a), Some(b)) => number(a - b),
        (_, Some(b)) if b == 0.0 => u,
        (Some(a), _) if a == 0.0 => neg(v),
        _ => Node::Sub(Box::new(u), Box::new(v)),
    }
}

pub(crate) fn mul(u: Node, v: Node) -> Node {
    match (u.as_number(), v.as_number()) {
        (Some(a), Some(b)) => number(a * b),
        (Some(a), _) | (_, Some(a)) if a == 0.0 => number(0.0),
        (Some(a), _) if a == 1.0 => v,
        (_, Some(b)) if b == 1.0 => u,
        (Some(a), _) if a == -1.0 => neg(v),
        _ => Node::Mul(Box::new(u), Box::new(v)),
    }
}

pub(crate) fn div(u: Node, v: Node) -> Node {
    match (u.as_number(), v.as_number()) {
        (Some(a), Some(b)) if b != 0.0 => number(a / b),
        (Some(a), _) if a == 0.0 => number(0.0),
        (_, Some(b)) if b == 1.0 => u,
        _ => Node::Div(Box::new(u), Box::new(v)),
    }
}

pub(crate) fn pow(u: Node, v: Node) -> Node {
    match (u.as_number(), v.as_number()) {
        (_, Some(b)) if b == 0.0 => number(1.0),
        (_, Some(b)) if b == 1.0 => u,
        (Some(a), Some(b)) if a.powf(b).is_finite() => number(a.powf(b)),
        _ => Node::Pow(Box::new(u), Box::new(v)),
    }
}

fn call(func: Func, u: Node) -> Node {
    Node::Call(func, Box::new(u))
}

/// Returns `d/dx` of `node` with respect to the variable.
pub(crate) fn differentiate(node: &Node) -> Node {
    match node {
        Node::Number(_) | Node::Const(_) => number(0.0),
        Node::Var => number(1.0),
        Node::Neg(u) => neg(differentiate(u)),
        Node::Add(u, v) => add(differentiate(u), differentiate(v)),
        Node::Sub(u, v) => sub(differentiate(u), differentiate(v)),
        Node::Mul(u, v) => add(
            mul(differentiate(u), (**v).clone()),
            mul((**u).clone(), differentiate(v)),
        ),
        Node::Div(u, v) => div(
            sub(
                mul(differentiate(u), (**v).clone()),
                mul((**u).clone(), differentiate(v)),
            ),
            pow((**v).clone(), number(2.0)),
        ),
        Node::Pow(u, v) => differentiate_pow(u, v),
        Node::Call(func, u) => mul(outer_derivative(*func, u), differentiate(u)),
    }
}

fn differentiate_pow(u: &Node, v: &Node) -> Node {
    if !v.depends_on_var() {
        // d(u^c) = c * u^(c - 1) * u'
        let exponent = sub(v.clone(), number(1.0));
        return mul(
            mul(v.clone(), pow(u.clone(), exponent)),
            differentiate(u),
        );
    }
    if !u.depends_on_var() {
        // d(c^v) = c^v * ln(c) * v'
        return mul(
            mul(pow(u.clone(), v.clone()), call(Func::Ln, u.clone())),
            differentiate(v),
        );
    }
    // d(u^v) = u^v * (v' * ln(u) + v * u' / u)
    mul(
        pow(u.clone(), v.clone()),
        add(
            mul(differentiate(v), call(Func::Ln, u.clone())),
            div(mul(v.clone(), differentiate(u)), u.clone()),
        ),
    )
}

// Derivative of `func` evaluated at `u`, before the chain rule factor.
fn outer_derivative(func: Func, u: &Node) -> Node {
    let u = u.clone();
    match func {
        Func::Sin => call(Func::Cos, u),
        Func::Cos => neg(call(Func::Sin, u)),
        Func::Tan => add(number(1.0), pow(call(Func::Tan, u), number(2.0))),
        Func::Asin => div(
            number(1.0),
            call(Func::Sqrt, sub(number(1.0), pow(u, number(2.0)))),
        ),
        Func::Acos => neg(div(
            number(1.0),
            call(Func::Sqrt, sub(number(1.0), pow(u, number(2.0)))),
        )),
        Func::Atan => div(number(1.0), add(number(1.0), pow(u, number(2.0)))),
        Func::Sinh => call(Func::Cosh, u),
        Func::Cosh => call(Func::Sinh, u),
        Func::Tanh => sub(number(1.0), pow(call(Func::Tanh, u), number(2.0))),
        Func::Exp => call(Func::Exp, u),
        Func::Ln => div(number(1.0), u),
        Func::Sqrt => div(number(1.0), mul(number(2.0), call(Func::Sqrt, u))),
        Func::Abs => call(Func::Sign, u),
        Func::Sign => number(0.0),
    }
}
