//! Expression tree.

use std::f64::consts;
use std::fmt::{self, Write};

/// Built-in functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Exponential.
    Exp,
    /// Natural logarithm (`log` or `ln`).
    Ln,
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
    /// Sign: -1, 0 or 1.
    Sign,
}

impl Func {
    /// Looks up a function by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "log" | "ln" => Self::Ln,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            "sign" => Self::Sign,
            _ => return None,
        };
        Some(func)
    }

    /// Returns the canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "log",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Sign => "sign",
        }
    }

    /// Applies the function.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
            Self::Abs => x.abs(),
            // f64::signum maps 0 to 1
            Self::Sign => {
                if x > 0.0 {
                    1.0
                } else if x < 0.0 {
                    -1.0
                } else {
                    x
                }
            }
        }
    }
}

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// Archimedes' constant.
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    /// Looks up a constant by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "E" => Some(Self::E),
            _ => None,
        }
    }

    /// Returns the constant's value.
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => consts::PI,
            Self::E => consts::E,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "E",
        }
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric literal.
    Number(f64),
    /// The expression's variable.
    Var,
    /// Named constant.
    Const(Constant),
    /// Unary minus.
    Neg(Box<Node>),
    /// Sum.
    Add(Box<Node>, Box<Node>),
    /// Difference.
    Sub(Box<Node>, Box<Node>),
    /// Product.
    Mul(Box<Node>, Box<Node>),
    /// Quotient.
    Div(Box<Node>, Box<Node>),
    /// Power.
    Pow(Box<Node>, Box<Node>),
    /// Function application.
    Call(Func, Box<Node>),
}

impl Node {
    /// Evaluates the tree at `x`. May return NaN or infinity.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Var => x,
            Self::Const(c) => c.value(),
            Self::Neg(u) => -u.eval(x),
            Self::Add(u, v) => u.eval(x) + v.eval(x),
            Self::Sub(u, v) => u.eval(x) - v.eval(x),
            Self::Mul(u, v) => u.eval(x) * v.eval(x),
            Self::Div(u, v) => u.eval(x) / v.eval(x),
            Self::Pow(u, v) => u.eval(x).powf(v.eval(x)),
            Self::Call(func, u) => func.apply(u.eval(x)),
        }
    }

    /// Returns true if the tree mentions the variable.
    pub fn depends_on_var(&self) -> bool {
        match self {
            Self::Number(_) | Self::Const(_) => false,
            Self::Var => true,
            Self::Neg(u) | Self::Call(_, u) => u.depends_on_var(),
            Self::Add(u, v)
            | Self::Sub(u, v)
            | Self::Mul(u, v)
            | Self::Div(u, v)
            | Self::Pow(u, v) => u.depends_on_var() || v.depends_on_var(),
        }
    }

    /// Returns the literal value if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    // Binding strength used to decide where parentheses are needed.
    fn precedence(&self) -> u8 {
        match self {
            Self::Add(..) | Self::Sub(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Neg(_) => 3,
            Self::Number(n) if n.is_sign_negative() => 3,
            Self::Pow(..) => 4,
            _ => 5,
        }
    }

    /// Writes the tree in input syntax, naming the variable `var`.
    pub fn write_to(&self, out: &mut impl Write, var: &str) -> fmt::Result {
        self.write_at(out, var, 0)
    }

    fn write_at(&self, out: &mut impl Write, var: &str, min_prec: u8) -> fmt::Result {
        let parens = self.precedence() < min_prec;
        if parens {
            out.write_char('(')?;
        }
        match self {
            Self::Number(n) => write!(out, "{}", n)?,
            Self::Var => out.write_str(var)?,
            Self::Const(c) => out.write_str(c.name())?,
            Self::Neg(u) => {
                out.write_char('-')?;
                u.write_at(out, var, 3)?;
            }
            Self::Add(u, v) => {
                u.write_at(out, var, 1)?;
                out.write_str(" + ")?;
                v.write_at(out, var, 2)?;
            }
            Self::Sub(u, v) => {
                u.write_at(out, var, 1)?;
                out.write_str(" - ")?;
                v.write_at(out, var, 2)?;
            }
            Self::Mul(u, v) => {
                u.write_at(out, var, 2)?;
                out.write_char('*')?;
                v.write_at(out, var, 3)?;
            }
            Self::Div(u, v) => {
                u.write_at(out, var, 2)?;
                out.write_char('/')?;
                v.write_at(out, var, 3)?;
            }
            Self::Pow(u, v) => {
                u.write_at(out, var, 5)?;
                out.write_str("**")?;
                v.write_at(out, var, 4)?;
            }
            Self::Call(func, u) => {
                write!(out, "{}(", func.name())?;
                u.write_at(out, var, 0)?;
                out.write_char(')')?;
            }
        }
        if parens {
            out.write_char(')')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Node> {
        Box::new(Node::Number(n))
    }

    fn render(node: &Node) -> String {
        let mut out = String::new();
        node.write_to(&mut out, "x").unwrap();
        out
    }

    #[test]
    fn test_sign_of_zero() {
        assert_eq!(Func::Sign.apply(0.0), 0.0);
        assert_eq!(Func::Sign.apply(-3.0), -1.0);
        assert_eq!(Func::Sign.apply(0.1), 1.0);
    }

    #[test]
    fn test_parenthesization() {
        // (x + 1)*2
        let node = Node::Mul(Box::new(Node::Add(Box::new(Node::Var), num(1.0))), num(2.0));
        assert_eq!(render(&node), "(x + 1)*2");

        // x - (1 - x)
        let node = Node::Sub(
            Box::new(Node::Var),
            Box::new(Node::Sub(num(1.0), Box::new(Node::Var))),
        );
        assert_eq!(render(&node), "x - (1 - x)");

        // x**(-1) and (-x)**2
        let node = Node::Pow(Box::new(Node::Var), num(-1.0));
        assert_eq!(render(&node), "x**(-1)");
        let node = Node::Pow(Box::new(Node::Neg(Box::new(Node::Var))), num(2.0));
        assert_eq!(render(&node), "(-x)**2");
    }

    #[test]
    fn test_depends_on_var() {
        let node = Node::Call(Func::Sin, Box::new(Node::Const(Constant::Pi)));
        assert!(!node.depends_on_var());
        let node = Node::Pow(num(2.0), Box::new(Node::Var));
        assert!(node.depends_on_var());
    }
}
