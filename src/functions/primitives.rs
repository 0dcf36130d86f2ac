use std::fmt;

/// Signature shared by every operator: child values in, one value out.
pub type OperatorFn = fn(&[f64]) -> f64;

/// Placeholder substituted by rendered children, left to right.
pub const PLACEHOLDER: &str = "{}";

/// Largest arity any operator may declare.
pub const MAX_ARITY: usize = 2;

/// Immutable operator entry.
///
/// `template` carries exactly `arity` placeholders; [`Operator::placeholder_count`]
/// is checked by the registry before an operator can be used.
pub struct Operator {
    name: &'static str,
    arity: usize,
    function: OperatorFn,
    template: &'static str,
}

impl Operator {
    pub const fn new(
        name: &'static str,
        arity: usize,
        function: OperatorFn,
        template: &'static str,
    ) -> Self {
        Self {
            name,
            arity,
            function,
            template,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn placeholder_count(&self) -> usize {
        self.template.matches(PLACEHOLDER).count()
    }

    /// Apply the operator to already evaluated children.
    pub fn apply(&self, args: &[f64]) -> f64 {
        (self.function)(args)
    }

    /// Substitute rendered children into the template in child order.
    pub fn format(&self, args: &[String]) -> String {
        let capacity = self.template.len() + args.iter().map(String::len).sum::<usize>();
        let mut out = String::with_capacity(capacity);
        let mut pieces = self.template.split(PLACEHOLDER);
        if let Some(head) = pieces.next() {
            out.push_str(head);
        }
        for (piece, arg) in pieces.zip(args) {
            out.push_str(arg);
            out.push_str(piece);
        }
        out
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("template", &self.template)
            .finish()
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arity == other.arity
    }
}

fn add(args: &[f64]) -> f64 {
    args[0] + args[1]
}

fn sub(args: &[f64]) -> f64 {
    args[0] - args[1]
}

fn mul(args: &[f64]) -> f64 {
    args[0] * args[1]
}

fn div(args: &[f64]) -> f64 {
    safe_div(args[0], args[1])
}

fn neg(args: &[f64]) -> f64 {
    -args[0]
}

/// Division that returns the numerator unchanged when the denominator is
/// exactly zero.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        numerator
    }
}

pub static ADD: Operator = Operator::new("add", 2, add, "({} + {})");
pub static SUB: Operator = Operator::new("sub", 2, sub, "({} - {})");
pub static MUL: Operator = Operator::new("mul", 2, mul, "({} * {})");
pub static DIV: Operator = Operator::new("div", 2, div, "({} / {})");
pub static NEG: Operator = Operator::new("neg", 1, neg, "-({})");

/// Built-in catalog, in registry order.
pub static BUILTIN_OPERATORS: [&Operator; 5] = [&ADD, &SUB, &MUL, &DIV, &NEG];
