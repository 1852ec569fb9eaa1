use crate::{
    error::Error,
    registry::{Assoc, Notation, Registry},
    tree::Value::{self, *},
};
use std::cmp::Ordering;

// Binding strengths of the standard operators.
const OR: u8 = 1;
const AND: u8 = 2;
const COMPARE: u8 = 4;
const NOT: u8 = 5;
const SUM: u8 = 10;
const NEGATE: u8 = 15;
const PRODUCT: u8 = 20;
const POWER: u8 = 40;

type Rule = fn(&[Value]) -> Result<Value, Error>;

fn define(reg: &mut Registry, symbol: &str, arity: usize, notation: Notation, rule: Rule) {
    // The standard definitions are fixed, and covered by tests. Failing here
    // is a bug in this module.
    if let Err(e) = reg.register(symbol, arity, notation, rule) {
        panic!("Invalid standard definition of `{symbol}`: {e}");
    }
}

/// Register the standard vocabulary with `reg`.
pub(crate) fn register_standard(reg: &mut Registry) {
    let op = Notation::operator;
    let delim = Notation::delimited;
    let func = Notation::function;
    // Boolean.
    define(reg, "or", 2, op(r"{0} \lor {1}", OR, Assoc::Both), |v| {
        Ok(Bool(v[0].boolean()? | v[1].boolean()?))
    });
    define(reg, "and", 2, op(r"{0} \land {1}", AND, Assoc::Both), |v| {
        Ok(Bool(v[0].boolean()? & v[1].boolean()?))
    });
    define(reg, "not", 1, op(r"\lnot {0}", NOT, Assoc::None), |v| {
        Ok(Bool(!v[0].boolean()?))
    });
    // Comparisons.
    define(reg, "<", 2, op(r"{0} < {1}", COMPARE, Assoc::None), |v| {
        Ok(Bool(compare(v[0], v[1])? == Some(Ordering::Less)))
    });
    define(reg, "<=", 2, op(r"{0} \leq {1}", COMPARE, Assoc::None), |v| {
        Ok(Bool(matches!(
            compare(v[0], v[1])?,
            Some(Ordering::Less | Ordering::Equal)
        )))
    });
    define(reg, "=", 2, op(r"{0} = {1}", COMPARE, Assoc::None), |v| {
        Ok(Bool(equal(v[0], v[1])?))
    });
    define(reg, "!=", 2, op(r"{0} \neq {1}", COMPARE, Assoc::None), |v| {
        Ok(Bool(!equal(v[0], v[1])?))
    });
    define(reg, ">", 2, op(r"{0} > {1}", COMPARE, Assoc::None), |v| {
        Ok(Bool(compare(v[0], v[1])? == Some(Ordering::Greater)))
    });
    define(reg, ">=", 2, op(r"{0} \geq {1}", COMPARE, Assoc::None), |v| {
        Ok(Bool(matches!(
            compare(v[0], v[1])?,
            Some(Ordering::Greater | Ordering::Equal)
        )))
    });
    // Arithmetic.
    define(reg, "+", 2, op(r"{0} + {1}", SUM, Assoc::Both), |v| {
        arithmetic(v[0], v[1], i64::checked_add, |a, b| a + b)
    });
    define(reg, "-", 2, op(r"{0} - {1}", SUM, Assoc::Left), |v| {
        arithmetic(v[0], v[1], i64::checked_sub, |a, b| a - b)
    });
    define(reg, "neg", 1, op(r"-{0}", NEGATE, Assoc::None), |v| match v[0] {
        Integer(a) => a.checked_neg().map(Integer).ok_or(Error::Overflow),
        other => Ok(Real(-other.real()?)),
    });
    define(reg, "*", 2, op(r"{0} \cdot {1}", PRODUCT, Assoc::Both), |v| {
        arithmetic(v[0], v[1], i64::checked_mul, |a, b| a * b)
    });
    define(reg, "mod", 2, op(r"{0} \bmod {1}", PRODUCT, Assoc::Left), |v| {
        match (v[0], v[1]) {
            (Integer(_), Integer(0)) => Err(Error::DivisionByZero),
            (lhs, rhs) => arithmetic(lhs, rhs, floored_rem, |a, b| a - b * f64::floor(a / b)),
        }
    });
    define(reg, "/", 2, delim(r"\dfrac{{{0}}}{{{1}}}"), |v| {
        Ok(Real(v[0].real()? / v[1].real()?))
    });
    define(reg, "^", 2, op(r"{0}^{{{1}}}", POWER, Assoc::Right), |v| {
        match (v[0], v[1]) {
            (Integer(base), Integer(exp)) if exp >= 0 => match (base, u32::try_from(exp)) {
                (_, Ok(exp)) => base.checked_pow(exp).map(Integer).ok_or(Error::Overflow),
                // Huge exponents are only exact for these bases.
                (0 | 1, Err(_)) => Ok(Integer(base)),
                (-1, Err(_)) => Ok(Integer(if exp % 2 == 0 { 1 } else { -1 })),
                (_, Err(_)) => Err(Error::Overflow),
            },
            (base, exp) => Ok(Real(f64::powf(base.real()?, exp.real()?))),
        }
    });
    // Delimited.
    define(reg, "sqrt", 1, delim(r"\sqrt{{{0}}}"), |v| {
        Ok(Real(f64::sqrt(v[0].real()?)))
    });
    define(reg, "abs", 1, delim(r"\left|{0}\right|"), |v| match v[0] {
        Integer(a) => a.checked_abs().map(Integer).ok_or(Error::Overflow),
        other => Ok(Real(f64::abs(other.real()?))),
    });
    define(reg, "floor", 1, delim(r"\left\lfloor {0} \right\rfloor"), |v| {
        match v[0] {
            Integer(a) => Ok(Integer(a)),
            other => Ok(Real(f64::floor(other.real()?))),
        }
    });
    // Every operand is evaluated before the rule runs, so the branch that is
    // not chosen is evaluated too.
    define(
        reg,
        "if",
        3,
        delim(r"\begin{{cases}} {1} & \text{{if }} {0} \\ {2} & \text{{otherwise}} \end{{cases}}"),
        |v| if v[0].boolean()? { Ok(v[1]) } else { Ok(v[2]) },
    );
    // Functions.
    define(reg, "sin", 1, func(r"\sin"), |v| Ok(Real(f64::sin(v[0].real()?))));
    define(reg, "cos", 1, func(r"\cos"), |v| Ok(Real(f64::cos(v[0].real()?))));
    define(reg, "tan", 1, func(r"\tan"), |v| Ok(Real(f64::tan(v[0].real()?))));
    define(reg, "ln", 1, func(r"\ln"), |v| Ok(Real(f64::ln(v[0].real()?))));
    define(reg, "exp", 1, func(r"\exp"), |v| Ok(Real(f64::exp(v[0].real()?))));
    define(reg, "min", 2, func(r"\min"), |v| match (v[0], v[1]) {
        (Integer(a), Integer(b)) => Ok(Integer(i64::min(a, b))),
        (a, b) => Ok(Real(f64::min(a.real()?, b.real()?))),
    });
    define(reg, "max", 2, func(r"\max"), |v| match (v[0], v[1]) {
        (Integer(a), Integer(b)) => Ok(Integer(i64::max(a, b))),
        (a, b) => Ok(Real(f64::max(a.real()?, b.real()?))),
    });
}

/// Integers stay integers unless they overflow. Anything involving a real
/// number produces a real number.
fn arithmetic(
    lhs: Value,
    rhs: Value,
    int_op: fn(i64, i64) -> Option<i64>,
    real_op: fn(f64, f64) -> f64,
) -> Result<Value, Error> {
    match (lhs, rhs) {
        (Integer(a), Integer(b)) => int_op(a, b).map(Integer).ok_or(Error::Overflow),
        (a, b) => Ok(Real(real_op(a.real()?, b.real()?))),
    }
}

/// Remainder with the sign of the divisor.
fn floored_rem(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}

/// Compare two numbers. `None` means they are not ordered (NaN).
fn compare(lhs: Value, rhs: Value) -> Result<Option<Ordering>, Error> {
    match (lhs, rhs) {
        (Integer(a), Integer(b)) => Ok(Some(a.cmp(&b))),
        (a, b) => Ok(a.real()?.partial_cmp(&b.real()?)),
    }
}

fn equal(lhs: Value, rhs: Value) -> Result<bool, Error> {
    match (lhs, rhs) {
        (Bool(a), Bool(b)) => Ok(a == b),
        (a, b) => Ok(compare(a, b)? == Some(Ordering::Equal)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{assert_float_eq, defexpr, eval::Context};

    fn eval(reg: &Registry, symbol: &str, args: &[Value]) -> Result<Value, Error> {
        reg.lookup(symbol).unwrap().apply(args)
    }

    #[test]
    fn t_all_registered() {
        let mut reg = Registry::standard();
        assert_eq!(reg.symbols().len(), 27);
        for symbol in ["+", "neg", "^", "/", "if", "sin", "max", "and", "<="] {
            assert!(reg.contains(symbol), "{symbol}");
        }
        // Registering the same vocabulary twice is a no-op.
        register_standard(&mut reg);
        assert_eq!(reg.symbols().len(), 27);
    }

    #[test]
    fn t_integer_arithmetic() {
        let reg = Registry::standard();
        assert_eq!(eval(&reg, "+", &[Integer(2), Integer(3)]), Ok(Integer(5)));
        assert_eq!(eval(&reg, "-", &[Integer(2), Integer(3)]), Ok(Integer(-1)));
        assert_eq!(eval(&reg, "*", &[Integer(4), Integer(3)]), Ok(Integer(12)));
        assert_eq!(eval(&reg, "^", &[Integer(2), Integer(10)]), Ok(Integer(1024)));
        assert_eq!(eval(&reg, "^", &[Integer(2), Integer(-1)]), Ok(Real(0.5)));
        assert_eq!(eval(&reg, "/", &[Integer(7), Integer(2)]), Ok(Real(3.5)));
        assert_eq!(eval(&reg, "neg", &[Integer(7)]), Ok(Integer(-7)));
        assert_eq!(eval(&reg, "abs", &[Integer(-7)]), Ok(Integer(7)));
        assert_eq!(
            eval(&reg, "+", &[Integer(i64::MAX), Integer(1)]),
            Err(Error::Overflow)
        );
        assert_eq!(
            eval(&reg, "^", &[Integer(10), Integer(100)]),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn t_huge_exponents() {
        let reg = Registry::standard();
        let huge = 1i64 << 40;
        assert_eq!(eval(&reg, "^", &[Integer(0), Integer(huge)]), Ok(Integer(0)));
        assert_eq!(eval(&reg, "^", &[Integer(1), Integer(huge)]), Ok(Integer(1)));
        assert_eq!(eval(&reg, "^", &[Integer(-1), Integer(huge)]), Ok(Integer(1)));
        assert_eq!(
            eval(&reg, "^", &[Integer(-1), Integer(huge + 1)]),
            Ok(Integer(-1))
        );
        assert_eq!(
            eval(&reg, "^", &[Integer(-1), Integer(i64::MAX)]),
            Ok(Integer(-1))
        );
        assert_eq!(
            eval(&reg, "^", &[Integer(2), Integer(huge)]),
            Err(Error::Overflow)
        );
        assert_eq!(eval(&reg, "^", &[Integer(0), Integer(0)]), Ok(Integer(1)));
    }

    #[test]
    fn t_mixed_arithmetic() {
        let reg = Registry::standard();
        assert_eq!(eval(&reg, "+", &[Integer(2), Real(0.5)]), Ok(Real(2.5)));
        assert_eq!(eval(&reg, "*", &[Real(1.5), Integer(2)]), Ok(Real(3.)));
        assert_eq!(eval(&reg, "min", &[Real(1.5), Integer(2)]), Ok(Real(1.5)));
        assert_eq!(eval(&reg, "max", &[Integer(1), Integer(2)]), Ok(Integer(2)));
        assert_eq!(
            eval(&reg, "+", &[Bool(true), Integer(1)]),
            Err(Error::TypeMismatch {
                expected: "number",
                found: "bool"
            })
        );
    }

    #[test]
    fn t_floored_remainder() {
        let reg = Registry::standard();
        assert_eq!(eval(&reg, "mod", &[Integer(7), Integer(3)]), Ok(Integer(1)));
        assert_eq!(eval(&reg, "mod", &[Integer(-7), Integer(3)]), Ok(Integer(2)));
        assert_eq!(eval(&reg, "mod", &[Integer(7), Integer(-3)]), Ok(Integer(-2)));
        assert_eq!(
            eval(&reg, "mod", &[Integer(7), Integer(0)]),
            Err(Error::DivisionByZero)
        );
        match eval(&reg, "mod", &[Real(-7.5), Integer(2)]) {
            Ok(Real(r)) => assert_float_eq!(r, 0.5),
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[test]
    fn t_comparisons() {
        let reg = Registry::standard();
        let check = |symbol: &str, a: Value, b: Value, expected: bool| {
            assert_eq!(eval(&reg, symbol, &[a, b]), Ok(Bool(expected)), "{symbol}");
        };
        check("<", Integer(1), Integer(2), true);
        check("<", Real(2.), Integer(2), false);
        check("<=", Real(2.), Integer(2), true);
        check(">", Integer(3), Real(2.5), true);
        check(">=", Integer(2), Integer(3), false);
        check("=", Integer(2), Real(2.), true);
        check("=", Bool(true), Bool(true), true);
        check("!=", Integer(2), Integer(3), true);
        check("<", Real(f64::NAN), Integer(0), false);
        check(">=", Real(f64::NAN), Integer(0), false);
        assert!(eval(&reg, "<", &[Bool(true), Integer(1)]).is_err());
    }

    #[test]
    fn t_boolean() {
        let reg = Registry::standard();
        assert_eq!(eval(&reg, "and", &[Bool(true), Bool(false)]), Ok(Bool(false)));
        assert_eq!(eval(&reg, "or", &[Bool(true), Bool(false)]), Ok(Bool(true)));
        assert_eq!(eval(&reg, "not", &[Bool(false)]), Ok(Bool(true)));
        assert_eq!(
            eval(&reg, "not", &[Integer(0)]),
            Err(Error::TypeMismatch {
                expected: "bool",
                found: "integer"
            })
        );
    }

    #[test]
    fn t_functions() {
        let reg = Registry::standard();
        let tree = defexpr!(reg, (+ (^ (sin x) 2) (^ (cos x) 2))).unwrap();
        let mut ctx = Context::new();
        for x in [-2., -0.5, 0., 0.3, 1.7, 3.] {
            ctx.set("x", x);
            assert_float_eq!(tree.eval(&ctx).unwrap().real().unwrap(), 1., 1e-15);
        }
        let tree = defexpr!(reg, (ln (exp x))).unwrap();
        ctx.set("x", 2.5);
        assert_float_eq!(tree.eval(&ctx).unwrap().real().unwrap(), 2.5, 1e-15);
    }

    #[test]
    fn t_piecewise() {
        let reg = Registry::standard();
        let tree = defexpr!(reg, (if (< x 0) (neg x) x)).unwrap();
        let mut ctx = Context::new();
        for x in [-3i64, 0, 4] {
            ctx.set("x", x);
            assert_eq!(tree.eval(&ctx), Ok(Integer(x.abs())));
        }
    }
}
