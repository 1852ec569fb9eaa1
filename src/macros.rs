/// Construct an expression from a lisp-like description, by applying the
/// symbols of the given registry.
///
/// ```
/// use lemma::{defexpr, Registry};
///
/// let reg = Registry::standard();
/// let tree = defexpr!(reg, (* (+ x 1) (sqrt y))).unwrap();
/// assert_eq!(tree.to_latex(), "(x + 1) \\cdot \\sqrt{y}");
/// ```
///
/// The first token of a parenthesized list is the symbol, and the rest are
/// the operands. Identifiers are variables and literals are literal
/// values. Negative literals must be written as `(const -3)`, because `-3` is
/// a sequence of two tokens. Blocks are expected to produce a
/// `Tree`. The result is a `Result<Tree, Error>`, which is an error if a
/// symbol is not registered or is applied to the wrong number of operands.
#[macro_export]
macro_rules! defexpr {
    ($reg:expr, ($($a:tt)*)) => { // Unwrap redundant parens.
        $crate::defexpr!($reg, $($a)*)
    };
    // Constants.
    ($reg:expr, const $tt:expr) => {{
        let out: Result<$crate::Tree, $crate::Error> = Ok($crate::Tree::literal($tt));
        out
    }};
    // Block expressions.
    ($reg:expr, $a:block) => {{
        let out: Result<$crate::Tree, $crate::Error> = Ok($a);
        out
    }};
    // Applications.
    ($reg:expr, $op:tt $($args:tt)+) => {{
        let operands: Result<Vec<$crate::Tree>, $crate::Error> =
            [$($crate::defexpr!($reg, $args)),+].into_iter().collect();
        operands.and_then(|operands| $reg.apply(stringify!($op), operands))
    }};
    // Literals.
    ($reg:expr, $a:literal) => {{
        let out: Result<$crate::Tree, $crate::Error> = Ok($crate::Tree::literal($a));
        out
    }};
    // Variables.
    ($reg:expr, $a:ident) => {{
        let out: Result<$crate::Tree, $crate::Error> = Ok($crate::Tree::variable(stringify!($a)));
        out
    }};
}

/// Assert that the floating point numbers are equal within the given epsilon.
#[macro_export]
macro_rules! assert_float_eq {
    ($a:expr, $b:expr, $eps:expr, $debug:expr) => {{
        // Make variables to avoid evaluating experssions multiple times.
        let a = $a;
        let b = $b;
        let eps = $eps;
        let error = f64::abs(a - b);
        if error > eps {
            eprintln!("{:?}", $debug);
        }
        assert!(
            error <= eps,
            "Assertion failed: |({}) - ({})| = {:e} <= {:e}",
            a,
            b,
            error,
            eps
        );
    }};
    ($a:expr, $b:expr, $eps:expr) => {
        assert_float_eq!($a, $b, $eps, "")
    };
    ($a:expr, $b:expr) => {
        assert_float_eq!($a, $b, f64::EPSILON)
    };
}
