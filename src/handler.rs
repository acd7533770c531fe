//! Handlers: the closures invoked for a matched alternative.
//!
//! A handler either takes the matched value or takes nothing at all. Both
//! shapes go through [`Handler::call`], so the dispatcher invokes every slot
//! the same way. The shape is picked by a marker type ([`Takes`] or
//! [`Ignores`]) that is always inferred.

/// A callable that handles a value of type `A`.
///
/// `M` is [`Takes`] for `FnOnce(A) -> R` closures and [`Ignores`] for
/// `FnOnce() -> R` closures, which drop the value they are given.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle `{A}`",
    label = "expected a closure taking `{A}`, or taking no arguments",
    note = "annotate the closure parameter with its type, e.g. `|value: {A}| ...`"
)]
pub trait Handler<A, M> {
    type Output;

    fn call(self, value: A) -> Self::Output;
}

/// Marks handlers that receive the matched value.
pub enum Takes {}

/// Marks handlers that take no arguments.
pub enum Ignores {}

impl<F, A, R> Handler<A, Takes> for F
where
    F: FnOnce(A) -> R,
{
    type Output = R;

    fn call(self, value: A) -> R {
        self(value)
    }
}

impl<F, A, R> Handler<A, Ignores> for F
where
    F: FnOnce() -> R,
{
    type Output = R;

    fn call(self, _: A) -> R {
        self()
    }
}

/// The result type agreement between a handler and its match.
///
/// Only implemented for `R` itself, so the first handler of a match fixes
/// the result type and every later handler must return the same.
///
/// ```rust,compile_fail,E0277
/// use switcheroo::{Sum, match_on};
///
/// struct Red;
/// struct Green;
///
/// let color: Sum![Red, Green] = Sum::new(Red);
/// let _ = match_on(color)
///     .when::<Red, _, _>(|| 0)
///     .when::<Green, _, _>(|| "green")
///     .run();
/// ```
#[diagnostic::on_unimplemented(
    message = "handler returns `{Self}`, but this match produces `{R}`",
    label = "expected `{R}`",
    note = "all handlers of one match must return the same type"
)]
pub trait Yields<R> {
    fn yielded(self) -> R;
}

impl<R> Yields<R> for R {
    #[inline]
    fn yielded(self) -> R {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::string::{String, ToString};

    use pretty_assertions::assert_eq;

    use super::*;

    fn handle<A, M, F: Handler<A, M>>(f: F, value: A) -> F::Output {
        f.call(value)
    }

    #[test]
    fn both_shapes() {
        let len = handle(|s: String| s.len(), "green".to_string());
        let fixed = handle(|| 5usize, "green".to_string());
        assert_eq!(len, fixed);
    }
}
