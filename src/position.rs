//! Type-level positions of alternatives within a type list.
//!
//! Positions are unary naturals: [`UTerm`] is the first alternative and
//! `UInt<P>` is the one right after `P`. They only ever appear as inferred
//! type parameters, so callers rarely name them beyond `_`.

use core::marker::PhantomData;

/// The position of the head of a type list.
pub struct UTerm;

/// The position right after `P`.
pub struct UInt<P>(PhantomData<P>);

/// A type-level position with its runtime value.
pub trait Position {
    /// The zero-based index, which is also the tag stored in a [`Sum`].
    ///
    /// [`Sum`]: crate::Sum
    const INDEX: u8;
}

impl Position for UTerm {
    const INDEX: u8 = 0;
}

impl<P: Position> Position for UInt<P> {
    const INDEX: u8 = 1 + P::INDEX;
}

/// Positions that are not [`UTerm`], i.e. counts of at least one.
#[diagnostic::on_unimplemented(
    message = "expected at least one alternative, found none",
    label = "this list of alternatives is empty"
)]
pub trait NonZero: Position {}

impl<P: Position> NonZero for UInt<P> {}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
pub type U6 = UInt<U5>;
pub type U7 = UInt<U6>;
pub type U8 = UInt<U7>;
pub type U9 = UInt<U8>;
pub type U10 = UInt<U9>;
pub type U11 = UInt<U10>;
pub type U12 = UInt<U11>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn indices() {
        assert_eq!(U0::INDEX, 0);
        assert_eq!(U3::INDEX, 3);
        assert_eq!(U12::INDEX, 12);
    }
}
