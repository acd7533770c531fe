//! The underlying representation of the [`Sum`] type and the type-level
//! queries over its list of alternatives.
//!
//! # Implementation details
//!
//! A sum type is a hand-written tagged union. Its memory layout resembles:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::ManuallyDrop;
//!
//! struct Nil(Infallible);
//! #[repr(C)]
//! union Cons<T, Next> {
//!     data: ManuallyDrop<T>,
//!     next: ManuallyDrop<Next>,
//! }
//!
//! // For example only. Not actually defined.
//! struct RawSum2<T1, T2> {
//!     tag: u8,
//!     data: Cons<T1, Cons<T2, Nil>>,
//! }
//! ```
//!
//! Every alternative lives at offset zero of the union, so a value can be
//! reinterpreted as a sum over any superset or subset of alternatives that
//! contains it, as long as the tag is remapped.
//!
//! [`Sum`]: crate::Sum

use core::{convert::Infallible, mem::ManuallyDrop, ptr};

use crate::{
    matcher::Vacant,
    position::{Position, UInt, UTerm},
};

/// The terminator type of the underlying union of the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
pub struct Nil(pub(crate) Infallible);

/// The accumulator type of the underlying union of the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
#[repr(C)]
pub union Cons<T, U> {
    pub(crate) data: ManuallyDrop<T>,
    pub(crate) next: ManuallyDrop<U>,
}

/// A closed list of alternatives, written `T![A, B, ...]`.
///
/// Implemented for `()` and `(Head, Tail)` where `Tail` is itself a list.
pub trait Alternatives {
    /// The underlying union of the `Sum` type.
    type Repr;

    /// The number of alternatives.
    type Len: Position;

    /// The handler table of a fresh match: one vacant slot per alternative.
    type Table;

    #[doc(hidden)]
    fn table() -> Self::Table;

    #[doc(hidden)]
    unsafe fn drop(this: &mut ManuallyDrop<Self::Repr>, tag: u8);
}

impl Alternatives for () {
    type Repr = Nil;
    type Len = UTerm;
    type Table = ();

    fn table() {}

    unsafe fn drop(_: &mut ManuallyDrop<Nil>, _: u8) {}
}

impl<Head, Tail> Alternatives for (Head, Tail)
where
    Tail: Alternatives,
{
    type Repr = Cons<Head, Tail::Repr>;
    type Len = UInt<Tail::Len>;
    type Table = (Vacant<Head>, Tail::Table);

    fn table() -> Self::Table {
        (Vacant::new(), Tail::table())
    }

    unsafe fn drop(this: &mut ManuallyDrop<Self::Repr>, tag: u8) {
        match tag.checked_sub(1) {
            None => unsafe { ManuallyDrop::drop(&mut this.data) },
            Some(tag) => unsafe { Tail::drop(&mut this.next, tag) },
        }
    }
}

/// Membership of `T` in a list of alternatives, at position `P`.
///
/// `P` is inferred; with distinct alternatives exactly one position fits.
/// `P::INDEX` is the zero-based position of `T`.
///
/// # Examples
///
/// ```rust
/// use switcheroo::{T, position_of};
///
/// struct Red;
/// struct Green;
///
/// assert_eq!(position_of::<T![Red, Green], Green, _>(), 1);
/// ```
///
/// Asking for a type outside the list does not compile:
///
/// ```rust,compile_fail,E0277
/// use switcheroo::{T, position_of};
///
/// struct Red;
/// struct Green;
/// struct Purple;
///
/// let _ = position_of::<T![Red, Green], Purple, _>();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{T}` is not an alternative of this sum type",
    label = "unknown alternative `{T}`",
    note = "only the types listed in the sum type can be matched"
)]
pub trait Contains<T, P: Position>: Alternatives {
    #[doc(hidden)]
    fn from_data(data: T) -> Self::Repr;

    #[doc(hidden)]
    unsafe fn into_data_unchecked(this: Self::Repr) -> T;

    #[doc(hidden)]
    fn as_ptr(this: &Self::Repr) -> *const T;

    #[doc(hidden)]
    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T;
}

impl<Head, Tail> Contains<Head, UTerm> for (Head, Tail)
where
    Tail: Alternatives,
{
    fn from_data(data: Head) -> Self::Repr {
        Cons { data: ManuallyDrop::new(data) }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> Head {
        unsafe { ManuallyDrop::into_inner(this.data) }
    }

    fn as_ptr(this: &Self::Repr) -> *const Head {
        ptr::addr_of!(this.data).cast::<Head>()
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut Head {
        ptr::addr_of_mut!(this.data).cast::<Head>()
    }
}

impl<Head, Tail, T, P: Position> Contains<T, UInt<P>> for (Head, Tail)
where
    Tail: Contains<T, P>,
{
    fn from_data(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_data(data)),
        }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> T {
        unsafe { Tail::into_data_unchecked(ManuallyDrop::into_inner(this.next)) }
    }

    fn as_ptr(this: &Self::Repr) -> *const T {
        Tail::as_ptr(unsafe { &this.next })
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T {
        Tail::as_mut_ptr(unsafe { &mut this.next })
    }
}

/// The zero-based position of `T` in the list `S`.
pub const fn position_of<S, T, P>() -> u8
where
    S: Contains<T, P>,
    P: Position,
{
    P::INDEX
}

/// A sub-list `G` of the list `Self`, where `Ps` lists the absolute position
/// of every member of `G` in `Self`.
#[diagnostic::on_unimplemented(
    message = "`{G}` is not a group of alternatives of this sum type",
    note = "every member of a group must be listed in the sum type"
)]
pub trait Subset<G, Ps>: Alternatives {
    #[doc(hidden)]
    fn narrow_tag(tag: u8) -> Option<u8>;

    #[doc(hidden)]
    fn broaden_tag(tag: u8) -> u8;
}

impl<S: Alternatives> Subset<(), ()> for S {
    fn narrow_tag(_: u8) -> Option<u8> {
        None
    }

    fn broaden_tag(tag: u8) -> u8 {
        unreachable!("mapping tag {tag} from an empty set")
    }
}

impl<S, GHead, GTail, PHead, PTail> Subset<(GHead, GTail), (PHead, PTail)> for S
where
    S: Contains<GHead, PHead> + Subset<GTail, PTail>,
    PHead: Position,
{
    fn narrow_tag(tag: u8) -> Option<u8> {
        if tag == PHead::INDEX {
            Some(0)
        } else {
            <S as Subset<GTail, PTail>>::narrow_tag(tag).map(|tag| tag + 1)
        }
    }

    fn broaden_tag(tag: u8) -> u8 {
        match tag.checked_sub(1) {
            None => PHead::INDEX,
            Some(tag) => <S as Subset<GTail, PTail>>::broaden_tag(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::T;

    struct Empty;
    struct Red;
    struct Green;
    struct Blue;

    type Color = T![Empty, Red, Green, Blue];

    #[test]
    fn positions() {
        assert_eq!(position_of::<Color, Empty, _>(), 0);
        assert_eq!(position_of::<Color, Red, _>(), 1);
        assert_eq!(position_of::<Color, Green, _>(), 2);
        assert_eq!(position_of::<Color, Blue, _>(), 3);
        assert_eq!(<<Color as Alternatives>::Len as Position>::INDEX, 4);
    }

    #[test]
    fn subset_tags() {
        type Warm = T![Green, Red];

        assert_eq!(<Color as Subset<Warm, _>>::narrow_tag(2), Some(0));
        assert_eq!(<Color as Subset<Warm, _>>::narrow_tag(1), Some(1));
        assert_eq!(<Color as Subset<Warm, _>>::narrow_tag(0), None);
        assert_eq!(<Color as Subset<Warm, _>>::narrow_tag(3), None);

        assert_eq!(<Color as Subset<Warm, _>>::broaden_tag(0), 2);
        assert_eq!(<Color as Subset<Warm, _>>::broaden_tag(1), 1);
    }
}
