//! Exhaustive, type-checked matching on anonymous sum types.
//!
//! A [`struct@Sum`] holds exactly one value out of a closed list of
//! alternative types, written `Sum![A, B, C]`. A [`Matcher`] matches on it by
//! alternative type: each [`when`](Matcher::when) binds a handler to one
//! alternative, [`when_any`](Matcher::when_any) binds one to a group,
//! [`otherwise`](Matcher::otherwise) covers the rest, and
//! [`run`](Matcher::run) calls the handler of the alternative the value
//! holds.
//!
//! Every rule is checked while the program compiles: an unknown alternative,
//! an alternative matched twice, a missing alternative, a fallback with
//! nothing left to cover, a second fallback and handlers that disagree on
//! their result type are all compile errors.
//!
//! ```rust
//! use switcheroo::{Sum, T, match_on};
//!
//! struct Empty;
//! struct Red;
//! struct Green;
//! struct Blue;
//!
//! type Color = Sum![Empty, Red, Green, Blue];
//!
//! let classify = |color: Color| {
//!     match_on(color)
//!         .when_any::<T![Green, Red], _, _>(|| 0)
//!         .when::<Blue, _, _>(|| 1)
//!         .when::<Empty, _, _>(|| 2)
//!         .run()
//! };
//!
//! assert_eq!(classify(Sum::new(Green)), 0);
//! assert_eq!(classify(Sum::new(Blue)), 1);
//! assert_eq!(classify(Sum::new(Empty)), 2);
//! ```
//!
//! The [`switch!`] macro writes the same chain with `match`-like arms:
//!
//! ```rust
//! use switcheroo::{Sum, switch};
//!
//! struct Empty;
//! struct Red(u8);
//! struct Green(u8);
//! struct Blue(u8);
//!
//! let color: Sum![Empty, Red, Green, Blue] = Sum::new(Blue(42));
//! let value = switch!(color {
//!     Blue(b) => b,
//!     Green | Red => 1,
//!     _ => 0,
//! });
//! assert_eq!(value, 42);
//! ```
//!
//! Arms match by type only, so guards and value patterns are rejected:
//!
//! ```rust,compile_fail
//! use switcheroo::{Sum, switch};
//!
//! struct Red(u8);
//! struct Green(u8);
//!
//! let color: Sum![Red, Green] = Sum::new(Red(1));
//! let value = switch!(color {
//!     Red(r) if r > 0 => r,
//!     _ => 0,
//! });
//! ```
//!
//! A bare name starting with an uppercase letter always names an
//! alternative, so an arm cannot quietly turn into a fallback binding and a
//! missed alternative still fails to compile:
//!
//! ```rust,compile_fail,E0277
//! use switcheroo::{Sum, switch};
//!
//! struct Empty;
//! struct RGB;
//! struct Gray;
//!
//! let shade: Sum![Empty, RGB, Gray] = Sum::new(Gray);
//! let name = switch!(shade {
//!     Empty => "empty",
//!     RGB => "rgb",
//! });
//! ```
//!
//! # Features
//!
//! - `tracing`: emit `trace` events when a fallback is bound and when a match
//!   dispatches.
#![no_std]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]

#[cfg(test)]
extern crate std;

use core::{
    fmt,
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
};

pub mod derive;
pub mod handler;
mod macros;
pub mod matcher;
pub mod position;
pub mod repr;

pub use self::{
    handler::{Handler, Ignores, Takes},
    matcher::{Matcher, match_on},
    repr::{Alternatives, Contains, Subset, position_of},
};
pub use switcheroo_macros::switch;

use self::position::{Position, UTerm};

pub(crate) type Repr<S> = <S as repr::Alternatives>::Repr;

/// A value of exactly one of the alternatives in the list `S`.
///
/// `S` is a type list `(A, (B, (C, ())))`, usually written with the
/// [`Sum!`](macro@Sum) macro.
pub struct Sum<S: repr::Alternatives> {
    tag: u8,
    data: ManuallyDrop<Repr<S>>,
}

impl<T> From<T> for Sum![T] {
    /// Construct a `Sum` of one type from a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use switcheroo::Sum;
    ///
    /// let s: Sum![i32] = 42.into();
    /// assert_eq!(*s, 42);
    /// ```
    fn from(value: T) -> Self {
        Sum::new(value)
    }
}

impl<T> Deref for Sum![T] {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { &*<(T, ()) as repr::Contains<T, UTerm>>::as_ptr(&self.data) }
    }
}

impl<T> DerefMut for Sum![T] {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *<(T, ()) as repr::Contains<T, UTerm>>::as_mut_ptr(&mut self.data) }
    }
}

impl<T> Sum![T] {
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        unsafe {
            <(T, ()) as repr::Contains<T, UTerm>>::into_data_unchecked(ManuallyDrop::take(
                &mut this.data,
            ))
        }
    }
}

impl Sum![] {
    pub fn unreachable(self) -> ! {
        match self.data.0 {}
    }
}

impl<S: repr::Alternatives> Sum<S> {
    /// Wraps `value` as the alternative `T`; its position `P` is inferred.
    pub fn new<T, P>(value: T) -> Self
    where
        S: repr::Contains<T, P>,
        P: Position,
    {
        Sum {
            tag: P::INDEX,
            data: ManuallyDrop::new(S::from_data(value)),
        }
    }

    /// The position of the alternative this value holds.
    pub fn position(&self) -> u8 {
        self.tag
    }

    /// The position of the alternative `T` in this sum type.
    ///
    /// ```rust
    /// use switcheroo::Sum;
    ///
    /// type Number = Sum![u8, u16, u32];
    /// assert_eq!(Number::position_of::<u32, _>(), 2);
    /// ```
    pub fn position_of<T, P>() -> u8
    where
        S: repr::Contains<T, P>,
        P: Position,
    {
        P::INDEX
    }

    /// Whether this value holds the alternative `T`.
    pub fn is<T, P>(&self) -> bool
    where
        S: repr::Contains<T, P>,
        P: Position,
    {
        self.tag == P::INDEX
    }

    pub fn get<T, P>(&self) -> Option<&T>
    where
        S: repr::Contains<T, P>,
        P: Position,
    {
        self.is::<T, P>().then(|| unsafe { &*S::as_ptr(&self.data) })
    }

    pub fn get_mut<T, P>(&mut self) -> Option<&mut T>
    where
        S: repr::Contains<T, P>,
        P: Position,
    {
        self.is::<T, P>().then(|| unsafe { &mut *S::as_mut_ptr(&mut self.data) })
    }

    /// Moves the alternative `T` out, or gives the value back if it holds
    /// another alternative.
    pub fn take<T, P>(self) -> Result<T, Self>
    where
        S: repr::Contains<T, P>,
        P: Position,
    {
        if !self.is::<T, P>() {
            return Err(self);
        }
        let mut this = ManuallyDrop::new(self);
        Ok(unsafe { S::into_data_unchecked(ManuallyDrop::take(&mut this.data)) })
    }

    /// Reinterprets the value as a sum over the group `G`, or gives it back
    /// if it holds an alternative outside the group.
    ///
    /// ```rust
    /// use switcheroo::{Sum, T};
    ///
    /// let n: Sum![u8, u16, u32] = Sum::new(7u32);
    /// let wide: Sum![u32, u16] = n.narrow::<T![u32, u16], _>().ok().unwrap();
    /// assert_eq!(wide.get::<u32, _>(), Some(&7));
    /// ```
    pub fn narrow<G, Ps>(self) -> Result<Sum<G>, Self>
    where
        S: repr::Subset<G, Ps>,
        G: repr::Alternatives,
    {
        match S::narrow_tag(self.tag) {
            None => Err(self),
            Some(tag) => {
                let this = ManuallyDrop::new(self);
                let data = unsafe { mem::transmute_copy(&this.data) };
                Ok(Sum { tag, data })
            }
        }
    }

    /// Starts a match on this value.
    pub fn matcher<R>(self) -> Matcher<S, S::Table, matcher::NoFallback, R> {
        Matcher::new(self)
    }
}

impl<S: derive::SumDebug> fmt::Debug for Sum<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        unsafe { S::fmt(&self.data, self.tag, f) }
    }
}

impl<S: repr::Alternatives> Drop for Sum<S> {
    fn drop(&mut self) {
        unsafe { S::drop(&mut self.data, self.tag) }
    }
}

impl<S: derive::SumClone> Clone for Sum<S> {
    fn clone(&self) -> Self {
        Sum {
            tag: self.tag,
            data: unsafe { S::clone(&self.data, self.tag) },
        }
    }
}

impl<S: derive::SumPartialEq> PartialEq for Sum<S> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && unsafe { S::eq(&self.data, &other.data, self.tag) }
    }
}

impl<S: derive::SumPartialEq + Eq> Eq for Sum<S> {}

impl<S: derive::SumHash> Hash for Sum<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        unsafe { S::hash(&self.data, self.tag, state) }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        rc::Rc,
        string::{String, ToString},
    };

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn basic() {
        type Number = Sum![u32, String, i64];

        let mut sum: Number = Sum::new(12345u32);
        assert_eq!(sum.position(), 0);
        assert_eq!(sum.get::<u32, _>(), Some(&12345));
        assert_eq!(sum.get::<String, _>(), None);

        sum = Sum::new("Hello World!".to_string());
        assert!(sum.is::<String, _>());
        if let Some(s) = sum.get_mut::<String, _>() {
            s.push('!');
        }
        assert_eq!(sum.clone(), Sum::new("Hello World!!".to_string()));

        let sum = sum.take::<u32, _>().unwrap_err();
        assert_eq!(sum.take::<String, _>().ok().as_deref(), Some("Hello World!!"));
    }

    #[test]
    fn narrow_keeps_the_value() {
        type Number = Sum![u8, String, i64];

        let sum: Number = Sum::new("narrow".to_string());
        let sum: Sum![i64, String] = sum.narrow::<T![i64, String], _>().ok().unwrap();
        assert_eq!(sum.position(), 1);
        assert_eq!(sum.get::<String, _>().map(String::as_str), Some("narrow"));

        let sum: Number = Sum::new(3u8);
        assert!(sum.narrow::<T![i64, String], _>().is_err());
    }

    #[test]
    fn drops_exactly_once() {
        let counter = Rc::new(());
        let sum: Sum![u8, Rc<()>] = Sum::new(counter.clone());
        assert_eq!(Rc::strong_count(&counter), 2);

        let copy = sum.clone();
        assert_eq!(Rc::strong_count(&counter), 3);

        drop(sum);
        let inner = copy.take::<Rc<()>, _>().ok().unwrap();
        assert_eq!(Rc::strong_count(&counter), 2);
        drop(inner);
        assert_eq!(Rc::strong_count(&counter), 1);
    }

    #[test]
    fn single_alternative() {
        let mut sum: Sum![String] = "one".to_string().into();
        sum.push_str(" alternative");
        assert_eq!(&*sum, "one alternative");
        assert_eq!(sum.into_inner(), "one alternative");
    }

    #[test]
    fn debug_and_hash() {
        use std::collections::hash_map::DefaultHasher;

        let a: Sum![u8, char] = Sum::new('x');
        assert_eq!(std::format!("{a:?}"), "'x'");

        let hash = |s: &Sum![u8, char]| {
            let mut hasher = DefaultHasher::new();
            s.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&Sum::new('x')));
    }
}
