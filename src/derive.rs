//! Standard traits for [`Sum`], derived alternative by alternative.
//!
//! Each trait walks the union following the tag and forwards to the held
//! alternative's own implementation.
//!
//! [`Sum`]: crate::Sum

use core::{
    fmt,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
};

use crate::repr::{Alternatives, Cons, Nil};

pub trait SumClone: Alternatives {
    #[doc(hidden)]
    unsafe fn clone(this: &ManuallyDrop<Self::Repr>, tag: u8) -> ManuallyDrop<Self::Repr>;
}

impl SumClone for () {
    unsafe fn clone(this: &ManuallyDrop<Nil>, _: u8) -> ManuallyDrop<Nil> {
        match this.0 {}
    }
}

impl<Head: Clone, Tail: SumClone> SumClone for (Head, Tail) {
    unsafe fn clone(this: &ManuallyDrop<Self::Repr>, tag: u8) -> ManuallyDrop<Self::Repr> {
        ManuallyDrop::new(match tag.checked_sub(1) {
            None => Cons {
                data: unsafe { this.data.clone() },
            },
            Some(tag) => Cons {
                next: unsafe { Tail::clone(&this.next, tag) },
            },
        })
    }
}

pub trait SumDebug: Alternatives {
    #[doc(hidden)]
    unsafe fn fmt(this: &Self::Repr, tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl SumDebug for () {
    unsafe fn fmt(this: &Nil, _: u8, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match this.0 {}
    }
}

impl<Head: fmt::Debug, Tail: SumDebug> SumDebug for (Head, Tail) {
    unsafe fn fmt(this: &Self::Repr, tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match tag.checked_sub(1) {
            None => fmt::Debug::fmt(unsafe { &*this.data }, f),
            Some(tag) => unsafe { Tail::fmt(&this.next, tag, f) },
        }
    }
}

pub trait SumPartialEq: Alternatives {
    #[doc(hidden)]
    unsafe fn eq(this: &Self::Repr, other: &Self::Repr, tag: u8) -> bool;
}

impl SumPartialEq for () {
    unsafe fn eq(this: &Nil, _: &Nil, _: u8) -> bool {
        match this.0 {}
    }
}

impl<Head: PartialEq, Tail: SumPartialEq> SumPartialEq for (Head, Tail) {
    unsafe fn eq(this: &Self::Repr, other: &Self::Repr, tag: u8) -> bool {
        match tag.checked_sub(1) {
            None => unsafe { *this.data == *other.data },
            Some(tag) => unsafe { Tail::eq(&this.next, &other.next, tag) },
        }
    }
}

pub trait SumHash: Alternatives {
    #[doc(hidden)]
    unsafe fn hash<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H);
}

impl SumHash for () {
    unsafe fn hash<H: Hasher>(this: &Nil, _: u8, _: &mut H) {
        match this.0 {}
    }
}

impl<Head: Hash, Tail: SumHash> SumHash for (Head, Tail) {
    unsafe fn hash<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H) {
        match tag.checked_sub(1) {
            None => unsafe { (*this.data).hash(state) },
            Some(tag) => unsafe { Tail::hash(&this.next, tag, state) },
        }
    }
}
