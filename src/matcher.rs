//! Exhaustive matching on a [`Sum`], one alternative at a time.
//!
//! A [`Matcher`] holds the value to match and a handler table with one slot
//! per alternative. Every slot starts [`Vacant`]. [`Matcher::when`] and
//! [`Matcher::when_any`] bind vacant slots to handlers, [`Matcher::otherwise`]
//! binds every slot still vacant to a fallback, and [`Matcher::run`] calls the
//! handler in the slot of the alternative the value holds.
//!
//! The table lives in the matcher's type, so every rule is a trait bound:
//!
//! - matching a type that is not an alternative does not compile;
//! - matching an alternative twice does not compile, also when the fallback
//!   already covers it;
//! - `run` on a table with a vacant slot does not compile;
//! - `otherwise` with no vacant slot left does not compile at `run`;
//! - `otherwise` twice does not compile;
//! - handlers returning different types do not compile.
//!
//! # Examples
//!
//! ```rust
//! use switcheroo::{Sum, match_on};
//!
//! struct Empty;
//! struct Red(String);
//! struct Green(String);
//! struct Blue(String);
//!
//! type Color = Sum![Empty, Red, Green, Blue];
//!
//! let color: Color = Sum::new(Green("green".into()));
//! let name = match_on(color)
//!     .when::<Red, _, _>(|r: Red| r.0)
//!     .when::<Green, _, _>(|g: Green| g.0)
//!     .when::<Blue, _, _>(|b: Blue| b.0)
//!     .when::<Empty, _, _>(|| "no color".to_string())
//!     .run();
//! assert_eq!(name, "green");
//!
//! let color: Color = Sum::new(Empty);
//! let code = match_on(color)
//!     .when::<Red, _, _>(|| 0)
//!     .otherwise(|| -1)
//!     .run();
//! assert_eq!(code, -1);
//! ```
//!
//! A match that leaves an alternative out does not compile:
//!
//! ```rust,compile_fail,E0277
//! use switcheroo::{Sum, match_on};
//!
//! struct Empty;
//! struct Red;
//! struct Green;
//! struct Blue;
//!
//! let color: Sum![Empty, Red, Green, Blue] = Sum::new(Green);
//! let _ = match_on(color)
//!     .when::<Red, _, _>(|| 0)
//!     .when::<Green, _, _>(|| 1)
//!     .when::<Blue, _, _>(|| 2)
//!     .run();
//! ```
//!
//! Neither does a fallback with nothing left to cover:
//!
//! ```rust,compile_fail,E0277
//! use switcheroo::{Sum, match_on};
//!
//! struct Empty;
//! struct Red;
//! struct Green;
//! struct Blue;
//!
//! let color: Sum![Empty, Red, Green, Blue] = Sum::new(Green);
//! let _ = match_on(color)
//!     .when::<Red, _, _>(|| 0)
//!     .when::<Green, _, _>(|| 1)
//!     .when::<Blue, _, _>(|| 2)
//!     .when::<Empty, _, _>(|| 3)
//!     .otherwise(|| -1)
//!     .run();
//! ```
//!
//! [`Sum`]: crate::Sum

use core::{fmt, marker::PhantomData};

use crate::{
    Sum,
    derive::{SumClone, SumDebug},
    handler::{Handler, Takes, Yields},
    position::{NonZero, Position, UInt, UTerm},
    repr::{Alternatives, Contains, Subset},
};

/// Starts a match on `value`.
pub fn match_on<S: Alternatives, R>(value: Sum<S>) -> Matcher<S, S::Table, NoFallback, R> {
    Matcher::new(value)
}

/// A match under construction.
///
/// `Slots` is the handler table, `D` records whether a fallback was
/// supplied, and `R` is the result type shared by every handler.
#[must_use = "a matcher does nothing until `run` is called"]
pub struct Matcher<S: Alternatives, Slots, D, R> {
    value: Sum<S>,
    slots: Slots,
    fallback: D,
    _result: PhantomData<fn() -> R>,
}

impl<S: Alternatives, R> Matcher<S, S::Table, NoFallback, R> {
    pub fn new(value: Sum<S>) -> Self {
        Matcher {
            value,
            slots: S::table(),
            fallback: NoFallback,
            _result: PhantomData,
        }
    }
}

impl<S: Alternatives, Slots, D, R> Matcher<S, Slots, D, R> {
    /// Handles the alternative `T` with `handler`.
    ///
    /// `handler` is either `FnOnce(T) -> R` or `FnOnce() -> R`. The two
    /// trailing type arguments are inferred.
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
    ///     .when::<Red, _, _>(|| 1)
    ///     .when::<Green, _, _>(|| 2)
    ///     .run();
    /// ```
    ///
    /// ```rust,compile_fail,E0277
    /// use switcheroo::{Sum, match_on};
    ///
    /// struct Red;
    /// struct Green;
    /// struct Purple;
    ///
    /// let color: Sum![Red, Green] = Sum::new(Red);
    /// let _ = match_on(color)
    ///     .when::<Purple, _, _>(|| 0)
    ///     .otherwise(|| 1)
    ///     .run();
    /// ```
    pub fn when<T, I, F>(
        self,
        handler: F,
    ) -> Matcher<S, <Slots as Assign<S, R, T, I, F>>::Output, D, R>
    where
        Slots: Assign<S, R, T, I, F>,
    {
        let Matcher { value, slots, fallback, .. } = self;
        Matcher {
            value,
            slots: slots.assign(handler),
            fallback,
            _result: PhantomData,
        }
    }

    /// Handles every alternative of the group `G` (written `T![A, B, ...]`)
    /// with copies of `handler`.
    ///
    /// `handler` is either `FnOnce(Sum<G>) -> R`, receiving the value
    /// narrowed to the group, or `FnOnce() -> R`.
    ///
    /// ```rust,compile_fail,E0277
    /// use switcheroo::{Sum, T, match_on};
    ///
    /// struct Red;
    /// struct Green;
    ///
    /// let color: Sum![Red, Green] = Sum::new(Red);
    /// let _ = match_on(color)
    ///     .when_any::<T![], _, _>(|| 0)
    ///     .otherwise(|| 1)
    ///     .run();
    /// ```
    pub fn when_any<G, I, F>(
        self,
        handler: F,
    ) -> Matcher<S, <Slots as AssignGroup<S, R, G, I, F>>::Output, D, R>
    where
        Slots: AssignGroup<S, R, G, I, F>,
    {
        let Matcher { value, slots, fallback, .. } = self;
        Matcher {
            value,
            slots: slots.assign_group(handler),
            fallback,
            _result: PhantomData,
        }
    }

    /// Handles every alternative not matched so far with `handler`.
    ///
    /// `handler` is either `FnOnce(Sum<S>) -> R`, receiving the whole value,
    /// or `FnOnce() -> R`.
    ///
    /// ```rust,compile_fail,E0277
    /// use switcheroo::{Sum, match_on};
    ///
    /// struct Red;
    /// struct Green;
    /// struct Blue;
    ///
    /// let color: Sum![Red, Green, Blue] = Sum::new(Red);
    /// let _ = match_on(color)
    ///     .when::<Red, _, _>(|| 0)
    ///     .otherwise(|| 1)
    ///     .otherwise(|| 2)
    ///     .run();
    /// ```
    ///
    /// Every alternative left over belongs to the fallback, so none of them
    /// can be matched afterwards:
    ///
    /// ```rust,compile_fail
    /// use switcheroo::{Sum, match_on};
    ///
    /// struct Red;
    /// struct Green;
    /// struct Blue;
    ///
    /// let color: Sum![Red, Green, Blue] = Sum::new(Red);
    /// let _ = match_on(color)
    ///     .when::<Green, _, _>(|| 0)
    ///     .otherwise(|| 1)
    ///     .when::<Red, _, _>(|| 2)
    ///     .run();
    /// ```
    pub fn otherwise<M, F>(
        self,
        handler: F,
    ) -> Matcher<S, Slots::Resolved, Fallback<F, M, Slots::Missing>, R>
    where
        D: Pending,
        Slots: Resolve,
        F: Handler<Sum<S>, M>,
        F::Output: Yields<R>,
    {
        #[cfg(feature = "tracing")]
        {
            let missing = <Slots::Missing as Position>::INDEX;
            tracing::trace!(missing, "fallback bound to unmatched alternatives");
        }

        let Matcher { value, slots, .. } = self;
        Matcher {
            value,
            slots: slots.resolve(),
            fallback: Fallback {
                handler,
                _marker: PhantomData,
            },
            _result: PhantomData,
        }
    }

    /// Handles every alternative not matched so far with `handler`, which
    /// receives the whole value.
    ///
    /// The same as [`otherwise`](Matcher::otherwise), but the closure's
    /// parameter type is known from this signature, so it needs no
    /// annotation.
    ///
    /// ```rust
    /// use switcheroo::{Sum, match_on};
    ///
    /// struct Red;
    /// struct Green;
    ///
    /// let color: Sum![Red, Green] = Sum::new(Green);
    /// let position = match_on(color)
    ///     .when::<Red, _, _>(|| 9)
    ///     .otherwise_with(|other| other.position())
    ///     .run();
    /// assert_eq!(position, 1);
    /// ```
    pub fn otherwise_with<F>(
        self,
        handler: F,
    ) -> Matcher<S, Slots::Resolved, Fallback<F, Takes, Slots::Missing>, R>
    where
        D: Pending,
        Slots: Resolve,
        F: FnOnce(Sum<S>) -> R,
    {
        self.otherwise::<Takes, F>(handler)
    }

    /// Calls the handler bound to the alternative the value holds.
    pub fn run(self) -> R
    where
        Slots: Dispatch<S, D, R>,
        D: Justified,
    {
        let position = self.value.position();

        #[cfg(feature = "tracing")]
        tracing::trace!(position, "dispatching match");

        self.slots.dispatch(position, self.value, self.fallback)
    }

    /// The position of the alternative the value holds.
    pub fn position(&self) -> u8 {
        self.value.position()
    }

    /// A bit mask of the positions bound to a handler so far, bit `i` set for
    /// position `i`. Positions from 128 on are not represented.
    pub fn covered_positions(&self) -> u128
    where
        Slots: Resolve,
    {
        Slots::COVERED
    }

    /// A bit mask of the positions still vacant.
    pub fn missing_positions(&self) -> u128
    where
        Slots: Resolve,
    {
        positions_below(<S::Len as Position>::INDEX) & !Slots::COVERED
    }
}

/// The mask of positions `0..len`, saturating at 128 positions.
fn positions_below(len: u8) -> u128 {
    u128::MAX
        .checked_shr(128u32.saturating_sub(u32::from(len)))
        .unwrap_or(0)
}

impl<S, Slots, D, R> Clone for Matcher<S, Slots, D, R>
where
    S: SumClone,
    Slots: Clone,
    D: Clone,
{
    fn clone(&self) -> Self {
        Matcher {
            value: self.value.clone(),
            slots: self.slots.clone(),
            fallback: self.fallback.clone(),
            _result: PhantomData,
        }
    }
}

impl<S, Slots, D, R> fmt::Debug for Matcher<S, Slots, D, R>
where
    S: SumDebug,
    Slots: Resolve,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("value", &self.value)
            .field("covered", &format_args!("{:#b}", Slots::COVERED))
            .finish_non_exhaustive()
    }
}

/// A slot no handler is bound to yet.
pub struct Vacant<A>(PhantomData<fn() -> A>);

impl<A> Vacant<A> {
    pub(crate) fn new() -> Self {
        Vacant(PhantomData)
    }
}

impl<A> Clone for Vacant<A> {
    fn clone(&self) -> Self {
        Vacant::new()
    }
}

/// A slot bound by [`Matcher::when`].
pub struct Bound<F, T, P, M> {
    handler: F,
    _marker: PhantomData<fn() -> (T, P, M)>,
}

impl<F: Clone, T, P, M> Clone for Bound<F, T, P, M> {
    fn clone(&self) -> Self {
        Bound {
            handler: self.handler.clone(),
            _marker: PhantomData,
        }
    }
}

/// A slot bound by [`Matcher::when_any`] to a copy of the group's handler.
pub struct Grouped<F, G, Ps, M> {
    handler: F,
    _marker: PhantomData<fn() -> (G, Ps, M)>,
}

impl<F: Clone, G, Ps, M> Clone for Grouped<F, G, Ps, M> {
    fn clone(&self) -> Self {
        Grouped {
            handler: self.handler.clone(),
            _marker: PhantomData,
        }
    }
}

/// A slot covered by [`Matcher::otherwise`].
pub struct Otherwise<A>(PhantomData<fn() -> A>);

impl<A> Clone for Otherwise<A> {
    fn clone(&self) -> Self {
        Otherwise(PhantomData)
    }
}

/// No fallback was supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

/// The fallback handler, covering `N` positions.
pub struct Fallback<F, M, N> {
    handler: F,
    _marker: PhantomData<fn() -> (M, N)>,
}

impl<F: Clone, M, N> Clone for Fallback<F, M, N> {
    fn clone(&self) -> Self {
        Fallback {
            handler: self.handler.clone(),
            _marker: PhantomData,
        }
    }
}

/// Slots that are still free to take a handler.
#[diagnostic::on_unimplemented(
    message = "this alternative is already matched",
    label = "`{Self}` already covers it",
    note = "each alternative takes exactly one handler, from `when`, `when_any` or `otherwise`"
)]
pub trait Uncovered {}

impl<A> Uncovered for Vacant<A> {}

/// The slot at position `P` of a table.
pub trait SlotAt<P> {
    type Slot;
}

impl<Head, Tail> SlotAt<UTerm> for (Head, Tail) {
    type Slot = Head;
}

impl<Head, Tail, P> SlotAt<UInt<P>> for (Head, Tail)
where
    Tail: SlotAt<P>,
{
    type Slot = Tail::Slot;
}

/// Replaces the slot at position `P` of a table with `slot`.
///
/// Binding does not look at the old slot; callers check it through
/// [`SlotAt`] once the position is known.
pub trait Bind<P, Slot> {
    type Output;

    fn bind(self, slot: Slot) -> Self::Output;
}

impl<Head, Tail, Slot> Bind<UTerm, Slot> for (Head, Tail) {
    type Output = (Slot, Tail);

    fn bind(self, slot: Slot) -> Self::Output {
        (slot, self.1)
    }
}

impl<Head, Tail, P, Slot> Bind<UInt<P>, Slot> for (Head, Tail)
where
    Tail: Bind<P, Slot>,
{
    type Output = (Head, Tail::Output);

    fn bind(self, slot: Slot) -> Self::Output {
        (self.0, self.1.bind(slot))
    }
}

/// Binds a copy of `slot` at every position of the list `Ps`.
pub trait BindEach<Ps, Slot> {
    type Output;

    fn bind_each(self, slot: Slot) -> Self::Output;
}

impl<Table, Slot> BindEach<(), Slot> for Table {
    type Output = Table;

    fn bind_each(self, _: Slot) -> Table {
        self
    }
}

impl<Table, PHead, PTail, Slot> BindEach<(PHead, PTail), Slot> for Table
where
    Slot: Clone,
    Table: SlotAt<PHead> + Bind<PHead, Slot>,
    <Table as SlotAt<PHead>>::Slot: Uncovered,
    Table::Output: BindEach<PTail, Slot>,
{
    type Output = <Table::Output as BindEach<PTail, Slot>>::Output;

    fn bind_each(self, slot: Slot) -> Self::Output {
        Bind::bind(self, slot.clone()).bind_each(slot)
    }
}

/// The table update of [`Matcher::when`]: `I` is the inferred pair of the
/// position of `T` and the handler's marker.
pub trait Assign<S, R, T, I, F> {
    type Output;

    fn assign(self, handler: F) -> Self::Output;
}

impl<S, R, T, P, M, F, Table> Assign<S, R, T, (P, M), F> for Table
where
    S: Contains<T, P>,
    P: Position,
    F: Handler<T, M>,
    F::Output: Yields<R>,
    Table: SlotAt<P> + Bind<P, Bound<F, T, P, M>>,
    <Table as SlotAt<P>>::Slot: Uncovered,
{
    type Output = <Table as Bind<P, Bound<F, T, P, M>>>::Output;

    fn assign(self, handler: F) -> Self::Output {
        self.bind(Bound {
            handler,
            _marker: PhantomData,
        })
    }
}

/// The table update of [`Matcher::when_any`]: `I` is the inferred pair of
/// the positions of `G` and the handler's marker.
pub trait AssignGroup<S, R, G, I, F> {
    type Output;

    fn assign_group(self, handler: F) -> Self::Output;
}

impl<S, R, G, Ps, M, F, Table> AssignGroup<S, R, G, (Ps, M), F> for Table
where
    S: Subset<G, Ps>,
    G: Alternatives,
    G::Len: NonZero,
    F: Handler<Sum<G>, M> + Clone,
    F::Output: Yields<R>,
    Table: BindEach<Ps, Grouped<F, G, Ps, M>>,
{
    type Output = <Table as BindEach<Ps, Grouped<F, G, Ps, M>>>::Output;

    fn assign_group(self, handler: F) -> Self::Output {
        self.bind_each(Grouped {
            handler,
            _marker: PhantomData,
        })
    }
}

/// A single slot of a handler table.
pub trait Slot {
    /// Whether a handler covers this slot.
    const COVERED: bool;

    /// The slot after a fallback is supplied.
    type Resolved;

    /// `N`, plus one if the fallback takes over this slot.
    type Missing<N: Position>: Position;

    fn resolve(self) -> Self::Resolved;
}

impl<A> Slot for Vacant<A> {
    const COVERED: bool = false;
    type Resolved = Otherwise<A>;
    type Missing<N: Position> = UInt<N>;

    fn resolve(self) -> Otherwise<A> {
        Otherwise(PhantomData)
    }
}

impl<F, T, P, M> Slot for Bound<F, T, P, M> {
    const COVERED: bool = true;
    type Resolved = Self;
    type Missing<N: Position> = N;

    fn resolve(self) -> Self {
        self
    }
}

impl<F, G, Ps, M> Slot for Grouped<F, G, Ps, M> {
    const COVERED: bool = true;
    type Resolved = Self;
    type Missing<N: Position> = N;

    fn resolve(self) -> Self {
        self
    }
}

impl<A> Slot for Otherwise<A> {
    const COVERED: bool = true;
    type Resolved = Self;
    type Missing<N: Position> = N;

    fn resolve(self) -> Self {
        self
    }
}

/// The difference between all positions and the covered ones.
///
/// [`resolve`](Resolve::resolve) hands every vacant slot to the fallback, in
/// ascending position order, and `Missing` counts how many it took.
pub trait Resolve {
    /// Bit `i` is set when position `i` is covered. Positions from 128 on
    /// fall off the top.
    const COVERED: u128;

    type Resolved;

    type Missing: Position;

    fn resolve(self) -> Self::Resolved;
}

impl Resolve for () {
    const COVERED: u128 = 0;
    type Resolved = ();
    type Missing = UTerm;

    fn resolve(self) {}
}

impl<Head: Slot, Tail: Resolve> Resolve for (Head, Tail) {
    const COVERED: u128 = Head::COVERED as u128 | Tail::COVERED << 1;
    type Resolved = (Head::Resolved, Tail::Resolved);
    type Missing = Head::Missing<Tail::Missing>;

    fn resolve(self) -> Self::Resolved {
        (self.0.resolve(), self.1.resolve())
    }
}

/// A slot that can be invoked for the value `Sum<S>` held at its position.
#[diagnostic::on_unimplemented(
    message = "non-exhaustive match: no handler for `{Self}`",
    label = "unmatched alternative",
    note = "add a `when` for this alternative, or finish the match with `otherwise`"
)]
pub trait Arm<S: Alternatives, D, R> {
    fn invoke(self, value: Sum<S>, fallback: D) -> R;
}

impl<S, D, R, F, T, P, M> Arm<S, D, R> for Bound<F, T, P, M>
where
    S: Contains<T, P>,
    P: Position,
    F: Handler<T, M>,
    F::Output: Yields<R>,
{
    fn invoke(self, value: Sum<S>, _: D) -> R {
        match value.take::<T, P>() {
            Ok(value) => self.handler.call(value).yielded(),
            Err(value) => unreachable!(
                "slot {} invoked for position {}",
                P::INDEX,
                value.position()
            ),
        }
    }
}

impl<S, D, R, F, G, Ps, M> Arm<S, D, R> for Grouped<F, G, Ps, M>
where
    S: Subset<G, Ps>,
    G: Alternatives,
    F: Handler<Sum<G>, M>,
    F::Output: Yields<R>,
{
    fn invoke(self, value: Sum<S>, _: D) -> R {
        match value.narrow::<G, Ps>() {
            Ok(value) => self.handler.call(value).yielded(),
            Err(value) => unreachable!(
                "group slot invoked for position {} outside the group",
                value.position()
            ),
        }
    }
}

impl<S, R, A, F, M, N> Arm<S, Fallback<F, M, N>, R> for Otherwise<A>
where
    S: Alternatives,
    F: Handler<Sum<S>, M>,
    F::Output: Yields<R>,
{
    fn invoke(self, value: Sum<S>, fallback: Fallback<F, M, N>) -> R {
        fallback.handler.call(value).yielded()
    }
}

/// A handler table that covers every position.
pub trait Dispatch<S: Alternatives, D, R> {
    /// Invokes the slot `offset` positions from the start of this table.
    fn dispatch(self, offset: u8, value: Sum<S>, fallback: D) -> R;
}

impl<S: Alternatives, D, R> Dispatch<S, D, R> for () {
    fn dispatch(self, offset: u8, value: Sum<S>, _: D) -> R {
        unreachable!(
            "position {} ran {offset} past the end of the handler table",
            value.position()
        )
    }
}

impl<S, D, R, Head, Tail> Dispatch<S, D, R> for (Head, Tail)
where
    S: Alternatives,
    Head: Arm<S, D, R>,
    Tail: Dispatch<S, D, R>,
{
    #[inline]
    fn dispatch(self, offset: u8, value: Sum<S>, fallback: D) -> R {
        match offset.checked_sub(1) {
            None => self.0.invoke(value, fallback),
            Some(offset) => self.1.dispatch(offset, value, fallback),
        }
    }
}

/// The fallback state of a match that may run.
#[diagnostic::on_unimplemented(
    message = "redundant `otherwise`: every alternative was already matched",
    label = "this fallback can never be called",
    note = "remove the `otherwise`, or one of the `when`s it would replace"
)]
pub trait Justified {}

impl Justified for NoFallback {}

impl<F, M, N: Position> Justified for Fallback<F, M, UInt<N>> {}

/// The fallback state of a match that may still take a fallback.
#[diagnostic::on_unimplemented(
    message = "`otherwise` was already supplied for this match",
    label = "second fallback",
    note = "a match takes at most one `otherwise`"
)]
pub trait Pending {}

impl Pending for NoFallback {}

#[cfg(test)]
mod tests {
    use std::{
        string::{String, ToString},
        vec::Vec,
    };

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Sum, T};

    #[derive(Debug, Clone, PartialEq)]
    struct Empty;
    #[derive(Debug, Clone, PartialEq)]
    struct Red(String);
    #[derive(Debug, Clone, PartialEq)]
    struct Green(String);
    #[derive(Debug, Clone, PartialEq)]
    struct Blue(String);

    type Color = Sum![Empty, Red, Green, Blue];

    fn colors() -> Vec<Color> {
        std::vec![
            Sum::new(Empty),
            Sum::new(Red("red".to_string())),
            Sum::new(Green("green".to_string())),
            Sum::new(Blue("blue".to_string())),
        ]
    }

    #[test]
    fn coverage_masks() {
        let color: Color = Sum::new(Empty);
        let matcher = match_on(color);
        assert_eq!(matcher.covered_positions(), 0b0000);
        assert_eq!(matcher.missing_positions(), 0b1111);

        let matcher = matcher.when::<Green, _, _>(|| 0).when::<Empty, _, _>(|| 1);
        assert_eq!(matcher.covered_positions(), 0b0101);
        assert_eq!(matcher.missing_positions(), 0b1010);

        let matcher = matcher.otherwise(|| 2);
        assert_eq!(matcher.covered_positions(), 0b1111);
        assert_eq!(matcher.missing_positions(), 0);
        assert_eq!(matcher.run(), 1);
    }

    #[test]
    fn missing_count() {
        use crate::{handler::Ignores, position::U2};

        type Table = <T![Empty, Red, Green, Blue] as Alternatives>::Table;
        type GreenSlot = Bound<fn() -> i32, Green, U2, Ignores>;
        type Partial = <Table as Bind<U2, GreenSlot>>::Output;

        assert_eq!(<<Table as Resolve>::Missing as Position>::INDEX, 4);
        assert_eq!(<<Partial as Resolve>::Missing as Position>::INDEX, 3);
    }

    /// Whether `$ty` satisfies the bound, decided by autoref method lookup.
    macro_rules! implements {
        ($ty:ty: $($bound:tt)+) => {{
            struct Check<T: ?Sized>(core::marker::PhantomData<T>);
            trait Holds {
                fn holds(&self) -> bool {
                    true
                }
            }
            impl<T: ?Sized + $($bound)+> Holds for Check<T> {}
            trait Fails {
                fn holds(&self) -> bool {
                    false
                }
            }
            impl<T: ?Sized> Fails for &Check<T> {}
            (&Check::<$ty>(core::marker::PhantomData)).holds()
        }};
    }

    #[test]
    fn rejections_come_from_named_bounds() {
        use crate::{
            handler::Ignores,
            position::{U1, U2},
        };

        type Alts = T![Empty, Red, Green, Blue];
        type Table = <Alts as Alternatives>::Table;
        type RedSlot = Bound<fn() -> i32, Red, U1, Ignores>;
        type Partial = <Table as Bind<U1, RedSlot>>::Output;
        type Resolved = <Partial as Resolve>::Resolved;
        type Ends = Fallback<fn() -> i32, Ignores, UTerm>;
        type Covers = Fallback<fn() -> i32, Ignores, U2>;

        // a duplicate still has a position, only its slot is taken
        assert_eq!(crate::position_of::<Alts, Red, _>(), 1);
        assert!(implements!(<Table as SlotAt<U1>>::Slot: Uncovered));
        assert!(!implements!(<Partial as SlotAt<U1>>::Slot: Uncovered));
        assert!(implements!(<Partial as SlotAt<U2>>::Slot: Uncovered));
        assert!(!implements!(<Resolved as SlotAt<U2>>::Slot: Uncovered));

        assert!(!implements!(Vacant<Red>: Arm<Alts, NoFallback, i32>));
        assert!(implements!(RedSlot: Arm<Alts, NoFallback, i32>));
        assert!(implements!(Otherwise<Red>: Arm<Alts, Covers, i32>));

        assert!(implements!(NoFallback: Justified));
        assert!(implements!(Covers: Justified));
        assert!(!implements!(Ends: Justified));

        assert!(implements!(NoFallback: Pending));
        assert!(!implements!(Covers: Pending));

        assert!(implements!(U1: NonZero));
        assert!(!implements!(UTerm: NonZero));

        assert!(implements!(i32: Yields<i32>));
        assert!(!implements!(&'static str: Yields<i32>));
    }

    #[test]
    fn masks_saturate() {
        assert_eq!(positions_below(0), 0);
        assert_eq!(positions_below(4), 0b1111);
        assert_eq!(positions_below(128), u128::MAX);
        assert_eq!(positions_below(200), u128::MAX);
    }

    #[test]
    fn fallback_with_inferred_parameter() {
        let positions: Vec<u8> = colors()
            .into_iter()
            .map(|color| {
                match_on(color)
                    .when::<Red, _, _>(|| 9)
                    .otherwise_with(|other| other.position())
                    .run()
            })
            .collect();
        assert_eq!(positions, [0, 9, 2, 3]);
    }

    #[test]
    fn fallback_receives_whole_value() {
        for color in colors() {
            let expected = color.position();
            let position = match_on(color)
                .when::<Green, _, _>(|_: Green| 100)
                .otherwise(|other: Color| other.position())
                .run();
            if expected == 2 {
                assert_eq!(position, 100);
            } else {
                assert_eq!(position, expected);
            }
        }
    }

    #[test]
    fn group_receives_narrowed_value() {
        let names: Vec<String> = colors()
            .into_iter()
            .map(|color| {
                match_on(color)
                    .when_any::<T![Blue, Red], _, _>(|warm: Sum![Blue, Red]| {
                        match warm.take::<Red, _>() {
                            Ok(red) => red.0,
                            Err(warm) => warm.get::<Blue, _>().map_or_else(String::new, |b| b.0.clone()),
                        }
                    })
                    .otherwise(|| "other".to_string())
                    .run()
            })
            .collect();
        assert_eq!(names, ["other", "red", "other", "blue"]);
    }

    #[test]
    fn branching_a_matcher() {
        let color: Color = Sum::new(Red("red".to_string()));
        let base = match_on(color).when::<Red, _, _>(|r: Red| r.0.len());
        let short = base.clone().otherwise(|| 0).run();
        let long = base
            .when::<Green, _, _>(|| 1)
            .when::<Blue, _, _>(|| 2)
            .when::<Empty, _, _>(|| 3)
            .run();
        assert_eq!(short, 3);
        assert_eq!(long, 3);
    }

    #[test]
    fn debug_shows_value_and_coverage() {
        let color: Color = Sum::new(Green("green".to_string()));
        let matcher = match_on::<_, ()>(color).when::<Red, _, _>(|| ());
        assert_eq!(
            std::format!("{matcher:?}"),
            "Matcher { value: Green(\"green\"), covered: 0b10, .. }"
        );
    }
}
