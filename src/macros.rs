/// Names the [`struct@Sum`] type over a list of alternatives.
///
/// # Examples
///
/// ```rust
/// use switcheroo::Sum;
///
/// struct Red;
/// struct Green;
///
/// type Color = Sum![Red, Green];
/// let c: Color = Sum::new(Green);
/// assert_eq!(c.position(), 1);
/// ```
#[macro_export]
macro_rules! Sum {
    [$($t:ty),* $(,)?] => [$crate::Sum::<$crate::T![$($t,)*]>];
}

/// Names the type list of a set of alternatives, as taken by
/// [`Matcher::when_any`] and [`Sum::narrow`].
///
/// `T![A, B, C]` is `(A, (B, (C, ())))`.
///
/// [`Matcher::when_any`]: crate::Matcher::when_any
/// [`Sum::narrow`]: crate::Sum::narrow
///
/// # Examples
///
/// ```rust
/// use switcheroo::{Alternatives, T, position::Position};
///
/// type Primary = T![u8, u16, u32];
/// assert_eq!(<<Primary as Alternatives>::Len as Position>::INDEX, 3);
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [$head:ty $(, $t:ty)* $(,)?] => [($head, $crate::T!($($t,)*))];
}
