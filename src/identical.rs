//! Identity comparison used to suppress redundant notifications.

use std::{rc::Rc, sync::Arc};

/// Identity comparison of two values.
///
/// Two values are identical when an observer can't tell them apart by
/// identity: shared pointers ([`Rc`], [`Arc`]) are compared by address, so
/// two structurally equal, but distinct allocations are __not__ identical.
/// Plain values (numbers, strings, `bool`, etc.) have no identity of their own
/// and are compared by value.
///
/// Floats are compared bitwise, so `NaN` is identical to `NaN`, while `0.0` is
/// not identical to `-0.0`.
///
/// Own types can be opted in with the [`identical_by_eq!`] macro, or with a
/// manual implementation.
pub trait Identical {
    /// Returns `true` if `self` and `other` are the same value.
    fn identical(&self, other: &Self) -> bool;
}

/// Implements [`Identical`] for the provided types via their [`PartialEq`]
/// implementation.
///
/// ```
/// use containerized_state::{identical_by_eq, Identical};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Theme {
///     Light,
///     Dark,
/// }
///
/// identical_by_eq!(Theme);
///
/// assert!(Theme::Dark.identical(&Theme::Dark));
/// assert!(!Theme::Dark.identical(&Theme::Light));
/// ```
#[macro_export]
macro_rules! identical_by_eq {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Identical for $ty {
            #[inline]
            fn identical(&self, other: &Self) -> bool {
                self == other
            }
        }
    )+};
}

identical_by_eq!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    String,
    &'static str,
);

impl Identical for f32 {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Identical for f64 {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl<T: ?Sized> Identical for Rc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identical for Arc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Identical> Identical for Option<T> {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(this), Some(other)) => this.identical(other),
            (None, None) => true,
            _ => false,
        }
    }
}
