use core::cmp::Ordering;

use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

/// Total order used to place items in a tree
///
/// Implementors are zero-sized policy types chosen at compile time. Two items
/// are considered equal when neither is less than the other, so a policy never
/// has to provide equality or hashing.
///
/// # Type Parameters
///
/// * `T` - The type of the items being ordered
///
/// # Methods
///
/// * `less(a: &T, b: &T) -> bool` - Returns true if `a` sorts strictly before `b`
pub trait Order<T: ?Sized> {
    /// Returns true if `a` sorts strictly before `b`
    fn less(a: &T, b: &T) -> bool;
}

/// Ascending order of any [`Ord`] type
#[derive(Debug, Clone, Copy, Default)]
pub struct Natural;

/// Descending order of any [`Ord`] type
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

/// Ascending order of floating point values
///
/// Values are compared as [`OrderedFloat`], so `NaN` equals itself and sorts
/// after every other value, and `-0.0` equals `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatOrder;

impl<T: Ord + ?Sized> Order<T> for Natural {
    #[inline]
    fn less(a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: Ord + ?Sized> Order<T> for Reverse {
    #[inline]
    fn less(a: &T, b: &T) -> bool {
        b < a
    }
}

impl<F: FloatCore> Order<F> for FloatOrder {
    #[inline]
    fn less(a: &F, b: &F) -> bool {
        OrderedFloat(*a) < OrderedFloat(*b)
    }
}

/// Compares two items under the order policy `O`
///
/// # Arguments
///
/// * `a` - The left hand item
/// * `b` - The right hand item
///
/// # Returns
///
/// * `Ordering` - `Equal` when neither item is less than the other
#[inline]
pub fn compare<T: ?Sized, O: Order<T>>(a: &T, b: &T) -> Ordering {
    if O::less(a, b) {
        Ordering::Less
    } else if O::less(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert!(<Natural as Order<i32>>::less(&1, &2));
        assert!(!<Natural as Order<i32>>::less(&2, &1));
        assert!(!<Natural as Order<i32>>::less(&2, &2));
        assert_eq!(compare::<str, Natural>("a", "b"), Ordering::Less);
    }

    #[test]
    fn test_reverse_order() {
        assert!(<Reverse as Order<i32>>::less(&2, &1));
        assert_eq!(compare::<_, Reverse>(&1, &2), Ordering::Greater);
        assert_eq!(compare::<_, Reverse>(&7, &7), Ordering::Equal);
    }

    #[test]
    fn test_float_order_nan_and_zero() {
        assert!(<FloatOrder as Order<f64>>::less(&1.0, &f64::NAN));
        assert!(<FloatOrder as Order<f64>>::less(&f64::INFINITY, &f64::NAN));
        assert_eq!(compare::<_, FloatOrder>(&f64::NAN, &f64::NAN), Ordering::Equal);
        assert_eq!(compare::<_, FloatOrder>(&-0.0f64, &0.0), Ordering::Equal);
        assert_eq!(
            compare::<_, FloatOrder>(&f64::NEG_INFINITY, &f64::MIN),
            Ordering::Less
        );
    }
}
