use std::cmp::Ordering;

/// Numeric order with `-0.0 == 0.0`, total over NaN as well: positive NaN sorts after every
/// number, negative NaN before.
pub(crate) fn f64_cmp(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Stable ascending sort by an `f64` key.
pub(crate) fn order_by<T>(items: &mut [T], mut key: impl FnMut(&T) -> f64) {
    items.sort_by(|a, b| f64_cmp(key(a), key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_is_stable_for_equal_keys() {
        let mut items = vec![(1, 2.0), (2, 1.0), (3, 2.0), (4, -0.0), (5, 0.0), (6, 1.0)];
        order_by(&mut items, |&(_, k)| k);
        let ids: Vec<i32> = items.iter().map(|&(id, _)| id).collect();
        assert_eq!(ids, vec![4, 5, 2, 6, 1, 3]);
    }

    #[test]
    fn f64_cmp_orders_nan_by_sign() {
        let nan = f64::from_bits(0x7ff8_0000_0000_0000);
        assert_eq!(f64_cmp(nan, 1.0), Ordering::Greater);
        assert_eq!(f64_cmp(-nan, -1.0), Ordering::Less);
        assert_eq!(f64_cmp(-0.0, 0.0), Ordering::Equal);
    }
}
