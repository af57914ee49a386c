//! Shortest signed distance between two positions on a circle.
//!
//! Items sit at integer positions `0..N` on a circle of circumference `N`.
//! The smoothed index runs unbounded along the real line, so every lookup
//! wraps it back onto the circle and picks the nearest copy of the item.

use std::num::NonZeroUsize;

/// Signed distance from `current` to `index` along the shorter arc.
///
/// Returns the representative of `{index − current + k·total | k ∈ ℤ}` with
/// the smallest magnitude, always inside `(−total/2, total/2]`.  An exact
/// half-turn resolves to `+total/2`: halves round toward −∞.
pub fn modular_distance(current: f64, index: i64, total: NonZeroUsize) -> f64 {
    let n = total.get() as f64;
    let raw = index as f64 - current;
    let mut wrapped = raw - n * round_half_down(raw / n);

    // One fold is enough: the quotient was off by at most an ulp.
    let half = n / 2.0;
    if wrapped > half {
        wrapped -= n;
    } else if wrapped <= -half {
        wrapped += n;
    }
    wrapped
}

/// Round to the nearest integer, ties toward negative infinity.
fn round_half_down(x: f64) -> f64 {
    (x - 0.5).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: usize) -> NonZeroUsize {
        NonZeroUsize::new(v).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wraps_across_the_seam() {
        // 2.9 is 0.1 short of 3 ≡ 0.
        assert!(close(modular_distance(2.9, 0, n(3)), 0.1));
        assert!(close(modular_distance(0.1, 2, n(3)), -1.1));
    }

    #[test]
    fn centred_item_has_zero_distance() {
        assert_eq!(modular_distance(4.0, 4, n(7)), 0.0);
        assert!(close(modular_distance(11.0, 4, n(7)), 0.0));
        assert!(close(modular_distance(70.0, 0, n(7)), 0.0));
    }

    #[test]
    fn sign_points_from_current_to_item() {
        // Item ahead of the index → positive, behind → negative.
        assert!(close(modular_distance(1.0, 2, n(7)), 1.0));
        assert!(close(modular_distance(3.0, 2, n(7)), -1.0));
    }

    #[test]
    fn stays_inside_half_open_interval() {
        for total in 1..=9usize {
            let half = total as f64 / 2.0;
            for step in -400..=400 {
                let current = step as f64 * 0.125;
                for index in -12..12i64 {
                    let d = modular_distance(current, index, n(total));
                    assert!(
                        d > -half && d <= half,
                        "distance({current}, {index}, {total}) = {d} escaped (-{half}, {half}]"
                    );
                }
            }
        }
    }

    #[test]
    fn periodic_in_item_index() {
        for total in 1..=8usize {
            for step in -100..=100 {
                let current = step as f64 * 0.37;
                for index in 0..total as i64 {
                    let a = modular_distance(current, index, n(total));
                    let b = modular_distance(current, index + total as i64, n(total));
                    let c = modular_distance(current, index - 3 * total as i64, n(total));
                    assert!(close(a, b), "{a} vs {b} at current={current}");
                    assert!(close(a, c), "{a} vs {c} at current={current}");
                }
            }
        }
    }

    #[test]
    fn exact_half_turn_resolves_positive() {
        // raw = +1 and raw = -1 on a circle of 2 are both a half-turn.
        assert_eq!(modular_distance(0.0, 1, n(2)), 1.0);
        assert_eq!(modular_distance(1.0, 0, n(2)), 1.0);
        assert_eq!(modular_distance(1.5, 0, n(3)), 1.5);
        assert_eq!(modular_distance(0.0, 3, n(6)), 3.0);
        assert_eq!(modular_distance(3.0, 0, n(6)), 3.0);
    }

    #[test]
    fn single_item_circle_is_always_near() {
        assert!(close(modular_distance(0.25, 0, n(1)), -0.25));
        assert!(close(modular_distance(0.75, 0, n(1)), 0.25));
        assert_eq!(modular_distance(0.5, 0, n(1)), 0.5);
        assert_eq!(modular_distance(12.0, 0, n(1)), 0.0);
    }
}
