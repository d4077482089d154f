//! Order numbers.

use jiff::Timestamp;
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const SUFFIX_LEN: usize = 9;

/// Build an order number: `ORD-{unix millis}-{9 uppercase base-36 chars}`.
///
/// Uniqueness is enforced by the store, not here.
pub fn generate_order_number<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let index = rng.gen_range(0..BASE36.len());

            BASE36.get(index).map_or('0', |&b| char::from(b))
        })
        .collect();

    format!("ORD-{}-{suffix}", now.as_millisecond())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn number_has_expected_shape() {
        let now = Timestamp::from_millisecond(1_740_830_400_000).expect("valid timestamp");
        let number = generate_order_number(now, &mut StdRng::seed_from_u64(1));

        let (prefix, suffix) = number.rsplit_once('-').expect("has suffix");

        assert_eq!(prefix, "ORD-1740830400000");
        assert_eq!(suffix.len(), 9);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn numbers_differ_between_draws() {
        let now = Timestamp::now();
        let mut rng = StdRng::seed_from_u64(2);

        assert_ne!(
            generate_order_number(now, &mut rng),
            generate_order_number(now, &mut rng)
        );
    }
}
