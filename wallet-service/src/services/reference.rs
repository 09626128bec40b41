//! Ledger reference generation.

use chrono::Utc;
use rand::Rng;

use crate::models::Direction;

const SUFFIX_LEN: usize = 8;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Build a reference handle like `CR-1714989954123-k3f9a0qz`.
///
/// The suffix comes from the thread-local CSPRNG so entries created
/// within the same millisecond still differ; the store's unique index
/// on `reference` is the backstop.
pub fn generate_reference(direction: Direction) -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}-{}", direction.reference_prefix(), millis, suffix)
}
