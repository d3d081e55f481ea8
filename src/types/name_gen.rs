// ABOUTME: Collision-resistant name generation for ephemeral resources.
// ABOUTME: Produces prefix + random decimal suffix from a wide random space.

use uuid::Uuid;

/// Width of the generated numeric suffix. Eight digits gives a 10^8 space,
/// wide enough that concurrent runs under the same subscription won't
/// realistically collide during a resource's short lifetime.
const SUFFIX_DIGITS: u32 = 8;

/// Generate a resource name of the form `prefix` + zero-padded random digits.
///
/// There is no uniqueness guarantee beyond probabilistic collision avoidance;
/// generated names are scoped per subscription and short-lived.
pub fn random_name(prefix: &str) -> String {
    let modulus = 10u64.pow(SUFFIX_DIGITS);
    let suffix = random_u64() % modulus;
    format!("{prefix}{suffix:0width$}", width = SUFFIX_DIGITS as usize)
}

fn random_u64() -> u64 {
    // UUIDv4 carries 122 random bits; fold the low half into a u64.
    let bytes = Uuid::new_v4().into_bytes();
    u64::from_be_bytes(bytes[8..16].try_into().expect("slice is 8 bytes"))
}
