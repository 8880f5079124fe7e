/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: sequence from a random start (4096 values per ms)
///
/// Ids from one process never repeat within a millisecond.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    use std::sync::OnceLock;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    static START: OnceLock<i64> = OnceLock::new();
    static SEQ: AtomicI64 = AtomicI64::new(0);

    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let start = *START.get_or_init(|| rand::thread_rng().gen_range(0..0x1000));
    let seq_bits = (start + SEQ.fetch_add(1, Ordering::Relaxed)) & 0xFFF; // 12 bits
    (ts << 12) | seq_bits
}

/// Record identifier with a kind prefix, e.g. `order-5521…`.
///
/// Backend records are keyed by strings like `prod-5` and `promo-1`;
/// generated ids keep that shape.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, snowflake_id())
}
