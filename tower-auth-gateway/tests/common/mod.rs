use std::time::{SystemTime, UNIX_EPOCH};

pub mod jwt;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn unix_epoch_sec_from_now(sec: i64) -> u64 {
    (SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
        + sec) as u64
}
