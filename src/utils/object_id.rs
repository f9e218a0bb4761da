use rand::{thread_rng, RngCore};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();

/// Generates a 24-character hex identifier laid out like a BSON ObjectId:
/// 4 bytes of seconds since the epoch, 5 random bytes fixed per process and a
/// 3 byte counter seeded randomly.
pub fn generate_object_id() -> String {
    let seconds = chrono::Utc::now().timestamp() as u32;
    let process = PROCESS_UNIQUE.get_or_init(|| {
        let mut bytes = [0u8; 5];
        thread_rng().fill_bytes(&mut bytes);
        bytes
    });
    let counter = COUNTER
        .get_or_init(|| AtomicU32::new(thread_rng().next_u32()))
        .fetch_add(1, Ordering::Relaxed);

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&seconds.to_be_bytes());
    bytes[4..9].copy_from_slice(process);
    bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
    hex::encode(bytes)
}
