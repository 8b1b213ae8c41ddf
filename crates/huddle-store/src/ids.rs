use std::sync::atomic::{AtomicU64, Ordering};

use rand::RngCore;

/// Random bytes behind every generated user, session and message ID.
pub const ID_BYTES: usize = 16;

/// Source of opaque identifiers for users, sessions and messages.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 16 bytes from the thread-local CSPRNG, lowercase hex (32 chars).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> String {
        let mut bytes = [0u8; ID_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Deterministic IDs (`prefix-0001`, `prefix-0002`, ...) for tests.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:04}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_32_hex_chars() {
        let id = RandomIds.generate();
        assert_eq!(id.len(), ID_BYTES * 2);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(RandomIds.generate(), RandomIds.generate());
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::new("t");
        assert_eq!(ids.generate(), "t-0001");
        assert_eq!(ids.generate(), "t-0002");
    }
}
