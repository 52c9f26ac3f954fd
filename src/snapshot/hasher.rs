use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Final digest of a [`Hasher`], rendered as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashCode(String);

impl HashCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only hash accumulator.
///
/// Variable-length input is length-prefixed, so adjacent contributions can
/// never run together (`"ab" + "c"` and `"a" + "bc"` differ).
#[derive(Clone, Default)]
pub struct Hasher {
    inner: Sha256,
}

impl Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_byte(&mut self, value: u8) {
        self.inner.update([value]);
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.inner.update((bytes.len() as u64).to_le_bytes());
        self.inner.update(bytes);
    }

    pub fn put_int(&mut self, value: i32) {
        self.inner.update(value.to_le_bytes());
    }

    pub fn put_long(&mut self, value: i64) {
        self.inner.update(value.to_le_bytes());
    }

    pub fn put_bool(&mut self, value: bool) {
        self.put_byte(u8::from(value));
    }

    pub fn put_string(&mut self, value: &str) {
        self.put_bytes(value.as_bytes());
    }

    pub fn put_null(&mut self) {
        self.put_byte(0);
    }

    pub fn put_hash(&mut self, hash: &HashCode) {
        self.put_string(hash.as_str());
    }

    pub fn finish(self) -> HashCode {
        HashCode(format!("sha256:{}", hex::encode(self.inner.finalize())))
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher").finish_non_exhaustive()
    }
}

/// Something that can feed itself into a [`Hasher`].
pub trait Hashable {
    fn append_to_hasher(&self, hasher: &mut Hasher);

    fn content_hash(&self) -> HashCode {
        let mut hasher = Hasher::new();
        self.append_to_hasher(&mut hasher);
        hasher.finish()
    }
}

impl Hashable for str {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        hasher.put_string(self);
    }
}

impl Hashable for String {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        hasher.put_string(self);
    }
}

impl Hashable for bool {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        hasher.put_bool(*self);
    }
}

impl Hashable for i32 {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        hasher.put_int(*self);
    }
}

impl Hashable for i64 {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        hasher.put_long(*self);
    }
}

impl Hashable for HashCode {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        hasher.put_hash(self);
    }
}

impl<T: Hashable> Hashable for Option<T> {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        match self {
            None => hasher.put_null(),
            Some(value) => {
                hasher.put_byte(1);
                value.append_to_hasher(hasher);
            }
        }
    }
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        (**self).append_to_hasher(hasher);
    }
}

impl<T: Hashable + ?Sized> Hashable for Arc<T> {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        (**self).append_to_hasher(hasher);
    }
}
