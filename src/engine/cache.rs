//! Routine cache and fingerprints
//!
//! Compiled routines are memoized process-wide. Keys are value-equal
//! fingerprints, so structurally identical schemas share an entry no
//! matter how they were authored. Concurrent callers may compile the
//! same routine redundantly; entries are semantically identical and
//! the last write wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use base64::Engine;
use sha2::{Digest, Sha256};

use crate::schema::Schema;

use super::program::Program;
use super::{Options, Roles};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    schema: String,
    options: u32,
    access: String,
}

static CACHE: OnceLock<Mutex<HashMap<CacheKey, Arc<Program>>>> = OnceLock::new();

/// Canonical, equality-comparable digest of a schema: SHA-256 of the
/// canonical render, base64-encoded.
pub fn fingerprint(schema: &Schema) -> String {
    let mut hasher = Sha256::new();
    hasher.update(schema.to_string().as_bytes());
    let digest = hasher.finalize();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
}

fn access_fingerprint(access: Option<&Roles>) -> String {
    match access {
        None => "-".to_string(),
        Some(roles) => {
            // BTreeSet iterates sorted, so the join is canonical.
            let names: Vec<&str> = roles.iter().map(String::as_str).collect();
            names.join(",")
        }
    }
}

/// Returns the cached routine for the triple, compiling on a miss.
pub(super) fn fetch(schema: &Schema, options: Options, access: Option<&Roles>) -> Arc<Program> {
    let key = CacheKey {
        schema: fingerprint(schema),
        options: options.bits(),
        access: access_fingerprint(access),
    };
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    if let Some(hit) = cache.lock().expect("cache lock").get(&key) {
        return hit.clone();
    }
    let program = Arc::new(Program::compile(schema, options, access));
    cache
        .lock()
        .expect("cache lock")
        .insert(key, program.clone());
    program
}
