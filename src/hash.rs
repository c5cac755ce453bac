//! Content hashing for cache keys
//!
//! Module requirement texts are keyed by SHA256 digest. The combined
//! hash summarizes every module hash in one value so "nothing changed
//! anywhere" is a single comparison. Same text = same hash.

use sha2::{Digest, Sha256};

/// Hash requirement text, returning the full hex digest
pub fn digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Combine per-module hashes into a single digest.
///
/// Pairs are sorted by module name before hashing, so the result is
/// independent of iteration order. Adding, removing, or changing any
/// module changes the combined hash. An empty set combines to the
/// empty string, which no real digest can collide with.
pub fn combine<'a, I>(hashes: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs: Vec<(&str, &str)> = hashes.into_iter().collect();
    if pairs.is_empty() {
        return String::new();
    }
    pairs.sort_by_key(|(name, _)| *name);

    let mut hasher = Sha256::new();
    for (name, hash) in pairs {
        hasher.update(name.as_bytes());
        hasher.update(b":");
        hasher.update(hash.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_deterministic() {
        let h1 = digest("fastapi==1.0\n");
        let h2 = digest("fastapi==1.0\n");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn digest_different_content() {
        assert_ne!(digest("fastapi==1.0"), digest("fastapi==1.1"));
    }

    #[test]
    fn combine_order_independent() {
        let forward = combine([("web", "aaa"), ("db", "bbb"), ("api", "ccc")]);
        let reverse = combine([("api", "ccc"), ("db", "bbb"), ("web", "aaa")]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn combine_changes_on_hash_change() {
        let before = combine([("web", "aaa"), ("db", "bbb")]);
        let after = combine([("web", "zzz"), ("db", "bbb")]);
        assert_ne!(before, after);
    }

    #[test]
    fn combine_changes_on_module_added_or_removed() {
        let two = combine([("web", "aaa"), ("db", "bbb")]);
        let three = combine([("web", "aaa"), ("db", "bbb"), ("api", "ccc")]);
        let one = combine([("web", "aaa")]);
        assert_ne!(two, three);
        assert_ne!(two, one);
    }

    #[test]
    fn combine_empty_is_sentinel() {
        assert_eq!(combine([]), "");
        assert_ne!(combine([("web", "aaa")]), "");
    }

    #[test]
    fn combine_name_hash_boundary() {
        // ("ab", "c") must not collide with ("a", "bc")
        assert_ne!(combine([("ab", "c")]), combine([("a", "bc")]));
    }
}
