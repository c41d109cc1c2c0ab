//! Path resolution and key encoding.
//!
//! The only part of the store with real invariants: distinct keys must map
//! to distinct file names, the mapping must be reversible so directory
//! listings can recover the original keys, and an encoded key must never
//! escape the base directory.

use std::path::{Path, PathBuf};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by [`encode_key`].
///
/// ASCII alphanumerics plus `- _ ! ~ * ' ( )`. Everything else, including
/// `/`, `%`, `.`, and all non-ASCII bytes, is percent-escaped, so an
/// encoded key is always a single filesystem-legal path segment. Unlike URI
/// component encoding, `.` is escaped too: otherwise the keys `"."` and
/// `".."` would resolve to the base directory and its parent instead of an
/// entry.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Join path segments into one normalized absolute-style path.
///
/// Purely textual: segments are joined with `/`, then empty segments and
/// `.` segments are dropped. The filesystem is never touched and `..`
/// segments pass through unchanged. Equivalent inputs with redundant
/// separators produce identical output.
pub fn resolve_path<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/");

    let parts: Vec<&str> = joined
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();

    format!("/{}", parts.join("/"))
}

/// Percent-encode a key into a filesystem-safe file name.
///
/// Deterministic and collision-free: distinct keys always produce distinct
/// names, and [`decode_key`] inverts the mapping exactly.
///
/// The empty key encodes to an empty segment, which [`path_for_key`]
/// collapses onto the base directory itself; operations on it fail at the
/// filesystem rather than storing anything.
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ENCODE_SET).to_string()
}

/// Decode a file name produced by [`encode_key`] back to the original key.
///
/// Returns `None` when the decoded bytes are not valid UTF-8, which means
/// the file was not written by this store.
pub fn decode_key(name: &str) -> Option<String> {
    percent_decode_str(name)
        .decode_utf8()
        .ok()
        .map(|cow| cow.into_owned())
}

/// Resolve the file path holding the entry for `key` under `base_dir`.
pub fn path_for_key(base_dir: &Path, key: &str) -> PathBuf {
    let encoded = encode_key(key);
    PathBuf::from(resolve_path(&[
        base_dir.to_string_lossy().as_ref(),
        encoded.as_str(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_drops_empty_and_dot_segments() {
        assert_eq!(resolve_path(&["/tmp//store", ".", "folder"]), "/tmp/store/folder");
        assert_eq!(resolve_path(&["", "tmp", "store"]), "/tmp/store");
    }

    #[test]
    fn resolve_path_equivalent_inputs_match() {
        assert_eq!(
            resolve_path(&["/data/", "/persist"]),
            resolve_path(&["/data", "persist"]),
        );
    }

    #[test]
    fn resolve_path_is_idempotent() {
        let once = resolve_path(&["/data", "persist", "store"]);
        let twice = resolve_path(&[resolve_path(&["/data", "persist"]).as_str(), "store"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn resolve_path_leaves_parent_segments_alone() {
        // Textual normalization only; `..` is not resolved here.
        assert_eq!(resolve_path(&["/data", "..", "x"]), "/data/../x");
    }

    #[test]
    fn encode_key_is_injective_over_tricky_keys() {
        let keys = [
            "user", "user/1", "user%2F1", "a b", "a+b", "日本語", "persist:root", "",
        ];
        for (i, a) in keys.iter().enumerate() {
            for (j, b) in keys.iter().enumerate() {
                if i != j {
                    assert_ne!(encode_key(a), encode_key(b), "{a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn decode_inverts_encode() {
        for key in ["plain", "a/b", "with space", "100%", "日本語のキー", "..", "."] {
            assert_eq!(decode_key(&encode_key(key)).as_deref(), Some(key));
        }
    }

    #[test]
    fn encoded_keys_cannot_traverse_out_of_base() {
        for key in ["../../etc/passwd", "..", "a/../../b", "/absolute"] {
            let encoded = encode_key(key);
            assert!(!encoded.contains('/'), "{encoded}");
            assert!(!encoded.contains('.'), "{encoded}");
        }
        // The entry path always stays directly under the base directory.
        let path = path_for_key(Path::new("/base/dir"), "../../escape");
        assert_eq!(path.parent(), Some(Path::new("/base/dir")));
    }

    #[test]
    fn dot_keys_map_to_entries_not_directories() {
        // With `.` unescaped these would collapse onto the base directory
        // itself (or its parent) during resolution.
        assert_eq!(path_for_key(Path::new("/b"), "."), PathBuf::from("/b/%2E"));
        assert_eq!(
            path_for_key(Path::new("/b"), ".."),
            PathBuf::from("/b/%2E%2E")
        );
    }

    #[test]
    fn decode_key_rejects_invalid_utf8() {
        assert_eq!(decode_key("%FF%FE"), None);
    }

    #[test]
    fn path_for_key_keeps_separator_keys_in_one_segment() {
        let path = path_for_key(Path::new("/tmp/store"), "a/b");
        assert_eq!(path, PathBuf::from("/tmp/store/a%2Fb"));
    }
}
