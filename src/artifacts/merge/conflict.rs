//! Merge conflict file content
//!
//! When both sides of a merge touch the same file incompatibly, the
//! working-tree file is replaced with both versions between conflict
//! markers and staged for addition.

use bytes::Bytes;

/// Build the conflicted file content for a filename both sides fought over
///
/// A side absent from its branch head contributes empty content. The
/// side bytes are inserted verbatim, with no separator added, and the
/// closing marker is followed by a newline:
///
/// ```text
/// <<<<<<< HEAD
/// <current side bytes>=======
/// <given side bytes>>>>>>>>
/// ```
pub fn conflict_bytes(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let mut out = Vec::new();
    out.extend_from_slice(b"<<<<<<< HEAD\n");
    out.extend_from_slice(current.unwrap_or_default());
    out.extend_from_slice(b"=======\n");
    out.extend_from_slice(given.unwrap_or_default());
    out.extend_from_slice(b">>>>>>>\n");

    Bytes::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn both_sides_present() {
        let merged = conflict_bytes(Some(b"m"), Some(b"o"));
        assert_eq!(&merged[..], b"<<<<<<< HEAD\nm=======\no>>>>>>>\n");
    }

    #[test]
    fn absent_side_contributes_empty_content() {
        let merged = conflict_bytes(None, Some(b"kept\n"));
        assert_eq!(&merged[..], b"<<<<<<< HEAD\n=======\nkept\n>>>>>>>\n");
    }

    #[test]
    fn trailing_newlines_are_not_invented() {
        let merged = conflict_bytes(Some(b"a\n"), Some(b"b\n"));
        assert_eq!(&merged[..], b"<<<<<<< HEAD\na\n=======\nb\n>>>>>>>\n");
    }
}
