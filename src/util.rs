/// Byte-wise string equality usable in `const` context.
pub const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Returns true if any byte of `s` is one of `needles`.
pub const fn contains_any(s: &str, needles: &[u8]) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let mut j = 0;
        while j < needles.len() {
            if bytes[i] == needles[j] {
                return true;
            }
            j += 1;
        }
        i += 1;
    }
    false
}

pub const fn starts_or_ends_with(s: &str, byte: u8) -> bool {
    let bytes = s.as_bytes();
    !bytes.is_empty() && (bytes[0] == byte || bytes[bytes.len() - 1] == byte)
}
