use core::ffi::CStr;
use heapless::Vec;

use crate::constants::TLS_BUFFER_MAX;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    BufferOverflow,
    InteriorNul,
}

// Copies `pem` without its surrounding newlines into `buffer` and NUL-terminates it.
// TOML multi-line strings usually carry a leading and trailing newline.
pub fn write_trimmed_c_str<'buf>(pem: &str, buffer: &'buf mut [u8]) -> Result<&'buf CStr, Error> {
    let pem = pem.trim_matches('\n').as_bytes();
    let out = buffer.get_mut(..=pem.len()).ok_or(Error::BufferOverflow)?;

    let (body, nul) = out.split_at_mut(pem.len());
    body.copy_from_slice(pem);
    nul[0] = 0;

    CStr::from_bytes_with_nul(out).map_err(|_| Error::InteriorNul)
}

// Same as `write_trimmed_c_str`, but into an owned `TLS_BUFFER_MAX` vector.
pub fn build_trimmed_c_str_vec(s: &str) -> Result<Vec<u8, TLS_BUFFER_MAX>, Error> {
    let trimmed = s.trim_matches('\n');
    if trimmed.as_bytes().contains(&0) {
        return Err(Error::InteriorNul);
    }

    let mut buf: Vec<u8, TLS_BUFFER_MAX> = Vec::new();
    buf.extend_from_slice(trimmed.as_bytes())
        .map_err(|_| Error::BufferOverflow)?;
    buf.push(0).map_err(|_| Error::BufferOverflow)?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PEM: &str = "\n-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";

    #[test]
    fn writes_trimmed_pem() {
        let mut buffer = [0u8; 128];
        let c_str = write_trimmed_c_str(PEM, &mut buffer).unwrap();
        assert_eq!(
            c_str.to_bytes(),
            b"-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----"
        );
    }

    #[test]
    fn rejects_small_buffer() {
        let mut buffer = [0u8; 4];
        assert_eq!(write_trimmed_c_str("abcd", &mut buffer), Err(Error::BufferOverflow));
        assert!(write_trimmed_c_str("abc", &mut buffer).is_ok());
    }

    #[test]
    fn rejects_interior_nul() {
        let mut buffer = [0u8; 16];
        assert_eq!(write_trimmed_c_str("ab\0cd", &mut buffer), Err(Error::InteriorNul));
        assert_eq!(build_trimmed_c_str_vec("ab\0cd"), Err(Error::InteriorNul));
    }

    #[test]
    fn vec_is_nul_terminated() {
        let buf = build_trimmed_c_str_vec(PEM).unwrap();
        assert_eq!(buf.last(), Some(&0));
        assert_eq!(buf.len(), PEM.trim_matches('\n').len() + 1);
    }

    #[test]
    fn vec_rejects_oversized_pem() {
        let mut big: heapless::String<{ TLS_BUFFER_MAX + 1 }> = heapless::String::new();
        for _ in 0..TLS_BUFFER_MAX {
            big.push('A').unwrap();
        }
        assert_eq!(build_trimmed_c_str_vec(&big), Err(Error::BufferOverflow));
    }
}
