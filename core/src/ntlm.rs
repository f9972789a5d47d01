use digest::{generic_array::GenericArray, Digest, OutputSizeUser};
use md4::Md4;

/// UTF-16LE encodes a password.
/// Invalid UTF-8 sequences are replaced before encoding.
#[inline]
fn utf16_le(password: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(password)
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// Hashes a password using NTLM.
#[inline]
pub fn ntlm(password: &[u8]) -> GenericArray<u8, <Md4 as OutputSizeUser>::OutputSize> {
    Md4::digest(utf16_le(password))
}

#[cfg(test)]
mod tests {
    use crate::ntlm::{ntlm, utf16_le};

    #[test]
    fn test_utf16_le() {
        assert_eq!(vec![b'a', 0, b'b', 0], utf16_le(b"ab"));
        assert_eq!(vec![0xe9, 0], utf16_le("é".as_bytes()));
    }

    #[test]
    fn test_ntlm() {
        let expected = [
            0x88u8, 0x46, 0xF7, 0xEA, 0xEE, 0x8F, 0xB1, 0x17, 0xAD, 0x06, 0xBD, 0xD8, 0x30, 0xB7,
            0x58, 0x6C,
        ];
        let actual = ntlm(b"password");
        assert_eq!(expected, actual.as_slice());
    }
}
