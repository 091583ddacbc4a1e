//! MD5 digests as used by the 2016 puzzles

use md5::{Digest, Md5};

/// Lowercase hex MD5 of `data`
pub fn md5_hex(data: impl AsRef<[u8]>) -> String {
    format!("{:x}", Md5::digest(data.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digests() {
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(&md5_hex("hijkl")[..4], "ced9");
    }
}
