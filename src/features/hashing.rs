use crate::error::{Result, ToolkitError};
use md5::Md5;
use sha2::{Digest, Sha256, Sha512};
use sha3::Sha3_256;

/// Supported digests and checksums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
    Sha3_256,
    Md5,
    Crc32,
    Adler32,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Md5,
        HashAlgorithm::Crc32,
        HashAlgorithm::Adler32,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha512 => "SHA-512",
            HashAlgorithm::Sha3_256 => "SHA-3",
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Crc32 => "CRC32",
            HashAlgorithm::Adler32 => "Adler-32",
        }
    }

    /// Checksums refuse empty input instead of returning the empty-string value.
    pub fn rejects_empty(&self) -> bool {
        matches!(
            self,
            HashAlgorithm::Md5 | HashAlgorithm::Crc32 | HashAlgorithm::Adler32
        )
    }
}

const ADLER_MOD: u32 = 65_521;

fn adler32(data: &[u8]) -> u32 {
    let (mut a, mut b) = (1u32, 0u32);
    // 5552 is the longest run before `b` can overflow
    for chunk in data.chunks(5552) {
        for &byte in chunk {
            a += byte as u32;
            b += a;
        }
        a %= ADLER_MOD;
        b %= ADLER_MOD;
    }
    (b << 16) | a
}

/// Compute the digest of `data`. Checksums come back big-endian.
pub fn hash(data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        HashAlgorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
        HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
        HashAlgorithm::Crc32 => {
            let crc = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
            crc.checksum(data).to_be_bytes().to_vec()
        }
        HashAlgorithm::Adler32 => adler32(data).to_be_bytes().to_vec(),
    }
}

/// Lowercase hex digest of the UTF-8 bytes of `text`.
pub fn hash_text(text: &str, algorithm: HashAlgorithm) -> Result<String> {
    if text.is_empty() && algorithm.rejects_empty() {
        return Err(ToolkitError::empty(&format!("{} input", algorithm.id())));
    }
    Ok(hex::encode(hash(text.as_bytes(), algorithm)))
}
