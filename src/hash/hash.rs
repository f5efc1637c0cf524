// Hash computation module
// Provides the algorithm registry and chunked streaming computation

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::{CleanerError, Result};

/// Trait for hash algorithm implementations
pub trait Hasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the result
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Get the output size in bytes
    fn output_size(&self) -> usize;
}

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Blake3,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 7] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Blake3,
    ];

    /// Canonical lower-case name, as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            "sha224" | "sha-224" => Ok(HashAlgorithm::Sha224),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha384" | "sha-384" => Ok(HashAlgorithm::Sha384),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            "blake3" => Ok(HashAlgorithm::Blake3),
            _ => Err(CleanerError::UnsupportedAlgorithm {
                algorithm: s.to_string(),
            }),
        }
    }
}

/// Information about a hash algorithm
#[derive(Debug, Clone)]
pub struct AlgorithmInfo {
    pub name: String,
    pub output_bits: usize,
    /// False for algorithms kept only for compatibility with existing digests
    pub collision_resistant: bool,
}

// Every RustCrypto digest shares the same Digest trait, so one wrapper covers them
pub struct DigestWrapper<D>(D);

impl<D: Digest + Send> Hasher for DigestWrapper<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.0).to_vec()
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

// BLAKE3 wrapper
pub struct Blake3Wrapper(blake3::Hasher);

impl Hasher for Blake3Wrapper {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        32 // 256 bits
    }
}

/// Registry for hash algorithms
pub struct HashRegistry;

impl HashRegistry {
    /// Get a hasher instance for the specified algorithm
    pub fn get_hasher(algorithm: HashAlgorithm) -> Box<dyn Hasher> {
        match algorithm {
            HashAlgorithm::Md5 => Box::new(DigestWrapper(Md5::new())),
            HashAlgorithm::Sha1 => Box::new(DigestWrapper(Sha1::new())),
            HashAlgorithm::Sha224 => Box::new(DigestWrapper(Sha224::new())),
            HashAlgorithm::Sha256 => Box::new(DigestWrapper(Sha256::new())),
            HashAlgorithm::Sha384 => Box::new(DigestWrapper(Sha384::new())),
            HashAlgorithm::Sha512 => Box::new(DigestWrapper(Sha512::new())),
            HashAlgorithm::Blake3 => Box::new(Blake3Wrapper(blake3::Hasher::new())),
        }
    }

    /// List all available hash algorithms
    pub fn list_algorithms() -> Vec<AlgorithmInfo> {
        HashAlgorithm::ALL
            .iter()
            .map(|&algorithm| AlgorithmInfo {
                name: algorithm.name().to_string(),
                output_bits: Self::get_hasher(algorithm).output_size() * 8,
                collision_resistant: !matches!(algorithm, HashAlgorithm::Md5 | HashAlgorithm::Sha1),
            })
            .collect()
    }
}

/// Result of a hash computation
#[derive(Debug, Clone)]
pub struct HashResult {
    pub algorithm: HashAlgorithm,
    pub hash: String, // hex-encoded
    pub file_path: PathBuf,
}

/// Default read chunk size (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Hash computer with streaming I/O
///
/// Files are always read in `buffer_size` chunks, so memory use stays flat
/// regardless of file size.
pub struct HashComputer {
    buffer_size: usize,
}

impl HashComputer {
    /// Create a new HashComputer with the default buffer size
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Create a new HashComputer with custom buffer size
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Compute hash for a single file
    pub fn compute_hash(&self, path: &Path, algorithm: HashAlgorithm) -> Result<HashResult> {
        let mut results = self.compute_multiple_hashes(path, &[algorithm])?;
        // One algorithm in, one result out
        Ok(results.remove(0))
    }

    /// Compute multiple hashes for a single file in a single pass
    pub fn compute_multiple_hashes(
        &self,
        path: &Path,
        algorithms: &[HashAlgorithm],
    ) -> Result<Vec<HashResult>> {
        let file = File::open(path)
            .map_err(|e| CleanerError::from_io_error(e, "reading", Some(path.to_path_buf())))?;

        let digests = self.hash_reader(file, algorithms, path)?;

        Ok(algorithms
            .iter()
            .zip(digests)
            .map(|(&algorithm, hash)| HashResult {
                algorithm,
                hash,
                file_path: path.to_path_buf(),
            })
            .collect())
    }

    /// Stream any reader through the requested hashers, returning hex digests
    /// in the same order as `algorithms`
    pub fn hash_reader<R: Read>(
        &self,
        mut reader: R,
        algorithms: &[HashAlgorithm],
        path: &Path,
    ) -> Result<Vec<String>> {
        let mut hashers: Vec<Box<dyn Hasher>> = algorithms
            .iter()
            .map(|&algorithm| HashRegistry::get_hasher(algorithm))
            .collect();

        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| CleanerError::from_io_error(e, "reading", Some(path.to_path_buf())))?;
            if bytes_read == 0 {
                break;
            }

            for hasher in hashers.iter_mut() {
                hasher.update(&buffer[..bytes_read]);
            }
        }

        Ok(hashers
            .into_iter()
            .map(|hasher| bytes_to_hex(&hasher.finalize()))
            .collect())
    }
}

impl Default for HashComputer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert bytes to hexadecimal string
fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn digest_of(data: &[u8], algorithm: HashAlgorithm) -> String {
        HashComputer::new()
            .hash_reader(Cursor::new(data), &[algorithm], Path::new("<memory>"))
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(digest_of(b"", HashAlgorithm::Md5), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            digest_of(b"abc", HashAlgorithm::Sha1),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            digest_of(b"hello world", HashAlgorithm::Sha256),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_chunk_size_does_not_change_digest() {
        let data = vec![b'x'; 10_000];
        let whole = digest_of(&data, HashAlgorithm::Sha1);
        let chunked = HashComputer::with_buffer_size(7)
            .hash_reader(Cursor::new(&data), &[HashAlgorithm::Sha1], Path::new("<memory>"))
            .unwrap()
            .remove(0);
        assert_eq!(whole, chunked);
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("MD5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("sha-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("blake3".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Blake3);
        assert!(matches!(
            "whirlpool".parse::<HashAlgorithm>(),
            Err(CleanerError::UnsupportedAlgorithm { .. })
        ));
    }

    #[test]
    fn test_list_algorithms_reports_output_bits() {
        let list = HashRegistry::list_algorithms();
        assert_eq!(list.len(), HashAlgorithm::ALL.len());

        let md5 = list.iter().find(|info| info.name == "md5").unwrap();
        assert_eq!(md5.output_bits, 128);
        assert!(!md5.collision_resistant);

        let sha512 = list.iter().find(|info| info.name == "sha512").unwrap();
        assert_eq!(sha512.output_bits, 512);
        assert!(sha512.collision_resistant);
    }
}
