// Hashing
// Streaming digest computation over a fixed set of algorithms

pub mod hash;

pub use hash::{
    AlgorithmInfo, HashAlgorithm, HashComputer, HashRegistry, HashResult, Hasher,
    DEFAULT_BUFFER_SIZE,
};
