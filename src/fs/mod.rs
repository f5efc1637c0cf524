pub mod copy;
pub mod info;
pub mod mime;
pub mod types;

pub use copy::copy_preserving;
pub use info::inspect;
pub use types::FileDescriptor;
