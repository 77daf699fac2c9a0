//! Command implementations for OxiHuff CLI.

pub mod codes;
pub mod compress;
pub mod decompress;
pub mod inspect;
pub mod playground;

pub use codes::cmd_codes;
pub use compress::{CompressOptions, cmd_compress};
pub use decompress::{DecompressOptions, cmd_decompress};
pub use inspect::cmd_inspect;
pub use playground::cmd_playground;
