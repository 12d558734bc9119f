//! Commons Util - small collection and file-system helpers
//!
//! Core modules:
//! - `collection`: Blankness checks, joining, random/last element access, console dump
//! - `file`: Line/byte/string reading, name and extension parsing, copy-number file names
//! - `persistence`: Object serialization to/from files (versioned envelope)
//! - `settings`: Configurable defaults
//! - `error`: Crate error type

pub mod collection;
pub mod error;
pub mod file;
pub mod persistence;
pub mod settings;

pub use error::{Error, ErrorKind, Result};
pub use persistence::{ObjectFormat, deserialize_from_file, serialize_to_file};
pub use settings::Settings;

/// Crate-wide constants
pub mod consts {
    /// Separator used when joining collection contents and none is given
    pub const DEFAULT_DELIMITER: &str = ",";

    /// Leading bytes of every object file
    pub const ENVELOPE_MAGIC: [u8; 4] = *b"CUOB";
    /// Current object file layout version
    pub const ENVELOPE_VERSION: u8 = 1;
}
