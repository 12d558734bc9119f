//! Object persistence
//!
//! Values are written through `serde` inside a small versioned envelope
//! (see [`envelope`]). The binary payload is `bincode` with its standard
//! configuration; the JSON payload is `serde_json`. Files are only readable
//! by this crate: there is no compatibility with other object formats.
//!
//! Writes go to a uniquely named temporary file in the target's directory
//! that is then renamed over the target, so a failed write leaves any
//! previous file intact and never touches other files.

pub mod envelope;

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Payload encoding inside an object file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFormat {
    #[default]
    Binary,
    Json,
}

impl ObjectFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectFormat::Binary => "binary",
            ObjectFormat::Json => "json",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "binary" | "bin" => Some(ObjectFormat::Binary),
            "json" => Some(ObjectFormat::Json),
            _ => None,
        }
    }

    /// Header byte identifying this format
    pub fn tag(&self) -> u8 {
        match self {
            ObjectFormat::Binary => 0,
            ObjectFormat::Json => 1,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ObjectFormat::Binary),
            1 => Some(ObjectFormat::Json),
            _ => None,
        }
    }
}

fn encode<T: Serialize + ?Sized>(obj: &T, format: ObjectFormat, path: &Path) -> Result<Vec<u8>> {
    match format {
        ObjectFormat::Binary => bincode::serde::encode_to_vec(obj, bincode::config::standard())
            .map_err(|e| Error::serialization(path, e)),
        ObjectFormat::Json => serde_json::to_vec(obj).map_err(|e| Error::serialization(path, e)),
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8], format: ObjectFormat, path: &Path) -> Result<T> {
    match format {
        ObjectFormat::Binary => {
            let (value, read) =
                bincode::serde::decode_from_slice(payload, bincode::config::standard())
                    .map_err(|e| Error::serialization(path, e))?;
            if read != payload.len() {
                return Err(Error::serialization(
                    path,
                    format!("{} trailing bytes after payload", payload.len() - read),
                ));
            }
            Ok(value)
        }
        ObjectFormat::Json => {
            serde_json::from_slice(payload).map_err(|e| Error::serialization(path, e))
        }
    }
}

/// Write `bytes` to a fresh temporary file beside `path`, then rename it into place
fn write_replacing(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write `obj` to `path` in the default binary format
pub fn serialize_to_file<T: Serialize + ?Sized>(obj: &T, path: impl AsRef<Path>) -> Result<()> {
    serialize_to_file_with(obj, path, ObjectFormat::default())
}

/// Write `obj` to `path` in `format`
pub fn serialize_to_file_with<T: Serialize + ?Sized>(
    obj: &T,
    path: impl AsRef<Path>,
    format: ObjectFormat,
) -> Result<()> {
    let path = path.as_ref();
    let payload = encode(obj, format, path)?;
    let bytes = envelope::wrap(format, &payload);

    write_replacing(path, &bytes).map_err(|e| Error::io(path, e))?;

    log::debug!(
        "Serialized {} bytes ({}) to {}",
        bytes.len(),
        format.as_str(),
        path.display()
    );
    Ok(())
}

/// Read a value previously written by [`serialize_to_file`]
pub fn deserialize_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::io_or_not_found(path, e))?;
    let (format, payload) = envelope::unwrap(&bytes).map_err(|e| Error::serialization(path, e))?;
    log::debug!(
        "Deserializing {} payload from {}",
        format.as_str(),
        path.display()
    );
    decode(payload, format, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        score: u64,
        tags: Vec<String>,
        parent: Option<Box<Entry>>,
    }

    fn sample() -> Entry {
        Entry {
            name: "child".to_string(),
            score: 42,
            tags: vec!["a".to_string(), "b".to_string()],
            parent: Some(Box::new(Entry {
                name: "root".to_string(),
                score: u64::MAX,
                tags: Vec::new(),
                parent: None,
            })),
        }
    }

    #[test]
    fn test_binary_round_trip() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("entry.bin");
        serialize_to_file(&sample(), &path).unwrap();
        assert_eq!(deserialize_from_file::<Entry>(&path).unwrap(), sample());

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, ["entry.bin"]);
    }

    #[test]
    fn test_sibling_tmp_file_is_untouched() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("state.bin");
        let sibling = dir.path().join("state.bin.tmp");
        std::fs::write(&sibling, "user data").unwrap();

        serialize_to_file(&3u16, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&sibling).unwrap(), "user data");
        assert_eq!(deserialize_from_file::<u16>(&path).unwrap(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("map.obj");
        let mut map = BTreeMap::new();
        map.insert("x".to_string(), vec![1.5f64, -2.0]);
        serialize_to_file_with(&map, &path, ObjectFormat::Json).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes[5], ObjectFormat::Json.tag());
        assert_eq!(
            deserialize_from_file::<BTreeMap<String, Vec<f64>>>(&path).unwrap(),
            map
        );
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("n.bin");
        serialize_to_file(&1u32, &path).unwrap();
        serialize_to_file(&2u32, &path).unwrap();
        assert_eq!(deserialize_from_file::<u32>(&path).unwrap(), 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let err = deserialize_from_file::<u32>(dir.path().join("missing.bin")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_foreign_file_is_rejected() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("plain.txt");
        std::fs::write(&path, "just some text").unwrap();
        let err = deserialize_from_file::<String>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("padded.bin");
        serialize_to_file(&7u8, &path).unwrap();
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.push(0);
        std::fs::write(&path, bytes).unwrap();

        let err = deserialize_from_file::<u8>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("no-such-dir").join("x.bin");
        let err = serialize_to_file(&1u8, &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ObjectFormat::from_name("JSON"), Some(ObjectFormat::Json));
        assert_eq!(ObjectFormat::from_name("bin"), Some(ObjectFormat::Binary));
        assert_eq!(ObjectFormat::from_name("xml"), None);
        for format in [ObjectFormat::Binary, ObjectFormat::Json] {
            assert_eq!(ObjectFormat::from_tag(format.tag()), Some(format));
            assert_eq!(ObjectFormat::from_name(format.as_str()), Some(format));
        }
    }
}
