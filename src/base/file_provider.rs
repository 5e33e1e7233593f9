use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
};

use super::Error;

/// A trait for providing file contents.
pub trait FileProvider {
    /// Reads the contents of the file at the given path as bytes.
    ///
    /// # Errors
    /// - If an error occurs while reading the file.
    /// - If the file does not exist.
    fn read_bytes<P: AsRef<Path>>(&self, path: P) -> Result<Cow<[u8]>, Error>;

    /// Reads the contents of the file at the given path.
    ///
    /// Byte sequences that are not valid UTF-8 are replaced with `U+FFFD`, which the lexer
    /// reports as unrecognized tokens.
    ///
    /// # Errors
    /// - If an error occurs while reading the file.
    /// - If the file does not exist.
    fn read_str<P: AsRef<Path>>(&self, path: P) -> Result<Cow<str>, Error> {
        Ok(match self.read_bytes(path)? {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => Cow::Owned(String::from_utf8(bytes).unwrap_or_else(|err| {
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            })),
        })
    }
}

fn io_error(path: &Path, message: impl ToString) -> Error {
    Error::IoError {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Provides file contents from the file system.
#[cfg(feature = "fs_access")]
#[derive(Debug, Clone)]
pub struct FsProvider {
    /// The root directory to base paths off of.
    root: PathBuf,
}

#[cfg(feature = "fs_access")]
impl Default for FsProvider {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

#[cfg(feature = "fs_access")]
impl<P> From<P> for FsProvider
where
    P: Into<PathBuf>,
{
    fn from(root: P) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(feature = "fs_access")]
impl FileProvider for FsProvider {
    fn read_bytes<P: AsRef<Path>>(&self, path: P) -> Result<Cow<[u8]>, Error> {
        let full_path = self.root.join(path);
        std::fs::read(&full_path)
            .map(Cow::Owned)
            .map_err(|err| io_error(&full_path, err))
    }
}

/// Provides file contents from an in-memory map of paths to raw sources.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryProvider {
    /// Creates an empty [`MemoryProvider`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content, replacing any previous content.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }
}

impl FileProvider for MemoryProvider {
    fn read_bytes<P: AsRef<Path>>(&self, path: P) -> Result<Cow<[u8]>, Error> {
        let path = path.as_ref();
        self.files
            .get(path)
            .map(|content| Cow::Borrowed(content.as_slice()))
            .ok_or_else(|| io_error(path, "File not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider() {
        let mut provider = MemoryProvider::new();
        provider.add_file("main.sic", "void main() {}");
        provider.add_file("nested/other.sic", "int x;");

        assert_eq!(
            provider.read_str("main.sic").unwrap().into_owned(),
            "void main() {}".to_string()
        );
        assert_eq!(
            provider.read_bytes("nested/other.sic").unwrap().into_owned(),
            b"int x;".to_vec()
        );
        assert!(matches!(
            provider.read_str("nonexistent.sic"),
            Err(Error::IoError { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut provider = MemoryProvider::new();
        provider.add_file("latin1.sic", b"// caf\xE9\nint x;".as_slice());

        let content = provider.read_str("latin1.sic").unwrap();
        assert_eq!(content, "// caf\u{FFFD}\nint x;");
    }

    #[cfg(feature = "fs_access")]
    #[test]
    fn test_fs_provider_reads_invalid_utf8() {
        let dir = std::env::temp_dir().join(format!("simple-compiler-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("latin1.sic"), b"x = \xFF;").unwrap();

        let provider = FsProvider::from(&dir);
        let content = provider.read_str("latin1.sic").unwrap().into_owned();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(content, "x = \u{FFFD};");
    }

    #[cfg(feature = "fs_access")]
    #[test]
    fn test_fs_provider_missing_file() {
        let provider = FsProvider::from("/definitely/not/a/real/dir");
        let err = provider.read_str("missing.sic").unwrap_err();
        assert!(err.to_string().starts_with("Could not open: "));
    }
}
