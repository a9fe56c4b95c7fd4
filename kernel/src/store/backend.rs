// Line Storage Backends
//
// Defines where the lines of a record store live. The record store
// encodes and decodes; a backend only moves raw lines.
//
// Properties required from implementations:
// - Appends never reorder existing lines
// - Reads return lines oldest first and can be restarted
// - A replacement is all-or-nothing as far as the platform allows

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::StoreError;

/// Storage for an ordered sequence of text lines.
pub trait LineBackend {
    /// Iterator produced by [`LineBackend::read_lines`].
    type Lines: Iterator<Item = Result<String, StoreError>> + 'static;

    /// Append one line. `line` carries no terminator.
    fn append_line(&mut self, line: &str) -> Result<(), StoreError>;

    /// Read every line from the start.
    fn read_lines(&self) -> Result<Self::Lines, StoreError>;

    /// Replace the whole sequence with `lines`.
    fn replace_lines(&mut self, lines: &[String]) -> Result<(), StoreError>;

    /// Human-readable location, used in errors and logs.
    fn describe(&self) -> String;
}

/// Lines kept in a flat text file.
///
/// The file is opened and closed on every operation; no handle is held
/// between calls. A missing file reads as empty and is created on the
/// first append.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            location: self.describe(),
            source,
        }
    }

    fn fill(&self, tmp: &mut NamedTempFile, lines: &[String]) -> io::Result<()> {
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            for line in lines {
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        if let Ok(meta) = fs::metadata(&self.path) {
            if let Err(e) = fs::set_permissions(tmp.path(), meta.permissions()) {
                tracing::warn!(location = %self.describe(), error = %e, "could not carry over file permissions");
            }
        }
        Ok(())
    }

    /// Remove an unused temp file, logging if it cannot be removed.
    fn discard(&self, tmp: NamedTempFile) {
        let tmp_path = tmp.path().to_path_buf();
        if let Err(e) = tmp.close() {
            tracing::warn!(
                location = %self.describe(),
                temp = %tmp_path.display(),
                error = %e,
                "could not remove temp file"
            );
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl LineBackend for FileBackend {
    type Lines = FileLines;

    fn append_line(&mut self, line: &str) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        file.write_all(buf.as_bytes())
            .map_err(|e| self.io_error(e))
    }

    fn read_lines(&self) -> Result<Self::Lines, StoreError> {
        let inner = match File::open(&self.path) {
            Ok(file) => Some(BufReader::new(file).lines()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(self.io_error(e)),
        };

        Ok(FileLines {
            inner,
            location: self.describe(),
        })
    }

    fn replace_lines(&mut self, lines: &[String]) -> Result<(), StoreError> {
        // The temp file must share a filesystem with the target for the
        // final rename to be atomic.
        let mut tmp = NamedTempFile::new_in(self.parent_dir()).map_err(|e| self.io_error(e))?;

        if let Err(e) = self.fill(&mut tmp, lines) {
            self.discard(tmp);
            return Err(self.io_error(e));
        }

        match tmp.persist(&self.path) {
            Ok(_) => Ok(()),
            Err(e) => {
                self.discard(e.file);
                Err(self.io_error(e.error))
            }
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Lazy line reader over a [`FileBackend`].
#[derive(Debug)]
pub struct FileLines {
    inner: Option<io::Lines<BufReader<File>>>,
    location: String,
}

impl Iterator for FileLines {
    type Item = Result<String, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.inner.as_mut()?.next()?;
        Some(next.map_err(|source| StoreError::Io {
            location: self.location.clone(),
            source,
        }))
    }
}

/// Lines held in memory. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    lines: Vec<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing raw lines, malformed ones included.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl LineBackend for MemoryBackend {
    type Lines = std::vec::IntoIter<Result<String, StoreError>>;

    fn append_line(&mut self, line: &str) -> Result<(), StoreError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn read_lines(&self) -> Result<Self::Lines, StoreError> {
        let snapshot: Vec<_> = self.lines.iter().cloned().map(Ok).collect();
        Ok(snapshot.into_iter())
    }

    fn replace_lines(&mut self, lines: &[String]) -> Result<(), StoreError> {
        self.lines = lines.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(backend: &impl LineBackend) -> Vec<String> {
        backend
            .read_lines()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("absent.txt"));

        assert!(collect(&backend).is_empty());
    }

    #[test]
    fn append_creates_file_and_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        let mut backend = FileBackend::new(&path);

        backend.append_line("first").unwrap();
        backend.append_line("second").unwrap();

        assert_eq!(collect(&backend), vec!["first", "second"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn replace_swaps_contents_without_leaving_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt");
        let mut backend = FileBackend::new(&path);
        backend.append_line("a").unwrap();
        backend.append_line("b").unwrap();
        backend.append_line("c").unwrap();

        backend
            .replace_lines(&["a".to_string(), "c".to_string()])
            .unwrap();

        assert_eq!(collect(&backend), vec!["a", "c"]);
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn append_into_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("nope").join("lines.txt"));

        let err = backend.append_line("x").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn failed_replace_leaves_original_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let missing_parent = dir.path().join("gone").join("lines.txt");
        let mut backend = FileBackend::new(&missing_parent);

        assert!(backend.replace_lines(&["x".to_string()]).is_err());
        assert!(!missing_parent.exists());
    }

    #[test]
    fn failed_rename_removes_the_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "x").unwrap();
        let mut backend = FileBackend::new(&target);

        let err = backend.replace_lines(&["a".to_string()]).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("occupied")]);
    }

    #[test]
    fn memory_backend_round_trips_lines() {
        let mut backend = MemoryBackend::with_lines(["one"]);
        backend.append_line("two").unwrap();

        assert_eq!(collect(&backend), vec!["one", "two"]);

        backend.replace_lines(&[]).unwrap();
        assert!(backend.lines().is_empty());
    }
}
