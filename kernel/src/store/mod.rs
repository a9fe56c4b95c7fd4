// Record Store
//
// A durable, ordered sequence of delimited records. Supports append,
// lazy full scans, and rewriting the sequence minus matching records.
// Lines that do not decode are skipped by scans. Rewrites keep them
// verbatim unless the caller matches them on their raw fields.

pub mod backend;

use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;

use crate::record::{decode_line, encode_line, split_fields, Record};

pub use backend::{FileBackend, FileLines, LineBackend, MemoryBackend};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error on {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },
}

/// Typed view over a [`LineBackend`].
#[derive(Debug, Clone)]
pub struct RecordStore<T, B = FileBackend> {
    backend: B,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RecordStore<T, FileBackend> {
    /// File-backed store at `path`. Nothing is touched until first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(FileBackend::new(path))
    }
}

impl<T: Record, B: LineBackend> RecordStore<T, B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            _record: PhantomData,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// Append one record at the end of the store.
    pub fn append(&mut self, record: &T) -> Result<(), StoreError> {
        let line = encode_line(record);
        self.backend.append_line(&line)?;
        tracing::debug!(location = %self.backend.describe(), "appended record");
        Ok(())
    }

    /// Lazily decode every record, oldest first.
    ///
    /// Each call starts again from the beginning.
    pub fn scan(&self) -> Result<Scan<T, B::Lines>, StoreError> {
        Ok(Scan {
            lines: self.backend.read_lines()?,
            line_no: 0,
            location: self.backend.describe(),
            _record: PhantomData,
        })
    }

    /// Number of decodable records.
    pub fn len(&self) -> Result<usize, StoreError> {
        let mut count = 0;
        for record in self.scan()? {
            record?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Drop every record matching `predicate`, keeping the rest in order.
    ///
    /// Lines that do not decode are kept. Returns how many records were
    /// removed. The backing sequence is only replaced when at least one
    /// record matched.
    pub fn rewrite_excluding<F>(&mut self, predicate: F) -> Result<usize, StoreError>
    where
        F: FnMut(&T) -> bool,
    {
        self.rewrite_excluding_raw(predicate, |_| false)
    }

    /// Like [`RecordStore::rewrite_excluding`], but lines that do not
    /// decode are also dropped when `raw_predicate` matches their split
    /// fields. Those lines count towards the returned total.
    pub fn rewrite_excluding_raw<F, R>(
        &mut self,
        mut predicate: F,
        mut raw_predicate: R,
    ) -> Result<usize, StoreError>
    where
        F: FnMut(&T) -> bool,
        R: FnMut(&[&str]) -> bool,
    {
        let mut kept = Vec::new();
        let mut removed = 0;

        for line in self.backend.read_lines()? {
            let line = line?;
            let matched = match decode_line::<T>(&line) {
                Some(record) => predicate(&record),
                None => raw_predicate(&split_fields(&line)),
            };
            if matched {
                removed += 1;
            } else {
                kept.push(line);
            }
        }

        if removed > 0 {
            self.backend.replace_lines(&kept)?;
            tracing::debug!(
                location = %self.backend.describe(),
                removed,
                kept = kept.len(),
                "rewrote store"
            );
        }

        Ok(removed)
    }
}

/// Lazy decoder returned by [`RecordStore::scan`].
pub struct Scan<T, L> {
    lines: L,
    line_no: usize,
    location: String,
    _record: PhantomData<fn() -> T>,
}

impl<T, L> Iterator for Scan<T, L>
where
    T: Record,
    L: Iterator<Item = Result<String, StoreError>>,
{
    type Item = Result<T, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;

            match decode_line::<T>(&line) {
                Some(record) => return Some(Ok(record)),
                None => {
                    tracing::warn!(
                        location = %self.location,
                        line = self.line_no,
                        "skipping malformed record"
                    );
                }
            }
        }
    }
}
