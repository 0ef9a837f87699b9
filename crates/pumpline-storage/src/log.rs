//! Resumable newline-delimited log with a byte-offset checkpoint sidecar.
//!
//! A [`TextLog`] names two files: the append-only data file and a `<path>.pos`
//! sidecar holding the next-unread byte offset as ASCII decimal. A
//! [`LogReader`] resumes from the committed offset after a restart; a
//! [`LogWriter`] appends delimiter-terminated records. The reader's
//! checkpoint only ever advances past complete lines, so a commit can never
//! cover a partially appended record.
//!
//! At most one reader may use a sidecar at a time; concurrent readers race
//! on the persisted offset. Multiple writers are safe only where the file
//! system guarantees atomic appends.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use pumpline_core::{PumpError, Result, Sink, Source};

const DELIMITER: u8 = b'\n';
const SIDECAR_SUFFIX: &str = ".pos";

/// Bounded wait for a trailing record that has not yet received its
/// delimiter (a concurrent writer mid-append).
///
/// After `attempts` polls of `delay` each, the reader gives up: completed
/// lines already collected are returned, and a read with nothing to return
/// fails with [`PumpError::IncompleteRecord`] instead of stalling forever.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_millis(50),
        }
    }
}

/// A newline-delimited record log plus its checkpoint sidecar.
#[derive(Debug, Clone)]
pub struct TextLog {
    path: PathBuf,
    poll: PollPolicy,
}

impl TextLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll: PollPolicy::default(),
        }
    }

    /// Override the partial-line poll policy for readers of this log.
    #[must_use]
    pub fn poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the checkpoint sidecar file.
    #[must_use]
    pub fn sidecar_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }

    /// Open a reader resuming at the committed offset.
    ///
    /// Creates the sidecar if absent (offset 0). The data file must exist.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Io`] if either file cannot be opened and
    /// [`PumpError::CorruptCheckpoint`] if the sidecar content does not
    /// parse as a non-negative decimal offset.
    pub fn open_reader(&self) -> Result<LogReader> {
        let sidecar_path = self.sidecar_path();
        let mut sidecar = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&sidecar_path)?;

        let mut content = String::new();
        sidecar.read_to_string(&mut content)?;
        let trimmed = content.trim_end();
        let position = if trimmed.is_empty() {
            0
        } else {
            trimmed
                .parse::<u64>()
                .map_err(|err| PumpError::CorruptCheckpoint {
                    path: sidecar_path.clone(),
                    reason: err.to_string(),
                })?
        };

        let mut file = OpenOptions::new().read(true).open(&self.path)?;
        file.seek(SeekFrom::Start(position))?;

        tracing::debug!(path = %self.path.display(), offset = position, "log reader opened");

        Ok(LogReader {
            data: BufReader::new(file),
            sidecar,
            sidecar_path,
            path: self.path.clone(),
            position,
            pending: Vec::new(),
            poll: self.poll,
        })
    }

    /// Open a writer positioned at end-of-file, creating the data file if
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Io`] if the data file cannot be opened.
    pub fn open_writer(&self) -> Result<LogWriter> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        tracing::debug!(path = %self.path.display(), "log writer opened");
        Ok(LogWriter { file })
    }
}

/// File-backed [`Source<String>`] resuming from a persisted byte offset.
///
/// Exclusively owns its data and sidecar handles until [`close`](Self::close).
#[derive(Debug)]
pub struct LogReader {
    data: BufReader<File>,
    sidecar: File,
    sidecar_path: PathBuf,
    path: PathBuf,
    /// Byte offset of the first unread complete line. Never includes a
    /// partially read trailing record.
    position: u64,
    /// Bytes of an undelimited trailing line carried across calls.
    pending: Vec<u8>,
    poll: PollPolicy,
}

impl LogReader {
    /// Byte offset the next commit would persist.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read the next complete line, polling per [`PollPolicy`] when the
    /// file ends in an undelimited partial record.
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut polls = 0u32;
        loop {
            let read = self.data.read_until(DELIMITER, &mut self.pending)?;

            if self.pending.last() == Some(&DELIMITER) {
                self.pending.pop();
                let bytes = std::mem::take(&mut self.pending);
                let consumed = bytes.len() as u64 + 1;
                let line = String::from_utf8(bytes).map_err(|err| PumpError::Utf8 {
                    offset: self.position,
                    source: err,
                })?;
                self.position += consumed;
                return Ok(Some(line));
            }

            if read == 0 && self.pending.is_empty() {
                return Ok(None);
            }

            // End-of-file inside a record: a writer may still be appending.
            // Wait for it rather than returning a truncated line, but only
            // within the poll budget.
            polls += 1;
            if polls > self.poll.attempts {
                return Err(PumpError::IncompleteRecord {
                    path: self.path.clone(),
                    offset: self.position,
                    attempts: self.poll.attempts,
                });
            }
            std::thread::sleep(self.poll.delay);
        }
    }

    /// Release both file handles, surfacing the first failure while still
    /// attempting every release.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Io`] if the sidecar handle fails to flush on
    /// release.
    pub fn close(self) -> Result<()> {
        let LogReader { data, sidecar, .. } = self;
        let flushed = sidecar.sync_all();
        drop(sidecar);
        drop(data);
        flushed.map_err(PumpError::from)
    }
}

impl Source<String> for LogReader {
    fn read(&mut self, count: usize) -> Result<Option<Vec<String>>> {
        let mut lines = Vec::new();
        let mut end_of_stream = false;

        while lines.len() < count {
            match self.next_line() {
                Ok(Some(line)) => lines.push(line),
                Ok(None) => {
                    end_of_stream = true;
                    break;
                }
                Err(PumpError::IncompleteRecord { offset, attempts, .. })
                    if !lines.is_empty() =>
                {
                    // Hand back what completed; the partial tail stays
                    // buffered and the next read retries it.
                    tracing::warn!(
                        path = %self.path.display(),
                        offset,
                        attempts,
                        "trailing record still incomplete, returning completed lines"
                    );
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        if lines.is_empty() && end_of_stream {
            Ok(None)
        } else {
            Ok(Some(lines))
        }
    }

    fn commit(&mut self) -> Result<()> {
        let digits = self.position.to_string();
        self.sidecar.seek(SeekFrom::Start(0))?;
        self.sidecar.write_all(digits.as_bytes())?;
        // Shorter offsets must not leave stale trailing digits behind.
        self.sidecar.set_len(digits.len() as u64)?;
        self.sidecar.sync_all()?;
        tracing::debug!(
            path = %self.sidecar_path.display(),
            offset = self.position,
            "checkpoint committed"
        );
        Ok(())
    }
}

/// File-backed [`Sink<String>`] appending delimiter-terminated records.
///
/// Records must not contain the delimiter; a record with an embedded
/// newline would be read back as multiple records.
pub struct LogWriter {
    file: File,
}

impl LogWriter {
    /// Release the data handle, flushing it first.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Io`] if the flush fails.
    pub fn close(self) -> Result<()> {
        let LogWriter { file } = self;
        let flushed = file.sync_all();
        drop(file);
        flushed.map_err(PumpError::from)
    }
}

impl Sink<String> for LogWriter {
    fn write(&mut self, records: Vec<String>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut buf = Vec::with_capacity(records.iter().map(|r| r.len() + 1).sum());
        for record in &records {
            buf.extend_from_slice(record.as_bytes());
            buf.push(DELIMITER);
        }
        // One append per batch: the whole batch lands or none of it does.
        self.file.write_all(&buf)?;
        tracing::trace!(records = records.len(), bytes = buf.len(), "batch appended");
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
