//! # Audit sink
//!
//! Per-stage timings and the append-only record written after every successful
//! decode. Sinks are shared between request handlers, so every implementation
//! serializes its appends.
//!
//! 审计记录：仅在解码成功后追加，写入经过互斥锁串行化。
use crate::common::errors::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

/// CSV header matching the columns of [`AuditRecord::to_csv_row`].
pub const CSV_HEADER: &str = "kem_algorithm,signature_algorithm,encapsulation_time,encryption_time,client_hash_time,sign_time,server_hash_time,verify_time,decapsulation_time,decrypt_time";

/// 各阶段耗时（纳秒）
///
/// The encoder fills the client half and the decoder the server half.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageTimings {
    #[serde(default)]
    pub encapsulation_time: u64,
    #[serde(default)]
    pub encryption_time: u64,
    #[serde(default)]
    pub client_hash_time: u64,
    #[serde(default)]
    pub sign_time: u64,
    #[serde(default)]
    pub server_hash_time: u64,
    #[serde(default)]
    pub verify_time: u64,
    #[serde(default)]
    pub decapsulation_time: u64,
    #[serde(default)]
    pub decrypt_time: u64,
}

impl StageTimings {
    /// Keeps the client half of `self` and takes the server half from `server`.
    pub fn with_server_half(self, server: &StageTimings) -> Self {
        Self {
            server_hash_time: server.server_hash_time,
            verify_time: server.verify_time,
            decapsulation_time: server.decapsulation_time,
            decrypt_time: server.decrypt_time,
            ..self
        }
    }
}

/// Runs `f`, returning its output and the elapsed nanoseconds.
pub(crate) fn timed<T>(f: impl FnOnce() -> Result<T, Error>) -> Result<(T, u64), Error> {
    let start = Instant::now();
    let out = f()?;
    let nanos = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
    Ok((out, nanos))
}

/// 一条审计记录
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub kem_algorithm: String,
    pub signature_algorithm: String,
    pub timings: StageTimings,
}

impl AuditRecord {
    pub fn new(
        kem_algorithm: impl Into<String>,
        signature_algorithm: impl Into<String>,
        timings: StageTimings,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            kem_algorithm: kem_algorithm.into(),
            signature_algorithm: signature_algorithm.into(),
            timings,
        }
    }

    /// One CSV line, without the trailing newline.
    pub fn to_csv_row(&self) -> String {
        let t = &self.timings;
        format!(
            "{},{},{},{},{},{},{},{},{},{}",
            self.kem_algorithm,
            self.signature_algorithm,
            t.encapsulation_time,
            t.encryption_time,
            t.client_hash_time,
            t.sign_time,
            t.server_hash_time,
            t.verify_time,
            t.decapsulation_time,
            t.decrypt_time
        )
    }
}

/// 审计记录的追加目标
pub trait AuditSink: Send + Sync {
    fn append(&self, record: &AuditRecord) -> Result<(), Error>;
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, Error> {
    mutex
        .lock()
        .map_err(|_| Error::Io(io::Error::other("audit sink lock poisoned")))
}

struct CsvState<W> {
    writer: W,
    header_written: bool,
}

/// Appends records as CSV lines to any writer. One mutex guards the writer, so
/// each record lands as one whole line.
pub struct CsvAuditSink<W: Write + Send> {
    state: Mutex<CsvState<W>>,
}

impl<W: Write + Send> CsvAuditSink<W> {
    /// The header is written before the first record.
    pub fn new(writer: W) -> Self {
        Self {
            state: Mutex::new(CsvState {
                writer,
                header_written: false,
            }),
        }
    }

    /// Wraps a writer that already holds a header.
    pub fn continuing(writer: W) -> Self {
        Self {
            state: Mutex::new(CsvState {
                writer,
                header_written: true,
            }),
        }
    }

    pub fn into_inner(self) -> Result<W, Error> {
        self.state
            .into_inner()
            .map(|state| state.writer)
            .map_err(|_| Error::Io(io::Error::other("audit sink lock poisoned")))
    }
}

impl CsvAuditSink<File> {
    /// Opens `path` for appending; the header is written only when the file is empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata()?.len() == 0 {
            Ok(Self::new(file))
        } else {
            Ok(Self::continuing(file))
        }
    }
}

impl<W: Write + Send> AuditSink for CsvAuditSink<W> {
    fn append(&self, record: &AuditRecord) -> Result<(), Error> {
        let mut line = String::new();
        let mut state = lock(&self.state)?;
        if !state.header_written {
            line.push_str(CSV_HEADER);
            line.push('\n');
        }
        line.push_str(&record.to_csv_row());
        line.push('\n');

        state.writer.write_all(line.as_bytes())?;
        state.writer.flush()?;
        state.header_written = true;
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&self, record: &AuditRecord) -> Result<(), Error> {
        lock(&self.records)?.push(record.clone());
        Ok(())
    }
}
