//! # Audit Log
//!
//! JSONL append-only log: mỗi operation đã commit một dòng JSON,
//! files theo ngày: `<base>/2026-08-07.jsonl`. Sequence counter được
//! đọc lại từ files hiện có khi mở log.

use crate::error::PersistenceResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Loại operation được ghi vào audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// Manager tạo customer mới
    CustomerCreated,
    /// Manager xóa customer
    CustomerRemoved,
    /// Nạp tiền
    Deposit,
    /// Rút tiền (không phí)
    Withdrawal,
    /// Mua hàng (rút + phí tier)
    Purchase,
    /// Đăng nhập
    Login,
    /// Đăng xuất
    Logout,
}

impl AuditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditKind::CustomerCreated => "customer_created",
            AuditKind::CustomerRemoved => "customer_removed",
            AuditKind::Deposit => "deposit",
            AuditKind::Withdrawal => "withdrawal",
            AuditKind::Purchase => "purchase",
            AuditKind::Login => "login",
            AuditKind::Logout => "logout",
        }
    }
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Một dòng trong audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Sequence number, tăng dần qua mọi file
    pub seq: u64,
    /// Loại operation
    pub kind: AuditKind,
    /// Username thực hiện operation
    pub actor: String,
    /// Số tiền (None cho các operation không có tiền)
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
    /// Số dư sau operation
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub balance_after: Option<Decimal>,
    /// Thời điểm ghi
    pub at: DateTime<Utc>,
}

impl AuditEvent {
    /// Tạo event mới
    pub fn new(seq: u64, kind: AuditKind, actor: &str) -> Self {
        Self {
            seq,
            kind,
            actor: actor.to_string(),
            amount: None,
            balance_after: None,
            at: Utc::now(),
        }
    }

    /// Gắn số tiền
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Gắn số dư sau operation
    pub fn with_balance_after(mut self, balance: Decimal) -> Self {
        self.balance_after = Some(balance);
        self
    }
}

/// Audit log - ghi events vào files JSONL theo ngày.
pub struct AuditLog {
    /// Thư mục chứa audit files
    base_path: PathBuf,
    /// Counter cho sequence number
    seq: AtomicU64,
}

impl AuditLog {
    /// Mở audit log, đọc lại sequence counter từ files hiện có.
    pub fn new<P: AsRef<Path>>(base_path: P) -> PersistenceResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;

        let seq = Self::load_seq(&base_path)?;
        Ok(Self {
            base_path,
            seq: AtomicU64::new(seq),
        })
    }

    /// Trả về base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load sequence counter từ files hiện có
    fn load_seq(base_path: &Path) -> PersistenceResult<u64> {
        let mut max_seq: u64 = 0;

        if let Ok(entries) = fs::read_dir(base_path) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().map_or(false, |ext| ext == "jsonl") {
                    if let Ok(content) = fs::read_to_string(&path) {
                        for line in content.lines() {
                            if let Ok(event) = serde_json::from_str::<AuditEvent>(line) {
                                max_seq = max_seq.max(event.seq);
                            }
                        }
                    }
                }
            }
        }

        Ok(max_seq + 1)
    }

    /// Cấp sequence number mới
    pub fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst)
    }

    /// Ghi event vào file của ngày hiện tại.
    pub fn append(&self, event: &AuditEvent) -> PersistenceResult<()> {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let path = self.base_path.join(format!("{}.jsonl", date));
        let json = serde_json::to_string(event)?;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        Ok(())
    }

    /// Lấy tất cả audit files (sorted).
    pub fn list_files(&self) -> PersistenceResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "jsonl") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_append() {
        let dir = tempdir().unwrap();
        let log = AuditLog::new(dir.path()).unwrap();

        let event = AuditEvent::new(log.next_seq(), AuditKind::Deposit, "alice")
            .with_amount(dec!(100))
            .with_balance_after(dec!(600));
        log.append(&event).unwrap();

        let files = log.list_files().unwrap();
        assert_eq!(files.len(), 1);

        let content = fs::read_to_string(&files[0]).unwrap();
        assert!(content.contains("\"deposit\""));
        assert!(content.contains("\"alice\""));
        assert!(content.contains("\"600\""));
    }

    #[test]
    fn test_seq_counter() {
        let dir = tempdir().unwrap();
        let log = AuditLog::new(dir.path()).unwrap();

        assert_eq!(log.next_seq(), 1);
        assert_eq!(log.next_seq(), 2);
        assert_eq!(log.next_seq(), 3);
    }

    #[test]
    fn test_seq_counter_reloaded() {
        let dir = tempdir().unwrap();

        {
            let log = AuditLog::new(dir.path()).unwrap();
            let event = AuditEvent::new(log.next_seq(), AuditKind::Login, "admin");
            log.append(&event).unwrap();
            let event = AuditEvent::new(log.next_seq(), AuditKind::Logout, "admin");
            log.append(&event).unwrap();
        }

        // Mở lại - counter tiếp tục từ 3
        {
            let log = AuditLog::new(dir.path()).unwrap();
            assert_eq!(log.next_seq(), 3);
        }
    }

    #[test]
    fn test_events_without_amount_serialize_null() {
        let event = AuditEvent::new(1, AuditKind::Login, "admin");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"amount\":null"));

        let parsed: AuditEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.amount, None);
        assert_eq!(parsed.kind, AuditKind::Login);
    }
}
