//! # Customer Store
//!
//! File-per-customer store: mỗi customer một file JSON trong
//! `<base>/customers/`, manager record trong `<base>/admin/`.
//! Mọi lần persist ghi lại toàn bộ record.

use crate::error::{PersistenceError, PersistenceResult};
use crate::record::{AdminRecord, CustomerRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Store cho customer records và admin record.
pub struct CustomerStore {
    /// Thư mục chứa customer records
    customers_dir: PathBuf,
    /// Thư mục chứa admin record
    admin_dir: PathBuf,
}

impl CustomerStore {
    /// Mở store tại `base_path`, tạo các thư mục nếu chưa có.
    pub fn new<P: AsRef<Path>>(base_path: P) -> PersistenceResult<Self> {
        let base = base_path.as_ref();
        let customers_dir = base.join("customers");
        let admin_dir = base.join("admin");

        fs::create_dir_all(&customers_dir)?;
        fs::create_dir_all(&admin_dir)?;

        Ok(Self {
            customers_dir,
            admin_dir,
        })
    }

    fn customer_path(&self, username: &str) -> PathBuf {
        self.customers_dir.join(format!("{}.json", username))
    }

    /// Ghi record của một customer - toàn bộ file được viết lại.
    pub fn persist(&self, record: &CustomerRecord) -> PersistenceResult<()> {
        write_json(&self.customer_path(&record.username), record)
    }

    /// Đọc record theo username.
    pub fn load(&self, username: &str) -> PersistenceResult<CustomerRecord> {
        let path = self.customer_path(username);
        if !path.exists() {
            return Err(PersistenceError::not_found("customer", username));
        }
        read_json(&path, username)
    }

    /// Xóa record của một customer.
    pub fn erase(&self, username: &str) -> PersistenceResult<()> {
        let path = self.customer_path(username);
        if !path.exists() {
            return Err(PersistenceError::not_found("customer", username));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Kiểm tra record có tồn tại không.
    pub fn exists(&self, username: &str) -> bool {
        self.customer_path(username).exists()
    }

    /// Liệt kê usernames của tất cả records đã lưu (sorted).
    pub fn list_usernames(&self) -> PersistenceResult<Vec<String>> {
        let mut usernames = Vec::new();

        for entry in fs::read_dir(&self.customers_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    usernames.push(stem.to_string());
                }
            }
        }

        usernames.sort();
        Ok(usernames)
    }

    /// Ghi record của manager.
    pub fn persist_admin(&self, record: &AdminRecord) -> PersistenceResult<()> {
        write_json(&self.admin_dir.join("admin.json"), record)
    }

    /// Đọc record của manager.
    pub fn load_admin(&self) -> PersistenceResult<AdminRecord> {
        let path = self.admin_dir.join("admin.json");
        if !path.exists() {
            return Err(PersistenceError::not_found("admin", "admin"));
        }
        read_json(&path, "admin")
    }
}

/// Ghi JSON qua temp file + rename - crash giữa chừng không bao giờ
/// để lại record dở dang.
fn write_json<T: Serialize>(path: &Path, value: &T) -> PersistenceResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    {
        let file = File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path, id: &str) -> PersistenceResult<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| PersistenceError::invalid_record(id, &e.to_string()))
}
