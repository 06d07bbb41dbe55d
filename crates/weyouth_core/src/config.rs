//! Core runtime configuration.
//!
//! # Responsibility
//! - Collect the values an embedder supplies at startup (paths, log level).
//! - Carry the fixed name sets and shared secret used by login.

use crate::logging::default_log_level;
use std::path::PathBuf;

const DB_FILE_NAME: &str = "weyouth.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Name sets and secret consulted by `IdentityResolver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPolicy {
    /// Names granted `Admin` without a password.
    pub master_admin_names: Vec<String>,
    /// Names granted `Teacher` without a password.
    pub special_teacher_names: Vec<String>,
    /// Shared secret every other member must type. Compared in plaintext.
    pub shared_secret: String,
    pub default_student_grade: u8,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            master_admin_names: vec![
                "강은택".to_string(),
                "김우신".to_string(),
                "이승기".to_string(),
            ],
            special_teacher_names: vec!["오환희".to_string()],
            shared_secret: "12345678".to_string(),
            default_student_grade: 10,
        }
    }
}

/// Startup configuration for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub auth: AuthPolicy,
}

impl CoreConfig {
    /// Places the database and log directory under `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: data_dir.join(LOG_DIR_NAME),
            auth: AuthPolicy::default(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::with_data_dir(std::env::temp_dir().join("weyouth"))
    }
}
