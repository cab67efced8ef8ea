//! # Error Management
//!
//! Enum lỗi tập trung cho các collaborator bên ngoài của engine: nguồn source code,
//! kho scam pattern và file cấu hình.
//!
//! Bản thân bước chấm điểm không bao giờ trả về lỗi; các lỗi ở đây chỉ xuất hiện
//! trước khi engine được gọi (fetch source, load registry, đọc config).

use std::io;

use thiserror::Error;

/// Kết quả chung cho toàn bộ crate
pub type Result<T> = std::result::Result<T, GuardError>;

/// Enum lỗi tập trung
#[derive(Debug, Error)]
pub enum GuardError {
    /// Lỗi IO khi đọc file source, metadata hoặc registry
    #[error("IO error: {0}")]
    IoError(String),

    /// Lỗi phân tích JSON/YAML
    #[error("Parsing error: {0}")]
    ParseError(String),

    /// Lỗi cấu hình
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Kho pattern không truy cập được
    #[error("Pattern registry unavailable: {0}")]
    RegistryError(String),

    /// Không tìm thấy source code của contract
    #[error("Contract source not found: {0}")]
    SourceNotFound(String),
}

impl From<io::Error> for GuardError {
    fn from(err: io::Error) -> Self {
        GuardError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for GuardError {
    fn from(err: serde_yaml::Error) -> Self {
        GuardError::ParseError(err.to_string())
    }
}

impl GuardError {
    /// Lỗi có phải do thiếu dữ liệu (không phải lỗi hạ tầng) không
    pub fn is_not_found(&self) -> bool {
        matches!(self, GuardError::SourceNotFound(_))
    }
}
