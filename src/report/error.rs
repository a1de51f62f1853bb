// ==========================================
// 周班次排班系统 - 报表层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 报表输出/读取错误
#[derive(Error, Debug)]
pub enum ReportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读写失败: {0}")]
    IoError(String),

    #[error("CSV 读写失败: {0}")]
    CsvError(String),

    // ===== 格式错误 =====
    #[error("排班表格式错误 (行 {row}): {message}")]
    GridFormatError { row: usize, message: String },

    // ===== 落库错误 =====
    #[error("排班结果落库失败: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::CsvError(err.to_string())
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::IoError(err.to_string())
    }
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
