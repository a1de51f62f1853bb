// ==========================================
// 周班次排班系统 - 员工名册错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 名册含非法记录时引擎不得运行
// ==========================================

use crate::domain::types::EmployeeId;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 名册加载/校验错误
#[derive(Error, Debug)]
pub enum RosterError {
    // ===== 记录级错误 =====
    #[error("员工记录非法 (id={id}): {reason}")]
    InvalidEmployeeRecord { id: EmployeeId, reason: String },

    // ===== 名册级错误 =====
    #[error("员工名册不足: {0}")]
    InsufficientRoster(String),

    // ===== 数据源错误 =====
    #[error("员工数据读取失败: {0}")]
    SourceError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),
}

impl RosterError {
    pub fn invalid(id: EmployeeId, reason: impl Into<String>) -> Self {
        RosterError::InvalidEmployeeRecord {
            id,
            reason: reason.into(),
        }
    }
}

impl From<RepositoryError> for RosterError {
    fn from(err: RepositoryError) -> Self {
        RosterError::SourceError(err.to_string())
    }
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        RosterError::CsvParseError(err.to_string())
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        RosterError::SourceError(err.to_string())
    }
}

/// Result 类型别名
pub type RosterResult<T> = Result<T, RosterError>;
