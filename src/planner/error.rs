// ==========================================
// 周班次排班系统 - 运行层错误类型
// ==========================================
// 职责: 汇总各层错误, 供主程序/工具统一处理
// ==========================================

use crate::config::error::ConfigError;
use crate::report::error::ReportError;
use crate::repository::error::RepositoryError;
use crate::roster::error::RosterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("名册错误: {0}")]
    Roster(#[from] RosterError),

    #[error("数据访问错误: {0}")]
    Repository(#[from] RepositoryError),

    #[error("报表错误: {0}")]
    Report(#[from] ReportError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type PlannerResult<T> = Result<T, PlannerError>;
