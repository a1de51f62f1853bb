// ==========================================
// 周班次排班系统 - 领域模型层
// ==========================================
// 职责: 定义员工、班次、排班结果等领域实体
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod employee;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use employee::{CohortKey, Employee};
pub use schedule::{Assignment, Schedule};
pub use types::{Band, EmployeeId, ShiftCode, Week};
