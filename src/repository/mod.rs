// ==========================================
// 周班次排班系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 员工名册读取、排班结果落库
// 约束: 所有查询使用参数化, 表名先校验存在再作为标识符引用
// ==========================================

pub mod assignment_repo;
pub mod employee_repo;
pub mod error;

// 重导出核心仓储
pub use assignment_repo::AssignmentRepository;
pub use employee_repo::EmployeeRepository;
pub use error::{RepositoryError, RepositoryResult};
