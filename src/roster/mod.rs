// ==========================================
// 周班次排班系统 - 员工名册层
// ==========================================
// 职责: 读取原始员工行 → 校验 → 只读名册快照
// 红线: 引擎只接收已校验的 Employee
// ==========================================

pub mod error;
pub mod index;
pub mod source;
pub mod validator;

pub use error::{RosterError, RosterResult};
pub use index::RosterIndex;
pub use source::{CsvRosterSource, RawEmployeeRecord, RosterSource};
pub use validator::RosterValidator;
