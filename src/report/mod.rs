// ==========================================
// 周班次排班系统 - 报表层
// ==========================================
// 职责: 排班透视表、CSV 输出/读取、结果下游接口
// ==========================================

pub mod csv_report;
pub mod error;
pub mod table;

use crate::domain::employee::Employee;
use crate::domain::schedule::Schedule;

pub use csv_report::{read_schedule_grid, CsvReportWriter, ScheduleGrid};
pub use error::{ReportError, ReportResult};
pub use table::{ScheduleRow, ScheduleTable};

// ==========================================
// ScheduleSink Trait - 排班结果下游
// ==========================================
// 实现者: CsvReportWriter、AssignmentRepository
pub trait ScheduleSink {
    /// 接收一份已采用的排班（每次运行只调用一次）
    fn publish(&self, employees: &[Employee], schedule: &Schedule) -> ReportResult<()>;
}
