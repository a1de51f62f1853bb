// ==========================================
// 周班次排班系统 - CSV 报表读写
// ==========================================
// 写: ScheduleTable → CSV（UTF-8, 逗号分隔）
// 读: CSV 透视表 → 员工 + 排班, 供 verify_schedule 使用
// ==========================================

use crate::config::rules::SiteLayout;
use crate::domain::employee::Employee;
use crate::domain::schedule::Schedule;
use crate::domain::types::{Band, EmployeeId, ShiftCode, Week};
use crate::report::error::{ReportError, ReportResult};
use crate::report::table::{ScheduleTable, IDENTITY_COLUMNS};
use crate::report::ScheduleSink;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

// ==========================================
// CsvReportWriter
// ==========================================
pub struct CsvReportWriter {
    path: PathBuf,
    site: SiteLayout,
}

impl CsvReportWriter {
    pub fn new(path: impl AsRef<Path>, site: SiteLayout) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            site,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写出透视表
    pub fn write_table(&self, table: &ScheduleTable) -> ReportResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = WriterBuilder::new().from_path(&self.path)?;
        writer.write_record(table.header())?;
        for row in table.rows() {
            writer.write_record(row.cells())?;
        }
        writer.flush()?;

        info!(path = %self.path.display(), rows = table.rows().len(), "排班报表已写出");
        Ok(())
    }
}

impl ScheduleSink for CsvReportWriter {
    fn publish(&self, employees: &[Employee], schedule: &Schedule) -> ReportResult<()> {
        let table = ScheduleTable::build(employees, schedule, &self.site);
        self.write_table(&table)
    }
}

// ==========================================
// ScheduleGrid - 从 CSV 读回的排班
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    /// 员工（id 为数据行序号, 从 1 开始）
    pub employees: Vec<Employee>,
    pub schedule: Schedule,
}

/// 读取 CSV 透视表
///
/// # 规则
/// - 前 5 列为身份列, 其后每列一周
/// - 班次单元格必须为 G/1/2/3
pub fn read_schedule_grid(path: &Path) -> ReportResult<ScheduleGrid> {
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let header_len = reader.headers()?.len();
    if header_len < IDENTITY_COLUMNS.len() {
        return Err(ReportError::GridFormatError {
            row: 0,
            message: format!("表头列数 {} 少于身份列数 {}", header_len, IDENTITY_COLUMNS.len()),
        });
    }
    let horizon_weeks = (header_len - IDENTITY_COLUMNS.len()) as Week;

    let mut employees = Vec::new();
    let mut rows: Vec<Vec<ShiftCode>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_no = idx + 1;
        let record = result?;
        let cell = |i: usize| record.get(i).map(str::trim).unwrap_or("");
        let bad = |message: String| ReportError::GridFormatError {
            row: row_no,
            message,
        };

        let band = cell(1).parse::<Band>().map_err(&bad)?;
        let experience = cell(2)
            .parse::<u32>()
            .map_err(|e| bad(format!("Exp 非法: {}", e)))?;
        let sub_domain = Some(cell(4)).filter(|s| !s.is_empty()).map(str::to_string);

        let shifts = (IDENTITY_COLUMNS.len()..header_len)
            .map(|i| cell(i).parse::<ShiftCode>().map_err(&bad))
            .collect::<ReportResult<Vec<_>>>()?;

        employees.push(Employee {
            id: row_no as EmployeeId,
            name: cell(0).to_string(),
            band,
            experience,
            domain: cell(3).to_string(),
            sub_domain,
        });
        rows.push(shifts);
    }

    let mut schedule = Schedule::new(employees.iter().map(|e| e.id), horizon_weeks);
    for (employee, shifts) in employees.iter().zip(&rows) {
        for (i, code) in shifts.iter().enumerate() {
            schedule.set(employee.id, i as Week + 1, *code);
        }
    }

    Ok(ScheduleGrid {
        employees,
        schedule,
    })
}
