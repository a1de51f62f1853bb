// ==========================================
// 周班次排班系统 - 排班结果仓储
// ==========================================
// 红线: 每次运行整体替换 ShiftAssignments, 不保留历史
// 对齐: ShiftAssignments (employee_id, shift_code, week)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::employee::Employee;
use crate::domain::schedule::{Assignment, Schedule};
use crate::domain::types::ShiftCode;
use crate::report::{ReportResult, ScheduleSink};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::info;

// ==========================================
// AssignmentRepository - 排班结果仓储
// ==========================================
pub struct AssignmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AssignmentRepository {
    /// 创建新的 AssignmentRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建 ShiftAssignments 表（已存在则跳过）
    pub fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS ShiftAssignments (
                assignment_id INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id INTEGER NOT NULL,
                shift_code TEXT NOT NULL,
                week INTEGER NOT NULL,
                UNIQUE (employee_id, week)
            );
            CREATE INDEX IF NOT EXISTS idx_shift_assignments_week
                ON ShiftAssignments (week);
            "#,
        )?;
        Ok(())
    }

    /// 用新排班整体替换旧记录（单事务）
    ///
    /// # 返回
    /// 写入的记录数
    pub fn replace_all(&self, schedule: &Schedule) -> RepositoryResult<usize> {
        self.ensure_schema()?;

        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute("DELETE FROM ShiftAssignments", [])?;
        let mut written = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO ShiftAssignments (employee_id, shift_code, week) VALUES (?1, ?2, ?3)",
            )?;
            for a in schedule.assignments() {
                stmt.execute(params![a.employee_id, a.shift_code.as_str(), a.week])?;
                written += 1;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        info!(written, "排班结果已写入 ShiftAssignments");
        Ok(written)
    }

    /// 读取全部分配记录（按员工、周升序）
    pub fn find_all(&self) -> RepositoryResult<Vec<Assignment>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT employee_id, shift_code, week
            FROM ShiftAssignments
            ORDER BY employee_id, week
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(employee_id, code, week)| {
                let shift_code = code.parse::<ShiftCode>().map_err(|message| {
                    RepositoryError::FieldValueError {
                        field: "shift_code".to_string(),
                        message,
                    }
                })?;
                Ok(Assignment {
                    employee_id,
                    week,
                    shift_code,
                })
            })
            .collect()
    }
}

impl ScheduleSink for AssignmentRepository {
    fn publish(&self, _employees: &[Employee], schedule: &Schedule) -> ReportResult<()> {
        self.replace_all(schedule)?;
        Ok(())
    }
}
