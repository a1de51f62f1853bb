// ==========================================
// 周班次排班系统 - 员工名册仓储
// ==========================================
// 红线: Repository 不含业务逻辑, 校验交给 RosterValidator
// 对齐: Employees 表 (id, Name, Band, Experience, Domain, Sub_Domain)
// ==========================================

use crate::db::{open_sqlite_connection, quote_identifier, table_exists};
use crate::domain::employee::Employee;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::roster::error::RosterResult;
use crate::roster::source::{RawEmployeeRecord, RosterSource};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// EmployeeRepository - 员工名册仓储
// ==========================================
pub struct EmployeeRepository {
    conn: Arc<Mutex<Connection>>,
    table_name: String,
}

impl EmployeeRepository {
    /// 创建新的 EmployeeRepository 实例
    ///
    /// # 参数
    /// - `db_path`: 员工库路径
    /// - `table_name`: 员工表名（引用前会校验存在）
    pub fn new(db_path: &str, table_name: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            table_name: table_name.to_string(),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>, table_name: &str) -> Self {
        Self {
            conn,
            table_name: table_name.to_string(),
        }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// 创建员工表（已存在则跳过）
    pub fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY,
                Name TEXT NOT NULL,
                Band TEXT NOT NULL,
                Experience INTEGER NOT NULL,
                Domain TEXT NOT NULL,
                Sub_Domain TEXT
            );
            "#,
            quote_identifier(&self.table_name)
        ))?;
        Ok(())
    }

    /// 批量写入员工（同 id 覆盖）
    pub fn upsert_all(&self, employees: &[Employee]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        {
            let mut stmt = tx.prepare(&format!(
                r#"
                INSERT OR REPLACE INTO {} (id, Name, Band, Experience, Domain, Sub_Domain)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                quote_identifier(&self.table_name)
            ))?;
            for e in employees {
                stmt.execute(params![
                    e.id,
                    e.name,
                    e.band.as_str(),
                    e.experience,
                    e.domain,
                    e.sub_domain,
                ])?;
            }
        }
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(employees.len())
    }

    /// 读取全部员工原始行（按 id 升序）
    ///
    /// # 返回
    /// - Ok(Vec<RawEmployeeRecord>): 各列保留原始文本
    /// - Err(TableNotFound): 表不存在
    pub fn find_all_raw(&self) -> RepositoryResult<Vec<RawEmployeeRecord>> {
        let conn = self.get_conn()?;
        if !table_exists(&conn, &self.table_name)? {
            return Err(RepositoryError::TableNotFound(self.table_name.clone()));
        }

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT id, Name, Band, Experience, Domain, Sub_Domain
            FROM {}
            ORDER BY id
            "#,
            quote_identifier(&self.table_name)
        ))?;

        let records = stmt
            .query_map([], |row| {
                Ok(RawEmployeeRecord {
                    id: row.get(0)?,
                    name: value_text(row.get(1)?),
                    band: value_text(row.get(2)?),
                    experience: value_text(row.get(3)?),
                    domain: value_text(row.get(4)?),
                    sub_domain: value_text(row.get(5)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(table = %self.table_name, count = records.len(), "读取员工原始行");
        Ok(records)
    }
}

impl RosterSource for EmployeeRepository {
    fn load_raw_records(&self) -> RosterResult<Vec<RawEmployeeRecord>> {
        Ok(self.find_all_raw()?)
    }
}

/// SQLite 动态类型 → 文本（NULL / 空白视为缺失）
fn value_text(value: Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).to_string(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
