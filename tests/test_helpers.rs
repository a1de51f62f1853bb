// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时员工库创建、员工写入、config_kv 覆写
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use shift_roster::domain::Employee;
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时员工库并初始化 Employees 表
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().ok_or("非 UTF-8 路径")?.to_string();

    let conn = Connection::open(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 初始化员工表（列名与线上员工库一致）
fn init_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS Employees (
            id INTEGER PRIMARY KEY,
            Name TEXT NOT NULL,
            Band TEXT NOT NULL,
            Experience INTEGER NOT NULL,
            Domain TEXT NOT NULL,
            Sub_Domain TEXT
        )
        "#,
        [],
    )?;
    Ok(())
}

/// 直接以 SQL 写入员工（绕过仓储, 用于准备脏数据）
pub fn insert_employees(db_path: &str, employees: &[Employee]) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    for e in employees {
        conn.execute(
            "INSERT INTO Employees (id, Name, Band, Experience, Domain, Sub_Domain) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![e.id, e.name, e.band.as_str(), e.experience, e.domain, e.sub_domain],
        )?;
    }
    Ok(())
}

/// 写入一条原始员工行（各列均为文本, 用于构造非法记录）
pub fn insert_raw_row(
    db_path: &str,
    id: i64,
    band: &str,
    experience: &str,
    domain: &str,
    sub_domain: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    conn.execute(
        "INSERT INTO Employees (id, Name, Band, Experience, Domain, Sub_Domain) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![id, format!("RAW{}", id), band, experience, domain, sub_domain],
    )?;
    Ok(())
}

/// 统计 ShiftAssignments 表行数
pub fn count_assignments(db_path: &str) -> Result<i64, Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    let count = conn.query_row("SELECT COUNT(*) FROM ShiftAssignments", [], |row| row.get(0))?;
    Ok(count)
}
