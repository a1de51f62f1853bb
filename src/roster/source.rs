// ==========================================
// 周班次排班系统 - 名册数据源接口
// ==========================================
// 职责: 定义名册读取接口（不包含校验逻辑）
// 实现者: EmployeeRepository（SQLite）、CsvRosterSource、内存记录
// ==========================================

use crate::domain::types::EmployeeId;
use crate::roster::error::{RosterError, RosterResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

// ==========================================
// RawEmployeeRecord - 未校验的员工行
// ==========================================
// 除主键外全部保留原始文本, 由 RosterValidator 统一解析
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEmployeeRecord {
    pub id: EmployeeId,
    pub name: Option<String>,
    pub band: Option<String>,
    pub experience: Option<String>,
    pub domain: Option<String>,
    pub sub_domain: Option<String>,
}

// ==========================================
// RosterSource Trait
// ==========================================
pub trait RosterSource {
    /// 读取全部员工行（保持数据源顺序）
    fn load_raw_records(&self) -> RosterResult<Vec<RawEmployeeRecord>>;
}

impl RosterSource for Vec<RawEmployeeRecord> {
    fn load_raw_records(&self) -> RosterResult<Vec<RawEmployeeRecord>> {
        Ok(self.clone())
    }
}

// ==========================================
// CsvRosterSource - CSV 名册
// ==========================================
// 表头: id, Name, Band, Experience, Domain, Sub_Domain（大小写不敏感, Exp 也可）
pub struct CsvRosterSource {
    path: PathBuf,
}

impl CsvRosterSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RosterSource for CsvRosterSource {
    fn load_raw_records(&self) -> RosterResult<Vec<RawEmployeeRecord>> {
        let file = File::open(&self.path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let row: HashMap<&str, &str> = headers
                .iter()
                .map(|h| h.as_str())
                .zip(record.iter().map(|v| v.trim()))
                .collect();

            // 跳过完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }

            // 缺少 id 列或 id 为空时按行号编号
            let row_no = row_idx as EmployeeId + 1;
            let id = match row.get("id").filter(|v| !v.is_empty()) {
                None => row_no,
                Some(raw) => raw.parse::<EmployeeId>().map_err(|_| {
                    RosterError::invalid(row_no, format!("第 {} 行 id 非法: {}", row_no, raw))
                })?,
            };

            records.push(RawEmployeeRecord {
                id,
                name: non_empty(row.get("name")),
                band: non_empty(row.get("band")),
                experience: non_empty(row.get("experience").or_else(|| row.get("exp"))),
                domain: non_empty(row.get("domain")),
                sub_domain: non_empty(row.get("sub_domain")),
            });
        }

        Ok(records)
    }
}

fn non_empty(value: Option<&&str>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
