// ==========================================
// 周班次排班系统 - 配置管理器
// ==========================================
// 职责: 从员工库的 config_kv 表读取覆写项, 叠加到默认配置之上
// 存储: config_kv 表 (scope_id + key → value)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::rules::{PlannerConfig, Shift2Relaxation, ShiftRules, SiteLayout};
use crate::db::open_sqlite_connection;
use crate::engine::strategy::AssignmentStrategy;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> ConfigResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 创建 config_kv 表（幂等）
    pub fn ensure_schema(&self) -> ConfigResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
                scope_id TEXT NOT NULL DEFAULT 'global',
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在, 或库中没有 config_kv 表
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;

        let has_table: bool = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='table' AND name='config_kv' LIMIT 1",
                [],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !has_table {
            return Ok(None);
        }

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        self.ensure_schema()?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 在给定配置之上叠加 config_kv 中的覆写项
    ///
    /// # 参数
    /// - base: 基础配置（通常为默认值 + 驱动参数）
    ///
    /// # 返回
    /// 叠加并校验后的配置
    pub fn load_planner_config(&self, base: PlannerConfig) -> ConfigResult<PlannerConfig> {
        let mut config = base;

        // 站点布局决定轮换周期, 先于其他规则项应用
        if let Some(raw) = self.get_config_value(config_keys::SITE_LAYOUT)? {
            let site: SiteLayout = serde_json::from_str(&raw)?;
            let fresh = ShiftRules::for_site(site);
            config.rules.shift1_cycle = fresh.shift1_cycle;
            config.rules.shift2_sub_toggle = fresh.shift2_sub_toggle;
            config.rules.shift3_sub_toggle = fresh.shift3_sub_toggle;
            config.rules.site = fresh.site;
        }

        if let Some(v) = self.parsed::<u32>(config_keys::HORIZON_WEEKS)? {
            config.horizon_weeks = v;
        }
        if let Some(v) = self.parsed::<u32>(config_keys::MAX_ATTEMPTS)? {
            config.max_attempts = v;
        }
        if let Some(v) = self.parsed::<u64>(config_keys::RANDOM_SEED)? {
            config.random_seed = Some(v);
        }
        if let Some(v) = self.parsed::<AssignmentStrategy>(config_keys::ASSIGNMENT_STRATEGY)? {
            config.strategy = v;
        }
        if let Some(raw) = self.get_config_value(config_keys::COOLDOWN_GAPS)? {
            config.rules.cooldown_gaps = parse_gap_list(&raw)?;
        }
        if let Some(v) = self.parsed::<u32>(config_keys::MAX_EXPERIENCE_DIFF)? {
            config.rules.max_experience_diff = v;
        }
        if let Some(v) = self.parsed::<usize>(config_keys::COHORT_SPREAD_TOLERANCE)? {
            config.rules.cohort_spread_tolerance = v;
        }
        if let Some(v) = self.parsed::<Shift2Relaxation>(config_keys::SHIFT2_RELAXATION)? {
            config.rules.shift2_relaxation = v;
        }

        config.validate()?;
        debug!(
            horizon_weeks = config.horizon_weeks,
            max_attempts = config.max_attempts,
            strategy = config.strategy.as_str(),
            "配置加载完成"
        );
        Ok(config)
    }

    /// 读取并解析单个配置项
    fn parsed<T>(&self, key: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_config_value(key)? {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                }),
        }
    }
}

/// 解析逗号分隔的冷却阶梯, 如 "5,4,3"
fn parse_gap_list(raw: &str) -> ConfigResult<Vec<u32>> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                key: config_keys::COOLDOWN_GAPS.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 运行
    pub const HORIZON_WEEKS: &str = "horizon_weeks";
    pub const MAX_ATTEMPTS: &str = "max_attempts";
    pub const RANDOM_SEED: &str = "random_seed";
    pub const ASSIGNMENT_STRATEGY: &str = "assignment_strategy";

    // 规则
    pub const COOLDOWN_GAPS: &str = "cooldown_gaps";
    pub const MAX_EXPERIENCE_DIFF: &str = "max_experience_diff";
    pub const COHORT_SPREAD_TOLERANCE: &str = "cohort_spread_tolerance";
    pub const SHIFT2_RELAXATION: &str = "shift2_relaxation";

    // 站点布局 (JSON)
    pub const SITE_LAYOUT: &str = "site_layout";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_missing_table_yields_defaults() {
        let manager = memory_manager();
        let base = PlannerConfig {
            store_path: ":memory:".to_string(),
            ..PlannerConfig::default()
        };
        let loaded = manager.load_planner_config(base.clone()).unwrap();
        assert_eq!(loaded, base);
    }

    #[test]
    fn test_overrides_applied() {
        let manager = memory_manager();
        manager.set_config_value(config_keys::HORIZON_WEEKS, "12").unwrap();
        manager.set_config_value(config_keys::COOLDOWN_GAPS, "6, 4,3").unwrap();
        manager.set_config_value(config_keys::ASSIGNMENT_STRATEGY, "randomized").unwrap();
        manager.set_config_value(config_keys::RANDOM_SEED, "99").unwrap();

        let loaded = manager
            .load_planner_config(PlannerConfig {
                store_path: ":memory:".to_string(),
                ..PlannerConfig::default()
            })
            .unwrap();
        assert_eq!(loaded.horizon_weeks, 12);
        assert_eq!(loaded.rules.cooldown_gaps, vec![6, 4, 3]);
        assert_eq!(loaded.strategy, AssignmentStrategy::Randomized);
        assert_eq!(loaded.random_seed, Some(99));
    }

    #[test]
    fn test_bad_value_reports_key() {
        let manager = memory_manager();
        manager.set_config_value(config_keys::MAX_ATTEMPTS, "many").unwrap();
        let err = manager
            .load_planner_config(PlannerConfig::default())
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, config_keys::MAX_ATTEMPTS),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_set_value_overwrites() {
        let manager = memory_manager();
        manager.set_config_value("k", "1").unwrap();
        manager.set_config_value("k", "2").unwrap();
        assert_eq!(manager.get_config_value("k").unwrap(), Some("2".to_string()));
    }
}
