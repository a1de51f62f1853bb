// ==========================================
// 周班次排班系统 - 排班规则与运行配置
// ==========================================
// 职责: 冷却阶梯、经验差上限、站点布局、轮换周期等规则参数
// 红线: 冷却间隔永不低于 COOLDOWN_FLOOR_WEEKS
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::engine::strategy::AssignmentStrategy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 冷却间隔硬下限（周）
pub const COOLDOWN_FLOOR_WEEKS: u32 = 3;

/// 默认排班周数
pub const DEFAULT_HORIZON_WEEKS: u32 = 21;

/// 默认最大重生成次数
pub const DEFAULT_MAX_ATTEMPTS: u32 = 200;

/// 默认员工表名
pub const DEFAULT_TABLE_NAME: &str = "Employees";

/// 默认报表输出路径
pub const DEFAULT_OUTPUT_PATH: &str = "shift_planner_result.csv";

// ==========================================
// SiteLayout - 站点布局
// ==========================================
// primary_domain 为 A 站点（无子区域）, split_domain 为 B 站点（有子区域）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLayout {
    pub primary_domain: String,
    pub split_domain: String,
    pub sub_domains: Vec<String>,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            primary_domain: "AD-SEL".to_string(),
            split_domain: "FD-SEL".to_string(),
            sub_domains: vec!["Transmission".to_string(), "Hydraulic".to_string()],
        }
    }
}

impl SiteLayout {
    /// 该站点是否带子区域
    pub fn is_split(&self, domain: &str) -> bool {
        self.split_domain == domain
    }

    pub fn is_known_sub_domain(&self, sub_domain: &str) -> bool {
        self.sub_domains.iter().any(|s| s == sub_domain)
    }
}

// ==========================================
// DomainTarget - 班次1 轮换目标
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTarget {
    pub domain: String,
    #[serde(default)]
    pub sub_domain: Option<String>,
}

impl DomainTarget {
    pub fn new(domain: &str, sub_domain: Option<&str>) -> Self {
        Self {
            domain: domain.to_string(),
            sub_domain: sub_domain.map(str::to_string),
        }
    }
}

// ==========================================
// Shift2Relaxation - 班次2 放宽顺序
// ==========================================
// 冷却始终为硬约束; 这里只决定 "同班次互斥" 与 "子区域轮换" 谁先放宽
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Shift2Relaxation {
    /// 先放宽 "上次工作班次不是班次2", 再放宽子区域
    #[default]
    ExclusivityFirst,
    /// 先放宽子区域, 再放宽同班次互斥
    AlternationFirst,
}

impl std::str::FromStr for Shift2Relaxation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclusivity_first" | "exclusivity-first" => Ok(Shift2Relaxation::ExclusivityFirst),
            "alternation_first" | "alternation-first" => Ok(Shift2Relaxation::AlternationFirst),
            other => Err(format!("未知放宽顺序: {}", other)),
        }
    }
}

// ==========================================
// ShiftRules - 排班规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRules {
    /// 冷却间隔阶梯（降序, 末项为最终可接受间隔）
    pub cooldown_gaps: Vec<u32>,

    /// 同班次搭档经验差上限
    pub max_experience_diff: u32,

    /// 同组员工工作班次总数允许的最大差
    pub cohort_spread_tolerance: usize,

    pub site: SiteLayout,

    /// 班次1 轮换目标, 按 (周-1) mod len 取值
    pub shift1_cycle: Vec<DomainTarget>,

    /// 班次2 B 站点席位的期望子区域, 按 (周-1) mod 2 取值
    pub shift2_sub_toggle: Vec<String>,

    /// 班次3 子区域轮换, 按 (周-1) mod 2 取值
    pub shift3_sub_toggle: Vec<String>,

    #[serde(default)]
    pub shift2_relaxation: Shift2Relaxation,
}

impl Default for ShiftRules {
    fn default() -> Self {
        Self::for_site(SiteLayout::default())
    }
}

impl ShiftRules {
    /// 按站点布局生成默认轮换周期
    ///
    /// - 班次1: A 站点 → B 站点/子区域1 → B 站点/子区域2
    /// - 班次2: [子区域1, 子区域2]
    /// - 班次3: [子区域2, 子区域1]
    pub fn for_site(site: SiteLayout) -> Self {
        let subs: Vec<String> = site.sub_domains.iter().take(2).cloned().collect();
        let mut shift1_cycle = vec![DomainTarget::new(&site.primary_domain, None)];
        shift1_cycle.extend(
            subs.iter()
                .map(|sub| DomainTarget::new(&site.split_domain, Some(sub))),
        );
        let reversed: Vec<String> = subs.iter().rev().cloned().collect();

        Self {
            cooldown_gaps: vec![5, 4, COOLDOWN_FLOOR_WEEKS],
            max_experience_diff: 2,
            cohort_spread_tolerance: 1,
            site,
            shift1_cycle,
            shift2_sub_toggle: subs,
            shift3_sub_toggle: reversed,
            shift2_relaxation: Shift2Relaxation::default(),
        }
    }

    /// 首选冷却间隔
    pub fn preferred_gap(&self) -> u32 {
        self.cooldown_gaps.first().copied().unwrap_or(COOLDOWN_FLOOR_WEEKS)
    }

    /// 校验规则
    ///
    /// # 规则
    /// - 冷却阶梯非空、严格降序、且不低于硬下限
    /// - 两个子区域轮换列表各恰好 2 项, 且均为已知子区域
    /// - 班次1 轮换周期非空
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cooldown_gaps.is_empty() {
            return Err(ConfigError::Invalid("cooldown_gaps 不能为空".to_string()));
        }
        if self.cooldown_gaps.windows(2).any(|w| w[0] <= w[1]) {
            return Err(ConfigError::Invalid(format!(
                "cooldown_gaps 必须严格降序: {:?}",
                self.cooldown_gaps
            )));
        }
        if let Some(min) = self.cooldown_gaps.iter().min() {
            if *min < COOLDOWN_FLOOR_WEEKS {
                return Err(ConfigError::Invalid(format!(
                    "冷却间隔 {} 低于下限 {}",
                    min, COOLDOWN_FLOOR_WEEKS
                )));
            }
        }
        if self.shift1_cycle.is_empty() {
            return Err(ConfigError::Invalid("shift1_cycle 不能为空".to_string()));
        }
        if self.site.primary_domain == self.site.split_domain {
            return Err(ConfigError::Invalid(
                "primary_domain 与 split_domain 不能相同".to_string(),
            ));
        }
        for (name, toggle) in [
            ("shift2_sub_toggle", &self.shift2_sub_toggle),
            ("shift3_sub_toggle", &self.shift3_sub_toggle),
        ] {
            if toggle.len() != 2 {
                return Err(ConfigError::Invalid(format!(
                    "{} 必须恰好包含 2 个子区域, 实际 {}",
                    name,
                    toggle.len()
                )));
            }
            if let Some(unknown) = toggle.iter().find(|s| !self.site.is_known_sub_domain(s)) {
                return Err(ConfigError::Invalid(format!("{} 含未知子区域: {}", name, unknown)));
            }
        }
        Ok(())
    }
}

// ==========================================
// PlannerConfig - 单次运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// 员工库路径（SQLite）
    pub store_path: String,

    /// CSV 报表输出路径
    pub output_path: String,

    /// 员工表名
    pub table_name: String,

    /// 排班周数
    pub horizon_weeks: u32,

    /// 公平性重生成最大次数
    pub max_attempts: u32,

    /// 随机种子（缺省时随机生成并记录日志）
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub strategy: AssignmentStrategy,

    #[serde(default)]
    pub rules: ShiftRules,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            horizon_weeks: DEFAULT_HORIZON_WEEKS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            random_seed: None,
            strategy: AssignmentStrategy::default(),
            rules: ShiftRules::default(),
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.horizon_weeks == 0 {
            return Err(ConfigError::Invalid("horizon_weeks 必须大于 0".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts 必须大于 0".to_string()));
        }
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::Invalid("table_name 不能为空".to_string()));
        }
        self.rules.validate()
    }
}

/// 默认员工库路径
///
/// 优先级: 环境变量 SHIFT_ROSTER_DB_PATH → 用户数据目录 → 当前目录
pub fn default_store_path() -> String {
    if let Ok(path) = std::env::var("SHIFT_ROSTER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./SEL_Employess_Data.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("shift-roster");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("SEL_Employess_Data.db");
        }
    }
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        let rules = ShiftRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.preferred_gap(), 5);
        assert_eq!(rules.shift1_cycle[0].sub_domain, None);
        assert_eq!(rules.shift1_cycle[2].sub_domain.as_deref(), Some("Hydraulic"));
        assert_eq!(rules.shift3_sub_toggle, vec!["Hydraulic", "Transmission"]);
    }

    #[test]
    fn test_gap_below_floor_rejected() {
        let rules = ShiftRules {
            cooldown_gaps: vec![5, 2],
            ..ShiftRules::default()
        };
        assert!(matches!(rules.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_descending_ladder_rejected() {
        let rules = ShiftRules {
            cooldown_gaps: vec![3, 4],
            ..ShiftRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_toggle_must_have_two_known_values() {
        let rules = ShiftRules {
            shift3_sub_toggle: vec!["Hydraulic".to_string()],
            ..ShiftRules::default()
        };
        assert!(rules.validate().is_err());

        let rules = ShiftRules {
            shift2_sub_toggle: vec!["Hydraulic".to_string(), "Pneumatic".to_string()],
            ..ShiftRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_planner_config_rejects_zero_attempts() {
        let config = PlannerConfig {
            store_path: "x.db".to_string(),
            max_attempts: 0,
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shift2_relaxation_parse() {
        assert_eq!(
            "alternation-first".parse::<Shift2Relaxation>().unwrap(),
            Shift2Relaxation::AlternationFirst
        );
        assert!("sideways".parse::<Shift2Relaxation>().is_err());
    }
}
