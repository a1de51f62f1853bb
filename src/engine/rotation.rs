// ==========================================
// 周班次排班系统 - 轮换状态
// ==========================================
// 职责: 每个班次角色上一次成功分配时使用的 (站点, 子区域)
// 红线: 随生成尝试创建/丢弃, 不存在模块级可变状态
// ==========================================

use crate::config::rules::SiteLayout;
use crate::domain::employee::Employee;
use crate::domain::types::Week;

/// 单个角色的轮换记忆
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleRotation {
    /// 上一次使用的站点
    pub last_domain: Option<String>,
    /// 上一次使用的分区站点子区域（非分区站点不覆盖此值）
    pub last_sub_domain: Option<String>,
}

impl RoleRotation {
    pub fn record(&mut self, employee: &Employee) {
        self.last_domain = Some(employee.domain.clone());
        if let Some(sub) = &employee.sub_domain {
            self.last_sub_domain = Some(sub.clone());
        }
    }

    /// 站点是否与上次不同（无历史时视为满足）
    pub fn alternates_domain(&self, employee: &Employee) -> bool {
        self.last_domain.as_deref() != Some(employee.domain.as_str())
    }

    /// 子区域是否满足轮换
    ///
    /// # 规则
    /// - 非分区站点: 恒满足
    /// - 有历史: 与上次子区域不同
    /// - 无历史: 等于本周的默认子区域 toggle[(week-1) mod 2]
    pub fn alternates_sub_domain(
        &self,
        employee: &Employee,
        site: &SiteLayout,
        toggle: &[String],
        week: Week,
    ) -> bool {
        if !site.is_split(&employee.domain) {
            return true;
        }
        match (&self.last_sub_domain, &employee.sub_domain) {
            (Some(last), Some(sub)) => last != sub,
            (None, Some(sub)) => toggle_value(toggle, week) == Some(sub.as_str()),
            (_, None) => false,
        }
    }

    /// 站点 + 子区域同时轮换
    pub fn alternates(
        &self,
        employee: &Employee,
        site: &SiteLayout,
        toggle: &[String],
        week: Week,
    ) -> bool {
        self.alternates_domain(employee) && self.alternates_sub_domain(employee, site, toggle, week)
    }
}

/// 按周取两值轮换表中的值
pub fn toggle_value(toggle: &[String], week: Week) -> Option<&str> {
    if toggle.is_empty() {
        return None;
    }
    let idx = (week.saturating_sub(1) as usize) % toggle.len();
    toggle.get(idx).map(String::as_str)
}

// ==========================================
// RotationState - 全部角色的轮换状态
// ==========================================
// 班次1 一个角色; 班次2 两个席位（A 站点/B 站点）; 班次3 按级别两个角色
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationState {
    pub shift1: RoleRotation,
    pub shift2_primary: RoleRotation,
    pub shift2_split: RoleRotation,
    pub shift3_associate: RoleRotation,
    pub shift3_layam: RoleRotation,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }
}
