// ==========================================
// 周班次排班系统 - 名册校验器
// ==========================================
// 职责: 原始员工行 → Employee, 并做名册级充足性检查
// 红线: 任一非法记录即拒绝整个名册
// ==========================================

use crate::config::rules::SiteLayout;
use crate::domain::employee::Employee;
use crate::domain::types::Band;
use crate::roster::error::{RosterError, RosterResult};
use crate::roster::source::{RawEmployeeRecord, RosterSource};
use std::collections::HashSet;
use tracing::{info, warn};

pub struct RosterValidator<'a> {
    site: &'a SiteLayout,
}

impl<'a> RosterValidator<'a> {
    pub fn new(site: &'a SiteLayout) -> Self {
        Self { site }
    }

    /// 从数据源读取并校验名册
    pub fn load(&self, source: &dyn RosterSource) -> RosterResult<Vec<Employee>> {
        let records = source.load_raw_records()?;
        self.validate_roster(&records)
    }

    /// 校验整个名册
    ///
    /// # 规则
    /// 1. 每条记录单独校验（见 validate_record）
    /// 2. 主键不得重复
    /// 3. 名册非空, 且至少有一名可排班的 Associate 和一名可排班的 Layam
    ///
    /// # 返回
    /// 按 id 升序的员工列表
    pub fn validate_roster(&self, records: &[RawEmployeeRecord]) -> RosterResult<Vec<Employee>> {
        if records.is_empty() {
            return Err(RosterError::InsufficientRoster("名册为空".to_string()));
        }

        let mut seen = HashSet::new();
        let mut employees = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id) {
                return Err(RosterError::invalid(record.id, "主键重复"));
            }
            employees.push(self.validate_record(record)?);
        }
        employees.sort_by_key(|e| e.id);

        let schedulable = |band: Band| {
            employees
                .iter()
                .filter(|e| e.band == band && e.is_schedulable())
                .count()
        };
        let associates = schedulable(Band::Associate);
        let layams = schedulable(Band::Layam);
        if associates == 0 {
            return Err(RosterError::InsufficientRoster(
                "没有经验大于 0 的 Associate".to_string(),
            ));
        }
        if layams == 0 {
            return Err(RosterError::InsufficientRoster(
                "没有经验大于 0 的 Layam".to_string(),
            ));
        }

        info!(
            total = employees.len(),
            associates,
            layams,
            "员工名册校验通过"
        );
        Ok(employees)
    }

    /// 校验单条记录
    ///
    /// # 规则
    /// - Band 必须可识别
    /// - Experience 必须为非负整数
    /// - Domain 不能为空
    /// - 分区站点必须带已知子区域; 非分区站点的子区域被忽略
    pub fn validate_record(&self, record: &RawEmployeeRecord) -> RosterResult<Employee> {
        let id = record.id;

        let band = record
            .band
            .as_deref()
            .unwrap_or("")
            .parse::<Band>()
            .map_err(|e| RosterError::invalid(id, e))?;

        let experience = parse_experience(record.experience.as_deref())
            .map_err(|reason| RosterError::invalid(id, reason))?;

        let domain = record
            .domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| RosterError::invalid(id, "Domain 为空"))?
            .to_string();

        let raw_sub = record
            .sub_domain
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let sub_domain = if self.site.is_split(&domain) {
            let sub = raw_sub.ok_or_else(|| {
                RosterError::invalid(id, format!("站点 {} 需要子区域", domain))
            })?;
            if !self.site.is_known_sub_domain(sub) {
                return Err(RosterError::invalid(id, format!("未知子区域: {}", sub)));
            }
            Some(sub.to_string())
        } else {
            if let Some(sub) = raw_sub {
                warn!(id, domain = %domain, sub_domain = sub, "非分区站点带子区域, 已忽略");
            }
            None
        };

        if band.is_slot_capable()
            && domain != self.site.primary_domain
            && !self.site.is_split(&domain)
        {
            warn!(id, domain = %domain, "员工站点不在布局内, 仅能参与班次1/班次3的放宽选择");
        }

        Ok(Employee {
            id,
            name: record.name.clone().unwrap_or_default(),
            band,
            experience,
            domain,
            sub_domain,
        })
    }
}

/// 解析经验年限（允许 "3" / "3.0", 拒绝负数与小数）
fn parse_experience(raw: Option<&str>) -> Result<u32, String> {
    let text = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or("Experience 缺失")?;

    if let Ok(v) = text.parse::<i64>() {
        return u32::try_from(v).map_err(|_| format!("Experience 非法: {}", v));
    }
    match text.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
        Ok(v) => Err(format!("Experience 非法: {}", v)),
        Err(_) => Err(format!("Experience 不是数字: {}", text)),
    }
}
