// ==========================================
// 周班次排班系统 - 排班透视表
// ==========================================
// 列: Name, Band, Exp, Domain, Sub_Domain, Shift Week 1..N
// 红线: Sub_Domain 只在分区站点显示, 其余为空
// ==========================================

use crate::config::rules::SiteLayout;
use crate::domain::employee::Employee;
use crate::domain::schedule::Schedule;
use crate::domain::types::{EmployeeId, ShiftCode};

/// 身份列
pub const IDENTITY_COLUMNS: [&str; 5] = ["Name", "Band", "Exp", "Domain", "Sub_Domain"];

/// 周列表头
pub fn week_column(week: u32) -> String {
    format!("Shift Week {}", week)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub employee_id: EmployeeId,
    pub name: String,
    pub band: String,
    pub experience: u32,
    pub domain: String,
    pub sub_domain: String,
    pub shifts: Vec<ShiftCode>,
}

impl ScheduleRow {
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.band.clone(),
            self.experience.to_string(),
            self.domain.clone(),
            self.sub_domain.clone(),
        ];
        cells.extend(self.shifts.iter().map(|c| c.as_str().to_string()));
        cells
    }
}

// ==========================================
// ScheduleTable - 每员工一行, 每周一列
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    horizon_weeks: u32,
    rows: Vec<ScheduleRow>,
}

impl ScheduleTable {
    /// 由名册 + 排班构建透视表（行顺序与名册一致）
    pub fn build(employees: &[Employee], schedule: &Schedule, site: &SiteLayout) -> Self {
        let horizon_weeks = schedule.horizon_weeks();
        let rows = employees
            .iter()
            .map(|e| {
                let shifts = (1..=horizon_weeks)
                    .map(|w| schedule.get(e.id, w).unwrap_or(ShiftCode::Rest))
                    .collect();
                let sub_domain = if site.is_split(&e.domain) {
                    e.sub_domain.clone().unwrap_or_default()
                } else {
                    String::new()
                };
                ScheduleRow {
                    employee_id: e.id,
                    name: e.name.clone(),
                    band: e.band.to_string(),
                    experience: e.experience,
                    domain: e.domain.clone(),
                    sub_domain,
                    shifts,
                }
            })
            .collect();

        Self {
            horizon_weeks,
            rows,
        }
    }

    pub fn horizon_weeks(&self) -> u32 {
        self.horizon_weeks
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn header(&self) -> Vec<String> {
        IDENTITY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain((1..=self.horizon_weeks).map(week_column))
            .collect()
    }

    /// 制表符分隔的文本（控制台输出）
    pub fn render_tab(&self) -> String {
        let mut out = self.header().join("\t");
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.cells().join("\t"));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Band;

    #[test]
    fn test_build_blanks_sub_domain_outside_split_site() {
        let site = SiteLayout::default();
        let roster = vec![
            Employee {
                id: 1,
                name: "Asha".to_string(),
                band: Band::Associate,
                experience: 2,
                domain: "FD-SEL".to_string(),
                sub_domain: Some("Hydraulic".to_string()),
            },
            Employee {
                id: 2,
                name: "Ravi".to_string(),
                band: Band::Layam,
                experience: 0,
                domain: "AD-SEL".to_string(),
                sub_domain: Some("Hydraulic".to_string()),
            },
        ];
        let mut schedule = Schedule::new([1, 2], 2);
        schedule.set(1, 2, ShiftCode::Slot3);

        let table = ScheduleTable::build(&roster, &schedule, &site);
        assert_eq!(table.header().len(), 7);
        assert_eq!(table.header()[6], "Shift Week 2");
        assert_eq!(table.rows()[0].cells(), vec!["Asha", "Associate", "2", "FD-SEL", "Hydraulic", "G", "3"]);
        assert_eq!(table.rows()[1].sub_domain, "");

        let text = table.render_tab();
        assert!(text.starts_with("Name\tBand\tExp\tDomain\tSub_Domain\tShift Week 1"));
        assert_eq!(text.lines().count(), 3);
    }
}
