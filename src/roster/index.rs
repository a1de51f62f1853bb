// ==========================================
// 周班次排班系统 - 名册内存索引
// ==========================================
// 职责: 按级别/站点对员工分组, 每次生成尝试构建一次
// 红线: 所有分组按 id 升序, 保证同种子结果可复现
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::{Band, EmployeeId};
use std::collections::BTreeMap;

pub struct RosterIndex<'a> {
    by_id: BTreeMap<EmployeeId, &'a Employee>,
    resting: Vec<&'a Employee>,
    associates: Vec<&'a Employee>,
    layams: Vec<&'a Employee>,
}

impl<'a> RosterIndex<'a> {
    pub fn new(employees: &'a [Employee]) -> Self {
        let by_id: BTreeMap<EmployeeId, &'a Employee> =
            employees.iter().map(|e| (e.id, e)).collect();

        let mut resting = Vec::new();
        let mut associates = Vec::new();
        let mut layams = Vec::new();
        for employee in by_id.values().copied() {
            match (employee.is_schedulable(), employee.band) {
                (true, Band::Associate) => associates.push(employee),
                (true, Band::Layam) => layams.push(employee),
                _ => resting.push(employee),
            }
        }

        Self {
            by_id,
            resting,
            associates,
            layams,
        }
    }

    pub fn get(&self, id: EmployeeId) -> Option<&'a Employee> {
        self.by_id.get(&id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.by_id.keys().copied()
    }

    pub fn employees(&self) -> impl Iterator<Item = &'a Employee> + '_ {
        self.by_id.values().copied()
    }

    /// 永远休息的员工（经验为 0 或级别不可上班）
    pub fn resting(&self) -> &[&'a Employee] {
        &self.resting
    }

    /// 可排班员工（按级别）
    pub fn schedulable(&self, band: Band) -> &[&'a Employee] {
        match band {
            Band::Associate => &self.associates,
            Band::Layam => &self.layams,
            Band::Other => &[],
        }
    }

    /// 可排班员工中属于指定站点的部分
    pub fn schedulable_in(&self, band: Band, domain: &str) -> Vec<&'a Employee> {
        self.schedulable(band)
            .iter()
            .copied()
            .filter(|e| e.domain == domain)
            .collect()
    }

    pub fn schedulable_count(&self) -> usize {
        self.associates.len() + self.layams.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: EmployeeId, band: Band, experience: u32, domain: &str) -> Employee {
        Employee {
            id,
            name: format!("E{}", id),
            band,
            experience,
            domain: domain.to_string(),
            sub_domain: None,
        }
    }

    #[test]
    fn test_index_groups_by_band() {
        let roster = vec![
            employee(3, Band::Layam, 1, "AD-SEL"),
            employee(1, Band::Associate, 2, "AD-SEL"),
            employee(2, Band::Associate, 0, "AD-SEL"),
            employee(4, Band::Other, 5, "FD-SEL"),
            employee(5, Band::Layam, 3, "FD-SEL"),
        ];
        let index = RosterIndex::new(&roster);

        assert_eq!(index.schedulable(Band::Associate).len(), 1);
        assert_eq!(
            index.schedulable(Band::Layam).iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![3, 5]
        );
        assert_eq!(
            index.resting().iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![2, 4]
        );
        assert_eq!(index.schedulable_in(Band::Layam, "FD-SEL").len(), 1);
        assert_eq!(index.schedulable_count(), 3);
        assert_eq!(index.get(4).map(|e| e.band), Some(Band::Other));
    }
}
