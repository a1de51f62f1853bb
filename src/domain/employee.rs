// ==========================================
// 周班次排班系统 - 员工领域模型
// ==========================================
// 红线: 员工记录每次运行只读取一次, 运行期间不可变
// 对齐: Employees 表 (id, Name, Band, Experience, Domain, Sub_Domain)
// ==========================================

use crate::domain::types::{Band, EmployeeId};
use serde::{Deserialize, Serialize};

// ==========================================
// Employee - 员工
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub band: Band,
    pub experience: u32,             // 经验年限
    pub domain: String,              // 站点代码, 如 AD-SEL / FD-SEL
    pub sub_domain: Option<String>,  // 子区域, 仅分区站点有值
}

impl Employee {
    /// 是否参与工作班次分配（经验 > 0 且级别可上班）
    pub fn is_schedulable(&self) -> bool {
        self.experience > 0 && self.band.is_slot_capable()
    }

    /// 公平性分组键
    pub fn cohort_key(&self) -> CohortKey {
        CohortKey {
            experience: self.experience,
            band: self.band,
            domain: self.domain.clone(),
            sub_domain: self.sub_domain.clone(),
        }
    }

    /// 子区域是否等于给定值
    pub fn has_sub_domain(&self, sub_domain: &str) -> bool {
        self.sub_domain.as_deref() == Some(sub_domain)
    }
}

// ==========================================
// CohortKey - 公平性分组键
// ==========================================
// 仅用于公平性检查, 不限制候选资格
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CohortKey {
    pub experience: u32,
    pub band: Band,
    pub domain: String,
    pub sub_domain: Option<String>,
}

impl std::fmt::Display for CohortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "exp={}/{}/{}/{}",
            self.experience,
            self.band,
            self.domain,
            self.sub_domain.as_deref().unwrap_or("-")
        )
    }
}
