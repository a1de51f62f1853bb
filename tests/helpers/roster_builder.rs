// ==========================================
// 名册构建器 - 用于集成测试
// ==========================================

use shift_roster::domain::{Band, Employee};

pub const PRIMARY: &str = "AD-SEL";
pub const SPLIT: &str = "FD-SEL";
pub const SUB_DOMAINS: [&str; 2] = ["Transmission", "Hydraulic"];

// ==========================================
// Employee 构建器
// ==========================================

pub struct EmployeeBuilder {
    id: i64,
    band: Band,
    experience: u32,
    domain: String,
    sub_domain: Option<String>,
}

impl EmployeeBuilder {
    pub fn associate(id: i64) -> Self {
        Self::new(id, Band::Associate)
    }

    pub fn layam(id: i64) -> Self {
        Self::new(id, Band::Layam)
    }

    fn new(id: i64, band: Band) -> Self {
        Self {
            id,
            band,
            experience: 1,
            domain: PRIMARY.to_string(),
            sub_domain: None,
        }
    }

    pub fn experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self
    }

    /// A 站点（无子区域）
    pub fn primary(mut self) -> Self {
        self.domain = PRIMARY.to_string();
        self.sub_domain = None;
        self
    }

    /// B 站点 + 子区域
    pub fn split(mut self, sub_domain: &str) -> Self {
        self.domain = SPLIT.to_string();
        self.sub_domain = Some(sub_domain.to_string());
        self
    }

    pub fn build(self) -> Employee {
        Employee {
            id: self.id,
            name: format!("{}-{}", self.band.as_str(), self.id),
            band: self.band,
            experience: self.experience,
            domain: self.domain,
            sub_domain: self.sub_domain,
        }
    }
}

// ==========================================
// 典型名册
// ==========================================

/// 按序号交替分配 A/B 站点, B 站点子区域轮流
fn alternating(builder: EmployeeBuilder, n: usize) -> EmployeeBuilder {
    if n % 2 == 0 {
        builder.primary()
    } else {
        builder.split(SUB_DOMAINS[(n / 2) % 2])
    }
}

/// 14 名 Associate + 18 名 Layam, 经验 1..=3, A/B 站点交替
pub fn large_roster() -> Vec<Employee> {
    let mut employees = Vec::new();
    for n in 0..14 {
        let builder = EmployeeBuilder::associate(n as i64 + 1).experience((n % 3) as u32 + 1);
        employees.push(alternating(builder, n).build());
    }
    for n in 0..18 {
        let builder = EmployeeBuilder::layam(n as i64 + 101).experience((n % 3) as u32 + 1);
        employees.push(alternating(builder, n).build());
    }
    employees
}

/// 6 名 Associate + 6 名 Layam + 2 名经验为 0 的员工
pub fn scenario_roster() -> Vec<Employee> {
    let mut employees = Vec::new();
    for n in 0..6 {
        let builder = EmployeeBuilder::associate(n as i64 + 1).experience((n % 2) as u32 + 1);
        employees.push(alternating(builder, n).build());
    }
    for n in 0..6 {
        let builder = EmployeeBuilder::layam(n as i64 + 11).experience((n % 2) as u32 + 1);
        employees.push(alternating(builder, n).build());
    }
    employees.push(EmployeeBuilder::associate(21).experience(0).build());
    employees.push(EmployeeBuilder::layam(22).experience(0).split("Hydraulic").build());
    employees
}

/// 只有一名 B 站点 Layam 的名册
///
/// # 返回
/// (名册, 唯一 B 站点 Layam 的 id)
pub fn single_split_layam_roster() -> (Vec<Employee>, i64) {
    let mut employees = Vec::new();
    for n in 0..8 {
        employees.push(
            EmployeeBuilder::associate(n + 1)
                .experience(2)
                .primary()
                .build(),
        );
    }
    for n in 0..8 {
        employees.push(EmployeeBuilder::layam(n + 101).experience(2).primary().build());
    }
    let split_id = 200;
    employees.push(
        EmployeeBuilder::layam(split_id)
            .experience(2)
            .split("Transmission")
            .build(),
    );
    (employees, split_id)
}
