// ==========================================
// 周班次排班系统 - 分配策略定义
// ==========================================
// 用途：
// - 同一引擎、同一放宽阶梯, 仅候选排序方式不同;
// - 策略随配置持久化, 保证同种子结果可复现。

use serde::{Deserialize, Serialize};

/// 候选排序策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStrategy {
    /// 仅按随机抽签排序（不看班次数）
    Randomized,
    /// 先按已上班次数升序, 再随机抽签
    #[default]
    CohortFair,
}

impl AssignmentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStrategy::Randomized => "randomized",
            AssignmentStrategy::CohortFair => "cohort_fair",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            AssignmentStrategy::Randomized => "随机轮换",
            AssignmentStrategy::CohortFair => "均衡优先",
        }
    }

    /// 均衡排序键
    ///
    /// # 参数
    /// - `max_tally`: 候选（或候选对中）最大已上班次数
    /// - `sum_tally`: 候选（或候选对）已上班次数之和
    ///
    /// Randomized 返回常量, 班次数不参与排序
    pub fn balance_key(&self, max_tally: usize, sum_tally: usize) -> (usize, usize) {
        match self {
            AssignmentStrategy::Randomized => (0, 0),
            AssignmentStrategy::CohortFair => (max_tally, sum_tally),
        }
    }
}

impl std::fmt::Display for AssignmentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssignmentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "randomized" | "random" => Ok(AssignmentStrategy::Randomized),
            "cohort_fair" | "cohort-fair" | "fair" => Ok(AssignmentStrategy::CohortFair),
            other => Err(format!("未知策略类型: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_default() {
        assert_eq!(AssignmentStrategy::default(), AssignmentStrategy::CohortFair);
        assert_eq!(
            "Cohort-Fair".parse::<AssignmentStrategy>().unwrap(),
            AssignmentStrategy::CohortFair
        );
        assert_eq!(
            AssignmentStrategy::Randomized.as_str().parse::<AssignmentStrategy>().unwrap(),
            AssignmentStrategy::Randomized
        );
        assert!("greedy".parse::<AssignmentStrategy>().is_err());
    }

    #[test]
    fn test_randomized_ignores_tally() {
        assert_eq!(AssignmentStrategy::Randomized.balance_key(4, 7), (0, 0));
        assert_eq!(AssignmentStrategy::CohortFair.balance_key(4, 7), (4, 7));
    }
}
