// ==========================================
// 服务请求排期系统 - 日程表领域模型
// ==========================================
// 职责: 按日组织请求ID集合,黄金日程与计算日程共用
// 红线: 日索引域固定为 [1, horizon_days],两类日程域一致才可比对
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// DaySchedule - 日程表 (日索引 -> 请求ID集合)
// ==========================================
// 用途: 黄金日程(参考)与计算日程(解码结果)的统一载体
// 说明: BTreeMap/BTreeSet 保证遍历顺序确定,报告可复现
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    horizon_days: u32,
    days: BTreeMap<u32, BTreeSet<u32>>,
}

impl DaySchedule {
    /// 创建空日程表,日索引域为 [1, horizon_days]
    ///
    /// 每一天都预置空集合,保证"无安排的天"也参与比对
    pub fn new(horizon_days: u32) -> Self {
        let days = (1..=horizon_days).map(|d| (d, BTreeSet::new())).collect();
        Self { horizon_days, days }
    }

    /// 日程天数 (M)
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// 将请求ID加入指定日
    ///
    /// # 返回
    /// - `true`: 加入成功
    /// - `false`: 日索引越界或该请求已在当日集合中
    pub fn assign(&mut self, day: u32, request_id: u32) -> bool {
        match self.days.get_mut(&day) {
            Some(set) => set.insert(request_id),
            None => false,
        }
    }

    /// 查询某日的请求ID集合
    pub fn day_set(&self, day: u32) -> Option<&BTreeSet<u32>> {
        self.days.get(&day)
    }

    /// 按日索引升序遍历 (日索引, 集合)
    pub fn iter_days(&self) -> impl Iterator<Item = (u32, &BTreeSet<u32>)> {
        self.days.iter().map(|(d, set)| (*d, set))
    }

    /// 已安排的请求总数 (所有日集合大小之和)
    pub fn assigned_count(&self) -> usize {
        self.days.values().map(|set| set.len()).sum()
    }

    /// 检查某请求是否已出现在任意一日
    pub fn contains_request(&self, request_id: u32) -> bool {
        self.days.values().any(|set| set.contains(&request_id))
    }
}
