// ==========================================
// 服务请求排期系统 - 效用计算引擎
// ==========================================
// 职责: 计算"请求 i 排在第 j 天"的标量效用
// 红线: 纯函数,相同输入必须产出相同结果 (模型构建可复现的前提)
// ==========================================

use crate::domain::ServiceRequest;
use chrono::NaiveDate;

// 积压天数得分上限: 超过该阈值视为"极度陈旧",不再累积
const DATE_SCORE_CAP_DAYS: i64 = 14;

// 紧急等级权重: 单个紧急层级压过多日积压
const URGENCY_WEIGHT: i64 = 10;

// ==========================================
// UtilityScorer - 效用计算引擎
// ==========================================
// 效用 = min(14, 候选日 - 提交日) + 紧急等级 × 10
#[derive(Debug)]
pub struct UtilityScorer {
    schedule_start_date: NaiveDate,
}

impl UtilityScorer {
    /// 构造函数
    ///
    /// # 参数
    /// - `schedule_start_date`: 排期起始日期 (第 1 天即该日期)
    pub fn new(schedule_start_date: NaiveDate) -> Self {
        Self {
            schedule_start_date,
        }
    }

    /// 第 day 天对应的日历日期 (day=1 即起始日期)
    pub fn schedule_date_for(&self, day: u32) -> NaiveDate {
        self.schedule_start_date + chrono::Duration::days(i64::from(day) - 1)
    }

    /// 计算请求排在第 day 天的效用
    ///
    /// 积压得分只封顶不截底: 候选日早于提交日时得分为负,
    /// 使"尚未提交的请求"天然排序靠后而非得分中性
    pub fn utility(&self, request: &ServiceRequest, day: u32) -> f64 {
        let staleness_days = (self.schedule_date_for(day) - request.submission_date).num_days();
        let date_score = staleness_days.min(DATE_SCORE_CAP_DAYS);
        let urgency_score = i64::from(request.urgency) * URGENCY_WEIGHT;
        (date_score + urgency_score) as f64
    }
}
