// ==========================================
// 服务请求排期系统 - 评估引擎
// ==========================================
// 职责: 计算日程与黄金日程的逐日/汇总命中率与利用率
// 红线: 报告为纯数据结构,可序列化,无副作用;
//       失败路径不产出部分报告
// ==========================================

use crate::config::ScheduleConfig;
use crate::domain::DaySchedule;
use crate::repository::RequestStore;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

// ==========================================
// DayReport - 单日评估结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    /// 日索引 (1..M)
    pub day: u32,

    /// 对应日历日期
    pub plan_date: NaiveDate,

    // ===== 命中率 =====
    /// 计算日程当日安排数
    pub scheduled_count: usize,

    /// 与黄金日程的交集大小
    pub matched_count: usize,

    /// 黄金日程当日安排数
    pub gold_count: usize,

    /// 命中率 = 交集 / 黄金安排数; 黄金为空日记 0 (口径约定,非数学必然)
    pub accuracy: f64,

    // ===== 利用率 =====
    /// 当日已用工时
    pub used_hours: f64,

    /// 单日工时上限
    pub work_hour_limit: f64,

    /// 工时利用率 = 已用 / 上限
    pub utilization: f64,
}

// ==========================================
// EvaluationReport - 评估报告
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub day_reports: Vec<DayReport>,

    /// 平均命中率 (对全部 M 天取均值,空黄金日以 0 计入)
    pub average_accuracy: f64,

    /// 总效用 (求解目标函数值)
    pub total_utility: f64,

    /// 已安排请求数
    pub num_scheduled: usize,

    /// 请求总数 N
    pub total_requests: usize,

    /// 安排比例 = 已安排 / N
    pub percentage_scheduled: f64,
}

// ==========================================
// ScheduleEvaluator - 评估引擎
// ==========================================
#[derive(Debug)]
pub struct ScheduleEvaluator;

impl ScheduleEvaluator {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    /// 评估计算日程
    ///
    /// # 参数
    /// - `computed`: 解码得到的计算日程
    /// - `gold`: 黄金日程 (与计算日程共享日索引域)
    /// - `objective_value`: 求解得到的总效用
    /// - `store`: 请求仓储 (取工时)
    /// - `config`: 排期配置 (取日期口径与工时上限)
    #[instrument(skip_all, fields(horizon_days = gold.horizon_days()))]
    pub fn evaluate(
        &self,
        computed: &DaySchedule,
        gold: &DaySchedule,
        objective_value: f64,
        store: &RequestStore,
        config: &ScheduleConfig,
    ) -> EvaluationReport {
        debug_assert_eq!(computed.horizon_days(), gold.horizon_days());

        let mut day_reports = Vec::with_capacity(gold.horizon_days() as usize);
        let mut accuracy_sum = 0.0;

        for (day, gold_set) in gold.iter_days() {
            let empty = std::collections::BTreeSet::new();
            let computed_set = computed.day_set(day).unwrap_or(&empty);

            let matched_count = computed_set.intersection(gold_set).count();
            let accuracy = if gold_set.is_empty() {
                0.0
            } else {
                matched_count as f64 / gold_set.len() as f64
            };
            accuracy_sum += accuracy;

            let used_hours: f64 = computed_set
                .iter()
                .filter_map(|id| store.get(*id))
                .map(|request| request.duration_hours)
                .sum();

            day_reports.push(DayReport {
                day,
                plan_date: config.schedule_date_for(day),
                scheduled_count: computed_set.len(),
                matched_count,
                gold_count: gold_set.len(),
                accuracy,
                used_hours,
                work_hour_limit: config.daily_work_hour_limit,
                utilization: used_hours / config.daily_work_hour_limit,
            });
        }

        let horizon = gold.horizon_days().max(1) as f64;
        let num_scheduled = computed.assigned_count();
        let total_requests = store.request_count();

        let report = EvaluationReport {
            day_reports,
            average_accuracy: accuracy_sum / horizon,
            total_utility: objective_value,
            num_scheduled,
            total_requests,
            percentage_scheduled: if total_requests == 0 {
                0.0
            } else {
                num_scheduled as f64 / total_requests as f64
            },
        };

        debug!(
            average_accuracy = report.average_accuracy,
            num_scheduled = report.num_scheduled,
            "评估完成"
        );
        report
    }
}

impl Default for ScheduleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
