// ==========================================
// 服务请求排期系统 - 排期配置
// ==========================================
// 职责: 排期参数的装载、默认值与校验
// 存储: JSON 配置文件 (serde)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("排期天数非法: horizon_days={0} (要求 > 0)")]
    NonPositiveHorizon(u32),

    #[error("单日工时上限非法: daily_work_hour_limit={0} (要求 > 0)")]
    NonPositiveWorkHourLimit(f64),

    #[error("单日请求数上限非法: daily_request_count_limit=0 (要求 > 0 或不配置)")]
    ZeroRequestCountLimit,

    #[error("模型退化: 请求数={requests}, 排期天数={horizon_days} (变量数为 0)")]
    DegenerateModel { requests: usize, horizon_days: u32 },

    #[error("配置文件读取失败: {0}")]
    FileReadError(String),

    #[error("配置文件解析失败: {0}")]
    JsonParseError(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ScheduleConfig - 排期配置
// ==========================================
// 说明: 默认值取自历史排期口径 (6 天 / 104 工时 / 单日 12 单)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// 排期天数 M
    pub horizon_days: u32,

    /// 排期起始日期 (第 1 天即该日期)
    pub schedule_start_date: NaiveDate,

    /// 单日工时上限 (小时)
    pub daily_work_hour_limit: f64,

    /// 单日请求数上限 (配置后作为显式约束施加; 不配置则不约束)
    #[serde(default)]
    pub daily_request_count_limit: Option<u32>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            horizon_days: 6,
            schedule_start_date: NaiveDate::from_ymd_opt(2015, 5, 8)
                .expect("内置默认日期合法"),
            daily_work_hour_limit: 104.0,
            daily_request_count_limit: Some(12),
        }
    }
}

impl ScheduleConfig {
    /// 从 JSON 文件装载并校验
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileReadError(format!("{}: {}", path.display(), e)))?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| ConfigError::JsonParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置项取值范围
    ///
    /// # 错误
    /// - `NonPositiveHorizon`: 排期天数为 0
    /// - `NonPositiveWorkHourLimit`: 工时上限非正或非有限值
    /// - `ZeroRequestCountLimit`: 请求数上限配置为 0
    pub fn validate(&self) -> ConfigResult<()> {
        if self.horizon_days == 0 {
            return Err(ConfigError::NonPositiveHorizon(self.horizon_days));
        }
        if !self.daily_work_hour_limit.is_finite() || self.daily_work_hour_limit <= 0.0 {
            return Err(ConfigError::NonPositiveWorkHourLimit(
                self.daily_work_hour_limit,
            ));
        }
        if self.daily_request_count_limit == Some(0) {
            return Err(ConfigError::ZeroRequestCountLimit);
        }
        Ok(())
    }

    /// 第 day 天对应的日历日期 (day=1 即起始日期)
    ///
    /// 与效用计算、评估报告共用同一偏移口径
    pub fn schedule_date_for(&self, day: u32) -> NaiveDate {
        self.schedule_start_date + chrono::Duration::days(i64::from(day) - 1)
    }
}
