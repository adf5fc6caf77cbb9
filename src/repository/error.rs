// ==========================================
// 服务请求排期系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== 数据一致性错误 =====
    #[error("请求ID重复: request_id={0}")]
    DuplicateRequestId(u32),

    #[error("请求ID非法: request_id={0} (要求 >= 1)")]
    InvalidRequestId(u32),

    #[error("请求ID不连续: 共 {count} 条请求,缺少 request_id={missing}")]
    NonContiguousIds { count: usize, missing: u32 },

    #[error("工时非法: request_id={request_id}, duration_hours={duration_hours} (要求 > 0)")]
    InvalidDuration {
        request_id: u32,
        duration_hours: f64,
    },

    // ===== 黄金日程错误 =====
    #[error("黄金日程日索引越界: day={day}, 排期天数={horizon_days}")]
    GoldDayOutOfRange { day: u32, horizon_days: u32 },

    #[error("请求在黄金日程中重复出现: request_id={request_id} (day={day})")]
    GoldDuplicateAssignment { request_id: u32, day: u32 },

    #[error("黄金日程引用未知请求: request_id={0}")]
    GoldUnknownRequest(u32),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;
