// ==========================================
// 服务请求排期系统 - 服务请求领域模型
// ==========================================
// 职责: 定义服务请求主实体与导入原始记录
// 红线: 请求一经装载不可变更,仅由 RequestStore 持有
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ServiceRequest - 服务请求主数据
// ==========================================
// 标识: request_id 唯一,装载完成后保证连续覆盖 [1, N]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    // ===== 主键 =====
    pub request_id: u32,           // 请求ID

    // ===== 属性 =====
    pub submission_date: NaiveDate, // 提交日期
    pub urgency: u32,               // 紧急等级 (非负整数层级)
    pub duration_hours: f64,        // 所需工时 (小时, > 0)
}

// ==========================================
// RawRequestRecord - 导入原始记录
// ==========================================
// 用途: CSV 行在字段校验前的中间形态,保留行号用于诊断
#[derive(Debug, Clone, Default)]
pub struct RawRequestRecord {
    pub request_id: Option<u32>,
    pub submission_date: Option<NaiveDate>,
    pub urgency: Option<u32>,
    pub duration_hours: Option<f64>,

    // 源文件行号 (从 1 计数, 不含表头)
    pub row_number: usize,
}
