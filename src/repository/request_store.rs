// ==========================================
// 服务请求排期系统 - 请求仓储
// ==========================================
// 职责: 持有已解析的服务请求与黄金日程,只读查询
// 红线: 每次运行独占一个 RequestStore 实例,禁止全局共享状态
// ==========================================

use crate::domain::{DaySchedule, ServiceRequest};
use crate::repository::error::{StoreError, StoreResult};
use std::collections::BTreeMap;

// ==========================================
// RequestStore - 请求仓储
// ==========================================
// 用途: 模型构建与效用计算的唯一数据来源
// 说明: 装载阶段可变,seal 校验通过后仅供只读引用
#[derive(Debug, Clone)]
pub struct RequestStore {
    requests: BTreeMap<u32, ServiceRequest>,
    gold_schedule: DaySchedule,
}

impl RequestStore {
    /// 创建空仓储
    ///
    /// # 参数
    /// - `horizon_days`: 排期天数 M,同时决定黄金日程的日索引域
    pub fn new(horizon_days: u32) -> Self {
        Self {
            requests: BTreeMap::new(),
            gold_schedule: DaySchedule::new(horizon_days),
        }
    }

    /// 装载一条服务请求
    ///
    /// # 错误
    /// - `DuplicateRequestId`: request_id 已存在
    /// - `InvalidRequestId`: request_id 为 0
    /// - `InvalidDuration`: 工时非正或非有限值
    pub fn insert_request(&mut self, request: ServiceRequest) -> StoreResult<()> {
        if request.request_id == 0 {
            return Err(StoreError::InvalidRequestId(request.request_id));
        }
        if !request.duration_hours.is_finite() || request.duration_hours <= 0.0 {
            return Err(StoreError::InvalidDuration {
                request_id: request.request_id,
                duration_hours: request.duration_hours,
            });
        }
        if self.requests.contains_key(&request.request_id) {
            return Err(StoreError::DuplicateRequestId(request.request_id));
        }

        self.requests.insert(request.request_id, request);
        Ok(())
    }

    /// 将请求记入黄金日程指定日
    ///
    /// # 错误
    /// - `GoldDayOutOfRange`: 日索引越界
    /// - `GoldDuplicateAssignment`: 请求已出现在某日
    pub fn record_gold_assignment(&mut self, day: u32, request_id: u32) -> StoreResult<()> {
        if self.gold_schedule.contains_request(request_id) {
            return Err(StoreError::GoldDuplicateAssignment { request_id, day });
        }
        if !self.gold_schedule.assign(day, request_id) {
            return Err(StoreError::GoldDayOutOfRange {
                day,
                horizon_days: self.gold_schedule.horizon_days(),
            });
        }
        Ok(())
    }

    /// 封存仓储: 校验整体一致性
    ///
    /// 校验项:
    /// 1) 请求ID连续覆盖 [1, N] (变量枚举依赖该性质)
    /// 2) 黄金日程引用的请求均已装载
    pub fn seal(self) -> StoreResult<Self> {
        for (expect, actual) in (1u32..).zip(self.requests.keys()) {
            if expect != *actual {
                return Err(StoreError::NonContiguousIds {
                    count: self.requests.len(),
                    missing: expect,
                });
            }
        }

        for (_, ids) in self.gold_schedule.iter_days() {
            for id in ids {
                if !self.requests.contains_key(id) {
                    return Err(StoreError::GoldUnknownRequest(*id));
                }
            }
        }

        Ok(self)
    }

    // ==========================================
    // 只读查询
    // ==========================================

    /// 请求总数 N
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// 排期天数 M
    pub fn horizon_days(&self) -> u32 {
        self.gold_schedule.horizon_days()
    }

    /// 按ID查询请求
    pub fn get(&self, request_id: u32) -> Option<&ServiceRequest> {
        self.requests.get(&request_id)
    }

    /// 按ID升序遍历全部请求
    pub fn iter(&self) -> impl Iterator<Item = &ServiceRequest> {
        self.requests.values()
    }

    /// 黄金日程 (参考答案,仅用于事后评估)
    pub fn gold_schedule(&self) -> &DaySchedule {
        &self.gold_schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(id: u32, duration_hours: f64) -> ServiceRequest {
        ServiceRequest {
            request_id: id,
            submission_date: NaiveDate::from_ymd_opt(2015, 5, 1).unwrap(),
            urgency: 0,
            duration_hours,
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut store = RequestStore::new(2);
        store.insert_request(request(1, 4.0)).unwrap();

        let err = store.insert_request(request(1, 2.0)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateRequestId(1)));
    }

    #[test]
    fn test_insert_rejects_non_positive_duration() {
        let mut store = RequestStore::new(2);
        let err = store.insert_request(request(1, -3.0)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDuration { request_id: 1, .. }));
    }

    #[test]
    fn test_seal_rejects_id_gap() {
        let mut store = RequestStore::new(2);
        store.insert_request(request(1, 4.0)).unwrap();
        store.insert_request(request(3, 4.0)).unwrap();

        let err = store.seal().unwrap_err();
        assert!(matches!(err, StoreError::NonContiguousIds { missing: 2, .. }));
    }

    #[test]
    fn test_gold_assignment_unique_across_days() {
        let mut store = RequestStore::new(2);
        store.insert_request(request(1, 4.0)).unwrap();
        store.record_gold_assignment(1, 1).unwrap();

        let err = store.record_gold_assignment(2, 1).unwrap_err();
        assert!(matches!(err, StoreError::GoldDuplicateAssignment { request_id: 1, day: 2 }));
    }

    #[test]
    fn test_seal_rejects_gold_unknown_request() {
        let mut store = RequestStore::new(1);
        store.insert_request(request(1, 4.0)).unwrap();
        store.record_gold_assignment(1, 9).unwrap();

        let err = store.seal().unwrap_err();
        assert!(matches!(err, StoreError::GoldUnknownRequest(9)));
    }
}
