// ==========================================
// 服务请求排期系统 - 日程解码引擎
// ==========================================
// 职责: 将求解器的变量赋值还原为按日组织的计算日程
// 红线: 仅依赖位置逆映射,不解析变量名字符串;
//       枚举不一致属致命内部错误,立即报错而非修补
// ==========================================

use crate::domain::DaySchedule;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::model::VariableIndex;
use crate::engine::solver::ASSIGNMENT_TOLERANCE;
use crate::repository::RequestStore;
use tracing::{debug, instrument};

// ==========================================
// ScheduleDecoder - 日程解码引擎
// ==========================================
#[derive(Debug)]
pub struct ScheduleDecoder;

impl ScheduleDecoder {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    /// 解码变量赋值为计算日程
    ///
    /// 取值 >= 0.5 的变量判定为"已安排" (吸收求解器浮点误差)
    ///
    /// # 错误
    /// - `DecodeLengthMismatch`: 赋值向量长度与变量数不符
    /// - `DecodePositionOutOfRange`: 位置无法还原 (request, day) 对
    /// - `DecodeUnknownRequest`: 还原出的请求不在仓储中
    #[instrument(skip(self, assignment, index, store), fields(variables = index.len()))]
    pub fn decode(
        &self,
        assignment: &[f64],
        index: &VariableIndex,
        store: &RequestStore,
    ) -> EngineResult<DaySchedule> {
        if assignment.len() != index.len() {
            return Err(EngineError::DecodeLengthMismatch {
                expected: index.len(),
                actual: assignment.len(),
            });
        }

        let mut schedule = DaySchedule::new(index.horizon_days());

        for (position, value) in assignment.iter().enumerate() {
            if *value < ASSIGNMENT_TOLERANCE {
                continue;
            }

            let (request_id, day) =
                index
                    .pair(position)
                    .ok_or(EngineError::DecodePositionOutOfRange {
                        position,
                        variable_count: index.len(),
                    })?;

            if store.get(request_id).is_none() {
                return Err(EngineError::DecodeUnknownRequest {
                    position,
                    request_id,
                });
            }

            schedule.assign(day, request_id);
        }

        debug!(assigned = schedule.assigned_count(), "日程解码完成");
        Ok(schedule)
    }
}

impl Default for ScheduleDecoder {
    fn default() -> Self {
        Self::new()
    }
}
