// ==========================================
// 服务请求排期系统 - 整数规划模型结构
// ==========================================
// 职责: 决策变量枚举、目标系数、约束行的不可变载体
// 红线: 模型一经构建不再修改; 变量枚举顺序为请求优先、日次之,
//       解码器依赖该顺序做位置逆映射
// ==========================================

use serde::Serialize;
use std::io::Write;

// ==========================================
// VariableIndex - 决策变量双向索引
// ==========================================
// 语义: 变量 x(i,j) 表示"请求 i 在第 j 天服务",取值 {0, 1}
// 枚举: position(i, j) = (i-1) × M + (j-1),全域可逆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariableIndex {
    num_requests: u32,
    horizon_days: u32,
}

impl VariableIndex {
    /// 构造函数
    ///
    /// # 参数
    /// - `num_requests`: 请求数 N
    /// - `horizon_days`: 排期天数 M
    pub fn new(num_requests: u32, horizon_days: u32) -> Self {
        Self {
            num_requests,
            horizon_days,
        }
    }

    /// 请求数 N
    pub fn num_requests(&self) -> u32 {
        self.num_requests
    }

    /// 排期天数 M
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// 变量总数 N × M
    pub fn len(&self) -> usize {
        self.num_requests as usize * self.horizon_days as usize
    }

    /// 变量集合是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (request_id, day) -> 变量位置
    ///
    /// # 返回
    /// - `Some(position)`: 两个下标均在声明域内
    /// - `None`: 任一下标越界
    pub fn position(&self, request_id: u32, day: u32) -> Option<usize> {
        if request_id == 0 || request_id > self.num_requests || day == 0 || day > self.horizon_days
        {
            return None;
        }
        Some((request_id as usize - 1) * self.horizon_days as usize + (day as usize - 1))
    }

    /// 变量位置 -> (request_id, day),position(·) 的逆映射
    pub fn pair(&self, position: usize) -> Option<(u32, u32)> {
        if position >= self.len() {
            return None;
        }
        let m = self.horizon_days as usize;
        let request_id = (position / m) as u32 + 1;
        let day = (position % m) as u32 + 1;
        Some((request_id, day))
    }

    /// 诊断用变量名 (仅用于模型转储,解码不依赖字符串)
    pub fn variable_name(&self, position: usize) -> Option<String> {
        self.pair(position)
            .map(|(request_id, day)| format!("x_{}_{}", request_id, day))
    }
}

// ==========================================
// 约束行
// ==========================================

/// 约束比较方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintSense {
    /// 等于 (=)
    Eq,
    /// 小于等于 (<=)
    Le,
}

/// 线性约束行: Σ coefficient × x(position)  sense  rhs
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintSpec {
    /// 诊断名称 (request{i} / day{j} / day{j}/count)
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

// ==========================================
// ScheduleModel - 排期整数规划模型
// ==========================================
// 模型三元组: 目标系数 + 约束集 + 变量界/类型
// 全部变量为 0-1 整数变量 (下界 0,上界 1)
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleModel {
    index: VariableIndex,
    objective: Vec<f64>,
    constraints: Vec<ConstraintSpec>,
}

impl ScheduleModel {
    /// 变量下界 (所有变量一致)
    pub const VARIABLE_LOWER_BOUND: f64 = 0.0;
    /// 变量上界 (所有变量一致)
    pub const VARIABLE_UPPER_BOUND: f64 = 1.0;

    /// 由构建器一次性装配 (objective 长度必须等于 index.len())
    pub(crate) fn new(
        index: VariableIndex,
        objective: Vec<f64>,
        constraints: Vec<ConstraintSpec>,
    ) -> Self {
        debug_assert_eq!(objective.len(), index.len());
        Self {
            index,
            objective,
            constraints,
        }
    }

    /// 变量双向索引
    pub fn index(&self) -> &VariableIndex {
        &self.index
    }

    /// 变量总数
    pub fn variable_count(&self) -> usize {
        self.index.len()
    }

    /// 目标系数 (最大化方向,按变量枚举顺序)
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// 约束行集合
    pub fn constraints(&self) -> &[ConstraintSpec] {
        &self.constraints
    }

    /// 以 LP 文本格式转储模型 (诊断旁路,非功能契约)
    pub fn write_lp<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let name = |pos: usize| {
            self.index
                .variable_name(pos)
                .unwrap_or_else(|| format!("x_{}", pos))
        };

        writeln!(writer, "Maximize")?;
        write!(writer, " obj:")?;
        for (pos, coefficient) in self.objective.iter().enumerate() {
            write!(writer, " {:+} {}", coefficient, name(pos))?;
        }
        writeln!(writer)?;

        writeln!(writer, "Subject To")?;
        for constraint in &self.constraints {
            write!(writer, " {}:", constraint.name)?;
            for (pos, coefficient) in &constraint.terms {
                write!(writer, " {:+} {}", coefficient, name(*pos))?;
            }
            let sense = match constraint.sense {
                ConstraintSense::Eq => "=",
                ConstraintSense::Le => "<=",
            };
            writeln!(writer, " {} {}", sense, constraint.rhs)?;
        }

        writeln!(writer, "Binaries")?;
        for pos in 0..self.variable_count() {
            writeln!(writer, " {}", name(pos))?;
        }
        writeln!(writer, "End")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_request_major_day_minor() {
        let index = VariableIndex::new(3, 2);
        // 请求优先、日次之
        assert_eq!(index.position(1, 1), Some(0));
        assert_eq!(index.position(1, 2), Some(1));
        assert_eq!(index.position(2, 1), Some(2));
        assert_eq!(index.position(3, 2), Some(5));
    }

    #[test]
    fn test_position_rejects_out_of_domain() {
        let index = VariableIndex::new(3, 2);
        assert_eq!(index.position(0, 1), None);
        assert_eq!(index.position(4, 1), None);
        assert_eq!(index.position(1, 3), None);
    }

    #[test]
    fn test_pair_round_trips_entire_domain() {
        let index = VariableIndex::new(5, 4);
        for request_id in 1..=5 {
            for day in 1..=4 {
                let position = index.position(request_id, day).unwrap();
                assert_eq!(index.pair(position), Some((request_id, day)));
            }
        }
        assert_eq!(index.pair(index.len()), None);
    }

    #[test]
    fn test_lp_dump_contains_sections() {
        let index = VariableIndex::new(1, 2);
        let model = ScheduleModel::new(
            index,
            vec![1.0, 2.0],
            vec![ConstraintSpec {
                name: "request1".to_string(),
                terms: vec![(0, 1.0), (1, 1.0)],
                sense: ConstraintSense::Eq,
                rhs: 1.0,
            }],
        );

        let mut buffer = Vec::new();
        model.write_lp(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Maximize"));
        assert!(text.contains("request1:"));
        assert!(text.contains("Binaries"));
    }
}
