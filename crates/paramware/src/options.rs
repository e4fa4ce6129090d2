//! 提取器配置

use serde::{Deserialize, Serialize};

/// 同名参数出现多次时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// 取第一个值，忽略其余
    #[default]
    First,
    /// 以 400 拒绝
    Reject,
}

/// 参数提取器配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamOptions {
    /// 重复参数策略
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}
