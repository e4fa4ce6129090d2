//! 内置解析函数
//!
//! 每个解析函数都是全函数：失败通过 `Err` 返回，不会 panic。
//! 新的特化只需要新增一个解析函数和类型标签。

use std::convert::Infallible;
use std::num::ParseIntError;
use thiserror::Error;

/// int64 参数的类型标签
pub const INT64: &str = "int64";
/// string 参数的类型标签
pub const STRING: &str = "string";
/// bool 参数的类型标签
pub const BOOL: &str = "bool";

/// 十进制解析 64 位有符号整数，允许前导正负号
pub fn parse_int64(raw: &str) -> Result<i64, ParseIntError> {
    raw.parse::<i64>()
}

/// 原样返回
pub fn parse_string(raw: &str) -> Result<String, Infallible> {
    Ok(raw.to_string())
}

/// 无法识别的布尔字面量
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bool literal: {0:?}")]
pub struct ParseBoolError(pub String);

/// 解析布尔值
///
/// 接受 `1 t T TRUE true True` 与 `0 f F FALSE false False`
pub fn parse_bool(raw: &str) -> Result<bool, ParseBoolError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(ParseBoolError(other.to_string())),
    }
}
