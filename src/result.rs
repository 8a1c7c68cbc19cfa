use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 包装层只允许出现的字段
const ENVELOPE_FIELDS: [&str; 2] = ["data", "message"];

/// 去掉后端响应包装
///
/// 大部分接口返回 `{ "data": ..., "message": ... }`，部分旧接口直接返回数据本身。
/// 只有含 `data` 且没有其它字段的对象才按包装处理，带 `data` 字段的业务对象原样返回。
/// 仅由 `data`/`message` 两个字段组成的业务对象无法与包装区分，会被剥掉一层。
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map)
            if map.contains_key("data")
                && map.keys().all(|key| ENVELOPE_FIELDS.contains(&key.as_str())) =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// 带分页的列表数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Paginated<T> {
    pub fn has_more(&self) -> bool {
        (self.page as u64) * (self.limit as u64) < self.total
    }
}

/// 无响应数据的接口
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyResponse {}
