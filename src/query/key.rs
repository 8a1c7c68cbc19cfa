use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// 查询键的一段
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeySegment {
    /// 资源名、操作名或实体 ID
    Name(String),
    /// 筛选条件的规范化 JSON（键排序、去掉 null）
    Params(String),
}

/// 分层查询键：资源 → 操作 → 筛选条件
///
/// 结构相同的键指向同一个缓存项；按前缀失效时，所有以该前缀开头的键一起失效。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryKey(Vec<KeySegment>);

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        QueryKey(vec![KeySegment::Name(resource.into())])
    }

    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(KeySegment::Name(segment.into()));
        self
    }

    /// 追加筛选条件，全部字段为空的条件等同于没有条件
    pub fn with_params<P: Serialize + ?Sized>(mut self, params: &P) -> Self {
        let value = match serde_json::to_value(params) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Query params for {} are not serializable: {}", self, e);
                return self;
            }
        };
        if let Some(canonical) = canonical_json(&value) {
            self.0.push(KeySegment::Params(canonical));
        }
        self
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }

    pub fn resource(&self) -> Option<&str> {
        match self.0.first() {
            Some(KeySegment::Name(name)) => Some(name),
            _ => None,
        }
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match segment {
                KeySegment::Name(name) => f.write_str(name)?,
                KeySegment::Params(params) => f.write_str(params)?,
            }
        }
        Ok(())
    }
}

/// 规范化 JSON，空对象和 null 返回 `None`
fn canonical_json(value: &Value) -> Option<String> {
    let pruned = prune_nulls(value)?;
    if let Value::Object(map) = &pruned {
        if map.is_empty() {
            return None;
        }
    }
    let mut out = String::new();
    write_sorted(&pruned, &mut out);
    Some(out)
}

fn prune_nulls(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let pruned = map
                .iter()
                .filter_map(|(k, v)| prune_nulls(v).map(|v| (k.clone(), v)))
                .collect();
            Some(Value::Object(pruned))
        }
        Value::Array(items) => Some(Value::Array(
            items.iter().map(|v| prune_nulls(v).unwrap_or(Value::Null)).collect(),
        )),
        other => Some(other.clone()),
    }
}

fn write_sorted(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(k.clone()).to_string());
                out.push(':');
                write_sorted(v, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_sorted(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}
