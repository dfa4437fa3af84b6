//! 文档模型与各后端共享的字段操作

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::errors::{AttendlyError, Result};

/// 文档字段集合
pub type DocumentData = Map<String, Value>;

/// 由后端维护、不允许写入文档内容的字段
pub const RESERVED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// 单次批量读取的最大文档数
pub const MAX_BATCH_SIZE: usize = 10;

/// 集合名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Classes,
    UserProfiles,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Classes => "classes",
            Collection::UserProfiles => "userProfiles",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 存储中的一条文档
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: DocumentData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// 将文档反序列化为业务记录，`id` 与时间戳由文档元数据补齐
    pub fn into_record<T: DeserializeOwned>(self) -> Result<T> {
        let mut data = self.data;
        data.insert("id".into(), Value::String(self.id));
        data.insert("createdAt".into(), serde_json::to_value(self.created_at)?);
        data.insert("updatedAt".into(), serde_json::to_value(self.updated_at)?);
        Ok(serde_json::from_value(Value::Object(data))?)
    }
}

/// 将业务记录或补丁序列化为文档字段，剔除保留字段
pub fn to_document_data<T: Serialize>(value: &T) -> Result<DocumentData> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            for field in RESERVED_FIELDS {
                map.remove(field);
            }
            Ok(map)
        }
        other => Err(AttendlyError::serialization(format!(
            "document body must be a JSON object, got {other}"
        ))),
    }
}

/// 按字段过滤文档
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    /// 字段值等于给定值
    Equals { field: String, value: Value },
    /// 数组字段包含给定值
    ArrayContains { field: String, value: Value },
}

impl FieldFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldFilter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldFilter::ArrayContains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, data: &DocumentData) -> bool {
        match self {
            FieldFilter::Equals { field, value } => data.get(field) == Some(value),
            FieldFilter::ArrayContains { field, value } => match data.get(field) {
                Some(Value::Array(items)) => items.contains(value),
                _ => false,
            },
        }
    }
}

/// 数组原子操作的结果
#[derive(Debug, Clone)]
pub struct ArrayMutation {
    /// 数组内容是否发生变化
    pub changed: bool,
    /// 操作后的文档
    pub document: Document,
}

/// 浅合并补丁到文档
pub fn merge_data(target: &mut DocumentData, patch: DocumentData) {
    for (key, value) in patch {
        if RESERVED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        target.insert(key, value);
    }
}

/// 向数组字段添加一个不存在的值，返回是否发生变化
///
/// 字段缺失或不是数组时视为空数组。
pub fn array_union(data: &mut DocumentData, field: &str, value: &Value) -> bool {
    let entry = data
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !entry.is_array() {
        *entry = Value::Array(Vec::new());
    }
    match entry {
        Value::Array(items) if !items.contains(value) => {
            items.push(value.clone());
            true
        }
        _ => false,
    }
}

/// 从数组字段移除给定值，其余元素保持相对顺序，返回是否发生变化
pub fn array_remove(data: &mut DocumentData, field: &str, value: &Value) -> bool {
    match data.get_mut(field) {
        Some(Value::Array(items)) => {
            let before = items.len();
            items.retain(|item| item != value);
            items.len() != before
        }
        _ => false,
    }
}

static LAST_TIMESTAMP_MS: AtomicI64 = AtomicI64::new(0);

/// 单调递增的毫秒时间戳，保证同一进程内创建顺序可区分
pub fn monotonic_now_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_TIMESTAMP_MS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_TIMESTAMP_MS.compare_exchange_weak(
            last,
            next,
            Ordering::SeqCst,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// 毫秒时间戳转换为 UTC 时间
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}
