//! 容错反序列化工具
//!
//! 后端响应结构并不稳定（数组 / 包装对象 / 缺字段），这里的函数
//! 把"无法解析"降级为缺省值而不是错误，并记录一条警告。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 用于 `#[serde(deserialize_with = "lenient::option")]`：
/// 字段存在但结构不对时当作缺失处理
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            log::warn!("dropping malformed field: {}", e);
            Ok(None)
        }
    }
}

/// 逐个解析数组元素，跳过无法解析的条目
pub fn collect<T: DeserializeOwned>(items: &[Value], what: &str) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("skipping malformed {} entry: {}", what, e);
                None
            }
        })
        .collect()
}

/// 取 `value[key]` 处的数组
pub fn array_at<'a>(value: &'a Value, key: &str) -> Option<&'a [Value]> {
    value.get(key)?.as_array().map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "option")]
        point: Option<Point>,
    }

    #[test]
    fn malformed_field_becomes_none() {
        let holder: Holder = serde_json::from_value(json!({ "point": "oops" })).unwrap();
        assert!(holder.point.is_none());

        let holder: Holder = serde_json::from_value(json!({ "point": { "x": 3 } })).unwrap();
        assert_eq!(holder.point, Some(Point { x: 3 }));

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.point.is_none());
    }

    #[test]
    fn collect_skips_bad_entries() {
        let items = vec![json!({ "x": 1 }), json!(42), json!({ "x": 2 })];
        let points: Vec<Point> = collect(&items, "point");
        assert_eq!(points, vec![Point { x: 1 }, Point { x: 2 }]);
    }

    #[test]
    fn array_at_requires_an_array() {
        let value = json!({ "devices": [1, 2], "other": {} });
        assert_eq!(array_at(&value, "devices").map(<[Value]>::len), Some(2));
        assert!(array_at(&value, "other").is_none());
        assert!(array_at(&value, "missing").is_none());
    }
}
