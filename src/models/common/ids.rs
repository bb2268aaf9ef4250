use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Text(String),
}

/// 宽松解析可选 ID：接受数字、数字字符串、`null` 或空字符串
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Int(id)) => Ok(Some(id)),
        Some(IdRepr::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IdRepr::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("无效的 ID: '{s}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<i64>,
    }

    fn parse(json: &str) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_str::<Probe>(json).map(|p| p.id)
    }

    #[test]
    fn test_accepts_number_and_numeric_string() {
        assert_eq!(parse(r#"{"id": 42}"#).unwrap(), Some(42));
        assert_eq!(parse(r#"{"id": "42"}"#).unwrap(), Some(42));
    }

    #[test]
    fn test_blank_and_missing_are_none() {
        assert_eq!(parse(r#"{"id": null}"#).unwrap(), None);
        assert_eq!(parse(r#"{"id": ""}"#).unwrap(), None);
        assert_eq!(parse(r#"{}"#).unwrap(), None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse(r#"{"id": "abc"}"#).is_err());
    }
}
