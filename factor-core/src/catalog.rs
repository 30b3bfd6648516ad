use serde::Deserialize;

/// Static resource the security catalog is loaded from, once per session.
pub const STOCKS_URL: &str = "/static/data/stocks.json";

/// One record of the security catalog. The catalog only feeds autocomplete
/// suggestions; unknown fields in the source JSON are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Security {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_and_without_name() {
        let list: Vec<Security> = serde_json::from_str(
            r#"[{"code":"000001","name":"平安银行"},{"code":"600519"}]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].code, "000001");
        assert_eq!(list[0].name.as_deref(), Some("平安银行"));
        assert_eq!(list[1].name, None);
    }

    #[test]
    fn ignores_extra_fields() {
        let security: Security =
            serde_json::from_str(r#"{"code":"600036","exchange":"SSE","listed":true}"#).unwrap();
        assert_eq!(security.code, "600036");
    }
}
