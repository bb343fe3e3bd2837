use crate::domain::ports::Storage;
use crate::utils::error::{DrillError, Result};
use serde::Serialize;
use serde_json::Value;

pub const SAMPLE_COMPANY: &str = r#"{
   "company": {
      "employee": {
         "name": "emma",
         "payable": {
            "salary": 7000,
            "bonus": 800
         }
      }
   }
}"#;

const SALARY_POINTER: &str = "/company/employee/payable/salary";

pub fn parse_company(json: &str) -> Result<Value> {
    Ok(serde_json::from_str(json)?)
}

pub fn salary(doc: &Value) -> Result<i64> {
    doc.pointer(SALARY_POINTER)
        .and_then(Value::as_i64)
        .ok_or_else(|| DrillError::ValidationError {
            message: format!("No integer salary at {}", SALARY_POINTER),
        })
}

/// 在 company.employee 底下加入 birth_date
pub fn with_birth_date(mut doc: Value, birth_date: &str) -> Result<Value> {
    let employee = doc
        .pointer_mut("/company/employee")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| DrillError::ValidationError {
            message: "No employee object at /company/employee".to_string(),
        })?;
    employee.insert(
        "birth_date".to_string(),
        Value::String(birth_date.to_string()),
    );
    Ok(doc)
}

/// 四格縮排輸出
pub fn to_pretty_json(doc: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut serializer)?;
    Ok(buf)
}

pub async fn dump<S: Storage>(storage: &S, name: &str, doc: &Value) -> Result<()> {
    let bytes = to_pretty_json(doc)?;
    storage.write_file(name, &bytes).await?;
    tracing::info!("💾 Wrote {} bytes to {}", bytes.len(), name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::test_support::MockStorage;

    #[test]
    fn test_navigate_and_extend() {
        let doc = parse_company(SAMPLE_COMPANY).unwrap();
        assert_eq!(salary(&doc).unwrap(), 7000);

        let doc = with_birth_date(doc, "1991-12-31").unwrap();
        assert_eq!(doc["company"]["employee"]["birth_date"], "1991-12-31");
        assert_eq!(doc["company"]["employee"]["name"], "emma");
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse_company("{not json").is_err());
        let doc = parse_company(r#"{"company": {"employee": 3}}"#).unwrap();
        assert!(salary(&doc).is_err());
        assert!(with_birth_date(doc, "1991-12-31").is_err());
    }

    #[tokio::test]
    async fn test_dump_writes_indented_json() {
        let storage = MockStorage::new();
        let doc = with_birth_date(parse_company(SAMPLE_COMPANY).unwrap(), "1991-12-31").unwrap();
        dump(&storage, "dump.json", &doc).await.unwrap();

        let written = String::from_utf8(storage.get_file("dump.json").await.unwrap()).unwrap();
        assert!(written.starts_with("{\n    \"company\": {"));
        let reparsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(reparsed, doc);
    }
}
