use serde_json::Value;

/// Key figures, most important first. Nested `loan` results are searched too.
const PRIORITY_KEYS: [&str; 3] = ["monthly_installment", "total_amount", "total_interest"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return format_minimal(result_obj);
    };

    let candidates = [Some(map), map.get("loan").and_then(Value::as_object)];
    for obj in candidates.into_iter().flatten() {
        for key in PRIORITY_KEYS {
            if let Some(val) = obj.get(key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_minimal(val)),
        None => "{}".to_string(),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emi_envelope() {
        let v = json!({"result": {"loan_amount": "100000", "monthly_installment": "8768.35"}});
        assert_eq!(minimal_line(&v), "8768.35");
    }

    #[test]
    fn test_schedule_envelope_uses_loan() {
        let v = json!({"result": {"entries": [], "loan": {"monthly_installment": "4000"}}});
        assert_eq!(minimal_line(&v), "4000");
    }

    #[test]
    fn test_fallback_first_field() {
        let v = json!({"result": {"month": 3}});
        assert_eq!(minimal_line(&v), "month: 3");
    }
}
