//! Single-placeholder format templates (`"Hello, %v!"`).
//!
//! Verbs: `%v`, `%s` and `%d` insert the value as text, `%q` inserts it
//! double-quoted, `%%` is a literal percent. Only the first value verb is
//! substituted; later ones are left in place.

use super::tree::stringify;
use serde_json::Value;

/// Render `value` into `template`.
pub fn render(template: &str, value: &Value) -> String {
    let mut result = template.to_string();
    let mut start = 0;
    let mut substituted = false;

    while let Some(open) = result[start..].find('%') {
        let open = start + open;
        let replacement = match result[open + 1..].chars().next() {
            Some('%') => "%".to_string(),
            Some('v' | 's' | 'd') if !substituted => {
                substituted = true;
                stringify(value)
            }
            Some('q') if !substituted => {
                substituted = true;
                Value::String(stringify(value)).to_string()
            }
            _ => {
                start = open + 1;
                continue;
            }
        };

        result.replace_range(open..open + 2, &replacement);
        start = open + replacement.len();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_string() {
        assert_eq!(render("Hello, %v!", &json!("Ana")), "Hello, Ana!");
        assert_eq!(render("%s", &json!("x")), "x");
    }

    #[test]
    fn test_render_number() {
        assert_eq!(render("age=%d", &json!(30)), "age=30");
        assert_eq!(render("%v kg", &json!(2.5)), "2.5 kg");
    }

    #[test]
    fn test_render_quoted() {
        assert_eq!(render("name=%q", &json!("Ana")), r#"name="Ana""#);
        assert_eq!(render("%q", &json!("a\"b")), r#""a\"b""#);
    }

    #[test]
    fn test_render_null_and_object() {
        assert_eq!(render("[%v]", &Value::Null), "[null]");
        assert_eq!(render("%v", &json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_render_literal_percent() {
        assert_eq!(render("%v%%", &json!(50)), "50%");
        assert_eq!(render("100%% %v", &json!("done")), "100% done");
    }

    #[test]
    fn test_render_only_first_placeholder() {
        assert_eq!(render("%v and %v", &json!("a")), "a and %v");
    }

    #[test]
    fn test_render_no_placeholder() {
        assert_eq!(render("static", &json!("ignored")), "static");
    }

    #[test]
    fn test_render_unknown_verb_and_trailing_percent() {
        assert_eq!(render("%x %v %", &json!(1)), "%x 1 %");
    }

    #[test]
    fn test_render_value_containing_percent_is_not_rescanned() {
        assert_eq!(render("%v %%", &json!("%v")), "%v %");
    }

    #[test]
    fn test_render_non_ascii_after_percent() {
        assert_eq!(render("%é %v", &json!("ok")), "%é ok");
    }
}
