#[cfg(test)]
mod tests {
    use crate::testing::call;
    use ksr_core::Value;

    fn text(s: &str) -> Value {
        Value::text(s)
    }

    #[test]
    fn test_length_counts_chars() {
        assert_eq!(call("text", "length", vec![text("héllo")]).unwrap(), Value::Long(5));
        assert_eq!(call("text", "length", vec![text("")]).unwrap(), Value::Long(0));
    }

    #[test]
    fn test_case_and_trim() {
        assert_eq!(call("text", "upper", vec![text("abc")]).unwrap(), text("ABC"));
        assert_eq!(call("text", "lower", vec![text("ABC")]).unwrap(), text("abc"));
        assert_eq!(call("text", "trim", vec![text("  x \n")]).unwrap(), text("x"));
    }

    #[test]
    fn test_contains_text_and_char() {
        assert_eq!(call("text", "contains", vec![text("hello"), text("ell")]).unwrap(), Value::Bool(true));
        assert_eq!(call("text", "contains", vec![text("hello"), Value::Char('z')]).unwrap(), Value::Bool(false));
        assert!(call("text", "contains", vec![text("hello"), Value::Long(1)]).is_err());
    }

    #[test]
    fn test_split() {
        assert_eq!(
            call("text", "split", vec![text("a,b,,c"), text(",")]).unwrap(),
            Value::list(vec![text("a"), text("b"), text(""), text("c")])
        );
        assert!(call("text", "split", vec![text("abc"), text("")]).is_err());
    }

    #[test]
    fn test_concat_uses_text_form() {
        let joined = call("text", "concat", vec![text("n="), Value::Long(3), Value::Bool(false)]).unwrap();
        assert_eq!(joined, text("n=3false"));
        assert_eq!(call("text", "concat", vec![]).unwrap(), text(""));
    }

    #[test]
    fn test_repeat() {
        assert_eq!(call("text", "repeat", vec![text("ab"), Value::Int(3)]).unwrap(), text("ababab"));
        assert!(call("text", "repeat", vec![text("ab"), Value::Long(-1)]).is_err());
    }
}
