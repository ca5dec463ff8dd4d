#[cfg(test)]
mod tests {
    use crate::testing::call;
    use crate::unit;
    use ksr_core::Value;
    use num_bigint::BigInt;

    #[test]
    fn test_encode_scalars_and_lists() {
        let value = Value::list(vec![Value::Long(1), Value::Bool(true), Value::text("a")]);
        assert_eq!(call("json", "encode", vec![value]).unwrap(), Value::text(r#"[1,true,"a"]"#));
    }

    #[test]
    fn test_encode_big_int_as_string() {
        let big = Value::big_int(BigInt::from(u64::MAX) * 2);
        assert_eq!(
            call("json", "encode", vec![big]).unwrap(),
            Value::text("\"36893488147419103230\"")
        );
    }

    #[test]
    fn test_parse_object() {
        let parsed = call("json", "parse", vec![Value::text(r#"{"a": [1, 2.5, null]}"#)]).unwrap();
        let expected = Value::map(vec![(
            Value::text("a"),
            Value::list(vec![Value::Long(1), Value::Double(2.5), unit()]),
        )]);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_large_unsigned() {
        let parsed = call("json", "parse", vec![Value::text("18446744073709551615")]).unwrap();
        assert_eq!(parsed, Value::big_int(BigInt::from(u64::MAX)));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(call("json", "parse", vec![Value::text("{")]).is_err());
        assert!(call("json", "parse", vec![Value::Long(1)]).is_err());
    }

    #[test]
    fn test_pretty_is_multiline() {
        let value = Value::list(vec![Value::Long(1)]);
        let Value::Text(out) = call("json", "pretty", vec![value]).unwrap() else {
            panic!("expected text");
        };
        assert!(out.contains('\n'));
    }
}
