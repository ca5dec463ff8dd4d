#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use rust_decimal::Decimal;

    use crate::util::fast_map::collect_set;
    use crate::val::{Value, ValueKind};

    #[test]
    fn kinds_and_reprs() {
        assert_eq!(Value::Int(1).kind(), ValueKind::Int);
        assert_eq!(Value::text("a").type_name(), "Text");
        assert!(Value::Decimal(Decimal::ONE).is_numeric());
        assert!(!Value::Bool(true).is_numeric());
        assert!(Value::list(vec![]).repr().is_none());
    }

    #[test]
    fn numeric_equality_is_representation_exact() {
        assert_ne!(Value::Int(1), Value::Long(1));
        assert_ne!(Value::Float(1.0), Value::Double(1.0));
        assert_eq!(Value::big_int(5), Value::from(BigInt::from(5)));
    }

    #[test]
    fn float_equality_uses_bits() {
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert_ne!(Value::Double(0.0), Value::Double(-0.0));
    }

    #[test]
    fn sets_ignore_insertion_order() {
        let a = Value::set(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let b = Value::set(vec![Value::Int(3), Value::Int(1), Value::Int(2), Value::Int(1)]);
        assert_eq!(a, b);

        // equal sets must also collapse when used as keys
        let outer = collect_set(vec![a, b]);
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn map_keeps_last_value_for_repeated_key() {
        let map = Value::map(vec![
            (Value::text("a"), Value::Int(1)),
            (Value::text("a"), Value::Int(2)),
        ]);
        match map {
            Value::Map(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries.get(&Value::text("a")), Some(&Value::Int(2)));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn display() {
        assert_eq!(Value::Int(-12).to_string(), "-12");
        assert_eq!(Value::Double(1.5).to_string(), "1.5");
        assert_eq!(Value::Decimal(Decimal::new(150, 2)).to_string(), "1.50");
        assert_eq!(
            Value::list(vec![Value::Int(1), Value::text("a")]).to_string(),
            r#"[1, "a"]"#
        );
        assert_eq!(Value::tuple(vec![Value::Char('x'), Value::Bool(false)]).to_string(), "('x', false)");
        assert_eq!(Value::map(vec![(Value::text("k"), Value::Long(2))]).to_string(), r#"{"k": 2}"#);
    }

    #[test]
    fn to_text_keeps_text_unquoted() {
        assert_eq!(Value::text("plain").to_text().as_ref(), "plain");
        assert_eq!(Value::Long(42).to_text().as_ref(), "42");
        assert_eq!(Value::Double(0.25).to_text().as_ref(), "0.25");
    }

    #[test]
    fn serialize_to_json() {
        let value = Value::list(vec![
            Value::Int(1),
            Value::text("a"),
            Value::big_int(BigInt::from(1u128 << 100)),
            Value::Decimal(Decimal::new(125, 2)),
        ]);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"[1,"a","1267650600228229401496703205376","1.25"]"#
        );

        let map = Value::map(vec![(Value::Int(1), Value::Bool(true))]);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"1":true}"#);
    }
}
