#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use rust_decimal::Decimal;

    use crate::error::EvalError;
    use crate::op::{Repr, cast};
    use crate::val::{Value, ValueKind};

    fn to(value: impl Into<Value>, target: Repr) -> Value {
        cast(&value.into(), target).unwrap()
    }

    #[test]
    fn narrowing_keeps_low_bits() {
        assert_eq!(to(300i64, Repr::Byte), Value::Byte(44));
        assert_eq!(to(70000i32, Repr::Short), Value::Short(4464));
        assert_eq!(to(-1i32, Repr::Long), Value::Long(-1));
        assert_eq!(to(i64::MAX, Repr::Int), Value::Int(-1));
    }

    #[test]
    fn reals_truncate_and_saturate() {
        assert_eq!(to(3.9f64, Repr::Int), Value::Int(3));
        assert_eq!(to(-3.9f64, Repr::Long), Value::Long(-3));
        assert_eq!(to(1e20f64, Repr::Int), Value::Int(i32::MAX));
        assert_eq!(to(f64::NAN, Repr::Int), Value::Int(0));
        // saturates at 32 bits, then narrows
        assert_eq!(to(1e10f64, Repr::Byte), Value::Byte(-1));
        assert_eq!(to(2.5f32, Repr::Double), Value::Double(2.5));
        assert_eq!(to(0.1f64, Repr::Float), Value::Float(0.1));
    }

    #[test]
    fn big_integers() {
        let big: BigInt = BigInt::from(1u128 << 64) + 5;
        assert_eq!(to(big.clone(), Repr::Long), Value::Long(5));
        assert_eq!(to(BigInt::from(-1), Repr::Int), Value::Int(-1));
        assert_eq!(to(7i32, Repr::BigInt), Value::big_int(7));
        assert_eq!(to(3.7f64, Repr::BigInt), Value::big_int(3));
        assert_eq!(
            to(BigInt::from(1u128 << 100), Repr::Double),
            Value::Double(2f64.powi(100))
        );
        assert_eq!(to(big.clone(), Repr::BigInt), Value::from(big));
    }

    #[test]
    fn decimals() {
        assert_eq!(to(Decimal::new(1275, 2), Repr::Int), Value::Int(12));
        assert_eq!(to(Decimal::new(-1275, 2), Repr::Long), Value::Long(-12));
        assert_eq!(to(Decimal::new(129, 1), Repr::BigInt), Value::big_int(12));
        assert_eq!(to(5i32, Repr::Decimal), Value::Decimal(Decimal::from(5)));
        assert_eq!(to(0.5f64, Repr::Decimal), Value::Decimal(Decimal::new(5, 1)));
        assert_eq!(to(Decimal::new(25, 1), Repr::Double), Value::Double(2.5));
    }

    #[test]
    fn unrepresentable_decimals_fail() {
        assert!(matches!(
            cast(&Value::Double(f64::NAN), Repr::Decimal),
            Err(EvalError::Arithmetic(_))
        ));
        assert!(matches!(
            cast(&Value::big_int(BigInt::from(1u128 << 120)), Repr::Decimal),
            Err(EvalError::Arithmetic(_))
        ));
    }

    #[test]
    fn non_numbers_are_rejected() {
        assert_eq!(
            cast(&Value::text("12"), Repr::Int),
            Err(EvalError::TypeMismatch {
                context: "numeric cast",
                expected: "number",
                found: ValueKind::Text,
            })
        );
    }
}
