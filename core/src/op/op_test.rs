#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use rust_decimal::Decimal;

    use crate::error::EvalError;
    use crate::op::{BinOp, OpFamily, Repr};
    use crate::val::{Value, ValueKind};

    macro_rules! test_op {
        ($name:ident, $op:ident, $l:expr, $r:expr, $res:expr) => {
            #[test]
            fn $name() {
                let l: Value = $l.into();
                let r: Value = $r.into();
                let res: Value = $res.into();
                assert_eq!(BinOp::$op.eval_vals(&l, &r).unwrap(), res);
            }
        };
    }

    test_op!(add_int, Add, 1i32, 2i32, 3i32);
    test_op!(sub_long, Sub, 1i64, 2i64, -1i64);
    test_op!(mul_short, Mul, 300i16, 2i16, 600i16);
    test_op!(add_byte_wraps, Add, 127i8, 1i8, -128i8);
    test_op!(add_int_wraps, Add, i32::MAX, 1i32, i32::MIN);
    test_op!(mul_long_wraps, Mul, i64::MAX, 2i64, -2i64);
    test_op!(add_double, Add, 0.5f64, 0.25f64, 0.75f64);
    test_op!(add_float, Add, 1.5f32, 1.0f32, 2.5f32);

    // Integral division truncates toward zero
    test_op!(div_int, Div, 7i32, 2i32, 3i32);
    test_op!(div_int_negative, Div, -7i32, 2i32, -3i32);
    test_op!(div_long, Div, 9i64, -4i64, -2i64);
    test_op!(div_byte_min_wraps, Div, -128i8, -1i8, -128i8);
    test_op!(div_double, Div, 7.0f64, 2.0f64, 3.5f64);

    test_op!(rem_int, Mod, 7i32, 3i32, 1i32);
    test_op!(rem_sign_follows_dividend, Mod, -7i32, 2i32, -1i32);
    test_op!(rem_positive_dividend, Mod, 7i64, -2i64, 1i64);
    test_op!(rem_double, Mod, 5.5f64, 2.0f64, 1.5f64);

    test_op!(pow_int, Pow, 2i32, 10i32, 1024i32);
    test_op!(pow_int_saturates, Pow, 2i32, 31i32, i32::MAX);
    test_op!(pow_int_fraction_truncates, Pow, 2i32, -1i32, 0i32);
    test_op!(pow_byte_narrows, Pow, 2i8, 7i8, -128i8);
    test_op!(pow_long, Pow, 3i64, 4i64, 81i64);
    test_op!(pow_double, Pow, 9.0f64, 0.5f64, 3.0f64);

    test_op!(and_int, BitAnd, 6i32, 3i32, 2i32);
    test_op!(or_int, BitOr, 6i32, 3i32, 7i32);
    test_op!(xor_int, BitXor, 6i32, 3i32, 5i32);
    test_op!(xor_byte, BitXor, -1i8, 15i8, -16i8);
    test_op!(shl_int_masks_count, Shl, 1i32, 33i32, 2i32);
    test_op!(shl_long_masks_count, Shl, 1i64, 65i64, 2i64);
    test_op!(shl_byte_narrows, Shl, 64i8, 1i8, -128i8);
    test_op!(shr_int_is_arithmetic, Shr, -8i32, 1i32, -4i32);
    test_op!(shr_byte, Shr, -128i8, 1i8, -64i8);
    test_op!(shr_short, Shr, 0x4000i16, 14i16, 1i16);

    test_op!(lt_int, Lt, 1i32, 2i32, true);
    test_op!(ge_long, Ge, 2i64, 2i64, true);
    test_op!(gt_double, Gt, 1.0f64, 2.0f64, false);
    test_op!(le_byte, Le, -1i8, 0i8, true);
    test_op!(ne_short, Ne, 3i16, 3i16, false);
    test_op!(eq_nan_is_false, Eq, f64::NAN, f64::NAN, false);
    test_op!(equals_nan_is_true, Equals, f64::NAN, f64::NAN, true);
    test_op!(equals_across_kinds, Equals, 1i32, 1i64, false);
    test_op!(not_equals_text, NotEquals, "a", "b", true);
    test_op!(equals_lists, Equals, vec![1i32, 2], vec![1i32, 2], true);

    #[test]
    fn division_by_zero() {
        assert_eq!(
            BinOp::Div.eval_vals(&Value::Int(1), &Value::Int(0)),
            Err(EvalError::DivisionByZero { repr: Repr::Int })
        );
        assert_eq!(
            BinOp::Mod.eval_vals(&Value::Long(1), &Value::Long(0)),
            Err(EvalError::DivisionByZero { repr: Repr::Long })
        );
        assert_eq!(
            BinOp::Div.eval_vals(&Value::big_int(1), &Value::big_int(0)),
            Err(EvalError::DivisionByZero { repr: Repr::BigInt })
        );
        assert_eq!(
            BinOp::Div.eval_vals(&Value::Decimal(Decimal::ONE), &Value::Decimal(Decimal::ZERO)),
            Err(EvalError::DivisionByZero { repr: Repr::Decimal })
        );
        // IEEE semantics for reals
        assert_eq!(
            BinOp::Div.eval_vals(&Value::Double(1.0), &Value::Double(0.0)).unwrap(),
            Value::Double(f64::INFINITY)
        );
    }

    #[test]
    fn decimal_division_keeps_dividend_scale_and_rounds_half_down() {
        let div = |l: Decimal, r: Decimal| match BinOp::Div.eval_vals(&Value::Decimal(l), &Value::Decimal(r)) {
            Ok(Value::Decimal(d)) => d,
            other => panic!("expected decimal, got {other:?}"),
        };

        let q = div(Decimal::new(10, 1), Decimal::from(4));
        assert_eq!(q, Decimal::new(2, 1));
        assert_eq!(q.scale(), 1);

        assert_eq!(div(Decimal::new(10, 1), Decimal::from(3)), Decimal::new(3, 1));
        assert_eq!(div(Decimal::from(7), Decimal::from(2)), Decimal::from(3));
        assert_eq!(div(Decimal::from(-7), Decimal::from(2)), Decimal::from(-3));
        assert_eq!(div(Decimal::new(600, 2), Decimal::from(4)), Decimal::new(150, 2));
        assert_eq!(div(Decimal::new(25, 1), Decimal::ONE), Decimal::new(25, 1));
        assert_eq!(div(Decimal::from(5), Decimal::from(2)), Decimal::from(2));
        assert_eq!(div(Decimal::from(-5), Decimal::from(2)), Decimal::from(-2));
    }

    #[test]
    fn decimal_division_rounds_from_exact_remainder() {
        let div = |l: Decimal, r: Decimal| match BinOp::Div.eval_vals(&Value::Decimal(l), &Value::Decimal(r)) {
            Ok(Value::Decimal(d)) => d,
            other => panic!("expected decimal, got {other:?}"),
        };
        let half_and_a_bit = "25000000000000000000000000001".parse::<Decimal>().unwrap();
        let divisor = "50000000000000000000000000001".parse::<Decimal>().unwrap();
        // 0.5 plus ~1e-29 is above the midpoint even though 28 digits read as a tie
        assert_eq!(div(half_and_a_bit, divisor), Decimal::ONE);
        assert_eq!(div(-half_and_a_bit, divisor), Decimal::NEGATIVE_ONE);
        // quotient a hair under 2 near the top of the decimal range
        let nearly_eight = "79999999999999999999999999999".parse::<Decimal>().unwrap();
        let four = "40000000000000000000000000000".parse::<Decimal>().unwrap();
        assert_eq!(div(nearly_eight, four), Decimal::from(2));
        assert_eq!(div(Decimal::from(1), "3.0000000000000000000000000001".parse().unwrap()), Decimal::ZERO);
    }

    #[test]
    fn decimal_arithmetic() {
        let l = Value::Decimal(Decimal::new(15, 1));
        let r = Value::Decimal(Decimal::new(25, 1));
        assert_eq!(BinOp::Add.eval_vals(&l, &r).unwrap(), Value::Decimal(Decimal::from(4)));
        assert_eq!(BinOp::Mul.eval_vals(&l, &r).unwrap(), Value::Decimal(Decimal::new(375, 2)));
        assert_eq!(
            BinOp::Pow.eval_vals(&l, &Value::Decimal(Decimal::from(2))).unwrap(),
            Value::Decimal(Decimal::new(225, 2))
        );
        assert_eq!(BinOp::Mod.eval_vals(&r, &l).unwrap(), Value::Decimal(Decimal::ONE));
        assert_eq!(
            BinOp::Eq
                .eval_vals(&Value::Decimal(Decimal::new(10, 1)), &Value::Decimal(Decimal::new(100, 2)))
                .unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn big_integer_arithmetic() {
        let two = Value::big_int(2);
        assert_eq!(
            BinOp::Pow.eval_vals(&two, &Value::big_int(100)).unwrap(),
            Value::big_int(BigInt::from(1u128 << 100))
        );
        assert_eq!(
            BinOp::Div.eval_vals(&Value::big_int(-7), &two).unwrap(),
            Value::big_int(-3)
        );
        assert_eq!(BinOp::Mod.eval_vals(&Value::big_int(-7), &two).unwrap(), Value::big_int(-1));
        assert!(matches!(
            BinOp::Pow.eval_vals(&two, &Value::big_int(-1)),
            Err(EvalError::Arithmetic(_))
        ));
    }

    #[test]
    fn big_integer_shifts() {
        let one = Value::big_int(1);
        assert_eq!(
            BinOp::Shl.eval_vals(&one, &Value::big_int(100)).unwrap(),
            Value::big_int(BigInt::from(1u128 << 100))
        );
        assert_eq!(BinOp::Shr.eval_vals(&Value::big_int(-1), &Value::big_int(5)).unwrap(), Value::big_int(-1));
        // a negative count reverses direction
        assert_eq!(BinOp::Shl.eval_vals(&Value::big_int(8), &Value::big_int(-2)).unwrap(), Value::big_int(2));
        assert_eq!(BinOp::Shr.eval_vals(&Value::big_int(2), &Value::big_int(-3)).unwrap(), Value::big_int(16));
        assert_eq!(BinOp::BitXor.eval_vals(&Value::big_int(6), &Value::big_int(3)).unwrap(), Value::big_int(5));
    }

    #[test]
    fn bitwise_rejects_reals() {
        assert_eq!(
            BinOp::BitXor.eval_vals(&Value::Double(1.0), &Value::Double(2.0)),
            Err(EvalError::UnsupportedOperandType {
                op: BinOp::BitXor,
                left: ValueKind::Double,
                right: ValueKind::Double,
            })
        );
        assert!(matches!(
            BinOp::Shl.eval_vals(&Value::Float(1.0), &Value::Float(1.0)),
            Err(EvalError::UnsupportedOperandType { op: BinOp::Shl, .. })
        ));
        assert!(matches!(
            BinOp::BitAnd.eval_vals(&Value::Decimal(Decimal::ONE), &Value::Decimal(Decimal::ONE)),
            Err(EvalError::UnsupportedOperandType { .. })
        ));
    }

    #[test]
    fn mismatched_representations_are_unsupported() {
        assert_eq!(
            BinOp::Add.eval_vals(&Value::Int(1), &Value::Long(1)),
            Err(EvalError::UnsupportedOperandType {
                op: BinOp::Add,
                left: ValueKind::Int,
                right: ValueKind::Long,
            })
        );
    }

    #[test]
    fn non_numeric_operands_are_type_mismatches() {
        assert!(matches!(
            BinOp::Add.eval_vals(&Value::text("a"), &Value::Int(1)),
            Err(EvalError::TypeMismatch { found: ValueKind::Text, .. })
        ));
        assert!(matches!(
            BinOp::Lt.eval_vals(&Value::Int(1), &Value::Bool(true)),
            Err(EvalError::TypeMismatch { found: ValueKind::Bool, .. })
        ));
    }

    #[test]
    fn families() {
        assert_eq!(BinOp::Pow.family(), OpFamily::Arithmetic);
        assert_eq!(BinOp::Shr.family(), OpFamily::Bitwise);
        assert_eq!(BinOp::Le.family(), OpFamily::Relational);
        assert_eq!(BinOp::NotEquals.family(), OpFamily::Structural);
        assert!(BinOp::Mod.is_arith());
        assert!(BinOp::Equals.is_cmp());
        assert_eq!(BinOp::Shl.to_string(), "<<");
    }
}
