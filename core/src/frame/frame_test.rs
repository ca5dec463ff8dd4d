#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::call::CaptureContext;
    use crate::error::EvalError;
    use crate::frame::{Frame, SlotKind};
    use crate::val::Value;

    #[test]
    fn primitive_round_trip() {
        let mut frame = Frame::new(4, vec![], None);
        frame.write(0, Value::Long(42)).unwrap();
        frame.write(1, Value::Byte(-3)).unwrap();
        frame.write(2, Value::Bool(true)).unwrap();
        frame.write(3, Value::Float(1.5)).unwrap();

        assert_eq!(frame.read(0).unwrap(), Value::Long(42));
        assert_eq!(frame.read(1).unwrap(), Value::Byte(-3));
        assert_eq!(frame.read(2).unwrap(), Value::Bool(true));
        assert_eq!(frame.read(3).unwrap(), Value::Float(1.5));
        assert_eq!(frame.slot_kind(0).unwrap(), SlotKind::Long);
        assert_eq!(frame.slot_kind(1).unwrap(), SlotKind::Byte);
    }

    #[test]
    fn same_kind_stays_primitive() {
        let mut frame = Frame::new(1, vec![], None);
        frame.write(0, Value::Int(1)).unwrap();
        frame.write(0, Value::Int(2)).unwrap();
        assert_eq!(frame.slot_kind(0).unwrap(), SlotKind::Int);
        assert_eq!(frame.read(0).unwrap(), Value::Int(2));
    }

    #[test]
    fn kind_change_generalizes_permanently() {
        let mut frame = Frame::new(1, vec![], None);
        frame.write(0, Value::Int(1)).unwrap();
        frame.write(0, Value::Long(2)).unwrap();
        assert_eq!(frame.slot_kind(0).unwrap(), SlotKind::Object);
        assert_eq!(frame.read(0).unwrap(), Value::Long(2));

        frame.write(0, Value::Int(3)).unwrap();
        assert_eq!(frame.slot_kind(0).unwrap(), SlotKind::Object);
        assert_eq!(frame.read(0).unwrap(), Value::Int(3));
    }

    #[test]
    fn non_primitive_values_go_to_object_slots() {
        let mut frame = Frame::new(2, vec![], None);
        frame.write(0, Value::text("hi")).unwrap();
        frame.write(1, Value::Short(7)).unwrap();
        assert_eq!(frame.slot_kind(0).unwrap(), SlotKind::Object);
        assert_eq!(frame.read(0).unwrap(), Value::text("hi"));
        assert_eq!(frame.read(1).unwrap(), Value::Short(7));
    }

    #[test]
    fn unset_and_out_of_range() {
        let mut frame = Frame::new(1, vec![], None);
        assert_eq!(frame.read(0), Err(EvalError::UnsetSlotAccess { slot: 0 }));
        assert_eq!(frame.read(3), Err(EvalError::SlotOutOfRange { slot: 3, len: 1 }));
        assert!(matches!(
            frame.write(5, Value::Int(1)),
            Err(EvalError::SlotOutOfRange { slot: 5, .. })
        ));
    }

    #[test]
    fn arguments_and_captures() {
        let context = Arc::new(CaptureContext::from_pairs(vec![(Arc::from("x"), Value::Int(9))]));
        let frame = Frame::new(0, vec![Value::Int(1), Value::Int(2)], Some(context));

        assert_eq!(frame.argument(1).unwrap(), &Value::Int(2));
        assert!(matches!(
            frame.argument(2),
            Err(EvalError::ArgumentOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(frame.capture("x").unwrap(), Value::Int(9));
        assert!(matches!(frame.capture("y"), Err(EvalError::CaptureNotFound { .. })));
    }

    #[test]
    fn capture_without_context_fails() {
        let frame = Frame::new(0, vec![], None);
        assert!(matches!(frame.capture("x"), Err(EvalError::CaptureNotFound { .. })));
    }
}
