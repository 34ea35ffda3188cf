use billwatch::error::BillwatchError;

#[test]
fn error_constructors() {
    assert!(matches!(
        BillwatchError::config("x"),
        BillwatchError::Config { .. }
    ));
    assert!(matches!(BillwatchError::io("x"), BillwatchError::Io { .. }));
    assert!(matches!(
        BillwatchError::network("x"),
        BillwatchError::Network { .. }
    ));
    assert!(matches!(
        BillwatchError::portal("x"),
        BillwatchError::Portal { .. }
    ));
    assert!(matches!(
        BillwatchError::validation("f", "m"),
        BillwatchError::Validation { .. }
    ));
    assert!(matches!(
        BillwatchError::timeout("x"),
        BillwatchError::Timeout { .. }
    ));
    assert!(matches!(
        BillwatchError::generic("x"),
        BillwatchError::Generic { .. }
    ));
}

#[test]
fn from_serde_json_is_serialization() {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let converted: BillwatchError = err.into();
    assert!(matches!(converted, BillwatchError::Serialization { .. }));
}

#[test]
fn display_messages() {
    let e = BillwatchError::validation("sensors", "bad");
    let s = format!("{}", e);
    assert!(s.contains("Validation error"));
    assert!(s.contains("sensors"));
}
