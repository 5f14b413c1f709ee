use fieldprint_core::crypto::poseidon::{DigestMode, PoseidonRegistry};
use fieldprint_core::encode::FieldRecord;
use fieldprint_core::{HashRequest, HashService};
use num_bigint::BigUint;

fn ints(vals: &[u64]) -> Vec<BigUint> {
    vals.iter().map(|v| BigUint::from(*v)).collect()
}

#[test]
fn sensor_record_equals_generic_over_its_encoding() {
    let svc = HashService::default();
    let req = HashRequest::parse(
        "sensor",
        &["1", "1700000000", "25.50", "36.00", "1500", "40.20", "10", "L"],
    )
    .unwrap();
    let HashRequest::Sensor(rec) = &req else {
        panic!("expected sensor");
    };
    assert_eq!(
        rec.encode().unwrap(),
        ints(&[1, 1700000000, 2550, 3600, 1500, 4020, 10, 1])
    );

    let via_record = svc.execute(&req).unwrap();
    let generic = HashRequest::parse(
        "hash",
        &["1", "1700000000", "2550", "3600", "1500", "4020", "10", "1"],
    )
    .unwrap();
    let via_generic = svc.execute(&generic).unwrap();
    assert_eq!(via_record, via_generic);
    // Same arity, so the instance is shared.
    assert_eq!(svc.registry().constructions(), 1);
}

#[test]
fn each_kind_uses_its_own_arity() {
    let svc = HashService::default();
    let reg = PoseidonRegistry::new();
    let cases: [(&str, &[&str], &[u64]); 3] = [
        (
            "prediction",
            &["7", "1", "8765", "12345", "1700000000"],
            &[7, 1, 8765, 12345, 1700000000],
        ),
        (
            "maintenance",
            &["5", "2", "1", "1700000001"],
            &[5, 2, 1, 1700000001],
        ),
        (
            "commitment",
            &["298.5", "308.2", "1500", "42.3", "180", "M"],
            &[29850, 30820, 1500, 4230, 180, 2],
        ),
    ];
    for (cmd, args, encoded) in cases {
        let req = HashRequest::parse(cmd, args).unwrap();
        let direct = reg.hash(&ints(encoded), DigestMode::Element).unwrap();
        assert_eq!(svc.execute(&req).unwrap(), direct, "{cmd}");
    }
    assert_eq!(svc.registry().constructions(), 3);
}

#[test]
fn large_model_hash_fits_prediction() {
    let svc = HashService::default();
    let model = svc.execute(&HashRequest::Text("LSTM-CNN-v1.0".into())).unwrap();
    let model = model.to_decimal();
    let req =
        HashRequest::parse("prediction", &["7", "1", "8765", model.as_str(), "1700000000"])
            .unwrap();
    assert!(svc.execute(&req).is_ok());
}
