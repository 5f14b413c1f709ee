use fieldprint_core::crypto::field::{
    bn254_modulus, bytes_to_integer, reduce, reduce_be_bytes, text_to_field, FieldElement,
};
use num_bigint::BigUint;

#[test]
fn reduce_stays_below_modulus() {
    let p = bn254_modulus();
    for bytes in [vec![0u8; 1], vec![0xff; 32], vec![0xff; 64], vec![0x30; 33]] {
        let fe = reduce_be_bytes(&bytes);
        assert!(fe.as_biguint() < p);
        assert_eq!(fe, reduce(&bytes_to_integer(&bytes)));
    }
}

#[test]
fn big_endian_matches_biguint() {
    let bytes = [0x12, 0x34, 0x56, 0x78, 0x9a];
    assert_eq!(bytes_to_integer(&bytes), BigUint::from_bytes_be(&bytes));
}

#[test]
fn modulus_matches_arkworks() {
    use ark_ff::PrimeField;
    let ark: BigUint = ark_bn254::Fr::MODULUS.into();
    assert_eq!(&ark, bn254_modulus());
}

#[test]
fn serde_uses_decimal_strings() {
    let fe = FieldElement::from(1234);
    let s = serde_json::to_string(&fe).unwrap();
    assert_eq!(s, "\"1234\"");
    let back: FieldElement = serde_json::from_str(&s).unwrap();
    assert_eq!(back, fe);
    let p = format!("\"{}\"", bn254_modulus());
    assert!(serde_json::from_str::<FieldElement>(&p).is_err());
}

#[test]
fn model_label_packs_into_field() {
    let fe = text_to_field("LSTM-CNN-v1.0");
    let expected = BigUint::from_bytes_le(b"LSTM-CNN-v1.0");
    assert_eq!(fe.as_biguint(), &expected);
}
