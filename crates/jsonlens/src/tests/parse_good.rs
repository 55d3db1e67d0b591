use alloc::{format, string::String, vec::Vec};

use crate::{BoundsError, Error, parse};

#[test]
fn scalar_roots() {
    assert!(parse("null").unwrap().is_null());
    assert_eq!(parse(" true ").unwrap().as_bool(), Some(true));
    assert_eq!(parse("false").unwrap().as_bool(), Some(false));

    let value = parse("-12.5e2").unwrap();
    let number = value.as_number().unwrap();
    assert!((number.as_f64() + 1250.0).abs() < f64::EPSILON);

    let value = parse(r#""hi""#).unwrap();
    assert_eq!(value.as_string().unwrap().text(), "hi");
}

#[test]
fn empty_containers() {
    let value = parse("[]").unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len().unwrap(), 0);
    assert!(items.is_empty().unwrap());
    assert!(items.is_complete());

    let value = parse("{}").unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len().unwrap(), 0);
    assert!(!object.has("x").unwrap());
}

#[test]
fn whitespace_between_tokens() {
    let value = parse(" { \"a\" :\t[ 1 ,\r\n 2 ] } ").unwrap();
    let object = value.as_object().unwrap();
    let a = object.get("a").unwrap();
    let items = a.as_array().unwrap();
    assert_eq!(items.len().unwrap(), 2);
    assert_eq!(items.get(1).unwrap().as_number().unwrap().as_i64(), Ok(2));
}

#[test]
fn nested_access() {
    let value = parse(r#"{"a": {"b": [1, {"c": true}]}}"#).unwrap();
    let root = value.as_object().unwrap();
    let a = root.get("a").unwrap();
    let b = a.as_object().unwrap().get("b").unwrap();
    let items = b.as_array().unwrap();
    let inner = items.get(1).unwrap();
    let c = inner.as_object().unwrap().get("c").unwrap();
    assert_eq!(c.as_bool(), Some(true));
}

#[test]
fn duplicate_keys_last_occurrence_wins() {
    let value = parse(r#"{"a":1,"b":[10,20,30],"a":2}"#).unwrap();
    let root = value.as_object().unwrap();

    // Reach "b" through pair iteration so the nested array stays
    // suspended.
    let (key, b) = root.pairs().nth(1).unwrap().unwrap();
    assert_eq!(key.text(), "b");
    let b = b.as_array().unwrap();
    assert_eq!(b.known_len(), (0, false));

    assert_eq!(b.get(1).unwrap().as_number().unwrap().as_i64(), Ok(20));

    // Lookup by name sees the later duplicate.
    let a = root.get("a").unwrap();
    assert_eq!(a.as_number().unwrap().as_i64(), Ok(2));
}

#[test]
fn array_iteration_in_source_order() {
    let value = parse("[1, 2, 3, 4]").unwrap();
    let items = value.as_array().unwrap();
    let collected: Vec<i64> = items
        .iter()
        .map(|v| v.unwrap().as_number().unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(collected, [1, 2, 3, 4]);
}

#[test]
fn object_pairs_in_source_order_with_duplicates() {
    let value = parse(r#"{"x":1,"y":2,"x":3}"#).unwrap();
    let object = value.as_object().unwrap();

    let keys: Vec<String> = object.keys().map(Result::unwrap).collect();
    assert_eq!(keys, ["x", "y", "x"]);

    let values: Vec<i64> = object
        .pairs()
        .map(|p| p.unwrap().1.as_number().unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(values, [1, 2, 3]);
}

#[test]
fn object_has_and_missing_keys() {
    let value = parse(r#"{"a":1,"b":2}"#).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.has("a").unwrap());
    assert!(!object.has("zzz").unwrap());
    match object.get("zzz") {
        Err(Error::Bounds(BoundsError::Key(key))) => assert_eq!(key, "zzz"),
        other => panic!("expected a bounds error, got {other:?}"),
    }
}

#[test]
fn key_lookup_decodes_candidate_keys() {
    let value = parse(r#"{"\u0061": 1}"#).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.get("a").unwrap().as_number().unwrap().as_i64(), Ok(1));
    assert!(object.has("a").unwrap());
}

#[test]
fn array_bounds_error_reports_final_length() {
    let value = parse("[1, 2, 3]").unwrap();
    let items = value.as_array().unwrap();
    match items.get(10) {
        Err(Error::Bounds(BoundsError::Index(10, 3))) => {}
        other => panic!("expected a bounds error, got {other:?}"),
    }
}

#[test]
fn number_conversions_through_parse() {
    let value = parse(r#"[0, -7, 18446744073709551615, 2.5, 1e3]"#).unwrap();
    let items = value.as_array().unwrap();

    assert_eq!(items.get(0).unwrap().as_number().unwrap().as_i64(), Ok(0));
    assert_eq!(items.get(1).unwrap().as_number().unwrap().as_i64(), Ok(-7));
    assert_eq!(
        items.get(2).unwrap().as_number().unwrap().as_u64(),
        Ok(u64::MAX)
    );

    let float = items.get(3).unwrap();
    let float = float.as_number().unwrap().clone();
    assert!(!float.is_integer_lexeme());
    assert!((float.as_f64() - 2.5).abs() < f64::EPSILON);

    // Exponent forms are floats even when the value is integral.
    let exp = items.get(4).unwrap();
    assert!(exp.as_number().unwrap().as_i64().is_err());
    assert!((exp.as_number().unwrap().as_f64() - 1000.0).abs() < f64::EPSILON);
}

#[test]
fn raw_span_round_trip() {
    for source in [
        "null",
        "true",
        "-12.5e3",
        r#""x\ny""#,
        r#"{"a":1,"b":[true,null,{"c":"d"}]}"#,
        "[ 1 , [ 2 , [ 3 ] ] ]",
    ] {
        let padded = format!("  {source}\t");
        let value = parse(&padded).unwrap();
        assert_eq!(value.raw_span().unwrap().as_bytes(), source.as_bytes());
    }
}

#[test]
fn deep_nesting_is_iterative() {
    let depth = 10_000;
    let mut source = String::new();
    for _ in 0..depth {
        source.push('[');
    }
    source.push('1');
    for _ in 0..depth {
        source.push(']');
    }
    let value = parse(&source).unwrap();
    // Draining must not exhaust the call stack.
    assert_eq!(value.raw_span().unwrap().as_bytes(), source.as_bytes());
}

#[test]
fn values_outlive_sibling_handles() {
    let element = {
        let value = parse(r#"[{"k": "v"}, 2]"#).unwrap();
        let items = value.as_array().unwrap();
        items.get(0).unwrap()
    };
    // The document and buffer stay alive through the extracted handle.
    let inner = element.as_object().unwrap();
    let v = inner.get("k").unwrap();
    assert_eq!(v.as_string().unwrap().text(), "v");
}
