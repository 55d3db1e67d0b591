use alloc::vec::Vec;

use crate::{Error, parse};

#[test]
fn requesting_the_first_element_parses_only_it() {
    let value = parse("[10, 20, 30, 40]").unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.engine_steps(), 0);

    items.get(0).unwrap();
    assert_eq!(items.engine_steps(), 1);
    assert_eq!(items.known_len(), (1, false));
}

#[test]
fn repeat_access_is_idempotent() {
    let value = parse("[10, 20, 30]").unwrap();
    let items = value.as_array().unwrap();

    let first = items.get(1).unwrap();
    let steps = items.engine_steps();
    let second = items.get(1).unwrap();
    assert_eq!(items.engine_steps(), steps);

    assert_eq!(
        first.as_number().unwrap().as_i64(),
        second.as_number().unwrap().as_i64()
    );
    assert_eq!(
        first.raw_span().unwrap().start(),
        second.raw_span().unwrap().start()
    );
}

#[test]
fn known_len_never_forces() {
    let value = parse("[1, 2, 3]").unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.known_len(), (0, false));
    assert_eq!(items.engine_steps(), 0);
}

#[test]
fn completeness_convergence() {
    let value = parse("[1, 2, 3]").unwrap();
    let items = value.as_array().unwrap();

    let mut index = 0;
    loop {
        match items.get(index) {
            Ok(_) => index += 1,
            Err(Error::Bounds(_)) => break,
            Err(err) => panic!("{err}"),
        }
    }
    assert_eq!(index, 3);
    assert!(items.is_complete());
    assert_eq!(items.known_len(), (3, true));
}

#[test]
fn iteration_is_restartable() {
    let value = parse("[1, 2, 3]").unwrap();
    let items = value.as_array().unwrap();

    let first: Vec<i64> = items
        .iter()
        .take(2)
        .map(|v| v.unwrap().as_number().unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(first, [1, 2]);
    let steps = items.engine_steps();

    // A fresh pass re-uses the cached entries and only parses the rest.
    let second: Vec<i64> = items
        .iter()
        .map(|v| v.unwrap().as_number().unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(second, [1, 2, 3]);
    assert_eq!(items.engine_steps(), steps + 2);
}

#[test]
fn sibling_access_drains_a_nested_child() {
    let value = parse(r#"[[1, 2, 3], "tail"]"#).unwrap();
    let items = value.as_array().unwrap();

    let head_value = items.get(0).unwrap();
    let head = head_value.as_array().unwrap();
    assert_eq!(head.known_len(), (0, false));

    // Reaching the sibling forces the child to its closing bracket first.
    let tail = items.get(1).unwrap();
    assert_eq!(tail.as_string().unwrap().text(), "tail");
    assert!(head.is_complete());
    assert_eq!(head.known_len(), (3, true));
}

#[test]
fn object_has_stops_at_the_first_match() {
    let value = parse(r#"{"a":1,"b":2,"c":3}"#).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.has("a").unwrap());
    assert_eq!(object.known_len(), (1, false));
}

#[test]
fn abandoning_a_partial_parse_is_a_valid_end_state() {
    let value = parse("[1, 2, 3, 4, 5]").unwrap();
    let items = value.as_array().unwrap();
    items.get(1).unwrap();
    // Nothing else is ever requested; the container simply remains
    // partially materialized.
    assert_eq!(items.known_len(), (2, false));
    assert!(!items.is_complete());
}
