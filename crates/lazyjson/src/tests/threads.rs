use std::thread;

use crate::{JsonArray, Value, parse};

const fn assert_send_sync<T: Send + Sync>() {}
const _: () = {
    assert_send_sync::<Value>();
    assert_send_sync::<JsonArray>();
};

#[test]
fn concurrent_readers_see_one_memo() {
    let body: Vec<String> = (0..500).map(|i| format!(r#"{{"n": {i}}}"#)).collect();
    let value = parse(format!("[{}]", body.join(", "))).unwrap();

    let seen: Vec<Vec<Value>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let value = &value;
                scope.spawn(move || {
                    // Each thread walks the array in a different direction.
                    let indices: Vec<usize> = if t % 2 == 0 {
                        (0..500).collect()
                    } else {
                        (0..500).rev().collect()
                    };
                    indices
                        .into_iter()
                        .map(|i| {
                            let element = value.at(i).unwrap();
                            assert_eq!(
                                element.get("n").unwrap().as_i64().unwrap(),
                                i64::try_from(i).unwrap()
                            );
                            element
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let array = value.as_array().unwrap();
    assert_eq!(array.scanned_len(), 500);
    for (t, elements) in seen.iter().enumerate() {
        for (k, element) in elements.iter().enumerate() {
            let index = if t % 2 == 0 { k } else { 499 - k };
            assert!(element.ptr_eq(&array.at(index).unwrap()));
        }
    }
}
