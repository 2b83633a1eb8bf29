use opal::runtime::{List, Value};

#[test]
fn list_round_trip() {
    let mut list = List::new();
    list.append(Value::Number(1.0));
    list.append(Value::Number(2.0));
    list.append(Value::Number(3.0));

    assert_eq!(list.len(), 3);
    let order: Vec<f32> = list.iter().filter_map(Value::as_number).collect();
    assert_eq!(order, vec![1.0, 2.0, 3.0]);
}

#[test]
fn list_formatting_through_mutation() {
    let list = Value::list([Value::Number(10.0), Value::Number(15.0)]);
    list.as_list().unwrap().borrow_mut().append(Value::Number(20.0));
    assert_eq!(list.to_string(), "[ 10, 15, 20 ]");

    let returned = list.concat(&Value::Number(25.0)).unwrap();
    assert_eq!(returned.to_string(), "[ 10, 15, 20, 25 ]");
    // Concat is in place: the original handle sees the new element too.
    assert_eq!(list.to_string(), "[ 10, 15, 20, 25 ]");
}

#[test]
fn pop_returns_the_removed_value() {
    let list = Value::list([Value::Number(1.0), Value::Number(2.0)]);
    let popped = list.as_list().unwrap().borrow_mut().pop().unwrap();
    assert_eq!(popped.as_number(), Some(2.0));
    assert_eq!(list.to_string(), "[ 1 ]");
}

#[test]
fn function_identity_across_kinds() {
    let fun = Value::function(|_| {});
    assert_eq!(fun.equals(&Value::Number(0.0)).unwrap().as_number(), Some(0.0));
    assert_eq!(fun.equals(&Value::list([])).unwrap().as_number(), Some(0.0));

    let twin = fun.clone();
    assert_eq!(fun.equals(&twin).unwrap().as_number(), Some(1.0));
    assert_eq!(fun.not_equals(&twin).unwrap().as_number(), Some(0.0));
}

#[test]
fn unsupported_operation_messages() {
    let list = Value::list([]);
    let fun = Value::function(|_| {});
    let one = Value::Number(1.0);

    assert_eq!(
        list.greater_than(&one).unwrap_err().to_string(),
        "type 'list' does not support greater than"
    );
    assert_eq!(
        list.lesser_than(&one).unwrap_err().to_string(),
        "type 'list' does not support lesser than"
    );
    assert_eq!(
        fun.add(&one).unwrap_err().to_string(),
        "type 'fun' does not support addition"
    );
    assert_eq!(
        fun.bit_xor(&one).unwrap_err().to_string(),
        "type 'fun' does not support bitwise XOR"
    );
}

#[test]
fn broadcast_preserves_order() {
    let list = Value::list([Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
    let doubled = list.mul(&Value::Number(2.0)).unwrap();
    assert_eq!(doubled.to_string(), "[ 2, 4, 6 ]");
    assert_eq!(list.to_string(), "[ 1, 2, 3 ]");
}
