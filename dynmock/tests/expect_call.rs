use dynmock::{call, expect_call, Error, MockObject};

#[test]
fn success() {
    let mock = MockObject::new();

    expect_call!(mock, sum(1, 2) => 3);
    expect_call!(mock, meaning_of_life() => 42_u8);

    let sum: i32 = call!(mock, sum(1, 2)).unwrap();
    let meaning: u8 = call!(mock, meaning_of_life()).unwrap();

    assert_eq!(3, sum);
    assert_eq!(42, meaning);
    assert!(mock.verify().unwrap());
}

#[test]
fn chained() {
    let mock = MockObject::new();

    expect_call!(expect_call!(mock, a() => 1), b("x") => 2);

    assert!(mock.responds_to("a"));
    assert!(mock.responds_to("b"));
}

#[test]
fn raw_identifier() {
    let mock = MockObject::new();

    expect_call!(mock, r#type() => "mock");

    assert!(mock.responds_to("type"));
    assert_eq!("mock", call!(mock, r#type()).unwrap_or(""));
}

#[test]
fn arity_mismatch() {
    let mock = MockObject::new();

    expect_call!(mock, sum(1, 2) => 3);

    let res: Result<i32, Error> = call!(mock, sum(1));

    assert!(matches!(res, Err(Error::ArgumentMismatch { given: 1, .. })));
}
