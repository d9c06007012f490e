//! Integration tests for the argument classification axes

use plspec_foundation::{Direction, DriverType, TypeFamily};

#[test]
fn direction_flags() {
    let flags: Vec<(bool, bool)> = [Direction::In, Direction::Out, Direction::InOut]
        .into_iter()
        .map(|d| (d.takes_input(), d.produces_output()))
        .collect();
    assert_eq!(flags, vec![(true, false), (false, true), (true, true)]);
}

#[test]
fn direction_keywords() {
    assert_eq!(Direction::default().to_string(), "in");
    assert_eq!(Direction::Out.to_string(), "out");
    assert_eq!(Direction::InOut.to_string(), "in out");
}

#[test]
fn families_are_distinct() {
    let names: Vec<&str> = TypeFamily::ALL.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["scalar", "large-object", "cursor"]);
}

#[test]
fn driver_type_is_an_opaque_token() {
    let token = DriverType::new("LONG_BINARY");
    assert_eq!(token.as_str(), "LONG_BINARY");
    assert_eq!(token.to_string(), "LONG_BINARY");
    assert_eq!(token, DriverType::new(String::from("LONG_BINARY")));
}
