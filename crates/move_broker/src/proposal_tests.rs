use super::*;

#[test]
fn test_bare_move() {
    let p = Proposal::parse("  e2e4\n").unwrap();
    assert_eq!(p.uci, "e2e4");
    assert_eq!(p.comment, None);
}

#[test]
fn test_json_with_comment() {
    let p = Proposal::parse(r#"{"move": "e7e8q", "comment": "promote"}"#).unwrap();
    assert_eq!(p.uci, "e7e8q");
    assert_eq!(p.comment.as_deref(), Some("promote"));
}

#[test]
fn test_json_without_comment() {
    let p = Proposal::parse(r#"{"move":" g1f3 "}"#).unwrap();
    assert_eq!(p.uci, "g1f3");
    assert_eq!(p.comment, None);
}

#[test]
fn test_fenced_json() {
    let raw = "```json\n{\"move\": \"d2d4\", \"comment\": \"\"}\n```";
    let p = Proposal::parse(raw).unwrap();
    assert_eq!(p.uci, "d2d4");
    assert_eq!(p.comment, None);
}

#[test]
fn test_garbage_is_rejected() {
    assert_eq!(Proposal::parse(""), None);
    assert_eq!(Proposal::parse("I think e2e4 is best"), None);
    assert_eq!(Proposal::parse("{\"mv\": \"e2e4\"}"), None);
    assert_eq!(Proposal::parse("{not json"), None);
    assert_eq!(Proposal::parse(r#"{"move": ""}"#), None);
}
