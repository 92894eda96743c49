//! End-to-end match sessions over decoded JSON payloads.

#![allow(clippy::unwrap_used, reason = "tests unwrap fixtures")]

mod common;

use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use shape_match::{pattern, Match, Pattern, Value, ValueError};

#[derive(Debug, Deserialize, PartialEq)]
struct Blog {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(rename = "Title")]
    title: String,
}

#[derive(Debug, PartialEq)]
struct Post {
    id: u32,
    title: String,
}

#[derive(Debug, PartialEq)]
enum Response {
    Posts(Vec<Post>),
    Error(String),
}

fn option_some() -> Value {
    Value::from(json!({ "kind": "some", "value": "hello" }))
}

fn field_str(value: &Value, name: &str) -> String {
    value
        .field(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Shared by the response scenarios: a list of blogs, or an error record.
fn parse_response(value: &Value) -> Match<'_, Result<Response, ValueError>> {
    Match::new(value)
        .with_clause_as(
            pattern!([{ Id: Number, Title: String }]),
            |blogs: Vec<Blog>| {
                Response::Posts(
                    blogs
                        .into_iter()
                        .map(|b| Post {
                            id: b.id,
                            title: b.title,
                        })
                        .collect(),
                )
            },
        )
        .with_clause(pattern!({ errorMessage: String }), |v| {
            Ok(Response::Error(field_str(v, "errorMessage")))
        })
}

#[test]
fn option_some_yields_inner_value() {
    common::init_tracing();
    let value = option_some();
    let result = Match::new(&value)
        .with_clause(pattern!({ kind: "some" }), |o| field_str(o, "value"))
        .evaluate();
    assert_eq!(result.as_deref(), Some("hello"));
}

#[test]
fn unmatched_option_uses_fallback() {
    common::init_tracing();
    let value = option_some();
    let result = Match::new(&value)
        .with_clause(pattern!({ kind: "none" }), |o| field_str(o, "value"))
        .fallback(|| "none".to_owned())
        .evaluate();
    assert_eq!(result.as_deref(), Some("none"));
}

#[test]
fn blog_list_maps_to_posts() {
    common::init_tracing();
    let value = Value::from(json!([
        { "Id": 1, "Title": "a" },
        { "Id": 2, "Title": "b" },
    ]));
    let result = parse_response(&value).evaluate().unwrap().unwrap();
    assert_eq!(
        result,
        Response::Posts(vec![
            Post {
                id: 1,
                title: "a".into()
            },
            Post {
                id: 2,
                title: "b".into()
            },
        ])
    );
}

#[test]
fn error_record_takes_error_branch() {
    common::init_tracing();
    let value = Value::from(json!({ "errorMessage": "err" }));
    let result = parse_response(&value).evaluate().unwrap().unwrap();
    assert_eq!(result, Response::Error("err".into()));
}

#[test]
fn wrong_field_casing_falls_back() {
    common::init_tracing();
    let value = Value::from(json!([{ "Id": 1, "title": "a" }]));
    let session = parse_response(&value);

    assert!(session.evaluate().is_none());

    let result = session
        .fallback(|| Ok(Response::Error("client parse error".into())))
        .evaluate()
        .unwrap()
        .unwrap();
    assert_eq!(result, Response::Error("client parse error".into()));
}

#[test]
fn template_patterns_drive_the_same_session() {
    common::init_tracing();
    let template = Value::from(json!({ "kind": "some" }));
    let pattern = Pattern::from_template(&template).unwrap();
    assert_eq!(pattern, pattern!({ kind: "some" }));

    let value = option_some();
    let result = Match::new(&value)
        .with_clause(pattern, |o| field_str(o, "value"))
        .evaluate();
    assert_eq!(result.as_deref(), Some("hello"));
}

#[test]
fn serialized_structs_can_be_matched() {
    #[derive(serde::Serialize)]
    struct Wrapped<'s> {
        kind: &'s str,
        value: &'s str,
    }

    common::init_tracing();
    let value = Value::from_serialize(&Wrapped {
        kind: "some",
        value: "hi",
    })
    .unwrap();
    let result = Match::new(&value)
        .with_clause(pattern!({ kind: "some", value: String }), |o| field_str(o, "value"))
        .try_evaluate();
    assert_eq!(result.as_deref(), Ok("hi"));
}
