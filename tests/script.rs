//! This file is the runner of the `safe_access.txt` test script.
//!
//! The script is a sequence of directives, one per line:
//!
//! - `obj: <json>` sets the base object for the following cases.
//! - `vars: <json>` sets the variables for the following cases.
//! - `default: <json>` sets the default value for the following cases.
//! - `path: <path>` starts a case. It is followed by one expectation:
//!   - `=> <json>` expects exactly this value,
//!   - `=> set <json array>` expects a list with these elements in any order,
//!   - `!! <message>` expects an error with this message.
//!
//! Lines starting with `#` are comments.

use libtest_mimic::{Arguments, Failed, Trial};
use safe_access_path::AccessPath;
use serde_json::Value;
use std::str::FromStr;

fn main() {
    let args = Arguments::from_args();

    let tests = parse_script(include_str!("safe_access.txt"));

    // Run all tests and exit the application appropriately.
    libtest_mimic::run(&args, tests).exit();
}

/// The expected outcome of a case.
#[derive(Debug, Clone)]
enum Expect {
    Exact(Value),
    Unordered(Vec<Value>),
    Error(String),
}

fn parse_script(script: &'static str) -> Vec<Trial> {
    let mut tests = vec![];
    let mut obj = Value::Null;
    let mut vars = Value::Object(Default::default());
    let mut default = Value::Null;

    let mut lines = script
        .lines()
        .enumerate()
        .map(|(no, line)| (no, line.trim()))
        // skip comments and blank lines
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));
    while let Some((line_no, line)) = lines.next() {
        if let Some(json) = line.strip_prefix("obj:") {
            obj = parse_json(json, line_no);
            continue;
        }
        if let Some(json) = line.strip_prefix("vars:") {
            vars = parse_json(json, line_no);
            continue;
        }
        if let Some(json) = line.strip_prefix("default:") {
            default = parse_json(json, line_no);
            continue;
        }
        let Some(path) = line.strip_prefix("path:") else {
            panic!("line {}: unexpected directive {line:?}", line_no + 1);
        };
        let path = path.trim().to_string();

        let (expect_no, line) = lines.next().expect("eof");
        let expect = if let Some(msg) = line.strip_prefix("!!") {
            Expect::Error(msg.trim().to_string())
        } else if let Some(json) = line.strip_prefix("=> set") {
            match parse_json(json, expect_no) {
                Value::Array(items) => Expect::Unordered(items),
                other => panic!("line {}: expected an array, got {other}", expect_no + 1),
            }
        } else if let Some(json) = line.strip_prefix("=>") {
            Expect::Exact(parse_json(json, expect_no))
        } else {
            panic!("line {}: expected an expectation, got {line:?}", expect_no + 1);
        };

        let (obj, vars, default) = (obj.clone(), vars.clone(), default.clone());
        tests.push(Trial::test(
            format!("safe_access.txt:{}", line_no + 1),
            move || test(&obj, &path, &vars, default, expect),
        ));
    }
    tests
}

#[track_caller]
fn parse_json(s: &str, line_no: usize) -> Value {
    Value::from_str(s.trim())
        .unwrap_or_else(|e| panic!("line {}: invalid json {s:?}: {e}", line_no + 1))
}

fn test(obj: &Value, path: &str, vars: &Value, default: Value, expect: Expect) -> Result<(), Failed> {
    let actual = AccessPath::new(path).resolve_with_vars(obj, default, vars);
    match (actual, expect) {
        (Ok(resolved), Expect::Exact(expected)) => {
            let actual = resolved.into_json();
            if actual != expected {
                return Err(format!("expect: {expected}\nactual: {actual}").into());
            }
        }
        (Ok(resolved), Expect::Unordered(expected)) => {
            let actual = resolved.into_json();
            let Value::Array(items) = &actual else {
                return Err(format!("expect a list\nactual: {actual}").into());
            };
            let mut actual_items: Vec<String> = items.iter().map(Value::to_string).collect();
            let mut expected_items: Vec<String> = expected.iter().map(Value::to_string).collect();
            actual_items.sort();
            expected_items.sort();
            if actual_items != expected_items {
                return Err(format!("expect: {expected_items:?}\nactual: {actual_items:?}").into());
            }
        }
        (Err(e), Expect::Error(msg)) => {
            if e.to_string() != msg {
                return Err(format!("expect error: {msg}\nactual error: {e}").into());
            }
        }
        (Ok(resolved), Expect::Error(msg)) => {
            return Err(format!(
                "expect error: {msg}\nactual: {}",
                resolved.into_json()
            )
            .into());
        }
        (Err(e), _) => return Err(format!("unexpected error: {e}").into()),
    }
    Ok(())
}
