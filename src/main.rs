use std::io::Write;

use safe_access_path::AccessPath;

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}: ");
    std::io::stdout().flush().ok()?;
    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_owned()),
    }
}

fn main() {
    loop {
        let Some(json) = read_line("json") else {
            return;
        };
        let Some(path) = read_line("path") else {
            return;
        };
        let Some(vars) = read_line("vars") else {
            return;
        };

        let json: serde_json::Value = match serde_json::from_str(&json) {
            Ok(json) => json,
            Err(err) => {
                println!("invalid json: {err}");
                continue;
            }
        };
        let vars: serde_json::Value = if vars.is_empty() {
            serde_json::json!({})
        } else {
            match serde_json::from_str(&vars) {
                Ok(vars) => vars,
                Err(err) => {
                    println!("invalid vars: {err}");
                    continue;
                }
            }
        };
        let path = AccessPath::new(&path);
        match path.resolve_with_vars(&json, serde_json::Value::Null, &vars) {
            Ok(resolved) if resolved.is_default() => println!("(default) null"),
            Ok(resolved) => println!("{}", resolved.into_json()),
            Err(err) => println!("{err}"),
        }
    }
}
