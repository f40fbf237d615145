/// Quotes `text` as a JSON string literal, for error messages.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Converts a string to PascalCase.
/// - If the string contains underscores, it splits on underscores and converts each word
///   so that its first letter is uppercase and the rest lowercase.
/// - If the string does not contain underscores and is fully uppercase, only the first
///   letter stays uppercase.
/// - Otherwise, it ensures only the first letter is uppercase.
pub fn to_pascal_case(s: &str) -> String {
    if s.contains('_') {
        s.split('_')
         .filter(|word| !word.is_empty())
         .map(|word| capitalize(&word.to_lowercase()))
         .collect::<String>()
    } else if s == s.to_uppercase() {
        capitalize(&s.to_lowercase())
    } else {
        capitalize(s)
    }
}

/// Like [`to_pascal_case`] but with a lowercase first letter.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().to_string() + chars.as_str(),
    }
}

/// Converts a string to snake_case.
/// Consecutive uppercase letters are kept together so acronyms stay intact
/// (e.g. "sessionID" becomes "session_id").
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut snake = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                if prev != '_'
                    && (!prev.is_uppercase() || (i + 1 < chars.len() && chars[i + 1].is_lowercase()))
                {
                    snake.push('_');
                }
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// Turns a dotted protobuf package (`greet.v1`) into a Go package identifier (`greet_v1`).
pub fn to_go_ident(s: &str) -> String {
    s.chars()
     .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
     .collect()
}

/// Package name of a Go import path: the part after `;` when present,
/// otherwise the last path segment (`example.com/greet;greetpb` is `greetpb`,
/// `example.com/greet/v1` is `v1`).
pub fn go_package_name(import_path: &str) -> String {
    let name = match import_path.split_once(';') {
        Some((_, name)) => name,
        None => import_path.rsplit('/').next().unwrap_or(import_path),
    };
    to_go_ident(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}
