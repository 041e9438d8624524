/// Convert a CamelCase model name to snake_case
///
/// Used for function-view names (`BlogPost` → `blog_post_list`).
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(to_snake_case("BlogPost"), "blog_post");
/// assert_eq!(to_snake_case("HTTPLog"), "http_log");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// URL segment for a model: the lowercased name with no separators.
pub fn route_segment(model: &str) -> String {
    model.to_ascii_lowercase()
}

/// Python tuple literal for a `fields` declaration, or `'__all__'` when
/// there is nothing to list.
pub fn fields_literal(fields: &[&str]) -> String {
    match fields {
        [] => "'__all__'".to_string(),
        [one] => format!("('{one}',)"),
        many => {
            let quoted: Vec<String> = many.iter().map(|f| format!("'{f}'")).collect();
            format!("({})", quoted.join(", "))
        }
    }
}

/// Whether `s` can start a Python module name: ASCII letters, digits and
/// underscores, not beginning with a digit.
pub fn is_module_fragment(s: &str) -> bool {
    !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Post"), "post");
        assert_eq!(to_snake_case("BlogPost"), "blog_post");
        assert_eq!(to_snake_case("HTTPLog"), "http_log");
        assert_eq!(to_snake_case("Model2Thing"), "model2_thing");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_route_segment() {
        assert_eq!(route_segment("BlogPost"), "blogpost");
    }

    #[test]
    fn test_fields_literal() {
        assert_eq!(fields_literal(&[]), "'__all__'");
        assert_eq!(fields_literal(&["id"]), "('id',)");
        assert_eq!(fields_literal(&["id", "title"]), "('id', 'title')");
    }

    #[test]
    fn test_is_module_fragment() {
        assert!(is_module_fragment("api_"));
        assert!(is_module_fragment(""));
        assert!(!is_module_fragment("api-v1"));
        assert!(!is_module_fragment("../x"));
        assert!(!is_module_fragment("1api_"));
        assert!(is_module_fragment("v1_"));
        assert!(is_module_fragment("_1"));
    }
}
