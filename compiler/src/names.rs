//! Identifier casing for generated declarations.
//!
//! Service identifiers such as `super_user`, `page-views` or `app:settings`
//! are split on `-`, `_` and `:`; empty segments are dropped. Only the first
//! character of a segment is touched, the rest keeps its casing.
//!
//! Inputs are always `&str`, so the loosely typed "pass anything through"
//! behaviour of untyped callers reduces to this: text without delimiters
//! comes back with at most its first character changed, and nothing here
//! can fail.

const DELIMITERS: [char; 3] = ['-', '_', ':'];

fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(DELIMITERS).filter(|segment| !segment.is_empty())
}

/// Uppercases the first character of `word`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}

/// `super_user` -> `SuperUser`. Used for type names and enum members.
pub fn pascal_case(text: &str) -> String {
    segments(text).map(capitalize).collect()
}

/// `super_user` -> `superUser`. Used for interface members.
///
/// The first segment is kept as is, so `Super_user` becomes `SuperUser`.
pub fn camel_case(text: &str) -> String {
    let mut pieces = segments(text);
    match pieces.next() {
        None => String::new(),
        Some(first) => {
            let mut out = first.to_string();
            for piece in pieces {
                out.push_str(&capitalize(piece));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("super_user"), "SuperUser");
        assert_eq!(pascal_case("posts"), "Posts");
        assert_eq!(pascal_case("page-views"), "PageViews");
        assert_eq!(pascal_case("app:settings"), "AppSettings");
        assert_eq!(pascal_case("_pb_users_auth_"), "PbUsersAuth");
        assert_eq!(pascal_case("camelAlready"), "CamelAlready");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("super_user"), "superUser");
        assert_eq!(camel_case("title"), "title");
        assert_eq!(camel_case("__double__under"), "doubleUnder");
        assert_eq!(camel_case("Super_user"), "SuperUser");
        assert_eq!(camel_case("a:b-c"), "aBC");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(pascal_case(""), "");
        assert_eq!(camel_case(""), "");
        assert_eq!(pascal_case("___"), "");
        assert_eq!(camel_case("-_:"), "");
    }

    #[test]
    fn test_non_ascii_first_character() {
        assert_eq!(pascal_case("élan_vital"), "ÉlanVital");
        assert_eq!(capitalize("ß"), "SS");
    }
}
