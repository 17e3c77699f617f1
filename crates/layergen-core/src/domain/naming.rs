//! Derived name variants: casing conversions and pluralization.
//!
//! # Design
//!
//! These are pure functions of their input string — no locale, no state,
//! no dependency on prior calls. The merger and the renderer's filter
//! table both delegate here so that `OrderItem` becomes `order_item` /
//! `orderItem` / `order_items` identically everywhere.
//!
//! Casing delegates to `heck`; pluralization is a small English
//! suffix-rule table, which is all the generated identifiers need.

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

/// `OrderItem` → `order_item`.
pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// `order_item` → `OrderItem`.
pub fn to_pascal_case(s: &str) -> String {
    s.to_pascal_case()
}

/// `order_item` → `orderItem`.
pub fn to_camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

/// Pluralize the final word of an identifier.
///
/// Works on any casing because the rules only inspect the suffix:
/// `category` → `categories`, `OrderItem` → `OrderItems`,
/// `address` → `addresses`.
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let lower = s.to_ascii_lowercase();
    if let Some(stem) = lower.strip_suffix('y') {
        // consonant + y → ies; vowel + y just takes an s (day → days)
        let vowel_before = stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !vowel_before {
            let mut out = s[..s.len() - 1].to_string();
            out.push_str("ies");
            return out;
        }
    }

    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suf| lower.ends_with(suf))
    {
        return format!("{s}es");
    }

    format!("{s}s")
}

/// Inverse of [`pluralize`] for the same rule table.
///
/// `categories` → `category`, `addresses` → `address`, `users` → `user`.
/// Words that are not plural under our rules are returned unchanged.
pub fn singularize(s: &str) -> String {
    let lower = s.to_ascii_lowercase();

    if lower.ends_with("ies") && s.len() > 3 {
        let mut out = s[..s.len() - 3].to_string();
        out.push('y');
        return out;
    }

    if lower.ends_with("es") && s.len() > 2 {
        let stem = &lower[..lower.len() - 2];
        if ["s", "x", "z", "ch", "sh"]
            .iter()
            .any(|suf| stem.ends_with(suf))
        {
            return s[..s.len() - 2].to_string();
        }
    }

    if lower.ends_with('s') && !lower.ends_with("ss") && s.len() > 1 {
        return s[..s.len() - 1].to_string();
    }

    s.to_string()
}

/// `true` if `s` is a PascalCase identifier (`OrderItem`, `User`).
pub fn is_pascal_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// `true` if `s` is a snake_case identifier (`email`, `created_at`).
pub fn is_snake_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    !s.ends_with('_')
        && !s.contains("__")
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_from_pascal() {
        assert_eq!(to_snake_case("OrderItem"), "order_item");
        assert_eq!(to_snake_case("User"), "user");
    }

    #[test]
    fn pascal_case_from_snake() {
        assert_eq!(to_pascal_case("order_item"), "OrderItem");
    }

    #[test]
    fn camel_case_from_pascal() {
        assert_eq!(to_camel_case("OrderItem"), "orderItem");
    }

    #[test]
    fn pluralize_suffix_rules() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("order_item"), "order_items");
        assert_eq!(pluralize("OrderItem"), "OrderItems");
    }

    #[test]
    fn singularize_inverts_pluralize() {
        for word in ["user", "category", "address", "box", "day", "order_item"] {
            assert_eq!(singularize(&pluralize(word)), word);
        }
    }

    #[test]
    fn singularize_leaves_non_plurals_alone() {
        assert_eq!(singularize("glass"), "glass");
        assert_eq!(singularize("y"), "y");
    }

    #[test]
    fn deterministic_naming_is_call_order_independent() {
        // Same input, same output, regardless of what was derived before.
        let first = pluralize(&to_snake_case("OrderItem"));
        let _noise = pluralize("Widget");
        let second = pluralize(&to_snake_case("OrderItem"));
        assert_eq!(first, "order_items");
        assert_eq!(first, second);
    }

    #[test]
    fn casing_predicates() {
        assert!(is_pascal_case("OrderItem"));
        assert!(!is_pascal_case("orderItem"));
        assert!(!is_pascal_case("Order_Item"));
        assert!(is_snake_case("created_at"));
        assert!(!is_snake_case("CreatedAt"));
        assert!(!is_snake_case("bad__name"));
        assert!(!is_snake_case("trailing_"));
    }
}
