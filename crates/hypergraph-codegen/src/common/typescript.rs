//! Identifier casing and literal formatting for generated TypeScript.

/// Lower-cases the first character: `EventType` becomes `eventType`.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::common::typescript::to_camel_case;
///
/// assert_eq!(to_camel_case("EventType"), "eventType");
/// assert_eq!(to_camel_case("user"), "user");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Converts an identifier to kebab case for CSS classes and DOM ids.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::common::typescript::to_kebab_case;
///
/// assert_eq!(to_kebab_case("EventType"), "event-type");
/// assert_eq!(to_kebab_case("TeamNotes"), "team-notes");
/// assert_eq!(to_kebab_case("user"), "user");
/// ```
#[must_use]
pub fn to_kebab_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('-');
            }
            result.extend(ch.to_lowercase());
        } else if ch == '_' || ch == '$' {
            if i > 0 {
                result.push('-');
            }
        } else {
            result.push(ch);
        }
    }
    result
}

/// Renders a filter value as a JavaScript literal.
///
/// Numeric-looking values (finite decimal numbers) and the words `true` and
/// `false` are emitted bare; everything else is single-quoted with embedded
/// quotes and backslashes escaped.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::common::typescript::format_literal;
///
/// assert_eq!(format_literal("21"), "21");
/// assert_eq!(format_literal("-3.5"), "-3.5");
/// assert_eq!(format_literal("true"), "true");
/// assert_eq!(format_literal("Ann"), "'Ann'");
/// assert_eq!(format_literal("O'Brien"), "'O\\'Brien'");
/// ```
#[must_use]
pub fn format_literal(value: &str) -> String {
    if is_numeric(value) || value == "true" || value == "false" {
        value.to_string()
    } else {
        quote(value)
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed == value
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Single-quotes a string for JavaScript source.
///
/// Backslashes, single quotes and line breaks are escaped.
///
/// # Examples
///
/// ```
/// use hypergraph_codegen::common::typescript::quote;
///
/// assert_eq!(quote("plain"), "'plain'");
/// assert_eq!(quote("a\\b"), "'a\\\\b'");
/// ```
#[must_use]
pub fn quote(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("'{escaped}'")
}
