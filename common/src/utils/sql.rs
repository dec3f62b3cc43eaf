//! SQL quoting helpers.
//!
//! Path-sourced database and table names are quoted before they are used
//! in SQL text, so arbitrary names work and nothing is spliced raw.

/// Quotes a schema or table identifier with backticks.
///
/// Embedded backticks are doubled per MySQL identifier quoting rules.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quotes a string literal with single quotes.
///
/// Backslashes and embedded quotes are escaped.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ident_is_backtick_quoted() {
        assert_eq!(quote_ident("orders"), "`orders`");
        assert_eq!(quote_ident("my db"), "`my db`");
    }

    #[test]
    fn embedded_backtick_is_doubled() {
        assert_eq!(quote_ident("we`ird"), "`we``ird`");
    }

    #[test]
    fn plain_literal_is_quoted() {
        assert_eq!(quote_literal("orders"), "'orders'");
    }

    #[test]
    fn quote_and_backslash_are_escaped() {
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_literal("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn injection_attempt_stays_inert() {
        let quoted = quote_literal("x' OR '1'='1");
        assert_eq!(quoted, "'x'' OR ''1''=''1'");
    }
}
