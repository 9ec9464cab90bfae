// Account list parsing.
// Turns the comma-separated `accounts` setting into account names.

use crate::error::{ProjectsError, Result};

/// Split a comma-separated account string, trimming each piece.
///
/// Segments that are empty after trimming are dropped so a trailing comma
/// never produces a search for an empty account. Duplicates are kept.
pub fn parse_accounts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|account| !account.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse and reject account names that cannot be a GitHub login.
pub fn validate_accounts(raw: &str) -> Result<Vec<String>> {
    let accounts = parse_accounts(raw);
    for account in &accounts {
        let valid = account
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
        if !valid {
            return Err(ProjectsError::Config(format!(
                "invalid account name {:?}",
                account
            )));
        }
    }
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        assert_eq!(parse_accounts("  a , b,  c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_drops_blank_segments() {
        assert_eq!(parse_accounts("octocat, ,github,"), vec!["octocat", "github"]);
        assert!(parse_accounts("").is_empty());
        assert!(parse_accounts("   ").is_empty());
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        assert_eq!(parse_accounts("b,a,b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_validate_rejects_inner_whitespace() {
        let err = validate_accounts("octocat, git hub").unwrap_err();
        assert!(matches!(err, ProjectsError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_query_syntax() {
        assert!(validate_accounts("a&b").is_err());
        assert!(validate_accounts("octocat#top").is_err());
        assert!(validate_accounts("octo/cat").is_err());
    }

    #[test]
    fn test_validate_accepts_plain_names() {
        assert_eq!(
            validate_accounts("octocat,rust-lang").unwrap(),
            vec!["octocat", "rust-lang"]
        );
    }
}
