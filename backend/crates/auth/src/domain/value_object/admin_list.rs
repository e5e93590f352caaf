//! Admin Allow-List
//!
//! Parsed from a comma-separated list such as the `ADMIN_MAIL` setting.
//! Entries are trimmed and lower-cased like [`Email`], so matching is
//! case-insensitive but otherwise exact.

use crate::domain::value_object::email::Email;

/// Normalized admin addresses
///
/// Both the entries and the address passed to [`AdminList::contains`] are
/// trimmed and case-folded [`Email`]s, so `Head@Uni.edu` matches
/// `head@uni.edu` and nothing partial matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminList(Vec<Email>);

impl AdminList {
    /// Parse a comma-separated list, skipping blanks and logging invalid entries
    pub fn parse(raw: &str) -> Self {
        let mut admins = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match Email::new(entry) {
                Ok(email) if !admins.contains(&email) => admins.push(email),
                Ok(_) => {}
                Err(e) => tracing::warn!(entry, error = %e, "Ignoring invalid admin address"),
            }
        }
        Self(admins)
    }

    pub fn contains(&self, email: &Email) -> bool {
        self.0.iter().any(|admin| admin == email)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Email> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_skips_blanks() {
        let list = AdminList::parse(" head@uni.edu ,, dean@uni.edu,");
        assert_eq!(list.len(), 2);
        assert!(list.contains(&Email::new("head@uni.edu").unwrap()));
        assert!(list.contains(&Email::new("dean@uni.edu").unwrap()));
    }

    #[test]
    fn test_parse_skips_invalid_and_duplicates() {
        let list = AdminList::parse("nope, a@uni.edu, A@uni.edu");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_matching_ignores_case() {
        let list = AdminList::parse(" HEAD@Uni.EDU ");
        assert!(list.contains(&Email::new("head@uni.edu").unwrap()));
        assert!(list.contains(&Email::new("Head@uni.edu").unwrap()));
    }

    #[test]
    fn test_no_partial_matches() {
        let list = AdminList::parse("head@uni.edu");
        assert!(!list.contains(&Email::new("ahead@uni.edu").unwrap()));
        assert!(!list.contains(&Email::new("head@uni.edu.evil.com").unwrap()));
        assert!(AdminList::parse("").is_empty());
    }
}
