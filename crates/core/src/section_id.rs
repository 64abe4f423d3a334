//! Section identity tokens.
//!
//! Section ids are opaque, client-generated strings: `sec_` followed by a
//! uuid-v4. They only need to be unique within one document, and they carry
//! no ordering semantics; render sequence lives solely in the `order`
//! field. Ids must stay stable across save/restore round trips; external
//! references (analytics events keyed by section id) depend on it.

use uuid::Uuid;

const SECTION_ID_PREFIX: &str = "sec_";

/// Generate a fresh section id.
pub fn generate() -> String {
    format!("{SECTION_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// Whether a token looks like an id this generator produced. Older
/// documents may carry ids from other generators; those are still accepted
/// everywhere. This check is only used for diagnostics.
pub fn is_well_formed(id: &str) -> bool {
    id.strip_prefix(SECTION_ID_PREFIX)
        .is_some_and(|rest| rest.len() == 32 && rest.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_well_formed_and_distinct() {
        let a = generate();
        let b = generate();
        assert!(is_well_formed(&a));
        assert!(is_well_formed(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn foreign_ids_are_not_well_formed_but_not_rejected_anywhere() {
        assert!(!is_well_formed("1708012345678-x7k2"));
        assert!(!is_well_formed("sec_short"));
    }
}
