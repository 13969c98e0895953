use cjk_content::editorial::slugify;
use cjk_content::presentation::{excerpt, format_date};
use proptest::prelude::*;

proptest! {
    #[test]
    fn excerpt_never_exceeds_limit(text in "\\PC{0,400}", max in 1usize..200) {
        let cut = excerpt(&text, max);
        prop_assert!(cut.chars().count() <= max);
    }

    #[test]
    fn short_text_is_only_normalized(words in prop::collection::vec("[a-zé]{1,8}", 0..10)) {
        let text = words.join("  \n ");
        let cut = excerpt(&text, 1_000);
        prop_assert_eq!(cut, words.join(" "));
    }

    #[test]
    fn slug_is_url_safe(title in "\\PC{0,80}") {
        let slug = slugify(&title);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn calendar_dates_always_format(y in 1990i32..2100, m in 1u32..=12, d in 1u32..=28) {
        let raw = format!("{y:04}-{m:02}-{d:02}");
        let formatted = format_date(Some(&raw));
        let day_prefix = format!("{d:02} ");
        prop_assert!(formatted.starts_with(&day_prefix));
        prop_assert!(formatted.ends_with(&y.to_string()));
    }
}
