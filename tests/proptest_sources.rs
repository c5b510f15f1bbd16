//! Property-based tests for identifiers, license normalization and
//! package-list parsing.

use make_sbom::license::normalize;
use make_sbom::model::{SpdxId, SPDX_REF_PREFIX};
use make_sbom::sources::{parse_package_list, split_license_field};
use proptest::prelude::*;

fn license_word() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[A-Za-z0-9.+-]{1,12}",
        1 => prop::sample::select(vec!["with", "WITH", "With"]).prop_map(str::to_string),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn deterministic_id_is_stable_and_clean(name in "\\PC{0,40}") {
        let id = SpdxId::deterministic(&name);
        prop_assert_eq!(&id, &SpdxId::deterministic(&name));
        prop_assert!(id.as_str().starts_with(SPDX_REF_PREFIX));
        let suffix = &id.as_str()[SPDX_REF_PREFIX.len()..];
        prop_assert!(!suffix.contains('_'));
        prop_assert!(!suffix.contains('+'));
    }

    #[test]
    fn unique_ids_extend_the_deterministic_form(name in "[a-z0-9_+.-]{1,30}") {
        let first = SpdxId::unique(&name);
        let second = SpdxId::unique(&name);
        prop_assert_ne!(&first, &second);
        let base = format!("{}-", SpdxId::deterministic(&name));
        prop_assert!(first.as_str().starts_with(&base));
    }

    #[test]
    fn normalize_is_idempotent(token in "\\PC{0,60}") {
        let once = normalize(&token);
        let twice = normalize(&once.to_string());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn package_list_parser_doesnt_panic(content in "\\PC{0,2000}") {
        let _ = parse_package_list(&content);
    }

    #[test]
    fn dpkg_like_input_doesnt_panic(rows in prop::collection::vec("\\PC{0,80}", 0..10)) {
        let mut content = String::from("\"St\",\"Name\",\"Version\",\"Arch\",\"Description\",\"Licenses\"\n");
        for row in rows {
            content.push_str(&row);
            content.push('\n');
        }
        let _ = parse_package_list(&content);
    }

    #[test]
    fn apk_lines_are_read_back(
        name in "[a-z][a-z0-9-]{0,15}[a-z]",
        version in "[0-9]{1,2}\\.[0-9]{1,2}",
        release in 0u32..20,
        license in "[A-Za-z0-9. -]{1,20}",
    ) {
        let line = format!("{name}-{version}-r{release} aarch64 {{{name}}} ({license}) [installed]\n");
        let records = parse_package_list(&line);
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(&records[0].name, &name);
        prop_assert_eq!(&records[0].version, &format!("{version}-r{release}"));
    }

    #[test]
    fn license_split_keeps_every_word(words in prop::collection::vec(license_word(), 0..12)) {
        let field = words.join(" ");
        let tokens = split_license_field(&field);
        let rejoined: Vec<String> = tokens
            .iter()
            .flat_map(|t| t.split_whitespace().map(str::to_string))
            .collect();
        prop_assert_eq!(rejoined, words);
    }

    #[test]
    fn license_split_never_starts_a_token_after_with(words in prop::collection::vec(license_word(), 1..12)) {
        let tokens = split_license_field(&words.join(" "));
        for pair in tokens.windows(2) {
            let ends_with_with = pair[0]
                .split_whitespace()
                .last()
                .is_some_and(|w| w.eq_ignore_ascii_case("with"));
            let starts_with_with = pair[1]
                .split_whitespace()
                .next()
                .is_some_and(|w| w.eq_ignore_ascii_case("with"));
            prop_assert!(!ends_with_with, "token ends with a dangling WITH: {:?}", tokens);
            prop_assert!(!starts_with_with, "token starts with WITH: {:?}", tokens);
        }
    }
}
