use std::sync::Arc;

use anyhow::Result;
use pofilter::{
    CheckError, CheckerConfig, PoUnit, RuleError, RuleSelection, TeeChecker, TranslationUnit,
    UnitFilter,
    spelling::{Misspelling, SpellCache, SpellChecker},
};
use pretty_assertions::assert_eq;

use crate::{FilterTest, rule_names};

fn catalog() -> Vec<PoUnit> {
    vec![
        PoUnit::header("Project-Id-Version: demo\\nLanguage: af\\n"),
        PoUnit::new("Open", "Oop"),
        PoUnit::new("Delete %s?", "Skrap?"),
        PoUnit::new("Save", ""),
        PoUnit::new("(%d files)", "%d lêers)"),
        PoUnit::new("Quit", "Verlaat").with_fuzzy(true),
        PoUnit::new("test", "rest"),
    ]
}

#[test]
fn test_batch_summary() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "preset": "gnome" }"#)?;
    let filter = test.filter()?;
    let mut units = catalog();

    let summary = filter.filter_units(&mut units)?;

    assert_eq!(summary.units_checked, 6);
    let indices: Vec<usize> = summary.flagged.iter().map(|u| u.index).collect();
    assert_eq!(indices, vec![2, 3, 4, 5]);
    assert!(summary.flagged[0].has_serious());
    assert_eq!(rule_names(&summary.flagged[1].failures), vec!["untranslated"]);
    assert!(rule_names(&summary.flagged[2].failures).contains(&"brackets"));
    assert_eq!(rule_names(&summary.flagged[3].failures), vec!["isfuzzy"]);
    assert!(!units[1].is_fuzzy());
    assert!(units[4].is_fuzzy());

    Ok(())
}

#[test]
fn test_parallel_batch_matches_sequential() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "preset": "gnome" }"#)?;
    let filter = test.filter()?;
    let mut sequential: Vec<PoUnit> = (0..20).flat_map(|_| catalog()).collect();
    let mut parallel = sequential.clone();

    let expected = filter.filter_units(&mut sequential)?;
    let actual = filter.par_filter_units(&mut parallel)?;

    assert_eq!(actual, expected);
    assert_eq!(parallel, sequential);
    assert_eq!(actual.flagged.len(), 80);

    Ok(())
}

#[test]
fn test_excluded_rules_do_not_run() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "excludeRules": ["simplecaps", "startcaps"] }"#)?;
    let filter = test.filter()?;

    let failures = filter.check_unit(&PoUnit::new("test", "REST"))?;

    assert!(!rule_names(&failures).contains(&"simplecaps"));
    assert!(!rule_names(&failures).contains(&"startcaps"));

    Ok(())
}

#[test]
fn test_include_rules_limits_to_named() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "includeRules": ["numbers"] }"#)?;
    let filter = test.filter()?;

    let failures = filter.check_unit(&PoUnit::new("file 1", "LÊER 2").with_fuzzy(true))?;

    assert_eq!(rule_names(&failures), vec!["numbers"]);
    assert_eq!(
        filter.checker().eligible_rules().into_iter().collect::<Vec<_>>(),
        vec!["numbers"]
    );

    Ok(())
}

#[test]
fn test_excluded_untranslated_still_suppresses() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "excludeRules": ["untranslated"] }"#)?;
    let filter = test.filter()?;

    assert!(filter.check_unit(&PoUnit::new("Save.", ""))?.is_empty());

    Ok(())
}

struct Unavailable;

impl SpellChecker for Unavailable {
    fn check(&self, _text: &str) -> Vec<Misspelling> {
        Vec::new()
    }
}

fn spelling_filter() -> UnitFilter {
    let cache = SpellCache::new(|language| {
        if language == "en" {
            Ok(Arc::new(Unavailable) as Arc<dyn SpellChecker>)
        } else {
            Err(RuleError::Dictionary {
                language: language.to_string(),
                reason: "dictionary not installed".to_string(),
            })
        }
    });
    let config = CheckerConfig::new().with_target_language("af");
    UnitFilter::new(TeeChecker::standard(config, &RuleSelection::all()))
        .with_spell_cache(Arc::new(cache))
}

#[test]
fn test_broken_rule_aborts_batch() {
    let filter = spelling_filter();
    let mut units = vec![PoUnit::new("Open", "Oop"), PoUnit::new("Close", "Sluit")];

    let err = filter.filter_units(&mut units).unwrap_err();

    match err {
        CheckError::Rule {
            rule,
            source_text,
            target_text,
            ..
        } => {
            assert_eq!(rule, "spellcheck");
            assert_eq!(source_text, "Open");
            assert_eq!(target_text, "Oop");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_error_handler_decides_broken_rule() -> Result<()> {
    let strict = spelling_filter().with_error_handler(Arc::new(|_, _, _, _| false));
    let mut units = vec![PoUnit::new("Open", "Oop"), PoUnit::new("Close", "Sluit")];

    let summary = strict.filter_units(&mut units)?;

    assert_eq!(summary.flagged.len(), 2);
    assert!(
        summary
            .flagged
            .iter()
            .all(|u| rule_names(&u.failures) == vec!["spellcheck"])
    );

    let lenient = spelling_filter().with_error_handler(Arc::new(|_, _, _, _| true));
    let mut units = vec![PoUnit::new("Open", "Oop")];
    assert!(lenient.filter_units(&mut units)?.is_clean());

    Ok(())
}
