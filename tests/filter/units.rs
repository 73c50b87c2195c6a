use anyhow::Result;
use pofilter::{PoUnit, Severity, TranslationUnit};
use pretty_assertions::assert_eq;

use crate::{FilterTest, rule_names};

#[test]
fn test_failing_unit_gets_comments_and_fuzzy() -> Result<()> {
    let test = FilterTest::new()?;
    let filter = test.filter()?;
    let mut unit = PoUnit::new("test", "REST");

    let failures = filter.filter_unit(&mut unit)?;

    assert!(unit.is_fuzzy());
    assert!(rule_names(&failures).contains(&"simplecaps"));
    assert!(
        unit.visible_comments
            .iter()
            .any(|c| c.starts_with("simplecaps: "))
    );
    for (comment, failure) in unit.visible_comments.iter().zip(&failures) {
        assert_eq!(comment, &format!("{}: {}", failure.rule, failure.message));
    }

    Ok(())
}

#[test]
fn test_clean_unit_is_left_alone() -> Result<()> {
    let test = FilterTest::new()?;
    let filter = test.filter()?;
    let mut unit = PoUnit::new("test", "rest");
    let before = unit.clone();

    for _ in 0..3 {
        assert!(filter.filter_unit(&mut unit)?.is_empty());
    }
    assert_eq!(unit, before);

    Ok(())
}

#[test]
fn test_untranslated_unit_reports_only_untranslated() -> Result<()> {
    let test = FilterTest::new()?;
    let filter = test.filter()?;
    let mut unit = PoUnit::new("Save %s files", "").with_type_comment("review");

    let failures = filter.filter_unit(&mut unit)?;

    assert_eq!(rule_names(&failures), vec!["untranslated"]);
    assert_eq!(
        unit.visible_comments,
        vec!["untranslated: checks whether a string has been translated at all"]
    );
    assert!(unit.is_fuzzy());

    Ok(())
}

#[test]
fn test_gnome_accelerator_missing() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "preset": "gnome" }"#)?;
    let filter = test.filter()?;

    let failures = filter.check_unit(&PoUnit::new("_Open", "Oop"))?;
    let accelerators = failures
        .iter()
        .find(|f| f.rule == "accelerators")
        .expect("accelerators should fail");
    assert_eq!(
        accelerators.message,
        "accelerator _ is missing from translation"
    );

    assert!(filter.check_unit(&PoUnit::new("_Open", "_Oop"))?.is_empty());

    Ok(())
}

#[test]
fn test_lost_variable_is_serious() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "preset": "gnome" }"#)?;
    let filter = test.filter()?;
    let mut unit = PoUnit::new("Delete %s?", "Skrap?");

    let failures = filter.filter_unit(&mut unit)?;

    let variables = failures
        .iter()
        .find(|f| f.rule == "variables")
        .expect("variables should fail");
    assert_eq!(variables.severity, Severity::Error);
    assert_eq!(variables.message, "do not translate: %s");
    assert!(
        unit.visible_comments
            .contains(&"variables: do not translate: %s".to_string())
    );

    Ok(())
}

#[test]
fn test_plural_form_is_checked() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "preset": "gnome" }"#)?;
    let filter = test.filter()?;
    let mut unit = PoUnit::plural("%d file", "%d files", ["%d lêer", "lêers"]);

    let failures = filter.filter_unit(&mut unit)?;

    assert!(rule_names(&failures).contains(&"variables"));
    assert!(unit.is_fuzzy());

    Ok(())
}

#[test]
fn test_plural_with_missing_form_is_untranslated() -> Result<()> {
    let test = FilterTest::new()?;
    let filter = test.filter()?;
    let unit = PoUnit::plural("File", "Files", ["Lêer"]);

    let failures = filter.check_unit(&unit)?;

    assert_eq!(rule_names(&failures), vec!["untranslated"]);

    Ok(())
}

#[test]
fn test_header_is_never_annotated() -> Result<()> {
    let test = FilterTest::new()?;
    let filter = test.filter()?;
    let mut header = PoUnit::header("Project-Id-Version: demo\\n").with_fuzzy(true);
    let before = header.clone();

    assert!(filter.filter_unit(&mut header)?.is_empty());
    assert_eq!(header, before);

    Ok(())
}

#[test]
fn test_fuzzy_unit_skipped_when_configured() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "includeFuzzy": false }"#)?;
    let filter = test.filter()?;
    let mut unit = PoUnit::new("test", "REST").with_fuzzy(true);

    assert!(filter.filter_unit(&mut unit)?.is_empty());
    assert!(unit.visible_comments.is_empty());

    Ok(())
}

#[test]
fn test_review_unit_flagged_by_default() -> Result<()> {
    let test = FilterTest::new()?;
    let filter = test.filter()?;
    let unit = PoUnit::new("test", "rest").with_type_comment("review");

    let failures = filter.check_unit(&unit)?;

    assert_eq!(rule_names(&failures), vec!["isreview"]);

    Ok(())
}
