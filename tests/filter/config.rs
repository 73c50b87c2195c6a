use anyhow::Result;
use pofilter::{PoUnit, config::load_config};
use pretty_assertions::assert_eq;

use crate::{FilterTest, rule_names};

#[test]
fn test_config_discovered_from_subdirectory() -> Result<()> {
    let test = FilterTest::with_config(
        r#"{
            "preset": "gnome",
            "targetLanguage": "af",
            "notranslateWords": ["GNOME"]
        }"#,
    )?;

    let loaded = load_config(&test.root().join("po"))?;
    assert!(loaded.from_file);
    assert_eq!(loaded.base_dir, test.root());

    let filter = test.filter_from("po/af")?;
    let failures = filter.check_unit(&PoUnit::new("Welcome to GNOME", "Welkom by GNOOM"))?;

    let words = failures
        .iter()
        .find(|f| f.rule == "notranslatewords")
        .expect("notranslatewords should fail");
    assert_eq!(words.message, "do not translate: GNOME");

    Ok(())
}

#[test]
fn test_word_files_resolve_against_config_directory() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "musttranslateFile": "lists/translate.txt" }"#)?;
    test.write_file("lists/translate.txt", "Bookmarks\n\nHistory\n")?;

    let filter = test.filter_from("locales/af")?;
    let failures = filter.check_unit(&PoUnit::new("Bookmarks", "Bookmarks menu"))?;

    assert!(rule_names(&failures).contains(&"musttranslatewords"));
    assert!(
        filter
            .check_unit(&PoUnit::new("History", "Geskiedenis"))?
            .is_empty()
    );

    Ok(())
}

#[test]
fn test_valid_characters_from_config() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "validCharacters": "abcdefghijklmnopqrstuvwxyz " }"#)?;
    let filter = test.filter()?;

    let failures = filter.check_unit(&PoUnit::new("the file", "die lêer"))?;

    let chars = failures
        .iter()
        .find(|f| f.rule == "validchars")
        .expect("validchars should fail");
    assert_eq!(chars.message, "invalid chars: 'ê' (\\u00ea)");

    Ok(())
}

#[test]
fn test_missing_word_file_is_an_error() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "notranslateFile": "absent.txt" }"#)?;

    assert!(test.filter().is_err());

    Ok(())
}

#[test]
fn test_unknown_preset_is_rejected() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "preset": "xul" }"#)?;

    let err = test.filter().err().expect("unknown preset should fail");
    assert!(format!("{err:#}").contains("Invalid value in 'preset'"));

    Ok(())
}
