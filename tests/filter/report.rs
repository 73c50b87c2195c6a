use anyhow::Result;
use pofilter::{
    PoUnit,
    report::{FAILURE_MARK, print_success_to, report_to},
};

use crate::{FilterTest, strip_ansi};

#[test]
fn test_report_of_filtered_batch() -> Result<()> {
    let test = FilterTest::with_config(r#"{ "preset": "gnome" }"#)?;
    let filter = test.filter()?;
    let mut units = vec![
        PoUnit::new("Open", "Oop"),
        PoUnit::new("Delete %s?", "Skrap?"),
    ];
    let summary = filter.filter_units(&mut units)?;

    let mut output = Vec::new();
    report_to(&summary, &mut output);
    let output = strip_ansi(&String::from_utf8(output)?);

    assert!(output.contains("error: \"do not translate: %s\"  variables"));
    assert!(output.contains("--> unit #1"));
    assert!(output.contains("note: source: \"Delete %s?\""));
    assert!(output.contains("note: target: \"Skrap?\""));
    assert!(!output.contains("unit #0"));
    assert!(output.contains(FAILURE_MARK));
    assert!(output.contains("in 1 of 2 units"));

    Ok(())
}

#[test]
fn test_clean_batch_prints_success_only() -> Result<()> {
    let test = FilterTest::new()?;
    let filter = test.filter()?;
    let mut units = vec![PoUnit::new("test", "rest"), PoUnit::new("Open", "Oop")];
    let summary = filter.filter_units(&mut units)?;

    let mut output = Vec::new();
    report_to(&summary, &mut output);
    assert!(output.is_empty());

    print_success_to(summary.units_checked, &mut output);
    let output = strip_ansi(&String::from_utf8(output)?);
    assert!(output.contains("Checked 2 units - no issues found"));

    Ok(())
}
