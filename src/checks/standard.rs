//! The standard string-pair rules.
//!
//! Each rule is a plain function over `(checker, source, target)`. The
//! checker supplies the configuration and the prefilters; the rule decides
//! which of them to apply before comparing.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Checker;
use crate::config::VariableEnd;
use crate::decoration::{
    find_marked_variables, get_accelerators, get_emails, get_functions, get_numbers, get_urls,
    get_variables, is_pure_punctuation, leading_punctuation, leading_whitespace,
    trailing_punctuation, trailing_whitespace,
};
use crate::issues::{Outcome, RuleResult};
use crate::prefilters::strip_localization_note;
use crate::utils::{char_len, contains_alphabetic, count_occurrences, counts_match, is_upper_word};

pub type RuleFn = fn(&Checker, &str, &str) -> RuleResult;

/// A named rule with the doc line shown when it fails without a message.
pub struct Rule {
    pub name: &'static str,
    pub doc: &'static str,
    pub check: RuleFn,
}

macro_rules! rule {
    ($name:ident, $doc:literal) => {
        Rule {
            name: stringify!($name),
            doc: $doc,
            check: $name,
        }
    };
}

/// Every standard rule in evaluation order.
pub static STANDARD_RULES: &[Rule] = &[
    rule!(untranslated, "checks whether a string has been translated at all"),
    rule!(unchanged, "checks whether a translation is basically identical to the original string"),
    rule!(blank, "checks whether a translation only contains spaces"),
    rule!(short, "checks whether a translation is much shorter than the original string"),
    rule!(long, "checks whether a translation is much longer than the original string"),
    rule!(escapes, "checks whether escaping is consistent between the two strings"),
    rule!(newlines, "checks whether newlines are consistent between the two strings"),
    rule!(tabs, "checks whether tabs are consistent between the two strings"),
    rule!(singlequoting, "checks whether singlequoting is consistent between the two strings"),
    rule!(doublequoting, "checks whether doublequoting is consistent between the two strings"),
    rule!(doublespacing, "checks for bad double-spaces by comparing to original"),
    rule!(puncspacing, "checks for bad spacing after punctuation"),
    rule!(printf, "checks whether printf format strings match"),
    rule!(accelerators, "checks whether accelerators are consistent between the two strings"),
    rule!(acceleratedvariables, "checks that no variables are accelerated"),
    rule!(variables, "checks whether variables of various forms are consistent between the two strings"),
    rule!(functions, "checks to see that function names are not translated"),
    rule!(emails, "checks to see that emails are not translated"),
    rule!(urls, "checks to see that URLs are not translated"),
    rule!(numbers, "checks whether numbers of various forms are consistent between the two strings"),
    rule!(startwhitespace, "checks whether whitespace at the beginning of the strings matches"),
    rule!(endwhitespace, "checks whether whitespace at the end of the strings matches"),
    rule!(startpunc, "checks whether punctuation at the beginning of the strings match"),
    rule!(endpunc, "checks whether punctuation at the end of the strings match"),
    rule!(purepunc, "checks that strings that are purely punctuation are not changed"),
    rule!(brackets, "checks that the number of brackets in both strings match"),
    rule!(sentencecount, "checks that the number of sentences in both strings match"),
    rule!(options, "checks that options are not translated"),
    rule!(startcaps, "checks that the message starts with the correct capitalisation"),
    rule!(simplecaps, "checks the capitalisation of two strings isn't wildly different"),
    rule!(acronyms, "checks that acronyms that appear are unchanged"),
    rule!(doublewords, "checks for repeated words in the translation"),
    rule!(notranslatewords, "checks that words configured as untranslatable appear in the translation too"),
    rule!(musttranslatewords, "checks that words configured as definitely translatable don't appear in the translation"),
    rule!(validchars, "checks that only characters specified as valid appear in the translation"),
    rule!(filepaths, "checks that file paths have not been translated"),
    rule!(xmltags, "checks that XML/HTML tags have not been translated"),
    rule!(kdecomments, "checks to ensure that no KDE style comments appear in the translation"),
    rule!(compendiumconflicts, "checks for Gettext compendium conflicts (#-#-#-#-#)"),
    rule!(simpleplurals, "checks for English style plural(s) for you to review"),
    rule!(spellcheck, "checks spelling"),
];

static PRINTF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"%(?:(?P<ord>\d+)\$)?(?P<fullvar>[+#-]*\d*(?:\.\d+)?(?:hh|h|ll|l)?(?P<type>[\w%]))",
    )
    .unwrap()
});

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>\s][^<>]*>").unwrap());

const SENTENCE_END: &[char] = &['.', '!', '?', '\u{2026}', '\u{3002}', '\u{ff01}', '\u{ff1f}'];

const SPACED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

const BRACKETS: &[char] = &['[', ']', '{', '}', '(', ')'];

const COMPENDIUM_MARKER: &str = "#-#-#-#-#";

const MAX_SUGGESTIONS: usize = 5;

/// Both filtered views most comparisons use: variables reduced to names,
/// then accelerators removed.
fn filter_both(c: &Checker, s: &str) -> String {
    c.filter_accelerators(&c.filter_variables(s))
}

fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| format!("'{}'", s.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|i| i == item) {
        list.push(item.to_string());
    }
}

// ============================================================
// Presence and length
// ============================================================

fn untranslated(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    Ok((s1.trim().is_empty() || !s2.is_empty()).into())
}

fn unchanged(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = c.filter_accelerators(strip_localization_note(s1));
    let s2 = c.filter_accelerators(s2);
    let (t1, t2) = (s1.trim(), s2.trim());
    if t1.is_empty() || !contains_alphabetic(t1) {
        return Ok(Outcome::Pass);
    }
    Ok((t1.to_lowercase() != t2.to_lowercase()).into())
}

fn blank(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let blank_target = !s2.is_empty() && s2.trim().is_empty();
    Ok((s1.trim().is_empty() || !blank_target).into())
}

fn short(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let len1 = char_len(strip_localization_note(s1).trim());
    let len2 = char_len(s2.trim());
    let too_short = len1 > 0 && len2 > 0 && (len2 as f64) < len1 as f64 * 0.1;
    Ok((!too_short).into())
}

fn long(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let len1 = char_len(strip_localization_note(s1).trim());
    let len2 = char_len(s2.trim());
    let too_long = len1 > 0 && (len1 as f64) < len2 as f64 * 0.1;
    Ok((!too_long).into())
}

// ============================================================
// Escapes, whitespace and quoting
// ============================================================

fn escapes(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    if counts_match(s1, s2, &["\\", "\\\\"]) {
        return Ok(Outcome::Pass);
    }
    let escaped = |s: &str| -> Vec<String> {
        s.split_whitespace()
            .filter(|w| w.contains('\\'))
            .map(String::from)
            .collect()
    };
    Ok(Outcome::serious(format!(
        "escapes in original ({}) don't match escapes in translation ({})",
        quoted_list(&escaped(s1)),
        quoted_list(&escaped(s2))
    )))
}

fn newlines(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    if counts_match(s1, s2, &["\n", "\r"]) {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(
        "line endings in original don't match line endings in translation",
    ))
}

fn tabs(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    if counts_match(s1, s2, &["\t"]) {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::serious(
        "tabs in original don't match tabs in translation",
    ))
}

fn singlequoting(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = filter_both(c, &c.filter_punctuated_words(s1));
    let s2 = filter_both(c, &c.filter_punctuated_words(s2));
    Ok(counts_match(&s1, &s2, &["'", "''", "\\'"]).into())
}

fn doublequoting(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = filter_both(c, s1);
    let s2 = filter_both(c, s2);
    Ok(counts_match(&s1, &s2, &["\"", "\"\"", "\\\""]).into())
}

fn doublespacing(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = c.filter_accelerators(s1);
    let s2 = c.filter_accelerators(s2);
    Ok(counts_match(&s1, &s2, &["  "]).into())
}

fn puncspacing(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = filter_both(c, s1);
    let s2 = filter_both(c, s2);
    if !s1.contains(' ') {
        return Ok(Outcome::Pass);
    }

    for &punc in SPACED_PUNCTUATION {
        let plain1 = s1.matches(punc).count();
        if plain1 == 0 || plain1 != s2.matches(punc).count() {
            continue;
        }
        let spaced = format!("{punc} ");
        let spaced1 = count_occurrences(&s1, &spaced);
        let spaced2 = count_occurrences(&s2, &spaced);
        if spaced1 == spaced2 {
            continue;
        }
        // A string ending in the mark has no room for the space after it.
        if s1.ends_with(punc) != s2.ends_with(punc) && spaced1.abs_diff(spaced2) == 1 {
            continue;
        }
        return Ok(Outcome::fail(format!("missing or extra space after '{punc}'")));
    }
    Ok(Outcome::Pass)
}

// ============================================================
// Placeholders
// ============================================================

fn printf_ordinal(var: &Captures<'_>) -> Option<usize> {
    var.name("ord")?.as_str().parse::<usize>().ok()?.checked_sub(1)
}

fn printf(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let vars1: Vec<Captures<'_>> = PRINTF_REGEX.captures_iter(s1).collect();
    let vars2: Vec<Captures<'_>> = PRINTF_REGEX.captures_iter(s2).collect();

    for (index2, var2) in vars2.iter().enumerate() {
        let index1 = match var2.name("ord") {
            Some(_) => printf_ordinal(var2),
            None => Some(index2),
        };
        let Some(var1) = index1.and_then(|index| vars1.get(index)) else {
            if var2.name("ord").is_some() {
                return Ok(Outcome::fail(format!(
                    "translation refers to {} which is not in the original",
                    &var2[0]
                )));
            }
            continue;
        };
        if var1["fullvar"] != var2["fullvar"] {
            return Ok(Outcome::fail(format!(
                "translation has {} where the original has {}",
                &var2[0], &var1[0]
            )));
        }
    }

    if vars1.len() != vars2.len() {
        return Ok(Outcome::fail(format!(
            "original has {} format specifier(s), translation has {}",
            vars1.len(),
            vars2.len()
        )));
    }
    Ok(Outcome::Pass)
}

fn accelerators(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = c.filter_variables(s1);
    let s2 = c.filter_variables(s2);
    let mut messages = Vec::new();

    for &marker in &c.config().accelerator_markers {
        let (valid1, _) = get_accelerators(&s1, marker, &[]);
        let (valid2, invalid2) = get_accelerators(&s2, marker, &[]);
        let (count1, count2) = (valid1.len(), valid2.len());

        if count1 == 1 && count2 == 0 {
            match invalid2.first() {
                Some(bad) => messages.push(format!(
                    "accelerator {marker} appears before an invalid accelerator character '{bad}'"
                )),
                None => messages.push(format!("accelerator {marker} is missing from translation")),
            }
        } else if count1 == 0 && count2 > 0 {
            messages.push(format!(
                "accelerator {marker} does not occur in original and should not be in translation"
            ));
        } else if count1 == 1 && count2 > 1 {
            messages.push(format!("accelerator {marker} is repeated in translation"));
        } else if count1 != count2 {
            messages.push(format!(
                "accelerator {marker} occurs {count2} time(s) in translation and {count1} time(s) in original"
            ));
        }
    }

    if messages.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(messages.join(", ")))
}

fn acceleratedvariables(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let config = c.config();
    let mut lost = Vec::new();

    for &marker in &config.accelerator_markers {
        for (start, end) in &config.variable_delimiters {
            let accelerated = |s: &str| -> Vec<String> {
                find_marked_variables(s, start, end, &[])
                    .into_iter()
                    .filter(|(pos, _)| s[..*pos].ends_with(marker))
                    .map(|(_, variable)| variable)
                    .collect()
            };
            let accelerated2 = accelerated(s2);
            for variable in accelerated(s1) {
                if !accelerated2.contains(&variable) {
                    push_unique(&mut lost, &format!("{marker}{}", redecorate(start, &variable, end)));
                }
            }
        }
    }

    if lost.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(format!(
        "accelerated variables lost in translation: {}",
        lost.join(", ")
    )))
}

/// Puts a variable name back between its delimiters.
fn redecorate(start: &str, variable: &str, end: &VariableEnd) -> String {
    match end {
        VariableEnd::Literal(end_marker) => format!("{start}{variable}{end_marker}"),
        VariableEnd::Fixed(_) | VariableEnd::UntilNonAlphanumeric => format!("{start}{variable}"),
    }
}

fn variables(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let mut seen: HashSet<String> = HashSet::new();
    let mut missing = Vec::new();
    let mut extra = Vec::new();

    for (start, end) in &c.config().variable_delimiters {
        let vars1 = get_variables(s1, start, end);
        let vars2 = get_variables(s2, start, end);
        if vars1 == vars2 {
            continue;
        }
        // Names seen by an earlier delimiter pair are not reported twice.
        let lost: Vec<String> = vars1
            .iter()
            .filter(|v| !vars2.contains(v) && !seen.contains(*v))
            .cloned()
            .collect();
        let added: Vec<String> = vars2
            .iter()
            .filter(|v| !vars1.contains(v) && !seen.contains(*v))
            .cloned()
            .collect();

        for name in &lost {
            push_unique(&mut missing, &redecorate(start, name, end));
        }
        for name in &added {
            push_unique(&mut extra, &redecorate(start, name, end));
        }
        seen.extend(lost);
        seen.extend(added);
    }

    if !missing.is_empty() {
        return Ok(Outcome::serious(format!(
            "do not translate: {}",
            missing.join(", ")
        )));
    }
    if !extra.is_empty() {
        return Ok(Outcome::fail(format!(
            "translation contains variables not in original: {}",
            extra.join(", ")
        )));
    }
    Ok(Outcome::Pass)
}

fn functions(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    Ok((get_functions(s1) == get_functions(s2)).into())
}

fn emails(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    Ok((get_emails(s1) == get_emails(s2)).into())
}

fn urls(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    Ok((get_urls(s1) == get_urls(s2)).into())
}

fn numbers(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    Ok((get_numbers(s1) == get_numbers(s2)).into())
}

// ============================================================
// Edges
// ============================================================

fn startwhitespace(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = filter_both(c, s1);
    let s2 = filter_both(c, s2);
    Ok((leading_whitespace(&s1) == leading_whitespace(&s2)).into())
}

fn endwhitespace(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = filter_both(c, s1);
    let s2 = filter_both(c, s2);
    Ok((trailing_whitespace(&s1) == trailing_whitespace(&s2)).into())
}

fn punctuation_view(c: &Checker, s: &str) -> String {
    filter_both(c, &c.filter_punctuated_words(s))
}

fn startpunc(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = punctuation_view(c, s1);
    let s2 = punctuation_view(c, s2);
    Ok((leading_punctuation(s1.trim_start()) == leading_punctuation(s2.trim_start())).into())
}

fn endpunc(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = punctuation_view(c, s1);
    let s2 = punctuation_view(c, s2);
    Ok((trailing_punctuation(s1.trim_end()) == trailing_punctuation(s2.trim_end())).into())
}

fn purepunc(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    if s1.trim().is_empty() {
        return Ok(Outcome::Pass);
    }
    if is_pure_punctuation(s1) {
        return Ok((s1 == s2).into());
    }
    Ok((!is_pure_punctuation(s2)).into())
}

fn brackets(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = c.filter_variables(s1);
    let s2 = c.filter_variables(s2);
    let mut missing = Vec::new();
    let mut extra = Vec::new();

    for &bracket in BRACKETS {
        let count1 = s1.matches(bracket).count();
        let count2 = s2.matches(bracket).count();
        if count2 < count1 {
            missing.push(format!("'{bracket}'"));
        } else if count2 > count1 {
            extra.push(format!("'{bracket}'"));
        }
    }

    let mut messages = Vec::new();
    if !missing.is_empty() {
        messages.push(format!("translation is missing {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        messages.push(format!("translation has extra {}", extra.join(", ")));
    }
    if messages.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(messages.join(", ")))
}

/// Counts sentences: a run of sentence-ending marks followed by whitespace
/// and then something other than a lowercase letter or digit ends one.
fn count_sentences(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut has_content = false;
    let mut i = 0;

    while i < chars.len() {
        if !SENTENCE_END.contains(&chars[i]) {
            if !chars[i].is_whitespace() {
                has_content = true;
            }
            i += 1;
            continue;
        }

        let mut end = i;
        while end < chars.len() && SENTENCE_END.contains(&chars[end]) {
            end += 1;
        }
        let mut next = end;
        while next < chars.len() && chars[next].is_whitespace() {
            next += 1;
        }
        let breaks = next > end
            && next < chars.len()
            && !chars[next].is_lowercase()
            && !chars[next].is_numeric();
        if breaks && has_content {
            count += 1;
            has_content = false;
        }
        i = end;
    }

    if has_content {
        count += 1;
    }
    count
}

fn sentencecount(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let count1 = count_sentences(&c.filter_accelerators(strip_localization_note(s1)));
    let count2 = count_sentences(&c.filter_accelerators(s2));
    if count1 == count2 {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(format!(
        "The number of sentences differ: {count1} versus {count2}"
    )))
}

fn options(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    for word in s1.split_whitespace() {
        let is_option = word != "--"
            && word.starts_with("--")
            && word.chars().last().is_some_and(char::is_alphanumeric);
        if !is_option {
            continue;
        }
        let (option, parameter) = match word.split_once('=') {
            Some((option, parameter)) => (option, Some(parameter)),
            None => (word, None),
        };
        if !s2.contains(option) {
            return Ok(Outcome::fail(format!(
                "The option {option} does not occur or is translated in the translation."
            )));
        }
        if let Some(parameter) = parameter
            && s2.contains(parameter)
        {
            return Ok(Outcome::fail(format!(
                "The parameter {parameter} in option {option} is not translated."
            )));
        }
    }
    Ok(Outcome::Pass)
}

// ============================================================
// Capitalisation and words
// ============================================================

/// First character after accelerators, variables and leading punctuation.
fn first_character(c: &Checker, s: &str) -> Option<char> {
    let filtered = c.filter_accelerators(&c.remove_variables(s));
    filtered[leading_punctuation(&filtered).len()..].chars().next()
}

fn startcaps(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let first1 = first_character(c, strip_localization_note(s1));
    let first2 = first_character(c, s2);
    match (first1, first2) {
        (None, None) => Ok(Outcome::Pass),
        (Some(_), None) | (None, Some(_)) => Ok(Outcome::Fail(None)),
        (Some(a), Some(b)) => {
            // Digits and uncased scripts carry no capitalisation to compare.
            let cased = |ch: char| ch.is_uppercase() || ch.is_lowercase();
            if !cased(a) || !cased(b) {
                return Ok(Outcome::Pass);
            }
            Ok((a.is_uppercase() == b.is_uppercase()).into())
        }
    }
}

fn simplecaps(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let s1 = c.filter_accelerators(&c.remove_variables(strip_localization_note(s1)));
    let s2 = c.filter_accelerators(&c.remove_variables(s2));
    let caps = |s: &str| s.chars().filter(|ch| ch.is_uppercase()).count();
    let alpha = |s: &str| s.chars().filter(|ch| ch.is_alphabetic()).count();

    let (caps1, caps2) = (caps(&s1), caps(&s2));
    let (alpha1, alpha2) = (alpha(&s1), alpha(&s2));
    let (len1, len2) = (char_len(&s1), char_len(&s2));

    if alpha1 > 1 && caps1 == alpha1 {
        return Ok((caps2 == alpha2).into());
    }

    let similar = if caps1 <= 1 {
        caps2 == caps1
    } else if caps1 < len1 / 10 {
        caps2 <= len2 / 8
    } else if len1 < 10 {
        caps1.abs_diff(caps2) < 3
    } else if caps1 > len1 * 6 / 10 {
        caps2 > len2 * 6 / 10
    } else {
        caps1.abs_diff(caps2) < (len1 + len2) / 6
    };
    Ok(similar.into())
}

fn trim_word(word: &str) -> &str {
    word.trim_matches(|ch: char| !ch.is_alphanumeric())
}

fn acronyms(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let config = c.config();
    let variables: Vec<String> = config
        .variable_delimiters
        .iter()
        .flat_map(|(start, end)| get_variables(s1, start, end))
        .collect();
    let s1 = filter_both(c, s1);
    let s2 = filter_both(c, s2);

    let mut kept = Vec::new();
    for word in s1.split_whitespace().map(trim_word) {
        if char_len(word) > 1
            && is_upper_word(word)
            && !variables.iter().any(|v| v == word)
            && !config.required_words.contains(word)
            && !s2.contains(word)
        {
            push_unique(&mut kept, word);
        }
    }

    if kept.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(format!(
        "acronyms should not be translated: {}",
        kept.join(", ")
    )))
}

fn doublewords(c: &Checker, _s1: &str, s2: &str) -> RuleResult {
    let text = c
        .filter_accelerators(&c.remove_variables(s2))
        .replace('.', "")
        .to_lowercase();

    let mut last: Option<&str> = None;
    for word in text.split_whitespace() {
        if last == Some(word) {
            return Ok(Outcome::fail(format!("The word '{word}' is repeated")));
        }
        last = Some(word);
    }
    Ok(Outcome::Pass)
}

fn word_tokens(c: &Checker, s: &str) -> Vec<String> {
    filter_both(c, s)
        .replace('.', " ")
        .split_whitespace()
        .map(String::from)
        .collect()
}

fn notranslatewords(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let forbidden = &c.config().forbidden_words;
    if forbidden.is_empty() {
        return Ok(Outcome::Pass);
    }
    let words2 = word_tokens(c, s2);
    let mut stopped = Vec::new();
    for word in word_tokens(c, s1) {
        if forbidden.contains(&word) && !words2.contains(&word) {
            push_unique(&mut stopped, &word);
        }
    }
    if stopped.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(format!("do not translate: {}", stopped.join(", "))))
}

fn musttranslatewords(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let required = &c.config().required_words;
    if required.is_empty() {
        return Ok(Outcome::Pass);
    }
    let words2 = word_tokens(c, s2);
    let mut stopped = Vec::new();
    for word in word_tokens(c, s1) {
        if required.contains(&word) && words2.contains(&word) {
            push_unique(&mut stopped, &word);
        }
    }
    if stopped.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(format!("please translate: {}", stopped.join(", "))))
}

fn validchars(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let config = c.config();
    if config.valid_characters().is_none() {
        return Ok(Outcome::Pass);
    }
    let invalid1 = config.disallowed_characters(s1);
    let mut invalid = Vec::new();
    for ch in config.disallowed_characters(s2) {
        if !invalid1.contains(&ch) {
            push_unique(&mut invalid, &format!("'{ch}' (\\u{:04x})", ch as u32));
        }
    }
    if invalid.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(format!("invalid chars: {}", invalid.join(", "))))
}

// ============================================================
// Markup and conventions
// ============================================================

fn filepaths(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    for word in c.filter_accelerators(s1).split_whitespace() {
        if word.starts_with('/') && !counts_match(s1, s2, &[word]) {
            return Ok(Outcome::fail(format!("file path {word} should not be translated")));
        }
    }
    Ok(Outcome::Pass)
}

fn xmltags(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let source = strip_localization_note(s1);
    let tags: Vec<&str> = TAG_REGEX.find_iter(source).map(|m| m.as_str()).collect();
    if tags.is_empty() || (tags.len() == 1 && tags[0] == source.trim()) {
        return Ok(Outcome::Pass);
    }

    let mut missing = Vec::new();
    for tag in tags {
        if !s2.contains(tag) {
            push_unique(&mut missing, tag);
        }
    }
    if missing.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(format!(
        "tags not found in translation: {}",
        missing.join(", ")
    )))
}

fn kdecomments(_c: &Checker, _s1: &str, s2: &str) -> RuleResult {
    let has_note = s2.starts_with("_:") || s2.contains("\n_:");
    Ok((!has_note).into())
}

fn compendiumconflicts(_c: &Checker, _s1: &str, s2: &str) -> RuleResult {
    Ok((!s2.contains(COMPENDIUM_MARKER)).into())
}

fn simpleplurals(_c: &Checker, s1: &str, s2: &str) -> RuleResult {
    Ok(counts_match(s1, s2, &["(s)"]).into())
}

fn spellcheck(c: &Checker, s1: &str, s2: &str) -> RuleResult {
    let config = c.config();
    let (Some(language), Some(cache)) = (config.target_language.as_deref(), c.spell_cache()) else {
        return Ok(Outcome::Pass);
    };

    let source_dictionary = cache.get("en")?;
    let target_dictionary = cache.get(language)?;

    let ignored: HashSet<String> = source_dictionary
        .check(&filter_both(c, s1))
        .into_iter()
        .map(|m| m.word)
        .collect();

    let mut messages = Vec::new();
    for misspelling in target_dictionary.check(&filter_both(c, s2)) {
        let word = &misspelling.word;
        if config.forbidden_words.contains(word)
            || ignored.contains(word)
            || misspelling.suggestions.contains(word)
        {
            continue;
        }
        let suggestions: Vec<&str> = misspelling
            .suggestions
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(String::as_str)
            .collect();
        messages.push(format!(
            "check spelling of {word} (could be {})",
            suggestions.join(" / ")
        ));
    }

    if messages.is_empty() {
        return Ok(Outcome::Pass);
    }
    Ok(Outcome::fail(messages.join(", ")))
}
