//! Classification behavior tests over the built-in ruleset

use docsense::classify::Classifier;
use docsense::taxonomy::RuleRegistry;
use std::sync::Arc;

fn classifier() -> Classifier {
    Classifier::new(Arc::new(RuleRegistry::default_rules().unwrap()))
}

#[test]
fn test_empty_text_is_general() {
    let c = classifier();
    assert_eq!(c.classify(""), "General");
    assert_eq!(c.classify("  \n\t "), "General");
}

#[test]
fn test_low_evidence_is_general() {
    let c = classifier();
    // Nothing matches any rule table
    assert_eq!(c.classify("qwrtpl mnbvc xksjd"), "General");
}

#[test]
fn test_terminal_report_is_research() {
    let c = classifier();
    let text = "Submitted herewith is the terminal report covering all objectives.";
    assert_eq!(c.classify(text), "Research");
}

#[test]
fn test_narrative_report_is_research() {
    let c = classifier();
    let text = "Narrative report on the conduct of the extension activity in the province. \
                The extension team documented attendance and outcomes.";
    assert_eq!(c.classify(text), "Research");
}

#[test]
fn test_resolution_is_official_issuance() {
    let c = classifier();
    assert_eq!(c.classify("resolution no"), "Official Issuances");
}

#[test]
fn test_special_order_is_official_issuance() {
    let c = classifier();
    let text = "SPECIAL ORDER No. 117: designation of the bids and awards committee chair.";
    assert_eq!(c.classify(text), "Official Issuances");
}

#[test]
fn test_memorandum_of_agreement_is_official_issuance() {
    let c = classifier();
    let text = "This Memorandum of Agreement is entered into by and between the parties, \
                setting out the obligations of the parties and the terms and conditions \
                governing the scope of work.";
    assert_eq!(c.classify(text), "Official Issuances");
}

#[test]
fn test_faculty_load_is_academics() {
    let c = classifier();
    let text = "Faculty teaching load distribution for the incoming semester, \
                covering every course, class schedule, and syllabus revision.";
    assert_eq!(c.classify(text), "Academics");
}

#[test]
fn test_manual_is_policies() {
    let c = classifier();
    let text = "Operations manual: guidelines, procedures, and compliance provisions, \
                including the repealing clause and effectivity section.";
    assert_eq!(c.classify(text), "Policies");
}

#[test]
fn test_classification_is_idempotent() {
    let c = classifier();
    let texts = [
        "",
        "resolution no",
        "terminal report",
        "Faculty load for the semester",
        "random unrelated text",
    ];
    for text in texts {
        assert_eq!(c.classify(text), c.classify(text), "text: {:?}", text);
    }
}

#[test]
fn test_classifiers_share_one_registry() {
    let registry = Arc::new(RuleRegistry::default_rules().unwrap());
    let a = Classifier::new(registry.clone());
    let b = Classifier::new(registry);

    let text = "memorandum circulating the meeting agenda";
    assert_eq!(a.classify(text), b.classify(text));
}

#[test]
fn test_substring_matching_is_not_word_bounded() {
    let c = classifier();
    // "so no" inside "also nope" still boosts Official Issuances; this is
    // the documented imprecision of substring matching
    let lowered = "it was also nope in the end";
    let board = c.structural_signals(lowered);

    let oi_idx = c
        .registry()
        .categories()
        .iter()
        .position(|name| name == "Official Issuances")
        .unwrap();
    assert_eq!(board.score(oi_idx), 10);
}

#[test]
fn test_signal_floor_blocks_single_weak_signal() {
    let c = classifier();
    // A lone +1 entity signal stays below the floor of 2
    let board = c.entity_signals("University");
    assert_eq!(board.score(0), 1);
    assert_eq!(c.classify("University"), "General");
}
