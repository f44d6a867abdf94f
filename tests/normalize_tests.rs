mod test_utils;

use exam_quiz::normalize::{normalize, strip_label_prefix};
use exam_quiz::{Label, MalformedQuestionError};
use crate::test_utils::LIST_BLOCK;

fn options_of(block: &str) -> Vec<(Label, String)> {
    normalize(block)
        .unwrap()
        .options()
        .map(|(label, text)| (label, text.to_string()))
        .collect()
}

#[test]
fn list_choices_with_index_answer() {
    let q = normalize(LIST_BLOCK).unwrap();
    assert_eq!(q.prompt_text(), "Q1");
    assert_eq!(q.correct_label(), Label::B);
    assert_eq!(q.explanation(), "E");
    let texts: Vec<&str> = q.options().map(|(_, t)| t).collect();
    assert_eq!(texts, ["Opt1", "Opt2", "Opt3", "Opt4"]);
    assert_eq!(q.options().map(|(l, _)| l).collect::<Vec<_>>(), Label::ALL);
}

#[test]
fn two_options_is_rejected() {
    let err = normalize(r#"{"question":"Q2","choices":["only","two"],"correct":"A"}"#).unwrap_err();
    assert_eq!(err, MalformedQuestionError::TooFewOptions { found: 2 });
}

#[test]
fn index_and_letter_encodings_agree() {
    for (index, letter) in ["A", "B", "C", "D"].iter().enumerate() {
        let by_index = format!(r#"{{"question":"Q","choices":["w","x","y","z"],"answer":{}}}"#, index);
        let by_letter = format!(r#"{{"question":"Q","choices":["w","x","y","z"],"answer":"{}"}}"#, letter);
        assert_eq!(normalize(&by_index).unwrap(), normalize(&by_letter).unwrap());
    }
}

#[test]
fn letter_answers_tolerate_case_and_punctuation() {
    for (raw, expected) in [("a.", Label::A), ("B)", Label::B), (" c ", Label::C), ("d:", Label::D)] {
        let block = format!(r#"{{"question":"Q","choices":["w","x","y","z"],"correct":"{}"}}"#, raw);
        assert_eq!(normalize(&block).unwrap().correct_label(), expected, "answer {:?}", raw);
    }
}

#[test]
fn out_of_range_answers_are_rejected() {
    for answer in [r#""E""#, "4", "-1", r#""AB""#, r#""""#] {
        let block = format!(r#"{{"question":"Q","choices":["w","x","y","z"],"correct":{}}}"#, answer);
        assert!(
            matches!(normalize(&block), Err(MalformedQuestionError::InvalidAnswer(_))),
            "answer {} should be invalid",
            answer
        );
    }
}

#[test]
fn boolean_answer_is_a_type_error() {
    let err = normalize(r#"{"question":"Q","choices":["w","x","y","z"],"correct":true}"#).unwrap_err();
    assert!(matches!(err, MalformedQuestionError::WrongType { field: "correct", .. }));
}

#[test]
fn correct_is_preferred_over_answer() {
    let q = normalize(r#"{"question":"Q","choices":["w","x","y","z"],"answer":"A","correct":"D"}"#).unwrap();
    assert_eq!(q.correct_label(), Label::D);
}

#[test]
fn map_choices_are_reordered_and_filtered() {
    let block = r#"{"question":"Q","options":{"D":"four","b":"two","E":"extra","A":"one","C":"three"},"correct":"C"}"#;
    let options = options_of(block);
    assert_eq!(
        options,
        vec![
            (Label::A, "one".to_string()),
            (Label::B, "two".to_string()),
            (Label::C, "three".to_string()),
            (Label::D, "four".to_string()),
        ]
    );
}

#[test]
fn map_missing_a_letter_is_rejected() {
    let block = r#"{"question":"Q","choices":{"A":"one","B":"two","C":"three","E":"five"},"correct":"A"}"#;
    assert_eq!(normalize(block).unwrap_err(), MalformedQuestionError::TooFewOptions { found: 3 });
}

#[test]
fn long_lists_are_truncated_to_four() {
    let block = r#"{"question":"Q","choices":["w","x","y","z","extra"],"correct":0}"#;
    assert_eq!(options_of(block).len(), 4);
    assert_eq!(options_of(block)[3].1, "z");
}

#[test]
fn label_prefixes_are_stripped_from_option_text() {
    let block = r#"{"question":"Q","choices":["A. alpha","B) beta","(C) gamma","d. delta"],"correct":"A"}"#;
    let texts: Vec<String> = options_of(block).into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, ["alpha", "beta", "gamma", "delta"]);
}

#[test]
fn prefix_stripping_leaves_abbreviations_alone() {
    assert_eq!(strip_label_prefix("A.I. assisted planning"), "A.I. assisted planning");
    assert_eq!(strip_label_prefix("  B.  Risk register "), "Risk register");
}

#[test]
fn parenthesis_prefix_needs_no_space() {
    assert_eq!(strip_label_prefix("A)Project charter"), "Project charter");
    assert_eq!(strip_label_prefix("(c)Gantt chart"), "Gantt chart");
    assert_eq!(strip_label_prefix("B.Plan"), "B.Plan");
}

#[test]
fn numeric_options_are_stringified() {
    let block = r#"{"question":"What is 2+2?","choices":[3,4,5,6],"correct":"B"}"#;
    let q = normalize(block).unwrap();
    assert_eq!(q.correct_text(), "4");
}

#[test]
fn smart_quotes_are_repaired() {
    let block = "{\u{201C}question\u{201D}: \u{201C}Q\u{201D}, \u{201C}choices\u{201D}: [\u{201C}w\u{201D}, \u{201C}x\u{201D}, \u{201C}y\u{201D}, \u{201C}z\u{201D}], \u{201C}answer\u{201D}: \u{201C}C\u{201D}}";
    assert_eq!(normalize(block).unwrap().correct_label(), Label::C);
}

#[test]
fn trailing_comma_fix_keeps_smart_quotes_inside_text() {
    let block = "{\"question\":\"Which is the \u{201C}baseline\u{201D}?\",\"choices\":[\"w\",\"x\",\"y\",\"z\",],\"correct\":\"A\"}";
    let q = normalize(block).unwrap();
    assert_eq!(q.prompt_text(), "Which is the \u{201C}baseline\u{201D}?");
    assert_eq!(q.correct_text(), "w");
}

#[test]
fn trailing_commas_are_repaired() {
    let block = r#"{"question":"Q","choices":["w","x","y","z",],"answer":"B",}"#;
    assert_eq!(normalize(block).unwrap().correct_label(), Label::B);
}

#[test]
fn single_quoted_blocks_are_repaired() {
    let block = "{'question': 'Q', 'choices': ['w', 'x', 'y', 'z'], 'correct': 'D'}";
    let q = normalize(block).unwrap();
    assert_eq!(q.correct_label(), Label::D);
    assert_eq!(q.correct_text(), "z");
}

#[test]
fn unrepairable_text_is_a_parse_error() {
    assert!(matches!(normalize("{question: Q"), Err(MalformedQuestionError::Parse(_))));
}

#[test]
fn missing_fields_are_named() {
    assert_eq!(
        normalize(r#"{"choices":["w","x","y","z"],"correct":"A"}"#).unwrap_err(),
        MalformedQuestionError::MissingField("question")
    );
    assert_eq!(
        normalize(r#"{"question":"Q","correct":"A"}"#).unwrap_err(),
        MalformedQuestionError::MissingField("choices")
    );
    assert_eq!(
        normalize(r#"{"question":"Q","choices":["w","x","y","z"]}"#).unwrap_err(),
        MalformedQuestionError::MissingField("correct")
    );
}

#[test]
fn blank_question_is_rejected() {
    let err = normalize(r#"{"question":"  ","choices":["w","x","y","z"],"correct":"A"}"#).unwrap_err();
    assert_eq!(err, MalformedQuestionError::EmptyQuestion);
}

#[test]
fn empty_option_text_is_rejected() {
    let err = normalize(r#"{"question":"Q","choices":["w","","y","z"],"correct":"A"}"#).unwrap_err();
    assert_eq!(err, MalformedQuestionError::EmptyOption(Label::B));
}

#[test]
fn explanation_is_optional() {
    let q = normalize(r#"{"question":"Q","choices":["w","x","y","z"],"correct":"A"}"#).unwrap();
    assert_eq!(q.explanation(), "");
}

#[test]
fn partial_rationales_default_to_empty() {
    let block = r#"{"question":"Q","choices":["w","x","y","z"],"correct":"A","rationales":{"A":"yes","c":"no"}}"#;
    let q = normalize(block).unwrap();
    assert_eq!(q.rationale(Label::A), "yes");
    assert_eq!(q.rationale(Label::B), "");
    assert_eq!(q.rationale(Label::C), "no");
    assert_eq!(q.rationale(Label::D), "");
}

#[test]
fn top_level_array_uses_first_object() {
    let block = r#"[{"question":"Q","choices":["w","x","y","z"],"correct":"B"}, {"question":"ignored"}]"#;
    assert_eq!(normalize(block).unwrap().correct_label(), Label::B);
}

#[test]
fn scalar_document_is_not_a_question() {
    assert_eq!(normalize("42").unwrap_err(), MalformedQuestionError::NotAnObject);
}
