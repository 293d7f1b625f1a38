use clario::errors::ValidationError;
use clario::prompt::{
    IDENTITY_REPLY, PRIMARY_TEMPLATE, SENTINEL, build_primary_prompt, validate_input,
};

#[test]
fn test_validate_input_accepts_prose() {
    let valid_text = "Summarize the discussion about Rust ownership and borrowing.";
    assert!(validate_input(valid_text).is_ok());
    // Numbers inside prose are fine
    assert!(validate_input("In 1969, Apollo 11 landed on the Moon.").is_ok());
}

#[test]
fn test_validate_input_rejects_empty_and_numeric() {
    assert_eq!(validate_input(""), Err(ValidationError::Empty));
    assert_eq!(validate_input("   \n "), Err(ValidationError::Empty));
    assert_eq!(validate_input("123456"), Err(ValidationError::NumericOnly));
    assert_eq!(validate_input("-0.5"), Err(ValidationError::NumericOnly));
    assert_eq!(validate_input("0x1F"), Err(ValidationError::NumericOnly));
}

#[test]
fn test_sentinel_is_not_rejected_by_validation() {
    assert!(validate_input(SENTINEL).is_ok());
    assert!(!IDENTITY_REPLY.is_empty());
}

#[test]
fn test_primary_prompt_interpolates_text_once_at_the_end() {
    let text = "Plate tectonics explains how continents move.";
    let prompt = build_primary_prompt(text);

    assert_eq!(prompt.len(), PRIMARY_TEMPLATE.len() + text.len());
    assert_eq!(prompt.matches(text).count(), 1);
    assert!(prompt.ends_with(text));
    // The template asks for plain text with dash key points and no headings
    assert!(PRIMARY_TEMPLATE.contains("plain text"));
    assert!(PRIMARY_TEMPLATE.contains("dash"));
    assert!(PRIMARY_TEMPLATE.contains("Do not include headings"));
}
