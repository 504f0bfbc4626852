//! Tests for the password policy

use walletback_core::password::*;

#[test]
fn test_strength_thresholds() {
    assert_eq!(classify_strength(""), PasswordStrength::Weak);
    assert_eq!(classify_strength("abcde"), PasswordStrength::Weak);
    assert_eq!(classify_strength("abcdef"), PasswordStrength::Fair);
    assert_eq!(classify_strength("abcdefg"), PasswordStrength::Fair);
    assert_eq!(classify_strength("abcdefgh"), PasswordStrength::Good);
    assert_eq!(classify_strength("abcdefghi"), PasswordStrength::Good);
    assert_eq!(classify_strength("abcdefghij"), PasswordStrength::Strong);
    assert_eq!(
        classify_strength("a much longer passphrase"),
        PasswordStrength::Strong
    );
}

#[test]
fn test_strength_counts_characters_not_bytes() {
    // Six two-byte characters classify by character count.
    assert_eq!(classify_strength("éééééé"), PasswordStrength::Fair);
}

#[test]
fn test_empty_password_is_weak_but_defined() {
    // Classification is total; gating happens in can_submit.
    assert_eq!(classify_strength(""), PasswordStrength::Weak);
    assert!(!can_submit("", ""));
}

#[test]
fn test_can_submit_requires_non_empty_match() {
    assert!(can_submit("abc", "abc"));
    assert!(can_submit("correcthorse123", "correcthorse123"));

    assert!(!can_submit("", ""));
    assert!(!can_submit("abc", "abd"));
    assert!(!can_submit("abc", ""));
    assert!(!can_submit("", "abc"));
}

#[test]
fn test_weak_password_can_still_be_submitted() {
    // Strength is advisory; only confirmation gates submission.
    assert_eq!(classify_strength("ab"), PasswordStrength::Weak);
    assert!(can_submit("ab", "ab"));
}

#[test]
fn test_feedback_for_dictionary_password() {
    let feedback = password_feedback("password123");
    assert!(!feedback.is_empty());
}
