// SPDX-FileCopyrightText: 2026 Walletback Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Password Policy
//!
//! Classifies backup password strength for the strength meter and gates
//! submission on a confirmed, non-empty password. Classification is
//! advisory: a weak password may still be submitted, an empty or
//! unconfirmed one may not.

/// Password strength levels shown next to the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    /// Fewer than 6 characters
    Weak,
    /// 6 to 7 characters
    Fair,
    /// 8 to 9 characters
    Good,
    /// 10 characters or more
    Strong,
}

/// Classifies a password by character count.
///
/// Defined for every input, including the empty string (`Weak`).
/// Submission gating is handled separately by [`can_submit`].
pub fn classify_strength(password: &str) -> PasswordStrength {
    match password.chars().count() {
        0..=5 => PasswordStrength::Weak,
        6..=7 => PasswordStrength::Fair,
        8..=9 => PasswordStrength::Good,
        _ => PasswordStrength::Strong,
    }
}

/// Returns true iff the password and its confirmation are non-empty and equal.
///
/// Pure predicate; the only gate before any cryptographic work starts.
pub fn can_submit(password: &str, confirmation: &str) -> bool {
    !password.is_empty() && password == confirmation
}

/// Returns feedback for improving a weak password.
///
/// Joins the zxcvbn warning and suggestions into a single display string.
/// Empty when the estimator has nothing to say. Advisory only; never
/// affects submission.
pub fn password_feedback(password: &str) -> String {
    let estimate = zxcvbn::zxcvbn(password, &[]);

    let mut feedback_parts = Vec::new();

    if let Some(feedback) = estimate.feedback() {
        if let Some(warning) = feedback.warning() {
            feedback_parts.push(warning.to_string());
        }

        for suggestion in feedback.suggestions() {
            feedback_parts.push(suggestion.to_string());
        }
    }

    feedback_parts.join(" ")
}
