//! Validation rules for the signup and signin forms
//!
//! A form is described by a [`Schema`]: an ordered list of [`Rule`]s, each
//! pairing one field with one check and one message. Validation keeps the
//! first failing rule of every field, so a rejected submission carries at most
//! one message per field and never a single aggregate error.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum length of the display name
pub const NAME_MIN_LENGTH: usize = 2;

/// Minimum length of the username
pub const USERNAME_MIN_LENGTH: usize = 2;

/// Maximum length of the username
pub const USERNAME_MAX_LENGTH: usize = 50;

/// Minimum password length (signup and signin alike)
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Minimum length of the top-level domain in an email address
const EMAIL_MIN_TLD_LENGTH: usize = 2;

/// A form field addressed by validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Username,
    Email,
    Password,
}

impl Field {
    /// Machine name, matching the input's `name` attribute
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    /// Human-readable label used in default messages
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single acceptance check applied to a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Value must be at least this long
    MinLength(usize),
    /// Value must be at most this long
    MaxLength(usize),
    /// Value must be a syntactically valid email address
    Email,
}

impl Check {
    /// Whether `value` satisfies this check
    pub fn passes(self, value: &str) -> bool {
        match self {
            Check::MinLength(min) => input_length(value) >= min,
            Check::MaxLength(max) => input_length(value) <= max,
            Check::Email => is_valid_email(value),
        }
    }

    fn default_message(self, field: Field) -> String {
        match self {
            Check::MinLength(min) => {
                format!("{} must be at least {} characters", field.label(), min)
            }
            Check::MaxLength(max) => {
                format!("{} must be at most {} characters", field.label(), max)
            }
            Check::Email => "Invalid email address".to_string(),
        }
    }
}

/// One rule of a schema: a check on a field plus the message shown when it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub field: Field,
    pub check: Check,
    pub message: String,
}

impl Rule {
    /// Create a rule with the default, field-specific message
    pub fn new(field: Field, check: Check) -> Self {
        Self {
            field,
            check,
            message: check.default_message(field),
        }
    }

    /// Replace the message shown when this rule fails
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Field-addressed validation messages, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message attached to `field`, if it failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Record a message for `field` unless one is already present
    pub fn record(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Drop the message of a single field (the user edited it)
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    /// Failed fields in form order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

/// Read access to raw form values by field
pub trait FormValues {
    /// Raw value of `field`; fields the form does not have read as empty
    fn value(&self, field: Field) -> &str;
}

/// Raw, unvalidated signup form values. `Default` is the empty form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl FormValues for SignupDraft {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }
}

impl fmt::Debug for SignupDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupDraft")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Raw, unvalidated signin form values
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninDraft {
    pub email: String,
    pub password: String,
}

impl FormValues for SigninDraft {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::Name | Field::Username => "",
        }
    }
}

impl fmt::Debug for SigninDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigninDraft")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup input that passed validation. Only [`Schema::validate_signup`] builds one.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupInput {
    name: String,
    username: String,
    email: String,
    password: String,
}

impl SignupInput {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Email and password projected as signin credentials.
    ///
    /// The signin rules are a subset of the signup rules, so the projection is
    /// valid without re-checking.
    pub fn credentials(&self) -> SigninInput {
        SigninInput {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for SignupInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupInput")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signin credentials that passed validation
#[derive(Clone, PartialEq, Eq)]
pub struct SigninInput {
    email: String,
    password: String,
}

impl SigninInput {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for SigninInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigninInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Ordered set of validation rules for one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    rules: Vec<Rule>,
}

impl Schema {
    /// Empty schema that accepts anything
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for the signup form
    pub fn signup() -> Self {
        Self::new()
            .rule(Rule::new(Field::Name, Check::MinLength(NAME_MIN_LENGTH)))
            .rule(Rule::new(
                Field::Username,
                Check::MinLength(USERNAME_MIN_LENGTH),
            ))
            .rule(Rule::new(
                Field::Username,
                Check::MaxLength(USERNAME_MAX_LENGTH),
            ))
            .rule(Rule::new(Field::Email, Check::Email))
            .rule(Rule::new(
                Field::Password,
                Check::MinLength(PASSWORD_MIN_LENGTH),
            ))
    }

    /// Rules for the signin form
    pub fn signin() -> Self {
        Self::new()
            .rule(Rule::new(Field::Email, Check::Email))
            .rule(Rule::new(
                Field::Password,
                Check::MinLength(PASSWORD_MIN_LENGTH),
            ))
    }

    /// Append a rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace the message of every rule on `field`
    pub fn with_message(mut self, field: Field, message: impl Into<String>) -> Self {
        let message = message.into();
        for rule in self.rules.iter_mut().filter(|r| r.field == field) {
            rule.message = message.clone();
        }
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run every rule and collect the first failure of each field
    pub fn check(&self, values: &impl FormValues) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for rule in &self.rules {
            if !errors.contains(rule.field) && !rule.check.passes(values.value(rule.field)) {
                errors.record(rule.field, rule.message.clone());
            }
        }
        errors
    }

    /// Validate a signup draft into a typed [`SignupInput`]
    pub fn validate_signup(&self, draft: &SignupDraft) -> Result<SignupInput, FieldErrors> {
        let errors = self.check(draft);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SignupInput {
            name: draft.name.clone(),
            username: draft.username.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
        })
    }

    /// Validate a signin draft into typed [`SigninInput`]
    pub fn validate_signin(&self, draft: &SigninDraft) -> Result<SigninInput, FieldErrors> {
        let errors = self.check(draft);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SigninInput {
            email: draft.email.clone(),
            password: draft.password.clone(),
        })
    }
}

/// Validate a signup draft with the default rules and messages
pub fn validate_signup(draft: &SignupDraft) -> Result<SignupInput, FieldErrors> {
    Schema::signup().validate_signup(draft)
}

/// Validate a signin draft with the default rules and messages
pub fn validate_signin(draft: &SigninDraft) -> Result<SigninInput, FieldErrors> {
    Schema::signin().validate_signin(draft)
}

/// Length as the browser counts it for form inputs (UTF-16 code units)
pub fn input_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Checks standard email syntax: `local@label.label.tld`
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.');

    let Some(last) = local.chars().last() else {
        return false;
    };

    local.chars().all(allowed)
        && !local.starts_with('.')
        && !local.contains("..")
        && last != '.'
        && last != '\''
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };

    if hosts.is_empty() {
        return false;
    }

    let host_ok = |label: &&str| {
        label
            .chars()
            .next()
            .is_some_and(|first| first.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };

    hosts.iter().all(host_ok)
        && tld.len() >= EMAIL_MIN_TLD_LENGTH
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> SignupDraft {
        SignupDraft {
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "correct-horse".to_string(),
        }
    }

    #[test]
    fn test_valid_signup_is_accepted() {
        let input = validate_signup(&valid_draft()).unwrap();

        assert_eq!(input.name(), "Alice");
        assert_eq!(input.username(), "alice");
        assert_eq!(input.email(), "alice@example.com");
        assert_eq!(input.password(), "correct-horse");
    }

    #[test]
    fn test_boundary_lengths_are_accepted() {
        let draft = SignupDraft {
            name: "Al".to_string(),
            username: "a".repeat(USERNAME_MAX_LENGTH),
            email: "a@b.co".to_string(),
            password: "12345678".to_string(),
        };

        assert!(validate_signup(&draft).is_ok());

        let draft = SignupDraft {
            username: "ab".to_string(),
            ..draft
        };
        assert!(validate_signup(&draft).is_ok());
    }

    #[test]
    fn test_short_password_rejects_password_only() {
        let draft = SignupDraft {
            name: "Al".to_string(),
            username: "al".to_string(),
            email: "al@x.com".to_string(),
            password: "short".to_string(),
        };

        let errors = validate_signup(&draft).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_each_rule_is_attributed_to_its_field() {
        let cases = [
            (
                Field::Name,
                SignupDraft {
                    name: "A".to_string(),
                    ..valid_draft()
                },
            ),
            (
                Field::Username,
                SignupDraft {
                    username: "a".to_string(),
                    ..valid_draft()
                },
            ),
            (
                Field::Username,
                SignupDraft {
                    username: "a".repeat(USERNAME_MAX_LENGTH + 1),
                    ..valid_draft()
                },
            ),
            (
                Field::Email,
                SignupDraft {
                    email: "not-an-email".to_string(),
                    ..valid_draft()
                },
            ),
            (
                Field::Password,
                SignupDraft {
                    password: "1234567".to_string(),
                    ..valid_draft()
                },
            ),
        ];

        for (field, draft) in cases {
            let errors = validate_signup(&draft).unwrap_err();
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field], "{:?}", draft);
        }
    }

    #[test]
    fn test_all_fields_reported_together() {
        let errors = validate_signup(&SignupDraft::default()).unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::Name, Field::Username, Field::Email, Field::Password]
        );
    }

    #[test]
    fn test_default_messages_are_field_specific() {
        let errors = validate_signup(&SignupDraft::default()).unwrap_err();

        assert_eq!(
            errors.get(Field::Name),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(
            errors.get(Field::Username),
            Some("Username must be at least 2 characters")
        );
        assert_eq!(errors.get(Field::Email), Some("Invalid email address"));

        let long = SignupDraft {
            username: "u".repeat(60),
            ..valid_draft()
        };
        assert_eq!(
            validate_signup(&long).unwrap_err().get(Field::Username),
            Some("Username must be at most 50 characters")
        );
    }

    #[test]
    fn test_custom_messages_override_defaults() {
        let schema = Schema::signup()
            .with_message(Field::Name, "Tell us your name")
            .rule(Rule::new(Field::Username, Check::MaxLength(10)).with_message("Keep it short"));

        let errors = schema
            .validate_signup(&SignupDraft {
                name: "A".to_string(),
                username: "a_rather_long_name".to_string(),
                ..valid_draft()
            })
            .unwrap_err();

        assert_eq!(errors.get(Field::Name), Some("Tell us your name"));
        assert_eq!(errors.get(Field::Username), Some("Keep it short"));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let schema = Schema::new()
            .rule(Rule::new(Field::Username, Check::MinLength(2)).with_message("first"))
            .rule(Rule::new(Field::Username, Check::MinLength(3)).with_message("second"));

        let draft = SignupDraft {
            username: "a".to_string(),
            ..valid_draft()
        };

        assert_eq!(schema.check(&draft).get(Field::Username), Some("first"));
    }

    #[test]
    fn test_signin_validation() {
        let ok = SigninDraft {
            email: "bob@example.org".to_string(),
            password: "hunter22".to_string(),
        };
        let input = validate_signin(&ok).unwrap();
        assert_eq!(input.email(), "bob@example.org");
        assert_eq!(input.password(), "hunter22");

        let errors = validate_signin(&SigninDraft {
            email: "bob@".to_string(),
            password: "short".to_string(),
        })
        .unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::Email, Field::Password]
        );
        assert!(!errors.contains(Field::Name));
    }

    #[test]
    fn test_credentials_projection() {
        let input = validate_signup(&valid_draft()).unwrap();
        let credentials = input.credentials();

        assert_eq!(credentials.email(), input.email());
        assert_eq!(credentials.password(), input.password());
    }

    #[test]
    fn test_valid_emails() {
        for email in [
            "user@example.com",
            "first.last@example.co.uk",
            "o'neil+tag@mail-server.io",
            "x_y-z@sub.domain.org",
            "a@b.cd",
            "UPPER@EXAMPLE.COM",
        ] {
            assert!(is_valid_email(email), "{}", email);
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user'@example.com",
            "user@example..com",
            "user@-example.com",
            "user@example.c",
            "user@example.c0m",
            "user@exa mple.com",
            "us er@example.com",
            "user@@example.com",
            "user@example.com.",
        ] {
            assert!(!is_valid_email(email), "{}", email);
        }
    }

    #[test]
    fn test_length_counts_utf16_units() {
        assert_eq!(input_length("ab"), 2);
        assert_eq!(input_length("é"), 1);
        assert_eq!(input_length("😀"), 2);

        let draft = SignupDraft {
            name: "😀".to_string(),
            ..valid_draft()
        };
        assert!(validate_signup(&draft).is_ok());
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let draft = SignupDraft {
            name: "  ".to_string(),
            ..valid_draft()
        };
        assert!(validate_signup(&draft).is_ok());
    }

    #[test]
    fn test_debug_redacts_password() {
        let draft = valid_draft();
        let input = validate_signup(&draft).unwrap();

        assert!(!format!("{:?}", draft).contains("correct-horse"));
        assert!(!format!("{:?}", input).contains("correct-horse"));
        assert!(!format!("{:?}", input.credentials()).contains("correct-horse"));
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.record(Field::Password, "too short");
        errors.record(Field::Email, "bad");
        errors.record(Field::Email, "ignored");

        assert_eq!(errors.to_string(), "email: bad, password: too short");

        errors.clear(Field::Email);
        assert_eq!(errors.to_string(), "password: too short");
    }
}
