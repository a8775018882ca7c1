//! Checkout form validation.
//!
//! Every field is checked on each run; the result is a map of field to
//! error, empty when the form can be submitted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::checkout::{CheckoutForm, Field};

/// Minimum delivery address length, after trimming.
pub const MIN_ADDRESS_LEN: usize = 10;

/// Maximum length of an email address (RFC 5321).
pub const MAX_EMAIL_LEN: usize = 254;

const MAX_EMAIL_LOCAL_LEN: usize = 64;

/// Indian mobile numbers: optional +91 / 91 / 0 prefix, then ten digits
/// starting with 6-9.
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+?91|0)?[6-9]\d{9}$").expect("Invalid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("Invalid regex")
});

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Empty after trimming.
    Required,
    /// Not a recognized mobile number.
    InvalidPhone,
    /// Not a syntactically valid email address.
    InvalidEmail,
    /// Shorter than [`MIN_ADDRESS_LEN`].
    AddressTooShort,
}

impl FieldError {
    /// Message shown under `field`.
    pub fn message(&self, field: Field) -> &'static str {
        match (self, field) {
            (FieldError::Required, Field::Name) => "Name is required",
            (FieldError::Required, Field::Phone) => "Phone number is required",
            (FieldError::Required, Field::Email) => "Email is required",
            (FieldError::Required, Field::Address) => "Delivery address is required",
            (FieldError::InvalidPhone, _) => "Enter a valid 10-digit phone number",
            (FieldError::InvalidEmail, _) => "Enter a valid email address",
            (FieldError::AddressTooShort, _) => "Please enter a complete address",
        }
    }
}

/// Field errors from the last validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Message for `field`, if it has an error.
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|e| e.message(field))
    }

    /// Drop the error for one field.
    pub fn clear(&mut self, field: Field) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    /// Fields with errors, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// Field to message map, for rendering.
    pub fn messages(&self) -> BTreeMap<Field, &'static str> {
        self.errors
            .iter()
            .map(|(field, error)| (*field, error.message(*field)))
            .collect()
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.messages().serialize(serializer)
    }
}

/// Check every field of `form`.
pub fn validate(form: &CheckoutForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.name.trim().is_empty() {
        errors.insert(Field::Name, FieldError::Required);
    }

    let phone = form.phone.trim();
    if phone.is_empty() {
        errors.insert(Field::Phone, FieldError::Required);
    } else if !is_valid_mobile(phone) {
        errors.insert(Field::Phone, FieldError::InvalidPhone);
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert(Field::Email, FieldError::Required);
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, FieldError::InvalidEmail);
    }

    let address = form.address.trim();
    if address.is_empty() {
        errors.insert(Field::Address, FieldError::Required);
    } else if address.chars().count() < MIN_ADDRESS_LEN {
        errors.insert(Field::Address, FieldError::AddressTooShort);
    }

    errors
}

/// Whether `phone` is an Indian mobile number.
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_RE.is_match(phone)
}

/// Whether `email` is a syntactically valid address.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(email) {
        return false;
    }
    let Some((local, _)) = email.rsplit_once('@') else {
        return false;
    };
    local.len() <= MAX_EMAIL_LOCAL_LEN
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
}
