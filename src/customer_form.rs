//! Editable draft behind the create/edit customer form.

use crate::errors::AppError;
use crate::models::{CreateCustomer, Customer};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const DEFAULT_PRICE: f64 = 0.0;
pub const DEFAULT_CONTACT_FREQUENCY: f64 = 30.0;
pub const DEFAULT_ESTIMATED_DURATION: f64 = 60.0;

// Same shape browsers enforce for `<input type="email">`.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

/// Inputs of the customer form, named as the API names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    PhoneNumber,
    Address,
    ReferralSource,
    Price,
    ContactFrequency,
    StartDate,
    StartTime,
    EstimatedDuration,
    IsLead,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::Name,
        FormField::Email,
        FormField::PhoneNumber,
        FormField::Address,
        FormField::ReferralSource,
        FormField::Price,
        FormField::ContactFrequency,
        FormField::StartDate,
        FormField::StartTime,
        FormField::EstimatedDuration,
        FormField::IsLead,
    ];

    pub fn input_name(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::PhoneNumber => "phoneNumber",
            FormField::Address => "address",
            FormField::ReferralSource => "referralSource",
            FormField::Price => "price",
            FormField::ContactFrequency => "contactFrequency",
            FormField::StartDate => "startDate",
            FormField::StartTime => "startTime",
            FormField::EstimatedDuration => "estimatedDuration",
            FormField::IsLead => "isLead",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::PhoneNumber => "Phone Number",
            FormField::Address => "Address",
            FormField::ReferralSource => "How did they find us?",
            FormField::Price => "Service Price ($)",
            FormField::ContactFrequency => "Contact Frequency (days)",
            FormField::StartDate => "Start Date",
            FormField::StartTime => "Start Time",
            FormField::EstimatedDuration => "Estimated Duration (minutes)",
            FormField::IsLead => "This is a lead (not yet a customer)",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Email | FormField::PhoneNumber | FormField::Address
        )
    }
}

impl FromStr for FormField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.input_name() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown form field '{}'", s)))
    }
}

/// A field that failed browser-level validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Local draft of a customer being created or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub referral_source: String,
    pub price: f64,
    pub contact_frequency: f64,
    pub start_date: String,
    pub start_time: String,
    pub estimated_duration: f64,
    pub is_lead: bool,
    editing: bool,
}

impl Default for CustomerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerForm {
    /// Blank draft for a new record.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            address: String::new(),
            referral_source: String::new(),
            price: DEFAULT_PRICE,
            contact_frequency: DEFAULT_CONTACT_FREQUENCY,
            start_date: String::new(),
            start_time: String::new(),
            estimated_duration: DEFAULT_ESTIMATED_DURATION,
            is_lead: true,
            editing: false,
        }
    }

    /// Draft seeded from an existing record.
    ///
    /// A stored zero frequency or duration is treated as unset and falls back
    /// to the default.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone_number: customer.phone_number.clone(),
            address: customer.address.clone(),
            referral_source: customer.referral_source.clone().unwrap_or_default(),
            price: customer.price.unwrap_or(DEFAULT_PRICE),
            contact_frequency: customer
                .contact_frequency
                .filter(|v| *v != 0)
                .map(f64::from)
                .unwrap_or(DEFAULT_CONTACT_FREQUENCY),
            start_date: customer
                .start_date
                .as_deref()
                .map(date_part)
                .unwrap_or_default(),
            start_time: customer.start_time.clone().unwrap_or_default(),
            estimated_duration: customer
                .estimated_duration
                .filter(|v| *v != 0)
                .map(f64::from)
                .unwrap_or(DEFAULT_ESTIMATED_DURATION),
            is_lead: customer.is_lead,
            editing: true,
        }
    }

    /// Whether this draft edits an existing record.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Applies a raw input change.
    ///
    /// Number inputs fall back to 0 when the text is not a number. Checkbox
    /// inputs accept `true`/`on`/`1`/`yes`.
    pub fn set_field(&mut self, field: FormField, raw: &str) {
        match field {
            FormField::Name => self.name = raw.to_string(),
            FormField::Email => self.email = raw.to_string(),
            FormField::PhoneNumber => self.phone_number = raw.to_string(),
            FormField::Address => self.address = raw.to_string(),
            FormField::ReferralSource => self.referral_source = raw.to_string(),
            FormField::Price => self.price = parse_number(raw),
            FormField::ContactFrequency => self.contact_frequency = parse_number(raw),
            FormField::StartDate => self.start_date = raw.to_string(),
            FormField::StartTime => self.start_time = raw.to_string(),
            FormField::EstimatedDuration => self.estimated_duration = parse_number(raw),
            FormField::IsLead => {
                self.is_lead = matches!(
                    raw.trim().to_ascii_lowercase().as_str(),
                    "true" | "on" | "1" | "yes"
                )
            }
        }
    }

    /// Current value of a field as input text.
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Email => self.email.clone(),
            FormField::PhoneNumber => self.phone_number.clone(),
            FormField::Address => self.address.clone(),
            FormField::ReferralSource => self.referral_source.clone(),
            FormField::Price => self.price.to_string(),
            FormField::ContactFrequency => self.contact_frequency.to_string(),
            FormField::StartDate => self.start_date.clone(),
            FormField::StartTime => self.start_time.clone(),
            FormField::EstimatedDuration => self.estimated_duration.to_string(),
            FormField::IsLead => self.is_lead.to_string(),
        }
    }

    /// Browser-level checks only: required, email shape, numeric min/step.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for field in FormField::ALL.iter().filter(|f| f.is_required()) {
            if self.value(*field).trim().is_empty() {
                errors.push(FieldError {
                    field: *field,
                    message: "Please fill out this field.".to_string(),
                });
            }
        }

        let email = self.email.trim();
        if !email.is_empty() && !EMAIL_REGEX.is_match(email) {
            errors.push(FieldError {
                field: FormField::Email,
                message: "Please enter a valid email address.".to_string(),
            });
        }

        if self.price < 0.0 {
            errors.push(min_error(FormField::Price, "0"));
        } else if !fits_step(self.price, 0.01) {
            errors.push(FieldError {
                field: FormField::Price,
                message: "Please enter a valid value with at most two decimals.".to_string(),
            });
        }

        for (field, value) in [
            (FormField::ContactFrequency, self.contact_frequency),
            (FormField::EstimatedDuration, self.estimated_duration),
        ] {
            if value < 1.0 {
                errors.push(min_error(field, "1"));
            } else if value > f64::from(i32::MAX) {
                errors.push(FieldError {
                    field,
                    message: format!("Value must be less than or equal to {}.", i32::MAX),
                });
            } else if value.fract() != 0.0 {
                errors.push(FieldError {
                    field,
                    message: "Please enter a whole number.".to_string(),
                });
            }
        }

        errors
    }

    /// Validates and returns the payload to send.
    ///
    /// Text fields go out as typed, so a cleared field is sent as `""`.
    pub fn submit(&self) -> Result<CreateCustomer, AppError> {
        if let Some(first) = self.validate().into_iter().next() {
            return Err(AppError::Validation(first.to_string()));
        }

        Ok(CreateCustomer {
            name: self.name.clone(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.clone(),
            address: self.address.clone(),
            referral_source: Some(self.referral_source.clone()),
            price: Some(self.price),
            contact_frequency: Some(self.contact_frequency as i32),
            start_date: Some(self.start_date.clone()),
            start_time: Some(self.start_time.clone()),
            estimated_duration: Some(self.estimated_duration as i32),
            is_lead: self.is_lead,
        })
    }

    pub fn submit_label(&self, is_loading: bool) -> &'static str {
        if is_loading {
            "Saving..."
        } else if self.editing {
            "Update Customer"
        } else {
            "Create Customer"
        }
    }
}

fn date_part(raw: &str) -> String {
    raw.split('T').next().unwrap_or_default().to_string()
}

fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn fits_step(value: f64, step: f64) -> bool {
    let scaled = value / step;
    (scaled - scaled.round()).abs() < 1e-6
}

fn min_error(field: FormField, min: &str) -> FieldError {
    FieldError {
        field,
        message: format!("Value must be greater than or equal to {}.", min),
    }
}
