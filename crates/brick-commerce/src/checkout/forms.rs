//! Shipping and payment form data.
//!
//! The checkout flow stores whatever it is given; callers run
//! `validate()` before submitting a form.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("valid phone regex"));
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s]+$").expect("valid card regex"));
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("valid expiry regex"));
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("valid digits regex"));

/// Default shipping country.
pub const DEFAULT_COUNTRY: &str = "México";

/// A form field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Wire name of the field, e.g. `zipCode`.
    pub field: &'static str,
    pub message: &'static str,
}

/// Collects field errors for one form.
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn fail(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    /// Character length within `min..=max`, one error per field.
    fn length(
        &mut self,
        field: &'static str,
        value: &str,
        min: usize,
        max: Option<usize>,
        message: &'static str,
    ) -> bool {
        let len = value.chars().count();
        let ok = len >= min && max.map_or(true, |max| len <= max);
        if !ok {
            self.fail(field, message);
        }
        ok
    }

    fn pattern(&mut self, field: &'static str, value: &str, re: &Regex, message: &'static str) {
        if !re.is_match(value) {
            self.fail(field, message);
        }
    }

    fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// Shipping details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl ShippingInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format the address as a single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.address, self.city, self.state, self.zip_code, self.country
        )
    }

    /// Check every field, returning all failures at once.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut c = Checker::new();
        c.length(
            "firstName",
            &self.first_name,
            2,
            Some(50),
            "El nombre debe tener entre 2 y 50 caracteres",
        );
        c.length(
            "lastName",
            &self.last_name,
            2,
            Some(50),
            "El apellido debe tener entre 2 y 50 caracteres",
        );
        c.pattern("email", &self.email, &EMAIL_RE, "Ingresa un email válido");
        if c.length(
            "phone",
            &self.phone,
            10,
            None,
            "El teléfono debe tener al menos 10 dígitos",
        ) {
            c.pattern("phone", &self.phone, &PHONE_RE, "Ingresa un teléfono válido");
        }
        c.length(
            "address",
            &self.address,
            5,
            Some(200),
            "La dirección debe tener entre 5 y 200 caracteres",
        );
        c.length(
            "city",
            &self.city,
            2,
            None,
            "La ciudad debe tener al menos 2 caracteres",
        );
        c.length(
            "state",
            &self.state,
            2,
            None,
            "El estado debe tener al menos 2 caracteres",
        );
        c.length(
            "zipCode",
            &self.zip_code,
            4,
            Some(10),
            "El código postal debe tener entre 4 y 10 caracteres",
        );
        c.finish()
    }
}

/// Card details. `Debug` output masks the card number and CVV.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub card_number: String,
    pub card_name: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentInfo {
    /// Last four digits of the card number.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }

    /// Card number for display, e.g. `**** 3456`.
    pub fn masked_number(&self) -> String {
        format!("**** {}", self.last_four())
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut c = Checker::new();
        if c.length(
            "cardNumber",
            &self.card_number,
            16,
            Some(19),
            "El número de tarjeta debe tener 16 dígitos",
        ) {
            c.pattern(
                "cardNumber",
                &self.card_number,
                &CARD_NUMBER_RE,
                "Solo se permiten números",
            );
        }
        c.length(
            "cardName",
            &self.card_name,
            3,
            Some(100),
            "El nombre debe tener entre 3 y 100 caracteres",
        );
        c.pattern(
            "expiryDate",
            &self.expiry_date,
            &EXPIRY_RE,
            "Formato inválido (MM/AA)",
        );
        if c.length("cvv", &self.cvv, 3, Some(4), "El CVV debe tener 3-4 dígitos") {
            c.pattern("cvv", &self.cvv, &DIGITS_RE, "Solo se permiten números");
        }
        c.finish()
    }
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &self.masked_number())
            .field("card_name", &self.card_name)
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{payment, shipping};
    use super::*;

    fn fields(errors: Vec<FieldError>) -> Vec<&'static str> {
        errors.into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_forms() {
        assert!(shipping().validate().is_ok());
        assert!(payment().validate().is_ok());
    }

    #[test]
    fn test_shipping_errors() {
        let mut info = shipping();
        info.first_name = "A".into();
        info.email = "not-an-email".into();
        info.phone = "555-abc-12345".into();
        info.zip_code = "123".into();

        let errors = info.validate().unwrap_err();
        assert_eq!(fields(errors), vec!["firstName", "email", "phone", "zipCode"]);
    }

    #[test]
    fn test_short_phone_reports_once() {
        let mut info = shipping();
        info.phone = "12ab".into();
        let errors = info.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "El teléfono debe tener al menos 10 dígitos");
    }

    #[test]
    fn test_payment_errors() {
        let mut info = payment();
        info.card_number = "4242-4242-4242-4242".into();
        info.expiry_date = "13/29".into();
        info.cvv = "12a".into();

        let errors = info.validate().unwrap_err();
        assert_eq!(fields(errors), vec!["cardNumber", "expiryDate", "cvv"]);
    }

    #[test]
    fn test_expiry_format() {
        let mut info = payment();
        for ok in ["01/25", "09/30", "12/99"] {
            info.expiry_date = ok.into();
            assert!(info.validate().is_ok(), "{ok}");
        }
        for bad in ["1/25", "00/25", "12/2025", "12-25"] {
            info.expiry_date = bad.into();
            assert!(info.validate().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_debug_masks_card() {
        let debug = format!("{:?}", payment());
        assert!(debug.contains("**** 4242"));
        assert!(!debug.contains("4242 4242"));
        assert!(!debug.contains("123"));
    }

    #[test]
    fn test_country_defaults() {
        let json = r#"{
            "firstName": "Ana", "lastName": "López", "email": "ana@example.com",
            "phone": "5512345678", "address": "Calle 1 #2", "city": "Puebla",
            "state": "Puebla", "zipCode": "72000"
        }"#;
        let info: ShippingInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.country, "México");
        assert_eq!(info.full_name(), "Ana López");
    }
}
