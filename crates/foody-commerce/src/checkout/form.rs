//! Checkout form state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Editable fields of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Phone,
    Email,
    Address,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Phone, Field::Email, Field::Address];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Phone => "Phone Number",
            Field::Email => "Email Address",
            Field::Address => "Delivery Address",
        }
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "phone" => Ok(Field::Phone),
            "email" => Ok(Field::Email),
            "address" => Ok(Field::Address),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment options offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    /// Card payment.
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Card => "card",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Cash on Delivery",
            PaymentMethod::Card => "Card Payment",
        }
    }

    /// Notice shown when this method is selected.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            PaymentMethod::Cod => None,
            PaymentMethod::Card => Some(
                "Card payment integration coming soon. Please use Cash on Delivery for now.",
            ),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cod" | "cash" => Ok(PaymentMethod::Cod),
            "card" => Ok(PaymentMethod::Card),
            _ => Err(()),
        }
    }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
            Field::Address => self.address = value,
        }
    }

    /// Trimmed copy of the contact fields, used on the order.
    pub fn customer_details(&self) -> CustomerDetails {
        CustomerDetails {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

/// Contact and delivery details attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_get_set() {
        let mut form = CheckoutForm::default();
        for field in Field::ALL {
            assert_eq!(form.get(field), "");
        }
        form.set(Field::Email, "asha@example.com");
        assert_eq!(form.get(Field::Email), "asha@example.com");
        assert_eq!(form.payment_method, PaymentMethod::Cod);
    }

    #[test]
    fn test_customer_details_are_trimmed() {
        let mut form = CheckoutForm::default();
        form.set(Field::Name, "  Asha Rao ");
        form.set(Field::Address, "\t12 MG Road, Bengaluru\n");
        let details = form.customer_details();
        assert_eq!(details.name, "Asha Rao");
        assert_eq!(details.address, "12 MG Road, Bengaluru");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("COD".parse::<PaymentMethod>(), Ok(PaymentMethod::Cod));
        assert_eq!(" cash ".parse::<PaymentMethod>(), Ok(PaymentMethod::Cod));
        assert_eq!("card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert!("crypto".parse::<PaymentMethod>().is_err());
        assert!(PaymentMethod::Card.notice().is_some());
        assert!(PaymentMethod::Cod.notice().is_none());
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("Phone".parse::<Field>(), Ok(Field::Phone));
        assert_eq!("address".parse::<Field>(), Ok(Field::Address));
        assert!("zip".parse::<Field>().is_err());
    }
}
