//! Local form state and the client-side checks run before any request.

use crate::models::{NewTransaction, Profile, ProfileUpdate, RegisterData, TransactionType, User};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Enter a valid amount")]
    InvalidAmount,

    #[error("{0} is required")]
    Missing(&'static str),
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password2: String,
    pub phone_number: String,
    pub upi_id: String,
}

impl RegisterForm {
    /// Mismatched passwords stop here, before any request is built.
    pub fn validate(&self) -> Result<RegisterData, FormError> {
        if self.password != self.password2 {
            return Err(FormError::PasswordMismatch);
        }
        Ok(RegisterData {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            password: self.password.clone(),
            password2: self.password2.clone(),
            phone_number: optional(&self.phone_number),
            upi_id: optional(&self.upi_id),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub sender_upi: String,
    pub receiver_upi: String,
    pub amount: String,
    pub transaction_type: TransactionType,
    pub description: String,
    pub location: String,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            sender_upi: String::new(),
            receiver_upi: String::new(),
            amount: String::new(),
            transaction_type: TransactionType::Send,
            description: String::new(),
            location: String::new(),
        }
    }
}

impl TransactionForm {
    /// Starts with the user's own UPI handle as sender, when known.
    pub fn for_user(user: Option<&User>) -> Self {
        let sender_upi = user
            .and_then(|u| u.profile.as_ref())
            .and_then(|p| p.upi_id.clone())
            .unwrap_or_default();
        Self {
            sender_upi,
            ..Self::default()
        }
    }

    /// Range checks on the amount are left to the server.
    pub fn to_request(&self) -> Result<NewTransaction, FormError> {
        let sender_upi = optional(&self.sender_upi).ok_or(FormError::Missing("Sender UPI"))?;
        let receiver_upi =
            optional(&self.receiver_upi).ok_or(FormError::Missing("Receiver UPI"))?;
        let amount =
            Decimal::from_str(self.amount.trim()).map_err(|_| FormError::InvalidAmount)?;
        Ok(NewTransaction {
            sender_upi,
            receiver_upi,
            amount,
            transaction_type: self.transaction_type,
            description: optional(&self.description),
            device_id: None,
            ip_address: None,
            location: optional(&self.location),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub upi_id: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        let profile = user.profile.clone().unwrap_or(Profile {
            phone_number: None,
            upi_id: None,
        });
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: profile.phone_number.unwrap_or_default(),
            upi_id: profile.upi_id.unwrap_or_default(),
        }
    }

    /// Only the fields that differ from `user` are sent.
    pub fn changes(&self, user: &User) -> ProfileUpdate {
        let original = Self::from_user(user);
        let changed = |new: &str, old: &str| (new.trim() != old).then(|| new.trim().to_string());

        let profile = (self.phone_number.trim() != original.phone_number
            || self.upi_id.trim() != original.upi_id)
            .then(|| Profile {
                phone_number: optional(&self.phone_number),
                upi_id: optional(&self.upi_id),
            });

        ProfileUpdate {
            email: changed(&self.email, &original.email),
            first_name: changed(&self.first_name, &original.first_name),
            last_name: changed(&self.last_name, &original.last_name),
            profile,
        }
    }
}
