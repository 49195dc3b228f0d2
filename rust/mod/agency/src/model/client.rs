use std::fmt;

use serde::{Deserialize, Serialize};

use agency_core::ServiceError;

use crate::validate;

pub const CLIENT_NAME_MAX_LEN: usize = 50;
pub const POSTAL_ADDRESS_MAX_LEN: usize = 100;
pub const PHONE_MAX_LEN: usize = 30;
pub const EMAIL_MAX_LEN: usize = 100;

/// Client: someone who hires ad placements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,
}

impl Client {
    /// Trims every field; blank contact fields become absent.
    pub fn normalize(&mut self) {
        validate::trim(&mut self.first_name);
        validate::trim(&mut self.last_name);
        validate::trim_optional(&mut self.postal_address);
        validate::trim_optional(&mut self.phone);
        validate::trim_optional(&mut self.email);
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::required("first name", &self.first_name, CLIENT_NAME_MAX_LEN)?;
        validate::required("last name", &self.last_name, CLIENT_NAME_MAX_LEN)?;
        validate::optional("postal address", self.postal_address.as_deref(), POSTAL_ADDRESS_MAX_LEN)?;
        validate::optional("phone", self.phone.as_deref(), PHONE_MAX_LEN)?;
        if let Some(email) = &self.email {
            validate::max_len("email", email, EMAIL_MAX_LEN)?;
            validate::email("email", email)?;
        }
        Ok(())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
