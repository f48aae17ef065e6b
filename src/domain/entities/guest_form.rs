//! Guest contact details collected on the details step.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Honorific shown before the guest's name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prefix {
    #[default]
    #[serde(rename = "")]
    None,
    Mr,
    Mrs,
    Ms,
    Dr,
}

impl Prefix {
    pub const ALL: [Prefix; 5] = [Prefix::None, Prefix::Mr, Prefix::Mrs, Prefix::Ms, Prefix::Dr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::None => "",
            Prefix::Mr => "Mr",
            Prefix::Mrs => "Mrs",
            Prefix::Ms => "Ms",
            Prefix::Dr => "Dr",
        }
    }
}

/// Guest form as submitted.
///
/// Only presence of the required fields is checked; email and phone formats
/// are left to the reservations team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuestFormData {
    #[serde(default)]
    pub prefix: Prefix,

    #[serde(default)]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    #[serde(default)]
    pub special_request: String,
}

impl GuestFormData {
    /// `"<prefix> <first> <last>"`, skipping an empty prefix.
    pub fn full_name(&self) -> String {
        [
            self.prefix.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> GuestFormData {
        GuestFormData {
            prefix: Prefix::Ms,
            first_name: "Elena".to_string(),
            last_name: "Marchetti".to_string(),
            email: "elena@example.com".to_string(),
            phone: "+39 055 123 4567".to_string(),
            special_request: String::new(),
        }
    }

    #[test]
    fn test_full_name_with_prefix() {
        assert_eq!(filled().full_name(), "Ms Elena Marchetti");
    }

    #[test]
    fn test_full_name_without_prefix() {
        let form = GuestFormData {
            prefix: Prefix::None,
            ..filled()
        };
        assert_eq!(form.full_name(), "Elena Marchetti");
    }

    #[test]
    fn test_required_fields() {
        assert!(filled().validate().is_ok());

        let missing_phone = GuestFormData {
            phone: String::new(),
            ..filled()
        };
        let errors = missing_phone.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));

        let empty = GuestFormData::default();
        assert_eq!(empty.validate().unwrap_err().field_errors().len(), 4);
    }

    #[test]
    fn test_special_request_is_optional() {
        let form = GuestFormData {
            special_request: String::new(),
            ..filled()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_prefix_deserializes_empty_string() {
        let form: GuestFormData = serde_json::from_value(serde_json::json!({
            "prefix": "",
            "firstName": "A",
            "lastName": "B",
            "email": "a@b.c",
            "phone": "1"
        }))
        .unwrap();

        assert_eq!(form.prefix, Prefix::None);
        assert_eq!(form.special_request, "");
    }
}
