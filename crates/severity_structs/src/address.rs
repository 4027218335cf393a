use core::fmt;

use serde::{Deserialize, Serialize};

/// A reverse-geocoded street address.
///
/// Every component is optional; rural or unaddressed points commonly come
/// back without a house number or street.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Address {
    /// House number
    pub house_number: Option<String>,

    /// Street name
    pub road: Option<String>,

    /// City or town name
    pub city: Option<String>,

    /// State or province name
    pub state: Option<String>,

    /// Postal code
    pub postcode: Option<String>,
}

impl fmt::Display for Address {
    /// Renders the address as a single line, omitting missing components
    /// without leaving stray separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let street = join_present(&[self.house_number.as_deref(), self.road.as_deref()], " ");
        let region = join_present(&[self.state.as_deref(), self.postcode.as_deref()], " ");

        let line = join_present(
            &[
                non_empty(&street),
                self.city.as_deref(),
                non_empty(&region),
            ],
            ", ",
        );

        write!(f, "{line}")
    }
}

fn join_present(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .filter_map(|part| *part)
        .collect::<Vec<_>>()
        .join(separator)
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_address() -> Address {
        Address {
            house_number: Some("9201".to_string()),
            road: Some("University City Blvd".to_string()),
            city: Some("Charlotte".to_string()),
            state: Some("North Carolina".to_string()),
            postcode: Some("28223".to_string()),
        }
    }

    #[test]
    fn test_display_full_address() {
        assert_eq!(
            full_address().to_string(),
            "9201 University City Blvd, Charlotte, North Carolina 28223"
        );
    }

    #[test]
    fn test_display_without_house_number() {
        let address = Address {
            house_number: None,
            ..full_address()
        };
        assert_eq!(
            address.to_string(),
            "University City Blvd, Charlotte, North Carolina 28223"
        );
    }

    #[test]
    fn test_display_city_only() {
        let address = Address {
            city: Some("Charlotte".to_string()),
            ..Address::default()
        };
        assert_eq!(address.to_string(), "Charlotte");
    }

    #[test]
    fn test_display_empty_address() {
        assert_eq!(Address::default().to_string(), "");
    }
}
