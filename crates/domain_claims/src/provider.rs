//! Billing providers

use serde::{Deserialize, Serialize};

use core_kernel::ProviderId;

/// A billing provider from the provider reference file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// National Provider Identifier
    pub npi: ProviderId,
    /// Display name
    pub name: String,
    /// Specialty / provider type
    pub specialty: String,
}

impl ProviderRecord {
    pub fn new(npi: ProviderId, name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            npi,
            name: name.into(),
            specialty: specialty.into(),
        }
    }
}

/// Builds a display name from NPPES name parts.
///
/// Individuals carry a first name and a last name; organizations only the
/// organization name in the last/org column.
pub fn display_name(first: Option<&str>, last_or_org: Option<&str>, npi: &ProviderId) -> String {
    let first = first.map(str::trim).filter(|s| !s.is_empty());
    let last = last_or_org.map(str::trim).filter(|s| !s.is_empty());

    match (first, last) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (None, Some(last)) => last.to_string(),
        (Some(first), None) => first.to_string(),
        (None, None) => format!("NPI {}", npi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_variants() {
        let npi = ProviderId::new("1003000126");
        assert_eq!(display_name(Some("Ardalan"), Some("Enkeshafi"), &npi), "Ardalan Enkeshafi");
        assert_eq!(display_name(Some(" "), Some("Metro General Hospital"), &npi), "Metro General Hospital");
        assert_eq!(display_name(None, None, &npi), "NPI 1003000126");
    }
}
