use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("configuration name cannot be empty")]
    EmptyName,
    #[error("configuration route cannot be empty")]
    EmptyRoute,
    #[error("route may only contain lowercase letters, digits and dashes: {0}")]
    InvalidRoute(String),
}

/// Validate the minimum required fields for creating a configuration.
pub fn validate_config_fields(name: &str, route: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if route.is_empty() {
        return Err(ValidationError::EmptyRoute);
    }
    if !route
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidRoute(route.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_route() {
        assert!(validate_config_fields("Homepage", "home").is_ok());
        assert!(validate_config_fields("Sale", "summer-sale-2026").is_ok());
    }

    #[test]
    fn rejects_empty_name_and_route() {
        assert!(matches!(
            validate_config_fields("  ", "home"),
            Err(ValidationError::EmptyName)
        ));
        assert!(matches!(
            validate_config_fields("Homepage", ""),
            Err(ValidationError::EmptyRoute)
        ));
    }

    #[test]
    fn rejects_route_with_invalid_characters() {
        assert!(matches!(
            validate_config_fields("Homepage", "Home Page"),
            Err(ValidationError::InvalidRoute(_))
        ));
    }
}
