use crate::utils::error::{EntitlementError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Product identifiers are reverse-DNS style: dot separated segments of
/// ASCII alphanumerics, `-` and `_`.
pub fn validate_product_id(field_name: &str, product_id: &str) -> Result<()> {
    if product_id.is_empty() {
        return Err(EntitlementError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: product_id.to_string(),
            reason: "Product identifier cannot be empty".to_string(),
        });
    }

    if product_id.split('.').any(|segment| segment.is_empty()) {
        return Err(EntitlementError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: product_id.to_string(),
            reason: "Product identifier contains an empty segment".to_string(),
        });
    }

    if let Some(bad) = product_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
    {
        return Err(EntitlementError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: product_id.to_string(),
            reason: format!("Unsupported character '{}'", bad),
        });
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EntitlementError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EntitlementError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(EntitlementError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Valid values: {}", allowed.join(", ")),
    })
}
