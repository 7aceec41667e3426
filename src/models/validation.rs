use crate::error::StoreError;

/// Display name validation
pub fn validate_name(name: &str, min_len: usize, field: &str) -> Result<(), StoreError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(StoreError::validation(format!("{} cannot be empty", field)));
    }

    if len < min_len {
        return Err(StoreError::validation(format!(
            "{} must be at least {} characters",
            field, min_len
        )));
    }

    Ok(())
}

/// Email validation
pub fn validate_email(email: &str) -> Result<(), StoreError> {
    if email.is_empty() {
        return Err(StoreError::validation("Email cannot be empty"));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid || email.contains(char::is_whitespace) {
        return Err(StoreError::validation("Invalid email address"));
    }

    if email.len() > 255 {
        return Err(StoreError::validation("Email cannot be longer than 255 characters"));
    }

    Ok(())
}

/// Password validation
pub fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.chars().count() < 6 {
        return Err(StoreError::validation("Password must be at least 6 characters"));
    }

    Ok(())
}
