//! Field-level input validation shared by the resource handlers.
//!
//! Every failure is a [`CoreError::InvalidField`] naming the offending field.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::Money;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LENGTH: usize = 150;

/// Maximum length of a client's first or last name.
pub const MAX_PERSON_NAME_LENGTH: usize = 100;

/// Maximum length of a postal address.
pub const MAX_ADDRESS_LENGTH: usize = 255;

/// Maximum length of a phone number.
pub const MAX_PHONE_LENGTH: usize = 20;

/// Maximum length of a username.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Largest amount a `NUMERIC(10, 2)` money column can hold: 99_999_999.99.
pub const MAX_AMOUNT: Money = Money::from_parts(1_410_065_407, 2, 0, false, 2);

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Product price: zero is allowed, negatives are not.
pub fn validate_price(precio: Money) -> Result<(), CoreError> {
    if precio < Money::ZERO {
        return Err(CoreError::invalid_field(
            "precio",
            "Price must not be negative",
        ));
    }
    validate_amount_range("precio", precio)
}

/// Product stock: zero is allowed, negatives are not.
pub fn validate_stock(stock: i32) -> Result<(), CoreError> {
    if stock < 0 {
        return Err(CoreError::invalid_field(
            "stock",
            "Stock must not be negative",
        ));
    }
    Ok(())
}

/// Line and return quantities must be at least one unit.
pub fn validate_quantity(cantidad: i32) -> Result<(), CoreError> {
    if cantidad < 1 {
        return Err(CoreError::invalid_field(
            "cantidad",
            "Quantity must be at least 1",
        ));
    }
    Ok(())
}

/// Unit price on an order line.
pub fn validate_unit_price(precio_unitario: Money) -> Result<(), CoreError> {
    if precio_unitario < Money::ZERO {
        return Err(CoreError::invalid_field(
            "precio_unitario",
            "Unit price must not be negative",
        ));
    }
    validate_amount_range("precio_unitario", precio_unitario)
}

/// Reject amounts the money columns cannot store.
fn validate_amount_range(field: &'static str, amount: Money) -> Result<(), CoreError> {
    if amount > MAX_AMOUNT {
        return Err(CoreError::invalid_field(
            field,
            format!("Must be at most {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

/// `cantidad * precio_unitario`, rejected when it does not fit a money column.
pub fn line_subtotal(cantidad: i32, precio_unitario: Money) -> Result<Money, CoreError> {
    precio_unitario
        .checked_mul(Money::from(cantidad))
        .filter(|subtotal| *subtotal <= MAX_AMOUNT)
        .ok_or_else(|| {
            CoreError::invalid_field(
                "precio_unitario",
                format!("Line subtotal must be at most {MAX_AMOUNT}"),
            )
        })
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::invalid_field(
            "email",
            format!("'{email}' is not a valid email address"),
        ));
    }
    Ok(())
}

/// Require a non-blank value no longer than `max_len` characters.
pub fn validate_required_text(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid_field(field, "This field may not be blank"));
    }
    validate_max_length(field, value, max_len)
}

/// Reject values longer than `max_len` characters.
pub fn validate_max_length(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), CoreError> {
    if value.chars().count() > max_len {
        return Err(CoreError::invalid_field(
            field,
            format!("Must be at most {max_len} characters"),
        ));
    }
    Ok(())
}

/// Registration requires the password to be typed twice.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password != confirmation {
        return Err(CoreError::invalid_field(
            "password",
            "Passwords do not match",
        ));
    }
    Ok(())
}
