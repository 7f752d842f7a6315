use rust_decimal::Decimal;

/// Currency code printed on documents and notifications
pub const CURRENCY_CODE: &str = "PKR";

/// Decimal places shown to people
pub const DISPLAY_SCALE: u32 = 2;

/// Decimal places of the stored money columns. Item amounts and subtotals
/// of entered figures never exceed it; derived tax and discount amounts are
/// rounded to it.
pub const STORED_SCALE: u32 = 8;

/// One hundred, the percentage base
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places accepted on entered figures (quantity, rate, payments)
pub const ENTRY_SCALE: u32 = 4;

/// Largest magnitude any stored money or quantity column holds: 14 integer
/// digits, 99_999_999_999_999.9999
pub const MAX_STORED: Decimal = Decimal::from_parts(0xA763_FFFF, 0x0DE0_B6B3, 0, false, 4);

/// Round a value to the display scale
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp(DISPLAY_SCALE)
}

/// Round a derived amount to the stored scale
pub fn round_stored(amount: Decimal) -> Decimal {
    amount.round_dp(STORED_SCALE)
}

/// Format an amount for display, e.g. `PKR 1181.25`
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{} {:.width$}",
        CURRENCY_CODE,
        round_display(amount),
        width = DISPLAY_SCALE as usize
    )
}

/// Reject negative values for a named field
pub fn ensure_non_negative(field: &str, value: Decimal) -> Result<(), String> {
    if value < Decimal::ZERO {
        return Err(format!("{} must be non-negative, got: {}", field, value));
    }
    Ok(())
}

/// Reject percentages outside 0..=100 for a named field
pub fn ensure_percentage(field: &str, value: Decimal) -> Result<(), String> {
    if value < Decimal::ZERO || value > HUNDRED {
        return Err(format!(
            "{} must be between 0 and 100, got: {}",
            field, value
        ));
    }
    Ok(())
}

/// Reject entered figures with more than `ENTRY_SCALE` decimal places.
/// Trailing zeros do not count.
pub fn ensure_entry_scale(field: &str, value: Decimal) -> Result<(), String> {
    if value.normalize().scale() > ENTRY_SCALE {
        return Err(format!(
            "{} cannot have more than {} decimal places, got: {}",
            field, ENTRY_SCALE, value
        ));
    }
    Ok(())
}

/// Reject figures outside the storable range
pub fn ensure_in_range(field: &str, value: Decimal) -> Result<(), String> {
    if value.abs() > MAX_STORED {
        return Err(format!(
            "{} cannot exceed {}, got: {}",
            field, MAX_STORED, value
        ));
    }
    Ok(())
}

/// Entered figure checks: non-negative, in range, at most `ENTRY_SCALE` places
pub fn ensure_entry(field: &str, value: Decimal) -> Result<(), String> {
    ensure_non_negative(field, value)?;
    ensure_in_range(field, value)?;
    ensure_entry_scale(field, value)
}

/// Result of a `checked_*` operation, with overflow reported against a field
pub fn checked(field: &str, value: Option<Decimal>) -> Result<Decimal, String> {
    let value = value.ok_or_else(|| format!("{} is too large to compute", field))?;
    ensure_in_range(field, value)?;
    Ok(value)
}
