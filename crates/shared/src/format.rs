/// Currency-free amount label: whole values print bare (`40`), fractional
/// ones with at most two decimals and no trailing zeros (`12.5`).
pub fn format_amount(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 {
        return format!("{amount:.0}");
    }
    let fixed = format!("{amount:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
