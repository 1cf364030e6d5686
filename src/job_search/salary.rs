// src/job_search/salary.rs
//! Display formatting for salary figures.

pub const SALARY_NOT_SPECIFIED: &str = "Salary not specified";

/// `£` amount rounded to whole units with thousands separators.
pub fn format_currency(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, digit) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0.0 && rounded != "0" {
        format!("-£{}", grouped)
    } else {
        format!("£{}", grouped)
    }
}

// Zero and non-finite bounds are treated as missing.
fn bound(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

pub fn format_salary_range(min: Option<f64>, max: Option<f64>) -> String {
    match (bound(min), bound(max)) {
        (Some(min), Some(max)) => {
            format!("{} - {}", format_currency(min), format_currency(max))
        }
        (Some(min), None) => format!("{}+", format_currency(min)),
        (None, Some(max)) => format!("Up to {}", format_currency(max)),
        (None, None) => SALARY_NOT_SPECIFIED.to_string(),
    }
}

/// Like [`format_salary_range`], flagging upstream-estimated figures.
pub fn format_salary(min: Option<f64>, max: Option<f64>, is_predicted: bool) -> String {
    let range = format_salary_range(min, max);
    if is_predicted && range != SALARY_NOT_SPECIFIED {
        format!("{} (estimated)", range)
    } else {
        range
    }
}
