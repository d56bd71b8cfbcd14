//! Custom template filters

use minijinja::value::Value;
use minijinja::{Error, ErrorKind, State};

/// Register all custom filters with a minijinja Environment
pub fn register_filters(env: &mut minijinja::Environment) {
    env.add_filter("timestamp", filter_timestamp);
}

/// Format an RFC 3339 timestamp using a strftime format string
///
/// Values that do not parse are passed through unchanged, since report
/// timestamps come from the analysis pipeline as free text.
///
/// Example: `{{ created_at | timestamp("%Y-%m-%d %H:%M") }}`
fn filter_timestamp(_state: &State, value: Value, format: Value) -> Result<Value, Error> {
    let format_str = format.as_str().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            "timestamp filter requires format string as argument",
        )
    })?;

    let Some(raw) = value.as_str() else {
        return Ok(value);
    };

    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(datetime) => Ok(Value::from(
            datetime
                .with_timezone(&chrono::Utc)
                .format(format_str)
                .to_string(),
        )),
        Err(_) => Ok(Value::from(raw)),
    }
}
