//! Human-readable error descriptions and structured JSON error formatting.

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use pond_core::error::{DecodeError, MonitorError, ValidationError};

    // Typed matches first
    if let Some(ve) = err.downcast_ref::<ValidationError>() {
        return humanize_validation(ve);
    }

    if let Some(me) = err.downcast_ref::<MonitorError>() {
        return match me {
            MonitorError::Validation(ve) => humanize_validation(ve),
            MonitorError::Decode(de) => humanize_decode(de),
            MonitorError::Transport(msg) => format!(
                "What happened: The settings push to the pond device failed ({msg}).\nLikely causes: Device offline, wrong device.endpoint, or a network outage.\nHow to fix: Check the device power and the [device] endpoint in the config. Your settings are saved and will be included in the next push."
            ),
            MonitorError::Source(msg) => format!(
                "What happened: The reading source reported an error ({msg}).\nLikely causes: The sheet has no data rows yet, or the script deployment changed.\nHow to fix: Verify the device is logging readings and that source.endpoint points at the current deployment."
            ),
        };
    }

    if let Some(de) = err.downcast_ref::<DecodeError>() {
        return humanize_decode(de);
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("endpoint must") || lower.contains("base_url must") {
        return "What happened: Configuration is invalid or incomplete.\nLikely causes: A [device], [source] or [miniapp] URL is missing or not http(s).\nHow to fix: Edit the TOML config and try again.".to_string();
    }

    if lower.starts_with("limits.") || lower.contains("limits.") {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range or inverted values under [limits].\nHow to fix: Edit the config file, then rerun. See README for a sample."
        );
    }

    if lower.contains("not authorized") {
        return format!(
            "{msg}\nLikely causes: The user id is not listed under access.allowed_users.\nHow to fix: Add the id to the allow-list in the config. An empty list denies everyone."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

fn humanize_validation(ve: &pond_core::error::ValidationError) -> String {
    use pond_core::error::ValidationError::*;
    match ve {
        InvertedRange { lower, upper } => format!(
            "What happened: The minimum ({lower}) is not below the maximum ({upper}): minimum must be less than maximum.\nLikely causes: Swapped arguments.\nHow to fix: Pass --min below --max, e.g. `pond set-temp --min 25 --max 30`."
        ),
        OutOfDomain { metric, min, max } => format!(
            "What happened: {metric} bounds must lie within {min} to {max}.\nLikely causes: A typo, or domain limits tightened in the config.\nHow to fix: Choose bounds inside the domain, or widen [limits] in the config."
        ),
        NonFinite => "What happened: A bound was not a finite number.\nLikely causes: NaN or infinity slipped into the input.\nHow to fix: Pass plain decimal numbers for --min and --max.".to_string(),
        TooNarrow { min_separation } => format!(
            "What happened: The bounds are closer than the minimum separation ({min_separation}).\nLikely causes: Bounds chosen too close together.\nHow to fix: Spread the bounds at least {min_separation} apart."
        ),
    }
}

fn humanize_decode(de: &pond_core::error::DecodeError) -> String {
    use pond_core::error::DecodeError::*;
    match de {
        InvalidBase64 | InvalidJson => "What happened: A settings token or message could not be decoded.\nLikely causes: Truncated deep link or an outdated dashboard build.\nHow to fix: Request a fresh link with `pond settings`; defaults are used until then.".to_string(),
        UnknownAction(a) => format!(
            "What happened: The dashboard sent an unsupported action ({a}).\nLikely causes: Dashboard and service versions are out of sync.\nHow to fix: Update both sides to matching versions."
        ),
    }
}

/// Stable exit codes per error family; unknown errors return 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    use pond_core::error::{DecodeError, MonitorError, ValidationError};

    if err.downcast_ref::<ValidationError>().is_some() {
        return 2;
    }
    if let Some(me) = err.downcast_ref::<MonitorError>() {
        return match me {
            MonitorError::Validation(_) => 2,
            MonitorError::Decode(_) => 3,
            MonitorError::Transport(_) => 4,
            MonitorError::Source(_) => 5,
        };
    }
    if err.downcast_ref::<DecodeError>().is_some() {
        return 3;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use pond_core::error::{DecodeError, MonitorError, ValidationError};
    use serde_json::json;

    let reason = if err.downcast_ref::<ValidationError>().is_some() {
        "Validation"
    } else if let Some(me) = err.downcast_ref::<MonitorError>() {
        match me {
            MonitorError::Validation(_) => "Validation",
            MonitorError::Decode(_) => "Decode",
            MonitorError::Transport(_) => "Transport",
            MonitorError::Source(_) => "Source",
        }
    } else if err.downcast_ref::<DecodeError>().is_some() {
        "Decode"
    } else {
        "Error"
    };

    json!({ "reason": reason, "message": humanize(err) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pond_core::error::{DecodeError, ValidationError};

    #[test]
    fn decode_hint_names_the_settings_subcommand() {
        let err = eyre::Report::new(DecodeError::InvalidBase64);
        let msg = humanize(&err);
        assert!(msg.contains("pond settings"), "stale hint: {msg}");
        assert_eq!(exit_code_for_error(&err), 3);
    }

    #[test]
    fn validation_errors_exit_with_code_two() {
        let err = eyre::Report::new(ValidationError::InvertedRange {
            lower: 35.0,
            upper: 20.0,
        });
        assert!(humanize(&err).contains("minimum must be less than maximum"));
        assert_eq!(exit_code_for_error(&err), 2);
    }
}
