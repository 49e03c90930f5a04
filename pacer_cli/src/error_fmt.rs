//! Human-readable error descriptions and structured JSON error formatting.

use pacer_core::PacerError;

/// Exit code for semantic configuration errors (clap itself exits 2 on bad flags).
pub const EXIT_CONFIG: i32 = 1;
/// Exit code when a pacer cannot be constructed from an otherwise valid config.
pub const EXIT_PACER: i32 = 3;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(pe) = find_pacer_error(err) {
        return match pe {
            PacerError::InvalidRate(rate) => format!(
                "What happened: The pacer rejected rate {rate}.\nLikely causes: --rate (or pacing.rate) is zero, negative, or not a number.\nHow to fix: Pass a positive rate, e.g. `--rate 1000`."
            ),
            PacerError::RoundsToZero { configured, .. } => format!(
                "What happened: Rate {configured} rounds to 0 calls/sec for the baseline pacer.\nLikely causes: The baseline pacer only runs at whole-number rates.\nHow to fix: Use a rate of at least 0.5, or drop --baseline to use the simple pacer."
            ),
            PacerError::TooLarge(rate) => format!(
                "What happened: Rate {rate} is too large for the baseline pacer.\nLikely causes: The baseline pacer stores its rate as a 32-bit integer.\nHow to fix: Lower --rate, or drop --baseline."
            ),
        };
    }

    // String-based heuristics for errors coming from config loading and validation
    let msg = format!("{err:#}");
    let lower = msg.to_ascii_lowercase();

    if lower.contains("pacing.rate") {
        return format!(
            "What happened: Invalid rate ({msg}).\nLikely causes: --rate or pacing.rate is zero, negative, or not finite.\nHow to fix: Pass a positive rate, e.g. `--rate 1000`."
        );
    }

    if lower.contains("pacing.duration") {
        return format!(
            "What happened: Invalid duration ({msg}).\nLikely causes: The run would last longer than 24h.\nHow to fix: Shorten --duration, or use --exactly to run a fixed count."
        );
    }

    if lower.contains("read config") {
        return format!(
            "What happened: Could not read the config file ({msg}).\nLikely causes: Wrong --config path or missing permissions.\nHow to fix: Check the path, or omit --config to use defaults."
        );
    }

    if lower.contains("parse config") {
        return format!(
            "What happened: The config file is not valid TOML for this tool ({msg}).\nLikely causes: Typo in a key, a duration without a unit, or an unknown rotation policy.\nHow to fix: Edit the file; durations look like \"500ms\" and rotation is never|daily|hourly."
        );
    }

    if lower.contains("logging.") || lower.contains("log level") {
        return format!(
            "What happened: Invalid logging configuration ({msg}).\nLikely causes: Unknown level or an empty log file path.\nHow to fix: Use one of error|warn|info|debug|trace and a writable file path."
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

fn find_pacer_error(err: &eyre::Report) -> Option<&PacerError> {
    err.chain().find_map(|e| e.downcast_ref::<PacerError>())
}

/// Pacer construction errors get their own exit code; everything else is a config error.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if find_pacer_error(err).is_some() {
        return EXIT_PACER;
    }
    EXIT_CONFIG
}

pub fn reason_name(err: &eyre::Report) -> &'static str {
    match find_pacer_error(err) {
        Some(PacerError::InvalidRate(_)) => "InvalidRate",
        Some(PacerError::RoundsToZero { .. }) => "RoundsToZero",
        Some(PacerError::TooLarge(_)) => "TooLarge",
        None => "Config",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;
    json!({ "reason": reason_name(err), "message": humanize(err) }).to_string()
}
