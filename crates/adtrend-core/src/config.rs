use crate::app_config::{AppConfig, ImageBackend, PersonDetectorKind, ScoringPolicy};
use crate::ConfigError;

/// Largest meaningful Hamming distance between two 64-bit hashes.
pub const MAX_PHASH_THRESHOLD: u32 = 64;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("ADTREND_LOG_LEVEL", "info");
    let image_backend = parse_image_backend(&or_default("ADTREND_IMAGE_BACKEND", "decoder"))?;
    let person_detector =
        parse_person_detector(&or_default("ADTREND_PERSON_DETECTOR", "brightness"))?;
    let scoring_policy = parse_scoring_policy(&or_default("ADTREND_SCORING_POLICY", "trend"))?;

    let phash_threshold = parse_u32("ADTREND_PHASH_THRESHOLD", "5")?;
    if phash_threshold > MAX_PHASH_THRESHOLD {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADTREND_PHASH_THRESHOLD".to_string(),
            reason: format!("must be at most {MAX_PHASH_THRESHOLD}, got {phash_threshold}"),
        });
    }

    let ranking_output = PathBuf::from(or_default(
        "ADTREND_RANKING_OUTPUT",
        "./output/ranking.json",
    ));
    let history_path = lookup("ADTREND_HISTORY_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        image_backend,
        person_detector,
        phash_threshold,
        scoring_policy,
        ranking_output,
        history_path,
    })
}

fn parse_image_backend(s: &str) -> Result<ImageBackend, ConfigError> {
    match s {
        "decoder" => Ok(ImageBackend::Decoder),
        "sidecar" => Ok(ImageBackend::Sidecar),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADTREND_IMAGE_BACKEND".to_string(),
            reason: format!("unknown backend '{other}' (expected decoder or sidecar)"),
        }),
    }
}

fn parse_person_detector(s: &str) -> Result<PersonDetectorKind, ConfigError> {
    match s {
        "none" => Ok(PersonDetectorKind::None),
        "brightness" => Ok(PersonDetectorKind::Brightness),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADTREND_PERSON_DETECTOR".to_string(),
            reason: format!("unknown detector '{other}' (expected none or brightness)"),
        }),
    }
}

/// Parse a scoring policy name as accepted by config and CLI flags.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for names other than `trend` and `weighted`.
pub fn parse_scoring_policy(s: &str) -> Result<ScoringPolicy, ConfigError> {
    match s {
        "trend" => Ok(ScoringPolicy::Trend),
        "weighted" => Ok(ScoringPolicy::Weighted),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADTREND_SCORING_POLICY".to_string(),
            reason: format!("unknown policy '{other}' (expected trend or weighted)"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
