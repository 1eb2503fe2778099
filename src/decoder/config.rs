use std::sync::OnceLock;

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static QR_THRESHOLD_SPREAD: OnceLock<u8> = OnceLock::new();

/// Offset around the Otsu threshold tried by the thorough QR scan
pub(crate) fn qr_threshold_spread() -> u8 {
    *QR_THRESHOLD_SPREAD.get_or_init(|| parse_env_u8("HUB_QR_THRESHOLD_SPREAD", 24).clamp(4, 96))
}

static QR_DIMENSION_SLACK: OnceLock<usize> = OnceLock::new();

/// Versions tried on either side of the estimated one by the thorough QR scan
pub(crate) fn qr_dimension_slack() -> usize {
    *QR_DIMENSION_SLACK.get_or_init(|| parse_env_usize("HUB_QR_DIMENSION_SLACK", 1).min(4))
}

static PDF417_MAX_ERASED_PERCENT: OnceLock<usize> = OnceLock::new();

/// Largest share of erased payload bytes a reconstruction may start from
pub(crate) fn pdf417_max_erased_percent() -> usize {
    *PDF417_MAX_ERASED_PERCENT
        .get_or_init(|| parse_env_usize("HUB_PDF417_MAX_ERASED_PERCENT", 50).min(100))
}
