pub(super) const MIN_COUNTDOWN_INTERVAL_MS: u64 = 50;

pub(super) fn default_phase_seconds() -> u64 {
    30
}

pub(super) fn default_countdown_interval_ms() -> u64 {
    1_000
}

pub(super) fn default_low_confidence_threshold() -> f64 {
    0.6
}

pub(super) fn default_informative_features() -> usize {
    10
}

pub(super) fn clamp_threshold(value: f64) -> f64 {
    if value.is_nan() {
        return default_low_confidence_threshold();
    }
    value.clamp(0.0, 1.0)
}
