//! Turning host-page attributes into a validated field configuration.

use crate::constants::{DEFAULT_VARIANT, MAX_DEVICE_PIXEL_RATIO};
use field_core::{FieldConfig, Variant};

/// Pick the preset: the explicit argument wins over the page's `data-variant`.
/// Unknown names are logged and fall through to the next candidate.
pub fn resolve_variant(requested: Option<&str>, from_page: Option<&str>) -> Variant {
    for name in [requested, from_page].into_iter().flatten() {
        if name.trim().is_empty() {
            continue;
        }
        match name.parse::<Variant>() {
            Ok(v) => return v,
            Err(e) => log::warn!("{e}; ignoring"),
        }
    }
    DEFAULT_VARIANT.parse().unwrap_or(Variant::Ambient)
}

/// Preset config with the page's overrides applied one at a time.
///
/// A rejected override is skipped with a warning; if the combination fails
/// validation the untouched preset is used instead. `seed` is not a config
/// field and is returned separately.
pub fn build_config(variant: Variant, overrides: &[(String, String)]) -> (FieldConfig, Option<u64>) {
    let preset = variant.config();
    let mut config = preset.clone();
    let mut seed = None;
    for (key, value) in overrides {
        if key == "seed" {
            match value.trim().parse::<u64>() {
                Ok(s) => seed = Some(s),
                Err(_) => log::warn!("invalid seed {value:?}; using a random one"),
            }
            continue;
        }
        if let Err(e) = config.apply_override(key, value) {
            log::warn!("{}: {e}", variant.name());
        }
    }
    match config.validate() {
        Ok(()) => (config, seed),
        Err(e) => {
            log::warn!("{}: overrides rejected ({e}); using preset", variant.name());
            (preset, seed)
        }
    }
}

#[inline]
pub fn clamp_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Fold a float in `[0, 1)` (e.g. `Math.random()`) into a seed.
#[inline]
pub fn seed_from_unit(r: f64) -> u64 {
    let r = if r.is_finite() { r.clamp(0.0, 1.0) } else { 0.0 };
    (r * u32::MAX as f64) as u64
}
