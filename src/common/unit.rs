//! Unit conversion utilities.
//!
//! Word measures page geometry in twips (1/20 pt), borders in eighths of a
//! point and drawings in EMUs. Markup measures everything in CSS pixels.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;
pub const EMUS_PER_TWIP: i64 = 635;
pub const TWIPS_PER_INCH: u32 = 1_440;

/// Twips per CSS pixel used for cell padding and fixed table widths.
///
/// Word renders a 96 dpi pixel as 15 twips; the legacy mapping rounds up a
/// little to compensate for the border gutter.
pub const TWIPS_PER_PX: f64 = 15.57;

#[inline]
pub fn px_to_emu(px: u32, dpi: u32) -> i64 {
    ((px as f64) * EMUS_PER_INCH as f64 / dpi as f64) as i64
}

#[inline]
pub fn px_to_emu_96(px: u32) -> i64 {
    px_to_emu(px, 96)
}

#[inline]
pub fn emu_to_px(emu: i64, dpi: u32) -> u32 {
    ((emu as f64) * dpi as f64 / EMUS_PER_INCH as f64) as u32
}

#[inline]
pub fn px_to_twips(px: f64) -> u32 {
    (px * TWIPS_PER_PX).round().max(0.0) as u32
}

#[inline]
pub fn twip_to_emu(twips: i64) -> i64 {
    twips.saturating_mul(EMUS_PER_TWIP)
}

/// Share of `whole` covered by `percent` (0..=100, clamped).
#[inline]
pub fn percent_of(whole: u32, percent: f64) -> u32 {
    let pct = percent.clamp(0.0, 100.0);
    ((whole as f64) * pct / 100.0).round() as u32
}

/// Fiftieths of a percent, the unit of `w:type="pct"` widths.
#[inline]
pub fn percent_to_fiftieths(percent: f64) -> u32 {
    (percent.clamp(0.0, 100.0) * 50.0).round() as u32
}
