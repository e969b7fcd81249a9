//! Gamma lookup tables.

/// A 256-entry byte-to-byte lookup table.
pub type GammaLut = [u8; 256];

/// Build the gamma-correction LUT for `gamma`.
///
/// `lut[i] = round(255 * (i / 255)^(1 / gamma))`, clamped to `[0, 255]`.
/// A gamma of exactly 1.0 yields the identity table without touching `powf`.
pub fn build_gamma_lut(gamma: f32) -> GammaLut {
    let mut lut = [0u8; 256];
    if gamma == 1.0 {
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = i as u8;
        }
        return lut;
    }

    let inv = 1.0 / gamma;
    for (i, slot) in lut.iter_mut().enumerate() {
        let normalized = i as f32 / 255.0;
        let corrected = normalized.powf(inv);
        let val = (corrected * 255.0 + 0.5) as i32;
        *slot = val.clamp(0, 255) as u8;
    }
    lut
}
