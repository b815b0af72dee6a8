/// Linear interpolation that returns `start` at `t == 0` and `end` at `t == 1` bit-exactly.
pub(crate) fn lerp_exact(start: f64, end: f64, t: f64) -> f64 {
    if t == 1.0 {
        return end;
    }
    (1.0 - t) * start + t * end
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Composite premultiplied `src` over premultiplied `dst` in place. Both are tightly packed RGBA8.
pub(crate) fn src_over_premul_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        for c in 0..4 {
            let v = u16::from(s[c]) + mul_div255_u16(u16::from(d[c]), inv);
            d[c] = v.min(255) as u8;
        }
    }
}

/// Convert premultiplied RGBA8 back to straight alpha for encoders that expect it.
pub(crate) fn unpremultiply_rgba8(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in px.iter_mut().take(3) {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
