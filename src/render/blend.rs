use crate::foundation::core::{RGBA_CHANNELS, Raster};
use crate::foundation::math::{mul_div255_u8, mul_div255_u16};

/// Source-over of a premultiplied RGBA8 layer onto a straight-alpha raster.
///
/// `layer` is `layer_w * layer_h` pixels placed with its top-left at `(x0, y0)`. Parts of the layer
/// that fall outside the raster are ignored. Fully transparent layer pixels leave the raster bytes
/// untouched.
pub(crate) fn layer_over_straight(
    dst: &mut Raster,
    layer: &[u8],
    layer_w: u32,
    layer_h: u32,
    x0: u32,
    y0: u32,
) {
    debug_assert_eq!(
        layer.len(),
        (layer_w as usize) * (layer_h as usize) * RGBA_CHANNELS
    );
    let (dst_w, dst_h) = dst.dimensions();
    if x0 >= dst_w || y0 >= dst_h {
        return;
    }
    let cols = layer_w.min(dst_w - x0) as usize;
    let rows = layer_h.min(dst_h - y0) as usize;
    let dst_stride = dst_w as usize * RGBA_CHANNELS;
    let src_stride = layer_w as usize * RGBA_CHANNELS;
    let data = dst.data_mut();

    for row in 0..rows {
        let d_start = (y0 as usize + row) * dst_stride + x0 as usize * RGBA_CHANNELS;
        let s_start = row * src_stride;
        let d_row = &mut data[d_start..d_start + cols * RGBA_CHANNELS];
        let s_row = &layer[s_start..s_start + cols * RGBA_CHANNELS];
        for (d, s) in d_row
            .chunks_exact_mut(RGBA_CHANNELS)
            .zip(s_row.chunks_exact(RGBA_CHANNELS))
        {
            let out = premul_over_straight_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

fn premul_over_straight_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - sa;
    let da = u16::from(dst[3]);
    let out_a = sa + mul_div255_u16(da, inv);
    if out_a == 0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    out[3] = out_a.min(255) as u8;
    for c in 0..3 {
        let dc_premul = mul_div255_u8(u16::from(dst[c]), da);
        let premul = u16::from(src[c]) + mul_div255_u16(u16::from(dc_premul), inv);
        out[c] = ((u32::from(premul) * 255 + u32::from(out_a) / 2) / u32::from(out_a)).min(255)
            as u8;
    }
    out
}
