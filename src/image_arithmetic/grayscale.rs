use super::{GrayImage, LUMA_WEIGHTS};
use crate::error::{Error, Result};

/// Luma of one RGB triple, rounded half up.
#[inline(always)]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    // The weights sum to one, so this never exceeds 255.5 before truncation.
    return (wr * r as f32 + wg * g as f32 + wb * b as f32 + 0.5) as u8;
}

/// Reduces an interleaved 1, 3 or 4 channel buffer to a single luma channel.
///
/// Alpha is ignored. Single-channel input is copied as is.
pub fn luma_from_interleaved(
    data: &[u8], width: u32, height: u32, channels: u8,
) -> Result<GrayImage> {
    if !matches!(channels, 1 | 3 | 4) {
        return Err(Error::InvalidChannelCount(channels));
    }
    let expected = width as usize * height as usize * channels as usize;
    if data.len() != expected {
        return Err(Error::SizeMismatch { expected, actual: data.len() });
    }

    let gray = if channels == 1 {
        data.to_vec()
    } else {
        data.chunks_exact(channels as usize).map(|px| luma(px[0], px[1], px[2])).collect()
    };
    return GrayImage::from_raw(width, height, gray)
        .ok_or(Error::SizeMismatch { expected, actual: data.len() });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_channel_is_identity() {
        let data: Vec<u8> = (0..12).map(|i| i * 20).collect();
        let gray = luma_from_interleaved(&data, 4, 3, 1).unwrap();
        assert_eq!(gray.as_raw(), &data);
        let again = luma_from_interleaved(gray.as_raw(), 4, 3, 1).unwrap();
        assert_eq!(again, gray);
    }

    #[test]
    fn rgb_uses_perceptual_weights() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 0, 0, 0, 10, 20, 30];
        let gray = luma_from_interleaved(&data, 3, 2, 3).unwrap();
        // 76.245, 149.685, 29.07, 255, 0, 18.15 (all + 0.5, truncated)
        assert_eq!(gray.as_raw(), &vec![76, 150, 29, 255, 0, 18]);
    }

    #[test]
    fn rgba_ignores_alpha() {
        let rgba = [255, 0, 0, 0, 10, 20, 30, 255];
        let rgb = [255, 0, 0, 10, 20, 30];
        let a = luma_from_interleaved(&rgba, 2, 1, 4).unwrap();
        let b = luma_from_interleaved(&rgb, 2, 1, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_unsupported_channel_counts() {
        for channels in [0, 2, 5] {
            let data = vec![0; 4 * channels as usize];
            assert!(matches!(
                luma_from_interleaved(&data, 2, 2, channels),
                Err(Error::InvalidChannelCount(c)) if c == channels
            ));
        }
    }

    #[test]
    fn rejects_short_buffers() {
        assert!(matches!(
            luma_from_interleaved(&[0; 5], 2, 1, 3),
            Err(Error::SizeMismatch { expected: 6, actual: 5 })
        ));
    }
}
