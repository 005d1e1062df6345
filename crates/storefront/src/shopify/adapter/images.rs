//! Image conversion and thumbhash placeholders.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::shopify::raw::RawImage;
use crate::shopify::types::Image;

/// Dimensions assumed when upstream omits them.
const DEFAULT_IMAGE_SIZE: u32 = 600;

/// Convert an upstream image, falling back to `fallback_alt` for missing alt
/// text.
#[must_use]
pub fn adapt_image(image: RawImage, fallback_alt: &str) -> Image {
    let alt_text = image
        .alt_text
        .filter(|alt| !alt.trim().is_empty())
        .unwrap_or_else(|| fallback_alt.to_string());

    Image {
        url: image.url,
        alt_text,
        width: image.width.unwrap_or(DEFAULT_IMAGE_SIZE),
        height: image.height.unwrap_or(DEFAULT_IMAGE_SIZE),
        thumbhash: image.thumbhash.as_deref().and_then(thumbhash_to_data_url),
    }
}

/// Render a base64 thumbhash as a `data:image/png;base64,...` URL.
///
/// Returns `None` for anything that does not decode to a valid hash.
#[must_use]
pub fn thumbhash_to_data_url(encoded: &str) -> Option<String> {
    let hash = BASE64.decode(encoded.trim()).ok()?;
    if hash.len() < required_hash_len(&hash)? {
        return None;
    }

    let (width, height, rgba) = thumbhash::thumb_hash_to_rgba(&hash).ok()?;
    let png = encode_png(
        u32::try_from(width).ok()?,
        u32::try_from(height).ok()?,
        &rgba,
    )
    .ok()?;

    Some(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

/// Byte length a hash must have for its header, so decoding never reads
/// past the end of a truncated hash.
fn required_hash_len(hash: &[u8]) -> Option<usize> {
    let header: [u8; 5] = hash.get(..5)?.try_into().ok()?;
    let [b0, b1, b2, b3, b4] = header;
    let header24 = u32::from(b0) | (u32::from(b1) << 8) | (u32::from(b2) << 16);
    let header16 = u16::from(b3) | (u16::from(b4) << 8);

    let has_alpha = (header24 >> 23) != 0;
    let is_landscape = (header16 >> 15) != 0;
    let short_side = usize::from(header16 & 7);
    let long_side = if has_alpha { 5 } else { 7 };
    let (lx, ly) = if is_landscape {
        (long_side, short_side)
    } else {
        (short_side, long_side)
    };

    let mut ac_count = ac_len(lx.max(3), ly.max(3)) + 2 * ac_len(3, 3);
    if has_alpha {
        ac_count += ac_len(5, 5);
    }

    let ac_start = if has_alpha { 6 } else { 5 };
    Some(ac_start + ac_count.div_ceil(2))
}

/// Number of AC coefficients stored for an `nx` by `ny` channel.
fn ac_len(nx: usize, ny: usize) -> usize {
    (0..ny)
        .map(|cy| {
            let start = usize::from(cy == 0);
            (start..).take_while(|cx| cx * ny < nx * (ny - cy)).count()
        })
        .sum()
}

fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, png::EncodingError> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;

    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const VALID_HASH: &str = "1QcSHQRnh493V4dIh4eXh1h4kJUI";

    #[test]
    fn test_thumbhash_to_data_url() {
        let url = thumbhash_to_data_url(VALID_HASH).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let png = BASE64
            .decode(url.trim_start_matches("data:image/png;base64,"))
            .unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_thumbhash_rejects_garbage() {
        assert!(thumbhash_to_data_url("not base64 !!").is_none());
        assert!(thumbhash_to_data_url("").is_none());
        // Valid base64, truncated hash.
        assert!(thumbhash_to_data_url(&VALID_HASH[..12]).is_none());
    }

    #[test]
    fn test_required_hash_len() {
        let hash = BASE64.decode(VALID_HASH).unwrap();
        assert_eq!(required_hash_len(&hash), Some(hash.len()));
        assert_eq!(required_hash_len(&hash[..3]), None);
    }

    #[test]
    fn test_adapt_image_defaults() {
        let image = adapt_image(
            RawImage {
                url: "https://cdn.example/tee.jpg".to_string(),
                alt_text: None,
                width: None,
                height: Some(400),
                thumbhash: Some("%%%".to_string()),
            },
            "Classic Tee",
        );

        assert_eq!(image.alt_text, "Classic Tee");
        assert_eq!(image.width, 600);
        assert_eq!(image.height, 400);
        assert!(image.thumbhash.is_none());
    }
}
