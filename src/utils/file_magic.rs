/// 根据文件头识别图片类型，返回对应的 MIME
///
/// 支持 PNG、JPEG、GIF、WEBP、BMP、ICO，其余返回 `None`。
pub fn detect_image_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else if data.starts_with(b"BM") {
        Some("image/bmp")
    } else if data.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        Some("image/x-icon")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(detect_image_mime(&png_header), Some("image/png"));
    }

    #[test]
    fn test_jpeg_magic() {
        assert_eq!(
            detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_webp_magic() {
        let mut webp = b"RIFF".to_vec();
        webp.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        webp.extend_from_slice(b"WEBPVP8 ");
        assert_eq!(detect_image_mime(&webp), Some("image/webp"));
        assert_eq!(detect_image_mime(b"RIFF\0\0\0\0WAVE"), None);
    }

    #[test]
    fn test_non_image_rejected() {
        assert_eq!(detect_image_mime(b"%PDF-1.7"), None);
        assert_eq!(detect_image_mime(&[]), None);
        assert_eq!(detect_image_mime(b"<svg xmlns="), None);
    }
}
