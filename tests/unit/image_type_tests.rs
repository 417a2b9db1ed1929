// Image type registry tests

use imgpath::ImageType;

#[test]
fn test_mime_non_empty_for_every_type() {
    for t in ImageType::ALL {
        assert!(!t.mime().is_empty());
        assert_ne!(t.mime(), "application/octet-stream", "{:?}", t);
    }
    assert_eq!(ImageType::Unknown.mime(), "application/octet-stream");
}

#[test]
fn test_content_disposition_uses_target_extension() {
    assert_eq!(
        ImageType::Png.content_disposition_from_url("http://x/dir/pic.JPG"),
        "inline; filename=\"pic.png\""
    );
    assert_eq!(
        ImageType::Jpeg.content_disposition_from_url("http://x/dir/pic.png"),
        "inline; filename=\"pic.jpg\""
    );
}

#[test]
fn test_capabilities() {
    assert!(!ImageType::Jpeg.supports_alpha());
    assert!(ImageType::Png.supports_alpha());
    assert!(ImageType::WebP.supports_animation());
    assert!(!ImageType::Jpeg.supports_animation());
}

#[test]
fn test_alpha_false_only_for_jpeg_and_bmp() {
    let without_alpha: Vec<ImageType> = ImageType::ALL
        .into_iter()
        .filter(|t| !t.supports_alpha())
        .collect();
    assert_eq!(without_alpha, vec![ImageType::Jpeg, ImageType::Bmp]);
}

#[test]
fn test_animation_true_only_for_gif_and_webp() {
    let animated: Vec<ImageType> = ImageType::ALL
        .into_iter()
        .filter(|t| t.supports_animation())
        .collect();
    assert_eq!(animated, vec![ImageType::WebP, ImageType::Gif]);
}

#[test]
fn test_canonical_alias_is_deterministic() {
    for _ in 0..100 {
        assert_eq!(ImageType::Jpeg.as_str(), "jpeg");
    }
}

#[test]
fn test_decoded_format_hint_resolves_to_type() {
    let decoded = imgpath::decode_url(&["plain", "cat.png@jpg"], "").unwrap();
    assert_eq!(decoded.format_type(), ImageType::Jpeg);
    assert_eq!(decoded.format_type().mime(), "image/jpeg");
}
