use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlyphfxError::invalid_color("x")
            .to_string()
            .contains("invalid color:")
    );
    assert!(
        GlyphfxError::path_not_found("x")
            .to_string()
            .contains("path not found:")
    );
    assert!(
        GlyphfxError::scene_not_found("x")
            .to_string()
            .contains("scene not found:")
    );
    assert!(
        GlyphfxError::invalid_duration("x")
            .to_string()
            .contains("invalid duration:")
    );
    assert!(
        GlyphfxError::invalid_speed("x")
            .to_string()
            .contains("invalid speed:")
    );
    assert!(
        GlyphfxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GlyphfxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlyphfxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
    let err = GlyphfxError::from(json_err);
    assert!(matches!(err, GlyphfxError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error:"));
}
