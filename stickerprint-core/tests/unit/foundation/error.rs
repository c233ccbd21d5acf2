use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PrintError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PrintError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(PrintError::render("x").to_string().contains("render error:"));
    assert!(
        PrintError::from(UploadRejection::CodeNotFound)
            .to_string()
            .contains("upload rejected:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PrintError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_missing_code_requires_acknowledgment() {
    assert!(UploadRejection::InvalidInputType.auto_dismiss());
    assert!(UploadRejection::decode_failure("corrupt").auto_dismiss());
    assert!(!UploadRejection::CodeNotFound.auto_dismiss());
}

#[test]
fn rejection_messages_are_distinct() {
    let msgs = [
        UploadRejection::InvalidInputType.user_message(),
        UploadRejection::CodeNotFound.user_message(),
        UploadRejection::decode_failure("x").user_message(),
    ];
    assert_ne!(msgs[0], msgs[1]);
    assert_ne!(msgs[1], msgs[2]);
    assert_ne!(msgs[0], msgs[2]);
}
