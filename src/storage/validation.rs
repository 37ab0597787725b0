//! Checks applied to records before they enter a snapshot.
//!
//! The indexes assume every record is well formed; this is where that is
//! enforced.

use std::path::{Path, PathBuf};

use crate::RequestRecord;

/// Maximum length of a location, in characters.
pub const MAX_LOCATION_LEN: usize = 120;

/// Maximum length of a description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Attachment file extensions accepted with a report.
pub const ATTACHMENT_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "pdf"];

/// Reasons a record is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidRecord {
    /// The identifier is blank.
    #[error("identifier is blank")]
    BlankId,
    /// Another record already uses this identifier.
    #[error("identifier {0} is already in use")]
    DuplicateId(String),
    /// The location is blank.
    #[error("location is blank")]
    BlankLocation,
    /// The location is too long.
    #[error("location is {0} characters long (maximum {max})", max = MAX_LOCATION_LEN)]
    LocationTooLong(usize),
    /// The description is blank.
    #[error("description is blank")]
    BlankDescription,
    /// The description is too long.
    #[error("description is {0} characters long (maximum {max})", max = MAX_DESCRIPTION_LEN)]
    DescriptionTooLong(usize),
    /// The attachment is not an image or PDF.
    #[error("attachment {} is not a PNG, JPG, GIF or PDF file", .0.display())]
    UnsupportedAttachment(PathBuf),
}

/// Validates a single record in isolation.
///
/// # Errors
///
/// Returns the first [`InvalidRecord`] reason found.
pub fn validate(record: &RequestRecord) -> Result<(), InvalidRecord> {
    if record.id().trim().is_empty() {
        return Err(InvalidRecord::BlankId);
    }

    let location = record.location().trim();
    if location.is_empty() {
        return Err(InvalidRecord::BlankLocation);
    }
    let len = location.chars().count();
    if len > MAX_LOCATION_LEN {
        return Err(InvalidRecord::LocationTooLong(len));
    }

    let description = record.description().trim();
    if description.is_empty() {
        return Err(InvalidRecord::BlankDescription);
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(InvalidRecord::DescriptionTooLong(len));
    }

    if let Some(attachment) = record.attachment() {
        if !is_supported_attachment(attachment) {
            return Err(InvalidRecord::UnsupportedAttachment(attachment.to_path_buf()));
        }
    }

    Ok(())
}

fn is_supported_attachment(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ATTACHMENT_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{Category, Priority};

    fn record(location: &str, description: &str) -> RequestRecord {
        RequestRecord::new_with_id(
            "a1b2c3d4e5f6",
            location,
            Category::Roads,
            Priority::MOST_URGENT,
            description,
        )
    }

    #[test]
    fn accepts_well_formed_record() {
        assert_eq!(validate(&record("Main Road", "Pothole")), Ok(()));
    }

    #[test]
    fn rejects_blank_id() {
        let record =
            RequestRecord::new_with_id("  ", "Main Road", Category::Roads, Priority::MOST_URGENT, "x");
        assert_eq!(validate(&record), Err(InvalidRecord::BlankId));
    }

    #[test]
    fn rejects_blank_location() {
        assert_eq!(
            validate(&record("   ", "Pothole")),
            Err(InvalidRecord::BlankLocation)
        );
    }

    #[test]
    fn rejects_long_location() {
        let location = "x".repeat(MAX_LOCATION_LEN + 1);
        assert_eq!(
            validate(&record(&location, "Pothole")),
            Err(InvalidRecord::LocationTooLong(MAX_LOCATION_LEN + 1))
        );
    }

    #[test]
    fn rejects_blank_description() {
        assert_eq!(
            validate(&record("Main Road", "")),
            Err(InvalidRecord::BlankDescription)
        );
    }

    #[test]
    fn rejects_long_description() {
        let description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(
            validate(&record("Main Road", &description)),
            Err(InvalidRecord::DescriptionTooLong(MAX_DESCRIPTION_LEN + 1))
        );
    }

    #[test_case("uploads/photo.png", true; "png")]
    #[test_case("uploads/photo.JPEG", true; "upper case jpeg")]
    #[test_case("uploads/scan.pdf", true; "pdf")]
    #[test_case("uploads/script.exe", false; "executable")]
    #[test_case("uploads/noextension", false; "no extension")]
    fn attachment_extensions(path: &str, accepted: bool) {
        let record = record("Main Road", "Pothole").with_attachment(path);
        assert_eq!(validate(&record).is_ok(), accepted);
    }
}
