use serde::{Deserialize, Serialize};

/// Orientation hint passed to a detector backend, following EXIF conventions.
///
/// Describes how the buffer must be rotated (and possibly flipped) to appear
/// upright. A portrait front camera delivers buffers that need
/// [`ImageOrientation::LeftMirrored`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOrientation {
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl std::fmt::Display for ImageOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ImageOrientation::Up => "up",
            ImageOrientation::UpMirrored => "up-mirrored",
            ImageOrientation::Down => "down",
            ImageOrientation::DownMirrored => "down-mirrored",
            ImageOrientation::LeftMirrored => "left-mirrored",
            ImageOrientation::Right => "right",
            ImageOrientation::RightMirrored => "right-mirrored",
            ImageOrientation::Left => "left",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ImageOrientation::Up, "up")]
    #[case(ImageOrientation::UpMirrored, "up-mirrored")]
    #[case(ImageOrientation::Left, "left")]
    fn test_display_names(#[case] orientation: ImageOrientation, #[case] name: &str) {
        assert_eq!(orientation.to_string(), name);
    }

    #[test]
    fn test_display() {
        assert_eq!(ImageOrientation::LeftMirrored.to_string(), "left-mirrored");
    }
}
