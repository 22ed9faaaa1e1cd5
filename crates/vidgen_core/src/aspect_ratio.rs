//! Frame aspect ratios accepted by the generator.

use serde::{Deserialize, Serialize};
use vidgen_error::{ValidationError, ValidationErrorKind};

/// Output frame shape.
///
/// Displays and parses as `W:H` text, which is also its serialized form.
///
/// # Examples
///
/// ```
/// use vidgen_core::AspectRatio;
///
/// let ratio: AspectRatio = "9:16".parse().unwrap();
/// assert_eq!(ratio, AspectRatio::Portrait);
/// assert_eq!(ratio.to_string(), "9:16");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum AspectRatio {
    /// Widescreen, 16:9
    #[default]
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    Landscape,
    /// Vertical, 9:16
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    Portrait,
    /// Square, 1:1
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
}

impl std::str::FromStr for AspectRatio {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            "1:1" => Ok(AspectRatio::Square),
            other => Err(ValidationError::new(
                ValidationErrorKind::UnknownAspectRatio(other.to_string()),
            )),
        }
    }
}
