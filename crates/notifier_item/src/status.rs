/// Recognised values of [`org.kde.StatusNotifierItem.Status`].
///
/// On the bus the status travels as its variant name (e.g. `"NeedsAttention"`).
///
/// [`org.kde.StatusNotifierItem.Status`]: https://www.freedesktop.org/wiki/Specifications/StatusNotifierItem/StatusNotifierItem/#org.freedesktop.statusnotifieritem.status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, strum::IntoStaticStr)]
pub enum Status {
    /// The item doesn't convey important information to the user; hosts may hide it.
    Passive,
    /// The item is active and should be shown.
    #[default]
    Active,
    /// The item carries information that needs the user's intervention. Hosts should emphasize it,
    /// typically by showing the attention icon.
    NeedsAttention,
}

/// Recognised values of `org.kde.StatusNotifierItem.Category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, strum::IntoStaticStr)]
pub enum Category {
    /// The item describes the status of a generic application, e.g. a media player.
    #[default]
    ApplicationStatus,
    /// The item describes a communication application, e.g. an instant messenger.
    Communications,
    /// The item describes a system service, e.g. a package updater.
    SystemServices,
    /// The item describes the state of the hardware, e.g. battery or volume.
    Hardware,
}

/// Direction of a `Scroll` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Interpret the orientation argument of `Scroll`.
    ///
    /// Hosts send `"horizontal"` or `"vertical"`, but casing varies. Anything that isn't
    /// horizontal is treated as vertical.
    pub fn from_host_str(orientation: &str) -> Self {
        if orientation.eq_ignore_ascii_case("horizontal") {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Screen position passed along with activation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_orientation_from_host_str() {
        assert_eq!(Orientation::from_host_str("Horizontal"), Orientation::Horizontal);
        assert_eq!(Orientation::from_host_str("HORIZONTAL"), Orientation::Horizontal);
        assert_eq!(Orientation::from_host_str("horizontal"), Orientation::Horizontal);
        assert_eq!(Orientation::from_host_str("vertical"), Orientation::Vertical);
        assert_eq!(Orientation::from_host_str("sideways"), Orientation::Vertical);
        assert_eq!(Orientation::from_host_str(""), Orientation::Vertical);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(Status::NeedsAttention.to_string(), "NeedsAttention");
        assert_eq!("Passive".parse::<Status>(), Ok(Status::Passive));
        assert!("needsattention".parse::<Status>().is_err());
        assert_eq!(Status::default(), Status::Active);
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(Category::SystemServices.to_string(), "SystemServices");
        assert_eq!("Hardware".parse::<Category>(), Ok(Category::Hardware));
        assert_eq!(Category::default(), Category::ApplicationStatus);
    }
}
