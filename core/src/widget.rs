//! Widget placement geometry.

use serde::Serialize;

keyword_enum!(
    /// Whether a widget sits over the map or beside it.
    WidgetZone, "widget zone", {
        Inner => "inner",
        Outer => "outer",
    }
);

keyword_enum!(
    /// Horizontal section of a zone.
    WidgetSection, "widget section", {
        Left => "left",
        Center => "center",
        Right => "right",
    }
);

keyword_enum!(
    /// Vertical area of a section.
    WidgetArea, "widget area", {
        Top => "top",
        Middle => "middle",
        Bottom => "bottom",
    }
);

/// A slot in the widget grid.
///
/// # Examples
///
/// ```
/// use plugin_manifest_core::{WidgetArea, WidgetLocation, WidgetSection, WidgetZone};
///
/// let loc = WidgetLocation {
///     zone: WidgetZone::Inner,
///     section: WidgetSection::Center,
///     area: WidgetArea::Top,
/// };
/// assert!(loc.horizontal());
/// assert!(!loc.vertical());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WidgetLocation {
    pub zone: WidgetZone,
    pub section: WidgetSection,
    pub area: WidgetArea,
}

impl WidgetLocation {
    /// The slot can hold a horizontally extended widget.
    pub fn horizontal(&self) -> bool {
        self.section == WidgetSection::Center
    }

    /// The slot can hold a vertically extended widget.
    pub fn vertical(&self) -> bool {
        self.area == WidgetArea::Middle
    }
}

/// Placement metadata of a widget extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLayout {
    horizontally_extendable: bool,
    vertically_extendable: bool,
    extended: bool,
    floating: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_location: Option<WidgetLocation>,
}

impl WidgetLayout {
    pub fn new(
        horizontally_extendable: bool,
        vertically_extendable: bool,
        extended: bool,
        floating: bool,
        default_location: Option<WidgetLocation>,
    ) -> Self {
        Self {
            horizontally_extendable,
            vertically_extendable,
            extended,
            floating,
            default_location,
        }
    }

    pub fn horizontally_extendable(&self) -> bool {
        self.horizontally_extendable
    }

    pub fn vertically_extendable(&self) -> bool {
        self.vertically_extendable
    }

    pub fn extended(&self) -> bool {
        self.extended
    }

    pub fn floating(&self) -> bool {
        self.floating
    }

    pub fn default_location(&self) -> Option<&WidgetLocation> {
        self.default_location.as_ref()
    }

    /// Whether the widget extends along `location`'s axis when placed there.
    pub fn extendable_at(&self, location: &WidgetLocation) -> bool {
        (self.horizontally_extendable && location.horizontal())
            || (self.vertically_extendable && location.vertical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_keywords() {
        assert_eq!("outer".parse::<WidgetZone>().unwrap(), WidgetZone::Outer);
        assert_eq!(
            "center".parse::<WidgetSection>().unwrap(),
            WidgetSection::Center
        );
        assert_eq!("middle".parse::<WidgetArea>().unwrap(), WidgetArea::Middle);
        assert_eq!(
            "side".parse::<WidgetSection>().unwrap_err().to_string(),
            "invalid widget section: side"
        );
    }

    #[test]
    fn test_extendable_at() {
        let layout = WidgetLayout::new(false, true, false, false, None);
        let middle = WidgetLocation {
            zone: WidgetZone::Outer,
            section: WidgetSection::Left,
            area: WidgetArea::Middle,
        };
        let top = WidgetLocation {
            area: WidgetArea::Top,
            ..middle
        };
        assert!(layout.extendable_at(&middle));
        assert!(!layout.extendable_at(&top));
    }
}
