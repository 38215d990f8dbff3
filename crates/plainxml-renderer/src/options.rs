//! Render options.

/// How cross-references are collected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReferenceMode {
    /// Anchors register while rendered; references to anchors later in the
    /// document fall back to the raw id.
    #[default]
    SinglePass,
    /// Collect all anchors before rendering so forward references resolve.
    Prescan,
}

/// Element used for bullet lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ListTags {
    /// Both list styles render as `xhtml:ol`.
    #[default]
    Ordered,
    /// Bullet lists render as `xhtml:ul`, numbered lists as `xhtml:ol`.
    ByStyle,
}

/// Options controlling XML output.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Cross-reference collection mode.
    pub references: ReferenceMode,
    /// Escape reserved characters in attribute values.
    pub escape_attributes: bool,
    /// List element selection.
    pub list_tags: ListTags,
    /// Emit attribute-dump comments after structural elements.
    pub attribute_comments: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            references: ReferenceMode::SinglePass,
            escape_attributes: true,
            list_tags: ListTags::Ordered,
            attribute_comments: true,
        }
    }
}
