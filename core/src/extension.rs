//! Extensions: the capabilities a plugin contributes.

use serde::Serialize;

use crate::error::{BuildError, Result};
use crate::i18n::I18nString;
use crate::id::{ExtensionId, PropertySchemaId};
use crate::widget::WidgetLayout;

keyword_enum!(
    /// What an extension provides to the platform.
    ExtensionType, "extension type", {
        Primitive => "primitive",
        Widget => "widget",
        Block => "block",
        Visualizer => "visualizer",
        Infobox => "infobox",
        Cluster => "cluster",
    }
);

impl ExtensionType {
    /// Types that only the bundled system plugin may declare.
    pub fn is_system_only(self) -> bool {
        matches!(self, ExtensionType::Visualizer | ExtensionType::Infobox)
    }

    /// Types that render through a visualizer backend and must name one.
    pub fn requires_visualizer(self) -> bool {
        matches!(
            self,
            ExtensionType::Primitive
                | ExtensionType::Visualizer
                | ExtensionType::Infobox
                | ExtensionType::Cluster
        )
    }
}

keyword_enum!(
    /// Rendering backend an extension targets.
    Visualizer, "visualizer", {
        Cesium => "cesium",
    }
);

/// One capability contributed by a plugin.
///
/// # Examples
///
/// ```
/// use plugin_manifest_core::*;
///
/// let schema = PropertySchemaId::new(PluginId::official(), "infobox").unwrap();
///
/// // System-only types need the system capability.
/// let denied = Extension::builder()
///     .id("infobox")
///     .extension_type(ExtensionType::Infobox)
///     .schema(schema.clone())
///     .build();
/// assert!(denied.is_err());
///
/// let ext = Extension::builder()
///     .id("infobox")
///     .extension_type(ExtensionType::Infobox)
///     .visualizer(Some(Visualizer::Cesium))
///     .schema(schema)
///     .system(true)
///     .build()
///     .unwrap();
/// assert_eq!(ext.extension_type(), ExtensionType::Infobox);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    id: ExtensionId,
    #[serde(rename = "type")]
    extension_type: ExtensionType,
    name: I18nString,
    description: I18nString,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<PropertySchemaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visualizer: Option<Visualizer>,
    single_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    widget_layout: Option<WidgetLayout>,
}

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    pub fn id(&self) -> &ExtensionId {
        &self.id
    }

    pub fn extension_type(&self) -> ExtensionType {
        self.extension_type
    }

    pub fn name(&self) -> &I18nString {
        &self.name
    }

    pub fn description(&self) -> &I18nString {
        &self.description
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn schema(&self) -> Option<&PropertySchemaId> {
        self.schema.as_ref()
    }

    pub fn visualizer(&self) -> Option<Visualizer> {
        self.visualizer
    }

    pub fn single_only(&self) -> bool {
        self.single_only
    }

    pub fn widget_layout(&self) -> Option<&WidgetLayout> {
        self.widget_layout.as_ref()
    }

    /// Replaces the localized name. Used by the translation overlay.
    pub fn rename(&mut self, name: I18nString) {
        self.name = name;
    }

    /// Replaces the localized description. Used by the translation overlay.
    pub fn set_description(&mut self, description: I18nString) {
        self.description = description;
    }
}

/// Accumulates [`Extension`] parts; invariants are checked in
/// [`build`](ExtensionBuilder::build).
///
/// The `system` flag is the capability that unlocks system-only types; it is
/// not stored on the built extension.
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    id: Option<ExtensionId>,
    extension_type: Option<ExtensionType>,
    name: I18nString,
    description: I18nString,
    icon: Option<String>,
    schema: Option<PropertySchemaId>,
    visualizer: Option<Visualizer>,
    single_only: bool,
    widget_layout: Option<WidgetLayout>,
    system: bool,
}

impl ExtensionBuilder {
    pub fn id(mut self, id: impl Into<ExtensionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn extension_type(mut self, extension_type: ExtensionType) -> Self {
        self.extension_type = Some(extension_type);
        self
    }

    pub fn name(mut self, name: I18nString) -> Self {
        self.name = name;
        self
    }

    pub fn description(mut self, description: I18nString) -> Self {
        self.description = description;
        self
    }

    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon.filter(|s| !s.is_empty());
        self
    }

    pub fn schema(mut self, schema: PropertySchemaId) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn visualizer(mut self, visualizer: Option<Visualizer>) -> Self {
        self.visualizer = visualizer;
        self
    }

    pub fn single_only(mut self, single_only: bool) -> Self {
        self.single_only = single_only;
        self
    }

    pub fn widget_layout(mut self, layout: Option<WidgetLayout>) -> Self {
        self.widget_layout = layout;
        self
    }

    /// Grants the capability to build system-only extension types.
    pub fn system(mut self, system: bool) -> Self {
        self.system = system;
        self
    }

    /// Validates and builds the extension.
    ///
    /// An extension without an explicit type is a `primitive`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingId`] without an id and
    /// [`BuildError::SystemExtension`] for a system-only type without the
    /// system capability.
    pub fn build(self) -> Result<Extension> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or(BuildError::MissingId("extension"))?;
        let extension_type = self.extension_type.unwrap_or(ExtensionType::Primitive);
        if extension_type.is_system_only() && !self.system {
            return Err(BuildError::SystemExtension(extension_type.to_string()));
        }

        Ok(Extension {
            id,
            extension_type,
            name: self.name,
            description: self.description,
            icon: self.icon,
            schema: self.schema,
            visualizer: self.visualizer,
            single_only: self.single_only,
            widget_layout: self.widget_layout,
        })
    }

    /// Builds an extension from data known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if [`build`](ExtensionBuilder::build) fails.
    pub fn must_build(self) -> Extension {
        match self.build() {
            Ok(ext) => ext,
            Err(err) => panic!("invalid extension: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_requires_id() {
        assert_eq!(
            Extension::builder().build().unwrap_err(),
            BuildError::MissingId("extension")
        );
        assert_eq!(
            Extension::builder().id("").build().unwrap_err(),
            BuildError::MissingId("extension")
        );
    }

    #[test]
    fn test_system_only_types() {
        for ty in [ExtensionType::Visualizer, ExtensionType::Infobox] {
            let err = Extension::builder()
                .id("x")
                .extension_type(ty)
                .build()
                .unwrap_err();
            assert_eq!(err, BuildError::SystemExtension(ty.to_string()));
        }
        for ty in [
            ExtensionType::Primitive,
            ExtensionType::Widget,
            ExtensionType::Block,
            ExtensionType::Cluster,
        ] {
            assert!(Extension::builder().id("x").extension_type(ty).build().is_ok());
        }
    }

    #[test]
    fn test_type_keywords() {
        assert_eq!(
            "cluster".parse::<ExtensionType>().unwrap(),
            ExtensionType::Cluster
        );
        assert_eq!(
            "story".parse::<ExtensionType>().unwrap_err().to_string(),
            "invalid extension type: story"
        );
        assert_eq!("cesium".parse::<Visualizer>().unwrap(), Visualizer::Cesium);
        assert!(ExtensionType::Primitive.requires_visualizer());
        assert!(!ExtensionType::Widget.requires_visualizer());
    }

    #[test]
    fn test_rename_and_set_description() {
        let mut ext = Extension::builder().id("x").must_build();
        ext.rename(I18nString::from_default("X"));
        ext.set_description(I18nString::from_default("desc"));
        assert_eq!(ext.name().string(), "X");
        assert_eq!(ext.description().string(), "desc");
    }
}
