//! Compiles raw [`Root`] documents into the plugin model.
//!
//! Each node is compiled in declaration order. Validation errors are wrapped
//! with the path of the node that failed (`ext (hoge)`, `item (default)`,
//! `field (size)`), outermost first. Authoring looseness that the model can
//! absorb (empty choice keys, empty linkable pointers, unknown UI hints,
//! uncoercible values) is logged at debug level and dropped.

use plugin_manifest_core::{
    BuildError, Condition, Extension, ExtensionType, I18nString, LinkableFields, Plugin, PluginId,
    PropertySchemaId, Schema, SchemaField, SchemaFieldChoice, SchemaFieldId, SchemaFieldPointer,
    SchemaFieldUi, SchemaGroup, SchemaGroupId, ValueType, Visualizer, WidgetLayout, WidgetLocation,
};
use tracing::debug;

use crate::error::{ManifestError, Result, WithPath, invalid};
use crate::manifest::Manifest;
use crate::root::{
    ConditionSpec, ExtensionSpec, FieldSpec, GroupSpec, PointerSpec, PropertySchemaSpec, Root,
    WidgetLayoutSpec,
};

/// Schema id suffix of a plugin's own property schema.
pub const PLUGIN_SCHEMA_ID: &str = "@";

/// Compiles `root` into a [`Manifest`].
///
/// With `allow_system` unset, a document resolving to the official plugin id
/// is rejected with [`ManifestError::SystemManifest`] before anything else is
/// compiled.
pub(crate) fn manifest(root: &Root, allow_system: bool) -> Result<Manifest> {
    let pid = plugin_id(root)?;
    if !allow_system && pid.is_official() {
        return Err(ManifestError::SystemManifest);
    }
    debug!(
        plugin = %pid,
        extensions = root.extensions.len(),
        "compiling plugin manifest"
    );

    let schema = match &root.schema {
        Some(spec) => {
            let id = PropertySchemaId::new(pid.clone(), PLUGIN_SCHEMA_ID)?;
            Some(schema(spec, id).at(|| "plugin property schema")?)
        }
        None => None,
    };

    let mut extensions = Vec::with_capacity(root.extensions.len());
    let mut extension_schemas = Vec::with_capacity(root.extensions.len());
    for spec in &root.extensions {
        let (ext, ext_schema) =
            extension(spec, &pid, root.system).at(|| format!("ext ({})", spec.id))?;
        extensions.push(ext);
        extension_schemas.push(ext_schema);
    }

    let title = root
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(root.id.as_str());
    let plugin = Plugin::builder()
        .id(pid)
        .name(I18nString::from_default(title))
        .author(root.author.clone())
        .description(I18nString::from_option(root.description.as_deref()))
        .repository_url(root.repository.clone())
        .schema(schema.as_ref().map(|s| s.id().clone()))
        .extensions(extensions)
        .build()?;

    Ok(Manifest {
        plugin,
        schema,
        extension_schemas,
    })
}

/// Derives the plugin id. A system document whose id is empty or the
/// official name gets the official identity regardless of its version.
pub(crate) fn plugin_id(root: &Root) -> Result<PluginId> {
    if root.system && (root.id.is_empty() || root.id == PluginId::official().name()) {
        return Ok(PluginId::official());
    }
    Ok(PluginId::new(&root.id, &root.version)?)
}

fn extension(
    spec: &ExtensionSpec,
    plugin: &PluginId,
    system: bool,
) -> Result<(Extension, Schema)> {
    if spec.id.is_empty() {
        return Err(BuildError::MissingId("extension").into());
    }
    // `@` names the plugin's own schema; an extension may not take it.
    if spec.id == PLUGIN_SCHEMA_ID {
        return Err(invalid("invalid extension id"));
    }

    let extension_type: ExtensionType = match spec.extension_type.as_deref() {
        None | Some("") => return Err(invalid("type missing")),
        Some(keyword) => keyword.parse()?,
    };
    let visualizer = match spec.visualizer.as_deref() {
        None | Some("") => None,
        Some(keyword) => Some(keyword.parse::<Visualizer>()?),
    };
    if visualizer.is_none() && extension_type.requires_visualizer() {
        return Err(invalid("visualizer missing"));
    }

    let schema_id = PropertySchemaId::new(plugin.clone(), &spec.id)?;
    let empty = PropertySchemaSpec::default();
    let schema = schema(spec.schema.as_ref().unwrap_or(&empty), schema_id)
        .at(|| "property schema")?;

    let widget_layout = spec
        .widget_layout
        .as_ref()
        .map(widget_layout)
        .transpose()
        .at(|| "widget layout")?;

    let ext = Extension::builder()
        .id(spec.id.as_str())
        .extension_type(extension_type)
        .name(I18nString::from_option(spec.title.as_deref()))
        .description(I18nString::from_option(spec.description.as_deref()))
        .icon(spec.icon.clone())
        .schema(schema.id().clone())
        .visualizer(visualizer)
        .single_only(spec.single_only)
        .widget_layout(widget_layout)
        .system(system)
        .build()?;

    Ok((ext, schema))
}

fn widget_layout(spec: &WidgetLayoutSpec) -> Result<WidgetLayout> {
    let default_location = match &spec.default_location {
        Some(loc) => Some(WidgetLocation {
            zone: loc.zone.parse()?,
            section: loc.section.parse()?,
            area: loc.area.parse()?,
        }),
        None => None,
    };
    let (horizontally, vertically) = spec
        .extendable
        .as_ref()
        .map_or((false, false), |e| (e.horizontally, e.vertically));

    Ok(WidgetLayout::new(
        horizontally,
        vertically,
        spec.extended,
        spec.floating,
        default_location,
    ))
}

/// Compiles one property schema block under `id`.
pub(crate) fn schema(spec: &PropertySchemaSpec, id: PropertySchemaId) -> Result<Schema> {
    let groups = spec
        .groups
        .iter()
        .map(|g| group(g).at(|| format!("item ({})", g.id)))
        .collect::<Result<Vec<_>>>()?;

    let linkable = spec
        .linkable
        .as_ref()
        .map(|l| LinkableFields {
            latlng: pointer(l.latlng.as_ref()),
            url: pointer(l.url.as_ref()),
        })
        .unwrap_or_default();

    Ok(Schema::builder()
        .id(id)
        .version(spec.version)
        .groups(groups)
        .linkable_fields(linkable)
        .build()?)
}

fn pointer(spec: Option<&PointerSpec>) -> Option<SchemaFieldPointer> {
    let spec = spec?;
    if spec.group.is_empty() && spec.field.is_empty() {
        debug!("ignoring empty linkable field pointer");
        return None;
    }
    let group = (!spec.group.is_empty()).then(|| SchemaGroupId::from(spec.group.as_str()));
    Some(SchemaFieldPointer::new(group, spec.field.as_str()))
}

fn group(spec: &GroupSpec) -> Result<SchemaGroup> {
    let fields = spec
        .fields
        .iter()
        .map(|f| field(f).at(|| format!("field ({})", f.id)))
        .collect::<Result<Vec<_>>>()?;

    Ok(SchemaGroup::builder()
        .id(spec.id.as_str())
        .title(I18nString::from_option(spec.title.as_deref()))
        .description(I18nString::from_option(spec.description.as_deref()))
        .is_list(spec.list)
        .representative_field(spec.representative_field.as_deref().map(SchemaFieldId::from))
        .available_if(condition(spec.available_if.as_ref()))
        .fields(fields)
        .build()?)
}

fn field(spec: &FieldSpec) -> Result<SchemaField> {
    if spec.value_type.is_empty() {
        return Err(BuildError::MissingValueType.into());
    }
    let value_type: ValueType = spec.value_type.parse()?;

    let default_value = spec.default_value.as_ref().and_then(|raw| {
        let value = value_type.value_from(raw);
        if value.is_none() && !raw.is_null() {
            debug!(field = %spec.id, %value_type, "dropping uncoercible default value");
        }
        value
    });

    let choices = spec
        .choices
        .iter()
        .flatten()
        .filter_map(|c| {
            if c.key.is_empty() {
                debug!(field = %spec.id, "dropping choice with empty key");
                return None;
            }
            Some(SchemaFieldChoice::new(
                c.key.as_str(),
                I18nString::from_option(c.label.as_deref()),
                c.icon.clone().filter(|i| !i.is_empty()),
            ))
        })
        .collect();

    let ui = spec
        .ui
        .as_deref()
        .filter(|ui| !ui.is_empty())
        .and_then(|ui| match ui.parse::<SchemaFieldUi>() {
            Ok(ui) => Some(ui),
            Err(_) => {
                debug!(field = %spec.id, ui, "dropping unknown field ui");
                None
            }
        });

    Ok(SchemaField::builder()
        .id(spec.id.as_str())
        .value_type(value_type)
        .title(I18nString::from_option(spec.title.as_deref()))
        .description(I18nString::from_option(spec.description.as_deref()))
        .prefix(spec.prefix.clone())
        .suffix(spec.suffix.clone())
        .default_value(default_value)
        .min(spec.min)
        .max(spec.max)
        .choices(choices)
        .ui(ui)
        .available_if(condition(spec.available_if.as_ref()))
        .build()?)
}

/// Coerces the condition value through its declared type; a value that does
/// not coerce leaves the condition empty.
fn condition(spec: Option<&ConditionSpec>) -> Option<Condition> {
    let spec = spec?;
    let value = spec
        .value_type
        .parse::<ValueType>()
        .ok()
        .and_then(|t| t.value_from(&spec.value));
    if value.is_none() {
        debug!(field = %spec.field, "condition value did not coerce");
    }
    Some(Condition::new(spec.field.as_str(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin_manifest_core::Value;
    use serde_json::json;

    use crate::root::{ChoiceSpec, LinkableSpec};

    fn field_spec(id: &str, ty: &str) -> FieldSpec {
        FieldSpec {
            id: id.into(),
            value_type: ty.into(),
            ..Default::default()
        }
    }

    fn root(system: bool, ext_type: &str) -> Root {
        Root {
            id: "aaa".into(),
            version: "1.1.1".into(),
            system,
            extensions: vec![ExtensionSpec {
                id: "hoge".into(),
                extension_type: Some(ext_type.into()),
                visualizer: Some("cesium".into()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_plugin_id_derivation() {
        assert_eq!(plugin_id(&root(false, "primitive")).unwrap().to_string(), "aaa#1.1.1");

        let system = Root {
            id: "reearth".into(),
            version: "not semver".into(),
            system: true,
            ..Default::default()
        };
        assert_eq!(plugin_id(&system).unwrap(), PluginId::official());

        let bad = Root {
            id: "aaa".into(),
            version: "x".into(),
            ..Default::default()
        };
        let err = plugin_id(&bad).unwrap_err().to_string();
        assert!(err.starts_with("invalid manifest: invalid plugin id: aaa#x"), "{err}");
    }

    #[test]
    fn test_system_only_type_needs_system_flag() {
        let err = manifest(&root(false, "visualizer"), false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid manifest: ext (hoge): extension type visualizer is only available to system plugins"
        );
        assert!(manifest(&root(true, "visualizer"), false).is_ok());
    }

    #[test]
    fn test_extension_keywords() {
        let mut doc = root(false, "primitive");
        doc.extensions[0].visualizer = None;
        assert_eq!(
            manifest(&doc, false).unwrap_err().to_string(),
            "invalid manifest: ext (hoge): visualizer missing"
        );

        let doc = root(false, "story");
        assert_eq!(
            manifest(&doc, false).unwrap_err().to_string(),
            "invalid manifest: ext (hoge): invalid extension type: story"
        );

        let mut doc = root(false, "widget");
        doc.extensions[0].visualizer = None;
        assert!(manifest(&doc, false).is_ok());

        let mut doc = root(false, "primitive");
        doc.extensions[0].extension_type = None;
        assert_eq!(
            manifest(&doc, false).unwrap_err().to_string(),
            "invalid manifest: ext (hoge): type missing"
        );
    }

    #[test]
    fn test_extension_cannot_take_plugin_schema_id() {
        let mut doc = root(false, "primitive");
        doc.extensions[0].id = PLUGIN_SCHEMA_ID.into();
        assert_eq!(
            manifest(&doc, false).unwrap_err().to_string(),
            "invalid manifest: ext (@): invalid extension id"
        );
    }

    #[test]
    fn test_field_default_and_bad_type() {
        let mut spec = field_spec("visible", "bool");
        spec.default_value = Some(json!(true));
        assert_eq!(field(&spec).unwrap().default_value(), Some(&Value::Bool(true)));

        let spec = field_spec("foo", "xxx");
        let group_spec = GroupSpec {
            id: "default".into(),
            fields: vec![spec],
            ..Default::default()
        };
        let err = group(&group_spec).at(|| "item (default)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid manifest: item (default): field (foo): invalid value type: xxx"
        );
    }

    #[test]
    fn test_uncoercible_default_is_absent() {
        let mut spec = field_spec("size", "number");
        spec.default_value = Some(json!("big"));
        assert_eq!(field(&spec).unwrap().default_value(), None);
    }

    #[test]
    fn test_choices_drop_empty_keys() {
        let mut spec = field_spec("mode", "string");
        spec.choices = Some(vec![
            ChoiceSpec {
                key: String::new(),
                label: Some("none".into()),
                icon: None,
            },
            ChoiceSpec {
                key: "nnn".into(),
                label: Some("vvv".into()),
                icon: None,
            },
        ]);
        let field = field(&spec).unwrap();
        assert_eq!(field.choices().len(), 1);
        assert_eq!(field.choice("nnn").unwrap().title().string(), "vvv");
    }

    #[test]
    fn test_unknown_ui_is_dropped() {
        let mut spec = field_spec("c", "string");
        spec.ui = Some("sparkle".into());
        assert_eq!(field(&spec).unwrap().ui(), None);
        spec.ui = Some("color".into());
        assert_eq!(field(&spec).unwrap().ui(), Some(SchemaFieldUi::Color));
    }

    #[test]
    fn test_condition_coercion() {
        let cond = condition(Some(&ConditionSpec {
            field: "enabled".into(),
            value_type: "bool".into(),
            value: json!(true),
        }))
        .unwrap();
        assert_eq!(cond.value(), Some(&Value::Bool(true)));

        let cond = condition(Some(&ConditionSpec {
            field: "size".into(),
            value_type: "number".into(),
            value: json!({"not": "a number"}),
        }))
        .unwrap();
        assert_eq!(cond.value(), None);
        assert!(!cond.is_satisfied_by(&Value::Number(0.0)));
    }

    #[test]
    fn test_empty_linkable_pointer_collapses() {
        let id = PropertySchemaId::new(PluginId::official(), "x").unwrap();
        let spec = PropertySchemaSpec {
            linkable: Some(LinkableSpec {
                latlng: Some(PointerSpec::default()),
                url: None,
            }),
            ..Default::default()
        };
        let schema = schema(&spec, id).unwrap();
        assert!(schema.linkable_fields().is_empty());
    }

    #[test]
    fn test_widget_layout_keywords() {
        let mut doc = root(false, "widget");
        doc.extensions[0].widget_layout = Some(WidgetLayoutSpec {
            default_location: Some(crate::root::LocationSpec {
                zone: "inner".into(),
                section: "top".into(),
                area: "top".into(),
            }),
            ..Default::default()
        });
        assert_eq!(
            manifest(&doc, false).unwrap_err().to_string(),
            "invalid manifest: ext (hoge): widget layout: invalid widget section: top"
        );
    }
}
