use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of an editable slot. Unknown kind strings (e.g. `"number"`) read as
/// [`FieldKind::Text`]; the value is still stored as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Image,
    Select,
    Object,
    Array,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Image => "image",
            FieldKind::Select => "select",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        }
    }
}

impl From<String> for FieldKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "textarea" => FieldKind::Textarea,
            "image" => FieldKind::Image,
            "select" => FieldKind::Select,
            "object" => FieldKind::Object,
            "array" => FieldKind::Array,
            _ => FieldKind::Text,
        }
    }
}

impl From<FieldKind> for &'static str {
    fn from(k: FieldKind) -> Self {
        k.as_str()
    }
}

/// How a sub-field of an array item is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemWidget {
    Text,
    Textarea,
    Image,
    Select,
}

/// Name-based image detection for descriptors that predate the `image` kind tag.
#[deprecated(note = "tag image sub-fields with `FieldKind::Image` instead")]
pub fn is_legacy_image_name(name: &str) -> bool {
    name == "image" || name == "icon" || name.contains("image")
}

/// One editable slot: a key into the draft plus how to edit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, rename = "subFields", skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl FieldDescriptor {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            placeholder: None,
            sub_fields: Vec::new(),
            options: Vec::new(),
            default_value: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn image(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Image)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.options = options.iter().map(|o| o.to_string()).collect();
        field
    }

    pub fn object(name: &str, label: &str, sub_fields: Vec<FieldDescriptor>) -> Self {
        let mut field = Self::new(name, label, FieldKind::Object);
        field.sub_fields = sub_fields;
        field
    }

    pub fn array(name: &str, label: &str, sub_fields: Vec<FieldDescriptor>) -> Self {
        let mut field = Self::new(name, label, FieldKind::Array);
        field.sub_fields = sub_fields;
        field
    }

    /// Array sub-field shorthand: the placeholder doubles as the label.
    pub fn item(name: &str, placeholder: &str) -> Self {
        Self::text(name, "").with_placeholder(placeholder)
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    /// Label shown to the editor; falls back to the placeholder, then the name.
    pub fn display_label(&self) -> &str {
        if !self.label.is_empty() {
            &self.label
        } else {
            self.placeholder.as_deref().unwrap_or(&self.name)
        }
    }

    pub fn sub_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.sub_fields.iter().find(|f| f.name == name)
    }

    /// Value a missing key is seeded with.
    pub fn empty_value(&self) -> Value {
        match self.kind {
            FieldKind::Array => Value::Array(Vec::new()),
            FieldKind::Object => Value::Object(Map::new()),
            FieldKind::Select => Value::String(self.default_value.clone().unwrap_or_default()),
            _ => Value::String(String::new()),
        }
    }

    /// Fresh array item: every sub-field at its declared default, or empty.
    pub fn new_item(&self) -> Value {
        let item: Map<String, Value> = self
            .sub_fields
            .iter()
            .map(|sf| {
                (
                    sf.name.clone(),
                    Value::String(sf.default_value.clone().unwrap_or_default()),
                )
            })
            .collect();
        Value::Object(item)
    }

    /// Widget used when this descriptor is a sub-field of an array item.
    /// An image-like name wins over a select or textarea kind.
    pub fn item_widget(&self) -> ItemWidget {
        #[allow(deprecated)]
        let legacy_image = is_legacy_image_name(&self.name);

        if self.kind == FieldKind::Image || legacy_image {
            ItemWidget::Image
        } else if self.kind == FieldKind::Select {
            ItemWidget::Select
        } else if self.kind == FieldKind::Textarea || self.name == "description" {
            ItemWidget::Textarea
        } else {
            ItemWidget::Text
        }
    }

    pub fn accepts_option(&self, value: &str) -> bool {
        value.is_empty() || self.options.iter().any(|o| o == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_original_descriptor_shape() {
        let raw = r#"{
            "name": "projects", "label": "Projects", "type": "array",
            "subFields": [
                {"name": "progress", "placeholder": "Progress (%)", "type": "number"},
                {"name": "status", "type": "select", "options": ["running", "completed"], "defaultValue": "completed"}
            ]
        }"#;
        let field: FieldDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(field.kind, FieldKind::Array);
        assert_eq!(field.sub_fields[0].kind, FieldKind::Text);
        assert_eq!(field.sub_fields[1].default_value.as_deref(), Some("completed"));
    }

    #[test]
    fn omitted_kind_is_text() {
        let field: FieldDescriptor = serde_json::from_str(r#"{"name": "title"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.display_label(), "title");
    }

    #[test]
    fn item_widget_resolution() {
        assert_eq!(FieldDescriptor::item("icon", "Icon").item_widget(), ItemWidget::Image);
        assert_eq!(FieldDescriptor::item("coverImage", "Cover").item_widget(), ItemWidget::Image);
        assert_eq!(FieldDescriptor::item("url", "Url").item_widget(), ItemWidget::Text);
        assert_eq!(
            FieldDescriptor::item("url", "Url").with_kind(FieldKind::Image).item_widget(),
            ItemWidget::Image
        );
        assert_eq!(FieldDescriptor::item("description", "Desc").item_widget(), ItemWidget::Textarea);
        assert_eq!(
            FieldDescriptor::select("status", "Status", &["a"]).item_widget(),
            ItemWidget::Select
        );
    }

    #[test]
    fn image_names_win_over_select_and_textarea() {
        assert_eq!(
            FieldDescriptor::item("icon", "Icon").with_kind(FieldKind::Select).item_widget(),
            ItemWidget::Image
        );
        assert_eq!(
            FieldDescriptor::item("image", "Image").with_kind(FieldKind::Textarea).item_widget(),
            ItemWidget::Image
        );
    }
}
