use serde_json::{Map, Value};

use super::field::{FieldDescriptor, FieldKind, ItemWidget};
use super::FormError;

/// Where an uploaded image URL lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageTarget {
    Field(String),
    Item { field: String, index: usize, sub: String },
}

/// Working copy of a document slice, shaped by the descriptors that seeded it.
///
/// Every mutator validates against the descriptors first and leaves the draft
/// untouched when it returns an error.
#[derive(Debug, Clone)]
pub struct FormDraft {
    fields: Vec<FieldDescriptor>,
    data: Map<String, Value>,
}

impl FormDraft {
    pub fn seed(fields: Vec<FieldDescriptor>, initial: &Value) -> Self {
        let mut data = match initial {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        for field in &fields {
            if !data.contains_key(&field.name) {
                data.insert(field.name.clone(), field.empty_value());
            }
        }
        Self { fields, data }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// String view of a scalar slot; numbers are shown as written.
    pub fn text(&self, name: &str) -> String {
        scalar_text(self.data.get(name))
    }

    pub fn descriptor(&self, name: &str) -> Result<&FieldDescriptor, FormError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn expect_kind(
        &self,
        name: &str,
        accept: &[FieldKind],
        expected: &'static str,
    ) -> Result<&FieldDescriptor, FormError> {
        let field = self.descriptor(name)?;
        if accept.contains(&field.kind) {
            Ok(field)
        } else {
            Err(FormError::WrongKind { field: name.to_string(), expected })
        }
    }

    /// Write a top-level text, textarea, image or select field.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field = self.expect_kind(
            name,
            &[FieldKind::Text, FieldKind::Textarea, FieldKind::Image, FieldKind::Select],
            "scalar",
        )?;
        if field.kind == FieldKind::Select && !field.accepts_option(value) {
            return Err(FormError::InvalidOption { field: name.to_string(), value: value.to_string() });
        }
        self.data.insert(name.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    /// Write `draft[name][sub]` of an object field.
    pub fn set_object_field(&mut self, name: &str, sub: &str, value: &str) -> Result<(), FormError> {
        let field = self.expect_kind(name, &[FieldKind::Object], "object")?;
        if field.sub_field(sub).is_none() {
            return Err(FormError::UnknownSubField { field: name.to_string(), sub: sub.to_string() });
        }

        let slot = self
            .data
            .entry(name.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(obj) = slot {
            obj.insert(sub.to_string(), Value::String(value.to_string()));
        }
        Ok(())
    }

    fn items_mut(&mut self, name: &str) -> &mut Vec<Value> {
        let slot = self
            .data
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(items) => items,
            _ => unreachable!("slot was just normalised to an array"),
        }
    }

    pub fn items(&self, name: &str) -> &[Value] {
        match self.data.get(name) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Append a fresh item; returns its index.
    pub fn add_item(&mut self, name: &str) -> Result<usize, FormError> {
        let item = self.expect_kind(name, &[FieldKind::Array], "array")?.new_item();
        let items = self.items_mut(name);
        items.push(item);
        Ok(items.len() - 1)
    }

    /// Remove the item at `index`; later items shift down in order.
    pub fn remove_item(&mut self, name: &str, index: usize) -> Result<Value, FormError> {
        self.expect_kind(name, &[FieldKind::Array], "array")?;
        let len = self.items(name).len();
        if index >= len {
            return Err(FormError::IndexOutOfRange { field: name.to_string(), index, len });
        }
        Ok(self.items_mut(name).remove(index))
    }

    pub fn set_item_field(
        &mut self,
        name: &str,
        index: usize,
        sub: &str,
        value: &str,
    ) -> Result<(), FormError> {
        let field = self.expect_kind(name, &[FieldKind::Array], "array")?;
        let sub_field = field
            .sub_field(sub)
            .ok_or_else(|| FormError::UnknownSubField { field: name.to_string(), sub: sub.to_string() })?;
        if sub_field.item_widget() == ItemWidget::Select && !sub_field.accepts_option(value) {
            return Err(FormError::InvalidOption { field: format!("{name}.{sub}"), value: value.to_string() });
        }
        let len = self.items(name).len();
        if index >= len {
            return Err(FormError::IndexOutOfRange { field: name.to_string(), index, len });
        }

        let item = &mut self.items_mut(name)[index];
        if !item.is_object() {
            *item = Value::Object(Map::new());
        }
        if let Value::Object(obj) = item {
            obj.insert(sub.to_string(), Value::String(value.to_string()));
        }
        Ok(())
    }

    /// Check that `target` names an image slot in this draft.
    pub fn validate_image_target(&self, target: &ImageTarget) -> Result<(), FormError> {
        match target {
            ImageTarget::Field(name) => {
                self.expect_kind(name, &[FieldKind::Image], "image")?;
            }
            ImageTarget::Item { field, index, sub } => {
                let descriptor = self.expect_kind(field, &[FieldKind::Array], "array")?;
                let sub_field = descriptor.sub_field(sub).ok_or_else(|| FormError::UnknownSubField {
                    field: field.clone(),
                    sub: sub.clone(),
                })?;
                if sub_field.item_widget() != ItemWidget::Image {
                    return Err(FormError::WrongKind { field: format!("{field}.{sub}"), expected: "image" });
                }
                let len = self.items(field).len();
                if *index >= len {
                    return Err(FormError::IndexOutOfRange { field: field.clone(), index: *index, len });
                }
            }
        }
        Ok(())
    }

    pub fn apply_image(&mut self, target: &ImageTarget, url: &str) -> Result<(), FormError> {
        self.validate_image_target(target)?;
        match target {
            ImageTarget::Field(name) => {
                self.data.insert(name.clone(), Value::String(url.to_string()));
                Ok(())
            }
            ImageTarget::Item { field, index, sub } => self.set_item_field(field, *index, sub, url),
        }
    }
}

pub(crate) fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
