use askama::Template;
use serde_json::Value;

use super::SiteContext;
use crate::forms::{EditSession, FieldDescriptor, FieldKind, FormDraft, ItemWidget, scalar_text};

#[derive(Template)]
#[template(path = "edit_form.html")]
pub struct EditFormTemplate {
    pub ctx: SiteContext,
    pub form: EditFormView,
}

pub struct OptionView {
    pub value: String,
    pub selected: bool,
}

/// Input inside an object field or an array item.
pub struct SubInputView {
    pub key: String,
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_textarea: bool,
    pub is_image: bool,
    pub is_select: bool,
    pub options: Vec<OptionView>,
    /// Query string for `/api/v1/edit/upload` when this is an image slot.
    pub upload_query: String,
}

pub struct ItemView {
    pub index: usize,
    pub inputs: Vec<SubInputView>,
    pub remove_action: String,
}

pub struct FieldView {
    pub name: String,
    pub key: String,
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_text: bool,
    pub is_textarea: bool,
    pub is_image: bool,
    pub is_select: bool,
    pub is_object: bool,
    pub is_array: bool,
    pub options: Vec<OptionView>,
    pub sub_inputs: Vec<SubInputView>,
    pub items: Vec<ItemView>,
    pub add_action: String,
    pub upload_query: String,
}

pub struct EditFormView {
    pub title: String,
    pub action: String,
    pub back: String,
    pub fields: Vec<FieldView>,
    pub error: Option<String>,
    pub uploads_enabled: bool,
    pub saving: bool,
    pub uploading: bool,
}

fn options_for(field: &FieldDescriptor, current: &str) -> Vec<OptionView> {
    field
        .options
        .iter()
        .map(|o| OptionView { value: o.clone(), selected: o == current })
        .collect()
}

fn item_input(field: &FieldDescriptor, index: usize, sub: &FieldDescriptor, item: &Value) -> SubInputView {
    let value = scalar_text(item.get(&sub.name));
    let widget = sub.item_widget();
    SubInputView {
        key: format!("f.{}.{index}.{}", field.name, sub.name),
        label: sub.display_label().to_string(),
        placeholder: sub.placeholder.clone().unwrap_or_default(),
        is_textarea: widget == ItemWidget::Textarea,
        is_image: widget == ItemWidget::Image,
        is_select: widget == ItemWidget::Select,
        options: options_for(sub, &value),
        upload_query: format!("field={}&index={index}&sub={}", field.name, sub.name),
        value,
    }
}

fn field_view(field: &FieldDescriptor, draft: &FormDraft) -> FieldView {
    let value = draft.text(&field.name);
    let sub_inputs = if field.kind == FieldKind::Object {
        let obj = draft.value(&field.name);
        field
            .sub_fields
            .iter()
            .map(|sub| SubInputView {
                key: format!("f.{}.{}", field.name, sub.name),
                label: sub.display_label().to_string(),
                value: scalar_text(obj.and_then(|o| o.get(&sub.name))),
                placeholder: sub.placeholder.clone().unwrap_or_default(),
                is_textarea: false,
                is_image: false,
                is_select: false,
                options: Vec::new(),
                upload_query: String::new(),
            })
            .collect()
    } else {
        Vec::new()
    };
    let items = if field.kind == FieldKind::Array {
        draft
            .items(&field.name)
            .iter()
            .enumerate()
            .map(|(index, item)| ItemView {
                index,
                inputs: field.sub_fields.iter().map(|sub| item_input(field, index, sub, item)).collect(),
                remove_action: format!("remove_item:{}:{index}", field.name),
            })
            .collect()
    } else {
        Vec::new()
    };

    FieldView {
        name: field.name.clone(),
        key: format!("f.{}", field.name),
        label: field.display_label().to_string(),
        placeholder: field.placeholder.clone().unwrap_or_default(),
        is_text: field.kind == FieldKind::Text,
        is_textarea: field.kind == FieldKind::Textarea,
        is_image: field.kind == FieldKind::Image,
        is_select: field.kind == FieldKind::Select,
        is_object: field.kind == FieldKind::Object,
        is_array: field.kind == FieldKind::Array,
        options: options_for(field, &value),
        sub_inputs,
        items,
        add_action: format!("add_item:{}", field.name),
        upload_query: format!("field={}", field.name),
        value,
    }
}

impl EditFormView {
    pub fn from_session(
        session: &EditSession,
        action: &str,
        back: &str,
        uploads_enabled: bool,
        error: Option<String>,
    ) -> Self {
        let fields = session
            .draft()
            .map(|draft| draft.fields().iter().map(|f| field_view(f, draft)).collect())
            .unwrap_or_default();
        Self {
            title: session.title().to_string(),
            action: action.to_string(),
            back: back.to_string(),
            fields,
            error: error.or_else(|| session.last_error().map(str::to_string)),
            uploads_enabled,
            saving: session.is_saving(),
            uploading: session.is_uploading(),
        }
    }
}
