//! Form field descriptions rendered by the shared form template.

use crate::components::data_table::OptionView;
use crate::validation::{FormData, ValidationErrors};

/// Input widget for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Money,
    Email,
    Color,
    DateTime,
    Checkbox,
    Select,
    MultiSelect,
    /// Monospace textarea holding a JSON document.
    Json,
}

impl FieldKind {
    /// Name the template switches on.
    #[must_use]
    pub const fn widget(&self) -> &'static str {
        match self {
            Self::Text | Self::Number | Self::Money | Self::Email | Self::Color | Self::DateTime => {
                "input"
            }
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Json => "json",
        }
    }

    /// `type` attribute for `<input>` widgets.
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Email => "email",
            Self::Color => "color",
            Self::DateTime => "datetime-local",
            _ => "text",
        }
    }
}

/// One form control with its current value and error.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// Current value (first submitted value for multi-valued fields).
    pub value: String,
    pub options: Vec<OptionView>,
    pub required: bool,
    pub help: Option<String>,
    pub error: Option<String>,
    /// Checkbox state.
    pub checked: bool,
}

impl FormField {
    fn base(name: &str, label: &str, kind: FieldKind, values: &FormData) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            value: values.get(name).to_string(),
            options: Vec::new(),
            required: false,
            help: None,
            error: None,
            checked: false,
        }
    }

    #[must_use]
    pub fn text(name: &str, label: &str, values: &FormData) -> Self {
        Self::base(name, label, FieldKind::Text, values)
    }

    #[must_use]
    pub fn textarea(name: &str, label: &str, values: &FormData) -> Self {
        Self::base(name, label, FieldKind::Textarea, values)
    }

    #[must_use]
    pub fn number(name: &str, label: &str, values: &FormData) -> Self {
        Self::base(name, label, FieldKind::Number, values)
    }

    #[must_use]
    pub fn money(name: &str, label: &str, values: &FormData) -> Self {
        Self::base(name, label, FieldKind::Money, values)
    }

    #[must_use]
    pub fn email(name: &str, label: &str, values: &FormData) -> Self {
        Self::base(name, label, FieldKind::Email, values)
    }

    #[must_use]
    pub fn color(name: &str, label: &str, values: &FormData) -> Self {
        Self::base(name, label, FieldKind::Color, values)
    }

    #[must_use]
    pub fn datetime(name: &str, label: &str, values: &FormData) -> Self {
        Self::base(name, label, FieldKind::DateTime, values)
    }

    #[must_use]
    pub fn json(name: &str, label: &str, values: &FormData) -> Self {
        Self::base(name, label, FieldKind::Json, values)
    }

    #[must_use]
    pub fn checkbox(name: &str, label: &str, values: &FormData) -> Self {
        Self {
            checked: values.checkbox(name),
            ..Self::base(name, label, FieldKind::Checkbox, values)
        }
    }

    /// Single select. Pass `blank` to offer an empty "none" choice first.
    #[must_use]
    pub fn select<I, V, L>(
        name: &str,
        label: &str,
        values: &FormData,
        blank: Option<&str>,
        choices: I,
    ) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: ToString,
        L: ToString,
    {
        let mut field = Self::base(name, label, FieldKind::Select, values);
        if let Some(blank) = blank {
            field.options.push(OptionView {
                value: String::new(),
                label: blank.to_string(),
                selected: field.value.is_empty(),
            });
        }
        field.options.extend(options(name, values, choices));
        field
    }

    /// Multi select; every submitted value is selected.
    #[must_use]
    pub fn multi_select<I, V, L>(name: &str, label: &str, values: &FormData, choices: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: ToString,
        L: ToString,
    {
        Self {
            options: options(name, values, choices),
            ..Self::base(name, label, FieldKind::MultiSelect, values)
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// `widget` of the field kind, for the template.
    #[must_use]
    pub const fn widget(&self) -> &'static str {
        self.kind.widget()
    }

    /// `type` attribute, for the template.
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        self.kind.input_type()
    }

    /// `step` attribute for numeric inputs.
    #[must_use]
    pub const fn step(&self) -> &'static str {
        match self.kind {
            FieldKind::Number => "1",
            _ => "",
        }
    }
}

fn options<I, V, L>(name: &str, values: &FormData, choices: I) -> Vec<OptionView>
where
    I: IntoIterator<Item = (V, L)>,
    V: ToString,
    L: ToString,
{
    let selected = values.all(name);
    choices
        .into_iter()
        .map(|(value, label)| {
            let value = value.to_string();
            OptionView {
                selected: selected.contains(&value.as_str()),
                value,
                label: label.to_string(),
            }
        })
        .collect()
}

/// Copy validation messages onto their fields.
pub fn attach_errors(fields: &mut [FormField], errors: &ValidationErrors) {
    for field in fields {
        field.error = errors.get(&field.name).map(ToString::to_string);
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn values() -> FormData {
        FormData::new()
            .with("name", "Cards")
            .with_all("tags", [2, 3])
            .with("featured", "on")
    }

    #[test]
    fn test_fields_take_current_values() {
        let values = values();
        assert_eq!(FormField::text("name", "Name", &values).value, "Cards");
        assert!(FormField::checkbox("featured", "Featured", &values).checked);
        assert!(!FormField::checkbox("enabled", "Enabled", &values).checked);
    }

    #[test]
    fn test_multi_select_marks_every_value() {
        let field = FormField::multi_select(
            "tags",
            "Tags",
            &values(),
            [(1, "Eco"), (2, "Premium"), (3, "Matte")],
        );
        let selected: Vec<bool> = field.options.iter().map(|o| o.selected).collect();
        assert_eq!(selected, vec![false, true, true]);
    }

    #[test]
    fn test_select_with_blank_choice() {
        let field = FormField::select("parent", "Parent", &values(), Some("None"), [(1, "Stationery")]);
        assert_eq!(field.options.len(), 2);
        assert!(field.options[0].selected);
        assert_eq!(field.widget(), "select");
    }

    #[test]
    fn test_attach_errors() {
        let mut fields = vec![FormField::text("name", "Name", &values()).required()];
        let mut errors = ValidationErrors::new();
        errors.add("name", "is required");
        attach_errors(&mut fields, &errors);
        assert_eq!(fields[0].error.as_deref(), Some("is required"));
    }
}
