use bugline_core::PRODUCT_CATALOG;
use serde::Serialize;

/// Callback identifier correlating a submitted dialog with the report form.
pub const REPORT_BUG_CALLBACK_ID: &str = "report-bug";

/// Body of a `dialog.open` call: the one-time trigger plus the form to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DialogOpenRequest {
    pub trigger_id: String,
    pub dialog: Dialog,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dialog {
    pub title: String,
    pub callback_id: String,
    pub submit_label: String,
    pub elements: Vec<DialogElement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    Textarea,
    Select,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DialogElement {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl DialogElement {
    pub fn text(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ElementKind::Text, label, name)
    }

    pub fn textarea(label: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ElementKind::Textarea, label, name)
    }

    pub fn select(
        label: impl Into<String>,
        name: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        let mut element = Self::new(ElementKind::Select, label, name);
        element.options = options;
        element
    }

    fn new(kind: ElementKind, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            name: name.into(),
            value: None,
            hint: None,
            options: Vec::new(),
            optional: false,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// The fixed bug-report form: a summary text input seeded with the slash
/// command's free text, the five-product selector, and an optional details
/// textarea.
pub fn bug_report_dialog(summary_prefill: &str) -> Dialog {
    Dialog {
        title: "Report a Bug".to_owned(),
        callback_id: REPORT_BUG_CALLBACK_ID.to_owned(),
        submit_label: "Submit".to_owned(),
        elements: vec![
            DialogElement::text("Summarise the Problem", "summary")
                .value(summary_prefill)
                .hint("A sentence to summarise the problem"),
            DialogElement::select("Product", "product", product_options()),
            DialogElement::textarea("Any more details?", "details")
                .hint("If you can help us reproduce the bug, that'd be grand.")
                .optional(),
        ],
    }
}

fn product_options() -> Vec<SelectOption> {
    PRODUCT_CATALOG
        .iter()
        .map(|(label, value)| SelectOption {
            label: (*label).to_owned(),
            value: (*value).to_owned(),
        })
        .collect()
}
