use serde::Serialize;
use serde_json::{Number, Value};
use tyre_core_contact_contracts::{ContactSubmitRequest, ContactSubmitResult};

/// Contact form fields as sent by the browser.
///
/// Any json body is accepted. Missing fields and bodies that are not objects
/// yield empty fields, other values are converted to text the way a browser
/// script would stringify them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiContactRequest {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub message: String,
}

impl ApiContactRequest {
    pub fn from_json(body: &Value) -> Self {
        let field = |key: &str| body.get(key).map(form_text).unwrap_or_default();
        Self {
            name: field("name"),
            mobile: field("mobile"),
            email: field("email"),
            message: field("message"),
        }
    }
}

impl From<ApiContactRequest> for ContactSubmitRequest {
    fn from(value: ApiContactRequest) -> Self {
        Self {
            name: value.name,
            mobile: value.mobile,
            email: value.email,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactResponse {
    pub ok: bool,
    pub id: i64,
    pub saved: bool,
    pub email_sent: bool,
}

impl From<ContactSubmitResult> for ApiContactResponse {
    fn from(value: ContactSubmitResult) -> Self {
        Self {
            ok: true,
            id: *value.id,
            saved: value.saved,
            email_sent: value.email_sent,
        }
    }
}

/// Falsy values (`null`, `false`, `0`, `""`) become empty.
fn form_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        value => stringify(value),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => stringify_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => stringify(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".into(),
    }
}

fn stringify_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}
