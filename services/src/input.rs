use std::collections::HashMap;

/// Raw request parameters submitted with a grading form.
///
/// `None` means the field was not part of the submitted form at all, which is
/// different from `Some("")` (the field was present and cleared).
pub trait RawInput: Send + Sync {
    fn raw_param(&self, name: &str) -> Option<&str>;
}

impl RawInput for HashMap<String, String> {
    fn raw_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Input source for requests that carry no form data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl RawInput for NoInput {
    fn raw_param(&self, _name: &str) -> Option<&str> {
        None
    }
}
