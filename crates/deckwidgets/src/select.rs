use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct OptionValue(String);

crate::impl_string_newtype!(OptionValue);

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: OptionValue,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: OptionValue::new(value),
            label: label.into(),
        }
    }
}

/// A selected entry as shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub value: OptionValue,
    pub label: String,
}

/// Multi-select dropdown state.
///
/// Selection order is insertion order and entries are unique. External
/// seeding through [`MultiSelect::set_selected`] replaces the selection
/// without counting as a user change.
#[derive(Debug, Clone, Default)]
pub struct MultiSelect {
    options: Vec<SelectOption>,
    selected: Vec<OptionValue>,
    open: bool,
    disabled: bool,
}

impl MultiSelect {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &[OptionValue] {
        &self.selected
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_selected(&self, value: &OptionValue) -> bool {
        self.selected.contains(value)
    }

    pub fn toggle_open(&mut self) -> bool {
        if !self.disabled {
            self.open = !self.open;
        }
        self.open
    }

    /// Returns `true` if the dropdown was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.open = false;
        }
    }

    pub fn toggle_option(&mut self, value: &OptionValue) -> &[OptionValue] {
        if let Some(pos) = self.selected.iter().position(|v| v == value) {
            self.selected.remove(pos);
        } else {
            self.selected.push(value.clone());
        }
        &self.selected
    }

    /// Returns `true` if the entry was present.
    pub fn remove(&mut self, value: &OptionValue) -> bool {
        let before = self.selected.len();
        self.selected.retain(|v| v != value);
        self.selected.len() != before
    }

    pub fn set_selected(&mut self, values: impl IntoIterator<Item = OptionValue>) {
        self.selected.clear();
        for value in values {
            if !self.selected.contains(&value) {
                self.selected.push(value);
            }
        }
    }

    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
    }

    /// Unknown values fall back to the raw value as their label.
    pub fn chips(&self) -> Vec<Chip> {
        self.selected
            .iter()
            .map(|value| Chip {
                value: value.clone(),
                label: self
                    .options
                    .iter()
                    .find(|o| &o.value == value)
                    .map(|o| o.label.clone())
                    .unwrap_or_else(|| value.to_string()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> OptionValue {
        OptionValue::new(s)
    }

    fn sources() -> MultiSelect {
        MultiSelect::new(vec![
            SelectOption::new("hdmi", "HDMI"),
            SelectOption::new("laptop", "Laptop"),
            SelectOption::new("cast", "Screen cast"),
        ])
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut select = sources();
        assert_eq!(select.toggle_option(&v("laptop")), &[v("laptop")]);
        assert_eq!(
            select.toggle_option(&v("hdmi")),
            &[v("laptop"), v("hdmi")]
        );
        assert_eq!(select.toggle_option(&v("laptop")), &[v("hdmi")]);
    }

    #[test]
    fn test_remove_chip() {
        let mut select = sources();
        select.set_selected([v("cast"), v("hdmi")]);
        assert!(select.remove(&v("cast")));
        assert!(!select.remove(&v("cast")));
        assert_eq!(select.selected(), &[v("hdmi")]);
    }

    #[test]
    fn test_external_seed_dedups_and_keeps_order() {
        let mut select = sources();
        select.toggle_option(&v("hdmi"));
        select.set_selected([v("cast"), v("laptop"), v("cast")]);
        assert_eq!(select.selected(), &[v("cast"), v("laptop")]);
        assert!(select.is_selected(&v("laptop")));
        assert!(!select.is_selected(&v("hdmi")));
    }

    #[test]
    fn test_open_close_and_disabled() {
        let mut select = sources();
        assert!(select.toggle_open());
        assert!(select.close());
        assert!(!select.close());

        select.toggle_open();
        select.set_disabled(true);
        assert!(!select.is_open());
        assert!(!select.toggle_open());
    }

    #[test]
    fn test_chip_labels_fall_back_to_value() {
        let mut select = sources();
        select.set_selected([v("laptop"), v("vga")]);
        let labels: Vec<_> = select.chips().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Laptop", "vga"]);
    }

    #[test]
    fn test_option_deserialization() {
        let json = r#"{"value": "hdmi", "label": "HDMI"}"#;
        let option: SelectOption = serde_json::from_str(json).unwrap();
        assert_eq!(option, SelectOption::new("hdmi", "HDMI"));
    }
}
