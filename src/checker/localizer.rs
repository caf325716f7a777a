//! Message rendering by rule id.

use std::collections::HashMap;

/// Renders the message for a rule id with positional arguments.
pub trait Localizer: Send + Sync {
    fn localize(&self, id: &str, args: &[String]) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str, &[String]) -> String + Send + Sync,
{
    fn localize(&self, id: &str, args: &[String]) -> String {
        self(id, args)
    }
}

/// A table of `%s` templates keyed by id.
///
/// Unknown ids render as the id itself.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English messages for every rule, plus the words used by the
    /// line renderers.
    #[must_use]
    pub fn english() -> Self {
        let mut catalog = Self::new();
        catalog.insert("at", "at");
        catalog.insert("in", "in");
        for (id, template) in super::rules::messages() {
            catalog.insert(id, template);
        }
        catalog
    }

    pub fn insert(&mut self, id: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(id.into(), template.into());
    }

    #[must_use]
    pub fn template(&self, id: &str) -> Option<&str> {
        self.messages.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Localizer for MessageCatalog {
    fn localize(&self, id: &str, args: &[String]) -> String {
        match self.messages.get(id) {
            Some(template) => substitute(template, args),
            None => id.to_string(),
        }
    }
}

/// Replace each `%s` with the next argument; surplus placeholders stay.
fn substitute(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("%s") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("%s"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
