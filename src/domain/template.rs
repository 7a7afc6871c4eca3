//! Placeholder expansion for command templates
//!
//! - `{}`  output of the previous command
//! - `{N}` N-th script argument, `{0}` being the script path
//! - `{@}` all script arguments, space separated

use regex::Regex;

use crate::domain::entities::CommandTemplate;
use crate::domain::error::DomainError;

/// Values available to placeholders while a script runs.
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    pub previous: &'a str,
    pub script_path: &'a str,
    pub args: &'a [String],
}

impl<'a> Bindings<'a> {
    fn arg(&self, index: usize) -> Option<&'a str> {
        match index {
            0 => Some(self.script_path),
            n => self.args.get(n - 1).map(String::as_str),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateExpander {
    placeholder: Regex,
}

impl Default for TemplateExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateExpander {
    pub fn new() -> Self {
        Self {
            placeholder: Regex::new(r"\{(\d{1,4}|@)?\}").unwrap(),
        }
    }

    /// Substitute all placeholders in `template`.
    pub fn expand(
        &self,
        template: &CommandTemplate,
        bindings: &Bindings<'_>,
    ) -> Result<String, DomainError> {
        let text = template.text.as_str();
        let mut expanded = String::with_capacity(text.len());
        let mut last = 0;

        for caps in self.placeholder.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            expanded.push_str(&text[last..whole.start()]);

            match caps.get(1).map(|m| m.as_str()) {
                None => expanded.push_str(bindings.previous),
                Some("@") => expanded.push_str(&bindings.args.join(" ")),
                Some(digits) => {
                    // at most four digits, always fits
                    let index: usize = digits.parse().unwrap_or_default();
                    let value = bindings.arg(index).ok_or(DomainError::MissingArgument {
                        index,
                        line: template.line,
                    })?;
                    expanded.push_str(value);
                }
            }
            last = whole.end();
        }

        expanded.push_str(&text[last..]);
        Ok(expanded)
    }
}
