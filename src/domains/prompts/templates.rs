//! Prompt templates module.
//!
//! A small `{{variable}}` renderer with `{{#if variable}}...{{else}}...{{/if}}`
//! blocks. Blocks do not nest.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;
use crate::domains::schema::PromptDescriptor;

const IF_OPEN: &str = "{{#if ";
const ELSE_TAG: &str = "{{else}}";
const ENDIF_TAG: &str = "{{/if}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// Body with placeholders; `None` renders a default body.
    pub template: Option<String>,
}

impl PromptTemplate {
    pub fn from_descriptor(descriptor: PromptDescriptor) -> Self {
        let arguments = descriptor
            .arguments
            .into_iter()
            .map(|arg| PromptArgument {
                name: arg.name,
                title: None,
                description: arg.description,
                required: Some(arg.required),
            })
            .collect();

        Self {
            name: descriptor.name,
            description: descriptor.description,
            arguments,
            template: descriptor.template,
        }
    }

    /// Names of the arguments marked required.
    pub fn required_arguments(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .filter(|arg| arg.required.unwrap_or(false))
            .map(|arg| arg.name.as_str())
    }

    /// Render the template with the given arguments.
    ///
    /// An argument counts as set when it is present and non-empty. Unknown
    /// placeholders render as nothing.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let Some(template) = &self.template else {
            return Ok(self.default_body(arguments));
        };

        let mut result = process_conditionals(template, arguments)?;

        for (key, value) in arguments {
            result = result.replace(&format!("{{{{{key}}}}}"), value);
        }

        Ok(clean_unmatched_placeholders(&result))
    }

    fn default_body(&self, arguments: &HashMap<String, String>) -> String {
        let mut body = format!("Run the {} prompt.", self.name);
        for arg in &self.arguments {
            if let Some(value) = arguments.get(&arg.name).filter(|v| !v.is_empty()) {
                body.push_str(&format!("\n{}: {}", arg.name, value));
            }
        }
        body
    }
}

fn process_conditionals(
    template: &str,
    arguments: &HashMap<String, String>,
) -> Result<String, PromptError> {
    let mut result = template.to_string();

    while let Some(if_start) = result.find(IF_OPEN) {
        let var_end = result[if_start..]
            .find("}}")
            .map(|offset| if_start + offset)
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
        let var_name = result[if_start + IF_OPEN.len()..var_end].trim();

        let endif_pos = result[var_end..]
            .find(ENDIF_TAG)
            .map(|offset| var_end + offset)
            .ok_or_else(|| PromptError::template("Missing {{/if}} tag"))?;

        let block = &result[var_end + 2..endif_pos];
        let (when_set, when_unset) = block.split_once(ELSE_TAG).unwrap_or((block, ""));

        let is_set = arguments.get(var_name).is_some_and(|v| !v.is_empty());
        let replacement = if is_set { when_set } else { when_unset };

        result = format!(
            "{}{}{}",
            &result[..if_start],
            replacement,
            &result[endif_pos + ENDIF_TAG.len()..]
        );
    }

    Ok(result)
}

fn clean_unmatched_placeholders(template: &str) -> String {
    let mut result = template.to_string();
    let mut start = 0;

    while let Some(pos) = result[start..].find("{{") {
        let abs_pos = start + pos;
        if let Some(end_pos) = result[abs_pos..].find("}}") {
            let end_abs = abs_pos + end_pos + 2;
            let placeholder = &result[abs_pos..end_abs];

            if !placeholder.contains('#') && !placeholder.contains('/') {
                result.replace_range(abs_pos..end_abs, "");
                continue;
            }
        }
        start = abs_pos + 2;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(body: &str) -> PromptTemplate {
        PromptTemplate {
            name: "test".to_string(),
            description: None,
            arguments: vec![],
            template: Some(body.to_string()),
        }
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let result = template("Analyze {{symbol}}.")
            .render(&args(&[("symbol", "AAPL")]))
            .unwrap();
        assert_eq!(result, "Analyze AAPL.");
    }

    #[test]
    fn test_conditional_with_value() {
        let result = template("Analyze {{symbol}}{{#if focus}} for {{focus}}{{/if}}.")
            .render(&args(&[("symbol", "AAPL"), ("focus", "valuation")]))
            .unwrap();
        assert_eq!(result, "Analyze AAPL for valuation.");
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let result = template("Analyze{{#if focus}} {{focus}}{{else}} everything{{/if}}.")
            .render(&args(&[("focus", "")]))
            .unwrap();
        assert_eq!(result, "Analyze everything.");
    }

    #[test]
    fn test_unmatched_placeholder_is_removed() {
        let result = template("Compare {{symbol_a}} and {{symbol_b}}")
            .render(&args(&[("symbol_a", "AAPL")]))
            .unwrap();
        assert_eq!(result, "Compare AAPL and ");
    }

    #[test]
    fn test_missing_endif() {
        let err = template("{{#if focus}}dangling")
            .render(&HashMap::new())
            .unwrap_err();
        assert!(matches!(err, PromptError::TemplateError(_)));
    }

    #[test]
    fn test_default_body_without_template() {
        let prompt = PromptTemplate {
            template: None,
            arguments: vec![PromptArgument {
                name: "symbol".to_string(),
                title: None,
                description: None,
                required: Some(true),
            }],
            ..template("")
        };

        let result = prompt.render(&args(&[("symbol", "MSFT")])).unwrap();
        assert_eq!(result, "Run the test prompt.\nsymbol: MSFT");
    }
}
