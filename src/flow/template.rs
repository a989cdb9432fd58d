use serde_json::Value;

use crate::error::{MindflowError, Result};

/// Minimal prompt template: `{{field}}` substitution, `{{#if field}}...{{/if}}`
/// conditional blocks and `{{#each field}}...{{/each}}` iteration. Inside an
/// `each` block, `{{this}}` is the current element and bare names resolve
/// against the element before falling back to the root input.
///
/// Rendering is pure and deterministic; there is no other control flow.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Text(String),
    Var(String),
    If { field: String, body: Vec<Segment> },
    Each { field: String, body: Vec<Segment> },
}

impl PromptTemplate {
    pub fn parse(source: &str) -> Result<Self> {
        let mut cursor = 0;
        let segments = parse_block(source, &mut cursor, None)?;
        Ok(Self { segments })
    }

    pub fn render(&self, input: &Value) -> String {
        let mut out = String::new();
        render_segments(&self.segments, input, None, &mut out);
        out
    }
}

fn parse_block(
    source: &str,
    cursor: &mut usize,
    terminator: Option<&str>,
) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();

    loop {
        let rest = &source[*cursor..];
        let Some(open) = rest.find("{{") else {
            if let Some(tag) = terminator {
                return Err(MindflowError::Template(format!(
                    "missing closing tag `{{{{{}}}}}`",
                    tag
                )));
            }
            if !rest.is_empty() {
                segments.push(Segment::Text(rest.to_string()));
            }
            *cursor = source.len();
            return Ok(segments);
        };

        if open > 0 {
            segments.push(Segment::Text(rest[..open].to_string()));
        }

        let tag_start = open + 2;
        let close = rest[tag_start..].find("}}").ok_or_else(|| {
            MindflowError::Template("unterminated `{{` in template".to_string())
        })?;
        let tag = rest[tag_start..tag_start + close].trim();
        *cursor += tag_start + close + 2;

        if let Some(field) = tag.strip_prefix("#if ") {
            let body = parse_block(source, cursor, Some("/if"))?;
            segments.push(Segment::If {
                field: field.trim().to_string(),
                body,
            });
        } else if let Some(field) = tag.strip_prefix("#each ") {
            let body = parse_block(source, cursor, Some("/each"))?;
            segments.push(Segment::Each {
                field: field.trim().to_string(),
                body,
            });
        } else if tag == "/if" || tag == "/each" {
            if terminator == Some(tag) {
                return Ok(segments);
            }
            return Err(MindflowError::Template(format!(
                "unexpected closing tag `{{{{{}}}}}`",
                tag
            )));
        } else if tag.is_empty() {
            return Err(MindflowError::Template("empty tag in template".to_string()));
        } else {
            segments.push(Segment::Var(tag.to_string()));
        }
    }
}

fn render_segments(segments: &[Segment], root: &Value, scope: Option<&Value>, out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Var(path) => out.push_str(&render_value(resolve(path, root, scope))),
            Segment::If { field, body } => {
                if is_truthy(resolve(field, root, scope)) {
                    render_segments(body, root, scope, out);
                }
            }
            Segment::Each { field, body } => {
                if let Some(Value::Array(items)) = resolve(field, root, scope) {
                    for item in items {
                        render_segments(body, root, Some(item), out);
                    }
                }
            }
        }
    }
}

fn resolve<'a>(path: &str, root: &'a Value, scope: Option<&'a Value>) -> Option<&'a Value> {
    if path == "this" {
        return scope.or(Some(root));
    }
    if let Some(item) = scope {
        if let Some(found) = lookup(path, item) {
            return Some(found);
        }
    }
    lookup(path, root)
}

fn lookup<'a>(path: &str, value: &'a Value) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Number(_)) | Some(Value::Object(_)) => true,
    }
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
