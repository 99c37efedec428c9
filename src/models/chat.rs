use serde::{ Serialize, Deserialize };
use serde_json::{ Map, Value };
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ChatRole::User),
            "assistant" => Some(ChatRole::Assistant),
            _ => None,
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// A validated chat request. Only [`ChatRequest::from_value`] builds one, so
/// `message` is always trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<ChatTurn>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// One failed field check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: Vec<PathSegment>,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: Vec<PathSegment>, code: &str, message: impl Into<String>) -> Self {
        Self { path, code: code.to_string(), message: message.into() }
    }

    /// True when the first path segment names `field`.
    pub fn concerns(&self, field: &str) -> bool {
        matches!(self.path.first(), Some(PathSegment::Key(k)) if k == field)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid_type(path: Vec<PathSegment>, expected: &str, received: Option<&Value>) -> FieldError {
    let message = match received {
        None => "Required".to_string(),
        Some(v) => format!("Expected {}, received {}", expected, type_name(v)),
    };
    FieldError::new(path, "invalid_type", message)
}

impl ChatRequest {
    /// Runs the field checks in order and collects every failure instead of
    /// stopping at the first one.
    pub fn from_value(body: &Value) -> Result<Self, Vec<FieldError>> {
        let obj = match body {
            Value::Object(obj) => obj,
            other => {
                return Err(vec![invalid_type(Vec::new(), "object", Some(other))]);
            }
        };

        let mut errors = Vec::new();
        let message = check_message(obj, &mut errors);
        let history = check_history(obj, &mut errors);

        match (message, history) {
            (Some(message), Some(conversation_history)) if errors.is_empty() => {
                Ok(Self { message, conversation_history })
            }
            _ => Err(errors),
        }
    }
}

fn check_message(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    let path = || vec![PathSegment::from("message")];
    match obj.get("message") {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.push(FieldError::new(path(), "too_small", "Message cannot be empty"));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        other => {
            errors.push(invalid_type(path(), "string", other));
            None
        }
    }
}

fn check_history(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<Vec<ChatTurn>> {
    const FIELD: &str = "conversationHistory";

    let items = match obj.get(FIELD) {
        None | Some(Value::Null) => {
            return Some(Vec::new());
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push(invalid_type(vec![FIELD.into()], "array", Some(other)));
            return None;
        }
    };

    let before = errors.len();
    let mut turns = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let turn = match item {
            Value::Object(turn) => turn,
            other => {
                errors.push(invalid_type(vec![FIELD.into(), i.into()], "object", Some(other)));
                continue;
            }
        };

        let role = match turn.get("role") {
            Some(Value::String(s)) => {
                let role = ChatRole::parse(s);
                if role.is_none() {
                    errors.push(
                        FieldError::new(
                            vec![FIELD.into(), i.into(), "role".into()],
                            "invalid_enum_value",
                            format!("Invalid enum value. Expected 'user' | 'assistant', received '{}'", s)
                        )
                    );
                }
                role
            }
            other => {
                errors.push(invalid_type(vec![FIELD.into(), i.into(), "role".into()], "string", other));
                None
            }
        };

        let content = match turn.get("content") {
            Some(Value::String(s)) => Some(s.clone()),
            other => {
                errors.push(
                    invalid_type(vec![FIELD.into(), i.into(), "content".into()], "string", other)
                );
                None
            }
        };

        if let (Some(role), Some(content)) = (role, content) {
            turns.push(ChatTurn { role, content });
        }
    }

    if errors.len() == before {
        Some(turns)
    } else {
        None
    }
}
