//! Todo record, transfer schemas, and payload validation.
//!
//! [`TodoItem`] is the persisted shape. [`TodoInput`] is the validated
//! request payload shared by create and update, and [`TodoResponse`] is
//! what goes back over the wire. Request bodies are validated explicitly
//! by [`TodoInput::from_json`] rather than by a derive, so every
//! rejection carries a tagged [`ValidationError`].

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Persisted todo entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Storage-assigned identifier; immutable after creation.
    pub id: i64,
    /// Short required title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
}

/// Validated fields accepted on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoInput {
    /// Required title.
    pub title: String,
    /// Optional description; absent and `null` both map to `None`.
    pub description: Option<String>,
    /// Completion flag; defaults to `false` when absent.
    pub completed: bool,
}

/// Payload for `POST /todos`.
pub type TodoCreate = TodoInput;

/// Payload for `PUT /todos/{id}`; replaces every mutable field.
pub type TodoUpdate = TodoInput;

/// Wire shape returned by every todo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoResponse {
    /// Record identifier.
    pub id: i64,
    /// Title as stored.
    pub title: String,
    /// Description as stored; serialized as `null` when absent.
    pub description: Option<String>,
    /// Completion flag as stored.
    pub completed: bool,
}

impl From<TodoItem> for TodoResponse {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            completed: item.completed,
        }
    }
}

/// Structural rejection of a request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not syntactically valid JSON.
    MalformedJson(String),
    /// Body is valid JSON but not an object.
    NotAnObject,
    /// A required field is absent.
    MissingField(&'static str),
    /// A field is present with an unexpected JSON type.
    WrongType {
        /// Offending field name.
        field: &'static str,
        /// Human-readable description of the accepted type.
        expected: &'static str,
    },
}

impl ValidationError {
    /// Whether the payload failed to parse at all, as opposed to parsing
    /// into the wrong shape.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedJson(_))
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson(msg) => write!(f, "malformed json: {msg}"),
            Self::NotAnObject => write!(f, "request body must be a json object"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::WrongType { field, expected } => {
                write!(f, "field `{field}` must be {expected}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl TodoInput {
    /// Construct an input with only a title set.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    /// Parse and validate a raw JSON request body.
    ///
    /// Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the body is not JSON, is not an
    /// object, lacks `title`, or carries a field of the wrong type.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| ValidationError::MalformedJson(err.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(ValidationError::NotAnObject);
        };
        Self::from_fields(&fields)
    }

    fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        let title = match fields.get("title") {
            Some(Value::String(title)) => title.clone(),
            None => return Err(ValidationError::MissingField("title")),
            Some(_) => {
                return Err(ValidationError::WrongType {
                    field: "title",
                    expected: "a string",
                })
            }
        };

        let description = match fields.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                return Err(ValidationError::WrongType {
                    field: "description",
                    expected: "a string or null",
                })
            }
        };

        let completed = match fields.get("completed") {
            None => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                return Err(ValidationError::WrongType {
                    field: "completed",
                    expected: "a boolean",
                })
            }
        };

        Ok(Self {
            title,
            description,
            completed,
        })
    }
}
