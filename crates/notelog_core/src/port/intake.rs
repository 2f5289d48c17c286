//! Tagged flat-array command decoding.
//!
//! Wire shape: `[tag, key[:type], value, key[:type], value, ...]`.
//! Supported type annotations are `number` and `string` (the default when no
//! annotation is given). Duplicate keys resolve to the last occurrence;
//! keys the command does not use are ignored.
//!
//! Example: `["UpdateNoteCommand", "id:number", "1", "text", "hi"]`.

use crate::model::command::{
    Command, NoteId, ADD_NOTE_TAG, DELETE_NOTE_TAG, PRINT_DECODED_EVENTS_TAG, SELECT_NOTE_TAG,
    UPDATE_NOTE_TAG,
};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TYPE_NUMBER: &str = "number";
const TYPE_STRING: &str = "string";

/// Boundary decode failure for one command array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The array has no tag.
    Empty,
    /// Tag is not one of the known commands.
    UnknownCommand(String),
    /// A key token has an empty name.
    EmptyFieldName,
    /// A key token is the last element and has no value.
    MissingValue { field: String },
    /// A key carries a type annotation other than `number`/`string`.
    UnsupportedFieldType { field: String, type_name: String },
    /// A `number` field does not hold a non-negative integer.
    InvalidNumber { field: String, value: String },
    /// The command requires a field that is absent.
    MissingField {
        command: &'static str,
        field: &'static str,
    },
    /// A field is present but declared with the wrong type.
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
    },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "command array is empty"),
            Self::UnknownCommand(tag) => write!(f, "unknown command `{tag}`"),
            Self::EmptyFieldName => write!(f, "field name cannot be empty"),
            Self::MissingValue { field } => write!(f, "field `{field}` has no value"),
            Self::UnsupportedFieldType { field, type_name } => {
                write!(f, "field `{field}` has unsupported type `{type_name}`")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "field `{field}` is not a valid number: `{value}`")
            }
            Self::MissingField { command, field } => {
                write!(f, "`{command}` requires field `{field}`")
            }
            Self::WrongFieldType { field, expected } => {
                write!(f, "field `{field}` must be of type `{expected}`")
            }
        }
    }
}

impl DecodeError {
    /// Stable, value-free label for diagnostics.
    ///
    /// Unlike `Display`, never includes field values or command tags taken
    /// from the wire, so it is safe to write to log files.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::UnknownCommand(_) => "unknown_command",
            Self::EmptyFieldName => "empty_field_name",
            Self::MissingValue { .. } => "missing_value",
            Self::UnsupportedFieldType { .. } => "unsupported_field_type",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::MissingField { .. } => "missing_field",
            Self::WrongFieldType { .. } => "wrong_field_type",
        }
    }
}

impl Error for DecodeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldValue {
    Number(NoteId),
    Text(String),
}

/// Decoded key/value pairs of one command.
#[derive(Debug, Default)]
struct Fields {
    values: BTreeMap<String, FieldValue>,
}

impl Fields {
    fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, DecodeError> {
        let mut values = BTreeMap::new();
        for pair in tokens.chunks(2) {
            let (name, type_name) = split_key(pair[0].as_ref());
            if name.is_empty() {
                return Err(DecodeError::EmptyFieldName);
            }
            let raw: &str = pair.get(1).map(|value| value.as_ref()).ok_or_else(|| {
                DecodeError::MissingValue {
                    field: name.to_string(),
                }
            })?;
            let value = match type_name {
                TYPE_NUMBER => FieldValue::Number(raw.trim().parse::<NoteId>().map_err(|_| {
                    DecodeError::InvalidNumber {
                        field: name.to_string(),
                        value: raw.to_string(),
                    }
                })?),
                TYPE_STRING => FieldValue::Text(raw.to_string()),
                other => {
                    return Err(DecodeError::UnsupportedFieldType {
                        field: name.to_string(),
                        type_name: other.to_string(),
                    })
                }
            };
            values.insert(name.to_string(), value);
        }
        Ok(Self { values })
    }

    fn number(&self, command: &'static str, field: &'static str) -> Result<NoteId, DecodeError> {
        match self.values.get(field) {
            Some(FieldValue::Number(value)) => Ok(*value),
            Some(FieldValue::Text(_)) => Err(DecodeError::WrongFieldType {
                field,
                expected: TYPE_NUMBER,
            }),
            None => Err(DecodeError::MissingField { command, field }),
        }
    }

    fn text(&self, command: &'static str, field: &'static str) -> Result<String, DecodeError> {
        match self.values.get(field) {
            Some(FieldValue::Text(value)) => Ok(value.clone()),
            Some(FieldValue::Number(_)) => Err(DecodeError::WrongFieldType {
                field,
                expected: TYPE_STRING,
            }),
            None => Err(DecodeError::MissingField { command, field }),
        }
    }
}

fn split_key(token: &str) -> (&str, &str) {
    match token.split_once(':') {
        Some((name, type_name)) => (name.trim(), type_name.trim()),
        None => (token.trim(), TYPE_STRING),
    }
}

/// Decodes one tagged flat array into a typed command.
///
/// # Errors
/// - `DecodeError::Empty` for an empty array.
/// - `DecodeError::UnknownCommand` when the tag is not recognized; field
///   tokens are not inspected in that case.
/// - Field-level variants when tokens are malformed or required fields are
///   missing.
pub fn decode_command<S: AsRef<str>>(tokens: &[S]) -> Result<Command, DecodeError> {
    let (tag, rest) = tokens.split_first().ok_or(DecodeError::Empty)?;
    let tag = tag.as_ref();
    if !Command::is_known_tag(tag) {
        return Err(DecodeError::UnknownCommand(tag.to_string()));
    }

    let fields = Fields::parse(rest)?;
    let command = match tag {
        ADD_NOTE_TAG => Command::AddNote,
        DELETE_NOTE_TAG => Command::DeleteNote {
            id: fields.number(DELETE_NOTE_TAG, "id")?,
        },
        SELECT_NOTE_TAG => Command::SelectNote {
            id: fields.number(SELECT_NOTE_TAG, "id")?,
        },
        UPDATE_NOTE_TAG => Command::UpdateNote {
            id: fields.number(UPDATE_NOTE_TAG, "id")?,
            text: fields.text(UPDATE_NOTE_TAG, "text")?,
        },
        PRINT_DECODED_EVENTS_TAG => Command::PrintDecodedEvents {
            event_names: fields.text(PRINT_DECODED_EVENTS_TAG, "eventNames")?,
        },
        other => return Err(DecodeError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}
