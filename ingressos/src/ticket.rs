//! Ticket metadata and the text block encoded into the QR code.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

/// Ticket fields submitted to `POST /gerar_ingresso`.
///
/// Every field is documented as required, but none is enforced: a missing
/// or `null` field is rendered as `None` in the payload. Values that are not
/// strings are accepted as well.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TicketRequest {
    /// Ticket holder name
    #[schema(value_type = String, example = "Ana")]
    #[serde(default)]
    pub nome: Option<Value>,
    /// Event name
    #[schema(value_type = String, example = "Show")]
    #[serde(default)]
    pub evento: Option<Value>,
    /// Event date
    #[schema(value_type = String, example = "2024-01-01")]
    #[serde(default)]
    pub data: Option<Value>,
    /// Event time
    #[schema(value_type = String, example = "20:00")]
    #[serde(default)]
    pub hora: Option<Value>,
    /// Venue
    #[schema(value_type = String, example = "Arena")]
    #[serde(default)]
    pub local: Option<Value>,
}

impl TicketRequest {
    /// Build a request from plain strings.
    #[must_use]
    pub fn new(
        nome: impl Into<String>,
        evento: impl Into<String>,
        data: impl Into<String>,
        hora: impl Into<String>,
        local: impl Into<String>,
    ) -> Self {
        Self {
            nome: Some(Value::String(nome.into())),
            evento: Some(Value::String(evento.into())),
            data: Some(Value::String(data.into())),
            hora: Some(Value::String(hora.into())),
            local: Some(Value::String(local.into())),
        }
    }

    /// Newline-delimited text block that goes into the QR code.
    ///
    /// ```text
    /// Nome: {nome}
    /// Evento: {evento}
    /// Data: {data}
    /// Hora: {hora}
    /// Local: {local}
    /// ```
    #[must_use]
    pub fn payload(&self) -> String {
        format!(
            "Nome: {}\nEvento: {}\nData: {}\nHora: {}\nLocal: {}",
            Field(self.nome.as_ref()),
            Field(self.evento.as_ref()),
            Field(self.data.as_ref()),
            Field(self.hora.as_ref()),
            Field(self.local.as_ref()),
        )
    }
}

/// Display adapter for one ticket field.
///
/// Top-level strings are written verbatim; everything else uses [`Repr`].
struct Field<'a>(Option<&'a Value>);

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("None"),
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{}", Repr(other)),
        }
    }
}

/// Python-literal rendering of a JSON value: `None`, `True`/`False`,
/// quoted strings, `[a, b]` lists and `{'k': v}` dicts.
struct Repr<'a>(&'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Repr(item))?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ": {}", Repr(value))?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Single quotes unless the text holds a `'` and no `"`.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    write!(f, "{quote}")?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c if c.is_ascii_control() => write!(f, "\\x{:02x}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}
