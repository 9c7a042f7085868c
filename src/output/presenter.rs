use std::borrow::Cow;
use std::io::{self, Write};

use serde_json::Value;

use crate::types::SearchResult;

const HEADER: &str = "------- Nuevo resultado -------";
const FOOTER: &str = "-------------------------------";

fn field(value: &Option<Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed("None"),
        Some(Value::String(text)) => Cow::Borrowed(text),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Prints one block per result, in order.
pub fn display_results<W: Write>(out: &mut W, results: &[SearchResult]) -> io::Result<()> {
    for result in results {
        writeln!(out, "{}", HEADER)?;
        writeln!(out, "Título: {}", field(&result.title))?;
        writeln!(out, "Descripción: {}", field(&result.snippet))?;
        writeln!(out, "Enlace: {}", field(&result.link))?;
        writeln!(out, "{}", FOOTER)?;
    }
    Ok(())
}
