use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn print_text(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

/// Bold title, then one indented line per item, or `(none)`
pub fn print_list<F>(title: &str, items: &[Value], line: F) -> io::Result<()>
where
    F: Fn(&Value) -> String,
{
    let mut out = io::stdout().lock();
    writeln!(out, "{}", title.bold())?;

    if items.is_empty() {
        return writeln!(out, "  (none)");
    }

    for item in items {
        writeln!(out, "  {}", line(item))?;
    }
    Ok(())
}

/// String field of a JSON object, `fallback` if absent
pub fn field<'a>(item: &'a Value, key: &str, fallback: &'a str) -> &'a str {
    item[key].as_str().unwrap_or(fallback)
}
