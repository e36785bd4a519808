//! Helpers for rendering command output.

use std::fmt::Display;
use std::io::Write;

use eyre::{Context, Result};
use serde::Serialize;

pub(crate) fn write_line(writer: &mut dyn Write, value: impl Display) -> Result<()> {
    writeln!(writer, "{value}").wrap_err("failed to write command output")
}

pub(crate) fn write_names(writer: &mut dyn Write, names: &[&str]) -> Result<()> {
    names.iter().try_for_each(|name| {
        writeln!(writer, "{name}").wrap_err_with(|| format!("failed to write selected name '{name}'"))
    })
}

pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    serde_json::to_writer(&mut *writer, value).wrap_err("failed to serialise output to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}
