//! `qudom parse`: show the descriptor for one identifier.

use anyhow::{Context, Result};

use qudom_core::{diagnose, BuildOptions, Descriptor, Parser};
use qudom_logging::{BuildEvent, EventLogger};

use crate::terminal_output::{note_error, render_table, Column};

pub fn run(identifier: &str, options: &BuildOptions, as_table: bool) -> Result<()> {
    let parser = Parser::new().with_default_tag(options.default_tag.clone());

    let descriptor = if options.strict {
        match parser.parse_strict(identifier) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                for problem in diagnose(identifier) {
                    note_error(&problem.to_string());
                }
                EventLogger::log_event("cli", BuildEvent::Failed { error: e.to_string() });
                return Err(e).with_context(|| format!("Invalid identifier {identifier:?}"));
            }
        }
    } else {
        parser.parse(identifier)
    };

    EventLogger::log_event(
        "cli",
        BuildEvent::IdentifierParsed {
            identifier: identifier.to_string(),
            tag: descriptor.tag.clone(),
        },
    );

    if as_table {
        let columns = [Column::left("Field"), Column::left("Value")];
        print!("{}", render_table(&columns, &descriptor_rows(&descriptor)));
    } else {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
    }
    Ok(())
}

/// One `[field, value]` row per descriptor field.
pub fn descriptor_rows(descriptor: &Descriptor) -> Vec<Vec<String>> {
    let attributes = descriptor
        .attributes
        .iter()
        .map(|(key, value)| {
            if value.is_flag() {
                key.clone()
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    [
        ("tag", descriptor.tag.clone()),
        ("id", descriptor.id.clone()),
        ("classes", descriptor.class_list()),
        ("attributes", attributes),
        ("styles", descriptor.style_text()),
        ("content", descriptor.content.clone()),
    ]
    .into_iter()
    .map(|(field, value)| vec![field.to_string(), value])
    .collect()
}
