// SPDX-License-Identifier: MPL-2.0
//! Formatting of loaded messages through Fluent.

use crate::i18n::{Locale, Messages};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use std::fmt;
use tracing::warn;

/// Formats messages of one locale. Rebuilt whenever a new mapping commits.
pub struct Translator {
    locale: Locale,
    bundle: FluentBundle<FluentResource>,
}

impl Translator {
    pub fn new(locale: Locale, messages: &Messages) -> Self {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.language_identifier()]);
        bundle.set_use_isolating(false);

        for (key, template) in messages.iter() {
            if !is_identifier(key) {
                warn!(%locale, key, "skipping message with invalid identifier");
                continue;
            }
            if template.trim().is_empty() {
                warn!(%locale, key, "skipping message with empty template");
                continue;
            }
            match FluentResource::try_new(fluent_source(key, template)) {
                Ok(resource) => bundle.add_resource_overriding(resource),
                Err((_, errors)) => {
                    warn!(%locale, key, ?errors, "skipping message that failed to parse");
                }
            }
        }

        Self { locale, bundle }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn has(&self, key: &str) -> bool {
        self.bundle.has_message(key)
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    pub fn tr_with_args(&self, key: &str, args: &FluentArgs<'_>) -> String {
        self.format(key, Some(args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        if let Some(msg) = self.bundle.get_message(key) {
            if let Some(pattern) = msg.value() {
                let mut errors = vec![];
                let value = self.bundle.format_pattern(pattern, args, &mut errors);
                if errors.is_empty() {
                    return value.to_string();
                }
                warn!(locale = %self.locale, key, ?errors, "failed to format message");
            }
        }
        format!("MISSING: {}", key)
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Fluent identifiers: `[a-zA-Z][a-zA-Z0-9_-]*`.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// One Fluent message entry. Continuation lines are indented, and a line of
/// plain text starting with `*`, `[` or `.` is escaped as a string literal so
/// it is not read as a variant key or attribute. Lines inside a placeable
/// (e.g. select-expression variants) are left untouched.
fn fluent_source(key: &str, template: &str) -> String {
    let mut source = format!("{} = ", key);
    let mut depth = 0usize;
    let mut in_string = false;

    for (index, line) in template.split('\n').enumerate() {
        if index > 0 {
            source.push_str("\n    ");
            let body = line.trim_start();
            let indent = &line[..line.len() - body.len()];
            match body.chars().next() {
                Some(c @ ('*' | '[' | '.')) if depth == 0 => {
                    source.push_str(indent);
                    source.push_str(&format!("{{\"{}\"}}", c));
                    source.push_str(&body[c.len_utf8()..]);
                }
                _ => source.push_str(line),
            }
        } else {
            source.push_str(line);
        }
        track_placeables(line, &mut depth, &mut in_string);
    }

    source.push('\n');
    source
}

/// Updates placeable nesting depth across one line of pattern text.
fn track_placeables(line: &str, depth: &mut usize, in_string: &mut bool) {
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if *in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => *in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '{' => *depth += 1,
            '}' => *depth = depth.saturating_sub(1),
            '"' if *depth > 0 => *in_string = true,
            _ => {}
        }
    }
}
