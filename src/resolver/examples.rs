//! Usage examples shown next to resolved resources
//!
//! Examples are informational only. Anything that can't be worked out (an
//! unreadable file, a config that doesn't return an array literal) yields no
//! example rather than an error.

use crate::common::string_utils::{CaseType, change_case};
use crate::path_utils::strip_extension;
use crate::php::{command_name, first_returned_key};
use crate::source::DiscoveredFile;

const BLADE_EXTENSION: &str = ".blade.php";
const ANONYMOUS_COMPONENTS_DIR: &str = "components/";

fn read_source(path: &str) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::trace!(path, error = %e, "no example, file unreadable");
            None
        }
    }
}

/// `php artisan mail:send`
pub fn command(class_file: &str) -> Option<String> {
    let name = command_name(&read_source(class_file)?);
    if name.is_none() {
        tracing::trace!(path = class_file, "no example, command has no static signature");
    }
    name.map(|name| format!("php artisan {name}"))
}

/// `config('my_app1::mail.from');`
pub fn config(config_file: &str, config_name: &str) -> Option<String> {
    let key = first_returned_key(&read_source(config_file)?)?;
    Some(format!("config('{config_name}.{key}');"))
}

/// `__('my_app1::messages.welcome');`
///
/// The first directory of the wildcard remainder is the locale and is left out.
pub fn translation(namespace: &str, first_file: &DiscoveredFile) -> Option<String> {
    let key = first_returned_key(&read_source(&first_file.absolute_path)?)?;
    let remainder = first_file.wildcard_remainder.as_deref().unwrap_or("");
    let without_locale = remainder.split_once('/').map_or("", |(_, rest)| rest);
    let file = strip_extension(without_locale);
    Some(format!("__('{namespace}::{file}.{key}');"))
}

/// `<livewire:my-app1::counter />`
pub fn livewire(registered_name: &str) -> String {
    format!("<livewire:{registered_name} />")
}

/// One `<x-prefix::sub-dir.card />` line per member file, sorted.
pub fn view_components(prefix: &str, members: &[DiscoveredFile]) -> String {
    sorted_lines(members.iter().map(|file| {
        let path = strip_extension(file.wildcard_remainder.as_deref().unwrap_or(""));
        let name = change_case(&path.replace('/', "."), CaseType::Kebab).to_lowercase();
        format!("<x-{prefix}::{name} />")
    }))
}

/// One line per template, sorted.
///
/// Templates under `components/` are anonymous components and render as
/// `<x-namespace::button />`; everything else as `view('namespace::pages.home');`.
pub fn views(namespace: &str, members: &[DiscoveredFile]) -> String {
    sorted_lines(members.iter().map(|file| {
        let remainder = file.wildcard_remainder.as_deref().unwrap_or("");
        let path = match remainder.strip_suffix(BLADE_EXTENSION) {
            Some(stripped) => stripped.to_string(),
            None => strip_extension(remainder),
        };
        match path.strip_prefix(ANONYMOUS_COMPONENTS_DIR) {
            Some(component) => format!("<x-{namespace}::{} />", component.replace('/', ".")),
            None => format!("view('{namespace}::{}');", path.replace('/', ".")),
        }
    }))
}

fn sorted_lines(lines: impl Iterator<Item = String>) -> String {
    let mut lines: Vec<String> = lines.collect();
    lines.sort();
    lines.join("\n")
}
