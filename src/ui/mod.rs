//! Console presentation
//!
//! Everything printed by the CLI goes through here. Colours come from
//! `console` and switch off automatically when stdout is not a terminal.

pub mod table;

use console::Style;

pub use table::{GroupBy, Table, TableOptions};

/// Print tables, each preceded by its title
pub fn print_tables(tables: &[Table]) {
    let title_style = Style::new().bold().green();
    for table in tables {
        println!();
        if let Some(title) = &table.title {
            println!("{}", title_style.apply_to(title));
            println!();
        }
        println!("{}", table::render(table));
    }
    println!();
}

pub fn cache_status_line(cached: bool) -> String {
    format!(
        "autoreg cache status: {}",
        if cached { "CACHED" } else { "NOT CACHED" }
    )
}

pub fn print_warning(message: &str) {
    println!("{}", Style::new().yellow().apply_to(message));
}

pub fn print_success(message: &str) {
    println!("{}", Style::new().green().apply_to(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_status_line() {
        assert_eq!(cache_status_line(true), "autoreg cache status: CACHED");
        assert_eq!(cache_status_line(false), "autoreg cache status: NOT CACHED");
    }
}
