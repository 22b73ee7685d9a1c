//! Meta-row tables for `autoreg list`
//!
//! Rows are sorted by source, app, type and path, filtered, then split into
//! one table per group. Columns that carry nothing are dropped: the grouped
//! column (it is the table title), the example column when no row has an
//! example or examples are hidden, and the source column when no row has one.

use console::{Style, measure_text_width};
use indexmap::IndexMap;

use crate::context::MetaRow;
use crate::resolver::ResourceKind;

/// What to split tables by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Source,
    App,
    Type,
    None,
}

impl GroupBy {
    fn title_label(self) -> &'static str {
        match self {
            GroupBy::Source => "Source",
            GroupBy::App => "App",
            GroupBy::Type => "File type",
            GroupBy::None => "",
        }
    }

    fn key(self, row: &MetaRow) -> Option<String> {
        match self {
            GroupBy::Source => Some(row.source.clone()),
            GroupBy::App => Some(row.app.clone().unwrap_or_default()),
            GroupBy::Type => Some(row.kind.to_string()),
            GroupBy::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Source,
    App,
    Type,
    Path,
    Example,
}

impl Column {
    const ALL: [Column; 5] = [
        Column::Source,
        Column::App,
        Column::Type,
        Column::Path,
        Column::Example,
    ];

    fn header(self) -> &'static str {
        match self {
            Column::Source => "Source",
            Column::App => "App",
            Column::Type => "Type",
            Column::Path => "File / directory",
            Column::Example => "Usage example",
        }
    }

    fn cell(self, row: &MetaRow) -> String {
        match self {
            Column::Source => row.source.clone(),
            Column::App => row.app.clone().unwrap_or_default(),
            Column::Type => row.kind.to_string(),
            Column::Path => row.path.clone(),
            Column::Example => row.example.clone().unwrap_or_default(),
        }
    }

    fn grouped_by(self, group_by: GroupBy) -> bool {
        matches!(
            (self, group_by),
            (Column::Source, GroupBy::Source)
                | (Column::App, GroupBy::App)
                | (Column::Type, GroupBy::Type)
        )
    }
}

/// Row selection and layout for the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub sources: Vec<String>,
    pub apps: Vec<String>,
    pub types: Vec<ResourceKind>,
    pub group_by: GroupBy,
    pub show_examples: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            apps: Vec::new(),
            types: Vec::new(),
            group_by: GroupBy::Source,
            show_examples: true,
        }
    }
}

impl TableOptions {
    fn accepts(&self, row: &MetaRow) -> bool {
        (self.sources.is_empty() || self.sources.contains(&row.source))
            && (self.apps.is_empty()
                || row.app.as_ref().is_some_and(|app| self.apps.contains(app)))
            && (self.types.is_empty() || self.types.contains(&row.kind))
    }
}

/// One rendered group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Meta rows passing the filters, in display order
pub fn select_rows<'a>(
    meta: &'a IndexMap<ResourceKind, Vec<MetaRow>>,
    options: &TableOptions,
) -> Vec<&'a MetaRow> {
    let mut rows: Vec<&MetaRow> = meta
        .values()
        .flatten()
        .filter(|row| options.accepts(row))
        .collect();
    rows.sort_by(|a, b| {
        (&a.source, &a.app, a.kind.as_str(), &a.path).cmp(&(
            &b.source,
            &b.app,
            b.kind.as_str(),
            &b.path,
        ))
    });
    rows
}

/// Build the tables to show
pub fn generate_tables(
    meta: &IndexMap<ResourceKind, Vec<MetaRow>>,
    options: &TableOptions,
) -> Vec<Table> {
    let mut groups: IndexMap<Option<String>, Vec<&MetaRow>> = IndexMap::new();
    for row in select_rows(meta, options) {
        groups.entry(options.group_by.key(row)).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(key, rows)| build_table(key, &rows, options))
        .collect()
}

fn build_table(key: Option<String>, rows: &[&MetaRow], options: &TableOptions) -> Table {
    let has_examples = rows.iter().any(|row| row.example.as_deref().is_some_and(|e| !e.is_empty()));
    let has_sources = rows.iter().any(|row| !row.source.is_empty());

    let columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|column| !column.grouped_by(options.group_by))
        .filter(|column| *column != Column::Example || (options.show_examples && has_examples))
        .filter(|column| *column != Column::Source || has_sources)
        .collect();

    Table {
        title: key.map(|key| format!("{}: {key}", options.group_by.title_label())),
        headers: columns.iter().map(|c| c.header().to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| columns.iter().map(|c| c.cell(row)).collect())
            .collect(),
    }
}

/// Render a table as boxed text. Cells may span several lines.
pub fn render(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| measure_text_width(h)).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            let widest = cell.lines().map(measure_text_width).max().unwrap_or(0);
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(widest);
            }
        }
    }

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let header_style = Style::new().green();
    let mut out = Vec::new();
    out.push(border.clone());
    out.push(render_line(&table.headers, &widths, Some(&header_style)));
    out.push(border.clone());
    for row in &table.rows {
        let height = row.iter().map(|cell| cell.lines().count().max(1)).max().unwrap_or(1);
        for line in 0..height {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.lines().nth(line).unwrap_or("").to_string())
                .collect();
            out.push(render_line(&cells, &widths, None));
        }
    }
    out.push(border);
    out.join("\n")
}

fn render_line(cells: &[String], widths: &[usize], style: Option<&Style>) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = " ".repeat(width.saturating_sub(measure_text_width(cell)));
            match style {
                Some(style) => format!(" {}{padding} ", style.apply_to(cell)),
                None => format!(" {cell}{padding} "),
            }
        })
        .collect();
    format!("|{}|", parts.join("|"))
}
