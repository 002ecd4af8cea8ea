// src/fetch/table.rs

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use std::cmp::Reverse;
use tracing::{debug, info, warn};

use crate::process::raw_table::RawRow;
use crate::process::utils::{collapse_ws, strip_notes};

static SORTABLE_TABLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.sortable").expect("CSS selector for sortable tables should be valid")
});
static ANY_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("CSS selector for tables should be valid"));

/// Upper bound on `rowspan`/`colspan`, so a broken attribute can't blow up the grid.
const MAX_SPAN: usize = 1_000;

/// Pick the table to scrape: the first one tagged `sortable`, else the
/// table with the most rows anywhere in the document (first one on ties).
pub fn locate_table(doc: &Html) -> Option<ElementRef<'_>> {
    if let Some(table) = doc.select(&SORTABLE_TABLE).next() {
        debug!("found sortable table");
        return Some(table);
    }

    warn!("no sortable table, falling back to the largest table");
    doc.select(&ANY_TABLE)
        .enumerate()
        .max_by_key(|(i, t)| (table_rows(*t).len(), Reverse(*i)))
        .map(|(_, t)| t)
}

/// Parse `html`, locate the table and turn its body into column-keyed rows.
///
/// Fails when the page has no table at all or the located table has no
/// data rows.
pub fn extract_rows(html: &str) -> Result<Vec<RawRow>> {
    let doc = Html::parse_document(html);
    let Some(table) = locate_table(&doc) else {
        bail!("no table found in page");
    };

    let rows = table_to_rows(table);
    if rows.is_empty() {
        bail!("located table has no data rows");
    }
    info!(rows = rows.len(), "extracted table rows");
    Ok(rows)
}

/// Convert one `<table>` into `RawRow`s.
///
/// Leading rows made only of `<th>` cells are headers; the topmost
/// non-empty header text names each column. Spans are expanded so every
/// row has a value per column, and cells that share a label are joined
/// with ", ".
pub fn table_to_rows(table: ElementRef<'_>) -> Vec<RawRow> {
    let trs = table_rows(table);
    let header_count = trs.iter().take_while(|tr| is_header_row(**tr)).count();
    let grid = expand_spans(&trs);
    let (headers, body) = grid.split_at(header_count);

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let labels: Vec<String> = (0..width)
        .map(|col| {
            headers
                .iter()
                .filter_map(|row| row.get(col))
                .map(|text| strip_notes(text))
                .map(|text| collapse_ws(&text))
                .find(|text| !text.is_empty())
                .unwrap_or_else(|| col.to_string())
        })
        .collect();
    debug!(?labels, header_rows = header_count, "table header");

    body.iter()
        .filter(|cells| !cells.is_empty())
        .map(|cells| {
            let mut row = RawRow::new();
            for (label, text) in labels.iter().zip(cells) {
                row.insert(label, text);
            }
            row
        })
        .collect()
}

/// Direct `<tr>` children of the table, looking through `thead`/`tbody`/`tfoot`
/// but never into nested tables.
fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn row_cells(tr: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
}

fn is_header_row(tr: ElementRef<'_>) -> bool {
    let mut cells = row_cells(tr).peekable();
    cells.peek().is_some() && cells.all(|c| c.value().name() == "th")
}

fn span_attr(cell: ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

/// Lay the rows out on a grid, repeating `colspan` cells across columns
/// and carrying `rowspan` cells down into the rows below.
fn expand_spans(trs: &[ElementRef<'_>]) -> Vec<Vec<String>> {
    // per column: (text, rows still to fill)
    let mut carried: Vec<Option<(String, usize)>> = Vec::new();
    let mut grid = Vec::with_capacity(trs.len());

    for tr in trs {
        let mut out: Vec<String> = Vec::new();
        let mut cells = row_cells(*tr);

        loop {
            let col = out.len();
            if let Some(Some((text, left))) = carried.get_mut(col) {
                out.push(text.clone());
                *left -= 1;
                if *left == 0 {
                    carried[col] = None;
                }
                continue;
            }

            let Some(cell) = cells.next() else {
                // trailing columns still covered by a rowspan from above
                if carried.iter().skip(col).any(Option::is_some) {
                    out.push(String::new());
                    continue;
                }
                break;
            };

            let text = cell_text(cell);
            let colspan = span_attr(cell, "colspan");
            let rowspan = span_attr(cell, "rowspan");
            for _ in 0..colspan {
                let col = out.len();
                if rowspan > 1 {
                    if carried.len() <= col {
                        carried.resize(col + 1, None);
                    }
                    carried[col] = Some((text.clone(), rowspan - 1));
                }
                out.push(text.clone());
            }
        }

        grid.push(out);
    }
    grid
}

/// Visible text of a cell with line breaks turned into spaces and
/// whitespace collapsed.
fn cell_text(cell: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if matches!(el.name(), "br" | "li" | "p" | "div") => out.push(' '),
            _ => {}
        }
    }
    collapse_ws(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &str = "<tr><th>Former country name</th><th>Former codes</th>\
        <th>Period of validity</th><th>ISO 3166-3 code</th>\
        <th>New country names and codes</th></tr>";

    #[test]
    fn prefers_sortable_table() {
        let html = format!(
            "<html><body>\
             <table><tr><th>a</th></tr><tr><td>1</td></tr><tr><td>2</td></tr><tr><td>3</td></tr></table>\
             <table class=\"wikitable sortable\">{COLUMNS}\
             <tr><td>Dahomey</td><td>DY, DHY, 204</td><td>1974–1977</td><td>DYBJ</td>\
             <td>Name changed to Benin (BJ, BEN, 204)</td></tr></table>\
             </body></html>"
        );
        let rows = extract_rows(&html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Former country name"), Some("Dahomey"));
        assert_eq!(rows[0].get("ISO 3166-3 code"), Some("DYBJ"));
    }

    #[test]
    fn falls_back_to_largest_table() {
        let html = "<table><tr><th>x</th></tr><tr><td>small</td></tr></table>\
                    <table><tr><th>x</th></tr><tr><td>one</td></tr><tr><td>two</td></tr></table>";
        let rows = extract_rows(html).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("x"), Some("two"));
    }

    #[test]
    fn no_table_is_an_error() {
        let err = extract_rows("<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert!(err.to_string().contains("no table"));
    }

    #[test]
    fn header_only_table_is_an_error() {
        let html = format!("<table class=\"sortable\">{COLUMNS}</table>");
        assert!(extract_rows(&html).is_err());
    }

    #[test]
    fn rowspan_repeats_value_downwards() {
        let html = "<table class=\"sortable\"><tr><th>name</th><th>period</th></tr>\
                    <tr><td>A</td><td rowspan=\"2\">1974–1990</td></tr>\
                    <tr><td>B</td></tr></table>";
        let rows = extract_rows(html).unwrap();
        assert_eq!(rows[1].get("name"), Some("B"));
        assert_eq!(rows[1].get("period"), Some("1974–1990"));
    }

    #[test]
    fn spanned_header_joins_subcolumns() {
        let html = "<table class=\"sortable\">\
                    <tr><th>Former country name</th><th colspan=\"3\">Former codes</th></tr>\
                    <tr><td>Zaire</td><td>ZR</td><td>ZAR</td><td>180</td></tr></table>";
        let rows = extract_rows(html).unwrap();
        assert_eq!(rows[0].get("Former codes"), Some("ZR, ZAR, 180"));
    }

    #[test]
    fn line_breaks_become_spaces_and_blanks_are_absent() {
        let html = "<table class=\"sortable\"><tr><th>a</th><th>b</th></tr>\
                    <tr><td>Divided into:<br>Serbia (RS, SRB, 688)</td><td>  </td></tr></table>";
        let rows = extract_rows(html).unwrap();
        assert_eq!(rows[0].get("a"), Some("Divided into: Serbia (RS, SRB, 688)"));
        assert_eq!(rows[0].get("b"), None);
    }

    #[test]
    fn row_header_cells_stay_in_the_body() {
        let html = "<table class=\"sortable\"><tr><th>name</th><th>code</th></tr>\
                    <tr><th scope=\"row\">Burma</th><td>BUMM</td></tr></table>";
        let rows = extract_rows(html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("Burma"));
    }
}
