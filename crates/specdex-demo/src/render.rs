#![forbid(unsafe_code)]

//! Row painting for the demo browser.
//!
//! Draws the search line, the live address, the materialized list slice
//! (offset by the leading spacer so partially scrolled items clip at the
//! viewport edges), the empty state, the status line, and the detail
//! overlay. Pure presentation: everything it shows comes straight off the
//! [`ListView`] accessors.

use crate::app::{LIST_TOP, Ui};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use specdex_core::{SortKey, Specie};
use specdex_list::{FixedViewport, ListView, Viewport};
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// Paint one frame.
pub fn draw(
    out: &mut impl Write,
    view: &ListView<'_, FixedViewport>,
    ui: &Ui,
    (cols, rows): (u16, u16),
) -> io::Result<()> {
    let width = cols as usize;
    queue!(out, Clear(ClearType::All))?;

    // Search line with the sort/filter controls on the right.
    let header = format!(
        "Search: {}▏   sort:{}  type:{}",
        ui.search,
        view.query().sort.token(),
        ui.filter_label()
    );
    queue!(out, MoveTo(0, 0), Print(fit(&header, width)))?;

    // The shareable address: the only persisted state there is.
    queue!(
        out,
        MoveTo(0, 1),
        SetAttribute(Attribute::Dim),
        Print(fit(&format!("specdex{}", view.address()), width)),
        SetAttribute(Attribute::Reset)
    )?;

    let list_height = i64::from(rows.saturating_sub(LIST_TOP + 1));
    if view.is_empty() {
        queue!(
            out,
            MoveTo(2, LIST_TOP + 1),
            Print(fit(
                "No species found. Make sure you have your filter set right.",
                width.saturating_sub(2)
            ))
        )?;
    } else {
        let h = i64::from(view.config().item_height());
        let scroll_top = i64::from(view.viewport().scroll_top());
        let first = view.window().first_index as i64;
        for (k, (specie, id)) in view.rendered().enumerate() {
            let top = (first + k as i64) * h - scroll_top;
            let active = view.active_id() == Some(id);
            draw_item(out, specie, view.query().sort, active, top, list_height, width, h)?;
        }
    }

    // Status line.
    let status = format!(
        "{}/{} species · ↑↓ navigate · ⏎ open · tab sort · ^t filter · esc quit",
        view.len(),
        view.catalog_len()
    );
    queue!(
        out,
        MoveTo(0, rows.saturating_sub(1)),
        SetAttribute(Attribute::Dim),
        Print(fit(&status, width)),
        SetAttribute(Attribute::Reset)
    )?;

    if let Some(link) = &ui.detail {
        draw_detail(out, view, link, (cols, rows))?;
    }

    out.flush()
}

/// Draw one list item at `top` rows below the list origin, clipping rows
/// outside the viewport.
#[allow(clippy::too_many_arguments)]
fn draw_item(
    out: &mut impl Write,
    specie: &Specie,
    sort: SortKey,
    active: bool,
    top: i64,
    list_height: i64,
    width: usize,
    item_height: i64,
) -> io::Result<()> {
    for line in 0..item_height {
        let row = top + line;
        if row < 0 || row >= list_height {
            continue;
        }
        let y = LIST_TOP + row as u16;
        let text = match line {
            0 => {
                let marker = if active { "▶ " } else { "  " };
                let badge = sort
                    .stat()
                    .map(|key| format!("  {} {}", key.label(), specie.stats.get(key)))
                    .unwrap_or_default();
                format!("{marker}#{:03} {}{badge}", specie.number, format_name(&specie.name))
            }
            1 => {
                let types: Vec<&str> = specie.types.iter().map(|t| t.token()).collect();
                format!("       {}", types.join(" "))
            }
            _ => String::new(),
        };
        if active {
            queue!(
                out,
                MoveTo(0, y),
                SetAttribute(Attribute::Reverse),
                Print(fit(&text, width)),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, MoveTo(0, y), Print(fit(&text, width)))?;
        }
    }
    Ok(())
}

/// Centered overlay showing the chosen entry and its shareable link.
fn draw_detail(
    out: &mut impl Write,
    view: &ListView<'_, FixedViewport>,
    link: &str,
    (cols, rows): (u16, u16),
) -> io::Result<()> {
    let title = view
        .active_entry()
        .map(|s| format!("#{:03} {}", s.number, format_name(&s.name)))
        .unwrap_or_else(|| "entry detail".to_string());
    let lines = [
        title,
        format!("link: {link}"),
        "press any key to return".to_string(),
    ];

    let inner = lines
        .iter()
        .map(|l| display_width(l))
        .max()
        .unwrap_or(0)
        .min((cols as usize).saturating_sub(4));
    let x = (cols as usize).saturating_sub(inner + 4) as u16 / 2;
    let y = rows.saturating_sub(5) / 2;

    queue!(
        out,
        MoveTo(x, y),
        Print(format!("┌{}┐", "─".repeat(inner + 2)))
    )?;
    for (i, line) in lines.iter().enumerate() {
        queue!(
            out,
            MoveTo(x, y + 1 + i as u16),
            Print(format!("│ {} │", fit(line, inner)))
        )?;
    }
    queue!(
        out,
        MoveTo(x, y + 1 + lines.len() as u16),
        Print(format!("└{}┘", "─".repeat(inner + 2)))
    )?;
    Ok(())
}

/// Capitalize the display name the way the catalog shows it.
fn format_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate to `width` display columns and pad with spaces.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}
