use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::cli::{ReportStyle, SortField, SortOrder};
use crate::model::ContractRecord;
use crate::util::ensure_directory;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 30.0;
const TABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_FONT_SIZE: f32 = 20.0;
const META_FONT_SIZE: f32 = 10.0;
const HEADER_FONT_SIZE: f32 = 10.0;
const BODY_FONT_SIZE: f32 = 9.0;
const FOOTER_FONT_SIZE: f32 = 8.0;

const TITLE_BLOCK_HEIGHT: f32 = TITLE_FONT_SIZE + 16.0 + 14.0 + 20.0;
const HEADER_ROW_HEIGHT: f32 = 22.0;
const BODY_ROW_HEIGHT: f32 = 18.0;
const CELL_PADDING: f32 = 4.0;
const GLYPH_WIDTH_FACTOR: f32 = 0.556;

const BODY_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const HEADER_FILL: (f32, f32, f32) = (0.173, 0.243, 0.314);
const HEADER_TEXT: (f32, f32, f32) = (0.961, 0.961, 0.961);
const STRIPE_FILL: (f32, f32, f32) = (0.976, 0.976, 0.976);
const SOFT_GRAY: (f32, f32, f32) = (0.5, 0.5, 0.5);

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub sort_by: SortField,
    pub order: SortOrder,
    pub style: ReportStyle,
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

struct ColumnSpec {
    heading: &'static str,
    width: f32,
    align: Align,
    cell: fn(&ContractRecord) -> String,
}

pub fn write_report(
    output_path: &Path,
    contracts: &[ContractRecord],
    options: &ReportOptions,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut document = build_report_document(contracts, options)?;
    document
        .save(output_path)
        .with_context(|| format!("failed to write report {}", output_path.display()))?;
    Ok(())
}

pub fn build_report_document(
    contracts: &[ContractRecord],
    options: &ReportOptions,
) -> Result<Document> {
    let columns = column_layout(options.style);
    let generated_line = format!(
        "Generated on: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let sorted_line = format!(
        "Sorted by: {} ({})",
        options.sort_by.label(),
        options.order.as_str()
    );

    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let body_font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            BODY_FONT => body_font_id,
            BOLD_FONT => bold_font_id,
        },
    });

    let mut chunks: Vec<&[ContractRecord]> = Vec::new();
    let mut rest = contracts;
    loop {
        let capacity = page_capacity(chunks.is_empty());
        if rest.len() <= capacity {
            chunks.push(rest);
            break;
        }
        let (page_rows, remainder) = rest.split_at(capacity);
        chunks.push(page_rows);
        rest = remainder;
    }

    let mut page_ids = Vec::new();
    let mut first_row_index = 0;
    for (page_index, chunk) in chunks.iter().enumerate() {
        let operations = page_operations(
            chunk,
            &columns,
            page_index == 0,
            page_index == chunks.len() - 1,
            first_row_index,
            &generated_line,
            &sorted_line,
        );
        first_row_index += chunk.len();

        let encoded = Content { operations }
            .encode()
            .context("failed to encode report page content")?;
        let content_id = document.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);
    document.compress();

    Ok(document)
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn format_currency(value: f64) -> String {
    if value == 0.0 {
        return String::new();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::new();
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

fn column_layout(style: ReportStyle) -> Vec<ColumnSpec> {
    match style {
        ReportStyle::Full => vec![
            ColumnSpec {
                heading: "Number",
                width: 48.0,
                align: Align::Center,
                cell: number_cell,
            },
            ColumnSpec {
                heading: "Contract Name",
                width: 146.0,
                align: Align::Left,
                cell: name_cell,
            },
            ColumnSpec {
                heading: "Start Date",
                width: 64.0,
                align: Align::Center,
                cell: start_date_cell,
            },
            ColumnSpec {
                heading: "Expiration",
                width: 66.0,
                align: Align::Center,
                cell: expiration_date_cell,
            },
            ColumnSpec {
                heading: "Value",
                width: 80.0,
                align: Align::Right,
                cell: value_cell,
            },
            ColumnSpec {
                heading: "Status",
                width: 52.0,
                align: Align::Center,
                cell: status_cell,
            },
            ColumnSpec {
                heading: "Notes",
                width: 96.0,
                align: Align::Left,
                cell: notes_cell,
            },
        ],
        ReportStyle::Simple => vec![
            ColumnSpec {
                heading: "Contract Name",
                width: 270.0,
                align: Align::Left,
                cell: name_cell,
            },
            ColumnSpec {
                heading: "Start Date",
                width: 70.0,
                align: Align::Center,
                cell: start_date_cell,
            },
            ColumnSpec {
                heading: "Expiration",
                width: 70.0,
                align: Align::Center,
                cell: expiration_date_cell,
            },
            ColumnSpec {
                heading: "Value",
                width: 142.0,
                align: Align::Right,
                cell: value_cell,
            },
        ],
    }
}

fn number_cell(record: &ContractRecord) -> String {
    record.contract_number.clone().unwrap_or_default()
}

fn name_cell(record: &ContractRecord) -> String {
    record.contract_name.clone()
}

fn start_date_cell(record: &ContractRecord) -> String {
    format_date(record.start_date)
}

fn expiration_date_cell(record: &ContractRecord) -> String {
    format_date(record.expiration_date)
}

fn value_cell(record: &ContractRecord) -> String {
    format_currency(record.value)
}

fn status_cell(record: &ContractRecord) -> String {
    record.status.clone()
}

fn notes_cell(record: &ContractRecord) -> String {
    record.notes.clone().unwrap_or_default()
}

fn page_capacity(is_first: bool) -> usize {
    let table_top = if is_first {
        PAGE_HEIGHT - MARGIN - TITLE_BLOCK_HEIGHT
    } else {
        PAGE_HEIGHT - MARGIN
    };
    ((table_top - MARGIN - HEADER_ROW_HEIGHT) / BODY_ROW_HEIGHT) as usize
}

#[allow(clippy::too_many_arguments)]
fn page_operations(
    records: &[ContractRecord],
    columns: &[ColumnSpec],
    is_first: bool,
    is_last: bool,
    first_row_index: usize,
    generated_line: &str,
    sorted_line: &str,
) -> Vec<Operation> {
    let mut operations = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    if is_first {
        y -= TITLE_FONT_SIZE;
        push_fill_color(&mut operations, BLACK);
        push_centered_text(&mut operations, "Contract Report", BOLD_FONT, TITLE_FONT_SIZE, y);

        push_fill_color(&mut operations, SOFT_GRAY);
        y -= 16.0;
        push_centered_text(&mut operations, generated_line, BODY_FONT, META_FONT_SIZE, y);
        y -= 14.0;
        push_centered_text(&mut operations, sorted_line, BODY_FONT, META_FONT_SIZE, y);

        push_fill_color(&mut operations, BLACK);
        y -= 20.0;
    }

    let table_top = y;
    let header_bottom = table_top - HEADER_ROW_HEIGHT;

    push_fill_color(&mut operations, HEADER_FILL);
    push_filled_rect(&mut operations, MARGIN, header_bottom, TABLE_WIDTH, HEADER_ROW_HEIGHT);

    push_fill_color(&mut operations, HEADER_TEXT);
    let heading_baseline = header_bottom + 7.0;
    let mut column_x = MARGIN;
    for column in columns {
        let x = aligned_x(column_x, column.width, column.align, column.heading, HEADER_FONT_SIZE);
        push_text(&mut operations, column.heading, BOLD_FONT, HEADER_FONT_SIZE, x, heading_baseline);
        column_x += column.width;
    }

    push_fill_color(&mut operations, BLACK);
    let mut row_y = header_bottom;
    for (row_index, record) in records.iter().enumerate() {
        let row_bottom = row_y - BODY_ROW_HEIGHT;

        if (first_row_index + row_index) % 2 == 1 {
            push_fill_color(&mut operations, STRIPE_FILL);
            push_filled_rect(&mut operations, MARGIN, row_bottom, TABLE_WIDTH, BODY_ROW_HEIGHT);
            push_fill_color(&mut operations, BLACK);
        }

        let baseline = row_bottom + 5.0;
        let mut column_x = MARGIN;
        for column in columns {
            let text = truncate_cell(&(column.cell)(record), cell_capacity(column.width));
            if !text.is_empty() {
                let x = aligned_x(column_x, column.width, column.align, &text, BODY_FONT_SIZE);
                push_text(&mut operations, &text, BODY_FONT, BODY_FONT_SIZE, x, baseline);
            }
            column_x += column.width;
        }

        row_y = row_bottom;
    }
    let table_bottom = row_y;

    push_stroke_color(&mut operations, SOFT_GRAY);
    operations.push(Operation::new("w", vec![real(0.5)]));
    push_stroked_line(&mut operations, MARGIN, table_top, MARGIN + TABLE_WIDTH, table_top);
    let mut separator_y = header_bottom;
    for _ in records {
        separator_y -= BODY_ROW_HEIGHT;
        push_stroked_line(&mut operations, MARGIN, separator_y, MARGIN + TABLE_WIDTH, separator_y);
    }
    let mut boundary_x = MARGIN;
    push_stroked_line(&mut operations, boundary_x, table_top, boundary_x, table_bottom);
    for column in columns {
        boundary_x += column.width;
        push_stroked_line(&mut operations, boundary_x, table_top, boundary_x, table_bottom);
    }

    push_stroke_color(&mut operations, HEADER_FILL);
    operations.push(Operation::new("w", vec![real(2.0)]));
    push_stroked_line(&mut operations, MARGIN, header_bottom, MARGIN + TABLE_WIDTH, header_bottom);

    if is_last {
        let footer_baseline = (table_bottom - 24.0).max(MARGIN);
        push_fill_color(&mut operations, SOFT_GRAY);
        push_centered_text(&mut operations, "End of Report", BODY_FONT, FOOTER_FONT_SIZE, footer_baseline);
        push_fill_color(&mut operations, BLACK);
    }

    operations
}

fn cell_capacity(width: f32) -> usize {
    ((width - 2.0 * CELL_PADDING) / (BODY_FONT_SIZE * GLYPH_WIDTH_FACTOR)) as usize
}

fn truncate_cell(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_WIDTH_FACTOR
}

fn aligned_x(column_x: f32, column_width: f32, align: Align, text: &str, font_size: f32) -> f32 {
    let width = text_width(text, font_size);
    let x = match align {
        Align::Left => column_x + CELL_PADDING,
        Align::Center => column_x + (column_width - width) / 2.0,
        Align::Right => column_x + column_width - CELL_PADDING - width,
    };
    x.max(column_x + CELL_PADDING)
}

fn push_text(operations: &mut Vec<Operation>, text: &str, font: &str, size: f32, x: f32, y: f32) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec![font.into(), real(size)]));
    operations.push(Operation::new("Td", vec![real(x), real(y)]));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_win_ansi(text))],
    ));
    operations.push(Operation::new("ET", vec![]));
}

fn push_centered_text(operations: &mut Vec<Operation>, text: &str, font: &str, size: f32, y: f32) {
    let x = ((PAGE_WIDTH - text_width(text, size)) / 2.0).max(MARGIN);
    push_text(operations, text, font, size, x, y);
}

fn push_filled_rect(operations: &mut Vec<Operation>, x: f32, y: f32, width: f32, height: f32) {
    operations.push(Operation::new("re", vec![real(x), real(y), real(width), real(height)]));
    operations.push(Operation::new("f", vec![]));
}

fn push_stroked_line(operations: &mut Vec<Operation>, x1: f32, y1: f32, x2: f32, y2: f32) {
    operations.push(Operation::new("m", vec![real(x1), real(y1)]));
    operations.push(Operation::new("l", vec![real(x2), real(y2)]));
    operations.push(Operation::new("S", vec![]));
}

fn push_fill_color(operations: &mut Vec<Operation>, (red, green, blue): (f32, f32, f32)) {
    operations.push(Operation::new("rg", vec![real(red), real(green), real(blue)]));
}

fn push_stroke_color(operations: &mut Vec<Operation>, (red, green, blue): (f32, f32, f32)) {
    operations.push(Operation::new("RG", vec![real(red), real(green), real(blue)]));
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|character| {
            let code = character as u32;
            if code <= 0x00FF { code as u8 } else { b'?' }
        })
        .collect()
}
