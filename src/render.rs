use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::Stock;
use engine::CorrelationView;
use navigator::{Breadcrumb, IndustrySummary, TopAndWorst};
use presentation::{correlation_legend, ColorBucket, DisplayCell, PerformanceBucket, TextTone};

// ─── Colors ───

fn bucket_color(bucket: ColorBucket) -> Color {
    match bucket {
        ColorBucket::StrongPositive => Color::DarkGreen,
        ColorBucket::ModeratePositive => Color::Green,
        ColorBucket::WeakPositive => Color::Cyan,
        ColorBucket::Neutral => Color::Grey,
        ColorBucket::WeakNegative => Color::Yellow,
        ColorBucket::ModerateNegative => Color::Red,
        ColorBucket::StrongNegative => Color::DarkRed,
        ColorBucket::Opaque => Color::Black,
        ColorBucket::Transparent => Color::Reset,
    }
}

fn performance_color(bucket: PerformanceBucket) -> Color {
    match bucket {
        PerformanceBucket::StrongGain => Color::DarkGreen,
        PerformanceBucket::Gain => Color::Green,
        PerformanceBucket::SlightGain => Color::Cyan,
        PerformanceBucket::SlightLoss => Color::Yellow,
        PerformanceBucket::Loss => Color::Red,
        PerformanceBucket::StrongLoss => Color::DarkRed,
    }
}

pub fn breadcrumb_line(crumbs: &[Breadcrumb]) -> String {
    crumbs
        .iter()
        .map(|c| {
            if c.active {
                format!("[{}]", c.label)
            } else {
                c.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

fn matrix_cell(cell: &DisplayCell) -> Cell {
    let text = match cell.value {
        Some(value) => format!("{value:.2}"),
        None if cell.color_bucket == ColorBucket::Opaque => "■".to_string(),
        None => String::new(),
    };
    let mut rendered = Cell::new(text)
        .fg(bucket_color(cell.color_bucket))
        .set_alignment(CellAlignment::Right);
    if cell.text_tone == TextTone::Light {
        rendered = rendered.add_attribute(Attribute::Bold);
    }
    rendered
}

/// The correlation grid, with performance-colored row headers at constituent levels.
pub fn matrix_table(view: &CorrelationView, color_rows_by_performance: bool) -> Table {
    let grid = &view.grid;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("")];
    header.extend(grid.col_labels.iter().map(|l| Cell::new(l).add_attribute(Attribute::Bold)));
    table.set_header(header);

    for (row, cells) in grid.cells.iter().enumerate() {
        let mut label = Cell::new(&grid.row_labels[row]).add_attribute(Attribute::Bold);
        if color_rows_by_performance {
            label = label.fg(performance_color(grid.row_performance[row]));
        }
        let mut line = vec![label];
        line.extend(cells.iter().map(matrix_cell));
        table.add_row(line);
    }
    table
}

/// Average, strongest and weakest pair, by entity label.
pub fn summary_lines(view: &CorrelationView) -> Vec<String> {
    let label = |id: &str| {
        view.entities
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.label.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let mut lines = Vec::new();
    if let Some(average) = view.matrix.average_off_diagonal() {
        lines.push(format!("Average correlation: {average:+.2}"));
    }
    if let Some((a, b, c)) = view.matrix.strongest_pair() {
        lines.push(format!("Strongest pair: {} / {} ({c:+.2})", label(a), label(b)));
    }
    if let Some((a, b, c)) = view.matrix.weakest_pair() {
        lines.push(format!("Weakest pair: {} / {} ({c:+.2})", label(a), label(b)));
    }
    lines
}

pub fn legend_line() -> String {
    correlation_legend()
        .into_iter()
        .map(|entry| format!("{} {}", entry.bucket, entry.range))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn performer_rows(table: &mut Table, stocks: &[Stock]) {
    for stock in stocks {
        let bucket = PerformanceBucket::for_change(stock.change_percent);
        table.add_row(vec![
            Cell::new(&stock.ticker),
            Cell::new(&stock.name),
            Cell::new(format!("{:+.1}%", stock.change_percent))
                .fg(performance_color(bucket))
                .set_alignment(CellAlignment::Right),
        ]);
    }
}

pub fn performers_table(performers: &TopAndWorst) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Ticker", "Name", "Change"]);

    table.add_row(vec![Cell::new("Top performers").add_attribute(Attribute::Bold)]);
    performer_rows(&mut table, &performers.top);
    if !performers.worst.is_empty() {
        table.add_row(vec![Cell::new("Worst performers").add_attribute(Attribute::Bold)]);
        performer_rows(&mut table, &performers.worst);
    }
    table
}

pub fn industry_summary_table(summary: &IndustrySummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total companies".to_string(), summary.total_companies.to_string()]);
    table.add_row(vec![
        "Average change".to_string(),
        format!("{:+.2}%", summary.average_change),
    ]);
    table.add_row(vec![
        "Total market cap".to_string(),
        summary.total_market_cap.round_dp(0).to_string(),
    ]);
    table.add_row(vec![
        "Gainers".to_string(),
        format!("{}/{}", summary.gainers, summary.total_companies),
    ]);
    table
}
