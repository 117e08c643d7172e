use crate::formatting::{self, hex_to_rgb, FormattingConfig};
use crate::risk::{HeatMapMatrix, LevelDistribution, RiskRow, RiskSummary};
use crate::scoring::{Impact, LevelColor, Likelihood, RiskLevel, ScoreCard};
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    /// Parse a configured format name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name.trim(), true).ok()
    }
}

pub trait OutputWriter {
    fn write_summary(&mut self, summary: &RiskSummary) -> anyhow::Result<()>;
    fn write_heat_map(&mut self, title: &str, matrix: &HeatMapMatrix) -> anyhow::Result<()>;
    fn write_score(&mut self, card: &ScoreCard) -> anyhow::Result<()>;
    fn flush(&mut self) -> anyhow::Result<()>;
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Html => Box::new(HtmlWriter::new(writer)),
    }
}

fn heat_map_title(basis: &str) -> String {
    format!("{} Heat Map", basis)
}

fn axis_label(value: u8, label: &str) -> String {
    format!("{} {}", value, label)
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct Metadata {
    riskgrid_version: &'static str,
    generated_at: String,
}

impl Metadata {
    fn now() -> Self {
        Self {
            riskgrid_version: env!("CARGO_PKG_VERSION"),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    metadata: Metadata,
    summary: &'a RiskSummary,
}

#[derive(Serialize)]
struct HeatMapDocument<'a> {
    metadata: Metadata,
    title: &'a str,
    matrix: &'a HeatMapMatrix,
    levels: LevelDistribution,
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_summary(&mut self, summary: &RiskSummary) -> anyhow::Result<()> {
        self.emit(&SummaryDocument {
            metadata: Metadata::now(),
            summary,
        })
    }

    fn write_heat_map(&mut self, title: &str, matrix: &HeatMapMatrix) -> anyhow::Result<()> {
        self.emit(&HeatMapDocument {
            metadata: Metadata::now(),
            title,
            matrix,
            levels: matrix.level_counts(),
        })
    }

    fn write_score(&mut self, card: &ScoreCard) -> anyhow::Result<()> {
        self.emit(card)
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

// ============================================================================
// Markdown
// ============================================================================

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, summary: &RiskSummary) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "# Risk Report: {}",
            escape_markdown(&summary.register)
        )?;
        writeln!(self.writer)?;
        if let Some(description) = &summary.description {
            writeln!(self.writer, "{}", escape_markdown(description))?;
            writeln!(self.writer)?;
        }
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_overview(&mut self, summary: &RiskSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Total Risks | {} |", summary.total_risks)?;
        writeln!(
            self.writer,
            "| Average Inherent Score | {:.1} |",
            summary.average_inherent_score
        )?;
        writeln!(
            self.writer,
            "| Average Residual Score | {} |",
            summary
                .average_residual_score
                .map(|score| format!("{:.1}", score))
                .unwrap_or_else(|| "n/a".to_string())
        )?;
        writeln!(
            self.writer,
            "| Without Residual Assessment | {} |",
            summary.unassessed_residual
        )?;
        writeln!(self.writer)?;

        writeln!(self.writer, "## Level Distribution")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Level | Inherent | Share | Residual | Share |")?;
        writeln!(self.writer, "|-------|----------|-------|----------|-------|")?;
        for (level, inherent) in summary.inherent_levels.by_severity() {
            writeln!(
                self.writer,
                "| {} | {} | {:.0}% | {} | {:.0}% |",
                level.label(),
                inherent,
                summary.inherent_levels.percentage(level),
                summary.residual_levels.get(level),
                summary.residual_levels.percentage(level)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_matrix(&mut self, title: &str, matrix: &HeatMapMatrix) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", title)?;
        writeln!(self.writer)?;

        let header: Vec<String> = Impact::all()
            .map(|impact| axis_label(impact.value(), impact.label()))
            .collect();
        writeln!(self.writer, "| Likelihood \\ Impact | {} |", header.join(" | "))?;
        writeln!(self.writer, "|---{}|", "|---".repeat(header.len()))?;

        for likelihood in Likelihood::all().rev() {
            let counts: Vec<String> = Impact::all()
                .map(|impact| matrix.count(likelihood, impact).to_string())
                .collect();
            writeln!(
                self.writer,
                "| {} | {} |",
                axis_label(likelihood.value(), likelihood.label()),
                counts.join(" | ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_risks(&mut self, rows: &[RiskRow]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Risks")?;
        writeln!(self.writer)?;
        if rows.is_empty() {
            writeln!(self.writer, "_No risks match._")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "| ID | Title | Category | Inherent | Residual | Reduction |"
        )?;
        writeln!(
            self.writer,
            "|----|-------|----------|----------|----------|-----------|"
        )?;
        for row in rows {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} |",
                escape_markdown(&row.id),
                escape_markdown(&row.title),
                escape_markdown(row.category.as_deref().unwrap_or("-")),
                card_text(&row.inherent),
                row.residual
                    .as_ref()
                    .map(card_text)
                    .unwrap_or_else(|| "-".to_string()),
                row.reduction
                    .map(|reduction| reduction.to_string())
                    .unwrap_or_else(|| "-".to_string())
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_summary(&mut self, summary: &RiskSummary) -> anyhow::Result<()> {
        self.write_header(summary)?;
        self.write_overview(summary)?;
        self.write_matrix(&heat_map_title("Inherent"), &summary.inherent_matrix)?;
        self.write_matrix(&heat_map_title("Residual"), &summary.residual_matrix)?;
        self.write_risks(&summary.risks)?;
        Ok(())
    }

    fn write_heat_map(&mut self, title: &str, matrix: &HeatMapMatrix) -> anyhow::Result<()> {
        self.write_matrix(title, matrix)
    }

    fn write_score(&mut self, card: &ScoreCard) -> anyhow::Result<()> {
        writeln!(self.writer, "| Likelihood | Impact | Score | Level |")?;
        writeln!(self.writer, "|------------|--------|-------|-------|")?;
        writeln!(
            self.writer,
            "| {} | {} | {} | {} |",
            card.likelihood,
            card.impact,
            card.score,
            card.level.label()
        )?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Level name padded to a fixed column, then coloured.
fn level_column(level: RiskLevel, use_color: bool) -> String {
    formatting::paint_in_level(&format!("{:<8}", level.as_str()), level, use_color)
}

fn card_text(card: &ScoreCard) -> String {
    format!("{} ({})", card.score, card.level.label())
}

fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

// ============================================================================
// HTML
// ============================================================================

const HTML_STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem; color: #111827; }
table { border-collapse: collapse; margin-bottom: 1.5rem; }
th, td { border: 1px solid #d1d5db; padding: 0.4rem 0.75rem; text-align: center; }
td.risk-title { text-align: left; }
.badge { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 0.25rem; font-weight: 600; }
td[data-hotspot] { outline: 3px solid #111827; outline-offset: -3px; font-weight: 700; }
";

pub struct HtmlWriter<W: Write> {
    writer: W,
}

impl<W: Write> HtmlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn open_document(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "<!DOCTYPE html>")?;
        writeln!(self.writer, "<html lang=\"en\">")?;
        writeln!(self.writer, "<head>")?;
        writeln!(self.writer, "<meta charset=\"utf-8\">")?;
        writeln!(self.writer, "<title>{}</title>", html_escape::encode_text(title))?;
        writeln!(self.writer, "<style>\n{}</style>", HTML_STYLE)?;
        writeln!(self.writer, "</head>")?;
        writeln!(self.writer, "<body>")?;
        Ok(())
    }

    fn close_document(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "</body>")?;
        writeln!(self.writer, "</html>")?;
        Ok(())
    }

    fn write_matrix_table(&mut self, title: &str, matrix: &HeatMapMatrix) -> anyhow::Result<()> {
        writeln!(self.writer, "<h2>{}</h2>", html_escape::encode_text(title))?;
        writeln!(self.writer, "<table class=\"heat-map\">")?;
        write!(self.writer, "<tr><th>Likelihood \\ Impact</th>")?;
        for impact in Impact::all() {
            write!(
                self.writer,
                "<th>{}</th>",
                axis_label(impact.value(), impact.label())
            )?;
        }
        writeln!(self.writer, "</tr>")?;

        let hottest = matrix.max_count();
        let mut cells = matrix.cells().peekable();
        while let Some(first) = cells.peek().copied() {
            write!(
                self.writer,
                "<tr><th>{}</th>",
                axis_label(first.likelihood.value(), first.likelihood.label())
            )?;
            while let Some(cell) = cells.next_if(|cell| cell.likelihood == first.likelihood) {
                // Clicking a cell selects this rating pair
                let selected = cell.assessment();
                let hotspot = if cell.count > 0 && cell.count == hottest {
                    " data-hotspot"
                } else {
                    ""
                };
                write!(
                    self.writer,
                    "<td class=\"{}\" style=\"{}\" data-likelihood=\"{}\" data-impact=\"{}\"{} title=\"Score {}\">{}</td>",
                    cell.level.css_class(),
                    cell_style(cell.level.color()),
                    selected.likelihood.value(),
                    selected.impact.value(),
                    hotspot,
                    cell.score,
                    cell.count
                )?;
            }
            writeln!(self.writer, "</tr>")?;
        }
        writeln!(self.writer, "</table>")?;
        Ok(())
    }

    fn write_distribution(&mut self, summary: &RiskSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "<h2>Summary</h2>")?;
        writeln!(self.writer, "<table class=\"summary\">")?;
        writeln!(
            self.writer,
            "<tr><th>Total risks</th><td>{}</td></tr>",
            summary.total_risks
        )?;
        writeln!(
            self.writer,
            "<tr><th>Average inherent score</th><td>{:.1}</td></tr>",
            summary.average_inherent_score
        )?;
        writeln!(
            self.writer,
            "<tr><th>Without residual assessment</th><td>{}</td></tr>",
            summary.unassessed_residual
        )?;
        writeln!(self.writer, "</table>")?;

        writeln!(self.writer, "<table class=\"levels\">")?;
        writeln!(
            self.writer,
            "<tr><th>Level</th><th>Inherent</th><th>Residual</th></tr>"
        )?;
        for (level, inherent) in summary.inherent_levels.by_severity() {
            writeln!(
                self.writer,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_badge(level.label(), level),
                inherent,
                summary.residual_levels.get(level)
            )?;
        }
        writeln!(self.writer, "</table>")?;
        Ok(())
    }

    fn write_risk_table(&mut self, rows: &[RiskRow]) -> anyhow::Result<()> {
        writeln!(self.writer, "<h2>Risks</h2>")?;
        writeln!(self.writer, "<table class=\"risks\">")?;
        writeln!(
            self.writer,
            "<tr><th>ID</th><th>Title</th><th>Owner</th><th>Inherent</th><th>Residual</th></tr>"
        )?;
        for row in rows {
            writeln!(
                self.writer,
                "<tr><td>{}</td><td class=\"risk-title\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape::encode_text(&row.id),
                html_escape::encode_text(&row.title),
                html_escape::encode_text(row.owner.as_deref().unwrap_or("-")),
                html_card(&row.inherent),
                row.residual
                    .as_ref()
                    .map(html_card)
                    .unwrap_or_else(|| "-".to_string())
            )?;
        }
        writeln!(self.writer, "</table>")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for HtmlWriter<W> {
    fn write_summary(&mut self, summary: &RiskSummary) -> anyhow::Result<()> {
        let title = format!("Risk Report: {}", summary.register);
        self.open_document(&title)?;
        writeln!(self.writer, "<h1>{}</h1>", html_escape::encode_text(&title))?;
        if let Some(description) = &summary.description {
            writeln!(self.writer, "<p>{}</p>", html_escape::encode_text(description))?;
        }
        self.write_distribution(summary)?;
        self.write_matrix_table(&heat_map_title("Inherent"), &summary.inherent_matrix)?;
        self.write_matrix_table(&heat_map_title("Residual"), &summary.residual_matrix)?;
        self.write_risk_table(&summary.risks)?;
        self.close_document()
    }

    fn write_heat_map(&mut self, title: &str, matrix: &HeatMapMatrix) -> anyhow::Result<()> {
        self.open_document(title)?;
        self.write_matrix_table(title, matrix)?;
        self.close_document()
    }

    fn write_score(&mut self, card: &ScoreCard) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", html_card(card))?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn cell_style(color: LevelColor) -> String {
    format!(
        "background-color: {}; color: {};",
        color.background, color.foreground
    )
}

fn html_badge(text: &str, level: RiskLevel) -> String {
    format!(
        "<span class=\"badge {}\" style=\"{}\">{}</span>",
        level.css_class(),
        cell_style(level.color()),
        html_escape::encode_text(text)
    )
}

fn html_card(card: &ScoreCard) -> String {
    html_badge(&card_text(card), card.level)
}

// ============================================================================
// Terminal
// ============================================================================

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatting: FormattingConfig,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self { writer, formatting }
    }

    fn use_color(&self) -> bool {
        self.formatting.color.should_use_color()
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        if self.use_color() {
            table.load_preset(UTF8_FULL).enforce_styling();
        } else {
            table.load_preset(ASCII_FULL).force_no_tty();
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    fn matrix_table(&self, matrix: &HeatMapMatrix) -> Table {
        let mut table = self.new_table();
        let mut header = vec![Cell::new("L \\ I")];
        header.extend(
            Impact::all().map(|impact| Cell::new(axis_label(impact.value(), impact.label()))),
        );
        table.set_header(header);

        for likelihood in Likelihood::all().rev() {
            let mut row = vec![Cell::new(axis_label(likelihood.value(), likelihood.label()))];
            row.extend(Impact::all().map(|impact| {
                let count = matrix.count(likelihood, impact);
                let level = crate::scoring::RiskScore::from_ratings(likelihood, impact).level();
                self.level_cell(count.to_string(), level)
            }));
            table.add_row(row);
        }
        table
    }

    fn level_cell(&self, text: String, level: RiskLevel) -> Cell {
        let cell = Cell::new(text).set_alignment(CellAlignment::Center);
        if !self.use_color() {
            return cell;
        }
        let color = level.color();
        let mut cell = cell.add_attribute(Attribute::Bold);
        if let Some((r, g, b)) = hex_to_rgb(color.foreground) {
            cell = cell.fg(Color::Rgb { r, g, b });
        }
        if let Some((r, g, b)) = hex_to_rgb(color.background) {
            cell = cell.bg(Color::Rgb { r, g, b });
        }
        cell
    }

    fn card_cell(&self, card: Option<&ScoreCard>) -> Cell {
        match card {
            Some(card) => self.level_cell(card_text(card), card.level),
            None => Cell::new("-").set_alignment(CellAlignment::Center),
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_summary(&mut self, summary: &RiskSummary) -> anyhow::Result<()> {
        let use_color = self.use_color();
        writeln!(self.writer, "Risk Register: {}", summary.register)?;
        if let Some(description) = &summary.description {
            writeln!(self.writer, "{}", description)?;
        }
        writeln!(
            self.writer,
            "{} risks, average inherent score {:.1}, {} without residual assessment",
            summary.total_risks, summary.average_inherent_score, summary.unassessed_residual
        )?;
        writeln!(self.writer)?;

        for (level, count) in summary.inherent_levels.by_severity() {
            writeln!(
                self.writer,
                "  {} {:>4} inherent {:>4} residual",
                level_column(level, use_color),
                count,
                summary.residual_levels.get(level)
            )?;
        }
        writeln!(self.writer)?;

        self.write_heat_map(&heat_map_title("Inherent"), &summary.inherent_matrix)?;
        self.write_heat_map(&heat_map_title("Residual"), &summary.residual_matrix)?;

        if summary.risks.is_empty() {
            writeln!(self.writer, "No risks match.")?;
            return Ok(());
        }

        let mut table = self.new_table();
        table.set_header(vec!["ID", "Title", "Owner", "Inherent", "Residual", "Reduction"]);
        for row in &summary.risks {
            table.add_row(vec![
                Cell::new(&row.id),
                Cell::new(&row.title),
                Cell::new(row.owner.as_deref().unwrap_or("-")),
                self.card_cell(Some(&row.inherent)),
                self.card_cell(row.residual.as_ref()),
                Cell::new(
                    row.reduction
                        .map(|reduction| reduction.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ]);
        }
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }

    fn write_heat_map(&mut self, title: &str, matrix: &HeatMapMatrix) -> anyhow::Result<()> {
        let table = self.matrix_table(matrix);
        writeln!(self.writer, "{} ({} risks)", title, matrix.total())?;
        writeln!(self.writer, "{}", table)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_score(&mut self, card: &ScoreCard) -> anyhow::Result<()> {
        let use_color = self.use_color();
        writeln!(self.writer, "Likelihood: {}", card.likelihood)?;
        writeln!(self.writer, "Impact:     {}", card.impact)?;
        writeln!(
            self.writer,
            "Score:      {}",
            formatting::badge(&card.score.to_string(), card.color, use_color)
        )?;
        writeln!(
            self.writer,
            "Level:      {}",
            formatting::paint_level(card.level, use_color)
        )?;
        writeln!(
            self.writer,
            "Color:      {} on {}",
            card.color.foreground, card.color.background
        )?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
