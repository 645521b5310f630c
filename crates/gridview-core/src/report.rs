//! HTML report export: one browsable page per sheet.
//!
//! Each page shows the sheet as a table whose cells carry their formatted
//! value and, in `data-formula`, the cell's formula rendered as linked HTML.
//! Links point at `{sheet}.html#REF`, matching the `id` every cell gets.

use crate::config::ReportConfig;
use crate::error::{GridviewError, Result};
use crate::storage::Dimensions;
use crate::workbook::{Sheet, Workbook};
use chrono::{DateTime, FixedOffset, Local};
use gridview_engine::engine::{
    Area, CellRef, FormulaRenderer, MAX_GRID_CELLS, format_value, page_href,
};
use log::{debug, warn};
use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Shown in `data-formula` for cells without a formula.
pub const NO_FORMULA: &str = "&nbsp;";

/// Compiles the sheets of one workbook into HTML pages.
///
/// Holds its own [`FormulaRenderer`]; build one report per generation run.
pub struct HtmlReport<'a> {
    workbook: &'a Workbook,
    dimensions: Dimensions,
    config: ReportConfig,
    title: String,
    generated_at: DateTime<FixedOffset>,
    renderer: FormulaRenderer,
}

impl<'a> HtmlReport<'a> {
    pub fn new(workbook: &'a Workbook, config: ReportConfig) -> HtmlReport<'a> {
        let title = workbook
            .title
            .clone()
            .unwrap_or_else(|| config.title.clone());
        HtmlReport {
            workbook,
            dimensions: Dimensions::new(),
            config,
            title,
            generated_at: Local::now().fixed_offset(),
            renderer: FormulaRenderer::new(),
        }
    }

    /// Use a recorded sheet list for navigation instead of the workbook order.
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_timestamp(mut self, generated_at: DateTime<FixedOffset>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sheet names for the navigation strip.
    pub fn navigation(&self) -> Vec<String> {
        if self.dimensions.is_empty() {
            self.workbook.sheet_names()
        } else {
            self.dimensions.names().map(str::to_string).collect()
        }
    }

    /// The area a sheet's page covers: `A1` to the largest row and largest
    /// column holding a value. A recorded hint is only compared against it.
    pub fn sheet_area(&self, sheet: &Sheet) -> Result<Area> {
        let computed = Area::bounding_keys(sheet.value_keys()).map_err(|source| {
            GridviewError::Reference {
                sheet: sheet.name.clone(),
                source,
            }
        })?;

        let area = match computed {
            Some(area) => area,
            None => {
                warn!("Sheet '{}' has no values; rendering a single empty cell", sheet.name);
                Area::new(CellRef::new(1, 1), CellRef::new(1, 1))
            }
        };

        if let Some(hint) = self.dimensions.hint(&sheet.name) {
            match Area::parse(hint) {
                Ok(recorded) if recorded != area => warn!(
                    "Sheet '{}': recorded dimensions {} differ from its data, using {}",
                    sheet.name, recorded, area
                ),
                Ok(_) => {}
                Err(err) => warn!(
                    "Sheet '{}': ignoring unreadable dimensions {:?}: {}",
                    sheet.name, hint, err
                ),
            }
        }

        Ok(area)
    }

    /// Attribute-ready formula markup for a cell, or [`NO_FORMULA`].
    pub fn formula(&self, sheet: &Sheet, cell: &CellRef) -> String {
        match sheet.formula(cell) {
            Some(node) => escape_html(&self.renderer.render(node)),
            None => NO_FORMULA.to_string(),
        }
    }

    /// Display text of a cell's value; `None` when the cell has no value.
    pub fn formatted_value(&self, sheet: &Sheet, cell: &CellRef) -> Option<String> {
        sheet.value(cell).map(format_value)
    }

    /// Write the page for one sheet.
    pub fn compile_sheet<W: Write>(&self, sheet_name: &str, out: &mut W) -> Result<()> {
        let sheet = self
            .workbook
            .sheet(sheet_name)
            .ok_or_else(|| GridviewError::UnknownSheet(sheet_name.to_string()))?;

        let area = self.sheet_area(sheet)?;
        if area.cell_count() > MAX_GRID_CELLS {
            return Err(GridviewError::GridTooLarge {
                sheet: sheet.name.clone(),
                cells: area.cell_count(),
            });
        }
        let stamp = self.timestamp()?;
        debug!(
            "Compiling sheet '{}' over {} ({} values, {} formulae)",
            sheet.name,
            area,
            sheet.value_count(),
            sheet.formula_count()
        );

        self.write_preamble(out, sheet)?;

        let grid = area.grid();
        writeln!(out, "<table class='cells'>")?;

        // Header row: empty corner, then column letters
        writeln!(out, "<tr>")?;
        writeln!(out, "<th></th>")?;
        for column in &grid.columns {
            writeln!(out, "<th>{}</th>", column)?;
        }
        writeln!(out, "</tr>")?;

        for row in &grid.rows {
            writeln!(out, "<tr>")?;
            writeln!(out, "<th>{}</th>", row.row)?;
            for cell in &row.cells {
                let value = self
                    .formatted_value(sheet, cell)
                    .map(|v| escape_html(&v))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "<td id='c{cell}' class='c{cell}' data-formula='{}'>{}</td>",
                    self.formula(sheet, cell),
                    value
                )?;
            }
            writeln!(out, "</tr>")?;
        }
        writeln!(out, "</table>")?;

        write!(out, "<p>Generated on {} by ", escape_html(&stamp))?;
        match &self.config.attribution_url {
            Some(url) => writeln!(
                out,
                "<a href='{}'>{}</a></p>",
                escape_html(url),
                escape_html(&self.config.attribution_text)
            )?,
            None => writeln!(out, "{}</p>", escape_html(&self.config.attribution_text))?,
        }
        writeln!(out, "</div>")?;

        self.write_jumpbar(out, &sheet.name)?;

        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(())
    }

    /// Write `{sheet}.html` into `dir` for every sheet of the workbook, or
    /// only for the named sheets when `only` is not empty.
    pub fn write_reports(&self, dir: &Path, only: &[String]) -> Result<Vec<PathBuf>> {
        for name in only {
            if self.workbook.sheet(name).is_none() {
                return Err(GridviewError::UnknownSheet(name.clone()));
            }
        }
        for name in self.navigation() {
            if self.workbook.sheet(&name).is_none() {
                warn!("Sheet '{}' is listed for navigation but has no data", name);
            }
        }

        fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        for sheet in self.workbook.sheets() {
            if !only.is_empty() && !only.contains(&sheet.name) {
                continue;
            }
            let path = dir.join(page_file_name(&sheet.name)?);
            let mut file = BufWriter::new(fs::File::create(&path)?);
            self.compile_sheet(&sheet.name, &mut file)?;
            file.flush()?;
            written.push(path);
        }
        Ok(written)
    }

    fn write_preamble<W: Write>(&self, out: &mut W, sheet: &Sheet) -> Result<()> {
        let title = escape_html(&self.title);
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset='utf-8' />")?;
        writeln!(out, "<title>{} - {}</title>", title, escape_html(&sheet.name))?;
        if let Some(stylesheet) = &self.config.stylesheet {
            writeln!(
                out,
                "<link href='{}' rel='stylesheet' type='text/css' />",
                escape_html(stylesheet)
            )?;
        }
        for script in &self.config.scripts {
            writeln!(
                out,
                "<script type='text/javascript' src='{}'></script>",
                escape_html(script)
            )?;
        }
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<div id='top'>")?;
        writeln!(out, "<h1>{}</h1>", title)?;
        writeln!(out, "<table>")?;
        writeln!(out, "<tr>")?;
        writeln!(
            out,
            "<td id='sheetref'>'{}'!<span id='selectedcell'></span></td>",
            escape_html(&sheet.name)
        )?;
        writeln!(out, "<td id='functionof'>&fnof;<i>x</i></td>")?;
        writeln!(out, "<td id='selectedformula'>&nbsp;</td>")?;
        writeln!(out, "</tr>")?;
        writeln!(out, "</table>")?;
        writeln!(out, "</div>")?;
        writeln!(out, "<div id='worksheet'>")?;
        Ok(())
    }

    fn write_jumpbar<W: Write>(&self, out: &mut W, current: &str) -> Result<()> {
        writeln!(out, "<div id='jumpbar'><table><tr>")?;
        for name in self.navigation() {
            let class = if name == current { " class='current'" } else { "" };
            writeln!(
                out,
                "<td{}><a href='{}'>{}</a></td>",
                class,
                escape_html(&page_href(&name)),
                escape_html(&name)
            )?;
        }
        writeln!(out, "</tr></table></div>")?;
        Ok(())
    }

    fn timestamp(&self) -> Result<String> {
        let mut stamp = String::new();
        write!(stamp, "{}", self.generated_at.format(&self.config.timestamp_format)).map_err(
            |_| {
                GridviewError::Config(format!(
                    "invalid timestamp_format {:?}",
                    self.config.timestamp_format
                ))
            },
        )?;
        Ok(stamp)
    }
}

/// File name of a sheet's page. Names that would escape the output
/// directory are refused.
fn page_file_name(sheet: &str) -> Result<String> {
    if sheet.is_empty() || sheet == "." || sheet == ".." || sheet.contains(['/', '\\']) {
        return Err(GridviewError::Workbook(format!(
            "sheet name {:?} cannot be used as a file name",
            sheet
        )));
    }
    Ok(format!("{}.html", sheet))
}

/// Escape text for HTML content and single- or double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
