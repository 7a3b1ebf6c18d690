//! Named scalar report for inclusion in a typeset document.
//!
//! Each [`ReportEntry`] becomes one line. In LaTeX form a line defines a
//! macro, e.g. `\newcommand{\serSource}{$1.00 \ $V}`, so the document can
//! `\input` the file and refer to computed values by name. Letter units sit
//! after the math span; symbolic ones (`\Omega`, `\mu F`) inside it.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::constants::{MICRO, MILLI};
use crate::errors::Result;
use crate::math::Scalar;
use crate::units::Unit;

/// Line layout of a report file.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// `name = value unit`
    Plain,
    /// `\newcommand{\name}{$value \ $unit}`
    #[default]
    Latex,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "latex" | "tex" | "sty" => Ok(Self::Latex),
            other => Err(format!("unknown report format `{other}` (expected plain or latex)")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::Latex => "latex",
        })
    }
}

/// SI prefix applied to a reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// 10⁻³
    Milli,
    /// 10⁻⁶
    Micro,
}

impl Prefix {
    fn scale(self) -> Scalar {
        match self {
            Self::Milli => MILLI,
            Self::Micro => MICRO,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Milli => "m",
            Self::Micro => "µ",
        }
    }

    fn latex(self) -> &'static str {
        match self {
            Self::Milli => "m",
            Self::Micro => r"\mu ",
        }
    }
}

/// One named scalar of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Macro or key name.
    pub name: String,
    /// Value already scaled to the displayed unit.
    pub value: Scalar,
    /// Digits after the decimal point.
    pub precision: usize,
    /// Plain-text unit.
    pub unit: String,
    /// LaTeX unit spelling.
    pub latex_unit: String,
}

impl ReportEntry {
    /// Entry for a value in unit `U`, printed with two decimals.
    #[must_use]
    pub fn new<U: Unit>(name: impl Into<String>, value: Scalar) -> Self {
        Self {
            name: name.into(),
            value,
            precision: 2,
            unit: U::SYMBOL.to_owned(),
            latex_unit: U::LATEX.to_owned(),
        }
    }

    /// Rescales the value and prepends the prefix to both unit forms.
    #[must_use]
    pub fn prefixed(mut self, prefix: Prefix) -> Self {
        self.value /= prefix.scale();
        self.unit = format!("{}{}", prefix.symbol(), self.unit);
        self.latex_unit = format!("{}{}", prefix.latex(), self.latex_unit);
        self
    }

    /// Overrides the number of decimals.
    #[must_use]
    pub fn precision(mut self, digits: usize) -> Self {
        self.precision = digits;
        self
    }

    /// Formats the entry as a single line (without newline).
    #[must_use]
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Plain => format!(
                "{} = {:.*} {}",
                self.name, self.precision, self.value, self.unit
            ),
            ReportFormat::Latex if self.latex_unit.contains('\\') => format!(
                "\\newcommand{{\\{}}}{{${:.*} \\ {} $}}",
                self.name, self.precision, self.value, self.latex_unit
            ),
            ReportFormat::Latex => format!(
                "\\newcommand{{\\{}}}{{${:.*} \\ ${}}}",
                self.name, self.precision, self.value, self.latex_unit
            ),
        }
    }
}

/// Writes `entries` to `w`, one line each.
pub fn write_entries<W: Write>(
    mut w: W,
    entries: &[ReportEntry],
    format: ReportFormat,
) -> io::Result<()> {
    for entry in entries {
        writeln!(w, "{}", entry.render(format))?;
    }
    w.flush()
}

/// Report file writer: the first section truncates, later sections append.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
    format: ReportFormat,
    sections_written: usize,
}

impl ReportWriter {
    /// Creates a writer; the file is not touched until the first section.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: ReportFormat) -> Self {
        Self {
            path: path.into(),
            format,
            sections_written: 0,
        }
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line format in use.
    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Writes one group of entries.
    pub fn write_section(&mut self, entries: &[ReportEntry]) -> Result<()> {
        let mut options = OpenOptions::new();
        if self.sections_written == 0 {
            options.write(true).create(true).truncate(true);
        } else {
            options.append(true).create(true);
        }
        let file = options.open(&self.path)?;
        write_entries(BufWriter::new(file), entries, self.format)?;
        self.sections_written += 1;
        info!(
            path = %self.path.display(),
            entries = entries.len(),
            section = self.sections_written,
            "wrote report section"
        );
        Ok(())
    }
}
