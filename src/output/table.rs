// Two-column verdict table (row index, verdict) for the terminal.

use crate::scoring::Verdict;

/// Vocabulary for the verdict column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TableStyle {
    /// `approved_sk` column with ano / nie
    Sk,
    /// `verdict` column with APPROVED / CANCELED
    En,
}

impl TableStyle {
    pub fn header(&self) -> &'static str {
        match self {
            TableStyle::Sk => "approved_sk",
            TableStyle::En => "verdict",
        }
    }

    pub fn cell(&self, verdict: Verdict) -> &'static str {
        match self {
            TableStyle::Sk => verdict.as_sk(),
            TableStyle::En => verdict.as_str(),
        }
    }
}

/// Render verdicts as a right-aligned two-column table, index from 0.
pub fn render_verdict_table(verdicts: &[Verdict], style: TableStyle) -> String {
    let index_width = verdicts.len().saturating_sub(1).to_string().len();
    let cell_width = verdicts
        .iter()
        .map(|v| style.cell(*v).len())
        .chain(std::iter::once(style.header().len()))
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{:<iw$}  {:>cw$}\n",
        "",
        style.header(),
        iw = index_width,
        cw = cell_width
    );
    for (i, verdict) in verdicts.iter().enumerate() {
        out.push_str(&format!(
            "{:<iw$}  {:>cw$}\n",
            i,
            style.cell(*verdict),
            iw = index_width,
            cw = cell_width
        ));
    }
    out
}
