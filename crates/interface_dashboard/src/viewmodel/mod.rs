//! Page view models
//!
//! A `PageView` is everything a page shows, already formatted for display.
//! Building one never fails: missing values become the configured
//! fallback text and empty sections carry their empty-state message.

pub mod charts;
pub mod format;
mod pages;

use serde::Serialize;

use domain_reporting::ReportDocument;
use crate::config::DisplayConfig;
use crate::navigation::Page;

pub use charts::{ChartShape, ChartView, Datum};
pub use format::Formatter;

/// A fully formatted dashboard page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub slug: &'static str,
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
}

impl PageView {
    /// Every block on the page, in order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }
}

/// A titled group of blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: Option<String>,
    /// Spans the full page width instead of one column
    pub wide: bool,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            wide: false,
            blocks: Vec::new(),
        }
    }

    pub fn untitled() -> Self {
        Self {
            heading: None,
            wide: true,
            blocks: Vec::new(),
        }
    }

    pub fn wide(mut self) -> Self {
        self.wide = true;
        self
    }

    pub fn with(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Metrics { cards: Vec<MetricCard> },
    Facts { items: Vec<Fact> },
    Table(TableView),
    Chart(ChartView),
    Insight(InsightBox),
    Expander(Expander),
}

/// Emphasis applied to a card, insight, or delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
    pub tone: Tone,
}

impl MetricCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            delta: None,
            tone: Tone::Neutral,
        }
    }

    pub fn delta(mut self, delta: impl Into<String>) -> Self {
        self.delta = Some(delta.into());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

/// Label/value pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

impl Fact {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of the table when there are no rows
    pub empty_text: String,
}

impl TableView {
    pub fn new(columns: &[&str], rows: Vec<Vec<String>>, empty_text: impl Into<String>) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
            empty_text: empty_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightBox {
    pub heading: String,
    pub lines: Vec<String>,
    pub tone: Tone,
}

/// Collapsible detail list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expander {
    pub summary: String,
    pub items: Vec<Fact>,
}

/// Maps one section of `document` to the view model of `page`
pub fn build_page(document: &ReportDocument, page: Page, display: &DisplayConfig) -> PageView {
    let fmt = Formatter::new(display, document.currency());
    let (title, subtitle, sections) = match page {
        Page::ExecutiveSummary => pages::executive_summary(document, &fmt),
        Page::KpiDashboard => pages::kpi_dashboard(document, &fmt),
        Page::ProviderAnalysis => pages::provider_analysis(document, &fmt),
        Page::RiskAnalysis => pages::risk_analysis(document, &fmt),
        Page::Trends => pages::trends(document, &fmt),
        Page::Operations => pages::operations(document, &fmt),
        Page::Recommendations => pages::recommendations(document, &fmt),
    };
    PageView {
        slug: page.slug(),
        title: title.to_string(),
        subtitle,
        sections,
    }
}

/// View models for every page, in navigation order
pub fn build_all_pages(document: &ReportDocument, display: &DisplayConfig) -> Vec<PageView> {
    Page::ALL
        .into_iter()
        .map(|page| build_page(document, page, display))
        .collect()
}
