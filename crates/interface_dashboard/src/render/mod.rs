//! HTML rendering
//!
//! Turns page view models into HTML through the Handlebars templates under
//! `templates/`. Markup and styling live only in those templates.

pub mod report;

use handlebars::Handlebars;
use serde::Serialize;

use domain_reporting::ReportDocument;
use crate::config::DisplayConfig;
use crate::error::DashboardError;
use crate::navigation::{nav_items, NavItem, Page};
use crate::viewmodel::{build_page, PageView};

const LAYOUT: &str = "layout";
const REPORT: &str = "report";

const TEMPLATES: [(&str, &str); 2] = [
    (LAYOUT, include_str!("../../templates/layout.hbs")),
    (REPORT, include_str!("../../templates/report.hbs")),
];

const PARTIALS: [(&str, &str); 3] = [
    ("page", include_str!("../../templates/page.hbs")),
    ("blocks", include_str!("../../templates/blocks.hbs")),
    ("styles", include_str!("../../templates/styles.css")),
];

#[derive(Serialize)]
struct LayoutContext<'a> {
    title: &'a str,
    footer: &'a str,
    nav: Vec<NavItem>,
    page: &'a PageView,
}

#[derive(Serialize)]
struct ReportContext<'a> {
    title: &'a str,
    generated_date: String,
    prepared_by: &'a str,
    footer: &'a str,
    pages: &'a [PageView],
}

/// Template registry plus the display settings pages are built with
pub struct Renderer {
    registry: Handlebars<'static>,
    display: DisplayConfig,
}

impl Renderer {
    pub fn new(display: DisplayConfig) -> Result<Self, DashboardError> {
        let mut registry = Handlebars::new();
        for (name, template) in TEMPLATES {
            registry.register_template_string(name, template)?;
        }
        for (name, partial) in PARTIALS {
            registry.register_partial(name, partial)?;
        }
        Ok(Self { registry, display })
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Renders `view` inside the dashboard layout
    pub fn render_page(&self, view: &PageView, current: Page) -> Result<String, DashboardError> {
        let context = LayoutContext {
            title: &self.display.title,
            footer: &self.display.footer,
            nav: nav_items(current),
            page: view,
        };
        Ok(self.registry.render(LAYOUT, &context)?)
    }

    /// Builds and renders one page of `document`
    pub fn render_document_page(&self, document: &ReportDocument, page: Page) -> Result<String, DashboardError> {
        let view = build_page(document, page, &self.display);
        self.render_page(&view, page)
    }

    /// Renders every page into one standalone document without navigation
    pub fn render_report(&self, document: &ReportDocument, pages: &[PageView]) -> Result<String, DashboardError> {
        let meta = &document.executive_summary.report_metadata;
        let context = ReportContext {
            title: &meta.title,
            generated_date: meta.generated_date.format("%Y-%m-%d").to_string(),
            prepared_by: &meta.prepared_by,
            footer: &self.display.footer,
            pages,
        };
        Ok(self.registry.render(REPORT, &context)?)
    }
}
