//! Dashboard pages and navigation
//!
//! The selected page is kept per browser session in the `dashboard_page`
//! cookie. Requests without a usable cookie land on the executive summary.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Cookie holding the selected page
pub const NAV_COOKIE: &str = "dashboard_page";

/// A navigable dashboard page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    ExecutiveSummary,
    KpiDashboard,
    ProviderAnalysis,
    RiskAnalysis,
    Trends,
    Operations,
    Recommendations,
}

impl Page {
    /// Pages in navigation order
    pub const ALL: [Page; 7] = [
        Page::ExecutiveSummary,
        Page::KpiDashboard,
        Page::ProviderAnalysis,
        Page::RiskAnalysis,
        Page::Trends,
        Page::Operations,
        Page::Recommendations,
    ];

    /// URL segment for the page
    pub fn slug(&self) -> &'static str {
        match self {
            Page::ExecutiveSummary => "executive-summary",
            Page::KpiDashboard => "kpi-dashboard",
            Page::ProviderAnalysis => "provider-analysis",
            Page::RiskAnalysis => "risk-analysis",
            Page::Trends => "trends",
            Page::Operations => "operations",
            Page::Recommendations => "recommendations",
        }
    }

    /// Label shown in the navigation bar
    pub fn nav_label(&self) -> &'static str {
        match self {
            Page::ExecutiveSummary => "Executive Summary",
            Page::KpiDashboard => "KPI Dashboard",
            Page::ProviderAnalysis => "Provider Analysis",
            Page::RiskAnalysis => "Risk Analysis",
            Page::Trends => "Trends & Patterns",
            Page::Operations => "Operations",
            Page::Recommendations => "Strategic Recommendations",
        }
    }

    /// Resolves the page stored in the navigation cookie.
    ///
    /// A missing or stale value falls back to the default page.
    pub fn from_cookie(value: Option<&str>) -> Page {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Page {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.slug() == s)
            .ok_or_else(|| DashboardError::UnknownPage(s.to_string()))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// One navigation bar entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Navigation bar with `current` highlighted
pub fn nav_items(current: Page) -> Vec<NavItem> {
    Page::ALL
        .into_iter()
        .map(|page| NavItem {
            slug: page.slug(),
            label: page.nav_label(),
            active: page == current,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_parse_back() {
        for page in Page::ALL {
            assert_eq!(page.slug().parse::<Page>().unwrap(), page);
        }
    }

    #[test]
    fn test_unknown_slug() {
        let err = "billing".parse::<Page>().unwrap_err();
        assert!(matches!(err, DashboardError::UnknownPage(name) if name == "billing"));
    }

    #[test]
    fn test_cookie_fallback() {
        assert_eq!(Page::from_cookie(None), Page::ExecutiveSummary);
        assert_eq!(Page::from_cookie(Some("stale-page")), Page::ExecutiveSummary);
        assert_eq!(Page::from_cookie(Some("trends")), Page::Trends);
    }

    #[test]
    fn test_single_active_item() {
        let items = nav_items(Page::RiskAnalysis);
        assert_eq!(items.len(), 7);
        let active: Vec<_> = items.iter().filter(|i| i.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].slug, "risk-analysis");
    }
}
