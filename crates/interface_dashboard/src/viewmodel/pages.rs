//! Per-page view model builders

use rust_decimal::Decimal;

use domain_reporting::document::{ImprovementMetric, MetricKind, MonthlyTrend};
use domain_reporting::{PerformanceTier, ReportDocument};

use super::charts::{ChartView, Datum};
use super::format::Formatter;
use super::{Block, Expander, Fact, InsightBox, MetricCard, Section, TableView, Tone};

pub(super) type PageParts = (&'static str, Option<String>, Vec<Section>);

const TIER_ORDER: [PerformanceTier; 5] = [
    PerformanceTier::TopPerformer,
    PerformanceTier::HighPerformer,
    PerformanceTier::AveragePerformer,
    PerformanceTier::NeedsImprovement,
    PerformanceTier::Unrated,
];

fn table(fmt: &Formatter<'_>, columns: &[&str], rows: Vec<Vec<String>>) -> Block {
    Block::Table(TableView::new(columns, rows, fmt.display().empty_table.clone()))
}

fn empty_text<'a>(fmt: &Formatter<'a>) -> &'a str {
    &fmt.display().empty_table
}

pub(super) fn executive_summary(document: &ReportDocument, fmt: &Formatter<'_>) -> PageParts {
    let summary = &document.executive_summary;
    let meta = &summary.report_metadata;
    let metrics = &summary.key_metrics;

    let subtitle = format!(
        "{} | Generated {} | Coverage {} | Prepared by {}",
        meta.title,
        meta.generated_date.format("%Y-%m-%d"),
        meta.coverage_period,
        meta.prepared_by
    );

    let cards = vec![
        MetricCard::new("Total Claims", fmt.count(metrics.total_claims))
            .delta(format!("{} members", fmt.count(metrics.total_beneficiaries))),
        MetricCard::new("Total Claim Value", fmt.money_compact(metrics.total_claim_value))
            .delta(format!("Avg: {}", fmt.money(metrics.avg_claim_amount))),
        MetricCard::new("Denial Rate", fmt.rate(metrics.overall_denial_rate)),
        MetricCard::new("Processing Days", fmt.days(metrics.avg_processing_days)).delta("Average"),
        MetricCard::new("Providers", fmt.count(metrics.total_providers)),
    ];

    let rows = summary
        .claim_type_distribution
        .iter()
        .map(|share| {
            vec![
                share.claim_type.label().to_string(),
                fmt.count(share.count),
                fmt.percent(share.percentage),
                fmt.money(share.total_value),
                fmt.money(share.avg_value),
                fmt.rate(share.denial_rate),
            ]
        })
        .collect();

    let mix = summary
        .claim_type_distribution
        .iter()
        .map(|share| Datum::new(share.claim_type.label(), share.percentage, fmt.percent(share.percentage)))
        .collect();

    let quality_tone = if meta.data_quality_score >= Decimal::ONE_HUNDRED {
        Tone::Good
    } else {
        Tone::Warning
    };

    let sections = vec![
        Section::untitled().with(Block::Metrics { cards }),
        Section::new("Claim Type Distribution").with(table(
            fmt,
            &["Claim Type", "Claims", "Share", "Total Value", "Avg Value", "Denial Rate"],
            rows,
        )),
        Section::new("Claim Mix").with(Block::Chart(ChartView::pie("Share of Claims", mix, empty_text(fmt)))),
        Section::new("Data Quality").with(Block::Insight(InsightBox {
            heading: "Seed Data".to_string(),
            lines: vec![
                format!("{} of seed rows accepted", fmt.percent(meta.data_quality_score)),
                format!("Coverage period: {}", meta.coverage_period),
                format!("Amounts in {}", meta.currency.code()),
            ],
            tone: quality_tone,
        })),
    ];
    ("Executive Dashboard", Some(subtitle), sections)
}

pub(super) fn kpi_dashboard(document: &ReportDocument, fmt: &Formatter<'_>) -> PageParts {
    let kpis = &document.executive_summary.kpi_categories;
    let (financial, utilization, quality, risk) =
        (&kpis.financial, &kpis.utilization, &kpis.quality, &kpis.risk);

    let facts = |items: Vec<Fact>| Block::Facts { items };
    let sections = vec![
        Section::new("Financial Metrics").with(facts(vec![
            Fact::new("Average Claim Amount", fmt.money(financial.avg_claim_amount)),
            Fact::new("Total Reimbursement", fmt.money(financial.total_reimbursement)),
            Fact::new("Reimbursement Rate", fmt.rate(financial.reimbursement_rate)),
            Fact::new("Cost per Member", fmt.money(financial.cost_per_member)),
        ])),
        Section::new("Utilization Metrics").with(facts(vec![
            Fact::new("Claims per Member", fmt.number(utilization.claims_per_member, 2)),
            Fact::new(
                "Provider Diversity",
                format!("{} providers", fmt.count(utilization.provider_diversity)),
            ),
            Fact::new("Members with Claims", fmt.count(utilization.members_with_claims)),
        ])),
        Section::new("Quality Metrics").with(facts(vec![
            Fact::new("Denial Rate", fmt.rate(quality.denial_rate)),
            Fact::new("Processing Time", fmt.days(quality.processing_time)),
            Fact::new("Data Quality Rate", fmt.rate(quality.data_quality_rate)),
        ])),
        Section::new("Risk Metrics").with(facts(vec![
            Fact::new("High-Risk Members", fmt.count(risk.high_risk_members)),
            Fact::new("High-Cost Claims", fmt.count(risk.high_cost_claims)),
            Fact::new("Frequent Users", fmt.count(risk.frequent_users)),
        ])),
    ];
    ("Key Performance Indicators", None, sections)
}

pub(super) fn provider_analysis(document: &ReportDocument, fmt: &Formatter<'_>) -> PageParts {
    let analysis = &document.provider_analysis;

    let top_rows = analysis
        .top_providers
        .iter()
        .map(|p| {
            vec![
                p.rank.to_string(),
                p.name.clone(),
                p.npi.to_string(),
                p.specialty.clone(),
                fmt.count(p.claims),
                fmt.money(p.avg_amount),
                fmt.rate_precise(p.denial_rate),
                p.performance_tier.label().to_string(),
            ]
        })
        .collect();

    let tiers = TIER_ORDER
        .iter()
        .filter_map(|tier| {
            let count = analysis
                .top_providers
                .iter()
                .filter(|p| p.performance_tier == *tier)
                .count() as u64;
            (count > 0).then(|| Datum::new(tier.label(), Decimal::from(count), fmt.count(count)))
        })
        .collect();

    let specialty_rows = analysis
        .specialty_comparison
        .iter()
        .map(|s| {
            vec![
                s.specialty.clone(),
                fmt.count(s.provider_count),
                fmt.number(s.avg_claims, 1),
                fmt.money(s.avg_amount),
                fmt.rate_precise(s.denial_rate),
                fmt.count(s.top_performers),
            ]
        })
        .collect();

    let sections = vec![
        Section::new("Top Providers").wide().with(table(
            fmt,
            &["Rank", "Provider", "NPI", "Specialty", "Claims", "Avg Amount", "Denial Rate", "Performance Tier"],
            top_rows,
        )),
        Section::new("Performance Distribution").with(Block::Chart(ChartView::pie(
            "Provider Performance Tiers",
            tiers,
            empty_text(fmt),
        ))),
        Section::new("Specialty Comparison").with(table(
            fmt,
            &["Specialty", "Providers", "Avg Claims", "Avg Amount", "Denial Rate", "Top Performers"],
            specialty_rows,
        )),
    ];
    ("Provider Performance Analysis", None, sections)
}

pub(super) fn risk_analysis(document: &ReportDocument, fmt: &Formatter<'_>) -> PageParts {
    let analysis = &document.member_risk_analysis;

    let tier_rows = analysis
        .risk_stratification
        .iter()
        .map(|t| {
            vec![
                t.tier.label().to_string(),
                fmt.count(t.count),
                fmt.percent(t.percentage),
                fmt.money(t.avg_cost),
                fmt.percent(t.cost_share),
                fmt.number(t.avg_chronic_conditions, 1),
                fmt.count(t.needs_case_management),
            ]
        })
        .collect();

    let concentration = analysis
        .risk_stratification
        .iter()
        .map(|t| Datum::new(t.tier.label(), t.cost_share, fmt.percent(t.cost_share)))
        .collect();

    let condition_rows = analysis
        .chronic_conditions_impact
        .iter()
        .map(|c| {
            vec![
                c.condition_category.clone(),
                fmt.count(c.count),
                fmt.money(c.avg_cost),
                fmt.number(c.avg_claims, 1),
                fmt.rate(c.denial_rate),
            ]
        })
        .collect();

    let flagged: u64 = analysis
        .risk_stratification
        .iter()
        .map(|t| t.needs_case_management)
        .sum();
    let members: u64 = analysis.risk_stratification.iter().map(|t| t.count).sum();

    let sections = vec![
        Section::new("Risk Stratification").with(table(
            fmt,
            &["Risk Tier", "Members", "Share", "Avg Cost", "Cost Share", "Avg Conditions", "Case Management"],
            tier_rows,
        )),
        Section::new("Cost Concentration").with(Block::Chart(ChartView::bar(
            "Share of Total Cost by Risk Tier",
            concentration,
            empty_text(fmt),
        ))),
        Section::new("Chronic Conditions Impact").wide().with(table(
            fmt,
            &["Conditions", "Members", "Avg Cost", "Avg Claims", "Denial Rate"],
            condition_rows,
        )),
        Section::new("Case Management").wide().with(Block::Insight(InsightBox {
            heading: "Care Coordination".to_string(),
            lines: vec![format!(
                "{} of {} members flagged for case management",
                fmt.count(flagged),
                fmt.count(members)
            )],
            tone: if flagged > 0 { Tone::Warning } else { Tone::Good },
        })),
    ];
    ("Member Risk Analysis", None, sections)
}

fn seasonal_insights(trends: &[MonthlyTrend], fmt: &Formatter<'_>) -> Vec<String> {
    let peak_volume = trends.iter().max_by(|a, b| a.claims.cmp(&b.claims).then(b.month.cmp(&a.month)));
    let peak_value = trends
        .iter()
        .max_by(|a, b| a.total_value.cmp(&b.total_value).then(b.month.cmp(&a.month)));
    let lowest_denial = trends.iter().map(|t| t.denial_rate).min();
    let highest_denial = trends.iter().map(|t| t.denial_rate).max();

    let mut lines = Vec::new();
    if let Some(peak) = peak_volume {
        lines.push(format!("Peak volume: {} with {} claims", peak.month, fmt.count(peak.claims)));
    }
    if let Some(peak) = peak_value {
        lines.push(format!("Highest spend: {} at {}", peak.month, fmt.money(peak.total_value)));
    }
    if let (Some(low), Some(high)) = (lowest_denial, highest_denial) {
        lines.push(format!("Denial rates ranged from {} to {}", fmt.rate(low), fmt.rate(high)));
    }
    if lines.is_empty() {
        lines.push(empty_text(fmt).to_string());
    }
    lines
}

pub(super) fn trends(document: &ReportDocument, fmt: &Formatter<'_>) -> PageParts {
    let trends = &document.financial_analysis.monthly_trends;

    let volume = trends
        .iter()
        .map(|t| Datum::new(t.month.clone(), Decimal::from(t.claims), fmt.count(t.claims)))
        .collect();
    let denial = trends
        .iter()
        .map(|t| Datum::new(t.month.clone(), t.denial_rate, fmt.rate(t.denial_rate)))
        .collect();
    let rows = trends
        .iter()
        .map(|t| {
            vec![
                t.month.clone(),
                fmt.count(t.claims),
                fmt.money(t.total_value),
                fmt.money(t.reimbursed),
                fmt.rate(t.reimbursement_rate),
                fmt.rate(t.denial_rate),
            ]
        })
        .collect();

    let sections = vec![
        Section::new("Claims Volume").with(Block::Chart(ChartView::line(
            "Monthly Claims Volume",
            volume,
            empty_text(fmt),
        ))),
        Section::new("Denial Rate").with(Block::Chart(ChartView::line(
            "Monthly Denial Rate",
            denial,
            empty_text(fmt),
        ))),
        Section::new("Monthly Trends").wide().with(table(
            fmt,
            &["Month", "Claims", "Total Value", "Reimbursed", "Reimbursement Rate", "Denial Rate"],
            rows,
        )),
        Section::new("Seasonal Insights").wide().with(Block::Insight(InsightBox {
            heading: "Observed Patterns".to_string(),
            lines: seasonal_insights(trends, fmt),
            tone: Tone::Neutral,
        })),
    ];
    ("Trend Analysis & Seasonal Patterns", None, sections)
}

pub(super) fn operations(document: &ReportDocument, fmt: &Formatter<'_>) -> PageParts {
    let buckets = &document.operational_analysis.processing_efficiency;
    let high_cost = &document.financial_analysis.high_cost_analysis;

    let rows = buckets
        .iter()
        .map(|b| {
            vec![
                b.category.clone(),
                fmt.count(b.count),
                fmt.percent(b.percentage),
                fmt.number(b.avg_days, 1),
                fmt.rate(b.denial_rate),
            ]
        })
        .collect();
    let distribution = buckets
        .iter()
        .map(|b| Datum::new(b.category.clone(), Decimal::from(b.count), fmt.count(b.count)))
        .collect();

    let sections = vec![
        Section::new("Processing Time Distribution").with(table(
            fmt,
            &["Category", "Claims", "Share", "Avg Days", "Denial Rate"],
            rows,
        )),
        Section::new("Claims by Processing Time").with(Block::Chart(ChartView::bar(
            "Claims per Processing Bucket",
            distribution,
            empty_text(fmt),
        ))),
        Section::new("High-Cost Claims").wide().with(Block::Facts {
            items: vec![
                Fact::new("Threshold", fmt.money(high_cost.threshold_amount)),
                Fact::new("High-Cost Claims", fmt.count(high_cost.high_cost_count)),
                Fact::new("Share of Claims", fmt.percent(high_cost.pct_of_total_claims)),
                Fact::new("Share of Value", fmt.percent(high_cost.pct_of_total_value)),
                Fact::new("Average Amount", fmt.money(high_cost.avg_amount)),
                Fact::new("Avg Processing Time", fmt.days(high_cost.avg_processing_days)),
            ],
        }),
    ];
    ("Operational Efficiency", None, sections)
}

fn metric_facts(metric: &ImprovementMetric, fmt: &Formatter<'_>) -> [Fact; 2] {
    match metric.kind {
        MetricKind::ProcessingDays => [
            Fact::new("Current", fmt.days(Some(metric.current))),
            Fact::new("Target", fmt.days(Some(metric.target))),
        ],
        MetricKind::DenialRate => [
            Fact::new("Current Denial Rate", fmt.rate(metric.current)),
            Fact::new("Target Denial Rate", fmt.rate(metric.target)),
        ],
    }
}

pub(super) fn recommendations(document: &ReportDocument, fmt: &Formatter<'_>) -> PageParts {
    let recs = &document.recommendations;
    if recs.cost_optimization.is_empty() && recs.quality_improvements.is_empty() {
        let sections = vec![Section::untitled().with(Block::Insight(InsightBox {
            heading: "All Clear".to_string(),
            lines: vec![fmt.display().no_recommendations.clone()],
            tone: Tone::Good,
        }))];
        return ("Strategic Recommendations", None, sections);
    }

    let total_savings: Decimal = recs.cost_optimization.iter().map(|o| o.potential_savings).sum();
    let summary = Section::untitled().with(Block::Metrics {
        cards: vec![
            MetricCard::new("Potential Savings", fmt.money(total_savings)).tone(Tone::Good),
            MetricCard::new("Cost Opportunities", fmt.count(recs.cost_optimization.len() as u64)),
            MetricCard::new("Quality Improvements", fmt.count(recs.quality_improvements.len() as u64)),
        ],
    });

    let mut cost = Section::new("Cost Optimization");
    for opportunity in &recs.cost_optimization {
        cost = cost.with(Block::Expander(Expander {
            summary: format!(
                "{} - {} Savings",
                opportunity.opportunity,
                fmt.money_compact(opportunity.potential_savings)
            ),
            items: vec![
                Fact::new("Action", opportunity.action.clone()),
                Fact::new("Potential Savings", fmt.money(opportunity.potential_savings)),
                Fact::new(
                    format!("{} Affected", opportunity.affected.label()),
                    fmt.count(opportunity.affected_count),
                ),
            ],
        }));
    }

    let mut quality = Section::new("Quality Improvements");
    for improvement in &recs.quality_improvements {
        let mut items = vec![
            Fact::new("Recommendation", improvement.recommendation.clone()),
            Fact::new(
                format!("{} Affected", improvement.affected.label()),
                fmt.count(improvement.affected_count),
            ),
        ];
        items.extend(metric_facts(&improvement.metric, fmt));
        quality = quality.with(Block::Expander(Expander {
            summary: improvement.area.clone(),
            items,
        }));
    }

    let sections = [summary, cost, quality]
        .into_iter()
        .filter(|section| !section.blocks.is_empty())
        .collect();
    ("Strategic Recommendations", None, sections)
}
