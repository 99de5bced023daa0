use std::fmt::Write as _;

use serde::Serialize;

use super::catalog::{section_narrative, DEVELOPMENT_PLAN};
use super::tier::{ProfileBand, Tier};
use crate::questionnaire::Questionnaire;
use crate::scoring::{AggregateScore, SectionScore};

const RANKED_SECTIONS: usize = 3;

/// Per-section entry of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAssessment {
    pub section_id: u32,
    pub title: String,
    pub percentage: f64,
    pub tier: Tier,
    pub commentary: &'static str,
    /// Section-specific text; present for every tier except `Solid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSection {
    pub section_id: u32,
    pub title: String,
    pub percentage: f64,
    pub why_it_matters: &'static str,
}

/// Structured narrative report; `render` produces the persisted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeReport {
    pub overall_percentage: f64,
    pub band: ProfileBand,
    pub sections: Vec<SectionAssessment>,
    pub strengths: Vec<RankedSection>,
    pub priorities: Vec<RankedSection>,
    pub conclusion: &'static str,
}

/// Sections by percentage, highest first. Ties keep section order.
pub fn rank_sections(sections: &[SectionScore]) -> Vec<&SectionScore> {
    let mut ranked: Vec<&SectionScore> = sections.iter().collect();
    ranked.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    ranked
}

pub fn generate(questionnaire: &Questionnaire, score: &AggregateScore) -> NarrativeReport {
    let title_of = |section_id: u32| {
        questionnaire
            .section(section_id)
            .map(|section| section.title.clone())
            .unwrap_or_else(|| format!("Section {section_id}"))
    };

    let sections = score
        .sections
        .iter()
        .map(|section| {
            let tier = Tier::classify(section.percentage);
            let narrative = section_narrative(section.section_id);
            let detail = match tier {
                Tier::Excellence => Some(narrative.excellence),
                Tier::Solid => None,
                Tier::Development | Tier::Priority => Some(narrative.development),
            };
            SectionAssessment {
                section_id: section.section_id,
                title: title_of(section.section_id),
                percentage: section.percentage,
                tier,
                commentary: tier.commentary(),
                detail,
            }
        })
        .collect();

    let ranked_entry = |section: &SectionScore| RankedSection {
        section_id: section.section_id,
        title: title_of(section.section_id),
        percentage: section.percentage,
        why_it_matters: section_narrative(section.section_id).why_it_matters,
    };

    let ranking = rank_sections(&score.sections);
    let strengths = ranking
        .iter()
        .take(RANKED_SECTIONS)
        .map(|section| ranked_entry(*section))
        .collect();
    let priorities = ranking
        .iter()
        .rev()
        .take(RANKED_SECTIONS)
        .map(|section| ranked_entry(*section))
        .collect();

    let band = ProfileBand::classify(score.percentage_score);

    NarrativeReport {
        overall_percentage: score.percentage_score,
        band,
        sections,
        strengths,
        priorities,
        conclusion: band.conclusion(),
    }
}

impl NarrativeReport {
    pub fn tier_of(&self, section_id: u32) -> Option<Tier> {
        self.sections
            .iter()
            .find(|section| section.section_id == section_id)
            .map(|section| section.tier)
    }

    /// Markdown document stored alongside the scores.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_markdown(&mut out);
        out
    }

    fn write_markdown(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "# Managerial Competency Assessment Report")?;
        writeln!(out)?;
        writeln!(out, "## Overview")?;
        writeln!(out)?;
        writeln!(out, "Overall score: {:.1}%", self.overall_percentage)?;
        writeln!(out)?;

        writeln!(out, "## Analysis by dimension")?;
        writeln!(out)?;
        for section in &self.sections {
            writeln!(out, "### {}", section.title)?;
            writeln!(
                out,
                "Score: {:.1}% ({})",
                section.percentage,
                section.tier.label()
            )?;
            writeln!(out, "{}", section.commentary)?;
            if let Some(detail) = section.detail {
                writeln!(out, "{detail}")?;
            }
            writeln!(out)?;
        }

        writeln!(out, "## Recommendations")?;
        writeln!(out)?;
        writeln!(out, "### Strengths to capitalize on")?;
        if self.strengths.is_empty() {
            writeln!(out, "No dimension scored yet.")?;
        }
        for (position, section) in self.strengths.iter().enumerate() {
            writeln!(
                out,
                "{}. {} ({:.1}%)",
                position + 1,
                section.title,
                section.percentage
            )?;
        }
        writeln!(out)?;

        writeln!(out, "### Priority development areas")?;
        if self.priorities.is_empty() {
            writeln!(out, "No dimension scored yet.")?;
        }
        for (position, section) in self.priorities.iter().enumerate() {
            writeln!(
                out,
                "{}. {} ({:.1}%): {}",
                position + 1,
                section.title,
                section.percentage,
                section.why_it_matters
            )?;
        }
        writeln!(out)?;

        writeln!(out, "### Development plan")?;
        for (position, (headline, detail)) in DEVELOPMENT_PLAN.iter().enumerate() {
            writeln!(out, "{}. **{}**: {}", position + 1, headline, detail)?;
        }
        writeln!(out)?;

        writeln!(out, "## Conclusion")?;
        writeln!(out)?;
        writeln!(out, "{}", self.conclusion)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{RadarPoint, SectionScore};

    fn aggregate_with(percentages: &[f64]) -> AggregateScore {
        let sections: Vec<SectionScore> = percentages
            .iter()
            .enumerate()
            .map(|(position, percentage)| SectionScore {
                section_id: position as u32 + 1,
                raw_sum: 0,
                max_possible: 45,
                percentage: *percentage,
            })
            .collect();
        let radar = sections
            .iter()
            .map(|section| RadarPoint {
                label: format!("S{}", section.section_id),
                score: section.percentage,
            })
            .collect();
        let overall = if percentages.is_empty() {
            0.0
        } else {
            percentages.iter().sum::<f64>() / percentages.len() as f64
        };
        AggregateScore {
            sections,
            total_score: 0,
            max_score: 45 * percentages.len() as u32,
            percentage_score: overall,
            radar,
        }
    }

    fn reference() -> Questionnaire {
        Questionnaire::reference().expect("reference questionnaire")
    }

    fn ids(entries: &[RankedSection]) -> Vec<u32> {
        entries.iter().map(|entry| entry.section_id).collect()
    }

    #[test]
    fn strengths_and_priorities_for_distinct_scores() {
        let score = aggregate_with(&[30.0, 90.0, 10.0, 70.0, 50.0, 20.0, 80.0, 60.0, 40.0]);
        let report = generate(&reference(), &score);

        assert_eq!(ids(&report.strengths), vec![2, 7, 4]);
        assert_eq!(ids(&report.priorities), vec![3, 6, 1]);
        let strengths: Vec<f64> = report.strengths.iter().map(|s| s.percentage).collect();
        assert_eq!(strengths, vec![90.0, 80.0, 70.0]);
        let priorities: Vec<f64> = report.priorities.iter().map(|s| s.percentage).collect();
        assert_eq!(priorities, vec![10.0, 20.0, 30.0]);
        assert!(report
            .strengths
            .iter()
            .all(|strength| !report.priorities.contains(strength)));
    }

    #[test]
    fn ties_keep_section_order_and_lists_stay_disjoint() {
        let score = aggregate_with(&[60.0; 9]);
        let report = generate(&reference(), &score);

        assert!(report
            .sections
            .iter()
            .all(|section| section.tier == Tier::Solid && section.detail.is_none()));
        assert_eq!(ids(&report.strengths), vec![1, 2, 3]);
        assert_eq!(ids(&report.priorities), vec![9, 8, 7]);
    }

    #[test]
    fn fewer_than_three_sections_does_not_panic() {
        let two = generate(&reference(), &aggregate_with(&[55.0, 85.0]));
        assert_eq!(ids(&two.strengths), vec![2, 1]);
        assert_eq!(ids(&two.priorities), vec![1, 2]);

        let none = generate(&reference(), &aggregate_with(&[]));
        assert!(none.strengths.is_empty());
        assert!(none.priorities.is_empty());
        assert!(none.render().contains("No dimension scored yet."));
    }

    #[test]
    fn section_detail_follows_tier() {
        let score = aggregate_with(&[85.0, 65.0, 45.0, 15.0]);
        let report = generate(&reference(), &score);

        assert_eq!(report.tier_of(1), Some(Tier::Excellence));
        assert_eq!(report.sections[0].detail, Some(section_narrative(1).excellence));
        assert_eq!(report.sections[1].detail, None);
        assert_eq!(report.sections[2].detail, Some(section_narrative(3).development));
        assert_eq!(report.tier_of(4), Some(Tier::Priority));
        assert_eq!(report.sections[3].detail, Some(section_narrative(4).development));
    }

    #[test]
    fn rendered_report_is_ordered_header_breakdown_lists_conclusion() {
        let score = aggregate_with(&[60.0; 9]);
        let text = generate(&reference(), &score).render();

        let header = text.find("Overall score: 60.0%").expect("header");
        let breakdown = text.find("## Analysis by dimension").expect("breakdown");
        let strengths = text.find("### Strengths to capitalize on").expect("strengths");
        let priorities = text.find("### Priority development areas").expect("priorities");
        let conclusion = text.find("## Conclusion").expect("conclusion");
        assert!(header < breakdown);
        assert!(breakdown < strengths);
        assert!(strengths < priorities);
        assert!(priorities < conclusion);

        assert!(text.contains("### Leadership and Vision\nScore: 60.0% (Solid)"));
        assert!(text.contains(ProfileBand::Good.conclusion()));
    }

    #[test]
    fn conclusion_tracks_overall_band() {
        let strong = generate(&reference(), &aggregate_with(&[75.0; 9]));
        assert_eq!(strong.band, ProfileBand::Strong);
        let emerging = generate(&reference(), &aggregate_with(&[35.0; 9]));
        assert_eq!(emerging.band, ProfileBand::Emerging);
        assert_eq!(emerging.conclusion, ProfileBand::Emerging.conclusion());
    }
}
