use crate::explanation::generator::DETAIL_SEPARATOR;
use crate::explanation::types::Explanation;
use crate::ranking::{RankedCandidate, Ranking};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Markdown formatter for rankings and explanations
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format a full ranking report
    pub fn format_ranking(ranking: &Ranking) -> String {
        if ranking.is_empty() {
            return "No valid blueprint options to compare.\n".to_string();
        }

        let mut md = String::with_capacity(512 * ranking.len());
        md.push_str("# Blueprint Ranking\n\n");

        for (index, candidate) in ranking.iter().enumerate() {
            Self::format_candidate(&mut md, index, candidate);
        }

        let ties = ranking.ties();
        if !ties.is_empty() {
            md.push_str("## Ties\n\n");
            for group in ties {
                let names: Vec<&str> = group.iter().map(|c| c.building_name.as_str()).collect();
                md.push_str(&format!(
                    "- {} ({} points)\n",
                    names.join(", "),
                    group[0].score.total
                ));
            }
            md.push('\n');
        }

        if let Some(winner) = ranking.winner() {
            md.push_str(&format!(
                "**Recommended: {} with {}/100 points**\n",
                winner.building_name, winner.score.total
            ));
        }

        md
    }

    /// Format a single explanation with its total
    pub fn format_explanation(explanation: &Explanation, total: i64) -> String {
        let mut md = String::with_capacity(256);
        md.push_str(&format!("# {}\n\n", explanation.building_name));
        md.push_str(&format!("**{}/100** ({})\n\n", total, explanation.tier.label()));
        Self::format_body(&mut md, explanation);
        md
    }

    fn format_candidate(md: &mut String, index: usize, candidate: &RankedCandidate) {
        let heading = match MEDALS.get(index) {
            Some(medal) => format!("## {} #{} - {}\n\n", medal, index + 1, candidate.building_name),
            None => format!("## #{} - {}\n\n", index + 1, candidate.building_name),
        };
        md.push_str(&heading);
        md.push_str(&format!(
            "**{}/100** ({})\n\n",
            candidate.score.total,
            candidate.explanation.tier.label()
        ));
        Self::format_body(md, &candidate.explanation);
    }

    fn format_body(md: &mut String, explanation: &Explanation) {
        if !explanation.detail.is_empty() {
            md.push_str(&format!("{}\n\n", explanation.detail));
        }
        if !explanation.breakdown.is_empty() {
            md.push_str(&format!(
                "*Score Breakdown:* {}\n\n",
                explanation.breakdown.join(DETAIL_SEPARATOR)
            ));
        }
    }
}
