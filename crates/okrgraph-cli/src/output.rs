//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use colored::*;
use okrgraph_domain::{
    EdgeStyle, KeyResult, KeyResultRelation, Objective, ObjectiveRelation,
};
use okrgraph_engine::{DeleteReport, Forest, RelationBundle, Upserted};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of objectives.
    pub fn objectives(&self, objectives: &[Objective]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(objectives)?),
            OutputFormat::Quiet => Ok(join_ids(objectives.iter().map(|o| o.id))),
            OutputFormat::Table => {
                if objectives.is_empty() {
                    return Ok(self.colorize("No objectives found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Level", "Status", "Owner"]);
                for objective in objectives {
                    builder.push_record([
                        objective.id.to_string(),
                        objective.title.clone(),
                        objective.level.as_str().to_string(),
                        objective.status.as_str().to_string(),
                        objective.owner_id.to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a list of key results.
    pub fn key_results(&self, key_results: &[KeyResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(key_results)?),
            OutputFormat::Quiet => Ok(join_ids(key_results.iter().map(|kr| kr.id))),
            OutputFormat::Table => {
                if key_results.is_empty() {
                    return Ok(self.colorize("No key results found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Objective", "Description", "Target"]);
                for kr in key_results {
                    builder.push_record([
                        kr.id.to_string(),
                        kr.objective_id.to_string(),
                        kr.description.clone(),
                        format!("{} {}", kr.target_value, kr.unit).trim_end().to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a newly created objective.
    pub fn objective_added(&self, objective: &Objective) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(objective)?),
            OutputFormat::Quiet => Ok(objective.id.to_string()),
            OutputFormat::Table => Ok(self.success(&format!(
                "Objective added: {} {}",
                objective.id, objective.title
            ))),
        }
    }

    /// Format a newly created key result.
    pub fn key_result_added(&self, key_result: &KeyResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(key_result)?),
            OutputFormat::Quiet => Ok(key_result.id.to_string()),
            OutputFormat::Table => Ok(self.success(&format!(
                "Key result added: {} under {}",
                key_result.id, key_result.objective_id
            ))),
        }
    }

    /// Format the result of an objective relation upsert.
    pub fn objective_relation_upserted(
        &self,
        upserted: &Upserted<ObjectiveRelation>,
    ) -> Result<String> {
        let relation = &upserted.relation;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "outcome": upserted.outcome.as_str(),
                "relation": relation,
            }))?),
            OutputFormat::Quiet => Ok(relation.id.to_string()),
            OutputFormat::Table => Ok(self.success(&format!(
                "Relation {} {}: {} {} {} (weight {:.2})",
                relation.id,
                upserted.outcome.as_str(),
                relation.origin,
                relation.relation_type,
                relation.destination,
                relation.weight
            ))),
        }
    }

    /// Format the result of a key-result relation upsert.
    pub fn key_result_relation_upserted(
        &self,
        upserted: &Upserted<KeyResultRelation>,
    ) -> Result<String> {
        let relation = &upserted.relation;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "outcome": upserted.outcome.as_str(),
                "relation": relation,
            }))?),
            OutputFormat::Quiet => Ok(relation.id.to_string()),
            OutputFormat::Table => Ok(self.success(&format!(
                "Relation {} {}: {} {} {} (weight {:.2}, impact {:.1}%)",
                relation.id,
                upserted.outcome.as_str(),
                relation.objective_id,
                relation.relation_type,
                relation.key_result_id,
                relation.contribution_weight,
                relation.impact_percent
            ))),
        }
    }

    /// Format a hierarchy forest as an indented tree.
    pub fn forest(&self, forest: &Forest) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(forest)?),
            OutputFormat::Quiet => Ok(forest
                .walk()
                .map(|(depth, node)| format!("{}{}", "  ".repeat(depth - 1), node.id()))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if forest.is_empty() {
                    return Ok(self.colorize("No objectives found.", "yellow"));
                }

                let lines: Vec<String> = forest
                    .walk()
                    .map(|(depth, node)| {
                        let objective = &node.objective;
                        let label = format!(
                            "{} {} [{}]",
                            objective.id,
                            objective.title,
                            objective.level.as_str()
                        );
                        match &node.via {
                            None => self.colorize(&label, "cyan"),
                            Some(edge) => {
                                let edge_label = self.edge(
                                    &format!("{} {:.2}", edge.relation_type, edge.weight),
                                    &edge.style,
                                );
                                let indent = "   ".repeat(depth.saturating_sub(2));
                                format!("{}└─ {} ({})", indent, label, edge_label)
                            }
                        }
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the relations touching one objective.
    pub fn bundle(&self, bundle: &RelationBundle) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(bundle)?),
            OutputFormat::Quiet => Ok(join_ids(
                bundle
                    .as_origin
                    .iter()
                    .chain(&bundle.as_destination)
                    .map(|r| r.id)
                    .chain(
                        bundle
                            .key_results
                            .iter()
                            .chain(&bundle.owned_key_results)
                            .map(|r| r.id),
                    ),
            )),
            OutputFormat::Table => {
                let title = format!("{} {}", bundle.objective.id, bundle.objective.title);
                if bundle.is_empty() {
                    return Ok(format!(
                        "{}\n{}",
                        self.colorize(&title, "cyan"),
                        self.colorize("No relations found.", "yellow")
                    ));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "ID",
                    "Direction",
                    "Other",
                    "Type",
                    "Weight",
                    "Impact",
                    "State",
                ]);
                let objective_sides = [
                    ("outgoing", &bundle.as_origin),
                    ("incoming", &bundle.as_destination),
                ];
                for (direction, relations) in objective_sides {
                    for r in relations {
                        let other = if direction == "outgoing" {
                            r.destination
                        } else {
                            r.origin
                        };
                        builder.push_record([
                            r.id.to_string(),
                            direction.to_string(),
                            other.to_string(),
                            r.relation_type.label().to_string(),
                            format!("{:.2}", r.weight),
                            String::new(),
                            r.state.as_str().to_string(),
                        ]);
                    }
                }
                for r in &bundle.key_results {
                    builder.push_record([
                        r.id.to_string(),
                        "key result".to_string(),
                        r.key_result_id.to_string(),
                        r.relation_type.label().to_string(),
                        format!("{:.2}", r.contribution_weight),
                        format!("{:.1}%", r.impact_percent),
                        r.state.as_str().to_string(),
                    ]);
                }
                for r in &bundle.owned_key_results {
                    builder.push_record([
                        r.id.to_string(),
                        format!("owned {}", r.key_result_id),
                        r.objective_id.to_string(),
                        r.relation_type.label().to_string(),
                        format!("{:.2}", r.contribution_weight),
                        format!("{:.1}%", r.impact_percent),
                        r.state.as_str().to_string(),
                    ]);
                }
                Ok(format!("{}\n{}", self.colorize(&title, "cyan"), render(builder)))
            }
        }
    }

    /// Format an edge style.
    pub fn style(&self, relation_type: &str, weight: f64, style: &EdgeStyle) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(style)?),
            OutputFormat::Quiet => Ok(format!(
                "{} {} {}",
                style.color,
                style.line_style.as_str(),
                style.thickness
            )),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Type", "Weight", "Color", "Line", "Thickness"]);
                builder.push_record([
                    relation_type.to_string(),
                    format!("{:.2}", weight),
                    self.edge(style.color, style),
                    style.line_style.as_str().to_string(),
                    style.thickness.to_string(),
                ]);
                Ok(render(builder))
            }
        }
    }

    /// Format the effective configuration.
    pub fn config(&self, config: &Config) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
            OutputFormat::Table | OutputFormat::Quiet => toml::to_string_pretty(config)
                .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e))),
        }
    }

    /// Format the outcome of an objective deletion.
    pub fn deleted(&self, report: &DeleteReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.objective.id.to_string()),
            OutputFormat::Table => Ok(self.success(&format!(
                "Objective deleted: {} ({} key result(s) removed, {} relation(s) retired)",
                report.objective.id, report.key_results, report.retired_relations
            ))),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether the output is machine-readable.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Color `text` with the stroke color of an edge.
    fn edge(&self, text: &str, style: &EdgeStyle) -> String {
        match (self.color_enabled, hex_to_rgb(style.color)) {
            (true, Some((r, g, b))) => text.truecolor(r, g, b).to_string(),
            _ => text.to_string(),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_ids<T: ToString>(ids: impl Iterator<Item = T>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join("\n")
}

/// Parse `#rrggbb`.
fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use okrgraph_domain::{style_for, Level, ObjectiveId, ObjectiveStatus, OwnerId, RelationType};
    use okrgraph_engine::HierarchyBuilder;

    fn objective(id: i64, title: &str) -> Objective {
        Objective {
            id: ObjectiveId::new(id),
            title: title.to_string(),
            description: String::new(),
            level: Level::Company,
            status: ObjectiveStatus::Active,
            owner_id: OwnerId::new(1),
        }
    }

    fn forest() -> Forest {
        let relation = okrgraph_domain::NewObjectiveRelation {
            origin: ObjectiveId::new(2),
            destination: ObjectiveId::new(1),
            relation_type: RelationType::ContributesTo,
            weight: 0.6,
            description: None,
        }
        .into_relation(okrgraph_domain::RelationId::new(1));

        HierarchyBuilder::default()
            .build(&[objective(1, "Grow"), objective(2, "Ship")], &[relation])
            .unwrap()
    }

    #[test]
    fn test_forest_tree() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.forest(&forest()).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "O-1 Grow [company]");
        assert_eq!(lines[1], "└─ O-2 Ship [company] (contribuye_a 0.60)");
    }

    #[test]
    fn test_forest_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.forest(&forest()).unwrap(), "O-1\n  O-2");
    }

    #[test]
    fn test_forest_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.forest(&forest()).unwrap();
        assert!(output.contains("\"relation_type\": \"contribuye_a\""));
        assert!(output.contains("\"thickness\": 2"));
    }

    #[test]
    fn test_bundle_table_lists_owned_key_result_relations() {
        let bundle = RelationBundle {
            objective: objective(1, "Grow"),
            as_origin: Vec::new(),
            as_destination: Vec::new(),
            key_results: Vec::new(),
            owned_key_results: vec![okrgraph_domain::NewKeyResultRelation {
                objective_id: ObjectiveId::new(2),
                key_result_id: okrgraph_domain::KeyResultId::new(5),
                relation_type: RelationType::ContributesTo,
                contribution_weight: 0.5,
                impact_percent: 10.0,
                description: None,
            }
            .into_relation(okrgraph_domain::RelationId::new(3))],
        };

        let table = Formatter::new(OutputFormat::Table, false)
            .bundle(&bundle)
            .unwrap();
        assert!(table.contains("owned KR-5"));
        assert!(table.contains("contributes to"));
        assert!(table.contains("O-2"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .bundle(&bundle)
            .unwrap();
        assert_eq!(quiet, "R-3");
    }

    #[test]
    fn test_objectives_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.objectives(&[objective(1, "Grow")]).unwrap();
        assert!(output.contains("Title"));
        assert!(output.contains("Grow"));

        let empty = formatter.objectives(&[]).unwrap();
        assert!(empty.contains("No objectives found"));
    }

    #[test]
    fn test_style_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let style = style_for(RelationType::Follows, 1.0);
        assert_eq!(
            formatter.style("sucede_a", 1.0, &style).unwrap(),
            "#6a1b9a dotted 3"
        );
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#2e7d32"), Some((0x2e, 0x7d, 0x32)));
        assert_eq!(hex_to_rgb("2e7d32"), None);
        assert_eq!(hex_to_rgb("#zz0000"), None);
    }
}
