//! Graph payload for the browser visualization
//!
//! Nodes are the exported records (id = name). Groups are built either from
//! interest areas, where a professor can sit in several groups, or from the
//! normalized specialization, where every professor sits in exactly one.

use crate::error::{Error, Result};
use crate::types::ClassifiedProfessorRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// Grouping key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupBy {
    #[default]
    InterestAreas,
    Specialization,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "interest_areas" | "interests" => Ok(GroupBy::InterestAreas),
            "specialization" | "normalized_specialization" => Ok(GroupBy::Specialization),
            _ => Err(format!(
                "Unknown grouping: {}. Use interest-areas or specialization",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<Value>,
    pub groups: Vec<Group>,
}

/// Build nodes and groups, groups in first-seen order
pub fn build_graph(records: &[ClassifiedProfessorRecord], group_by: GroupBy) -> Result<GraphPayload> {
    let mut nodes = Vec::with_capacity(records.len());
    for record in records {
        let mut node = serde_json::to_value(record)?;
        match node.as_object_mut() {
            Some(obj) => {
                obj.insert("id".to_string(), Value::String(record.name.clone()));
            }
            None => return Err(Error::Parse(format!("record {} is not an object", record.name))),
        }
        nodes.push(node);
    }

    let mut groups: Vec<Group> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut add = |group: &str, member: &str| {
        let pos = *positions.entry(group.to_string()).or_insert_with(|| {
            groups.push(Group {
                name: group.to_string(),
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[pos].members.push(member.to_string());
    };

    for record in records {
        match group_by {
            GroupBy::InterestAreas => {
                for area in &record.interest_areas {
                    add(area, &record.name);
                }
            }
            GroupBy::Specialization => add(&record.normalized_specialization, &record.name),
        }
    }

    Ok(GraphPayload { nodes, groups })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, spec: &str, areas: &[&str]) -> ClassifiedProfessorRecord {
        ClassifiedProfessorRecord {
            name: name.to_string(),
            normalized_specialization: spec.to_string(),
            interest_areas: areas.iter().map(|a| a.to_string()).collect(),
            interest_scores: areas.iter().map(|_| 0.5).collect(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<ClassifiedProfessorRecord> {
        vec![
            record("Ana Ruiz", "Physics", &["Energy", "Materials"]),
            record("Luis Soto", "Computer Science", &["Materials"]),
            record("Eva Paz", "Physics", &[]),
        ]
    }

    #[test]
    fn test_group_by_interest_areas_multi_membership() {
        let graph = build_graph(&sample(), GroupBy::InterestAreas).unwrap();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(
            graph.groups,
            vec![
                Group { name: "Energy".into(), members: vec!["Ana Ruiz".into()] },
                Group { name: "Materials".into(), members: vec!["Ana Ruiz".into(), "Luis Soto".into()] },
            ]
        );
    }

    #[test]
    fn test_group_by_specialization_exclusive() {
        let graph = build_graph(&sample(), GroupBy::Specialization).unwrap();
        let total: usize = graph.groups.iter().map(|g| g.members.len()).sum();
        assert_eq!(total, 3);
        assert_eq!(graph.groups[0].name, "Physics");
        assert_eq!(graph.groups[0].members, vec!["Ana Ruiz", "Eva Paz"]);
    }

    #[test]
    fn test_nodes_carry_id() {
        let graph = build_graph(&sample(), GroupBy::Specialization).unwrap();
        assert_eq!(graph.nodes[1]["id"], "Luis Soto");
        assert_eq!(graph.nodes[1]["name"], "Luis Soto");
    }

    #[test]
    fn test_empty_records() {
        let graph = build_graph(&[], GroupBy::InterestAreas).unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.groups.is_empty());
    }

    #[test]
    fn test_group_by_from_str() {
        assert_eq!("interest-areas".parse::<GroupBy>(), Ok(GroupBy::InterestAreas));
        assert_eq!("specialization".parse::<GroupBy>(), Ok(GroupBy::Specialization));
        assert!("university".parse::<GroupBy>().is_err());
    }
}
