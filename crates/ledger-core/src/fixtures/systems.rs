use crate::model::{FeedbackLoop, NarrativeIntervention, SystemDimension};

fn intervention(id: &str, name: &str, description: &str, impact_score: f64) -> NarrativeIntervention {
    NarrativeIntervention {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        impact_score,
    }
}

fn dimension(
    id: &str,
    name: &str,
    description: &str,
    levels: (f64, f64),
    narrative_interventions: Vec<NarrativeIntervention>,
) -> SystemDimension {
    SystemDimension {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        baseline_level: levels.0,
        transformed_level: levels.1,
        narrative_interventions,
    }
}

pub fn dimensions() -> Vec<SystemDimension> {
    vec![
        dimension(
            "power_dynamics",
            "Power Dynamics",
            "How power is distributed, shared, and exercised",
            (30.0, 70.0),
            vec![
                intervention(
                    "power_int1",
                    "Narrative Authority Redistribution",
                    "Shifting who controls, owns, and benefits from stories",
                    80.0,
                ),
                intervention(
                    "power_int2",
                    "Power-Aware Storytelling",
                    "Making visible the hidden power dynamics that shape systems",
                    75.0,
                ),
            ],
        ),
        dimension(
            "resource_flows",
            "Resource Flows",
            "How money, information, and other resources move through the system",
            (40.0, 75.0),
            vec![
                intervention(
                    "resource_int1",
                    "Value Flow Visualization",
                    "Making visible who benefits from and produces value",
                    70.0,
                ),
                intervention(
                    "resource_int2",
                    "Resource Justice Narratives",
                    "Stories that highlight and challenge extractive patterns",
                    80.0,
                ),
            ],
        ),
        dimension(
            "policy_practices",
            "Policy & Practices",
            "Formal and informal rules that govern behavior",
            (45.0, 85.0),
            vec![
                intervention(
                    "policy_int1",
                    "Policy Story Bridges",
                    "Connecting lived experience directly to policy formation",
                    85.0,
                ),
                intervention(
                    "policy_int2",
                    "Practice-Challenging Narratives",
                    "Stories that make visible the consequences of current practices",
                    75.0,
                ),
            ],
        ),
        dimension(
            "rel_connections",
            "Relationships & Connections",
            "The quality and nature of connections between system actors",
            (25.0, 80.0),
            vec![
                intervention(
                    "rel_int1",
                    "Relational Storytelling",
                    "Creating spaces for authentic narrative exchange across divides",
                    90.0,
                ),
                intervention(
                    "rel_int2",
                    "Connection Cartography",
                    "Mapping and visualizing relationship networks and gaps",
                    70.0,
                ),
            ],
        ),
        dimension(
            "mental_models",
            "Mental Models",
            "The underlying beliefs, assumptions and paradigms guiding the system",
            (20.0, 65.0),
            vec![
                intervention(
                    "mental_int1",
                    "Paradigm-Shifting Stories",
                    "Narratives that challenge fundamental assumptions",
                    85.0,
                ),
                intervention(
                    "mental_int2",
                    "Metaphor Transformation",
                    "Shifting the core metaphors that shape understanding",
                    80.0,
                ),
            ],
        ),
    ]
}

fn feedback_loop(id: &str, name: &str, description: &str, connections: &[&str]) -> FeedbackLoop {
    FeedbackLoop {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        connections: connections.iter().map(|c| c.to_string()).collect(),
        reinforcing: true,
    }
}

pub fn loops() -> Vec<FeedbackLoop> {
    vec![
        feedback_loop(
            "loop1",
            "Narrative Authority Loop",
            "As power dynamics shift to center storyteller sovereignty, relationships transform, which in turn further redistributes power",
            &["power_dynamics", "rel_connections", "power_dynamics"],
        ),
        feedback_loop(
            "loop2",
            "Mental Model Transformation Circuit",
            "Changes in mental models lead to policy reforms, which alter resource flows, further reinforcing new mental models",
            &["mental_models", "policy_practices", "resource_flows", "mental_models"],
        ),
        feedback_loop(
            "loop3",
            "Resource Justice Cycle",
            "More equitable resource flows strengthen relationships, which enable more inclusive policy-making, reinforcing equitable resource distribution",
            &["resource_flows", "rel_connections", "policy_practices", "resource_flows"],
        ),
    ]
}
