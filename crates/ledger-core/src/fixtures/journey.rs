use crate::model::{Checkpoint, JourneyStage, StageKind};

fn stage(
    id: &str,
    name: &str,
    kind: StageKind,
    sovereignty_level: f64,
    description: &str,
    tooltip: &str,
) -> JourneyStage {
    JourneyStage {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        sovereignty_level,
        description: description.to_string(),
        tooltip: tooltip.to_string(),
    }
}

pub fn stages() -> Vec<JourneyStage> {
    use StageKind::*;
    vec![
        stage(
            "storyteller",
            "Storyteller",
            Origin,
            100.0,
            "The originator and rightful owner of the narrative",
            "Stories begin with lived experience",
        ),
        stage(
            "collection",
            "Story Collection",
            Process,
            90.0,
            "The process of recording and documenting stories",
            "Ethical collection respects agency",
        ),
        stage(
            "curation",
            "Curation",
            Process,
            70.0,
            "Selection and organization of stories",
            "Editorial decisions can shape meaning",
        ),
        stage(
            "amplification",
            "Amplification",
            Process,
            65.0,
            "Distribution and sharing of stories",
            "Wider audiences introduce new contexts",
        ),
        stage(
            "institutional",
            "Institutional Use",
            Application,
            40.0,
            "Utilization by governments, foundations, etc.",
            "Often disconnected from original context",
        ),
        stage(
            "policy",
            "Policy Impact",
            Impact,
            25.0,
            "Influence on formal decisions and policy",
            "Abstracted from individual narratives",
        ),
    ]
}

pub fn checkpoints() -> Vec<Checkpoint> {
    let rows = [
        ("consent", "Consent Framework", 1, "Granular, revocable consent mechanisms", 85.0),
        ("attribution", "Attribution System", 2, "Ensures proper credit and context preservation", 70.0),
        ("review", "Storyteller Review", 3, "Opportunity to approve final representations", 90.0),
        ("valueExchange", "Value Exchange", 4, "Fair compensation for narrative value", 75.0),
        ("governance", "Governance Participation", 5, "Storyteller voice in decision-making", 60.0),
    ];
    rows.iter()
        .map(|(id, name, position, description, effectiveness)| Checkpoint {
            id: id.to_string(),
            name: name.to_string(),
            position: *position,
            description: description.to_string(),
            effectiveness: *effectiveness,
        })
        .collect()
}
