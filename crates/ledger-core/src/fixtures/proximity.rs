use crate::model::{
    EntityCategory, ProximityConnection, ProximityEntities, ProximityEntity,
    ProximityIntervention, StrengthChange,
};

const FOUNDATION_COLOR: &str = "#8b5cf6";
const INTERMEDIARY_COLOR: &str = "#f59e0b";
const COMMUNITY_COLOR: &str = "#10b981";

fn entity(id: &str, name: &str, category: EntityCategory, size: f64) -> ProximityEntity {
    let color = match category {
        EntityCategory::Foundation => FOUNDATION_COLOR,
        EntityCategory::Intermediary => INTERMEDIARY_COLOR,
        EntityCategory::Community => COMMUNITY_COLOR,
    };
    ProximityEntity {
        id: id.to_string(),
        name: name.to_string(),
        category,
        size,
        color: color.to_string(),
    }
}

pub fn entities() -> ProximityEntities {
    use EntityCategory::*;
    ProximityEntities {
        foundations: vec![
            entity("f1", "Horizon Foundation", Foundation, 85.0),
            entity("f2", "Seachange Trust", Foundation, 65.0),
            entity("f3", "Watershed Fund", Foundation, 45.0),
        ],
        intermediaries: vec![
            entity("i1", "Consulting Firm", Intermediary, 30.0),
            entity("i2", "Program Officer", Intermediary, 25.0),
            entity("i3", "Evaluation Team", Intermediary, 28.0),
            entity("i4", "Grant Writer", Intermediary, 20.0),
            entity("i5", "Communications Team", Intermediary, 22.0),
        ],
        communities: vec![
            entity("c1", "Local Advocates", Community, 40.0),
            entity("c2", "Youth Leaders", Community, 35.0),
            entity("c3", "Cultural Center", Community, 38.0),
            entity("c4", "Neighborhood Council", Community, 42.0),
            entity("c5", "Health Collective", Community, 36.0),
            entity("c6", "Parents Group", Community, 30.0),
        ],
    }
}

pub fn connections() -> Vec<ProximityConnection> {
    let rows = [
        ("f1", "c1", 0.2),
        ("f2", "c2", 0.1),
        ("f1", "i1", 0.8),
        ("i1", "c1", 0.6),
        ("i1", "c3", 0.4),
        ("f1", "i2", 0.9),
        ("i2", "i3", 0.7),
        ("i3", "c2", 0.5),
        ("i3", "c4", 0.4),
        ("f2", "i4", 0.8),
        ("i4", "c3", 0.6),
        ("i4", "c5", 0.3),
        ("f3", "i5", 0.9),
        ("i5", "i3", 0.6),
        ("i5", "c6", 0.2),
    ];
    rows.iter()
        .map(|(source, target, strength)| ProximityConnection {
            source: source.to_string(),
            target: target.to_string(),
            strength: *strength,
            direct: true,
        })
        .collect()
}

fn change(source: &str, target: &str, new_strength: f64) -> StrengthChange {
    StrengthChange {
        source: source.to_string(),
        target: target.to_string(),
        new_strength,
    }
}

pub fn interventions() -> Vec<ProximityIntervention> {
    vec![
        ProximityIntervention {
            id: "int1".to_string(),
            name: "Direct Community Embedding".to_string(),
            description: "Foundation staff spend 20% of their time embedded in communities"
                .to_string(),
            impact: 0.85,
            transformations: vec![
                change("f1", "c1", 0.8),
                change("f1", "c2", 0.7),
                change("f1", "c3", 0.6),
                change("f2", "c4", 0.7),
                change("f2", "c5", 0.65),
            ],
        },
        ProximityIntervention {
            id: "int2".to_string(),
            name: "Community Decision Authority".to_string(),
            description: "Communities have direct authority over 30% of grant decisions"
                .to_string(),
            impact: 0.9,
            // Reversed direction: community to foundation.
            transformations: vec![
                change("c1", "f1", 0.7),
                change("c2", "f1", 0.6),
                change("c3", "f2", 0.6),
                change("c4", "f2", 0.65),
                change("c5", "f3", 0.7),
            ],
        },
        ProximityIntervention {
            id: "int3".to_string(),
            name: "Intermediary Transformation".to_string(),
            description:
                "Retraining intermediaries as facilitative bridges rather than gatekeepers"
                    .to_string(),
            impact: 0.75,
            transformations: vec![
                change("i1", "c1", 0.9),
                change("i2", "c2", 0.8),
                change("i3", "c3", 0.85),
                change("i4", "c4", 0.75),
                change("i5", "c5", 0.8),
            ],
        },
    ]
}
