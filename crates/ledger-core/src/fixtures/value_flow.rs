use crate::model::{FlowCategory, FlowGraph, FlowLink, FlowNode};

fn node(id: &str, name: &str, category: FlowCategory) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        name: name.to_string(),
        category,
    }
}

fn link(source: &str, target: &str, value: f64, description: &str) -> FlowLink {
    FlowLink {
        source: source.to_string(),
        target: target.to_string(),
        value,
        description: description.to_string(),
    }
}

fn actors() -> Vec<FlowNode> {
    use FlowCategory::*;
    vec![
        node("storytellers", "Storytellers", People),
        node("media", "Media Organizations", Institution),
        node("nonprofits", "Nonprofits", Institution),
        node("government", "Government Agencies", Institution),
        node("foundations", "Foundations", Institution),
        node("corporations", "Corporations", Institution),
        node("financial", "Financial Value", Value),
        node("social", "Social Value", Value),
        node("reputational", "Reputational Value", Value),
        node("impact", "Impact Value", Value),
    ]
}

fn generated_value() -> Vec<FlowLink> {
    vec![
        link("storytellers", "financial", 100.0, "Stories generate financial value"),
        link("storytellers", "social", 150.0, "Stories generate social value"),
        link("storytellers", "reputational", 120.0, "Stories generate reputational value"),
        link("storytellers", "impact", 180.0, "Stories generate impact value"),
    ]
}

/// Value flows where institutions keep what stories generate.
pub fn traditional() -> FlowGraph {
    let mut links = generated_value();
    links.extend([
        link("financial", "media", 40.0, "Media organizations monetize stories"),
        link("financial", "nonprofits", 20.0, "Nonprofits raise funds using stories"),
        link("financial", "foundations", 5.0, "Foundations gain donations through impact stories"),
        link("financial", "corporations", 30.0, "Corporations profit from storytelling"),
        link("social", "media", 30.0, "Media builds audience through stories"),
        link("social", "nonprofits", 40.0, "Nonprofits build movements with stories"),
        link("social", "foundations", 25.0, "Foundations demonstrate social impact"),
        link("social", "government", 35.0, "Government builds social programs"),
        link("reputational", "media", 25.0, "Media gains credibility"),
        link("reputational", "nonprofits", 30.0, "Nonprofits build brand recognition"),
        link("reputational", "foundations", 25.0, "Foundations enhance their image"),
        link("reputational", "corporations", 30.0, "Corporate brand enhancement"),
        link("impact", "nonprofits", 50.0, "Nonprofits claim impact achievements"),
        link("impact", "foundations", 45.0, "Foundations demonstrate effectiveness"),
        link("impact", "government", 40.0, "Government shows policy success"),
        link("impact", "corporations", 25.0, "Corporate social responsibility claims"),
    ]);
    FlowGraph {
        nodes: actors(),
        links,
    }
}

/// Value flows where every institution returns value to a separate benefit node.
///
/// The benefit node is distinct from `storytellers` so the graph stays acyclic.
pub fn equitable() -> FlowGraph {
    let mut nodes = actors();
    nodes.push(node(
        "storyteller_benefit",
        "Storyteller Benefit",
        FlowCategory::People,
    ));

    let mut links = generated_value();
    links.extend([
        link("financial", "media", 20.0, "Media organizations share story value"),
        link("financial", "nonprofits", 15.0, "Nonprofits share fundraising proceeds"),
        link("financial", "foundations", 5.0, "Foundations provide direct support"),
        link("financial", "corporations", 15.0, "Corporations pay fair licensing"),
        link("social", "media", 20.0, "Media platforms share social capital"),
        link("social", "nonprofits", 25.0, "Nonprofits co-create movements"),
        link("social", "foundations", 15.0, "Foundations facilitate networks"),
        link("social", "government", 20.0, "Government provides social infrastructure"),
        link("reputational", "media", 15.0, "Media shares storyteller platform"),
        link("reputational", "nonprofits", 20.0, "Nonprofits highlight storyteller contributions"),
        link("reputational", "foundations", 15.0, "Foundations center storyteller expertise"),
        link("reputational", "corporations", 15.0, "Corporate recognition of stories"),
        link("impact", "nonprofits", 25.0, "Nonprofits collaborate on impact claims"),
        link("impact", "foundations", 20.0, "Foundations share impact credit"),
        link("impact", "government", 25.0, "Government acknowledges community contribution"),
        link("impact", "corporations", 10.0, "Transparent corporate impact reporting"),
        link(
            "media",
            "storyteller_benefit",
            20.0,
            "Media organizations return value (revenue, recognition, platform) to storytellers",
        ),
        link(
            "nonprofits",
            "storyteller_benefit",
            20.0,
            "Nonprofits return value (support, co-created impact) to storytellers",
        ),
        link(
            "government",
            "storyteller_benefit",
            20.0,
            "Government returns value (policy, resources, recognition) to storytellers",
        ),
        link(
            "foundations",
            "storyteller_benefit",
            20.0,
            "Foundations return value (direct support, funding, capacity) to storytellers",
        ),
        link(
            "corporations",
            "storyteller_benefit",
            20.0,
            "Corporations return value (licensing, royalties, recognition) to storytellers",
        ),
    ]);
    FlowGraph { nodes, links }
}
