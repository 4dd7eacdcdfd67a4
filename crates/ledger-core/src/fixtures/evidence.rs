use crate::model::{Evidence, EvidenceCaseStudy, EvidenceKind, IntegrationApproach};

fn evidence(kind: EvidenceKind, name: &str, description: &str, impact: &str, strength: f64) -> Evidence {
    Evidence {
        kind,
        name: name.to_string(),
        description: description.to_string(),
        impact: impact.to_string(),
        strength,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn case_studies() -> Vec<EvidenceCaseStudy> {
    use EvidenceKind::*;
    vec![
        EvidenceCaseStudy {
            id: "cs1".to_string(),
            title: "Melbourne Youth Justice Reform".to_string(),
            context: "High rates of youth incarceration, particularly among Indigenous populations".to_string(),
            challenge: "Policymakers resistant to reform despite extensive data on negative outcomes".to_string(),
            evidence_types: vec![
                evidence(
                    Quantitative,
                    "Statistical Analysis",
                    "Analysis of recidivism rates across different intervention types",
                    "Demonstrated 85% higher recidivism for incarceration vs. diversion",
                    80.0,
                ),
                evidence(
                    Qualitative,
                    "Program Evaluation",
                    "Evaluations of alternative justice programs",
                    "Identified key success factors across different program models",
                    75.0,
                ),
                evidence(
                    Narrative,
                    "Youth Stories",
                    "First-person accounts from youth with justice system contact",
                    "Revealed systemic barriers to rehabilitation not visible in data",
                    90.0,
                ),
            ],
            tension: "Statistical analysis showed some diversion programs performed worse than others, while youth narratives uniformly preferred any diversion to incarceration".to_string(),
            resolution: "Created a hybrid evidence model that used statistics to optimize programs while using narratives to prioritize diversion approaches".to_string(),
            outcome: "Policy reform combining diversion with enhanced support services, resulting in 47% reduction in youth incarceration over three years".to_string(),
            quote: "The numbers told us what worked, but the stories told us why it worked. We needed both to design effective reforms.".to_string(),
        },
        EvidenceCaseStudy {
            id: "cs2".to_string(),
            title: "Rural Healthcare Access Initiative".to_string(),
            context: "Limited healthcare access in remote farming communities".to_string(),
            challenge: "Data showed high need but conventional models financially unsustainable".to_string(),
            evidence_types: vec![
                evidence(
                    Quantitative,
                    "Geospatial Analysis",
                    "Mapping of healthcare deserts and transportation barriers",
                    "Identified 32 communities with critical access barriers",
                    85.0,
                ),
                evidence(
                    Qualitative,
                    "Provider Interviews",
                    "Structured interviews with rural healthcare providers",
                    "Documented barriers to recruitment and retention",
                    70.0,
                ),
                evidence(
                    Narrative,
                    "Community Health Stories",
                    "Recorded experiences of rural residents seeking care",
                    "Revealed patterns of delayed care causing preventable emergencies",
                    85.0,
                ),
            ],
            tension: "Cost-benefit analysis suggested centralizing services, while community narratives emphasized need for local access points".to_string(),
            resolution: "Developed a hybrid model combining centralized specialty care with distributed primary care, informed by community priorities".to_string(),
            outcome: "Implementation of mobile health units and telehealth hubs, resulting in 68% improvement in preventative care access".to_string(),
            quote: "The difference was striking - when we designed based on community stories first, then optimized with data, we created solutions that actually got used.".to_string(),
        },
        EvidenceCaseStudy {
            id: "cs3".to_string(),
            title: "Indigenous Climate Adaptation Strategy".to_string(),
            context: "Increasing climate impacts on coastal Indigenous communities".to_string(),
            challenge: "Scientific projections not aligned with community priorities and knowledge".to_string(),
            evidence_types: vec![
                evidence(
                    Quantitative,
                    "Climate Modeling",
                    "Projected impacts of sea level rise and extreme weather",
                    "Identified high-risk zones requiring immediate intervention",
                    75.0,
                ),
                evidence(
                    Qualitative,
                    "Cultural Site Assessment",
                    "Mapping of culturally significant areas at risk",
                    "Prioritized protection of sacred and community gathering areas",
                    80.0,
                ),
                evidence(
                    Narrative,
                    "Elder Knowledge",
                    "Traditional ecological knowledge from community elders",
                    "Provided historical context on prior adaptations and resilience strategies",
                    90.0,
                ),
            ],
            tension: "Scientific models recommended relocation of some communities, while Elder narratives emphasized the possibility of adaptation in place".to_string(),
            resolution: "Co-designed adaptation strategies combining engineering approaches with traditional knowledge".to_string(),
            outcome: "Implementation of nature-based coastal protection informed by traditional practices, with contingency plans for managed retreat if necessary".to_string(),
            quote: "The elders' stories provided solutions that weren't visible in our data models. Their narratives weren't just values to consider - they were technical knowledge we had missed.".to_string(),
        },
    ]
}

pub fn approaches() -> Vec<IntegrationApproach> {
    vec![
        IntegrationApproach {
            id: "approach1".to_string(),
            name: "Sequential Methodology".to_string(),
            description: "Starting with quantitative analysis, then using qualitative insights to add context, and finally incorporating narrative elements to deepen understanding".to_string(),
            steps: strings(&[
                "Begin with data analysis to identify patterns and trends",
                "Conduct qualitative research to explore context and meaning",
                "Integrate narrative elements to illuminate lived experience",
                "Synthesize insights across all evidence forms",
            ]),
            strengths: strings(&[
                "Builds on familiar methodological approaches",
                "Creates clear structure for evidence combination",
                "Accessible to those with traditional research backgrounds",
            ]),
            limitations: strings(&[
                "May privilege quantitative evidence by positioning it first",
                "Can miss opportunities for narratives to shape initial inquiry",
                "Risk of treating narratives as merely illustrative",
            ]),
        },
        IntegrationApproach {
            id: "approach2".to_string(),
            name: "Narrative-First Framework".to_string(),
            description: "Beginning with stories and lived experience, then using other evidence forms to contextualize and validate narrative insights".to_string(),
            steps: strings(&[
                "Start with story-gathering to identify key themes and issues",
                "Analyze narratives to develop initial hypotheses",
                "Test narrative insights with qualitative and quantitative methods",
                "Create integrated evidence narrative centered on lived experience",
            ]),
            strengths: strings(&[
                "Centers those with direct experience of the system",
                "Identifies issues that might be missed in traditional approaches",
                "Creates strong engagement and ownership from communities",
            ]),
            limitations: strings(&[
                "May be perceived as less rigorous by traditional institutions",
                "Requires strong facilitation to gather diverse narratives",
                "Can be challenging to systematize across contexts",
            ]),
        },
        IntegrationApproach {
            id: "approach3".to_string(),
            name: "Tension Navigation Method".to_string(),
            description: "Deliberately surfacing and exploring tensions between different evidence forms to generate deeper insights".to_string(),
            steps: strings(&[
                "Gather evidence across multiple forms without privileging any single approach",
                "Actively identify areas of tension or contradiction between evidence types",
                "Convene multi-perspective dialogue to explore tensions",
                "Develop nuanced understanding that honors complexity",
            ]),
            strengths: strings(&[
                "Transforms apparent contradictions into deeper insights",
                "Avoids false consensus or oversimplification",
                "Creates space for multiple valid perspectives",
            ]),
            limitations: strings(&[
                "Can be uncomfortable for those seeking simple answers",
                "Requires skilled facilitation to navigate tensions productively",
                "May appear indecisive to stakeholders seeking clarity",
            ]),
        },
    ]
}
