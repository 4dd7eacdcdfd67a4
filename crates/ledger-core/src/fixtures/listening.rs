use crate::model::{
    AssessmentDimension, ListeningCaseStudy, ListeningLevel, OrganizationAssessment,
};

fn level(
    level: u8,
    name: &str,
    description: &str,
    characteristics: [&str; 3],
    systemic_impact: &str,
    color: &str,
) -> ListeningLevel {
    ListeningLevel {
        level,
        name: name.to_string(),
        description: description.to_string(),
        characteristics: characteristics.iter().map(|c| c.to_string()).collect(),
        systemic_impact: systemic_impact.to_string(),
        color: color.to_string(),
    }
}

pub fn levels() -> Vec<ListeningLevel> {
    vec![
        level(
            1,
            "Listening to Respond",
            "Focused on formulating a reply rather than understanding",
            [
                "Preparing counter-arguments while others speak",
                "Seeking information to confirm existing views",
                "Minimal engagement with differing perspectives",
            ],
            "Low - Reproduces existing power dynamics",
            "#ef4444",
        ),
        level(
            2,
            "Listening to Understand",
            "Actively seeking to comprehend the speaker's meaning",
            [
                "Asking clarifying questions",
                "Reflecting back what was heard",
                "Suspending judgment temporarily",
            ],
            "Medium - Creates space for alternative viewpoints",
            "#f59e0b",
        ),
        level(
            3,
            "Empathic Listening",
            "Connecting with emotional context and lived experience",
            [
                "Attending to emotional content",
                "Recognizing unspoken meanings",
                "Acknowledging the speaker's experience",
            ],
            "Medium-High - Validates marginalized perspectives",
            "#3b82f6",
        ),
        level(
            4,
            "Generous Listening",
            "Creating space for new possibilities to emerge",
            [
                "Suspending assumptions completely",
                "Being comfortable with silence",
                "Allowing for emergence of unexpected insights",
            ],
            "High - Opens pathways for innovation",
            "#8b5cf6",
        ),
        level(
            5,
            "Transformative Listening",
            "Allowing oneself to be changed by what is heard",
            [
                "Willingness to revise deeply held beliefs",
                "Co-creating meaning with the speaker",
                "Redistributing power through listening practice",
            ],
            "Very High - Catalyzes systemic transformation",
            "#10b981",
        ),
    ]
}

pub fn case_studies() -> Vec<ListeningCaseStudy> {
    vec![
        ListeningCaseStudy {
            id: "cs1".to_string(),
            title: "Melbourne Community Budget Dialogues".to_string(),
            level: 4,
            context: "Local government initially approached budget consultations as information-sharing sessions".to_string(),
            transformation: "Shifted to community listening circles where officials participated without speaking until all community members had been heard".to_string(),
            impact: "Resulted in 40% reallocation of discretionary funds based on previously unheard community priorities".to_string(),
            quote: "I've sat through budget consultations for 15 years, but this was the first time I felt we weren't just ticking a box - we were genuinely being influenced by community wisdom.".to_string(),
            quote_author: "City Councilor, Melbourne".to_string(),
        },
        ListeningCaseStudy {
            id: "cs2".to_string(),
            title: "Indigenous Health Story Circles".to_string(),
            level: 5,
            context: "Health services in rural Australia struggled to engage Indigenous communities in health planning".to_string(),
            transformation: "Adopted story circle methodology, with health workers listening without agenda and co-designing solutions with community storytellers".to_string(),
            impact: "Led to 3x increase in service uptake and new culturally grounded health programs".to_string(),
            quote: "When they listened to our stories, not just our symptoms, we finally felt seen and respected.".to_string(),
            quote_author: "Community Elder, Northern Territory".to_string(),
        },
    ]
}

pub fn sample_assessment() -> OrganizationAssessment {
    let dims = [
        ("Suspension of Judgment", 3.2),
        ("Emotional Awareness", 2.8),
        ("Diverse Perspectives", 3.5),
        ("Power Dynamics", 2.2),
        ("Narrative Integration", 3.0),
        ("Action on Feedback", 2.7),
    ];
    OrganizationAssessment {
        organization: "Horizon Foundation".to_string(),
        dimensions: dims
            .iter()
            .map(|(name, score)| AssessmentDimension {
                name: name.to_string(),
                score: *score,
            })
            .collect(),
    }
}
