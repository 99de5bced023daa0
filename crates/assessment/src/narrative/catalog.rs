/// Section-specific wording used by the report generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionNarrative {
    pub excellence: &'static str,
    pub development: &'static str,
    pub why_it_matters: &'static str,
}

const GENERIC: SectionNarrative = SectionNarrative {
    excellence: "This dimension is a clear asset that you can rely on and pass on to others.",
    development: "Targeted practice and regular feedback in this dimension will raise your overall effectiveness.",
    why_it_matters: "Each dimension contributes to how effectively you lead and support your team.",
};

const CATALOG: [(u32, SectionNarrative); 9] = [
    (
        1,
        SectionNarrative {
            excellence: "You show a remarkable ability to set a clear vision and inspire your teams. Your leadership is a major asset for rallying people around shared objectives.",
            development: "Strengthening your leadership and your ability to communicate a clear vision will increase your influence and help you mobilise your teams around shared objectives. Strategic leadership training is recommended.",
            why_it_matters: "Teams that understand where they are heading make better decisions without waiting for instructions.",
        },
    ),
    (
        2,
        SectionNarrative {
            excellence: "Your interpersonal communication lets you build trust and keep an open dialogue with your colleagues, which is essential to a positive working climate.",
            development: "Developing your communication and interpersonal skills will markedly improve the quality of your exchanges and strengthen trust within your team. Active listening and assertiveness are the key levers.",
            why_it_matters: "Most operational friction starts with a message that was unclear, late or never sent.",
        },
    ),
    (
        3,
        SectionNarrative {
            excellence: "You master the art of developing talent. Your structured approach to evaluating and growing skills contributes directly to your team's performance.",
            development: "Investing in performance management will help you support your colleagues as they grow. Regular feedback and SMART objectives are essential.",
            why_it_matters: "People progress fastest when expectations are explicit and feedback is frequent.",
        },
    ),
    (
        4,
        SectionNarrative {
            excellence: "Your agility in the face of change and your capacity to innovate are valuable assets. You know how to guide your teams through transformation.",
            development: "Improving how you manage change and encourage innovation will help you anticipate and support transformations. Work on your managerial agility and openness to new approaches.",
            why_it_matters: "Organisations change faster than job descriptions; teams look to their manager to make sense of it.",
        },
    ),
    (
        5,
        SectionNarrative {
            excellence: "Your decision process is structured and considered. You analyse complex situations and make informed decisions, even under uncertainty.",
            development: "Strengthening your decision making will make you more effective in complex situations. Work on your analysis methods and involve your team in the decision process.",
            why_it_matters: "Slow or opaque decisions stall the whole team and erode confidence.",
        },
    ),
    (
        6,
        SectionNarrative {
            excellence: "Your management of time and priorities is exemplary. It lets you optimise your own effectiveness and your team's in the face of competing demands.",
            development: "Optimising how you manage time and priorities will directly improve your effectiveness and your team's. Explore prioritisation methods and learn to delegate effectively.",
            why_it_matters: "A manager's calendar sets the tempo for the team's priorities.",
        },
    ),
    (
        7,
        SectionNarrative {
            excellence: "Your technical and operational skills are strong. This expertise gives you real credibility with your teams and lets you act effectively on operational matters.",
            development: "Developing your technical and operational skills will strengthen your credibility and your ability to support your team on the ground. Targeted upskilling is recommended.",
            why_it_matters: "Credibility on the substance of the work makes every other managerial conversation easier.",
        },
    ),
    (
        8,
        SectionNarrative {
            excellence: "Your ability to build and sustain engagement within your team is remarkable. You cultivate team spirit and mobilise collective energy.",
            development: "Investing in engagement and team spirit will transform the collective dynamic. Create moments of exchange, celebrate successes and build a strong sense of belonging.",
            why_it_matters: "Engaged teams absorb pressure better and retain their best people.",
        },
    ),
    (
        9,
        SectionNarrative {
            excellence: "Your high emotional intelligence lets you understand and manage your own emotions and those of your colleagues, creating a harmonious working environment.",
            development: "Strengthening your emotional intelligence will help you handle complex relational situations and build a climate of trust. Stress management and empathy are key skills to develop.",
            why_it_matters: "Emotional climate drives how openly people raise problems and ideas.",
        },
    ),
];

/// Wording for `section_id`, or generic text for sections outside the reference set.
pub fn section_narrative(section_id: u32) -> &'static SectionNarrative {
    CATALOG
        .iter()
        .find(|(id, _)| *id == section_id)
        .map(|(_, narrative)| narrative)
        .unwrap_or(&GENERIC)
}

/// Fixed development plan appended to every report.
pub const DEVELOPMENT_PLAN: [(&str, &str); 5] = [
    (
        "Build on your strengths",
        "Keep developing and refining your strongest competencies; they form your distinctive managerial signature.",
    ),
    (
        "Prioritise your development areas",
        "Focus on two or three priority competencies over the next six months, starting with those that will have the most impact on your effectiveness.",
    ),
    (
        "Ask for feedback",
        "Regularly ask your team, peers and manager how they perceive your management practices to uncover blind spots.",
    ),
    (
        "Keep learning",
        "Take part in training, seminars or coaching in the areas identified as priorities.",
    ),
    (
        "Practise regularly",
        "Apply newly acquired skills immediately in your day-to-day professional context.",
    ),
];
