use serde::{Deserialize, Serialize};

pub const EXCELLENCE_THRESHOLD: f64 = 80.0;
pub const SOLID_THRESHOLD: f64 = 60.0;
pub const DEVELOPMENT_THRESHOLD: f64 = 40.0;

pub const STRONG_PROFILE_THRESHOLD: f64 = 70.0;
pub const GOOD_PROFILE_THRESHOLD: f64 = 60.0;

/// Qualitative band for one section. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellence,
    Solid,
    Development,
    Priority,
}

impl Tier {
    pub fn classify(percentage: f64) -> Self {
        if percentage >= EXCELLENCE_THRESHOLD {
            Self::Excellence
        } else if percentage >= SOLID_THRESHOLD {
            Self::Solid
        } else if percentage >= DEVELOPMENT_THRESHOLD {
            Self::Development
        } else {
            Self::Priority
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellence => "Excellence",
            Self::Solid => "Solid",
            Self::Development => "Development",
            Self::Priority => "Priority",
        }
    }

    pub const fn commentary(self) -> &'static str {
        match self {
            Self::Excellence => "Key strength: this dimension is mastered to an excellent standard.",
            Self::Solid => {
                "Solid competency: this dimension is well developed, with a few opportunities to refine it."
            }
            Self::Development => {
                "Development area: this dimension needs focused attention to progress."
            }
            Self::Priority => "Development priority: this dimension calls for in-depth work.",
        }
    }
}

/// Overall profile band driving the closing synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileBand {
    Strong,
    Good,
    Emerging,
}

impl ProfileBand {
    pub fn classify(percentage: f64) -> Self {
        if percentage >= STRONG_PROFILE_THRESHOLD {
            Self::Strong
        } else if percentage >= GOOD_PROFILE_THRESHOLD {
            Self::Good
        } else {
            Self::Emerging
        }
    }

    pub const fn conclusion(self) -> &'static str {
        match self {
            Self::Strong => {
                "Your managerial profile is very strong and shows advanced mastery of many essential \
                 dimensions. By continuing to work on the few areas identified, you will further \
                 increase your impact and effectiveness as a manager. You have every asset needed to \
                 excel in your role and lead your team towards excellence."
            }
            Self::Good => {
                "Your managerial profile shows a good level of competency with solid foundations to \
                 build on. By working on the development areas identified, you can significantly \
                 increase your impact and effectiveness. Your potential is real and deserves to be \
                 cultivated to reach managerial excellence."
            }
            Self::Emerging => {
                "Your managerial profile shows potential to develop. This assessment is a valuable \
                 opportunity to identify clearly the areas to strengthen. By focusing on the priority \
                 areas and committing to a structured development path, you can progress quickly and \
                 gain managerial effectiveness. Every competency can be developed with practice and \
                 support."
            }
        }
    }
}
