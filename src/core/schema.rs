//! Fixed column layouts for each tier.
//!
//! Column names are reproduced exactly as the classifiers were trained on
//! them, stray whitespace and misspellings included.

use crate::models::Tier;

/// Immutable, versioned description of the columns a tier expects
#[derive(Debug, PartialEq, Eq)]
pub struct FeatureSchema {
    pub tier: Tier,
    pub version: &'static str,
    /// Columns that are rescaled before classification, in request order
    pub numeric: &'static [&'static str],
    /// Columns passed through as categorical codes, in request order
    pub categorical: &'static [&'static str],
    /// Column order the classifier was trained on
    pub full: &'static [&'static str],
}

impl FeatureSchema {
    pub fn for_tier(tier: Tier) -> &'static FeatureSchema {
        match tier {
            Tier::Simple => &SIMPLE_SCHEMA,
            Tier::Enhanced => &ENHANCED_SCHEMA,
        }
    }

    /// Every column a request must carry: numeric first, then categorical
    pub fn required(&self) -> impl Iterator<Item = &'static str> {
        let (numeric, categorical): (&'static [&'static str], &'static [&'static str]) =
            (self.numeric, self.categorical);
        numeric.iter().chain(categorical.iter()).copied()
    }

    pub fn required_len(&self) -> usize {
        self.numeric.len() + self.categorical.len()
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric.contains(&column)
    }
}

pub static SIMPLE_SCHEMA: FeatureSchema = FeatureSchema {
    tier: Tier::Simple,
    version: "general-public/2",
    numeric: &[
        " Age (yrs)",
        "Weight (Kg)",
        "Height(Cm) ",
        "BMI",
        "Pulse rate(bpm) ",
        "RR (breaths/min)",
        "Cycle(R/I)",
        "Cycle length(days)",
        "No. of aborptions",
        "Hip(inch)",
        "Waist(inch)",
        "Waist:Hip Ratio",
        "BP _Systolic (mmHg)",
        "BP _Diastolic (mmHg)",
    ],
    categorical: &[
        "Blood Group",
        "Pregnant(Y/N)",
        "Weight gain(Y/N)",
        "hair growth(Y/N)",
        "Skin darkening (Y/N)",
        "Hair loss(Y/N)",
        "Pimples(Y/N)",
        "Fast food (Y/N)",
        "Reg.Exercise(Y/N)",
    ],
    full: &[
        " Age (yrs)",
        "Weight (Kg)",
        "Height(Cm) ",
        "BMI",
        "Blood Group",
        "Pulse rate(bpm) ",
        "RR (breaths/min)",
        "Cycle(R/I)",
        "Cycle length(days)",
        "Pregnant(Y/N)",
        "No. of aborptions",
        "Hip(inch)",
        "Waist(inch)",
        "Waist:Hip Ratio",
        "Weight gain(Y/N)",
        "hair growth(Y/N)",
        "Skin darkening (Y/N)",
        "Hair loss(Y/N)",
        "Pimples(Y/N)",
        "Fast food (Y/N)",
        "Reg.Exercise(Y/N)",
        "BP _Systolic (mmHg)",
        "BP _Diastolic (mmHg)",
    ],
};

// "TSH (mIU/L)" is required and rescaled but the enhanced classifier was
// trained without it, so it does not appear in `full`.
pub static ENHANCED_SCHEMA: FeatureSchema = FeatureSchema {
    tier: Tier::Enhanced,
    version: "scan/2",
    numeric: &[
        " Age (yrs)",
        "Weight (Kg)",
        "Height(Cm) ",
        "BMI",
        "Pulse rate(bpm) ",
        "Hb(g/dl)",
        "Cycle(R/I)",
        "Cycle length(days)",
        "No. of aborptions",
        "FSH(mIU/mL)",
        "LH(mIU/mL)",
        "FSH/LH",
        "Hip(inch)",
        "Waist(inch)",
        "Waist:Hip Ratio",
        "TSH (mIU/L)",
        "AMH(ng/mL)",
        "Vit D3 (ng/mL)",
        "RBS(mg/dl)",
        "Follicle No. (L)",
        "Follicle No. (R)",
        "Avg. F size (L) (mm)",
        "Avg. F size (R) (mm)",
        "Endometrium (mm)",
    ],
    categorical: &[
        "Pregnant(Y/N)",
        "Weight gain(Y/N)",
        "hair growth(Y/N)",
        "Skin darkening (Y/N)",
        "Hair loss(Y/N)",
        "Pimples(Y/N)",
        "Fast food (Y/N)",
    ],
    full: &[
        " Age (yrs)",
        "Weight (Kg)",
        "Height(Cm) ",
        "BMI",
        "Pulse rate(bpm) ",
        "Hb(g/dl)",
        "Cycle(R/I)",
        "Cycle length(days)",
        "Pregnant(Y/N)",
        "No. of aborptions",
        "FSH(mIU/mL)",
        "LH(mIU/mL)",
        "FSH/LH",
        "Hip(inch)",
        "Waist(inch)",
        "Waist:Hip Ratio",
        "AMH(ng/mL)",
        "Vit D3 (ng/mL)",
        "RBS(mg/dl)",
        "Weight gain(Y/N)",
        "hair growth(Y/N)",
        "Skin darkening (Y/N)",
        "Hair loss(Y/N)",
        "Pimples(Y/N)",
        "Fast food (Y/N)",
        "Follicle No. (L)",
        "Follicle No. (R)",
        "Avg. F size (L) (mm)",
        "Avg. F size (R) (mm)",
        "Endometrium (mm)",
    ],
};
