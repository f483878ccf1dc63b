//! Configuration for the analytics engine.
//!
//! Lookup tables (type labels, referral labels, valid-type sets) and
//! report parameters are immutable configuration injected into components
//! at construction time, never module-level state. The `Default` impls
//! carry the residency-program values used in production; tests swap in
//! alternate vocabularies freely.

use linked_hash_map::LinkedHashMap;
use rustc_hash::FxHashSet;

/// Static label vocabularies consumed by the aggregators
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Consultation type code to human-readable label
    pub type_labels: LinkedHashMap<String, String>,
    /// Referral category code to human-readable label
    pub referral_labels: LinkedHashMap<String, String>,
    /// Known supervision autonomy levels, least to most autonomous
    pub autonomy_levels: Vec<String>,
}

impl Vocabulary {
    /// Label for a consultation type code; unknown codes pass through
    #[must_use]
    pub fn type_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.type_labels.get(code).map_or(code, String::as_str)
    }

    /// Label for a referral category code; unknown codes pass through
    #[must_use]
    pub fn referral_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.referral_labels.get(code).map_or(code, String::as_str)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let type_labels = [
            ("adult-health", "Adult health"),
            ("child-health", "Child health"),
            ("maternal-health", "Maternal health"),
            ("family-planning", "Family planning"),
            ("elderly-care", "Elderly care"),
            ("acute", "Acute illness"),
            ("home-visit", "Home visit"),
        ];
        let referral_labels = [
            ("general-surgery", "General surgery"),
            ("orthopedics", "Orthopedics"),
            ("pediatrics", "Pediatrics"),
            ("obgyn", "Obstetrics and gynecology"),
            ("internal-medicine", "Internal medicine"),
            ("psychiatry", "Psychiatry"),
            ("emergency", "Emergency department"),
        ];

        Self {
            type_labels: to_label_map(&type_labels),
            referral_labels: to_label_map(&referral_labels),
            autonomy_levels: vec![
                "observed".to_string(),
                "shoulder-to-shoulder".to_string(),
                "partial".to_string(),
                "full".to_string(),
            ],
        }
    }
}

fn to_label_map(pairs: &[(&str, &str)]) -> LinkedHashMap<String, String> {
    pairs
        .iter()
        .map(|(code, label)| ((*code).to_string(), (*label).to_string()))
        .collect()
}

/// An urgency reporting group: a label, the rotation categories it
/// matches, and how many busiest days count toward the sample
#[derive(Debug, Clone)]
pub struct UrgencyGroup {
    /// Section label in the report payload
    pub label: String,
    /// Rotation keys matched by this group (canonical lower-case form)
    pub match_categories: Vec<String>,
    /// Number of busiest days selected per group
    pub day_limit: usize,
}

impl UrgencyGroup {
    /// Create a group matching a single rotation category
    #[must_use]
    pub fn new(label: &str, categories: &[&str], day_limit: usize) -> Self {
        Self {
            label: label.to_string(),
            match_categories: categories.iter().map(|c| (*c).to_string()).collect(),
            day_limit,
        }
    }
}

/// A complementary-training internship group sampled in the mid-year report
#[derive(Debug, Clone)]
pub struct InternshipGroup {
    /// Section label in the report payload
    pub label: String,
    /// Rotation keys belonging to this group (canonical lower-case form)
    pub internships: Vec<String>,
}

impl InternshipGroup {
    /// Create a group over the given rotation keys
    #[must_use]
    pub fn new(label: &str, internships: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            internships: internships.iter().map(|i| (*i).to_string()).collect(),
        }
    }
}

/// Parameters of the year-1 sample report
#[derive(Debug, Clone)]
pub struct YearOneConfig {
    /// Number of best weeks sampled
    pub week_limit: usize,
    /// Minimum distinct consultation days a week must cover
    pub min_days_per_week: u32,
    /// First calendar month eligible for sampling
    pub start_month: u32,
    /// Last calendar month eligible for sampling
    pub end_month: u32,
    /// Urgent-care reporting groups
    pub urgency: Vec<UrgencyGroup>,
}

/// Parameters of the years-2/3 sample report
#[derive(Debug, Clone)]
pub struct MidYearsConfig {
    /// Number of best weeks sampled per program year
    pub week_limit: usize,
    /// Minimum distinct consultation days a week must cover
    pub min_days_per_week: u32,
    /// Urgent-care reporting groups
    pub urgency: Vec<UrgencyGroup>,
    /// Number of top problem codes reported
    pub top_codes_limit: usize,
    /// Complementary-training groups, each sampled independently
    pub complementary: Vec<InternshipGroup>,
    /// Number of best weeks sampled per complementary group
    pub complementary_week_limit: usize,
}

/// Full report-pipeline configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Location key for unit (practice) consultations
    pub unit_location: String,
    /// Location key for urgent-care encounters
    pub urgent_location: String,
    /// Location key for complementary-training encounters
    pub complementary_location: String,
    /// Autonomy level required by the year-4 summary
    pub full_autonomy: String,
    /// Consultation types counted in unit summaries
    pub unit_types: FxHashSet<String>,
    /// Year-1 pipeline parameters
    pub year_one: YearOneConfig,
    /// Years-2/3 pipeline parameters
    pub mid_years: MidYearsConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let unit_types: FxHashSet<String> = [
            "adult-health",
            "child-health",
            "maternal-health",
            "family-planning",
            "elderly-care",
        ]
        .iter()
        .map(|t| (*t).to_string())
        .collect();

        Self {
            unit_location: "unit".to_string(),
            urgent_location: "urgent-care".to_string(),
            complementary_location: "complementary".to_string(),
            full_autonomy: "full".to_string(),
            unit_types,
            year_one: YearOneConfig {
                week_limit: 4,
                min_days_per_week: 3,
                start_month: 7,
                end_month: 12,
                urgency: vec![
                    UrgencyGroup::new("General surgery", &["general-surgery"], 2),
                    UrgencyGroup::new("Orthopedics", &["orthopedics"], 2),
                ],
            },
            mid_years: MidYearsConfig {
                week_limit: 15,
                min_days_per_week: 3,
                urgency: vec![
                    UrgencyGroup::new("Pediatrics", &["pediatrics"], 2),
                    UrgencyGroup::new("Obstetrics and gynecology", &["obgyn"], 2),
                    UrgencyGroup::new("Internal medicine", &["internal-medicine"], 2),
                    UrgencyGroup::new("Psychiatry", &["psychiatry"], 1),
                ],
                top_codes_limit: 20,
                complementary: vec![
                    InternshipGroup::new("Dermatology", &["dermatology"]),
                    InternshipGroup::new("Ophthalmology", &["ophthalmology"]),
                    InternshipGroup::new("Cardiology", &["cardiology"]),
                ],
                complementary_week_limit: 4,
            },
        }
    }
}
