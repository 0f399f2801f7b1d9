//! Supernova type and discovering-survey classification
//!
//! A record counts as a supernova when its claimed type names a supernova
//! class, or when its name follows the legacy `SN1xxx` convention. Survey
//! labels come from an ordered rule table where the first match wins.

use chrono::Datelike;
use log::info;

use crate::clean::Record;

/// Claimed-type substrings that mark a supernova class
const SN_TYPE_TOKENS: [&str; 4] = ["Ia", "Ib", "Ic", "II"];

/// Check the claimed type for a supernova class designation
pub fn is_supernova_type(claimed_type: &str) -> bool {
    claimed_type == "I" || SN_TYPE_TOKENS.iter().any(|t| claimed_type.contains(t))
}

/// Legacy designations like `SN1987A` carry no type but are supernovae
pub fn has_legacy_sn_name(name: &str) -> bool {
    name.contains("SN1")
}

/// Discovering survey, with a catch-all for everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Survey {
    Scp,
    Hzsst,
    Loss,
    Essence,
    Snls,
    SdssII,
    SnFactory,
    Ptf,
    Ps1,
    Des,
    Other,
}

/// The ten named surveys, in rule order
pub const NAMED_SURVEYS: [Survey; 10] = [
    Survey::Scp,
    Survey::Hzsst,
    Survey::Loss,
    Survey::Essence,
    Survey::Snls,
    Survey::SdssII,
    Survey::SnFactory,
    Survey::Ptf,
    Survey::Ps1,
    Survey::Des,
];

impl Survey {
    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            Survey::Scp => "SCP",
            Survey::Hzsst => "HZSST",
            Survey::Loss => "LOSS",
            Survey::Essence => "ESSENCE",
            Survey::Snls => "SNLS",
            Survey::SdssII => "SDSS-II",
            Survey::SnFactory => "SNfactory",
            Survey::Ptf => "PTF/iPTF",
            Survey::Ps1 => "PS1",
            Survey::Des => "DES",
            Survey::Other => "other",
        }
    }

    /// Named display color
    pub fn color_name(&self) -> &'static str {
        match self {
            Survey::Scp => "magenta",
            Survey::Hzsst => "gold",
            Survey::Loss => "darkviolet",
            Survey::Essence => "grey",
            Survey::Snls => "brown",
            Survey::SdssII => "cyan",
            Survey::SnFactory => "darkorange",
            Survey::Ptf => "blue",
            Survey::Ps1 => "darkgreen",
            Survey::Des => "red",
            Survey::Other => "lime",
        }
    }

    /// RGB value of the named color
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Survey::Scp => (255, 0, 255),
            Survey::Hzsst => (255, 215, 0),
            Survey::Loss => (148, 0, 211),
            Survey::Essence => (128, 128, 128),
            Survey::Snls => (165, 42, 42),
            Survey::SdssII => (0, 255, 255),
            Survey::SnFactory => (255, 140, 0),
            Survey::Ptf => (0, 0, 255),
            Survey::Ps1 => (0, 100, 0),
            Survey::Des => (255, 0, 0),
            Survey::Other => (0, 255, 0),
        }
    }

    /// Assign a survey from the discoverer text (and name, for SDSS-II)
    pub fn from_attribution(discoverer: &str, name: &str) -> Survey {
        let attribution = Attribution::new(discoverer, name);
        SURVEY_RULES
            .iter()
            .find(|(_, matches)| matches(&attribution))
            .map(|(survey, _)| *survey)
            .unwrap_or(Survey::Other)
    }
}

impl std::fmt::Display for Survey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Text the survey rules look at
struct Attribution<'a> {
    discoverer: &'a str,
    first_segment: &'a str,
    name: &'a str,
}

impl<'a> Attribution<'a> {
    fn new(discoverer: &'a str, name: &'a str) -> Self {
        let first_segment = discoverer.split(',').next().unwrap_or_default().trim();
        Self {
            discoverer,
            first_segment,
            name,
        }
    }
}

type SurveyRule = (Survey, fn(&Attribution) -> bool);

// Order matters: the first matching rule decides.
const SURVEY_RULES: [SurveyRule; 10] = [
    (Survey::Scp, is_scp),
    (Survey::Hzsst, is_hzsst),
    (Survey::Loss, is_loss),
    (Survey::Essence, is_essence),
    (Survey::Snls, is_snls),
    (Survey::SdssII, is_sdss),
    (Survey::SnFactory, is_snfactory),
    (Survey::Ptf, is_ptf),
    (Survey::Ps1, is_ps1),
    (Survey::Des, is_des),
];

fn is_scp(a: &Attribution) -> bool {
    a.discoverer.contains("Supernova Cosmology Project") || a.discoverer.contains("SCP")
}

fn is_hzsst(a: &Attribution) -> bool {
    a.discoverer.contains("HZSST")
}

fn is_loss(a: &Attribution) -> bool {
    a.discoverer.contains("LOSS") || a.discoverer.contains("LOTOSS")
}

fn is_essence(a: &Attribution) -> bool {
    a.discoverer.contains("ESSENCE")
}

fn is_snls(a: &Attribution) -> bool {
    a.discoverer.contains("SNLS") || a.discoverer.contains("Legacy")
}

fn is_sdss(a: &Attribution) -> bool {
    a.discoverer.contains("SDSS-II") || a.name.contains("SDSS-II")
}

fn is_snfactory(a: &Attribution) -> bool {
    a.first_segment == "Nearby Supernova Factory" || a.discoverer.contains("NSF")
}

fn is_ptf(a: &Attribution) -> bool {
    a.first_segment.contains("PTF")
}

fn is_ps1(a: &Attribution) -> bool {
    a.first_segment == "Pan-STARRS1" || a.first_segment == "PS1"
}

fn is_des(a: &Attribution) -> bool {
    a.discoverer.contains("Dark Energy Survey")
}

/// A cleaned record with its derived classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub record: Record,
    pub is_supernova: bool,
    pub year: i32,
    pub survey: Survey,
}

/// Derive the supernova flag, discovery year and survey of a record
pub fn classify(record: Record) -> ClassifiedRecord {
    let is_supernova =
        is_supernova_type(&record.claimed_type) || has_legacy_sn_name(&record.name);
    let year = record.discovered.year();
    let survey = Survey::from_attribution(&record.discoverer, &record.name);

    ClassifiedRecord {
        record,
        is_supernova,
        year,
        survey,
    }
}

/// Classify every record and keep only the supernovae
pub fn select_supernovae(records: Vec<Record>) -> Vec<ClassifiedRecord> {
    let total = records.len();
    let selected: Vec<ClassifiedRecord> = records
        .into_iter()
        .map(classify)
        .filter(|c| c.is_supernova)
        .collect();
    info!("Kept {} supernovae out of {} records", selected.len(), total);
    selected
}
