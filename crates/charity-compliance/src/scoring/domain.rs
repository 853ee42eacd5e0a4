use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three independently scored areas of a compliance assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceDomain {
    Safeguarding,
    Overseas,
    Income,
}

impl ComplianceDomain {
    pub const fn ordered() -> [Self; 3] {
        [Self::Safeguarding, Self::Overseas, Self::Income]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Safeguarding => "Safeguarding",
            Self::Overseas => "Overseas Activity",
            Self::Income => "Income & Fundraising",
        }
    }
}

/// Level of background check held by an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    Basic,
    Standard,
    Enhanced,
    EnhancedWithBarredList,
}

impl CheckType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic DBS",
            Self::Standard => "Standard DBS",
            Self::Enhanced => "Enhanced DBS",
            Self::EnhancedWithBarredList => "Enhanced DBS with Barred List",
        }
    }
}

/// One individual's background-check status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeguardingRecord {
    pub person_id: String,
    pub role_category: String,
    pub check_type: CheckType,
    pub expiry_date: NaiveDate,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

/// One instance of cross-border spending or operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverseasActivity {
    pub country_code: String,
    /// Amount in the smallest reporting currency unit.
    pub amount: i64,
    #[serde(default)]
    pub reporting_required: bool,
    #[serde(default)]
    pub reported: bool,
    #[serde(default)]
    pub sanctions_checked: bool,
}

/// One donation or income event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub amount: i64,
    #[serde(default)]
    pub document_ref: Option<String>,
    #[serde(default)]
    pub related_party: bool,
    #[serde(default)]
    pub gift_aid_eligible: bool,
    #[serde(default)]
    pub gift_aid_claimed: bool,
}

impl IncomeRecord {
    pub fn is_documented(&self) -> bool {
        self.document_ref
            .as_deref()
            .map(|reference| !reference.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn gift_aid_unclaimed(&self) -> bool {
        self.gift_aid_eligible && !self.gift_aid_claimed
    }
}

/// Reference data describing a jurisdiction's risk flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    #[serde(default)]
    pub high_risk: bool,
    #[serde(default)]
    pub sanctioned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingSeverity {
    Notice,
    Warning,
    Critical,
}

impl FindingSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Notice => "Notice",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}
